//! src/startup.rs
use actix_web::{dev::Server, web, App, HttpServer};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

use crate::{
    configuration::Settings,
    reader::FileContentReader,
    routes::{health_check, serve_file},
};

/// Bound but not yet running server, plus the port it actually got.
pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, std::io::Error> {
        let reader = FileContentReader::from_settings(&configuration.reader);
        if !reader.base_directory().is_dir() {
            // The importer may not have run yet; requests will 404 until it does.
            tracing::warn!(
                base_directory = %reader.base_directory().display(),
                "Base directory does not exist yet."
            );
        }

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        // Port 0 lets the OS pick; read it back before handing the listener over.
        let listener: TcpListener = TcpListener::bind(address)?;
        let port: u16 = listener.local_addr()?.port();
        // Hand the listener over; `run` does not start serving until awaited.
        let server: Server = run(listener, reader)?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Only returns once the server has stopped.
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(listener: TcpListener, reader: FileContentReader) -> Result<Server, std::io::Error> {
    // Wrapped in an `Arc` once; every worker gets a clone of the pointer.
    let reader = web::Data::new(reader);
    let server: Server = HttpServer::new(move || {
        App::new()
            // Every request gets a span with a request_id attached.
            .wrap(TracingLogger::default())
            .route("/health-check", web::get().to(health_check))
            // `.*` so nested names like `sub/file.txt` reach the handler whole.
            .route("/files/{name:.*}", web::get().to(serve_file))
            .app_data(reader.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}
