//! tests/api/helpers.rs
use dist_server::{
    configuration::{get_configuration, Settings},
    startup::Application,
    telemetry::{get_subscriber, init_subscriber},
};
use reqwest::{Client, Response};
use std::sync::OnceLock;
use tempfile::TempDir;

// Set up tracing at most once per test binary.
static TRACING: OnceLock<()> = OnceLock::new();

/// A running app whose base directory is a fresh temp dir.
pub struct TestApp {
    pub address: String,
    pub api_client: Client,
    // Dropping it removes the directory, so it lives as long as the app.
    pub base_directory: TempDir,
}

impl TestApp {
    /// Place a file under the base directory, creating parents as needed.
    pub fn add_file(&self, name: &str, content: &str) {
        let path = self.base_directory.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories.");
        }
        std::fs::write(path, content).expect("Failed to write file.");
    }

    pub fn add_directory(&self, name: &str) {
        std::fs::create_dir_all(self.base_directory.path().join(name))
            .expect("Failed to create directory.");
    }

    pub async fn get_file(&self, name: &str) -> Response {
        self.api_client
            .get(&format!("{}/files/{}", &self.address, name))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_health_check(&self) -> Response {
        self.api_client
            .get(&format!("{}/health-check", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

/// Like `spawn_app`, but lets the test tweak settings before the build.
pub async fn spawn_app_with(customise: impl FnOnce(&mut Settings)) -> TestApp {
    // Set `TEST_LOG` to see the bunyan output.
    TRACING.get_or_init(|| {
        let result = if std::env::var("TEST_LOG").is_ok() {
            init_subscriber(get_subscriber("test".into(), "debug".into(), std::io::stdout))
        } else {
            init_subscriber(get_subscriber("test".into(), "debug".into(), std::io::sink))
        };
        result.expect("Failed to initialise tracing.");
    });

    let base_directory: TempDir = tempfile::tempdir().expect("Failed to create base directory.");

    // Randomise configuration to ensure test isolation
    let mut configuration: Settings = get_configuration().expect("Failed to read configuration.");
    configuration.application.port = 0;
    configuration.reader.base_directory = base_directory.path().to_path_buf();
    customise(&mut configuration);

    let application = Application::build(configuration)
        .await
        .expect("Failed to build application.");
    let port: u16 = application.port();
    let _ = tokio::spawn(application.run_until_stopped());

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        api_client: Client::new(),
        base_directory,
    }
}
