use anyhow::Context;

use dist_server::{
    configuration::{get_configuration, Settings},
    startup::Application,
    telemetry::{get_subscriber, init_subscriber},
};

/// Main function to start service.
#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let subscriber = get_subscriber("dist_server".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber)?;

    // Bail out if we cannot read configuration!
    let configuration: Settings = get_configuration().context("Failed to read configuration.")?;
    let application = Application::build(configuration)
        .await
        .context("Failed to build application.")?;
    tracing::info!(port = application.port(), "Serving importer files.");
    application.run_until_stopped().await?;
    Ok(())
}
