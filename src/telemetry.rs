//! src/telemetry.rs

use anyhow::Context;
use tracing::{subscriber::set_global_default, Subscriber};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{fmt::MakeWriter, layer::SubscriberExt, EnvFilter, Registry};

/// Build the JSON (bunyan) subscriber the server logs through.
///
/// `RUST_LOG` wins over `env_filter` when it is set. The `sink` decides where
/// records go: `std::io::stdout` for the binary, `std::io::sink` for quiet tests.
///
/// The return type is `impl Subscriber` because the layered type is unwieldy to
/// spell out; it must be `Send + Sync` to be installed globally.
pub fn get_subscriber<Sink>(
    name: String,
    env_filter: String,
    sink: Sink,
) -> impl Subscriber + Send + Sync
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter: EnvFilter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));
    let formatting_layer: BunyanFormattingLayer<Sink> = BunyanFormattingLayer::new(name, sink);
    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
}

/// Install `subscriber` as the global default and route `log` records into it.
///
/// It should only be called **once** per process.
pub fn init_subscriber<T>(subscriber: T) -> Result<(), anyhow::Error>
where
    T: Subscriber + Send + Sync,
{
    LogTracer::init().context("Failed to redirect `log` records to tracing")?;
    set_global_default(subscriber).context("Failed to set the global tracing subscriber")?;
    Ok(())
}
