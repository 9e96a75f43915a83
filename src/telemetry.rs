use crate::configuration::LogFormat;
use tracing::Subscriber;
use tracing::subscriber::set_global_default;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{EnvFilter, Registry, fmt::MakeWriter, layer::SubscriberExt};

/// Compose multiple layers into a `tracing`'s subscriber.
///
/// `RUST_LOG` takes precedence over `env_filter`. `LogFormat::Json` emits
/// Bunyan-style records, `LogFormat::Pretty` the usual one-line-per-event text.
pub fn get_subscriber<Sink>(
    name: String,
    env_filter: String,
    format: LogFormat,
    sink: Sink,
) -> Box<dyn Subscriber + Send + Sync>
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));
    let registry = Registry::default().with(env_filter);
    match format {
        LogFormat::Pretty => {
            let formatting_layer = tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(sink);
            Box::new(registry.with(formatting_layer))
        }
        LogFormat::Json => {
            let app_name = format!("{}-{}", name, env!("CARGO_PKG_VERSION"));
            let formatting_layer = BunyanFormattingLayer::new(app_name, sink);
            Box::new(registry.with(JsonStorageLayer).with(formatting_layer))
        }
    }
}

/// Register a subscriber as global default to process span data.
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync + 'static) {
    LogTracer::init().expect("Failed to set logger");
    set_global_default(subscriber).expect("Failed to set subscriber");
}
