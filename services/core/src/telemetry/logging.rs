use std::io;

use tracing::subscriber::set_global_default;
use tracing::Subscriber;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry};

/// Compose the layers used by every mapper consumer into a tracing subscriber that logs to stdout.
///
/// `RUST_LOG` wins over `env_filter` when it is set. Records are emitted in Bunyan compatible
/// JSON.
pub fn make_subscriber(name: impl Into<String>, env_filter: impl Into<String>) -> impl Subscriber + Send + Sync {
    make_subscriber_with_writer(name, env_filter, io::stdout)
}

/// Same as [`make_subscriber`], but sends the records to `sink`.
pub fn make_subscriber_with_writer<W>(
    name: impl Into<String>,
    env_filter: impl Into<String>,
    sink: W,
) -> impl Subscriber + Send + Sync
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter.into()));
    let formatting_layer = BunyanFormattingLayer::new(name.into(), sink);

    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
}

/// Sets the given subscriber as global default and redirects `log` records to it.
///
/// # Panics
///
/// When called more than once per process.
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) {
    LogTracer::init().expect("Failed to set logger");

    set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Utility macro to log information about an error and map it to some other type.
///
/// This is meant to be used in a `Result::map_err`, e.g.:
///
/// ```ignore
/// endpoint.parse::<Uri>().map_err(simple_err_map!("Invalid endpoint.", ContextError::InvalidEndpoint))?;
/// ```
#[macro_export]
macro_rules! simple_err_map {
    ($msg:expr, $result:expr) => {
        |e| {
            tracing::error!(error = ?e, $msg);
            $result
        }
    };
}
