//! stderr logging. stdout is reserved for the JSON document.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Map `-d` repetitions to a level. `RUST_LOG` still narrows per module.
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

pub fn setup_logging(verbosity: u8) {
    let filter = level_for(verbosity);

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false);

    let env_filter = EnvFilter::builder()
        .with_default_directive(filter.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter).with_filter(env_filter))
        .init();

    match filter {
        LevelFilter::INFO => tracing::info!("Debug mode: info"),
        LevelFilter::DEBUG => tracing::debug!("Debug mode: debug"),
        LevelFilter::TRACE => tracing::trace!("Debug mode: trace"),
        _ => {}
    }
}
