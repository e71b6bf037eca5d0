use std::io::IsTerminal;
use std::sync::OnceLock;

use tracing_subscriber::filter::ParseError;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::runtime::RuntimeConfig;

static INITIALISED: OnceLock<()> = OnceLock::new();

/// Keeps the Chrome trace writer alive; the trace file is flushed on drop.
#[must_use = "dropping the guard flushes and closes the Chrome trace"]
pub struct TracingGuard {
    _chrome: Option<tracing_chrome::FlushGuard>,
}

/// Configures the global tracing subscriber. Logs go to stderr.
pub fn init_tracing(config: &RuntimeConfig) -> Result<TracingGuard, InitError> {
    let filter = EnvFilter::try_new(&config.log_filter).map_err(|source| InitError::Filter {
        directives: config.log_filter.clone(),
        source,
    })?;

    INITIALISED
        .set(())
        .map_err(|_| InitError::AlreadyInitialised)?;

    let ansi = std::io::stderr().is_terminal();
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(ansi)
        .with_writer(std::io::stderr);

    let (chrome_layer, chrome_guard) = match &config.chrome_trace {
        Some(path) => {
            let (layer, guard) = tracing_chrome::ChromeLayerBuilder::new()
                .file(path)
                .include_args(true)
                .build();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    Registry::default()
        .with(filter)
        .with(fmt_layer)
        .with(chrome_layer)
        .try_init()?;

    ::tracing::debug!(
        filter = %config.log_filter,
        chrome_trace = config.chrome_trace.is_some(),
        "tracing initialised"
    );
    Ok(TracingGuard {
        _chrome: chrome_guard,
    })
}

/// Errors emitted when configuring the tracing subscriber.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("tracing has already been initialised")]
    AlreadyInitialised,
    #[error("failed to read {key}: {source}")]
    Env {
        key: &'static str,
        #[source]
        source: std::env::VarError,
    },
    #[error("invalid log filter {directives:?}: {source}")]
    Filter {
        directives: String,
        #[source]
        source: ParseError,
    },
    #[error(transparent)]
    Subscriber(#[from] TryInitError),
}
