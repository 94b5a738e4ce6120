use crate::cli::json_log_behaviour::JsonLogBehaviour;
use eyre::WrapErr;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber.
///
/// `log_level` replaces the filter outright. Without it `RUST_LOG` applies, then `info`.
///
/// # Errors
///
/// Returns an error if the filter does not parse, the JSON log file cannot be opened,
/// or a subscriber is already installed.
pub fn init_tracing(log_level: Option<String>, json: JsonLogBehaviour) -> eyre::Result<()> {
    let filter = match log_level {
        Some(level) => EnvFilter::try_new(&level)
            .wrap_err_with(|| format!("Invalid log filter '{level}'"))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    };

    let registry = tracing_subscriber::registry().with(filter);
    match json {
        JsonLogBehaviour::None => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()?,
        JsonLogBehaviour::Stderr => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?,
        JsonLogBehaviour::File(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .wrap_err_with(|| format!("Failed to open log file {}", path.display()))?;
            registry
                .with(fmt::layer().with_writer(std::io::stderr))
                .with(
                    fmt::layer()
                        .json()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()?;
        }
    }
    Ok(())
}
