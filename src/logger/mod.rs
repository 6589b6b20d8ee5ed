//! Logger initialization from configuration.
//!
//! Builds a tracing-subscriber stack with an env-filter level, an optional
//! colored console sink and an optional file sink (full, compact or JSON).

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::layer::{Layer, Layered, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, fmt};

use crate::config::LoggerSettings;
use crate::error::{AppError, AppResult};

type FilteredRegistry = Layered<EnvFilter, Registry>;

/// Initializes the global tracing subscriber from logger settings.
///
/// # Errors
/// - invalid level string
/// - both console and file sinks disabled
/// - log file cannot be opened
pub fn init_logger(settings: &LoggerSettings) -> AppResult<()> {
    if !settings.console.enabled && !settings.file.enabled {
        return Err(AppError::Configuration {
            key: "logger".to_string(),
            source: anyhow::anyhow!("at least one of console or file output must be enabled"),
        });
    }

    let env_filter =
        EnvFilter::try_new(&settings.level).map_err(|e| AppError::Configuration {
            key: "logger.level".to_string(),
            source: anyhow::Error::from(e),
        })?;

    let mut layers: Vec<Box<dyn Layer<FilteredRegistry> + Send + Sync>> = Vec::new();

    if settings.console.enabled {
        layers.push(fmt::layer().with_ansi(settings.console.colored).boxed());
    }

    if settings.file.enabled {
        let path = Path::new(&settings.file.path);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| AppError::Configuration {
                    key: "logger.file.path".to_string(),
                    source: anyhow::Error::from(e),
                })?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| AppError::Configuration {
                key: "logger.file.path".to_string(),
                source: anyhow::Error::from(e),
            })?;
        let writer = Mutex::new(file);

        let layer = match settings.file.format.to_lowercase().as_str() {
            "json" => fmt::layer().json().with_ansi(false).with_writer(writer).boxed(),
            "compact" => fmt::layer().compact().with_ansi(false).with_writer(writer).boxed(),
            "full" => fmt::layer().with_ansi(false).with_writer(writer).boxed(),
            other => {
                return Err(AppError::Configuration {
                    key: "logger.file.format".to_string(),
                    source: anyhow::anyhow!(
                        "invalid log format '{}', expected full, compact or json",
                        other
                    ),
                });
            }
        };
        layers.push(layer);
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layers)
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoggerSettings;

    #[test]
    fn rejects_all_sinks_disabled() {
        let mut settings = LoggerSettings::default();
        settings.console.enabled = false;
        settings.file.enabled = false;

        let result = init_logger(&settings);
        assert!(matches!(result, Err(AppError::Configuration { .. })));
    }
}
