//! Logging and tracing initialization.

use std::fs::{File, OpenOptions};
use std::sync::Mutex;

use tracing::Subscriber;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;

type BoxedSubscriber = Box<dyn Subscriber + Send + Sync>;

/// Initialize the tracing subscriber with the given configuration.
pub fn init_logging(config: &LoggingConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    if let Some(path) = config.file.as_ref() {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => {
                let subscriber = file_subscriber(env_filter, file, config.json);
                tracing::subscriber::set_global_default(subscriber).ok();
                return;
            }
            Err(e) => {
                eprintln!("Failed to open log file {}: {e}", path.display());
            }
        }
    }

    if config.json {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .json()
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    } else {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }
}

/// Subscriber writing to `file`, as JSON lines when `json` is set.
fn file_subscriber(env_filter: EnvFilter, file: File, json: bool) -> BoxedSubscriber {
    let builder = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file));

    if json {
        Box::new(builder.json().finish())
    } else {
        Box::new(builder.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_to_file(json: bool) -> String {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("landon.log");
        let file = File::create(&path).unwrap();

        let subscriber = file_subscriber(EnvFilter::new("info"), file, json);
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(role = "mesh-anchors", "Group exported");
        });

        std::fs::read_to_string(&path).unwrap()
    }

    #[test]
    fn test_file_logging_honours_json_flag() {
        let output = log_to_file(true);
        let line = output.lines().next().unwrap();
        let event: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(event["fields"]["message"], "Group exported");
        assert_eq!(event["fields"]["role"], "mesh-anchors");
    }

    #[test]
    fn test_file_logging_defaults_to_plain_text() {
        let output = log_to_file(false);
        assert!(output.contains("Group exported"));
        assert!(serde_json::from_str::<serde_json::Value>(output.trim()).is_err());
    }
}
