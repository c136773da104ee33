//! Tracing initialization from the `logging` config section.
//!
//! The config maps section names to level settings. Section names are crate
//! names (`shopping_list`, `celebrations`, ...); the `default` section is the
//! catch-all and also owns the log file. Console output is human-readable;
//! the file sink is one rotating JSON log shared by every section, resolved
//! against the server home dir.

use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use file_rotate::{
    compression::Compression,
    suffix::{AppendTimestamp, FileLimit},
    ContentLimit, FileRotate,
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{filter::Targets, fmt, prelude::*};

use crate::config::{LoggingConfig, Section};

/// Lenient level parsing: unknown strings fall back to `info`, "off"/"none"
/// disable the sink entirely.
fn parse_level(s: &str) -> Option<LevelFilter> {
    match s.trim().to_ascii_lowercase().as_str() {
        "trace" => Some(LevelFilter::TRACE),
        "debug" => Some(LevelFilter::DEBUG),
        "info" => Some(LevelFilter::INFO),
        "warn" | "warning" => Some(LevelFilter::WARN),
        "error" => Some(LevelFilter::ERROR),
        "off" | "none" => None,
        _ => Some(LevelFilter::INFO),
    }
}

/// Build a `Targets` filter: the `default` section sets the catch-all level,
/// every other section overrides its own crate target.
fn build_targets(cfg: &LoggingConfig, level_of: impl Fn(&Section) -> Option<LevelFilter>) -> Targets {
    let default_level = cfg
        .get("default")
        .and_then(&level_of)
        .unwrap_or(LevelFilter::OFF);

    let mut targets = Targets::new().with_default(default_level);
    for (name, section) in cfg {
        if name == "default" {
            continue;
        }
        let level = level_of(section).unwrap_or(LevelFilter::OFF);
        targets = targets.with_target(name.clone(), level);
    }
    targets
}

/// Resolve a log file path against `base_dir` (the server home dir).
fn resolve_log_path(file: &str, base_dir: &Path) -> PathBuf {
    let p = Path::new(file);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}

// file-rotate's writer is not Clone, so the subscriber shares one handle.
#[derive(Clone)]
struct RotatingWriter(Arc<Mutex<FileRotate<AppendTimestamp>>>);

impl<'a> fmt::MakeWriter<'a> for RotatingWriter {
    type Writer = RotatingWriterHandle;

    fn make_writer(&'a self) -> Self::Writer {
        RotatingWriterHandle(self.0.clone())
    }
}

struct RotatingWriterHandle(Arc<Mutex<FileRotate<AppendTimestamp>>>);

impl Write for RotatingWriterHandle {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.0.lock().unwrap().flush()
    }
}

/// Create the rotating writer for the default section, ensuring the parent
/// directory exists. Rotation is by size; retention prefers `max_backups`
/// and falls back to `max_age_days`.
fn rotating_writer(section: &Section, log_path: &Path) -> std::io::Result<RotatingWriter> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let max_bytes = section.max_size_mb.unwrap_or(100) as usize * 1024 * 1024;
    let retention = match (section.max_backups, section.max_age_days) {
        (Some(n), _) => FileLimit::MaxFiles(n),
        (None, Some(days)) => FileLimit::Age(chrono::Duration::days(days as i64)),
        (None, None) => FileLimit::MaxFiles(7),
    };

    let rot = FileRotate::new(
        log_path,
        AppendTimestamp::default(retention),
        ContentLimit::BytesSurpassed(max_bytes),
        Compression::None,
        #[cfg(unix)]
        None,
    );

    Ok(RotatingWriter(Arc::new(Mutex::new(rot))))
}

/// Initialize the global subscriber from config.
///
/// Safe to call more than once (later calls are no-ops thanks to
/// `try_init`), which keeps tests that share a process from panicking.
pub fn init_logging_from_config(cfg: &LoggingConfig, base_dir: &Path) {
    // Bridge `log` records into tracing before installing the subscriber.
    let _ = tracing_log::LogTracer::init();

    if cfg.is_empty() {
        let _ = fmt()
            .with_target(true)
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .try_init();
        return;
    }

    let console_layer = fmt::layer()
        .with_ansi(std::io::stdout().is_terminal())
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_filter(build_targets(cfg, |s| parse_level(&s.console_level)));

    let file_layer = cfg
        .get("default")
        .filter(|s| !s.file.trim().is_empty())
        .and_then(|section| {
            let log_path = resolve_log_path(&section.file, base_dir);
            match rotating_writer(section, &log_path) {
                Ok(writer) => Some(
                    fmt::layer()
                        .json()
                        .with_ansi(false)
                        .with_target(true)
                        .with_level(true)
                        .with_timer(fmt::time::UtcTime::rfc_3339())
                        .with_writer(writer)
                        .with_filter(build_targets(cfg, |s| parse_level(&s.file_level))),
                ),
                Err(e) => {
                    eprintln!("Failed to open log file '{}': {e}", log_path.display());
                    None
                }
            }
        });

    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_logging_config;
    use tempfile::tempdir;

    #[test]
    fn level_parsing_is_lenient() {
        assert_eq!(parse_level("trace"), Some(LevelFilter::TRACE));
        assert_eq!(parse_level("DEBUG"), Some(LevelFilter::DEBUG));
        assert_eq!(parse_level("Info"), Some(LevelFilter::INFO));
        assert_eq!(parse_level("warn"), Some(LevelFilter::WARN));
        assert_eq!(parse_level("warning"), Some(LevelFilter::WARN));
        assert_eq!(parse_level("ERROR"), Some(LevelFilter::ERROR));
        assert_eq!(parse_level("off"), None);
        assert_eq!(parse_level("none"), None);
        // unknown strings default to info rather than failing startup
        assert_eq!(parse_level("verbose"), Some(LevelFilter::INFO));
    }

    #[test]
    fn targets_take_defaults_from_the_default_section() {
        let mut cfg = default_logging_config();
        cfg.get_mut("default").unwrap().console_level = "warn".into();
        cfg.insert(
            "shopping_list".into(),
            Section {
                console_level: "trace".into(),
                file: String::new(),
                file_level: String::new(),
                max_age_days: None,
                max_backups: None,
                max_size_mb: None,
            },
        );

        let targets = build_targets(&cfg, |s| parse_level(&s.console_level));
        // The catch-all picks up the default section's level...
        assert!(targets.would_enable("pantry_server", &tracing::Level::WARN));
        assert!(!targets.would_enable("pantry_server", &tracing::Level::INFO));
        // ...and named sections override their own crate.
        assert!(targets.would_enable("shopping_list", &tracing::Level::TRACE));
        assert!(targets.would_enable("shopping_list::domain", &tracing::Level::TRACE));
    }

    #[test]
    fn off_disables_a_section() {
        let mut cfg = default_logging_config();
        cfg.insert(
            "celebrations".into(),
            Section {
                console_level: "off".into(),
                file: String::new(),
                file_level: String::new(),
                max_age_days: None,
                max_backups: None,
                max_size_mb: None,
            },
        );

        let targets = build_targets(&cfg, |s| parse_level(&s.console_level));
        assert!(!targets.would_enable("celebrations", &tracing::Level::ERROR));
    }

    #[test]
    fn relative_log_paths_resolve_under_base_dir() {
        let tmp = tempdir().unwrap();
        let resolved = resolve_log_path("logs/pantry.log", tmp.path());
        assert!(resolved.starts_with(tmp.path()));
        assert!(resolved.ends_with("logs/pantry.log"));

        let absolute = tmp.path().join("elsewhere.log");
        assert_eq!(
            resolve_log_path(&absolute.to_string_lossy(), tmp.path()),
            absolute
        );
    }

    #[test]
    fn rotating_writer_creates_parent_dirs() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("nested/dir/pantry.log");
        let section = default_logging_config()["default"].clone();

        let writer = rotating_writer(&section, &path);
        assert!(writer.is_ok());
        assert!(path.parent().unwrap().exists());
    }

    #[test]
    fn init_twice_does_not_panic() {
        let tmp = tempdir().unwrap();
        let cfg = default_logging_config();
        init_logging_from_config(&cfg, tmp.path());
        init_logging_from_config(&cfg, tmp.path());
    }
}
