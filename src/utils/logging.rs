//! File logger setup.
//!
//! The terminal UI owns stdout and stderr, so log records go to
//! ~/.numcrunch/numcrunch.log instead.

use super::persistence::app_path;
use crate::core::config::GameConfig;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

pub const LOG_FILE: &str = "numcrunch.log";

/// `RUST_LOG` wins when set; otherwise the configured level applies.
pub fn filter_spec(config: &GameConfig, rust_log: Option<String>) -> String {
    match rust_log {
        Some(spec) if !spec.trim().is_empty() => spec,
        _ => config.log_level.clone(),
    }
}

/// Install the global logger. Returns the log file path.
pub fn init(config: &GameConfig) -> io::Result<PathBuf> {
    let path = app_path(LOG_FILE)?;
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    env_logger::Builder::new()
        .parse_filters(&filter_spec(config, std::env::var("RUST_LOG").ok()))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} [{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    Ok(path)
}
