//! Logger bootstrap.
//!
//! Logs go to stderr unless a directory is configured, in which case they go
//! to size-rotated files there. The returned handle must be kept alive for
//! the lifetime of the process.

use std::path::{Path, PathBuf};

use flexi_logger::{
    Cleanup, Criterion, FileSpec, FlexiLoggerError, Logger, LoggerHandle, Naming, WriteMode,
};
use log::info;
use thiserror::Error;

const LOG_FILE_BASENAME: &str = "taskflow";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Unsupported log level '{0}', expected trace|debug|info|warn|error|off")]
    UnsupportedLevel(String),

    #[error("Failed to create log directory '{path}': {source}")]
    CreateDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to start logger: {0}")]
    StartFailed(#[from] FlexiLoggerError),
}

pub fn init_logging(level: &str, log_dir: Option<&Path>) -> Result<LoggerHandle, LoggingError> {
    let level = normalize_level(level)?;
    let logger = Logger::try_with_str(level)?;

    let handle = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir).map_err(|e| LoggingError::CreateDirFailed {
                path: dir.to_path_buf(),
                source: e,
            })?;

            logger
                .log_to_file(
                    FileSpec::default()
                        .directory(dir)
                        .basename(LOG_FILE_BASENAME),
                )
                .rotate(
                    Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(MAX_LOG_FILES),
                )
                .write_mode(WriteMode::BufferAndFlush)
                .append()
                .format_for_files(flexi_logger::detailed_format)
                .start()?
        }
        None => logger
            .log_to_stderr()
            .format_for_stderr(flexi_logger::default_format)
            .start()?,
    };

    info!(
        "event=logging_started level={level} target={}",
        log_dir
            .map(|dir| dir.display().to_string())
            .unwrap_or_else(|| String::from("stderr"))
    );

    Ok(handle)
}

fn normalize_level(level: &str) -> Result<&'static str, LoggingError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        "off" => Ok("off"),
        _ => Err(LoggingError::UnsupportedLevel(level.to_string())),
    }
}
