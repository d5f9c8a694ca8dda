use crate::error::{CliError, Result as CliResult};

use std::path::Path;
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::debug;
use rh_config::LogLevel;

/// Where log records go. stdout is reserved for command output.
pub enum LogTarget<'a> {
    /// Append to a file, with source locations for later digging.
    File(&'a Path),
    /// Short lines on stderr, optionally colored by level.
    Stderr { colored: bool },
}

pub fn initialize(level: LogLevel, target: LogTarget<'_>) -> CliResult<()> {
    let dispatch = match target {
        LogTarget::File(path) => {
            let file = fern::log_file(path).map_err(|e| {
                CliError::logger(format!("Failed to open log file {}: {}", path.display(), e))
            })?;

            Dispatch::new()
                .format(|out, message, record| {
                    out.finish(format_args!(
                        "[{} - {}] {} [{}:{}]",
                        humantime::format_rfc3339_seconds(SystemTime::now()),
                        record.level(),
                        message,
                        record.file().unwrap_or("unknown"),
                        record.line().unwrap_or(0),
                    ))
                })
                .chain(file)
        }
        LogTarget::Stderr { colored } => {
            let colors = colored.then(|| {
                ColoredLevelConfig::new()
                    .debug(Color::Blue)
                    .info(Color::Green)
                    .warn(Color::Yellow)
                    .error(Color::Red)
            });

            Dispatch::new()
                .format(move |out, message, record| match &colors {
                    Some(colors) => out.finish(format_args!(
                        "{:>5} {}",
                        colors.color(record.level()),
                        message
                    )),
                    None => out.finish(format_args!("{:>5} {}", record.level(), message)),
                })
                .chain(std::io::stderr())
        }
    };

    Dispatch::new()
        .level(level.0)
        // Connection-pool chatter drowns out the client's own records.
        .level_for("hyper_util", log::LevelFilter::Warn)
        .level_for("reqwest", log::LevelFilter::Warn)
        .chain(dispatch)
        .apply()
        .map_err(|e| CliError::logger(e.to_string()))?;

    debug!("Logger initialized at {:?}", level.0);
    Ok(())
}
