use chrono::Local;
use log::{LevelFilter, Metadata, Record, SetLoggerError};
use std::collections::HashSet;
use std::io::{self, Write};
use std::sync::OnceLock;

/// Debug topics understood by `--debug-filter`
pub const DEBUG_TOPICS: [&str; 5] = ["vehicle", "terrain", "gate", "view", "ui"];

#[derive(Debug)]
struct CarSimLogger {
    level: LevelFilter,
    debug_filters: Option<HashSet<String>>,
}

impl CarSimLogger {
    fn topic_enabled(&self, target: &str) -> bool {
        match &self.debug_filters {
            Some(filters) => {
                filters.contains(target) || filters.iter().any(|f| target.starts_with(f.as_str()))
            }
            None => true,
        }
    }
}

impl log::Log for CarSimLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        if metadata.level() > self.level {
            return false;
        }
        // Topic filters only narrow the chatty levels
        match metadata.level() {
            log::Level::Debug | log::Level::Trace => self.topic_enabled(metadata.target()),
            _ => true,
        }
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let level_color = match record.level() {
            log::Level::Error => "\x1B[31m", // Red
            log::Level::Warn => "\x1B[33m",  // Yellow
            log::Level::Info => "\x1B[32m",  // Green
            log::Level::Debug => "\x1B[36m", // Cyan
            log::Level::Trace => "\x1B[35m", // Magenta
        };
        let reset = "\x1B[0m";
        let timestamp = Local::now().format("%H:%M:%S%.3f");

        let mut output = format!(
            "{timestamp} {level_color}{level:5}{reset} {target}: {message}",
            level = record.level(),
            target = record.target(),
            message = record.args()
        );

        // Topic macros set an explicit target, keep the module for context
        if let Some(module_path) = record.module_path() {
            if module_path != record.target() {
                output.push_str(&format!(" [{}]", module_path));
            }
        }

        let mut stdout = io::stdout().lock();
        // Write errors are dropped
        let _ = writeln!(stdout, "{}", output);
        let _ = stdout.flush();
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
    }
}

static LOGGER: OnceLock<CarSimLogger> = OnceLock::new();

fn parse_filters(filter: Option<String>) -> Option<HashSet<String>> {
    filter.map(|filter_str| {
        filter_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<HashSet<String>>()
    })
}

/// Map a `--log-level` string onto a filter, defaulting to Info
pub fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

// Initialize the logger with optional debug topic filters
pub fn init_logger(level: LevelFilter, debug_filter: Option<String>) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| CarSimLogger {
        level,
        debug_filters: parse_filters(debug_filter),
    });
    log::set_logger(logger).map(|()| log::set_max_level(level))
}

// Topic macros, optionally prefixed with the simulation frame number
#[macro_export]
macro_rules! debug_vehicle {
    (frame = $frame:expr, $($arg:tt)*) => {
        log::debug!(target: "vehicle", "[F{:06}] {}", $frame, format_args!($($arg)*))
    };
    ($($arg:tt)*) => {
        log::debug!(target: "vehicle", "{}", format_args!($($arg)*))
    }
}

#[macro_export]
macro_rules! debug_terrain {
    (frame = $frame:expr, $($arg:tt)*) => {
        log::debug!(target: "terrain", "[F{:06}] {}", $frame, format_args!($($arg)*))
    };
    ($($arg:tt)*) => {
        log::debug!(target: "terrain", "{}", format_args!($($arg)*))
    }
}

#[macro_export]
macro_rules! debug_gate {
    ($($arg:tt)*) => {
        log::debug!(target: "gate", "{}", format_args!($($arg)*))
    }
}

#[macro_export]
macro_rules! debug_view {
    (frame = $frame:expr, $($arg:tt)*) => {
        log::debug!(target: "view", "[F{:06}] {}", $frame, format_args!($($arg)*))
    };
    ($($arg:tt)*) => {
        log::debug!(target: "view", "{}", format_args!($($arg)*))
    }
}

#[macro_export]
macro_rules! debug_ui {
    ($($arg:tt)*) => {
        log::debug!(target: "ui", "{}", format_args!($($arg)*))
    }
}
