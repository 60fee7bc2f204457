use std::sync::OnceLock;
use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
}

impl LogLevel {
    fn label(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
        }
    }
}

pub struct Logger {
    prefix: Option<String>,
    min_level: LogLevel,
}

impl Logger {
    fn new(prefix: Option<String>, verbose: bool) -> Self {
        let min_level = if verbose { LogLevel::Debug } else { LogLevel::Info };
        Self { prefix, min_level }
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    pub fn log(&self, level: LogLevel, file: &str, line: u32, message: &str) {
        if !self.enabled(level) {
            return;
        }
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let file_name = file.rsplit(['/', '\\']).next().unwrap_or(file);
        if let Some(ref prefix) = self.prefix {
            println!(
                "[{}][{}][{}][{}:{}] {}",
                timestamp,
                prefix,
                level.label(),
                file_name,
                line,
                message
            );
        } else {
            println!("[{}][{}][{}:{}] {}", timestamp, level.label(), file_name, line, message);
        }
    }
}

pub fn init_logger(prefix: Option<String>, verbose: bool) {
    LOGGER.get_or_init(|| Logger::new(prefix, verbose));
}

/// Messages logged before `init_logger` are dropped, so library code can log
/// unconditionally.
pub fn log(level: LogLevel, file: &str, line: u32, message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(level, file, line, message);
    }
}

pub fn is_enabled(level: LogLevel) -> bool {
    LOGGER.get().is_some_and(|logger| logger.enabled(level))
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log(
            $crate::logger::LogLevel::Info,
            file!(),
            line!(),
            &format!($($arg)*),
        )
    };
}

#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        if $crate::logger::is_enabled($crate::logger::LogLevel::Debug) {
            $crate::logger::log(
                $crate::logger::LogLevel::Debug,
                file!(),
                line!(),
                &format!($($arg)*),
            )
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_filtering() {
        let quiet = Logger::new(None, false);
        assert!(quiet.enabled(LogLevel::Info));
        assert!(!quiet.enabled(LogLevel::Debug));

        let verbose = Logger::new(Some("Test".to_string()), true);
        assert!(verbose.enabled(LogLevel::Debug));
        assert!(verbose.enabled(LogLevel::Info));
    }

    #[test]
    fn test_log_macros_without_init_do_not_panic() {
        crate::log!("score {}", 3);
        crate::debug_log!("food at ({}, {})", 1, 2);
    }
}
