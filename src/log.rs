// Author: Dustin Pilgrim
// License: MIT

use std::fmt::Arguments;
use std::fs::{File, OpenOptions, create_dir_all};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Local, NaiveDate};

#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum LogLevel {
    Error = 1,
    Warn  = 2,
    Info  = 3,
    Debug = 4,
}

impl LogLevel {
    /// Single-letter tag written at the start of every line
    pub fn initial(&self) -> char {
        match self {
            LogLevel::Error => 'E',
            LogLevel::Warn  => 'W',
            LogLevel::Info  => 'I',
            LogLevel::Debug => 'D',
        }
    }

    /// Get ANSI color code for terminal output
    fn color(&self) -> &'static str {
        match self {
            LogLevel::Error => "\x1b[31m", // Red
            LogLevel::Warn  => "\x1b[33m", // Yellow
            LogLevel::Info  => "\x1b[36m", // Cyan
            LogLevel::Debug => "\x1b[90m", // Gray
        }
    }
}

const RESET_COLOR: &str = "\x1b[0m";

/// Destination for tracker records.
///
/// Implementations must never fail outward: a record that cannot be stored is
/// reported on stderr and dropped.
pub trait LogSink: Send + Sync + 'static {
    fn write(&self, level: LogLevel, at: DateTime<Local>, message: &str);

    fn flush(&self) {}
}

/// Render one record the way it lands in the file.
pub fn format_line(level: LogLevel, at: DateTime<Local>, message: &str) -> String {
    format!("{} {} {}", level.initial(), at.format("%Y-%m-%d %H:%M:%S"), message)
}

/// File name for a given day: `{prefix}_{YYYY-MM-DD}`.
pub fn dated_path(prefix: &Path, day: NaiveDate) -> PathBuf {
    PathBuf::from(format!("{}_{}", prefix.display(), day.format("%Y-%m-%d")))
}

struct OpenFile {
    day: NaiveDate,
    file: File,
}

/// Append-only log whose file name follows the calendar day of each record.
pub struct DatedLog {
    prefix: PathBuf,
    level: LogLevel,
    echo: bool,
    current: Mutex<Option<OpenFile>>,
}

impl DatedLog {
    pub fn new(prefix: impl Into<PathBuf>, level: LogLevel) -> Self {
        Self {
            prefix: prefix.into(),
            level,
            echo: false,
            current: Mutex::new(None),
        }
    }

    /// Mirror accepted lines to stderr.
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn path_for(&self, day: NaiveDate) -> PathBuf {
        dated_path(&self.prefix, day)
    }

    fn open(&self, day: NaiveDate) -> io::Result<File> {
        let path = self.path_for(day);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                create_dir_all(parent)?;
            }
        }

        OpenOptions::new().create(true).append(true).open(&path)
    }

    fn write_line(&self, day: NaiveDate, line: &str) -> io::Result<()> {
        let mut current = self
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let stale = current.as_ref().is_none_or(|open| open.day != day);
        if stale {
            *current = Some(OpenFile {
                day,
                file: self.open(day)?,
            });
        }

        match current.as_mut() {
            Some(open) => {
                writeln!(open.file, "{}", line)?;
                open.file.flush()
            }
            None => Ok(()),
        }
    }
}

impl LogSink for DatedLog {
    fn write(&self, level: LogLevel, at: DateTime<Local>, message: &str) {
        if level > self.level {
            return;
        }

        let line = format_line(level, at, message);

        if let Err(e) = self.write_line(at.date_naive(), &line) {
            eprintln!("Failed to write log: {}", e);
        }

        if self.echo {
            eprintln!("{}●{} {}", level.color(), RESET_COLOR, line);
        }
    }

    fn flush(&self) {
        let mut current = self
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(open) = current.as_mut() {
            let _ = open.file.flush();
            let _ = open.file.sync_data();
        }
    }
}

/// Write a formatted record to `sink`, stamped with the current local time.
pub fn log_message(sink: &dyn LogSink, level: LogLevel, args: Arguments) {
    sink.write(level, Local::now(), &args.to_string());
}

/// Flexible macro to allow formatted logging
#[macro_export]
macro_rules! slog {
    ($sink:expr, $level:expr, $($arg:tt)*) => {
        $crate::log::log_message(&*$sink, $level, format_args!($($arg)*))
    };
}

/// Convenience macros
#[macro_export]
macro_rules! sinfo {
    ($sink:expr, $($arg:tt)*) => { $crate::slog!($sink, $crate::log::LogLevel::Info, $($arg)*) };
}

#[macro_export]
macro_rules! swarn {
    ($sink:expr, $($arg:tt)*) => { $crate::slog!($sink, $crate::log::LogLevel::Warn, $($arg)*) };
}

#[macro_export]
macro_rules! serror {
    ($sink:expr, $($arg:tt)*) => { $crate::slog!($sink, $crate::log::LogLevel::Error, $($arg)*) };
}

#[macro_export]
macro_rules! sdebug {
    ($sink:expr, $($arg:tt)*) => { $crate::slog!($sink, $crate::log::LogLevel::Debug, $($arg)*) };
}

/// In-memory sink used by tests to inspect what the tracker wrote.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryLog {
    records: Mutex<Vec<(LogLevel, String)>>,
}

#[cfg(test)]
impl MemoryLog {
    pub fn records(&self) -> Vec<(LogLevel, String)> {
        self.records.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.records().into_iter().map(|(_, m)| m).collect()
    }

    pub fn clear(&self) {
        self.records.lock().unwrap().clear();
    }
}

#[cfg(test)]
impl LogSink for MemoryLog {
    fn write(&self, level: LogLevel, _at: DateTime<Local>, message: &str) {
        self.records.lock().unwrap().push((level, message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, h, min, s).single().unwrap()
    }

    #[test]
    fn test_format_line() {
        let line = format_line(LogLevel::Info, at(2024, 6, 15, 9, 5, 7), "focus: 12 1 Firefox");
        assert_eq!(line, "I 2024-06-15 09:05:07 focus: 12 1 Firefox");
        assert_eq!(LogLevel::Warn.initial(), 'W');
        assert_eq!(LogLevel::Debug.initial(), 'D');
    }

    #[test]
    fn test_dated_path() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert_eq!(
            dated_path(Path::new("/home/me/.focustrack"), day),
            PathBuf::from("/home/me/.focustrack_2024-06-15")
        );
    }

    #[test]
    fn test_switches_file_when_day_changes() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("logs").join("track");
        let log = DatedLog::new(&prefix, LogLevel::Info);

        log.write(LogLevel::Info, at(2024, 6, 15, 23, 59, 58), "before midnight");
        log.write(LogLevel::Info, at(2024, 6, 16, 0, 0, 1), "after midnight");
        log.flush();

        let first = std::fs::read_to_string(dated_path(&prefix, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())).unwrap();
        let second = std::fs::read_to_string(dated_path(&prefix, NaiveDate::from_ymd_opt(2024, 6, 16).unwrap())).unwrap();

        assert_eq!(first, "I 2024-06-15 23:59:58 before midnight\n");
        assert_eq!(second, "I 2024-06-16 00:00:01 after midnight\n");
    }

    #[test]
    fn test_drops_records_below_level() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("track");
        let log = DatedLog::new(&prefix, LogLevel::Info);

        log.write(LogLevel::Debug, at(2024, 6, 15, 10, 0, 0), "short focus");
        log.write(LogLevel::Warn, at(2024, 6, 15, 10, 0, 1), "provider down");

        let contents = std::fs::read_to_string(dated_path(&prefix, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())).unwrap();
        assert_eq!(contents, "W 2024-06-15 10:00:01 provider down\n");
    }

    #[test]
    fn test_echo_leaves_file_contents_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("track");
        let log = DatedLog::new(&prefix, LogLevel::Debug).with_echo(true);

        log.write(LogLevel::Debug, at(2024, 6, 15, 11, 0, 0), "focus: 1 1 Kate");

        let contents = std::fs::read_to_string(dated_path(&prefix, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())).unwrap();
        assert_eq!(contents, "D 2024-06-15 11:00:00 focus: 1 1 Kate\n");
    }

    #[test]
    fn test_appends_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("track");

        DatedLog::new(&prefix, LogLevel::Debug).write(LogLevel::Debug, at(2024, 6, 15, 8, 0, 0), "one");
        DatedLog::new(&prefix, LogLevel::Debug).write(LogLevel::Info, at(2024, 6, 15, 8, 0, 1), "two");

        let contents = std::fs::read_to_string(dated_path(&prefix, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())).unwrap();
        assert_eq!(contents.lines().count(), 2);
    }
}
