//! Match logger
//!
//! Renders engine events and controller choices to stdout and/or an
//! in-memory buffer, filtered by verbosity. The engine's own event log
//! (`GameState::log`) is kept separately and is never filtered.

use crate::game::{GameEvent, VerbosityLevel};
use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};
use std::ops::Deref;

/// Output format for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// Machine-readable JSON output (one object per line)
    Json,
}

/// Output destination for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputMode {
    /// Output only to stdout (default)
    #[default]
    Stdout,
    /// Capture only to in-memory buffer (no stdout)
    Memory,
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: VerbosityLevel,
    pub message: String,
    /// e.g. "controller_choice", "game_event", "rejection"
    pub category: Option<String>,
}

/// Read-only access to captured log entries
pub struct LogGuard<'a> {
    guard: Ref<'a, Vec<LogEntry>>,
}

impl<'a> Deref for LogGuard<'a> {
    type Target = [LogEntry];

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

pub struct GameLogger {
    verbosity: VerbosityLevel,
    output_format: OutputFormat,
    output_mode: OutputMode,
    log_buffer: RefCell<Vec<LogEntry>>,
}

impl GameLogger {
    /// Create a new logger with default verbosity (Normal)
    pub fn new() -> Self {
        Self::with_verbosity(VerbosityLevel::default())
    }

    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        GameLogger {
            verbosity,
            output_format: OutputFormat::default(),
            output_mode: OutputMode::default(),
            log_buffer: RefCell::new(Vec::new()),
        }
    }

    /// Capture to memory only (suppresses stdout)
    pub fn enable_capture(&mut self) {
        self.output_mode = OutputMode::Memory;
    }

    pub fn disable_capture(&mut self) {
        self.output_mode = OutputMode::Stdout;
    }

    pub fn is_capturing(&self) -> bool {
        self.output_mode == OutputMode::Memory
    }

    /// Print buffered logs that pass the verbosity filter, then clear the buffer
    pub fn flush_buffer(&mut self) {
        let buffer = self.log_buffer.borrow();
        for entry in buffer.iter() {
            if entry.level <= self.verbosity {
                self.log_to_stdout(entry.level, &entry.message, entry.category.as_deref());
            }
        }
        drop(buffer);
        self.clear_logs();
    }

    pub fn logs(&self) -> LogGuard<'_> {
        LogGuard {
            guard: self.log_buffer.borrow(),
        }
    }

    pub fn clear_logs(&mut self) {
        self.log_buffer.borrow_mut().clear();
    }

    pub fn set_output_format(&mut self, format: OutputFormat) {
        self.output_format = format;
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = verbosity;
    }

    #[inline]
    fn log_to_stdout(&self, level: VerbosityLevel, message: &str, category: Option<&str>) {
        match self.output_format {
            // Events arrive already serialized
            OutputFormat::Json if category == Some("game_event") => println!("{message}"),
            OutputFormat::Json => println!(
                "{}",
                serde_json::json!({ "level": level, "category": category, "message": message })
            ),
            OutputFormat::Text if level == VerbosityLevel::Minimal => println!("{message}"),
            OutputFormat::Text => println!("  {message}"),
        }
    }

    fn emit(&self, level: VerbosityLevel, message: &str, category: Option<&str>) {
        let should_capture = self.is_capturing();
        let should_output = self.output_mode == OutputMode::Stdout;

        if level > self.verbosity && !should_capture {
            return;
        }

        if should_capture {
            self.log_buffer.borrow_mut().push(LogEntry {
                level,
                message: message.to_string(),
                category: category.map(str::to_string),
            });
        }

        if should_output && level <= self.verbosity {
            self.log_to_stdout(level, message, category);
        }
    }

    #[inline]
    pub fn minimal(&self, message: &str) {
        self.emit(VerbosityLevel::Minimal, message, None);
    }

    #[inline]
    pub fn normal(&self, message: &str) {
        self.emit(VerbosityLevel::Normal, message, None);
    }

    #[inline]
    pub fn verbose(&self, message: &str) {
        self.emit(VerbosityLevel::Verbose, message, None);
    }

    /// Log an engine event, rendered per the output format
    pub fn event(&self, level: VerbosityLevel, event: &GameEvent) {
        if level > self.verbosity && !self.is_capturing() {
            return;
        }
        let message = match self.output_format {
            OutputFormat::Text => event.to_string(),
            OutputFormat::Json => serde_json::to_string(event).unwrap_or_else(|_| event.to_string()),
        };
        self.emit(level, &message, Some("game_event"));
    }

    /// Log a refused action. Rejections never reach the match log.
    pub fn rejection(&self, message: &str) {
        self.emit(VerbosityLevel::Verbose, message, Some("rejection"));
    }

    /// Log a controller decision at Verbose level
    pub fn controller_choice(&self, controller_name: &str, message: &str) {
        let formatted = format!("{controller_name} chose {message}");
        self.emit(VerbosityLevel::Verbose, &formatted, Some("controller_choice"));
    }
}

impl Default for GameLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GameLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameLogger")
            .field("verbosity", &self.verbosity)
            .field("output_mode", &self.output_mode)
            .field("log_count", &self.log_buffer.borrow().len())
            .finish()
    }
}

/// Clones carry the settings but start with an empty buffer
impl Clone for GameLogger {
    fn clone(&self) -> Self {
        GameLogger {
            verbosity: self.verbosity,
            output_format: self.output_format,
            output_mode: self.output_mode,
            log_buffer: RefCell::new(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_creation() {
        let logger = GameLogger::new();
        assert_eq!(logger.verbosity(), VerbosityLevel::Normal);
    }

    #[test]
    fn test_logger_with_verbosity() {
        let logger = GameLogger::with_verbosity(VerbosityLevel::Silent);
        assert_eq!(logger.verbosity(), VerbosityLevel::Silent);
    }

    #[test]
    fn test_log_capture() {
        let mut logger = GameLogger::new();
        logger.enable_capture();

        logger.normal("test message");
        logger.minimal("minimal message");

        let logs = logger.logs();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].message, "test message");
        assert_eq!(logs[1].message, "minimal message");
    }

    #[test]
    fn test_capture_keeps_entries_above_verbosity() {
        let mut logger = GameLogger::with_verbosity(VerbosityLevel::Minimal);
        logger.enable_capture();

        logger.verbose("detail");
        logger.rejection("slot 2 is occupied");

        let logs = logger.logs();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[1].category.as_deref(), Some("rejection"));
    }

    #[test]
    fn test_json_event_format() {
        let mut logger = GameLogger::new();
        logger.enable_capture();
        logger.set_output_format(OutputFormat::Json);

        logger.event(
            VerbosityLevel::Minimal,
            &GameEvent::MatchOver {
                winner: "Ana".to_string(),
            },
        );

        let logs = logger.logs();
        assert_eq!(logs[0].message, r#"{"event":"match_over","winner":"Ana"}"#);
        assert_eq!(logs[0].category.as_deref(), Some("game_event"));
    }

    #[test]
    fn test_flush_buffer() {
        let mut logger = GameLogger::new();
        logger.enable_capture();

        logger.normal("message 1");
        logger.normal("message 2");
        assert_eq!(logger.logs().len(), 2);

        logger.flush_buffer();
        assert_eq!(logger.logs().len(), 0);
    }

    #[test]
    fn test_clone_starts_empty() {
        let mut logger = GameLogger::new();
        logger.enable_capture();
        logger.normal("kept");

        let copy = logger.clone();
        assert!(copy.is_capturing());
        assert!(copy.logs().is_empty());
    }

    #[test]
    fn test_disable_capture() {
        let mut logger = GameLogger::new();
        logger.enable_capture();
        assert!(logger.is_capturing());

        logger.disable_capture();
        assert!(!logger.is_capturing());
    }
}
