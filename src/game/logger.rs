//! Bump-allocating game logger
//!
//! Messages are formatted into a reusable bump arena, then written to stdout
//! or captured in memory. Captured entries own their strings so the buffer
//! can outlive any formatting scratch space.

use crate::game::event::GameEvent;
use crate::game::VerbosityLevel;
use bumpalo::Bump;
use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};
use std::fmt::Write as FmtWrite;
use std::ops::Deref;

/// Output format for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Output destination for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputMode {
    #[default]
    Stdout,
    /// Capture only to the in-memory buffer, printed later with `flush_tail`
    Memory,
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: VerbosityLevel,
    pub message: String,
    /// e.g. "combat", "level", "controller_choice"
    pub category: Option<String>,
}

/// Read-only access to captured log entries
pub struct LogGuard<'a> {
    guard: Ref<'a, Vec<LogEntry>>,
}

impl<'a> LogGuard<'a> {
    pub fn iter(&self) -> std::slice::Iter<'_, LogEntry> {
        self.guard.iter()
    }

    pub fn len(&self) -> usize {
        self.guard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard.is_empty()
    }
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

    /// Scratch space for formatting; reset after every message
    format_bump: RefCell<Bump>,

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
            format_bump: RefCell::new(Bump::new()),
            log_buffer: RefCell::new(Vec::new()),
        }
    }

    /// Capture to memory only (suppresses stdout)
    pub fn enable_capture(&mut self) {
        self.output_mode = OutputMode::Memory;
    }

    pub fn is_capturing(&self) -> bool {
        self.output_mode == OutputMode::Memory
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

    /// Print only the last `tail_lines` buffered entries, then clear the buffer
    ///
    /// Returns how many entries were elided.
    pub fn flush_tail(&mut self, tail_lines: usize) -> usize {
        let buffer = self.log_buffer.borrow();
        let total_lines = buffer.len();
        let elided_count = total_lines.saturating_sub(tail_lines);

        if elided_count > 0 {
            println!(
                ">>> {} LOG LINES ELIDED. PRINTING LAST {} LINES <<<",
                elided_count, tail_lines
            );
        }

        for entry in buffer.iter().skip(elided_count) {
            if entry.level <= self.verbosity {
                self.log_to_stdout(entry.level, entry.category.as_deref(), &entry.message);
            }
        }

        drop(buffer);
        self.clear_logs();
        elided_count
    }

    /// Captured log entries
    pub fn logs(&self) -> LogGuard<'_> {
        LogGuard {
            guard: self.log_buffer.borrow(),
        }
    }

    pub fn clear_logs(&mut self) {
        self.log_buffer.borrow_mut().clear();
        self.format_bump.borrow_mut().reset();
    }

    fn log_to_stdout(&self, level: VerbosityLevel, category: Option<&str>, message: &str) {
        match self.output_format {
            OutputFormat::Text => {
                if level == VerbosityLevel::Minimal {
                    println!("{}", message);
                } else {
                    println!("  {}", message);
                }
            }
            OutputFormat::Json => {
                let line = serde_json::json!({
                    "level": format!("{:?}", level),
                    "category": category,
                    "message": message,
                });
                println!("{}", line);
            }
        }
    }

    /// Whether a message at `level` goes anywhere at all
    #[inline]
    fn wants(&self, level: VerbosityLevel) -> bool {
        level != VerbosityLevel::Silent && (level <= self.verbosity || self.is_capturing())
    }

    fn record(&self, level: VerbosityLevel, category: Option<&str>, message: &str) {
        if self.is_capturing() {
            self.log_buffer.borrow_mut().push(LogEntry {
                level,
                message: message.to_string(),
                category: category.map(str::to_string),
            });
        } else if level <= self.verbosity {
            self.log_to_stdout(level, category, message);
        }
    }

    /// Format into the scratch arena and log without an intermediate `String`
    pub fn log_fmt(
        &self,
        level: VerbosityLevel,
        category: Option<&str>,
        args: std::fmt::Arguments<'_>,
    ) {
        if !self.wants(level) {
            return;
        }
        let mut bump = self.format_bump.borrow_mut();
        {
            let mut scratch = bumpalo::collections::String::new_in(&bump);
            if scratch.write_fmt(args).is_ok() {
                self.record(level, category, scratch.as_str());
            }
        }
        bump.reset();
    }

    #[inline]
    pub fn minimal(&self, message: &str) {
        if self.wants(VerbosityLevel::Minimal) {
            self.record(VerbosityLevel::Minimal, None, message);
        }
    }

    #[inline]
    pub fn normal(&self, message: &str) {
        if self.wants(VerbosityLevel::Normal) {
            self.record(VerbosityLevel::Normal, None, message);
        }
    }

    #[inline]
    pub fn verbose(&self, message: &str) {
        if self.wants(VerbosityLevel::Verbose) {
            self.record(VerbosityLevel::Verbose, None, message);
        }
    }

    /// Log a game event under its category
    ///
    /// Sound cues are only interesting at Verbose; victory and defeat are
    /// shown even at Minimal.
    pub fn event(&self, event: &GameEvent) {
        let level = match event {
            GameEvent::Victory | GameEvent::Defeat => VerbosityLevel::Minimal,
            GameEvent::Sound { .. } | GameEvent::CardDrawn { .. } => VerbosityLevel::Verbose,
            _ => VerbosityLevel::Normal,
        };
        self.log_fmt(level, Some(event.category()), format_args!("{}", event));
    }

    /// Log a controller decision at Normal level
    pub fn controller_choice(&self, controller_name: &str, message: &str) {
        self.log_fmt(
            VerbosityLevel::Normal,
            Some("controller_choice"),
            format_args!("{}: {}", controller_name, message),
        );
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

// Clones share settings, not captured history
impl Clone for GameLogger {
    fn clone(&self) -> Self {
        GameLogger {
            verbosity: self.verbosity,
            output_format: self.output_format,
            output_mode: self.output_mode,
            format_bump: RefCell::new(Bump::new()),
            log_buffer: RefCell::new(Vec::new()),
        }
    }
}
