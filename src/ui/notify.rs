//! User-visible notifications

use std::{fmt, io::Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Info,
    Warning,
    Error,
}

impl Level {
    fn tag(self) -> &'static str {
        match self {
            Level::Success => "ok",
            Level::Info => "info",
            Level::Warning => "warn",
            Level::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: Level,
    pub message: String,
}

impl Toast {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level.tag(), self.message)
    }
}

pub trait Notifier: Send {
    fn notify(&mut self, toast: Toast);

    fn success(&mut self, message: &str) {
        self.notify(Toast::new(Level::Success, message));
    }

    fn info(&mut self, message: &str) {
        self.notify(Toast::new(Level::Info, message));
    }

    fn warning(&mut self, message: &str) {
        self.notify(Toast::new(Level::Warning, message));
    }

    fn error(&mut self, message: &str) {
        self.notify(Toast::new(Level::Error, message));
    }
}

/// Prints one line per notification
pub struct TerminalNotifier<W> {
    out: W,
}

impl<W: Write + Send> TerminalNotifier<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write + Send> Notifier for TerminalNotifier<W> {
    fn notify(&mut self, toast: Toast) {
        if let Err(e) = writeln!(self.out, "{}", toast) {
            tracing::warn!("Could not print notification: {}", e);
        }
    }
}

/// Keeps notifications in memory
impl Notifier for Vec<Toast> {
    fn notify(&mut self, toast: Toast) {
        self.push(toast);
    }
}
