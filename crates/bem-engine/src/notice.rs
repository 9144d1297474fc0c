//! Non-fatal messages surfaced to the caller.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    /// Only emitted when the pass aborts.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => f.write_str("info"),
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}

/// Receiver of pass notices.
pub trait NoticeSink {
    fn push(&mut self, notice: Notice);
}

impl NoticeSink for Vec<Notice> {
    fn push(&mut self, notice: Notice) {
        Vec::push(self, notice);
    }
}

/// Drops notices after they have been logged.
#[derive(Debug, Default, Clone, Copy)]
pub struct Discard;

impl NoticeSink for Discard {
    fn push(&mut self, _notice: Notice) {}
}

pub(crate) fn info(sink: &mut dyn NoticeSink, message: impl Into<String>) {
    let message = message.into();
    tracing::info!("{}", message);
    sink.push(Notice {
        severity: Severity::Info,
        message,
    });
}

pub(crate) fn warn(sink: &mut dyn NoticeSink, message: impl Into<String>) {
    let message = message.into();
    tracing::warn!("{}", message);
    sink.push(Notice {
        severity: Severity::Warning,
        message,
    });
}

pub(crate) fn error(sink: &mut dyn NoticeSink, message: impl Into<String>) {
    let message = message.into();
    tracing::error!("{}", message);
    sink.push(Notice {
        severity: Severity::Error,
        message,
    });
}
