use std::collections::HashSet;
use std::str::FromStr;

use colored::{ColoredString, Colorize};
use thiserror::Error;

/// Severity levels understood by the logger
///
/// `None` is a sentinel: listing it disables all output regardless of what
/// else is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogLevel {
    None,
    Info,
    Success,
    Http,
    Warn,
    Error,
    Fatal,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::None => "none",
            LogLevel::Info => "info",
            LogLevel::Success => "success",
            LogLevel::Http => "http",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Fatal => "fatal",
        }
    }

    /// `[LEVEL]` tag, left-padded to a fixed width so messages line up
    pub(crate) fn label(&self) -> String {
        format!("{:<10}", format!("[{}]", self.as_str().to_uppercase()))
    }

    pub(crate) fn paint(&self, text: &str) -> ColoredString {
        match self {
            LogLevel::Info => text.cyan(),
            LogLevel::Success => text.green(),
            LogLevel::Http => text.magenta(),
            LogLevel::Warn => text.yellow(),
            LogLevel::Error | LogLevel::Fatal => text.red(),
            LogLevel::None => text.normal(),
        }
    }

    pub(crate) fn icon(&self) -> &'static str {
        match self {
            LogLevel::None => "",
            LogLevel::Info => "ℹ️",
            LogLevel::Success => "✅",
            LogLevel::Http => "📍",
            LogLevel::Warn => "⚠️",
            LogLevel::Error => "❌",
            LogLevel::Fatal => "💀",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown log level: {0}")]
pub struct ParseLevelError(String);

impl FromStr for LogLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(LogLevel::None),
            "info" => Ok(LogLevel::Info),
            "success" => Ok(LogLevel::Success),
            "http" => Ok(LogLevel::Http),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "fatal" => Ok(LogLevel::Fatal),
            other => Err(ParseLevelError(other.to_owned())),
        }
    }
}

/// Immutable set of enabled levels, fixed when the logger is built
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LevelSet {
    enabled: HashSet<LogLevel>,
}

impl LevelSet {
    /// Parse a comma-separated level spec, e.g. `"info,error"`
    ///
    /// Unknown names are ignored. An empty spec enables nothing, and `none`
    /// anywhere in the list wins over every other entry.
    pub fn parse(spec: &str) -> Self {
        let mut enabled = HashSet::new();
        let mut silenced = false;

        for part in spec.split(',') {
            match part.parse::<LogLevel>() {
                Ok(LogLevel::None) => silenced = true,
                Ok(level) => {
                    enabled.insert(level);
                }
                Err(_) => {}
            }
        }

        if silenced {
            enabled.clear();
        }
        Self { enabled }
    }

    pub fn contains(&self, level: LogLevel) -> bool {
        self.enabled.contains(&level)
    }

    pub fn is_silent(&self) -> bool {
        self.enabled.is_empty()
    }
}
