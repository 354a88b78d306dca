mod level;


pub use level::{LevelSet, LogLevel, ParseLevelError};

use std::borrow::Cow;
use std::io::{self, Write};
use std::sync::Mutex;

use chrono::{SecondsFormat, Utc};
use colored::{ColoredString, Colorize};

/// Environment variable consulted by [`Logger::from_env`]
pub const LOG_LEVELS_VAR: &str = "LOG_LEVELS";

/// A log message: either ready text or a deferred producer
///
/// Producers run only when the level is enabled, so disabled call sites
/// never pay for message construction. Build one with [`lazy`] or pass a
/// string directly.
pub enum LogMessage<'a> {
    Text(Cow<'a, str>),
    Deferred(Box<dyn FnOnce() -> String + 'a>),
}

impl LogMessage<'_> {
    fn render(self) -> String {
        match self {
            LogMessage::Text(text) => text.into_owned(),
            LogMessage::Deferred(producer) => producer(),
        }
    }
}

impl<'a> From<&'a str> for LogMessage<'a> {
    fn from(text: &'a str) -> Self {
        LogMessage::Text(Cow::Borrowed(text))
    }
}

impl From<String> for LogMessage<'_> {
    fn from(text: String) -> Self {
        LogMessage::Text(Cow::Owned(text))
    }
}

/// Defer message construction until the level is known to be enabled
pub fn lazy<'a>(producer: impl FnOnce() -> String + 'a) -> LogMessage<'a> {
    LogMessage::Deferred(Box::new(producer))
}

/// Leveled, colorized console logger
///
/// The enabled-level set is fixed at construction; reconfiguring requires
/// building a new logger (in practice, restarting the process). Writes go
/// to stdout unless a writer is injected.
pub struct Logger {
    levels: LevelSet,
    out: Mutex<Box<dyn Write + Send>>,
}

impl Logger {
    /// Logger writing to stdout, gated by a comma-separated level spec
    pub fn new(spec: &str) -> Self {
        Self::with_writer(spec, Box::new(io::stdout()))
    }

    /// Logger gated by the `LOG_LEVELS` environment variable
    ///
    /// An unset variable yields a fully disabled logger.
    pub fn from_env() -> Self {
        Self::new(&std::env::var(LOG_LEVELS_VAR).unwrap_or_default())
    }

    /// Logger writing to an explicit sink instead of stdout
    pub fn with_writer(spec: &str, writer: Box<dyn Write + Send>) -> Self {
        Self {
            levels: LevelSet::parse(spec),
            out: Mutex::new(writer),
        }
    }

    pub fn levels(&self) -> &LevelSet {
        &self.levels
    }

    pub fn info<'a>(&self, msg: impl Into<LogMessage<'a>>) {
        self.log(LogLevel::Info, msg.into());
    }

    pub fn success<'a>(&self, msg: impl Into<LogMessage<'a>>) {
        self.log(LogLevel::Success, msg.into());
    }

    pub fn warn<'a>(&self, msg: impl Into<LogMessage<'a>>) {
        self.log(LogLevel::Warn, msg.into());
    }

    pub fn error<'a>(&self, msg: impl Into<LogMessage<'a>>) {
        self.log(LogLevel::Error, msg.into());
    }

    /// Log at fatal level, then terminate the process with exit code 1
    ///
    /// The exit happens whether or not the fatal level is enabled; only the
    /// line itself is gated.
    pub fn fatal<'a>(&self, msg: impl Into<LogMessage<'a>>) -> ! {
        self.log(LogLevel::Fatal, msg.into());
        std::process::exit(1);
    }

    /// Log one handled HTTP request at the `http` level
    pub fn http(&self, path: &str, status: u16, response_time_ms: u64, ip: &str) {
        if !self.levels.contains(LogLevel::Http) {
            return;
        }
        let message = format!(
            "{path} ({}) in {} from {ip}",
            color_status(status),
            color_response_time(response_time_ms),
        );
        self.log(LogLevel::Http, LogMessage::from(message));
    }

    fn log(&self, level: LogLevel, msg: LogMessage<'_>) {
        if !self.levels.contains(level) {
            return;
        }
        let line = format_line(level, &msg.render());
        if let Ok(mut out) = self.out.lock() {
            let _ = writeln!(out, "{line}");
        }
    }
}

fn format_line(level: LogLevel, message: &str) -> String {
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    format!(
        "{}{} {} {} {}",
        level.paint(&level.label()).bold(),
        timestamp.bright_black().bold(),
        "-".bold(),
        level.icon(),
        message,
    )
}

fn color_status(status: u16) -> ColoredString {
    let text = status.to_string();
    match status {
        200..=299 => text.green(),
        300..=399 => text.blue(),
        400..=499 => text.yellow(),
        500.. => text.red(),
        _ => text.white(),
    }
}

fn color_response_time(ms: u64) -> ColoredString {
    let text = format!("{ms}ms");
    if ms < 100 {
        text.green()
    } else if ms < 500 {
        text.yellow()
    } else {
        text.red()
    }
}
