//! Export diagnostics

// SPDX-FileCopyrightText: © 2024 Marcus Rowe <undisbeliever@gmail.com>
//
// SPDX-License-Identifier: MIT

use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    Info,
    Warning,
    Error,
}

impl LogSeverity {
    pub fn name(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogMessage {
    pub severity: LogSeverity,
    pub text: String,
}

impl Display for LogMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity.name(), self.text)
    }
}

/// Messages for the caller to display.
///
/// Every message is also forwarded to `tracing`.
#[derive(Debug, Default)]
pub struct ExportLog {
    messages: Vec<LogMessage>,
}

impl ExportLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[LogMessage] {
        &self.messages
    }

    pub fn has_warnings(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.severity >= LogSeverity::Warning)
    }

    pub fn with_severity(&self, severity: LogSeverity) -> impl Iterator<Item = &LogMessage> {
        self.messages.iter().filter(move |m| m.severity == severity)
    }

    pub fn log(&mut self, severity: LogSeverity, text: impl Display) {
        let text = text.to_string();

        match severity {
            LogSeverity::Info => tracing::info!("{}", text),
            LogSeverity::Warning => tracing::warn!("{}", text),
            LogSeverity::Error => tracing::error!("{}", text),
        }

        self.messages.push(LogMessage { severity, text });
    }

    pub fn info(&mut self, text: impl Display) {
        self.log(LogSeverity::Info, text)
    }

    pub fn warning(&mut self, text: impl Display) {
        self.log(LogSeverity::Warning, text)
    }

    pub fn error(&mut self, text: impl Display) {
        self.log(LogSeverity::Error, text)
    }
}
