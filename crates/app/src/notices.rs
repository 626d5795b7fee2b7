//! Notices
//!
//! Transient user-facing messages and navigation targets produced by controllers.

use std::fmt::{Display, Formatter, Result as FmtResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// A message to flash to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

impl Display for Notice {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let level = match self.level {
            NoticeLevel::Success => "success",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        };

        write!(f, "[{level}] {}", self.message)
    }
}

/// Screens a controller can send the user to next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Payment,
}

impl Route {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Payment => "/payment",
        }
    }
}

/// What an action produced: a notice, a navigation, or both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub notice: Option<Notice>,
    pub route: Option<Route>,
}

impl Outcome {
    #[must_use]
    pub fn notice(notice: Notice) -> Self {
        Self {
            notice: Some(notice),
            route: None,
        }
    }

    #[must_use]
    pub fn navigate(route: Route) -> Self {
        Self {
            notice: None,
            route: Some(route),
        }
    }

    #[must_use]
    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }
}
