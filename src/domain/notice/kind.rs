// SPDX-License-Identifier: MPL-2.0
//! Visual category of a notice.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Category of a notice, selecting its style class and default icon.
///
/// Parsing never fails: unrecognised names are kept as [`NoticeKind::Custom`]
/// so the caller's class still reaches the presenter, while the icon falls
/// back to the informational one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum NoticeKind {
    /// Neutral information (default).
    #[default]
    Info,
    /// An operation completed.
    Success,
    /// Something needs attention but nothing failed.
    Warn,
    /// An operation failed.
    Error,
    /// Urgent, attention-grabbing notice.
    Alert,
    /// Achievement or milestone.
    Trophy,
    /// Hint or tip.
    Tips,
    /// Application-defined kind without a built-in icon.
    Custom(String),
}

impl NoticeKind {
    /// Returns the kind's name as used in style classes.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Alert => "alert",
            Self::Trophy => "trophy",
            Self::Tips => "tips",
            Self::Custom(name) => name,
        }
    }

    /// Returns the glyph shown when the notice has no explicit icon.
    #[must_use]
    pub fn default_icon(&self) -> &'static str {
        match self {
            Self::Info | Self::Custom(_) => "ℹ️",
            Self::Success => "✅",
            Self::Warn => "⚠️",
            Self::Error => "❌",
            Self::Alert => "🚨",
            Self::Trophy => "🏆",
            Self::Tips => "💡",
        }
    }
}

impl FromStr for NoticeKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "" | "info" => Self::Info,
            "success" => Self::Success,
            "warn" | "warning" => Self::Warn,
            "error" => Self::Error,
            "alert" => Self::Alert,
            "trophy" => Self::Trophy,
            "tips" => Self::Tips,
            _ => Self::Custom(s.trim().to_string()),
        })
    }
}

impl From<&str> for NoticeKind {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
