// SPDX-License-Identifier: MPL-2.0
//! Creation options and content of a notice.

use std::fmt;
use std::rc::Rc;

use super::handle::NoticeHandle;
use crate::domain::notice::{AutoClose, NoticeKind};

/// What a user interaction or close did to a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeEvent {
    /// The notice body was clicked.
    Click,
    /// The notice was closed, by any path.
    Close,
}

impl NoticeEvent {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Close => "close",
        }
    }
}

/// Callback invoked on click and close, with a handle to the notice.
pub type NoticeCallback = Rc<dyn Fn(NoticeEvent, NoticeHandle)>;

/// The presentable part of a notice.
///
/// Only `title` and `message` change after creation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NoticeContent {
    pub title: String,
    pub message: String,
    pub kind: NoticeKind,
    /// Explicit icon: raw markup when it starts with `<`, text otherwise.
    pub icon: Option<String>,
    pub custom_class: String,
    /// CSS-style width, e.g. `"320px"`.
    pub width: Option<String>,
}

impl NoticeContent {
    /// Returns the icon to display, falling back to the kind's default glyph.
    #[must_use]
    pub fn resolved_icon(&self) -> NoticeIcon<'_> {
        match self.icon.as_deref() {
            Some(icon) if icon.trim_start().starts_with('<') => NoticeIcon::Markup(icon),
            Some(icon) if !icon.is_empty() => NoticeIcon::Text(icon),
            _ => NoticeIcon::Text(self.kind.default_icon()),
        }
    }
}

/// An icon ready for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeIcon<'a> {
    /// Caller-supplied markup, inserted as is.
    Markup(&'a str),
    /// Plain text or emoji.
    Text(&'a str),
}

/// Values applied at `open` to options the caller left unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoticeDefaults {
    pub auto_close: AutoClose,
    pub animation: bool,
}

impl Default for NoticeDefaults {
    fn default() -> Self {
        Self {
            auto_close: AutoClose::default(),
            animation: true,
        }
    }
}

/// Options for [`NoticeManager::open`](super::NoticeManager::open).
///
/// ```
/// use aura_notify::notice::NoticeOptions;
///
/// let options = NoticeOptions::success("Saved")
///     .title("Profile")
///     .external_id("profile-save")
///     .auto_close_ms(2000);
/// assert_eq!(options.content().message, "Saved");
/// ```
#[derive(Clone, Default)]
pub struct NoticeOptions {
    pub(crate) content: NoticeContent,
    pub(crate) external_id: Option<String>,
    pub(crate) auto_close: Option<AutoClose>,
    pub(crate) animation: Option<bool>,
    pub(crate) callback: Option<NoticeCallback>,
}

impl NoticeOptions {
    /// Creates informational options with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            content: NoticeContent {
                message: message.into(),
                ..NoticeContent::default()
            },
            ..Self::default()
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message).kind(NoticeKind::Info)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message).kind(NoticeKind::Success)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message).kind(NoticeKind::Warn)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message).kind(NoticeKind::Error)
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.content.title = title.into();
        self
    }

    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.content.message = message.into();
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: impl Into<NoticeKind>) -> Self {
        self.content.kind = kind.into();
        self
    }

    /// Sets the application identity. Opening another notice with the same
    /// id replaces this one.
    #[must_use]
    pub fn external_id(mut self, id: impl Into<String>) -> Self {
        self.external_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn auto_close(mut self, auto_close: AutoClose) -> Self {
        self.auto_close = Some(auto_close);
        self
    }

    /// Sets the auto-close delay in milliseconds; `<= 0` disables it.
    #[must_use]
    pub fn auto_close_ms(self, ms: i64) -> Self {
        self.auto_close(AutoClose::from_millis(ms))
    }

    /// Derives the auto-close delay from the current title and message.
    #[must_use]
    pub fn auto_close_for_reading(self) -> Self {
        let auto_close = AutoClose::reading_time(&self.content.title, &self.content.message);
        self.auto_close(auto_close)
    }

    #[must_use]
    pub fn animation(mut self, enabled: bool) -> Self {
        self.animation = Some(enabled);
        self
    }

    #[must_use]
    pub fn width(mut self, width: impl Into<String>) -> Self {
        self.content.width = Some(width.into());
        self
    }

    #[must_use]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.content.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn custom_class(mut self, class: impl Into<String>) -> Self {
        self.content.custom_class = class.into();
        self
    }

    /// Registers the click/close callback.
    #[must_use]
    pub fn on_event<F>(mut self, callback: F) -> Self
    where
        F: Fn(NoticeEvent, NoticeHandle) + 'static,
    {
        self.callback = Some(Rc::new(callback));
        self
    }

    #[must_use]
    pub fn content(&self) -> &NoticeContent {
        &self.content
    }
}

impl fmt::Debug for NoticeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoticeOptions")
            .field("content", &self.content)
            .field("external_id", &self.external_id)
            .field("auto_close", &self.auto_close)
            .field("animation", &self.animation)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}
