//! Generic modal shell. A popup either shows one piece of content or nothing;
//! the page behind it must not scroll while it is shown.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Popup<T> {
    content: Option<T>,
}

impl<T> Default for Popup<T> {
    fn default() -> Self {
        Self { content: None }
    }
}

impl<T> Popup<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows `content`, replacing whatever was shown before.
    pub fn show(&mut self, content: T) {
        self.content = Some(content);
    }

    /// Explicit close; returns the content that was shown.
    pub fn close(&mut self) -> Option<T> {
        self.content.take()
    }

    /// Clicking outside the content closes the popup.
    pub fn backdrop_click(&mut self) -> Option<T> {
        self.close()
    }

    #[must_use]
    pub fn is_shown(&self) -> bool {
        self.content.is_some()
    }

    /// Body scrolling is suppressed exactly while the popup is shown.
    #[must_use]
    pub fn scroll_locked(&self) -> bool {
        self.is_shown()
    }

    #[must_use]
    pub fn content(&self) -> Option<&T> {
        self.content.as_ref()
    }

    pub fn content_mut(&mut self) -> Option<&mut T> {
        self.content.as_mut()
    }
}
