use crate::auth::guards::Page;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedbackKind {
    Success,
    Error,
}

/// Dismissible result message shown in a popup after a form submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub message: String,
    /// Page to open once the operator acknowledges the message.
    pub then: Option<Page>,
}

impl Feedback {
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Error,
            message: message.into(),
            then: None,
        }
    }

    #[must_use]
    pub fn success(message: impl Into<String>, then: Option<Page>) -> Self {
        Self {
            kind: FeedbackKind::Success,
            message: message.into(),
            then,
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.kind == FeedbackKind::Error
    }
}
