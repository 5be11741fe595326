//! Sign-in and registration forms plus the helpers they share: input
//! sanitizing, capability checks, feedback popups and page guards.

pub mod feedback;
pub mod guards;
pub mod login;
pub mod permissions;
pub mod register;
pub mod sanitize;

pub use feedback::{Feedback, FeedbackKind};
pub use guards::{logout, require_session, Page};
pub use login::{LoginForm, LOGIN_COOLDOWN};
pub use permissions::{can_perform, Capability};
pub use register::RegisterForm;

/// Lifecycle shared by the auth forms.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Idle,
    Submitting,
    Success,
    Error(String),
}
