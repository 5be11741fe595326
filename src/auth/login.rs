//! Login form. Validates locally, sanitizes, calls `/users/login` and stores
//! the returned `{token, user}` payload. A failed attempt blocks further
//! submissions for [`LOGIN_COOLDOWN`].

use crate::{
    api::{types::LoginRequest, ApiClient},
    auth::{
        feedback::Feedback,
        guards::Page,
        sanitize::{sanitize_field, sanitize_input},
        FormState,
    },
    error::AppError,
    session::Session,
    ui::popup::Popup,
};
use secrecy::{ExposeSecret, SecretString};
use std::time::{Duration, Instant};
use tracing::{info, warn};

pub const LOGIN_COOLDOWN: Duration = Duration::from_secs(5);

const MISSING_FIELDS: &str = "Please fill in both email and password.";
const DEFAULT_FAILURE: &str = "Login failed";

#[derive(Debug, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: SecretString,
    state: FormState,
    cooldown_until: Option<Instant>,
    feedback: Popup<Feedback>,
}

impl LoginForm {
    #[must_use]
    pub fn new(email: impl Into<String>, password: SecretString) -> Self {
        Self {
            email: email.into(),
            password,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn state(&self) -> &FormState {
        &self.state
    }

    #[must_use]
    pub fn feedback(&self) -> &Popup<Feedback> {
        &self.feedback
    }

    pub fn dismiss_feedback(&mut self) -> Option<Feedback> {
        self.feedback.close()
    }

    /// Whole seconds (rounded up) until another attempt is allowed.
    #[must_use]
    pub fn cooldown_remaining(&self, now: Instant) -> Option<u64> {
        let until = self.cooldown_until?;
        let left = until.checked_duration_since(now).filter(|d| !d.is_zero())?;
        Some(left.as_millis().div_ceil(1000).try_into().unwrap_or(u64::MAX))
    }

    /// Submits the form; on success the session is stored and the users page is returned.
    ///
    /// # Errors
    /// Returns a validation or cooldown error without contacting the API, or
    /// the HTTP/transport error of a failed attempt.
    pub async fn submit(&mut self, api: &ApiClient) -> Result<Page, AppError> {
        self.submit_at(api, Instant::now()).await
    }

    pub(crate) async fn submit_at(&mut self, api: &ApiClient, now: Instant) -> Result<Page, AppError> {
        if let Some(seconds) = self.cooldown_remaining(now) {
            return Err(self.reject(AppError::Cooldown(seconds)));
        }

        let email = sanitize_field(&self.email);
        let password = sanitize_input(self.password.expose_secret());
        if email.is_empty() || password.trim().is_empty() {
            return Err(self.reject(AppError::Validation(MISSING_FIELDS.to_string())));
        }

        self.state = FormState::Submitting;
        self.feedback.close();

        let response = api.login(&LoginRequest { email, password }).await;

        let session = if response.ok() {
            response.json::<Session>()
        } else {
            Err(response.to_error(DEFAULT_FAILURE))
        };

        match session.and_then(|session| {
            api.store().set_session(&session)?;
            Ok(session)
        }) {
            Ok(session) => {
                info!(user = %session.user().id, "signed in");
                self.state = FormState::Success;
                self.cooldown_until = None;
                Ok(Page::Users)
            }
            Err(err) => {
                warn!("login failed: {err}");
                self.cooldown_until = Some(now + LOGIN_COOLDOWN);
                Err(self.reject(err))
            }
        }
    }

    fn reject(&mut self, err: AppError) -> AppError {
        let message = match &err {
            AppError::Http { message, .. } => message.clone(),
            other => other.to_string(),
        };
        self.state = FormState::Error(message.clone());
        self.feedback.show(Feedback::error(message));
        err
    }
}
