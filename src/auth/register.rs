//! Registration form. Acknowledging a successful registration leads to the
//! login page; the new account is not signed in automatically.

use crate::{
    api::{types::RegisterRequest, ApiClient},
    auth::{
        feedback::Feedback,
        guards::Page,
        sanitize::{sanitize_field, sanitize_input},
        FormState,
    },
    error::AppError,
    ui::popup::Popup,
};
use secrecy::{ExposeSecret, SecretString};
use tracing::{info, warn};

const MISSING_FIELDS: &str = "Please fill in all fields.";
const PASSWORD_MISMATCH: &str = "Password and Confirm Password do not match";
const SUCCESS: &str = "Register successfully";
const DEFAULT_FAILURE: &str = "Failed to register";

#[derive(Debug, Default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
    state: FormState,
    feedback: Popup<Feedback>,
}

impl RegisterForm {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: SecretString,
        confirm_password: SecretString,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password,
            confirm_password,
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

    /// Closes the feedback popup and returns the page it leads to, if any.
    pub fn acknowledge(&mut self) -> Option<Page> {
        self.feedback.close().and_then(|feedback| feedback.then)
    }

    /// # Errors
    /// Returns a validation error without contacting the API, or the error
    /// reported for a failed registration.
    pub async fn submit(&mut self, api: &ApiClient) -> Result<(), AppError> {
        let password = self.password.expose_secret();
        let confirm = self.confirm_password.expose_secret();

        if self.name.trim().is_empty()
            || self.email.trim().is_empty()
            || password.is_empty()
            || confirm.is_empty()
        {
            return Err(self.reject(AppError::Validation(MISSING_FIELDS.to_string())));
        }
        if password != confirm {
            return Err(self.reject(AppError::Validation(PASSWORD_MISMATCH.to_string())));
        }

        let request = RegisterRequest {
            name: sanitize_field(&self.name),
            email: sanitize_field(&self.email),
            password: sanitize_input(password),
        };
        if request.name.is_empty() || request.email.is_empty() || request.password.is_empty() {
            return Err(self.reject(AppError::Validation(MISSING_FIELDS.to_string())));
        }

        self.state = FormState::Submitting;
        self.feedback.close();

        let response = api.register(&request).await;
        if response.ok() {
            info!("registration accepted");
            self.state = FormState::Success;
            self.feedback
                .show(Feedback::success(SUCCESS, Some(Page::Login)));
            Ok(())
        } else {
            let err = response.to_error(DEFAULT_FAILURE);
            warn!("registration failed: {err}");
            Err(self.reject(err))
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
