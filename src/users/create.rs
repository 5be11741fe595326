use crate::{
    api::types::NewUser,
    auth::sanitize::{sanitize_field, sanitize_input},
    error::AppError,
};
use secrecy::{ExposeSecret, SecretString};

/// Input for `POST /users`.
#[derive(Debug, Default)]
pub struct CreateUserForm {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub role: String,
}

impl CreateUserForm {
    /// Sanitized request body.
    ///
    /// # Errors
    /// Returns a validation error when any field is empty.
    pub fn validated(&self) -> Result<NewUser, AppError> {
        let user = NewUser {
            name: sanitize_field(&self.name),
            email: sanitize_field(&self.email),
            password: sanitize_input(self.password.expose_secret()),
            role: sanitize_field(&self.role),
        };

        if user.name.is_empty()
            || user.email.is_empty()
            || user.password.trim().is_empty()
            || user.role.is_empty()
        {
            return Err(AppError::Validation(
                "Name, email, password and role are required.".to_string(),
            ));
        }

        Ok(user)
    }
}
