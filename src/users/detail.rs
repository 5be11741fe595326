//! Detail popup for one user: read-only view, permission-gated edit form and
//! a two-step delete confirmation. The popup only tracks view state; the
//! table performs the API calls and refetches afterwards.

use crate::{
    api::types::{User, UserUpdate},
    auth::{can_perform, sanitize::sanitize_field, Capability},
    error::AppError,
    session::Session,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DetailView {
    Display,
    Edit(UserUpdate),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeleteStep {
    #[default]
    Idle,
    Confirming,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserDetail {
    user: User,
    view: DetailView,
    delete: DeleteStep,
}

impl UserDetail {
    #[must_use]
    pub fn new(user: User) -> Self {
        Self {
            user,
            view: DetailView::Display,
            delete: DeleteStep::Idle,
        }
    }

    #[must_use]
    pub fn user(&self) -> &User {
        &self.user
    }

    #[must_use]
    pub fn view(&self) -> &DetailView {
        &self.view
    }

    #[must_use]
    pub fn delete_step(&self) -> DeleteStep {
        self.delete
    }

    /// The edit control is shown disabled, never hidden, without `edit_user`.
    #[must_use]
    pub fn edit_enabled(session: Option<&Session>) -> bool {
        can_perform(session, Capability::EditUser)
    }

    #[must_use]
    pub fn delete_enabled(session: Option<&Session>) -> bool {
        can_perform(session, Capability::DeleteUser)
    }

    /// Switches to the edit form with a draft of the current values.
    ///
    /// # Errors
    /// Returns `AppError::Forbidden` when the session lacks `edit_user`.
    pub fn begin_edit(&mut self, session: Option<&Session>) -> Result<(), AppError> {
        if !Self::edit_enabled(session) {
            return Err(AppError::Forbidden(Capability::EditUser.action().to_string()));
        }
        if matches!(self.view, DetailView::Display) {
            self.view = DetailView::Edit(UserUpdate::from(&self.user));
        }
        Ok(())
    }

    pub fn draft_mut(&mut self) -> Option<&mut UserUpdate> {
        match &mut self.view {
            DetailView::Edit(draft) => Some(draft),
            DetailView::Display => None,
        }
    }

    /// Drops the draft; the next edit starts again from the stored user.
    pub fn cancel_edit(&mut self) {
        self.view = DetailView::Display;
    }

    /// The sanitized draft, ready to send.
    ///
    /// # Errors
    /// Returns a validation error when not editing or when name or email is empty.
    pub fn validated_draft(&self) -> Result<UserUpdate, AppError> {
        let DetailView::Edit(draft) = &self.view else {
            return Err(AppError::Validation("Nothing to save.".to_string()));
        };

        let update = UserUpdate {
            name: sanitize_field(&draft.name),
            email: sanitize_field(&draft.email),
            role: sanitize_field(&draft.role),
        };
        if update.name.is_empty() || update.email.is_empty() {
            return Err(AppError::Validation(
                "Name and email are required.".to_string(),
            ));
        }
        Ok(update)
    }

    /// First delete step: ask for confirmation.
    ///
    /// # Errors
    /// Returns `AppError::Forbidden` when the session lacks `delete_user`.
    pub fn request_delete(&mut self, session: Option<&Session>) -> Result<(), AppError> {
        if !Self::delete_enabled(session) {
            return Err(AppError::Forbidden(
                Capability::DeleteUser.action().to_string(),
            ));
        }
        self.delete = DeleteStep::Confirming;
        Ok(())
    }

    pub fn cancel_delete(&mut self) {
        self.delete = DeleteStep::Idle;
    }
}
