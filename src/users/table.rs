//! User table view model. Loads the list from `/users`, opens the detail
//! popup for a row and runs the edit/delete/create calls. Every mutation is
//! followed by a full refetch; local rows are never patched.

use crate::{
    api::{types::UserList, ApiClient, User},
    auth::{can_perform, Capability},
    error::AppError,
    session::Session,
    ui::popup::Popup,
    users::{
        create::CreateUserForm,
        detail::{DeleteStep, UserDetail},
    },
};
use tracing::{debug, info, warn};

const LOAD_FAILURE: &str = "Failed to load users";
const UPDATE_FAILURE: &str = "Failed to update user";
const DELETE_FAILURE: &str = "Failed to delete user";
const CREATE_FAILURE: &str = "Failed to create user";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TableState {
    #[default]
    Loading,
    Loaded(Vec<User>),
    Error(String),
}

/// The visible cells of one row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserRow {
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Default)]
pub struct UserTable {
    state: TableState,
    detail: Popup<UserDetail>,
}

impl UserTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &TableState {
        &self.state
    }

    #[must_use]
    pub fn users(&self) -> &[User] {
        match &self.state {
            TableState::Loaded(users) => users,
            TableState::Loading | TableState::Error(_) => &[],
        }
    }

    #[must_use]
    pub fn rows(&self) -> Vec<UserRow> {
        self.users()
            .iter()
            .map(|user| UserRow {
                name: user.name.clone(),
                email: user.email.clone(),
                role: user.role.clone(),
            })
            .collect()
    }

    /// Reloads the whole list. In-flight refetches are not de-duplicated.
    pub async fn refetch(&mut self, api: &ApiClient) {
        self.state = TableState::Loading;

        let response = api.list_users().await;
        self.state = if response.ok() {
            match response.json::<UserList>() {
                Ok(list) => {
                    let users = list.into_users();
                    debug!(count = users.len(), "users loaded");
                    TableState::Loaded(users)
                }
                Err(err) => TableState::Error(err.to_string()),
            }
        } else {
            let message = response.message(LOAD_FAILURE);
            warn!("failed to load users: {message}");
            TableState::Error(message)
        };
    }

    /// Opens the detail popup for the user with `id`.
    ///
    /// # Errors
    /// Returns a validation error when no loaded row has that id.
    pub fn select(&mut self, id: &str) -> Result<&mut UserDetail, AppError> {
        let user = self
            .users()
            .iter()
            .find(|user| user.id == id)
            .cloned()
            .ok_or_else(|| AppError::Validation(format!("No user with id {id}.")))?;

        self.detail.show(UserDetail::new(user));
        self.detail
            .content_mut()
            .ok_or_else(|| AppError::Validation("Detail popup is not open.".to_string()))
    }

    #[must_use]
    pub fn detail(&self) -> &Popup<UserDetail> {
        &self.detail
    }

    pub fn detail_mut(&mut self) -> Option<&mut UserDetail> {
        self.detail.content_mut()
    }

    pub fn close_detail(&mut self) {
        self.detail.close();
    }

    /// Sends the edit draft, closes the popup and refetches.
    ///
    /// # Errors
    /// Returns a validation error (popup stays open, nothing sent) or the
    /// error of the failed update.
    pub async fn save_edit(&mut self, api: &ApiClient) -> Result<(), AppError> {
        let detail = self.open_detail()?;
        let update = detail.validated_draft()?;
        let id = detail.user().id.clone();

        let response = api.update_user(&id, &update).await;
        self.detail.close();
        self.refetch(api).await;

        response.into_result(UPDATE_FAILURE).map(|_| {
            info!(user = %id, "user updated");
        })
    }

    /// Second delete step. Blocked without `delete_user`; nothing is sent then.
    ///
    /// # Errors
    /// Returns `Forbidden` or a validation error without contacting the API, or
    /// the error of the failed delete.
    pub async fn confirm_delete(
        &mut self,
        api: &ApiClient,
        session: Option<&Session>,
    ) -> Result<(), AppError> {
        if !can_perform(session, Capability::DeleteUser) {
            return Err(AppError::Forbidden(
                Capability::DeleteUser.action().to_string(),
            ));
        }

        let detail = self.open_detail()?;
        if detail.delete_step() != DeleteStep::Confirming {
            return Err(AppError::Validation(
                "Deletion has not been requested.".to_string(),
            ));
        }
        let id = detail.user().id.clone();

        let response = api.delete_user(&id).await;
        self.detail.close();
        self.refetch(api).await;

        response.into_result(DELETE_FAILURE).map(|_| {
            info!(user = %id, "user deleted");
        })
    }

    /// Creates a user and refetches. Blocked without `create_user`.
    ///
    /// # Errors
    /// Returns `Forbidden` or a validation error without contacting the API, or
    /// the error of the failed create.
    pub async fn create(
        &mut self,
        api: &ApiClient,
        session: Option<&Session>,
        form: &CreateUserForm,
    ) -> Result<(), AppError> {
        if !can_perform(session, Capability::CreateUser) {
            return Err(AppError::Forbidden(
                Capability::CreateUser.action().to_string(),
            ));
        }
        let new_user = form.validated()?;

        let response = api.create_user(&new_user).await;
        self.refetch(api).await;

        response.into_result(CREATE_FAILURE).map(|_| {
            info!("user created");
        })
    }

    fn open_detail(&self) -> Result<&UserDetail, AppError> {
        self.detail
            .content()
            .ok_or_else(|| AppError::Validation("Select a user first.".to_string()))
    }
}
