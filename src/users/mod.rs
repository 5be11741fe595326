//! User administration views: the list table, the per-user detail popup and
//! the create form.

pub mod create;
pub mod detail;
pub mod table;

pub use create::CreateUserForm;
pub use detail::{DeleteStep, DetailView, UserDetail};
pub use table::{TableState, UserRow, UserTable};
