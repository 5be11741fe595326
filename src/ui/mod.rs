//! Terminal presentation: the generic popup, the profile card and the
//! renderers that turn view models into colored text.

pub mod popup;
pub mod profile;
pub mod render;

pub use popup::Popup;
pub use profile::Profile;
