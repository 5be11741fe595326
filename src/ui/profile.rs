use crate::session::Session;

const DEFAULT_NAME: &str = "User";
const DEFAULT_EMAIL: &str = "user@example.com";

/// Name and email shown in the profile card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub role: Option<String>,
}

impl Profile {
    /// Builds the card from the stored session, falling back to placeholders
    /// for missing or blank fields.
    #[must_use]
    pub fn from_session(session: Option<&Session>) -> Self {
        let user = session.map(Session::user);
        let pick = |value: Option<&String>, default: &str| {
            value
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
                .to_string()
        };

        Self {
            name: pick(user.map(|u| &u.name), DEFAULT_NAME),
            email: pick(user.map(|u| &u.email), DEFAULT_EMAIL),
            role: user
                .map(|u| u.role.trim().to_string())
                .filter(|role| !role.is_empty()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_without_session() {
        let profile = Profile::from_session(None);
        assert_eq!(profile.name, "User");
        assert_eq!(profile.email, "user@example.com");
        assert_eq!(profile.role, None);
    }

    #[test]
    fn blank_fields_fall_back() {
        let session: Session = serde_json::from_value(json!({
            "token": "t",
            "user": {"id": 4, "name": " ", "email": "ana@x.com", "role": "admin"}
        }))
        .unwrap();
        let profile = Profile::from_session(Some(&session));
        assert_eq!(profile.name, "User");
        assert_eq!(profile.email, "ana@x.com");
        assert_eq!(profile.role.as_deref(), Some("admin"));
    }
}
