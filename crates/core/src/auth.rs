use serde::{Deserialize, Serialize};

/// Principal acting on the current request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    user_id: i64,
    login: String,
    display_name: String,
}

impl UserIdentity {
    /// Creates an identity from directory data.
    #[must_use]
    pub fn new(user_id: i64, login: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            user_id,
            login: login.into(),
            display_name: display_name.into(),
        }
    }

    /// Returns the stable principal identifier.
    #[must_use]
    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    /// Returns the login name.
    #[must_use]
    pub fn login(&self) -> &str {
        self.login.as_str()
    }

    /// Returns the display name for the current user.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }
}
