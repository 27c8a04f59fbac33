use serde::{Deserialize, Serialize};

const GUEST: &str = "guest";

/// Signed-in author. Sign-in is a pass-through: no credentials are checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_name: String,
}

impl Identity {
    pub fn sign_in(name: &str) -> Self {
        let trimmed = name.trim();
        Self {
            user_name: if trimmed.is_empty() {
                GUEST.to_string()
            } else {
                trimmed.to_string()
            },
        }
    }

    pub fn is_guest(&self) -> bool {
        self.user_name == GUEST
    }
}
