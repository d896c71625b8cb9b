use crate::error::{Result, VaultError};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// The logged-in identity. At most one exists at a time; login/signup create
/// it and logout destroys it. No credentials are stored (simulation only).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identity {
    pub id: u64,
    pub display_name: String,
    pub email: String,
    pub joined_at: DateTime<Utc>,
}

impl Identity {
    pub fn new(id: u64, display_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            email: email.into(),
            joined_at: Utc::now(),
        }
    }

    /// In-place profile update. No uniqueness or strength checks.
    pub fn update_profile(&mut self, name: &str, email: &str) -> Result<()> {
        if name.trim().is_empty() || email.trim().is_empty() {
            return Err(VaultError::IncompleteProfile);
        }
        self.display_name = name.to_string();
        self.email = email.to_string();
        Ok(())
    }
}
