//! Session configuration

use chrono::{DateTime, Utc};
use dexter_core::domain::User;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Identity assigned to every successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileTemplate {
    pub id: String,
    pub name: String,
    pub organization: String,
    pub role: String,
    pub regions: Vec<String>,
}

impl Default for ProfileTemplate {
    fn default() -> Self {
        Self {
            id: "user-123".to_string(),
            name: "Demo User".to_string(),
            organization: "Election Watch".to_string(),
            role: "RESEARCHER".to_string(),
            regions: vec!["Lagos".to_string(), "Abuja".to_string()],
        }
    }
}

impl ProfileTemplate {
    /// Active user record for `email`, logged in at `now`
    pub fn user(&self, email: &str, now: DateTime<Utc>) -> User {
        User {
            id: self.id.clone(),
            name: self.name.clone(),
            email: email.to_string(),
            organization: self.organization.clone(),
            role: self.role.clone(),
            regions: self.regions.clone(),
            is_active: true,
            last_login: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Session file; `None` keeps the session in memory only
    #[serde(default)]
    pub storage_file: Option<PathBuf>,

    /// Key the record is stored under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    #[serde(default)]
    pub profile: ProfileTemplate,
}

fn default_storage_key() -> String {
    crate::store::SESSION_KEY.to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_file: None,
            storage_key: default_storage_key(),
            profile: ProfileTemplate::default(),
        }
    }
}
