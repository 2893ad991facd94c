use std::path::PathBuf;
use tracing::debug;

use crate::error::PortalResult;
use crate::filter::SalaryMatch;
use crate::session::AdminCredential;
use crate::storage::SqliteStorage;

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@jobportal.mn";
// Only ever hashed at startup when no JOBPORTAL_ADMIN_HASH is configured.
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

pub struct PortalConfig {
    pub db_path: PathBuf,
    pub admin_email: String,
    pub admin_password_hash: Option<String>,
    pub salary_match: SalaryMatch,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            db_path: SqliteStorage::default_path(),
            admin_email: DEFAULT_ADMIN_EMAIL.to_string(),
            admin_password_hash: None,
            salary_match: SalaryMatch::default(),
        }
    }
}

impl PortalConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_db_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.db_path = path;
        }
        self
    }

    pub fn with_admin_email(mut self, email: Option<String>) -> Self {
        if let Some(email) = email.filter(|e| !e.trim().is_empty()) {
            self.admin_email = email;
        }
        self
    }

    pub fn with_admin_password_hash(mut self, hash: Option<String>) -> Self {
        self.admin_password_hash = hash.filter(|h| !h.trim().is_empty());
        self
    }

    pub fn with_salary_match(mut self, mode: SalaryMatch) -> Self {
        self.salary_match = mode;
        self
    }

    /// Builds the admin credential, hashing the built-in password when no
    /// hash was configured.
    pub fn admin_credential(&self) -> PortalResult<AdminCredential> {
        match &self.admin_password_hash {
            Some(hash) => AdminCredential::from_hash(&self.admin_email, hash),
            None => {
                debug!("No admin password hash configured; hashing the built-in default");
                Ok(AdminCredential::from_password(&self.admin_email, DEFAULT_ADMIN_PASSWORD)?
                    .into_built_in())
            }
        }
    }
}
