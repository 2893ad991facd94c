//! Session store: the single logged-in user, persisted under `jobportal_user`.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::rc::Rc;
use tracing::{debug, info, warn};

use crate::error::{require, PortalError, PortalResult};
use crate::ids::generate_id;
use crate::models::{Role, User};
use crate::storage::{Storage, USER_KEY};

pub const ADMIN_DISPLAY_NAME: &str = "Админ";
pub const DEFAULT_COMPANY_NAME: &str = "Миний Компани";

/// Hash a password using Argon2id.
pub fn hash_password(password: &str) -> PortalResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PortalError::Auth(format!("failed to hash password: {}", e)))
}

/// The elevated-privilege login: an email plus an Argon2 PHC hash.
#[derive(Debug, Clone)]
pub struct AdminCredential {
    email: String,
    password_hash: String,
    built_in: bool,
}

impl AdminCredential {
    pub fn from_hash(email: &str, password_hash: &str) -> PortalResult<Self> {
        PasswordHash::new(password_hash)
            .map_err(|e| PortalError::Auth(format!("invalid admin password hash: {}", e)))?;
        Ok(Self {
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            built_in: false,
        })
    }

    pub fn from_password(email: &str, password: &str) -> PortalResult<Self> {
        Ok(Self {
            email: email.to_string(),
            password_hash: hash_password(password)?,
            built_in: false,
        })
    }

    /// Marks the credential as the shipped default so admin logins warn.
    pub fn into_built_in(mut self) -> Self {
        self.built_in = true;
        self
    }

    pub fn is_built_in(&self) -> bool {
        self.built_in
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn verify(&self, email: &str, password: &str) -> bool {
        if email != self.email {
            return false;
        }
        // Checked in from_hash, so a parse failure here just means "no match"
        let Ok(parsed) = PasswordHash::new(&self.password_hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

pub struct SessionStore<S: Storage> {
    storage: Rc<S>,
    admin: AdminCredential,
    user: Option<User>,
}

impl<S: Storage> SessionStore<S> {
    /// Opens the store, restoring a previously persisted session if any.
    pub fn new(storage: Rc<S>, admin: AdminCredential) -> PortalResult<Self> {
        let user = match storage.get_item(USER_KEY)? {
            Some(raw) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => {
                    debug!(user_id = %user.id, role = %user.role, "Restored session");
                    Some(user)
                }
                Err(e) => {
                    warn!("Discarding unreadable session: {}", e);
                    storage.remove_item(USER_KEY)?;
                    None
                }
            },
            None => None,
        };
        Ok(Self {
            storage,
            admin,
            user,
        })
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn login(&mut self, email: &str, password: &str, role_hint: Role) -> PortalResult<User> {
        require("email", email)?;
        require("password", password)?;
        if role_hint == Role::Admin {
            return Err(PortalError::Auth(
                "the admin role cannot be requested at login".to_string(),
            ));
        }

        let mut user = User {
            id: generate_id(),
            email: email.to_string(),
            name: email.split('@').next().unwrap_or(email).to_string(),
            role: role_hint,
            company_name: None,
        };
        if role_hint == Role::Employer {
            user.company_name = Some(DEFAULT_COMPANY_NAME.to_string());
        }

        if self.admin.verify(email, password) {
            if self.admin.is_built_in() {
                warn!("Admin logged in with the built-in default password; set JOBPORTAL_ADMIN_HASH");
            }
            user.role = Role::Admin;
            user.name = ADMIN_DISPLAY_NAME.to_string();
            user.company_name = None;
        } else if email == self.admin.email() {
            warn!("Admin email used with a non-matching password; continuing as {}", role_hint);
        }

        self.start_session(user)
    }

    pub fn signup(
        &mut self,
        email: &str,
        password: &str,
        name: &str,
        role: Role,
        company_name: Option<&str>,
    ) -> PortalResult<User> {
        require("email", email)?;
        require("password", password)?;
        require("name", name)?;
        if role == Role::Admin {
            return Err(PortalError::Auth(
                "the admin role cannot be assigned at signup".to_string(),
            ));
        }

        let user = User {
            id: generate_id(),
            email: email.to_string(),
            name: name.to_string(),
            role,
            company_name: match role {
                Role::Employer => company_name.map(str::to_string),
                _ => None,
            },
        };
        self.start_session(user)
    }

    pub fn logout(&mut self) -> PortalResult<()> {
        if let Some(user) = self.user.take() {
            info!(user_id = %user.id, "Logged out");
        }
        self.storage.remove_item(USER_KEY)
    }

    fn start_session(&mut self, user: User) -> PortalResult<User> {
        self.storage
            .set_item(USER_KEY, &serde_json::to_string(&user)?)?;
        info!(user_id = %user.id, role = %user.role, "Session started");
        self.user = Some(user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    const ADMIN_EMAIL: &str = "admin@jobportal.mn";

    fn store() -> (Rc<MemoryStorage>, SessionStore<MemoryStorage>) {
        let storage = Rc::new(MemoryStorage::new());
        let admin = AdminCredential::from_password(ADMIN_EMAIL, "admin123").unwrap();
        let store = SessionStore::new(Rc::clone(&storage), admin).unwrap();
        (storage, store)
    }

    #[test]
    fn test_login_derives_name_from_email() {
        let (_, mut store) = store();
        let user = store.login("bold@example.mn", "secret", Role::Candidate).unwrap();
        assert_eq!(user.name, "bold");
        assert_eq!(user.role, Role::Candidate);
        assert_eq!(user.company_name, None);
        assert!(store.is_authenticated());
        assert_eq!(store.current_user(), Some(&user));
    }

    #[test]
    fn test_employer_login_gets_default_company() {
        let (_, mut store) = store();
        let user = store.login("hr@lendmn.mn", "secret", Role::Employer).unwrap();
        assert_eq!(user.company_name.as_deref(), Some(DEFAULT_COMPANY_NAME));
    }

    #[test]
    fn test_admin_credentials_force_admin_role() {
        let (_, mut store) = store();
        let user = store.login(ADMIN_EMAIL, "admin123", Role::Candidate).unwrap();
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.name, ADMIN_DISPLAY_NAME);
    }

    #[test]
    fn test_admin_email_with_wrong_password_keeps_hint() {
        let (_, mut store) = store();
        let user = store.login(ADMIN_EMAIL, "guess", Role::Candidate).unwrap();
        assert_eq!(user.role, Role::Candidate);
        assert_eq!(user.name, "admin");
    }

    #[test]
    fn test_admin_role_cannot_be_requested() {
        let (_, mut store) = store();
        let err = store.login("x@example.mn", "pw", Role::Admin).unwrap_err();
        assert!(matches!(err, PortalError::Auth(_)));

        let err = store
            .signup("x@example.mn", "pw", "X", Role::Admin, None)
            .unwrap_err();
        assert!(matches!(err, PortalError::Auth(_)));
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_login_requires_email_and_password() {
        let (_, mut store) = store();
        assert!(matches!(
            store.login("", "pw", Role::Candidate),
            Err(PortalError::Validation(_))
        ));
        assert!(matches!(
            store.login("a@b.mn", "", Role::Candidate),
            Err(PortalError::Validation(_))
        ));
    }

    #[test]
    fn test_signup_keeps_company_only_for_employers() {
        let (_, mut store) = store();
        let candidate = store
            .signup("c@example.mn", "pw", "Сараа", Role::Candidate, Some("Ignored LLC"))
            .unwrap();
        assert_eq!(candidate.name, "Сараа");
        assert_eq!(candidate.company_name, None);

        let employer = store
            .signup("e@example.mn", "pw", "Бат", Role::Employer, Some("G-Mobile"))
            .unwrap();
        assert_eq!(employer.company_name.as_deref(), Some("G-Mobile"));
        assert_eq!(store.current_user(), Some(&employer));
    }

    #[test]
    fn test_session_persists_and_restores() {
        let (storage, mut store) = store();
        let user = store.login("bold@example.mn", "secret", Role::Candidate).unwrap();

        let admin = AdminCredential::from_password(ADMIN_EMAIL, "admin123").unwrap();
        let reopened = SessionStore::new(Rc::clone(&storage), admin).unwrap();
        assert_eq!(reopened.current_user(), Some(&user));
    }

    #[test]
    fn test_logout_clears_persisted_session() {
        let (storage, mut store) = store();
        store.login("bold@example.mn", "secret", Role::Candidate).unwrap();
        store.logout().unwrap();

        assert!(!store.is_authenticated());
        assert_eq!(storage.get_item(USER_KEY).unwrap(), None);
    }

    #[test]
    fn test_unreadable_session_is_discarded() {
        let storage = Rc::new(MemoryStorage::new());
        storage.set_item(USER_KEY, "{not json").unwrap();
        let admin = AdminCredential::from_password(ADMIN_EMAIL, "admin123").unwrap();
        let store = SessionStore::new(Rc::clone(&storage), admin).unwrap();

        assert!(!store.is_authenticated());
        assert_eq!(storage.get_item(USER_KEY).unwrap(), None);
    }

    #[test]
    fn test_credential_from_hash_round_trip() {
        let hash = hash_password("s3cret").unwrap();
        let credential = AdminCredential::from_hash(ADMIN_EMAIL, &hash).unwrap();
        assert!(!credential.is_built_in());
        assert!(credential.verify(ADMIN_EMAIL, "s3cret"));
        assert!(!credential.verify(ADMIN_EMAIL, "admin123"));
        assert!(matches!(
            AdminCredential::from_hash(ADMIN_EMAIL, "plaintext"),
            Err(PortalError::Auth(_))
        ));
    }

    #[test]
    fn test_credential_rejects_other_email() {
        let credential = AdminCredential::from_password(ADMIN_EMAIL, "admin123").unwrap();
        assert!(credential.verify(ADMIN_EMAIL, "admin123"));
        assert!(!credential.verify("someone@jobportal.mn", "admin123"));
    }
}
