//! Persistence of the session's role and permission list.
//!
//! Both values live under their own key and are only ever written or removed
//! together. A read that finds one without the other treats the pair as torn
//! and drops it.

use std::sync::Arc;

use contracts::system::permissions::{PermissionParseError, PermissionSet, Role, SessionAccess};

use crate::system::auth::storage::KeyValueStore;

pub const USER_ROLE_KEY: &str = "userRole";
pub const USER_PERMISSIONS_KEY: &str = "userPermissions";

#[derive(Clone)]
pub struct PermissionStore {
    storage: Arc<dyn KeyValueStore>,
}

impl PermissionStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// Replace role and permission tokens. The tokens are stored as the
    /// server sent them, so a reload resolves the same mode. On a failed
    /// write neither key is kept.
    pub fn set_session<I, S>(&self, role: &Role, tokens: I) -> Result<(), String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens: Vec<String> = tokens.into_iter().map(|t| t.as_ref().to_string()).collect();
        let role_json =
            serde_json::to_string(role).map_err(|e| format!("Failed to encode role: {}", e))?;
        let permissions_json = serde_json::to_string(&tokens)
            .map_err(|e| format!("Failed to encode permissions: {}", e))?;

        let written = self
            .storage
            .set_item(USER_ROLE_KEY, &role_json)
            .and_then(|_| self.storage.set_item(USER_PERMISSIONS_KEY, &permissions_json));

        if let Err(e) = written {
            self.clear_session();
            return Err(e);
        }
        Ok(())
    }

    pub fn get_role(&self) -> Option<Role> {
        let raw = self.read(USER_ROLE_KEY)?;
        parse_role(&raw)
    }

    /// Empty when nothing (or nothing readable) is stored
    pub fn get_permissions(&self) -> PermissionSet {
        let tokens = self
            .read(USER_PERMISSIONS_KEY)
            .and_then(|raw| parse_tokens(&raw))
            .unwrap_or_default();
        let (permissions, rejected) = PermissionSet::parse_lossy(&tokens);
        log_rejected(rejected);
        permissions
    }

    /// Both values as one snapshot; anonymous unless both are present and valid
    pub fn load(&self) -> SessionAccess {
        let role = self.read(USER_ROLE_KEY);
        let permissions = self.read(USER_PERMISSIONS_KEY);

        match (role, permissions) {
            (None, None) => SessionAccess::anonymous(),
            (Some(role), Some(permissions)) => {
                match (parse_role(&role), parse_tokens(&permissions)) {
                    (Some(role), Some(tokens)) => {
                        let (access, rejected) = SessionAccess::from_tokens(role, &tokens);
                        log_rejected(rejected);
                        access
                    }
                    _ => {
                        self.clear_session();
                        SessionAccess::anonymous()
                    }
                }
            }
            _ => {
                log::warn!("Stored role and permissions are out of sync, clearing both");
                self.clear_session();
                SessionAccess::anonymous()
            }
        }
    }

    pub fn clear_session(&self) {
        for key in [USER_ROLE_KEY, USER_PERMISSIONS_KEY] {
            if let Err(e) = self.storage.remove_item(key) {
                log::warn!("{}", e);
            }
        }
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.storage.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("{}", e);
                None
            }
        }
    }
}

fn parse_role(raw: &str) -> Option<Role> {
    match serde_json::from_str::<Role>(raw) {
        Ok(role) => Some(role),
        Err(e) => {
            log::warn!("Ignoring malformed stored role: {}", e);
            None
        }
    }
}

fn parse_tokens(raw: &str) -> Option<Vec<String>> {
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(tokens) => Some(tokens),
        Err(e) => {
            log::warn!("Ignoring malformed stored permissions: {}", e);
            None
        }
    }
}

fn log_rejected(rejected: Vec<PermissionParseError>) {
    for error in rejected {
        log::warn!("Dropping stored permission: {}", error);
    }
}
