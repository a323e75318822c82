use serde::{Deserialize, Serialize};

use super::permissions::{PermissionParseError, Role, SessionAccess};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

/// Current user as returned by `/login` and `/me`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub role: Role,
    /// Raw `resource:action` tokens, may be empty for legacy accounts
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// User fields without the access data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
}

impl UserInfo {
    /// Splits the payload into profile and access, parsing the permission tokens.
    ///
    /// Tokens that do not parse are left out of the set and returned for logging.
    /// Only a payload with no tokens at all resolves flags from the role.
    pub fn into_session(self) -> (UserProfile, SessionAccess, Vec<PermissionParseError>) {
        let (access, rejected) = SessionAccess::from_tokens(self.role, &self.permissions);
        let profile = UserProfile {
            id: self.id,
            username: self.username,
            full_name: self.full_name,
            email: self.email,
        };
        (profile, access, rejected)
    }
}

impl UserProfile {
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::permissions::{AccessFlags, Action, LegacyRoleTable, Permission, Resource};

    const LOGIN_RESPONSE: &str = r#"{
        "access_token": "access",
        "refresh_token": "refresh",
        "user": {
            "id": "u-1",
            "username": "olga",
            "full_name": "Ольга Петрова",
            "email": null,
            "role": { "id": "r-2", "name": "ACCOUNTANT", "description": "Бухгалтерия" },
            "permissions": ["invoices:read", "invoices:create", "invioces:delete"]
        }
    }"#;

    #[test]
    fn test_login_response_into_session() {
        let response: LoginResponse = serde_json::from_str(LOGIN_RESPONSE).unwrap();
        let (profile, access, rejected) = response.user.into_session();

        assert_eq!(profile.username, "olga");
        assert_eq!(profile.display_name(), "Ольга Петрова");
        assert_eq!(access.role().map(|r| r.name.as_str()), Some("ACCOUNTANT"));
        assert_eq!(access.permissions().len(), 2);
        assert!(access
            .permissions()
            .contains(&Permission::new(Resource::Invoices, Action::Create)));
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].token(), "invioces:delete");
    }

    #[test]
    fn test_missing_permissions_field_means_legacy_account() {
        let json = r#"{
            "id": "u-2",
            "username": "boss",
            "full_name": null,
            "email": "boss@example.com",
            "role": { "id": "r-1", "name": "ADMIN" }
        }"#;
        let user: UserInfo = serde_json::from_str(json).unwrap();
        let (profile, access, rejected) = user.into_session();
        assert_eq!(profile.display_name(), "boss");
        assert!(access.permissions().is_empty());
        assert!(access.is_legacy_mode());
        assert!(rejected.is_empty());
    }

    #[test]
    fn test_unknown_tokens_never_fall_back_to_role() {
        let json = r#"{
            "id": "u-3",
            "username": "mgr",
            "full_name": null,
            "email": null,
            "role": { "id": "r-3", "name": "MANAGER" },
            "permissions": ["materials:archive"]
        }"#;
        let user: UserInfo = serde_json::from_str(json).unwrap();
        let (_, access, rejected) = user.into_session();
        let flags = access.flags(LegacyRoleTable::builtin());

        assert_eq!(rejected.len(), 1);
        assert!(!access.is_legacy_mode());
        assert!(!flags.can_view_invoices);
        assert!(!flags.can_view_reports);
        assert_eq!(flags, AccessFlags::default());
    }
}
