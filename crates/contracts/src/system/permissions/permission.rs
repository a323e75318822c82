use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::resource::{Action, Resource};

/// A single `resource:action` capability token.
///
/// The wire form is the plain string; parsing happens once, where the backend
/// response enters the client, so a misspelled token is rejected there instead
/// of silently never matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Permission {
    pub resource: Resource,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionParseError {
    #[error("permission token '{0}' is missing the ':' separator")]
    MissingSeparator(String),
    #[error("unknown resource '{resource}' in permission token '{token}'")]
    UnknownResource { token: String, resource: String },
    #[error("unknown action '{action}' in permission token '{token}'")]
    UnknownAction { token: String, action: String },
}

impl PermissionParseError {
    /// The raw token that failed to parse
    pub fn token(&self) -> &str {
        match self {
            PermissionParseError::MissingSeparator(token) => token,
            PermissionParseError::UnknownResource { token, .. } => token,
            PermissionParseError::UnknownAction { token, .. } => token,
        }
    }
}

impl Permission {
    pub const fn new(resource: Resource, action: Action) -> Self {
        Self { resource, action }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource.code(), self.action.code())
    }
}

impl FromStr for Permission {
    type Err = PermissionParseError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let (resource, action) = token
            .split_once(':')
            .ok_or_else(|| PermissionParseError::MissingSeparator(token.to_string()))?;

        let resource_kind =
            Resource::from_code(resource).ok_or_else(|| PermissionParseError::UnknownResource {
                token: token.to_string(),
                resource: resource.to_string(),
            })?;
        let action_kind =
            Action::from_code(action).ok_or_else(|| PermissionParseError::UnknownAction {
                token: token.to_string(),
                action: action.to_string(),
            })?;

        Ok(Permission::new(resource_kind, action_kind))
    }
}

impl TryFrom<String> for Permission {
    type Error = PermissionParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Permission> for String {
    fn from(value: Permission) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let permission: Permission = "materials:create".parse().unwrap();
        assert_eq!(permission, Permission::new(Resource::Materials, Action::Create));
        assert_eq!(permission.to_string(), "materials:create");

        let permission: Permission = "production_orders:approve".parse().unwrap();
        assert_eq!(permission.resource, Resource::ProductionOrders);
        assert_eq!(permission.action, Action::Approve);
    }

    #[test]
    fn test_typo_is_rejected() {
        let err = "materails:create".parse::<Permission>().unwrap_err();
        assert_eq!(
            err,
            PermissionParseError::UnknownResource {
                token: "materails:create".to_string(),
                resource: "materails".to_string(),
            }
        );
        assert_eq!(err.token(), "materails:create");
    }

    #[test]
    fn test_malformed_tokens() {
        assert!(matches!(
            "materials".parse::<Permission>(),
            Err(PermissionParseError::MissingSeparator(_))
        ));
        assert!(matches!(
            "materials:create:extra".parse::<Permission>(),
            Err(PermissionParseError::UnknownAction { .. })
        ));
        assert!(" materials:create".parse::<Permission>().is_err());
        assert!("MATERIALS:CREATE".parse::<Permission>().is_err());
    }

    #[test]
    fn test_serde_uses_string_form() {
        let permission = Permission::new(Resource::Reports, Action::Export);
        let json = serde_json::to_string(&permission).unwrap();
        assert_eq!(json, "\"reports:export\"");

        let back: Permission = serde_json::from_str(&json).unwrap();
        assert_eq!(back, permission);

        assert!(serde_json::from_str::<Permission>("\"reports:print\"").is_err());
    }
}
