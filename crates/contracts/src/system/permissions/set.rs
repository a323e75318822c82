use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::permission::{Permission, PermissionParseError};
use super::resource::{Action, Resource};

/// Permissions held by the current session.
///
/// Keeps the order in which the backend sent the tokens, but behaves as a set:
/// duplicates are dropped on insert and only membership is ever tested.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Permission>", into = "Vec<Permission>")]
pub struct PermissionSet {
    items: Vec<Permission>,
}

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses wire tokens, keeping the valid ones.
    ///
    /// Rejected tokens are returned alongside so the caller can report them;
    /// they are never part of the resulting set.
    pub fn parse_lossy<I, S>(tokens: I) -> (Self, Vec<PermissionParseError>)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        let mut rejected = Vec::new();
        for token in tokens {
            match token.as_ref().parse::<Permission>() {
                Ok(permission) => {
                    set.insert(permission);
                }
                Err(e) => rejected.push(e),
            }
        }
        (set, rejected)
    }

    /// Returns `false` if the permission was already held
    pub fn insert(&mut self, permission: Permission) -> bool {
        if self.items.contains(&permission) {
            return false;
        }
        self.items.push(permission);
        true
    }

    pub fn contains(&self, permission: &Permission) -> bool {
        self.items.contains(permission)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Permission> {
        self.items.iter()
    }

    /// Wire representation, in held order
    pub fn to_tokens(&self) -> Vec<String> {
        self.items.iter().map(ToString::to_string).collect()
    }

    /// Held actions per resource, for display
    pub fn grouped_by_resource(&self) -> BTreeMap<Resource, Vec<Action>> {
        let mut groups: BTreeMap<Resource, Vec<Action>> = BTreeMap::new();
        for permission in &self.items {
            groups
                .entry(permission.resource)
                .or_default()
                .push(permission.action);
        }
        groups
    }
}

impl From<Vec<Permission>> for PermissionSet {
    fn from(value: Vec<Permission>) -> Self {
        value.into_iter().collect()
    }
}

impl From<PermissionSet> for Vec<Permission> {
    fn from(value: PermissionSet) -> Self {
        value.items
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<T: IntoIterator<Item = Permission>>(iter: T) -> Self {
        let mut set = Self::new();
        for permission in iter {
            set.insert(permission);
        }
        set
    }
}

impl<'a> IntoIterator for &'a PermissionSet {
    type Item = &'a Permission;
    type IntoIter = std::slice::Iter<'a, Permission>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_collapse_and_keep_first_position() {
        let (set, rejected) = PermissionSet::parse_lossy([
            "materials:read",
            "reports:view",
            "materials:read",
        ]);
        assert!(rejected.is_empty());
        assert_eq!(set.len(), 2);
        assert_eq!(set.to_tokens(), vec!["materials:read", "reports:view"]);
    }

    #[test]
    fn test_parse_lossy_reports_rejected_tokens() {
        let (set, rejected) =
            PermissionSet::parse_lossy(vec!["materails:create", "orders:read", "garbage"]);
        assert_eq!(set.to_tokens(), vec!["orders:read"]);
        let bad: Vec<&str> = rejected.iter().map(|e| e.token()).collect();
        assert_eq!(bad, vec!["materails:create", "garbage"]);
    }

    #[test]
    fn test_grouped_by_resource() {
        let (set, _) = PermissionSet::parse_lossy([
            "reports:export",
            "materials:create",
            "reports:view",
        ]);
        let groups = set.grouped_by_resource();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[&Resource::Materials], vec![Action::Create]);
        assert_eq!(groups[&Resource::Reports], vec![Action::Export, Action::View]);
    }

    #[test]
    fn test_serde_is_a_plain_string_array() {
        let (set, _) = PermissionSet::parse_lossy(["staff:manage", "roles:manage"]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["staff:manage","roles:manage"]"#);
        let back: PermissionSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}
