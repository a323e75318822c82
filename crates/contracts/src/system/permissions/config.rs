use serde::{Deserialize, Serialize};

use super::permission::Permission;
use super::set::PermissionSet;

/// A requirement over permissions.
///
/// JSON forms: `"materials:create"`, `["materials:create", "materials:manage"]`
/// or `{ "allOf": [...], "anyOf": [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PermissionConfig {
    /// The permission must be held
    Single(Permission),
    /// At least one must be held; an empty list is never satisfied
    AnyOf(Vec<Permission>),
    /// Every `all_of` entry AND at least one `any_of` entry, each half only
    /// when non-empty. Both empty is vacuously satisfied.
    Combined {
        #[serde(rename = "allOf", default, skip_serializing_if = "Vec::is_empty")]
        all_of: Vec<Permission>,
        #[serde(rename = "anyOf", default, skip_serializing_if = "Vec::is_empty")]
        any_of: Vec<Permission>,
    },
}

impl PermissionConfig {
    pub fn single(permission: Permission) -> Self {
        PermissionConfig::Single(permission)
    }

    pub fn any_of(permissions: impl IntoIterator<Item = Permission>) -> Self {
        PermissionConfig::AnyOf(permissions.into_iter().collect())
    }

    pub fn all_of(permissions: impl IntoIterator<Item = Permission>) -> Self {
        PermissionConfig::Combined {
            all_of: permissions.into_iter().collect(),
            any_of: Vec::new(),
        }
    }

    pub fn all_and_any(
        all_of: impl IntoIterator<Item = Permission>,
        any_of: impl IntoIterator<Item = Permission>,
    ) -> Self {
        PermissionConfig::Combined {
            all_of: all_of.into_iter().collect(),
            any_of: any_of.into_iter().collect(),
        }
    }

    pub fn is_satisfied_by(&self, held: &PermissionSet) -> bool {
        evaluate(self, held)
    }
}

impl From<Permission> for PermissionConfig {
    fn from(value: Permission) -> Self {
        PermissionConfig::Single(value)
    }
}

impl From<Vec<Permission>> for PermissionConfig {
    fn from(value: Vec<Permission>) -> Self {
        PermissionConfig::AnyOf(value)
    }
}

/// Decides whether `requirement` is met by `held`.
///
/// Pure and infallible: a missing permission is `false`, and so is anything
/// non-vacuous against an empty set (nothing loaded yet means denied).
pub fn evaluate(requirement: &PermissionConfig, held: &PermissionSet) -> bool {
    match requirement {
        PermissionConfig::Single(permission) => held.contains(permission),
        PermissionConfig::AnyOf(options) => options.iter().any(|p| held.contains(p)),
        PermissionConfig::Combined { all_of, any_of } => {
            if !all_of.is_empty() && !all_of.iter().all(|p| held.contains(p)) {
                return false;
            }
            if !any_of.is_empty() && !any_of.iter().any(|p| held.contains(p)) {
                return false;
            }
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::permissions::resource::{Action, Resource};

    fn held(tokens: &[&str]) -> PermissionSet {
        let (set, rejected) = PermissionSet::parse_lossy(tokens);
        assert!(rejected.is_empty(), "bad fixture: {:?}", rejected);
        set
    }

    fn p(token: &str) -> Permission {
        token.parse().unwrap()
    }

    #[test]
    fn test_scenario_single_permission_held() {
        let held = held(&["materials:create", "materials:read"]);
        assert!(evaluate(&p("materials:create").into(), &held));
    }

    #[test]
    fn test_scenario_or_list_without_match() {
        let held = held(&["materials:read"]);
        let requirement = PermissionConfig::any_of([p("materials:create"), p("materials:manage")]);
        assert!(!evaluate(&requirement, &held));
    }

    #[test]
    fn test_scenario_all_of_satisfied() {
        let held = held(&["reports:view", "reports:export"]);
        let requirement = PermissionConfig::all_of([p("reports:view"), p("reports:export")]);
        assert!(evaluate(&requirement, &held));
    }

    #[test]
    fn test_scenario_all_of_partially_held() {
        let held = held(&["reports:view"]);
        let requirement = PermissionConfig::all_of([p("reports:view"), p("reports:export")]);
        assert!(!evaluate(&requirement, &held));
    }

    #[test]
    fn test_scenario_nothing_loaded_denies_everything() {
        let empty = PermissionSet::new();
        let requirements = [
            PermissionConfig::single(p("materials:read")),
            PermissionConfig::any_of([p("orders:read"), p("orders:manage")]),
            PermissionConfig::all_of([p("staff:manage")]),
            PermissionConfig::all_and_any(Vec::new(), [p("roles:manage")]),
        ];
        for requirement in &requirements {
            assert!(!evaluate(requirement, &empty), "{:?}", requirement);
        }
    }

    #[test]
    fn test_single_matches_membership() {
        let held = held(&["invoices:read", "customers:update"]);
        for resource in Resource::all() {
            for action in Action::all() {
                let permission = Permission::new(resource, action);
                assert_eq!(
                    evaluate(&permission.into(), &held),
                    held.contains(&permission)
                );
            }
        }
    }

    #[test]
    fn test_empty_or_list_is_unsatisfiable() {
        assert!(!evaluate(&PermissionConfig::AnyOf(vec![]), &PermissionSet::new()));
        assert!(!evaluate(
            &PermissionConfig::AnyOf(vec![]),
            &held(&["materials:read", "roles:manage"])
        ));
    }

    #[test]
    fn test_or_list_matches_any_element() {
        let held = held(&["orders:approve"]);
        let list = vec![p("orders:read"), p("orders:approve")];
        assert!(evaluate(&list.clone().into(), &held));
        assert!(!evaluate(&list[..1].to_vec().into(), &held));
    }

    #[test]
    fn test_combined_is_and_of_both_halves() {
        let requirement = PermissionConfig::all_and_any(
            [p("production:read")],
            [p("production:update"), p("production:manage")],
        );
        assert!(evaluate(&requirement, &held(&["production:read", "production:manage"])));
        assert!(!evaluate(&requirement, &held(&["production:read"])));
        assert!(!evaluate(&requirement, &held(&["production:update"])));
    }

    #[test]
    fn test_combined_both_empty_is_vacuous() {
        let requirement =
            PermissionConfig::all_and_any(Vec::<Permission>::new(), Vec::<Permission>::new());
        assert!(evaluate(&requirement, &PermissionSet::new()));
        assert!(evaluate(&requirement, &held(&["staff:read"])));
    }

    #[test]
    fn test_deserialize_all_shapes() {
        let single: PermissionConfig = serde_json::from_str(r#""materials:create""#).unwrap();
        assert_eq!(single, PermissionConfig::single(p("materials:create")));

        let list: PermissionConfig =
            serde_json::from_str(r#"["materials:create","materials:manage"]"#).unwrap();
        assert_eq!(
            list,
            PermissionConfig::any_of([p("materials:create"), p("materials:manage")])
        );

        let combined: PermissionConfig =
            serde_json::from_str(r#"{"allOf":["reports:view"],"anyOf":["reports:export"]}"#)
                .unwrap();
        assert_eq!(
            combined,
            PermissionConfig::all_and_any([p("reports:view")], [p("reports:export")])
        );

        let only_all: PermissionConfig =
            serde_json::from_str(r#"{"allOf":["reports:view"]}"#).unwrap();
        assert_eq!(only_all, PermissionConfig::all_of([p("reports:view")]));

        assert!(serde_json::from_str::<PermissionConfig>(r#""reprots:view""#).is_err());
    }
}
