use contracts::system::permissions::{
    AccessFlags, Capability, LegacyRoleTable, PermissionConfig, PermissionSet, Role,
};
use leptos::prelude::*;

use crate::system::auth::context::{use_auth, AuthState};

/// Permission checks for UI code.
///
/// Every method reads the auth signal, so a view using it re-renders when
/// the session changes and nothing is cached between calls.
#[derive(Clone, Copy)]
pub struct Permissions {
    state: Signal<AuthState>,
}

impl Permissions {
    pub fn new(state: impl Into<Signal<AuthState>>) -> Self {
        Self {
            state: state.into(),
        }
    }

    pub fn can(&self, requirement: &PermissionConfig) -> bool {
        self.state.with(|s| s.access.can(requirement))
    }

    pub fn cannot(&self, requirement: &PermissionConfig) -> bool {
        !self.can(requirement)
    }

    /// Feature flags, from the permission list or, when it is empty, the role name
    pub fn flags(&self) -> AccessFlags {
        self.state
            .with(|s| s.access.flags(LegacyRoleTable::builtin()))
    }

    pub fn has(&self, capability: Capability) -> bool {
        self.flags().get(capability)
    }

    pub fn role(&self) -> Option<Role> {
        self.state.with(|s| s.access.role().cloned())
    }

    pub fn permissions(&self) -> PermissionSet {
        self.state.with(|s| s.access.permissions().clone())
    }

    pub fn is_legacy_mode(&self) -> bool {
        self.state.with(|s| s.access.is_legacy_mode())
    }
}

pub fn use_permissions() -> Permissions {
    Permissions::new(use_auth().state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::permissions::{Permission, SessionAccess};

    fn signed_in(role: &str, tokens: &[&str]) -> AuthState {
        AuthState {
            access_token: Some("token".to_string()),
            user: None,
            access: SessionAccess::new(
                Role {
                    id: "r".to_string(),
                    name: role.to_string(),
                    description: None,
                },
                PermissionSet::parse_lossy(tokens).0,
            ),
        }
    }

    fn p(token: &str) -> Permission {
        token.parse().unwrap()
    }

    #[test]
    fn test_can_and_cannot() {
        let state = RwSignal::new(signed_in("MANAGER", &["materials:create", "materials:read"]));
        let permissions = Permissions::new(state);

        let create = PermissionConfig::single(p("materials:create"));
        let delete = PermissionConfig::single(p("materials:delete"));
        assert!(permissions.can(&create));
        assert!(!permissions.cannot(&create));
        assert!(permissions.cannot(&delete));
    }

    #[test]
    fn test_nothing_loaded_fails_closed() {
        let state = RwSignal::new(AuthState::default());
        let permissions = Permissions::new(state);

        assert!(permissions.cannot(&PermissionConfig::single(p("reports:view"))));
        assert_eq!(permissions.flags(), AccessFlags::default());
        assert_eq!(permissions.role(), None);
        assert!(permissions.permissions().is_empty());
    }

    #[test]
    fn test_reads_follow_session_changes() {
        let state = RwSignal::new(signed_in("ADMIN", &["roles:manage"]));
        let permissions = Permissions::new(state);
        let manage_roles = PermissionConfig::single(p("roles:manage"));

        assert!(permissions.can(&manage_roles));
        assert!(permissions.has(Capability::ManageRoles));

        state.set(signed_in("WAREHOUSE", &["materials:read"]));
        assert!(permissions.cannot(&manage_roles));
        assert!(!permissions.has(Capability::ManageRoles));
        assert_eq!(permissions.role().map(|r| r.name), Some("WAREHOUSE".to_string()));

        state.set(AuthState::default());
        assert!(!permissions.has(Capability::ViewMaterials));
    }

    #[test]
    fn test_legacy_flags_only_without_permissions() {
        let state = RwSignal::new(signed_in("ACCOUNTANT", &[]));
        let permissions = Permissions::new(state);
        assert!(permissions.is_legacy_mode());
        assert!(permissions.flags().can_manage_invoices);

        state.set(signed_in("ACCOUNTANT", &["customers:read"]));
        assert!(!permissions.is_legacy_mode());
        let flags = permissions.flags();
        assert!(!flags.can_manage_invoices);
        assert!(flags.can_view_customers);
    }
}
