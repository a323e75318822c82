use contracts::system::permissions::{Capability, PermissionConfig};
use leptos::prelude::*;

use super::hooks::{use_permissions, Permissions};
use crate::shared::access_restricted::AccessRestricted;

/// Whether a permission gate shows its children
fn requirement_met(permissions: Permissions, requirement: &PermissionConfig) -> bool {
    permissions.can(requirement)
}

/// Whether a capability gate shows its children; legacy role flags apply
fn capability_met(permissions: Permissions, capability: Capability) -> bool {
    permissions.has(capability)
}

/// Renders children only when the requirement is met; nothing otherwise
#[component]
pub fn Can(#[prop(into)] requirement: PermissionConfig, children: ChildrenFn) -> impl IntoView {
    let permissions = use_permissions();
    let requirement = StoredValue::new(requirement);

    view! {
        <Show when=move || requirement.with_value(|r| requirement_met(permissions, r))>
            {children()}
        </Show>
    }
}

/// Page-level gate that explains the denial
#[component]
pub fn RequirePermission(
    #[prop(into)] requirement: PermissionConfig,
    children: ChildrenFn,
) -> impl IntoView {
    let permissions = use_permissions();
    let requirement = StoredValue::new(requirement);

    view! {
        <Show
            when=move || requirement.with_value(|r| requirement_met(permissions, r))
            fallback=|| view! { <AccessRestricted /> }
        >
            {children()}
        </Show>
    }
}

/// Like [`RequirePermission`], resolved through the feature flags
#[component]
pub fn RequireCapability(capability: Capability, children: ChildrenFn) -> impl IntoView {
    let permissions = use_permissions();

    view! {
        <Show
            when=move || capability_met(permissions, capability)
            fallback=|| view! { <AccessRestricted /> }
        >
            {children()}
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::auth::context::AuthState;
    use contracts::system::permissions::{Permission, PermissionSet, Role, SessionAccess};

    fn session(role: &str, tokens: &[&str]) -> AuthState {
        let (access, _) = SessionAccess::from_tokens(
            Role {
                id: "r".to_string(),
                name: role.to_string(),
                description: None,
            },
            tokens,
        );
        AuthState {
            access_token: Some("token".to_string()),
            user: None,
            access,
        }
    }

    fn create_materials() -> PermissionConfig {
        "materials:create".parse::<Permission>().unwrap().into()
    }

    #[test]
    fn test_nothing_loaded_shows_nothing() {
        let state = RwSignal::new(AuthState::default());
        let permissions = Permissions::new(state);

        assert!(!requirement_met(permissions, &create_materials()));
        for capability in Capability::all() {
            assert!(!capability_met(permissions, capability));
        }
    }

    #[test]
    fn test_permission_gate_opens_only_for_matching_set() {
        let state = RwSignal::new(session("MANAGER", &["materials:read"]));
        let permissions = Permissions::new(state);
        assert!(!requirement_met(permissions, &create_materials()));

        state.set(session("MANAGER", &["materials:read", "materials:create"]));
        assert!(requirement_met(permissions, &create_materials()));

        state.set(AuthState::default());
        assert!(!requirement_met(permissions, &create_materials()));
    }

    #[test]
    fn test_combined_requirement_gate() {
        let requirement = PermissionConfig::all_and_any(
            PermissionSet::parse_lossy(["reports:view"]).0.iter().copied(),
            PermissionSet::parse_lossy(["reports:export", "reports:manage"])
                .0
                .iter()
                .copied(),
        );
        let state = RwSignal::new(session("ANALYST", &["reports:view"]));
        let permissions = Permissions::new(state);
        assert!(!requirement_met(permissions, &requirement));

        state.set(session("ANALYST", &["reports:view", "reports:manage"]));
        assert!(requirement_met(permissions, &requirement));
    }

    #[test]
    fn test_capability_gate_uses_role_only_without_tokens() {
        let state = RwSignal::new(session("ACCOUNTANT", &[]));
        let permissions = Permissions::new(state);
        assert!(capability_met(permissions, Capability::ViewInvoices));
        // The permission gate never consults the role table
        assert!(!requirement_met(
            permissions,
            &Capability::ViewInvoices.requirement()
        ));

        state.set(session("ACCOUNTANT", &["invoices:archive"]));
        assert!(!capability_met(permissions, Capability::ViewInvoices));
    }
}
