use std::sync::Arc;

use contracts::system::auth::{LoginResponse, UserInfo, UserProfile};
use contracts::system::permissions::SessionAccess;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::api;
use super::storage::{self, KeyValueStore, LocalStorage};
use crate::system::permissions::store::PermissionStore;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user: Option<UserProfile>,
    pub access: SessionAccess,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }
}

/// Persists tokens together with the permission store
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn KeyValueStore>,
    permissions: PermissionStore,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        let permissions = PermissionStore::new(storage.clone());
        Self {
            storage,
            permissions,
        }
    }

    pub fn browser() -> Self {
        Self::new(Arc::new(LocalStorage))
    }

    /// Session as left by the previous page load. The profile is not stored
    /// and arrives with the `/me` validation.
    pub fn restore(&self) -> AuthState {
        match storage::get_access_token(self.storage.as_ref()) {
            Some(access_token) => AuthState {
                access_token: Some(access_token),
                user: None,
                access: self.permissions.load(),
            },
            None => {
                self.permissions.clear_session();
                AuthState::default()
            }
        }
    }

    /// `tokens` is the permission list as received, unknown entries included
    pub fn persist(&self, access_token: &str, access: &SessionAccess, tokens: &[String]) {
        storage::save_access_token(self.storage.as_ref(), access_token);

        match access.role() {
            Some(role) => {
                if let Err(e) = self.permissions.set_session(role, tokens) {
                    log::error!("Session is not persisted and will not survive a reload: {}", e);
                }
            }
            None => self.permissions.clear_session(),
        }
    }

    pub fn save_refresh_token(&self, refresh_token: &str) {
        storage::save_refresh_token(self.storage.as_ref(), refresh_token);
    }

    pub fn refresh_token(&self) -> Option<String> {
        storage::get_refresh_token(self.storage.as_ref())
    }

    pub fn clear(&self) {
        storage::clear_tokens(self.storage.as_ref());
        self.permissions.clear_session();
    }
}

/// The single writer of session state. Provided by [`AuthProvider`].
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: RwSignal<AuthState>,
    store: StoredValue<SessionStore>,
}

impl AuthContext {
    pub fn new(store: SessionStore) -> Self {
        let state = RwSignal::new(store.restore());
        Self {
            state,
            store: StoredValue::new(store),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(|s| s.is_authenticated())
    }

    /// Apply a login response: tokens, role and permissions land together
    pub fn sign_in(&self, response: LoginResponse) {
        let LoginResponse {
            access_token,
            refresh_token,
            user,
        } = response;
        self.store
            .with_value(|store| store.save_refresh_token(&refresh_token));
        self.apply_user(access_token, user);
    }

    /// Replace profile and access with a fresh `/me` payload
    pub fn apply_user(&self, access_token: String, user: UserInfo) {
        let tokens = user.permissions.clone();
        let (profile, access, rejected) = user.into_session();
        for error in rejected {
            log::warn!("Ignoring permission from server: {}", error);
        }

        self.store
            .with_value(|store| store.persist(&access_token, &access, &tokens));

        log::info!(
            "Session for '{}' with role '{}' and {} permission(s)",
            profile.username,
            access.role().map(|r| r.name.as_str()).unwrap_or("-"),
            access.permissions().len()
        );

        self.state.set(AuthState {
            access_token: Some(access_token),
            user: Some(profile),
            access,
        });
    }

    pub fn sign_out(&self) {
        self.store.with_value(|store| store.clear());
        self.state.set(AuthState::default());
        log::info!("Session cleared");
    }

    fn refresh_token(&self) -> Option<String> {
        self.store.with_value(|store| store.refresh_token())
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(
    /// Storage backend; `localStorage` when omitted
    #[prop(optional)]
    store: Option<SessionStore>,
    children: ChildrenFn,
) -> impl IntoView {
    let ctx = AuthContext::new(store.unwrap_or_else(SessionStore::browser));

    // Check the restored session against the server once on mount
    Effect::new(move |_| {
        if ctx.state.with_untracked(|s| s.is_authenticated()) {
            spawn_local(validate_session(ctx));
        }
    });

    provide_context(ctx);

    children()
}

async fn validate_session(ctx: AuthContext) {
    let Some(access_token) = ctx.state.with_untracked(|s| s.access_token.clone()) else {
        return;
    };

    match api::get_current_user(&access_token).await {
        Ok(user) => ctx.apply_user(access_token, user),
        Err(e) => {
            log::warn!("Stored access token rejected: {}", e);
            let Some(refresh_token) = ctx.refresh_token() else {
                ctx.sign_out();
                return;
            };

            match api::refresh_token(refresh_token).await {
                Ok(response) => match api::get_current_user(&response.access_token).await {
                    Ok(user) => ctx.apply_user(response.access_token, user),
                    Err(e) => {
                        log::error!("Failed to load user after refresh: {}", e);
                        ctx.sign_out();
                    }
                },
                Err(e) => {
                    log::warn!("Session refresh failed: {}", e);
                    ctx.sign_out();
                }
            }
        }
    }
}

/// Hook to access auth state
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthProvider not found in component tree")
}

/// Helper: Perform login
pub async fn do_login(ctx: AuthContext, username: String, password: String) -> Result<(), String> {
    let response = api::login(username, password).await?;
    ctx.sign_in(response);
    Ok(())
}

/// Helper: Perform logout
pub async fn do_logout(ctx: AuthContext) {
    if let Some(refresh_token) = ctx.refresh_token() {
        if let Err(e) = api::logout(refresh_token).await {
            log::warn!("{}", e);
        }
    }
    ctx.sign_out();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::auth::storage::MemoryStorage;
    use contracts::system::permissions::{
        AccessFlags, LegacyRoleTable, PermissionConfig, Role,
    };

    fn login_response(permissions: &[&str]) -> LoginResponse {
        LoginResponse {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            user: UserInfo {
                id: "u-1".to_string(),
                username: "olga".to_string(),
                full_name: None,
                email: None,
                role: Role {
                    id: "r-1".to_string(),
                    name: "ACCOUNTANT".to_string(),
                    description: None,
                },
                permissions: permissions.iter().map(|p| p.to_string()).collect(),
            },
        }
    }

    fn memory_store() -> (SessionStore, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        (SessionStore::new(storage.clone()), storage)
    }

    #[test]
    fn test_sign_in_persists_and_updates_state() {
        let (store, storage) = memory_store();
        let ctx = AuthContext::new(store.clone());
        assert!(!ctx.state.get_untracked().is_authenticated());

        ctx.sign_in(login_response(&["invoices:read", "invoices:create"]));

        let state = ctx.state.get_untracked();
        assert!(state.is_authenticated());
        assert_eq!(state.user.map(|u| u.username), Some("olga".to_string()));
        assert_eq!(state.access.permissions().len(), 2);
        assert_eq!(storage::get_refresh_token(storage.as_ref()).as_deref(), Some("refresh"));

        // A reload sees the same role and permissions
        let restored = store.restore();
        assert_eq!(restored.access, state.access);
        assert_eq!(restored.access_token.as_deref(), Some("access"));
    }

    #[test]
    fn test_sign_out_clears_everything() {
        let (store, _) = memory_store();
        let ctx = AuthContext::new(store.clone());
        ctx.sign_in(login_response(&["orders:read"]));
        ctx.sign_out();

        assert_eq!(ctx.state.get_untracked(), AuthState::default());
        assert_eq!(store.restore(), AuthState::default());
    }

    #[test]
    fn test_restore_without_token_drops_stale_permissions() {
        let (store, storage) = memory_store();
        PermissionStore::new(storage.clone())
            .set_session(
                &Role {
                    id: "r".to_string(),
                    name: "ADMIN".to_string(),
                    description: None,
                },
                ["roles:manage"],
            )
            .unwrap();

        let state = store.restore();
        assert!(!state.is_authenticated());
        assert!(state.access.is_anonymous());
        assert!(PermissionStore::new(storage).load().is_anonymous());
    }

    #[test]
    fn test_rejected_tokens_never_grant() {
        let (store, _) = memory_store();
        let ctx = AuthContext::new(store.clone());
        ctx.sign_in(login_response(&["materails:create"]));

        let access = ctx.state.get_untracked().access;
        let requirement: PermissionConfig = "materials:create"
            .parse::<contracts::system::permissions::Permission>()
            .unwrap()
            .into();
        assert!(access.cannot(&requirement));
        assert!(!access.is_legacy_mode());
        assert_eq!(access.flags(LegacyRoleTable::builtin()), AccessFlags::default());

        // A reload must not turn the rejected list into a role fallback
        let restored = store.restore().access;
        assert_eq!(restored, access);
        assert!(!restored.is_legacy_mode());
    }
}
