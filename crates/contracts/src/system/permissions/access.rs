use super::capability::{AccessFlags, Capability};
use super::config::{evaluate, PermissionConfig};
use super::legacy::LegacyRoleTable;
use super::permission::PermissionParseError;
use super::role::Role;
use super::set::PermissionSet;

/// Role and permissions of one session, always replaced as a pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionAccess {
    role: Option<Role>,
    permissions: PermissionSet,
    /// The server sent no permission tokens at all
    legacy: bool,
}

/// Where feature flags come from for a given session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessSource<'a> {
    /// The session carries explicit permission tokens
    Permissions(&'a PermissionSet),
    /// No tokens at all; fall back to the role allow-lists
    LegacyRole(Option<&'a Role>),
}

impl SessionAccess {
    /// Access from an already parsed set; an empty set means a legacy account
    pub fn new(role: Role, permissions: PermissionSet) -> Self {
        let legacy = permissions.is_empty();
        Self {
            role: Some(role),
            permissions,
            legacy,
        }
    }

    /// Access from raw server tokens. Legacy mode depends on the raw list, so
    /// a list whose tokens are all rejected grants nothing.
    pub fn from_tokens<I, S>(role: Role, tokens: I) -> (Self, Vec<PermissionParseError>)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens: Vec<S> = tokens.into_iter().collect();
        let legacy = tokens.is_empty();
        let (permissions, rejected) = PermissionSet::parse_lossy(tokens);
        let access = Self {
            role: Some(role),
            permissions,
            legacy,
        };
        (access, rejected)
    }

    /// Nobody logged in, or nothing loaded yet
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn role(&self) -> Option<&Role> {
        self.role.as_ref()
    }

    pub fn permissions(&self) -> &PermissionSet {
        &self.permissions
    }

    pub fn is_anonymous(&self) -> bool {
        self.role.is_none() && self.permissions.is_empty()
    }

    pub fn can(&self, requirement: &PermissionConfig) -> bool {
        evaluate(requirement, &self.permissions)
    }

    pub fn cannot(&self, requirement: &PermissionConfig) -> bool {
        !self.can(requirement)
    }

    pub fn source(&self) -> AccessSource<'_> {
        if self.legacy || self.role.is_none() {
            AccessSource::LegacyRole(self.role.as_ref())
        } else {
            AccessSource::Permissions(&self.permissions)
        }
    }

    /// True when flags are being resolved from the role name
    pub fn is_legacy_mode(&self) -> bool {
        self.role.is_some() && matches!(self.source(), AccessSource::LegacyRole(_))
    }

    pub fn flags(&self, table: &LegacyRoleTable) -> AccessFlags {
        match self.source() {
            AccessSource::Permissions(held) => flags_from_permissions(held),
            AccessSource::LegacyRole(role) => flags_from_role(role, table),
        }
    }
}

fn flags_from_permissions(held: &PermissionSet) -> AccessFlags {
    AccessFlags::from_fn(|capability| capability.requirement().is_satisfied_by(held))
}

fn flags_from_role(role: Option<&Role>, table: &LegacyRoleTable) -> AccessFlags {
    match role {
        Some(role) => AccessFlags::from_fn(|capability: Capability| {
            table.allows(&role.name, capability)
        }),
        None => AccessFlags::default(),
    }
}
