//! Role-name allow-lists for sessions that carry no permission tokens.
//!
//! Older accounts come back from the backend with a role but an empty
//! `permissions` array. For those the UI flags are resolved by looking the
//! upper-cased role name up in this table. Nothing else reads it, so it can be
//! removed on its own once every account has explicit permissions.

use std::collections::{HashMap, HashSet};

use anyhow::{anyhow, Context};
use once_cell::sync::Lazy;
use serde::Deserialize;

use super::capability::Capability;
use super::role::normalize_role_name;

/// Allow-lists embedded in the binary
pub const DEFAULT_ROLE_TABLE: &str = r#"
[allow]
view_materials = ["ADMIN", "MANAGER", "PRODUCTION_MANAGER", "WAREHOUSE"]
manage_materials = ["ADMIN", "WAREHOUSE"]
view_production = ["ADMIN", "MANAGER", "PRODUCTION_MANAGER"]
manage_production = ["ADMIN", "PRODUCTION_MANAGER"]
view_production_orders = ["ADMIN", "MANAGER", "PRODUCTION_MANAGER", "SALES_MANAGER"]
manage_production_orders = ["ADMIN", "PRODUCTION_MANAGER"]
view_customers = ["ADMIN", "MANAGER", "SALES_MANAGER", "ACCOUNTANT"]
manage_customers = ["ADMIN", "SALES_MANAGER"]
view_invoices = ["ADMIN", "MANAGER", "ACCOUNTANT"]
manage_invoices = ["ADMIN", "ACCOUNTANT"]
view_orders = ["ADMIN", "MANAGER", "SALES_MANAGER"]
manage_orders = ["ADMIN", "SALES_MANAGER"]
view_reports = ["ADMIN", "MANAGER", "ACCOUNTANT"]
export_reports = ["ADMIN", "ACCOUNTANT"]
manage_staff = ["ADMIN"]
manage_roles = ["ADMIN"]
"#;

static BUILTIN: Lazy<LegacyRoleTable> =
    Lazy::new(|| LegacyRoleTable::from_toml(DEFAULT_ROLE_TABLE).unwrap_or_default());

#[derive(Debug, Deserialize)]
struct RawTable {
    #[serde(default)]
    allow: HashMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyRoleTable {
    allow: HashMap<Capability, HashSet<String>>,
}

impl LegacyRoleTable {
    /// The embedded table. An unparsable table grants nothing.
    pub fn builtin() -> &'static LegacyRoleTable {
        &BUILTIN
    }

    /// Parse a table of the form `[allow] <capability> = ["ROLE", ...]`
    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        let raw: RawTable = toml::from_str(contents).context("invalid role table")?;

        let mut allow = HashMap::new();
        for (key, roles) in raw.allow {
            let capability = Capability::from_code(&key)
                .ok_or_else(|| anyhow!("unknown capability '{}' in role table", key))?;
            let names = roles.iter().map(|r| normalize_role_name(r)).collect();
            allow.insert(capability, names);
        }

        Ok(Self { allow })
    }

    pub fn allows(&self, role_name: &str, capability: Capability) -> bool {
        self.allow
            .get(&capability)
            .map(|roles| roles.contains(&normalize_role_name(role_name)))
            .unwrap_or(false)
    }

    /// Roles listed for a capability, sorted
    pub fn roles_for(&self, capability: Capability) -> Vec<String> {
        let mut roles: Vec<String> = self
            .allow
            .get(&capability)
            .map(|r| r.iter().cloned().collect())
            .unwrap_or_default();
        roles.sort();
        roles
    }
}
