use serde::{Deserialize, Serialize};

/// Role the backend assigned to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Role {
    /// Name in the form used by the legacy allow-lists (`"production manager"` → `"PRODUCTION_MANAGER"`)
    pub fn normalized_name(&self) -> String {
        normalize_role_name(&self.name)
    }
}

pub(crate) fn normalize_role_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect::<String>()
        .to_uppercase()
}
