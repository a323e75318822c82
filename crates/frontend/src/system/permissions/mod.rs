pub mod gate;
pub mod hooks;
pub mod store;

pub use gate::{Can, RequireCapability, RequirePermission};
pub use hooks::{use_permissions, Permissions};
pub use store::PermissionStore;
