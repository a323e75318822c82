use serde::{Deserialize, Serialize};

use super::config::PermissionConfig;
use super::permission::Permission;
use super::resource::{Action, Resource};

/// UI feature switches exposed to pages as plain booleans
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    ViewMaterials,
    ManageMaterials,
    ViewProduction,
    ManageProduction,
    ViewProductionOrders,
    ManageProductionOrders,
    ViewCustomers,
    ManageCustomers,
    ViewInvoices,
    ManageInvoices,
    ViewOrders,
    ManageOrders,
    ViewReports,
    ExportReports,
    ManageStaff,
    ManageRoles,
}

impl Capability {
    pub fn code(&self) -> &'static str {
        match self {
            Capability::ViewMaterials => "view_materials",
            Capability::ManageMaterials => "manage_materials",
            Capability::ViewProduction => "view_production",
            Capability::ManageProduction => "manage_production",
            Capability::ViewProductionOrders => "view_production_orders",
            Capability::ManageProductionOrders => "manage_production_orders",
            Capability::ViewCustomers => "view_customers",
            Capability::ManageCustomers => "manage_customers",
            Capability::ViewInvoices => "view_invoices",
            Capability::ManageInvoices => "manage_invoices",
            Capability::ViewOrders => "view_orders",
            Capability::ManageOrders => "manage_orders",
            Capability::ViewReports => "view_reports",
            Capability::ExportReports => "export_reports",
            Capability::ManageStaff => "manage_staff",
            Capability::ManageRoles => "manage_roles",
        }
    }

    pub fn all() -> Vec<Capability> {
        vec![
            Capability::ViewMaterials,
            Capability::ManageMaterials,
            Capability::ViewProduction,
            Capability::ManageProduction,
            Capability::ViewProductionOrders,
            Capability::ManageProductionOrders,
            Capability::ViewCustomers,
            Capability::ManageCustomers,
            Capability::ViewInvoices,
            Capability::ManageInvoices,
            Capability::ViewOrders,
            Capability::ManageOrders,
            Capability::ViewReports,
            Capability::ExportReports,
            Capability::ManageStaff,
            Capability::ManageRoles,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|c| c.code() == code)
    }

    /// Business area the capability belongs to
    pub fn resource(&self) -> Resource {
        match self {
            Capability::ViewMaterials | Capability::ManageMaterials => Resource::Materials,
            Capability::ViewProduction | Capability::ManageProduction => Resource::Production,
            Capability::ViewProductionOrders | Capability::ManageProductionOrders => {
                Resource::ProductionOrders
            }
            Capability::ViewCustomers | Capability::ManageCustomers => Resource::Customers,
            Capability::ViewInvoices | Capability::ManageInvoices => Resource::Invoices,
            Capability::ViewOrders | Capability::ManageOrders => Resource::Orders,
            Capability::ViewReports | Capability::ExportReports => Resource::Reports,
            Capability::ManageStaff => Resource::Staff,
            Capability::ManageRoles => Resource::Roles,
        }
    }

    /// The capability that makes an area show up in navigation
    pub fn view_for(resource: Resource) -> Capability {
        match resource {
            Resource::Materials => Capability::ViewMaterials,
            Resource::Production => Capability::ViewProduction,
            Resource::ProductionOrders => Capability::ViewProductionOrders,
            Resource::Customers => Capability::ViewCustomers,
            Resource::Invoices => Capability::ViewInvoices,
            Resource::Orders => Capability::ViewOrders,
            Resource::Reports => Capability::ViewReports,
            Resource::Staff => Capability::ManageStaff,
            Resource::Roles => Capability::ManageRoles,
        }
    }

    /// Requirement used when the session carries explicit permissions
    pub fn requirement(&self) -> PermissionConfig {
        let resource = self.resource();
        match self {
            Capability::ViewReports => PermissionConfig::any_of([
                Permission::new(resource, Action::View),
                Permission::new(resource, Action::Read),
            ]),
            Capability::ExportReports => PermissionConfig::all_of([
                Permission::new(resource, Action::View),
                Permission::new(resource, Action::Export),
            ]),
            Capability::ManageStaff | Capability::ManageRoles => {
                PermissionConfig::single(Permission::new(resource, Action::Manage))
            }
            Capability::ViewMaterials
            | Capability::ViewProduction
            | Capability::ViewProductionOrders
            | Capability::ViewCustomers
            | Capability::ViewInvoices
            | Capability::ViewOrders => view_requirement(resource),
            Capability::ManageMaterials
            | Capability::ManageProduction
            | Capability::ManageProductionOrders
            | Capability::ManageCustomers
            | Capability::ManageInvoices
            | Capability::ManageOrders => manage_requirement(resource),
        }
    }
}

fn view_requirement(resource: Resource) -> PermissionConfig {
    PermissionConfig::any_of(
        [Action::Read, Action::View, Action::Manage]
            .into_iter()
            .map(|action| Permission::new(resource, action)),
    )
}

fn manage_requirement(resource: Resource) -> PermissionConfig {
    PermissionConfig::any_of(
        [Action::Create, Action::Update, Action::Delete, Action::Manage]
            .into_iter()
            .map(|action| Permission::new(resource, action)),
    )
}

/// Resolved feature flags for the current session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessFlags {
    pub can_view_materials: bool,
    pub can_manage_materials: bool,
    pub can_view_production: bool,
    pub can_manage_production: bool,
    pub can_view_production_orders: bool,
    pub can_manage_production_orders: bool,
    pub can_view_customers: bool,
    pub can_manage_customers: bool,
    pub can_view_invoices: bool,
    pub can_manage_invoices: bool,
    pub can_view_orders: bool,
    pub can_manage_orders: bool,
    pub can_view_reports: bool,
    pub can_export_reports: bool,
    pub can_manage_staff: bool,
    pub can_manage_roles: bool,
}

impl AccessFlags {
    pub fn from_fn(mut allowed: impl FnMut(Capability) -> bool) -> Self {
        let mut flags = Self::default();
        for capability in Capability::all() {
            *flags.slot(capability) = allowed(capability);
        }
        flags
    }

    pub fn get(&self, capability: Capability) -> bool {
        match capability {
            Capability::ViewMaterials => self.can_view_materials,
            Capability::ManageMaterials => self.can_manage_materials,
            Capability::ViewProduction => self.can_view_production,
            Capability::ManageProduction => self.can_manage_production,
            Capability::ViewProductionOrders => self.can_view_production_orders,
            Capability::ManageProductionOrders => self.can_manage_production_orders,
            Capability::ViewCustomers => self.can_view_customers,
            Capability::ManageCustomers => self.can_manage_customers,
            Capability::ViewInvoices => self.can_view_invoices,
            Capability::ManageInvoices => self.can_manage_invoices,
            Capability::ViewOrders => self.can_view_orders,
            Capability::ManageOrders => self.can_manage_orders,
            Capability::ViewReports => self.can_view_reports,
            Capability::ExportReports => self.can_export_reports,
            Capability::ManageStaff => self.can_manage_staff,
            Capability::ManageRoles => self.can_manage_roles,
        }
    }

    fn slot(&mut self, capability: Capability) -> &mut bool {
        match capability {
            Capability::ViewMaterials => &mut self.can_view_materials,
            Capability::ManageMaterials => &mut self.can_manage_materials,
            Capability::ViewProduction => &mut self.can_view_production,
            Capability::ManageProduction => &mut self.can_manage_production,
            Capability::ViewProductionOrders => &mut self.can_view_production_orders,
            Capability::ManageProductionOrders => &mut self.can_manage_production_orders,
            Capability::ViewCustomers => &mut self.can_view_customers,
            Capability::ManageCustomers => &mut self.can_manage_customers,
            Capability::ViewInvoices => &mut self.can_view_invoices,
            Capability::ManageInvoices => &mut self.can_manage_invoices,
            Capability::ViewOrders => &mut self.can_view_orders,
            Capability::ManageOrders => &mut self.can_manage_orders,
            Capability::ViewReports => &mut self.can_view_reports,
            Capability::ExportReports => &mut self.can_export_reports,
            Capability::ManageStaff => &mut self.can_manage_staff,
            Capability::ManageRoles => &mut self.can_manage_roles,
        }
    }

    /// Areas whose navigation entry should be shown, in [`Resource::all`] order
    pub fn visible_areas(&self) -> Vec<Resource> {
        Resource::all()
            .into_iter()
            .filter(|r| self.get(Capability::view_for(*r)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::permissions::set::PermissionSet;

    #[test]
    fn test_codes_are_unique_and_parse_back() {
        for capability in Capability::all() {
            assert_eq!(Capability::from_code(capability.code()), Some(capability));
        }
        assert_eq!(Capability::from_code("view_everything"), None);
    }

    #[test]
    fn test_from_fn_and_get_agree() {
        let flags = AccessFlags::from_fn(|c| c == Capability::ManageInvoices);
        assert!(flags.can_manage_invoices);
        for capability in Capability::all() {
            assert_eq!(flags.get(capability), capability == Capability::ManageInvoices);
        }
    }

    #[test]
    fn test_export_reports_needs_view_and_export() {
        let requirement = Capability::ExportReports.requirement();
        let (only_export, _) = PermissionSet::parse_lossy(["reports:export"]);
        let (both, _) = PermissionSet::parse_lossy(["reports:export", "reports:view"]);
        assert!(!requirement.is_satisfied_by(&only_export));
        assert!(requirement.is_satisfied_by(&both));
    }

    #[test]
    fn test_manage_implies_view_for_areas() {
        let (held, _) = PermissionSet::parse_lossy(["materials:manage"]);
        assert!(Capability::ViewMaterials.requirement().is_satisfied_by(&held));
        assert!(Capability::ManageMaterials.requirement().is_satisfied_by(&held));
        assert!(!Capability::ViewProduction.requirement().is_satisfied_by(&held));
    }

    #[test]
    fn test_visible_areas() {
        let flags = AccessFlags {
            can_view_invoices: true,
            can_manage_roles: true,
            can_manage_materials: true,
            ..Default::default()
        };
        assert_eq!(flags.visible_areas(), vec![Resource::Invoices, Resource::Roles]);
        assert!(AccessFlags::default().visible_areas().is_empty());
    }
}
