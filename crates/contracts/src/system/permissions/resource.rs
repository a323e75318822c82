use serde::{Deserialize, Serialize};

/// Business areas a permission token can refer to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Materials,
    Production,
    ProductionOrders,
    Customers,
    Invoices,
    Orders,
    Reports,
    Staff,
    Roles,
}

impl Resource {
    /// Token prefix used on the wire, e.g. `materials` in `materials:create`
    pub fn code(&self) -> &'static str {
        match self {
            Resource::Materials => "materials",
            Resource::Production => "production",
            Resource::ProductionOrders => "production_orders",
            Resource::Customers => "customers",
            Resource::Invoices => "invoices",
            Resource::Orders => "orders",
            Resource::Reports => "reports",
            Resource::Staff => "staff",
            Resource::Roles => "roles",
        }
    }

    /// Человекочитаемое название раздела
    pub fn display_name(&self) -> &'static str {
        match self {
            Resource::Materials => "Материалы",
            Resource::Production => "Производство",
            Resource::ProductionOrders => "Заказы на производство",
            Resource::Customers => "Клиенты",
            Resource::Invoices => "Счета",
            Resource::Orders => "Заказы",
            Resource::Reports => "Отчёты",
            Resource::Staff => "Сотрудники",
            Resource::Roles => "Роли и права",
        }
    }

    pub fn all() -> Vec<Resource> {
        vec![
            Resource::Materials,
            Resource::Production,
            Resource::ProductionOrders,
            Resource::Customers,
            Resource::Invoices,
            Resource::Orders,
            Resource::Reports,
            Resource::Staff,
            Resource::Roles,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "materials" => Some(Resource::Materials),
            "production" => Some(Resource::Production),
            "production_orders" => Some(Resource::ProductionOrders),
            "customers" => Some(Resource::Customers),
            "invoices" => Some(Resource::Invoices),
            "orders" => Some(Resource::Orders),
            "reports" => Some(Resource::Reports),
            "staff" => Some(Resource::Staff),
            "roles" => Some(Resource::Roles),
            _ => None,
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Operations a permission token grants on a [`Resource`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Read,
    View,
    Create,
    Update,
    Delete,
    Manage,
    Approve,
    Export,
}

impl Action {
    pub fn code(&self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::View => "view",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Manage => "manage",
            Action::Approve => "approve",
            Action::Export => "export",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Action::Read => "Чтение",
            Action::View => "Просмотр",
            Action::Create => "Создание",
            Action::Update => "Изменение",
            Action::Delete => "Удаление",
            Action::Manage => "Управление",
            Action::Approve => "Согласование",
            Action::Export => "Экспорт",
        }
    }

    pub fn all() -> Vec<Action> {
        vec![
            Action::Read,
            Action::View,
            Action::Create,
            Action::Update,
            Action::Delete,
            Action::Manage,
            Action::Approve,
            Action::Export,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "read" => Some(Action::Read),
            "view" => Some(Action::View),
            "create" => Some(Action::Create),
            "update" => Some(Action::Update),
            "delete" => Some(Action::Delete),
            "manage" => Some(Action::Manage),
            "approve" => Some(Action::Approve),
            "export" => Some(Action::Export),
            _ => None,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
