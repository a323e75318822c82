use contracts::system::permissions::{
    AccessFlags, Action, Capability, LegacyRoleTable, PermissionSet, Resource,
};
use leptos::prelude::*;
use thaw::*;

use crate::shared::page_frame::{PageFrame, PAGE_CAT_SYSTEM};
use crate::system::permissions::use_permissions;

fn mode_label(has_role: bool, is_legacy: bool) -> &'static str {
    match (has_role, is_legacy) {
        (false, _) => "Нет данных о правах",
        (true, true) => "По роли (устаревшая схема)",
        (true, false) => "По списку разрешений",
    }
}

/// The role table is shown to whoever may manage roles, by flag, so legacy
/// admins see it too
fn shows_role_table(flags: &AccessFlags) -> bool {
    flags.get(Capability::ManageRoles)
}

/// Held actions per resource, in resource order
fn permission_rows(held: &PermissionSet) -> Vec<(Resource, Vec<Action>)> {
    held.grouped_by_resource().into_iter().collect()
}

/// What the session holds: role, resolution mode and the permission list
#[component]
pub fn MyAccessPage() -> impl IntoView {
    let permissions = use_permissions();

    let role_name = move || {
        permissions
            .role()
            .map(|r| r.name)
            .unwrap_or_else(|| "не назначена".to_string())
    };
    let role_description = move || permissions.role().and_then(|r| r.description);
    let mode = move || mode_label(permissions.role().is_some(), permissions.is_legacy_mode());
    let rows = move || permission_rows(&permissions.permissions());

    view! {
        <PageFrame page_id="my_access--system" category=PAGE_CAT_SYSTEM>
            <div class="page__header">
                <h1>"Мой доступ"</h1>
            </div>

            <div class="page__content">
                <div class="details-section">
                    <div class="form-group">
                        <label>"Роль"</label>
                        <span>{role_name}</span>
                        {move || role_description().map(|d| view! {
                            <div class="form-group__hint">{d}</div>
                        })}
                    </div>
                    <div class="form-group">
                        <label>"Источник прав"</label>
                        <span>{mode}</span>
                    </div>
                </div>

                <h2>"Разрешения"</h2>
                <Show
                    when=move || !permissions.permissions().is_empty()
                    fallback=|| view! { <p class="text-muted">"Список разрешений пуст"</p> }
                >
                    <Table>
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell min_width=200.0>"Раздел"</TableHeaderCell>
                                <TableHeaderCell min_width=300.0>"Действия"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || rows().into_iter().map(|(resource, actions)| view! {
                                <TableRow>
                                    <TableCell>
                                        <TableCellLayout>{resource.display_name()}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>
                                            <Space>
                                                {actions.into_iter().map(|action| view! {
                                                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Informative>
                                                        {action.display_name()}
                                                    </Badge>
                                                }).collect_view()}
                                            </Space>
                                        </TableCellLayout>
                                    </TableCell>
                                </TableRow>
                            }).collect_view()}
                        </TableBody>
                    </Table>
                </Show>

                <Show when=move || shows_role_table(&permissions.flags())>
                    <LegacyRoleTableView />
                </Show>
            </div>
        </PageFrame>
    }
}

/// Built-in role allow-lists used for sessions without explicit permissions
#[component]
fn LegacyRoleTableView() -> impl IntoView {
    let table = LegacyRoleTable::builtin();

    view! {
        <h2>"Права ролей по умолчанию"</h2>
        <Table>
            <TableHeader>
                <TableRow>
                    <TableHeaderCell min_width=220.0>"Возможность"</TableHeaderCell>
                    <TableHeaderCell min_width=300.0>"Роли"</TableHeaderCell>
                </TableRow>
            </TableHeader>
            <TableBody>
                {Capability::all().into_iter().map(|capability| view! {
                    <TableRow>
                        <TableCell>
                            <TableCellLayout>
                                <code>{capability.code()}</code>
                            </TableCellLayout>
                        </TableCell>
                        <TableCell>
                            <TableCellLayout>{table.roles_for(capability).join(", ")}</TableCellLayout>
                        </TableCell>
                    </TableRow>
                }).collect_view()}
            </TableBody>
        </Table>
    }
}
