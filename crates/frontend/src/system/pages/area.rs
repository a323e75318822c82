use contracts::system::permissions::{Action, Permission, PermissionConfig, PermissionSet, Resource};
use leptos::prelude::*;
use thaw::*;

use crate::shared::icons::{icon, resource_icon};
use crate::shared::page_frame::{PageFrame, PAGE_CAT_SYSTEM};
use crate::system::permissions::{use_permissions, Can};

/// Every action on the resource with whether the session holds it
fn action_matrix(resource: Resource, held: &PermissionSet) -> Vec<(Action, bool)> {
    Action::all()
        .into_iter()
        .map(|action| (action, held.contains(&Permission::new(resource, action))))
        .collect()
}

#[component]
fn ToolbarButton(label: &'static str, icon_name: &'static str, permission: Permission) -> impl IntoView {
    view! {
        <Can requirement=permission>
            <Button
                size=ButtonSize::Small
                appearance=ButtonAppearance::Secondary
                on_click=move |_| log::debug!("toolbar action '{}'", permission)
            >
                {icon(icon_name)}
                <span>{label}</span>
            </Button>
        </Can>
    }
}

/// Access overview for one business area
#[component]
pub fn AreaPage(resource: Resource) -> impl IntoView {
    let permissions = use_permissions();

    let rows = move || action_matrix(resource, &permissions.permissions());
    let export_requirement = PermissionConfig::all_of([
        Permission::new(resource, Action::View),
        Permission::new(resource, Action::Export),
    ]);

    view! {
        <PageFrame page_id="area--system" category=PAGE_CAT_SYSTEM>
            <div class="page__header">
                {icon(resource_icon(resource))}
                <h1>{resource.display_name()}</h1>
            </div>

            <div class="page__toolbar">
                <Space>
                    <ToolbarButton
                        label="Создать"
                        icon_name="plus"
                        permission=Permission::new(resource, Action::Create)
                    />
                    <ToolbarButton
                        label="Согласовать"
                        icon_name="check"
                        permission=Permission::new(resource, Action::Approve)
                    />
                    <Can requirement=export_requirement>
                        <Button
                            size=ButtonSize::Small
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| log::debug!("export '{}'", resource)
                        >
                            {icon("download")}
                            <span>"Экспорт"</span>
                        </Button>
                    </Can>
                </Space>
            </div>

            <div class="page__content">
                <Show when=move || permissions.is_legacy_mode()>
                    <MessageBar intent=MessageBarIntent::Warning>
                        "Права назначены по роли. Подробная матрица действий недоступна."
                    </MessageBar>
                </Show>

                <Table>
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell min_width=200.0>"Действие"</TableHeaderCell>
                            <TableHeaderCell min_width=160.0>"Разрешение"</TableHeaderCell>
                            <TableHeaderCell min_width=120.0>"Доступ"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || rows().into_iter().map(|(action, allowed)| view! {
                            <TableRow>
                                <TableCell>
                                    <TableCellLayout>{action.display_name()}</TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>
                                        <code>{Permission::new(resource, action).to_string()}</code>
                                    </TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>
                                        {if allowed {
                                            view! {
                                                <Badge appearance=BadgeAppearance::Filled color=BadgeColor::Success>"Да"</Badge>
                                            }.into_any()
                                        } else {
                                            view! {
                                                <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Subtle>"Нет"</Badge>
                                            }.into_any()
                                        }}
                                    </TableCellLayout>
                                </TableCell>
                            </TableRow>
                        }).collect_view()}
                    </TableBody>
                </Table>
            </div>
        </PageFrame>
    }
}
