//! Sidebar with collapsible menu groups.
//!
//! Items are filtered by the session's feature flags on every render, so the
//! menu follows logins, logouts and role switches without a reload.

use contracts::system::permissions::{AccessFlags, Capability, Resource};
use leptos::prelude::*;

use crate::layout::global_context::{AppGlobalContext, PageKey};
use crate::shared::icons::{icon, resource_icon};
use crate::system::permissions::use_permissions;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    items: Vec<Resource>,
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "manufacturing",
            label: "Производство",
            icon: "production",
            items: vec![
                Resource::Materials,
                Resource::Production,
                Resource::ProductionOrders,
            ],
        },
        MenuGroup {
            id: "sales",
            label: "Продажи и финансы",
            icon: "invoices",
            items: vec![
                Resource::Customers,
                Resource::Orders,
                Resource::Invoices,
                Resource::Reports,
            ],
        },
        MenuGroup {
            id: "administration",
            label: "Администрирование",
            icon: "shield",
            items: vec![Resource::Staff, Resource::Roles],
        },
    ]
}

/// Groups with only the items the flags allow; empty groups are dropped
fn visible_groups(groups: Vec<MenuGroup>, flags: &AccessFlags) -> Vec<MenuGroup> {
    groups
        .into_iter()
        .filter_map(|mut group| {
            group
                .items
                .retain(|resource| flags.get(Capability::view_for(*resource)));
            (!group.items.is_empty()).then_some(group)
        })
        .collect()
}

#[component]
fn SidebarItem(page: PageKey, icon_name: &'static str, padding: &'static str) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    view! {
        <div
            class="app-sidebar__item"
            class:app-sidebar__item--active=move || ctx.active.get() == page
            style:padding-left=padding
            on:click=move |_| ctx.open(page)
        >
            <div class="app-sidebar__item-content">
                {icon(icon_name)}
                <span>{page.title()}</span>
            </div>
        </div>
    }
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let permissions = use_permissions();
    let expanded_groups: RwSignal<Vec<&'static str>> =
        RwSignal::new(get_menu_groups().iter().map(|g| g.id).collect());

    let groups_view = move || {
        visible_groups(get_menu_groups(), &permissions.flags())
            .into_iter()
            .map(|group| {
                let group_id = group.id;
                view! {
                    <div>
                        <div
                            class="app-sidebar__item"
                            style:padding-left="12px"
                            on:click=move |_| {
                                expanded_groups.update(|items| {
                                    if let Some(pos) = items.iter().position(|x| *x == group_id) {
                                        items.remove(pos);
                                    } else {
                                        items.push(group_id);
                                    }
                                });
                            }
                        >
                            <div class="app-sidebar__item-content">
                                {icon(group.icon)}
                                <span>{group.label}</span>
                            </div>
                            <div
                                class="app-sidebar__chevron"
                                class:app-sidebar__chevron--expanded=move || expanded_groups.get().contains(&group_id)
                            >
                                {icon("chevron-right")}
                            </div>
                        </div>

                        <Show when=move || expanded_groups.get().contains(&group_id)>
                            <div class="app-sidebar__children">
                                {group.items.iter().map(|resource| view! {
                                    <SidebarItem
                                        page=PageKey::Area(*resource)
                                        icon_name=resource_icon(*resource)
                                        padding="10px"
                                    />
                                }).collect_view()}
                            </div>
                        </Show>
                    </div>
                }
            })
            .collect_view()
    };

    view! {
        <div class="app-sidebar__content">
            <SidebarItem page=PageKey::Workspace icon_name="dashboard" padding="12px" />
            {groups_view}
            <SidebarItem page=PageKey::MyAccess icon_name="key" padding="12px" />
        </div>
    }
}
