use contracts::system::permissions::{AccessFlags, Capability, Resource};
use leptos::prelude::*;
use thaw::*;

use crate::layout::global_context::{AppGlobalContext, PageKey};
use crate::shared::access_restricted::AccessRestricted;
use crate::shared::icons::{icon, resource_icon};
use crate::shared::page_frame::{PageFrame, PAGE_CAT_DASHBOARD};
use crate::system::permissions::use_permissions;

/// Card content for one area the session may see
#[derive(Debug, Clone, Copy, PartialEq)]
struct AreaCard {
    resource: Resource,
    can_manage: bool,
}

/// Manage rights of staff and roles coincide with visibility, so those cards
/// carry no separate badge.
fn area_cards(flags: &AccessFlags) -> Vec<AreaCard> {
    flags
        .visible_areas()
        .into_iter()
        .map(|resource| {
            let can_manage = Capability::all()
                .into_iter()
                .filter(|c| c.resource() == resource && *c != Capability::view_for(resource))
                .any(|c| flags.get(c));
            AreaCard {
                resource,
                can_manage,
            }
        })
        .collect()
}

#[component]
pub fn WorkspacePage() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let permissions = use_permissions();

    let cards = Memo::new(move |_| area_cards(&permissions.flags()));

    view! {
        <PageFrame page_id="workspace--dashboard" category=PAGE_CAT_DASHBOARD>
            <div class="page__header">
                <h1>"Обзор"</h1>
            </div>

            <div class="page__content">
                <Show
                    when=move || !cards.with(|c| c.is_empty())
                    fallback=|| view! {
                        <AccessRestricted message="Для вашей роли нет доступных разделов. Обратитесь к администратору." />
                    }
                >
                    <div class="workspace-grid">
                        <For
                            each=move || cards.get()
                            key=|card| card.resource
                            children=move |card| {
                                let resource = card.resource;
                                view! {
                                    <Card attr:class="workspace-card">
                                        <div
                                            class="workspace-card__header"
                                            on:click=move |_| ctx.open(PageKey::Area(resource))
                                        >
                                            {icon(resource_icon(resource))}
                                            <span class="workspace-card__title">{resource.display_name()}</span>
                                        </div>
                                        <div class="workspace-card__footer">
                                            {if card.can_manage {
                                                view! {
                                                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Success>
                                                        "Управление"
                                                    </Badge>
                                                }.into_any()
                                            } else {
                                                view! {
                                                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Subtle>
                                                        "Просмотр"
                                                    </Badge>
                                                }.into_any()
                                            }}
                                            <Button
                                                size=ButtonSize::Small
                                                appearance=ButtonAppearance::Subtle
                                                on_click=move |_| ctx.open(PageKey::Area(resource))
                                            >
                                                "Открыть"
                                            </Button>
                                        </div>
                                    </Card>
                                }
                            }
                        />
                    </div>
                </Show>
            </div>
        </PageFrame>
    }
}
