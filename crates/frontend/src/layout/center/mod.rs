use contracts::system::permissions::Capability;
use leptos::prelude::*;

use crate::layout::global_context::{AppGlobalContext, PageKey};
use crate::system::pages::area::AreaPage;
use crate::system::pages::my_access::MyAccessPage;
use crate::system::pages::workspace::WorkspacePage;
use crate::system::permissions::RequireCapability;

#[component]
pub fn Center(children: Children) -> impl IntoView {
    view! {
        <div data-zone="center" class="app-center" style="flex: 1; overflow: auto;">
            {children()}
        </div>
    }
}

/// Page for the key in `AppGlobalContext::active`. Area pages sit behind
/// the matching view flag, so a hand-edited `?active=` still shows the
/// restricted message.
#[component]
pub fn ActivePage() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    move || match ctx.active.get() {
        PageKey::Workspace => view! { <WorkspacePage /> }.into_any(),
        PageKey::MyAccess => view! { <MyAccessPage /> }.into_any(),
        PageKey::Area(resource) => view! {
            <RequireCapability capability=Capability::view_for(resource)>
                <AreaPage resource=resource />
            </RequireCapability>
        }
        .into_any(),
    }
}
