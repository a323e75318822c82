use leptos::prelude::*;

use super::context::use_auth;

/// Component that requires authentication
/// Shows `fallback` (or a short notice) if not authenticated
#[component]
pub fn RequireAuth(
    #[prop(optional, into)] fallback: Option<ViewFn>,
    children: ChildrenFn,
) -> impl IntoView {
    let ctx = use_auth();
    let fallback = fallback.unwrap_or_else(|| {
        ViewFn::from(|| view! { <div class="alert alert--warning">"Требуется вход в систему"</div> })
    });

    view! {
        <Show when=move || ctx.is_authenticated() fallback=fallback>
            {children()}
        </Show>
    }
}
