use leptos::prelude::*;

use crate::shared::icons::icon;

/// Shown instead of a page (or a whole workspace) the session may not see
#[component]
pub fn AccessRestricted(#[prop(optional, into)] message: Option<String>) -> impl IntoView {
    let message = message.unwrap_or_else(|| {
        "У вашей роли нет прав на этот раздел. Обратитесь к администратору.".to_string()
    });

    view! {
        <div class="access-restricted" role="alert">
            <div class="access-restricted__icon">{icon("lock")}</div>
            <h2 class="access-restricted__title">"Доступ ограничен"</h2>
            <p class="access-restricted__message">{message}</p>
        </div>
    }
}
