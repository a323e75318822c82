//! Root wrapper for pages rendered in the center area.
//!
//! Every page gets an `id` of the form `{page}--{category}` and a
//! `data-page-category` attribute, so a DOM id can be pasted into a search
//! and lead straight to the component.

use leptos::prelude::*;

/// Overview / dashboard style page
pub const PAGE_CAT_DASHBOARD: &str = "dashboard";

/// System administration page
pub const PAGE_CAT_SYSTEM: &str = "system";

#[component]
pub fn PageFrame(
    /// HTML id in format `{page}--{category}`, e.g. `"workspace--dashboard"`
    page_id: &'static str,
    /// One of the PAGE_CAT_* constants
    category: &'static str,
    children: Children,
) -> impl IntoView {
    let class = match category {
        PAGE_CAT_DASHBOARD => "page page--dashboard",
        _ => "page",
    };

    view! {
        <div id=page_id class=class data-page-category=category>
            {children()}
        </div>
    }
}
