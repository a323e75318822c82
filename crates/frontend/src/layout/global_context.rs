use contracts::system::permissions::Resource;
use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

pub const WORKSPACE_KEY: &str = "workspace";
pub const MY_ACCESS_KEY: &str = "my_access";

/// Page shown in the center area, addressed by a string key in `?active=`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKey {
    Workspace,
    MyAccess,
    Area(Resource),
}

impl PageKey {
    /// Unknown keys fall back to the workspace
    pub fn parse(key: &str) -> Self {
        match key {
            MY_ACCESS_KEY => PageKey::MyAccess,
            other => Resource::from_code(other)
                .map(PageKey::Area)
                .unwrap_or(PageKey::Workspace),
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            PageKey::Workspace => WORKSPACE_KEY,
            PageKey::MyAccess => MY_ACCESS_KEY,
            PageKey::Area(resource) => resource.code(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            PageKey::Workspace => "Обзор",
            PageKey::MyAccess => "Мой доступ",
            PageKey::Area(resource) => resource.display_name(),
        }
    }
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub active: RwSignal<PageKey>,
    pub left_open: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            active: RwSignal::new(PageKey::Workspace),
            left_open: RwSignal::new(true),
        }
    }

    /// Restore the active page from the query string and keep it in sync
    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let params: HashMap<String, String> =
            serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
        if let Some(active_key) = params.get("active") {
            self.open(PageKey::parse(active_key));
        }

        let this = *self;
        Effect::new(move |_| {
            let active_key = this.active.get().key();
            let query_string =
                serde_qs::to_string(&HashMap::from([("active", active_key)])).unwrap_or_default();
            let new_url = format!("?{}", query_string);

            let current_search = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();

            if current_search != new_url {
                if let Some(w) = window() {
                    if let Ok(history) = w.history() {
                        let _ = history.replace_state_with_url(
                            &wasm_bindgen::JsValue::NULL,
                            "",
                            Some(&new_url),
                        );
                    }
                }
            }
        });
    }

    pub fn open(&self, page: PageKey) {
        log::debug!("open page '{}'", page.key());
        self.active.set(page);
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_key_parse() {
        assert_eq!(PageKey::parse("my_access"), PageKey::MyAccess);
        assert_eq!(PageKey::parse("invoices"), PageKey::Area(Resource::Invoices));
        assert_eq!(PageKey::parse("workspace"), PageKey::Workspace);
        assert_eq!(PageKey::parse("a004_nomenclature"), PageKey::Workspace);
        assert_eq!(PageKey::parse(""), PageKey::Workspace);
    }

    #[test]
    fn test_page_key_round_trip() {
        let mut pages = vec![PageKey::Workspace, PageKey::MyAccess];
        pages.extend(Resource::all().into_iter().map(PageKey::Area));
        for page in pages {
            assert_eq!(PageKey::parse(page.key()), page);
        }
    }
}
