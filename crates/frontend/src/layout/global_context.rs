use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use web_sys::window;

/// Top-level screens reachable from the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    #[default]
    Dashboard,
    SpareParts,
    Orders,
    Maintenance,
    Suppliers,
    Settings,
}

impl Page {
    pub fn all() -> [Page; 6] {
        [
            Page::Dashboard,
            Page::SpareParts,
            Page::Orders,
            Page::Maintenance,
            Page::Suppliers,
            Page::Settings,
        ]
    }

    pub fn key(&self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::SpareParts => "spare-parts",
            Page::Orders => "orders",
            Page::Maintenance => "maintenance",
            Page::Suppliers => "suppliers",
            Page::Settings => "settings",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Dashboard => "Tableau de bord",
            Page::SpareParts => "Pièces détachées",
            Page::Orders => "Commandes",
            Page::Maintenance => "Maintenance",
            Page::Suppliers => "Fournisseurs",
            Page::Settings => "Paramètres",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::SpareParts => "package",
            Page::Orders => "shopping-cart",
            Page::Maintenance => "wrench",
            Page::Suppliers => "truck",
            Page::Settings => "settings",
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PageQuery {
    #[serde(default)]
    page: Option<Page>,
}

/// Reads `?page=`; unknown or missing values give `None`
pub fn page_from_query(search: &str) -> Option<Page> {
    serde_qs::from_str::<PageQuery>(search.trim_start_matches('?'))
        .ok()
        .and_then(|q| q.page)
}

pub fn page_query(page: Page) -> String {
    let query = serde_qs::to_string(&PageQuery { page: Some(page) })
        .unwrap_or_else(|_| format!("page={}", page.key()));
    format!("?{query}")
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub page: RwSignal<Page>,
    /// Text typed in the top bar, shared with the parts list
    pub search: RwSignal<String>,
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            page: RwSignal::new(Page::default()),
            search: RwSignal::new(String::new()),
        }
    }

    pub fn navigate(&self, page: Page) {
        if self.page.get_untracked() != page {
            log::debug!("navigate to {}", page.key());
            self.page.set(page);
        }
    }

    /// Picks the page from the URL, then keeps `?page=` in sync
    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        if let Some(page) = page_from_query(&search) {
            self.page.set(page);
        }

        let page = self.page;
        Effect::new(move |_| {
            let new_url = page_query(page.get());
            let current = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();
            if current == new_url {
                return;
            }
            if let Some(history) = window().and_then(|w| w.history().ok()) {
                let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&new_url));
            }
        });
    }
}

pub fn use_global_context() -> AppGlobalContext {
    use_context::<AppGlobalContext>().expect("AppGlobalContext not provided in context (provide it in App)")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_round_trip() {
        for page in Page::all() {
            assert_eq!(page_from_query(&page_query(page)), Some(page));
        }
        assert_eq!(page_query(Page::SpareParts), "?page=spare-parts");
    }

    #[test]
    fn test_unknown_page_is_ignored() {
        assert_eq!(page_from_query(""), None);
        assert_eq!(page_from_query("?page=nowhere"), None);
        assert_eq!(page_from_query("?other=1&page=orders"), Some(Page::Orders));
    }
}
