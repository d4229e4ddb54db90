//! Light/dark appearance.
//!
//! The chosen `Theme` lives in the preference store; this module turns it into
//! the `dark` class on the document root, following the OS while the choice is
//! `System`.

mod theme_switch;

pub use theme_switch::ThemeSwitch;

use leptos::prelude::*;
use serde::{Deserialize, Serialize};

use crate::shared::hooks::MediaQueryWatch;
use crate::shared::preferences::use_preferences;

pub const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Theme::Light => "Clair",
            Theme::Dark => "Sombre",
            Theme::System => "Système",
        }
    }

    pub fn from_code(s: &str) -> Option<Self> {
        Self::all().into_iter().find(|t| t.as_str() == s)
    }

    pub fn all() -> [Theme; 3] {
        [Theme::Light, Theme::Dark, Theme::System]
    }

    /// Whether the dark palette applies; `System` defers to the OS
    pub fn is_dark(&self, prefers_dark: impl FnOnce() -> bool) -> bool {
        match self {
            Theme::Light => false,
            Theme::Dark => true,
            Theme::System => prefers_dark(),
        }
    }
}

/// Where the color scheme is read and applied
pub trait ColorSchemeHost: Send + Sync {
    fn prefers_dark(&self) -> bool;
    fn set_dark(&self, dark: bool);
}

/// `matchMedia` plus the `dark` class on `<html>`
pub struct BrowserColorScheme;

impl ColorSchemeHost for BrowserColorScheme {
    fn prefers_dark(&self) -> bool {
        web_sys::window()
            .and_then(|w| w.match_media(DARK_SCHEME_QUERY).ok().flatten())
            .map(|list| list.matches())
            .unwrap_or(false)
    }

    fn set_dark(&self, dark: bool) {
        let Some(root) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        else {
            return;
        };
        let classes = root.class_list();
        let result = if dark {
            classes.add_1("dark")
        } else {
            classes.remove_1("dark")
        };
        if let Err(e) = result {
            log::warn!("could not toggle dark class: {e:?}");
        }
    }
}

/// Follows OS scheme changes until dropped
pub struct SchemeWatch(MediaQueryWatch);

impl SchemeWatch {
    pub fn new(on_change: impl FnMut(bool) + 'static) -> Option<Self> {
        MediaQueryWatch::new(DARK_SCHEME_QUERY, on_change).map(SchemeWatch)
    }
}

/// Applies the stored theme at startup and on every change.
///
/// While the theme is `System` a `SchemeWatch` keeps the dark class in step
/// with the OS setting.
#[component]
pub fn ThemeSync() -> impl IntoView {
    let prefs = use_preferences();
    let watch = StoredValue::new_local(None::<SchemeWatch>);
    let theme = prefs.theme();

    Effect::new(move |_| {
        let theme = theme.get();
        prefs.apply_theme(theme);

        let next = match theme {
            Theme::System => {
                let host = prefs.host();
                SchemeWatch::new(move |dark| host.set_dark(dark))
            }
            _ => None,
        };
        watch.set_value(next);
    });

    on_cleanup(move || {
        watch.try_update_value(|w| w.take());
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_codes() {
        for theme in Theme::all() {
            assert_eq!(Theme::from_code(theme.as_str()), Some(theme));
        }
        assert_eq!(Theme::from_code("forest"), None);
        assert_eq!(serde_json::to_string(&Theme::System).unwrap(), "\"system\"");
    }

    #[test]
    fn test_is_dark() {
        assert!(Theme::Dark.is_dark(|| false));
        assert!(!Theme::Light.is_dark(|| true));
        assert!(Theme::System.is_dark(|| true));
        assert!(!Theme::System.is_dark(|| false));
    }
}
