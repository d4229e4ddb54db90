//! UI preferences (theme, sidebar) persisted under `app-storage`.

use contracts::dashboards::d001_overview::DashboardStats;
use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::shared::storage::{load_state, save_state, KeyValueStorage, APP_STORAGE_KEY};
use crate::shared::theme::{ColorSchemeHost, Theme};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreferencesState {
    pub theme: Theme,
    pub sidebar_collapsed: bool,
    /// Last figures computed by the dashboard, never persisted
    pub dashboard_stats: Option<DashboardStats>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedPreferences {
    #[serde(default)]
    theme: Theme,
    #[serde(default)]
    sidebar_collapsed: bool,
}

impl PreferencesState {
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_collapsed = !self.sidebar_collapsed;
    }

    pub fn set_sidebar_collapsed(&mut self, collapsed: bool) {
        self.sidebar_collapsed = collapsed;
    }

    pub fn set_dashboard_stats(&mut self, stats: DashboardStats) {
        self.dashboard_stats = Some(stats);
    }

    fn snapshot(&self) -> PersistedPreferences {
        PersistedPreferences {
            theme: self.theme,
            sidebar_collapsed: self.sidebar_collapsed,
        }
    }

    fn restore(saved: PersistedPreferences) -> Self {
        Self {
            theme: saved.theme,
            sidebar_collapsed: saved.sidebar_collapsed,
            dashboard_stats: None,
        }
    }
}

#[derive(Clone)]
pub struct PreferenceStore {
    state: RwSignal<PreferencesState>,
    storage: Arc<dyn KeyValueStorage>,
    host: Arc<dyn ColorSchemeHost>,
}

impl PreferenceStore {
    /// Restores the saved preferences; missing or corrupt entries give defaults
    pub fn new(storage: Arc<dyn KeyValueStorage>, host: Arc<dyn ColorSchemeHost>) -> Self {
        let initial = load_state::<PersistedPreferences>(storage.as_ref(), APP_STORAGE_KEY)
            .map(PreferencesState::restore)
            .unwrap_or_default();
        Self {
            state: RwSignal::new(initial),
            storage,
            host,
        }
    }

    pub fn theme(&self) -> Signal<Theme> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.theme))
    }

    pub fn sidebar_collapsed(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.sidebar_collapsed))
    }

    pub fn dashboard_stats(&self) -> Signal<Option<DashboardStats>> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.dashboard_stats))
    }

    pub fn host(&self) -> Arc<dyn ColorSchemeHost> {
        self.host.clone()
    }

    fn persist(&self) {
        if let Some(snapshot) = self.state.try_with_untracked(PreferencesState::snapshot) {
            save_state(self.storage.as_ref(), APP_STORAGE_KEY, snapshot);
        }
    }

    pub fn set_theme(&self, theme: Theme) {
        self.state.update(|s| s.set_theme(theme));
        self.persist();
        self.apply_theme(theme);
    }

    /// Sets the dark flag; `System` reads the OS preference now
    pub fn apply_theme(&self, theme: Theme) {
        let dark = theme.is_dark(|| self.host.prefers_dark());
        self.host.set_dark(dark);
    }

    pub fn toggle_sidebar(&self) {
        self.state.update(PreferencesState::toggle_sidebar);
        self.persist();
    }

    pub fn set_sidebar_collapsed(&self, collapsed: bool) {
        self.state.update(|s| s.set_sidebar_collapsed(collapsed));
        self.persist();
    }

    pub fn set_dashboard_stats(&self, stats: DashboardStats) {
        self.state.update(|s| s.set_dashboard_stats(stats));
    }
}

pub fn use_preferences() -> PreferenceStore {
    use_context::<PreferenceStore>()
        .expect("PreferenceStore not provided in context (provide it in App)")
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::sync::Mutex;

    /// Records every `set_dark` call
    pub struct RecordingHost {
        pub prefers_dark: bool,
        pub calls: Mutex<Vec<bool>>,
    }

    impl RecordingHost {
        pub fn new(prefers_dark: bool) -> Arc<Self> {
            Arc::new(Self {
                prefers_dark,
                calls: Mutex::new(Vec::new()),
            })
        }

        pub fn last(&self) -> Option<bool> {
            self.calls.lock().ok().and_then(|c| c.last().copied())
        }
    }

    impl ColorSchemeHost for RecordingHost {
        fn prefers_dark(&self) -> bool {
            self.prefers_dark
        }

        fn set_dark(&self, dark: bool) {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push(dark);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::RecordingHost;
    use super::*;
    use crate::shared::storage::MemoryStorage;

    #[test]
    fn test_dark_theme_ignores_os_preference() {
        let owner = Owner::new();
        owner.with(|| {
            let host = RecordingHost::new(false);
            let store = PreferenceStore::new(Arc::new(MemoryStorage::new()), host.clone());
            store.set_theme(Theme::Dark);
            assert_eq!(store.theme().get_untracked(), Theme::Dark);
            assert_eq!(host.last(), Some(true));

            store.set_theme(Theme::System);
            assert_eq!(host.last(), Some(false));
        });
    }

    #[test]
    fn test_preferences_round_trip_through_storage() {
        let owner = Owner::new();
        owner.with(|| {
            let storage = Arc::new(MemoryStorage::new());
            let host = RecordingHost::new(true);
            let store = PreferenceStore::new(storage.clone(), host.clone());
            store.set_theme(Theme::Light);
            store.toggle_sidebar();
            store.set_dashboard_stats(DashboardStats::default());

            let raw = storage.get(APP_STORAGE_KEY).unwrap();
            let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
            assert_eq!(
                json,
                serde_json::json!({
                    "state": { "theme": "light", "sidebarCollapsed": true },
                    "version": 0
                })
            );

            let restored = PreferenceStore::new(storage, host);
            assert_eq!(restored.theme().get_untracked(), Theme::Light);
            assert!(restored.sidebar_collapsed().get_untracked());
            assert_eq!(restored.dashboard_stats().get_untracked(), None);
        });
    }

    #[test]
    fn test_corrupt_entry_falls_back_to_defaults() {
        let owner = Owner::new();
        owner.with(|| {
            let storage = Arc::new(MemoryStorage::with_entry(APP_STORAGE_KEY, "{not json"));
            let store = PreferenceStore::new(storage, RecordingHost::new(false));
            assert_eq!(store.theme().get_untracked(), Theme::System);
            assert!(!store.sidebar_collapsed().get_untracked());
        });
    }

    #[test]
    fn test_set_sidebar_collapsed_is_idempotent() {
        let mut state = PreferencesState::default();
        state.set_sidebar_collapsed(true);
        state.set_sidebar_collapsed(true);
        assert!(state.sidebar_collapsed);
        state.toggle_sidebar();
        assert!(!state.sidebar_collapsed);
    }
}
