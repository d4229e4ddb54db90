use leptos::prelude::*;

/// Nested start/stop counter; loading while at least one start is open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadingCounter {
    active: u32,
}

impl LoadingCounter {
    pub fn start(&mut self) {
        self.active += 1;
    }

    /// Extra stops are ignored
    pub fn stop(&mut self) {
        self.active = self.active.saturating_sub(1);
    }

    pub fn is_loading(&self) -> bool {
        self.active > 0
    }
}

#[derive(Clone, Copy)]
pub struct LoadingHandle {
    counter: RwSignal<LoadingCounter>,
}

impl LoadingHandle {
    pub fn start(&self) {
        self.counter.update(LoadingCounter::start);
    }

    pub fn stop(&self) {
        self.counter.update(LoadingCounter::stop);
    }

    pub fn is_loading(&self) -> Signal<bool> {
        let counter = self.counter;
        Signal::derive(move || counter.with(LoadingCounter::is_loading))
    }
}

pub fn use_loading() -> LoadingHandle {
    LoadingHandle {
        counter: RwSignal::new(LoadingCounter::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_starts_need_matching_stops() {
        let mut counter = LoadingCounter::default();
        counter.start();
        counter.start();
        counter.stop();
        assert!(counter.is_loading());
        counter.stop();
        assert!(!counter.is_loading());
    }

    #[test]
    fn test_extra_stop_does_not_underflow() {
        let mut counter = LoadingCounter::default();
        counter.stop();
        counter.start();
        assert!(counter.is_loading());
    }

    #[test]
    fn test_handle_tracks_counter() {
        let owner = Owner::new();
        owner.with(|| {
            let loading = use_loading();
            let is_loading = loading.is_loading();
            loading.start();
            assert!(is_loading.get_untracked());
            loading.stop();
            assert!(!is_loading.get_untracked());
        });
    }
}
