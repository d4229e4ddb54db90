use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{MediaQueryList, MediaQueryListEvent};

/// `change` listener on a `MediaQueryList`, removed on drop
pub struct MediaQueryWatch {
    list: MediaQueryList,
    listener: Closure<dyn FnMut(MediaQueryListEvent)>,
}

impl MediaQueryWatch {
    /// `None` outside a browser or for a query the browser rejects
    pub fn new(query: &str, mut on_change: impl FnMut(bool) + 'static) -> Option<Self> {
        let list = web_sys::window()?.match_media(query).ok()??;
        let listener = Closure::wrap(Box::new(move |event: MediaQueryListEvent| {
            on_change(event.matches());
        }) as Box<dyn FnMut(MediaQueryListEvent)>);

        if let Err(e) =
            list.add_event_listener_with_callback("change", listener.as_ref().unchecked_ref())
        {
            log::warn!("media query listener for {query} not registered: {e:?}");
            return None;
        }
        Some(Self { list, listener })
    }

    pub fn matches(&self) -> bool {
        self.list.matches()
    }
}

impl Drop for MediaQueryWatch {
    fn drop(&mut self) {
        let _ = self
            .list
            .remove_event_listener_with_callback("change", self.listener.as_ref().unchecked_ref());
    }
}

/// Current match state of a CSS media query, e.g. `"(max-width: 768px)"`
pub fn use_media_query(query: &str) -> Signal<bool> {
    let matches = RwSignal::new(false);
    let watch = MediaQueryWatch::new(query, move |now| {
        matches.try_set(now);
    });
    if let Some(watch) = &watch {
        matches.set(watch.matches());
    }

    let watch = StoredValue::new_local(watch);
    on_cleanup(move || {
        watch.try_update_value(|watch| watch.take());
    });

    matches.into()
}
