use gloo_timers::callback::Timeout;
use leptos::prelude::*;

/// Follows `value` once it has stopped changing for `delay_ms`.
///
/// Every change re-arms the timer; the previous `Timeout` is dropped, which
/// cancels it. The pending timer is dropped with the owning scope.
pub fn use_debounced<T>(value: Signal<T>, delay_ms: u32) -> Signal<T>
where
    T: Clone + Send + Sync + 'static,
{
    let debounced = RwSignal::new(value.get_untracked());
    let pending = StoredValue::new_local(None::<Timeout>);

    Effect::new(move |previous: Option<()>| {
        let next = value.get();
        if previous.is_none() {
            return;
        }
        let timeout = Timeout::new(delay_ms, move || {
            debounced.try_set(next);
        });
        pending.set_value(Some(timeout));
    });

    on_cleanup(move || {
        pending.try_update_value(|timeout| timeout.take());
    });

    Signal::derive(move || debounced.get())
}
