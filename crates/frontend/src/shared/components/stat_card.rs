use super::Tone;
use crate::shared::icons::icon;
use leptos::prelude::*;

/// Summary tile: icon, label and a preformatted value
#[component]
pub fn StatCard(
    #[prop(into)] label: String,
    /// Name understood by `icon()`
    #[prop(into)]
    icon_name: String,
    #[prop(into)] value: Signal<String>,
    #[prop(into, optional)] tone: Signal<Tone>,
    #[prop(into, optional)] subtitle: Signal<Option<String>>,
) -> impl IntoView {
    let class = move || format!("stat-card stat-card--{}", tone.get().css_modifier());

    view! {
        <div class=class>
            <div class="stat-card__icon">{icon(&icon_name)}</div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">{move || value.get()}</div>
                {move || subtitle.get().map(|s| view! { <div class="stat-card__subtitle">{s}</div> })}
            </div>
        </div>
    }
}
