use leptos::prelude::*;
use thaw::*;

use super::Theme;
use crate::shared::icons::icon;
use crate::shared::preferences::use_preferences;

fn theme_icon(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "sun",
        Theme::Dark => "moon",
        Theme::System => "monitor",
    }
}

/// Light / dark / system toggle
#[component]
pub fn ThemeSwitch(#[prop(optional)] with_labels: bool) -> impl IntoView {
    let prefs = use_preferences();
    let current = prefs.theme();

    view! {
        <ButtonGroup>
            {Theme::all()
                .into_iter()
                .map(|theme| {
                    let prefs = prefs.clone();
                    view! {
                        <Button
                            size=ButtonSize::Small
                            appearance=move || {
                                if current.get() == theme {
                                    ButtonAppearance::Primary
                                } else {
                                    ButtonAppearance::Subtle
                                }
                            }
                            on_click=move |_| prefs.set_theme(theme)
                            attr:title=theme.display_name()
                        >
                            {icon(theme_icon(theme))}
                            {with_labels.then(|| view! { <span class="theme-switch__label">{theme.display_name()}</span> })}
                        </Button>
                    }
                })
                .collect_view()}
        </ButtonGroup>
    }
}
