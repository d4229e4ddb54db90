use crate::shared::hooks::Pagination;
use crate::shared::icons::icon;
use leptos::prelude::*;

/// Previous / next buttons and the "x–y sur n" range for a `Pagination`
#[component]
pub fn PaginationControls(pagination: RwSignal<Pagination>) -> impl IntoView {
    let range = move || {
        pagination.with(|p| {
            if p.total_items == 0 {
                "Aucun résultat".to_string()
            } else {
                format!(
                    "{}–{} sur {}",
                    p.start_index() + 1,
                    p.end_index(),
                    p.total_items
                )
            }
        })
    };
    let pages = move || {
        pagination.with(|p| format!("Page {} / {}", p.current_page, p.total_pages().max(1)))
    };

    view! {
        <div class="pagination-controls">
            <span class="pagination-info">{range}</span>
            <button
                class="pagination-btn"
                title="Page précédente"
                disabled=move || !pagination.with(Pagination::has_prev)
                on:click=move |_| pagination.update(Pagination::prev)
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">{pages}</span>
            <button
                class="pagination-btn"
                title="Page suivante"
                disabled=move || !pagination.with(Pagination::has_next)
                on:click=move |_| pagination.update(Pagination::next)
            >
                {icon("chevron-right")}
            </button>
        </div>
    }
}
