use contracts::domain::a001_spare_part::{categories, filter_parts, InventorySummary, SparePart};
use leptos::prelude::*;
use thaw::*;

use super::create::CreateSparePartDialog;
use crate::domain::a001_spare_part::api;
use crate::layout::global_context::use_global_context;
use crate::shared::backend::{tables, use_backend};
use crate::shared::components::{PageHeader, StatCard, Tone, ToneBadge};
use crate::shared::config::use_app_config;
use crate::shared::format::{format_currency, format_currency_in};
use crate::shared::hooks::use_query;
use crate::shared::icons::icon;
use crate::shared::list_utils::{highlight_matches, SearchInput};

#[component]
pub fn SparePartList() -> impl IntoView {
    let backend = use_backend();
    let search = use_global_context().search;
    let category = RwSignal::new(String::new());
    let show_create = RwSignal::new(false);

    let parts = use_query(
        Signal::stored(tables::SPARE_PARTS.to_string()),
        move |_| {
            let backend = backend.clone();
            async move { api::fetch_spare_parts(backend.as_ref()).await }
        },
        use_app_config().query_options(),
    );

    let all_parts = Signal::derive(move || parts.data.get().unwrap_or_default());
    let summary = Signal::derive(move || all_parts.with(|p| InventorySummary::compute(p)));
    let category_options = Signal::derive(move || all_parts.with(|p| categories(p)));
    let visible = Signal::derive(move || {
        let term = search.get();
        let selected = category.get();
        let selected = (!selected.is_empty()).then_some(selected.as_str());
        all_parts.with(|p| {
            filter_parts(p, &term, selected)
                .into_iter()
                .cloned()
                .collect::<Vec<SparePart>>()
        })
    });

    view! {
        <div class="page">
            <PageHeader title="Pièces détachées" subtitle="Inventaire et niveaux de stock">
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| parts.refetch()
                    disabled=parts.is_loading
                >
                    "Actualiser"
                </Button>
                <Button appearance=ButtonAppearance::Primary on_click=move |_| show_create.set(true)>
                    {icon("plus")}
                    "Nouvelle pièce"
                </Button>
            </PageHeader>

            <div class="stat-grid">
                <StatCard
                    label="Références"
                    icon_name="package"
                    value=Signal::derive(move || summary.get().total.to_string())
                />
                <StatCard
                    label="Stock faible"
                    icon_name="alert-triangle"
                    value=Signal::derive(move || summary.get().low_stock.to_string())
                    tone=Signal::derive(move || {
                        if summary.get().low_stock > 0 { Tone::Warning } else { Tone::Success }
                    })
                />
                <StatCard
                    label="En stock"
                    icon_name="check"
                    value=Signal::derive(move || summary.get().in_stock.to_string())
                    tone=Tone::Success
                />
                <StatCard
                    label="Valeur du stock"
                    icon_name="euro"
                    value=Signal::derive(move || format_currency(summary.get().stock_value))
                    tone=Tone::Info
                />
            </div>

            <div class="filter-bar">
                <SearchInput value=search placeholder="Rechercher par nom ou référence..." />
                <Select value=category>
                    <option value="">"Toutes les catégories"</option>
                    {move || {
                        category_options
                            .get()
                            .into_iter()
                            .map(|c| view! { <option value=c.clone()>{c.clone()}</option> })
                            .collect_view()
                    }}
                </Select>
            </div>

            {move || parts.error.get().map(|e| view! {
                <div class="alert alert--error">{e.user_message()}</div>
            })}

            <div class="table-wrapper">
                <Table>
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"Référence"</TableHeaderCell>
                            <TableHeaderCell>"Désignation"</TableHeaderCell>
                            <TableHeaderCell>"Catégorie"</TableHeaderCell>
                            <TableHeaderCell>"Stock"</TableHeaderCell>
                            <TableHeaderCell>"Statut"</TableHeaderCell>
                            <TableHeaderCell>"Criticité"</TableHeaderCell>
                            <TableHeaderCell>"Prix unitaire"</TableHeaderCell>
                            <TableHeaderCell>"Emplacement"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || {
                            if parts.is_loading.get() && parts.data.with(Option::is_none) {
                                return view! {
                                    <TableRow>
                                        <TableCell attr:colspan="8">
                                            <Spinner />
                                        </TableCell>
                                    </TableRow>
                                }
                                .into_any();
                            }
                            let rows = visible.get();
                            if rows.is_empty() {
                                return view! {
                                    <TableRow>
                                        <TableCell attr:colspan="8">
                                            <TableCellLayout>"Aucune pièce ne correspond aux filtres."</TableCellLayout>
                                        </TableCell>
                                    </TableRow>
                                }
                                .into_any();
                            }
                            let term = search.get_untracked();
                            rows.into_iter()
                                .map(|part| {
                                    let status = part.stock_status();
                                    let part_number_hl = highlight_matches(&part.part_number, &term);
                                    let name_hl = highlight_matches(&part.name, &term);
                                    let category = part.category.clone();
                                    let stock = format!("{} / min {}", part.current_stock, part.minimum_stock);
                                    let price = format_currency_in(part.unit_price, &part.currency);
                                    let location = part.location.clone();
                                    let criticality = part.criticality;
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <span class="mono">{part_number_hl}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {name_hl}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{category}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {stock}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <ToneBadge tone=status label=status.label() />
                                            </TableCell>
                                            <TableCell>
                                                <ToneBadge tone=criticality label=criticality.display_name() />
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {price}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{location}</TableCellLayout>
                                            </TableCell>
                                        </TableRow>
                                    }
                                })
                                .collect_view()
                                .into_any()
                        }}
                    </TableBody>
                </Table>
            </div>

            <CreateSparePartDialog
                open=show_create
                on_created=Callback::new(move |_| parts.refetch())
            />
        </div>
    }
}
