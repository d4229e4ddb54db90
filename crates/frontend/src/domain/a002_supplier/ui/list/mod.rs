use contracts::domain::a002_supplier::{RatingStars, Supplier, SupplierFilter, SupplierSummary};
use contracts::enums::SupplierStatus;
use leptos::prelude::*;
use thaw::*;

use crate::domain::a002_supplier::api;
use crate::shared::backend::{tables, use_backend};
use crate::shared::components::{PageHeader, StatCard, Tone, ToneBadge};
use crate::shared::config::use_app_config;
use crate::shared::format::{format_currency, format_currency_in, format_fixed};
use crate::shared::hooks::use_query;
use crate::shared::icons::icon;
use crate::shared::list_utils::{distinct, highlight_matches, sort_by, SearchInput, SortDirection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum SupplierSort {
    #[default]
    Name,
    Rating,
    LeadTime,
    Value,
}

/// Same column flips the direction, a new column starts ascending
fn next_sort(current: (SupplierSort, SortDirection), column: SupplierSort) -> (SupplierSort, SortDirection) {
    if current.0 == column {
        (column, current.1.toggled())
    } else {
        (column, SortDirection::Asc)
    }
}

fn sort_suppliers(rows: &[Supplier], column: SupplierSort, direction: SortDirection) -> Vec<Supplier> {
    match column {
        SupplierSort::Name => sort_by(rows, |s| s.name.to_lowercase(), direction),
        SupplierSort::Rating => sort_by(rows, |s| s.rating, direction),
        SupplierSort::LeadTime => sort_by(rows, |s| s.lead_time_days, direction),
        SupplierSort::Value => sort_by(rows, |s| s.total_value, direction),
    }
}

/// Categories in first-seen order
fn category_options(suppliers: &[Supplier]) -> Vec<String> {
    let all: Vec<String> = suppliers
        .iter()
        .flat_map(|s| s.categories.iter().cloned())
        .collect();
    distinct(&all)
}

#[component]
fn SortHeader(
    label: &'static str,
    column: SupplierSort,
    sort: RwSignal<(SupplierSort, SortDirection)>,
) -> impl IntoView {
    view! {
        <TableHeaderCell>
            <button class="sort-header" on:click=move |_| sort.update(|s| *s = next_sort(*s, column))>
                {label}
                {move || {
                    let (current, direction) = sort.get();
                    (current == column).then(|| direction.indicator())
                }}
            </button>
        </TableHeaderCell>
    }
}

#[component]
fn Stars(stars: RatingStars) -> impl IntoView {
    let full = (0..stars.full).map(|_| view! { <span class="stars__full">{icon("star")}</span> });
    let empty = (0..stars.empty).map(|_| view! { <span class="stars__empty">{icon("star")}</span> });
    view! {
        <span class="stars">
            {full.collect_view()}
            {stars.half.then(|| view! { <span class="stars__half">{icon("star")}</span> })}
            {empty.collect_view()}
        </span>
    }
}

#[component]
pub fn SupplierList() -> impl IntoView {
    let backend = use_backend();
    let search = RwSignal::new(String::new());
    let status = RwSignal::new(String::new());
    let preferred_only = RwSignal::new(false);
    let category = RwSignal::new(String::new());
    let sort = RwSignal::new((SupplierSort::default(), SortDirection::default()));

    let suppliers = use_query(
        Signal::stored(tables::SUPPLIERS.to_string()),
        move |_| {
            let backend = backend.clone();
            async move { api::fetch_suppliers(backend.as_ref()).await }
        },
        use_app_config().query_options(),
    );

    let all = Signal::derive(move || suppliers.data.get().unwrap_or_default());
    let summary = Signal::derive(move || all.with(|s| SupplierSummary::compute(s)));
    let visible = Signal::derive(move || {
        let filter = SupplierFilter {
            search: search.get(),
            status: SupplierStatus::from_code(&status.get()),
            preferred_only: preferred_only.get(),
        };
        let category = category.get();
        let matching = all.with(|s| {
            filter
                .apply(s)
                .into_iter()
                .filter(|s| category.is_empty() || s.categories.contains(&category))
                .cloned()
                .collect::<Vec<Supplier>>()
        });
        let (column, direction) = sort.get();
        sort_suppliers(&matching, column, direction)
    });

    view! {
        <div class="page">
            <PageHeader title="Fournisseurs" subtitle="Partenaires et conditions d'achat">
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| suppliers.refetch()
                    disabled=suppliers.is_loading
                >
                    "Actualiser"
                </Button>
            </PageHeader>

            <div class="stat-grid">
                <StatCard
                    label="Actifs"
                    icon_name="building"
                    value=Signal::derive(move || summary.get().active.to_string())
                    tone=Tone::Success
                />
                <StatCard
                    label="Préférés"
                    icon_name="star"
                    value=Signal::derive(move || summary.get().preferred.to_string())
                    tone=Tone::Info
                />
                <StatCard
                    label="Volume d'achats"
                    icon_name="euro"
                    value=Signal::derive(move || format_currency(summary.get().total_value))
                />
                <StatCard
                    label="Note moyenne"
                    icon_name="star"
                    value=Signal::derive(move || format!("{} / 5", format_fixed(summary.get().average_rating, 1)))
                />
            </div>

            <div class="filter-bar">
                <SearchInput value=search placeholder="Nom ou e-mail du fournisseur..." />
                <Select value=status>
                    <option value="">"Tous les statuts"</option>
                    {SupplierStatus::all()
                        .into_iter()
                        .map(|s| view! { <option value=s.code()>{s.display_name()}</option> })
                        .collect_view()}
                </Select>
                <Select value=category>
                    <option value="">"Toutes les catégories"</option>
                    {move || all.with(|s| category_options(s))
                        .into_iter()
                        .map(|c| view! { <option value=c.clone()>{c.clone()}</option> })
                        .collect_view()}
                </Select>
                <Checkbox checked=preferred_only label="Préférés uniquement" />
            </div>

            {move || suppliers.error.get().map(|e| view! {
                <div class="alert alert--error">{e.user_message()}</div>
            })}

            <div class="table-wrapper">
                <Table>
                    <TableHeader>
                        <TableRow>
                            <SortHeader label="Fournisseur" column=SupplierSort::Name sort=sort />
                            <TableHeaderCell>"Contact"</TableHeaderCell>
                            <TableHeaderCell>"Ville"</TableHeaderCell>
                            <SortHeader label="Note" column=SupplierSort::Rating sort=sort />
                            <SortHeader label="Délai" column=SupplierSort::LeadTime sort=sort />
                            <TableHeaderCell>"Commandes"</TableHeaderCell>
                            <SortHeader label="Volume" column=SupplierSort::Value sort=sort />
                            <TableHeaderCell>"Statut"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || {
                            if suppliers.is_loading.get() && suppliers.data.with(Option::is_none) {
                                return view! {
                                    <TableRow>
                                        <TableCell attr:colspan="8"><Spinner /></TableCell>
                                    </TableRow>
                                }
                                .into_any();
                            }
                            let rows = visible.get();
                            if rows.is_empty() {
                                return view! {
                                    <TableRow>
                                        <TableCell attr:colspan="8">
                                            <TableCellLayout>"Aucun fournisseur trouvé."</TableCellLayout>
                                        </TableCell>
                                    </TableRow>
                                }
                                .into_any();
                            }
                            let term = search.get_untracked();
                            rows.into_iter()
                                .map(|supplier| {
                                    let stars = supplier.stars();
                                    let name_hl = highlight_matches(&supplier.name, &term);
                                    let email_hl = highlight_matches(&supplier.contact_email, &term);
                                    let is_preferred = supplier.is_preferred;
                                    let phone = supplier.contact_phone.clone();
                                    let address = supplier.address.short();
                                    let lead_time = format!("{} j", supplier.lead_time_days);
                                    let total_orders = supplier.total_orders;
                                    let total_value = format_currency_in(supplier.total_value, &supplier.currency);
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {name_hl}
                                                    {is_preferred.then(|| view! {
                                                        <span class="preferred-tag" title="Fournisseur préféré">{icon("star")}</span>
                                                    })}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {email_hl}
                                                    <div class="muted">{phone}</div>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{address}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <Stars stars=stars />
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{lead_time}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{total_orders}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {total_value}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <ToneBadge tone=supplier.status label=supplier.status.display_name() />
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
        </div>
    }
}
