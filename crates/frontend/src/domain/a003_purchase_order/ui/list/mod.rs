use contracts::domain::a003_purchase_order::{statuses, OrderFilter, OrderSummary, PurchaseOrder};
use contracts::enums::OrderStatus;
use leptos::prelude::*;
use thaw::*;

use crate::domain::a003_purchase_order::api;
use crate::shared::backend::{tables, use_backend};
use crate::shared::components::{PageHeader, PaginationControls, StatCard, Tone, ToneBadge};
use crate::shared::config::use_app_config;
use crate::shared::date_utils::format_date;
use crate::shared::format::{format_currency, format_currency_in};
use crate::shared::hooks::{use_pagination, use_query};
use crate::shared::list_utils::SearchInput;

const PAGE_SIZE: usize = 10;

#[component]
pub fn PurchaseOrderList() -> impl IntoView {
    let backend = use_backend();
    let search = RwSignal::new(String::new());
    let status = RwSignal::new(String::new());

    let orders = use_query(
        Signal::stored(tables::PURCHASE_ORDERS.to_string()),
        move |_| {
            let backend = backend.clone();
            async move { api::fetch_purchase_orders(backend.as_ref()).await }
        },
        use_app_config().query_options(),
    );

    let all_orders = Signal::derive(move || orders.data.get().unwrap_or_default());
    let summary = Signal::derive(move || all_orders.with(|o| OrderSummary::compute(o)));
    let status_options = Signal::derive(move || all_orders.with(|o| statuses(o)));
    let filtered = Signal::derive(move || {
        let filter = OrderFilter {
            search: search.get(),
            status: OrderStatus::from_code(&status.get()),
        };
        all_orders.with(|o| filter.apply(o).into_iter().cloned().collect::<Vec<PurchaseOrder>>())
    });

    let pagination = use_pagination(Signal::derive(move || filtered.with(Vec::len)), PAGE_SIZE);
    Effect::new(move |_| {
        search.track();
        status.track();
        pagination.update(|p| p.reset());
    });
    let page_rows = Signal::derive(move || {
        let p = pagination.get();
        filtered.with(|rows| p.slice(rows).to_vec())
    });

    view! {
        <div class="page">
            <PageHeader title="Commandes" subtitle="Suivi des commandes fournisseurs">
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| orders.refetch()
                    disabled=orders.is_loading
                >
                    "Actualiser"
                </Button>
            </PageHeader>

            <div class="stat-grid">
                <StatCard
                    label="Commandes"
                    icon_name="shopping-cart"
                    value=Signal::derive(move || summary.get().total.to_string())
                />
                <StatCard
                    label="En cours"
                    icon_name="clock"
                    value=Signal::derive(move || summary.get().in_progress.to_string())
                    tone=Tone::Info
                />
                <StatCard
                    label="Terminées"
                    icon_name="check"
                    value=Signal::derive(move || summary.get().completed.to_string())
                    tone=Tone::Success
                />
                <StatCard
                    label="Montant total"
                    icon_name="euro"
                    value=Signal::derive(move || format_currency(summary.get().total_value))
                />
            </div>

            <div class="filter-bar">
                <SearchInput value=search placeholder="Numéro de commande ou fournisseur..." />
                <Select value=status>
                    <option value="">"Tous les statuts"</option>
                    {move || {
                        status_options
                            .get()
                            .into_iter()
                            .map(|s| view! { <option value=s.code()>{s.display_name()}</option> })
                            .collect_view()
                    }}
                </Select>
            </div>

            {move || orders.error.get().map(|e| view! {
                <div class="alert alert--error">{e.user_message()}</div>
            })}

            <div class="table-wrapper">
                <Table>
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"N° commande"</TableHeaderCell>
                            <TableHeaderCell>"Fournisseur"</TableHeaderCell>
                            <TableHeaderCell>"Statut"</TableHeaderCell>
                            <TableHeaderCell>"Articles"</TableHeaderCell>
                            <TableHeaderCell>"Montant"</TableHeaderCell>
                            <TableHeaderCell>"Commandée le"</TableHeaderCell>
                            <TableHeaderCell>"Livraison prévue"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || {
                            if orders.is_loading.get() && orders.data.with(Option::is_none) {
                                return view! {
                                    <TableRow>
                                        <TableCell attr:colspan="7"><Spinner /></TableCell>
                                    </TableRow>
                                }
                                .into_any();
                            }
                            let rows = page_rows.get();
                            if rows.is_empty() {
                                return view! {
                                    <TableRow>
                                        <TableCell attr:colspan="7">
                                            <TableCellLayout>"Aucune commande trouvée."</TableCellLayout>
                                        </TableCell>
                                    </TableRow>
                                }
                                .into_any();
                            }
                            rows.into_iter()
                                .map(|order| {
                                    let delivery = order
                                        .actual_delivery_date
                                        .as_deref()
                                        .map(|d| format!("Livrée le {}", format_date(d)))
                                        .unwrap_or_else(|| format_date(&order.expected_delivery_date));
                                    let order_number = order.order_number.clone();
                                    let supplier_name = order.supplier_name.clone();
                                    let item_count = order.item_count();
                                    let total = format_currency_in(order.total_amount, &order.currency);
                                    let order_date = format_date(&order.order_date);
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <span class="mono">{order_number}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {supplier_name}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <ToneBadge tone=order.status label=order.status.display_name() />
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{item_count}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {total}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{order_date}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{delivery}</TableCellLayout>
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

            <PaginationControls pagination=pagination />
        </div>
    }
}
