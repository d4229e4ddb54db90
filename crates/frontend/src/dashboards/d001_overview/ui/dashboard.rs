use contracts::domain::a005_notification::NewNotification;
use contracts::enums::NotificationType;
use leptos::prelude::*;
use thaw::*;

use crate::dashboards::d001_overview::api::{self, Overview};
use crate::layout::global_context::{use_global_context, Page};
use crate::shared::backend::use_backend;
use crate::shared::components::{PageHeader, StatCard, Tone, ToneBadge};
use crate::shared::config::use_app_config;
use crate::shared::date_utils::format_date;
use crate::shared::format::{format_currency, format_currency_in, format_fixed};
use crate::shared::hooks::use_query;
use crate::shared::preferences::use_preferences;
use crate::system::auth::use_auth_store;
use crate::system::notifications::use_notifications;

#[component]
pub fn OverviewDashboard() -> impl IntoView {
    let backend = use_backend();
    let preferences = use_preferences();
    let notifications = use_notifications();
    let user = use_auth_store().user();
    let ctx = use_global_context();

    let overview = use_query(
        Signal::stored("dashboard-overview".to_string()),
        move |_| {
            let backend = backend.clone();
            async move { api::fetch_overview(backend.as_ref()).await }
        },
        api::refresh_options(use_app_config().query_options()),
    );

    let published = preferences.dashboard_stats();

    // Publishes the figures; the first computation of the session raises a stock alert
    Effect::new(move |_| {
        let Some(stats) = overview.data.with(|d| d.as_ref().map(|o| o.stats)) else {
            return;
        };
        let first = published.get_untracked().is_none();
        preferences.set_dashboard_stats(stats);
        if first && stats.critical_stock_parts > 0 {
            let user_id = user.get_untracked().map(|u| u.id).unwrap_or_default();
            notifications.add(
                NewNotification::system(
                    user_id,
                    "Stock critique",
                    format!("{} pièce(s) sous le seuil critique", stats.critical_stock_parts),
                )
                .with_kind(NotificationType::StockCritical),
            );
        }
    });

    let stats = Signal::derive(move || published.get().unwrap_or_default());
    let greeting = Signal::derive(move || {
        user.get()
            .map(|u| format!("Bonjour {}, voici l'état de votre parc", u.first_name))
    });

    let section = move |render: fn(&Overview) -> AnyView| {
        move || {
            overview
                .data
                .with(|d| d.as_ref().map(render))
                .unwrap_or_else(|| view! { <Spinner /> }.into_any())
        }
    };

    view! {
        <div class="page">
            <PageHeader title="Tableau de bord" subtitle=greeting>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| overview.refetch()
                    disabled=overview.is_loading
                >
                    "Actualiser"
                </Button>
            </PageHeader>

            {move || overview.error.get().map(|e| view! {
                <div class="alert alert--error">{e.user_message()}</div>
            })}

            <div class="stat-grid">
                <StatCard
                    label="Pièces référencées"
                    icon_name="package"
                    value=Signal::derive(move || stats.get().total_parts.to_string())
                    subtitle=Signal::derive(move || Some(format!("{} en alerte de stock", stats.get().stock_alerts())))
                    tone=Signal::derive(move || {
                        let s = stats.get();
                        if s.critical_stock_parts > 0 {
                            Tone::Danger
                        } else if s.low_stock_parts > 0 {
                            Tone::Warning
                        } else {
                            Tone::Success
                        }
                    })
                />
                <StatCard
                    label="Commandes en cours"
                    icon_name="shopping-cart"
                    value=Signal::derive(move || stats.get().pending_orders.to_string())
                    subtitle=Signal::derive(move || Some(format!("{} commandés au total", format_currency(stats.get().total_order_value))))
                    tone=Tone::Info
                />
                <StatCard
                    label="Interventions ouvertes"
                    icon_name="wrench"
                    value=Signal::derive(move || stats.get().maintenance_requests.to_string())
                    subtitle=Signal::derive(move || Some(format!("{} h d'immobilisation estimées", stats.get().equipment_downtime)))
                    tone=Tone::Warning
                />
                <StatCard
                    label="Délai moyen fournisseurs"
                    icon_name="truck"
                    value=Signal::derive(move || format!("{} j", format_fixed(stats.get().average_lead_time, 1)))
                />
            </div>

            <div class="dashboard-grid">
                <Card>
                    <div class="dashboard-panel">
                        <div class="dashboard-panel__header">
                            <h2>"Commandes récentes"</h2>
                            <Button
                                appearance=ButtonAppearance::Subtle
                                size=ButtonSize::Small
                                on_click=move |_| ctx.navigate(Page::Orders)
                            >
                                "Tout voir"
                            </Button>
                        </div>
                        {section(recent_orders)}
                    </div>
                </Card>
                <Card>
                    <div class="dashboard-panel">
                        <div class="dashboard-panel__header">
                            <h2>"Stock faible"</h2>
                            <Button
                                appearance=ButtonAppearance::Subtle
                                size=ButtonSize::Small
                                on_click=move |_| ctx.navigate(Page::SpareParts)
                            >
                                "Tout voir"
                            </Button>
                        </div>
                        {section(low_stock)}
                    </div>
                </Card>
                <Card>
                    <div class="dashboard-panel">
                        <div class="dashboard-panel__header">
                            <h2>"Maintenance"</h2>
                            <Button
                                appearance=ButtonAppearance::Subtle
                                size=ButtonSize::Small
                                on_click=move |_| ctx.navigate(Page::Maintenance)
                            >
                                "Tout voir"
                            </Button>
                        </div>
                        {section(maintenance)}
                    </div>
                </Card>
            </div>
        </div>
    }
}

fn empty(text: &'static str) -> AnyView {
    view! { <p class="empty-state">{text}</p> }.into_any()
}

fn recent_orders(overview: &Overview) -> AnyView {
    if overview.recent_orders.is_empty() {
        return empty("Aucune commande");
    }
    overview
        .recent_orders
        .iter()
        .map(|order| {
            view! {
                <div class="dashboard-row">
                    <div>
                        <div class="dashboard-row__title">{order.order_number.clone()}</div>
                        <div class="muted">
                            {format!("{} · {}", order.supplier_name, format_date(&order.order_date))}
                        </div>
                    </div>
                    <div class="dashboard-row__side">
                        <span>{format_currency_in(order.total_amount, &order.currency)}</span>
                        <ToneBadge tone=order.status label=order.status.display_name() />
                    </div>
                </div>
            }
        })
        .collect_view()
        .into_any()
}

fn low_stock(overview: &Overview) -> AnyView {
    if overview.low_stock.is_empty() {
        return empty("Tous les stocks sont au-dessus du minimum");
    }
    overview
        .low_stock
        .iter()
        .map(|part| {
            let status = part.stock_status();
            view! {
                <div class="dashboard-row">
                    <div>
                        <div class="dashboard-row__title">{part.name.clone()}</div>
                        <div class="muted">{format!("{} · {}", part.part_number, part.location)}</div>
                    </div>
                    <div class="dashboard-row__side">
                        <span>{format!("{} / {}", part.current_stock, part.minimum_stock)}</span>
                        <ToneBadge tone=status label=status.label() />
                    </div>
                </div>
            }
        })
        .collect_view()
        .into_any()
}

fn maintenance(overview: &Overview) -> AnyView {
    if overview.open_requests.is_empty() {
        return empty("Aucune intervention en cours");
    }
    overview
        .open_requests
        .iter()
        .map(|request| {
            view! {
                <div class="dashboard-row">
                    <div>
                        <div class="dashboard-row__title">{request.title.clone()}</div>
                        <div class="muted">{request.equipment_name.clone()}</div>
                    </div>
                    <div class="dashboard-row__side">
                        <ToneBadge tone=request.priority label=request.priority.display_name() />
                        <ToneBadge tone=request.status label=request.status.display_name() />
                    </div>
                </div>
            }
        })
        .collect_view()
        .into_any()
}
