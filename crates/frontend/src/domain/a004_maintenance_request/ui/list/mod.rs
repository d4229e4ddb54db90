use contracts::domain::a004_maintenance_request::{MaintenanceFilter, MaintenanceRequest, MaintenanceSummary};
use contracts::enums::{MaintenanceStatus, Priority};
use leptos::prelude::*;
use thaw::*;

use crate::domain::a004_maintenance_request::api;
use crate::shared::backend::{tables, use_backend};
use crate::shared::components::{PageHeader, StatCard, Tone, ToneBadge};
use crate::shared::config::use_app_config;
use crate::shared::date_utils::format_date;
use crate::shared::hooks::use_query;
use crate::shared::list_utils::{group_by, SearchInput};
use crate::shared::text_utils::{capitalize_words, slugify};

/// Requests sharing an equipment location
#[derive(Debug, Clone, PartialEq)]
struct LocationGroup {
    anchor: String,
    label: String,
    requests: Vec<MaintenanceRequest>,
}

/// Spelling variants of a location land in one group, labelled after its
/// first request
fn group_by_location(requests: &[MaintenanceRequest]) -> Vec<LocationGroup> {
    group_by(requests, |r| slugify(&r.equipment_location))
        .into_iter()
        .map(|(slug, requests)| LocationGroup {
            anchor: format!("site-{slug}"),
            label: requests
                .first()
                .map(|r| capitalize_words(r.equipment_location.trim()))
                .unwrap_or_default(),
            requests,
        })
        .collect()
}

#[component]
pub fn MaintenanceRequestList() -> impl IntoView {
    let backend = use_backend();
    let search = RwSignal::new(String::new());
    let priority = RwSignal::new(String::new());
    let status = RwSignal::new(String::new());

    let requests = use_query(
        Signal::stored(tables::MAINTENANCE_REQUESTS.to_string()),
        move |_| {
            let backend = backend.clone();
            async move { api::fetch_maintenance_requests(backend.as_ref()).await }
        },
        use_app_config().query_options(),
    );

    let all_requests = Signal::derive(move || requests.data.get().unwrap_or_default());
    let summary = Signal::derive(move || all_requests.with(|r| MaintenanceSummary::compute(r)));
    let visible = Signal::derive(move || {
        let filter = MaintenanceFilter {
            search: search.get(),
            priority: Priority::from_code(&priority.get()),
            status: MaintenanceStatus::from_code(&status.get()),
        };
        all_requests.with(|r| {
            filter
                .apply(r)
                .into_iter()
                .cloned()
                .collect::<Vec<MaintenanceRequest>>()
        })
    });

    view! {
        <div class="page">
            <PageHeader title="Maintenance" subtitle="Demandes d'intervention sur les équipements">
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| requests.refetch()
                    disabled=requests.is_loading
                >
                    "Actualiser"
                </Button>
            </PageHeader>

            <div class="stat-grid">
                <StatCard
                    label="Urgentes"
                    icon_name="alert-triangle"
                    value=Signal::derive(move || summary.get().urgent.to_string())
                    tone=Signal::derive(move || {
                        if summary.get().urgent > 0 { Tone::Danger } else { Tone::Neutral }
                    })
                />
                <StatCard
                    label="En attente"
                    icon_name="clock"
                    value=Signal::derive(move || summary.get().pending.to_string())
                    tone=Tone::Warning
                />
                <StatCard
                    label="En cours"
                    icon_name="wrench"
                    value=Signal::derive(move || summary.get().in_progress.to_string())
                    tone=Tone::Info
                />
                <StatCard
                    label="Terminées"
                    icon_name="check"
                    value=Signal::derive(move || summary.get().completed.to_string())
                    tone=Tone::Success
                />
            </div>

            <div class="filter-bar">
                <SearchInput value=search placeholder="Titre, équipement ou emplacement..." />
                <Select value=priority>
                    <option value="">"Toutes les priorités"</option>
                    {Priority::all()
                        .into_iter()
                        .map(|p| view! { <option value=p.code()>{p.display_name()}</option> })
                        .collect_view()}
                </Select>
                <Select value=status>
                    <option value="">"Tous les statuts"</option>
                    {MaintenanceStatus::all()
                        .into_iter()
                        .map(|s| view! { <option value=s.code()>{s.display_name()}</option> })
                        .collect_view()}
                </Select>
            </div>

            {move || requests.error.get().map(|e| view! {
                <div class="alert alert--error">{e.user_message()}</div>
            })}

            <div class="request-list">
                {move || {
                    if requests.is_loading.get() && requests.data.with(Option::is_none) {
                        return view! { <Spinner /> }.into_any();
                    }
                    let rows = visible.get();
                    if rows.is_empty() {
                        return view! {
                            <div class="empty-state">"Aucune demande ne correspond aux filtres."</div>
                        }
                        .into_any();
                    }
                    group_by_location(&rows)
                        .into_iter()
                        .map(|group| {
                            let count = group.requests.len();
                            view! {
                                <section class="request-group" id=group.anchor>
                                    <h2 class="request-group__title">
                                        {group.label}
                                        <span class="muted">{format!(" ({count})")}</span>
                                    </h2>
                                    {group
                                        .requests
                                        .into_iter()
                                        .map(|request| view! { <RequestCard request=request /> })
                                        .collect_view()}
                                </section>
                            }
                        })
                        .collect_view()
                        .into_any()
                }}
            </div>
        </div>
    }
}

#[component]
fn RequestCard(request: MaintenanceRequest) -> impl IntoView {
    let missing = request.missing_parts();
    let scheduled = request
        .scheduled_date
        .as_deref()
        .map(format_date)
        .unwrap_or_else(|| "Non planifiée".to_string());
    let assigned = request
        .assigned_to
        .clone()
        .unwrap_or_else(|| "Non assignée".to_string());

    view! {
        <Card>
            <div class="request-card">
                <div class="request-card__header">
                    <h3 class="request-card__title">{request.title.clone()}</h3>
                    <div class="request-card__badges">
                        <ToneBadge tone=request.priority label=request.priority.display_name() />
                        <ToneBadge tone=request.status label=request.status.display_name() />
                    </div>
                </div>
                <p class="request-card__description">{request.description.clone()}</p>
                <div class="request-card__meta">
                    <span>{format!("{} · {}", request.equipment_name, request.equipment_location)}</span>
                    <span>{format!("Demandée par {} le {}", request.requested_by, format_date(&request.created_at))}</span>
                    <span>{format!("Assignée à : {assigned}")}</span>
                    <span>{format!("Planifiée : {scheduled} · {} h estimées", request.estimated_duration_hours)}</span>
                </div>
                {(!request.required_parts.is_empty()).then(|| view! {
                    <div class="request-card__parts">
                        <span>{format!("{} pièce(s) requise(s)", request.required_parts.len())}</span>
                        {(missing > 0).then(|| view! {
                            <ToneBadge tone=Tone::Warning label=format!("{missing} manquante(s)") />
                        })}
                    </div>
                })}
            </div>
        </Card>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::demo;

    #[test]
    fn test_requests_are_grouped_by_location() {
        let groups = group_by_location(&demo::maintenance_requests());
        let anchors: Vec<&str> = groups.iter().map(|g| g.anchor.as_str()).collect();
        assert_eq!(
            anchors,
            vec![
                "site-atelier-a-zone-1",
                "site-atelier-b-zone-3",
                "site-atelier-c-presse-2",
                "site-four-f-102",
            ]
        );
        assert_eq!(groups[0].label, "Atelier A - Zone 1");
        assert!(groups.iter().all(|g| g.requests.len() == 1));
    }

    #[test]
    fn test_location_spellings_share_a_group() {
        let mut requests = demo::maintenance_requests();
        let mut variant = requests[0].clone();
        variant.id = "MR-variant".into();
        variant.equipment_location = "atelier a  -  ZONE 1 ".into();
        requests.push(variant);

        let groups = group_by_location(&requests);
        assert_eq!(groups.len(), 4);
        assert_eq!(groups[0].label, "Atelier A - Zone 1");
        assert_eq!(groups[0].requests.len(), 2);
        assert_eq!(groups[0].requests[1].id, "MR-variant");
    }
}
