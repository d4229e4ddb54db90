use contracts::system::users::{User, UserPatch};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::components::PageHeader;
use crate::shared::config::use_app_config;
use crate::shared::date_utils::format_date_time;
use crate::shared::error::AppError;
use crate::shared::format::format_file_size;
use crate::shared::hooks::{use_loading, use_mutation, MutationOptions};
use crate::shared::theme::ThemeSwitch;
use crate::shared::storage::{stored_bytes, use_storage};
use crate::shared::validation::is_valid_email;
use crate::system::auth::use_auth;
use crate::system::notifications::use_notifications;

/// Fields that differ from `user`, trimmed
fn profile_patch(user: &User, first_name: &str, last_name: &str, company: &str, email: &str) -> UserPatch {
    let changed = |current: &str, next: &str| {
        let next = next.trim();
        (next != current).then(|| next.to_string())
    };
    UserPatch {
        email: changed(&user.email, email),
        first_name: changed(&user.first_name, first_name),
        last_name: changed(&user.last_name, last_name),
        company: changed(&user.company, company),
        ..UserPatch::default()
    }
}

fn check_patch(patch: &UserPatch) -> Result<(), AppError> {
    if patch.first_name.as_deref().is_some_and(str::is_empty) || patch.last_name.as_deref().is_some_and(str::is_empty) {
        return Err(AppError::Validation("Prénom et nom ne peuvent pas être vides".into()));
    }
    if patch.email.as_deref().is_some_and(|e| !is_valid_email(e)) {
        return Err(AppError::Validation("Adresse e-mail invalide".into()));
    }
    Ok(())
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    view! {
        <div class="page">
            <PageHeader title="Paramètres" subtitle="Profil, notifications et apparence" />
            <div class="settings-grid">
                <ProfileSection />
                <NotificationSection />
                <AppearanceSection />
                <GeneralSection />
            </div>
        </div>
    }
}

#[component]
fn ProfileSection() -> impl IntoView {
    let auth = use_auth();
    let notifications = use_notifications();
    let user = auth.store.user();

    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let company = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());

    // Form follows the stored profile (initial load and after each save)
    Effect::new(move |_| {
        if let Some(u) = user.get() {
            first_name.set(u.first_name);
            last_name.set(u.last_name);
            company.set(u.company);
            email.set(u.email);
        }
    });

    let save_auth = auth.clone();
    let save = use_mutation(
        move |patch: UserPatch| {
            let auth = save_auth.clone();
            async move {
                check_patch(&patch)?;
                auth.update_profile(patch).await
            }
        },
        MutationOptions::default()
            .on_success(move |_: &(), _| {
                notifications.show_success("Profil mis à jour", "Vos informations ont été enregistrées");
            })
            .on_error(move |e: &AppError, _| {
                notifications.show_error("Échec de la mise à jour", &e.user_message());
            }),
    );

    let on_save = move |_| {
        let Some(current) = user.get_untracked() else {
            return;
        };
        let patch = profile_patch(
            &current,
            &first_name.get_untracked(),
            &last_name.get_untracked(),
            &company.get_untracked(),
            &email.get_untracked(),
        );
        spawn_local(async move {
            let _ = save.mutate(patch).await;
        });
    };

    let sync = use_loading();
    let reload_auth = auth.clone();
    let on_reload = move |_| {
        let auth = reload_auth.clone();
        sync.start();
        spawn_local(async move {
            if let Err(e) = auth.reload_profile().await {
                notifications.show_error("Synchronisation impossible", &e.user_message());
            }
            sync.stop();
        });
    };

    view! {
        <Card>
            <div class="settings-section">
                <h2>"Profil"</h2>
                <div class="form-grid">
                    <Flex vertical=true gap=FlexGap::Small>
                        <Label>"Prénom"</Label>
                        <Input value=first_name />
                    </Flex>
                    <Flex vertical=true gap=FlexGap::Small>
                        <Label>"Nom"</Label>
                        <Input value=last_name />
                    </Flex>
                    <Flex vertical=true gap=FlexGap::Small>
                        <Label>"Adresse e-mail"</Label>
                        <Input value=email />
                    </Flex>
                    <Flex vertical=true gap=FlexGap::Small>
                        <Label>"Entreprise"</Label>
                        <Input value=company />
                    </Flex>
                </div>
                <div class="settings-meta muted">
                    {move || user.get().map(|u| format!(
                        "Rôle : {} · Dernière modification : {}",
                        u.role.display_name(),
                        format_date_time(&u.updated_at),
                    ))}
                </div>
                {move || save.error().get().map(|e| view! {
                    <div class="alert alert--error">{e.user_message()}</div>
                })}
                <Flex gap=FlexGap::Small>
                    <Button appearance=ButtonAppearance::Primary on_click=on_save loading=save.is_loading()>
                        "Enregistrer"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=on_reload loading=sync.is_loading()>
                        "Synchroniser"
                    </Button>
                </Flex>
            </div>
        </Card>
    }
}

#[component]
fn NotificationSection() -> impl IntoView {
    let stock_alerts = RwSignal::new(true);
    let order_updates = RwSignal::new(true);
    let maintenance_reminders = RwSignal::new(true);
    let email_digest = RwSignal::new(false);

    view! {
        <Card>
            <div class="settings-section">
                <h2>"Notifications"</h2>
                <Flex vertical=true gap=FlexGap::Small>
                    <Checkbox checked=stock_alerts label="Alertes de stock faible ou critique" />
                    <Checkbox checked=order_updates label="Suivi des commandes fournisseurs" />
                    <Checkbox checked=maintenance_reminders label="Rappels de maintenance planifiée" />
                    <Checkbox checked=email_digest label="Résumé hebdomadaire par e-mail" />
                </Flex>
            </div>
        </Card>
    }
}

#[component]
fn AppearanceSection() -> impl IntoView {
    view! {
        <Card>
            <div class="settings-section">
                <h2>"Apparence"</h2>
                <p class="muted">"Le mode Système suit le réglage clair/sombre de votre appareil."</p>
                <ThemeSwitch with_labels=true />
            </div>
        </Card>
    }
}

#[component]
fn GeneralSection() -> impl IntoView {
    let config = use_app_config();
    let stale_minutes = config.stale_time_ms as f64 / 60_000.0;
    let local_data = format_file_size(stored_bytes(use_storage().as_ref()));

    view! {
        <Card>
            <div class="settings-section">
                <h2>"Général"</h2>
                <dl class="settings-facts">
                    <dt>"Serveur"</dt>
                    <dd>{config.backend.label()}</dd>
                    <dt>"Rafraîchissement des données"</dt>
                    <dd>{format!("toutes les {stale_minutes:.0} min au plus")}</dd>
                    <dt>"Données locales"</dt>
                    <dd>{local_data}</dd>
                    <dt>"Version"</dt>
                    <dd>{env!("CARGO_PKG_VERSION")}</dd>
                </dl>
            </div>
        </Card>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::auth::state::sample_user;

    #[test]
    fn test_patch_keeps_only_changed_fields() {
        let user = sample_user();
        let patch = profile_patch(&user, &user.first_name, " Durand ", &user.company, &user.email);
        assert_eq!(
            patch,
            UserPatch {
                last_name: Some("Durand".into()),
                ..UserPatch::default()
            }
        );
        let unchanged = profile_patch(&user, &user.first_name, &user.last_name, &user.company, &user.email);
        assert!(unchanged.is_empty());
    }

    #[test]
    fn test_blank_name_or_bad_email_is_rejected() {
        let blank = UserPatch {
            first_name: Some(String::new()),
            ..UserPatch::default()
        };
        assert!(check_patch(&blank).is_err());

        let bad_email = UserPatch {
            email: Some("jean@".into()),
            ..UserPatch::default()
        };
        assert!(check_patch(&bad_email).is_err());
        assert!(check_patch(&UserPatch::default()).is_ok());
    }
}
