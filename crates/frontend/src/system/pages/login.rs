use contracts::demo;
use contracts::system::auth::SignUpProfile;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::config::{use_app_config, BackendMode};
use crate::shared::validation::{is_valid_email, validate_password};
use crate::system::auth::use_auth;
use crate::system::notifications::use_notifications;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    SignIn,
    SignUp,
}

fn check_sign_in(email: &str, password: &str) -> Result<(), String> {
    if !is_valid_email(email.trim()) {
        return Err("Adresse e-mail invalide".into());
    }
    if password.is_empty() {
        return Err("Le mot de passe est obligatoire".into());
    }
    Ok(())
}

fn check_sign_up(email: &str, password: &str, confirm: &str, profile: &SignUpProfile) -> Result<(), String> {
    if profile.first_name.trim().is_empty() || profile.last_name.trim().is_empty() {
        return Err("Prénom et nom sont obligatoires".into());
    }
    if !is_valid_email(email.trim()) {
        return Err("Adresse e-mail invalide".into());
    }
    let check = validate_password(password);
    if !check.is_valid {
        return Err(format!("Mot de passe trop faible : {}", check.messages().join(", ")));
    }
    if password != confirm {
        return Err("Les mots de passe ne correspondent pas".into());
    }
    Ok(())
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let notifications = use_notifications();
    let is_demo = use_app_config().backend == BackendMode::Demo;

    let mode = RwSignal::new(Mode::SignIn);
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let company = RwSignal::new(String::new());
    let error_message = RwSignal::new(None::<String>);
    let info_message = RwSignal::new(None::<String>);
    let is_loading = auth.store.is_loading();

    let switch_mode = move |next: Mode| {
        mode.set(next);
        error_message.set(None);
        info_message.set(None);
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        error_message.set(None);
        info_message.set(None);

        let email_val = email.get_untracked().trim().to_string();
        let password_val = password.get_untracked();
        let auth = auth.clone();

        match mode.get_untracked() {
            Mode::SignIn => {
                if let Err(e) = check_sign_in(&email_val, &password_val) {
                    error_message.set(Some(e));
                    return;
                }
                spawn_local(async move {
                    match auth.sign_in(&email_val, &password_val).await {
                        Ok(user) => notifications.show_success(
                            "Connexion réussie",
                            &format!("Bienvenue, {}", user.full_name()),
                        ),
                        Err(e) => error_message.set(Some(e.user_message())),
                    }
                });
            }
            Mode::SignUp => {
                let profile = SignUpProfile {
                    first_name: first_name.get_untracked().trim().to_string(),
                    last_name: last_name.get_untracked().trim().to_string(),
                    company: company.get_untracked().trim().to_string(),
                };
                if let Err(e) = check_sign_up(&email_val, &password_val, &confirm.get_untracked(), &profile) {
                    error_message.set(Some(e));
                    return;
                }
                spawn_local(async move {
                    match auth.sign_up(&email_val, &password_val, &profile).await {
                        Ok(()) => {
                            password.set(String::new());
                            confirm.set(String::new());
                            mode.set(Mode::SignIn);
                            info_message.set(Some(
                                "Compte créé. Vous pouvez maintenant vous connecter.".into(),
                            ));
                        }
                        Err(e) => error_message.set(Some(e.user_message())),
                    }
                });
            }
        }
    };

    let text_input = move |id: &'static str, label: &'static str, kind: &'static str, value: RwSignal<String>| {
        view! {
            <div class="form-group">
                <label for=id>{label}</label>
                <input
                    type=kind
                    id=id
                    prop:value=move || value.get()
                    on:input=move |ev| value.set(event_target_value(&ev))
                    disabled=move || is_loading.get()
                />
            </div>
        }
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"SOSMachine"</h1>
                <h2>
                    {move || match mode.get() {
                        Mode::SignIn => "Connexion à votre espace",
                        Mode::SignUp => "Créer un compte",
                    }}
                </h2>

                {move || error_message.get().map(|e| view! { <div class="error-message">{e}</div> })}
                {move || info_message.get().map(|m| view! { <div class="info-message">{m}</div> })}

                <form on:submit=on_submit>
                    <Show when=move || mode.get() == Mode::SignUp>
                        {text_input("first_name", "Prénom", "text", first_name)}
                        {text_input("last_name", "Nom", "text", last_name)}
                        {text_input("company", "Entreprise", "text", company)}
                    </Show>
                    {text_input("email", "Adresse e-mail", "email", email)}
                    {text_input("password", "Mot de passe", "password", password)}
                    <Show when=move || mode.get() == Mode::SignUp>
                        {text_input("confirm", "Confirmer le mot de passe", "password", confirm)}
                    </Show>

                    <button type="submit" class="btn-primary" disabled=move || is_loading.get()>
                        {move || match (mode.get(), is_loading.get()) {
                            (_, true) => "Veuillez patienter...",
                            (Mode::SignIn, false) => "Se connecter",
                            (Mode::SignUp, false) => "Créer le compte",
                        }}
                    </button>
                </form>

                <div class="login-switch">
                    {move || match mode.get() {
                        Mode::SignIn => view! {
                            <button class="link-button" on:click=move |_| switch_mode(Mode::SignUp)>
                                "Pas encore de compte ? S'inscrire"
                            </button>
                        }
                        .into_any(),
                        Mode::SignUp => view! {
                            <button class="link-button" on:click=move |_| switch_mode(Mode::SignIn)>
                                "Déjà inscrit ? Se connecter"
                            </button>
                        }
                        .into_any(),
                    }}
                </div>

                {is_demo.then(|| view! {
                    <div class="login-info">
                        <p>"Mode démonstration, compte de test :"</p>
                        <p>"E-mail : " <strong>{demo::DEMO_EMAIL}</strong></p>
                        <p>"Mot de passe : " <strong>{demo::DEMO_PASSWORD}</strong></p>
                    </div>
                })}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> SignUpProfile {
        SignUpProfile {
            first_name: "Marie".into(),
            last_name: "Martin".into(),
            company: String::new(),
        }
    }

    #[test]
    fn test_sign_in_needs_email_and_password() {
        assert!(check_sign_in("jean@sosmachine.pro", "x").is_ok());
        assert!(check_sign_in("jean", "x").is_err());
        assert!(check_sign_in("jean@sosmachine.pro", "").is_err());
    }

    #[test]
    fn test_sign_up_enforces_password_rules() {
        let ok = check_sign_up("marie@atelier.fr", "Secret#2024", "Secret#2024", &profile());
        assert!(ok.is_ok());

        let weak = check_sign_up("marie@atelier.fr", "secret", "secret", &profile()).unwrap_err();
        assert!(weak.contains("Au moins une majuscule"));

        let mismatch = check_sign_up("marie@atelier.fr", "Secret#2024", "Secret#2025", &profile());
        assert_eq!(mismatch.unwrap_err(), "Les mots de passe ne correspondent pas");

        let anonymous = SignUpProfile {
            first_name: " ".into(),
            ..profile()
        };
        assert!(check_sign_up("marie@atelier.fr", "Secret#2024", "Secret#2024", &anonymous).is_err());
    }
}
