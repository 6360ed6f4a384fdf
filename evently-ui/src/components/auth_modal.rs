//! Login / registration dialog

use evently_common::auth::{AccountSummary, RegisterRequest};
use leptos::*;

use super::{Button, Dialog, Tab, Tabs};
use crate::api;
use crate::error::{ApiError, ErrorAlert, FieldError};

const MIN_PASSWORD_LEN: usize = 8;

/// Client-side checks before anything is sent to the API
fn validate_registration(name: &str, email: &str, password: &str, confirm: &str) -> Option<&'static str> {
    if name.trim().is_empty() {
        Some("Name is required")
    } else if !email.contains('@') || email.trim().len() < 3 {
        Some("Enter a valid email address")
    } else if password.len() < MIN_PASSWORD_LEN {
        Some("Password must be at least 8 characters")
    } else if password != confirm {
        Some("Passwords do not match")
    } else {
        None
    }
}

#[component]
fn LoginForm(on_authenticated: Callback<AccountSummary>) -> impl IntoView {
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (loading, set_loading) = create_signal(false);
    let (error, set_error) = create_signal(None::<ApiError>);

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        set_loading.set(true);
        set_error.set(None);

        spawn_local(async move {
            match api::login(&email.get_untracked(), &password.get_untracked()).await {
                Ok(response) => {
                    logging::log!("Logged in as {}", response.user.email);
                    on_authenticated.call(response.user);
                }
                Err(e) => set_error.set(Some(e)),
            }
            set_loading.set(false);
        });
    };

    view! {
        <form class="auth-form" on:submit=submit>
            {move || error.get().map(|e| view! { <ErrorAlert error=e/> })}
            <div class="form-group">
                <label>"Email"</label>
                <input
                    type="email"
                    required
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                    prop:value=email
                />
            </div>
            <div class="form-group">
                <label>"Password"</label>
                <input
                    type="password"
                    required
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                    prop:value=password
                />
            </div>
            <Button button_type="submit" loading=loading>"Log in"</Button>
        </form>
    }
}

#[component]
fn RegisterForm(on_registered: Callback<()>) -> impl IntoView {
    let (name, set_name) = create_signal(String::new());
    let (email, set_email) = create_signal(String::new());
    let (phone, set_phone) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (confirm, set_confirm) = create_signal(String::new());
    let (loading, set_loading) = create_signal(false);
    let (field_error, set_field_error) = create_signal(None::<&'static str>);
    let (error, set_error) = create_signal(None::<ApiError>);

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        set_error.set(None);

        let invalid = validate_registration(
            &name.get_untracked(),
            &email.get_untracked(),
            &password.get_untracked(),
            &confirm.get_untracked(),
        );
        set_field_error.set(invalid);
        if invalid.is_some() {
            return;
        }

        let phone = phone.get_untracked();
        let request = RegisterRequest {
            name: name.get_untracked().trim().to_string(),
            email: email.get_untracked().trim().to_string(),
            password: password.get_untracked(),
            phone: (!phone.trim().is_empty()).then(|| phone.trim().to_string()),
        };

        set_loading.set(true);
        spawn_local(async move {
            match api::register(&request).await {
                Ok(account) => {
                    logging::log!("Registered account {}", account.id);
                    on_registered.call(());
                }
                Err(e) => set_error.set(Some(e)),
            }
            set_loading.set(false);
        });
    };

    view! {
        <form class="auth-form" on:submit=submit>
            {move || error.get().map(|e| view! { <ErrorAlert error=e/> })}
            {move || field_error.get().map(|msg| view! { <FieldError message=msg.to_string()/> })}
            <div class="form-group">
                <label>"Full name"</label>
                <input type="text" required on:input=move |ev| set_name.set(event_target_value(&ev)) prop:value=name/>
            </div>
            <div class="form-group">
                <label>"Email"</label>
                <input type="email" required on:input=move |ev| set_email.set(event_target_value(&ev)) prop:value=email/>
            </div>
            <div class="form-group">
                <label>"Phone (optional)"</label>
                <input type="tel" on:input=move |ev| set_phone.set(event_target_value(&ev)) prop:value=phone/>
            </div>
            <div class="form-group">
                <label>"Password"</label>
                <input type="password" required on:input=move |ev| set_password.set(event_target_value(&ev)) prop:value=password/>
            </div>
            <div class="form-group">
                <label>"Confirm password"</label>
                <input type="password" required on:input=move |ev| set_confirm.set(event_target_value(&ev)) prop:value=confirm/>
            </div>
            <Button button_type="submit" loading=loading>"Create account"</Button>
        </form>
    }
}

#[component]
pub fn AuthModal(
    #[prop(into)]
    open: Signal<bool>,
    on_close: Callback<()>,
    on_authenticated: Callback<AccountSummary>,
) -> impl IntoView {
    let (notice, set_notice) = create_signal(None::<&'static str>);

    view! {
        <Dialog open=open on_close=on_close title="Welcome".to_string() class="auth-modal">
            {move || notice.get().map(|msg| view! { <div class="alert alert-info">{msg}</div> })}
            <Tabs tabs=vec![
                Tab::new("login", "Log in", move || view! {
                    <LoginForm on_authenticated=on_authenticated/>
                }),
                Tab::new("register", "Register", move || view! {
                    <RegisterForm on_registered=Callback::new(move |_| {
                        set_notice.set(Some("Account created. You can log in now."))
                    })/>
                }),
            ]/>
        </Dialog>
    }
}
