//! Evently web client
//!
//! Leptos CSR application for the event-registration platform: sign-in and
//! registration dialogs, the admin review panel, and the loader that displays
//! access-controlled uploads.

use evently_common::auth::AccountSummary;
use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use std::rc::Rc;

pub mod api;
pub mod components;
pub mod config;
pub mod error;
mod pages;
pub mod resource;

use pages::{AdminPanel, Home};

/// Signed-in account, shared through context
#[derive(Clone, Copy)]
pub struct Session {
    pub user: RwSignal<Option<AccountSummary>>,
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = Session {
        user: create_rw_signal(None),
    };
    provide_context(session);
    provide_context(Rc::new(resource::browser_loader(config::config())));

    // Restore the session from a stored token
    if api::stored_token().is_some() {
        spawn_local(async move {
            match api::current_user().await {
                Ok(user) => session.user.set(Some(user)),
                Err(e) => {
                    logging::warn!("Stored token rejected: {}", e);
                    api::clear_token();
                }
            }
        });
    }

    view! {
        <Stylesheet id="leptos" href="/pkg/evently-ui.css"/>
        <Title text="Evently - Event Registration"/>
        <Meta name="description" content="Register for events and manage registrations"/>

        <Router>
            <nav class="navbar">
                <div class="navbar-brand">
                    <A href="/">"Evently"</A>
                </div>
                <div class="navbar-menu">
                    <A href="/" class="navbar-item">"Events"</A>
                    <Show when=move || session.user.with(|u| u.as_ref().map(|u| u.is_admin()).unwrap_or(false))>
                        <A href="/admin" class="navbar-item">"Admin"</A>
                    </Show>
                </div>
            </nav>

            <main class="container">
                <Routes>
                    <Route path="/" view=Home/>
                    <Route path="/admin" view=AdminPanel/>
                </Routes>
            </main>
        </Router>
    }
}

/// Entry point for WASM
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn run_app() {
    console_error_panic_hook::set_once();
    mount_to_body(|| view! { <App/> });
}
