use leptos::*;

use crate::components::{AuthModal, Button, ButtonVariant};
use crate::{api, Session};

#[component]
pub fn Home() -> impl IntoView {
    let session = expect_context::<Session>();
    let (show_auth, set_show_auth) = create_signal(false);

    let logout = move |_| {
        api::clear_token();
        session.user.set(None);
    };

    view! {
        <div class="home-page">
            <section class="hero">
                <h1>"Register for upcoming events"</h1>
                <p class="tagline">"Sign in to manage your registrations and payments."</p>
                {move || match session.user.get() {
                    Some(user) => view! {
                        <div class="session-info">
                            <span>"Signed in as " {user.name.clone()}</span>
                            {user.is_admin().then(|| view! { <a href="/admin" class="btn btn-secondary">"Admin panel"</a> })}
                            <Button variant=ButtonVariant::Ghost on_click=Callback::new(logout)>"Log out"</Button>
                        </div>
                    }
                    .into_view(),
                    None => view! {
                        <Button on_click=Callback::new(move |_| set_show_auth.set(true))>"Log in / Register"</Button>
                    }
                    .into_view(),
                }}
            </section>

            <AuthModal
                open=show_auth
                on_close=Callback::new(move |_| set_show_auth.set(false))
                on_authenticated=Callback::new(move |user| {
                    session.user.set(Some(user));
                    set_show_auth.set(false);
                })
            />
        </div>
    }
}
