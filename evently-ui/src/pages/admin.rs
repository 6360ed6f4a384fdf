//! Admin panel
//!
//! Lists registrations and opens the details dialog for review.

use evently_common::{Registrant, RegistrationStatus};
use leptos::*;

use crate::api;
use crate::components::{Button, ButtonVariant, UserDetailsModal};
use crate::error::{ApiError, ErrorAlert};
use crate::Session;

fn status_class(status: RegistrationStatus) -> &'static str {
    match status {
        RegistrationStatus::Pending => "badge badge-warning",
        RegistrationStatus::Approved => "badge badge-success",
        RegistrationStatus::Rejected => "badge badge-danger",
    }
}

#[component]
pub fn AdminPanel() -> impl IntoView {
    let session = expect_context::<Session>();
    let (registrants, set_registrants) = create_signal(Vec::<Registrant>::new());
    let (loading, set_loading) = create_signal(true);
    let (error, set_error) = create_signal(None::<ApiError>);
    let (search_term, set_search_term) = create_signal(String::new());
    let (selected, set_selected) = create_signal(None::<Registrant>);
    let (reload, set_reload) = create_signal(0u32);

    // Load registrations on mount and on retry
    create_effect(move |_| {
        let _ = reload.get();
        spawn_local(async move {
            set_loading.set(true);
            set_error.set(None);

            match api::get_registrations().await {
                Ok(data) => set_registrants.set(data),
                Err(e) => {
                    logging::error!("Failed to load registrations: {}", e);
                    set_error.set(Some(e));
                }
            }

            set_loading.set(false);
        });
    });

    let filtered = move || {
        let search = search_term.get();
        registrants
            .get()
            .into_iter()
            .filter(|r| r.matches(&search))
            .collect::<Vec<_>>()
    };

    let on_updated = Callback::new(move |updated: Registrant| {
        set_registrants.update(|list| {
            if let Some(slot) = list.iter_mut().find(|r| r.id == updated.id) {
                *slot = updated.clone();
            }
        });
        set_selected.set(Some(updated));
    });

    view! {
        <div class="admin-page">
            <div class="page-header">
                <h1>"Registrations"</h1>
                <input
                    type="search"
                    class="search-input"
                    placeholder="Search by name, email or organization"
                    on:input=move |ev| set_search_term.set(event_target_value(&ev))
                    prop:value=search_term
                />
            </div>

            <Show when=move || session.user.with(|u| u.as_ref().map(|u| !u.is_admin()).unwrap_or(false))>
                <div class="alert alert-warning">"Signed in without admin rights; the server may refuse these requests."</div>
            </Show>

            {move || error.get().map(|e| view! {
                <ErrorAlert error=e on_retry=Callback::new(move |_| set_reload.update(|n| *n += 1))/>
            })}

            <Show
                when=move || !loading.get()
                fallback=|| view! { <div class="loading">"Loading registrations..."</div> }
            >
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"Email"</th>
                            <th>"Event"</th>
                            <th>"Status"</th>
                            <th>"Payment"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=filtered
                            key=|r| (r.id.clone(), r.status, r.payment_status)
                            children=move |r: Registrant| {
                                let row = r.clone();
                                view! {
                                    <tr>
                                        <td>{r.name}</td>
                                        <td>{r.email}</td>
                                        <td>{r.event}</td>
                                        <td><span class=status_class(r.status)>{r.status.to_string()}</span></td>
                                        <td>{r.payment_status.to_string()}</td>
                                        <td>
                                            <Button
                                                variant=ButtonVariant::Secondary
                                                on_click=Callback::new(move |_| set_selected.set(Some(row.clone())))
                                            >
                                                "View"
                                            </Button>
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </Show>

            <UserDetailsModal
                registrant=selected
                on_close=Callback::new(move |_| set_selected.set(None))
                on_updated=on_updated
            />
        </div>
    }
}
