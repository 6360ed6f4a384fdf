//! Registrant details dialog for the admin panel

use evently_common::{Registrant, RegistrationStatus};
use leptos::*;

use super::{Button, ButtonVariant, Dialog, SecureImage, Tab, Tabs};
use crate::api;
use crate::error::{ApiError, ErrorAlert};

fn detail_row(label: &'static str, value: Option<String>) -> impl IntoView {
    view! {
        <div class="detail-item">
            <label>{label}</label>
            <span>{value.unwrap_or_else(|| "—".to_string())}</span>
        </div>
    }
}

fn profile_tab(registrant: Signal<Option<Registrant>>) -> Tab {
    Tab::new("profile", "Profile", move || {
        move || {
            registrant.get().map(|r| view! {
                <div class="detail-grid">
                    {detail_row("Name", Some(r.name))}
                    {detail_row("Email", Some(r.email))}
                    {detail_row("Phone", r.phone)}
                    {detail_row("Organization", r.organization)}
                </div>
            })
        }
    })
}

fn registration_tab(registrant: Signal<Option<Registrant>>) -> Tab {
    Tab::new("registration", "Registration", move || {
        move || {
            registrant.get().map(|r| view! {
                <div class="detail-grid">
                    {detail_row("Event", Some(r.event))}
                    {detail_row("Ticket", r.ticket_type)}
                    {detail_row("Status", Some(r.status.to_string()))}
                    {detail_row("Payment", Some(r.payment_status.to_string()))}
                    {detail_row("Transaction ID", r.transaction_id)}
                    {detail_row("Registered", Some(r.registered_at.format("%Y-%m-%d %H:%M UTC").to_string()))}
                </div>
            })
        }
    })
}

/// Documents are read once per registrant so status changes keep the loaded images
fn documents_tab(registrant: Signal<Option<Registrant>>) -> Tab {
    Tab::new("documents", "Documents", move || {
        let documents: Vec<(&'static str, String)> = registrant.with_untracked(|r| {
            r.as_ref()
                .map(|r| {
                    r.documents()
                        .into_iter()
                        .map(|(label, file)| (label, file.to_string()))
                        .collect()
                })
                .unwrap_or_default()
        });

        if documents.is_empty() {
            return view! { <p class="empty-state">"No documents uploaded."</p> }.into_view();
        }

        documents
            .into_iter()
            .map(|(label, file)| {
                view! {
                    <figure class="document">
                        <figcaption>{label}</figcaption>
                        <SecureImage source=Some(file) alt=label class="document-image"/>
                    </figure>
                }
            })
            .collect_view()
    })
}

/// Changes only when a different registrant is shown, so tabs and their
/// images survive status updates to the same record
fn shown_registrant_id(registrant: Signal<Option<Registrant>>) -> Memo<Option<String>> {
    create_memo(move |_| registrant.with(|r| r.as_ref().map(|r| r.id.clone())))
}

#[component]
pub fn UserDetailsModal(
    /// Registrant to show; `None` closes the dialog
    #[prop(into)]
    registrant: Signal<Option<Registrant>>,
    on_close: Callback<()>,
    /// Called with the updated record after a status change
    on_updated: Callback<Registrant>,
) -> impl IntoView {
    let open = Signal::derive(move || registrant.with(|r| r.is_some()));
    let shown_id = shown_registrant_id(registrant);
    let title = Signal::derive(move || {
        registrant.with(|r| r.as_ref().map(|r| r.name.clone()).unwrap_or_default())
    });
    let (saving, set_saving) = create_signal(false);
    let (error, set_error) = create_signal(None::<ApiError>);

    let set_status = move |status: RegistrationStatus| {
        let Some(id) = registrant.with_untracked(|r| r.as_ref().map(|r| r.id.clone())) else {
            return;
        };

        set_saving.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::update_registration_status(&id, status).await {
                Ok(updated) => on_updated.call(updated),
                Err(e) => set_error.set(Some(e)),
            }
            set_saving.set(false);
        });
    };

    view! {
        <Dialog open=open on_close=on_close title=title class="user-details-modal">
            {move || error.get().map(|e| view! {
                <ErrorAlert error=e on_dismiss=Callback::new(move |_| set_error.set(None))/>
            })}
            {move || shown_id.get().map(|_| {
                let tabs = vec![
                    profile_tab(registrant),
                    registration_tab(registrant),
                    documents_tab(registrant),
                ];
                view! { <Tabs tabs=tabs/> }
            })}
            <div class="modal-footer">
                <Button
                    variant=ButtonVariant::Danger
                    loading=saving
                    on_click=Callback::new(move |_| set_status(RegistrationStatus::Rejected))
                >
                    "Reject"
                </Button>
                <Button
                    loading=saving
                    on_click=Callback::new(move |_| set_status(RegistrationStatus::Approved))
                >
                    "Approve"
                </Button>
            </div>
        </Dialog>
    }
}
