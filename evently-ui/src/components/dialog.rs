//! Modal dialog primitive
//!
//! Children are mounted only while the dialog is open, so anything they own
//! is cleaned up when it closes.

use leptos::*;

#[component]
pub fn Dialog(
    #[prop(into)]
    open: Signal<bool>,
    on_close: Callback<()>,
    #[prop(into)]
    title: MaybeSignal<String>,
    /// Extra class on the dialog panel
    #[prop(optional, into)]
    class: String,
    children: ChildrenFn,
) -> impl IntoView {
    let panel_class = format!("modal {}", class);

    view! {
        <Show when=move || open.get()>
            <div class="modal-backdrop" on:click=move |_| on_close.call(())>
                <div
                    class=panel_class.clone()
                    role="dialog"
                    aria-modal="true"
                    on:click=|ev: ev::MouseEvent| ev.stop_propagation()
                >
                    <div class="modal-header">
                        <h2>{
                            let title = title.clone();
                            move || title.get()
                        }</h2>
                        <button class="modal-close" aria-label="Close" on:click=move |_| on_close.call(())>
                            "✕"
                        </button>
                    </div>
                    <div class="modal-body">{children()}</div>
                </div>
            </div>
        </Show>
    }
}
