//! Image that may need an authorized fetch
//!
//! Each mounted `SecureImage` owns one [`ResourceSlot`]. Unmounting closes the
//! slot, which revokes the current object URL and turns any fetch still in
//! flight into a no-op.

use leptos::*;
use std::cell::RefCell;
use std::rc::Rc;

use crate::config::config;
use crate::resource::{browser_loader, request, LoadState, ResourceReference, ResourceSlot, SecureResourceLoader};

/// Loader shared through context, or a fresh browser loader
fn shared_loader() -> Rc<SecureResourceLoader> {
    use_context::<Rc<SecureResourceLoader>>().unwrap_or_else(|| Rc::new(browser_loader(config())))
}

#[component]
pub fn SecureImage(
    /// Filename, API path, `blob:`/`data:` URL, or public URL
    #[prop(into)]
    source: MaybeSignal<Option<String>>,
    #[prop(into)]
    alt: String,
    #[prop(optional, into)]
    class: String,
) -> impl IntoView {
    let loader = shared_loader();
    let slot = Rc::new(RefCell::new(ResourceSlot::new(loader.object_urls())));
    let (state, set_state) = create_signal(LoadState::Idle);

    {
        let slot = Rc::clone(&slot);
        create_effect(move |_| {
            let reference = source
                .get()
                .and_then(|raw| ResourceReference::parse(&raw, config()));
            let slot = Rc::clone(&slot);
            let loader = Rc::clone(&loader);

            spawn_local(async move {
                request(&slot, &loader, reference.as_ref(), |next| {
                    set_state.try_set(next.clone());
                })
                .await;
            });
        });
    }

    on_cleanup(move || slot.borrow_mut().close());

    view! {
        <div class=format!("secure-image {}", class)>
            {move || match state.get() {
                LoadState::Loaded(source) => view! {
                    <img src=source.src().to_string() alt=alt.clone()/>
                }
                .into_view(),
                LoadState::Loading => view! {
                    <div class="image-placeholder">
                        <div class="spinner"></div>
                        <span>"Loading image..."</span>
                    </div>
                }
                .into_view(),
                LoadState::Failed(_) => view! {
                    <div class="image-placeholder image-failed">"Image unavailable"</div>
                }
                .into_view(),
                LoadState::Idle => view! {
                    <div class="image-placeholder image-empty">"No image"</div>
                }
                .into_view(),
            }}
        </div>
    }
}
