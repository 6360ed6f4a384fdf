//! Tab list with a single mounted panel

use leptos::*;
use std::rc::Rc;

#[derive(Clone)]
pub struct Tab {
    pub id: &'static str,
    pub label: &'static str,
    content: Rc<dyn Fn() -> View>,
}

impl Tab {
    pub fn new<F, V>(id: &'static str, label: &'static str, content: F) -> Self
    where
        F: Fn() -> V + 'static,
        V: IntoView,
    {
        Self {
            id,
            label,
            content: Rc::new(move || content().into_view()),
        }
    }
}

/// Falls back to the first tab when `requested` is unknown
fn initial_tab(tabs: &[Tab], requested: Option<&'static str>) -> &'static str {
    requested
        .filter(|id| tabs.iter().any(|tab| tab.id == *id))
        .or_else(|| tabs.first().map(|tab| tab.id))
        .unwrap_or_default()
}

#[component]
pub fn Tabs(
    tabs: Vec<Tab>,
    #[prop(optional)]
    initial: Option<&'static str>,
) -> impl IntoView {
    let (active, set_active) = create_signal(initial_tab(&tabs, initial));

    let headers = tabs
        .iter()
        .map(|tab| {
            let id = tab.id;
            view! {
                <button
                    class="tab-button"
                    class:active=move || active.get() == id
                    role="tab"
                    aria-selected=move || (active.get() == id).to_string()
                    on:click=move |_| set_active.set(id)
                >
                    {tab.label}
                </button>
            }
        })
        .collect_view();

    view! {
        <div class="tabs">
            <div class="tab-list" role="tablist">{headers}</div>
            <div class="tab-panel" role="tabpanel">
                {move || {
                    let id = active.get();
                    tabs.iter().find(|tab| tab.id == id).map(|tab| (tab.content)())
                }}
            </div>
        </div>
    }
}
