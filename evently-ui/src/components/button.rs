//! Button primitive

use leptos::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Danger,
    Ghost,
}

impl ButtonVariant {
    pub fn class(&self) -> &'static str {
        match self {
            ButtonVariant::Primary => "btn btn-primary",
            ButtonVariant::Secondary => "btn btn-secondary",
            ButtonVariant::Danger => "btn btn-danger",
            ButtonVariant::Ghost => "btn btn-ghost",
        }
    }
}

#[component]
pub fn Button(
    #[prop(optional)]
    variant: ButtonVariant,
    /// HTML button type
    #[prop(default = "button")]
    button_type: &'static str,
    #[prop(optional, into)]
    disabled: MaybeSignal<bool>,
    /// Shows a spinner and blocks clicks
    #[prop(optional, into)]
    loading: MaybeSignal<bool>,
    #[prop(optional)]
    on_click: Option<Callback<ev::MouseEvent>>,
    children: Children,
) -> impl IntoView {
    let disabled = Signal::derive(move || disabled.get());
    let loading = Signal::derive(move || loading.get());

    view! {
        <button
            type=button_type
            class=variant.class()
            class:is-loading=move || loading.get()
            disabled=move || disabled.get() || loading.get()
            on:click=move |ev| {
                if let Some(on_click) = on_click {
                    on_click.call(ev);
                }
            }
        >
            <Show when=move || loading.get()>
                <span class="btn-spinner"></span>
            </Show>
            {children()}
        </button>
    }
}
