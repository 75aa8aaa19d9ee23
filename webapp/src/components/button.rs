use dioxus::prelude::*;

use crate::{
    components::tokens::{
        BUTTON_PROPERTIES, BUTTON_TOKENS, Size, Tone, Variant, button_classes, button_style, names,
    },
    dev::{DebugPanel, hooks::capture_scope, use_resolved_tokens},
};

#[derive(Clone, PartialEq, Props)]
pub struct ButtonProps {
    #[props(default)]
    tone: Tone,
    #[props(default)]
    variant: Variant,
    #[props(default)]
    size: Size,
    #[props(default)]
    block: bool,
    #[props(default)]
    disabled: bool,
    #[props(default)]
    loading: bool,
    #[props(default)]
    debug: bool,
    class: Option<String>,
    onclick: Option<EventHandler<MouseEvent>>,
    children: Element,
}

// Button
//
// tone and variant never reach css as colors, only as the --btn-* custom properties pointing
// at role tokens
#[component]
pub fn Button(props: ButtonProps) -> Element {
    let scope = use_signal(|| None::<web_sys::Element>);

    let classes = button_classes(
        props.variant,
        props.size,
        props.loading,
        props.block,
        props.class.as_deref(),
    );
    let style = button_style(props.tone, props.variant);

    let data = use_resolved_tokens(
        names(&BUTTON_TOKENS),
        names(&BUTTON_PROPERTIES),
        scope,
        props.debug,
    );

    let onclick = props.onclick;
    rsx! {
        button {
            class: "{classes}",
            style: "{style}",
            r#type: "button",
            disabled: props.disabled || props.loading,
            aria_busy: if props.loading { "true" } else { "false" },
            onmounted: move |evt| capture_scope(scope, evt),
            onclick: move |evt| {
                if let Some(handler) = onclick {
                    handler.call(evt);
                }
            },
            if props.debug {
                DebugPanel { classes: Some(classes.clone()), data: data() }
            }
            {props.children}
        }
    }
}
