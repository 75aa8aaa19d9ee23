use dioxus::prelude::*;

use crate::{
    common::class_list,
    components::tokens::{INPUT_PROPERTIES, INPUT_TOKENS, names},
    dev::{DebugPanel, hooks::capture_scope, use_resolved_tokens},
};

#[derive(Clone, PartialEq, Props)]
pub struct InputProps {
    name: String,
    id: Option<String>,
    // the html input type
    #[props(default = "text".to_owned())]
    kind: String,
    #[props(default)]
    required: bool,
    #[props(default)]
    disabled: bool,
    #[props(default)]
    invalid: bool,
    placeholder: Option<String>,
    #[props(default)]
    debug: bool,
    class: Option<String>,
    oninput: Option<EventHandler<FormEvent>>,
}

// Input
//
// inputs are void elements, so the overlay sits just before the control instead of inside it
#[component]
pub fn Input(props: InputProps) -> Element {
    let scope = use_signal(|| None::<web_sys::Element>);

    let classes = class_list([Some("form-control"), props.class.as_deref()]);
    let id = props.id.clone().unwrap_or_else(|| props.name.clone());
    let placeholder = props.placeholder.clone().unwrap_or_default();

    let data = use_resolved_tokens(
        names(&INPUT_TOKENS),
        names(&INPUT_PROPERTIES),
        scope,
        props.debug,
    );

    let oninput = props.oninput;
    rsx! {
        if props.debug {
            DebugPanel { classes: Some(classes.clone()), data: data() }
        }
        input {
            id: "{id}",
            name: "{props.name}",
            r#type: "{props.kind}",
            class: "{classes}",
            required: props.required,
            disabled: props.disabled,
            placeholder: "{placeholder}",
            aria_invalid: if props.invalid { "true" } else { "false" },
            onmounted: move |evt| capture_scope(scope, evt),
            oninput: move |evt| {
                if let Some(handler) = oninput {
                    handler.call(evt);
                }
            },
        }
    }
}
