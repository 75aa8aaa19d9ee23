use dioxus::prelude::*;

use crate::{
    components::tokens::{
        Align, HEADING_PROPERTIES, HEADING_TOKENS, TEXT_PROPERTIES, TEXT_TOKENS, heading_classes,
        heading_level, names, text_classes,
    },
    dev::{DebugPanel, hooks::capture_scope, use_resolved_tokens},
};

#[derive(Clone, PartialEq, Props)]
pub struct HeadingProps {
    #[props(default = 2)]
    level: u8,
    // visual size when it differs from the level, e.g. "hero"
    size: Option<String>,
    #[props(default)]
    align: Align,
    #[props(default)]
    no_margin: bool,
    #[props(default)]
    debug: bool,
    class: Option<String>,
    children: Element,
}

#[component]
pub fn Heading(props: HeadingProps) -> Element {
    let scope = use_signal(|| None::<web_sys::Element>);

    let classes = heading_classes(
        props.level,
        props.size.as_deref(),
        props.align,
        props.no_margin,
        props.class.as_deref(),
    );

    let data = use_resolved_tokens(
        names(&HEADING_TOKENS),
        names(&HEADING_PROPERTIES),
        scope,
        props.debug,
    );

    let panel = rsx! {
        if props.debug {
            DebugPanel { classes: Some(classes.clone()), data: data() }
        }
    };
    let mounted = move |evt| capture_scope(scope, evt);

    // rsx has no dynamic tag names
    match heading_level(props.level) {
        1 => rsx! { h1 { class: "{classes}", onmounted: mounted, {panel} {props.children} } },
        2 => rsx! { h2 { class: "{classes}", onmounted: mounted, {panel} {props.children} } },
        3 => rsx! { h3 { class: "{classes}", onmounted: mounted, {panel} {props.children} } },
        4 => rsx! { h4 { class: "{classes}", onmounted: mounted, {panel} {props.children} } },
        5 => rsx! { h5 { class: "{classes}", onmounted: mounted, {panel} {props.children} } },
        _ => rsx! { h6 { class: "{classes}", onmounted: mounted, {panel} {props.children} } },
    }
}

#[derive(Clone, PartialEq, Props)]
pub struct TextProps {
    #[props(default = "base".to_owned())]
    size: String,
    #[props(default)]
    align: Align,
    #[props(default)]
    no_margin: bool,
    #[props(default)]
    debug: bool,
    class: Option<String>,
    children: Element,
}

#[component]
pub fn Text(props: TextProps) -> Element {
    let scope = use_signal(|| None::<web_sys::Element>);

    let classes = text_classes(
        &props.size,
        props.align,
        props.no_margin,
        props.class.as_deref(),
    );

    let data = use_resolved_tokens(
        names(&TEXT_TOKENS),
        names(&TEXT_PROPERTIES),
        scope,
        props.debug,
    );

    rsx! {
        p { class: "{classes}", onmounted: move |evt| capture_scope(scope, evt),
            if props.debug {
                DebugPanel { classes: Some(classes.clone()), data: data() }
            }
            {props.children}
        }
    }
}
