use dioxus::prelude::*;

use crate::{
    components::tokens::{SECTION_PROPERTIES, Size, Tone, names, section_classes, section_tokens},
    dev::{DebugPanel, hooks::capture_scope, use_resolved_tokens},
};

#[derive(Clone, PartialEq, Props)]
pub struct SectionProps {
    #[props(default)]
    size: Size,
    #[props(default = Tone::Neutral)]
    tone: Tone,
    #[props(default)]
    center: bool,
    #[props(default)]
    debug: bool,
    id: Option<String>,
    class: Option<String>,
    children: Element,
}

#[component]
pub fn Section(props: SectionProps) -> Element {
    let scope = use_signal(|| None::<web_sys::Element>);

    let classes = section_classes(props.size, props.tone, props.center, props.class.as_deref());
    let id = props.id.clone().unwrap_or_default();

    let data = use_resolved_tokens(
        section_tokens(props.tone),
        names(&SECTION_PROPERTIES),
        scope,
        props.debug,
    );

    rsx! {
        section {
            id: "{id}",
            class: "{classes}",
            onmounted: move |evt| capture_scope(scope, evt),
            if props.debug {
                DebugPanel { classes: Some(classes.clone()), data: data() }
            }
            div { class: "section__inner", {props.children} }
        }
    }
}
