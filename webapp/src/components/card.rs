use dioxus::prelude::*;

use crate::{
    common::class_list,
    components::tokens::{Align, CardLook, Size, Tone},
    dev::{DebugPanel, hooks::capture_scope, use_resolved_tokens},
};

#[derive(Clone, PartialEq, Props)]
pub struct CardProps {
    #[props(default = Tone::Neutral)]
    tone: Tone,
    #[props(default = 1)]
    elevation: u8,
    #[props(default)]
    radius: Size,
    #[props(default)]
    padding: Size,
    #[props(default)]
    align: Align,
    #[props(default)]
    interactive: bool,
    #[props(default)]
    debug: bool,
    title: Option<String>,
    header: Option<Element>,
    footer: Option<Element>,
    class: Option<String>,
    body_class: Option<String>,
    children: Element,
}

// Card
//
// a surface with optional header and footer slots; padding only applies to the body
#[component]
pub fn Card(props: CardProps) -> Element {
    let scope = use_signal(|| None::<web_sys::Element>);

    let look = CardLook {
        tone: props.tone,
        elevation: props.elevation,
        radius: props.radius,
        padding: props.padding,
    };
    let classes = look.classes(props.align, props.interactive, props.class.as_deref());
    let body_class = class_list([Some("card__body"), props.body_class.as_deref()]);

    let data = use_resolved_tokens(look.tokens(), look.properties(), scope, props.debug);

    rsx! {
        div { class: "{classes}", onmounted: move |evt| capture_scope(scope, evt),
            if props.debug {
                DebugPanel { classes: Some(classes.clone()), data: data() }
            }
            {props.header.map(|header| rsx! {
                div { class: "card__header", {header} }
            })}
            div { class: "{body_class}",
                {props.title.map(|title| rsx! {
                    h3 { class: "typo-heading h-4", "{title}" }
                })}
                {props.children}
            }
            {props.footer.map(|footer| rsx! {
                div { class: "card__footer", {footer} }
            })}
        }
    }
}
