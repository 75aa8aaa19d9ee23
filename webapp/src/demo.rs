use dioxus::prelude::*;

use tokens::Theme;

use crate::components::{
    Button, Card, Heading, Input, Section, Text,
    tokens::{Size, Tone, Variant},
};

// every primitive with its overlay switched on
//
// the wrapper card sits under its own data-theme so the nested themed ancestor path gets
// exercised as well as the root
#[component]
pub fn DebugDemo() -> Element {
    let mut debug = use_signal(|| true);
    let mut wrapper_theme = use_signal(|| Theme::Dark);

    let debug_label = if debug() { "Hide overlays" } else { "Show overlays" };
    let flipped = wrapper_theme().toggle();

    rsx! {
        Section { size: Size::Md, tone: Tone::Neutral, debug: debug(),
            Heading { level: 2, debug: debug(), "Debug overlay" }
            Text { debug: debug(),
                "Each primitive shows its classes and resolved tokens. Toggle the theme in the header and the values follow."
            }

            div { class: "demo-row",
                Button { variant: Variant::Outline, onclick: move |_| debug.toggle(), "{debug_label}" }
            }

            div { class: "demo-row",
                Button { debug: debug(), "Solid" }
                Button { tone: Tone::Accent, variant: Variant::Outline, debug: debug(), "Outline" }
                Button { tone: Tone::Neutral, variant: Variant::Link, size: Size::Sm, debug: debug(), "Link" }
                Button { loading: true, debug: debug(), "Loading" }
            }

            div { class: "demo-grid",
                Card { tone: Tone::Neutral, debug: debug(), title: "Neutral card".to_owned(),
                    Text { "Surface tokens." }
                }
                Card {
                    tone: Tone::Brand,
                    elevation: 3,
                    radius: Size::Lg,
                    padding: Size::Lg,
                    debug: debug(),
                    title: "Brand card".to_owned(),
                    Text { "Brand tokens, large radius and padding." }
                }
                div { "data-theme": wrapper_theme().as_attribute(),
                    Card {
                        tone: Tone::Muted,
                        debug: debug(),
                        title: "Themed wrapper".to_owned(),
                        footer: rsx! {
                            Button {
                                size: Size::Sm,
                                onclick: move |_| wrapper_theme.set(flipped),
                                "Flip wrapper to {flipped}"
                            }
                        },
                        Text { "This card reads its tokens under a wrapper with its own theme." }
                    }
                }
            }

            div { class: "tour-form",
                Input { name: "probe", placeholder: "Focus me", debug: debug() }
            }
        }
    }
}
