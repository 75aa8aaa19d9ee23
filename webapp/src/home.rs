use dioxus::prelude::*;

use crate::components::{
    Button, Card, Heading, Input, Section, Text,
    tokens::{Align, Size, Tone, Variant},
};

struct Space {
    name: &'static str,
    capacity: &'static str,
    blurb: &'static str,
}

const SPACES: [Space; 3] = [
    Space {
        name: "The Barn",
        capacity: "Up to 250 guests",
        blurb: "Restored timber frame with string lights and a river-facing loft.",
    },
    Space {
        name: "Vineyard Lawn",
        capacity: "Up to 180 guests",
        blurb: "Ceremony site between the rows, with the bluffs behind the arbor.",
    },
    Space {
        name: "Cellar Room",
        capacity: "Up to 60 guests",
        blurb: "Stone walls and long tables for rehearsal dinners and small receptions.",
    },
];

#[component]
fn Hero() -> Element {
    rsx! {
        Section { size: Size::Lg, tone: Tone::Brand, center: true, class: "hero",
            Heading { level: 1, size: "hero", align: Align::Center, "Rum River Barn & Vineyard" }
            Text { size: "lg", align: Align::Center,
                "A working vineyard on the Rum River, an hour north of the Cities."
            }
            div { class: "hero-actions",
                Button { tone: Tone::Accent, size: Size::Lg, "Schedule a tour" }
                Button { tone: Tone::Neutral, variant: Variant::Outline, size: Size::Lg, "See the spaces" }
            }
        }
    }
}

#[component]
fn Spaces() -> Element {
    rsx! {
        Section { size: Size::Md, tone: Tone::Neutral, id: "spaces",
            Heading { level: 2, align: Align::Center, "Our spaces" }
            div { class: "spaces-grid",
                for space in SPACES.iter() {
                    Card {
                        key: "{space.name}",
                        interactive: true,
                        elevation: 2,
                        title: space.name.to_owned(),
                        footer: rsx! {
                            Text { size: "sm", no_margin: true, "{space.capacity}" }
                        },
                        Text { "{space.blurb}" }
                    }
                }
            }
        }
    }
}

// the form only collects input; submitting it is someone else's problem
#[component]
fn TourForm() -> Element {
    rsx! {
        Section { size: Size::Md, tone: Tone::Muted, id: "tour",
            Heading { level: 2, align: Align::Center, "Schedule a tour" }
            form { class: "tour-form", onsubmit: move |evt| evt.prevent_default(),
                label {
                    "Name"
                    Input { name: "name", required: true, placeholder: "Your name" }
                }
                label {
                    "Email"
                    Input { name: "email", kind: "email", required: true, placeholder: "you@example.com" }
                }
                label {
                    "Preferred date"
                    Input { name: "date", kind: "date" }
                }
                Button { block: true, "Request a tour" }
            }
        }
    }
}

#[component]
pub fn Home() -> Element {
    rsx! {
        Hero {}
        Spaces {}
        TourForm {}
    }
}
