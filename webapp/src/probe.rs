use dioxus::prelude::*;

use crate::{
    common::theme::THEME,
    dev::{panel::LOADING, use_resolved_tokens},
};

const PROBE_TOKENS: [&str; 8] = [
    "--bg",
    "--fg",
    "--surface",
    "--on-surface",
    "--brand",
    "--on-brand",
    "--border",
    "--focus-ring",
];

// colors get a swatch, everything else is just text
fn is_color(value: &str) -> bool {
    value.starts_with('#') || value.starts_with("rgb") || value.starts_with("hsl")
}

// TokenProbe
//
// reads the role tokens off the document root, so there is never a scope to wait for
#[component]
pub fn TokenProbe() -> Element {
    let scope = use_signal(|| None::<web_sys::Element>);

    let data = use_resolved_tokens(
        PROBE_TOKENS.iter().map(|n| (*n).to_owned()).collect(),
        Vec::new(),
        scope,
        true,
    );

    let rows = data().map(|snapshot| {
        snapshot
            .iter()
            .map(|(name, value)| (name.to_owned(), value.to_owned()))
            .collect::<Vec<_>>()
    });

    let theme = THEME.read().to_string();

    rsx! {
        section { class: "section section--md",
            div { class: "section__inner",
                h2 { class: "typo-heading h-2", "Token probe" }
                p { class: "typo-text t-base",
                    "Current theme: "
                    code { "{theme}" }
                }

                {match rows {
                    None => rsx! {
                        p { class: "typo-text t-sm", "{LOADING}" }
                    },
                    Some(rows) => rsx! {
                        table { class: "probe-table",
                            tbody {
                                for (name, value) in rows {
                                    tr { key: "{name}",
                                        td { code { "{name}" } }
                                        td { code { "{value}" } }
                                        td {
                                            if is_color(&value) {
                                                div { class: "probe-swatch", background_color: "{value}" }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    },
                }}
            }
        }
    }
}
