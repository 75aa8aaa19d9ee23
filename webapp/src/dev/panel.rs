use dioxus::prelude::*;

use tokens::ResolvedSnapshot;

pub const LOADING: &str = "Loading token values…";

// the overlay only ever shows one of two things
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelState {
    Loading,
    Ready,
}

impl PanelState {
    pub fn of(data: &Option<ResolvedSnapshot>) -> Self {
        match data {
            Some(_) => PanelState::Ready,
            None => PanelState::Loading,
        }
    }
}

// text of the values block: one `"name": value` line per entry, in snapshot order.  a snapshot
// with nothing in it still reads as an (empty) object rather than a blank block
pub fn panel_body(data: &Option<ResolvedSnapshot>) -> String {
    match data {
        Some(snapshot) if snapshot.is_empty() => "{}".to_owned(),
        Some(snapshot) => snapshot.to_lines().join("\n"),
        None => LOADING.to_owned(),
    }
}

// classes worth showing; an empty class string is treated like no classes at all
pub fn panel_classes(classes: Option<String>) -> Option<String> {
    classes.filter(|c| !c.trim().is_empty())
}

#[derive(Clone, PartialEq, Props)]
pub struct DebugPanelProps {
    classes: Option<String>,
    data: Option<ResolvedSnapshot>,
}

// DebugPanel
//
// purely presentational.  it renders directly before the owning component's content and has
// no state or handlers of its own
#[component]
pub fn DebugPanel(props: DebugPanelProps) -> Element {
    let classes = panel_classes(props.classes);
    let body = panel_body(&props.data);

    let values_class = match PanelState::of(&props.data) {
        PanelState::Ready => "debug-panel__values",
        PanelState::Loading => "debug-panel__values debug-panel__loading",
    };

    rsx! {
        div { class: "debug-panel", role: "note",
            if let Some(classes) = classes {
                div { class: "debug-panel__label", "classes" }
                pre { class: "debug-panel__classes", "{classes}" }
            }
            div { class: "debug-panel__label", "tokens" }
            pre { class: values_class, "{body}" }
        }
    }
}
