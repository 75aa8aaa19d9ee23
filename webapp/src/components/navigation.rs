use dioxus::prelude::*;
use dioxus_router::prelude::*;

use tokens::Theme;

use crate::{
    Route,
    common::theme::{THEME, toggle_theme},
};

#[derive(Clone, PartialEq, Props)]
struct NavBarButtonProps {
    name: String,
    target: Route,
}

#[component]
fn NavBarButton(props: NavBarButtonProps) -> Element {
    let name = props.name;
    let target = props.target;

    let current_path: Route = use_route();
    rsx! {
        Link {
            class: if current_path == target { "nav-link active" } else { "nav-link" },
            to: target,
            "{name}"
        }
    }
}

// the only control that ever touches data-theme
#[component]
fn ThemeToggle() -> Element {
    let label = match *THEME.read() {
        Theme::Light => "Dark mode",
        Theme::Dark => "Light mode",
    };

    rsx! {
        button {
            class: "btn btn-sm btn-outline theme-toggle",
            r#type: "button",
            onclick: move |_| toggle_theme(),
            "{label}"
        }
    }
}

#[component]
fn NavBarInner() -> Element {
    rsx! {
        header { class: "app-header",
            div { class: "nav-container",
                div { class: "logo",
                    Link { to: Route::Home {}, "Rum River Barn" }
                }

                nav { class: "nav-links",
                    NavBarButton { name: "Home".to_owned(), target: Route::Home {} }
                    NavBarButton {
                        name: "Debug overlay".to_owned(),
                        target: Route::DebugDemo {},
                    }
                    NavBarButton {
                        name: "Token probe".to_owned(),
                        target: Route::TokenProbe {},
                    }
                    ThemeToggle {}
                }
            }
        }
    }
}

#[component]
pub fn NavBar() -> Element {
    rsx! {
        NavBarInner {}
        Outlet::<Route> {}
        footer { class: "site-footer", "Rum River Barn & Vineyard" }
    }
}
