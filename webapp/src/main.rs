#![allow(non_snake_case)]
use dioxus::prelude::*;
use dioxus_router::prelude::*;

use tracing::Level;

mod common;

mod components;
use components::navigation::NavBar;

mod dev;

mod home;
use home::Home;

mod demo;
use demo::DebugDemo;

mod probe;
use probe::TokenProbe;

fn main() {
    dioxus_logger::init(Level::DEBUG).expect("failed to init logger");
    launch(App);
}

#[derive(Clone, PartialEq, Routable)]
#[rustfmt::skip]
enum Route {
    #[layout(NavBar)]
        #[route("/")]
        Home {},
        #[route("/debug")]
        DebugDemo {},
        #[route("/probe")]
        TokenProbe {},
}

#[component]
pub fn App() -> Element {
    // the persisted theme has to land on <html> before any resolver takes its first read
    use_hook(common::theme::restore_theme);

    rsx! {
        style { "{common::style::SITE_STYLES}" }
        Router::<Route> { config: RouterConfig::default }
    }
}
