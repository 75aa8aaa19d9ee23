use anyhow::Result;
use dioxus::prelude::*;
use gloo_storage::{LocalStorage, Storage};
use tracing::{debug, warn};

use tokens::{THEME_ATTRIBUTE, Theme};

const THEME_KEY: &str = "rumriver_theme";

// global theme signal
//
// this mirrors the data-theme attribute on <html> so that components (the toggle button,
// mostly) can render from it.  the attribute itself is what token resolvers observe
pub static THEME: GlobalSignal<Theme> = Signal::global(|| Theme::Light);

// light is expressed by removing the attribute, so stylesheets only need a dark override
fn apply_theme(theme: Theme) -> Result<()> {
    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
        .ok_or_else(|| anyhow::Error::msg("no document element to theme"))?;

    let applied = match theme {
        Theme::Light => root.remove_attribute(THEME_ATTRIBUTE),
        Theme::Dark => root.set_attribute(THEME_ATTRIBUTE, theme.as_attribute()),
    };

    applied.map_err(|err| anyhow::Error::msg(format!("failed to set {THEME_ATTRIBUTE}: {err:?}")))
}

// pick up the persisted theme at startup
pub fn restore_theme() {
    let theme = LocalStorage::get::<Theme>(THEME_KEY).unwrap_or_default();

    debug!(%theme, "restoring theme");
    if let Err(err) = apply_theme(theme) {
        warn!("{err}");
    }
    *THEME.write() = theme;
}

// the one place the theme attribute is ever mutated
pub fn toggle_theme() {
    let next = THEME.read().toggle();

    if let Err(err) = apply_theme(next) {
        warn!("{err}");
        return;
    }
    if let Err(err) = LocalStorage::set(THEME_KEY, next) {
        warn!("failed to persist theme: {err}");
    }

    debug!(theme = %next, "theme toggled");
    *THEME.write() = next;
}
