use std::rc::Rc;

use serde::Serialize;
use tracing::{debug, info};

use tokens::{
    ResolutionRequest, ResolvedSnapshot, THEME_ATTRIBUTE, Theme, TokenResolver,
    config::{LightMode, ProbeConfig, ScopeConfig},
    document::{Document, ElementId},
    stylesheet::StyleSheet,
};

#[derive(Debug, Serialize)]
pub struct ThemeSnapshot {
    pub theme: Theme,
    pub values: ResolvedSnapshot,
}

// a page shell with <html><body><scope/></body></html>
//
// frames run immediately since there is no stylesheet loading to wait for here
fn build_document(sheet: StyleSheet, scope: Option<&ScopeConfig>) -> (Rc<Document>, Option<ElementId>) {
    let doc = Rc::new(Document::with_immediate_frames(sheet));
    let body = doc.create_element(doc.root(), "body");

    let scope = scope.map(|config| {
        let el = doc.create_element(body, &config.tag);
        for class in &config.classes {
            doc.add_class(el, class);
        }
        for (name, value) in &config.style {
            doc.set_style_property(el, name, value);
        }
        el
    });

    (doc, scope)
}

fn apply_theme(doc: &Document, theme: Theme, light_mode: LightMode) {
    match (theme, light_mode) {
        (Theme::Light, LightMode::Absent) => doc.remove_attribute(doc.root(), THEME_ATTRIBUTE),
        _ => doc.set_attribute(doc.root(), THEME_ATTRIBUTE, theme.as_attribute()),
    }
}

// resolve one request under each theme in turn
//
// this goes through the same resolver the site uses: one activation, then a theme toggle per
// entry, with the observer doing the re-reads
pub fn probe(
    sheet: StyleSheet,
    config: &ProbeConfig,
    request: ResolutionRequest<ElementId>,
) -> Vec<ThemeSnapshot> {
    let (doc, scope) = build_document(sheet, config.scope.as_ref());

    let resolver = TokenResolver::new(doc.clone(), |_| {});
    resolver.resolve(request.with_scope(scope));

    config
        .themes
        .iter()
        .map(|&theme| {
            apply_theme(&doc, theme, config.light_mode);
            let values = resolver.snapshot().unwrap_or_default();

            debug!(%theme, entries = values.len(), "resolved theme");
            ThemeSnapshot { theme, values }
        })
        .collect()
}

pub fn resolve(sheet: StyleSheet, config: &ProbeConfig) -> Vec<ThemeSnapshot> {
    let request = ResolutionRequest::new(config.tokens.clone(), config.properties.clone());
    probe(sheet, config, request)
}

// every declared custom property starting with one of the prefixes (all of them when there
// are no prefixes), read off the root
pub fn audit(sheet: StyleSheet, config: &ProbeConfig, prefixes: &[String]) -> Vec<ThemeSnapshot> {
    let names: Vec<String> = sheet
        .custom_property_names()
        .into_iter()
        .filter(|name| prefixes.is_empty() || prefixes.iter().any(|p| name.starts_with(p.as_str())))
        .map(str::to_owned)
        .collect();

    info!(tokens = names.len(), "auditing declared tokens");

    let config = ProbeConfig {
        scope: None,
        ..config.clone()
    };
    probe(sheet, &config, ResolutionRequest::new(names, Vec::<String>::new()))
}

pub fn render_text(snapshots: &[ThemeSnapshot]) -> String {
    let width = snapshots
        .iter()
        .flat_map(|s| s.values.keys())
        .map(str::len)
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for snapshot in snapshots {
        out.push_str(&format!("[{}]\n", snapshot.theme));
        for (name, value) in snapshot.values.iter() {
            out.push_str(&format!("  {name:<width$}  {value}\n"));
        }
    }
    out
}
