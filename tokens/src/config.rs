use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio;
use toml;
use tracing::{Level, debug, instrument};

use crate::{stylesheet::StyleSheet, theme::Theme};

// tokenprobe configuration
//
// which stylesheets to load, which names to read back, under which themes, and what the
// element being inspected looks like
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ProbeConfig {
    // css files, cascaded in the order given
    pub stylesheets: Vec<PathBuf>,

    // custom properties to resolve
    #[serde(default)]
    pub tokens: Vec<String>,

    // computed properties to resolve
    #[serde(default)]
    pub properties: Vec<String>,

    // themes to resolve under, in output order
    #[serde(default = "default_themes")]
    pub themes: Vec<Theme>,

    // the inspected element, nested directly under <body>.  when absent, names are read off
    // the document root
    pub scope: Option<ScopeConfig>,

    // how light mode is expressed on the root
    #[serde(default)]
    pub light_mode: LightMode,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ScopeConfig {
    #[serde(default = "default_tag")]
    pub tag: String,

    #[serde(default)]
    pub classes: Vec<String>,

    // inline custom properties, as a component would set through its style prop
    #[serde(default)]
    pub style: Vec<(String, String)>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LightMode {
    // light is the absence of the attribute, which is what the site's toggle does
    #[default]
    Absent,
    // light is data-theme="light"
    Explicit,
}

fn default_themes() -> Vec<Theme> {
    Theme::all()
}

fn default_tag() -> String {
    String::from("div")
}

// in order to extract the config table from a larger document, we need to specify it
// as a subtable of the root node, i.e. a substruct
#[derive(Debug, Deserialize, Serialize)]
struct TomlConfigFile {
    config: ProbeConfig,
}

pub fn parse_config(doc: &str) -> Result<ProbeConfig> {
    let data: TomlConfigFile = toml::from_str(doc).context("failed to parse config file")?;
    Ok(data.config)
}

#[instrument(level=Level::DEBUG)]
pub async fn read_config(filename: PathBuf) -> Result<Arc<ProbeConfig>> {
    debug!("reading config file");

    let doc = tokio::fs::read_to_string(&filename)
        .await
        .with_context(|| format!("failed to read config file {}", filename.display()))?;

    let config = parse_config(&doc)?;

    debug!("successfully parsed config file");
    Ok(Arc::new(config))
}

// read and cascade every configured stylesheet, relative paths taken from the config's dir
pub async fn read_stylesheets(
    config: &ProbeConfig,
    base: &Path,
) -> Result<StyleSheet> {
    let mut sheet = StyleSheet::default();

    for path in &config.stylesheets {
        let path = base.join(path);
        let css = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("failed to read stylesheet {}", path.display()))?;

        let parsed = StyleSheet::parse(&css)
            .with_context(|| format!("failed to parse stylesheet {}", path.display()))?;
        sheet.extend(parsed);
    }

    Ok(sheet)
}
