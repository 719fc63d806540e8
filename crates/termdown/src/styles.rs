//! Built-in styles and style resolution

use std::io::IsTerminal;
use std::path::Path;

use termdown_core::{StyleConfig, StyleSheet};

use crate::options::StyleSource;
use crate::{Error, Result};

const ASCII: &str = include_str!("../styles/ascii.json");
const DARK: &str = include_str!("../styles/dark.json");
const DRACULA: &str = include_str!("../styles/dracula.json");
const LIGHT: &str = include_str!("../styles/light.json");
const NOTTY: &str = include_str!("../styles/notty.json");
const PINK: &str = include_str!("../styles/pink.json");
const TOKYO_NIGHT: &str = include_str!("../styles/tokyo-night.json");

/// Names of the built-in styles
pub const BUILTIN_STYLES: &[&str] = &[
    "ascii",
    "dark",
    "dracula",
    "light",
    "notty",
    "pink",
    "tokyo-night",
];

/// JSON document of a built-in style
pub fn builtin(name: &str) -> Option<&'static str> {
    match name {
        "ascii" => Some(ASCII),
        "dark" => Some(DARK),
        "dracula" => Some(DRACULA),
        "light" => Some(LIGHT),
        "notty" => Some(NOTTY),
        "pink" => Some(PINK),
        "tokyo-night" => Some(TOKYO_NIGHT),
        _ => None,
    }
}

/// Load a built-in style as an editable sheet
pub fn builtin_sheet(name: &str) -> Option<Result<StyleSheet>> {
    builtin(name).map(|json| Ok(StyleSheet::from_json(json.as_bytes())?))
}

/// Name of the style `auto` stands for in this process
pub fn auto_style_name() -> &'static str {
    auto_style_for(std::io::stdout().is_terminal())
}

fn auto_style_for(terminal: bool) -> &'static str {
    if terminal {
        "dark"
    } else {
        "notty"
    }
}

/// Resolve a style source into a parsed document
pub fn resolve(source: &StyleSource) -> Result<StyleConfig> {
    match source {
        StyleSource::Auto => load_reference(auto_style_name()),
        StyleSource::Reference(reference) if reference == "auto" => {
            load_reference(auto_style_name())
        }
        StyleSource::Reference(reference) => load_reference(reference),
        StyleSource::Json(json) => Ok(StyleSheet::from_json(json.as_bytes())?.to_config()?),
        StyleSource::Config(config) => Ok(config.clone()),
    }
}

/// Load a built-in style by name, or a style document from a file path
pub fn load_reference(reference: &str) -> Result<StyleConfig> {
    if let Some(sheet) = builtin_sheet(reference) {
        tracing::debug!(style = reference, "using built-in style");
        return Ok(sheet?.to_config()?);
    }

    let path = Path::new(reference);
    tracing::debug!(path = %path.display(), "loading style file");
    let bytes = std::fs::read(path).map_err(|source| Error::StyleRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(StyleConfig::from_json(&bytes)?)
}
