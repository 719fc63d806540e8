//! Style sheet builder
//!
//! [`StyleSheet`] edits a style document as loose JSON, keeping elements in
//! the order they were added, and turns it into a [`StyleConfig`] once it is
//! complete. Built-in styles are layered this way.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::style::StyleConfig;
use crate::Result;

/// An ordered, editable style document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSheet {
    elements: IndexMap<String, Value>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a style document, keeping its element order
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let elements: IndexMap<String, Value> = serde_json::from_slice(bytes)?;
        Ok(Self { elements })
    }

    /// Set one field of an element, creating the element if needed
    pub fn set(mut self, element: &str, field: &str, value: impl Into<Value>) -> Self {
        let entry = self
            .elements
            .entry(element.to_string())
            .or_insert_with(|| Value::Object(Map::new()));

        match entry {
            Value::Object(fields) => {
                fields.insert(field.to_string(), value.into());
            }
            other => {
                let mut fields = Map::new();
                fields.insert(field.to_string(), value.into());
                *other = Value::Object(fields);
            }
        }

        self
    }

    /// Overlay `other` onto this sheet. Fields of elements present in both are
    /// merged, `other` winning on conflicts.
    pub fn extend(mut self, other: &StyleSheet) -> Self {
        for (name, value) in &other.elements {
            match (self.elements.get_mut(name), value) {
                (Some(Value::Object(current)), Value::Object(over)) => {
                    for (field, v) in over {
                        current.insert(field.clone(), v.clone());
                    }
                }
                _ => {
                    self.elements.insert(name.clone(), value.clone());
                }
            }
        }
        self
    }

    pub fn get(&self, element: &str) -> Option<&Value> {
        self.elements.get(element)
    }

    /// Element names in insertion order
    pub fn elements(&self) -> impl Iterator<Item = &str> {
        self.elements.keys().map(String::as_str)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.elements)?)
    }

    /// Parse and validate the sheet as a style document
    pub fn to_config(&self) -> Result<StyleConfig> {
        let document: Map<String, Value> = self
            .elements
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        StyleConfig::from_value(Value::Object(document))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StyleError;
    use serde_json::json;

    #[test]
    fn test_builder_keeps_order() {
        let sheet = StyleSheet::new()
            .set("strong", "bold", true)
            .set("document", "margin", 2)
            .set("emph", "italic", true);
        let names: Vec<&str> = sheet.elements().collect();
        assert_eq!(names, vec!["strong", "document", "emph"]);

        let json = sheet.to_json().unwrap();
        let strong = json.find("strong").unwrap();
        let document = json.find("document").unwrap();
        assert!(strong < document);
    }

    #[test]
    fn test_to_config() {
        let config = StyleSheet::new()
            .set("h1", "prefix", "# ")
            .set("h1", "color", "212")
            .to_config()
            .unwrap();
        assert_eq!(config.h1.primitive.prefix.as_deref(), Some("# "));
        assert_eq!(config.h1.primitive.color.as_deref(), Some("212"));
    }

    #[test]
    fn test_extend_merges_fields() {
        let base = StyleSheet::from_json(br#"{"code": {"color": "203", "prefix": " "}}"#).unwrap();
        let over = StyleSheet::new().set("code", "color", "#ff0000");
        let merged = base.extend(&over);
        assert_eq!(
            merged.get("code"),
            Some(&json!({"color": "#ff0000", "prefix": " "}))
        );
    }

    #[test]
    fn test_set_replaces_non_object() {
        let sheet = StyleSheet::from_json(br#"{"text": 3}"#)
            .unwrap()
            .set("text", "bold", true);
        assert_eq!(sheet.get("text"), Some(&json!({"bold": true})));
    }

    #[test]
    fn test_invalid_color_is_reported() {
        let err = StyleSheet::new()
            .set("link", "color", "blue-ish")
            .to_config()
            .unwrap_err();
        assert!(matches!(err, StyleError::InvalidColor(_)));
    }

    #[test]
    fn test_non_object_document_is_rejected() {
        assert!(StyleSheet::from_json(b"[1, 2]").is_err());
    }
}
