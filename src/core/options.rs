//! Conversion options

use crate::data::styles::{DEFAULT_DISPLAY_CONTAINERS, DEFAULT_STYLESHEET};

/// Options for HTML conversion
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default, deny_unknown_fields))]
pub struct ConvertOptions {
    /// Rewrite `mmultiscripts` before the primary translator sees a formula
    pub normalize_multiscripts: bool,
    /// Drop `<p>` elements that contain nothing but whitespace
    pub remove_empty_paragraphs: bool,
    /// Collapse whitespace runs in text nodes
    pub normalize_whitespace: bool,
    /// Add a `<style>` block to `<head>`
    pub inject_stylesheet: bool,
    /// CSS to inject; the built-in font stack when `None`
    #[cfg_attr(feature = "config", serde(skip_serializing_if = "Option::is_none"))]
    pub stylesheet: Option<String>,
    /// Elements in which a lone formula becomes a display formula
    pub display_containers: Vec<String>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            normalize_multiscripts: true,
            remove_empty_paragraphs: true,
            normalize_whitespace: true,
            inject_stylesheet: true,
            stylesheet: None,
            display_containers: DEFAULT_DISPLAY_CONTAINERS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only replace formulas; leave the rest of the document untouched
    pub fn math_only() -> Self {
        Self {
            remove_empty_paragraphs: false,
            normalize_whitespace: false,
            inject_stylesheet: false,
            ..Default::default()
        }
    }

    /// Every cleanup step enabled (the default)
    pub fn full() -> Self {
        Self::default()
    }

    /// CSS that will be injected
    pub fn effective_stylesheet(&self) -> &str {
        self.stylesheet.as_deref().unwrap_or(DEFAULT_STYLESHEET)
    }
}
