//! WASM bindings for mathdocx
//!
//! This module provides JavaScript-accessible functions for converting
//! MathML in HTML documents to LaTeX.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use serde::{Deserialize, Serialize};

/// HTML conversion options (exposed to WASM)
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct HtmlConvertOptions {
    /// Rewrite `mmultiscripts` before translation
    #[serde(default = "default_true")]
    pub normalize_multiscripts: bool,
    /// Drop empty `<p>` elements
    #[serde(default = "default_true")]
    pub remove_empty_paragraphs: bool,
    /// Collapse whitespace runs in text
    #[serde(default = "default_true")]
    pub normalize_whitespace: bool,
    /// Add the default (or given) stylesheet to `<head>`
    #[serde(default = "default_true")]
    pub inject_stylesheet: bool,
    /// Custom CSS replacing the built-in stylesheet
    #[serde(default)]
    pub stylesheet: Option<String>,
    /// Elements in which a lone formula is displayed
    #[serde(default)]
    pub display_containers: Option<Vec<String>>,
}

#[cfg(feature = "wasm")]
impl Default for HtmlConvertOptions {
    fn default() -> Self {
        Self {
            normalize_multiscripts: true,
            remove_empty_paragraphs: true,
            normalize_whitespace: true,
            inject_stylesheet: true,
            stylesheet: None,
            display_containers: None,
        }
    }
}

#[cfg(feature = "wasm")]
impl From<HtmlConvertOptions> for crate::ConvertOptions {
    fn from(opts: HtmlConvertOptions) -> Self {
        let defaults = crate::ConvertOptions::default();
        crate::ConvertOptions {
            normalize_multiscripts: opts.normalize_multiscripts,
            remove_empty_paragraphs: opts.remove_empty_paragraphs,
            normalize_whitespace: opts.normalize_whitespace,
            inject_stylesheet: opts.inject_stylesheet,
            stylesheet: opts.stylesheet,
            display_containers: opts
                .display_containers
                .unwrap_or(defaults.display_containers),
        }
    }
}

#[cfg(feature = "wasm")]
fn default_true() -> bool {
    true
}

/// Conversion result with additional metadata
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct ConvertResult {
    /// The converted output
    pub output: String,
    /// Whether the conversion was successful
    pub success: bool,
    /// Error message if conversion failed
    pub error: Option<String>,
    /// Warnings during conversion
    pub warnings: Vec<String>,
}

#[cfg(feature = "wasm")]
impl ConvertResult {
    fn from_output(result: crate::ConversionResult<crate::ConversionOutput>) -> Self {
        match result {
            Ok(output) => ConvertResult {
                warnings: output.format_warnings(),
                output: output.content,
                success: true,
                error: None,
            },
            Err(e) => ConvertResult {
                output: String::new(),
                success: false,
                error: Some(format!("Conversion failed: {}", e)),
                warnings: vec![],
            },
        }
    }
}

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Convert one MathML fragment to LaTeX
///
/// # Returns
/// LaTeX math code without `$` delimiters (empty if nothing could be translated)
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "mathmlToLatex")]
pub fn mathml_to_latex_wasm(input: &str) -> String {
    crate::mathml_to_latex(input)
}

/// Convert every formula in an HTML document with default options
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "convertHtml")]
pub fn convert_html_wasm(input: &str) -> JsValue {
    let result = ConvertResult::from_output(crate::convert_html_with_diagnostics(
        input,
        &crate::ConvertOptions::default(),
    ));
    serde_wasm_bindgen::to_value(&result).unwrap()
}

/// Convert an HTML document with options
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "convertHtmlWithOptions")]
pub fn convert_html_with_options_wasm(input: &str, options: JsValue) -> JsValue {
    let opts: HtmlConvertOptions = serde_wasm_bindgen::from_value(options).unwrap_or_default();
    let result = ConvertResult::from_output(crate::convert_html_with_diagnostics(
        input,
        &opts.into(),
    ));
    serde_wasm_bindgen::to_value(&result).unwrap()
}

/// Get version information
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "getVersion")]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Check the formulas of an HTML document for potential issues
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "checkHtml")]
pub fn check_html_wasm(input: &str) -> JsValue {
    use crate::diagnostics::DiagnosticLevel;

    let result = crate::diagnostics::check_html(input);

    // Group diagnostics by level
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut infos = Vec::new();

    for d in &result.diagnostics {
        let message = match d.island {
            Some(i) => format!("formula #{}: {}", i + 1, d.message),
            None => d.message.clone(),
        };
        match d.level {
            DiagnosticLevel::Error => errors.push(message),
            DiagnosticLevel::Warning => warnings.push(message),
            DiagnosticLevel::Info => infos.push(message),
        }
    }

    let summary = CheckSummary {
        formulas: result.formulas,
        errors,
        warnings,
        infos,
        has_errors: result.has_errors(),
    };
    serde_wasm_bindgen::to_value(&summary).unwrap()
}

/// Summary of HTML check results
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct CheckSummary {
    pub formulas: usize,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
    pub has_errors: bool,
}
