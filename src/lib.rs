//! # mathdocx
//!
//! MathML → LaTeX conversion for HTML documents headed to pandoc/DOCX.
//!
//! ## Features
//!
//! - **Two-tier translation**: a pluggable primary translator, backed by a
//!   recursive fallback translator that always produces an answer
//! - **Isotope notation**: `mmultiscripts` is normalized into plain
//!   script shapes before translation
//! - **Placement**: inline `$...$` in running text, display `$$...$$` for
//!   formulas standing alone in a paragraph
//! - **Document cleanup**: empty paragraphs, whitespace and a default
//!   stylesheet for Word output
//! - **pandoc integration**: HTML → DOCX through the pandoc executable
//! - **WASM Support**: Compiles to WebAssembly for browser usage
//!
//! ## Usage Examples
//!
//! ### Single Formula
//!
//! ```rust
//! use mathdocx::mathml_to_latex;
//!
//! let latex = mathml_to_latex("<math><mfrac><mn>12</mn><mi>a</mi></mfrac></math>");
//! assert_eq!(latex, r"\frac{12}{a}");
//!
//! let isotope = mathml_to_latex(
//!     "<math><mmultiscripts><mi>C</mi><mprescripts/><mn>12</mn></mmultiscripts></math>",
//! );
//! assert_eq!(isotope, "{}^{12}C");
//! ```
//!
//! ### Full Document Conversion
//!
//! ```rust
//! use mathdocx::{convert_html_with_options, ConvertOptions};
//!
//! let html = convert_html_with_options(
//!     "<p>Let <math><mi>x</mi></math> be positive.</p>",
//!     &ConvertOptions::math_only(),
//! )
//! .unwrap();
//! assert!(html.contains("<p>Let $x$ be positive.</p>"));
//! ```

/// Core conversion modules
pub mod core;

/// Data layer - static mappings and constants
pub mod data;

/// Feature modules - external integrations
pub mod features;

/// Utility modules
pub mod utils;

/// WASM bindings (feature-gated)
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export core conversion types
pub use core::converter::Converter;
pub use core::html::{AssemblyReport, Placement};
pub use core::mathml::{
    translate_formula, CommandTranslator, FormulaTranslation, MathKind, MathNode, NoPrimary,
    PrimaryTranslator, TranslationTier,
};
pub use core::options::ConvertOptions;

// Re-export feature modules
pub use features::pandoc;
pub use features::pandoc::{PandocOptions, PandocRunner, PandocStatus};

// Re-export utilities
#[cfg(feature = "config")]
pub use utils::config::Config;
pub use utils::diagnostics;
pub use utils::diagnostics::check_html;
pub use utils::error::{
    ConversionError, ConversionOutput, ConversionResult, ConversionWarning, WarningKind,
};

/// Convert every formula in an HTML document to delimited LaTeX
///
/// Uses the default options (cleanup and stylesheet enabled) and the
/// built-in fallback translator only.
pub fn convert_html(input: &str) -> ConversionResult<String> {
    Converter::new().convert_html(input)
}

/// Convert an HTML document with custom options
pub fn convert_html_with_options(input: &str, options: &ConvertOptions) -> ConversionResult<String> {
    Converter::with_options(options.clone()).convert_html(input)
}

/// Convert an HTML document and collect warnings for every formula
pub fn convert_html_with_diagnostics(
    input: &str,
    options: &ConvertOptions,
) -> ConversionResult<ConversionOutput> {
    Converter::with_options(options.clone()).convert_html_with_diagnostics(input)
}

/// Translate one MathML fragment to LaTeX (no delimiters)
///
/// Returns an empty string when nothing could be translated.
pub fn mathml_to_latex(mathml: &str) -> String {
    Converter::new().mathml_to_latex(mathml).content
}
