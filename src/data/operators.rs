//! MathML operator mappings
//!
//! Operators whose literal glyph is not valid (or not meaningful) inside
//! LaTeX math and must be emitted as a command instead. Every operator that
//! is not listed here is passed through unchanged.

use phf::phf_map;

/// `<mo>` literal to LaTeX command
pub static OPERATOR_TO_LATEX: phf::Map<&'static str, &'static str> = phf_map! {
    // Multiplication sign
    "\u{00D7}" => "\\times",
    // Division sign
    "\u{00F7}" => "\\div",
};

/// Translate an operator literal, passing unmapped operators through
#[inline]
pub fn translate_operator(op: &str) -> &str {
    OPERATOR_TO_LATEX.get(op).copied().unwrap_or(op)
}
