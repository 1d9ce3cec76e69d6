//! Data layer - Static mappings and constants
//!
//! - Operator glyph → LaTeX command mappings
//! - Default stylesheet and element lists used by the document passes

pub mod operators;
pub mod styles;

pub use operators::{translate_operator, OPERATOR_TO_LATEX};
pub use styles::{DEFAULT_DISPLAY_CONTAINERS, DEFAULT_STYLESHEET, PRESERVE_WHITESPACE_ELEMENTS};
