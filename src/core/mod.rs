//! Core conversion modules
//!
//! - `mathml`: MathML tree model and the two-tier MathML → LaTeX translator
//! - `html`: HTML document parsing, formula placement and substitution
//! - `converter`: the end-to-end document pipeline

pub mod converter;
pub mod html;
pub mod mathml;
pub mod options;

pub use converter::Converter;
pub use mathml::{
    translate_formula, CommandTranslator, FormulaTranslation, MathKind, MathNode, NoPrimary,
    PrimaryTranslator, TranslationTier,
};
pub use options::ConvertOptions;
