//! MathML to LaTeX translation
//!
//! One formula goes through:
//!
//! 1. `multiscript`: rewrite `mmultiscripts` into plain script shapes
//! 2. `primary`: ask the pluggable external translator
//! 3. `fallback`: recursive translation when the primary has no answer
//!
//! Placement and delimiters are decided by the document assembler, not here.

pub mod fallback;
pub mod multiscript;
pub mod node;
pub mod parse;
pub mod primary;
pub mod serialize;

pub use multiscript::{normalize_multiscript, Normalizer};
pub use node::{MathKind, MathNode};
pub use parse::{clean_mathml, parse_mathml};
pub use primary::{CommandTranslator, NoPrimary, PrimaryTranslator};

use fxhash::FxHashMap;

use crate::utils::error::{ConversionWarning, WarningKind};

/// Which tier produced a formula
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationTier {
    Primary,
    Fallback,
    /// Neither tier produced anything
    Empty,
}

/// Result of translating one formula
#[derive(Debug, Clone)]
pub struct FormulaTranslation {
    /// LaTeX without delimiters; may be empty
    pub latex: String,
    pub tier: TranslationTier,
    pub warnings: Vec<ConversionWarning>,
}

impl FormulaTranslation {
    pub fn is_empty(&self) -> bool {
        self.latex.is_empty()
    }
}

/// Translate one `<math>` tree with the two-tier strategy.
///
/// Never fails: a primary error is recorded as a warning and the fallback
/// translator takes over; an empty fallback result is a valid outcome.
pub fn translate_formula(
    root: &MathNode,
    primary: &dyn PrimaryTranslator,
    normalize: bool,
) -> FormulaTranslation {
    let mut warnings = Vec::new();

    let tree = if normalize {
        let mut normalizer = Normalizer::new();
        let tree = normalizer.normalize(root);
        if normalizer.underflows > 0 {
            warnings.push(ConversionWarning::new(
                WarningKind::MultiscriptUnderflow,
                format!(
                    "{} mmultiscripts element(s) had fewer than two children",
                    normalizer.underflows
                ),
            ));
        }
        tree
    } else {
        root.clone()
    };

    let mathml = clean_mathml(&serialize::to_mathml(&tree));
    match primary.translate(&mathml) {
        Ok(latex) if !latex.trim().is_empty() => {
            let latex = primary::postprocess_latex(&latex);
            log::debug!("{} translated formula: {}", primary.name(), latex);
            return FormulaTranslation {
                latex,
                tier: TranslationTier::Primary,
                warnings,
            };
        }
        Ok(_) => {}
        Err(e) => {
            log::warn!("{} failed, using fallback translator: {}", primary.name(), e);
            warnings.push(ConversionWarning::new(
                WarningKind::PrimaryMiss,
                format!("{}: {}", primary.name(), e),
            ));
        }
    }

    let latex = fallback::translate(&tree);
    if latex.is_empty() {
        log::warn!("formula produced no output: {}", mathml);
        warnings.push(ConversionWarning::new(
            WarningKind::EmptyFormula,
            "formula translated to nothing",
        ));
        return FormulaTranslation {
            latex,
            tier: TranslationTier::Empty,
            warnings,
        };
    }

    warnings.extend(structure_warnings(&tree));
    FormulaTranslation {
        latex,
        tier: TranslationTier::Fallback,
        warnings,
    }
}

/// Report the parts of a tree the fallback translator drops or flattens.
///
/// Nodes with the wrong child count become `MalformedNode`; unknown
/// elements are grouped by name into one `UnknownElement` each.
fn structure_warnings(tree: &MathNode) -> Vec<ConversionWarning> {
    let mut warnings = Vec::new();
    let mut unknown: FxHashMap<String, usize> = FxHashMap::default();
    let mut order: Vec<String> = Vec::new();

    tree.walk(&mut |node: &MathNode| match node.kind {
        MathKind::Unknown => {
            let count = unknown.entry(node.name.clone()).or_insert(0);
            if *count == 0 {
                order.push(node.name.clone());
            }
            *count += 1;
        }
        MathKind::Multiscript => {
            if normalize_multiscript(node).is_none() {
                warnings.push(ConversionWarning::new(
                    WarningKind::MultiscriptUnderflow,
                    "mmultiscripts element had fewer than two children and was dropped",
                ));
            }
        }
        kind => {
            if let Some(required) = kind.required_children() {
                if node.children.len() != required {
                    warnings.push(ConversionWarning::new(
                        WarningKind::MalformedNode,
                        format!(
                            "<{}> needs exactly {} children, found {}; dropped",
                            node.name,
                            required,
                            node.children.len()
                        ),
                    ));
                }
            }
        }
    });

    for name in order {
        let count = unknown.get(&name).copied().unwrap_or_default();
        warnings.push(ConversionWarning::new(
            WarningKind::UnknownElement,
            format!(
                "unsupported element <{}> ({} occurrence(s)); only its children were kept",
                name, count
            ),
        ));
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::{ConversionError, ConversionResult};

    struct Failing;

    impl PrimaryTranslator for Failing {
        fn translate(&self, _mathml: &str) -> ConversionResult<String> {
            Err(ConversionError::internal("mapping table exploded"))
        }
    }

    fn isotope() -> MathNode {
        parse_mathml("<math><mmultiscripts><mi>C</mi><mprescripts/><mn>12</mn></mmultiscripts></math>")
            .unwrap()
    }

    #[test]
    fn test_fallback_when_primary_is_silent() {
        let result = translate_formula(&isotope(), &NoPrimary, true);
        assert_eq!(result.latex, "{}^{12}C");
        assert_eq!(result.tier, TranslationTier::Fallback);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_fallback_without_prepass_agrees() {
        let result = translate_formula(&isotope(), &NoPrimary, false);
        assert_eq!(result.latex, "{}^{12}C");
    }

    #[test]
    fn test_primary_error_is_absorbed() {
        let result = translate_formula(&isotope(), &Failing, true);
        assert_eq!(result.latex, "{}^{12}C");
        assert_eq!(result.tier, TranslationTier::Fallback);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].kind, WarningKind::PrimaryMiss);
    }

    #[test]
    fn test_primary_receives_normalized_mathml() {
        let primary = |mathml: &str| {
            assert!(!mathml.contains("mmultiscripts"), "{}", mathml);
            assert!(!mathml.contains("mprescripts"), "{}", mathml);
            Some(String::from("  {}^{12}\\\\mathrm{C} "))
        };
        let result = translate_formula(&isotope(), &primary, true);
        assert_eq!(result.tier, TranslationTier::Primary);
        assert_eq!(result.latex, r"{}^{12}\mathrm{C}");
    }

    #[test]
    fn test_blank_primary_answer_falls_back() {
        let primary = |_: &str| Some("   ".to_string());
        let result = translate_formula(&isotope(), &primary, true);
        assert_eq!(result.tier, TranslationTier::Fallback);
    }

    #[test]
    fn test_empty_outcome() {
        let root = parse_mathml("<math><mfrac><mn>1</mn></mfrac></math>").unwrap();
        let result = translate_formula(&root, &NoPrimary, true);
        assert!(result.is_empty());
        assert_eq!(result.tier, TranslationTier::Empty);
        assert_eq!(result.warnings[0].kind, WarningKind::EmptyFormula);
    }

    #[test]
    fn test_partial_loss_is_reported() {
        let root = parse_mathml("<math><mi>x</mi><mo>+</mo><mfrac><mn>1</mn></mfrac></math>").unwrap();
        let result = translate_formula(&root, &NoPrimary, true);
        assert_eq!(result.latex, "x+");
        assert_eq!(result.tier, TranslationTier::Fallback);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].kind, WarningKind::MalformedNode);
        assert!(result.warnings[0].message.contains("<mfrac>"));
    }

    #[test]
    fn test_unknown_elements_are_grouped() {
        let root = parse_mathml(
            "<math><msqrt><mi>x</mi></msqrt><mo>+</mo><msqrt><mi>y</mi></msqrt></math>",
        )
        .unwrap();
        let result = translate_formula(&root, &NoPrimary, true);
        assert_eq!(result.latex, "x+y");
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].kind, WarningKind::UnknownElement);
        assert!(result.warnings[0].message.contains("<msqrt> (2 occurrence(s))"));
    }

    #[test]
    fn test_underflow_without_prepass() {
        let root = parse_mathml("<math><mi>x</mi><mmultiscripts><mi>y</mi></mmultiscripts></math>")
            .unwrap();
        let result = translate_formula(&root, &NoPrimary, false);
        assert_eq!(result.latex, "x");
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].kind, WarningKind::MultiscriptUnderflow);
    }

    #[test]
    fn test_underflow_warning() {
        let root = parse_mathml("<math><mi>x</mi><mmultiscripts><mi>y</mi></mmultiscripts></math>")
            .unwrap();
        let result = translate_formula(&root, &NoPrimary, true);
        assert_eq!(result.latex, "x");
        assert_eq!(result.warnings[0].kind, WarningKind::MultiscriptUnderflow);
    }
}
