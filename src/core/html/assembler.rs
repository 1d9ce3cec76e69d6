//! Formula substitution in an HTML document
//!
//! Every `<math>` island is collected before anything is touched, each
//! replacement is computed against the unmodified tree, and only then are
//! the islands swapped for text nodes. Replacing one island therefore never
//! changes how another one is found or classified.

use markup5ever_rcdom::{Handle, RcDom};

use super::dom;
use super::placement::{self, Placement};
use crate::core::mathml::{self, parse, PrimaryTranslator, TranslationTier};
use crate::utils::error::{ConversionWarning, WarningKind};

/// A formula ready to be substituted
#[derive(Debug, Clone)]
pub struct Replacement {
    /// Zero-based position of the island in document order
    pub index: usize,
    /// Delimited LaTeX, or empty when nothing could be translated
    pub text: String,
    pub placement: Placement,
    pub tier: TranslationTier,
}

/// Summary of one substitution pass
#[derive(Debug, Clone, Default)]
pub struct AssemblyReport {
    pub replacements: Vec<Replacement>,
    pub warnings: Vec<ConversionWarning>,
}

impl AssemblyReport {
    /// Number of formulas found
    pub fn formula_count(&self) -> usize {
        self.replacements.len()
    }

    /// Number of formulas answered by the given tier
    pub fn count_tier(&self, tier: TranslationTier) -> usize {
        self.replacements.iter().filter(|r| r.tier == tier).count()
    }
}

/// Options the assembler needs from the converter
#[derive(Debug, Clone)]
pub struct AssemblerConfig<'a> {
    pub normalize_multiscripts: bool,
    pub display_containers: &'a [String],
}

/// Compute the replacement for one island without modifying the tree
pub fn translate_island(
    island: &Handle,
    index: usize,
    primary: &dyn PrimaryTranslator,
    config: &AssemblerConfig<'_>,
) -> (Replacement, Vec<ConversionWarning>) {
    let sole = placement::is_sole_content(island, config.display_containers);
    let placement = Placement::classify(dom::get_attr(island, "display").as_deref(), sole);

    let Some(root) = parse::from_dom(island) else {
        let warning = ConversionWarning::new(WarningKind::EmptyFormula, "formula has no content")
            .at_island(index);
        let replacement = Replacement {
            index,
            text: String::new(),
            placement,
            tier: TranslationTier::Empty,
        };
        return (replacement, vec![warning]);
    };

    let translation = mathml::translate_formula(&root, primary, config.normalize_multiscripts);
    let warnings = translation
        .warnings
        .into_iter()
        .map(|w| w.at_island(index))
        .collect();

    let replacement = Replacement {
        index,
        text: placement::wrap(&translation.latex, placement),
        placement,
        tier: translation.tier,
    };
    (replacement, warnings)
}

/// Replace every top-level `<math>` element in the document with delimited
/// LaTeX text.
pub fn replace_formulas(
    document: &RcDom,
    primary: &dyn PrimaryTranslator,
    config: &AssemblerConfig<'_>,
) -> AssemblyReport {
    let islands = dom::find_outermost(&document.document, "math");
    let mut report = AssemblyReport::default();

    for (index, island) in islands.iter().enumerate() {
        let (replacement, warnings) = translate_island(island, index, primary, config);
        report.warnings.extend(warnings);
        report.replacements.push(replacement);
    }

    for (island, replacement) in islands.iter().zip(&report.replacements) {
        if !dom::replace_node(island, dom::new_text(&replacement.text)) {
            log::warn!("formula #{} was detached before substitution", replacement.index + 1);
        }
    }

    log::debug!(
        "replaced {} formula(s): {} primary, {} fallback, {} empty",
        report.formula_count(),
        report.count_tier(TranslationTier::Primary),
        report.count_tier(TranslationTier::Fallback),
        report.count_tier(TranslationTier::Empty),
    );
    report
}
