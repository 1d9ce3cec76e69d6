//! Document converter
//!
//! Ties the stages together:
//! parse → drop empty paragraphs → collapse whitespace → replace formulas
//! → inject stylesheet → serialize.

use std::sync::Arc;

use super::html::{self, cleanup, dom, AssemblerConfig};
use super::mathml::{self, NoPrimary, PrimaryTranslator};
use super::options::ConvertOptions;
use crate::utils::error::{ConversionOutput, ConversionResult, ConversionWarning, WarningKind};

/// HTML → HTML converter with LaTeX formulas
#[derive(Clone)]
pub struct Converter {
    options: ConvertOptions,
    primary: Arc<dyn PrimaryTranslator>,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Converter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Converter")
            .field("options", &self.options)
            .field("primary", &self.primary.name())
            .finish()
    }
}

impl Converter {
    /// Converter with default options and no primary translator
    pub fn new() -> Self {
        Self::with_options(ConvertOptions::default())
    }

    pub fn with_options(options: ConvertOptions) -> Self {
        Self {
            options,
            primary: Arc::new(NoPrimary),
        }
    }

    /// Use `primary` as the first translation tier
    pub fn with_primary(mut self, primary: impl PrimaryTranslator + 'static) -> Self {
        self.primary = Arc::new(primary);
        self
    }

    /// Share an already boxed primary translator
    pub fn with_shared_primary(mut self, primary: Arc<dyn PrimaryTranslator>) -> Self {
        self.primary = primary;
        self
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut ConvertOptions {
        &mut self.options
    }

    pub fn primary(&self) -> &dyn PrimaryTranslator {
        self.primary.as_ref()
    }

    /// Convert a document, discarding warnings
    pub fn convert_html(&self, input: &str) -> ConversionResult<String> {
        Ok(self.convert_html_with_diagnostics(input)?.content)
    }

    /// Convert a document and report every non-fatal problem
    pub fn convert_html_with_diagnostics(&self, input: &str) -> ConversionResult<ConversionOutput> {
        let document = dom::parse_html(input);

        if self.options.remove_empty_paragraphs {
            let removed = cleanup::remove_empty_paragraphs(&document);
            log::debug!("removed {} empty paragraph(s)", removed);
        }
        if self.options.normalize_whitespace {
            cleanup::normalize_whitespace(&document);
        }

        let config = AssemblerConfig {
            normalize_multiscripts: self.options.normalize_multiscripts,
            display_containers: &self.options.display_containers,
        };
        let report = html::replace_formulas(&document, self.primary.as_ref(), &config);

        if self.options.inject_stylesheet
            && !cleanup::inject_stylesheet(&document, self.options.effective_stylesheet())
        {
            log::warn!("document has no <html> element; stylesheet not injected");
        }

        let content = dom::serialize_document(&document)?;
        Ok(ConversionOutput::with_warnings(content, report.warnings))
    }

    /// Translate a single MathML fragment to undelimited LaTeX
    pub fn mathml_to_latex(&self, mathml: &str) -> ConversionOutput {
        let Some(root) = mathml::parse_mathml(mathml) else {
            return ConversionOutput::with_warnings(
                String::new(),
                vec![ConversionWarning::new(
                    WarningKind::EmptyFormula,
                    "input contains no MathML elements",
                )],
            );
        };
        let translation =
            mathml::translate_formula(&root, self.primary.as_ref(), self.options.normalize_multiscripts);
        ConversionOutput::with_warnings(translation.latex, translation.warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_pipeline() {
        let converter = Converter::new();
        let html = converter
            .convert_html("<p></p><p>Let   <math><mi>x</mi></math>\n be</p>")
            .unwrap();
        assert!(html.contains("<p>Let $x$ be</p>"), "{}", html);
        assert!(html.contains("SimSun"));
        assert!(!html.contains("<p></p>"));
    }

    #[test]
    fn test_math_only_leaves_document_alone() {
        let converter = Converter::with_options(ConvertOptions::math_only());
        let html = converter
            .convert_html("<p></p><p>a  <math><mn>1</mn></math></p>")
            .unwrap();
        assert!(html.contains("<p></p>"));
        assert!(html.contains("<p>a  $1$</p>"), "{}", html);
        assert!(!html.contains("<style>"));
    }

    #[test]
    fn test_custom_primary() {
        let converter = Converter::with_options(ConvertOptions::math_only())
            .with_primary(|_: &str| Some("\\alpha".to_string()));
        let html = converter
            .convert_html("<p>see <math><mi>a</mi></math></p>")
            .unwrap();
        assert!(html.contains(r"see $\alpha$"), "{}", html);
    }

    #[test]
    fn test_mathml_to_latex() {
        let converter = Converter::new();
        let output = converter.mathml_to_latex(
            "<math xmlns=\"http://www.w3.org/1998/Math/MathML\"><msup><mi>x</mi><mn>2</mn></msup></math>",
        );
        assert_eq!(output.content, "x^{2}");
        assert!(!output.has_warnings());

        let output = converter.mathml_to_latex("plain text");
        assert_eq!(output.content, "");
        assert!(output.has_warnings());
    }

    #[test]
    fn test_warnings_are_collected() {
        let output = Converter::new()
            .convert_html_with_diagnostics("<p><math><mfrac><mi>a</mi></mfrac></math> x</p>")
            .unwrap();
        assert_eq!(output.warnings.len(), 1);
        assert_eq!(output.warnings[0].kind, WarningKind::EmptyFormula);
    }
}
