//! Formula diagnostics for HTML documents
//!
//! Inspects every `<math>` island without modifying the document and
//! reports what the converter would run into:
//!
//! - Elements outside the supported vocabulary (info)
//! - Script and fraction elements with the wrong number of children (warning)
//! - `mmultiscripts` with too few children to normalize (warning)
//! - Formulas that translate to nothing (error)
//!
//! ## Example
//!
//! ```rust
//! use mathdocx::diagnostics::{check_html, DiagnosticLevel};
//!
//! let result = check_html("<p><math><mfrac><mn>1</mn></mfrac></math></p>");
//! assert!(result.has_errors());
//! assert!(result.diagnostics.iter().any(|d| d.level == DiagnosticLevel::Warning));
//! ```

use std::fmt;

use fxhash::FxHashMap;

use crate::core::html::dom;
use crate::core::mathml::{fallback, multiscript, parse, serialize, MathKind, MathNode};

/// Longest MathML excerpt attached to a diagnostic
const MAX_SOURCE_LEN: usize = 120;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    /// Informational note
    Info,
    /// Warning - the formula converts, but part of it is dropped
    Warning,
    /// Error - the formula disappears from the output
    Error,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Info => write!(f, "info"),
            DiagnosticLevel::Warning => write!(f, "warning"),
            DiagnosticLevel::Error => write!(f, "error"),
        }
    }
}

/// A single diagnostic message
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Severity level
    pub level: DiagnosticLevel,
    /// Human-readable message
    pub message: String,
    /// Zero-based index of the formula in document order
    pub island: Option<usize>,
    /// MathML excerpt
    pub source_text: Option<String>,
    /// Suggested fix
    pub suggestion: Option<String>,
}

impl Diagnostic {
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            island: None,
            source_text: None,
            suggestion: None,
        }
    }

    pub fn at_island(mut self, island: usize) -> Self {
        self.island = Some(island);
        self
    }

    pub fn with_source(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.source_text = Some(if text.chars().count() > MAX_SOURCE_LEN {
            let cut: String = text.chars().take(MAX_SOURCE_LEN).collect();
            format!("{}...", cut)
        } else {
            text
        });
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: level: message
        //         --> formula #n
        //         |
        //         | <mfrac>...
        //         = help: suggestion

        write!(f, "{}: {}", self.level, self.message)?;

        if let Some(island) = self.island {
            write!(f, "\n  --> formula #{}", island + 1)?;
        }

        if let Some(ref source) = self.source_text {
            write!(f, "\n  |\n  | {}", source)?;
        }

        if let Some(ref suggestion) = self.suggestion {
            write!(f, "\n  = help: {}", suggestion)?;
        }

        Ok(())
    }
}

/// Check result with summary
#[derive(Debug, Default)]
pub struct CheckResult {
    /// All diagnostics
    pub diagnostics: Vec<Diagnostic>,
    /// Number of errors
    pub errors: usize,
    /// Number of warnings
    pub warnings: usize,
    /// Number of info messages
    pub infos: usize,
    /// Number of formulas inspected
    pub formulas: usize,
}

impl CheckResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic
    pub fn add(&mut self, diag: Diagnostic) {
        match diag.level {
            DiagnosticLevel::Error => self.errors += 1,
            DiagnosticLevel::Warning => self.warnings += 1,
            DiagnosticLevel::Info => self.infos += 1,
        }
        self.diagnostics.push(diag);
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// Check if there are any issues at all
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Get summary string
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if self.errors > 0 {
            parts.push(plural(self.errors, "error"));
        }
        if self.warnings > 0 {
            parts.push(plural(self.warnings, "warning"));
        }
        if self.infos > 0 {
            parts.push(plural(self.infos, "note"));
        }
        let formulas = plural(self.formulas, "formula");
        if parts.is_empty() {
            format!("{} checked, no issues found", formulas)
        } else {
            format!("{} checked, {}", formulas, parts.join(", "))
        }
    }
}

fn plural(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, if count == 1 { "" } else { "s" })
}

/// Check every formula in an HTML document
pub fn check_html(input: &str) -> CheckResult {
    let mut result = CheckResult::new();
    let document = dom::parse_html(input);

    for (index, island) in dom::find_outermost(&document.document, "math")
        .iter()
        .enumerate()
    {
        result.formulas += 1;
        match parse::from_dom(island) {
            Some(root) => check_formula(&root, index, &mut result),
            None => result.add(
                Diagnostic::new(DiagnosticLevel::Error, "formula has no content").at_island(index),
            ),
        }
    }

    result
}

/// Check one parsed formula
pub fn check_formula(root: &MathNode, index: usize, result: &mut CheckResult) {
    let mut unknown: FxHashMap<String, usize> = FxHashMap::default();
    let mut order: Vec<String> = Vec::new();

    root.walk(&mut |node: &MathNode| match node.kind {
        MathKind::Unknown => {
            let count = unknown.entry(node.name.clone()).or_insert(0);
            if *count == 0 {
                order.push(node.name.clone());
            }
            *count += 1;
        }
        MathKind::Multiscript => {
            if multiscript::normalize_multiscript(node).is_none() {
                result.add(
                    Diagnostic::new(
                        DiagnosticLevel::Warning,
                        format!(
                            "<mmultiscripts> has {} child(ren); at least 2 are needed",
                            node.content_children().count()
                        ),
                    )
                    .at_island(index)
                    .with_source(serialize::to_mathml(node))
                    .with_suggestion("the element will be dropped"),
                );
            }
        }
        kind => {
            if let Some(required) = kind.required_children() {
                if node.children.len() != required {
                    result.add(
                        Diagnostic::new(
                            DiagnosticLevel::Warning,
                            format!(
                                "<{}> needs exactly {} children, found {}",
                                node.name,
                                required,
                                node.children.len()
                            ),
                        )
                        .at_island(index)
                        .with_source(serialize::to_mathml(node))
                        .with_suggestion("the element will be dropped"),
                    );
                }
            }
        }
    });

    for name in order {
        let count = unknown.get(&name).copied().unwrap_or_default();
        result.add(
            Diagnostic::new(
                DiagnosticLevel::Info,
                format!(
                    "unsupported element <{}> ({} occurrence(s)); only its children are kept",
                    name, count
                ),
            )
            .at_island(index),
        );
    }

    if fallback::translate(root).is_empty() {
        result.add(
            Diagnostic::new(DiagnosticLevel::Error, "formula translates to nothing")
                .at_island(index)
                .with_source(serialize::to_mathml(root)),
        );
    }
}

/// Format diagnostics for terminal output
pub fn format_diagnostics(result: &CheckResult, use_color: bool) -> String {
    let mut output = String::new();

    for diag in &result.diagnostics {
        if use_color {
            let color = match diag.level {
                DiagnosticLevel::Error => "\x1b[31m",   // Red
                DiagnosticLevel::Warning => "\x1b[33m", // Yellow
                DiagnosticLevel::Info => "\x1b[34m",    // Blue
            };
            output.push_str(color);
            output.push_str(&format!("{}", diag));
            output.push_str("\x1b[0m\n\n");
        } else {
            output.push_str(&format!("{}\n\n", diag));
        }
    }

    // Summary
    if use_color {
        if result.has_errors() {
            output.push_str("\x1b[31m");
        } else if result.warnings > 0 {
            output.push_str("\x1b[33m");
        } else {
            output.push_str("\x1b[32m");
        }
    }

    output.push_str(&format!("Summary: {}", result.summary()));

    if use_color {
        output.push_str("\x1b[0m");
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_document() {
        let result = check_html("<p><math><mfrac><mn>1</mn><mi>a</mi></mfrac></math></p>");
        assert!(result.is_empty());
        assert_eq!(result.formulas, 1);
        assert_eq!(result.summary(), "1 formula checked, no issues found");
    }

    #[test]
    fn test_wrong_child_count() {
        let result = check_html(
            "<p><math><mi>x</mi><msup><mi>y</mi></msup></math></p>",
        );
        assert_eq!(result.warnings, 1);
        assert!(!result.has_errors());
        assert!(result.diagnostics[0].message.contains("<msup>"));
    }

    #[test]
    fn test_empty_formula_is_error() {
        let result = check_html("<p><math><mfrac><mn>1</mn></mfrac></math></p>");
        assert_eq!(result.errors, 1);
        assert_eq!(result.warnings, 1);
    }

    #[test]
    fn test_multiscript_underflow() {
        let result = check_html(
            "<p><math><mi>a</mi><mmultiscripts><mi>C</mi></mmultiscripts></math></p>",
        );
        assert_eq!(result.warnings, 1);
        assert!(result.diagnostics[0].message.contains("mmultiscripts"));
    }

    #[test]
    fn test_unknown_elements_grouped() {
        let result = check_html(
            "<p><math><mtable><mtr><mtd><mi>a</mi></mtd><mtd><mi>b</mi></mtd></mtr></mtable></math></p>",
        );
        assert_eq!(result.errors, 0);
        assert_eq!(result.infos, 3);
        assert!(result.diagnostics[2].message.contains("<mtd> (2 occurrence(s))"));
    }

    #[test]
    fn test_island_index() {
        let result = check_html(
            "<p><math><mi>ok</mi></math> and <math><mfrac><mi>a</mi></mfrac></math></p>",
        );
        assert!(result.diagnostics.iter().all(|d| d.island == Some(1)));
        assert_eq!(result.formulas, 2);
    }

    #[test]
    fn test_format_diagnostics() {
        let result = check_html("<p><math><mfrac><mn>1</mn></mfrac></math></p>");
        let plain = format_diagnostics(&result, false);
        assert!(plain.contains("error: formula translates to nothing"));
        assert!(plain.contains("--> formula #1"));
        assert!(plain.ends_with("Summary: 1 formula checked, 1 error, 1 warning"));
        let colored = format_diagnostics(&result, true);
        assert!(colored.contains("\x1b[31m"));
    }
}
