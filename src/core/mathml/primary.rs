//! Primary (external) MathML translators
//!
//! The primary tier is a pluggable strategy: the converter hands it a
//! cleaned MathML fragment and accepts any non-empty answer. An empty
//! answer or an error is not fatal; the caller falls back to the built-in
//! recursive translator.

use lazy_static::lazy_static;
use regex::Regex;

use crate::utils::error::ConversionResult;
use crate::utils::process;

lazy_static! {
    static ref DOUBLE_BACKSLASH: Regex = Regex::new(r"\\\\").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// A MathML → LaTeX mapping service
pub trait PrimaryTranslator: Send + Sync {
    /// Translate one cleaned `<math>` fragment.
    ///
    /// `Ok("")` means "no opinion" and triggers the fallback translator, as
    /// does any error.
    fn translate(&self, mathml: &str) -> ConversionResult<String>;

    /// Short name used in warnings
    fn name(&self) -> &str {
        "primary"
    }
}

/// Strategy that never answers, so every formula goes to the fallback
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPrimary;

impl PrimaryTranslator for NoPrimary {
    fn translate(&self, _mathml: &str) -> ConversionResult<String> {
        Ok(String::new())
    }

    fn name(&self) -> &str {
        "none"
    }
}

/// Any `Fn(&str) -> Option<String>` can serve as the primary tier
impl<F> PrimaryTranslator for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn translate(&self, mathml: &str) -> ConversionResult<String> {
        Ok(self(mathml).unwrap_or_default())
    }

    fn name(&self) -> &str {
        "closure"
    }
}

/// Delegates to an external program that reads HTML on stdin and writes
/// LaTeX on stdout; pandoc by default.
#[derive(Debug, Clone)]
pub struct CommandTranslator {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for CommandTranslator {
    fn default() -> Self {
        Self::pandoc("pandoc")
    }
}

impl CommandTranslator {
    /// pandoc reading HTML and writing LaTeX
    pub fn pandoc(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: vec!["--from=html".to_string(), "--to=latex".to_string()],
        }
    }

    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl PrimaryTranslator for CommandTranslator {
    fn translate(&self, mathml: &str) -> ConversionResult<String> {
        let stdout = process::run_with_stdin(&self.program, &self.args, mathml.as_bytes())?;
        let latex = String::from_utf8_lossy(&stdout);
        Ok(strip_math_delimiters(latex.trim()).to_string())
    }

    fn name(&self) -> &str {
        &self.program
    }
}

/// Remove one layer of `\( \)`, `\[ \]`, `$$ $$` or `$ $` around a formula
pub fn strip_math_delimiters(latex: &str) -> &str {
    const PAIRS: [(&str, &str); 4] = [("\\(", "\\)"), ("\\[", "\\]"), ("$$", "$$"), ("$", "$")];
    for (open, close) in PAIRS {
        let long_enough = latex.len() >= open.len() + close.len();
        if long_enough && latex.starts_with(open) && latex.ends_with(close) {
            return latex[open.len()..latex.len() - close.len()].trim();
        }
    }
    latex
}

/// Normalize primary output: collapse doubled backslashes and whitespace
pub fn postprocess_latex(latex: &str) -> String {
    let single = DOUBLE_BACKSLASH.replace_all(latex, r"\");
    WHITESPACE.replace_all(&single, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ConversionError;

    #[test]
    fn test_no_primary_is_empty() {
        assert_eq!(NoPrimary.translate("<math><mi>x</mi></math>").unwrap(), "");
    }

    #[test]
    fn test_closure_primary() {
        let primary = |mathml: &str| {
            if mathml.contains("<mi>x</mi>") {
                Some("x".to_string())
            } else {
                None
            }
        };
        assert_eq!(primary.translate("<math><mi>x</mi></math>").unwrap(), "x");
        assert_eq!(primary.translate("<math><mi>y</mi></math>").unwrap(), "");
    }

    #[test]
    fn test_missing_program_is_an_error() {
        let primary = CommandTranslator::new("mathdocx-no-such-program", vec![]);
        let err = primary.translate("<math/>").unwrap_err();
        assert!(matches!(err, ConversionError::SubprocessError { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_output_is_unwrapped() {
        let script = r"cat >/dev/null; printf '%s' '\(x^{2}\)'";
        let primary = CommandTranslator::new("sh", vec!["-c".to_string(), script.to_string()]);
        let latex = primary.translate("<math><msup><mi>x</mi><mn>2</mn></msup></math>");
        assert_eq!(latex.unwrap(), "x^{2}");
    }

    #[cfg(unix)]
    #[test]
    fn test_command_failure_keeps_exit_code() {
        let primary = CommandTranslator::new("false", vec![]);
        let err = primary.translate(&"<mi>x</mi>".repeat(256 * 1024)).unwrap_err();
        assert!(matches!(
            err,
            ConversionError::SubprocessError { code: Some(1), .. }
        ));
    }

    #[test]
    fn test_strip_math_delimiters() {
        assert_eq!(strip_math_delimiters(r"\(\frac{1}{2}\)"), r"\frac{1}{2}");
        assert_eq!(strip_math_delimiters(r"\[ x^{2} \]"), "x^{2}");
        assert_eq!(strip_math_delimiters("$$x$$"), "x");
        assert_eq!(strip_math_delimiters("$x$"), "x");
        assert_eq!(strip_math_delimiters("x"), "x");
        assert_eq!(strip_math_delimiters("$"), "$");
    }

    #[test]
    fn test_postprocess_latex() {
        assert_eq!(postprocess_latex("  \\\\frac{1}{2}\n +  x "), r"\frac{1}{2} + x");
    }
}
