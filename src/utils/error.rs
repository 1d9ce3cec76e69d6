//! Error handling for mathdocx conversions
//!
//! Formula-level problems never surface as errors: they are absorbed and
//! reported as [`ConversionWarning`]s. [`ConversionError`] is reserved for
//! the boundary (I/O, configuration, the pandoc subprocess).

use std::fmt;

/// Conversion error type
#[derive(Debug, Clone)]
pub enum ConversionError {
    /// Parse error - input could not be parsed
    ParseError {
        message: String,
        line: Option<usize>,
        column: Option<usize>,
    },
    /// Unsupported feature
    UnsupportedFeature {
        feature: String,
        suggestion: Option<String>,
    },
    /// Invalid input
    InvalidInput { message: String },
    /// IO error (for file operations)
    IoError { message: String },
    /// Configuration file could not be read or parsed
    ConfigError { message: String },
    /// External program failed to start or exited unsuccessfully
    SubprocessError {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
    /// Internal error
    InternalError { message: String },
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::ParseError {
                message,
                line,
                column,
            } => {
                if let (Some(l), Some(c)) = (line, column) {
                    write!(f, "Parse error at line {}, column {}: {}", l, c, message)
                } else if let Some(l) = line {
                    write!(f, "Parse error at line {}: {}", l, message)
                } else {
                    write!(f, "Parse error: {}", message)
                }
            }
            ConversionError::UnsupportedFeature {
                feature,
                suggestion,
            } => {
                if let Some(sug) = suggestion {
                    write!(f, "Unsupported feature '{}'. {}", feature, sug)
                } else {
                    write!(f, "Unsupported feature: {}", feature)
                }
            }
            ConversionError::InvalidInput { message } => {
                write!(f, "Invalid input: {}", message)
            }
            ConversionError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
            ConversionError::ConfigError { message } => {
                write!(f, "Config error: {}", message)
            }
            ConversionError::SubprocessError {
                program,
                code,
                stderr,
            } => {
                match code {
                    Some(c) => write!(f, "{} exited with code {}", program, c)?,
                    None => write!(f, "{} failed", program)?,
                }
                let stderr = stderr.trim();
                if !stderr.is_empty() {
                    write!(f, ": {}", stderr)?;
                }
                Ok(())
            }
            ConversionError::InternalError { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConversionError {}

impl From<std::io::Error> for ConversionError {
    fn from(err: std::io::Error) -> Self {
        ConversionError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Classification of non-fatal conversion issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningKind {
    /// The primary translator failed or returned nothing; fallback was used
    PrimaryMiss,
    /// Neither tier produced any output for a formula
    EmptyFormula,
    /// A node had the wrong number of children for its grammar rule
    MalformedNode,
    /// An element outside the supported vocabulary was met
    UnknownElement,
    /// An `mmultiscripts` node had too few children to normalize
    MultiscriptUnderflow,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WarningKind::PrimaryMiss => "primary-miss",
            WarningKind::EmptyFormula => "empty-formula",
            WarningKind::MalformedNode => "malformed-node",
            WarningKind::UnknownElement => "unknown-element",
            WarningKind::MultiscriptUnderflow => "multiscript-underflow",
        };
        f.write_str(name)
    }
}

/// Conversion warnings (non-fatal issues)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionWarning {
    pub kind: WarningKind,
    pub message: String,
    /// Zero-based index of the formula the warning belongs to
    pub island: Option<usize>,
}

impl ConversionWarning {
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            island: None,
        }
    }

    pub fn at_island(mut self, island: usize) -> Self {
        self.island = Some(island);
        self
    }
}

impl fmt::Display for ConversionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(i) = self.island {
            write!(f, "[{}] formula #{}: {}", self.kind, i + 1, self.message)
        } else {
            write!(f, "[{}] {}", self.kind, self.message)
        }
    }
}

/// Conversion output with optional warnings
#[derive(Debug, Clone)]
pub struct ConversionOutput {
    /// The converted content
    pub content: String,
    /// Any warnings generated during conversion
    pub warnings: Vec<ConversionWarning>,
}

impl ConversionOutput {
    pub fn new(content: String) -> Self {
        Self {
            content,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(content: String, warnings: Vec<ConversionWarning>) -> Self {
        Self { content, warnings }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Get warnings as formatted strings.
    pub fn format_warnings(&self) -> Vec<String> {
        self.warnings.iter().map(|w| w.to_string()).collect()
    }
}

// Convenience constructors for errors
impl ConversionError {
    pub fn parse(message: impl Into<String>) -> Self {
        ConversionError::ParseError {
            message: message.into(),
            line: None,
            column: None,
        }
    }

    pub fn parse_at(message: impl Into<String>, line: usize, column: usize) -> Self {
        ConversionError::ParseError {
            message: message.into(),
            line: Some(line),
            column: Some(column),
        }
    }

    pub fn unsupported(feature: impl Into<String>) -> Self {
        ConversionError::UnsupportedFeature {
            feature: feature.into(),
            suggestion: None,
        }
    }

    pub fn unsupported_with_suggestion(
        feature: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        ConversionError::UnsupportedFeature {
            feature: feature.into(),
            suggestion: Some(suggestion.into()),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        ConversionError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        ConversionError::ConfigError {
            message: message.into(),
        }
    }

    pub fn subprocess(
        program: impl Into<String>,
        code: Option<i32>,
        stderr: impl Into<String>,
    ) -> Self {
        ConversionError::SubprocessError {
            program: program.into(),
            code,
            stderr: stderr.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ConversionError::InternalError {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ConversionError::parse("unexpected token");
        assert!(err.to_string().contains("Parse error"));
        assert!(err.to_string().contains("unexpected token"));
    }

    #[test]
    fn test_parse_error_with_location() {
        let err = ConversionError::parse_at("unexpected token", 10, 5);
        let msg = err.to_string();
        assert!(msg.contains("line 10"));
        assert!(msg.contains("column 5"));
    }

    #[test]
    fn test_subprocess_error_display() {
        let err = ConversionError::subprocess("pandoc", Some(64), "  unknown reader  \n");
        assert_eq!(err.to_string(), "pandoc exited with code 64: unknown reader");

        let err = ConversionError::subprocess("pandoc", None, "");
        assert_eq!(err.to_string(), "pandoc failed");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.html");
        let err: ConversionError = io.into();
        assert!(matches!(err, ConversionError::IoError { .. }));
        assert!(err.to_string().contains("missing.html"));
    }

    #[test]
    fn test_warning_display() {
        let warning = ConversionWarning::new(WarningKind::EmptyFormula, "no output").at_island(0);
        assert_eq!(warning.to_string(), "[empty-formula] formula #1: no output");

        let warning = ConversionWarning::new(WarningKind::PrimaryMiss, "timeout");
        assert_eq!(warning.to_string(), "[primary-miss] timeout");
    }

    #[test]
    fn test_conversion_output() {
        let output = ConversionOutput::new("hello".to_string());
        assert!(!output.has_warnings());

        let output_with_warn = ConversionOutput::with_warnings(
            "hello".to_string(),
            vec![ConversionWarning::new(WarningKind::UnknownElement, "mtable")],
        );
        assert!(output_with_warn.has_warnings());
        assert_eq!(output_with_warn.format_warnings(), vec!["[unknown-element] mtable"]);
    }
}
