//! Utility modules
//!
//! This module contains utilities and helpers:
//! - Error, warning and result types
//! - Formula diagnostics (check mode)
//! - TOML configuration loading (`config` feature)
//! - Child processes fed on stdin

#[cfg(feature = "config")]
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod process;

// Re-export commonly used items
#[cfg(feature = "config")]
pub use config::Config;
pub use diagnostics::{check_html, format_diagnostics, CheckResult, Diagnostic, DiagnosticLevel};
pub use error::{
    ConversionError, ConversionOutput, ConversionResult, ConversionWarning, WarningKind,
};
