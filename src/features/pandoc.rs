//! pandoc subprocess integration
//!
//! Turns a converted HTML document into a Word file. HTML is always fed on
//! stdin; stderr is captured and reported in [`SubprocessError`](crate::utils::error::ConversionError::SubprocessError).

use std::path::Path;
use std::process::{Command, Stdio};

use crate::utils::error::ConversionResult;
use crate::utils::process;

/// Options for the pandoc invocation
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default, deny_unknown_fields))]
pub struct PandocOptions {
    /// Executable name or path
    pub program: String,
    /// Input format
    pub from: String,
    /// Output format
    pub to: String,
    /// Pass `--standalone`
    pub standalone: bool,
    /// Pass `--mathml`
    pub mathml: bool,
    /// Appended after the generated arguments
    pub extra_args: Vec<String>,
}

impl Default for PandocOptions {
    fn default() -> Self {
        Self {
            program: "pandoc".to_string(),
            from: "html".to_string(),
            to: "docx".to_string(),
            standalone: true,
            mathml: true,
            extra_args: Vec::new(),
        }
    }
}

impl PandocOptions {
    /// Arguments for a conversion writing to `output`
    pub fn args(&self, output: &str) -> Vec<String> {
        let mut args = vec![
            "-o".to_string(),
            output.to_string(),
            format!("--from={}", self.from),
            format!("--to={}", self.to),
        ];
        if self.standalone {
            args.push("--standalone".to_string());
        }
        if self.mathml {
            args.push("--mathml".to_string());
        }
        args.extend(self.extra_args.iter().cloned());
        args
    }
}

/// Whether pandoc can be run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PandocStatus {
    /// Installed; carries the first line of `pandoc --version`
    Available(String),
    NotInstalled,
}

impl PandocStatus {
    pub fn is_available(&self) -> bool {
        matches!(self, PandocStatus::Available(_))
    }
}

impl std::fmt::Display for PandocStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PandocStatus::Available(version) => write!(f, "available ({})", version),
            PandocStatus::NotInstalled => f.write_str("not installed"),
        }
    }
}

/// Runs pandoc with a fixed set of options
#[derive(Debug, Clone, Default)]
pub struct PandocRunner {
    options: PandocOptions,
}

impl PandocRunner {
    pub fn new(options: PandocOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PandocOptions {
        &self.options
    }

    /// Probe `pandoc --version`
    pub fn check_installation(&self) -> PandocStatus {
        let output = Command::new(&self.options.program)
            .arg("--version")
            .stdin(Stdio::null())
            .output();
        match output {
            Ok(output) if output.status.success() => {
                let stdout = String::from_utf8_lossy(&output.stdout);
                let version = stdout.lines().next().unwrap_or_default().trim().to_string();
                PandocStatus::Available(version)
            }
            Ok(output) => {
                log::debug!("{} --version exited with {}", self.options.program, output.status);
                PandocStatus::NotInstalled
            }
            Err(e) => {
                log::debug!("{} could not be started: {}", self.options.program, e);
                PandocStatus::NotInstalled
            }
        }
    }

    /// Convert HTML and write the result to `output`
    pub fn html_to_docx(&self, html: &str, output: &Path) -> ConversionResult<()> {
        let target = output.to_string_lossy();
        log::debug!("running {} {}", self.options.program, self.options.args(&target).join(" "));
        self.run(&self.options.args(&target), html)?;
        Ok(())
    }

    /// Convert HTML and return the output file's bytes
    pub fn html_to_docx_bytes(&self, html: &str) -> ConversionResult<Vec<u8>> {
        self.run(&self.options.args("-"), html)
    }

    fn run(&self, args: &[String], input: &str) -> ConversionResult<Vec<u8>> {
        process::run_with_stdin(&self.options.program, args, input.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ConversionError;

    #[test]
    fn test_default_args() {
        let args = PandocOptions::default().args("out.docx");
        assert_eq!(
            args,
            vec!["-o", "out.docx", "--from=html", "--to=docx", "--standalone", "--mathml"]
        );
    }

    #[test]
    fn test_custom_args() {
        let options = PandocOptions {
            standalone: false,
            mathml: false,
            extra_args: vec!["--reference-doc=ref.docx".to_string()],
            ..Default::default()
        };
        assert_eq!(
            options.args("-"),
            vec!["-o", "-", "--from=html", "--to=docx", "--reference-doc=ref.docx"]
        );
    }

    #[test]
    fn test_missing_pandoc() {
        let runner = PandocRunner::new(PandocOptions {
            program: "mathdocx-no-such-pandoc".to_string(),
            ..Default::default()
        });
        assert_eq!(runner.check_installation(), PandocStatus::NotInstalled);
        let err = runner.html_to_docx_bytes("<p>x</p>").unwrap_err();
        assert!(matches!(
            err,
            ConversionError::SubprocessError { code: None, .. }
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_conversion_reports_exit_code() {
        let runner = PandocRunner::new(PandocOptions {
            program: "false".to_string(),
            ..Default::default()
        });
        let html = "<p>x</p>".repeat(512 * 1024);
        let err = runner.html_to_docx_bytes(&html).unwrap_err();
        assert!(matches!(
            err,
            ConversionError::SubprocessError { code: Some(1), .. }
        ));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(PandocStatus::NotInstalled.to_string(), "not installed");
        let status = PandocStatus::Available("pandoc 3.1".to_string());
        assert!(status.is_available());
        assert_eq!(status.to_string(), "available (pandoc 3.1)");
    }
}
