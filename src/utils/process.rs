//! Child processes fed on stdin
//!
//! Used by the pandoc runner and the command-backed primary translator.

use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;

use crate::utils::error::{ConversionError, ConversionResult};

/// Run `program` with `args`, write `input` to its stdin and collect stdout.
///
/// The exit status decides the result: a failed process is reported as
/// [`ConversionError::SubprocessError`] with its stderr, even when it quit
/// before reading all of its input. A stdin write error only surfaces when
/// the process itself succeeded.
pub fn run_with_stdin(program: &str, args: &[String], input: &[u8]) -> ConversionResult<Vec<u8>> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| ConversionError::subprocess(program, None, e.to_string()))?;

    // Feed stdin from another thread so a full stdout pipe cannot block us.
    let writer = child.stdin.take().map(|mut stdin| {
        let input = input.to_vec();
        thread::spawn(move || stdin.write_all(&input))
    });

    let output = child.wait_with_output()?;
    let written = match writer.map(|w| w.join()) {
        Some(Ok(result)) => result.map_err(ConversionError::from),
        Some(Err(_)) => Err(ConversionError::internal("stdin writer thread panicked")),
        None => Ok(()),
    };

    if !output.status.success() {
        if let Err(e) = written {
            log::debug!("{} stopped reading its input: {}", program, e);
        }
        return Err(ConversionError::subprocess(
            program,
            output.status.code(),
            String::from_utf8_lossy(&output.stderr),
        ));
    }
    written?;
    Ok(output.stdout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program() {
        let err = run_with_stdin("mathdocx-no-such-program", &[], b"x").unwrap_err();
        assert!(matches!(
            err,
            ConversionError::SubprocessError { code: None, .. }
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_stdout_is_collected() {
        let out = run_with_stdin("cat", &[], b"<p>x</p>").unwrap();
        assert_eq!(out, b"<p>x</p>");
    }

    #[cfg(unix)]
    #[test]
    fn test_early_exit_keeps_status() {
        let input = vec![b'x'; 4 * 1024 * 1024];
        let err = run_with_stdin("false", &[], &input).unwrap_err();
        assert!(matches!(
            err,
            ConversionError::SubprocessError { code: Some(1), .. }
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_stderr_is_reported() {
        let args = vec!["-c".to_string(), "echo bad format >&2; exit 3".to_string()];
        let err = run_with_stdin("sh", &args, b"").unwrap_err();
        match err {
            ConversionError::SubprocessError { code, stderr, .. } => {
                assert_eq!(code, Some(3));
                assert!(stderr.contains("bad format"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
