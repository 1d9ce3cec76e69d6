//! Feature modules - integrations around the core converter
//!
//! - `pandoc`: HTML → DOCX through the pandoc executable

pub mod pandoc;

pub use pandoc::{PandocOptions, PandocRunner, PandocStatus};
