//! HTML document handling
//!
//! - `dom`: html5ever parsing, serialization and tree edits
//! - `placement`: inline vs display classification and delimiters
//! - `cleanup`: paragraph, whitespace and stylesheet passes
//! - `assembler`: snapshot-then-substitute replacement of `<math>` islands

pub mod assembler;
pub mod cleanup;
pub mod dom;
pub mod placement;

pub use assembler::{replace_formulas, AssemblerConfig, AssemblyReport, Replacement};
pub use placement::{wrap, Placement};
