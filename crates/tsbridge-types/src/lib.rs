//! Shared data model for tsbridge
//!
//! Defines the parsed-file representation handed out by the compiler side
//! (source units, module resolutions, file references) and the reference set
//! extracted from it.

pub mod reference;
pub mod source_unit;

pub use reference::{FileReference, ReferenceSet, ResolvedModule};
pub use source_unit::{compute_line_starts, LineAndCharacter, SourceUnit};
