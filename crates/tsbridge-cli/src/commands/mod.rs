//! CLI command implementations

pub mod check;
pub mod normalize;
pub mod refs;
pub mod sourcemap;
