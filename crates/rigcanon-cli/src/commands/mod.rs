//! CLI command implementations

pub mod canonicalize;
pub mod inspect;
pub mod json_output;
