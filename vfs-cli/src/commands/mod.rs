//! CLI command implementations

pub mod info;
pub mod volume;

pub use info::info;
