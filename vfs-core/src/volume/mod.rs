//! Volume metadata persistence.
//!
//! The directory layout under the volume root is the only source of truth:
//! every lookup re-reads the metadata file, nothing is cached in memory.

pub mod record;
pub mod store;

#[cfg(test)]
mod tests;

pub use record::VolumeRecord;
pub use store::VolumeStore;
