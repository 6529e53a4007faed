//! Provenance and schema descriptors attached to extracted fault models.

use std::collections::BTreeMap;

use ::serde::{Deserialize, Serialize};

/// Semantic version describing the schema of serialized payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Major version incremented for breaking changes.
    pub major: u32,
    /// Minor version incremented for additive changes.
    pub minor: u32,
    /// Patch version incremented for bug fixes and documentation updates.
    pub patch: u32,
}

impl SchemaVersion {
    /// Creates a new schema version descriptor.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::new(1, 0, 0)
    }
}

/// Provenance information tying a fault model to the extractor run that
/// produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ModelProvenance {
    /// Name of the detector-error-model extractor that emitted the data.
    pub extractor: String,
    /// Hash of the circuit description the extractor consumed.
    pub circuit_hash: String,
    /// ISO-8601 timestamp recording when the model was extracted.
    pub created_at: String,
    /// Version map for all tools involved in the extraction.
    pub tool_versions: BTreeMap<String, String>,
}
