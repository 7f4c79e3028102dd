//! Dataset-level metadata and provenance events.
//!
//! The engine itself owns no persistence; these types are the contract an
//! integrator stores alongside the raw source file.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::table::Record;

/// Lifecycle state of an ingested dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetStatus {
    #[default]
    Raw,
    Cleaned,
    Validated,
}

/// One entry in the audit trail: who did what, when.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvenanceEvent {
    pub actor: String,
    pub action: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ProvenanceEvent {
    pub fn new(actor: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
            action: action.into(),
            timestamp: Utc::now(),
            details: None,
        }
    }

    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Metadata captured at ingest time for one dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetMetadata {
    /// Stable identifier derived from the source checksum.
    pub id: String,
    pub filename: String,
    /// Hex sha256 of the raw source bytes.
    pub source_checksum: String,
    pub ingested_at: DateTime<Utc>,
    pub size_bytes: u64,
    pub row_count: usize,
    /// First rows of the dataset, at most five.
    pub preview: Vec<Record>,
    pub status: DatasetStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub provenance: Vec<ProvenanceEvent>,
}

impl DatasetMetadata {
    /// Append an audit event.
    pub fn record_event(&mut self, event: ProvenanceEvent) {
        self.provenance.push(event);
    }
}
