//! Shared data model for the dq data-quality engine.
//!
//! Holds the in-memory tabular representation ([`Dataset`], [`Record`],
//! [`Cell`]), the analysis output types ([`Issue`], [`AnalysisReport`],
//! [`ColumnProfile`]) and the ingest-time metadata/provenance types.

pub mod error;
pub mod issue;
pub mod metadata;
pub mod profile;
pub mod table;

pub use error::{DqError, Result};
pub use issue::{AnalysisReport, Issue, IssueKind, IssueScope, Severity};
pub use metadata::{DatasetMetadata, DatasetStatus, ProvenanceEvent};
pub use profile::{ColumnProfile, ColumnType};
pub use table::{Cell, Dataset, Record};
