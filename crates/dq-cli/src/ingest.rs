//! CSV ingestion: bytes on disk to an in-memory [`Dataset`] plus metadata.

use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use sha2::Digest;

use dq_model::{Cell, Dataset, DatasetMetadata, DatasetStatus, ProvenanceEvent, Record};

/// Number of records kept in the metadata preview.
const PREVIEW_CAP: usize = 5;

/// Read a CSV file into a dataset and capture ingest metadata.
///
/// Cells are trimmed; empty strings become [`Cell::Null`], everything else is
/// kept verbatim as [`Cell::Text`]. Type inference and coercion happen later.
pub fn ingest_csv(path: &Path) -> anyhow::Result<(Dataset, DatasetMetadata)> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let checksum = hex::encode(sha2::Sha256::digest(&bytes));

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes.as_slice());
    let headers = reader
        .headers()
        .with_context(|| format!("failed to read CSV header of {}", path.display()))?
        .clone();
    let columns: Vec<String> = headers.iter().map(|h| h.trim().to_string()).collect();

    let mut dataset = Dataset::new(columns.clone());
    for (idx, record) in reader.records().enumerate() {
        let record = record
            .with_context(|| format!("failed to parse CSV record {}", idx + 2))?;
        let mut row = Record::new();
        for (name, raw) in columns.iter().zip(record.iter()) {
            let value = raw.trim();
            let cell = if value.is_empty() {
                Cell::Null
            } else {
                Cell::Text(value.to_string())
            };
            row.insert(name.clone(), cell);
        }
        dataset.push_record(row);
    }

    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mut metadata = DatasetMetadata {
        // First 12 hex chars of the checksum are enough to identify a source.
        id: checksum.chars().take(12).collect(),
        filename,
        source_checksum: checksum,
        ingested_at: Utc::now(),
        size_bytes: bytes.len() as u64,
        row_count: dataset.row_count(),
        preview: dataset.records.iter().take(PREVIEW_CAP).cloned().collect(),
        status: DatasetStatus::Raw,
        notes: None,
        provenance: Vec::new(),
    };
    metadata.record_event(
        ProvenanceEvent::new("system", "ingest").with_details(serde_json::json!({
            "rows": dataset.row_count(),
            "columns": dataset.columns.len(),
        })),
    );

    tracing::info!(
        rows = dataset.row_count(),
        columns = dataset.columns.len(),
        id = %metadata.id,
        "ingested dataset"
    );

    Ok((dataset, metadata))
}
