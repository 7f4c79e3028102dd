//! Command execution for `dq analyze` and `dq clean`.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, bail};

use dq_analyze::{Analyzer, AnalyzerConfig};
use dq_core::format_numeric;
use dq_model::{AnalysisReport, Cell, DatasetMetadata, DatasetStatus, ProvenanceEvent, Record};
use dq_transform::{ClipMethod, FillStrategy, TransformOutcome, Transformation};

use crate::cli::{AnalyzeArgs, CleanArgs, MethodArg, StrategyArg, TransformArg};
use crate::ingest::ingest_csv;

pub struct AnalyzeResult {
    pub metadata: DatasetMetadata,
    pub report: AnalysisReport,
}

pub struct CleanResult {
    pub metadata: DatasetMetadata,
    pub outcome: TransformOutcome,
    pub transform_id: String,
}

pub fn run_analyze(args: &AnalyzeArgs) -> anyhow::Result<AnalyzeResult> {
    let (mut dataset, mut metadata) = ingest_csv(&args.input)?;
    if let Some(max_rows) = args.max_rows
        && dataset.row_count() > max_rows
    {
        tracing::warn!(
            rows = dataset.row_count(),
            max_rows,
            "truncating dataset for analysis"
        );
        dataset.records.truncate(max_rows);
    }
    let config = analyzer_config(args);
    let analyzer = Analyzer::new(config).context("invalid analyzer configuration")?;
    let report = analyzer.run(&dataset);

    metadata.record_event(
        ProvenanceEvent::new("system", "analyze").with_details(serde_json::json!({
            "issues": report.issues.len(),
            "high": report.has_high_severity(),
        })),
    );

    if let Some(path) = &args.output {
        let payload = report_json(&metadata, &report);
        let rendered =
            serde_json::to_string_pretty(&payload).context("failed to serialize report")?;
        std::fs::write(path, rendered)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), "report written");
    }

    Ok(AnalyzeResult { metadata, report })
}

pub fn run_clean(args: &CleanArgs) -> anyhow::Result<CleanResult> {
    let (dataset, mut metadata) = ingest_csv(&args.input)?;
    let transformation = build_transformation(args)?;
    let outcome = transformation.apply(&dataset.records);

    metadata.status = DatasetStatus::Cleaned;
    metadata.record_event(
        ProvenanceEvent::new("system", "transform").with_details(serde_json::json!({
            "transform": transformation.id,
            "params": transformation.params(),
            "destructive": transformation.destructive(),
            "evidence": outcome.evidence,
        })),
    );

    if let Some(path) = &args.output {
        write_csv(path, &dataset.columns, &outcome.records)?;
        tracing::info!(path = %path.display(), rows = outcome.records.len(), "cleaned CSV written");
    }

    Ok(CleanResult {
        metadata,
        transform_id: transformation.id,
        outcome,
    })
}

pub fn report_json(metadata: &DatasetMetadata, report: &AnalysisReport) -> serde_json::Value {
    serde_json::json!({
        "metadata": metadata,
        "schema": report.schema,
        "issues": report.issues,
    })
}

pub fn outcome_json(result: &CleanResult) -> serde_json::Value {
    serde_json::json!({
        "metadata": result.metadata,
        "transform": result.transform_id,
        "evidence": result.outcome.evidence,
        "records_after": result.outcome.records.len(),
    })
}

fn analyzer_config(args: &AnalyzeArgs) -> AnalyzerConfig {
    let mut config = AnalyzerConfig::default();
    if let Some(threshold) = args.col_missing_threshold {
        config = config.with_col_missing_threshold(threshold);
    }
    if let Some(threshold) = args.row_missing_threshold {
        config = config.with_row_missing_threshold(threshold);
    }
    if let Some(threshold) = args.pk_threshold {
        config = config.with_pk_uniqueness_threshold(threshold);
    }
    if let Some(k) = args.iqr_k {
        config = config.with_outlier_iqr_k(k);
    }
    if let Some(ratio) = args.fuzzy_ratio {
        config = config.with_categorical_fuzzy_ratio(ratio);
    }
    if let Some(threshold) = args.text_length_threshold {
        config = config.with_text_length_threshold(threshold);
    }
    config
}

fn build_transformation(args: &CleanArgs) -> anyhow::Result<Transformation> {
    let transformation = match args.transform {
        TransformArg::CoerceNumeric => Transformation::coerce_numeric(&args.column)?,
        TransformArg::CoerceDatetime => Transformation::coerce_datetime(&args.column)?,
        TransformArg::FillMissing => {
            let Some(strategy) = args.strategy else {
                bail!("--transform fill-missing requires --strategy");
            };
            let strategy = match strategy {
                StrategyArg::Mean => FillStrategy::Mean,
                StrategyArg::Median => FillStrategy::Median,
                StrategyArg::Mode => FillStrategy::Mode,
                StrategyArg::Constant => FillStrategy::Constant,
            };
            Transformation::fill_missing(&args.column, strategy, args.value.clone())?
        }
        TransformArg::ClipOutliers => {
            let method = match args.method {
                MethodArg::Clip => ClipMethod::Clip,
                MethodArg::Flag => ClipMethod::Flag,
                MethodArg::Remove => ClipMethod::Remove,
            };
            Transformation::clip_outliers(&args.column, args.k, method, args.flag_column.clone())?
        }
    };
    Ok(transformation)
}

/// Write records back out as CSV, including any column a transformation
/// added (flag-mode clipping).
fn write_csv(path: &Path, columns: &[String], records: &[Record]) -> anyhow::Result<()> {
    let mut all_columns: Vec<String> = columns.to_vec();
    let known: BTreeSet<&String> = columns.iter().collect();
    let mut extra: BTreeSet<&String> = BTreeSet::new();
    for record in records {
        for name in record.cells.keys() {
            if !known.contains(name) {
                extra.insert(name);
            }
        }
    }
    all_columns.extend(extra.into_iter().cloned());

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    writer.write_record(&all_columns)?;
    for record in records {
        let row: Vec<String> = all_columns
            .iter()
            .map(|column| render_cell(record.get(column)))
            .collect();
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

fn render_cell(cell: &Cell) -> String {
    match cell {
        Cell::Null => String::new(),
        Cell::Number(n) => format_numeric(*n),
        Cell::Text(s) => s.clone(),
    }
}
