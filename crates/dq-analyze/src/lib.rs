//! Data-quality analysis: schema profiling plus seven independent issue
//! detectors, reduced into one [`AnalysisReport`].
//!
//! Each detector is a pure function `(dataset, schema, config) -> issues`;
//! the [`Analyzer`] builds the schema once, runs the detectors in a fixed
//! order and assigns run-unique issue ids. All per-run state is local to
//! one `run` call, so analyzers can be shared across threads and datasets.

pub mod config;
pub mod detectors;

pub use config::AnalyzerConfig;

use dq_model::{AnalysisReport, Dataset, Result, Severity};
use tracing::{debug, info};

/// Orchestrates one analysis run.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    /// Create an analyzer, rejecting invalid configuration outright.
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Profile the dataset and run every detector.
    ///
    /// Issues are listed in detector emission order; ids are fresh for this
    /// run and carry no cross-run identity.
    pub fn run(&self, dataset: &Dataset) -> AnalysisReport {
        let schema = dq_core::build_schema(dataset, self.config.type_sample_cap);
        debug!(columns = schema.len(), rows = dataset.row_count(), "schema built");

        let mut issues = detectors::run_all(dataset, &schema, &self.config);
        for (seq, issue) in issues.iter_mut().enumerate() {
            issue.id = format!("{}-{:03}", issue.kind.as_str(), seq + 1);
        }

        let report = AnalysisReport { schema, issues };
        info!(
            issues = report.issues.len(),
            high = report.count_by_severity(Severity::High),
            medium = report.count_by_severity(Severity::Medium),
            low = report.count_by_severity(Severity::Low),
            "analysis complete"
        );
        report
    }
}
