use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};
use pokestat_analysis::{
    cache::{AnalysisCache, DatasetFingerprint},
    report::{AnalysisConfig, AnalysisReport},
};
use serde::Serialize;

use crate::{
    config::{AnalysisArg, DatasetArg},
    util::{self, Output},
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ExportArg {
    #[clap(flatten)]
    pub(super) dataset: DatasetArg,
    #[clap(flatten)]
    pub(super) analysis: AnalysisArg,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    pub(super) output: Option<PathBuf>,
}

/// The exported JSON document.
#[derive(Debug, Serialize)]
struct ExportDocument<'a> {
    generated_at: DateTime<Utc>,
    fingerprint: DatasetFingerprint,
    config: &'a AnalysisConfig,
    #[serde(flatten)]
    report: &'a AnalysisReport,
}

pub fn run(arg: &ExportArg) -> anyhow::Result<()> {
    let ExportArg {
        dataset,
        analysis,
        output,
    } = arg;
    let config = analysis.resolve()?;
    let snapshot = util::load_snapshot(dataset)?;
    let report = AnalysisReport::compute(&mut AnalysisCache::new(), &snapshot, &config.forest)
        .context("Failed to rank feature importance")?;

    let document = ExportDocument {
        generated_at: Utc::now(),
        fingerprint: snapshot.fingerprint(),
        config: &config,
        report: &report,
    };
    Output::save_json(&document, output.clone())
}
