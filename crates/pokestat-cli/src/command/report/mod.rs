use anyhow::Context;
use pokestat_analysis::{
    cache::AnalysisCache,
    report::{AnalysisConfig, AnalysisReport},
};

use crate::{
    config::{AnalysisArg, DatasetArg},
    util,
};

mod table;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ReportArg {
    #[clap(flatten)]
    pub(super) dataset: DatasetArg,
    #[clap(flatten)]
    pub(super) analysis: AnalysisArg,
}

pub fn run(arg: &ReportArg) -> anyhow::Result<()> {
    let ReportArg { dataset, analysis } = arg;
    let config = analysis.resolve()?;
    let snapshot = util::load_snapshot(dataset)?;
    let report = AnalysisReport::compute(&mut AnalysisCache::new(), &snapshot, &config.forest)
        .context("Failed to rank feature importance")?;

    print_report(&report, &config);
    Ok(())
}

fn print_report(report: &AnalysisReport, config: &AnalysisConfig) {
    println!(
        "Dataset: {} entities, {} battles",
        report.entities, report.battles
    );
    println!();

    println!(
        "Feature importance ({} trees, seed {})",
        config.forest.n_trees, config.forest.seed
    );
    table::print_importance(&report.importance);
    println!();

    println!("Win rate by type");
    table::print_type_win_rates(&report.type_win_rates);
    println!();

    let winners = report.top_winners(config.top_n);
    println!("Top {} winners", winners.len());
    table::print_top_winners(winners);
    println!();

    println!("Win count distribution");
    table::print_win_histogram(
        &report.win_distribution,
        &report.win_histogram(config.histogram_bins),
    );
    println!();

    println!("Mean attributes");
    table::print_attribute_profile(&report.attribute_profile);
}
