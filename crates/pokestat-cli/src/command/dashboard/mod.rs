use std::path::PathBuf;

use crate::{
    config::{AnalysisArg, DatasetArg},
    tui::Tui,
};

use self::app::DashboardApp;

mod app;
mod widgets;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct DashboardArg {
    #[clap(flatten)]
    pub(super) dataset: DatasetArg,
    #[clap(flatten)]
    pub(super) analysis: AnalysisArg,
    /// Write logs to this file (logging is off otherwise)
    #[arg(long)]
    pub(super) log_file: Option<PathBuf>,
}

pub fn run(arg: &DashboardArg) -> anyhow::Result<()> {
    let DashboardArg {
        dataset,
        analysis,
        log_file: _,
    } = arg;
    let config = analysis.resolve()?;
    let mut app = DashboardApp::new(dataset.clone(), config)?;
    Tui::new().run(&mut app)
}
