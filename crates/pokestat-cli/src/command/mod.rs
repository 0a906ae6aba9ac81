use clap::{Parser, Subcommand};

use crate::logging;

use self::{dashboard::DashboardArg, export::ExportArg, report::ReportArg};

mod dashboard;
mod export;
mod report;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Log debug events (overridden by `RUST_LOG`)
    #[arg(short, long, global = true)]
    verbose: bool,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Print every analysis table
    Report(#[clap(flatten)] ReportArg),
    /// Write the analysis report as JSON
    Export(#[clap(flatten)] ExportArg),
    /// Browse the analyses in a terminal dashboard
    Dashboard(#[clap(flatten)] DashboardArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match &args.mode {
        // The dashboard owns the terminal; it logs to a file or not at all.
        Mode::Dashboard(arg) => {
            if let Some(path) = &arg.log_file {
                logging::init_file(args.verbose, path)?;
            }
        }
        Mode::Report(_) | Mode::Export(_) => logging::init_stderr(args.verbose)?,
    }

    match &args.mode {
        Mode::Report(arg) => report::run(arg)?,
        Mode::Export(arg) => export::run(arg)?,
        Mode::Dashboard(arg) => dashboard::run(arg)?,
    }
    Ok(())
}
