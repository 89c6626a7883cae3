use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};

use super::{ConfigArg, UnwrapOrExit, open_manifest};
use crate::{
    ops::{self, PlanOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct PlanCommand {
    #[command(flatten)]
    pub config: ConfigArg,

    /// Print the jobs as JSON for a generator backend
    #[arg(long)]
    pub json: bool,

    /// Write the JSON plan to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write a JSON snapshot of every pipeline phase to this directory
    #[arg(long)]
    pub snapshot_dir: Option<PathBuf>,
}

impl PlanCommand {
    pub fn run(&self) -> Result<()> {
        let file = open_manifest(&self.config.config);

        let report = ops::plan(
            &file,
            PlanOptions {
                snapshot_dir: self.snapshot_dir.as_deref(),
            },
        )
        .unwrap_or_exit();

        if let Some(output) = &self.output {
            let written = ops::write_plan(&report, output).wrap_err("Failed to write plan")?;
            written.render(&mut TerminalOutput::new());
        } else if self.json {
            println!("{}", report.to_json()?);
        } else {
            report.render(&mut TerminalOutput::new());
        }

        Ok(())
    }
}
