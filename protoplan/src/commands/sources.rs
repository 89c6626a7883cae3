use clap::Args;
use eyre::Result;

use super::{ConfigArg, UnwrapOrExit, open_manifest};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct SourcesCommand {
    #[command(flatten)]
    pub config: ConfigArg,
}

impl SourcesCommand {
    pub fn run(&self) -> Result<()> {
        let file = open_manifest(&self.config.config);

        let report = ops::sources(&file).unwrap_or_exit();
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
