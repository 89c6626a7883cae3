use clap::Args;
use eyre::Result;

use super::{ConfigArg, UnwrapOrExit, open_manifest};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub config: ConfigArg,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let file = open_manifest(&self.config.config);

        let report = ops::check(&file).unwrap_or_exit();
        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
