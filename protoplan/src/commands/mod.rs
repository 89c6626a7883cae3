mod check;
mod completions;
mod plan;
mod sources;

use std::path::{Path, PathBuf};

use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use plan::PlanCommand;
use protoplan_manifest::ManifestFile;
use sources::SourcesCommand;

/// Extension trait for exiting on library errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for protoplan_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

impl<T> UnwrapOrExit<T> for protoplan_pipeline::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(e));
                std::process::exit(1);
            }
        }
    }
}

/// Open the manifest or exit with a rendered error.
fn open_manifest(path: &Path) -> ManifestFile {
    ManifestFile::open(path).unwrap_or_exit()
}

#[derive(Parser)]
#[command(name = "protoplan")]
#[command(version)]
#[command(about = "Plan protobuf code generation from protoplan.toml")]
pub(crate) struct Cli {
    /// Log pipeline activity (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Check(cmd) => cmd.run(),
            Commands::Plan(cmd) => cmd.run(),
            Commands::Sources(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Validate protoplan.toml and report diagnostics
    Check(CheckCommand),

    /// Print the generation jobs
    Plan(PlanCommand),

    /// List resolved proto files and where they came from
    Sources(SourcesCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Path to the manifest, shared by every command that reads one.
#[derive(clap::Args)]
pub(crate) struct ConfigArg {
    /// Path to protoplan.toml (defaults to ./protoplan.toml)
    #[arg(short, long, default_value = protoplan_manifest::MANIFEST_FILENAME)]
    pub config: PathBuf,
}
