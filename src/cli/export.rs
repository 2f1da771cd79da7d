use std::path::PathBuf;

use clap::Args;

use crate::cli::{OutputFormat, SourceArgs};

#[derive(Args)]
pub struct ExportArgs {
    /// Output file path
    #[arg(required = true)]
    pub output: PathBuf,

    #[command(flatten)]
    pub source: SourceArgs,
}

pub fn run(args: ExportArgs, _format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let store = args.source.load_store(verbose)?;

    let json = store.to_json()?;
    std::fs::write(&args.output, json)?;

    println!(
        "Exported {} players to {}",
        store.len(),
        args.output.display()
    );

    Ok(())
}
