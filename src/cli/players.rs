use clap::Args;

use crate::cli::{OutputFormat, SourceArgs};
use crate::core::types::Mode;
use crate::game::{Game, GuessCounter};

#[derive(Args)]
pub struct PlayersArgs {
    /// Eligibility filter
    #[arg(short, long, default_value = "all-time")]
    pub mode: Mode,

    #[command(flatten)]
    pub source: SourceArgs,
}

pub fn run(args: PlayersArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let store = args.source.load_store(verbose)?;
    let engine = args.source.load_engine()?;
    let counter = GuessCounter::new();
    let game = Game::new(&store, &engine, &counter);

    let names = game.players(args.mode)?;

    match format {
        OutputFormat::Text => {
            println!("Players ({} mode, {} eligible)\n", args.mode, names.len());
            for name in &names {
                println!("  {name}");
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&names)?);
        }
        OutputFormat::Tsv => {
            println!("name\tposition\tstart_year\tcareer_length");
            for record in store.eligible(args.mode) {
                println!(
                    "{}\t{}\t{}\t{}",
                    record.name, record.position, record.start_year, record.career_length
                );
            }
        }
    }

    Ok(())
}
