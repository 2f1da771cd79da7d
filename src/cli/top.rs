use clap::Args;

use crate::cli::{print_ranking, OutputFormat, SourceArgs};
use crate::core::types::Mode;
use crate::game::{Game, GuessCounter};
use crate::matching::ranking::DEFAULT_TOP_N;
use crate::utils::validation::{clamp_limit, validate_name_input};

/// Most results a single listing will print
const MAX_TOP_N: usize = 50;

#[derive(Args)]
pub struct TopArgs {
    /// Player to rank the others against
    #[arg(required = true)]
    pub target: String,

    /// Number of players to show
    #[arg(short = 'n', long, default_value_t = DEFAULT_TOP_N)]
    pub count: usize,

    /// Player pool to rank
    #[arg(short, long, default_value = "all-time")]
    pub mode: Mode,

    #[command(flatten)]
    pub source: SourceArgs,
}

pub fn run(args: TopArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let store = args.source.load_store(verbose)?;
    let engine = args.source.load_engine()?;
    let counter = GuessCounter::new();
    let game =
        Game::new(&store, &engine, &counter).with_resolver_config(args.source.resolver_config());

    let target = game.resolver().resolve(validate_name_input(&args.target)?)?;
    let count = clamp_limit(args.count, DEFAULT_TOP_N, MAX_TOP_N);
    let ranked = game.nearest(target.record, args.mode, count)?;

    if let OutputFormat::Text = format {
        println!(
            "Closest careers to {} ({} mode)\n",
            target.key(),
            args.mode
        );
    }
    print_ranking(&ranked, format)
}
