use clap::Args;

use crate::cli::{print_ranking, OutputFormat, SourceArgs};
use crate::core::types::Mode;
use crate::game::{Game, GuessCounter, GuessOutcome};
use crate::matching::scoring::ScoreBreakdown;
use crate::utils::validation::validate_name_input;

#[derive(Args)]
pub struct GuessArgs {
    /// The guessed player's name
    #[arg(required = true)]
    pub guess: String,

    /// The target player's name
    #[arg(required = true)]
    pub target: String,

    /// Player pool used for the nearest careers on a correct guess
    #[arg(short, long, default_value = "all-time")]
    pub mode: Mode,

    #[command(flatten)]
    pub source: SourceArgs,
}

pub fn run(args: GuessArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let guess = validate_name_input(&args.guess)?;
    let target = validate_name_input(&args.target)?;

    let store = args.source.load_store(verbose)?;
    let engine = args.source.load_engine()?;
    let counter = GuessCounter::new();
    let game =
        Game::new(&store, &engine, &counter).with_resolver_config(args.source.resolver_config());

    let outcome = game.guess(guess, target, args.mode)?;

    match format {
        OutputFormat::Text => print_text_outcome(&outcome)?,
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&outcome.to_json())?);
        }
        OutputFormat::Tsv => print_tsv_outcome(&outcome)?,
    }

    Ok(())
}

fn print_text_outcome(outcome: &GuessOutcome) -> anyhow::Result<()> {
    match outcome {
        GuessOutcome::Solved { matched_name, top } => {
            println!("You got it! {} ({}/100)", matched_name, outcome.score());
            println!("\nClosest careers:");
            print_ranking(top, OutputFormat::Text)?;
        }
        GuessOutcome::Scored {
            matched_name,
            breakdown,
        } => {
            println!("{}: {}/100", matched_name, breakdown.total);
            print_text_breakdown(breakdown);
        }
    }
    Ok(())
}

/// Non-zero features followed by the shared seasons behind them
pub(crate) fn print_text_breakdown(breakdown: &ScoreBreakdown) {
    let scoring: Vec<_> = breakdown
        .features()
        .into_iter()
        .filter(|(_, points)| *points > 0)
        .collect();

    if scoring.is_empty() {
        println!("  No shared career features");
        return;
    }

    for (feature, points) in scoring {
        println!("  {feature:<20} {points:>3}");
    }

    if !breakdown.shared_season_pairs.is_empty() {
        let seasons: Vec<String> = breakdown
            .shared_season_pairs
            .iter()
            .map(|s| format!("{} {}", s.team, s.year))
            .collect();
        println!("\nShared seasons: {}", seasons.join(", "));
    }
}

fn print_tsv_outcome(outcome: &GuessOutcome) -> anyhow::Result<()> {
    match outcome {
        GuessOutcome::Solved { top, .. } => print_ranking(top, OutputFormat::Tsv)?,
        GuessOutcome::Scored {
            matched_name,
            breakdown,
        } => {
            let features = breakdown.features();
            let header: Vec<&str> = features.iter().map(|(name, _)| *name).collect();
            let values: Vec<String> = features.iter().map(|(_, v)| v.to_string()).collect();
            println!("matched_name\tscore\t{}", header.join("\t"));
            println!("{}\t{}\t{}", matched_name, breakdown.total, values.join("\t"));
        }
    }
    Ok(())
}
