use std::io::{BufRead, Write};

use clap::Args;

use crate::cli::{OutputFormat, SourceArgs};
use crate::core::types::Mode;
use crate::game::{Game, GuessCounter, GuessOutcome};
use crate::matching::MatchError;
use crate::utils::validation::validate_name_input;

/// Guesses shown in the running history
const HISTORY_LEN: usize = 10;

#[derive(Args)]
pub struct PlayArgs {
    /// Pool the mystery player is drawn from
    #[arg(short, long, default_value = "classic")]
    pub mode: Mode,

    /// Fix the mystery player instead of drawing one at random
    #[arg(long)]
    pub target: Option<String>,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// How a round of play ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayResult {
    Solved { guesses: usize },
    Revealed,
    Quit,
}

pub fn run(args: PlayArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let store = args.source.load_store(verbose)?;
    let engine = args.source.load_engine()?;
    let counter = GuessCounter::new();
    let game =
        Game::new(&store, &engine, &counter).with_resolver_config(args.source.resolver_config());

    let target = match &args.target {
        Some(name) => game.resolver().resolve(validate_name_input(name)?)?.record,
        None => game.random_target(args.mode, &mut rand::rng())?,
    };
    tracing::debug!("Mystery player drawn from {} mode", args.mode);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let result = play_round(
        &game,
        &target.name,
        args.mode,
        &mut stdin.lock(),
        &mut stdout.lock(),
    )?;

    if let OutputFormat::Json = format {
        let output = match result {
            PlayResult::Solved { guesses } => {
                serde_json::json!({"target": target.name, "result": "solved", "guesses": guesses})
            }
            PlayResult::Revealed => serde_json::json!({"target": target.name, "result": "revealed"}),
            PlayResult::Quit => serde_json::json!({"target": target.name, "result": "quit"}),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    }

    Ok(())
}

/// Run one game against `target`, reading guesses line by line from `input`.
///
/// `quit` ends the round and names the answer; `reveal` also shows its
/// closest careers. Unresolvable names are reported and do not count as
/// guesses. End of input behaves like `quit`.
///
/// # Errors
///
/// Returns an error on I/O failure or if the target's pool is empty.
pub fn play_round<R: BufRead, W: Write>(
    game: &Game<'_>,
    target: &str,
    mode: Mode,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<PlayResult> {
    let mut history: Vec<(String, u32)> = Vec::new();
    let mut line = String::new();

    writeln!(out, "NBA Similarity Guessing Game! Guess the mystery player.")?;
    writeln!(out, "Type 'reveal' to show the answer or 'quit' to exit.\n")?;

    loop {
        write!(out, "Your guess: ")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out, "\nThe correct player was: {target}")?;
            return Ok(PlayResult::Quit);
        }

        let guess = line.trim();
        if guess.is_empty() {
            continue;
        }

        if guess.eq_ignore_ascii_case("quit") {
            writeln!(out, "\nThanks for playing. The correct player was: {target}")?;
            return Ok(PlayResult::Quit);
        }

        if guess.eq_ignore_ascii_case("reveal") {
            writeln!(out, "\nThe answer was: {target}")?;
            if let GuessOutcome::Solved { top, .. } = game.guess(target, target, mode)? {
                writeln!(out, "Top {} Closest Players:", top.len())?;
                for player in &top {
                    writeln!(out, "   {:<25} {:>3}/100", player.name, player.score)?;
                }
            }
            return Ok(PlayResult::Revealed);
        }

        let outcome = match validate_name_input(guess) {
            Ok(name) => game.guess(name, target, mode),
            Err(_) => Err(MatchError::NotFound {
                input: guess.to_string(),
            }),
        };

        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(MatchError::NotFound { .. }) => {
                writeln!(out, "Invalid player name.\n")?;
                continue;
            }
            Err(err) => return Err(err.into()),
        };

        history.push((outcome.matched_name().to_string(), outcome.score()));
        let mut sorted = history.clone();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted.truncate(HISTORY_LEN);

        writeln!(out, "\nAttempt #{}", history.len())?;
        writeln!(out, "{}", "-".repeat(40))?;
        writeln!(
            out,
            "Most Recent Guess: {:<25} {:>3}/100",
            outcome.matched_name(),
            outcome.score()
        )?;
        writeln!(out, "{}", "-".repeat(40))?;
        writeln!(out, "Guess History (Sorted by Score):")?;
        for (name, score) in &sorted {
            writeln!(out, "   {name:<25} {score:>3}/100")?;
        }
        writeln!(out, "{}", "-".repeat(40))?;

        if let GuessOutcome::Solved { top, .. } = &outcome {
            writeln!(out, "\nTop {} Closest Players:", top.len())?;
            for player in top {
                writeln!(out, "   {:<25} {:>3}/100", player.name, player.score)?;
            }
            writeln!(
                out,
                "\nYou got it! The answer was {target} in {} guesses.",
                history.len()
            )?;
            return Ok(PlayResult::Solved {
                guesses: history.len(),
            });
        }
        writeln!(out)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::engine::SimilarityEngine;
    use crate::roster::store::PlayerStore;

    fn play(store: &PlayerStore, target: &str, script: &str) -> (PlayResult, String, u64) {
        let engine = SimilarityEngine::default();
        let counter = GuessCounter::new();
        let game = Game::new(store, &engine, &counter);
        let mut input = script.as_bytes();
        let mut out = Vec::new();

        let result = play_round(&game, target, Mode::Classic, &mut input, &mut out).unwrap();
        let guesses = counter.count(target);
        (result, String::from_utf8(out).unwrap(), guesses)
    }

    #[test]
    fn test_solve_after_misses() {
        let store = PlayerStore::load_embedded().unwrap();
        let (result, output, _) = play(
            &store,
            "Klay Thompson",
            "Draymond Green\nnot a player\n\nklay thompson\n",
        );

        assert_eq!(result, PlayResult::Solved { guesses: 2 });
        assert!(output.contains("Invalid player name."));
        assert!(output.contains("Most Recent Guess: Draymond Green"));
        assert!(output.contains("You got it! The answer was Klay Thompson in 2 guesses."));
    }

    #[test]
    fn test_history_sorted_by_score() {
        let store = PlayerStore::load_embedded().unwrap();
        let (_, output, _) = play(&store, "Klay Thompson", "Kawhi Leonard\nDraymond Green\nquit\n");

        let history = output
            .rsplit("Guess History (Sorted by Score):")
            .next()
            .unwrap();
        let draymond = history.find("Draymond Green").unwrap();
        let kawhi = history.find("Kawhi Leonard").unwrap();
        assert!(draymond < kawhi);
    }

    #[test]
    fn test_quit_and_end_of_input() {
        let store = PlayerStore::load_embedded().unwrap();

        let (result, output, guesses) = play(&store, "Kawhi Leonard", "QUIT\n");
        assert_eq!(result, PlayResult::Quit);
        assert!(output.contains("The correct player was: Kawhi Leonard"));
        assert_eq!(guesses, 0);

        let (result, _, _) = play(&store, "Kawhi Leonard", "");
        assert_eq!(result, PlayResult::Quit);
    }

    #[test]
    fn test_reveal_shows_closest() {
        let store = PlayerStore::load_embedded().unwrap();
        let (result, output, _) = play(&store, "Draymond Green", "reveal\n");

        assert_eq!(result, PlayResult::Revealed);
        assert!(output.contains("The answer was: Draymond Green"));
        assert!(output.contains("Closest Players:"));
        assert!(output.contains("Klay Thompson"));
    }
}
