use clap::Args;

use crate::cli::guess::print_text_breakdown;
use crate::cli::{OutputFormat, SourceArgs};
use crate::matching::resolver::NameResolver;
use crate::matching::scoring::ScoreBreakdown;
use crate::utils::validation::validate_name_input;

#[derive(Args)]
pub struct CompareArgs {
    /// First player's name
    #[arg(required = true)]
    pub player_a: String,

    /// Second player's name
    #[arg(required = true)]
    pub player_b: String,

    #[command(flatten)]
    pub source: SourceArgs,
}

pub fn run(args: CompareArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let store = args.source.load_store(verbose)?;
    let engine = args.source.load_engine()?;
    let resolver = NameResolver::with_config(&store, args.source.resolver_config());

    let a = resolver.resolve(validate_name_input(&args.player_a)?)?;
    let b = resolver.resolve(validate_name_input(&args.player_b)?)?;

    if verbose {
        eprintln!("Player A: {} ({:?})", a.record.display_name(), a.kind);
        eprintln!("Player B: {} ({:?})", b.record.display_name(), b.kind);
    }

    // Teammate years are read from the first player, so both directions can differ
    let a_vs_b = engine.score(a.record, b.record, b.key());
    let b_vs_a = engine.score(b.record, a.record, a.key());

    match format {
        OutputFormat::Text => print_text_comparison(a.key(), b.key(), &a_vs_b, &b_vs_a),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "player_a": a.key(),
                "player_b": b.key(),
                "a_vs_b": a_vs_b,
                "b_vs_a": b_vs_a,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => print_tsv_comparison(&a_vs_b, &b_vs_a),
    }

    Ok(())
}

fn print_text_comparison(a: &str, b: &str, a_vs_b: &ScoreBreakdown, b_vs_a: &ScoreBreakdown) {
    println!("Comparison Results");
    println!("{}", "=".repeat(60));

    println!("\n{a} vs {b}: {}/100", a_vs_b.total);
    print_text_breakdown(a_vs_b);

    println!("\n{b} vs {a}: {}/100", b_vs_a.total);
    print_text_breakdown(b_vs_a);
}

fn print_tsv_comparison(a_vs_b: &ScoreBreakdown, b_vs_a: &ScoreBreakdown) {
    println!("feature\ta_vs_b\tb_vs_a");
    for ((feature, forward), (_, backward)) in a_vs_b.features().into_iter().zip(b_vs_a.features()) {
        println!("{feature}\t{forward}\t{backward}");
    }
    println!("total\t{}\t{}", a_vs_b.total, b_vs_a.total);
}
