use clap::Args;

use crate::cli::{OutputFormat, SourceArgs};
use crate::matching::resolver::{NameResolver, ResolutionKind};
use crate::matching::MatchError;
use crate::utils::validation::validate_name_input;

#[derive(Args)]
pub struct ResolveArgs {
    /// Name to resolve
    #[arg(required = true)]
    pub name: String,

    /// Number of near misses to suggest when nothing matches
    #[arg(long, default_value = "3")]
    pub suggestions: usize,

    #[command(flatten)]
    pub source: SourceArgs,
}

pub fn run(args: ResolveArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let store = args.source.load_store(verbose)?;
    let resolver = NameResolver::with_config(&store, args.source.resolver_config());
    let input = validate_name_input(&args.name)?;

    let resolution = match resolver.resolve(input) {
        Ok(resolution) => resolution,
        Err(err @ MatchError::NotFound { .. }) => {
            let near = resolver.closest(input, args.suggestions);
            if !near.is_empty() {
                eprintln!("Closest names:");
                for (name, ratio) in near {
                    eprintln!("  {name:<25} {ratio:.3}");
                }
            }
            return Err(err.into());
        }
        Err(err) => return Err(err.into()),
    };

    let (kind, ratio) = match resolution.kind {
        ResolutionKind::Exact => ("exact", 1.0),
        ResolutionKind::Fuzzy { ratio } => ("fuzzy", ratio),
    };

    match format {
        OutputFormat::Text => {
            println!("{} -> {}", args.name.trim(), resolution.key());
            println!("  Match: {kind}");
            println!("  Ratio: {ratio:.3}");
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "input": args.name,
                "matched_name": resolution.key(),
                "match": kind,
                "ratio": ratio,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("input\tmatched_name\tmatch\tratio");
            println!(
                "{}\t{}\t{}\t{:.4}",
                args.name.trim(),
                resolution.key(),
                kind,
                ratio
            );
        }
    }

    Ok(())
}
