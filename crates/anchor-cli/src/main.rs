mod config;

use std::path::{Path, PathBuf};

use anchor_core::{
    ALL_VARIANTS, DistilledLetters, SigilGenerationResult, SigilVariant, distill, export_json,
    generate_all_variants, generate_variant, normalize_letters, prepare_line_art,
    structure_match,
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "anchor", about = "Distill intentions into sigils")]
struct Cli {
    /// Config file (defaults to $ANCHOR_CONFIG, then built-in defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show how an intention reduces to letters
    Distill {
        /// Intention text
        text: String,

        /// Print JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Generate sigil SVG for an intention
    Sigil {
        /// Intention text (or letters with --letters)
        text: String,

        /// Variant to generate: dense, balanced or minimal
        #[arg(long, conflicts_with = "all")]
        variant: Option<SigilVariant>,

        /// Generate all three variants
        #[arg(long)]
        all: bool,

        /// Treat TEXT as already distilled letters
        #[arg(long)]
        letters: bool,

        /// Write <variant>.svg files into this directory
        #[arg(long)]
        out: Option<PathBuf>,

        /// Print JSON results instead of raw SVG
        #[arg(long, conflicts_with = "out")]
        json: bool,
    },

    /// Score each variant's structure against the balanced variant
    Compare {
        /// Intention text (or letters with --letters)
        text: String,

        /// Treat TEXT as already distilled letters
        #[arg(long)]
        letters: bool,
    },

    /// Normalize an SVG file into plain line art
    Prepare {
        /// SVG file to read
        file: PathBuf,

        /// Stroke colour to force on every element
        #[arg(long, default_value = "#FFFFFF")]
        stroke: String,
    },
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load(cli.config.as_deref()).context("failed to load config")?;

    match &cli.command {
        Commands::Distill { text, json } => cmd_distill(text, *json),
        Commands::Sigil {
            text,
            variant,
            all,
            letters,
            out,
            json,
        } => cmd_sigil(
            &config,
            text,
            *variant,
            *all,
            *letters,
            out.as_deref(),
            *json,
        ),
        Commands::Compare { text, letters } => cmd_compare(&config, text, *letters),
        Commands::Prepare { file, stroke } => cmd_prepare(file, stroke),
    }
}

/// Letters to draw for TEXT. Substitutes the configured fallback when nothing survives.
fn resolve_letters(config: &Config, text: &str, as_letters: bool) -> DistilledLetters {
    let letters = if as_letters {
        normalize_letters(text.chars()).0
    } else {
        distill(text).final_letters
    };
    if letters.is_empty() {
        let fallback = config.fallback();
        tracing::warn!("'{text}' distilled to nothing, using fallback letters {fallback}");
        return fallback;
    }
    letters
}

fn join(chars: &[char]) -> String {
    chars.iter().collect()
}

fn cmd_distill(text: &str, json: bool) -> Result<()> {
    let result = distill(text);
    if json {
        let out = serde_json::to_string_pretty(&result).context("failed to serialize result")?;
        println!("{out}");
        return Ok(());
    }
    println!("letters:    {}", result.final_letters);
    println!("vowels:     {}", join(&result.removed_vowels));
    println!("duplicates: {}", join(&result.removed_duplicates));
    if !result.removed_other.is_empty() {
        println!("other:      {:?}", join(&result.removed_other));
    }
    Ok(())
}

fn cmd_sigil(
    config: &Config,
    text: &str,
    variant: Option<SigilVariant>,
    all: bool,
    as_letters: bool,
    out: Option<&Path>,
    json: bool,
) -> Result<()> {
    let letters = resolve_letters(config, text, as_letters);
    let results: Vec<SigilGenerationResult> = if all {
        generate_all_variants(letters.as_slice()).into()
    } else {
        let variant = variant.unwrap_or(config.default_variant);
        vec![generate_variant(letters.as_slice(), variant)]
    };
    tracing::debug!(letters = %letters, count = results.len(), "generated sigils");

    if let Some(dir) = out {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
        for result in &results {
            let path = dir.join(format!("{}.svg", result.variant));
            std::fs::write(&path, &result.svg)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("wrote {}", path.display());
        }
    } else if json {
        println!(
            "{}",
            export_json(&results).context("failed to serialize results")?
        );
    } else {
        for result in &results {
            println!("{}", result.svg);
        }
    }
    Ok(())
}

fn cmd_compare(config: &Config, text: &str, as_letters: bool) -> Result<()> {
    let letters = resolve_letters(config, text, as_letters);
    let results = generate_all_variants(letters.as_slice());
    let masks: Vec<_> = results
        .iter()
        .map(|r| r.rasterize(&config.raster))
        .collect();

    // ALL_VARIANTS puts balanced first, so masks[0] is the reference
    debug_assert_eq!(ALL_VARIANTS[0], SigilVariant::Balanced);
    let reference = &masks[0];

    println!("letters: {letters}");
    println!(
        "{:<10} {:>7} {:>7} {:>9}  classification",
        "variant", "strokes", "iou", "combined"
    );
    for (result, mask) in results.iter().zip(&masks) {
        let score = structure_match(reference, mask, &config.structure);
        println!(
            "{:<10} {:>7} {:>7.3} {:>9.3}  {}",
            result.variant.as_str(),
            result.metadata.stroke_count,
            score.iou,
            score.combined,
            score.classification
        );
    }
    Ok(())
}

fn cmd_prepare(file: &Path, stroke: &str) -> Result<()> {
    let svg = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    println!("{}", prepare_line_art(&svg, stroke));
    Ok(())
}
