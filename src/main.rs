//! bitnorm - bit cast normalization for canonical query expression trees

use anyhow::{Context, Result};
use bitnorm::expression::{normalize_expression, validate_expression, Expression};
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;

/// Repair bit cast placement in a JSON-encoded canonical expression tree
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input file with a JSON-encoded expression (stdin if omitted)
    input: Option<PathBuf>,

    /// Pretty-print the normalized tree
    #[arg(short, long)]
    pretty: bool,

    /// Validate bit type agreement after normalizing
    #[arg(short, long)]
    check: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let raw = match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    let expr: Expression =
        serde_json::from_str(&raw).context("Failed to parse expression tree")?;
    let normalized = normalize_expression(expr);

    if args.check {
        validate_expression(&normalized).context("Normalized tree failed bit agreement check")?;
    }

    let out = if args.pretty {
        serde_json::to_string_pretty(&normalized)?
    } else {
        serde_json::to_string(&normalized)?
    };
    println!("{}", out);

    Ok(())
}
