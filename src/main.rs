use anyhow::Context;
use clap::Parser;
use log::info;
use nearby::input::{parse_workload, write_answers};
use nearby::{Config, SpatialIndexKind};
use std::io::{BufWriter, Read};
use std::path::PathBuf;

/// Answer nearest topic and question queries from a workload file or stdin.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Workload file; stdin when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Configuration file (.json, or .toml with the `toml` feature)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Spatial index implementation, overriding the configuration file
    #[arg(long)]
    index: Option<SpatialIndexKind>,

    /// Log build and query progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "nearby=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(kind) = args.index {
        config = config.with_spatial_index(kind);
    }

    let text = match &args.input {
        Some(path) => {
            info!("Reading workload from {}", path.display());
            std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?
        }
        None => {
            info!("Reading workload from stdin");
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("reading stdin")?;
            text
        }
    };

    let answers = parse_workload(&text)?.run(config)?;

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_answers(&mut out, &answers).context("writing answers")?;

    Ok(())
}
