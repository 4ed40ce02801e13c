use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use papernet::{init_logging, render_job, NetJob, OutputFormat, BUILD_DATE, VERSION};

#[derive(Parser)]
#[command(version, about = "Generate fold-and-lock dielines for paper pyramids")]
struct Cli {
    /// Net job file (.toml or .json); the default square pyramid when absent
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the dieline here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Svg)]
    format: OutputFormat,

    /// Write the default job to FILE and exit
    #[arg(long, value_name = "FILE")]
    write_default: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging()?;
    info!(version = VERSION, built = BUILD_DATE, "papernet starting");

    if let Some(path) = &cli.write_default {
        NetJob::default()
            .save(path)
            .with_context(|| format!("writing default job to {}", path.display()))?;
        return Ok(());
    }

    let job = match &cli.config {
        Some(path) => {
            NetJob::load(path).with_context(|| format!("loading job {}", path.display()))?
        }
        None => NetJob::default(),
    };

    let text = render_job(&job, cli.format)?;
    match &cli.output {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("writing dieline to {}", path.display()))?;
            info!(path = %path.display(), "dieline written");
        }
        None => print!("{text}"),
    }

    Ok(())
}
