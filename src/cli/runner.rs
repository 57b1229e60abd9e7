use anyhow::Result;
use clap::Parser;
use swatchy::config::Config;
use swatchy::utils::expand_tilde;

use super::{Cli, Commands};
use crate::cli_cmds::*;

pub(crate) async fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(&expand_tilde(path))?,
        None => Config::load()?,
    };
    if let Some(corpus) = &cli.corpus {
        config.corpus.path = expand_tilde(corpus);
    }
    if cli.rng_seed.is_some() {
        config.synthesis.rng_seed = cli.rng_seed;
    }

    match cli.command {
        Commands::Generate {
            output,
            sizes,
            append,
            sequential,
            timeout,
        } => {
            if let Some(output) = output {
                config.output.path = expand_tilde(&output);
            }
            if let Some(sizes) = sizes {
                config.synthesis.sizes = sizes;
            }
            if sequential {
                config.synthesis.parallel = false;
            }
            if timeout.is_some() {
                config.synthesis.timeout_secs = timeout;
            }
            cmd_generate(&config, append).await?;
        }
        Commands::Palette {
            seed,
            size,
            harmony,
            json,
        } => {
            cmd_palette(&config, &seed, size, harmony, json)?;
        }
        Commands::Inspect { hex } => {
            cmd_inspect(&hex)?;
        }
        Commands::Consolidate { files, output } => {
            cmd_consolidate(&files, &expand_tilde(&output))?;
        }
        Commands::Extract { catalog, swatches } => {
            cmd_extract(&expand_tilde(&catalog), &expand_tilde(&swatches))?;
        }
        Commands::Stats { file } => {
            let path = file.map(|f| expand_tilde(&f)).unwrap_or_else(|| config.output.path.clone());
            cmd_stats(&path)?;
        }
        Commands::Rename { file } => {
            let path = file.map(|f| expand_tilde(&f)).unwrap_or_else(|| config.output.path.clone());
            cmd_rename(&config, &path)?;
        }
    }

    Ok(())
}
