mod catalog_cmds;
mod generate;
mod palette_cmds;
mod theme_cmds;

pub use catalog_cmds::{cmd_consolidate, cmd_extract};
pub use generate::cmd_generate;
pub use palette_cmds::{cmd_inspect, cmd_palette};
pub use theme_cmds::{cmd_rename, cmd_stats};

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use swatchy::config::Config;
use swatchy::Corpus;
use tracing::info;

fn load_corpus(config: &Config) -> Result<Corpus> {
    let (corpus, _report) = Corpus::load(&config.corpus.path, &config.corpus.load_options())?;
    Ok(corpus)
}

/// Configured seed, or a fresh one that gets logged so the run can be repeated.
fn base_seed(config: &Config) -> u64 {
    config.synthesis.rng_seed.unwrap_or_else(|| {
        let seed = rand::random();
        info!("Using rng seed {}", seed);
        seed
    })
}

fn rng(config: &Config) -> StdRng {
    StdRng::seed_from_u64(base_seed(config))
}
