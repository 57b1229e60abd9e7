use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use swatchy::config::Config;
use swatchy::themes::ThemeFile;
use swatchy::{Synthesizer, Theme};
use tracing::{info, warn};

use super::{base_seed, load_corpus};

pub async fn cmd_generate(config: &Config, append: bool) -> Result<()> {
    // an unparsable document stops here, before anything is written
    let path = &config.output.path;
    let mut file = if append {
        ThemeFile::load(path)?
    } else {
        ThemeFile::default()
    };

    let corpus = load_corpus(config)?;
    if corpus.is_empty() {
        warn!(path = %config.corpus.path.display(), "Corpus has no usable colors");
    }

    let filter = config.synthesis.seed_filter();
    let sizes = config.synthesis.sizes.clone();
    let per_size = config.synthesis.palettes_per_size;
    let parallel = config.synthesis.parallel;
    let seed = base_seed(config);
    let cancel = Arc::new(AtomicBool::new(false));

    let flag = Arc::clone(&cancel);
    let mut handle = tokio::task::spawn_blocking(move || -> Result<Vec<Theme>> {
        let synth = Synthesizer::new(corpus.colors(), &filter, &sizes)?.with_palettes_per_size(per_size);
        info!(
            seeds = synth.seeds().len(),
            sizes = ?synth.sizes(),
            max_themes = synth.max_themes(),
            parallel,
            "Generating themes"
        );
        let themes = if parallel {
            synth.run_parallel(seed, &flag)
        } else {
            synth.run(&mut StdRng::seed_from_u64(seed), &flag)
        };
        Ok(themes)
    });

    let themes = match config.synthesis.timeout_secs {
        Some(secs) => match tokio::time::timeout(Duration::from_secs(secs), &mut handle).await {
            Ok(joined) => joined??,
            Err(_) => {
                warn!("Synthesis timed out after {}s, keeping finished seeds", secs);
                cancel.store(true, Ordering::Relaxed);
                handle.await??
            }
        },
        None => handle.await??,
    };

    let existing = file.themes.len();
    let added = themes.len();
    file.extend(themes);
    file.save(path, config.output.pretty)?;

    if existing > 0 {
        println!(
            "Added {} themes to {} existing in {}",
            added,
            existing,
            path.display()
        );
    } else {
        println!("Wrote {} themes to {}", added, path.display());
    }
    println!();
    print!("{}", file.stats().report());

    Ok(())
}
