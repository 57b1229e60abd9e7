use anyhow::{bail, Result};
use std::path::Path;
use swatchy::config::Config;
use swatchy::themes::{backup_once, rename_themes, ThemeFile};

use super::rng;

pub fn cmd_stats(path: &Path) -> Result<()> {
    let file = ThemeFile::load(path)?;
    if file.themes.is_empty() {
        println!("No themes in {}", path.display());
        return Ok(());
    }

    if let Some(at) = &file.generated_at {
        println!("Generated at: {}", at);
    }
    print!("{}", file.stats().report());

    Ok(())
}

pub fn cmd_rename(config: &Config, path: &Path) -> Result<()> {
    let mut file = ThemeFile::load(path)?;
    if file.themes.is_empty() {
        bail!("No themes to rename in {}", path.display());
    }

    if let Some(backup) = backup_once(path)? {
        println!("Created backup: {}", backup.display());
    }

    let renamed = rename_themes(&mut file.themes, &mut rng(config));
    file.save(path, config.output.pretty)?;

    println!("Renamed {}/{} themes in {}", renamed, file.themes.len(), path.display());

    Ok(())
}
