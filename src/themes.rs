//! Theme documents on disk and summaries over them.

use crate::color::Color;
use crate::harmony::HarmonyType;
use crate::naming::theme_name;
use crate::synth::Theme;
use anyhow::{Context, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// `{"generated_at": ..., "themes": [...]}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
    #[serde(default)]
    pub themes: Vec<Theme>,
}

impl ThemeFile {
    pub fn new(themes: Vec<Theme>) -> Self {
        Self {
            generated_at: Some(chrono::Local::now().to_rfc3339()),
            themes,
        }
    }

    /// Load a theme document. A missing file is an empty document; a file that
    /// cannot be read or parsed is an error so callers never overwrite it.
    pub fn load(path: &Path) -> Result<Self> {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no theme document");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()));
            }
        };
        serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse theme document: {}", path.display()))
    }

    pub fn save(&self, path: &Path, pretty: bool) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let data = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        fs::write(path, data).with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(())
    }

    /// Append themes and restamp the document.
    pub fn extend(&mut self, themes: Vec<Theme>) {
        self.themes.extend(themes);
        self.generated_at = Some(chrono::Local::now().to_rfc3339());
    }

    pub fn stats(&self) -> ThemeStats {
        ThemeStats::from_themes(&self.themes)
    }
}

/// Copy `path` to `<path>.bak` unless a backup already exists.
pub fn backup_once(path: &Path) -> Result<Option<PathBuf>> {
    let mut backup = path.as_os_str().to_owned();
    backup.push(".bak");
    let backup = PathBuf::from(backup);

    if backup.exists() || !path.exists() {
        return Ok(None);
    }
    fs::copy(path, &backup)
        .with_context(|| format!("Failed to back up {}", path.display()))?;
    Ok(Some(backup))
}

/// Replace every theme name with a freshly drawn heuristic name.
///
/// Themes whose colors no longer parse keep their old name. Returns how many
/// names were replaced.
pub fn rename_themes<R: Rng + ?Sized>(themes: &mut [Theme], rng: &mut R) -> usize {
    let mut renamed = 0;

    for theme in themes.iter_mut() {
        let colors: Result<Vec<Color>, _> = theme
            .colors
            .iter()
            .map(|c| Color::new(c.name.as_str(), c.code.as_str(), c.hex.as_str()))
            .collect();
        let colors = match colors {
            Ok(colors) if !colors.is_empty() => colors,
            Ok(_) => continue,
            Err(e) => {
                debug!(theme = %theme.theme_name, error = %e, "keeping name");
                continue;
            }
        };

        let palette: Vec<&Color> = colors.iter().collect();
        theme.theme_name = theme_name(palette[0], theme.harmony_type.as_str(), &palette, rng);
        renamed += 1;
    }

    renamed
}

/// Theme counts by palette size and by harmony.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeStats {
    pub total: usize,
    pub by_size: BTreeMap<usize, usize>,
    pub by_harmony: BTreeMap<HarmonyType, usize>,
}

impl ThemeStats {
    pub fn from_themes(themes: &[Theme]) -> Self {
        let mut stats = Self {
            total: themes.len(),
            ..Default::default()
        };
        for theme in themes {
            *stats.by_size.entry(theme.palette_size).or_insert(0) += 1;
            *stats.by_harmony.entry(theme.harmony_type).or_insert(0) += 1;
        }
        stats
    }

    /// Plain-text report, one count per line.
    pub fn report(&self) -> String {
        let mut out = format!("Total themes: {}\n", self.total);

        out.push_str("\nBy palette size:\n");
        for (size, count) in &self.by_size {
            out.push_str(&format!("  {size} colors: {count}\n"));
        }

        out.push_str("\nBy harmony type:\n");
        for (harmony, count) in &self.by_harmony {
            out.push_str(&format!("  {}: {count}\n", harmony.display_name()));
        }

        out
    }
}
