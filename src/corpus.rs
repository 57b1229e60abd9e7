//! Color corpus loading
//!
//! Turns catalog records into [`Color`] values. Records that cannot become a
//! usable color (no hex, placeholder hex, bad hex, no code, repeated code) are
//! dropped and counted, never fatal.

use crate::catalog::{self, Record};
use crate::color::Color;
use crate::error::SwatchError;
use anyhow::Result;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

const UNKNOWN_NAME: &str = "Unknown";

/// Loader knobs.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Hex values treated as "no color" placeholders (compared case-insensitively, `#` optional).
    pub skip_hex: Vec<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            skip_hex: vec!["#ffffff".to_string()],
        }
    }
}

impl LoadOptions {
    fn is_skipped_hex(&self, hex: &str) -> bool {
        let hex = hex.trim_start_matches('#');
        self.skip_hex
            .iter()
            .any(|s| s.trim_start_matches('#').eq_ignore_ascii_case(hex))
    }
}

/// Why records were left out of the corpus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub missing_hex: usize,
    pub placeholder_hex: usize,
    pub invalid_hex: usize,
    pub missing_code: usize,
    pub duplicate_code: usize,
}

impl LoadReport {
    pub fn skipped(&self) -> usize {
        self.missing_hex
            + self.placeholder_hex
            + self.invalid_hex
            + self.missing_code
            + self.duplicate_code
    }
}

/// Ordered colors, unique by code, in document order.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    colors: Vec<Color>,
}

impl Corpus {
    /// Build from already-parsed colors. Later duplicates of a code are dropped.
    pub fn new(colors: impl IntoIterator<Item = Color>) -> Self {
        let mut seen = HashSet::new();
        let colors = colors
            .into_iter()
            .filter(|c| seen.insert(c.code.clone()))
            .collect();
        Self { colors }
    }

    /// Build from catalog records.
    pub fn from_records(records: &[Record], options: &LoadOptions) -> (Self, LoadReport) {
        let mut report = LoadReport::default();
        let mut seen = HashSet::new();
        let mut colors = Vec::with_capacity(records.len());

        for record in records {
            let name = catalog::record_name(record).unwrap_or(UNKNOWN_NAME);

            let Some(hex) = catalog::record_hex(record) else {
                debug!(name, "skipping record without hex");
                report.missing_hex += 1;
                continue;
            };
            if options.is_skipped_hex(hex) {
                debug!(name, hex, "skipping placeholder color");
                report.placeholder_hex += 1;
                continue;
            }
            let Some(code) = catalog::record_code(record) else {
                debug!(name, "skipping record without code");
                report.missing_code += 1;
                continue;
            };
            if seen.contains(code) {
                debug!(name, code, "skipping duplicate code");
                report.duplicate_code += 1;
                continue;
            }

            match Color::new(name, code, hex) {
                Ok(color) => {
                    seen.insert(code.to_string());
                    colors.push(color);
                }
                Err(e) => {
                    debug!(name, code, error = %e, "skipping record");
                    report.invalid_hex += 1;
                }
            }
        }

        report.loaded = colors.len();
        (Self { colors }, report)
    }

    /// Load a catalog document (`{"data": [...]}` or a name-keyed map).
    pub fn load(path: &Path, options: &LoadOptions) -> Result<(Self, LoadReport)> {
        let records = catalog::read_records(path)?;
        let (corpus, report) = Self::from_records(&records, options);
        info!(
            path = %path.display(),
            loaded = report.loaded,
            skipped = report.skipped(),
            "Loaded color corpus"
        );
        Ok((corpus, report))
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Look up by exact code, then by case-insensitive name.
    pub fn find(&self, key: &str) -> Result<&Color, SwatchError> {
        let key = key.trim();
        self.colors
            .iter()
            .find(|c| c.code == key)
            .or_else(|| self.colors.iter().find(|c| c.name.eq_ignore_ascii_case(key)))
            .ok_or_else(|| SwatchError::ColorNotFound(key.to_string()))
    }
}
