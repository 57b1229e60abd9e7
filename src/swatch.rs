//! Hex extraction from local swatch images.
//!
//! Swatch files are named after the catalog code (`R01.png`). The color is the
//! average of a 10x10 window at the image center.

use crate::catalog::{self, Record};
use crate::utils::is_image_file;
use anyhow::{bail, Context, Result};
use image::RgbImage;
use rayon::prelude::*;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

const SAMPLE_SIZE: u32 = 10;

/// Average color of the central sample window, integer-divided per channel.
pub fn center_color(img: &RgbImage) -> Option<(u8, u8, u8)> {
    let (width, height) = img.dimensions();
    let (cx, cy) = (width / 2, height / 2);
    let half = SAMPLE_SIZE / 2;

    let left = cx.saturating_sub(half);
    let top = cy.saturating_sub(half);
    let right = (cx + half).min(width);
    let bottom = (cy + half).min(height);

    let mut sum = [0u64; 3];
    let mut count = 0u64;
    for y in top..bottom {
        for x in left..right {
            let px = img.get_pixel(x, y);
            for (acc, channel) in sum.iter_mut().zip(px.0) {
                *acc += u64::from(channel);
            }
            count += 1;
        }
    }

    if count == 0 {
        return None;
    }
    let avg = |c: u64| (c / count) as u8;
    Some((avg(sum[0]), avg(sum[1]), avg(sum[2])))
}

/// Decode an image and sample its center as `#rrggbb`.
pub fn extract_hex(path: &Path) -> Result<String> {
    let img = image::open(path)
        .with_context(|| format!("Failed to open swatch: {}", path.display()))?
        .to_rgb8();
    let Some((r, g, b)) = center_color(&img) else {
        bail!("empty image: {}", path.display());
    };
    Ok(format!("#{r:02x}{g:02x}{b:02x}"))
}

/// Swatch images under `dir` (recursive), keyed by file stem.
///
/// When two files share a stem the first in sorted path order wins.
pub fn index_swatches(dir: &Path) -> Result<HashMap<String, PathBuf>> {
    if !dir.is_dir() {
        bail!("Swatch directory not found: {}", dir.display());
    }

    let mut paths: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && is_image_file(p))
        .collect();
    paths.sort();

    let mut index = HashMap::new();
    for path in paths {
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            index.entry(stem.to_string()).or_insert(path);
        }
    }
    Ok(index)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    pub total: usize,
    pub processed: usize,
    pub missing: usize,
    pub errors: usize,
}

/// Fill the hex field of every record that has a matching swatch.
///
/// Records without a code, or whose code has no swatch, count as missing.
pub fn apply_swatches(records: &mut [Record], swatches: &HashMap<String, PathBuf>) -> ExtractionReport {
    let total = records.len();
    let mut report = ExtractionReport {
        total,
        ..Default::default()
    };

    let jobs: Vec<(usize, &PathBuf)> = records
        .iter()
        .enumerate()
        .filter_map(|(i, record)| {
            let found = catalog::record_code(record).and_then(|code| swatches.get(code));
            if found.is_none() {
                debug!(code = ?catalog::record_code(record), "no swatch for record");
            }
            found.map(|path| (i, path))
        })
        .collect();
    report.missing = total - jobs.len();

    let done = AtomicUsize::new(0);
    let results: Vec<(usize, Result<String>)> = jobs
        .par_iter()
        .map(|(i, path)| {
            let count = done.fetch_add(1, Ordering::Relaxed) + 1;
            if count % 50 == 0 {
                info!("Sampled {}/{} swatches", count, jobs.len());
            }
            (*i, extract_hex(path))
        })
        .collect();

    for (i, result) in results {
        match result {
            Ok(hex) => {
                catalog::set_record_hex(&mut records[i], &hex);
                report.processed += 1;
            }
            Err(e) => {
                warn!(error = %format!("{e:#}"), "swatch extraction failed");
                report.errors += 1;
            }
        }
    }

    report
}

/// Rewrite a `{"data": [...]}` catalog in place with hex values sampled from `swatch_dir`.
/// Other top-level fields are preserved.
pub fn extract_catalog(catalog_path: &Path, swatch_dir: &Path) -> Result<ExtractionReport> {
    let data = fs::read_to_string(catalog_path)
        .with_context(|| format!("Failed to read catalog: {}", catalog_path.display()))?;
    let mut doc: Value = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse catalog: {}", catalog_path.display()))?;

    let Some(Value::Array(items)) = doc.get_mut("data") else {
        bail!("{} has no \"data\" array", catalog_path.display());
    };
    let mut records: Vec<Record> = items
        .drain(..)
        .filter_map(|item| match item {
            Value::Object(record) => Some(record),
            _ => None,
        })
        .collect();

    let swatches = index_swatches(swatch_dir)?;
    info!(swatches = swatches.len(), records = records.len(), "Extracting swatch colors");
    let report = apply_swatches(&mut records, &swatches);

    items.extend(records.into_iter().map(Value::Object));
    let data = serde_json::to_string_pretty(&doc)?;
    fs::write(catalog_path, data)
        .with_context(|| format!("Failed to write {}", catalog_path.display()))?;

    Ok(report)
}
