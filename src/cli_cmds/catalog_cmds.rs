use anyhow::{bail, Result};
use std::path::{Path, PathBuf};
use swatchy::catalog::ConsolidatedCatalog;
use swatchy::swatch;

pub fn cmd_consolidate(files: &[PathBuf], output: &Path) -> Result<()> {
    let merged = ConsolidatedCatalog::from_files(files);
    if merged.data.is_empty() {
        bail!("No records found in {} catalog file(s)", files.len());
    }
    merged.save(output)?;

    let meta = &merged.metadata;
    println!("Total records processed: {}", meta.total_processed);
    println!("Unique records:          {}", meta.unique_records);
    println!("Duplicates removed:      {}", meta.duplicates_removed);
    println!("Saved to {}", output.display());

    Ok(())
}

pub fn cmd_extract(catalog: &Path, swatches: &Path) -> Result<()> {
    let report = swatch::extract_catalog(catalog, swatches)?;

    println!("Total records:  {}", report.total);
    println!("Processed:      {}", report.processed);
    println!("Missing images: {}", report.missing);
    println!("Errors:         {}", report.errors);
    println!("Updated {}", catalog.display());

    Ok(())
}
