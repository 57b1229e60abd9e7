//! Raw catalog documents
//!
//! Catalog pages come from third-party exports and carry whatever fields the
//! exporter produced. Records are kept as JSON objects so every field survives
//! consolidation and swatch extraction; only name, code and hex are interpreted.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

pub type Record = Map<String, Value>;

const NAME_KEYS: &[&str] = &["Color Name", "name"];
const CODE_KEYS: &[&str] = &["New", "code", "c4"];
/// Consolidation keys on the exporter's unified code first.
const MERGE_KEYS: &[&str] = &["c4", "New", "code"];
const HEX_KEYS: &[&str] = &["Hex", "hex"];

/// Key written when a record gets a hex value and has none yet.
pub const HEX_FIELD: &str = "Hex";

fn text_field<'a>(record: &'a Record, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|s| !s.is_empty())
}

pub fn record_name(record: &Record) -> Option<&str> {
    text_field(record, NAME_KEYS)
}

pub fn record_code(record: &Record) -> Option<&str> {
    text_field(record, CODE_KEYS)
}

/// Code used to deduplicate and order catalog pages.
pub fn record_merge_key(record: &Record) -> Option<&str> {
    text_field(record, MERGE_KEYS)
}

pub fn record_hex(record: &Record) -> Option<&str> {
    text_field(record, HEX_KEYS)
}

/// Overwrite the record's hex, reusing whichever hex key it already has.
pub fn set_record_hex(record: &mut Record, hex: &str) {
    let key = HEX_KEYS
        .iter()
        .find(|key| record.contains_key(**key))
        .copied()
        .unwrap_or(HEX_FIELD);
    record.insert(key.to_string(), Value::String(hex.to_string()));
}

/// Records from either `{"data": [...]}` or a name-keyed map `{"<name>": {...}}`.
pub fn records_from_value(value: Value) -> Result<Vec<Record>> {
    let Value::Object(mut root) = value else {
        bail!("catalog must be a JSON object");
    };

    if let Some(data) = root.remove("data") {
        let Value::Array(items) = data else {
            bail!("catalog \"data\" must be an array");
        };
        return Ok(items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(record) => Some(record),
                other => {
                    debug!(?other, "skipping non-object catalog entry");
                    None
                }
            })
            .collect());
    }

    Ok(root
        .into_iter()
        .filter_map(|(name, item)| match item {
            Value::Object(mut record) => {
                if record_name(&record).is_none() {
                    record.insert(NAME_KEYS[0].to_string(), Value::String(name));
                }
                Some(record)
            }
            _ => None,
        })
        .collect())
}

/// Read a catalog file into its records.
pub fn read_records(path: &Path) -> Result<Vec<Record>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
    let value: Value = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse catalog: {}", path.display()))?;
    records_from_value(value).with_context(|| format!("Unexpected catalog shape: {}", path.display()))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolidationMetadata {
    pub total_processed: usize,
    pub unique_records: usize,
    pub duplicates_removed: usize,
}

/// Catalog pages merged into one document, deduplicated by unified code.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsolidatedCatalog {
    pub metadata: ConsolidationMetadata,
    pub data: Vec<Record>,
}

impl ConsolidatedCatalog {
    /// Merge record batches in order. The first record seen for a merge key
    /// wins; records without one are dropped. Output is sorted by that key.
    pub fn merge<I>(batches: I) -> Self
    where
        I: IntoIterator<Item = Vec<Record>>,
    {
        let mut unique: BTreeMap<String, Record> = BTreeMap::new();
        let mut metadata = ConsolidationMetadata::default();

        for record in batches.into_iter().flatten() {
            metadata.total_processed += 1;
            let Some(code) = record_merge_key(&record).map(str::to_string) else {
                debug!("skipping record without a code");
                continue;
            };
            if unique.contains_key(&code) {
                metadata.duplicates_removed += 1;
                continue;
            }
            unique.insert(code, record);
        }

        metadata.unique_records = unique.len();
        Self {
            metadata,
            data: unique.into_values().collect(),
        }
    }

    /// Merge catalog files; unreadable files are logged and skipped.
    pub fn from_files(paths: &[impl AsRef<Path>]) -> Self {
        let batches = paths.iter().filter_map(|path| {
            let path = path.as_ref();
            match read_records(path) {
                Ok(records) => Some(records),
                Err(e) => {
                    warn!(path = %path.display(), error = %format!("{e:#}"), "skipping catalog page");
                    None
                }
            }
        });
        Self::merge(batches)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}
