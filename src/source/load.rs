use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    foundation::error::{CascadeError, CascadeResult},
    source::record::{GenerationRecord, StoryboardRecord},
};

pub fn parse_generation_record(json: &str) -> CascadeResult<GenerationRecord> {
    serde_json::from_str(json).map_err(|e| CascadeError::serde(e.to_string()))
}

pub fn parse_storyboard(json: &str) -> CascadeResult<StoryboardRecord> {
    serde_json::from_str(json).map_err(|e| CascadeError::serde(e.to_string()))
}

/// `*.json` files directly inside `dir`, sorted by file name.
pub fn json_files_in(dir: &Path) -> CascadeResult<Vec<PathBuf>> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("read directory '{}'", dir.display()))?;
    let mut out = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("list directory '{}'", dir.display()))?
            .path();
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json && path.is_file() {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}

/// Loads every generation record in `dir` in file-name order.
#[tracing::instrument]
pub fn load_generation_records(dir: &Path) -> CascadeResult<Vec<GenerationRecord>> {
    let files = json_files_in(dir)?;
    let mut records = Vec::with_capacity(files.len());
    for path in &files {
        let text = read_text(path)?;
        let record = parse_generation_record(&text)
            .map_err(|e| CascadeError::serde(format!("'{}': {e}", path.display())))?;
        records.push(record);
    }
    tracing::debug!(count = records.len(), "loaded generation records");
    Ok(records)
}

pub fn load_storyboard(path: &Path) -> CascadeResult<StoryboardRecord> {
    let text = read_text(path)?;
    parse_storyboard(&text).map_err(|e| CascadeError::serde(format!("'{}': {e}", path.display())))
}

fn read_text(path: &Path) -> CascadeResult<String> {
    Ok(std::fs::read_to_string(path).with_context(|| format!("read '{}'", path.display()))?)
}

#[cfg(test)]
#[path = "../../tests/unit/source/load.rs"]
mod tests;
