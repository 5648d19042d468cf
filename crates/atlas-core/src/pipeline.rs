// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Batch run: raw scraper drops -> reconciled corpus + statistics -> vector index.

use crate::config::AtlasConfig;
use crate::corpus::{save_corpus, save_stats};
use crate::index::{LexicalIndex, VectorIndex};
use crate::reconcile::{reconcile, ReconcileReport};
use crate::record::{parse_raw_str, RawTour, TourRecord};
use crate::{AtlasError, ProjectLayout, PRIMARY_SOURCE_FILE};
use atlas_heuristics::HeuristicsModel;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceCount {
    pub path: PathBuf,
    pub records: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineSummary {
    pub sources: Vec<SourceCount>,
    pub skipped_sources: Vec<PathBuf>,
    pub raw_total: usize,
    pub cleaned_total: usize,
    pub duplicates_removed: usize,
    pub indexed_chunks: usize,
    pub theme_distribution: BTreeMap<String, usize>,
    pub report: ReconcileReport,
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|s| s.starts_with('.'))
            .unwrap_or(false)
}

/// Every `*.json` under `raw_dir`, sorted by path, with the primary scraper file first.
pub fn discover_sources(raw_dir: &Path) -> Vec<PathBuf> {
    let mut sources: Vec<PathBuf> = WalkDir::new(raw_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e))
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .map(|ext| ext.eq_ignore_ascii_case("json"))
                .unwrap_or(false)
        })
        .collect();

    sources.sort();
    let is_primary = |p: &PathBuf| {
        p.parent() == Some(raw_dir) && p.file_name().map(|n| n == PRIMARY_SOURCE_FILE).unwrap_or(false)
    };
    // Stable: everything else keeps path order.
    sources.sort_by_key(|p| !is_primary(p));
    sources
}

fn read_source(path: &Path) -> Result<Vec<RawTour>, AtlasError> {
    let content = fs::read_to_string(path)?;
    parse_raw_str(&content)
}

/// Rebuilds the vector index from `corpus` and persists it under `index/`.
pub fn rebuild_index(
    layout: &ProjectLayout,
    corpus: &[TourRecord],
    config: &AtlasConfig,
) -> Result<usize, AtlasError> {
    let mut index = LexicalIndex::new(config.similarity_threshold);
    let chunks = index.index(corpus)?;
    index.save(&layout.index_path())?;
    Ok(chunks)
}

/// Full run. Layout problems and an empty `raw/` drop halt before anything is written.
pub fn run_pipeline<P: AsRef<Path>>(
    root: P,
    model: &HeuristicsModel,
    config: &AtlasConfig,
) -> Result<PipelineSummary, AtlasError> {
    let layout = ProjectLayout::new(root)?;
    let raw_dir = layout.raw_dir();

    let paths = discover_sources(&raw_dir);
    if paths.is_empty() {
        log::error!("[Pipeline] No raw source files in {:?}", raw_dir);
        return Err(AtlasError::NoSources(raw_dir));
    }
    log::info!("[Pipeline] Step 1/3: merging {} source file(s)", paths.len());

    let mut merged = Vec::new();
    let mut sources = Vec::new();
    let mut skipped_sources = Vec::new();
    for path in paths {
        match read_source(&path) {
            Ok(records) => {
                log::info!("[Pipeline] {:?}: {} records", path, records.len());
                sources.push(SourceCount {
                    path,
                    records: records.len(),
                });
                merged.extend(records);
            }
            Err(e) => {
                log::warn!("[Pipeline] Skipping unreadable source {:?}: {}", path, e);
                skipped_sources.push(path);
            }
        }
    }

    if sources.is_empty() {
        log::error!("[Pipeline] Every source under {:?} was unreadable", raw_dir);
        return Err(AtlasError::NoSources(raw_dir));
    }

    let raw_total = merged.len();
    log::info!("[Pipeline] Step 2/3: reconciling {} raw records", raw_total);
    let (corpus, report) = reconcile(merged, model);

    layout.ensure_output_dirs()?;
    save_corpus(&layout, &corpus)?;
    save_stats(&layout, &report.stats)?;

    log::info!("[Pipeline] Step 3/3: rebuilding vector index");
    let indexed_chunks = rebuild_index(&layout, &corpus, config)?;

    let summary = PipelineSummary {
        sources,
        skipped_sources,
        raw_total,
        cleaned_total: corpus.len(),
        duplicates_removed: report.duplicates_removed,
        indexed_chunks,
        theme_distribution: report.stats.theme_distribution.clone(),
        report,
    };
    log::info!(
        "[Pipeline] Done: {} raw -> {} tours ({} duplicates removed)",
        summary.raw_total,
        summary.cleaned_total,
        summary.duplicates_removed
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_discover_sources_primary_first() {
        let dir = tempdir().unwrap();
        let raw = dir.path().join("raw");
        fs::create_dir_all(raw.join("extra")).unwrap();
        for name in ["a_backup.json", PRIMARY_SOURCE_FILE, "notes.txt", ".hidden.json"] {
            fs::write(raw.join(name), "[]").unwrap();
        }
        fs::write(raw.join("extra").join("b.json"), "[]").unwrap();

        let found = discover_sources(&raw);
        assert_eq!(
            found,
            vec![
                raw.join(PRIMARY_SOURCE_FILE),
                raw.join("a_backup.json"),
                raw.join("extra").join("b.json"),
            ]
        );
    }

    #[test]
    fn test_empty_raw_dir_has_no_sources() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("raw")).unwrap();
        assert!(discover_sources(&dir.path().join("raw")).is_empty());
    }
}
