// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::normalizer::{normalize, refresh_derived};
use crate::reconcile::CorpusStats;
use crate::record::{parse_raw_str, TourRecord};
use crate::{AtlasError, ProjectLayout};
use atlas_heuristics::HeuristicsModel;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Where a loaded corpus came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorpusSource {
    Cleaned,
    Legacy,
    Empty,
}

/// Immutable query-time snapshot of the canonical corpus.
#[derive(Debug, Clone)]
pub struct Corpus {
    pub tours: Arc<[TourRecord]>,
    pub source: CorpusSource,
}

impl Corpus {
    pub fn new(tours: Vec<TourRecord>) -> Self {
        Self {
            tours: tours.into(),
            source: CorpusSource::Cleaned,
        }
    }

    pub fn empty() -> Self {
        Self {
            tours: Vec::<TourRecord>::new().into(),
            source: CorpusSource::Empty,
        }
    }

    pub fn len(&self) -> usize {
        self.tours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tours.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TourRecord> {
        self.tours.iter()
    }

    /// Cleaned corpus, then the legacy dump (normalized on load), then nothing.
    pub fn load(layout: &ProjectLayout, model: &HeuristicsModel) -> Self {
        let primary = layout.corpus_path();
        match load_cleaned(&primary) {
            Ok(tours) => {
                log::info!("[Corpus] Loaded {} tours from {:?}", tours.len(), primary);
                return Self {
                    tours: tours.into(),
                    source: CorpusSource::Cleaned,
                };
            }
            Err(e) => log::warn!("[Corpus] Cleaned corpus unavailable at {:?}: {}", primary, e),
        }

        let legacy = layout.legacy_corpus_path();
        match load_legacy(&legacy, model) {
            Ok(tours) => {
                log::warn!(
                    "[Corpus] Using legacy data from {:?} ({} tours)",
                    legacy,
                    tours.len()
                );
                Self {
                    tours: tours.into(),
                    source: CorpusSource::Legacy,
                }
            }
            Err(e) => {
                log::warn!(
                    "[Corpus] No tour data available ({:?}: {}); continuing with an empty corpus",
                    legacy,
                    e
                );
                Self::empty()
            }
        }
    }
}

fn load_cleaned(path: &Path) -> Result<Vec<TourRecord>, AtlasError> {
    let content = fs::read_to_string(path)?;
    let mut tours: Vec<TourRecord> = serde_json::from_str(&content)?;
    // Stored metadata is never trusted.
    for tour in &mut tours {
        refresh_derived(tour);
    }
    Ok(tours)
}

fn load_legacy(path: &Path, model: &HeuristicsModel) -> Result<Vec<TourRecord>, AtlasError> {
    let content = fs::read_to_string(path)?;
    let raw = parse_raw_str(&content)?;
    Ok(raw.iter().map(|r| normalize(r, model)).collect())
}

/// Pretty JSON written to a sibling temp file, then renamed over the target.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), AtlasError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = std::path::PathBuf::from(tmp);

    let content = serde_json::to_string_pretty(value)?;
    if let Err(e) = fs::write(&tmp, content) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    fs::rename(&tmp, path)?;
    Ok(())
}

pub fn save_corpus(layout: &ProjectLayout, tours: &[TourRecord]) -> Result<(), AtlasError> {
    let path = layout.corpus_path();
    write_json_atomic(&path, tours)?;
    log::info!("[Corpus] Saved {} tours to {:?}", tours.len(), path);
    Ok(())
}

pub fn save_stats(layout: &ProjectLayout, stats: &CorpusStats) -> Result<(), AtlasError> {
    write_json_atomic(&layout.stats_path(), stats)
}

pub fn load_stats(layout: &ProjectLayout) -> Result<CorpusStats, AtlasError> {
    let content = fs::read_to_string(layout.stats_path())?;
    Ok(serde_json::from_str(&content)?)
}
