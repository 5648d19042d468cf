// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Turns raw scraper output into the canonical, deduplicated corpus.

pub mod stats;

use crate::normalizer::{collapse_whitespace, normalize, refresh_derived};
use crate::record::{RawTour, TourRecord};
use crate::scoring::Completeness;
use atlas_heuristics::{is_all_caps, is_all_digits, is_umbrella_name, HeuristicsModel};
use regex::Regex;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

pub use stats::CorpusStats;

pub const MIN_NAME_CHARS: usize = 5;

/// Counters for one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReconcileReport {
    pub total_input: usize,
    pub total_output: usize,
    pub duplicates_removed: usize,
    pub rejected_short_name: usize,
    pub rejected_noise: usize,
    pub rejected_not_tour: usize,
    pub rejected_collision: usize,
    pub umbrella_packages: usize,
    pub stats: CorpusStats,
}

#[derive(Default)]
struct DedupState {
    kept: Vec<RawTour>,
    index: HashMap<String, usize>,
    short: usize,
    duplicates: usize,
}

/// Name-keyed dedup. A strictly higher completeness score replaces the stored record;
/// ties keep the first-seen one. Survivors keep first-seen order.
fn dedup(records: Vec<RawTour>) -> DedupState {
    records
        .into_iter()
        .fold(DedupState::default(), |mut state, record| {
            let name = record.trimmed_name().to_string();
            if name.chars().count() < MIN_NAME_CHARS {
                state.short += 1;
                return state;
            }
            match state.index.get(&name) {
                Some(&slot) => {
                    state.duplicates += 1;
                    let stored = state.kept[slot].completeness_score();
                    let incoming = record.completeness_score();
                    log::debug!(
                        "[Reconcile] Duplicate {:?}: stored={} incoming={}",
                        name,
                        stored,
                        incoming
                    );
                    if incoming > stored {
                        state.kept[slot] = record;
                    }
                }
                None => {
                    state.index.insert(name, state.kept.len());
                    state.kept.push(record);
                }
            }
            state
        })
}

fn strip_numeric_prefix(name: &str) -> String {
    static RE_PREFIX: OnceLock<Regex> = OnceLock::new();
    let re = RE_PREFIX.get_or_init(|| Regex::new(r"^\d+\+?\s*").unwrap());

    let mut current = name.to_string();
    loop {
        let next = re.replace(&current, "").into_owned();
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Final name cleanup: single spaces, no leading "10+ " style counters.
pub fn clean_name(name: &str) -> String {
    strip_numeric_prefix(&collapse_whitespace(name))
}

fn is_rejected_as_noise(model: &HeuristicsModel, name: &str) -> bool {
    if let Some(pattern) = model.matching_noise_pattern(name) {
        log::debug!("[Reconcile] Noise {:?} (pattern {:?})", name, pattern);
        return true;
    }
    is_all_caps(name) || is_all_digits(name)
}

fn looks_like_tour(model: &HeuristicsModel, raw: &RawTour, record: &TourRecord) -> bool {
    model.has_tour_indicator(&record.name)
        || record.has_price()
        || record.has_duration()
        || raw.source_url.as_deref().is_some_and(|url| {
            let url = url.to_lowercase();
            url.contains("tour") || url.contains("package")
        })
}

/// Reconciles raw records into the canonical corpus.
///
/// Never fails on individual records; every rejection is counted in the report.
/// Running it again on its own output returns the same corpus.
pub fn reconcile(records: Vec<RawTour>, model: &HeuristicsModel) -> (Vec<TourRecord>, ReconcileReport) {
    let mut report = ReconcileReport {
        total_input: records.len(),
        ..Default::default()
    };

    let deduped = dedup(records);
    report.rejected_short_name = deduped.short;
    report.duplicates_removed = deduped.duplicates;
    log::info!(
        "[Reconcile] {} unique names after dedup ({} duplicates, {} short names)",
        deduped.kept.len(),
        deduped.duplicates,
        deduped.short
    );

    let mut corpus = Vec::new();
    let mut emitted: HashSet<String> = HashSet::new();

    for raw in &deduped.kept {
        let name = raw.trimmed_name();
        if is_rejected_as_noise(model, name) {
            report.rejected_noise += 1;
            continue;
        }

        let mut record = normalize(raw, model);
        let umbrella = is_umbrella_name(&record.name);
        if !umbrella && !looks_like_tour(model, raw, &record) {
            log::debug!("[Reconcile] Not a tour: {:?}", record.name);
            report.rejected_not_tour += 1;
            continue;
        }

        let cleaned = clean_name(&record.name);
        if cleaned.chars().count() < MIN_NAME_CHARS {
            report.rejected_short_name += 1;
            continue;
        }
        if is_rejected_as_noise(model, &cleaned) {
            report.rejected_noise += 1;
            continue;
        }
        if cleaned != record.name {
            log::debug!("[Reconcile] Renamed {:?} -> {:?}", record.name, cleaned);
            record.name = cleaned;
            refresh_derived(&mut record);
        }

        if !emitted.insert(record.name.clone()) {
            report.rejected_collision += 1;
            continue;
        }
        if record.is_umbrella_package {
            report.umbrella_packages += 1;
        }
        corpus.push(record);
    }

    report.total_output = corpus.len();
    report.stats = CorpusStats::from_corpus(&corpus);
    log::info!(
        "[Reconcile] Kept {} of {} raw entries (noise={}, not_tour={}, collisions={})",
        report.total_output,
        report.total_input,
        report.rejected_noise,
        report.rejected_not_tour,
        report.rejected_collision
    );

    (corpus, report)
}
