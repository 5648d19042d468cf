// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::record::{
    RawList, RawTour, TourRecord, SENTINEL_DESTINATIONS, SENTINEL_DURATION, SENTINEL_HIGHLIGHT,
    SENTINEL_NAME, SENTINEL_PRICE,
};
use crate::scoring::Completeness;
use atlas_heuristics::{is_umbrella_name, HeuristicsModel, Theme};

/// Fills every missing field, splits delimited lists, derives theme, umbrella flag and metadata.
/// Normalizing an already-normalized record yields an identical record.
pub fn normalize(raw: &RawTour, model: &HeuristicsModel) -> TourRecord {
    let name = raw
        .name
        .as_deref()
        .map(collapse_whitespace)
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| SENTINEL_NAME.to_string());

    let destinations = list_or_sentinel(
        raw.destinations.as_ref().map(split_destinations),
        SENTINEL_DESTINATIONS,
    );
    let highlights = list_or_sentinel(
        raw.highlights.as_ref().map(|h| match h {
            RawList::Items(items) => clean_items(items),
            RawList::Joined(s) => clean_items(std::slice::from_ref(s)),
        }),
        SENTINEL_HIGHLIGHT,
    );

    let duration = raw
        .duration
        .as_deref()
        .map(collapse_whitespace)
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| SENTINEL_DURATION.to_string());

    let price = raw
        .price
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty() && !p.contains("On Request"))
        .map(str::to_string)
        .unwrap_or_else(|| SENTINEL_PRICE.to_string());

    let theme = match raw.theme.as_deref().and_then(Theme::from_label) {
        Some(theme) if theme != Theme::General => theme,
        _ => model.classify(&format!("{} {}", name, destinations.join(" "))),
    };

    let mut record = TourRecord {
        name,
        destinations,
        duration,
        price,
        highlights,
        theme,
        source_url: clean_optional(raw.source_url.as_deref()),
        source_category: clean_optional(raw.source_category.as_deref()),
        is_umbrella_package: false,
        metadata: Default::default(),
    };
    refresh_derived(&mut record);
    log::debug!(
        "[Normalizer] {:?} -> theme={} score={}",
        record.name,
        record.theme,
        record.metadata.completeness_score
    );
    record
}

/// Recomputes the umbrella flag and metadata after any field edit.
pub fn refresh_derived(record: &mut TourRecord) {
    record.is_umbrella_package = is_umbrella_name(&record.name);
    record.metadata = record.metadata();
}

/// Splits on `→` when present, otherwise on commas.
pub fn split_destinations(list: &RawList) -> Vec<String> {
    match list {
        RawList::Items(items) => clean_items(items),
        RawList::Joined(s) => {
            let parts: Vec<String> = if s.contains('→') {
                s.split('→').map(str::to_string).collect()
            } else if s.contains(',') {
                s.split(',').map(str::to_string).collect()
            } else {
                vec![s.clone()]
            };
            clean_items(&parts)
        }
    }
}

pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn clean_items(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn list_or_sentinel(items: Option<Vec<String>>, sentinel: &str) -> Vec<String> {
    match items {
        Some(items) if !items.is_empty() => items,
        _ => vec![sentinel.to_string()],
    }
}

fn clean_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
