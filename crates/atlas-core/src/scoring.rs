// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Completeness scoring shared by raw and canonical records.

use crate::record::{
    informative_items, RawTour, TourMetadata, TourRecord, SENTINEL_DESTINATIONS, SENTINEL_DURATION,
    SENTINEL_HIGHLIGHT, SENTINEL_PRICE,
};

pub const NAME_WEIGHT: u8 = 10;
pub const DESTINATIONS_WEIGHT: u8 = 30;
pub const PRICE_WEIGHT: u8 = 25;
pub const DURATION_WEIGHT: u8 = 25;
pub const HIGHLIGHTS_WEIGHT: u8 = 10;

/// Field presence as the scorer sees it. "Present" means non-blank and not the sentinel.
pub trait Completeness {
    fn scored_name(&self) -> Option<&str>;
    fn has_destinations(&self) -> bool;
    fn has_price(&self) -> bool;
    fn has_duration(&self) -> bool;
    fn has_highlights(&self) -> bool;

    fn completeness_score(&self) -> u8 {
        let mut score = 0;
        // Generic "... Package"/"... Tour" labels earn nothing for the name.
        if let Some(name) = self.scored_name() {
            if !name.contains("Package") && !name.contains("Tour") {
                score += NAME_WEIGHT;
            }
        }
        if self.has_destinations() {
            score += DESTINATIONS_WEIGHT;
        }
        if self.has_price() {
            score += PRICE_WEIGHT;
        }
        if self.has_duration() {
            score += DURATION_WEIGHT;
        }
        if self.has_highlights() {
            score += HIGHLIGHTS_WEIGHT;
        }
        score
    }

    fn metadata(&self) -> TourMetadata {
        TourMetadata {
            completeness_score: self.completeness_score(),
            has_destinations: self.has_destinations(),
            has_price: self.has_price(),
            has_duration: self.has_duration(),
            has_highlights: self.has_highlights(),
        }
    }
}

fn informative(value: Option<&str>, sentinel: &str) -> bool {
    value
        .map(str::trim)
        .is_some_and(|v| !v.is_empty() && v != sentinel)
}

impl Completeness for RawTour {
    fn scored_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.trim().is_empty())
    }

    fn has_destinations(&self) -> bool {
        self.destinations
            .as_ref()
            .is_some_and(|d| d.is_informative(SENTINEL_DESTINATIONS))
    }

    fn has_price(&self) -> bool {
        informative(self.price.as_deref(), SENTINEL_PRICE)
    }

    fn has_duration(&self) -> bool {
        informative(self.duration.as_deref(), SENTINEL_DURATION)
    }

    fn has_highlights(&self) -> bool {
        self.highlights
            .as_ref()
            .is_some_and(|h| h.is_informative(SENTINEL_HIGHLIGHT))
    }
}

impl Completeness for TourRecord {
    fn scored_name(&self) -> Option<&str> {
        Some(self.name.as_str()).filter(|n| !n.trim().is_empty())
    }

    fn has_destinations(&self) -> bool {
        informative_items(&self.destinations, SENTINEL_DESTINATIONS)
    }

    fn has_price(&self) -> bool {
        informative(Some(self.price.as_str()), SENTINEL_PRICE)
    }

    fn has_duration(&self) -> bool {
        informative(Some(self.duration.as_str()), SENTINEL_DURATION)
    }

    fn has_highlights(&self) -> bool {
        informative_items(&self.highlights, SENTINEL_HIGHLIGHT)
    }
}

/// Exposed operation: completeness score in `[0, 100]`.
pub fn get_completeness<T: Completeness + ?Sized>(record: &T) -> u8 {
    record.completeness_score()
}
