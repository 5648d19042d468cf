// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::record::TourRecord;
use crate::scoring::Completeness;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field coverage of a corpus. Serialized as `data_statistics.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorpusStats {
    pub total_tours: usize,
    pub tours_with_destinations: usize,
    pub tours_with_price: usize,
    pub tours_with_duration: usize,
    pub tours_with_highlights: usize,
    pub destinations_percentage: f64,
    pub price_percentage: f64,
    pub duration_percentage: f64,
    pub highlights_percentage: f64,
    pub theme_distribution: BTreeMap<String, usize>,
}

impl CorpusStats {
    pub fn from_corpus(tours: &[TourRecord]) -> Self {
        let total = tours.len();
        let count = |f: fn(&TourRecord) -> bool| tours.iter().filter(|t| f(t)).count();

        let with_destinations = count(|t| t.has_destinations());
        let with_price = count(|t| t.has_price());
        let with_duration = count(|t| t.has_duration());
        let with_highlights = count(|t| t.has_highlights());

        let mut theme_distribution = BTreeMap::new();
        for tour in tours {
            *theme_distribution
                .entry(tour.theme.label().to_string())
                .or_insert(0) += 1;
        }

        Self {
            total_tours: total,
            tours_with_destinations: with_destinations,
            tours_with_price: with_price,
            tours_with_duration: with_duration,
            tours_with_highlights: with_highlights,
            destinations_percentage: percentage(with_destinations, total),
            price_percentage: percentage(with_price, total),
            duration_percentage: percentage(with_duration, total),
            highlights_percentage: percentage(with_highlights, total),
            theme_distribution,
        }
    }

    /// Themes by descending count, ties alphabetical.
    pub fn themes_by_count(&self) -> Vec<(&str, usize)> {
        let mut themes: Vec<(&str, usize)> = self
            .theme_distribution
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        themes.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        themes
    }
}

/// Percentage rounded to one decimal; 0 for an empty corpus.
fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    ((part as f64 / total as f64) * 1000.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(1, 3), 33.3);
        assert_eq!(percentage(2, 3), 66.7);
        assert_eq!(percentage(3, 3), 100.0);
    }

    #[test]
    fn test_empty_corpus() {
        let stats = CorpusStats::from_corpus(&[]);
        assert_eq!(stats.total_tours, 0);
        assert_eq!(stats.price_percentage, 0.0);
        assert!(stats.theme_distribution.is_empty());
    }
}
