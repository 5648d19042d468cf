// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::AtlasError;
use atlas_heuristics::Theme;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const SENTINEL_NAME: &str = "Unnamed tour";
pub const SENTINEL_DESTINATIONS: &str = "Destinations available on request";
pub const SENTINEL_DURATION: &str = "Duration varies by package";
pub const SENTINEL_PRICE: &str = "Contact for price";
pub const SENTINEL_HIGHLIGHT: &str = "Customizable tour package - contact for details";

/// A list-valued scraper field. Scrapers emit either a JSON list or one delimited string.
#[derive(Debug, Clone, PartialEq)]
pub enum RawList {
    Joined(String),
    Items(Vec<String>),
}

impl RawList {
    /// True when the field carries something other than blanks or the given sentinel.
    pub fn is_informative(&self, sentinel: &str) -> bool {
        match self {
            RawList::Joined(s) => {
                let s = s.trim();
                !s.is_empty() && s != sentinel
            }
            RawList::Items(items) => informative_items(items, sentinel),
        }
    }
}

/// A list is informative unless it is empty after dropping blanks, or exactly `[sentinel]`.
pub fn informative_items<S: AsRef<str>>(items: &[S], sentinel: &str) -> bool {
    let real: Vec<&str> = items
        .iter()
        .map(|s| s.as_ref().trim())
        .filter(|s| !s.is_empty())
        .collect();
    !real.is_empty() && real != [sentinel]
}

/// Loosely typed scraper record. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTour {
    pub name: Option<String>,
    pub source_url: Option<String>,
    pub source_category: Option<String>,
    pub destinations: Option<RawList>,
    pub duration: Option<String>,
    pub price: Option<String>,
    pub highlights: Option<RawList>,
    pub theme: Option<String>,
}

impl RawTour {
    /// Reads one scraper mapping. Returns `None` for anything that is not a JSON object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            name: first_text(obj, &["name"]),
            source_url: first_text(obj, &["source_url", "url"]),
            source_category: first_text(obj, &["source_category", "category", "source_tab"]),
            destinations: loose_list(obj.get("destinations")),
            duration: first_text(obj, &["duration"]),
            price: first_text(obj, &["price"]),
            highlights: loose_list(obj.get("highlights")),
            theme: first_text(obj, &["theme"]),
        })
    }

    pub fn trimmed_name(&self) -> &str {
        self.name.as_deref().map(str::trim).unwrap_or("")
    }
}

impl From<&TourRecord> for RawTour {
    fn from(record: &TourRecord) -> Self {
        Self {
            name: Some(record.name.clone()),
            source_url: record.source_url.clone(),
            source_category: record.source_category.clone(),
            destinations: Some(RawList::Items(record.destinations.clone())),
            duration: Some(record.duration.clone()),
            price: Some(record.price.clone()),
            highlights: Some(RawList::Items(record.highlights.clone())),
            theme: Some(record.theme.label().to_string()),
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn first_text(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| {
        obj.get(*k)
            .and_then(scalar_text)
            .filter(|s| !s.trim().is_empty())
    })
}

fn loose_list(value: Option<&Value>) -> Option<RawList> {
    match value? {
        Value::Array(items) => Some(RawList::Items(
            items.iter().filter_map(scalar_text).collect(),
        )),
        Value::Null => None,
        other => scalar_text(other).map(RawList::Joined),
    }
}

/// Parses a scraper dump. Only a non-list top level is fatal; non-object elements are skipped.
pub fn parse_raw_collection(value: &Value) -> Result<Vec<RawTour>, AtlasError> {
    let items = value.as_array().ok_or(AtlasError::NotACollection)?;
    let mut tours = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        match RawTour::from_value(item) {
            Some(tour) => tours.push(tour),
            None => log::warn!("[Records] Skipping element {}: not a JSON object", idx),
        }
    }
    Ok(tours)
}

pub fn parse_raw_str(content: &str) -> Result<Vec<RawTour>, AtlasError> {
    let value: Value = serde_json::from_str(content)?;
    parse_raw_collection(&value)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TourMetadata {
    pub completeness_score: u8,
    pub has_destinations: bool,
    pub has_price: bool,
    pub has_duration: bool,
    pub has_highlights: bool,
}

/// Canonical tour. Every field holds real data or its sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourRecord {
    pub name: String,
    pub destinations: Vec<String>,
    pub duration: String,
    pub price: String,
    pub highlights: Vec<String>,
    pub theme: Theme,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub source_category: Option<String>,
    #[serde(default)]
    pub is_umbrella_package: bool,
    #[serde(default)]
    pub metadata: TourMetadata,
}

impl TourRecord {
    /// Lower-cased JSON rendering, used for loose "appears anywhere in the record" matching.
    pub fn search_blob(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| format!("{} {}", self.name, self.destinations.join(" ")))
            .to_lowercase()
    }
}
