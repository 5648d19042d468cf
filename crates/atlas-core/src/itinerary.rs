// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::config::AtlasConfig;
use crate::corpus::Corpus;
use crate::index::VectorIndex;
use crate::llm::GenerationCapability;
use crate::prompts::{itinerary_prompt, ITINERARY_SYSTEM_PROMPT};
use crate::record::TourRecord;
use serde::{Deserialize, Serialize};

pub const NO_CONTEXT_TEXT: &str = "No specific tour data found for this query.";
const TEMPLATE_TOUR_LIMIT: usize = 5;
const HIGHLIGHT_PREVIEW_CHARS: usize = 100;

/// What the traveller asked for. Blank fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub location: String,
    pub duration: String,
    pub interests: String,
    pub budget: String,
    pub style: String,
    pub special: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            location: "India".to_string(),
            duration: "7 days".to_string(),
            interests: "sightseeing".to_string(),
            budget: "moderate".to_string(),
            style: "relaxed".to_string(),
            special: "None".to_string(),
        }
    }
}

impl Preferences {
    /// Trims every field and replaces blanks with the defaults.
    pub fn with_defaults(self) -> Self {
        let defaults = Preferences::default();
        let pick = |value: String, fallback: String| {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                fallback
            } else {
                trimmed.to_string()
            }
        };
        Self {
            location: pick(self.location, defaults.location),
            duration: pick(self.duration, defaults.duration),
            interests: pick(self.interests, defaults.interests),
            budget: pick(self.budget, defaults.budget),
            style: pick(self.style, defaults.style),
            special: pick(self.special, defaults.special),
        }
    }

    /// Ordered `(label, value)` pairs, used by prompts and exports.
    pub fn fields(&self) -> [(&'static str, &str); 6] {
        [
            ("Location", self.location.as_str()),
            ("Duration", self.duration.as_str()),
            ("Interests", self.interests.as_str()),
            ("Budget", self.budget.as_str()),
            ("Style", self.style.as_str()),
            ("Special", self.special.as_str()),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItinerarySource {
    Generated,
    Template,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    pub preferences: Preferences,
    pub source: ItinerarySource,
    pub text: String,
}

pub struct ItineraryPlanner<'a> {
    corpus: &'a Corpus,
    index: &'a dyn VectorIndex,
    generation: &'a GenerationCapability,
    config: &'a AtlasConfig,
}

impl<'a> ItineraryPlanner<'a> {
    pub fn new(
        corpus: &'a Corpus,
        index: &'a dyn VectorIndex,
        generation: &'a GenerationCapability,
        config: &'a AtlasConfig,
    ) -> Self {
        Self {
            corpus,
            index,
            generation,
            config,
        }
    }

    /// Nearest neighbors for `"{location} {interests} tour package itinerary"`.
    pub fn relevant_context(&self, prefs: &Preferences) -> String {
        let query = format!("{} {} tour package itinerary", prefs.location, prefs.interests);
        match self
            .index
            .get_context(&query, self.config.itinerary_context_results)
        {
            Ok(context) if !context.trim().is_empty() => context,
            Ok(_) => NO_CONTEXT_TEXT.to_string(),
            Err(e) => {
                log::warn!("[Itinerary] Vector index failed: {}", e);
                NO_CONTEXT_TEXT.to_string()
            }
        }
    }

    pub fn generate_itinerary(&self, preferences: Preferences) -> Itinerary {
        let prefs = preferences.with_defaults();
        log::info!(
            "[Itinerary] Planning {} in {} ({})",
            prefs.duration,
            prefs.location,
            prefs.interests
        );

        if let Some(generator) = self.generation.generator() {
            let context = self.relevant_context(&prefs);
            let prompt = itinerary_prompt(&prefs, &context);
            match generator.complete(
                ITINERARY_SYSTEM_PROMPT,
                &prompt,
                &self.config.itinerary_generation,
            ) {
                Ok(text) => {
                    return Itinerary {
                        preferences: prefs,
                        source: ItinerarySource::Generated,
                        text,
                    }
                }
                Err(e) => log::warn!("[Itinerary] Generation failed, using template: {}", e),
            }
        }

        let text = template_itinerary(self.corpus.tours.as_ref(), &prefs, &self.config.website_url);
        Itinerary {
            preferences: prefs,
            source: ItinerarySource::Template,
            text,
        }
    }
}

/// A tour matches when the location appears in a destination or anywhere in the record,
/// or when any comma-separated interest appears in the record.
pub fn matching_tours<'t>(tours: &'t [TourRecord], prefs: &Preferences) -> Vec<&'t TourRecord> {
    let location = prefs.location.trim().to_lowercase();
    let interests: Vec<String> = prefs
        .interests
        .split(',')
        .map(|i| i.trim().to_lowercase())
        .filter(|i| !i.is_empty())
        .collect();

    tours
        .iter()
        .filter(|tour| {
            let blob = tour.search_blob();
            let location_match = !location.is_empty()
                && (tour
                    .destinations
                    .iter()
                    .any(|d| d.to_lowercase().contains(&location))
                    || blob.contains(&location));
            location_match || interests.iter().any(|i| blob.contains(i.as_str()))
        })
        .collect()
}

fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

fn website_host(url: &str) -> &str {
    url.trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/')
}

/// Deterministic itinerary used when generation is unavailable or fails.
pub fn template_itinerary(tours: &[TourRecord], prefs: &Preferences, website_url: &str) -> String {
    let matches = matching_tours(tours, prefs);
    let mut out = String::new();

    if matches.is_empty() {
        out.push_str(&format!(
            "[ITINERARY] **Itinerary Suggestion for {}**\n\n",
            prefs.location
        ));
        out.push_str(&format!(
            "Based on your request for a {} trip focusing on {}, we recommend:\n\n",
            prefs.duration, prefs.interests
        ));
        out.push_str(&format!(
            "• Check our {} tour packages on our website\n",
            prefs.location
        ));
        out.push_str("• Contact our travel experts for a custom quote\n");
        out.push_str("• Explore nearby destinations that match your interests\n\n");
        out.push_str(&format!(
            "Please visit {} or call us for more information.",
            website_host(website_url)
        ));
        return out;
    }

    out.push_str(&format!(
        "[ITINERARY] **Suggested Itinerary Template for {}**\n\n",
        prefs.location
    ));
    out.push_str("Based on your preferences:\n");
    out.push_str(&format!("• **Duration:** {}\n", prefs.duration));
    out.push_str(&format!("• **Interests:** {}\n", prefs.interests));
    out.push_str(&format!("• **Budget:** {}\n", prefs.budget));
    out.push_str(&format!("• **Travel Style:** {}\n\n", prefs.style));
    out.push_str("Here are some tours we recommend:\n\n");

    for (i, tour) in matches.iter().take(TEMPLATE_TOUR_LIMIT).enumerate() {
        out.push_str(&format!("{}. **{}**\n", i + 1, tour.name));
        out.push_str(&format!("   Duration: {}\n", tour.duration));
        out.push_str(&format!("   Theme: {}\n", tour.theme));
        out.push_str(&format!(
            "   Destinations: {}\n",
            tour.destinations
                .iter()
                .take(3)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        ));
        if let Some(first) = tour.highlights.first() {
            out.push_str(&format!(
                "   Highlights: {}...\n",
                preview(first, HIGHLIGHT_PREVIEW_CHARS)
            ));
        }
        out.push_str(&format!("   Price: {}\n\n", tour.price));
    }

    out.push_str(
        "\n[TIP] These tours can be customized to match your exact preferences. \
         Contact our travel experts for a personalized quote!",
    );
    out
}
