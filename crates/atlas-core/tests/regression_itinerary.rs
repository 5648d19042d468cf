// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use atlas_core::config::AtlasConfig;
use atlas_core::corpus::Corpus;
use atlas_core::index::VectorIndex;
use atlas_core::itinerary::{
    matching_tours, template_itinerary, ItineraryPlanner, ItinerarySource, Preferences,
};
use atlas_core::llm::{GenerationCapability, GenerationOptions, Generator};
use atlas_core::normalizer::normalize;
use atlas_core::record::parse_raw_str;
use atlas_core::{AtlasError, HeuristicsModel, TourRecord};
use std::cell::RefCell;

struct StubIndex {
    context: String,
    queries: RefCell<Vec<(String, usize)>>,
}

impl StubIndex {
    fn with(context: &str) -> Self {
        Self {
            context: context.to_string(),
            queries: RefCell::new(Vec::new()),
        }
    }
}

impl VectorIndex for StubIndex {
    fn index(&mut self, corpus: &[TourRecord]) -> Result<usize, AtlasError> {
        Ok(corpus.len())
    }

    fn get_context(&self, query: &str, n: usize) -> Result<String, AtlasError> {
        self.queries.borrow_mut().push((query.to_string(), n));
        Ok(self.context.clone())
    }
}

struct EchoGenerator;

impl Generator for EchoGenerator {
    fn complete(&self, system: &str, user: &str, opts: &GenerationOptions) -> Result<String, AtlasError> {
        assert!(system.contains("luxury travel planner"));
        Ok(format!("ITIN[{}]\n{}", opts.max_tokens, user))
    }
}

struct FailingGenerator;

impl Generator for FailingGenerator {
    fn complete(&self, _: &str, _: &str, _: &GenerationOptions) -> Result<String, AtlasError> {
        Err(AtlasError::EmptyCompletion)
    }
}

const LONG_HIGHLIGHT: &str = "Overnight houseboat cruise through the palm-fringed backwaters of Alleppey \
with traditional Kerala meals served on board";

fn corpus() -> Corpus {
    let json = format!(
        r#"[
        {{"name": "Kerala Backwaters Escape", "destinations": "Kochi, Munnar, Alleppey, Kumarakom",
          "duration": "6 Days", "price": "₹24,999", "highlights": ["{LONG_HIGHLIGHT}", "Tea gardens"]}},
        {{"name": "Rishikesh Yoga Retreat", "destinations": "Haridwar, Rishikesh", "duration": "7 Days",
          "highlights": ["Ganga aarti"]}},
        {{"name": "Goa Beach Holiday", "destinations": "Panaji, Calangute", "price": "₹15,000"}}
    ]"#
    );
    let model = HeuristicsModel::default();
    Corpus::new(
        parse_raw_str(&json)
            .unwrap()
            .iter()
            .map(|r| normalize(r, &model))
            .collect(),
    )
}

fn prefs(location: &str, interests: &str) -> Preferences {
    Preferences {
        location: location.into(),
        interests: interests.into(),
        ..Preferences::default()
    }
}

#[test]
fn test_template_lists_matching_tours() {
    let corpus = corpus();
    let text = template_itinerary(
        &corpus.tours,
        &prefs("Kerala", "backwaters"),
        "https://www.namasteindiatrip.com",
    );

    assert!(text.starts_with(
        "[ITINERARY] **Suggested Itinerary Template for Kerala**\n\nBased on your preferences:\n"
    ));
    assert!(text.contains("• **Duration:** 7 days\n"));
    assert!(text.contains("• **Interests:** backwaters\n"));
    assert!(text.contains("• **Budget:** moderate\n"));
    assert!(text.contains("• **Travel Style:** relaxed\n\n"));
    assert!(text.contains(
        "1. **Kerala Backwaters Escape**\n   Duration: 6 Days\n   Theme: General\n   \
         Destinations: Kochi, Munnar, Alleppey\n"
    ));
    assert!(text.contains(
        "   Highlights: Overnight houseboat cruise through the palm-fringed backwaters of \
         Alleppey with traditional Kerala m...\n   Price: ₹24,999\n"
    ));
    assert!(!text.contains("Kumarakom"));
    assert!(!text.contains("2. **"));
    assert!(text.ends_with("Contact our travel experts for a personalized quote!"));
}

#[test]
fn test_template_caps_at_five_tours() {
    let json = format!(
        "[{}]",
        (1..=7)
            .map(|i| format!(r#"{{"name": "Goa Escape {i}", "destinations": "Goa", "duration": "{i} Days"}}"#))
            .collect::<Vec<_>>()
            .join(",")
    );
    let model = HeuristicsModel::default();
    let tours: Vec<TourRecord> = parse_raw_str(&json)
        .unwrap()
        .iter()
        .map(|r| normalize(r, &model))
        .collect();

    let text = template_itinerary(&tours, &prefs("Goa", "beaches"), "https://x.example");
    assert!(text.contains("1. **Goa Escape 1**"));
    assert!(text.contains("5. **Goa Escape 5**"));
    assert!(!text.contains("Goa Escape 6"));
}

#[test]
fn test_template_without_matches_suggests_contacting_us() {
    let corpus = corpus();
    let text = template_itinerary(
        &corpus.tours,
        &prefs("Iceland", "northern lights"),
        "https://www.namasteindiatrip.com",
    );

    assert!(text.starts_with("[ITINERARY] **Itinerary Suggestion for Iceland**\n\n"));
    assert!(text.contains(
        "Based on your request for a 7 days trip focusing on northern lights, we recommend:"
    ));
    assert!(text.contains("• Check our Iceland tour packages on our website\n"));
    assert!(text.ends_with("Please visit www.namasteindiatrip.com or call us for more information."));
}

#[test]
fn test_interest_terms_match_and_blank_terms_are_ignored() {
    let corpus = corpus();
    let names: Vec<&str> = matching_tours(&corpus.tours, &prefs("Nowhere", "yoga, , houseboat"))
        .iter()
        .map(|t| t.name.as_str())
        .collect();
    assert_eq!(names, vec!["Kerala Backwaters Escape", "Rishikesh Yoga Retreat"]);
}

#[test]
fn test_location_matches_destination() {
    let corpus = corpus();
    let names: Vec<&str> = matching_tours(&corpus.tours, &prefs("haridwar", "nothing-relevant"))
        .iter()
        .map(|t| t.name.as_str())
        .collect();
    assert_eq!(names, vec!["Rishikesh Yoga Retreat"]);
}

#[test]
fn test_generator_receives_preferences_and_context() {
    let corpus = corpus();
    let index = StubIndex::with("[From Kerala Backwaters Escape]: Tour Name: Kerala Backwaters Escape");
    let generation = GenerationCapability::from_generator(EchoGenerator);
    let config = AtlasConfig::default();
    let planner = ItineraryPlanner::new(&corpus, &index, &generation, &config);

    let itinerary = planner.generate_itinerary(prefs("Kerala", "backwaters"));
    assert_eq!(itinerary.source, ItinerarySource::Generated);
    assert!(itinerary.text.starts_with("ITIN[2000]"));
    assert!(itinerary.text.contains("- Location/Region: Kerala"));
    assert!(itinerary.text.contains("[From Kerala Backwaters Escape]"));

    let queries = index.queries.borrow();
    assert_eq!(
        queries.as_slice(),
        &[("Kerala backwaters tour package itinerary".to_string(), 8)]
    );
}

#[test]
fn test_empty_context_is_replaced_in_prompt() {
    let corpus = corpus();
    let index = StubIndex::with("");
    let generation = GenerationCapability::from_generator(EchoGenerator);
    let config = AtlasConfig::default();
    let planner = ItineraryPlanner::new(&corpus, &index, &generation, &config);

    let itinerary = planner.generate_itinerary(prefs("Ladakh", "monasteries"));
    assert_eq!(itinerary.source, ItinerarySource::Generated);
    assert!(itinerary
        .text
        .contains("(use for inspiration and factual accuracy):\nNo specific tour data found for this query."));
}

#[test]
fn test_generation_failure_falls_back_to_template() {
    let corpus = corpus();
    let index = StubIndex::with("[From Goa Beach Holiday]: beaches");
    let generation = GenerationCapability::from_generator(FailingGenerator);
    let config = AtlasConfig::default();
    let planner = ItineraryPlanner::new(&corpus, &index, &generation, &config);

    let itinerary = planner.generate_itinerary(prefs("Goa", "beaches"));
    assert_eq!(itinerary.source, ItinerarySource::Template);
    assert!(itinerary.text.contains("1. **Goa Beach Holiday**"));
}

#[test]
fn test_unavailable_generation_skips_the_index() {
    let corpus = corpus();
    let index = StubIndex::with("unused");
    let generation = GenerationCapability::Unavailable("no API key configured".into());
    let config = AtlasConfig::default();
    let planner = ItineraryPlanner::new(&corpus, &index, &generation, &config);

    let itinerary = planner.generate_itinerary(prefs("Goa", "beaches"));
    assert_eq!(itinerary.source, ItinerarySource::Template);
    assert!(index.queries.borrow().is_empty());
}

#[test]
fn test_blank_preferences_use_defaults() {
    let corpus = corpus();
    let index = StubIndex::with("");
    let generation = GenerationCapability::Unavailable("offline".into());
    let config = AtlasConfig::default();
    let planner = ItineraryPlanner::new(&corpus, &index, &generation, &config);

    let blank = Preferences {
        location: " ".into(),
        duration: String::new(),
        interests: String::new(),
        budget: String::new(),
        style: String::new(),
        special: String::new(),
    };
    let itinerary = planner.generate_itinerary(blank);
    assert_eq!(itinerary.preferences, Preferences::default());
    assert!(itinerary
        .text
        .starts_with("[ITINERARY] **Itinerary Suggestion for India**"));
    assert!(itinerary
        .text
        .contains("Based on your request for a 7 days trip focusing on sightseeing"));
}
