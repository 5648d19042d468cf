// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use atlas_core::normalizer::normalize;
use atlas_core::reconcile::reconcile;
use atlas_core::record::{parse_raw_str, SENTINEL_DURATION, SENTINEL_PRICE};
use atlas_core::{get_completeness, HeuristicsModel, RawTour, Theme};
use std::collections::HashSet;

fn raw(json: &str) -> Vec<RawTour> {
    parse_raw_str(json).unwrap()
}

#[test]
fn test_golden_triangle_tie_keeps_first_seen() {
    let records = raw(r#"[
        {"name": "Golden Triangle Tour", "destinations": "Delhi, Agra, Jaipur", "price": "₹18,500"},
        {"name": "Golden Triangle Tour", "destinations": "Delhi, Agra, Jaipur", "duration": "5 Days / 4 Nights"}
    ]"#);
    // "Tour" in the name earns no name bonus: 30 + 25 each.
    assert_eq!(get_completeness(&records[0]), 55);
    assert_eq!(get_completeness(&records[1]), 55);

    let (corpus, report) = reconcile(records, &HeuristicsModel::default());
    assert_eq!(corpus.len(), 1);
    assert_eq!(report.duplicates_removed, 1);

    let kept = &corpus[0];
    assert_eq!(kept.price, "₹18,500");
    assert_eq!(kept.duration, SENTINEL_DURATION);
    assert_eq!(kept.theme, Theme::Heritage);
    assert_eq!(kept.metadata.completeness_score, 55);
}

#[test]
fn test_higher_score_wins_in_either_order() {
    let sparse = r#"{"name": "Kerala Backwaters Escape", "price": "₹22,000"}"#;
    let rich = r#"{"name": "Kerala Backwaters Escape", "price": "₹24,999",
                   "duration": "6 Days", "destinations": "Kochi → Munnar → Alleppey"}"#;

    for json in [format!("[{sparse}, {rich}]"), format!("[{rich}, {sparse}]")] {
        let (corpus, report) = reconcile(raw(&json), &HeuristicsModel::default());
        assert_eq!(corpus.len(), 1);
        assert_eq!(report.duplicates_removed, 1);
        assert_eq!(corpus[0].price, "₹24,999");
        assert_eq!(corpus[0].destinations, vec!["Kochi", "Munnar", "Alleppey"]);
        assert_eq!(corpus[0].metadata.completeness_score, 90);
    }
}

#[test]
fn test_view_more_packages_is_always_rejected() {
    let records = raw(r#"[
        {"name": "VIEW MORE PACKAGES", "price": "₹9,999", "duration": "3 Days",
         "url": "https://example.com/tour-packages"},
        {"name": "View More Packages", "duration": "3 Days"},
        {"name": "Kedarnath Yatra Package", "duration": "4 Days"}
    ]"#);

    let (corpus, report) = reconcile(records, &HeuristicsModel::default());
    assert_eq!(report.rejected_noise, 2);
    assert_eq!(corpus.len(), 1);
    assert_eq!(corpus[0].name, "Kedarnath Yatra Package");
    assert_eq!(corpus[0].theme, Theme::Pilgrimage);
}

#[test]
fn test_non_tour_entries_are_dropped() {
    let records = raw(r#"[
        {"name": "Contact our office"},
        {"name": "Snow Leopard Expedition", "url": "https://example.com/packages/snow-leopard"},
        {"name": "Spiti Valley Drive"}
    ]"#);

    let (corpus, report) = reconcile(records, &HeuristicsModel::default());
    let names: Vec<&str> = corpus.iter().map(|t| t.name.as_str()).collect();
    // URL evidence and a destination indicator are each enough on their own.
    assert_eq!(names, vec!["Snow Leopard Expedition", "Spiti Valley Drive"]);
    assert_eq!(report.rejected_not_tour, 1);
}

#[test]
fn test_short_names_are_rejected() {
    let records = raw(r#"[
        {"name": "Goa", "price": "₹5,000"},
        {"name": "   ", "price": "₹5,000"},
        {"price": "₹5,000"},
        {"name": "Goa Beach Break", "price": "₹15,000"}
    ]"#);

    let (corpus, report) = reconcile(records, &HeuristicsModel::default());
    assert_eq!(corpus.len(), 1);
    assert_eq!(report.rejected_short_name, 3);
    assert_eq!(corpus[0].theme, Theme::Beach);
}

#[test]
fn test_numeric_prefix_is_stripped_and_collisions_dropped() {
    let records = raw(r#"[
        {"name": "3 Kerala Houseboat Tour", "price": "₹30,000"},
        {"name": "Kerala Houseboat Tour", "duration": "4 Days"},
        {"name": "12 Ladakh Bike Trip", "duration": "9 Days"}
    ]"#);

    let (corpus, report) = reconcile(records, &HeuristicsModel::default());
    let names: Vec<&str> = corpus.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Kerala Houseboat Tour", "Ladakh Bike Trip"]);
    assert_eq!(report.rejected_collision, 1);
    assert_eq!(corpus[0].price, "₹30,000");
}

#[test]
fn test_names_are_unique_in_output() {
    let records = raw(r#"[
        {"name": "Char Dham Yatra", "duration": "10 Days"},
        {"name": "Char Dham Yatra ", "price": "₹45,000"},
        {"name": "Char  Dham Yatra", "duration": "11 Days"},
        {"name": "Char Dham Yatra by Road", "duration": "12 Days"}
    ]"#);

    let (corpus, _) = reconcile(records, &HeuristicsModel::default());
    let unique: HashSet<&str> = corpus.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(unique.len(), corpus.len());
}

#[test]
fn test_reconcile_is_idempotent() {
    let model = HeuristicsModel::default();
    let records = raw(r#"[
        {"name": "  Golden   Triangle Tour ", "destinations": "Delhi, Agra, Jaipur", "price": "₹18,500"},
        {"name": "5 Rishikesh Yoga Retreat", "duration": "7 Days", "highlights": ["Ganga aarti", "Yoga sessions"]},
        {"name": "Kerala Tour Package", "url": "https://example.com/kerala"},
        {"name": "Andaman Island Escape", "price": "Price On Request", "duration": "6 Days", "theme": "General"},
        {"name": "Bhutan Happiness Trail", "duration": "5 Days", "theme": "International"},
        {"name": "VIEW MORE PACKAGES"}
    ]"#);

    let (first, _) = reconcile(records, &model);
    assert!(!first.is_empty());

    let again: Vec<RawTour> = first.iter().map(RawTour::from).collect();
    let (second, report) = reconcile(again, &model);
    assert_eq!(second, first);
    assert_eq!(report.duplicates_removed, 0);
    assert_eq!(report.rejected_collision, 0);
}

#[test]
fn test_umbrella_listing_is_kept_and_flagged() {
    let records = raw(r#"[{"name": "Sikkim Tour Package"}]"#);
    let (corpus, report) = reconcile(records, &HeuristicsModel::default());
    assert_eq!(corpus.len(), 1);
    assert!(corpus[0].is_umbrella_package);
    assert_eq!(report.umbrella_packages, 1);
}

#[test]
fn test_non_object_elements_are_skipped() {
    let records = raw(r#"[1, "text", null, {"name": "Varanasi Ghats Walk", "duration": "2 Days"}]"#);
    assert_eq!(records.len(), 1);
    assert!(parse_raw_str(r#"{"name": "not a list"}"#).is_err());
}

#[test]
fn test_normalized_fields_are_never_empty() {
    let model = HeuristicsModel::default();
    let records = raw(r#"[
        {},
        {"name": "  ", "destinations": [], "highlights": ["", "  "]},
        {"name": "Shimla Manali Holiday", "price": "On Request", "destinations": " , "},
        {"name": "Leh Ladakh Trek", "destinations": ["Leh", " ", "Nubra"], "highlights": "Pangong Lake"}
    ]"#);

    for record in &records {
        let tour = normalize(record, &model);
        assert!(!tour.name.is_empty());
        assert!(!tour.duration.is_empty());
        assert!(!tour.price.is_empty());
        assert!(!tour.destinations.is_empty());
        assert!(tour.destinations.iter().all(|d| !d.trim().is_empty()));
        assert!(!tour.highlights.is_empty());
        assert!(tour.highlights.iter().all(|h| !h.trim().is_empty()));
        assert!(tour.metadata.completeness_score <= 100);
    }

    let shimla = normalize(&records[2], &model);
    assert_eq!(shimla.price, SENTINEL_PRICE);
    let leh = normalize(&records[3], &model);
    assert_eq!(leh.destinations, vec!["Leh", "Nubra"]);
    assert_eq!(leh.highlights, vec!["Pangong Lake"]);
    assert_eq!(leh.theme, Theme::Adventure);
}
