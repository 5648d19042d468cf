// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::itinerary::{Itinerary, Preferences};
use crate::prompts::OPERATOR_NAME;
use crate::{AtlasError, ProjectLayout};
use chrono::{Local, NaiveDateTime};
use std::fs;
use std::path::PathBuf;

/// `itinerary_{location}_{YYYYmmdd_HHMMSS}.txt`. The location is lower-cased and every
/// character outside `[a-z0-9_-]` becomes `_`, so the file always lands in `itineraries/`.
pub fn export_filename(location: &str, at: &NaiveDateTime) -> String {
    let location: String = location
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let location = if location.trim_matches('_').is_empty() {
        "unknown".to_string()
    } else {
        location
    };
    format!("itinerary_{}_{}.txt", location, at.format("%Y%m%d_%H%M%S"))
}

pub fn render_export(prefs: &Preferences, itinerary: &str, at: &NaiveDateTime) -> String {
    let rule = "=".repeat(60);
    let thin = "-".repeat(30);

    let mut out = String::new();
    out.push_str(&format!("{}\n", rule));
    out.push_str(&format!(
        "{} - PERSONALIZED ITINERARY\n",
        OPERATOR_NAME.to_uppercase()
    ));
    out.push_str(&format!("{}\n\n", rule));

    out.push_str("USER PREFERENCES:\n");
    out.push_str(&format!("{}\n", thin));
    for (label, value) in prefs.fields() {
        out.push_str(&format!("{}: {}\n", label, value));
    }

    out.push_str("\nGENERATED ITINERARY:\n");
    out.push_str(&format!("{}\n", thin));
    out.push_str(itinerary);

    out.push_str(&format!("\n\n{}\n", rule));
    out.push_str(&format!("Generated on: {}\n", at.format("%Y-%m-%d %H:%M:%S")));
    out
}

/// Writes the itinerary under `itineraries/` and returns the file path.
pub fn save_itinerary(layout: &ProjectLayout, itinerary: &Itinerary) -> Result<PathBuf, AtlasError> {
    let now = Local::now().naive_local();
    let dir = layout.itineraries_dir();
    fs::create_dir_all(&dir)?;

    let path = dir.join(export_filename(&itinerary.preferences.location, &now));
    fs::write(&path, render_export(&itinerary.preferences, &itinerary.text, &now))?;
    log::info!("[Export] Itinerary saved to {:?}", path);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::itinerary::ItinerarySource;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 14)
            .unwrap()
            .and_hms_opt(9, 5, 7)
            .unwrap()
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(
            export_filename("Himachal Pradesh", &at()),
            "itinerary_himachal_pradesh_20260314_090507.txt"
        );
        assert_eq!(export_filename("  ", &at()), "itinerary_unknown_20260314_090507.txt");
    }

    #[test]
    fn test_export_filename_keeps_path_separators_out() {
        assert_eq!(
            export_filename("Jammu/Kashmir", &at()),
            "itinerary_jammu_kashmir_20260314_090507.txt"
        );
        assert_eq!(export_filename("../x", &at()), "itinerary____x_20260314_090507.txt");
        assert_eq!(export_filename("/..", &at()), "itinerary_unknown_20260314_090507.txt");
    }

    #[test]
    fn test_save_itinerary_with_slash_in_location() {
        let dir = tempdir().unwrap();
        let layout = ProjectLayout::open(dir.path());
        let itinerary = Itinerary {
            preferences: Preferences {
                location: "../Jammu/Kashmir".into(),
                ..Preferences::default()
            },
            source: ItinerarySource::Template,
            text: "Day 1: Srinagar".into(),
        };

        let path = save_itinerary(&layout, &itinerary).unwrap();
        assert_eq!(path.parent(), Some(layout.itineraries_dir().as_path()));
        assert!(path.is_file());
    }

    #[test]
    fn test_render_export_layout() {
        let prefs = Preferences {
            location: "Goa".into(),
            ..Preferences::default()
        };
        let text = render_export(&prefs, "Day 1: Beach", &at());

        assert!(text.starts_with(&format!("{}\nNAMASTE INDIA TRIP - PERSONALIZED ITINERARY\n", "=".repeat(60))));
        assert!(text.contains("USER PREFERENCES:\n------------------------------\nLocation: Goa\nDuration: 7 days\n"));
        assert!(text.contains("Special: None\n\nGENERATED ITINERARY:\n"));
        assert!(text.contains("Day 1: Beach\n\n"));
        assert!(text.ends_with("Generated on: 2026-03-14 09:05:07\n"));
    }

    #[test]
    fn test_save_itinerary_writes_file() {
        let dir = tempdir().unwrap();
        let layout = ProjectLayout::open(dir.path());
        let itinerary = Itinerary {
            preferences: Preferences::default(),
            source: ItinerarySource::Template,
            text: "Day 1: Delhi".into(),
        };

        let path = save_itinerary(&layout, &itinerary).unwrap();
        assert!(path.starts_with(layout.itineraries_dir()));
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("itinerary_india_"));
        assert!(fs::read_to_string(&path).unwrap().contains("Day 1: Delhi"));
    }
}
