// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use atlas_heuristics::{HeuristicsConfig, HeuristicsModel, Theme, ThemeRule, CURRENT_SCHEMA_VERSION};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_missing_file_uses_shipped_tables() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("heuristics.json");
    let model = HeuristicsModel::at_path(path.clone());

    assert_eq!(*model.config, HeuristicsConfig::default());
    assert_eq!(model.config_path(), Some(path.as_path()));
    assert!(!path.exists(), "loading must not create the file");
}

#[test]
fn test_old_schema_resets_tables_but_keeps_theme_rules() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("heuristics.json");

    let legacy = HeuristicsConfig {
        theme_rules: vec![ThemeRule {
            theme: Theme::Beach,
            keywords: vec!["lagoon".to_string()],
        }],
        noise_patterns: vec!["^Old Banner$".to_string()],
        tour_indicators: vec!["lagoon".to_string()],
        schema_version: 1,
    };
    fs::write(&path, serde_json::to_string_pretty(&legacy).unwrap()).unwrap();

    let model = HeuristicsModel::at_path(path.clone());
    let defaults = HeuristicsConfig::default();

    assert_eq!(model.config.schema_version, CURRENT_SCHEMA_VERSION);
    assert_eq!(model.config.noise_patterns, defaults.noise_patterns);
    assert_eq!(model.config.tour_indicators, defaults.tour_indicators);
    // User theme rules survive migration.
    assert_eq!(model.classify("Blue Lagoon Escape"), Theme::Beach);

    // Migrated file was written back.
    let saved: HeuristicsConfig =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved.schema_version, CURRENT_SCHEMA_VERSION);
    assert_eq!(saved.noise_patterns, defaults.noise_patterns);
}

#[test]
fn test_current_schema_is_loaded_verbatim() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("heuristics.json");

    let mut custom = HeuristicsConfig::default();
    custom.noise_patterns = vec!["^Contact Us$".to_string()];
    fs::write(&path, serde_json::to_string(&custom).unwrap()).unwrap();

    let model = HeuristicsModel::at_path(path);
    assert!(model.is_noise("Contact Us"));
    assert!(!model.is_noise("View More Packages"));
}

#[test]
fn test_corrupt_file_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("heuristics.json");
    fs::write(&path, "{ not json").unwrap();

    let model = HeuristicsModel::at_path(path);
    assert_eq!(*model.config, HeuristicsConfig::default());
}

#[test]
fn test_save_and_reset_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("heuristics.json");

    let mut model = HeuristicsModel::at_path(path.clone());
    let mut config = (*model.config).clone();
    config.tour_indicators.push("Zanskar".to_string());
    model.update_config(config);
    model.save().unwrap();

    let reloaded = HeuristicsModel::at_path(path.clone());
    assert!(reloaded.has_tour_indicator("Frozen River Zanskar"));

    let mut reloaded = reloaded;
    reloaded.reset_defaults().unwrap();
    let again = HeuristicsModel::at_path(path);
    assert_eq!(*again.config, HeuristicsConfig::default());
}
