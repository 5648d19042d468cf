// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use anyhow::Result;
use directories::ProjectDirs;
use regex::{Regex, RegexSet};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
pub mod tables;
pub mod theme;

pub use theme::{Theme, UnknownTheme};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ThemeRule {
    pub theme: Theme,
    pub keywords: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HeuristicsConfig {
    /// Evaluated top to bottom; the first rule with a matching keyword wins.
    pub theme_rules: Vec<ThemeRule>,
    /// UI-chrome name patterns. Anchored at the start; a trailing `$` makes it a full match.
    pub noise_patterns: Vec<String>,
    /// Case-insensitive substrings that mark a name as a real tour.
    pub tour_indicators: Vec<String>,
    /// Schema version for migration. Increment when the shipped tables change.
    #[serde(default)]
    pub schema_version: u32,
}

/// When a user's file has a lower version, its tables are reset to the shipped defaults on load.
pub const CURRENT_SCHEMA_VERSION: u32 = 3;

/// `ProjectDirs` qualifier, organization and application shared by every config file.
pub const PROJECT_DIRS_ID: (&str, &str, &str) = ("org", "tour-atlas", "tour-atlas");

impl Default for HeuristicsConfig {
    fn default() -> Self {
        Self {
            theme_rules: tables::default_theme_rules(),
            noise_patterns: tables::DEFAULT_NOISE_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .collect(),
            tour_indicators: tables::DEFAULT_TOUR_INDICATORS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }
}

/// Compiled rule engine over a [`HeuristicsConfig`].
#[derive(Clone)]
pub struct HeuristicsModel {
    pub config: Arc<HeuristicsConfig>,
    config_path: Option<PathBuf>,
    noise_set: Option<RegexSet>,
    noise_sources: Vec<String>,
    indicators: Vec<String>,
}

impl Default for HeuristicsModel {
    fn default() -> Self {
        Self::from_config(HeuristicsConfig::default())
    }
}

impl std::fmt::Debug for HeuristicsModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeuristicsModel")
            .field("config_path", &self.config_path)
            .field("theme_rules", &self.config.theme_rules.len())
            .field("noise_patterns", &self.noise_sources.len())
            .field("tour_indicators", &self.indicators.len())
            .finish()
    }
}

impl HeuristicsModel {
    /// Loads the user's heuristics file from the platform config directory,
    /// falling back to the shipped tables.
    pub fn load() -> Self {
        Self::at_path(Self::get_config_path())
    }

    /// In-memory model that is never persisted.
    pub fn from_config(config: HeuristicsConfig) -> Self {
        let (noise_set, noise_sources) = Self::build_noise_set(&config);
        let indicators = Self::build_indicators(&config);
        Self {
            config: Arc::new(config),
            config_path: None,
            noise_set,
            noise_sources,
            indicators,
        }
    }

    pub fn at_path(path: PathBuf) -> Self {
        let config = Self::load_config(&path).unwrap_or_else(|e| {
            log::warn!(
                "[Heuristics] Falling back to shipped tables; could not load {:?}: {}",
                path,
                e
            );
            HeuristicsConfig::default()
        });
        let mut model = Self::from_config(config);
        model.config_path = Some(path);
        model
    }

    pub fn update_config(&mut self, config: HeuristicsConfig) {
        let (noise_set, noise_sources) = Self::build_noise_set(&config);
        self.noise_set = noise_set;
        self.noise_sources = noise_sources;
        self.indicators = Self::build_indicators(&config);
        self.config = Arc::new(config);
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    pub fn get_config_path() -> PathBuf {
        let (qualifier, organization, application) = PROJECT_DIRS_ID;
        ProjectDirs::from(qualifier, organization, application)
            .map(|dirs| dirs.config_dir().join("heuristics.json"))
            .unwrap_or_else(|| PathBuf::from("heuristics.json"))
    }

    fn load_config(path: &Path) -> Result<HeuristicsConfig> {
        log::debug!("[Heuristics] Loading tables from: {:?}", path);
        if !path.exists() {
            log::debug!(
                "[Heuristics] No heuristics file found at {:?}, using defaults",
                path
            );
            return Ok(HeuristicsConfig::default());
        }

        let content = fs::read_to_string(path)?;
        let mut config: HeuristicsConfig = serde_json::from_str(&content).map_err(|e| {
            log::error!("[Heuristics] JSON parse error for {:?}: {}", path, e);
            e
        })?;

        if config.schema_version < CURRENT_SCHEMA_VERSION {
            log::info!(
                "[Heuristics] Migrating heuristics.json from schema v{} to v{}",
                config.schema_version,
                CURRENT_SCHEMA_VERSION
            );
            let defaults = HeuristicsConfig::default();

            // v1→v2: umbrella banners ("<Region> Tour Packages") joined the noise table.
            if config.schema_version <= 1 {
                config.noise_patterns = defaults.noise_patterns.clone();
                log::info!("[Heuristics] v1→v2: Reset noise patterns to defaults");
            }

            // v2→v3: indicator table extended with regional hill stations and parks.
            if config.schema_version <= 2 {
                config.tour_indicators = defaults.tour_indicators.clone();
                log::info!("[Heuristics] v2→v3: Reset tour indicators to defaults");
            }

            config.schema_version = CURRENT_SCHEMA_VERSION;
            if let Some(parent) = path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            if let Err(e) = fs::write(path, serde_json::to_string_pretty(&config)?) {
                log::warn!("[Heuristics] Could not save migrated tables: {}", e);
            }
        }

        Ok(config)
    }

    fn build_noise_set(config: &HeuristicsConfig) -> (Option<RegexSet>, Vec<String>) {
        let mut sources = Vec::new();
        for pattern in &config.noise_patterns {
            let anchored = if pattern.starts_with('^') {
                format!("(?i){}", pattern)
            } else {
                format!("(?i)^{}", pattern)
            };
            match Regex::new(&anchored) {
                Ok(_) => sources.push(anchored),
                Err(e) => log::warn!("[Heuristics] Skipping invalid noise pattern {:?}: {}", pattern, e),
            }
        }
        if sources.is_empty() {
            return (None, sources);
        }
        (RegexSet::new(&sources).ok(), sources)
    }

    fn build_indicators(config: &HeuristicsConfig) -> Vec<String> {
        let mut indicators: Vec<String> = config
            .tour_indicators
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        indicators.sort();
        indicators.dedup();
        indicators
    }

    pub fn save(&self) -> Result<()> {
        let path = self
            .config_path
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("heuristics model has no backing file"))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self.config.as_ref())?)?;
        log::debug!("[Heuristics] Saved tables to {:?}", path);
        Ok(())
    }

    pub fn reset_defaults(&mut self) -> Result<()> {
        self.update_config(HeuristicsConfig::default());
        self.save()
    }

    /// Maps free text to a theme. Total: returns `General` when nothing matches.
    pub fn classify(&self, text: &str) -> Theme {
        let text_lower = text.to_lowercase();
        self.config
            .theme_rules
            .iter()
            .find(|rule| {
                rule.keywords.iter().any(|k| {
                    let k = k.trim().to_lowercase();
                    !k.is_empty() && text_lower.contains(&k)
                })
            })
            .map(|rule| rule.theme)
            .unwrap_or(Theme::General)
    }

    /// True when the name is UI chrome (menu labels, banners, FAQ headers).
    pub fn is_noise(&self, name: &str) -> bool {
        self.matching_noise_pattern(name).is_some()
    }

    /// The first noise pattern that matches, for diagnostics.
    pub fn matching_noise_pattern(&self, name: &str) -> Option<&str> {
        let set = self.noise_set.as_ref()?;
        let name = name.trim();
        set.matches(name)
            .iter()
            .next()
            .map(|idx| self.noise_sources[idx].as_str())
    }

    pub fn has_tour_indicator(&self, name: &str) -> bool {
        let name_lower = name.to_lowercase();
        self.indicators.iter().any(|k| name_lower.contains(k.as_str()))
    }
}

/// Landing-page shape: "<Region> Tour Package(s)" with at most four words.
pub fn is_umbrella_name(name: &str) -> bool {
    name.to_lowercase().contains("tour package") && name.split_whitespace().count() <= 4
}

/// At least one cased letter and no lowercase letters ("VIEW MORE PACKAGES").
pub fn is_all_caps(name: &str) -> bool {
    name.chars().any(char::is_uppercase) && !name.chars().any(char::is_lowercase)
}

pub fn is_all_digits(name: &str) -> bool {
    !name.is_empty() && name.chars().all(char::is_numeric)
}
