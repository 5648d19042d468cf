// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::index::DEFAULT_SIMILARITY_THRESHOLD;
use crate::llm::GenerationOptions;
use crate::AtlasError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const API_KEY_ENV: &str = "GROQ_API_KEY";

/// User settings, stored as `config.json` next to `heuristics.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    pub website_url: String,
    pub api_base_url: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub request_timeout_secs: u64,
    /// Issue `GET /models` once at startup before enabling generation.
    pub probe_on_startup: bool,
    pub qa_generation: GenerationOptions,
    pub itinerary_generation: GenerationOptions,
    pub qa_context_results: usize,
    pub itinerary_context_results: usize,
    pub keyword_results: usize,
    pub similarity_threshold: f32,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            website_url: "https://www.namasteindiatrip.com".to_string(),
            api_base_url: "https://api.groq.com/openai/v1".to_string(),
            model: "llama-3.3-70b-versatile".to_string(),
            api_key: None,
            request_timeout_secs: 10,
            probe_on_startup: false,
            qa_generation: GenerationOptions::QA,
            itinerary_generation: GenerationOptions::ITINERARY,
            qa_context_results: 5,
            itinerary_context_results: 8,
            keyword_results: 5,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

impl AtlasConfig {
    /// Platform config file, with the API key taken from `GROQ_API_KEY` when set.
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_path())
            .with_api_key_override(std::env::var(API_KEY_ENV).ok())
    }

    /// Defaults when the file is missing or unparsable.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            log::debug!("[Config] No config at {:?}, using defaults", path);
            return Self::default();
        }
        match fs::read_to_string(path)
            .map_err(AtlasError::from)
            .and_then(|content| serde_json::from_str::<AtlasConfig>(&content).map_err(AtlasError::from))
        {
            Ok(config) => config,
            Err(e) => {
                log::warn!("[Config] Ignoring unreadable config {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    pub fn with_api_key_override(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()) {
            self.api_key = Some(key);
        }
        self
    }

    pub fn save_to(&self, path: &Path) -> Result<(), AtlasError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn get_config_path() -> PathBuf {
        crate::get_config_root().join("config.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = AtlasConfig::default();
        assert_eq!(config.model, "llama-3.3-70b-versatile");
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.qa_generation.max_tokens, 500);
        assert_eq!(config.itinerary_generation.max_tokens, 2000);
        assert_eq!(config.itinerary_context_results, 8);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"website_url": "https://tours.example"}"#).unwrap();

        let config = AtlasConfig::load_from(&path);
        assert_eq!(config.website_url, "https://tours.example");
        assert_eq!(config.keyword_results, 5);
    }

    #[test]
    fn test_unparsable_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "[oops").unwrap();
        assert_eq!(AtlasConfig::load_from(&path), AtlasConfig::default());
    }

    #[test]
    fn test_api_key_override() {
        let config = AtlasConfig::default().with_api_key_override(Some("gsk_env".into()));
        assert_eq!(config.api_key.as_deref(), Some("gsk_env"));

        let kept = AtlasConfig {
            api_key: Some("gsk_file".into()),
            ..Default::default()
        }
        .with_api_key_override(Some("  ".into()));
        assert_eq!(kept.api_key.as_deref(), Some("gsk_file"));
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = AtlasConfig {
            keyword_results: 3,
            ..Default::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(AtlasConfig::load_from(&path), config);
    }
}
