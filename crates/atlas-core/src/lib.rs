// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

pub mod config;
pub mod corpus;
pub mod export;
pub mod index;
pub mod itinerary;
pub mod llm;
pub mod normalizer;
pub mod pipeline;
pub mod prompts;
pub mod qa;
pub mod reconcile;
pub mod record;
pub mod scoring;

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use atlas_heuristics::{HeuristicsModel, Theme};
pub use record::{RawTour, TourMetadata, TourRecord};
pub use scoring::{get_completeness, Completeness};

#[derive(Error, Debug)]
pub enum AtlasError {
    #[error("Project root not found: {0}")]
    RootNotFound(PathBuf),
    #[error("Invalid project layout: {0}")]
    InvalidLayout(String),
    #[error("Raw input is not a JSON list of tour records")]
    NotACollection,
    #[error("No raw source files found under {0}")]
    NoSources(PathBuf),
    #[error("Generation unavailable: {0}")]
    GenerationUnavailable(String),
    #[error("Generation service returned no content")]
    EmptyCompletion,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub const PRIMARY_SOURCE_FILE: &str = "all_tours_complete.json";
pub const CORPUS_FILE: &str = "tour_data_cleaned.json";
pub const LEGACY_CORPUS_FILE: &str = "tour_data.json";
pub const STATS_FILE: &str = "data_statistics.json";
pub const INDEX_FILE: &str = "tour_index.json";

/// A project root holding scraper output and every derived artifact.
///
/// ```text
/// root/
///   raw/           scraper drops (*.json)
///   corpus/        cleaned corpus + statistics
///   index/         local vector index
///   itineraries/   text exports
/// ```
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    pub root: PathBuf,
}

impl ProjectLayout {
    /// Validates that the path looks like a project root with a `raw/` drop.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, AtlasError> {
        let root = path.as_ref().to_path_buf();

        if !root.exists() {
            return Err(AtlasError::RootNotFound(root));
        }

        if !root.join("raw").is_dir() {
            return Err(AtlasError::InvalidLayout(format!(
                "Missing raw folder in {}",
                root.display()
            )));
        }

        Ok(Self { root })
    }

    /// Query-time view: no validation, missing artifacts are handled by their loaders.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self {
            root: path.as_ref().to_path_buf(),
        }
    }

    pub fn raw_dir(&self) -> PathBuf {
        self.root.join("raw")
    }

    pub fn corpus_dir(&self) -> PathBuf {
        self.root.join("corpus")
    }

    pub fn index_dir(&self) -> PathBuf {
        self.root.join("index")
    }

    pub fn itineraries_dir(&self) -> PathBuf {
        self.root.join("itineraries")
    }

    pub fn primary_source_path(&self) -> PathBuf {
        self.raw_dir().join(PRIMARY_SOURCE_FILE)
    }

    pub fn corpus_path(&self) -> PathBuf {
        self.corpus_dir().join(CORPUS_FILE)
    }

    pub fn legacy_corpus_path(&self) -> PathBuf {
        self.corpus_dir().join(LEGACY_CORPUS_FILE)
    }

    pub fn stats_path(&self) -> PathBuf {
        self.corpus_dir().join(STATS_FILE)
    }

    pub fn index_path(&self) -> PathBuf {
        self.index_dir().join(INDEX_FILE)
    }

    pub fn ensure_output_dirs(&self) -> Result<(), AtlasError> {
        for dir in [self.corpus_dir(), self.index_dir(), self.itineraries_dir()] {
            fs::create_dir_all(dir)?;
        }
        Ok(())
    }
}

/// Platform config directory shared by `config.json` and `heuristics.json`.
pub fn get_config_root() -> PathBuf {
    let (qualifier, organization, application) = atlas_heuristics::PROJECT_DIRS_ID;
    directories::ProjectDirs::from(qualifier, organization, application)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Exposed operation: theme label for free text.
pub fn get_theme(model: &HeuristicsModel, text: &str) -> &'static str {
    model.classify(text).label()
}
