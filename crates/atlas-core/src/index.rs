// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Retrieval over the corpus: the [`VectorIndex`] contract and an in-process implementation.

use crate::corpus::write_json_atomic;
use crate::record::{TourRecord, SENTINEL_HIGHLIGHT};
use crate::AtlasError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fs;
use std::path::Path;

/// Nearest-neighbor context provider consumed by the resolver and the itinerary composer.
pub trait VectorIndex {
    /// Rebuilds the index from scratch. Returns the number of chunks indexed.
    fn index(&mut self, corpus: &[TourRecord]) -> Result<usize, AtlasError>;

    /// Up to `n` passages formatted as `[From {tour}]: {text}`, joined by blank lines.
    /// An empty string means nothing relevant was found.
    fn get_context(&self, query: &str, n: usize) -> Result<String, AtlasError>;
}

/// Hash space for token buckets. Vectors are sparse, so a wide space costs nothing.
pub const DEFAULT_DIMENSIONS: u32 = 1 << 20;
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.2;
const INDEX_FORMAT_VERSION: u32 = 1;

// Common English words plus the field labels every chunk carries.
const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "any", "are", "as", "at", "be", "by", "can", "do", "does", "for", "from",
    "have", "how", "i", "in", "is", "it", "me", "my", "of", "on", "or", "show", "tell", "that",
    "the", "there", "this", "to", "we", "what", "which", "with", "you", "your", "about", "offer",
    "tour", "tours", "package", "packages", "name", "duration", "theme", "destinations", "price",
    "highlight",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChunkKind {
    MainInfo,
    Highlight,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedChunk {
    pub tour_name: String,
    pub kind: ChunkKind,
    pub text: String,
    /// Sparse L2-normalized embedding, sorted by bucket.
    pub vector: Vec<(u32, f32)>,
}

/// Chunks for one tour: a main-info block plus one per real highlight.
pub fn prepare_tour_chunks(tour: &TourRecord) -> Vec<(ChunkKind, String)> {
    let mut chunks = vec![(
        ChunkKind::MainInfo,
        format!(
            "Tour Name: {}\nDuration: {}\nTheme: {}\nDestinations: {}\nPrice: {}",
            tour.name,
            tour.duration,
            tour.theme,
            tour.destinations.join(", "),
            tour.price
        ),
    )];
    chunks.extend(
        tour.highlights
            .iter()
            .map(|h| h.trim())
            .filter(|h| !h.is_empty() && *h != SENTINEL_HIGHLIGHT)
            .map(|h| {
                (
                    ChunkKind::Highlight,
                    format!("Tour: {} - Highlight: {}", tour.name, h),
                )
            }),
    );
    chunks
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() > 1)
        .map(str::to_lowercase)
        .filter(|t| !STOP_WORDS.contains(&t.as_str()))
}

// FNV-1a, stable across runs and platforms so persisted vectors stay valid.
fn bucket(token: &str, dimensions: u32) -> u32 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for byte in token.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x100000001b3);
    }
    (hash % u64::from(dimensions)) as u32
}

/// Hashed bag-of-words embedding. Empty when the text has no content words.
pub fn embed(text: &str, dimensions: u32) -> Vec<(u32, f32)> {
    let mut counts: Vec<(u32, f32)> = Vec::new();
    for token in tokenize(text) {
        let b = bucket(&token, dimensions);
        match counts.binary_search_by_key(&b, |(k, _)| *k) {
            Ok(pos) => counts[pos].1 += 1.0,
            Err(pos) => counts.insert(pos, (b, 1.0)),
        }
    }
    let norm = counts.iter().map(|(_, v)| v * v).sum::<f32>().sqrt();
    if norm <= f32::EPSILON {
        return Vec::new();
    }
    for (_, v) in &mut counts {
        *v /= norm;
    }
    counts
}

/// Cosine of two sparse unit vectors (a plain dot product).
pub fn cosine_similarity(left: &[(u32, f32)], right: &[(u32, f32)]) -> f32 {
    let (mut i, mut j, mut dot) = (0, 0, 0.0);
    while i < left.len() && j < right.len() {
        match left[i].0.cmp(&right[j].0) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                dot += left[i].1 * right[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    dot
}

/// In-process index persisted as JSON under `index/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexicalIndex {
    #[serde(default)]
    version: u32,
    dimensions: u32,
    similarity_threshold: f32,
    chunks: Vec<IndexedChunk>,
}

impl Default for LexicalIndex {
    fn default() -> Self {
        Self::new(DEFAULT_SIMILARITY_THRESHOLD)
    }
}

impl LexicalIndex {
    pub fn new(similarity_threshold: f32) -> Self {
        Self {
            version: INDEX_FORMAT_VERSION,
            dimensions: DEFAULT_DIMENSIONS,
            similarity_threshold,
            chunks: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn load(path: &Path) -> Result<Self, AtlasError> {
        let content = fs::read_to_string(path)?;
        let index: LexicalIndex = serde_json::from_str(&content)?;
        if index.version != INDEX_FORMAT_VERSION {
            log::warn!(
                "[Index] {:?} has format v{}, expected v{}; it will be ignored",
                path,
                index.version,
                INDEX_FORMAT_VERSION
            );
            return Ok(Self::new(index.similarity_threshold));
        }
        Ok(index)
    }

    /// Loads the persisted index, or an empty one when it is missing or unreadable.
    pub fn load_or_empty(path: &Path, similarity_threshold: f32) -> Self {
        match Self::load(path) {
            Ok(mut index) => {
                index.similarity_threshold = similarity_threshold;
                log::debug!("[Index] Loaded {} chunks from {:?}", index.len(), path);
                index
            }
            Err(e) => {
                log::warn!("[Index] No usable index at {:?}: {}", path, e);
                Self::new(similarity_threshold)
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), AtlasError> {
        write_json_atomic(path, self)?;
        log::info!("[Index] Saved {} chunks to {:?}", self.len(), path);
        Ok(())
    }

    /// `(chunk, similarity)` pairs above the threshold, best first. Stable on ties.
    pub fn search(&self, query: &str, n: usize) -> Vec<(&IndexedChunk, f32)> {
        let query_vec = embed(query, self.dimensions);
        if query_vec.is_empty() || n == 0 {
            return Vec::new();
        }
        let mut scored: Vec<(&IndexedChunk, f32)> = self
            .chunks
            .iter()
            .map(|c| (c, cosine_similarity(&query_vec, &c.vector)))
            .filter(|(_, score)| *score >= self.similarity_threshold)
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scored.truncate(n);
        scored
    }
}

impl VectorIndex for LexicalIndex {
    fn index(&mut self, corpus: &[TourRecord]) -> Result<usize, AtlasError> {
        let dimensions = self.dimensions;
        self.chunks = corpus
            .iter()
            .flat_map(|tour| {
                prepare_tour_chunks(tour)
                    .into_iter()
                    .map(move |(kind, text)| IndexedChunk {
                        tour_name: tour.name.clone(),
                        kind,
                        vector: embed(&text, dimensions),
                        text,
                    })
            })
            .collect();
        log::info!(
            "[Index] Indexed {} chunks from {} tours",
            self.chunks.len(),
            corpus.len()
        );
        Ok(self.chunks.len())
    }

    fn get_context(&self, query: &str, n: usize) -> Result<String, AtlasError> {
        let hits = self.search(query, n);
        log::debug!("[Index] {} hits for {:?}", hits.len(), query);
        Ok(hits
            .iter()
            .map(|(chunk, _)| format!("[From {}]: {}", chunk.tour_name, chunk.text))
            .collect::<Vec<_>>()
            .join("\n\n"))
    }
}
