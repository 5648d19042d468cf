// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Question answering with graceful degradation:
//! generated answer -> raw context -> keyword search -> no-match message.

use crate::config::AtlasConfig;
use crate::corpus::Corpus;
use crate::index::VectorIndex;
use crate::llm::GenerationCapability;
use crate::prompts::{qa_prompt, QA_SYSTEM_PROMPT};
use crate::record::{TourRecord, SENTINEL_DESTINATIONS, SENTINEL_HIGHLIGHT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerMode {
    /// Context found and the generation service answered.
    Generated,
    /// Context found but generation was unavailable or failed.
    ContextOnly,
    Keyword,
    NoMatch,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    pub mode: AnswerMode,
    pub text: String,
}

/// Stateless per query; holds only borrowed, read-only collaborators.
pub struct QaResolver<'a> {
    corpus: &'a Corpus,
    index: &'a dyn VectorIndex,
    generation: &'a GenerationCapability,
    config: &'a AtlasConfig,
}

impl<'a> QaResolver<'a> {
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

    pub fn answer_question(&self, query: &str) -> Answer {
        let query = query.trim();
        if query.is_empty() {
            return self.no_match();
        }
        log::info!("[QA] Question: {:?}", query);

        let context = match self.index.get_context(query, self.config.qa_context_results) {
            Ok(context) => context,
            Err(e) => {
                log::warn!("[QA] Vector index failed, falling back to keyword search: {}", e);
                String::new()
            }
        };

        if context.trim().is_empty() {
            return self.keyword_answer(query);
        }

        let url = &self.config.website_url;
        match self.generation.generator() {
            Some(generator) => {
                let prompt = qa_prompt(&context, query, url);
                match generator.complete(QA_SYSTEM_PROMPT, &prompt, &self.config.qa_generation) {
                    Ok(text) => Answer {
                        mode: AnswerMode::Generated,
                        text,
                    },
                    Err(e) => {
                        log::warn!("[QA] Generation failed, returning raw context: {}", e);
                        Answer {
                            mode: AnswerMode::ContextOnly,
                            text: format!(
                                "**Here's what I found about your query:**\n\n{}\n\n\
                                 [TIP] For more options, visit our website: {}\n\n\
                                 Would you like me to help with something else?",
                                context, url
                            ),
                        }
                    }
                }
            }
            None => Answer {
                mode: AnswerMode::ContextOnly,
                text: format!(
                    "**Here's what I found in our tours database:**\n\n{}\n\n\
                     [TIP] For more options, visit our website: {}",
                    context, url
                ),
            },
        }
    }

    /// Scores every tour against the whole lower-cased query:
    /// name +3, each destination +2, theme +2, each highlight +1. Placeholders never score.
    /// Best first; equal scores keep corpus order.
    pub fn search_by_keyword(&self, query: &str) -> Vec<&'a TourRecord> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        let hit = |text: &str| text.to_lowercase().contains(&needle);

        let mut scored: Vec<(&'a TourRecord, u32)> = self
            .corpus
            .tours
            .iter()
            .filter_map(|tour| {
                let mut score = 0;
                if hit(tour.name.as_str()) {
                    score += 3;
                }
                score += 2 * tour
                    .destinations
                    .iter()
                    .filter(|d| d.as_str() != SENTINEL_DESTINATIONS && hit(d.as_str()))
                    .count() as u32;
                if hit(tour.theme.label()) {
                    score += 2;
                }
                score += tour
                    .highlights
                    .iter()
                    .filter(|h| h.as_str() != SENTINEL_HIGHLIGHT && hit(h.as_str()))
                    .count() as u32;
                (score > 0).then_some((tour, score))
            })
            .collect();

        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored
            .into_iter()
            .take(self.config.keyword_results)
            .map(|(tour, _)| tour)
            .collect()
    }

    fn keyword_answer(&self, query: &str) -> Answer {
        let tours = self.search_by_keyword(query);
        if tours.is_empty() {
            log::info!("[QA] No vector context and no keyword match for {:?}", query);
            return self.no_match();
        }

        let mut text = String::from("**Based on your query, here are relevant tours:**\n\n");
        for tour in &tours {
            text.push_str(&format_tour_card(tour));
        }
        text.push_str(&format!(
            "\n[TIP] For more options, visit our website: {}",
            self.config.website_url
        ));
        Answer {
            mode: AnswerMode::Keyword,
            text,
        }
    }

    fn no_match(&self) -> Answer {
        Answer {
            mode: AnswerMode::NoMatch,
            text: no_match_message(&self.config.website_url),
        }
    }
}

pub fn format_tour_card(tour: &TourRecord) -> String {
    let mut card = format!(
        "\n[TOUR] **{}**\n   Duration: {}\n   Theme: {}\n   Destinations: {}\n   Price: {}\n",
        tour.name,
        tour.duration,
        tour.theme,
        tour.destinations.join(", "),
        tour.price
    );
    if !tour.highlights.is_empty() {
        card.push_str("   Highlights:\n");
        for h in tour.highlights.iter().take(3) {
            card.push_str(&format!("     • {}\n", h));
        }
    }
    card
}

pub fn no_match_message(website_url: &str) -> String {
    format!(
        "I couldn't find specific tours matching your query in our database. \n\n\
         [SUGGESTIONS]\n\
         • Try different keywords (e.g., \"Delhi\" instead of \"New Delhi\")\n\
         • Browse our complete collection on our website\n\
         • Contact our travel experts for personalized assistance\n\n\
         [WEBSITE] Visit us at: {}\n\n\
         Would you like help with something else?",
        website_url
    )
}
