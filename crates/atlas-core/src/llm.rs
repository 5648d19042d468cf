// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Chat-completion client and the startup capability check.

use crate::config::AtlasConfig;
use crate::AtlasError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl GenerationOptions {
    pub const QA: GenerationOptions = GenerationOptions {
        temperature: 0.7,
        max_tokens: 500,
    };
    pub const ITINERARY: GenerationOptions = GenerationOptions {
        temperature: 0.8,
        max_tokens: 2000,
    };
}

/// Prompt in, text out. Any error is treated as "generation unavailable" by callers.
pub trait Generator {
    fn complete(
        &self,
        system: &str,
        user: &str,
        opts: &GenerationOptions,
    ) -> Result<String, AtlasError>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: &str) -> Self {
        Self {
            role: "system".to_string(),
            content: content.to_string(),
        }
    }

    pub fn user(content: &str) -> Self {
        Self {
            role: "user".to_string(),
            content: content.to_string(),
        }
    }
}

/// Blocking OpenAI-compatible `/chat/completions` client. One attempt, bounded timeout.
pub struct ChatCompletionClient {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl std::fmt::Debug for ChatCompletionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatCompletionClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl ChatCompletionClient {
    pub fn new(config: &AtlasConfig) -> Result<Self, AtlasError> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| AtlasError::GenerationUnavailable("no API key configured".into()))?
            .to_string();

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// `GET /models`; any non-success status is a failure.
    pub fn probe(&self) -> Result<(), AtlasError> {
        let url = format!("{}/models", self.base_url);
        self.client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()?
            .error_for_status()?;
        Ok(())
    }
}

/// Pulls `choices[0].message.content` out of a chat-completion payload.
pub fn extract_content(payload: &Value) -> Result<String, AtlasError> {
    payload["choices"][0]["message"]["content"]
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or(AtlasError::EmptyCompletion)
}

impl Generator for ChatCompletionClient {
    fn complete(
        &self,
        system: &str,
        user: &str,
        opts: &GenerationOptions,
    ) -> Result<String, AtlasError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = json!({
            "model": self.model,
            "messages": [ChatMessage::system(system), ChatMessage::user(user)],
            "temperature": opts.temperature,
            "max_tokens": opts.max_tokens,
        });

        log::debug!(
            "[LLM] POST {} model={} max_tokens={}",
            url,
            self.model,
            opts.max_tokens
        );
        let payload: Value = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()?
            .error_for_status()?
            .json()?;

        extract_content(&payload)
    }
}

/// Decided once at startup; downstream code never retries construction.
pub enum GenerationCapability {
    Available(Box<dyn Generator>),
    Unavailable(String),
}

impl std::fmt::Debug for GenerationCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationCapability::Available(_) => f.write_str("Available"),
            GenerationCapability::Unavailable(reason) => {
                f.debug_tuple("Unavailable").field(reason).finish()
            }
        }
    }
}

impl GenerationCapability {
    pub fn detect(config: &AtlasConfig) -> Self {
        let client = match ChatCompletionClient::new(config) {
            Ok(client) => client,
            Err(e) => {
                log::warn!("[LLM] Generation disabled: {}", e);
                return Self::Unavailable(e.to_string());
            }
        };

        if config.probe_on_startup {
            if let Err(e) = client.probe() {
                log::warn!("[LLM] Startup probe failed, generation disabled: {}", e);
                return Self::Unavailable(format!("startup probe failed: {}", e));
            }
        }

        log::info!("[LLM] Generation enabled (model {})", client.model());
        Self::Available(Box::new(client))
    }

    pub fn from_generator<G: Generator + 'static>(generator: G) -> Self {
        Self::Available(Box::new(generator))
    }

    pub fn generator(&self) -> Option<&dyn Generator> {
        match self {
            GenerationCapability::Available(g) => Some(g.as_ref()),
            GenerationCapability::Unavailable(_) => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, GenerationCapability::Available(_))
    }
}
