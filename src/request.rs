// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Asking a hosted model for mind-map text
//!
//! The model is instructed to answer in the line convention understood by
//! [`crate::parser`], but nothing here checks that it did.

use crate::types::RawGraphText;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Environment variable consulted when no API key is configured
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// What the user wants a mind map of. No field is validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MindMapRequest {
    /// Main topic, the central node
    pub topic: String,
    /// Free-text description of the topic
    pub description: String,
    /// Free-text study plan
    pub study_plan: String,
    /// Free-text timeframe, e.g. "5 days"
    pub timeframe: String,
}

impl MindMapRequest {
    /// Instruction text sent to the model
    #[must_use]
    pub fn prompt(&self) -> String {
        format!(
            "Generate a mind map for the following topic:\n\
             Topic: {}\n\
             Description: {}\n\
             Study Plan: {}\n\
             Timeframe: {}\n\
             \n\
             Structure the mind map with the following hierarchy:\n\
             - The main topic is the central node.\n\
             - Under the main topic, list each day of the timeframe as a sub-heading.\n\
             - Under each day, add branches with the key points or tasks for that day.\n\
             \n\
             Answer with plain lines only, no markdown:\n\
             - one line per node, holding just its label;\n\
             - one line per connection, written as `parent -> child`.\n",
            self.topic, self.description, self.study_plan, self.timeframe
        )
    }
}

/// Failure to obtain usable mind-map text
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// No key in config or environment
    #[error("no API key configured; set generation.api_key or GEMINI_API_KEY")]
    MissingApiKey,
    /// Transport or decoding failure
    #[error("request to generation service failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The service answered with an error status
    #[error("generation service returned {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message reported by the service
        message: String,
    },
    /// The service answered, but with no text
    #[error("generation service returned no text")]
    EmptyResponse,
}

/// Source of mind-map text.
///
/// On `Err` callers must not parse anything.
pub trait ContentRequestService {
    /// Produce raw mind-map text for a request
    fn generate(&self, request: &MindMapRequest) -> Result<RawGraphText, RequestError>;
}

/// Generation settings for the hosted model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// API key; falls back to `GEMINI_API_KEY`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Base URL of the Generative Language API
    pub endpoint: String,
    /// Model name
    pub model: String,
    /// Sampling temperature
    pub temperature: f64,
    /// Nucleus sampling threshold
    pub top_p: f64,
    /// Top-k sampling
    pub top_k: u32,
    /// Upper bound on generated tokens
    pub max_output_tokens: u32,
    /// MIME type requested for the answer
    pub response_mime_type: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Honour HTTP(S)_PROXY from the environment
    pub use_system_proxy: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.0-flash".to_string(),
            temperature: 1.6,
            top_p: 0.95,
            top_k: 64,
            max_output_tokens: 8192,
            response_mime_type: "text/plain".to_string(),
            timeout_secs: 120,
            use_system_proxy: true,
        }
    }
}

impl GenerationConfig {
    /// Configured key, else the environment, ignoring blank values
    #[must_use]
    pub fn resolve_api_key(&self) -> Option<String> {
        pick_api_key(self.api_key.clone(), || std::env::var(API_KEY_ENV).ok())
    }
}

fn pick_api_key(
    configured: Option<String>,
    env: impl FnOnce() -> Option<String>,
) -> Option<String> {
    let non_blank = |k: &String| !k.trim().is_empty();
    configured.filter(non_blank).or_else(|| env().filter(non_blank))
}

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentBody<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationParams<'a>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<PartOut<'a>>,
}

#[derive(Serialize)]
struct PartOut<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationParams<'a> {
    temperature: f64,
    top_p: f64,
    top_k: u32,
    max_output_tokens: u32,
    response_mime_type: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<PartIn>,
}

#[derive(Debug, Deserialize)]
struct PartIn {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        Some(text)
    }
}

// =============================================================================
// Client
// =============================================================================

/// Blocking client for the Generative Language `generateContent` call
#[derive(Debug)]
pub struct GeminiClient {
    http: reqwest::blocking::Client,
    api_key: String,
    config: GenerationConfig,
}

impl GeminiClient {
    /// Build a client; fails when no API key can be found
    pub fn from_config(config: &GenerationConfig) -> Result<Self, RequestError> {
        let api_key = config.resolve_api_key().ok_or(RequestError::MissingApiKey)?;
        let mut builder =
            reqwest::blocking::Client::builder().timeout(Duration::from_secs(config.timeout_secs));
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            api_key,
            config: config.clone(),
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }
}

impl ContentRequestService for GeminiClient {
    fn generate(&self, request: &MindMapRequest) -> Result<RawGraphText, RequestError> {
        let prompt = request.prompt();
        let body = GenerateContentBody {
            contents: vec![Content {
                role: "user",
                parts: vec![PartOut { text: &prompt }],
            }],
            generation_config: GenerationParams {
                temperature: self.config.temperature,
                top_p: self.config.top_p,
                top_k: self.config.top_k,
                max_output_tokens: self.config.max_output_tokens,
                response_mime_type: &self.config.response_mime_type,
            },
        };

        info!("Requesting mind map for {:?} from {}", request.topic, self.config.model);
        let response = self
            .http
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(RequestError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = response.json()?;
        let raw = RawGraphText::new(parsed.into_text().unwrap_or_default());
        if raw.is_blank() {
            return Err(RequestError::EmptyResponse);
        }

        debug!(bytes = raw.as_str().len(), "Received mind map text");
        Ok(raw)
    }
}
