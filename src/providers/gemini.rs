//! Gemini provider implementation
//!
//! Talks to the hosted generative language API with the Google Maps tool
//! enabled, so replies arrive grounded in nearby places. When the caller
//! supplies coordinates they are forwarded as a retrieval bias and the
//! grounding chunks in the response are normalized into map and web
//! citations on the returned turn.
//!
//! Transport and payload failures never surface to the caller. The provider
//! logs the cause and answers with the fixed fallback turn instead.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::base::GroundedModel;
use crate::config::ModelConfig;
use crate::error::{Result, SahaayError};
use crate::location::Coordinates;
use crate::prompts;
use crate::transcript::{Citation, Speaker, Turn};

/// Default base URL of the hosted generative language API
const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Provider for Gemini models with map grounding
pub struct GeminiProvider {
    client: Client,
    config: ModelConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_config: Option<ToolConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    google_maps: GoogleMapsTool,
}

#[derive(Debug, Serialize)]
struct GoogleMapsTool {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolConfig {
    retrieval_config: RetrievalConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RetrievalConfig {
    lat_lng: Coordinates,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    maps: Option<ChunkSource>,
    web: Option<ChunkSource>,
}

#[derive(Debug, Deserialize)]
struct ChunkSource {
    title: Option<String>,
    uri: Option<String>,
}

/// One grounding chunk classified by origin
#[derive(Debug, Clone, PartialEq)]
enum Evidence {
    /// A place with a maps link
    Map(Citation),
    /// A supporting web page
    Web(Citation),
    /// Anything the normalizer does not recognize
    Unknown,
}

/// Classifies a raw grounding chunk, filling in default titles.
///
/// A chunk carrying both a maps and a web side counts as a map resource.
fn classify(chunk: GroundingChunk) -> Evidence {
    if let Some(source) = chunk.maps {
        let title = source
            .title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| prompts::DEFAULT_MAP_TITLE.to_string());
        return Evidence::Map(Citation::new(title, source.uri.unwrap_or_default()));
    }
    if let Some(source) = chunk.web {
        let title = source
            .title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| prompts::DEFAULT_WEB_TITLE.to_string());
        return Evidence::Web(Citation::new(title, source.uri.unwrap_or_default()));
    }
    Evidence::Unknown
}

impl GeminiProvider {
    /// Creates a new Gemini provider
    ///
    /// # Arguments
    ///
    /// * `config` - Model configuration (model name, API key, timeout)
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be constructed
    pub fn new(config: ModelConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .user_agent("sahaay/0.1.0")
            .build()
            .map_err(|e| SahaayError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!("Initialized Gemini provider with model: {}", config.model);

        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        let base = self
            .config
            .api_base
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/');
        format!("{}/v1beta/models/{}:generateContent", base, self.config.model)
    }

    /// Builds the request payload from the history and the new utterance.
    ///
    /// System turns are local notices and never leave the process. The new
    /// utterance always lands as the final user entry, and the retrieval
    /// bias only appears when coordinates are known.
    fn build_request(
        history: &[Turn],
        utterance: &str,
        coords: Option<Coordinates>,
    ) -> GenerateContentRequest {
        let mut contents: Vec<Content> = history
            .iter()
            .filter(|turn| turn.speaker != Speaker::System)
            .map(|turn| Content {
                role: Some(
                    match turn.speaker {
                        Speaker::User => "user",
                        _ => "model",
                    }
                    .to_string(),
                ),
                parts: vec![Part {
                    text: turn.text.clone(),
                }],
            })
            .collect();
        contents.push(Content {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: utterance.to_string(),
            }],
        });

        GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: prompts::SYSTEM_DIRECTIVE.to_string(),
                }],
            },
            contents,
            tools: vec![Tool {
                google_maps: GoogleMapsTool {},
            }],
            tool_config: coords.map(|lat_lng| ToolConfig {
                retrieval_config: RetrievalConfig { lat_lng },
            }),
        }
    }

    /// Normalizes a successful API response into an assistant turn.
    ///
    /// Grounding chunks partition into map and web citations in arrival
    /// order; unrecognized chunks drop out silently. An answer without text
    /// still reassures the user via the searching placeholder.
    fn normalize_response(response: GenerateContentResponse) -> Turn {
        let candidate = response.candidates.into_iter().next();

        let text: String = candidate
            .as_ref()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .map(|part| part.text.as_str())
                    .collect()
            })
            .unwrap_or_default();

        let mut map_citations = Vec::new();
        let mut web_citations = Vec::new();
        if let Some(metadata) = candidate.and_then(|c| c.grounding_metadata) {
            for chunk in metadata.grounding_chunks {
                match classify(chunk) {
                    Evidence::Map(citation) => map_citations.push(citation),
                    Evidence::Web(citation) => web_citations.push(citation),
                    Evidence::Unknown => {}
                }
            }
        }

        let text = if text.is_empty() {
            prompts::SEARCHING_PLACEHOLDER.to_string()
        } else {
            text
        };

        Turn::assistant_with_citations(text, map_citations, web_citations)
    }

    fn fallback_turn() -> Turn {
        Turn::assistant(prompts::FALLBACK_MESSAGE)
    }
}

#[async_trait]
impl GroundedModel for GeminiProvider {
    async fn converse(
        &self,
        history: &[Turn],
        utterance: &str,
        coords: Option<Coordinates>,
    ) -> Turn {
        let request = Self::build_request(history, utterance, coords);
        let api_key = self.config.api_key.clone().unwrap_or_default();

        let response = match self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Gemini request failed: {}", e);
                return Self::fallback_turn();
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Gemini API error: {} - {}", status, body);
            return Self::fallback_turn();
        }

        match response.json::<GenerateContentResponse>().await {
            Ok(payload) => Self::normalize_response(payload),
            Err(e) => {
                tracing::error!("Gemini returned an unreadable payload: {}", e);
                Self::fallback_turn()
            }
        }
    }

    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> String {
        self.config.model.clone()
    }
}
