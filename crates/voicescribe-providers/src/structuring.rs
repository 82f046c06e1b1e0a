//! Document structuring provider adapter
//!
//! Sends raw transcript text to a language-model provider with a fixed
//! instruction template and recovers the expected `paragraphs` shape
//! from its free-form answer.

use crate::error::{ProviderError, ProviderResult};
use crate::types::StructuredOutcome;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};
use voicescribe_core::config::StructuringConfig;
use voicescribe_core::Paragraph;

/// Chat-style request body
#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

/// Provider response envelope: a content array with text blocks
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

/// The shape the instruction template asks the model to produce
#[derive(Debug, Deserialize)]
struct ParagraphsPayload {
    paragraphs: Vec<Paragraph>,
}

/// Interface to a document structuring provider
#[async_trait]
pub trait DocumentStructurer: Send + Sync {
    /// Whether the adapter has credentials to make provider calls
    fn is_configured(&self) -> bool;

    /// Segment, summarize, and correct a block of raw text
    ///
    /// A malformed response body is not an error; it degrades to
    /// [`StructuredOutcome::Fallback`]. Errors are reserved for the
    /// provider call itself failing.
    async fn structure(&self, text: &str) -> ProviderResult<StructuredOutcome>;

    /// Provider name for logging
    fn name(&self) -> &str;
}

/// Claude Messages API structuring adapter
#[derive(Debug)]
pub struct ClaudeStructuring {
    config: StructuringConfig,
    client: reqwest::Client,
}

impl ClaudeStructuring {
    /// Create a new adapter from provider configuration
    pub fn new(config: StructuringConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .expect("failed to build HTTP client");

        Self { config, client }
    }

    /// Build the fixed instruction prompt, embedding the text verbatim
    fn build_prompt(text: &str) -> String {
        format!(
            "The following text was produced by speech recognition. \
             Organize and summarize it.\n\n\
             Transcript:\n{text}\n\n\
             Follow these instructions:\n\
             1. Split the content into meaning-based paragraphs\n\
             2. Provide a one-line summary for each paragraph\n\
             3. Correct spelling and grammar so each paragraph reads naturally\n\n\
             Respond using this JSON format:\n\
             {{\n  \"paragraphs\": [\n    {{\n      \"summary\": \"paragraph summary\",\n      \
             \"content\": \"corrected content\"\n    }}\n  ]\n}}"
        )
    }
}

/// Recover the expected paragraphs shape from a free-form model answer
///
/// Scans from the first `{` through the LAST `}`, deliberately greedy
/// to match observed provider output; with several JSON-like fragments
/// the capture spans them all. Any miss degrades to the full text.
pub(crate) fn recover_paragraphs(text: &str) -> StructuredOutcome {
    let candidate = text
        .find('{')
        .zip(text.rfind('}'))
        .filter(|(start, end)| start < end)
        .map(|(start, end)| &text[start..=end]);

    match candidate {
        Some(json) => match serde_json::from_str::<ParagraphsPayload>(json) {
            Ok(payload) => StructuredOutcome::Parsed(payload.paragraphs),
            Err(_) => StructuredOutcome::Fallback(text.to_string()),
        },
        None => StructuredOutcome::Fallback(text.to_string()),
    }
}

#[async_trait]
impl DocumentStructurer for ClaudeStructuring {
    fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    async fn structure(&self, text: &str) -> ProviderResult<StructuredOutcome> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return Err(ProviderError::configuration(
                "structuring API key is not configured",
            ));
        };

        let request = MessagesRequest {
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
            messages: vec![Message {
                role: "user",
                content: Self::build_prompt(text),
            }],
        };

        info!(chars = text.len(), "requesting document structuring");

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("x-api-key", api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::structuring(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            error!(status = status.as_u16(), body = %body, "structuring request failed");
            return Err(ProviderError::structuring(format!(
                "provider returned status {}",
                status.as_u16()
            )));
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::structuring(format!("unreadable response: {e}")))?;

        let answer = parsed
            .content
            .iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text.as_deref())
            .ok_or_else(|| ProviderError::structuring("response contained no text block"))?;

        Ok(recover_paragraphs(answer))
    }

    fn name(&self) -> &str {
        "claude"
    }
}
