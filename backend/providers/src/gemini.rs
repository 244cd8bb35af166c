use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use plchat_core::{
    ChatError, ChatProvider, FinishReason, ProviderReply, ProviderRequest, SafetyRating, TurnRole,
};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

const PROVIDER: &str = "gemini";
const GENERIC_FAILURE: &str = "The request to the Gemini API failed.";

/// Categories blocked at medium probability and above.
const SAFETY_CATEGORIES: &[&str] = &[
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];
const SAFETY_THRESHOLD: &str = "BLOCK_MEDIUM_AND_ABOVE";

/// Google Gemini `generateContent` provider.
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiProvider {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: WireGenerationConfig,
    safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<TextPart>,
}

#[derive(Debug, Serialize)]
struct TextPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
    #[serde(default)]
    safety_ratings: Vec<WireSafetyRating>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
    #[serde(default)]
    safety_ratings: Vec<WireSafetyRating>,
}

#[derive(Debug, Deserialize)]
struct WireSafetyRating {
    category: String,
    probability: Option<String>,
    #[serde(default)]
    blocked: bool,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

fn text_content(role: Option<&'static str>, text: &str) -> Content {
    Content {
        role,
        parts: vec![TextPart {
            text: text.to_string(),
        }],
    }
}

fn build_body(request: &ProviderRequest) -> GenerateContentRequest {
    let mut contents: Vec<Content> = request
        .history
        .iter()
        .map(|turn| {
            let role = match turn.role {
                TurnRole::User => "user",
                TurnRole::Model => "model",
            };
            text_content(Some(role), &turn.text)
        })
        .collect();
    contents.push(text_content(Some("user"), &request.user_message));

    GenerateContentRequest {
        system_instruction: text_content(None, &request.system_instruction),
        contents,
        generation_config: WireGenerationConfig {
            temperature: request.generation.temperature,
            top_p: request.generation.top_p,
            top_k: request.generation.top_k,
            max_output_tokens: request.generation.max_output_tokens,
        },
        safety_settings: SAFETY_CATEGORIES
            .iter()
            .map(|&category| SafetySetting {
                category,
                threshold: SAFETY_THRESHOLD,
            })
            .collect(),
    }
}

fn parse_reply(response: GenerateContentResponse) -> ProviderReply {
    let mut candidates = response.candidates.into_iter();
    let primary = candidates.next();
    let feedback = response.prompt_feedback;

    let text = primary
        .as_ref()
        .and_then(|c| c.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .filter_map(|part| part.text.as_deref())
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_default();

    let finish_reason = primary
        .as_ref()
        .and_then(|c| c.finish_reason.as_deref())
        .map(FinishReason::from);
    let block_reason = feedback
        .as_ref()
        .and_then(|f| f.block_reason.as_deref())
        .map(FinishReason::from);

    let safety_ratings = feedback
        .into_iter()
        .flat_map(|f| f.safety_ratings)
        .chain(primary.into_iter().flat_map(|c| c.safety_ratings))
        .map(|rating| SafetyRating {
            category: rating.category,
            probability: rating.probability,
            blocked: rating.blocked,
        })
        .collect();

    ProviderReply {
        text: text.trim().to_string(),
        finish_reason,
        block_reason,
        safety_ratings,
    }
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| GENERIC_FAILURE.to_string())
}

#[async_trait]
impl ChatProvider for GeminiProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn send_chat(&self, request: &ProviderRequest) -> Result<ProviderReply, ChatError> {
        let start = Instant::now();
        let body = build_body(request);

        debug!(
            model = %self.model,
            turns = body.contents.len(),
            "Sending request to Gemini"
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ChatError::upstream(PROVIDER, format!("{GENERIC_FAILURE} {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            debug!(%status, "Gemini returned an error status");
            return Err(ChatError::upstream(PROVIDER, error_message(&error_body)));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            ChatError::upstream(PROVIDER, format!("Failed to parse Gemini response: {e}"))
        })?;

        let reply = parse_reply(parsed);
        debug!(
            latency_ms = start.elapsed().as_millis() as u64,
            finish_reason = ?reply.finish_reason,
            chars = reply.text.len(),
            "Gemini reply received"
        );
        Ok(reply)
    }
}
