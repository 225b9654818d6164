use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::domain::{ChatTurn, GenerateOptions, GenerationError, GenerationResult};

use super::env::read_env_var;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const MODEL_ROLE: &str = "model";
const USER_ROLE: &str = "user";
const ENV_API_KEY: &str = "VITRINA_GEMINI_API_KEY";
const ENV_API_KEY_FALLBACK: &str = "GEMINI_API_KEY";
const ENV_BASE_URL: &str = "VITRINA_GEMINI_BASE_URL";
const ENV_MODEL: &str = "VITRINA_GEMINI_MODEL";
const CONNECTION_PROBE_PROMPT: &str = "Test";
const CONNECTION_PROBE_MAX_OUTPUT_TOKENS: u32 = 10;

#[derive(Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl GeminiConfig {
    /// An empty API key is accepted here: construction never fails, and the
    /// gap is surfaced per call as a failed result instead.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn from_env() -> Self {
        let api_key = read_env_var(ENV_API_KEY)
            .or_else(|| read_env_var(ENV_API_KEY_FALLBACK))
            .unwrap_or_default();
        if api_key.trim().is_empty() {
            warn!(
                "{ENV_API_KEY} is not set; generation requests will fail until a key is configured"
            );
        }

        let mut config = Self::new(api_key);
        if let Some(base_url) = read_env_var(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        if let Some(model) = read_env_var(ENV_MODEL) {
            config.model = model;
        }
        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

/// Adapter between the site's generation requests and the Gemini
/// `generateContent` REST endpoint. Holds read-only configuration and a
/// shared HTTP client, so any number of calls may run concurrently from
/// `&self`. Every public operation returns a [`GenerationResult`]; no error
/// escapes to the caller.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    client: Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(GeminiConfig::from_env())
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// True iff an API key is present. No side effects, no network access.
    pub fn is_configured(&self) -> bool {
        !self.config.api_key.trim().is_empty()
    }

    /// Generates a completion for a single prompt. An empty prompt is
    /// accepted and forwarded unchanged.
    pub async fn generate_content(
        &self,
        prompt: &str,
        options: &GenerateOptions,
    ) -> GenerationResult {
        let contents = vec![RequestContent::prompt(prompt)];
        self.generate(contents, options, "content generation").await
    }

    /// Generates a reply to an ordered conversation. Turn order is preserved
    /// exactly in the outbound request; any role other than "model" is sent
    /// as "user".
    pub async fn generate_chat(
        &self,
        turns: &[ChatTurn],
        options: &GenerateOptions,
    ) -> GenerationResult {
        let contents = turns.iter().map(RequestContent::from_turn).collect();
        self.generate(contents, options, "chat generation").await
    }

    /// Issues a minimal generation probe and reports only whether it
    /// succeeded, discarding the error payload of the richer result.
    pub async fn test_connection(&self) -> bool {
        let options = GenerateOptions {
            max_output_tokens: Some(CONNECTION_PROBE_MAX_OUTPUT_TOKENS),
            ..GenerateOptions::default()
        };
        self.generate_content(CONNECTION_PROBE_PROMPT, &options)
            .await
            .success
    }

    async fn generate(
        &self,
        contents: Vec<RequestContent>,
        options: &GenerateOptions,
        operation: &str,
    ) -> GenerationResult {
        match self.request_generation(contents, options).await {
            Ok(text) => GenerationResult::success(text),
            Err(error) => {
                error!(%error, "{operation} failed");
                GenerationResult::failure(&error)
            }
        }
    }

    async fn request_generation(
        &self,
        contents: Vec<RequestContent>,
        options: &GenerateOptions,
    ) -> Result<String, GenerationError> {
        if !self.is_configured() {
            return Err(GenerationError::configuration(format!(
                "{ENV_API_KEY} is not set"
            )));
        }

        let model = options.model.as_deref().unwrap_or(&self.config.model);
        let payload = GenerateContentRequest {
            contents,
            generation_config: GenerationConfig {
                temperature: options.temperature_or_default(),
                max_output_tokens: options.max_output_tokens_or_default(),
            },
        };

        debug!(%model, turns = payload.contents.len(), "dispatching generateContent request");

        let response = self
            .client
            .post(self.endpoint_url(model))
            .header("x-goog-api-key", &self.config.api_key)
            .header("content-type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let response_body = response.text().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_http_error(status, &response_body));
        }

        extract_first_candidate_text(&response_body)
    }

    fn endpoint_url(&self, model: &str) -> String {
        format!(
            "{}/models/{model}:generateContent",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

fn map_transport_error(error: reqwest::Error) -> GenerationError {
    GenerationError::transport(error.to_string())
}

fn map_http_error(status: StatusCode, body: &str) -> GenerationError {
    // The error body is best-effort: a body that fails to parse must never
    // mask the original HTTP failure.
    let detail = serde_json::from_str::<GeminiErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error)
        .map(|detail| detail.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| status_line(status));

    GenerationError::http_status(status.as_u16(), detail)
}

fn status_line(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("unrecognized status")
        .to_string()
}

fn extract_first_candidate_text(body: &str) -> Result<String, GenerationError> {
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|err| GenerationError::invalid_response(err.to_string()))?;

    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(GenerationError::NoContent);
    };

    let text = candidate
        .content
        .parts
        .into_iter()
        .next()
        .map(|part| part.text)
        .unwrap_or_default();
    Ok(text)
}

fn map_role(role: &str) -> &'static str {
    if role == MODEL_ROLE { MODEL_ROLE } else { USER_ROLE }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<RequestPart>,
}

impl RequestContent {
    fn prompt(text: &str) -> Self {
        Self {
            role: None,
            parts: vec![RequestPart {
                text: text.to_string(),
            }],
        }
    }

    fn from_turn(turn: &ChatTurn) -> Self {
        Self {
            role: Some(map_role(&turn.role).to_string()),
            parts: vec![RequestPart {
                text: turn.text.clone(),
            }],
        }
    }
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
}

#[derive(Debug, Deserialize)]
struct ResponseCandidate {
    #[serde(default)]
    content: ResponseContent,
}

#[derive(Debug, Deserialize, Default)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorEnvelope {
    #[serde(default)]
    error: Option<GeminiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    #[serde(default)]
    message: String,
}
