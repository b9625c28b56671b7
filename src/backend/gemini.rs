use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, error, info, instrument, trace, warn};

use crate::backend::{LLMClient, check_response_status, handle_http_error, parse_structured};
use crate::error::{MediSageError, Result};
use crate::model::Instructor;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Environment variables checked by [`GeminiClient::from_env`], in order.
pub const API_KEY_ENV_VARS: [&str; 3] =
    ["GEMINI_API_KEY", "GOOGLE_GENAI_API_KEY", "GOOGLE_API_KEY"];

/// Gemini models available for completion
///
/// Any other model name can be used through `Custom` or `FromStr`:
///
/// ```rust
/// use medisage::GeminiModel;
/// use std::str::FromStr;
///
/// let model = GeminiModel::from_str("gemini-custom").unwrap();
/// assert_eq!(model, GeminiModel::Custom("gemini-custom".to_string()));
/// assert_eq!(GeminiModel::from("gemini-2.0-flash"), GeminiModel::Gemini20Flash);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Model {
    /// Gemini 2.5 Pro
    Gemini25Pro,
    /// Gemini 2.5 Flash
    Gemini25Flash,
    /// Gemini 2.5 Flash Lite
    Gemini25FlashLite,
    /// Gemini 2.0 Flash
    #[default]
    Gemini20Flash,
    /// Gemini 2.0 Flash Lite
    Gemini20FlashLite,
    /// Custom model name (for new models or Gemini-compatible endpoints)
    Custom(String),
}

impl Model {
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gemini25Pro => "gemini-2.5-pro",
            Model::Gemini25Flash => "gemini-2.5-flash",
            Model::Gemini25FlashLite => "gemini-2.5-flash-lite",
            Model::Gemini20Flash => "gemini-2.0-flash",
            Model::Gemini20FlashLite => "gemini-2.0-flash-lite",
            Model::Custom(name) => name,
        }
    }

    /// Create a model from a string. Unknown names become `Custom(name)`.
    pub fn from_string(name: impl Into<String>) -> Self {
        let name = name.into();
        match name.as_str() {
            "gemini-2.5-pro" => Model::Gemini25Pro,
            "gemini-2.5-flash" => Model::Gemini25Flash,
            "gemini-2.5-flash-lite" => Model::Gemini25FlashLite,
            "gemini-2.0-flash" => Model::Gemini20Flash,
            "gemini-2.0-flash-lite" => Model::Gemini20FlashLite,
            _ => Model::Custom(name),
        }
    }
}

impl FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Model::from_string(s))
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        Model::from_string(s)
    }
}

impl From<String> for Model {
    fn from(s: String) -> Self {
        Model::from_string(s)
    }
}

/// Configuration for the Gemini client
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: Model,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    pub timeout: Option<Duration>,
    /// Custom base URL for Gemini-compatible APIs.
    /// Defaults to the public `v1beta` endpoint when unset.
    pub base_url: Option<String>,
}

impl GeminiConfig {
    fn new(api_key: String) -> Self {
        Self {
            api_key,
            model: Model::default(),
            temperature: 0.0,
            max_tokens: None,
            timeout: None, // Default: no timeout (uses reqwest's default)
            base_url: None,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL),
            self.model.as_str()
        )
    }
}

/// Gemini client for generating structured replies
pub struct GeminiClient {
    config: GeminiConfig,
    client: reqwest::Client,
}

// Gemini API request and response structures
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
struct GenerateContentRequest {
    contents: Vec<Content>,
    system_instruction: Content,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    response_mime_type: String,
    response_schema: Value,
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
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

fn build_request(config: &GeminiConfig, prompt: &str, schema: Value) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: prompt.to_string(),
            }],
        }],
        system_instruction: Content {
            role: None,
            parts: vec![Part {
                text: "Reply with a single JSON object that matches the response schema. \
                       Include every required field. Do not add explanations outside the JSON."
                    .to_string(),
            }],
        },
        generation_config: GenerationConfig {
            temperature: config.temperature,
            max_output_tokens: config.max_tokens,
            response_mime_type: "application/json".to_string(),
            response_schema: schema,
        },
    }
}

/// Pull the first text part out of a `generateContent` reply body.
fn first_candidate_text(body: &str) -> Result<String> {
    let completion: GenerateContentResponse = serde_json::from_str(body).map_err(|e| {
        error!(error = %e, "Failed to parse JSON response from Gemini API");
        MediSageError::MalformedResponse(format!("Unreadable Gemini reply: {}", e))
    })?;

    let Some(candidate) = completion.candidates.into_iter().next() else {
        error!("Gemini API returned empty candidates array");
        return Err(MediSageError::MalformedResponse(
            "No completion candidates returned".to_string(),
        ));
    };
    trace!(finish_reason = ?candidate.finish_reason, "Completion finish reason");

    candidate
        .content
        .into_iter()
        .flat_map(|content| content.parts)
        .find_map(|part| part.text)
        .ok_or_else(|| {
            error!(finish_reason = ?candidate.finish_reason, "No text content in Gemini response");
            MediSageError::MalformedResponse(format!(
                "No text content in response (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            ))
        })
}

impl GeminiClient {
    /// Create a new Gemini client with the provided API key.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use medisage::GeminiClient;
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = GeminiClient::new("your-gemini-api-key")?;
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(name = "gemini_client_new", skip(api_key))]
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(MediSageError::ConfigError(
                "API key cannot be empty. \
                 Use GeminiClient::from_env() to read it from GEMINI_API_KEY."
                    .to_string(),
            ));
        }
        trace!("API key length: {}", api_key.len());

        let config = GeminiConfig::new(api_key);
        info!(model = %config.model.as_str(), "Created Gemini client");

        Ok(Self {
            config,
            client: reqwest::Client::new(),
        })
    }

    /// Create a new Gemini client from the environment.
    ///
    /// The key is read from the first set variable of `GEMINI_API_KEY`,
    /// `GOOGLE_GENAI_API_KEY` and `GOOGLE_API_KEY`.
    #[instrument(name = "gemini_client_from_env")]
    pub fn from_env() -> Result<Self> {
        let api_key = API_KEY_ENV_VARS
            .iter()
            .find_map(|name| {
                std::env::var(name)
                    .ok()
                    .filter(|value| !value.trim().is_empty())
                    .inspect(|_| debug!(variable = name, "Found Gemini API key"))
            })
            .ok_or_else(|| {
                MediSageError::ConfigError(format!(
                    "None of {} is set",
                    API_KEY_ENV_VARS.join(", ")
                ))
            })?;

        Self::new(api_key)
    }

    /// Set the model to use
    #[instrument(skip(self))]
    pub fn model(mut self, model: impl Into<Model> + std::fmt::Debug) -> Self {
        let model = model.into();
        debug!(previous_model = ?self.config.model, new_model = ?model, "Setting Gemini model");
        self.config.model = model;
        self
    }

    /// Set the temperature (0.0 to 1.0, lower = more deterministic)
    #[instrument(skip(self))]
    pub fn temperature(mut self, temp: f32) -> Self {
        debug!(
            previous_temp = self.config.temperature,
            new_temp = temp,
            "Setting temperature"
        );
        self.config.temperature = temp;
        self
    }

    /// Set the maximum tokens to generate.
    ///
    /// The API rejects 0, so 0 is clamped to 1.
    #[instrument(skip(self))]
    pub fn max_tokens(mut self, max: u32) -> Self {
        debug!(previous_max = ?self.config.max_tokens, new_max = max, "Setting max_tokens");
        self.config.max_tokens = Some(max.max(1));
        self
    }

    /// Set the timeout for HTTP requests.
    ///
    /// Applied when [`build`](Self::build) is called. A request that runs
    /// past it fails with `BackendUnavailable`; it is not retried.
    #[instrument(skip(self))]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        debug!(
            previous_timeout = ?self.config.timeout,
            new_timeout = ?timeout,
            "Setting timeout"
        );
        self.config.timeout = Some(timeout);
        self
    }

    /// Set a custom base URL for Gemini-compatible APIs, without trailing slash
    #[instrument(skip(self, base_url))]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        debug!(
            previous_base_url = ?self.config.base_url,
            new_base_url = %base_url,
            "Setting custom base URL"
        );
        self.config.base_url = Some(base_url);
        self
    }

    /// Build the client (chainable after configuration)
    #[instrument(skip(self))]
    pub fn build(mut self) -> Self {
        info!(
            model = %self.config.model.as_str(),
            temperature = self.config.temperature,
            max_tokens = ?self.config.max_tokens,
            timeout = ?self.config.timeout,
            "Gemini client configuration complete"
        );

        let mut client_builder = reqwest::Client::builder();
        if let Some(timeout) = self.config.timeout {
            client_builder = client_builder.timeout(timeout);
        }
        self.client = client_builder.build().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to build reqwest client with timeout, using default");
            reqwest::Client::new()
        });

        self
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }
}

#[async_trait]
impl LLMClient for GeminiClient {
    #[instrument(
        name = "gemini_materialize",
        skip(self, prompt),
        fields(
            type_name = std::any::type_name::<T>(),
            model = %self.config.model.as_str(),
            prompt_len = prompt.len()
        )
    )]
    async fn materialize<T>(&self, prompt: &str) -> Result<T>
    where
        T: Instructor + Send + 'static,
    {
        info!("Generating structured response with Gemini");

        let schema = T::schema();
        trace!(schema_name = ?T::schema_name(), "Retrieved JSON schema for type");
        let request = build_request(&self.config, prompt, schema.to_json().clone());

        let url = self.config.endpoint();
        debug!(url = %url, "Sending request to Gemini API");
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| handle_http_error(e, "Gemini"))?;

        let response = check_response_status(response, "Gemini").await?;

        let body = response
            .text()
            .await
            .map_err(|e| handle_http_error(e, "Gemini"))?;
        debug!(body_len = body.len(), "Received response from Gemini API");

        let text = first_candidate_text(&body)?;
        parse_structured::<T>(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CauseResponse;
    use crate::schema::SchemaType;
    use serde_json::json;

    #[test]
    fn test_new_rejects_empty_key() {
        let err = GeminiClient::new("  ").err().unwrap();
        assert!(matches!(err, MediSageError::ConfigError(_)));
    }

    #[test]
    fn test_builder_updates_config() {
        let client = GeminiClient::new("key")
            .unwrap()
            .model("gemini-2.5-flash")
            .temperature(0.4)
            .max_tokens(0)
            .timeout(Duration::from_secs(5))
            .base_url("http://localhost:8080/v1beta")
            .build();

        let config = client.config();
        assert_eq!(config.model, Model::Gemini25Flash);
        assert_eq!(config.temperature, 0.4);
        assert_eq!(config.max_tokens, Some(1));
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
        assert_eq!(
            config.endpoint(),
            "http://localhost:8080/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_default_endpoint() {
        let client = GeminiClient::new("key").unwrap();
        assert_eq!(
            client.config().endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn test_request_carries_prompt_and_schema() {
        let config = GeminiConfig::new("key".to_string());
        let request = build_request(&config, "Symptoms: cough", CauseResponse::schema().schema);
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "Symptoms: cough");
        assert!(value["systemInstruction"].get("role").is_none());
        assert_eq!(
            value["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(
            value["generationConfig"]["responseSchema"]["required"],
            json!(["potentialCauses"])
        );
        assert!(value["generationConfig"].get("maxOutputTokens").is_none());
    }

    #[test]
    fn test_first_candidate_text() {
        let body = json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"text": "{\"potentialCauses\": \"Cold\"}"}]
                },
                "finishReason": "STOP"
            }]
        })
        .to_string();
        assert_eq!(
            first_candidate_text(&body).unwrap(),
            "{\"potentialCauses\": \"Cold\"}"
        );
    }

    #[test]
    fn test_first_candidate_text_without_candidates() {
        let err = first_candidate_text("{\"promptFeedback\": {\"blockReason\": \"SAFETY\"}}")
            .unwrap_err();
        assert!(matches!(err, MediSageError::MalformedResponse(_)));
    }

    #[test]
    fn test_first_candidate_text_blocked_candidate() {
        let body = json!({"candidates": [{"finishReason": "SAFETY"}]}).to_string();
        match first_candidate_text(&body) {
            Err(MediSageError::MalformedResponse(msg)) => assert!(msg.contains("SAFETY")),
            other => panic!("Expected MalformedResponse, got {:?}", other),
        }
    }

    #[test]
    fn test_first_candidate_text_garbage_body() {
        let err = first_candidate_text("<html>oops</html>").unwrap_err();
        assert!(matches!(err, MediSageError::MalformedResponse(_)));
    }
}
