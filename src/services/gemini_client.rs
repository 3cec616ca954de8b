use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::{
    error::{ContractError, Result},
    services::{
        backend::GenerationBackend,
        credentials::CredentialResolver,
        gemini_types::{GenerateContentResponse, GenerateResponse},
    },
};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const JSON_MIME_TYPE: &str = "application/json";

/// Gemini REST client. Holds no API key: the resolver is consulted on every
/// call so a key saved between two calls takes effect immediately.
#[derive(Clone, Debug)]
pub struct GeminiClient {
    credentials: CredentialResolver,
    base_url: String,
    timeout: Option<Duration>,
}

impl GeminiClient {
    pub fn new(credentials: CredentialResolver) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn credentials(&self) -> &CredentialResolver {
        &self.credentials
    }
}

#[async_trait]
impl GenerationBackend for GeminiClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        let api_key = self.credentials.resolve();
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|err| {
            ContractError::Config(format!("failed to build HTTP client: {err}"))
        })?;

        let url = build_generate_url(&self.base_url, &request.model);
        debug!(
            target: "travel_buddy::gemini",
            %url,
            key_present = !api_key.is_empty(),
            prompt_chars = request.prompt.chars().count(),
            "sending generateContent request"
        );

        let response = client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request.to_body())
            .send()
            .await
            .map_err(|err| ContractError::BackendUnavailable(format!("request failed: {err}")))?;

        let status = response.status();
        let body = response.text().await.map_err(|err| {
            ContractError::BackendUnavailable(format!("failed to read response: {err}"))
        })?;
        let parsed = serde_json::from_str::<Value>(&body);

        if !status.is_success() {
            let message = parsed
                .ok()
                .as_ref()
                .and_then(|value| value.pointer("/error/message"))
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or(body);
            return Err(ContractError::BackendUnavailable(format!(
                "HTTP {}: {}",
                status, message
            )));
        }

        let value = parsed.map_err(|err| {
            ContractError::MalformedResponse(format!("backend body is not JSON: {err}"))
        })?;

        if let Some(error) = value.get("error") {
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string());
            return Err(ContractError::BackendUnavailable(message));
        }

        let wire: GenerateContentResponse = serde_json::from_value(value).map_err(|err| {
            ContractError::MalformedResponse(format!("unexpected generateContent body: {err}"))
        })?;

        debug!(
            target: "travel_buddy::gemini",
            candidates = wire.candidates.len(),
            "received generateContent response"
        );

        Ok(wire.into())
    }
}

fn build_generate_url(base_url: &str, model: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    let model = model.trim_start_matches("models/");
    format!("{}/models/{}:generateContent", trimmed, model)
}

/// Server-side tools the backend may use while generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendTool {
    GoogleSearch,
}

impl BackendTool {
    fn to_value(self) -> Value {
        match self {
            BackendTool::GoogleSearch => json!({ "google_search": {} }),
        }
    }
}

/// One generation request, independent of how it is transported.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub tools: Vec<BackendTool>,
    pub response_mime_type: Option<String>,
    pub response_schema: Option<Value>,
    pub max_output_tokens: Option<u32>,
}

impl GenerateRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            tools: Vec::new(),
            response_mime_type: None,
            response_schema: None,
            max_output_tokens: None,
        }
    }

    pub fn with_tools(mut self, tools: Vec<BackendTool>) -> Self {
        self.tools = tools;
        self
    }

    /// Ask for JSON output conforming to `schema`
    pub fn with_json_schema(mut self, schema: Value) -> Self {
        self.response_mime_type = Some(JSON_MIME_TYPE.to_string());
        self.response_schema = Some(schema);
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: Option<u32>) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    /// `generateContent` request body. The model travels in the URL.
    pub fn to_body(&self) -> Value {
        let mut body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": self.prompt }]
            }]
        });

        if !self.tools.is_empty() {
            body["tools"] = Value::Array(self.tools.iter().map(|tool| tool.to_value()).collect());
        }

        let mut config = serde_json::Map::new();
        if let Some(mime_type) = &self.response_mime_type {
            config.insert("responseMimeType".to_string(), json!(mime_type));
        }
        if let Some(schema) = &self.response_schema {
            config.insert("responseSchema".to_string(), schema.clone());
        }
        if let Some(max_output_tokens) = self.max_output_tokens {
            config.insert("maxOutputTokens".to_string(), json!(max_output_tokens));
        }
        if !config.is_empty() {
            body["generationConfig"] = Value::Object(config);
        }

        body
    }
}
