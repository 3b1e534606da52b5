use serde::{Deserialize, Serialize};

use crate::config::{ENV_GENERATION_KEY, ENV_GENERATION_MODEL, ENV_GENERATION_URL};

use super::{GeneratedReply, GenerationError, GenerativeTextService};

const DEFAULT_BASE_URL: &str = "http://localhost:11434";
const DEFAULT_MODEL: &str = "gemma2";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Blocking HTTP client for an Ollama-compatible /api/generate endpoint.
pub struct HttpGenerationClient {
    base_url: String,
    model: String,
    api_key: Option<String>,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl HttpGenerationClient {
    pub fn new(
        base_url: &str,
        model: &str,
        api_key: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, GenerationError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| GenerationError::Connection(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key,
            client,
            timeout_secs,
        })
    }

    /// Build from TOKOSEHAT_GENERATION_* environment variables, falling
    /// back to a local Ollama instance.
    pub fn from_env() -> Result<Self, GenerationError> {
        let base_url =
            std::env::var(ENV_GENERATION_URL).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model =
            std::env::var(ENV_GENERATION_MODEL).unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let api_key = std::env::var(ENV_GENERATION_KEY).ok();
        Self::new(&base_url, &model, api_key, DEFAULT_TIMEOUT_SECS)
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    system: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
    eval_count: Option<u32>,
}

impl GenerativeTextService for HttpGenerationClient {
    fn generate(&self, system: &str, prompt: &str) -> Result<GeneratedReply, GenerationError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            system,
            stream: false,
        };

        let mut request = self.client.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().map_err(|e| {
            if e.is_connect() {
                GenerationError::Connection(self.base_url.clone())
            } else if e.is_timeout() {
                GenerationError::Timeout(self.timeout_secs)
            } else {
                GenerationError::Connection(e.to_string())
            }
        })?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(GenerationError::RateLimited);
        }
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(GenerationError::Auth);
        }
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| GenerationError::ResponseParsing(e.to_string()))?;

        Ok(GeneratedReply {
            text: parsed.response,
            tokens_used: parsed.eval_count,
        })
    }
}
