use crate::error::{LlmError, ProviderParseError};
use crate::{prompt, template, ScoutingStats};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const OPENAI_MODEL: &str = "gpt-4-turbo-preview";
const OPENAI_TEMPERATURE: f64 = 0.7;
const OPENROUTER_MODEL: &str = "google/gemma-3-27b-it:free";

/// Hosted model backends a report can be written by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Provider {
    #[default]
    Mock,
    OpenAi,
    Gemini,
    OpenRouter,
}

impl FromStr for Provider {
    type Err = ProviderParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" | "template" => Ok(Provider::Mock),
            "openai" => Ok(Provider::OpenAi),
            "gemini" | "google" => Ok(Provider::Gemini),
            "openrouter" => Ok(Provider::OpenRouter),
            _ => Err(ProviderParseError(s.to_string())),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Provider::Mock => "mock",
            Provider::OpenAi => "OpenAI",
            Provider::Gemini => "Gemini",
            Provider::OpenRouter => "OpenRouter",
        };
        f.write_str(name)
    }
}

/// API keys per provider. A provider without its key falls back to the template.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub openai_api_key: Option<String>,
    pub google_api_key: Option<String>,
    pub openrouter_api_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Endpoints {
    pub openai: String,
    pub gemini: String,
    pub openrouter: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            openai: "https://api.openai.com/v1/chat/completions".to_string(),
            gemini: "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent"
                .to_string(),
            openrouter: "https://openrouter.ai/api/v1/chat/completions".to_string(),
        }
    }
}

/// Writes scouting reports, either from the template or through a hosted model.
#[derive(Debug, Clone)]
pub struct ScoutAgent {
    http: reqwest::Client,
    provider: Provider,
    credentials: Credentials,
    endpoints: Endpoints,
}

impl ScoutAgent {
    pub fn new(provider: Provider, credentials: Credentials) -> Self {
        Self {
            http: reqwest::Client::new(),
            provider,
            credentials,
            endpoints: Endpoints::default(),
        }
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    /// Produce the report text. Provider failures are reported inline, followed by the template report.
    pub async fn scouting_report(&self, stats: &ScoutingStats) -> String {
        match self.generate(stats).await {
            Ok(report) => report,
            Err(e) => {
                warn!("{} report failed, falling back to template: {e:?}", self.provider);
                format!(
                    "⚠️ ERROR calling {}: {e}\n\nUsing template report instead.\n\n{}",
                    self.provider,
                    template::render(stats)
                )
            }
        }
    }

    async fn generate(&self, stats: &ScoutingStats) -> Result<String, LlmError> {
        let prompt = prompt::build_prompt(stats);

        match self.provider {
            Provider::Mock => {
                info!("Rendering template report for {}", stats.team_name());
                Ok(template::render(stats))
            }
            Provider::OpenAi => {
                let api_key = required(&self.credentials.openai_api_key, "OPENAI_API_KEY")?;
                let request = ChatRequest {
                    model: OPENAI_MODEL,
                    messages: vec![ChatMessage {
                        role: "user",
                        content: &prompt,
                    }],
                    temperature: Some(OPENAI_TEMPERATURE),
                };
                self.chat_completion(&self.endpoints.openai, api_key, &request)
                    .await
            }
            Provider::OpenRouter => {
                let api_key =
                    required(&self.credentials.openrouter_api_key, "OPENROUTER_API_KEY")?;
                let request = ChatRequest {
                    model: OPENROUTER_MODEL,
                    messages: vec![ChatMessage {
                        role: "user",
                        content: &prompt,
                    }],
                    temperature: None,
                };
                self.chat_completion(&self.endpoints.openrouter, api_key, &request)
                    .await
            }
            Provider::Gemini => {
                let api_key = required(&self.credentials.google_api_key, "GOOGLE_API_KEY")?;
                self.gemini_content(api_key, &prompt).await
            }
        }
    }

    async fn chat_completion(
        &self,
        url: &str,
        api_key: &str,
        request: &ChatRequest<'_>,
    ) -> Result<String, LlmError> {
        info!("Requesting {} report from {url}", self.provider);
        let response = self
            .http
            .post(url)
            .timeout(REQUEST_TIMEOUT)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await?;
        let response = check_status(response).await?;

        let parsed: ChatResponse = response.json().await?;
        debug!("{} answered with {} choices", self.provider, parsed.choices.len());

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .map(|message| message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(LlmError::EmptyResponse)
    }

    async fn gemini_content(&self, api_key: &str, prompt: &str) -> Result<String, LlmError> {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt }],
            }],
        };

        info!("Requesting Gemini report from {}", self.endpoints.gemini);
        let response = self
            .http
            .post(&self.endpoints.gemini)
            .timeout(REQUEST_TIMEOUT)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;
        let response = check_status(response).await?;

        let parsed: GeminiResponse = response.json().await?;
        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(text)
    }
}

fn required<'a>(key: &'a Option<String>, name: &'static str) -> Result<&'a str, LlmError> {
    key.as_deref().ok_or(LlmError::MissingCredential(name))
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, LlmError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(LlmError::BadStatus {
        status: status.as_u16(),
        body: body.chars().take(800).collect(),
    })
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatMessageOut>,
}

#[derive(Debug, Deserialize)]
struct ChatMessageOut {
    content: String,
}

#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContentOut,
}

#[derive(Debug, Deserialize)]
struct GeminiContentOut {
    #[serde(default)]
    parts: Vec<GeminiPartOut>,
}

#[derive(Debug, Deserialize)]
struct GeminiPartOut {
    #[serde(default)]
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_skips_missing_temperature() {
        let request = ChatRequest {
            model: OPENROUTER_MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: "hi",
            }],
            temperature: None,
        };
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], "google/gemma-3-27b-it:free");
        assert_eq!(json["messages"][0]["role"], "user");
        assert!(json.get("temperature").is_none());
    }

    #[test]
    fn test_gemini_response_joins_parts() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"Camp "},{"text":"bot."}]}}]}"#;
        let parsed: GeminiResponse = serde_json::from_str(body).unwrap();
        let text: String = parsed.candidates[0]
            .content
            .parts
            .iter()
            .map(|part| part.text.as_str())
            .collect();

        assert_eq!(text, "Camp bot.");
    }

    #[test]
    fn test_missing_credential_names_the_variable() {
        let err = required(&None, "GOOGLE_API_KEY").unwrap_err();

        assert_eq!(
            err.to_string(),
            "GOOGLE_API_KEY not found in environment variables"
        );
    }
}
