use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("{0} not found in environment variables")]
    MissingCredential(&'static str),
    #[error(transparent)]
    RequestError(#[from] reqwest::Error),
    #[error("provider answered {status}: {body}")]
    BadStatus { status: u16, body: String },
    #[error("provider response had no text content")]
    EmptyResponse,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown LLM provider `{0}` (expected mock, openai, gemini or openrouter)")]
pub struct ProviderParseError(pub String);
