//! Chat assistant backed by a hosted generative-text model.
//!
//! The model is an opaque collaborator: a prompt string goes in, a reply string
//! (or a failure) comes out. Failures never reach the chat user as errors; they
//! are answered with a fixed apology instead.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error};

pub const GREETING: &str =
    "Hello! I'm THE SOP AI. How can I help you today with store procedures?";
pub const EMPTY_REPLY: &str = "Sorry, I had trouble answering that. Try again later.";
pub const FAILURE_REPLY: &str =
    "Sorry, something went wrong while talking to Gemini. Please try again later.";

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("message must not be empty")]
    EmptyQuestion,

    #[error("assistant is not configured")]
    Unconfigured,

    #[error("assistant request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("assistant API error: {0}")]
    Api(String),
}

#[async_trait]
pub trait Assistant: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, AssistantError>;
}

/// Stand-in used when no API key is configured.
pub struct Unconfigured;

#[async_trait]
impl Assistant for Unconfigured {
    async fn generate(&self, _prompt: &str) -> Result<String, AssistantError> {
        Err(AssistantError::Unconfigured)
    }
}

pub struct GeminiClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, AssistantError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
        })
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

#[async_trait]
impl Assistant for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, AssistantError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response: GenerateResponse = self
            .client
            .post(self.url())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?
            .json()
            .await?;

        extract_reply(response)
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
}

pub fn extract_reply(response: GenerateResponse) -> Result<String, AssistantError> {
    if let Some(err) = response.error {
        return Err(AssistantError::Api(err.message));
    }

    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .filter(|text| !text.is_empty());

    Ok(text.unwrap_or_else(|| EMPTY_REPLY.to_string()))
}

pub fn build_prompt(question: &str, context: &str) -> String {
    format!(
        "Respond to the user query: {question}\n\n\
         I need you to become an expert on everything in this document. \
         I would like to quiz you and ask you questions about details in the document \
         and I need you to be able to speak about it at a high level. \
         SOP Context: {context}\n\n\
         Do NOT use markdown format! Respond from the point of view of a super genius store manager. \
         NO JOKES, NO RELATABLE STORIES, NO HALLUCINATIONS. Only respond in plain text. \
         Keep it short, useful, and professional."
    )
}

#[derive(Debug)]
pub struct Reply {
    pub text: String,
    pub fallback: bool,
}

pub async fn respond(
    assistant: &dyn Assistant,
    question: &str,
    context: &str,
) -> Result<Reply, AssistantError> {
    let question = question.trim();
    if question.is_empty() {
        return Err(AssistantError::EmptyQuestion);
    }

    let prompt = build_prompt(question, context);
    debug!("assistant prompt is {} bytes", prompt.len());

    match assistant.generate(&prompt).await {
        Ok(text) => Ok(Reply {
            text,
            fallback: false,
        }),
        Err(err) => {
            error!("assistant failed: {err}");
            Ok(Reply {
                text: FAILURE_REPLY.to_string(),
                fallback: true,
            })
        }
    }
}
