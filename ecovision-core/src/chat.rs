//! Conservation assistant: a session transcript plus an upstream chat-completion
//! client.
//!
//! Only the system prompt and the latest user message are sent upstream; the
//! transcript is kept for display. Upstream failures never leave the session:
//! they become a fallback assistant turn.

use crate::error::ChatError;
use ecovision_schemas::chat::{ChatSettings, ChatTurn};
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, warn};

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

pub const FALLBACK_REPLY: &str =
    "⚠️ Error connecting to OpenAI API. Check your API key or internet connection.";

pub const MISSING_CREDENTIAL_REPLY: &str =
    "⚠️ OPENAI_API_KEY is not set. Add it to your environment or .env file to enable the assistant.";

/// Something that can turn a list of turns into one assistant reply.
pub trait CompletionClient {
    fn complete(&self, messages: &[ChatTurn]) -> Result<String, ChatError>;
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

/// Blocking client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiClient {
    client: Client,
    settings: ChatSettings,
    api_key: Option<String>,
}

impl OpenAiClient {
    pub fn new(settings: ChatSettings, api_key: Option<String>) -> Result<Self, ChatError> {
        let client = Client::builder().build()?;
        let api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        Ok(Self {
            client,
            settings,
            api_key,
        })
    }

    /// Reads the credential from `OPENAI_API_KEY`.
    pub fn from_env(settings: ChatSettings) -> Result<Self, ChatError> {
        Self::new(settings, std::env::var(API_KEY_ENV).ok())
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.settings.endpoint.trim_end_matches('/'))
    }

    fn request_body(&self, messages: &[ChatTurn]) -> serde_json::Value {
        serde_json::json!({
            "model": self.settings.model,
            "messages": messages,
        })
    }
}

impl CompletionClient for OpenAiClient {
    fn complete(&self, messages: &[ChatTurn]) -> Result<String, ChatError> {
        let api_key = self.api_key.as_deref().ok_or(ChatError::MissingCredential)?;

        debug!(model = %self.settings.model, turns = messages.len(), "sending chat completion");
        let response = self
            .client
            .post(self.url())
            .bearer_auth(api_key)
            .json(&self.request_body(messages))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::Upstream {
                status: status.as_u16(),
                message: response.text().unwrap_or_default(),
            });
        }

        let body: CompletionResponse = response.json()?;
        body.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(ChatError::EmptyReply)
    }
}

/// One user's conversation. The transcript only ever grows.
#[derive(Debug, Clone)]
pub struct ChatSession {
    system_prompt: String,
    transcript: Vec<ChatTurn>,
}

impl ChatSession {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            transcript: Vec::new(),
        }
    }

    pub fn transcript(&self) -> &[ChatTurn] {
        &self.transcript
    }

    /// Appends the user's message and exactly one assistant turn, returning the
    /// latter. Blank input is ignored and appends nothing.
    pub fn submit<C: CompletionClient + ?Sized>(&mut self, client: &C, text: &str) -> Option<&ChatTurn> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.transcript.push(ChatTurn::user(text));

        let request = [ChatTurn::system(self.system_prompt.as_str()), ChatTurn::user(text)];
        let reply = match client.complete(&request) {
            Ok(reply) => reply,
            Err(ChatError::MissingCredential) => {
                warn!("chat requested without {} configured", API_KEY_ENV);
                MISSING_CREDENTIAL_REPLY.to_string()
            }
            Err(e) => {
                warn!(error = %e, "chat completion failed; answering with fallback");
                FALLBACK_REPLY.to_string()
            }
        };

        self.transcript.push(ChatTurn::assistant(reply));
        self.transcript.last()
    }
}
