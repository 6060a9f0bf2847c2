//! Conversational gaming assistant over an OpenAI-compatible chat-completion API.
//!
//! The assistant never fails: without a backend it answers [`ASSISTANT_UNAVAILABLE`], and a
//! backend error becomes an apology message.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::core::client::{RetryConfig, retry_with_backoff};
use crate::core::RawgError;
use crate::games::{GameDetail, GameSummary};

/// Reply used when no chat backend is configured.
pub const ASSISTANT_UNAVAILABLE: &str =
    "AI features are currently unavailable. Please check your Groq API key.";

/// Groq's OpenAI-compatible endpoint root.
pub const DEFAULT_CHAT_BASE_URL: &str = "https://api.groq.com/openai/v1/";
pub const DEFAULT_CHAT_MODEL: &str = "gemma2-9b-it";
pub const DEFAULT_TEMPERATURE: f32 = 0.1;
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Default system prompt framing the assistant as a games expert.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an expert gaming assistant with deep knowledge of \
video games, the gaming industry, trends and player preferences. You help users discover games, \
understand gaming concepts and pick what to play next. Be helpful and accurate; if you are unsure \
about something, say so rather than making up facts.";

/// At most this many candidate games are shown to the model when recommending.
pub const RECOMMENDATION_CANDIDATES: usize = 10;

type ChatFuture<'a> =
    std::pin::Pin<Box<dyn std::future::Future<Output = Result<String, RawgError>> + Send + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One turn of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Something that turns a conversation into the next assistant reply.
pub trait ChatBackend: Send + Sync {
    fn complete<'a>(&'a self, messages: &'a [ChatMessage]) -> ChatFuture<'a>;
}

/* ---------------- OpenAI-compatible backend ---------------- */

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat completions over `POST {base}/chat/completions` with bearer authentication.
#[derive(Clone)]
pub struct OpenAiCompatibleBackend {
    http: reqwest::Client,
    base: Url,
    api_key: Arc<str>,
    model: String,
    temperature: f32,
    max_tokens: u32,
    retry: RetryConfig,
}

impl fmt::Debug for OpenAiCompatibleBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiCompatibleBackend")
            .field("base", &self.base.as_str())
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish_non_exhaustive()
    }
}

impl OpenAiCompatibleBackend {
    /// Creates a backend against Groq with the default model and sampling settings.
    ///
    /// # Errors
    ///
    /// Returns [`RawgError::Config`] when `api_key` is blank or the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self, RawgError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(RawgError::Config("chat API key is empty".into()));
        }
        let http = reqwest::Client::builder()
            .user_agent(crate::core::client::constants::USER_AGENT)
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| RawgError::Config(format!("failed to build chat HTTP client: {e}")))?;
        Ok(Self {
            http,
            base: Url::parse(DEFAULT_CHAT_BASE_URL)?,
            api_key: Arc::from(api_key),
            model: DEFAULT_CHAT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            retry: RetryConfig::default(),
        })
    }

    /// Targets another OpenAI-compatible provider (or a mock server).
    ///
    /// # Errors
    ///
    /// Returns [`RawgError::Url`] if `base` is not a valid URL.
    pub fn base_url(mut self, base: &str) -> Result<Self, RawgError> {
        let mut s = base.to_string();
        if !s.ends_with('/') {
            s.push('/');
        }
        self.base = Url::parse(&s)?;
        Ok(self)
    }

    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub const fn temperature(mut self, t: f32) -> Self {
        self.temperature = t;
        self
    }

    #[must_use]
    pub const fn max_tokens(mut self, n: u32) -> Self {
        self.max_tokens = n;
        self
    }

    /// Retry policy for throttled or failed completions.
    #[must_use]
    pub fn retry_config(mut self, cfg: RetryConfig) -> Self {
        self.retry = cfg;
        self
    }

    async fn complete_once(&self, url: &Url, messages: &[ChatMessage]) -> Result<String, RawgError> {
        let body = ChatRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };
        let resp = self
            .http
            .post(url.clone())
            .bearer_auth(&*self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| RawgError::from_reqwest(e, url.as_str()))?;

        let status = resp.status();
        if status.as_u16() == 429 {
            return Err(RawgError::RateLimited {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(RawgError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let text = resp
            .text()
            .await
            .map_err(|e| RawgError::from_reqwest(e, url.as_str()))?;
        let parsed: ChatResponse = serde_json::from_str(&text)?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| RawgError::Data("chat completion without content".into()))
    }
}

impl ChatBackend for OpenAiCompatibleBackend {
    fn complete<'a>(&'a self, messages: &'a [ChatMessage]) -> ChatFuture<'a> {
        Box::pin(async move {
            let url = self.base.join("chat/completions")?;
            let url = &url;
            retry_with_backoff(
                &self.retry,
                move || self.complete_once(url, messages),
                |a| {
                    tracing::warn!(attempt = a.attempt, delay = ?a.delay, error = %a.error, "chat completion failed, retrying");
                },
            )
            .await
        })
    }
}

/* ---------------- Assistant ---------------- */

/// The gaming assistant: a system prompt plus an optional backend.
#[derive(Clone)]
pub struct Assistant {
    backend: Option<Arc<dyn ChatBackend>>,
    system_prompt: String,
}

impl fmt::Debug for Assistant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Assistant")
            .field("available", &self.is_available())
            .finish_non_exhaustive()
    }
}

impl Default for Assistant {
    fn default() -> Self {
        Self::unavailable()
    }
}

impl Assistant {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            backend: Some(backend),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }

    /// An assistant with no backend; every reply is [`ASSISTANT_UNAVAILABLE`].
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            backend: None,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }

    #[must_use]
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    /// Produces the next reply to `history`. The system prompt is prepended automatically.
    pub async fn respond(&self, history: &[ChatMessage]) -> String {
        let Some(backend) = &self.backend else {
            return ASSISTANT_UNAVAILABLE.to_string();
        };
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(ChatMessage::system(self.system_prompt.clone()));
        messages.extend_from_slice(history);

        match backend.complete(&messages).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(error = %e, "assistant backend failed");
                format!("Sorry, I encountered an error: {e}")
            }
        }
    }

    /// Answers a single question with extra JSON context prepended.
    pub async fn ask_with_context(&self, question: &str, context: &serde_json::Value) -> String {
        let pretty = serde_json::to_string_pretty(context).unwrap_or_default();
        let input = format!("Context: {pretty}\n\nUser Query: {question}");
        self.respond(&[ChatMessage::user(input)]).await
    }

    /// Asks for a short critique of one game.
    pub async fn analyze_game(&self, game: &GameDetail) -> String {
        let data = serde_json::to_string_pretty(game).unwrap_or_default();
        let input = format!(
            "Analyze this game and comment on its quality and reception, notable features, \
             target audience, similar games, and whether you would recommend it.\n\nGame data: {data}"
        );
        self.respond(&[ChatMessage::user(input)]).await
    }

    /// Recommends a few of `candidates` that fit the user's `preferences`.
    ///
    /// Only the first [`RECOMMENDATION_CANDIDATES`] games are sent.
    pub async fn recommend_games(&self, preferences: &serde_json::Value, candidates: &[GameSummary]) -> String {
        let shown = &candidates[..candidates.len().min(RECOMMENDATION_CANDIDATES)];
        let prefs = serde_json::to_string_pretty(preferences).unwrap_or_default();
        let games = serde_json::to_string_pretty(shown).unwrap_or_default();
        let input = format!(
            "Based on the user's preferences, recommend games that would be a good fit.\n\n\
             User preferences: {prefs}\nAvailable games: {games}\n\n\
             Give 3 to 5 specific recommendations, each with the reason it matches."
        );
        self.respond(&[ChatMessage::user(input)]).await
    }

    /// Comments on genre, platform, release and rating trends in `trend_data`.
    pub async fn analyze_trends(&self, trend_data: &serde_json::Value) -> String {
        let data = serde_json::to_string_pretty(trend_data).unwrap_or_default();
        let input = format!(
            "Analyze the gaming trends in this data. Cover popular genres, platform trends, \
             release patterns, rating distributions and emerging trends.\n\n{data}"
        );
        self.respond(&[ChatMessage::user(input)]).await
    }
}
