//! Chat-completion client for the trend team.
//!
//! Supports OpenAI and Anthropic APIs, selected via environment variables.
//! The client implements [`TextGenerator`], so a single instance is shared
//! by every participant in a team.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use trendwire_team::{TeamError, TeamResult, TextGenerator, Transcript};

use crate::error::{AgentError, AgentResult};

/// LLM provider type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    OpenAI,
    Anthropic,
}

impl LlmProvider {
    /// Parse a provider name (`openai` or `anthropic`).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "openai" => Some(LlmProvider::OpenAI),
            "anthropic" => Some(LlmProvider::Anthropic),
            _ => None,
        }
    }
}

/// Role of a chat message sent to the completion API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// A role-tagged message in a completion request
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Response from the LLM including usage info
pub struct Completion {
    pub content: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub model: String,
}

/// Chat client that handles API calls
pub struct ChatClient {
    provider: LlmProvider,
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl ChatClient {
    /// Create a new chat client with explicit configuration
    pub fn new(provider: LlmProvider, api_key: String, model: Option<String>) -> Self {
        let default_model = match provider {
            LlmProvider::OpenAI => "gpt-4o-mini".to_string(),
            LlmProvider::Anthropic => "claude-sonnet-4-5".to_string(),
        };

        Self {
            provider,
            api_key,
            model: model.unwrap_or(default_model),
            client: reqwest::Client::new(),
        }
    }

    /// Create a chat client from environment variables
    ///
    /// Checks in order:
    /// 1. OPENAI_API_KEY
    /// 2. ANTHROPIC_API_KEY
    pub fn from_env() -> AgentResult<Self> {
        // Check for custom model override
        let custom_model = std::env::var("TRENDWIRE_MODEL").ok();

        // Try OpenAI first
        if let Ok(api_key) = std::env::var("OPENAI_API_KEY") {
            if !api_key.is_empty() {
                return Ok(Self::new(LlmProvider::OpenAI, api_key, custom_model));
            }
        }

        // Try Anthropic
        if let Ok(api_key) = std::env::var("ANTHROPIC_API_KEY") {
            if !api_key.is_empty() {
                return Ok(Self::new(LlmProvider::Anthropic, api_key, custom_model));
            }
        }

        Err(AgentError::LlmNotConfigured)
    }

    /// Create a chat client for a specific provider, reading its key from
    /// the environment
    pub fn for_provider(provider: LlmProvider, model: Option<String>) -> AgentResult<Self> {
        let api_key = match provider {
            LlmProvider::OpenAI => std::env::var("OPENAI_API_KEY").unwrap_or_default(),
            LlmProvider::Anthropic => std::env::var("ANTHROPIC_API_KEY").unwrap_or_default(),
        };
        if api_key.is_empty() {
            return Err(AgentError::LlmNotConfigured);
        }

        let model = model.or_else(|| std::env::var("TRENDWIRE_MODEL").ok());
        Ok(Self::new(provider, api_key, model))
    }

    /// Replace the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Get the current provider
    pub fn provider(&self) -> &LlmProvider {
        &self.provider
    }

    /// Get the current model
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Complete a conversation with the LLM
    pub async fn complete(&self, messages: &[ChatMessage]) -> AgentResult<Completion> {
        match self.provider {
            LlmProvider::OpenAI => self.complete_openai(messages).await,
            LlmProvider::Anthropic => self.complete_anthropic(messages).await,
        }
    }

    // OpenAI chat completion
    async fn complete_openai(&self, messages: &[ChatMessage]) -> AgentResult<Completion> {
        let url = "https://api.openai.com/v1/chat/completions";

        let openai_messages: Vec<OpenAIMessage> = messages
            .iter()
            .map(|m| OpenAIMessage {
                role: match m.role {
                    ChatRole::System => "system".to_string(),
                    ChatRole::User => "user".to_string(),
                    ChatRole::Assistant => "assistant".to_string(),
                },
                content: m.content.clone(),
            })
            .collect();

        let request = OpenAIRequest {
            model: self.model.clone(),
            messages: openai_messages,
            max_completion_tokens: Some(4096),
        };

        // Retry logic for transient errors (5xx, rate limits, network issues)
        const MAX_RETRIES: u32 = 3;
        let mut last_error = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = std::time::Duration::from_secs(1 << attempt);
                tokio::time::sleep(delay).await;
            }

            let response = match self
                .client
                .post(url)
                .header("Authorization", format!("Bearer {}", self.api_key))
                .header("Content-Type", "application/json")
                .json(&request)
                .send()
                .await
            {
                Ok(resp) => resp,
                Err(e) => {
                    last_error = Some(AgentError::LlmError(format!("Network error: {}", e)));
                    continue; // Retry on network errors
                }
            };

            let status = response.status();

            // Retry on server errors (5xx) and rate limits (429)
            if status.is_server_error() || status.as_u16() == 429 {
                let body = response.text().await.unwrap_or_default();
                last_error = Some(AgentError::LlmError(format!(
                    "OpenAI API error {} (attempt {}/{}): {}",
                    status,
                    attempt + 1,
                    MAX_RETRIES,
                    body
                )));
                continue; // Retry
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(AgentError::LlmError(format!(
                    "OpenAI API error {}: {}",
                    status, body
                )));
            }

            let result: OpenAIResponse = response
                .json()
                .await
                .map_err(|e| AgentError::LlmError(format!("Failed to parse response: {}", e)))?;

            let content = result
                .choices
                .first()
                .map(|c| c.message.content.clone())
                .ok_or(AgentError::EmptyCompletion)?;

            let (input_tokens, output_tokens) = result
                .usage
                .map(|u| (u.prompt_tokens, u.completion_tokens))
                .unwrap_or((0, 0));

            return Ok(Completion {
                content,
                input_tokens,
                output_tokens,
                model: self.model.clone(),
            });
        }

        // All retries exhausted
        Err(last_error.unwrap_or_else(|| AgentError::LlmError("Max retries exceeded".to_string())))
    }

    // Anthropic chat completion
    async fn complete_anthropic(&self, messages: &[ChatMessage]) -> AgentResult<Completion> {
        let url = "https://api.anthropic.com/v1/messages";

        // Anthropic requires the system message to be separate
        let system_message = messages
            .iter()
            .find(|m| m.role == ChatRole::System)
            .map(|m| m.content.clone());

        let anthropic_messages: Vec<AnthropicMessage> = messages
            .iter()
            .filter(|m| m.role != ChatRole::System)
            .map(|m| AnthropicMessage {
                role: match m.role {
                    ChatRole::Assistant => "assistant".to_string(),
                    _ => "user".to_string(),
                },
                content: m.content.clone(),
            })
            .collect();

        let request = AnthropicRequest {
            model: self.model.clone(),
            max_tokens: 4096,
            system: system_message,
            messages: anthropic_messages,
        };

        // Retry logic for transient errors (5xx, rate limits, network issues)
        const MAX_RETRIES: u32 = 3;
        let mut last_error = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = std::time::Duration::from_secs(1 << attempt);
                tokio::time::sleep(delay).await;
            }

            let response = match self
                .client
                .post(url)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", "2023-06-01")
                .header("Content-Type", "application/json")
                .json(&request)
                .send()
                .await
            {
                Ok(resp) => resp,
                Err(e) => {
                    last_error = Some(AgentError::LlmError(format!("Network error: {}", e)));
                    continue; // Retry on network errors
                }
            };

            let status = response.status();

            // Retry on server errors (5xx) and rate limits (429)
            if status.is_server_error() || status.as_u16() == 429 {
                let body = response.text().await.unwrap_or_default();
                last_error = Some(AgentError::LlmError(format!(
                    "Anthropic API error {} (attempt {}/{}): {}",
                    status,
                    attempt + 1,
                    MAX_RETRIES,
                    body
                )));
                continue; // Retry
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(AgentError::LlmError(format!(
                    "Anthropic API error {}: {}",
                    status, body
                )));
            }

            let result: AnthropicResponse = response
                .json()
                .await
                .map_err(|e| AgentError::LlmError(format!("Failed to parse response: {}", e)))?;

            let content = result
                .content
                .first()
                .map(|c| c.text.clone())
                .ok_or(AgentError::EmptyCompletion)?;

            let (input_tokens, output_tokens) = result
                .usage
                .map(|u| (u.input_tokens, u.output_tokens))
                .unwrap_or((0, 0));

            return Ok(Completion {
                content,
                input_tokens,
                output_tokens,
                model: self.model.clone(),
            });
        }

        // All retries exhausted
        Err(last_error.unwrap_or_else(|| AgentError::LlmError("Max retries exceeded".to_string())))
    }
}

/// Build the completion request for one participant turn.
///
/// The participant's instructions become the system message, the run task
/// is the first user message, and every transcript entry follows as a
/// user-role message labeled with its producer.
fn build_chat_messages(instructions: &str, task: &str, transcript: &Transcript) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(transcript.len() + 2);
    messages.push(ChatMessage::system(instructions));
    messages.push(ChatMessage::user(task));
    for message in transcript.messages() {
        messages.push(ChatMessage::user(format!(
            "[{}] {}",
            message.participant, message.text
        )));
    }
    messages
}

#[async_trait]
impl TextGenerator for ChatClient {
    async fn generate(
        &self,
        instructions: &str,
        task: &str,
        transcript: &Transcript,
    ) -> TeamResult<String> {
        let messages = build_chat_messages(instructions, task, transcript);
        let completion = self
            .complete(&messages)
            .await
            .map_err(|e| TeamError::Upstream(e.to_string()))?;

        debug!(
            "Completion from {}: {} input tokens, {} output tokens",
            completion.model, completion.input_tokens, completion.output_tokens
        );

        Ok(completion.content)
    }
}

// OpenAI API types
#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_completion_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIUsage {
    prompt_tokens: u64,
    completion_tokens: u64,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseMessage {
    content: String,
}

// Anthropic API types
#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<AnthropicMessage>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContent>,
    usage: Option<AnthropicUsage>,
}

#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    input_tokens: u64,
    output_tokens: u64,
}

#[derive(Debug, Deserialize)]
struct AnthropicContent {
    text: String,
}
