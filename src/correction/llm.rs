use crate::*;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timeout for provider liveness checks.
pub const STATUS_TIMEOUT: Duration = Duration::from_secs(2);
const TEMPERATURE: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One `{role, content}` turn of a chat request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LlmError {
    #[error("Error: {} request timed out. {}", provider.label(), provider.hint())]
    Timeout { provider: Provider },

    #[error("Error: Cannot connect to {}. {}", provider.label(), provider.hint())]
    Unreachable { provider: Provider },

    #[error("{} Error: HTTP {status}", provider.label())]
    Status { provider: Provider, status: u16 },

    #[error("{} Error: {message}", provider.label())]
    Request { provider: Provider, message: String },

    #[error("{} Error: unreadable reply: {message}", provider.label())]
    Malformed { provider: Provider, message: String },
}

impl LlmError {
    /// Timeouts and connection failures: the provider never answered.
    pub fn is_transport(&self) -> bool {
        matches!(self, LlmError::Timeout { .. } | LlmError::Unreachable { .. })
    }

    fn from_reqwest(provider: Provider, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            LlmError::Timeout { provider }
        } else if error.is_connect() {
            LlmError::Unreachable { provider }
        } else if error.is_decode() {
            LlmError::Malformed {
                provider,
                message: error.to_string(),
            }
        } else {
            LlmError::Request {
                provider,
                message: error.to_string(),
            }
        }
    }
}

/// A non-streaming chat completion endpoint.
#[async_trait]
pub trait ChatModel: Send + Sync {
    fn provider(&self) -> Provider;

    /// Send `messages` and return the reply text; an empty reply is not an error.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError>;
}

#[derive(Serialize)]
struct LmStudioRequest<'a> {
    messages: &'a [ChatMessage],
    temperature: f64,
    stream: bool,
}

#[derive(Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f64,
}

#[derive(Deserialize, Default)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct LmStudioReply {
    #[serde(default)]
    choices: Vec<LmStudioChoice>,
}

#[derive(Deserialize)]
struct LmStudioChoice {
    #[serde(default)]
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct OllamaReply {
    #[serde(default)]
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct OllamaTags {
    #[serde(default)]
    models: Vec<OllamaModel>,
}

#[derive(Deserialize)]
struct OllamaModel {
    name: String,
}

/// Whether a provider answered its liveness endpoint, and what it serves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderStatus {
    pub provider: Provider,
    pub available: bool,
    pub models: Vec<String>,
    pub selected_model: Option<String>,
    pub url: String,
}

/// Chat client for LM Studio (OpenAI-compatible) and Ollama servers.
pub struct HttpChatModel {
    client: reqwest::Client,
    provider: Provider,
    /// Chat endpoint.
    url: String,
    /// Liveness endpoint.
    status_url: String,
    /// Ollama model name; LM Studio serves whatever is loaded.
    model: Option<String>,
}

impl HttpChatModel {
    fn client(timeout: Duration) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("cannot build HTTP client: {e}")))
    }

    /// `api_url` is the full `.../chat/completions` endpoint.
    pub fn lm_studio(api_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let url = api_url.into();
        Ok(Self {
            client: Self::client(timeout)?,
            provider: Provider::LmStudio,
            status_url: url.replace("/chat/completions", "/models"),
            url,
            model: None,
        })
    }

    /// `base_url` is the server root, e.g. `http://localhost:11434`.
    pub fn ollama(base_url: &str, model: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base = base_url.trim_end_matches('/');
        Ok(Self {
            client: Self::client(timeout)?,
            provider: Provider::Ollama,
            url: format!("{base}/api/chat"),
            status_url: format!("{base}/api/tags"),
            model: Some(model.into()),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        match config.provider()? {
            Provider::LmStudio => Self::lm_studio(&config.llm_api_url, config.llm_timeout()),
            Provider::Ollama => Self::ollama(
                &config.ollama_url,
                &config.ollama_model,
                config.llm_timeout(),
            ),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Probe the provider. Any failure reads as unavailable.
    pub async fn status(&self) -> ProviderStatus {
        let mut status = ProviderStatus {
            provider: self.provider,
            available: false,
            models: Vec::new(),
            selected_model: self.model.clone(),
            url: self.url.clone(),
        };
        let response = match self
            .client
            .get(&self.status_url)
            .timeout(STATUS_TIMEOUT)
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                debug!(status = %response.status(), "{} status check failed", self.provider.label());
                return status;
            }
            Err(e) => {
                debug!("{} status check failed: {e}", self.provider.label());
                return status;
            }
        };

        match self.provider {
            Provider::LmStudio => status.available = true,
            Provider::Ollama => {
                if let Ok(tags) = response.json::<OllamaTags>().await {
                    status.available = true;
                    status.models = tags.models.into_iter().map(|m| m.name).collect();
                }
            }
        }
        status
    }

    async fn post<B: Serialize + ?Sized>(&self, body: &B) -> Result<reqwest::Response, LlmError> {
        let response = self
            .client
            .post(&self.url)
            .json(body)
            .send()
            .await
            .map_err(|e| LlmError::from_reqwest(self.provider, e))?;
        if !response.status().is_success() {
            return Err(LlmError::Status {
                provider: self.provider,
                status: response.status().as_u16(),
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl ChatModel for HttpChatModel {
    fn provider(&self) -> Provider {
        self.provider
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let provider = self.provider;
        let content = match (&self.model, provider) {
            (Some(model), Provider::Ollama) => {
                let body = OllamaRequest {
                    model,
                    messages,
                    stream: false,
                    options: OllamaOptions {
                        temperature: TEMPERATURE,
                    },
                };
                let reply: OllamaReply = self
                    .post(&body)
                    .await?
                    .json()
                    .await
                    .map_err(|e| LlmError::from_reqwest(provider, e))?;
                reply.message.content
            }
            _ => {
                let body = LmStudioRequest {
                    messages,
                    temperature: TEMPERATURE,
                    stream: false,
                };
                let reply: LmStudioReply = self
                    .post(&body)
                    .await?
                    .json()
                    .await
                    .map_err(|e| LlmError::from_reqwest(provider, e))?;
                reply.choices.into_iter().next().and_then(|c| c.message.content)
            }
        };
        Ok(content.unwrap_or_default())
    }
}
