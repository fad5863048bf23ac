use crate::*;
use confique::Config as _;
use std::{path::PathBuf, time::Duration};

#[derive(confique::Config)]
pub struct Config {
    /// Evidence database opened by default.
    #[config(env = "SQLGUARD_DATABASE")]
    pub database: Option<PathBuf>,
    /// `lmstudio` or `ollama`.
    #[config(env = "LLM_PROVIDER", default = "lmstudio")]
    pub llm_provider: String,
    #[config(env = "LLM_API_URL", default = "http://localhost:1234/v1/chat/completions")]
    pub llm_api_url: String,
    #[config(env = "OLLAMA_URL", default = "http://localhost:11434")]
    pub ollama_url: String,
    #[config(env = "OLLAMA_MODEL", default = "llama3.2")]
    pub ollama_model: String,
    /// Bound on one correction round trip.
    #[config(env = "SQLGUARD_LLM_TIMEOUT_SECS", default = 30)]
    pub llm_timeout_secs: u64,
    #[config(env = "SQLGUARD_SCHEMA_CACHE_CAPACITY", default = 8)]
    pub schema_cache_capacity: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self::builder().env().load()?)
    }

    pub fn provider(&self) -> Result<Provider> {
        self.llm_provider.parse()
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }
}
