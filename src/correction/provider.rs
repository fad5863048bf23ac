use crate::*;
use derive_more::Display;
use serde::Serialize;
use std::str::FromStr;

/// Local model servers the correction loop can talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[display("lmstudio")]
    LmStudio,
    #[display("ollama")]
    Ollama,
}

impl Provider {
    /// Name shown to the analyst.
    pub fn label(&self) -> &'static str {
        match self {
            Provider::LmStudio => "LM Studio",
            Provider::Ollama => "Ollama",
        }
    }

    /// What to check when the provider cannot be reached.
    pub fn hint(&self) -> &'static str {
        match self {
            Provider::LmStudio => "Is the server running at http://localhost:1234?",
            Provider::Ollama => "Is Ollama running? (ollama serve)",
        }
    }
}

impl FromStr for Provider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lmstudio" => Ok(Provider::LmStudio),
            "ollama" => Ok(Provider::Ollama),
            other => Err(Error::Config(format!(
                "unknown LLM provider '{other}' (expected lmstudio or ollama)"
            ))),
        }
    }
}
