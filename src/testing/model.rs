use crate::*;
use async_trait::async_trait;
use std::{collections::VecDeque, sync::Mutex};

/// A chat model that replays canned replies and records every request.
pub struct ScriptedModel {
    provider: Provider,
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    requests: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedModel {
    pub fn new(replies: impl IntoIterator<Item = Result<String, LlmError>>) -> Self {
        Self {
            provider: Provider::LmStudio,
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(reply: &str) -> Self {
        Self::new([Ok(reply.to_string())])
    }

    pub fn failing(error: LlmError) -> Self {
        Self::new([Err(error)])
    }

    pub fn requests(&self) -> Vec<Vec<ChatMessage>> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().expect("requests lock").len()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    fn provider(&self) -> Provider {
        self.provider
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        self.requests
            .lock()
            .expect("requests lock")
            .push(messages.to_vec());
        self.replies
            .lock()
            .expect("replies lock")
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted reply left for request {messages:?}"))
    }
}
