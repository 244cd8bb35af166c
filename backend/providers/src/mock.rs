use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use plchat_core::{ChatError, ChatProvider, FinishReason, ProviderReply, ProviderRequest};

/// A scripted provider: replays queued outcomes in order and records every request.
///
/// Once the script runs out it answers with a fixed `STOP` reply.
pub struct MockProvider {
    name: String,
    model: String,
    script: Mutex<VecDeque<Result<ProviderReply, String>>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl MockProvider {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            model: format!("{name}-model"),
            name,
            script: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_reply(mut self, reply: ProviderReply) -> Self {
        self.script.get_mut().push_back(Ok(reply));
        self
    }

    /// Queue an upstream failure.
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.script.get_mut().push_back(Err(message.into()));
        self
    }

    /// Requests received so far, oldest first.
    pub async fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl ChatProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn send_chat(&self, request: &ProviderRequest) -> Result<ProviderReply, ChatError> {
        self.requests.lock().await.push(request.clone());
        match self.script.lock().await.pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => Err(ChatError::upstream(&self.name, message)),
            None => Ok(ProviderReply::text("Mock response", FinishReason::Stop)),
        }
    }
}
