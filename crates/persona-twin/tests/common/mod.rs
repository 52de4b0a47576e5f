use std::sync::Mutex;

use persona_twin::backend::{BoxFuture, LlmBackend, LlmMessage};
use persona_twin::error::TwinError;

/// Backend returning a canned reply and recording what it was sent.
pub struct StubBackend {
    reply: Result<String, String>,
    pub calls: Mutex<Vec<Vec<LlmMessage>>>,
}

impl StubBackend {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: &str) -> Self {
        Self {
            reply: Err(error.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn last_call(&self) -> Vec<LlmMessage> {
        self.calls.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

impl LlmBackend for StubBackend {
    fn model_id(&self) -> &str {
        "stub-model"
    }

    fn complete<'a>(
        &'a self,
        messages: &'a [LlmMessage],
    ) -> BoxFuture<'a, Result<String, TwinError>> {
        self.calls.lock().unwrap().push(messages.to_vec());
        let reply = self.reply.clone().map_err(TwinError::Invocation);
        Box::pin(async move { reply })
    }
}
