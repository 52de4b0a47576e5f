//! Language-model backends.
//!
//! The service never talks to a model provider directly. A backend takes a
//! list of role-tagged messages and returns the model's text. The shipped
//! backend runs an external script, which keeps provider SDKs and keys out
//! of this process.
//!
//! # Script contract
//!
//! The script is invoked as `<interpreter> <script> <messages.json>`, where
//! the file holds a JSON array of `{"role", "content"}` objects. The API key
//! and model id are passed in the `LLM_API_KEY` and `LLM_MODEL` environment
//! variables. The script must print exactly one JSON object to stdout:
//!
//! ```text
//! {"success": true, "response": "..."}
//! {"success": false, "error": "..."}
//! ```

use std::future::Future;
use std::io::Write;
use std::path::PathBuf;
use std::pin::Pin;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tracing::{info, warn};

use crate::error::TwinError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LlmRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmMessage {
    pub role: LlmRole,
    pub content: String,
}

impl LlmMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: LlmRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: LlmRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: LlmRole::Assistant,
            content: content.into(),
        }
    }
}

pub trait LlmBackend: Send + Sync {
    /// Model identifier reported in reply metadata.
    fn model_id(&self) -> &str;

    /// Run one completion over the given conversation.
    fn complete<'a>(
        &'a self,
        messages: &'a [LlmMessage],
    ) -> BoxFuture<'a, Result<String, TwinError>>;
}

#[derive(Debug, Deserialize)]
struct ScriptOutput {
    success: bool,
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Backend that shells out to an external completion script.
#[derive(Debug, Clone)]
pub struct ScriptBackend {
    pub interpreter: String,
    pub script: PathBuf,
    pub api_key: Option<String>,
    pub model_id: String,
    pub timeout: Duration,
}

impl ScriptBackend {
    async fn run(&self, messages: &[LlmMessage]) -> Result<String, TwinError> {
        // The file is removed when `input` drops at the end of this call.
        let mut input = tempfile::Builder::new()
            .prefix("persona-messages-")
            .suffix(".json")
            .tempfile()?;
        input.write_all(&serde_json::to_vec(messages)?)?;
        input.flush()?;

        let mut cmd = Command::new(&self.interpreter);
        cmd.arg(&self.script)
            .arg(input.path())
            .env("LLM_MODEL", &self.model_id)
            .kill_on_drop(true);
        if let Some(key) = &self.api_key {
            cmd.env("LLM_API_KEY", key);
        }

        let output = tokio::time::timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| TwinError::Timeout(self.timeout.as_secs()))??;

        if !output.stderr.is_empty() {
            warn!(
                stderr = %String::from_utf8_lossy(&output.stderr),
                "completion script wrote to stderr"
            );
        }
        if !output.status.success() {
            return Err(TwinError::Invocation(format!(
                "completion script exited with {}",
                output.status
            )));
        }

        parse_script_output(&output.stdout)
    }
}

impl LlmBackend for ScriptBackend {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn complete<'a>(
        &'a self,
        messages: &'a [LlmMessage],
    ) -> BoxFuture<'a, Result<String, TwinError>> {
        Box::pin(async move {
            info!(
                model_id = %self.model_id,
                messages = messages.len(),
                "invoking completion script"
            );
            self.run(messages).await
        })
    }
}

/// Decode the script's stdout envelope into the completion text.
pub fn parse_script_output(stdout: &[u8]) -> Result<String, TwinError> {
    let out: ScriptOutput = serde_json::from_slice(stdout).map_err(|e| {
        TwinError::ResponseParse(format!(
            "invalid script output: {e}. Raw: {}",
            String::from_utf8_lossy(stdout)
        ))
    })?;

    match (out.success, out.response) {
        (true, Some(response)) => Ok(response),
        (true, None) => Err(TwinError::ResponseParse(
            "script reported success without a response".to_string(),
        )),
        (false, _) => Err(TwinError::Invocation(
            out.error.unwrap_or_else(|| "completion failed".to_string()),
        )),
    }
}
