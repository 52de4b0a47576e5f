use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use eyre::WrapErr;
use persona_storage::fs::FsStore;
use persona_storage::memory::MemoryStore;
use persona_storage::store::ObjectStore;
use persona_twin::backend::{LlmBackend, ScriptBackend};

use crate::state::AppState;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_PYTHON: &str = "python3";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 30;

/// Completion script settings. Present only when a script is configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    pub interpreter: String,
    pub script: PathBuf,
    pub api_key: Option<String>,
    pub model: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// `None` keeps everything in memory.
    pub data_dir: Option<PathBuf>,
    pub llm: Option<LlmConfig>,
}

impl ServerConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from an arbitrary variable source. Empty values
    /// count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let bind_addr = var("PERSONA_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .wrap_err("PERSONA_BIND_ADDR is not a valid socket address")?;

        let llm = match var("PERSONA_NARRATIVE_SCRIPT") {
            Some(script) => {
                let timeout_secs = match var("PERSONA_LLM_TIMEOUT_SECS") {
                    Some(raw) => raw
                        .trim()
                        .parse::<u64>()
                        .wrap_err("PERSONA_LLM_TIMEOUT_SECS must be a whole number of seconds")?,
                    None => DEFAULT_LLM_TIMEOUT_SECS,
                };
                Some(LlmConfig {
                    interpreter: var("PERSONA_PYTHON").unwrap_or_else(|| DEFAULT_PYTHON.to_string()),
                    script: PathBuf::from(script),
                    api_key: var("PERSONA_LLM_KEY"),
                    model: var("PERSONA_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                    timeout: Duration::from_secs(timeout_secs),
                })
            }
            None => None,
        };

        Ok(Self {
            bind_addr,
            data_dir: var("PERSONA_DATA_DIR").map(PathBuf::from),
            llm,
        })
    }

    pub fn build_state(&self) -> AppState {
        let store: Arc<dyn ObjectStore> = match &self.data_dir {
            Some(dir) => Arc::new(FsStore::new(dir)),
            None => Arc::new(MemoryStore::default()),
        };

        let llm = self.llm.as_ref().map(|c| {
            Arc::new(ScriptBackend {
                interpreter: c.interpreter.clone(),
                script: c.script.clone(),
                api_key: c.api_key.clone(),
                model_id: c.model.clone(),
                timeout: c.timeout,
            }) as Arc<dyn LlmBackend>
        });

        AppState { store, llm }
    }
}
