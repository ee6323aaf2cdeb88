//! Enrichment providers answer one prompt with one JSON document.
//!
//! The scanner holds an `Arc<dyn EnrichmentProvider>`, so the fallback
//! heuristics never know which backend (if any) is configured.

use crate::config::EnrichmentConfig;
use crate::error::EnrichmentError;
use async_trait::async_trait;
use log::{debug, warn};
use serde_json::Value;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

const MAX_ATTEMPTS: u32 = 2;

#[async_trait]
pub trait EnrichmentProvider: Send + Sync {
    async fn generate_structured_analysis(&self, prompt: &str) -> Result<Value, EnrichmentError>;

    /// Short backend name for logs and the report
    fn name(&self) -> &str;
}

/// Provider used when enrichment is switched off; every call falls back
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledProvider;

#[async_trait]
impl EnrichmentProvider for DisabledProvider {
    async fn generate_structured_analysis(&self, _prompt: &str) -> Result<Value, EnrichmentError> {
        Err(EnrichmentError::Unavailable)
    }

    fn name(&self) -> &str {
        "disabled"
    }
}

/// Runs an external program per prompt: prompt on stdin, JSON on stdout
#[derive(Debug, Clone)]
pub struct CommandProvider {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandProvider {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
        }
    }

    async fn run_once(&self, prompt: &str) -> Result<Value, EnrichmentError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| EnrichmentError::Provider(format!("failed to start '{}': {}", self.program, e)))?;

        let stdin = child.stdin.take();
        // The prompt write shares the deadline with the wait
        let exchange = async move {
            if let Some(mut stdin) = stdin {
                stdin
                    .write_all(prompt.as_bytes())
                    .await
                    .map_err(|e| EnrichmentError::Provider(format!("failed to write prompt: {}", e)))?;
            }
            child
                .wait_with_output()
                .await
                .map_err(|e| EnrichmentError::Provider(e.to_string()))
        };

        let output = tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| EnrichmentError::Provider(format!("timed out after {}s", self.timeout.as_secs())))??;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(EnrichmentError::Provider(format!(
                "'{}' exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let value = serde_json::from_str(strip_json_fences(&stdout))?;
        Ok(value)
    }
}

#[async_trait]
impl EnrichmentProvider for CommandProvider {
    async fn generate_structured_analysis(&self, prompt: &str) -> Result<Value, EnrichmentError> {
        let mut last_error = EnrichmentError::Unavailable;

        for attempt in 0..MAX_ATTEMPTS {
            if attempt > 0 {
                let delay = Duration::from_millis(500 * (1 << (attempt - 1)));
                warn!(
                    "Enrichment attempt {} failed ({}), retrying after {}ms",
                    attempt,
                    last_error,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            match self.run_once(prompt).await {
                Ok(value) => {
                    debug!("Enrichment command '{}' answered", self.program);
                    return Ok(value);
                }
                // A malformed answer is not retried
                Err(err @ EnrichmentError::Parse(_)) => return Err(err),
                Err(err) => last_error = err,
            }
        }

        Err(last_error)
    }

    fn name(&self) -> &str {
        &self.program
    }
}

/// Build the provider described by the config
pub fn provider_from_config(config: &EnrichmentConfig) -> Arc<dyn EnrichmentProvider> {
    match (config.enabled, &config.command) {
        (true, Some(command)) if !command.trim().is_empty() => Arc::new(CommandProvider::new(
            command.trim(),
            config.args.clone(),
            Duration::from_secs(config.timeout_secs.max(1)),
        )),
        (true, _) => {
            warn!("Enrichment is enabled but no command is configured; using heuristics only");
            Arc::new(DisabledProvider)
        }
        _ => Arc::new(DisabledProvider),
    }
}

/// Strip a ```json fence that models like to wrap answers in
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let inner = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .map(|rest| rest.trim_end().strip_suffix("```").unwrap_or(rest));
    inner.unwrap_or(text).trim()
}
