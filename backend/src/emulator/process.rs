//! Emulator runner driven as a child process.
//!
//! Protocol: the batch is written to the child's stdin as one JSON object
//! (field name to value list) and stdin is closed. The child writes one JSON
//! object to stdout:
//!
//! ```json
//! {"prevalence": {...} | [...] | null, "cases": {...} | [...] | null, "eir_valid": true}
//! ```
//!
//! A non-zero exit status, a timeout or undecodable stdout is an emulator
//! failure.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::Emulator;
use crate::config::EmulatorSettings;
use crate::error::{ServiceError, ServiceResult};
use crate::models::results::EmulatorOutput;
use crate::models::scenario::ScenarioBatch;

/// Bytes of stderr kept in error messages.
const STDERR_TAIL_BYTES: usize = 2000;

#[derive(Debug, Clone)]
pub struct ProcessEmulator {
    command: String,
    args: Vec<String>,
    timeout: Duration,
    version: String,
}

impl ProcessEmulator {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
            timeout: Duration::from_secs(crate::config::DEFAULT_EMULATOR_TIMEOUT_SECS),
            version: crate::config::DEFAULT_MINTE_VERSION.to_string(),
        }
    }

    pub fn from_settings(settings: &EmulatorSettings) -> Self {
        Self::new(settings.command.clone(), settings.args.clone())
            .with_timeout(Duration::from_secs(settings.timeout_secs))
            .with_version(settings.minte_version.clone())
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn execute(&self, payload: Vec<u8>) -> ServiceResult<std::process::Output> {
        let mut child = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                ServiceError::emulator(format!(
                    "Failed to start emulator '{}': {}",
                    self.command, e
                ))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| ServiceError::emulator("Emulator stdin was not captured"))?;

        // Feed stdin concurrently so a child that writes before it finishes
        // reading cannot deadlock on a full pipe.
        let writer = tokio::spawn(async move {
            stdin.write_all(&payload).await?;
            stdin.shutdown().await
        });

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| ServiceError::emulator(format!("Failed to wait for emulator: {}", e)))?;

        match writer.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => debug!("Emulator closed stdin early: {}", e),
            Err(e) => debug!("Emulator stdin writer did not complete: {}", e),
        }

        Ok(output)
    }
}

#[async_trait]
impl Emulator for ProcessEmulator {
    async fn run(&self, batch: &ScenarioBatch) -> ServiceResult<EmulatorOutput> {
        let payload = serde_json::to_vec(batch)
            .map_err(|e| ServiceError::emulator(format!("Failed to encode batch: {}", e)))?;

        debug!(
            "Running emulator '{}' with {} scenarios",
            self.command,
            batch.len()
        );

        let output = tokio::time::timeout(self.timeout, self.execute(payload))
            .await
            .map_err(|_| {
                ServiceError::emulator(format!(
                    "Emulator did not finish within {}s",
                    self.timeout.as_secs_f64()
                ))
            })??;

        if !output.status.success() {
            let stderr = stderr_tail(&output.stderr);
            error!("Emulator exited with {}: {}", output.status, stderr);
            return Err(ServiceError::emulator(format!(
                "Emulator exited with {}: {}",
                output.status, stderr
            )));
        }

        serde_json::from_slice(&output.stdout)
            .map_err(|e| ServiceError::emulator(format!("Invalid emulator output: {}", e)))
    }

    fn version(&self) -> String {
        self.version.clone()
    }
}

fn stderr_tail(stderr: &[u8]) -> String {
    let start = stderr.len().saturating_sub(STDERR_TAIL_BYTES);
    String::from_utf8_lossy(&stderr[start..]).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stderr_tail_truncates() {
        let long = vec![b'x'; STDERR_TAIL_BYTES + 10];
        assert_eq!(stderr_tail(&long).len(), STDERR_TAIL_BYTES);
        assert_eq!(stderr_tail(b"  boom \n"), "boom");
    }

    #[test]
    fn test_from_settings() {
        let settings = EmulatorSettings {
            command: "python".into(),
            args: vec!["-m".into(), "mint_runner".into()],
            timeout_secs: 42,
            minte_version: "1.2.3".into(),
        };

        let emulator = ProcessEmulator::from_settings(&settings);

        assert_eq!(emulator.command(), "python");
        assert_eq!(emulator.timeout(), Duration::from_secs(42));
        assert_eq!(emulator.version(), "1.2.3");
    }
}
