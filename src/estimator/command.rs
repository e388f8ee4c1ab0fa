//! Estimator that shells out to a local program
//!
//! The prompt is written to the program's stdin and its stdout is the reply.
//! Useful for local models and for exercising the CLI without network access.

use super::Estimator;
use crate::error::{WagecastError, WagecastResult};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

const PROVIDER: &str = "command";

/// Estimator running an external command per prompt
pub struct CommandEstimator {
    program: String,
    args: Vec<String>,
}

impl CommandEstimator {
    /// Build from a program followed by its arguments
    pub fn new(command: &[String]) -> WagecastResult<Self> {
        let (program, args) = command.split_first().ok_or_else(|| {
            WagecastError::User("estimator.command must name a program".to_string())
        })?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

#[async_trait]
impl Estimator for CommandEstimator {
    async fn generate(&self, prompt: &str) -> WagecastResult<String> {
        debug!("Executing: {} {:?}", self.program, self.args);

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| WagecastError::estimation(PROVIDER, format!("{}: {}", self.program, e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(prompt.as_bytes())
                .await
                .map_err(|e| WagecastError::estimation(PROVIDER, e.to_string()))?;
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| WagecastError::estimation(PROVIDER, e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(WagecastError::estimation(
                PROVIDER,
                format!(
                    "{} exited with {}: {}",
                    self.program,
                    output.status.code().unwrap_or(-1),
                    stderr.trim()
                ),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn name(&self) -> &'static str {
        PROVIDER
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> CommandEstimator {
        CommandEstimator::new(&["sh".to_string(), "-c".to_string(), script.to_string()]).unwrap()
    }

    #[test]
    fn empty_command_rejected() {
        assert!(CommandEstimator::new(&[]).is_err());
    }

    #[tokio::test]
    async fn stdout_is_reply() {
        let estimator = sh("echo '₹4,00,000 - ₹5,00,000 per annum'");
        let reply = estimator.generate("prompt").await.unwrap();
        assert_eq!(reply.trim(), "₹4,00,000 - ₹5,00,000 per annum");
    }

    #[tokio::test]
    async fn prompt_arrives_on_stdin() {
        let estimator = sh("cat");
        let reply = estimator.generate("Job Title: Analyst").await.unwrap();
        assert_eq!(reply, "Job Title: Analyst");
    }

    #[tokio::test]
    async fn failing_command_is_estimation_error() {
        let estimator = sh("echo boom >&2; exit 3");
        let err = estimator.generate("prompt").await.unwrap_err();
        assert!(err.to_string().contains("boom"));
    }
}
