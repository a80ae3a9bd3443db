//! Shell command templates used by the process-backed services

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Stdio;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::process::Command;
use tracing::debug;

/// Prefix of the environment variables exported from the caller `env`
pub const ENV_PREFIX: &str = "DEVSYNC_ENV_";

/// Android signing variables exported to build and deploy commands
pub const KEY_STORE_ALIAS_VAR: &str = "DEVSYNC_KEY_STORE_ALIAS";
pub const KEY_STORE_PATH_VAR: &str = "DEVSYNC_KEY_STORE_PATH";
pub const KEY_STORE_ALIAS_PASSWORD_VAR: &str = "DEVSYNC_KEY_STORE_ALIAS_PASSWORD";
pub const KEY_STORE_PASSWORD_VAR: &str = "DEVSYNC_KEY_STORE_PASSWORD";

/// Captured stderr kept for error messages
const STDERR_TAIL: usize = 4096;

/// A shell command with `{name}` placeholders
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandTemplate(String);

impl CommandTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Substitute every `{name}` placeholder. Unknown placeholders are left as-is.
    pub fn render(&self, vars: &[(&str, &str)]) -> String {
        vars.iter().fold(self.0.clone(), |acc, (name, value)| {
            acc.replace(&format!("{{{}}}", name), value)
        })
    }
}

/// Outcome of a finished command
#[derive(Debug)]
pub struct CommandOutcome {
    pub success: bool,
    pub code: Option<i32>,
    pub stderr: String,
}

/// A rendered command run through the platform shell
pub struct ShellCommand {
    command: String,
    cwd: PathBuf,
    vars: Vec<(String, String)>,
    secrets: Vec<(&'static str, SecretString)>,
    capture_stderr: bool,
}

impl ShellCommand {
    pub fn new(command: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            cwd: cwd.into(),
            vars: Vec::new(),
            secrets: Vec::new(),
            capture_stderr: true,
        }
    }

    /// Export the caller `env` as `DEVSYNC_ENV_*` variables
    pub fn caller_env(mut self, env: &BTreeMap<String, Value>) -> Self {
        self.vars.extend(
            env.iter()
                .map(|(key, value)| (env_var_name(key), env_var_value(value))),
        );
        self
    }

    /// Export `value` as `name` when present
    pub fn var(mut self, name: &str, value: Option<&str>) -> Self {
        if let Some(value) = value {
            self.vars.push((name.to_string(), value.to_string()));
        }
        self
    }

    /// Export a password when present. It is only exposed to the child process.
    pub fn secret(mut self, name: &'static str, value: Option<&SecretString>) -> Self {
        if let Some(value) = value {
            self.secrets.push((name, value.clone()));
        }
        self
    }

    /// Send stderr straight to the terminal. Used for long-running commands.
    pub fn inherit_stderr(mut self) -> Self {
        self.capture_stderr = false;
        self
    }

    pub async fn run(self) -> Result<CommandOutcome, std::io::Error> {
        debug!("Running `{}` in {}", self.command, self.cwd.display());

        let mut cmd = shell(&self.command);
        cmd.current_dir(&self.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit());

        for (key, value) in &self.vars {
            cmd.env(key, value);
        }
        for (key, value) in &self.secrets {
            cmd.env(key, value.expose_secret());
        }

        if !self.capture_stderr {
            let status = cmd.stderr(Stdio::inherit()).status().await?;
            return Ok(CommandOutcome {
                success: status.success(),
                code: status.code(),
                stderr: String::new(),
            });
        }

        let output = cmd.stderr(Stdio::piped()).output().await?;
        Ok(CommandOutcome {
            success: output.status.success(),
            code: output.status.code(),
            stderr: stderr_tail(&output.stderr),
        })
    }
}

/// Last `STDERR_TAIL` bytes of `stderr`, trimmed
fn stderr_tail(stderr: &[u8]) -> String {
    let start = stderr.len().saturating_sub(STDERR_TAIL);
    String::from_utf8_lossy(&stderr[start..]).trim().to_string()
}

#[cfg(unix)]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.args(["-c", command]);
    cmd
}

#[cfg(not(unix))]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", command]);
    cmd
}

fn env_var_name(key: &str) -> String {
    let sanitized: String = key
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
        .collect();
    format!("{}{}", ENV_PREFIX, sanitized)
}

fn env_var_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl CommandOutcome {
    /// Short description for error messages
    pub fn describe(&self) -> String {
        let code = self
            .code
            .map(|c| c.to_string())
            .unwrap_or_else(|| "signal".to_string());
        if self.stderr.is_empty() {
            format!("exit code {}", code)
        } else {
            format!("exit code {}: {}", code, self.stderr)
        }
    }
}
