use serde::{Deserialize, Serialize};

/// Result of running one command through the remote executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResult {
    /// Combined output. May contain embedded newlines.
    #[serde(default)]
    pub output: String,
    /// Process exit code reported by the executor.
    #[serde(rename = "exitCode", alias = "exit_code")]
    pub exit_code: i32,
}

impl CommandResult {
    pub fn new(output: impl Into<String>, exit_code: i32) -> Self {
        Self {
            output: output.into(),
            exit_code,
        }
    }

    /// True when the command exited with code 0.
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }

    /// Output split into display rows, skipping empty ones.
    pub fn output_lines(&self) -> impl Iterator<Item = &str> {
        self.output
            .split('\n')
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
    }
}

/// Body of a command execution request.
#[derive(Debug, Clone, Serialize)]
pub struct CommandRequest<'a> {
    pub command: &'a str,
}

/// Response body of the command history endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryResponse {
    /// Prior commands, most recent first.
    #[serde(default)]
    pub commands: Vec<String>,
}
