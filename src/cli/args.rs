//! Command-line argument parsing.

use std::time::Duration;

use thiserror::Error;

use crate::config::TerminalConfig;

/// Flags that override the environment for one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunArgs {
    pub session_id: Option<String>,
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub export_dir: Option<String>,
}

impl RunArgs {
    /// Layer these flags over `config`.
    pub fn apply(&self, mut config: TerminalConfig) -> TerminalConfig {
        if let Some(session_id) = &self.session_id {
            config = config.with_session_id(session_id.clone());
        }
        if let Some(url) = &self.api_url {
            config = config.with_api_url(url.clone());
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_command_timeout(Duration::from_secs(secs));
        }
        if let Some(dir) = &self.export_dir {
            config = config.with_export_dir(dir.clone());
        }
        config
    }
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Run the terminal (default)
    Run(RunArgs),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ArgsError {
    #[error("missing value for {0}")]
    MissingValue(String),

    #[error("invalid value for {flag}: {value}")]
    InvalidValue { flag: String, value: String },

    #[error("unknown argument: {0}")]
    Unknown(String),
}

pub const USAGE: &str = "\
Usage: projterm [OPTIONS]

Options:
  -s, --session <ID>      Session to attach to (or PROJTERM_SESSION)
      --api-url <URL>     Project API base URL (or PROJTERM_API_URL)
      --timeout <SECS>    Command timeout in seconds (default 120)
      --export-dir <DIR>  Directory for exported logs
  -h, --help              Print help
  -V, --version           Print version";

/// Parse command-line arguments (including the program name).
///
/// # Examples
///
/// ```
/// use projterm::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["projterm".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut run = RunArgs::default();
    // Skip the program name
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg.clone(), None),
        };
        let mut value = |flag: &str| {
            inline
                .clone()
                .or_else(|| args.next())
                .ok_or_else(|| ArgsError::MissingValue(flag.to_string()))
        };
        match flag.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--session" | "-s" => run.session_id = Some(value(&flag)?),
            "--api-url" => run.api_url = Some(value(&flag)?),
            "--export-dir" => run.export_dir = Some(value(&flag)?),
            "--timeout" => {
                let raw = value(&flag)?;
                let secs = raw.parse().map_err(|_| ArgsError::InvalidValue {
                    flag: flag.clone(),
                    value: raw.clone(),
                })?;
                run.timeout_secs = Some(secs);
            }
            _ => return Err(ArgsError::Unknown(arg)),
        }
    }
    Ok(CliCommand::Run(run))
}
