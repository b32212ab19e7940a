//! Launch argument parsing.
//!
//! The device host starts the plugin as
//! `orbdeck -port 28196 -pluginUUID <uuid> -registerEvent registerPlugin -info <json>`.

use thiserror::Error;

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Connect to the device host and serve buttons
    Run(LaunchArgs),
}

/// Connection parameters handed over by the device host.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchArgs {
    pub port: u16,
    pub plugin_uuid: String,
    pub register_event: String,
    /// Host and device description; only logged.
    pub info: Option<serde_json::Value>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LaunchError {
    #[error("missing required argument {0}")]
    Missing(&'static str),

    #[error("argument {0} expects a value")]
    MissingValue(String),

    #[error("invalid port {0:?}")]
    InvalidPort(String),
}

/// Parse command-line arguments (including the program name).
///
/// Unknown flags are ignored so newer host versions can add arguments.
///
/// # Examples
///
/// ```
/// use orbdeck::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["orbdeck".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, LaunchError>
where
    I: Iterator<Item = String>,
{
    let mut port = None;
    let mut plugin_uuid = None;
    let mut register_event = None;
    let mut info = None;

    let mut args = args.skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "-port" | "-pluginUUID" | "-registerEvent" | "-info" => {
                let value = args
                    .next()
                    .ok_or_else(|| LaunchError::MissingValue(arg.clone()))?;
                match arg.as_str() {
                    "-port" => {
                        port = Some(
                            value
                                .parse::<u16>()
                                .map_err(|_| LaunchError::InvalidPort(value.clone()))?,
                        )
                    }
                    "-pluginUUID" => plugin_uuid = Some(value),
                    "-registerEvent" => register_event = Some(value),
                    _ => info = serde_json::from_str(&value).ok(),
                }
            }
            _ => {}
        }
    }

    Ok(CliCommand::Run(LaunchArgs {
        port: port.ok_or(LaunchError::Missing("-port"))?,
        plugin_uuid: plugin_uuid.ok_or(LaunchError::Missing("-pluginUUID"))?,
        register_event: register_event.ok_or(LaunchError::Missing("-registerEvent"))?,
        info,
    }))
}
