//! CLI module.
//!
//! The device host launches the plugin with its connection parameters. The
//! only other supported invocation is `--version`.
//!
//! ```ignore
//! use orbdeck::cli::{parse_args, CliCommand};
//!
//! match parse_args(std::env::args())? {
//!     CliCommand::Version => println!("{}", version_string()),
//!     CliCommand::Run(launch) => plugin::run(launch, config).await?,
//! }
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, CliCommand, LaunchArgs, LaunchError};
pub use version::{version_string, VERSION};
