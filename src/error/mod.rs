//! Unified error handling.
//!
//! - **Module errors**: each module owns a `thiserror` enum
//!   (`SourceError`, `AssetError`, `SinkError`, `KeyError`, `ConfigError`,
//!   `LaunchError`, ...)
//! - **Unified type**: [`DeckError`] wraps them with `#[from]`
//! - **Categories**: [`ErrorCategory`] tells whether the plugin carries on
//!
//! | Category | Handling | Recoverable |
//! |----------|----------|-------------|
//! | Source | logged-out snapshot installed | Yes |
//! | Asset | layer omitted | Yes |
//! | Sink | logged, other buttons unaffected | Yes |
//! | Listener | logged, other listeners still run | Yes |
//! | Configuration | startup aborted | No |
//! | System | startup aborted / connection closed | No |

mod category;
mod deck_error;
mod result;

pub use category::ErrorCategory;
pub use deck_error::DeckError;
pub use result::DeckResult;
