//! Result type alias.

use super::deck_error::DeckError;

/// Type alias for Results using DeckError.
///
/// # Example
///
/// ```ignore
/// use orbdeck::error::DeckResult;
///
/// async fn start(config: &PluginConfig) -> DeckResult<()> {
///     let listener = TcpListener::bind(config.listen_addr).await?;
///     Ok(())
/// }
/// ```
pub type DeckResult<T> = Result<T, DeckError>;
