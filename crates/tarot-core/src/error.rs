//! Error types for the tarot engine.

use thiserror::Error;

/// Result type for tarot operations.
pub type TarotResult<T> = Result<T, TarotError>;

/// Failures that abort an operation or the startup sequence.
///
/// Expected outcomes such as an unknown card or an invalid spread type are
/// not errors; the service reports those as text.
#[derive(Debug, Error)]
pub enum TarotError {
    /// More unique cards were requested than the deck holds.
    #[error("cannot draw {requested} cards from a deck of {available} cards")]
    InvalidCount {
        /// Number of cards asked for.
        requested: usize,
        /// Number of cards in the deck.
        available: usize,
    },

    /// The operating system entropy source could not be used.
    #[error("secure random source unavailable: {0}")]
    SecureRandomUnavailable(String),

    /// The card dataset is missing or malformed.
    #[error("card data is missing or corrupt: {0}")]
    DeckLoad(String),

    /// Reading the card dataset failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The card dataset is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_count_message() {
        let err = TarotError::InvalidCount {
            requested: 80,
            available: 78,
        };
        assert_eq!(err.to_string(), "cannot draw 80 cards from a deck of 78 cards");
    }
}
