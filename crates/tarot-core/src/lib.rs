//! Tarot readings over the Rider-Waite deck.
//!
//! The crate holds the card store, the spread catalog, search and analytics
//! over the deck, the reading engine with its interpretation rules, and a
//! session ledger. [`TarotService`] bundles them into one call per tool and
//! answers with markdown text, so transports only decode arguments and
//! print.

/// Deck analytics: distributions, data quality and content themes.
pub mod analytics;
/// Card records and their enumerations.
pub mod card;
/// Service configuration.
pub mod config;
/// The card store.
pub mod deck;
/// Error types used throughout the crate.
pub mod error;
/// Markdown rendering of every tool response.
pub mod format;
/// Secure and ordinary random sources.
pub mod random;
/// Drawing readings and interpreting them.
pub mod reading;
/// Keyword search, similarity and deck statistics.
pub mod search;
/// The service facade.
pub mod service;
/// Session history with idle eviction.
pub mod session;
/// Spread layouts, built-in and custom.
pub mod spread;

#[cfg(test)]
mod testing;

/// Re-export card types.
pub use card::{Arcana, Card, CardCategory, Element, MeaningField, Orientation, Suit};
/// Re-export configuration.
pub use config::TarotConfig;
/// Re-export the card store.
pub use deck::Deck;
/// Re-export error types.
pub use error::{TarotError, TarotResult};
/// Re-export reading types.
pub use reading::{DrawnCard, Reading, ReadingEngine};
/// Re-export search types.
pub use search::{CardSearch, SearchOptions};
/// Re-export the service facade.
pub use service::{CardSelection, TarotService};
/// Re-export session types.
pub use session::{Session, SessionLedger};
/// Re-export spread types.
pub use spread::{CustomSpreadRequest, Position, Spread, SpreadCatalog, SpreadValidationError};
