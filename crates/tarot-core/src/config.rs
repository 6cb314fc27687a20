//! Configuration for the tarot service.

use std::path::PathBuf;
use std::time::Duration;

use chrono::TimeDelta;

/// Size of a standard Rider-Waite deck.
pub const STANDARD_DECK_SIZE: usize = 78;

/// Configuration for a [`TarotService`](crate::TarotService).
#[derive(Debug, Clone)]
pub struct TarotConfig {
    /// Load cards from this JSON file instead of the bundled deck.
    pub deck_path: Option<PathBuf>,
    /// Sessions idle for longer than this are removed by a sweep.
    pub session_ttl: TimeDelta,
    /// How often a hosting server should run the session sweep.
    pub sweep_interval: Duration,
    /// Default number of search results.
    pub search_limit: usize,
    /// Default number of similar cards.
    pub similar_limit: usize,
    /// Deck size used as the denominator of the analytics completion rate.
    pub expected_deck_size: usize,
}

impl Default for TarotConfig {
    fn default() -> Self {
        Self {
            deck_path: None,
            session_ttl: TimeDelta::hours(24),
            sweep_interval: Duration::from_secs(60 * 60),
            search_limit: 10,
            similar_limit: 5,
            expected_deck_size: STANDARD_DECK_SIZE,
        }
    }
}

impl TarotConfig {
    /// Load the deck from a file.
    pub fn with_deck_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.deck_path = Some(path.into());
        self
    }

    /// Set the session time-to-live in hours (clamped to 1-720).
    pub fn with_session_ttl_hours(mut self, hours: u32) -> Self {
        self.session_ttl = TimeDelta::hours(i64::from(hours.clamp(1, 720)));
        self
    }

    /// Set the sweep interval in seconds (at least one second).
    pub fn with_sweep_interval_secs(mut self, secs: u64) -> Self {
        self.sweep_interval = Duration::from_secs(secs.max(1));
        self
    }

    /// Set the default search limit (at least 1).
    pub fn with_search_limit(mut self, limit: usize) -> Self {
        self.search_limit = limit.max(1);
        self
    }

    /// Set the default similar-card limit (at least 1).
    pub fn with_similar_limit(mut self, limit: usize) -> Self {
        self.similar_limit = limit.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = TarotConfig::default();
        assert!(cfg.deck_path.is_none());
        assert_eq!(cfg.session_ttl, TimeDelta::hours(24));
        assert_eq!(cfg.sweep_interval, Duration::from_secs(3600));
        assert_eq!(cfg.search_limit, 10);
        assert_eq!(cfg.similar_limit, 5);
        assert_eq!(cfg.expected_deck_size, 78);
    }

    #[test]
    fn builder_methods() {
        let cfg = TarotConfig::default()
            .with_deck_path("/tmp/cards.json")
            .with_session_ttl_hours(48)
            .with_sweep_interval_secs(30)
            .with_search_limit(3)
            .with_similar_limit(2);
        assert_eq!(cfg.deck_path, Some(PathBuf::from("/tmp/cards.json")));
        assert_eq!(cfg.session_ttl, TimeDelta::hours(48));
        assert_eq!(cfg.sweep_interval, Duration::from_secs(30));
        assert_eq!(cfg.search_limit, 3);
        assert_eq!(cfg.similar_limit, 2);
    }

    #[test]
    fn values_clamped() {
        let cfg = TarotConfig::default()
            .with_session_ttl_hours(0)
            .with_sweep_interval_secs(0)
            .with_search_limit(0);
        assert_eq!(cfg.session_ttl, TimeDelta::hours(1));
        assert_eq!(cfg.sweep_interval, Duration::from_secs(1));
        assert_eq!(cfg.search_limit, 1);
    }
}
