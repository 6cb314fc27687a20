//! The tarot service: one entry point per tool, returning display text.
//!
//! Expected outcomes (unknown cards, invalid spread types, rejected custom
//! spreads) come back as `Ok` text. Only genuine failures, such as asking
//! for more cards than the deck holds, are `Err`.

use serde_json::Value;

use crate::analytics::CardAnalytics;
use crate::card::{CardCategory, Orientation};
use crate::config::TarotConfig;
use crate::deck::Deck;
use crate::error::TarotResult;
use crate::format;
use crate::random::{OrdinaryRandom, SecureRandom};
use crate::reading::{DrawnCard, ReadingEngine, combination_analysis};
use crate::search::{CardSearch, SearchOptions};
use crate::session::{Session, SessionLedger};
use crate::spread::{CustomSpreadRequest, Spread, SpreadCatalog};

/// A card named in a combination request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSelection {
    /// Card name or id.
    pub name: String,
    /// Orientation to read it in.
    pub orientation: Orientation,
}

impl CardSelection {
    /// A selection in the given orientation.
    pub fn new(name: impl Into<String>, orientation: Orientation) -> Self {
        Self {
            name: name.into(),
            orientation,
        }
    }
}

/// Everything a tool call needs: the deck, spreads, sessions and both
/// random sources.
pub struct TarotService {
    config: TarotConfig,
    deck: Deck,
    catalog: SpreadCatalog,
    sessions: SessionLedger,
    secure: SecureRandom,
    ordinary: OrdinaryRandom,
}

impl TarotService {
    /// Load the configured deck and seed the secure source from the OS.
    pub fn new(config: TarotConfig) -> TarotResult<Self> {
        let deck = match &config.deck_path {
            Some(path) => Deck::load(path)?,
            None => Deck::builtin()?,
        };
        let secure = SecureRandom::from_os()?;
        tracing::info!(cards = deck.len(), "tarot service ready");
        Ok(Self::with_parts(config, deck, secure))
    }

    /// Assemble a service from an already loaded deck and random source.
    pub fn with_parts(config: TarotConfig, deck: Deck, secure: SecureRandom) -> Self {
        let sessions = SessionLedger::new(config.session_ttl);
        Self {
            config,
            deck,
            catalog: SpreadCatalog::builtin(),
            sessions,
            secure,
            ordinary: OrdinaryRandom::new(),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &TarotConfig {
        &self.config
    }

    /// The loaded deck.
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// The built-in spreads.
    pub fn catalog(&self) -> &SpreadCatalog {
        &self.catalog
    }

    /// The session ledger.
    pub fn sessions(&self) -> &SessionLedger {
        &self.sessions
    }

    fn search(&self) -> CardSearch<'_> {
        CardSearch::new(self.deck.all_cards())
    }

    fn suggestion(&self, name: &str) -> String {
        self.deck
            .closest_name(name)
            .map(|card| format!(" Did you mean \"{}\"?", card.name))
            .unwrap_or_default()
    }

    // -----------------------------------------------------------------------
    // Cards
    // -----------------------------------------------------------------------

    /// Detail page for one card.
    pub fn card_info(&self, name: &str, orientation: Orientation) -> String {
        match self.deck.find_card(name) {
            Some(card) => format::card_info(card, orientation),
            None => format!(
                "Card \"{name}\" not found. Use the list_all_cards tool to see available cards.{}",
                self.suggestion(name)
            ),
        }
    }

    /// Grouped card listing.
    pub fn list_cards(&self, category: CardCategory) -> String {
        format::card_listing(self.deck.all_cards(), category)
    }

    /// Ranked search. A missing or zero `limit` uses the configured default.
    pub fn search_cards(&self, options: &SearchOptions, limit: Option<usize>) -> String {
        let limit = limit
            .filter(|&n| n > 0)
            .unwrap_or(self.config.search_limit);
        format::search_results(&self.search().search(options), limit)
    }

    /// Cards most like the one named exactly by `name`.
    pub fn similar_cards(&self, name: &str, limit: Option<usize>) -> String {
        let Some(target) = self.deck.get(name) else {
            return format!(
                "Card \"{name}\" not found. Please check the card name and try again.{}",
                self.suggestion(name)
            );
        };
        let limit = limit
            .filter(|&n| n > 0)
            .unwrap_or(self.config.similar_limit);
        let similar = self.search().find_similar(&target.id, limit);
        if similar.is_empty() {
            return format!("No similar cards found for \"{name}\".");
        }
        format::similar_cards(target, &similar)
    }

    /// Random cards, optionally drawn only from those matching `filters`.
    /// A zero `count` draws one card.
    pub fn random_cards(&self, count: usize, filters: &SearchOptions) -> String {
        let count = count.max(1);
        let cards = self.search().random_cards(count, filters, &self.ordinary);
        format::random_cards(&cards, count)
    }

    /// Analytics report over the loaded deck.
    pub fn analytics(&self, include_recommendations: bool) -> String {
        let report = CardAnalytics::new(self.deck.all_cards(), self.config.expected_deck_size)
            .report();
        format::analytics(&report, include_recommendations)
    }

    /// Counts by arcana, suit and element with the top keywords.
    pub fn statistics(&self) -> String {
        format::statistics(&self.search().statistics())
    }

    // -----------------------------------------------------------------------
    // Spreads and readings
    // -----------------------------------------------------------------------

    /// Every built-in spread.
    pub fn list_spreads(&self) -> String {
        format::spread_listing(&self.catalog)
    }

    /// Draw a reading for a catalog spread.
    ///
    /// An unknown `spread_type` is answered with a message and touches no
    /// session.
    pub fn perform_reading(
        &self,
        spread_type: &str,
        question: &str,
        session_id: Option<&str>,
    ) -> TarotResult<String> {
        let Some(spread) = self.catalog.get(spread_type) else {
            return Ok(format!(
                "Invalid spread type: {spread_type}. Use list_available_spreads to see valid options."
            ));
        };
        self.read(spread_type, spread, question, session_id)
    }

    /// Draw a reading for a validated custom spread.
    pub fn custom_reading(&self, request: &CustomSpreadRequest) -> TarotResult<String> {
        let spread = request.to_spread();
        self.read(
            &request.spread_type(),
            &spread,
            &request.question,
            request.session_id.as_deref(),
        )
    }

    /// Validate raw custom-spread arguments and read them. Validation
    /// failures are returned as their message.
    pub fn create_custom_spread(&self, args: &Value) -> TarotResult<String> {
        match CustomSpreadRequest::from_value(args) {
            Ok(request) => self.custom_reading(&request),
            Err(e) => Ok(e.to_string()),
        }
    }

    fn read(
        &self,
        spread_type: &str,
        spread: &Spread,
        question: &str,
        session_id: Option<&str>,
    ) -> TarotResult<String> {
        let session_id = session_id.filter(|s| !s.trim().is_empty());
        let reading = ReadingEngine::new(&self.deck, &self.secure).perform(
            spread_type,
            spread,
            question,
            session_id,
        )?;
        if let Some(id) = session_id {
            self.sessions.add_reading(id, reading.clone());
        }
        Ok(format::reading(&reading, spread))
    }

    /// Interpret cards chosen by the caller. The first unknown name aborts
    /// with a not-found message.
    pub fn interpret_combination(&self, selections: &[CardSelection], context: &str) -> String {
        let mut cards = Vec::with_capacity(selections.len());
        for selection in selections {
            let Some(card) = self.deck.find_card(&selection.name) else {
                return format!(
                    "Card \"{}\" not found. Use list_all_cards to see available cards.{}",
                    selection.name,
                    self.suggestion(&selection.name)
                );
            };
            cards.push(DrawnCard::new(card.clone(), selection.orientation));
        }
        format::combination(&cards, context, &combination_analysis(&cards))
    }

    // -----------------------------------------------------------------------
    // Sessions
    // -----------------------------------------------------------------------

    /// Open a new session.
    pub fn create_session(&self) -> Session {
        self.sessions.create_session()
    }

    /// Reading history of a session.
    pub fn session_readings(&self, session_id: &str) -> String {
        match self.sessions.get_session(session_id) {
            Some(session) => format::session_history(&session),
            None => format!(
                "Session \"{session_id}\" not found. Use create_session to start a new session."
            ),
        }
    }

    /// Evict idle sessions. Returns how many were removed.
    pub fn sweep_sessions(&self) -> usize {
        self.sessions.sweep()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Suit;
    use crate::error::TarotError;
    use crate::testing::fixture_deck;
    use serde_json::json;

    fn service() -> TarotService {
        TarotService::with_parts(TarotConfig::default(), fixture_deck(), SecureRandom::seeded(5))
    }

    fn builtin_service() -> TarotService {
        TarotService::with_parts(
            TarotConfig::default(),
            Deck::builtin().unwrap(),
            SecureRandom::seeded(5),
        )
    }

    #[test]
    fn unknown_card_suggests_closest() {
        let text = service().card_info("The Magican", Orientation::Upright);
        assert_eq!(
            text,
            "Card \"The Magican\" not found. Use the list_all_cards tool to see available cards. Did you mean \"The Magician\"?"
        );
        let plain = service().card_info("xyzzy", Orientation::Upright);
        assert!(plain.ends_with("to see available cards."));
    }

    #[test]
    fn card_info_by_partial_name() {
        let text = service().card_info("priestess", Orientation::Upright);
        assert!(text.starts_with("# The High Priestess (Upright)"));
    }

    #[test]
    fn invalid_spread_leaves_sessions_alone() {
        let svc = service();
        let session = svc.create_session();
        let text = svc
            .perform_reading("not_a_real_spread", "q", Some(&session.id))
            .unwrap();
        assert_eq!(
            text,
            "Invalid spread type: not_a_real_spread. Use list_available_spreads to see valid options."
        );
        assert!(svc.sessions().readings(&session.id).is_empty());
    }

    #[test]
    fn reading_recorded_in_session() {
        let svc = builtin_service();
        let session = svc.create_session();
        let text = svc
            .perform_reading("three_card", "What now?", Some(&session.id))
            .unwrap();
        assert!(text.starts_with("# Three Card Spread Reading\n\n**Question:** What now?\n"));
        assert!(text.contains("## Your Cards\n\n### 1. Past/Situation\n"));

        let readings = svc.sessions().readings(&session.id);
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].spread_type, "three_card");
        assert!(text.contains(&readings[0].id));

        let history = svc.session_readings(&session.id);
        assert!(history.contains("## 1. three_card"));
        assert!(history.contains("**Question:** What now?"));
    }

    #[test]
    fn unknown_session_still_returns_reading() {
        let svc = builtin_service();
        let text = svc
            .perform_reading("single_card", "Hello?", Some("session_0_missing"))
            .unwrap();
        assert!(text.starts_with("# Single Card Reading"));
        assert_eq!(svc.sessions().session_count(), 0);
        assert!(svc.session_readings("session_0_missing").contains("not found"));
    }

    #[test]
    fn spread_larger_than_deck_is_an_error() {
        let err = service().perform_reading("celtic_cross", "q", None).unwrap_err();
        assert!(matches!(err, TarotError::InvalidCount { requested: 10, available: 8 }));
    }

    #[test]
    fn custom_spread_validation_is_text() {
        let svc = service();
        let text = svc.create_custom_spread(&json!({"spreadName": "X"})).unwrap();
        assert_eq!(text, "Error: description is required and must be a string.");

        let ok = svc
            .create_custom_spread(&json!({
                "spreadName": "Two Paths",
                "description": "Compare two options",
                "positions": [{"name": "A", "meaning": "m1"}, {"name": "B", "meaning": "m2"}],
                "question": "Which way?"
            }))
            .unwrap();
        assert!(ok.starts_with("# Two Paths Reading\n\n"));
        assert!(ok.contains("### 1. A\n*m1*\n\n"));
        assert!(ok.contains("### 2. B\n*m2*\n\n"));
    }

    #[test]
    fn combination_names_first_unknown_card() {
        let svc = service();
        let text = svc.interpret_combination(
            &[
                CardSelection::new("The Fool", Orientation::Upright),
                CardSelection::new("Nobody", Orientation::Upright),
            ],
            "love",
        );
        assert!(text.starts_with("Card \"Nobody\" not found. Use list_all_cards"));
    }

    #[test]
    fn combination_reads_known_cards() {
        let text = service().interpret_combination(
            &[
                CardSelection::new("The Fool", Orientation::Upright),
                CardSelection::new("the magician", Orientation::Reversed),
            ],
            "A new venture",
        );
        assert!(text.starts_with(
            "# Card Combination Interpretation\n\n**Context:** A new venture\n\n## Cards in This Reading\n\n"
        ));
        assert!(text.contains(
            "2. **The Magician** (reversed)\n   *Keywords: manipulation, untapped talent*\n\n"
        ));
        assert!(text.contains("both The Fool and The Magician"));
    }

    #[test]
    fn similar_requires_exact_name() {
        let svc = service();
        assert!(svc
            .similar_cards("of cups", None)
            .starts_with("Card \"of cups\" not found. Please check the card name"));
        let text = svc.similar_cards("ace of cups", Some(2));
        assert!(text.starts_with("Cards similar to **Ace of Cups**:\n\n**Two of Cups**\n"));
        assert_eq!(text.matches("- General meaning:").count(), 2);
    }

    #[test]
    fn random_cards_respect_filters() {
        let svc = service();
        let text = svc.random_cards(5, &SearchOptions::default().suit(Suit::Cups));
        assert!(text.starts_with("2 Random Cards:\n\n"));
        assert!(!text.contains("The Fool"));
        assert!(svc.random_cards(0, &SearchOptions::default()).starts_with("Random Card:\n\n"));
    }

    #[test]
    fn search_uses_configured_default_limit() {
        let svc = TarotService::with_parts(
            TarotConfig::default().with_search_limit(1),
            fixture_deck(),
            SecureRandom::seeded(1),
        );
        let text = svc.search_cards(&SearchOptions::default().keyword("love"), None);
        assert!(text.contains("(showing top 1)"));
        let wider = svc.search_cards(&SearchOptions::default().keyword("love"), Some(10));
        assert!(!wider.contains("showing top"));
    }

    #[test]
    fn reports_render() {
        let svc = builtin_service();
        assert!(svc.analytics(true).contains("Database is in excellent condition"));
        assert!(svc.statistics().contains("- **Total Cards**: 78"));
        assert!(svc.list_spreads().contains("## Mirror of Truth (4 cards)"));
        assert!(svc.list_cards(CardCategory::MajorArcana).contains("**Total cards:** 22"));
    }
}
