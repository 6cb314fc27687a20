//! Drawing readings and generating their interpretation.

mod families;
pub mod interpretation;
mod patterns;

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::card::{Card, MeaningSet, Orientation};
use crate::deck::Deck;
use crate::error::TarotResult;
use crate::random::SecureRandom;
use crate::spread::Spread;

pub use interpretation::{combination_analysis, interpret};

/// A card as it fell in a reading.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawnCard {
    /// The card drawn.
    pub card: Arc<Card>,
    /// Upright or reversed, sampled independently per card.
    pub orientation: Orientation,
    /// Name of the spread position the card fills.
    pub position: Option<String>,
    /// Meaning of that position.
    pub position_meaning: Option<String>,
}

impl DrawnCard {
    /// A card not bound to any position.
    pub fn new(card: Arc<Card>, orientation: Orientation) -> Self {
        Self {
            card,
            orientation,
            position: None,
            position_meaning: None,
        }
    }

    /// Whether the card lies upright.
    pub fn is_upright(&self) -> bool {
        self.orientation.is_upright()
    }

    /// Keywords for the drawn orientation.
    pub fn keywords(&self) -> &[String] {
        self.card.keywords.get(self.orientation)
    }

    /// Meanings for the drawn orientation.
    pub fn meanings(&self) -> &MeaningSet {
        self.card.meanings.get(self.orientation)
    }
}

/// A completed reading. Immutable once built.
#[derive(Debug, Clone)]
pub struct Reading {
    /// `reading_<unix-ms>_<base36>`.
    pub id: String,
    /// Catalog key or `custom_<slug>`.
    pub spread_type: String,
    /// The querent's question.
    pub question: String,
    /// Cards in position order.
    pub cards: Vec<DrawnCard>,
    /// Generated interpretation text.
    pub interpretation: String,
    /// When the reading was drawn.
    pub timestamp: DateTime<Utc>,
    /// Session the reading belongs to, if any.
    pub session_id: Option<String>,
}

/// Draws cards for spreads using the secure random source.
pub struct ReadingEngine<'a> {
    deck: &'a Deck,
    rng: &'a SecureRandom,
}

impl<'a> ReadingEngine<'a> {
    /// An engine drawing from `deck`.
    pub fn new(deck: &'a Deck, rng: &'a SecureRandom) -> Self {
        Self { deck, rng }
    }

    /// Draw one card per position and orient each independently.
    ///
    /// Card `i` of the draw fills position `i`.
    pub fn draw(&self, spread: &Spread) -> TarotResult<Vec<DrawnCard>> {
        let cards = self.deck.random_cards(spread.card_count(), self.rng)?;
        Ok(cards
            .into_iter()
            .zip(&spread.positions)
            .map(|(card, position)| DrawnCard {
                card,
                orientation: self.rng.orientation(),
                position: Some(position.name.clone()),
                position_meaning: Some(position.meaning.clone()),
            })
            .collect())
    }

    /// Draw and interpret a full reading.
    pub fn perform(
        &self,
        spread_type: &str,
        spread: &Spread,
        question: &str,
        session_id: Option<&str>,
    ) -> TarotResult<Reading> {
        let cards = self.draw(spread)?;
        let interpretation = interpret(&cards, question, spread);
        let reading = Reading {
            id: self.reading_id(),
            spread_type: spread_type.to_string(),
            question: question.to_string(),
            cards,
            interpretation,
            timestamp: Utc::now(),
            session_id: session_id.map(str::to_string),
        };
        tracing::debug!(id = %reading.id, spread = spread_type, cards = reading.cards.len(), "performed reading");
        Ok(reading)
    }

    fn reading_id(&self) -> String {
        format!(
            "reading_{}_{}",
            Utc::now().timestamp_millis(),
            self.rng.token()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TarotError;
    use crate::spread::{CustomSpreadRequest, Position, SpreadCatalog};
    use crate::testing::fixture_deck;

    #[test]
    fn celtic_cross_binds_ten_positions() {
        let deck = Deck::builtin().unwrap();
        let rng = SecureRandom::seeded(42);
        let catalog = SpreadCatalog::builtin();
        let spread = catalog.get("celtic_cross").unwrap();
        let reading = ReadingEngine::new(&deck, &rng)
            .perform("celtic_cross", spread, "What lies ahead?", None)
            .unwrap();

        assert_eq!(reading.cards.len(), 10);
        for (drawn, position) in reading.cards.iter().zip(&spread.positions) {
            assert_eq!(drawn.position.as_deref(), Some(position.name.as_str()));
            assert_eq!(drawn.position_meaning.as_deref(), Some(position.meaning.as_str()));
        }
        assert_eq!(reading.spread_type, "celtic_cross");
        assert!(reading.id.starts_with("reading_"));
        assert!(reading.interpretation.contains("**Celtic Cross Analysis:**"));
        assert!(reading.interpretation.contains("**Overall Interpretation:**"));
    }

    #[test]
    fn custom_spread_draws_in_position_order() {
        let deck = Deck::builtin().unwrap();
        let rng = SecureRandom::seeded(7);
        let request = CustomSpreadRequest::new(
            "Two Paths",
            "Compare options",
            vec![Position::new("A", "m1"), Position::new("B", "m2")],
            "Which way?",
            None,
        )
        .unwrap();
        let spread = request.to_spread();
        let reading = ReadingEngine::new(&deck, &rng)
            .perform(&request.spread_type(), &spread, &request.question, None)
            .unwrap();
        assert_eq!(reading.cards.len(), 2);
        assert_eq!(reading.cards[0].position.as_deref(), Some("A"));
        assert_eq!(reading.cards[1].position.as_deref(), Some("B"));
        assert_eq!(reading.spread_type, "custom_two_paths");
        assert_ne!(reading.cards[0].card.id, reading.cards[1].card.id);
    }

    #[test]
    fn oversized_spread_is_invalid_count() {
        let deck = fixture_deck();
        let rng = SecureRandom::seeded(1);
        let positions = (0..deck.len() + 1)
            .map(|i| Position::new(format!("P{i}"), "m"))
            .collect();
        let spread = Spread::new("Too Big", "More cards than the deck", positions);
        let err = ReadingEngine::new(&deck, &rng).draw(&spread).unwrap_err();
        assert!(matches!(err, TarotError::InvalidCount { requested: 9, available: 8 }));
    }

    #[test]
    fn session_id_recorded_on_reading() {
        let deck = fixture_deck();
        let rng = SecureRandom::seeded(3);
        let spread = SpreadCatalog::builtin().get("single_card").cloned().unwrap();
        let reading = ReadingEngine::new(&deck, &rng)
            .perform("single_card", &spread, "Today?", Some("session_1_x"))
            .unwrap();
        assert_eq!(reading.session_id.as_deref(), Some("session_1_x"));
        assert_eq!(reading.cards[0].position.as_deref(), Some("The Message"));
    }

    #[test]
    fn drawn_card_accessors_follow_orientation() {
        let deck = fixture_deck();
        let fool = Arc::clone(deck.find_card("the_fool").unwrap());
        let drawn = DrawnCard::new(fool, Orientation::Reversed);
        assert!(!drawn.is_upright());
        assert_eq!(drawn.keywords()[0], "recklessness");
        assert!(drawn.meanings().general.starts_with("Reversed"));
    }
}
