//! The card store: an immutable, validated deck with name lookup and
//! secure random draws.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use strsim::jaro_winkler;

use crate::card::Card;
use crate::error::{TarotError, TarotResult};
use crate::random::SecureRandom;

/// Minimum similarity for a "did you mean" suggestion (0.0-1.0).
const FUZZY_THRESHOLD: f64 = 0.8;

/// The bundled Rider-Waite deck.
const BUILTIN_CARDS: &str = include_str!("../data/cards.json");

#[derive(Deserialize)]
struct DeckFile {
    cards: Vec<Card>,
}

/// A loaded deck. Read-only after construction and cheap to share.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Arc<Card>>,
    // Lowercased id and name -> position in `cards`.
    by_key: HashMap<String, usize>,
}

impl Deck {
    /// Build a deck from card records, validating ids and names.
    pub fn from_cards(cards: Vec<Card>) -> TarotResult<Self> {
        if cards.is_empty() {
            return Err(TarotError::DeckLoad("the deck contains no cards".to_string()));
        }

        let mut ids = HashSet::new();
        let mut names = HashSet::new();
        for card in &cards {
            if !ids.insert(card.id.as_str()) {
                return Err(TarotError::DeckLoad(format!("duplicate card id '{}'", card.id)));
            }
            if !names.insert(card.name.to_lowercase()) {
                return Err(TarotError::DeckLoad(format!(
                    "duplicate card name '{}'",
                    card.name
                )));
            }
        }

        let mut by_key = HashMap::with_capacity(cards.len() * 2);
        for (i, card) in cards.iter().enumerate() {
            by_key.insert(card.id.to_lowercase(), i);
            by_key.insert(card.name.to_lowercase(), i);
        }

        Ok(Self {
            cards: cards.into_iter().map(Arc::new).collect(),
            by_key,
        })
    }

    /// Parse a `{"cards": [...]}` document.
    pub fn from_json_str(json: &str) -> TarotResult<Self> {
        let file: DeckFile = serde_json::from_str(json)?;
        Self::from_cards(file.cards)
    }

    /// Load a deck from a JSON file on disk.
    pub fn load(path: &Path) -> TarotResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let deck = Self::from_json_str(&json)?;
        tracing::info!(path = %path.display(), cards = deck.len(), "loaded deck");
        Ok(deck)
    }

    /// The bundled 78-card deck.
    pub fn builtin() -> TarotResult<Self> {
        Self::from_json_str(BUILTIN_CARDS)
    }

    /// Number of cards.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the deck is empty. A validated deck never is.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Every card in load order.
    pub fn all_cards(&self) -> &[Arc<Card>] {
        &self.cards
    }

    /// Find a card by id or name, case-insensitively.
    ///
    /// An exact id or name match wins. Otherwise the first card (in load
    /// order) whose name contains the identifier is returned.
    pub fn find_card(&self, identifier: &str) -> Option<&Arc<Card>> {
        let needle = identifier.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        if let Some(&i) = self.by_key.get(&needle) {
            return self.cards.get(i);
        }
        self.cards
            .iter()
            .find(|card| card.name.to_lowercase().contains(&needle))
    }

    /// Exact, case-insensitive lookup by id or name. No substring fallback.
    pub fn get(&self, key: &str) -> Option<&Arc<Card>> {
        self.by_key
            .get(&key.trim().to_lowercase())
            .and_then(|&i| self.cards.get(i))
    }

    /// The card whose name is closest to `input`, if any is close enough
    /// to suggest.
    pub fn closest_name(&self, input: &str) -> Option<&Arc<Card>> {
        let input_lower = input.trim().to_lowercase();
        self.cards
            .iter()
            .map(|card| (card, jaro_winkler(&input_lower, &card.name.to_lowercase())))
            .filter(|&(_, score)| score >= FUZZY_THRESHOLD)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(card, _)| card)
    }

    /// One card chosen uniformly at random.
    pub fn random_card(&self, rng: &SecureRandom) -> Arc<Card> {
        Arc::clone(&self.cards[rng.index(self.cards.len())])
    }

    /// `count` distinct cards in shuffle order.
    ///
    /// Fails with [`TarotError::InvalidCount`] when `count` exceeds the deck.
    pub fn random_cards(&self, count: usize, rng: &SecureRandom) -> TarotResult<Vec<Arc<Card>>> {
        if count > self.cards.len() {
            return Err(TarotError::InvalidCount {
                requested: count,
                available: self.cards.len(),
            });
        }
        let mut shuffled = self.cards.clone();
        rng.shuffle(&mut shuffled);
        shuffled.truncate(count);
        tracing::debug!(count, "drew cards");
        Ok(shuffled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixture_deck;
    use proptest::prelude::*;

    #[test]
    fn builtin_deck_is_complete() {
        let deck = Deck::builtin().unwrap();
        assert_eq!(deck.len(), 78);
        let majors = deck.all_cards().iter().filter(|c| c.is_major()).count();
        assert_eq!(majors, 22);
    }

    #[test]
    fn builtin_fool_meanings() {
        let deck = Deck::builtin().unwrap();
        let fool = deck.find_card("The Fool").unwrap();
        assert!(fool.keywords.upright.iter().any(|k| k == "new beginnings"));
        assert!(fool.keywords.reversed.iter().any(|k| k == "recklessness"));
        assert!(fool.meanings.upright.is_complete());
        assert!(fool.meanings.reversed.is_complete());
    }

    #[test]
    fn find_by_id_name_and_substring() {
        let deck = fixture_deck();
        assert_eq!(deck.find_card("the_fool").unwrap().name, "The Fool");
        assert_eq!(deck.find_card("  THE FOOL ").unwrap().id, "the_fool");
        // First name containing the needle in load order.
        assert_eq!(deck.find_card("of cups").unwrap().id, "ace_of_cups");
        assert!(deck.find_card("nonexistent").is_none());
        assert!(deck.find_card("   ").is_none());
    }

    #[test]
    fn duplicate_names_rejected() {
        let json = r#"{"cards": [
            {"id": "a", "name": "The Sun", "arcana": "major"},
            {"id": "b", "name": "the sun", "arcana": "major"}
        ]}"#;
        let err = Deck::from_json_str(json).unwrap_err();
        assert!(matches!(err, TarotError::DeckLoad(_)));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let json = r#"{"cards": [
            {"id": "a", "name": "The Sun", "arcana": "major"},
            {"id": "a", "name": "The Moon", "arcana": "major"}
        ]}"#;
        assert!(matches!(
            Deck::from_json_str(json),
            Err(TarotError::DeckLoad(_))
        ));
    }

    #[test]
    fn empty_and_malformed_decks_rejected() {
        assert!(matches!(
            Deck::from_json_str(r#"{"cards": []}"#),
            Err(TarotError::DeckLoad(_))
        ));
        assert!(matches!(
            Deck::from_json_str(r#"{"deck": []}"#),
            Err(TarotError::Json(_))
        ));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cards.json");
        std::fs::write(
            &path,
            r#"{"cards": [{"id": "x", "name": "Card X", "arcana": "major", "number": 0}]}"#,
        )
        .unwrap();
        let deck = Deck::load(&path).unwrap();
        assert_eq!(deck.len(), 1);
        assert!(matches!(
            Deck::load(&dir.path().join("missing.json")),
            Err(TarotError::Io(_))
        ));
    }

    #[test]
    fn too_many_cards_is_invalid_count() {
        let deck = fixture_deck();
        let rng = SecureRandom::seeded(42);
        let err = deck.random_cards(deck.len() + 1, &rng).unwrap_err();
        assert!(matches!(
            err,
            TarotError::InvalidCount { requested, available } if requested == deck.len() + 1 && available == deck.len()
        ));
    }

    #[test]
    fn full_draw_is_a_permutation() {
        let deck = fixture_deck();
        let rng = SecureRandom::seeded(42);
        let drawn = deck.random_cards(deck.len(), &rng).unwrap();
        let mut ids: Vec<_> = drawn.iter().map(|c| c.id.clone()).collect();
        ids.sort();
        let mut expected: Vec<_> = deck.all_cards().iter().map(|c| c.id.clone()).collect();
        expected.sort();
        assert_eq!(ids, expected);
        assert!(deck.random_cards(0, &rng).unwrap().is_empty());
    }

    #[test]
    fn random_card_comes_from_deck() {
        let deck = fixture_deck();
        let rng = SecureRandom::seeded(5);
        for _ in 0..20 {
            let card = deck.random_card(&rng);
            assert!(deck.find_card(&card.id).is_some());
        }
    }

    proptest! {
        #[test]
        fn draws_are_distinct(count in 0usize..=78, seed in any::<u64>()) {
            let deck = Deck::builtin().unwrap();
            let rng = SecureRandom::seeded(seed);
            let drawn = deck.random_cards(count, &rng).unwrap();
            prop_assert_eq!(drawn.len(), count);
            let unique: HashSet<_> = drawn.iter().map(|c| c.id.as_str()).collect();
            prop_assert_eq!(unique.len(), count);
        }

        #[test]
        fn overdraw_always_fails(extra in 1usize..100) {
            let deck = Deck::builtin().unwrap();
            let rng = SecureRandom::seeded(1);
            let failed = matches!(
                deck.random_cards(78 + extra, &rng),
                Err(TarotError::InvalidCount { .. })
            );
            prop_assert!(failed);
        }
    }

    #[test]
    fn exact_lookup_skips_substrings() {
        let deck = fixture_deck();
        assert_eq!(deck.get("THE FOOL").unwrap().id, "the_fool");
        assert_eq!(deck.get("king_of_swords").unwrap().name, "King of Swords");
        assert!(deck.get("of cups").is_none());
    }

    #[test]
    fn misspelled_name_gets_suggestion() {
        let deck = fixture_deck();
        assert_eq!(deck.closest_name("The Magican").unwrap().id, "the_magician");
        assert_eq!(deck.closest_name("kng of sords").unwrap().id, "king_of_swords");
        assert!(deck.closest_name("zzzzzz").is_none());
    }

    #[test]
    fn every_card_found_by_its_name() {
        let deck = Deck::builtin().unwrap();
        for card in deck.all_cards() {
            assert_eq!(deck.find_card(&card.name).unwrap().id, card.id);
            assert_eq!(deck.find_card(&card.name.to_lowercase()).unwrap().id, card.id);
        }
    }
}
