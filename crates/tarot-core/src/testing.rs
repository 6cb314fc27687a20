//! Small hand-built decks for unit tests.

use crate::card::{Arcana, Card, Element, Keywords, MeaningSet, Meanings, Suit};
use crate::deck::Deck;

fn meaning_set(tag: &str) -> MeaningSet {
    MeaningSet {
        general: format!("{tag} general guidance."),
        love: format!("{tag} guidance for the heart."),
        career: format!("{tag} guidance for the job."),
        health: format!("{tag} guidance for the body."),
        spirituality: format!("{tag} guidance for the soul."),
    }
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn card(
    id: &str,
    name: &str,
    arcana: Arcana,
    suit: Option<Suit>,
    number: u32,
    element: Element,
    upright: &[&str],
    reversed: &[&str],
) -> Card {
    Card {
        id: id.to_string(),
        name: name.to_string(),
        arcana,
        suit,
        number: Some(number),
        keywords: Keywords {
            upright: upright.iter().map(|s| s.to_string()).collect(),
            reversed: reversed.iter().map(|s| s.to_string()).collect(),
        },
        meanings: Meanings {
            upright: meaning_set("Upright"),
            reversed: meaning_set("Reversed"),
        },
        symbolism: vec!["A white rose".to_string(), "An open sky".to_string()],
        element: Some(element),
        astrology: Some("Uranus".to_string()),
        numerology: Some(format!("{number}")),
        description: format!("The {name} card as painted in the classic deck."),
    }
}

/// Eight cards covering both arcana, all four suits and all elements.
pub(crate) fn fixture_cards() -> Vec<Card> {
    use Arcana::{Major, Minor};
    vec![
        card(
            "the_fool",
            "The Fool",
            Major,
            None,
            0,
            Element::Air,
            &["new beginnings", "innocence", "spontaneity"],
            &["recklessness", "naivety"],
        ),
        card(
            "the_magician",
            "The Magician",
            Major,
            None,
            1,
            Element::Air,
            &["manifestation", "power", "skill"],
            &["manipulation", "untapped talent"],
        ),
        card(
            "the_high_priestess",
            "The High Priestess",
            Major,
            None,
            2,
            Element::Water,
            &["intuition", "mystery", "inner voice"],
            &["secrets", "withdrawal"],
        ),
        card(
            "ace_of_cups",
            "Ace of Cups",
            Minor,
            Some(Suit::Cups),
            1,
            Element::Water,
            &["love", "new feelings", "intuition"],
            &["emotional loss", "blocked feelings"],
        ),
        card(
            "two_of_cups",
            "Two of Cups",
            Minor,
            Some(Suit::Cups),
            2,
            Element::Water,
            &["partnership", "love", "unity"],
            &["imbalance", "broken communication"],
        ),
        card(
            "ace_of_wands",
            "Ace of Wands",
            Minor,
            Some(Suit::Wands),
            1,
            Element::Fire,
            &["inspiration", "creation", "growth"],
            &["delays", "lack of motivation"],
        ),
        card(
            "king_of_swords",
            "King of Swords",
            Minor,
            Some(Suit::Swords),
            14,
            Element::Air,
            &["clarity", "authority", "truth"],
            &["manipulation", "cruelty"],
        ),
        card(
            "three_of_pentacles",
            "Three of Pentacles",
            Minor,
            Some(Suit::Pentacles),
            3,
            Element::Earth,
            &["teamwork", "collaboration", "craft"],
            &["disharmony", "poor work"],
        ),
    ]
}

pub(crate) fn fixture_deck() -> Deck {
    match Deck::from_cards(fixture_cards()) {
        Ok(deck) => deck,
        Err(e) => panic!("fixture deck is invalid: {e}"),
    }
}
