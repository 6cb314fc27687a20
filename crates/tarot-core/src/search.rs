//! Weighted multi-field card search, pairwise similarity, filtered random
//! sampling and deck statistics.

use std::fmt;
use std::sync::Arc;

use crate::analytics::tally;
use crate::card::{Arcana, Card, Element, MeaningField, Orientation, Suit};
use crate::random::OrdinaryRandom;

const SCORE_SUIT: u32 = 10;
const SCORE_ARCANA: u32 = 8;
const SCORE_ELEMENT: u32 = 8;
const SCORE_NUMBER: u32 = 10;
const SCORE_NAME: u32 = 15;
const SCORE_KEYWORDS: u32 = 12;
const SCORE_MEANING: u32 = 8;
const SCORE_SYMBOLISM: u32 = 6;
const SCORE_DESCRIPTION: u32 = 4;

/// Search criteria. Every set field contributes to the score independently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Free-text keyword, matched as a case-insensitive substring.
    pub keyword: Option<String>,
    /// Exact suit.
    pub suit: Option<Suit>,
    /// Exact arcana.
    pub arcana: Option<Arcana>,
    /// Exact element.
    pub element: Option<Element>,
    /// Exact card number.
    pub number: Option<u32>,
    /// Which keyword and meaning set the keyword is matched against.
    pub orientation: Orientation,
}

impl SearchOptions {
    /// Match a keyword.
    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        let keyword = keyword.into();
        self.keyword = (!keyword.trim().is_empty()).then_some(keyword);
        self
    }

    /// Match a suit.
    pub fn suit(mut self, suit: Suit) -> Self {
        self.suit = Some(suit);
        self
    }

    /// Match an arcana.
    pub fn arcana(mut self, arcana: Arcana) -> Self {
        self.arcana = Some(arcana);
        self
    }

    /// Match an element.
    pub fn element(mut self, element: Element) -> Self {
        self.element = Some(element);
        self
    }

    /// Match a card number.
    pub fn number(mut self, number: u32) -> Self {
        self.number = Some(number);
        self
    }

    /// Search the reversed or upright texts.
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Whether any criterion is set.
    pub fn has_criteria(&self) -> bool {
        self.keyword.is_some()
            || self.suit.is_some()
            || self.arcana.is_some()
            || self.element.is_some()
            || self.number.is_some()
    }
}

/// The part of a card a search matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchedField {
    /// Suit filter.
    Suit,
    /// Arcana filter.
    Arcana,
    /// Element filter.
    Element,
    /// Number filter.
    Number,
    /// Keyword found in the card name.
    Name,
    /// Keyword found in the keyword list.
    Keywords,
    /// Keyword found in one meaning text.
    Meaning(MeaningField),
    /// Keyword found in a symbol.
    Symbolism,
    /// Keyword found in the description.
    Description,
}

impl fmt::Display for MatchedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Suit => write!(f, "suit"),
            Self::Arcana => write!(f, "arcana"),
            Self::Element => write!(f, "element"),
            Self::Number => write!(f, "number"),
            Self::Name => write!(f, "name"),
            Self::Keywords => write!(f, "keywords"),
            Self::Meaning(field) => write!(f, "meaning_{}", field.key()),
            Self::Symbolism => write!(f, "symbolism"),
            Self::Description => write!(f, "description"),
        }
    }
}

/// A scored search hit.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The matching card.
    pub card: Arc<Card>,
    /// Sum of the weights of every matched field.
    pub relevance_score: u32,
    /// Matched fields in scoring order.
    pub matched_fields: Vec<MatchedField>,
}

/// Aggregate counts over a deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckStatistics {
    /// Number of cards.
    pub total_cards: usize,
    /// Major Arcana count.
    pub major_arcana: usize,
    /// Minor Arcana count.
    pub minor_arcana: usize,
    /// Cards per suit, in order of first appearance.
    pub suits: Vec<(Suit, usize)>,
    /// Cards per element, in order of first appearance.
    pub elements: Vec<(Element, usize)>,
    /// The ten most frequent keywords across both orientations.
    pub most_common_keywords: Vec<(String, usize)>,
}

/// Search and ranking over a slice of cards.
pub struct CardSearch<'a> {
    cards: &'a [Arc<Card>],
}

impl<'a> CardSearch<'a> {
    /// Search over these cards.
    pub fn new(cards: &'a [Arc<Card>]) -> Self {
        Self { cards }
    }

    /// Every card with a positive score, best first. Ties keep deck order.
    pub fn search(&self, options: &SearchOptions) -> Vec<SearchResult> {
        let mut results: Vec<SearchResult> = self
            .cards
            .iter()
            .filter_map(|card| evaluate(card, options))
            .collect();
        // Vec::sort_by is stable.
        results.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));
        tracing::debug!(hits = results.len(), "searched cards");
        results
    }

    /// Up to `limit` cards most similar to the card with id `card_id`.
    ///
    /// The target itself is never included. Unknown ids yield nothing.
    pub fn find_similar(&self, card_id: &str, limit: usize) -> Vec<Arc<Card>> {
        let Some(target) = self.cards.iter().find(|c| c.id == card_id) else {
            return Vec::new();
        };
        let mut scored: Vec<(u32, &Arc<Card>)> = self
            .cards
            .iter()
            .filter(|c| c.id != card_id)
            .map(|c| (similarity(target, c), c))
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, c)| Arc::clone(c))
            .collect()
    }

    /// A random subset of at most `count` cards.
    ///
    /// With criteria set, the pool is restricted to matching cards; without
    /// any, the whole deck is the pool.
    pub fn random_cards(
        &self,
        count: usize,
        filters: &SearchOptions,
        rng: &OrdinaryRandom,
    ) -> Vec<Arc<Card>> {
        let mut pool: Vec<Arc<Card>> = if filters.has_criteria() {
            self.search(filters).into_iter().map(|r| r.card).collect()
        } else {
            self.cards.to_vec()
        };
        rng.shuffle(&mut pool);
        pool.truncate(count);
        pool
    }

    /// Counts by arcana, suit and element plus the top ten keywords.
    pub fn statistics(&self) -> DeckStatistics {
        let mut keywords = tally(self.cards.iter().flat_map(|c| c.keywords.all().cloned()));
        keywords.sort_by(|a, b| b.1.cmp(&a.1));
        keywords.truncate(10);

        DeckStatistics {
            total_cards: self.cards.len(),
            major_arcana: self.cards.iter().filter(|c| c.is_major()).count(),
            minor_arcana: self.cards.iter().filter(|c| !c.is_major()).count(),
            suits: tally(self.cards.iter().filter_map(|c| c.suit)),
            elements: tally(self.cards.iter().filter_map(|c| c.element)),
            most_common_keywords: keywords,
        }
    }
}

fn evaluate(card: &Arc<Card>, options: &SearchOptions) -> Option<SearchResult> {
    let mut score = 0;
    let mut matched = Vec::new();
    let mut hit = |field: MatchedField, weight: u32| {
        score += weight;
        matched.push(field);
    };

    if options.suit.is_some() && card.suit == options.suit {
        hit(MatchedField::Suit, SCORE_SUIT);
    }
    if options.arcana == Some(card.arcana) {
        hit(MatchedField::Arcana, SCORE_ARCANA);
    }
    if options.element.is_some() && card.element == options.element {
        hit(MatchedField::Element, SCORE_ELEMENT);
    }
    if options.number.is_some() && card.number == options.number {
        hit(MatchedField::Number, SCORE_NUMBER);
    }

    if let Some(keyword) = &options.keyword {
        let needle = keyword.to_lowercase();
        let contains = |text: &str| text.to_lowercase().contains(&needle);
        let orientation = options.orientation;

        if contains(&card.name) {
            hit(MatchedField::Name, SCORE_NAME);
        }
        if card.keywords.get(orientation).iter().any(|k| contains(k)) {
            hit(MatchedField::Keywords, SCORE_KEYWORDS);
        }
        for (field, text) in card.meanings.get(orientation).iter() {
            if contains(text) {
                hit(MatchedField::Meaning(field), SCORE_MEANING);
            }
        }
        if card.symbolism.iter().any(|s| contains(s)) {
            hit(MatchedField::Symbolism, SCORE_SYMBOLISM);
        }
        if contains(&card.description) {
            hit(MatchedField::Description, SCORE_DESCRIPTION);
        }
    }

    (score > 0).then(|| SearchResult {
        card: Arc::clone(card),
        relevance_score: score,
        matched_fields: matched,
    })
}

/// Pairwise similarity between two cards.
///
/// Suit and element compare as optional values, so two suitless Major
/// Arcana cards count as sharing a suit.
pub fn similarity(a: &Card, b: &Card) -> u32 {
    let mut score = 0;
    if a.suit == b.suit {
        score += 3;
    }
    if a.arcana == b.arcana {
        score += 2;
    }
    if a.element == b.element {
        score += 3;
    }
    if let (Some(x), Some(y)) = (a.number, b.number) {
        match x.abs_diff(y) {
            0 | 1 => score += 2,
            2 => score += 1,
            _ => {}
        }
    }
    for ka in a.keywords.all() {
        for kb in b.keywords.all() {
            if ka.to_lowercase() == kb.to_lowercase() {
                score += 2;
            }
        }
    }
    score
}
