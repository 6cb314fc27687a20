//! Dataset analytics: distribution, data quality and content statistics.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use crate::card::{Arcana, Card, Element, Suit};

/// Value treated as missing content.
const PLACEHOLDER: &str = "(placeholder)";

/// Themes and their trigger words, in report order.
const THEMES: &[(&str, &[&str])] = &[
    (
        "love",
        &["love", "romance", "relationship", "partnership", "marriage", "attraction"],
    ),
    (
        "career",
        &["career", "work", "job", "profession", "business", "success"],
    ),
    (
        "money",
        &["money", "wealth", "financial", "prosperity", "abundance", "material"],
    ),
    (
        "health",
        &["health", "healing", "wellness", "recovery", "vitality", "energy"],
    ),
    (
        "spirituality",
        &["spiritual", "divine", "sacred", "enlightenment", "wisdom", "intuition"],
    ),
    (
        "conflict",
        &["conflict", "struggle", "challenge", "difficulty", "opposition", "tension"],
    ),
    (
        "growth",
        &["growth", "development", "progress", "advancement", "evolution", "learning"],
    ),
    (
        "creativity",
        &["creativity", "artistic", "inspiration", "imagination", "expression", "innovation"],
    ),
];

/// Count items keeping the order in which each first appeared.
pub(crate) fn tally<K: Eq + Hash + Clone>(items: impl IntoIterator<Item = K>) -> Vec<(K, usize)> {
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut counts: Vec<(K, usize)> = Vec::new();
    for item in items {
        match index.get(&item) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(item.clone(), counts.len());
                counts.push((item, 1));
            }
        }
    }
    counts
}

fn top(mut counts: Vec<(String, usize)>, n: usize) -> Vec<(String, usize)> {
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(n);
    counts
}

fn ratio(total: usize, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}

/// A card field checked for completeness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityField {
    /// Either keyword list is empty.
    Keywords,
    /// A meaning text is empty.
    Meanings,
    /// No symbols.
    Symbolism,
    /// Astrology missing or placeholder.
    Astrology,
    /// Numerology missing or placeholder.
    Numerology,
    /// Description missing or placeholder.
    Description,
}

impl fmt::Display for QualityField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Keywords => "keywords",
            Self::Meanings => "meanings",
            Self::Symbolism => "symbolism",
            Self::Astrology => "astrology",
            Self::Numerology => "numerology",
            Self::Description => "description",
        };
        f.write_str(name)
    }
}

/// Deck size and distributions.
#[derive(Debug, Clone)]
pub struct DatabaseOverview {
    /// Number of cards.
    pub total_cards: usize,
    /// Cards as a percentage of the expected deck size.
    pub completion_rate: f64,
    /// Cards per arcana, in order of first appearance.
    pub arcana: Vec<(Arcana, usize)>,
    /// Cards per suit, in order of first appearance.
    pub suits: Vec<(Suit, usize)>,
    /// Cards per element, in order of first appearance.
    pub elements: Vec<(Element, usize)>,
}

/// Completeness of the card records.
#[derive(Debug, Clone)]
pub struct DataQualityReport {
    /// Cards with every field present.
    pub complete_cards: usize,
    /// Names of cards missing at least one field.
    pub incomplete_cards: Vec<String>,
    /// Missing fields per incomplete card.
    pub missing_fields: Vec<(String, Vec<QualityField>)>,
    /// Keywords (both orientations) per card.
    pub average_keywords: f64,
    /// Symbols per card.
    pub average_symbols: f64,
}

/// A keyword with its share of all keyword occurrences.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordShare {
    /// The keyword.
    pub keyword: String,
    /// Occurrences across both orientations.
    pub count: usize,
    /// Percentage of all keyword occurrences.
    pub percentage: f64,
}

/// Text length statistics, counted in characters.
#[derive(Debug, Clone)]
pub struct LengthStatistics {
    /// Mean description length.
    pub average_description: f64,
    /// Mean of each card's average upright meaning length.
    pub average_meaning: f64,
    /// Card with the longest description.
    pub longest_description: Option<(String, usize)>,
    /// Card with the shortest description.
    pub shortest_description: Option<(String, usize)>,
}

/// Keyword, theme and length analysis.
#[derive(Debug, Clone)]
pub struct ContentAnalysis {
    /// Twenty most frequent keywords.
    pub most_common_keywords: Vec<KeywordShare>,
    /// Ten most frequent upright keywords.
    pub top_upright: Vec<(String, usize)>,
    /// Ten most frequent reversed keywords.
    pub top_reversed: Vec<(String, usize)>,
    /// Cards touching each theme, in order of first appearance.
    pub themes: Vec<(&'static str, usize)>,
    /// Description and meaning lengths.
    pub lengths: LengthStatistics,
}

/// The full analytics report.
#[derive(Debug, Clone)]
pub struct AnalyticsReport {
    /// Size and distributions.
    pub overview: DatabaseOverview,
    /// Completeness.
    pub data_quality: DataQualityReport,
    /// Keyword and content statistics.
    pub content: ContentAnalysis,
    /// Suggested improvements. Never empty.
    pub recommendations: Vec<String>,
}

/// Computes analytics over a set of cards.
pub struct CardAnalytics<'a> {
    cards: &'a [Arc<Card>],
    expected_deck_size: usize,
}

impl<'a> CardAnalytics<'a> {
    /// Analyse `cards` against a deck of `expected_deck_size`.
    pub fn new(cards: &'a [Arc<Card>], expected_deck_size: usize) -> Self {
        Self {
            cards,
            expected_deck_size: expected_deck_size.max(1),
        }
    }

    /// Build every section of the report.
    pub fn report(&self) -> AnalyticsReport {
        let overview = self.overview();
        let data_quality = self.data_quality();
        let content = self.content();
        let recommendations = recommendations(&overview, &data_quality, &content);
        AnalyticsReport {
            overview,
            data_quality,
            content,
            recommendations,
        }
    }

    /// Size and distributions.
    pub fn overview(&self) -> DatabaseOverview {
        DatabaseOverview {
            total_cards: self.cards.len(),
            completion_rate: self.cards.len() as f64 / self.expected_deck_size as f64 * 100.0,
            arcana: tally(self.cards.iter().map(|c| c.arcana)),
            suits: tally(self.cards.iter().filter_map(|c| c.suit)),
            elements: tally(self.cards.iter().filter_map(|c| c.element)),
        }
    }

    /// Completeness of each card.
    pub fn data_quality(&self) -> DataQualityReport {
        let mut incomplete_cards = Vec::new();
        let mut missing_fields = Vec::new();
        let mut total_keywords = 0;
        let mut total_symbols = 0;

        for card in self.cards {
            let missing = missing_fields_of(card);
            if !missing.contains(&QualityField::Keywords) {
                total_keywords += card.keywords.upright.len() + card.keywords.reversed.len();
            }
            total_symbols += card.symbolism.len();
            if !missing.is_empty() {
                let label = if card.name.is_empty() {
                    card.id.clone()
                } else {
                    card.name.clone()
                };
                incomplete_cards.push(label.clone());
                missing_fields.push((label, missing));
            }
        }

        DataQualityReport {
            complete_cards: self.cards.len() - incomplete_cards.len(),
            incomplete_cards,
            missing_fields,
            average_keywords: ratio(total_keywords, self.cards.len()),
            average_symbols: ratio(total_symbols, self.cards.len()),
        }
    }

    /// Keyword, theme and length statistics.
    pub fn content(&self) -> ContentAnalysis {
        let all = tally(self.cards.iter().flat_map(|c| c.keywords.all().cloned()));
        let total: usize = all.iter().map(|(_, n)| n).sum();
        let most_common_keywords = top(all, 20)
            .into_iter()
            .map(|(keyword, count)| KeywordShare {
                keyword,
                count,
                percentage: ratio(count * 100, total),
            })
            .collect();

        let upright = tally(self.cards.iter().flat_map(|c| c.keywords.upright.iter().cloned()));
        let reversed = tally(self.cards.iter().flat_map(|c| c.keywords.reversed.iter().cloned()));

        let themes = tally(self.cards.iter().flat_map(|c| themes_of(c)));

        let mut total_description = 0;
        let mut total_meaning = 0.0;
        let mut longest: Option<(String, usize)> = None;
        let mut shortest: Option<(String, usize)> = None;
        for card in self.cards {
            let len = card.description.chars().count();
            total_description += len;
            if longest.as_ref().is_none_or(|(_, l)| len > *l) {
                longest = Some((card.name.clone(), len));
            }
            if shortest.as_ref().is_none_or(|(_, l)| len < *l) {
                shortest = Some((card.name.clone(), len));
            }
            let meaning_chars: usize = card
                .meanings
                .upright
                .iter()
                .map(|(_, text)| text.chars().count())
                .sum();
            total_meaning += meaning_chars as f64 / 5.0;
        }

        let n = self.cards.len();
        ContentAnalysis {
            most_common_keywords,
            top_upright: top(upright, 10),
            top_reversed: top(reversed, 10),
            themes,
            lengths: LengthStatistics {
                average_description: ratio(total_description, n),
                average_meaning: if n == 0 { 0.0 } else { total_meaning / n as f64 },
                longest_description: longest,
                shortest_description: shortest,
            },
        }
    }
}

fn is_missing_text(value: Option<&str>) -> bool {
    match value {
        None => true,
        Some(s) => s.trim().is_empty() || s.trim() == PLACEHOLDER,
    }
}

fn missing_fields_of(card: &Card) -> Vec<QualityField> {
    let mut missing = Vec::new();
    if card.keywords.upright.is_empty() || card.keywords.reversed.is_empty() {
        missing.push(QualityField::Keywords);
    }
    if !card.meanings.upright.is_complete() || !card.meanings.reversed.is_complete() {
        missing.push(QualityField::Meanings);
    }
    if card.symbolism.is_empty() {
        missing.push(QualityField::Symbolism);
    }
    if is_missing_text(card.astrology.as_deref()) {
        missing.push(QualityField::Astrology);
    }
    if is_missing_text(card.numerology.as_deref()) {
        missing.push(QualityField::Numerology);
    }
    if is_missing_text(Some(&card.description)) {
        missing.push(QualityField::Description);
    }
    missing
}

/// Themes the card touches, each at most once.
fn themes_of(card: &Card) -> Vec<&'static str> {
    let mut parts: Vec<&str> = card.keywords.all().map(String::as_str).collect();
    parts.push(&card.description);
    parts.extend(card.meanings.upright.iter().map(|(_, t)| t));
    parts.extend(card.meanings.reversed.iter().map(|(_, t)| t));
    let text = parts.join(" ").to_lowercase();

    THEMES
        .iter()
        .filter(|(_, triggers)| triggers.iter().any(|t| text.contains(t)))
        .map(|&(theme, _)| theme)
        .collect()
}

fn recommendations(
    overview: &DatabaseOverview,
    quality: &DataQualityReport,
    content: &ContentAnalysis,
) -> Vec<String> {
    let mut out = Vec::new();
    if !quality.incomplete_cards.is_empty() {
        out.push(format!(
            "Complete data for {} incomplete cards",
            quality.incomplete_cards.len()
        ));
    }
    if quality.average_keywords < 8.0 {
        out.push("Consider adding more keywords per card for better searchability".to_string());
    }
    if quality.average_symbols < 4.0 {
        out.push("Add more symbolic interpretations to enhance card meanings".to_string());
    }
    if content.lengths.average_description < 100.0 {
        out.push("Consider expanding card descriptions for more detailed imagery".to_string());
    }
    if overview.completion_rate < 100.0 {
        out.push(format!(
            "Database is {:.1}% complete - finish remaining cards",
            overview.completion_rate
        ));
    }
    if out.is_empty() {
        out.push("Database is in excellent condition - no improvements needed!".to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::Deck;
    use crate::testing::fixture_deck;

    #[test]
    fn tally_keeps_first_appearance_order() {
        let counts = tally(["b", "a", "b", "c", "a", "b"]);
        assert_eq!(counts, [("b", 3), ("a", 2), ("c", 1)]);
    }

    #[test]
    fn builtin_deck_is_in_excellent_condition() {
        let deck = Deck::builtin().unwrap();
        let report = CardAnalytics::new(deck.all_cards(), 78).report();
        assert_eq!(report.overview.total_cards, 78);
        assert!((report.overview.completion_rate - 100.0).abs() < 1e-9);
        assert_eq!(report.data_quality.complete_cards, 78);
        assert!(report.data_quality.incomplete_cards.is_empty());
        assert!((report.data_quality.average_keywords - 10.0).abs() < 1e-9);
        assert_eq!(
            report.recommendations,
            ["Database is in excellent condition - no improvements needed!"]
        );
    }

    #[test]
    fn overview_distributions() {
        let deck = fixture_deck();
        let overview = CardAnalytics::new(deck.all_cards(), 78).overview();
        assert_eq!(overview.arcana, [(Arcana::Major, 3), (Arcana::Minor, 5)]);
        assert_eq!(overview.suits[0], (Suit::Cups, 2));
        assert_eq!(overview.elements[0], (Element::Air, 3));
        assert!((overview.completion_rate - 8.0 / 78.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn placeholder_and_missing_fields_flagged() {
        let mut cards = crate::testing::fixture_cards();
        cards[0].description = "(placeholder)".to_string();
        cards[0].astrology = None;
        cards[1].symbolism.clear();
        cards[1].meanings.reversed.health.clear();
        cards[2].keywords.reversed.clear();
        let deck = Deck::from_cards(cards).unwrap();
        let quality = CardAnalytics::new(deck.all_cards(), 78).data_quality();

        assert_eq!(quality.complete_cards, 5);
        assert_eq!(
            quality.incomplete_cards,
            ["The Fool", "The Magician", "The High Priestess"]
        );
        assert_eq!(
            quality.missing_fields[0].1,
            [QualityField::Astrology, QualityField::Description]
        );
        assert_eq!(
            quality.missing_fields[1].1,
            [QualityField::Meanings, QualityField::Symbolism]
        );
        assert_eq!(quality.missing_fields[2].1, [QualityField::Keywords]);
    }

    #[test]
    fn recommendations_for_sparse_deck() {
        let mut cards = crate::testing::fixture_cards();
        cards[0].numerology = Some("(placeholder)".to_string());
        let deck = Deck::from_cards(cards).unwrap();
        let report = CardAnalytics::new(deck.all_cards(), 78).report();
        let recs = &report.recommendations;
        assert_eq!(recs[0], "Complete data for 1 incomplete cards");
        // Fixture cards carry five keywords and two symbols each.
        assert!(recs.iter().any(|r| r.starts_with("Consider adding more keywords")));
        assert!(recs.iter().any(|r| r.starts_with("Add more symbolic")));
        assert!(recs.iter().any(|r| r == "Database is 10.3% complete - finish remaining cards"));
    }

    #[test]
    fn themes_counted_once_per_card() {
        let deck = fixture_deck();
        let content = CardAnalytics::new(deck.all_cards(), 78).content();
        let love = content.themes.iter().find(|(t, _)| *t == "love").map(|(_, n)| *n);
        // "love" keyword on two cards, "partnership" on one of them.
        assert_eq!(love, Some(2));
        let creativity = content
            .themes
            .iter()
            .find(|(t, _)| *t == "creativity")
            .map(|(_, n)| *n);
        assert_eq!(creativity, Some(1));
    }

    #[test]
    fn keyword_shares_and_lengths() {
        let deck = fixture_deck();
        let content = CardAnalytics::new(deck.all_cards(), 78).content();
        let top = &content.most_common_keywords[0];
        // 40 keyword occurrences; several appear twice.
        assert_eq!(top.count, 2);
        assert!((top.percentage - 5.0).abs() < 1e-9);
        assert!(content.top_upright.len() <= 10);
        let (longest, _) = content.lengths.longest_description.clone().unwrap();
        assert_eq!(longest, "The High Priestess");
        let (shortest, _) = content.lengths.shortest_description.clone().unwrap();
        assert_eq!(shortest, "The Fool");
    }

    #[test]
    fn empty_input_is_safe() {
        let report = CardAnalytics::new(&[], 78).report();
        assert_eq!(report.overview.total_cards, 0);
        assert_eq!(report.data_quality.average_keywords, 0.0);
        assert!(report.content.lengths.longest_description.is_none());
        assert!(!report.recommendations.is_empty());
    }
}
