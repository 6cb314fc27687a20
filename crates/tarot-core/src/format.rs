//! Markdown rendering of cards, readings, search results and reports.
//!
//! Every tool answers with text; this module owns its layout so the
//! protocol server and the CLI print the same thing.

use std::sync::Arc;

use crate::analytics::AnalyticsReport;
use crate::card::{Arcana, Card, CardCategory, MeaningField, Orientation, Suit};
use crate::reading::{DrawnCard, Reading};
use crate::search::{DeckStatistics, SearchResult};
use crate::session::Session;
use crate::spread::{Spread, SpreadCatalog};

const NOT_AVAILABLE: &str = "N/A";
const PREVIEW_CHARS: usize = 100;

fn suit_label(card: &Card) -> String {
    card.suit
        .map_or_else(|| NOT_AVAILABLE.to_string(), |s| s.to_string())
}

fn element_label(card: &Card) -> String {
    card.element
        .map_or_else(|| NOT_AVAILABLE.to_string(), |e| e.to_string())
}

fn joined(items: &[String]) -> String {
    items.join(", ")
}

// ---------------------------------------------------------------------------
// Cards
// ---------------------------------------------------------------------------

/// Full detail page for one card in one orientation.
pub fn card_info(card: &Card, orientation: Orientation) -> String {
    let heading = orientation.title();
    let mut out = format!("# {} ({heading})\n\n", card.name);

    out.push_str(&format!("**Arcana:** {}", card.arcana.label()));
    if let Some(suit) = card.suit {
        out.push_str(&format!(" - {}", suit.title()));
    }
    if let Some(number) = card.number {
        out.push_str(&format!(" ({number})"));
    }
    out.push_str("\n\n");

    out.push_str(&format!(
        "**Keywords:** {}\n\n",
        joined(card.keywords.get(orientation))
    ));
    out.push_str(&format!("**Description:** {}\n\n", card.description));

    out.push_str(&format!("## Meanings ({heading})\n\n"));
    let meanings = card.meanings.get(orientation);
    for field in MeaningField::ALL {
        out.push_str(&format!("**{}:** {}\n\n", field.label(), meanings.get(field)));
    }

    out.push_str("## Symbolism\n\n");
    let symbols: Vec<String> = card.symbolism.iter().map(|s| format!("• {s}")).collect();
    out.push_str(&symbols.join("\n"));
    out.push_str("\n\n");

    if let Some(element) = card.element {
        out.push_str(&format!("**Element:** {}\n", element.title()));
    }
    if let Some(astrology) = card.astrology.as_deref().filter(|a| !a.is_empty()) {
        out.push_str(&format!("**Astrology:** {astrology}\n"));
    }
    if let Some(numerology) = card.numerology.as_deref().filter(|n| !n.is_empty()) {
        out.push_str(&format!("**Numerology:** {numerology}\n"));
    }
    out
}

fn by_number(cards: &mut [&Arc<Card>]) {
    cards.sort_by_key(|c| c.number.unwrap_or(0));
}

/// Grouped listing of the deck, filtered by category.
pub fn card_listing(cards: &[Arc<Card>], category: CardCategory) -> String {
    let filtered: Vec<&Arc<Card>> = cards.iter().filter(|c| category.matches(c)).collect();

    let mut out = String::from("# Tarot Cards");
    if category != CardCategory::All {
        out.push_str(&format!(" - {}", category.title()));
    }
    out.push_str("\n\n");

    let mut majors: Vec<&Arc<Card>> = filtered
        .iter()
        .copied()
        .filter(|c| c.arcana == Arcana::Major)
        .collect();
    if !majors.is_empty() {
        by_number(&mut majors);
        out.push_str(&format!("## Major Arcana ({} cards)\n\n", majors.len()));
        for card in majors {
            let number = card.number.map(|n| format!(" ({n})")).unwrap_or_default();
            out.push_str(&format!(
                "• **{}**{number} - {}\n",
                card.name,
                card.keyword_summary(3)
            ));
        }
        out.push('\n');
    }

    for suit in Suit::ALL {
        let mut suited: Vec<&Arc<Card>> = filtered
            .iter()
            .copied()
            .filter(|c| c.suit == Some(suit))
            .collect();
        if suited.is_empty() {
            continue;
        }
        by_number(&mut suited);
        out.push_str(&format!("## {} ({} cards)\n\n", suit.title(), suited.len()));
        for card in suited {
            out.push_str(&format!("• **{}** - {}\n", card.name, card.keyword_summary(3)));
        }
        out.push('\n');
    }

    out.push_str(&format!("\n**Total cards:** {}\n", filtered.len()));
    out.push_str("\nUse the `get_card_info` tool with any card name to get detailed information.");
    out
}

/// Short block used by the random and similar card tools.
fn card_block(card: &Card, keywords: &str, meaning: &str) -> String {
    format!(
        "**{}**\n- Suit: {} | Element: {}\n- Keywords: {keywords}\n- General meaning: {meaning}\n\n",
        card.name,
        suit_label(card),
        element_label(card)
    )
}

/// Random cards with full upright keywords and general meaning.
///
/// The heading is singular when exactly one card was asked for.
pub fn random_cards(cards: &[Arc<Card>], requested: usize) -> String {
    if cards.is_empty() {
        return "No cards found matching your criteria.".to_string();
    }
    let mut out = if requested == 1 {
        "Random Card:\n\n".to_string()
    } else {
        format!("{} Random Cards:\n\n", cards.len())
    };
    for card in cards {
        out.push_str(&card_block(
            card,
            &joined(&card.keywords.upright),
            &card.meanings.upright.general,
        ));
    }
    out
}

/// Cards resembling `target`, each with a truncated meaning preview.
pub fn similar_cards(target: &Card, similar: &[Arc<Card>]) -> String {
    let mut out = format!("Cards similar to **{}**:\n\n", target.name);
    for card in similar {
        let preview: String = card
            .meanings
            .upright
            .general
            .chars()
            .take(PREVIEW_CHARS)
            .collect();
        out.push_str(&card_block(card, &card.keyword_summary(3), &format!("{preview}...")));
    }
    out
}

/// Ranked search hits, at most `limit` of them.
pub fn search_results(results: &[SearchResult], limit: usize) -> String {
    if results.is_empty() || limit == 0 {
        return "No cards found matching your search criteria.".to_string();
    }
    let mut out = format!("Found {} cards matching your search", results.len());
    if results.len() > limit {
        out.push_str(&format!(" (showing top {limit})"));
    }
    out.push_str(":\n\n");
    for result in results.iter().take(limit) {
        let card = &result.card;
        let fields: Vec<String> = result.matched_fields.iter().map(ToString::to_string).collect();
        out.push_str(&format!(
            "**{}** (Relevance: {})\n- Suit: {} | Element: {}\n- Matched fields: {}\n- Keywords: {}\n\n",
            card.name,
            result.relevance_score,
            suit_label(card),
            element_label(card),
            fields.join(", "),
            card.keyword_summary(3)
        ));
    }
    out
}

// ---------------------------------------------------------------------------
// Spreads and readings
// ---------------------------------------------------------------------------

/// Every catalog spread with its positions.
pub fn spread_listing(catalog: &SpreadCatalog) -> String {
    let mut out = String::from("# Available Tarot Spreads\n\n");
    for (_, spread) in catalog.all() {
        out.push_str(&format!(
            "## {} ({} cards)\n\n{}\n\n**Positions:**\n",
            spread.name,
            spread.card_count(),
            spread.description
        ));
        for (i, position) in spread.positions.iter().enumerate() {
            out.push_str(&format!("{}. **{}**: {}\n", i + 1, position.name, position.meaning));
        }
        out.push('\n');
    }
    out.push_str("Use the `perform_reading` tool with one of these spread types to get a reading.");
    out
}

fn keyword_line(drawn: &DrawnCard) -> String {
    format!("*Keywords: {}*", joined(drawn.keywords()))
}

/// A reading with its cards laid out by position, then the interpretation.
pub fn reading(reading: &Reading, spread: &Spread) -> String {
    let mut out = format!("# {} Reading\n\n", spread.name);
    out.push_str(&format!("**Question:** {}\n", reading.question));
    out.push_str(&format!(
        "**Date:** {}\n",
        reading.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push_str(&format!("**Reading ID:** {}\n\n", reading.id));
    out.push_str(&format!("*{}*\n\n", spread.description));

    out.push_str("## Your Cards\n\n");
    for (i, drawn) in reading.cards.iter().enumerate() {
        out.push_str(&format!(
            "### {}. {}\n",
            i + 1,
            drawn.position.as_deref().unwrap_or("General")
        ));
        if let Some(meaning) = &drawn.position_meaning {
            out.push_str(&format!("*{meaning}*\n\n"));
        }
        out.push_str(&format!(
            "**{}** ({})\n\n{}\n\n",
            drawn.card.name,
            drawn.orientation,
            keyword_line(drawn)
        ));
    }

    out.push_str("## Interpretation\n\n");
    out.push_str(&reading.interpretation);
    out
}

/// Cards chosen by the caller, their keywords, and the pattern analysis.
pub fn combination(cards: &[DrawnCard], context: &str, analysis: &str) -> String {
    let mut out = format!(
        "# Card Combination Interpretation\n\n**Context:** {context}\n\n## Cards in This Reading\n\n"
    );
    for (i, drawn) in cards.iter().enumerate() {
        out.push_str(&format!(
            "{}. **{}** ({})\n   {}\n\n",
            i + 1,
            drawn.card.name,
            drawn.orientation,
            keyword_line(drawn)
        ));
    }
    out.push_str("## Interpretation\n\n");
    out.push_str(analysis);
    out
}

/// Reading history of a session, oldest first.
pub fn session_history(session: &Session) -> String {
    if session.readings.is_empty() {
        return format!("Session {} has no readings yet.", session.id);
    }
    let mut out = format!("# Session {}\n\n", session.id);
    out.push_str(&format!(
        "**Created:** {}\n**Last Activity:** {}\n**Readings:** {}\n\n",
        session.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
        session.last_activity.format("%Y-%m-%d %H:%M:%S UTC"),
        session.readings.len()
    ));
    for (i, reading) in session.readings.iter().enumerate() {
        out.push_str(&format!(
            "## {}. {} ({})\n\n**Reading ID:** {}\n**Question:** {}\n\n",
            i + 1,
            reading.spread_type,
            reading.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            reading.id,
            reading.question
        ));
        for drawn in &reading.cards {
            out.push_str(&format!(
                "- {}: {} ({})\n",
                drawn.position.as_deref().unwrap_or("General"),
                drawn.card.name,
                drawn.orientation
            ));
        }
        out.push('\n');
    }
    out
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

fn distribution<K: std::fmt::Display>(out: &mut String, heading: &str, rows: &[(K, usize)]) {
    out.push_str(&format!("### {heading}\n"));
    for (key, count) in rows {
        out.push_str(&format!("- **{}**: {count} cards\n", capitalize(&key.to_string())));
    }
    out.push('\n');
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Counts by arcana, suit and element plus the most common keywords.
pub fn statistics(stats: &DeckStatistics) -> String {
    let mut out = String::from("# Tarot Deck Statistics\n\n");
    out.push_str(&format!(
        "- **Total Cards**: {}\n- **Major Arcana**: {} cards\n- **Minor Arcana**: {} cards\n\n",
        stats.total_cards, stats.major_arcana, stats.minor_arcana
    ));
    distribution(&mut out, "Suits", &stats.suits);
    distribution(&mut out, "Elements", &stats.elements);
    out.push_str("### Most Common Keywords\n");
    for (keyword, count) in &stats.most_common_keywords {
        out.push_str(&format!("- **{keyword}**: {count} times\n"));
    }
    out
}

/// The database analytics report.
pub fn analytics(report: &AnalyticsReport, include_recommendations: bool) -> String {
    let overview = &report.overview;
    let arcana_count = |arcana: Arcana| {
        overview
            .arcana
            .iter()
            .find(|(a, _)| *a == arcana)
            .map_or(0, |&(_, n)| n)
    };

    let mut out = String::from("# Tarot Database Analytics Report\n\n## Database Overview\n");
    out.push_str(&format!(
        "- **Total Cards**: {}\n- **Completion Rate**: {:.1}%\n- **Major Arcana**: {} cards\n- **Minor Arcana**: {} cards\n\n",
        overview.total_cards,
        overview.completion_rate,
        arcana_count(Arcana::Major),
        arcana_count(Arcana::Minor)
    ));
    distribution(&mut out, "Suits Distribution", &overview.suits);
    distribution(&mut out, "Elements Distribution", &overview.elements);

    let quality = &report.data_quality;
    out.push_str("## Data Quality\n");
    out.push_str(&format!(
        "- **Complete Cards**: {}/{}\n- **Average Keywords per Card**: {:.1}\n- **Average Symbols per Card**: {:.1}\n",
        quality.complete_cards, overview.total_cards, quality.average_keywords, quality.average_symbols
    ));
    if !quality.incomplete_cards.is_empty() {
        out.push_str(&format!(
            "- **Incomplete Cards**: {}\n",
            joined(&quality.incomplete_cards)
        ));
    }
    out.push('\n');

    let content = &report.content;
    out.push_str("## Content Analysis\n### Most Common Keywords\n");
    for share in content.most_common_keywords.iter().take(10) {
        out.push_str(&format!(
            "- **{}**: {} times ({:.1}%)\n",
            share.keyword, share.count, share.percentage
        ));
    }
    out.push('\n');

    let themes: Vec<String> = content
        .themes
        .iter()
        .filter(|&&(_, n)| n > 0)
        .map(|(theme, n)| format!("- **{}**: {n} cards\n", capitalize(theme)))
        .collect();
    if !themes.is_empty() {
        out.push_str("### Themes\n");
        out.push_str(&themes.concat());
        out.push('\n');
    }

    let lengths = &content.lengths;
    out.push_str(&format!(
        "### Text Length\n- **Average Description**: {:.0} characters\n- **Average Meaning**: {:.0} characters\n",
        lengths.average_description, lengths.average_meaning
    ));
    if let Some((name, len)) = &lengths.longest_description {
        out.push_str(&format!("- **Longest Description**: {name} ({len} characters)\n"));
    }
    if let Some((name, len)) = &lengths.shortest_description {
        out.push_str(&format!("- **Shortest Description**: {name} ({len} characters)\n"));
    }
    out.push('\n');

    if include_recommendations && !report.recommendations.is_empty() {
        out.push_str("## Recommendations\n");
        for recommendation in &report.recommendations {
            out.push_str(&format!("- {recommendation}\n"));
        }
        out.push('\n');
    }
    out
}
