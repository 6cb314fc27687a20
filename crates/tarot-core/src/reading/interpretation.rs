//! Interpretation text for readings and free card combinations.

use crate::card::{Arcana, MeaningField};
use crate::spread::Spread;

use super::{DrawnCard, families, patterns};

/// Question words that pick a meaning field, checked in order.
const QUESTION_FOCUS: [(&[&str], MeaningField); 4] = [
    (&["love", "relationship", "romance"], MeaningField::Love),
    (&["career", "job", "work", "money"], MeaningField::Career),
    (&["health", "wellness", "body"], MeaningField::Health),
    (&["spiritual", "purpose", "meaning"], MeaningField::Spirituality),
];

/// Position words that pick a meaning field when the question does not.
const POSITION_FOCUS: [(&[&str], MeaningField); 2] = [
    (&["love", "relationship"], MeaningField::Love),
    (&["career", "work"], MeaningField::Career),
];

const CLOSING: &str = "\n\nTrust your intuition as you reflect on these insights and how they apply to your specific situation.";

fn focus(text: &str, table: &[(&[&str], MeaningField)]) -> Option<MeaningField> {
    let lower = text.to_lowercase();
    table
        .iter()
        .find(|(words, _)| words.iter().any(|w| lower.contains(w)))
        .map(|&(_, field)| field)
}

/// The meaning field used for a card.
///
/// The question decides first; the position name only matters when the
/// question names no topic.
pub fn meaning_field(question: &str, position: Option<&str>) -> MeaningField {
    field_for(focus(question, &QUESTION_FOCUS), position.unwrap_or("General"))
}

fn field_for(question_focus: Option<MeaningField>, position: &str) -> MeaningField {
    question_focus
        .or_else(|| focus(position, &POSITION_FOCUS))
        .unwrap_or(MeaningField::General)
}

/// Full interpretation of a reading: the question, each card in its
/// position, the spread's structural analysis and the overall picture.
pub fn interpret(cards: &[DrawnCard], question: &str, spread: &Spread) -> String {
    let mut out = format!(
        "This {} reading addresses your question: \"{question}\"\n\n",
        spread.name
    );

    let question_focus = focus(question, &QUESTION_FOCUS);
    for drawn in cards {
        let position = drawn.position.as_deref().unwrap_or("General");
        let field = field_for(question_focus, position);
        out.push_str(&format!(
            "**{position}**: {} ({})\n{}\n\n",
            drawn.card.name,
            drawn.orientation,
            drawn.meanings().get(field)
        ));
    }

    if let Some(family) = spread.family {
        out.push_str(&families::analyze(family, cards));
    }
    out.push_str(&overall(cards));
    out
}

fn overall(cards: &[DrawnCard]) -> String {
    let total = cards.len();
    let majors = cards
        .iter()
        .filter(|c| c.card.arcana == Arcana::Major)
        .count();
    let upright = cards.iter().filter(|c| c.is_upright()).count();

    let mut out = String::from("**Overall Interpretation:**\n\n");
    out.push_str(if majors * 2 > total {
        "This reading is heavily influenced by Major Arcana cards, indicating that significant spiritual forces, life lessons, and karmic influences are at work. The universe is guiding you through important transformations. "
    } else if majors == 0 {
        "This reading contains only Minor Arcana cards, suggesting that the situation is primarily within your control and relates to everyday matters and practical concerns. "
    } else {
        "The balance of Major and Minor Arcana cards suggests a blend of spiritual guidance and practical action is needed. "
    });

    let percent = if total == 0 {
        0.0
    } else {
        upright as f64 / total as f64 * 100.0
    };
    out.push_str(if percent >= 80.0 {
        "The predominance of upright cards indicates positive energy, clear direction, and favorable circumstances. You're aligned with the natural flow of events. "
    } else if percent >= 60.0 {
        "Most cards are upright, suggesting generally positive energy with some areas requiring attention or inner work. "
    } else if percent >= 40.0 {
        "The balance of upright and reversed cards indicates a mixed situation with both opportunities and challenges present. "
    } else if percent >= 20.0 {
        "The majority of reversed cards suggests internal blocks, delays, or the need for significant introspection and inner work. "
    } else {
        "The predominance of reversed cards indicates a time of deep inner transformation, spiritual crisis, or significant obstacles that require patience and self-reflection. "
    });

    out.push_str(&combination_analysis(cards));
    out
}

/// Pattern analysis shared by readings and card combinations: elements,
/// suits, numbers, court cards and Major Arcana archetypes, then a closing
/// line.
pub fn combination_analysis(cards: &[DrawnCard]) -> String {
    let mut out = patterns::elemental_balance(cards);
    out.push_str(&patterns::suit_pattern(cards));
    out.push_str(&patterns::numerical_pattern(cards));
    out.push_str(&patterns::court_pattern(cards));
    out.push_str(&patterns::major_arcana_pattern(cards));
    out.push_str(CLOSING);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Orientation;
    use crate::spread::{Position, SpreadCatalog};
    use crate::testing::fixture_deck;

    fn placed(id: &str, orientation: Orientation, position: &str) -> DrawnCard {
        let deck = fixture_deck();
        DrawnCard {
            position: Some(position.to_string()),
            position_meaning: Some(format!("{position} meaning")),
            ..DrawnCard::new(deck.find_card(id).unwrap().clone(), orientation)
        }
    }

    #[test]
    fn question_topic_beats_position() {
        assert_eq!(meaning_field("Will my job improve?", Some("Love Life")), MeaningField::Career);
        assert_eq!(meaning_field("What should I know?", Some("Love Life")), MeaningField::Love);
        assert_eq!(meaning_field("What should I know?", Some("Work")), MeaningField::Career);
        assert_eq!(meaning_field("What should I know?", Some("Past")), MeaningField::General);
        assert_eq!(meaning_field("What is my PURPOSE?", None), MeaningField::Spirituality);
    }

    #[test]
    fn love_question_uses_love_meanings() {
        let spread = SpreadCatalog::builtin().get("three_card").cloned().unwrap();
        let cards = vec![
            placed("the_fool", Orientation::Upright, "Past"),
            placed("ace_of_cups", Orientation::Reversed, "Present"),
            placed("two_of_cups", Orientation::Upright, "Future"),
        ];
        let text = interpret(&cards, "How is my love life?", &spread);
        assert!(text.starts_with(
            "This Three Card Spread reading addresses your question: \"How is my love life?\"\n\n"
        ));
        assert!(text.contains("**Past**: The Fool (upright)\nUpright guidance for the heart.\n\n"));
        assert!(text.contains("**Present**: Ace of Cups (reversed)\nReversed guidance for the heart.\n\n"));
        assert!(text.contains("**Three Card Flow Analysis:**"));
        assert!(text.contains("**Overall Interpretation:**\n\n"));
        assert!(text.ends_with(CLOSING));
    }

    #[test]
    fn custom_spread_has_no_family_block() {
        let spread = Spread::new(
            "Two Paths",
            "A fork",
            vec![Position::new("A", "m1"), Position::new("B", "m2")],
        );
        let cards = vec![
            placed("ace_of_wands", Orientation::Upright, "A"),
            placed("three_of_pentacles", Orientation::Upright, "B"),
        ];
        let text = interpret(&cards, "Which way?", &spread);
        assert!(!text.contains("Analysis:**"));
        assert!(text.contains("**A**: Ace of Wands (upright)\nUpright general guidance.\n\n"));
        assert!(text.contains("only Minor Arcana cards"));
        assert!(text.contains("The predominance of upright cards"));
    }

    #[test]
    fn mismatched_family_count_skips_analysis() {
        // "career" in the name, but not six cards.
        let spread = Spread::new("Career Snapshot", "Quick look", vec![Position::new("Now", "m")]);
        let cards = vec![placed("king_of_swords", Orientation::Reversed, "Now")];
        let text = interpret(&cards, "Anything?", &spread);
        assert!(!text.contains("**Career Path Analysis:**"));
        assert!(text.contains("The predominance of reversed cards"));
        assert!(text.contains("The presence of a court card"));
    }

    #[test]
    fn major_heavy_reading() {
        let spread = SpreadCatalog::builtin().get("three_card").cloned().unwrap();
        let cards = vec![
            placed("the_fool", Orientation::Upright, "Past"),
            placed("the_magician", Orientation::Upright, "Present"),
            placed("ace_of_cups", Orientation::Reversed, "Future"),
        ];
        let text = interpret(&cards, "General outlook", &spread);
        assert!(text.contains("heavily influenced by Major Arcana"));
        assert!(text.contains("Most cards are upright"));
        assert!(text.contains("both The Fool and The Magician"));
    }

    #[test]
    fn combination_analysis_always_closes() {
        assert_eq!(combination_analysis(&[]), CLOSING);
    }
}
