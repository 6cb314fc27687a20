//! Pattern analyses that apply to any set of drawn cards.

use crate::analytics::tally;
use crate::card::{Arcana, Element, Suit};

use super::DrawnCard;

/// Same orientation and either a shared suit or a shared arcana.
pub(crate) fn similar_energy(a: &DrawnCard, b: &DrawnCard) -> bool {
    if a.orientation != b.orientation {
        return false;
    }
    let same_suit = matches!((a.card.suit, b.card.suit), (Some(x), Some(y)) if x == y);
    same_suit || a.card.arcana == b.card.arcana
}

// ---------------------------------------------------------------------------
// Elements
// ---------------------------------------------------------------------------

fn element_dominance(element: Element) -> &'static str {
    match element {
        Element::Fire => {
            "The dominance of Fire energy suggests this is a time for action, creativity, and passionate pursuit of your goals. "
        }
        Element::Water => {
            "The prevalence of Water energy indicates this situation is deeply emotional and intuitive, requiring you to trust your feelings. "
        }
        Element::Air => {
            "The abundance of Air energy suggests this is primarily a mental matter requiring clear thinking, communication, and intellectual approach. "
        }
        Element::Earth => {
            "The strong Earth energy indicates this situation requires practical action, patience, and attention to material concerns. "
        }
    }
}

/// A dominant element (more than half) and any element that never appears.
pub(crate) fn elemental_balance(cards: &[DrawnCard]) -> String {
    let counts = Element::ALL.map(|element| {
        let n = cards
            .iter()
            .filter(|c| c.card.element == Some(element))
            .count();
        (element, n)
    });
    let total: usize = counts.iter().map(|&(_, n)| n).sum();
    if total == 0 {
        return String::new();
    }

    let mut out = String::new();
    // First of the largest counts, in fire, water, air, earth order.
    let (dominant, most) = counts
        .iter()
        .fold(counts[0], |best, &entry| if entry.1 > best.1 { entry } else { best });
    if most * 2 > total {
        out.push_str(element_dominance(dominant));
    }

    let missing: Vec<String> = counts
        .iter()
        .filter(|&&(_, n)| n == 0)
        .map(|(element, _)| element.to_string())
        .collect();
    if !missing.is_empty() {
        out.push_str(&format!(
            "The absence of {} energy suggests you may need to cultivate these qualities to achieve balance. ",
            missing.join(" and ")
        ));
    }
    out
}

// ---------------------------------------------------------------------------
// Suits
// ---------------------------------------------------------------------------

fn suit_dominance(suit: Suit) -> &'static str {
    match suit {
        Suit::Wands => {
            "The multiple Wands indicate this situation involves creative projects, career ambitions, and the need for decisive action. "
        }
        Suit::Cups => {
            "The presence of multiple Cups shows this is fundamentally about emotions, relationships, and spiritual matters. "
        }
        Suit::Swords => {
            "The dominance of Swords reveals this situation involves mental challenges, conflicts, and the need for clear communication. "
        }
        Suit::Pentacles => {
            "Multiple Pentacles emphasize material concerns, financial matters, and the need for practical, grounded action. "
        }
    }
}

/// The most frequent suit when it appears more than once. Ties go to the
/// suit seen first.
pub(crate) fn suit_pattern(cards: &[DrawnCard]) -> String {
    let counts = tally(cards.iter().filter_map(|c| c.card.suit));
    let Some(&(suit, most)) = counts
        .iter()
        .reduce(|best, entry| if entry.1 > best.1 { entry } else { best })
    else {
        return String::new();
    };
    if most <= 1 {
        return String::new();
    }
    suit_dominance(suit).to_string()
}

// ---------------------------------------------------------------------------
// Numbers
// ---------------------------------------------------------------------------

/// Themes of the numbers one through ten.
const NUMBER_THEMES: [&str; 10] = [
    "new beginnings and potential",
    "balance and partnerships",
    "creativity and growth",
    "stability and foundation",
    "change and challenge",
    "harmony and responsibility",
    "spiritual development and introspection",
    "material mastery and achievement",
    "completion and wisdom",
    "fulfillment and new cycles",
];

fn number_theme(number: u32) -> Option<&'static str> {
    let index = usize::try_from(number).ok()?.checked_sub(1)?;
    NUMBER_THEMES.get(index).copied()
}

/// Journey stage from the average number, plus themes of repeated numbers.
pub(crate) fn numerical_pattern(cards: &[DrawnCard]) -> String {
    let numbers: Vec<u32> = cards.iter().filter_map(|c| c.card.number).collect();
    if numbers.len() < 2 {
        return String::new();
    }

    let average = numbers.iter().map(|&n| f64::from(n)).sum::<f64>() / numbers.len() as f64;
    let mut out = String::from(if average <= 3.0 {
        "The low-numbered cards indicate this situation is in its beginning stages, full of potential and new energy. "
    } else if average <= 6.0 {
        "The mid-range numbers suggest this situation is in its development phase, requiring steady progress and patience. "
    } else if average <= 9.0 {
        "The higher numbers indicate this situation is approaching completion or mastery, requiring final efforts. "
    } else {
        "The presence of high numbers and court cards suggests mastery, completion, or the involvement of significant people. "
    });

    let mut repeated: Vec<u32> = tally(numbers)
        .into_iter()
        .filter(|&(_, n)| n > 1)
        .map(|(number, _)| number)
        .collect();
    repeated.sort_unstable();
    let themes: Vec<&str> = repeated.iter().filter_map(|&n| number_theme(n)).collect();
    // Court ranks repeat without a theme of their own.
    if !themes.is_empty() {
        let listed: Vec<String> = repeated.iter().map(u32::to_string).collect();
        out.push_str(&format!(
            "The repetition of {} emphasizes the themes of {}. ",
            listed.join(" and "),
            themes.join(", ")
        ));
    }
    out
}

// ---------------------------------------------------------------------------
// People and archetypes
// ---------------------------------------------------------------------------

pub(crate) fn court_pattern(cards: &[DrawnCard]) -> String {
    match cards.iter().filter(|c| c.card.is_court()).count() {
        0 => String::new(),
        1 => "The presence of a court card suggests that a specific person or personality aspect is significant to this situation. ".to_string(),
        n => format!(
            "The {n} court cards indicate that multiple people or personality aspects are influencing this situation. "
        ),
    }
}

/// Pairs of Major Arcana that carry a combined message.
const ARCHETYPE_PAIRS: [(&str, &str, &str); 2] = [
    (
        "the fool",
        "the magician",
        "The presence of both The Fool and The Magician suggests a powerful combination of new beginnings and the ability to manifest your desires. ",
    ),
    (
        "the high priestess",
        "the hierophant",
        "The High Priestess and Hierophant together indicate a balance between inner wisdom and traditional teachings. ",
    ),
];

/// Span of the Major Arcana drawn, and known archetype pairings.
pub(crate) fn major_arcana_pattern(cards: &[DrawnCard]) -> String {
    let majors: Vec<&DrawnCard> = cards
        .iter()
        .filter(|c| c.card.arcana == Arcana::Major)
        .collect();
    if majors.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    let numbers: Vec<u32> = majors.iter().filter_map(|c| c.card.number).collect();
    let span = match (numbers.iter().min(), numbers.iter().max()) {
        (Some(low), Some(high)) if numbers.len() > 1 => Some(high - low),
        _ => None,
    };
    match span {
        Some(s) if s > 10 => out.push_str("The wide span of Major Arcana cards suggests you're experiencing a significant life transformation that touches many aspects of your spiritual journey. "),
        Some(s) if s < 5 => out.push_str("The close grouping of Major Arcana cards indicates you're working through a specific phase of spiritual development. "),
        _ => {}
    }

    let names: Vec<String> = majors.iter().map(|c| c.card.name.to_lowercase()).collect();
    let has = |name: &str| names.iter().any(|n| n == name);
    for (first, second, sentence) in ARCHETYPE_PAIRS {
        if has(first) && has(second) {
            out.push_str(sentence);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Orientation;
    use crate::testing::fixture_deck;

    fn drawn(ids: &[&str]) -> Vec<DrawnCard> {
        let deck = fixture_deck();
        ids.iter()
            .map(|id| DrawnCard::new(deck.find_card(id).unwrap().clone(), Orientation::Upright))
            .collect()
    }

    #[test]
    fn water_dominates_and_earth_missing() {
        let cards = drawn(&["the_high_priestess", "ace_of_cups", "two_of_cups", "the_fool"]);
        let text = elemental_balance(&cards);
        assert!(text.starts_with("The prevalence of Water energy"));
        assert!(text.contains("The absence of fire and earth energy"));
    }

    #[test]
    fn even_split_has_no_dominant_element() {
        let cards = drawn(&["ace_of_wands", "ace_of_cups", "the_fool", "three_of_pentacles"]);
        assert_eq!(elemental_balance(&cards), "");
    }

    #[test]
    fn suit_needs_two_of_a_kind() {
        assert_eq!(suit_pattern(&drawn(&["ace_of_cups", "ace_of_wands"])), "");
        let text = suit_pattern(&drawn(&["ace_of_wands", "ace_of_cups", "two_of_cups"]));
        assert!(text.starts_with("The presence of multiple Cups"));
        assert_eq!(suit_pattern(&drawn(&["the_fool"])), "");
    }

    #[test]
    fn repeated_numbers_are_named() {
        let cards = drawn(&["the_magician", "ace_of_cups", "two_of_cups", "the_high_priestess"]);
        let text = numerical_pattern(&cards);
        assert!(text.starts_with("The low-numbered cards"));
        assert!(text.ends_with(
            "The repetition of 1 and 2 emphasizes the themes of new beginnings and potential, balance and partnerships. "
        ));
    }

    #[test]
    fn single_number_is_not_a_pattern() {
        assert_eq!(numerical_pattern(&drawn(&["ace_of_cups"])), "");
    }

    #[test]
    fn court_cards_counted() {
        assert_eq!(court_pattern(&drawn(&["the_fool"])), "");
        assert!(court_pattern(&drawn(&["king_of_swords"])).starts_with("The presence of a court card"));
    }

    #[test]
    fn fool_and_magician_pair() {
        let text = major_arcana_pattern(&drawn(&["the_fool", "the_magician"]));
        assert!(text.contains("close grouping"));
        assert!(text.contains("both The Fool and The Magician"));
        assert_eq!(major_arcana_pattern(&drawn(&["ace_of_cups"])), "");
    }

    #[test]
    fn similar_energy_by_suit_or_arcana() {
        let cards = drawn(&["ace_of_cups", "two_of_cups", "the_fool"]);
        assert!(similar_energy(&cards[0], &cards[1]));
        assert!(!similar_energy(&cards[0], &cards[2]));
        let reversed = DrawnCard::new(cards[1].card.clone(), Orientation::Reversed);
        assert!(!similar_energy(&cards[0], &reversed));
    }
}
