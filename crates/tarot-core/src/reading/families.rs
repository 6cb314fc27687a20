//! Structural analyses for spreads with a known layout.
//!
//! Each analysis reads cards by position index, so it only runs when the
//! draw has exactly the number of cards its family expects.

use crate::spread::SpreadFamily;

use super::DrawnCard;
use super::patterns::similar_energy;

/// Analysis block for `family`, or empty when the card count does not fit.
pub(crate) fn analyze(family: SpreadFamily, cards: &[DrawnCard]) -> String {
    if cards.len() != family.expected_cards() {
        return String::new();
    }
    let mut out = match family {
        SpreadFamily::CelticCross => celtic_cross(cards),
        SpreadFamily::ThreeCard => three_card(cards),
        SpreadFamily::Relationship => relationship(cards),
        SpreadFamily::Career => career(cards),
        SpreadFamily::Spiritual => spiritual(cards),
        SpreadFamily::Chakra => chakra(cards),
        SpreadFamily::YearAhead => year_ahead(cards),
        SpreadFamily::VenusLove => venus_love(cards),
        SpreadFamily::TreeOfLife => tree_of_life(cards),
        SpreadFamily::Astrological => astrological(cards),
        SpreadFamily::Mandala => mandala(cards),
        SpreadFamily::Pentagram => pentagram(cards),
        SpreadFamily::MirrorOfTruth => mirror_of_truth(cards),
    };
    out.push('\n');
    out
}

fn upright_at(cards: &[DrawnCard], indices: &[usize]) -> usize {
    indices.iter().filter(|&&i| cards[i].is_upright()).count()
}

fn upright_in(cards: &[DrawnCard]) -> usize {
    cards.iter().filter(|c| c.is_upright()).count()
}

/// Pick the upright or reversed variant of a sentence.
fn either<'a>(card: &DrawnCard, upright: &'a str, reversed: &'a str) -> &'a str {
    if card.is_upright() { upright } else { reversed }
}

// ---------------------------------------------------------------------------
// Layouts
// ---------------------------------------------------------------------------

fn celtic_cross(cards: &[DrawnCard]) -> String {
    let (near_future, above, below, outcome) = (&cards[3], &cards[4], &cards[5], &cards[9]);
    let mut out = String::from("**Celtic Cross Analysis:**\n\n");

    out.push_str(&format!(
        "**Conscious vs Subconscious:** The {} above represents your conscious goals, while the {} below reveals your subconscious drives. ",
        above.card.name, below.card.name
    ));
    out.push_str(if above.orientation == below.orientation {
        "These are aligned, suggesting harmony between your conscious desires and unconscious motivations. "
    } else {
        "The different orientations suggest some tension between what you consciously want and what unconsciously drives you. "
    });

    out.push_str(&format!(
        "**Goal vs Outcome:** Your conscious goal ({}) ",
        above.card.name
    ));
    out.push_str(if similar_energy(above, outcome) {
        "aligns well with the likely outcome, suggesting you're on the right path. "
    } else {
        "differs from the projected outcome, indicating you may need to adjust your approach. "
    });

    out.push_str(&format!(
        "**Near Future Impact:** The {} in your near future will ",
        near_future.card.name
    ));
    out.push_str(either(
        near_future,
        "support your journey toward the final outcome. ",
        "present challenges that need to be navigated carefully to reach your desired outcome. ",
    ));
    out
}

fn three_card(cards: &[DrawnCard]) -> String {
    let (past, present, future) = (&cards[0], &cards[1], &cards[2]);
    let mut out = String::from("**Three Card Flow Analysis:**\n\n");
    out.push_str(&format!(
        "**The Journey:** From {} in the past, through {} in the present, to {} in the future, ",
        past.card.name, present.card.name, future.card.name
    ));
    let flow = (past.is_upright(), present.is_upright(), future.is_upright());
    out.push_str(match flow {
        (false, true, true) => {
            "shows a clear progression from difficulty to resolution and success. "
        }
        (true, false, true) => "indicates a temporary setback that will resolve positively. ",
        (true, true, true) => {
            "reveals a consistently positive trajectory with continued growth. "
        }
        _ => {
            "shows a complex journey requiring careful attention to the lessons each phase offers. "
        }
    });
    out
}

fn relationship(cards: &[DrawnCard]) -> String {
    let mut out = String::from("**Relationship Dynamics Analysis:**\n\n**Compatibility Assessment:** ");
    out.push_str(if cards[0].orientation == cards[1].orientation {
        "You and your partner are currently in similar emotional states, which can create harmony. "
    } else {
        "You and your partner are in different emotional phases, which requires understanding and patience. "
    });
    // You, partner, the relationship and what unites.
    out.push_str(if upright_at(cards, &[0, 1, 2, 3]) >= 3 {
        "The overall energy of the relationship is positive and supportive. "
    } else {
        "The relationship may need attention and conscious effort to improve dynamics. "
    });
    out
}

fn career(cards: &[DrawnCard]) -> String {
    let (skills, challenges, opportunities) = (&cards[1], &cards[2], &cards[3]);
    let mut out = String::from("**Career Path Analysis:**\n\n**Career Readiness:** ");
    out.push_str(if skills.is_upright() && opportunities.is_upright() {
        "You have strong skills and good opportunities ahead. This is a favorable time for career advancement. "
    } else if !challenges.is_upright() {
        "Previous obstacles are clearing, making way for new professional growth. "
    } else {
        "Focus on developing your skills and overcoming current challenges before pursuing new opportunities. "
    });
    out
}

fn spiritual(cards: &[DrawnCard]) -> String {
    let mut out = String::from("**Spiritual Development Analysis:**\n\n**Spiritual Progress:** ");
    out.push_str(either(
        &cards[0],
        "You are in a positive phase of spiritual growth and awareness. ",
        "You may be experiencing spiritual challenges or confusion that require inner work. ",
    ));
    if !cards[2].is_upright() {
        out.push_str("Previous spiritual blocks are dissolving, allowing for greater growth. ");
    }
    out
}

fn chakra(cards: &[DrawnCard]) -> String {
    let balance = upright_in(cards) as f64 / 7.0 * 100.0;
    let mut out = String::from("**Chakra Energy Analysis:**\n\n**Overall Energy Balance:** ");
    out.push_str(if balance >= 70.0 {
        "Your chakras are well-balanced with strong energy flow. "
    } else if balance >= 50.0 {
        "Your energy centers have moderate balance with some areas needing attention. "
    } else {
        "Several chakras need healing and rebalancing for optimal energy flow. "
    });

    // Root to solar plexus against throat to crown; the heart sits between.
    let lower = upright_in(&cards[0..3]);
    let upper = upright_in(&cards[4..7]);
    if lower > upper {
        out.push_str("Your grounding and physical energy centers are stronger than your spiritual centers. ");
    } else if upper > lower {
        out.push_str("Your spiritual and intuitive centers are more active than your grounding centers. ");
    }
    out
}

const QUARTERS: [&str; 4] = ["First Quarter", "Second Quarter", "Third Quarter", "Fourth Quarter"];

fn year_ahead(cards: &[DrawnCard]) -> String {
    let theme = &cards[0];
    let mut out = String::from("**Year Ahead Overview:**\n\n");
    out.push_str(&format!(
        "**Year Theme:** The {} sets the tone for your year, ",
        theme.card.name
    ));
    out.push_str(either(
        theme,
        "indicating a positive and growth-oriented period ahead. ",
        "suggesting a year of inner work and overcoming challenges. ",
    ));
    for (name, months) in QUARTERS.iter().zip(cards[1..].chunks(3)) {
        out.push_str(&format!("**{name}:** "));
        out.push_str(if upright_in(months) >= 2 {
            "A positive and productive period. "
        } else {
            "A time for patience and inner work. "
        });
    }
    out
}

fn venus_love(cards: &[DrawnCard]) -> String {
    let (current, self_love, attraction, blocks, future) =
        (&cards[0], &cards[1], &cards[2], &cards[3], &cards[6]);
    let mut out = String::from("**Venus Love Energy Analysis:**\n\n");
    out.push_str(&format!(
        "**Love Energy Flow:** Your current relationship energy ({}) ",
        current.card.name
    ));
    out.push_str(either(
        current,
        "shows positive romantic vibrations and openness to love. ",
        "suggests some healing or inner work is needed before fully opening to love. ",
    ));
    out.push_str(&format!("Your self-love foundation ({}) ", self_love.card.name));
    out.push_str(either(
        self_love,
        "indicates healthy self-worth that attracts genuine love. ",
        "reveals areas where self-compassion and self-acceptance need attention. ",
    ));
    out.push_str(&format!(
        "What attracts love to you ({}) works in harmony with overcoming blocks ({}) to create a path forward. ",
        attraction.card.name, blocks.card.name
    ));
    out.push_str(&format!("The future potential ({}) ", future.card.name));
    out.push_str(either(
        future,
        "promises beautiful developments in your love life. ",
        "suggests patience and continued inner work will lead to love. ",
    ));
    out
}

fn tree_of_life(cards: &[DrawnCard]) -> String {
    // Binah, Geburah, Hod against Chokmah, Chesed, Netzach.
    let severity = upright_at(cards, &[2, 4, 7]);
    let mercy = upright_at(cards, &[1, 3, 6]);
    let (kether, malkuth) = (&cards[0], &cards[9]);

    let mut out = String::from("**Tree of Life Spiritual Analysis:**\n\n**Pillar Balance:** ");
    out.push_str(if mercy > severity {
        "The Pillar of Mercy dominates, indicating expansion, growth, and positive energy. "
    } else if severity > mercy {
        "The Pillar of Severity is prominent, suggesting discipline, boundaries, and necessary restrictions. "
    } else {
        "The pillars are balanced, showing harmony between expansion and contraction. "
    });
    out.push_str(&format!(
        "**Divine Flow:** From Kether ({}) to Malkuth ({}), ",
        kether.card.name, malkuth.card.name
    ));
    out.push_str(if kether.orientation == malkuth.orientation {
        "there's alignment between your highest purpose and material manifestation. "
    } else {
        "there's a need to bridge the gap between spiritual ideals and earthly reality. "
    });
    out
}

/// House groups by element, with the life areas they cover.
const HOUSE_ELEMENTS: [(&str, [usize; 3]); 4] = [
    ("Fire (Identity/Creativity/Philosophy)", [0, 4, 8]),
    ("Earth (Resources/Work/Career)", [1, 5, 9]),
    ("Air (Communication/Partnerships/Community)", [2, 6, 10]),
    ("Water (Home/Transformation/Spirituality)", [3, 7, 11]),
];

fn astrological(cards: &[DrawnCard]) -> String {
    // Ties go to the earliest group.
    let mut strongest = HOUSE_ELEMENTS[0].0;
    let mut best = 0;
    for (name, houses) in &HOUSE_ELEMENTS {
        let count = upright_at(cards, houses);
        if count > best {
            strongest = name;
            best = count;
        }
    }
    let angular = upright_at(cards, &[0, 3, 6, 9]);

    let mut out = String::from("**Astrological Houses Analysis:**\n\n**Elemental Balance:** ");
    out.push_str(&format!(
        "{strongest} energy is strongest in your chart, indicating focus in these life areas. "
    ));
    out.push_str(&format!(
        "**Life Direction:** With {angular} out of 4 angular houses upright, "
    ));
    out.push_str(match angular {
        3.. => "you have strong momentum and clear direction in major life areas. ",
        2 => "you have moderate stability with some areas needing attention. ",
        _ => "focus on building stronger foundations in key life areas. ",
    });
    out
}

/// Opposing directions: north/south, east/west, northeast/southwest,
/// southeast/northwest.
const OPPOSITE_DIRECTIONS: [(usize, usize); 4] = [(1, 5), (3, 7), (2, 6), (4, 8)];

fn mandala(cards: &[DrawnCard]) -> String {
    let center = &cards[0];
    let mut out = String::from("**Mandala Wholeness Analysis:**\n\n");
    out.push_str(&format!("**Core Integration:** Your center ({}) ", center.card.name));
    out.push_str(either(
        center,
        "shows a strong, balanced core that can integrate the surrounding energies. ",
        "suggests the need for inner healing before achieving wholeness. ",
    ));

    let directions = upright_in(&cards[1..]);
    out.push_str(&format!(
        "**Directional Balance:** With {directions} out of 8 directions upright, "
    ));
    out.push_str(match directions {
        6.. => "your life energies are well-balanced and flowing harmoniously. ",
        4 | 5 => "you have good balance with some areas needing attention. ",
        _ => "focus on healing and balancing multiple life areas. ",
    });

    let balanced = OPPOSITE_DIRECTIONS
        .iter()
        .filter(|&&(a, b)| cards[a].orientation == cards[b].orientation)
        .count();
    out.push_str(&format!(
        "**Polarity Integration:** {balanced} out of 4 opposite pairs are balanced, "
    ));
    out.push_str(if balanced >= 3 {
        "showing excellent integration of opposing forces. "
    } else {
        "indicating opportunities to harmonize conflicting energies. "
    });
    out
}

/// Element points of the pentagram after spirit, with what an upright card
/// there contributes.
const PENTAGRAM_FLOW: [(usize, &str); 4] = [
    (1, "Clear thinking and communication support your goals. "),
    (2, "Passionate energy drives your actions. "),
    (3, "Practical foundations support manifestation. "),
    (4, "Emotional wisdom guides your intuition. "),
];

fn pentagram(cards: &[DrawnCard]) -> String {
    let spirit = &cards[0];
    let elements = upright_in(&cards[1..]);

    let mut out = String::from("**Pentagram Elemental Analysis:**\n\n");
    out.push_str(&format!(
        "**Elemental Harmony:** With {elements} out of 4 elements upright, "
    ));
    out.push_str(match elements {
        4 => "all elements are in perfect harmony, creating powerful manifestation energy. ",
        3 => "strong elemental balance with minor adjustments needed. ",
        2 => "moderate balance requiring attention to weaker elements. ",
        _ => "significant elemental imbalance requiring healing and rebalancing. ",
    });
    out.push_str(&format!("**Divine Connection:** Spirit ({}) ", spirit.card.name));
    out.push_str(either(
        spirit,
        "shows strong divine connection guiding your elemental balance. ",
        "suggests the need to strengthen your spiritual foundation. ",
    ));
    out.push_str("**Elemental Flow:** ");
    for (index, sentence) in PENTAGRAM_FLOW {
        if cards[index].is_upright() {
            out.push_str(sentence);
        }
    }
    out
}

struct Light {
    title: &'static str,
    lead: &'static str,
    upright: &'static str,
    reversed: &'static str,
}

const LIGHTS: [Light; 4] = [
    Light {
        title: "First Light - Illuminate Yourself",
        lead: "Your current emotional state and inner filters show: ",
        upright: "Your perception of the situation is relatively clear, your emotional state is stable, and you can view the problem objectively.",
        reversed: "Your perspective may be influenced by strong emotions, anxiety, or expectations, requiring inner calm to see the truth clearly.",
    },
    Light {
        title: "Second Light - Explore Their Heart",
        lead: "Their true intentions and inner state indicate: ",
        upright: "Their motivations are relatively positive and sincere, with good intentions or at least neutral intent behind their actions.",
        reversed: "They may have complex inner states, their true intentions might not align with surface behavior, or they themselves are confused.",
    },
    Light {
        title: "Third Light - Restore Original Truth",
        lead: "Stripping away all subjective emotions, the truth is: ",
        upright: "The situation itself is relatively simple and clear, you and the other person may have over-interpreted it. The facts are more direct than imagined.",
        reversed: "The situation does have complexity and hidden layers, requiring more time and information to fully understand.",
    },
    Light {
        title: "Fourth Light - Guide Future Direction",
        lead: "Based on understanding the truth, you should: ",
        upright: "Take positive and proactive action, now is a good time to clarify misunderstandings, improve relationships, or make decisions.",
        reversed: "Maintain patience and observation, don't rush into action, let time and more information reveal the best path forward.",
    },
];

fn mirror_of_truth(cards: &[DrawnCard]) -> String {
    let mut out = String::from("**Mirror of Truth - Four Beams of Light Analysis:**\n\n");
    for (light, drawn) in LIGHTS.iter().zip(cards) {
        out.push_str(&format!(
            "**{}:** {} ({})\n{}{}\n\n",
            light.title,
            drawn.card.name,
            drawn.orientation,
            light.lead,
            either(drawn, light.upright, light.reversed)
        ));
    }

    out.push_str("**Comprehensive Insights from Four Lights:**\n");
    out.push_str(if cards[0].orientation == cards[1].orientation {
        "Your perception and their intention are in similar energy states, indicating some synchronicity between you. "
    } else {
        "Your perception and their intention have energy differences, which may be the source of misunderstanding. "
    });
    out.push_str(if cards[2].orientation == cards[3].orientation {
        "The nature of the facts aligns with future guidance, indicating you can trust this direction. "
    } else {
        "The complexity of the facts requires flexibility and openness in your actions. "
    });

    let clear = upright_in(cards);
    out.push_str(&format!(
        "\n\n**Clarity of Truth:** {clear} out of 4 lights shine clearly, "
    ));
    out.push_str(match clear {
        4 => "all dimensions are clear, this is a moment of complete truth where decisive action can be taken.",
        3 => "most of the truth has been revealed, requiring only patience and understanding in one dimension.",
        2 => "truth is gradually emerging, requiring balance of information from different dimensions to make judgments.",
        1 => "currently only one dimension is relatively clear, more time is needed for other truths to surface.",
        _ => "all dimensions are still in fog, this is a period requiring great patience and inner calm.",
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Orientation;
    use crate::testing::fixture_deck;

    /// Cards from the fixture deck, cycling if more are needed.
    fn drawn(orientations: &[Orientation]) -> Vec<DrawnCard> {
        let deck = fixture_deck();
        orientations
            .iter()
            .enumerate()
            .map(|(i, &o)| {
                let card = deck.all_cards()[i % deck.len()].clone();
                DrawnCard::new(card, o)
            })
            .collect()
    }

    const U: Orientation = Orientation::Upright;
    const R: Orientation = Orientation::Reversed;

    #[test]
    fn wrong_count_yields_nothing() {
        assert_eq!(analyze(SpreadFamily::CelticCross, &drawn(&[U; 3])), "");
        assert_eq!(analyze(SpreadFamily::ThreeCard, &drawn(&[U; 4])), "");
    }

    #[test]
    fn three_card_progression() {
        let text = analyze(SpreadFamily::ThreeCard, &drawn(&[R, U, U]));
        assert!(text.starts_with("**Three Card Flow Analysis:**\n\n"));
        assert!(text.contains("From The Fool in the past, through The Magician in the present"));
        assert!(text.contains("from difficulty to resolution and success"));
        assert!(text.ends_with(" \n"));

        let setback = analyze(SpreadFamily::ThreeCard, &drawn(&[U, R, U]));
        assert!(setback.contains("temporary setback"));
        let complex = analyze(SpreadFamily::ThreeCard, &drawn(&[R, R, R]));
        assert!(complex.contains("complex journey"));
    }

    #[test]
    fn celtic_cross_compares_above_and_below() {
        let mut orientations = [U; 10];
        orientations[5] = R;
        let text = analyze(SpreadFamily::CelticCross, &drawn(&orientations));
        assert!(text.contains("The different orientations suggest some tension"));
        assert!(text.contains("support your journey toward the final outcome"));
    }

    #[test]
    fn chakra_balance_bands() {
        let text = analyze(SpreadFamily::Chakra, &drawn(&[U, U, U, U, U, R, R]));
        assert!(text.contains("well-balanced with strong energy flow"));
        assert!(text.contains("grounding and physical energy centers are stronger"));

        let text = analyze(SpreadFamily::Chakra, &drawn(&[R, R, R, U, U, U, U]));
        assert!(text.contains("moderate balance"));
        assert!(text.contains("spiritual and intuitive centers are more active"));
    }

    #[test]
    fn year_ahead_names_every_quarter() {
        let mut orientations = [U; 13];
        orientations[10] = R;
        orientations[11] = R;
        let text = analyze(SpreadFamily::YearAhead, &drawn(&orientations));
        assert!(text.contains("**First Quarter:** A positive and productive period."));
        assert!(text.contains("**Fourth Quarter:** A time for patience and inner work."));
    }

    #[test]
    fn astrological_ties_favor_fire() {
        let text = analyze(SpreadFamily::Astrological, &drawn(&[U; 12]));
        assert!(text.contains("Fire (Identity/Creativity/Philosophy) energy is strongest"));
        assert!(text.contains("With 4 out of 4 angular houses upright"));

        let mut orientations = [R; 12];
        orientations[3] = U;
        let text = analyze(SpreadFamily::Astrological, &drawn(&orientations));
        assert!(text.contains("Water (Home/Transformation/Spirituality) energy is strongest"));
        assert!(text.contains("focus on building stronger foundations"));
    }

    #[test]
    fn mandala_counts_balanced_pairs() {
        let text = analyze(SpreadFamily::Mandala, &drawn(&[U; 9]));
        assert!(text.contains("With 8 out of 8 directions upright"));
        assert!(text.contains("4 out of 4 opposite pairs are balanced"));
    }

    #[test]
    fn pentagram_lists_upright_elements() {
        let text = analyze(SpreadFamily::Pentagram, &drawn(&[R, U, R, U, R]));
        assert!(text.contains("With 2 out of 4 elements upright"));
        assert!(text.contains("Clear thinking and communication"));
        assert!(!text.contains("Passionate energy"));
        assert!(text.contains("Practical foundations"));
        assert!(text.contains("strengthen your spiritual foundation"));
    }

    #[test]
    fn mirror_of_truth_clarity() {
        let text = analyze(SpreadFamily::MirrorOfTruth, &drawn(&[U, U, U, R]));
        assert!(text.contains("**First Light - Illuminate Yourself:** The Fool (upright)\n"));
        assert!(text.contains("**Fourth Light - Guide Future Direction:** Ace of Cups (reversed)\n"));
        assert!(text.contains("3 out of 4 lights shine clearly"));
        assert!(text.contains("requires flexibility and openness"));
    }
}
