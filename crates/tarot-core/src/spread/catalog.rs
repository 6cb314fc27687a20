//! The built-in spread catalog.

use super::{Position, Spread};

struct SpreadDef {
    key: &'static str,
    name: &'static str,
    description: &'static str,
    positions: &'static [(&'static str, &'static str)],
}

const BUILTIN_SPREADS: &[SpreadDef] = &[
    SpreadDef {
        key: "single_card",
        name: "Single Card",
        description: "A simple one-card draw for quick insight or daily guidance",
        positions: &[
            ("The Message", "The main insight, guidance, or energy for your question"),
        ],
    },
    SpreadDef {
        key: "three_card",
        name: "Three Card Spread",
        description: "A versatile three-card spread that can represent past/present/future, situation/action/outcome, or mind/body/spirit",
        positions: &[
            ("Past/Situation", "What has led to this situation or the foundation of the matter"),
            ("Present/Action", "The current state or what action should be taken"),
            ("Future/Outcome", "The likely outcome or future development"),
        ],
    },
    SpreadDef {
        key: "celtic_cross",
        name: "Celtic Cross",
        description: "The most famous tarot spread, providing comprehensive insight into a situation with 10 cards",
        positions: &[
            ("Present Situation", "The heart of the matter, your current situation or state of mind"),
            ("Challenge/Cross", "The challenge you face or what crosses you in this situation"),
            ("Distant Past/Foundation", "The foundation of the situation, distant past influences"),
            ("Recent Past", "Recent events or influences that are now passing away"),
            ("Possible Outcome", "One possible outcome if things continue as they are"),
            ("Near Future", "What is approaching in the immediate future"),
            ("Your Approach", "Your approach to the situation, how you see yourself"),
            ("External Influences", "How others see you or external influences affecting the situation"),
            ("Hopes and Fears", "Your inner feelings, hopes, and fears about the situation"),
            ("Final Outcome", "The final outcome, the culmination of all influences"),
        ],
    },
    SpreadDef {
        key: "horseshoe",
        name: "Horseshoe Spread",
        description: "A 7-card spread that provides guidance on a specific situation, showing past influences, present circumstances, and future possibilities",
        positions: &[
            ("Past Influences", "Past events and influences that have led to the current situation"),
            ("Present Situation", "Your current circumstances and state of mind"),
            ("Hidden Influences", "Hidden factors or subconscious influences affecting the situation"),
            ("Obstacles", "Challenges or obstacles you may face"),
            ("External Influences", "Outside influences, other people's attitudes, or environmental factors"),
            ("Advice", "What you should do or the best approach to take"),
            ("Likely Outcome", "The most probable outcome if you follow the advice given"),
        ],
    },
    SpreadDef {
        key: "relationship_cross",
        name: "Relationship Cross",
        description: "A 7-card spread specifically designed for examining relationships, whether romantic, friendship, or family",
        positions: &[
            ("You", "Your role, feelings, and contribution to the relationship"),
            ("Your Partner", "Their role, feelings, and contribution to the relationship"),
            ("The Relationship", "The current state and dynamic of the relationship itself"),
            ("What Unites You", "Common ground, shared values, and what brings you together"),
            ("What Divides You", "Differences, conflicts, and what creates tension"),
            ("Advice", "Guidance for improving and nurturing the relationship"),
            ("Future Potential", "Where the relationship is heading and its potential outcome"),
        ],
    },
    SpreadDef {
        key: "career_path",
        name: "Career Path Spread",
        description: "A 6-card spread for career guidance, exploring your professional journey and opportunities",
        positions: &[
            ("Current Career Situation", "Your present professional circumstances and feelings about work"),
            ("Your Skills and Talents", "Your natural abilities and developed skills that serve your career"),
            ("Career Challenges", "Obstacles or difficulties you face in your professional life"),
            ("Hidden Opportunities", "Unseen possibilities or potential career paths to explore"),
            ("Action to Take", "Specific steps or approaches to advance your career"),
            ("Career Outcome", "The likely result of following the guidance provided"),
        ],
    },
    SpreadDef {
        key: "decision_making",
        name: "Decision Making Spread",
        description: "A 5-card spread to help you make important decisions by examining all aspects of your choices",
        positions: &[
            ("The Situation", "The current circumstances requiring a decision"),
            ("Option A", "The first choice and its potential consequences"),
            ("Option B", "The second choice and its potential consequences"),
            ("What You Need to Know", "Hidden factors or important information to consider"),
            ("Recommended Path", "The best course of action based on all factors"),
        ],
    },
    SpreadDef {
        key: "spiritual_guidance",
        name: "Spiritual Guidance Spread",
        description: "A 6-card spread for spiritual development and connecting with your higher self",
        positions: &[
            ("Your Spiritual State", "Your current spiritual condition and level of awareness"),
            ("Spiritual Lessons", "What the universe is trying to teach you right now"),
            ("Blocks to Growth", "What is hindering your spiritual development"),
            ("Spiritual Gifts", "Your natural spiritual abilities and intuitive talents"),
            ("Guidance from Above", "Messages from your higher self or spiritual guides"),
            ("Next Steps", "How to advance on your spiritual journey"),
        ],
    },
    SpreadDef {
        key: "year_ahead",
        name: "Year Ahead Spread",
        description: "A 13-card spread providing insights for the coming year, with one card for each month plus an overall theme",
        positions: &[
            ("Overall Theme", "The main theme and energy for the entire year"),
            ("January", "What to expect and focus on in January"),
            ("February", "What to expect and focus on in February"),
            ("March", "What to expect and focus on in March"),
            ("April", "What to expect and focus on in April"),
            ("May", "What to expect and focus on in May"),
            ("June", "What to expect and focus on in June"),
            ("July", "What to expect and focus on in July"),
            ("August", "What to expect and focus on in August"),
            ("September", "What to expect and focus on in September"),
            ("October", "What to expect and focus on in October"),
            ("November", "What to expect and focus on in November"),
            ("December", "What to expect and focus on in December"),
        ],
    },
    SpreadDef {
        key: "chakra_alignment",
        name: "Chakra Alignment Spread",
        description: "A 7-card spread examining the energy centers of your body for healing and balance",
        positions: &[
            ("Root Chakra", "Your foundation, security, and connection to the physical world"),
            ("Sacral Chakra", "Your creativity, sexuality, and emotional expression"),
            ("Solar Plexus Chakra", "Your personal power, confidence, and sense of self"),
            ("Heart Chakra", "Your capacity for love, compassion, and connection"),
            ("Throat Chakra", "Your communication, truth, and authentic expression"),
            ("Third Eye Chakra", "Your intuition, wisdom, and spiritual insight"),
            ("Crown Chakra", "Your connection to the divine and higher consciousness"),
        ],
    },
    SpreadDef {
        key: "shadow_work",
        name: "Shadow Work Spread",
        description: "A 5-card spread for exploring and integrating your shadow self for personal growth",
        positions: &[
            ("Your Shadow", "The hidden or repressed aspects of yourself"),
            ("How It Manifests", "How your shadow shows up in your life and relationships"),
            ("The Gift Within", "The positive potential hidden within your shadow"),
            ("Integration Process", "How to acknowledge and integrate this aspect of yourself"),
            ("Transformation", "The growth and healing that comes from shadow work"),
        ],
    },
    SpreadDef {
        key: "venus_love",
        name: "Venus Love Spread",
        description: "A 7-card spread exploring love, relationships, self-worth, and romantic potential through the energy of Venus",
        positions: &[
            ("Your Current Relationship Energy", "Your present state in love and relationships"),
            ("Self-Love and Self-Worth", "How you value and care for yourself"),
            ("What Attracts Love to You", "Your magnetic qualities and what draws love into your life"),
            ("Blocks to Receiving Love", "What prevents you from fully receiving and accepting love"),
            ("How to Enhance Relationships", "Actions to improve your current or future relationships"),
            ("Hidden Desires of the Heart", "Your deepest romantic and emotional needs"),
            ("Future Potential in Love", "What the future holds for your romantic life"),
        ],
    },
    SpreadDef {
        key: "tree_of_life",
        name: "Tree of Life Spread",
        description: "A 10-card spread based on the Kabbalistic Tree of Life, providing deep spiritual insights and life guidance",
        positions: &[
            ("Kether (Crown)", "Divine will, highest purpose, and spiritual connection"),
            ("Chokmah (Wisdom)", "Creative force, inspiration, and dynamic energy"),
            ("Binah (Understanding)", "Form, structure, and receptive wisdom"),
            ("Chesed (Mercy)", "Love, compassion, and expansion"),
            ("Geburah (Severity)", "Strength, discipline, and necessary boundaries"),
            ("Tiphareth (Beauty)", "Balance, harmony, and integration of opposites"),
            ("Netzach (Victory)", "Emotions, desires, and artistic expression"),
            ("Hod (Splendor)", "Intellect, communication, and analytical thinking"),
            ("Yesod (Foundation)", "Subconscious, dreams, and psychic impressions"),
            ("Malkuth (Kingdom)", "Physical manifestation and material world results"),
        ],
    },
    SpreadDef {
        key: "astrological_houses",
        name: "Astrological Houses Spread",
        description: "A 12-card spread representing the twelve astrological houses, providing comprehensive life insights",
        positions: &[
            ("1st House - Self and Identity", "Your personality, appearance, and how others see you"),
            ("2nd House - Values and Resources", "Money, possessions, self-worth, and personal values"),
            ("3rd House - Communication", "Communication, learning, siblings, and short journeys"),
            ("4th House - Home and Family", "Home, family, roots, and emotional foundation"),
            ("5th House - Creativity and Romance", "Creativity, children, romance, and self-expression"),
            ("6th House - Work and Health", "Daily work, health, service, and routine"),
            ("7th House - Partnerships", "Marriage, business partnerships, and open enemies"),
            ("8th House - Transformation", "Shared resources, transformation, and hidden matters"),
            ("9th House - Philosophy", "Higher learning, philosophy, travel, and spirituality"),
            ("10th House - Career and Reputation", "Career, reputation, public image, and life direction"),
            ("11th House - Friends and Aspirations", "Friends, groups, hopes, and future aspirations"),
            ("12th House - Spirituality and Hidden", "Spirituality, hidden enemies, and subconscious patterns"),
        ],
    },
    SpreadDef {
        key: "mandala",
        name: "Mandala Spread",
        description: "A 9-card circular spread representing wholeness and the journey to self-discovery",
        positions: &[
            ("Center - Core Self", "Your essential nature and current spiritual center"),
            ("North - Spiritual Guidance", "Divine guidance and higher wisdom available to you"),
            ("Northeast - Mental Clarity", "Thoughts, ideas, and mental processes that need attention"),
            ("East - New Beginnings", "Fresh starts and opportunities on the horizon"),
            ("Southeast - Relationships", "Your connections with others and social dynamics"),
            ("South - Passion and Creativity", "Your creative fire and what energizes you"),
            ("Southwest - Healing and Release", "What needs to be healed or released from your life"),
            ("West - Intuition and Emotions", "Your emotional landscape and intuitive insights"),
            ("Northwest - Wisdom and Knowledge", "Lessons learned and wisdom gained from experience"),
        ],
    },
    SpreadDef {
        key: "pentagram",
        name: "Pentagram Spread",
        description: "A 5-card spread based on the five elements, exploring balance and spiritual harmony",
        positions: &[
            ("Spirit (Top)", "Divine guidance and your highest spiritual purpose"),
            ("Air (Upper Right)", "Thoughts, communication, and intellectual matters"),
            ("Fire (Lower Right)", "Passion, action, and creative energy"),
            ("Earth (Lower Left)", "Material world, stability, and practical concerns"),
            ("Water (Upper Left)", "Emotions, intuition, and subconscious influences"),
        ],
    },
    SpreadDef {
        key: "mirror_of_truth",
        name: "Mirror of Truth",
        description: "A 4-card spread designed to clarify relationship confusion through four beams of light: illuminating your perspective, exploring their intentions, revealing objective truth, and guiding future direction",
        positions: &[
            ("First Light: Illuminate Yourself", "Your perspective - how your emotions, inner filters, anxieties, fears, or expectations influence your understanding of the situation"),
            ("Second Light: Explore Their Heart", "Their intentions - looking beyond surface behavior to explore their true motivations, thoughts, and inner state"),
            ("Third Light: Restore Original Truth", "Objective facts - stripping away emotions and subjective judgments to present the most neutral and authentic picture of what happened"),
            ("Fourth Light: Guide Future Direction", "Influence and guidance - based on understanding the truth, pointing you toward the direction to move forward and actions to take"),
        ],
    },
];

/// Read-only table of spread types keyed by identifier.
#[derive(Debug, Clone)]
pub struct SpreadCatalog {
    spreads: Vec<(&'static str, Spread)>,
}

impl Default for SpreadCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SpreadCatalog {
    /// The standard seventeen spreads.
    pub fn builtin() -> Self {
        let spreads = BUILTIN_SPREADS
            .iter()
            .map(|def| {
                let positions = def
                    .positions
                    .iter()
                    .map(|&(name, meaning)| Position::new(name, meaning))
                    .collect();
                (def.key, Spread::new(def.name, def.description, positions))
            })
            .collect();
        Self { spreads }
    }

    /// Whether `key` names a catalog spread.
    pub fn is_valid_spread_type(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Look up a spread by identifier.
    pub fn get(&self, key: &str) -> Option<&Spread> {
        self.spreads
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, spread)| spread)
    }

    /// Every spread in catalog order, with its identifier.
    pub fn all(&self) -> impl Iterator<Item = (&'static str, &Spread)> {
        self.spreads.iter().map(|(k, spread)| (*k, spread))
    }

    /// Every identifier in catalog order.
    pub fn keys(&self) -> Vec<&'static str> {
        self.spreads.iter().map(|(k, _)| *k).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spread::SpreadFamily;

    #[test]
    fn catalog_has_seventeen_spreads() {
        let catalog = SpreadCatalog::builtin();
        assert_eq!(catalog.keys().len(), 17);
        assert_eq!(catalog.keys()[0], "single_card");
        assert_eq!(catalog.keys()[16], "mirror_of_truth");
    }

    #[test]
    fn lookup_and_validity() {
        let catalog = SpreadCatalog::builtin();
        assert!(catalog.is_valid_spread_type("celtic_cross"));
        assert!(!catalog.is_valid_spread_type("not_a_real_spread"));
        assert!(!catalog.is_valid_spread_type("Celtic Cross"));
        let spread = catalog.get("three_card").unwrap();
        assert_eq!(spread.name, "Three Card Spread");
        assert_eq!(spread.card_count(), 3);
    }

    #[test]
    fn celtic_cross_positions_in_order() {
        let catalog = SpreadCatalog::builtin();
        let spread = catalog.get("celtic_cross").unwrap();
        let names: Vec<_> = spread.positions.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "Present Situation",
                "Challenge/Cross",
                "Distant Past/Foundation",
                "Recent Past",
                "Possible Outcome",
                "Near Future",
                "Your Approach",
                "External Influences",
                "Hopes and Fears",
                "Final Outcome",
            ]
        );
    }

    #[test]
    fn families_match_expected_card_counts() {
        let catalog = SpreadCatalog::builtin();
        for (key, spread) in catalog.all() {
            assert!(!spread.positions.is_empty(), "{key} has no positions");
            if let Some(family) = spread.family {
                assert_eq!(family.expected_cards(), spread.card_count(), "{key}");
            }
        }
        assert_eq!(catalog.get("horseshoe").unwrap().family, None);
        assert_eq!(
            catalog.get("venus_love").unwrap().family,
            Some(SpreadFamily::VenusLove)
        );
    }
}
