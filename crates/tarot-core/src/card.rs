//! Card records and the small enums that classify them.

use serde::{Deserialize, Serialize};

/// Major or Minor Arcana.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arcana {
    /// The 22 trump cards.
    Major,
    /// The four suited cards.
    Minor,
}

impl Arcana {
    /// Parse an arcana from user input (`major`, `minor`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "major" | "major_arcana" => Some(Self::Major),
            "minor" | "minor_arcana" => Some(Self::Minor),
            _ => None,
        }
    }

    /// Display label, e.g. "Major Arcana".
    pub fn label(self) -> &'static str {
        match self {
            Self::Major => "Major Arcana",
            Self::Minor => "Minor Arcana",
        }
    }
}

impl std::fmt::Display for Arcana {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Major => write!(f, "major"),
            Self::Minor => write!(f, "minor"),
        }
    }
}

/// One of the four Minor Arcana suits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    /// Fire suit.
    Wands,
    /// Water suit.
    Cups,
    /// Air suit.
    Swords,
    /// Earth suit.
    Pentacles,
}

impl Suit {
    /// All suits in deck order.
    pub const ALL: [Self; 4] = [Self::Wands, Self::Cups, Self::Swords, Self::Pentacles];

    /// Parse a suit name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "wands" => Some(Self::Wands),
            "cups" => Some(Self::Cups),
            "swords" => Some(Self::Swords),
            "pentacles" => Some(Self::Pentacles),
            _ => None,
        }
    }

    /// Capitalized name, e.g. "Wands".
    pub fn title(self) -> &'static str {
        match self {
            Self::Wands => "Wands",
            Self::Cups => "Cups",
            Self::Swords => "Swords",
            Self::Pentacles => "Pentacles",
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title().to_lowercase())
    }
}

/// Classical element associated with a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    /// Fire.
    Fire,
    /// Water.
    Water,
    /// Air.
    Air,
    /// Earth.
    Earth,
}

impl Element {
    /// All elements in analysis order.
    pub const ALL: [Self; 4] = [Self::Fire, Self::Water, Self::Air, Self::Earth];

    /// Parse an element name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "fire" => Some(Self::Fire),
            "water" => Some(Self::Water),
            "air" => Some(Self::Air),
            "earth" => Some(Self::Earth),
            _ => None,
        }
    }

    /// Capitalized name, e.g. "Fire".
    pub fn title(self) -> &'static str {
        match self {
            Self::Fire => "Fire",
            Self::Water => "Water",
            Self::Air => "Air",
            Self::Earth => "Earth",
        }
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title().to_lowercase())
    }
}

/// Whether a card lies upright or reversed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Upright.
    #[default]
    Upright,
    /// Reversed.
    Reversed,
}

impl Orientation {
    /// Parse an orientation (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "upright" => Some(Self::Upright),
            "reversed" => Some(Self::Reversed),
            _ => None,
        }
    }

    /// Capitalized name, e.g. "Upright".
    pub fn title(self) -> &'static str {
        match self {
            Self::Upright => "Upright",
            Self::Reversed => "Reversed",
        }
    }

    /// Whether this is the upright orientation.
    pub fn is_upright(self) -> bool {
        self == Self::Upright
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Upright => write!(f, "upright"),
            Self::Reversed => write!(f, "reversed"),
        }
    }
}

/// The five life areas every card carries a meaning for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeaningField {
    /// General meaning.
    General,
    /// Love and relationships.
    Love,
    /// Career and finance.
    Career,
    /// Health.
    Health,
    /// Spirituality.
    Spirituality,
}

impl MeaningField {
    /// All fields in dataset order.
    pub const ALL: [Self; 5] = [
        Self::General,
        Self::Love,
        Self::Career,
        Self::Health,
        Self::Spirituality,
    ];

    /// Field name as stored in the dataset.
    pub fn key(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Love => "love",
            Self::Career => "career",
            Self::Health => "health",
            Self::Spirituality => "spirituality",
        }
    }

    /// Heading used when printing a card.
    pub fn label(self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Love => "Love & Relationships",
            Self::Career => "Career & Finance",
            Self::Health => "Health",
            Self::Spirituality => "Spirituality",
        }
    }
}

/// Keywords for each orientation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keywords {
    /// Upright keywords.
    #[serde(default)]
    pub upright: Vec<String>,
    /// Reversed keywords.
    #[serde(default)]
    pub reversed: Vec<String>,
}

impl Keywords {
    /// Keywords for the given orientation.
    pub fn get(&self, orientation: Orientation) -> &[String] {
        match orientation {
            Orientation::Upright => &self.upright,
            Orientation::Reversed => &self.reversed,
        }
    }

    /// Upright then reversed keywords.
    pub fn all(&self) -> impl Iterator<Item = &String> {
        self.upright.iter().chain(self.reversed.iter())
    }
}

/// The five meaning texts for one orientation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeaningSet {
    /// General meaning.
    #[serde(default)]
    pub general: String,
    /// Love and relationships.
    #[serde(default)]
    pub love: String,
    /// Career and finance.
    #[serde(default)]
    pub career: String,
    /// Health.
    #[serde(default)]
    pub health: String,
    /// Spirituality.
    #[serde(default)]
    pub spirituality: String,
}

impl MeaningSet {
    /// The text for one field.
    pub fn get(&self, field: MeaningField) -> &str {
        match field {
            MeaningField::General => &self.general,
            MeaningField::Love => &self.love,
            MeaningField::Career => &self.career,
            MeaningField::Health => &self.health,
            MeaningField::Spirituality => &self.spirituality,
        }
    }

    /// Every field paired with its text, in dataset order.
    pub fn iter(&self) -> impl Iterator<Item = (MeaningField, &str)> {
        MeaningField::ALL.into_iter().map(|f| (f, self.get(f)))
    }

    /// Whether every field has text.
    pub fn is_complete(&self) -> bool {
        self.iter().all(|(_, text)| !text.trim().is_empty())
    }
}

/// Meanings for each orientation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meanings {
    /// Upright meanings.
    #[serde(default)]
    pub upright: MeaningSet,
    /// Reversed meanings.
    #[serde(default)]
    pub reversed: MeaningSet,
}

impl Meanings {
    /// Meanings for the given orientation.
    pub fn get(&self, orientation: Orientation) -> &MeaningSet {
        match orientation {
            Orientation::Upright => &self.upright,
            Orientation::Reversed => &self.reversed,
        }
    }
}

/// A tarot card. Loaded once and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Stable unique identifier.
    pub id: String,
    /// Display name, unique case-insensitively.
    pub name: String,
    /// Major or Minor Arcana.
    pub arcana: Arcana,
    /// Suit, present for Minor Arcana cards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suit: Option<Suit>,
    /// Rank within the arcana or suit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    /// Keywords per orientation.
    #[serde(default)]
    pub keywords: Keywords,
    /// Meanings per orientation.
    #[serde(default)]
    pub meanings: Meanings,
    /// Short symbol descriptions.
    #[serde(default)]
    pub symbolism: Vec<String>,
    /// Associated element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<Element>,
    /// Astrological correspondence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub astrology: Option<String>,
    /// Numerological note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numerology: Option<String>,
    /// Narrative description of the imagery.
    #[serde(default)]
    pub description: String,
}

impl Card {
    /// Whether this is a Page, Knight, Queen, or King.
    pub fn is_court(&self) -> bool {
        ["Page", "Knight", "Queen", "King"]
            .iter()
            .any(|rank| self.name.contains(rank))
    }

    /// Whether this card belongs to the Major Arcana.
    pub fn is_major(&self) -> bool {
        self.arcana == Arcana::Major
    }

    /// The first `n` upright keywords, comma separated.
    pub fn keyword_summary(&self, n: usize) -> String {
        self.keywords
            .upright
            .iter()
            .take(n)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A listing filter over the deck.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CardCategory {
    /// Every card.
    #[default]
    All,
    /// Major Arcana only.
    MajorArcana,
    /// Minor Arcana only.
    MinorArcana,
    /// A single suit.
    Suit(Suit),
}

impl CardCategory {
    /// Parse a category key such as `major_arcana` or `cups`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Some(Self::All),
            "major_arcana" | "major" => Some(Self::MajorArcana),
            "minor_arcana" | "minor" => Some(Self::MinorArcana),
            other => Suit::parse(other).map(Self::Suit),
        }
    }

    /// Whether the card falls into this category.
    pub fn matches(self, card: &Card) -> bool {
        match self {
            Self::All => true,
            Self::MajorArcana => card.arcana == Arcana::Major,
            Self::MinorArcana => card.arcana == Arcana::Minor,
            Self::Suit(suit) => card.suit == Some(suit),
        }
    }

    /// Heading suffix, e.g. "Major Arcana" or "Cups".
    pub fn title(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::MajorArcana => "Major Arcana",
            Self::MinorArcana => "Minor Arcana",
            Self::Suit(suit) => suit.title(),
        }
    }

    /// Every accepted category key.
    pub fn keys() -> &'static [&'static str] {
        &[
            "all",
            "major_arcana",
            "minor_arcana",
            "wands",
            "cups",
            "swords",
            "pentacles",
        ]
    }
}
