//! Spread layouts: the built-in catalog and caller-defined custom spreads.

pub mod catalog;
pub mod custom;

pub use catalog::SpreadCatalog;
pub use custom::{CustomSpreadRequest, SpreadValidationError};

/// A named slot in a spread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    /// Position title, e.g. "Recent Past".
    pub name: String,
    /// What a card in this position speaks to.
    pub meaning: String,
}

impl Position {
    /// Create a position.
    pub fn new(name: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            meaning: meaning.into(),
        }
    }
}

/// Families of spreads that carry a dedicated structural analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpreadFamily {
    /// Ten-card Celtic Cross.
    CelticCross,
    /// Past, present, future.
    ThreeCard,
    /// Seven-card relationship layout.
    Relationship,
    /// Six-card career layout.
    Career,
    /// Six-card spiritual guidance layout.
    Spiritual,
    /// Seven chakras, root to crown.
    Chakra,
    /// Overall theme plus twelve months.
    YearAhead,
    /// Seven-card Venus love layout.
    VenusLove,
    /// Ten sephiroth of the Tree of Life.
    TreeOfLife,
    /// Twelve astrological houses.
    Astrological,
    /// Center plus eight directions.
    Mandala,
    /// Spirit plus four elements.
    Pentagram,
    /// Four beams of light.
    MirrorOfTruth,
}

/// Name fragments in match order. The first fragment found in a spread's
/// lowercased name decides its family.
const FAMILY_MARKERS: &[(&str, SpreadFamily)] = &[
    ("celtic cross", SpreadFamily::CelticCross),
    ("three card", SpreadFamily::ThreeCard),
    ("relationship", SpreadFamily::Relationship),
    ("career", SpreadFamily::Career),
    ("spiritual", SpreadFamily::Spiritual),
    ("chakra", SpreadFamily::Chakra),
    ("year ahead", SpreadFamily::YearAhead),
    ("venus", SpreadFamily::VenusLove),
    ("love", SpreadFamily::VenusLove),
    ("tree of life", SpreadFamily::TreeOfLife),
    ("astrological", SpreadFamily::Astrological),
    ("mandala", SpreadFamily::Mandala),
    ("pentagram", SpreadFamily::Pentagram),
    ("mirror of truth", SpreadFamily::MirrorOfTruth),
];

impl SpreadFamily {
    /// Resolve the family from a spread's display name.
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        FAMILY_MARKERS
            .iter()
            .find(|(marker, _)| lower.contains(marker))
            .map(|&(_, family)| family)
    }

    /// Number of cards the family analysis expects.
    pub fn expected_cards(self) -> usize {
        match self {
            Self::CelticCross | Self::TreeOfLife => 10,
            Self::ThreeCard => 3,
            Self::Relationship | Self::Chakra | Self::VenusLove => 7,
            Self::Career | Self::Spiritual => 6,
            Self::YearAhead => 13,
            Self::Astrological => 12,
            Self::Mandala => 9,
            Self::Pentagram => 5,
            Self::MirrorOfTruth => 4,
        }
    }
}

/// An ordered list of positions. One card is drawn per position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spread {
    /// Display name.
    pub name: String,
    /// What the spread is for.
    pub description: String,
    /// Positions in draw order.
    pub positions: Vec<Position>,
    /// Analysis family, resolved once from the name.
    pub family: Option<SpreadFamily>,
}

impl Spread {
    /// Build a spread and resolve its analysis family.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        positions: Vec<Position>,
    ) -> Self {
        let name = name.into();
        let family = SpreadFamily::from_name(&name);
        Self {
            name,
            description: description.into(),
            positions,
            family,
        }
    }

    /// Number of cards drawn for this spread.
    pub fn card_count(&self) -> usize {
        self.positions.len()
    }
}
