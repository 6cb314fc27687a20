//! Caller-defined spreads and their validation.

use serde_json::Value;
use thiserror::Error;

use super::{Position, Spread};

/// Largest number of positions a custom spread may have.
pub const MAX_CUSTOM_POSITIONS: usize = 15;

/// Why a custom spread was rejected. `Display` is the user-facing text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpreadValidationError {
    /// The spread name is missing, blank, or not a string.
    #[error("Error: spreadName is required and must be a string.")]
    MissingName,
    /// The description is missing, blank, or not a string.
    #[error("Error: description is required and must be a string.")]
    MissingDescription,
    /// Positions are missing, empty, or not an array.
    #[error("Error: positions must be a non-empty array.")]
    NoPositions,
    /// More than fifteen positions were given.
    #[error("Error: Maximum 15 positions allowed for a custom spread.")]
    TooManyPositions(usize),
    /// The question is missing, blank, or not a string.
    #[error("Error: question is required and must be a string.")]
    MissingQuestion,
    /// A position (1-based) is not an object.
    #[error("Error: Position {0} must be an object with 'name' and 'meaning' properties.")]
    PositionNotObject(usize),
    /// A position (1-based) lacks a usable name.
    #[error("Error: Position {0} must have a 'name' property that is a string.")]
    PositionName(usize),
    /// A position (1-based) lacks a usable meaning.
    #[error("Error: Position {0} must have a 'meaning' property that is a string.")]
    PositionMeaning(usize),
}

/// A validated request to read with a caller-supplied layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomSpreadRequest {
    /// Display name of the spread.
    pub spread_name: String,
    /// What the spread explores.
    pub description: String,
    /// Between one and fifteen positions.
    pub positions: Vec<Position>,
    /// The querent's question.
    pub question: String,
    /// Session to record the reading in.
    pub session_id: Option<String>,
}

fn non_blank(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

impl CustomSpreadRequest {
    /// Build and validate a request from typed parts.
    pub fn new(
        spread_name: impl Into<String>,
        description: impl Into<String>,
        positions: Vec<Position>,
        question: impl Into<String>,
        session_id: Option<String>,
    ) -> Result<Self, SpreadValidationError> {
        let request = Self {
            spread_name: spread_name.into().trim().to_string(),
            description: description.into(),
            positions,
            question: question.into(),
            session_id: session_id.filter(|s| !is_blank(s)),
        };
        request.validate()?;
        Ok(request)
    }

    /// Decode and validate tool arguments (`spreadName`, `description`,
    /// `positions`, `question`, `sessionId`).
    ///
    /// Checks run in a fixed order and the first failure is reported.
    pub fn from_value(args: &Value) -> Result<Self, SpreadValidationError> {
        let spread_name =
            non_blank(args.get("spreadName")).ok_or(SpreadValidationError::MissingName)?;
        let description =
            non_blank(args.get("description")).ok_or(SpreadValidationError::MissingDescription)?;
        let raw_positions = args
            .get("positions")
            .and_then(Value::as_array)
            .filter(|p| !p.is_empty())
            .ok_or(SpreadValidationError::NoPositions)?;
        if raw_positions.len() > MAX_CUSTOM_POSITIONS {
            return Err(SpreadValidationError::TooManyPositions(raw_positions.len()));
        }
        let question =
            non_blank(args.get("question")).ok_or(SpreadValidationError::MissingQuestion)?;

        let mut positions = Vec::with_capacity(raw_positions.len());
        for (i, raw) in raw_positions.iter().enumerate() {
            let index = i + 1;
            if !raw.is_object() {
                return Err(SpreadValidationError::PositionNotObject(index));
            }
            let name =
                non_blank(raw.get("name")).ok_or(SpreadValidationError::PositionName(index))?;
            let meaning = non_blank(raw.get("meaning"))
                .ok_or(SpreadValidationError::PositionMeaning(index))?;
            positions.push(Position::new(name, meaning));
        }

        let session_id = args
            .get("sessionId")
            .and_then(Value::as_str)
            .filter(|s| !is_blank(s))
            .map(str::to_string);

        Ok(Self {
            spread_name: spread_name.trim().to_string(),
            description: description.to_string(),
            positions,
            question: question.to_string(),
            session_id,
        })
    }

    /// Re-check the invariants of an already built request.
    pub fn validate(&self) -> Result<(), SpreadValidationError> {
        if is_blank(&self.spread_name) {
            return Err(SpreadValidationError::MissingName);
        }
        if is_blank(&self.description) {
            return Err(SpreadValidationError::MissingDescription);
        }
        if self.positions.is_empty() {
            return Err(SpreadValidationError::NoPositions);
        }
        if self.positions.len() > MAX_CUSTOM_POSITIONS {
            return Err(SpreadValidationError::TooManyPositions(self.positions.len()));
        }
        if is_blank(&self.question) {
            return Err(SpreadValidationError::MissingQuestion);
        }
        for (i, position) in self.positions.iter().enumerate() {
            if is_blank(&position.name) {
                return Err(SpreadValidationError::PositionName(i + 1));
            }
            if is_blank(&position.meaning) {
                return Err(SpreadValidationError::PositionMeaning(i + 1));
            }
        }
        Ok(())
    }

    /// The reading's spread type, `custom_` plus the slugged name.
    pub fn spread_type(&self) -> String {
        let slug = self
            .spread_name
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_");
        format!("custom_{slug}")
    }

    /// The ephemeral spread this request describes.
    pub fn to_spread(&self) -> Spread {
        Spread::new(
            self.spread_name.clone(),
            self.description.clone(),
            self.positions.clone(),
        )
    }
}
