//! Tool catalog and dispatch.
//!
//! Each tool decodes its camelCase arguments, calls the matching
//! [`TarotService`] operation and returns its text.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tarot_core::{
    Arcana, CardCategory, CardSelection, Element, Orientation, SearchOptions, Suit, TarotError,
    TarotService,
};
use thiserror::Error;
use tracing::debug;

/// A tool as announced by `tools/list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    /// Name used in `tools/call`.
    pub name: String,

    /// What the tool does.
    pub description: String,

    /// JSON Schema of the arguments object.
    pub input_schema: Value,
}

impl Tool {
    fn new(name: &str, description: &str, input_schema: Value) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            input_schema,
        }
    }
}

/// Why a tool call produced no text.
#[derive(Debug, Error)]
pub enum ToolError {
    /// No tool has this name.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The arguments did not decode.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The operation itself failed.
    #[error(transparent)]
    Tarot(#[from] TarotError),
}

// ---------------------------------------------------------------------------
// Argument shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CardInfoArgs {
    card_name: String,
    #[serde(default)]
    orientation: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ListCardsArgs {
    #[serde(default)]
    category: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReadingArgs {
    spread_type: String,
    question: String,
    #[serde(default)]
    session_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct FilterArgs {
    #[serde(default)]
    keyword: Option<String>,
    #[serde(default)]
    suit: Option<String>,
    #[serde(default)]
    arcana: Option<String>,
    #[serde(default)]
    element: Option<String>,
    #[serde(default)]
    number: Option<u32>,
    #[serde(default)]
    orientation: Option<String>,
    #[serde(default)]
    limit: Option<usize>,
    #[serde(default)]
    count: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SimilarArgs {
    card_name: String,
    #[serde(default)]
    limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyticsArgs {
    #[serde(default)]
    include_recommendations: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct CombinationCard {
    name: String,
    #[serde(default)]
    orientation: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CombinationArgs {
    cards: Vec<CombinationCard>,
    #[serde(default)]
    context: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionArgs {
    session_id: String,
}

fn decode<T: DeserializeOwned>(args: Value) -> Result<T, ToolError> {
    let args = if args.is_null() { json!({}) } else { args };
    serde_json::from_value(args).map_err(|e| ToolError::InvalidArguments(e.to_string()))
}

fn parse_field<T>(
    field: &str,
    value: Option<&str>,
    parse: fn(&str) -> Option<T>,
) -> Result<Option<T>, ToolError> {
    match value {
        None => Ok(None),
        Some(raw) => parse(raw).map(Some).ok_or_else(|| {
            ToolError::InvalidArguments(format!("unrecognized {field}: \"{raw}\""))
        }),
    }
}

fn orientation(value: Option<&str>) -> Result<Orientation, ToolError> {
    Ok(parse_field("orientation", value, Orientation::parse)?.unwrap_or_default())
}

impl FilterArgs {
    fn options(&self) -> Result<SearchOptions, ToolError> {
        let mut options = SearchOptions::default().orientation(orientation(
            self.orientation.as_deref(),
        )?);
        if let Some(keyword) = &self.keyword {
            options = options.keyword(keyword.as_str());
        }
        if let Some(suit) = parse_field("suit", self.suit.as_deref(), Suit::parse)? {
            options = options.suit(suit);
        }
        if let Some(arcana) = parse_field("arcana", self.arcana.as_deref(), Arcana::parse)? {
            options = options.arcana(arcana);
        }
        if let Some(element) = parse_field("element", self.element.as_deref(), Element::parse)? {
            options = options.element(element);
        }
        if let Some(number) = self.number {
            options = options.number(number);
        }
        Ok(options)
    }
}

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

/// Lists tools and runs them against a shared service.
pub struct ToolHandler {
    service: Arc<TarotService>,
}

impl ToolHandler {
    /// A handler over `service`.
    pub fn new(service: Arc<TarotService>) -> Self {
        Self { service }
    }

    /// Every tool with its argument schema.
    pub fn list_tools(&self) -> Vec<Tool> {
        let suits = json!(["wands", "cups", "swords", "pentacles"]);
        let arcana = json!(["major", "minor"]);
        let elements = json!(["fire", "water", "air", "earth"]);
        let orientations = json!(["upright", "reversed"]);

        vec![
            Tool::new(
                "get_card_info",
                "Get detailed information about a specific tarot card from the Rider-Waite deck",
                json!({
                    "type": "object",
                    "properties": {
                        "cardName": {
                            "type": "string",
                            "description": "The name of the tarot card (e.g., 'The Fool', 'Two of Cups')"
                        },
                        "orientation": {
                            "type": "string",
                            "enum": orientations,
                            "description": "The orientation of the card (upright or reversed)",
                            "default": "upright"
                        }
                    },
                    "required": ["cardName"]
                }),
            ),
            Tool::new(
                "list_all_cards",
                "List all available tarot cards in the Rider-Waite deck",
                json!({
                    "type": "object",
                    "properties": {
                        "category": {
                            "type": "string",
                            "enum": CardCategory::keys(),
                            "description": "Filter cards by category",
                            "default": "all"
                        }
                    }
                }),
            ),
            Tool::new(
                "perform_reading",
                "Perform a tarot card reading using a specific spread",
                json!({
                    "type": "object",
                    "properties": {
                        "spreadType": {
                            "type": "string",
                            "enum": self.service.catalog().keys(),
                            "description": "The type of tarot spread to perform"
                        },
                        "question": {
                            "type": "string",
                            "description": "The question or focus for the reading"
                        },
                        "sessionId": {
                            "type": "string",
                            "description": "Optional session ID to continue a previous reading"
                        }
                    },
                    "required": ["spreadType", "question"]
                }),
            ),
            Tool::new(
                "search_cards",
                "Search for tarot cards using various criteria like keywords, suit, element, etc.",
                json!({
                    "type": "object",
                    "properties": {
                        "keyword": {
                            "type": "string",
                            "description": "Search keyword to find in card meanings, keywords, or symbolism"
                        },
                        "suit": { "type": "string", "enum": suits, "description": "Filter by card suit" },
                        "arcana": { "type": "string", "enum": arcana, "description": "Filter by arcana type" },
                        "element": { "type": "string", "enum": elements, "description": "Filter by element" },
                        "number": { "type": "integer", "description": "Filter by card number" },
                        "orientation": {
                            "type": "string",
                            "enum": orientations,
                            "description": "Search in upright or reversed meanings"
                        },
                        "limit": {
                            "type": "integer",
                            "description": format!(
                                "Maximum number of results to return (default: {})",
                                self.service.config().search_limit
                            )
                        }
                    }
                }),
            ),
            Tool::new(
                "find_similar_cards",
                "Find cards with similar meanings to a given card",
                json!({
                    "type": "object",
                    "properties": {
                        "cardName": {
                            "type": "string",
                            "description": "The name of the card to find similar cards for"
                        },
                        "limit": {
                            "type": "integer",
                            "description": format!(
                                "Maximum number of similar cards to return (default: {})",
                                self.service.config().similar_limit
                            )
                        }
                    },
                    "required": ["cardName"]
                }),
            ),
            Tool::new(
                "get_database_analytics",
                "Get comprehensive analytics and statistics about the tarot card database",
                json!({
                    "type": "object",
                    "properties": {
                        "includeRecommendations": {
                            "type": "boolean",
                            "description": "Whether to include improvement recommendations (default: true)"
                        }
                    }
                }),
            ),
            Tool::new(
                "get_database_statistics",
                "Get card counts by arcana, suit and element and the most common keywords",
                json!({ "type": "object", "properties": {} }),
            ),
            Tool::new(
                "get_random_cards",
                "Get random cards with optional filtering",
                json!({
                    "type": "object",
                    "properties": {
                        "count": { "type": "integer", "description": "Number of random cards to draw (default: 1)" },
                        "suit": { "type": "string", "enum": suits, "description": "Filter by card suit" },
                        "arcana": { "type": "string", "enum": arcana, "description": "Filter by arcana type" },
                        "element": { "type": "string", "enum": elements, "description": "Filter by element" }
                    }
                }),
            ),
            Tool::new(
                "create_custom_spread",
                "Create a custom tarot spread and draw cards for it. Use this when no existing spread fits your needs and you want to create your own layout with specific positions and meanings.",
                json!({
                    "type": "object",
                    "properties": {
                        "spreadName": { "type": "string", "description": "Name for your custom spread" },
                        "description": {
                            "type": "string",
                            "description": "Description of what this spread is designed to explore"
                        },
                        "positions": {
                            "type": "array",
                            "description": "Array of position objects defining each card position in the spread",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "name": {
                                        "type": "string",
                                        "description": "Name of this position (e.g., 'Past Influences', 'Current Challenge')"
                                    },
                                    "meaning": {
                                        "type": "string",
                                        "description": "What this position represents in the reading"
                                    }
                                },
                                "required": ["name", "meaning"]
                            },
                            "minItems": 1,
                            "maxItems": 15
                        },
                        "question": { "type": "string", "description": "The question or focus for this reading" },
                        "sessionId": {
                            "type": "string",
                            "description": "Optional session ID to continue a previous reading"
                        }
                    },
                    "required": ["spreadName", "description", "positions", "question"]
                }),
            ),
            Tool::new(
                "list_available_spreads",
                "List every built-in spread with its positions",
                json!({ "type": "object", "properties": {} }),
            ),
            Tool::new(
                "interpret_card_combination",
                "Interpret how a chosen set of cards works together",
                json!({
                    "type": "object",
                    "properties": {
                        "cards": {
                            "type": "array",
                            "description": "Cards to interpret together",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "name": { "type": "string", "description": "Card name" },
                                    "orientation": {
                                        "type": "string",
                                        "enum": orientations,
                                        "default": "upright"
                                    }
                                },
                                "required": ["name"]
                            },
                            "minItems": 1
                        },
                        "context": {
                            "type": "string",
                            "description": "The situation or question the combination speaks to"
                        }
                    },
                    "required": ["cards"]
                }),
            ),
            Tool::new(
                "create_session",
                "Start a session that keeps the history of readings performed with its ID",
                json!({ "type": "object", "properties": {} }),
            ),
            Tool::new(
                "get_session_readings",
                "Show every reading recorded in a session",
                json!({
                    "type": "object",
                    "properties": {
                        "sessionId": { "type": "string", "description": "ID returned by create_session" }
                    },
                    "required": ["sessionId"]
                }),
            ),
        ]
    }

    /// Run a tool by name.
    pub fn execute(&self, name: &str, args: Value) -> Result<String, ToolError> {
        debug!(tool = name, "executing tool");
        let service = &self.service;
        match name {
            "get_card_info" => {
                let args: CardInfoArgs = decode(args)?;
                let orientation = orientation(args.orientation.as_deref())?;
                Ok(service.card_info(&args.card_name, orientation))
            }
            "list_all_cards" => {
                let args: ListCardsArgs = decode(args)?;
                let category = parse_field("category", args.category.as_deref(), CardCategory::parse)?
                    .unwrap_or_default();
                Ok(service.list_cards(category))
            }
            "perform_reading" => {
                let args: ReadingArgs = decode(args)?;
                Ok(service.perform_reading(
                    &args.spread_type,
                    &args.question,
                    args.session_id.as_deref(),
                )?)
            }
            "search_cards" => {
                let args: FilterArgs = decode(args)?;
                Ok(service.search_cards(&args.options()?, args.limit))
            }
            "find_similar_cards" => {
                let args: SimilarArgs = decode(args)?;
                Ok(service.similar_cards(&args.card_name, args.limit))
            }
            "get_database_analytics" => {
                let args: AnalyticsArgs = decode(args)?;
                Ok(service.analytics(args.include_recommendations.unwrap_or(true)))
            }
            "get_database_statistics" => Ok(service.statistics()),
            "get_random_cards" => {
                let args: FilterArgs = decode(args)?;
                let filters = FilterArgs {
                    keyword: None,
                    number: None,
                    orientation: None,
                    ..args
                };
                Ok(service.random_cards(filters.count.unwrap_or(1), &filters.options()?))
            }
            "create_custom_spread" => Ok(service.create_custom_spread(&args)?),
            "list_available_spreads" => Ok(service.list_spreads()),
            "interpret_card_combination" => {
                let args: CombinationArgs = decode(args)?;
                if args.cards.is_empty() {
                    return Err(ToolError::InvalidArguments(
                        "cards must name at least one card".to_string(),
                    ));
                }
                let selections = args
                    .cards
                    .into_iter()
                    .map(|c| Ok(CardSelection::new(c.name, orientation(c.orientation.as_deref())?)))
                    .collect::<Result<Vec<_>, ToolError>>()?;
                let context = args.context.unwrap_or_else(|| "General guidance".to_string());
                Ok(service.interpret_combination(&selections, &context))
            }
            "create_session" => {
                let session = service.create_session();
                Ok(format!(
                    "Session created: {}\n\nPass this sessionId to perform_reading or create_custom_spread to keep a history of your readings.",
                    session.id
                ))
            }
            "get_session_readings" => {
                let args: SessionArgs = decode(args)?;
                Ok(service.session_readings(&args.session_id))
            }
            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }
}
