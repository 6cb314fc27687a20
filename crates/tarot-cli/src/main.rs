//! Command-line frontend for the tarot engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tarot",
    about = "Tarot readings, card lookup and deck analytics",
    version,
    propagate_version = true
)]
struct Cli {
    /// Card data file (default: the bundled Rider-Waite deck)
    #[arg(long, global = true, env = "TAROT_DECK")]
    deck: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show everything about one card
    Card {
        /// Card name or id (case-insensitive)
        name: String,

        /// Show the reversed meanings
        #[arg(short, long)]
        reversed: bool,
    },

    /// List cards in a table
    List {
        /// all, major_arcana, minor_arcana, wands, cups, swords or pentacles
        #[arg(default_value = "all")]
        category: String,
    },

    /// List the built-in spreads
    Spreads {
        /// Also print each spread's positions
        #[arg(short, long)]
        positions: bool,
    },

    /// Perform a reading with a built-in spread
    Read {
        /// Spread key, e.g. three_card or celtic_cross
        spread: String,

        /// The question to ask
        question: String,
    },

    /// Perform a reading with your own positions
    Custom {
        /// Name of the spread
        #[arg(short, long)]
        name: String,

        /// What the spread explores
        #[arg(short, long)]
        description: String,

        /// A position as "Name=Meaning" (repeatable, 1 to 15)
        #[arg(short, long = "position", required = true)]
        positions: Vec<String>,

        /// The question to ask
        question: String,
    },

    /// Interpret a set of cards together
    Combo {
        /// Cards by name; append ":reversed" to reverse one
        #[arg(required = true)]
        cards: Vec<String>,

        /// The situation the cards speak to
        #[arg(short, long, default_value = "General guidance")]
        context: String,
    },

    /// Search cards by keyword and attributes
    Search {
        /// Keyword to look for in names, keywords, meanings and symbolism
        keyword: Option<String>,

        /// Filter by suit
        #[arg(long)]
        suit: Option<String>,

        /// Filter by arcana (major or minor)
        #[arg(long)]
        arcana: Option<String>,

        /// Filter by element
        #[arg(long)]
        element: Option<String>,

        /// Filter by card number
        #[arg(long)]
        number: Option<u32>,

        /// Search the reversed meanings
        #[arg(short, long)]
        reversed: bool,

        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Cards most similar to a given card
    Similar {
        /// Exact card name or id
        name: String,

        /// Maximum number of cards
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Draw random cards
    Random {
        /// How many cards to draw
        #[arg(default_value_t = 1)]
        count: usize,

        /// Draw only from this suit
        #[arg(long)]
        suit: Option<String>,

        /// Draw only from this arcana
        #[arg(long)]
        arcana: Option<String>,

        /// Draw only cards of this element
        #[arg(long)]
        element: Option<String>,
    },

    /// Deck analytics report
    Analytics {
        /// Leave out the recommendations section
        #[arg(long)]
        no_recommendations: bool,
    },

    /// Card counts and the most common keywords
    Stats,

    /// Start the tool server on stdio
    Serve,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let deck = cli.deck.as_deref();
    let service = || commands::service(deck);

    match cli.command {
        Commands::Card { name, reversed } => commands::card::run(&service()?, &name, reversed),
        Commands::List { category } => commands::list::run(&service()?, &category),
        Commands::Spreads { positions } => commands::list::spreads(&service()?, positions),
        Commands::Read { spread, question } => commands::read::run(&service()?, &spread, &question),
        Commands::Custom {
            name,
            description,
            positions,
            question,
        } => commands::read::custom(&service()?, &name, &description, &positions, &question),
        Commands::Combo { cards, context } => commands::combo::run(&service()?, &cards, &context),
        Commands::Search {
            keyword,
            suit,
            arcana,
            element,
            number,
            reversed,
            limit,
        } => {
            let filters = commands::Filters {
                keyword,
                suit,
                arcana,
                element,
                number,
                reversed,
            };
            commands::search::run(&service()?, &filters, limit)
        }
        Commands::Similar { name, limit } => commands::card::similar(&service()?, &name, limit),
        Commands::Random {
            count,
            suit,
            arcana,
            element,
        } => {
            let filters = commands::Filters {
                suit,
                arcana,
                element,
                ..commands::Filters::default()
            };
            commands::search::random(&service()?, count, &filters)
        }
        Commands::Analytics { no_recommendations } => {
            commands::analytics::run(&service()?, !no_recommendations)
        }
        Commands::Stats => commands::analytics::stats(&service()?),
        Commands::Serve => commands::serve::run(deck),
    }
}
