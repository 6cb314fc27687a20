pub mod analytics;
pub mod card;
pub mod combo;
pub mod list;
pub mod read;
pub mod search;
pub mod serve;

use std::path::Path;

use colored::Colorize;
use tarot_core::{Arcana, Element, Orientation, SearchOptions, Suit, TarotConfig, TarotService};

/// Build the service over the bundled deck or the one at `deck`.
pub fn service(deck: Option<&Path>) -> Result<TarotService, String> {
    let config = match deck {
        Some(path) => TarotConfig::default().with_deck_path(path),
        None => TarotConfig::default(),
    };
    TarotService::new(config).map_err(|e| e.to_string())
}

/// Search and random-draw filters as given on the command line.
#[derive(Default)]
pub struct Filters {
    pub keyword: Option<String>,
    pub suit: Option<String>,
    pub arcana: Option<String>,
    pub element: Option<String>,
    pub number: Option<u32>,
    pub reversed: bool,
}

impl Filters {
    fn options(&self) -> Result<SearchOptions, String> {
        let mut options = SearchOptions::default().orientation(orientation(self.reversed));
        if let Some(keyword) = &self.keyword {
            options = options.keyword(keyword.as_str());
        }
        if let Some(suit) = &self.suit {
            options = options.suit(parse(suit, "suit", Suit::parse)?);
        }
        if let Some(arcana) = &self.arcana {
            options = options.arcana(parse(arcana, "arcana", Arcana::parse)?);
        }
        if let Some(element) = &self.element {
            options = options.element(parse(element, "element", Element::parse)?);
        }
        if let Some(number) = self.number {
            options = options.number(number);
        }
        Ok(options)
    }
}

fn parse<T>(raw: &str, what: &str, parse: fn(&str) -> Option<T>) -> Result<T, String> {
    parse(raw).ok_or_else(|| format!("unknown {what}: \"{raw}\""))
}

fn orientation(reversed: bool) -> Orientation {
    if reversed {
        Orientation::Reversed
    } else {
        Orientation::Upright
    }
}

/// Print service markdown, with headings and bold runs highlighted.
fn print_markdown(text: &str) {
    for line in text.lines() {
        if let Some(heading) = line.strip_prefix("# ") {
            println!("{}", heading.bold().underline());
        } else if let Some(heading) = line.strip_prefix("## ") {
            println!("{}", heading.bold());
        } else if let Some(heading) = line.strip_prefix("### ") {
            println!("{}", heading.italic());
        } else {
            println!("{}", emphasize(line));
        }
    }
}

/// Render `**bold**` runs without the asterisks.
fn emphasize(line: &str) -> String {
    let mut out = String::new();
    for (i, part) in line.split("**").enumerate() {
        if i % 2 == 1 {
            out.push_str(&part.bold().to_string());
        } else {
            out.push_str(part);
        }
    }
    out
}
