use comfy_table::{ContentArrangement, Table};
use tarot_core::{CardCategory, TarotService};

use super::print_markdown;

pub fn run(service: &TarotService, category: &str) -> Result<(), String> {
    let category = CardCategory::parse(category).ok_or_else(|| {
        format!(
            "unknown category: \"{category}\" (expected one of {})",
            CardCategory::keys().join(", ")
        )
    })?;

    let cards: Vec<_> = service
        .deck()
        .all_cards()
        .iter()
        .filter(|c| category.matches(c))
        .collect();

    if cards.is_empty() {
        println!("  No cards found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Arcana", "Suit", "Element", "Keywords"]);

    for card in &cards {
        let suit = card.suit.map_or_else(|| "—".to_string(), |s| s.title().to_string());
        let element = card
            .element
            .map_or_else(|| "—".to_string(), |e| e.title().to_string());
        table.add_row(vec![
            card.name.clone(),
            card.arcana.label().to_string(),
            suit,
            element,
            card.keyword_summary(3),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} cards", cards.len());

    Ok(())
}

pub fn spreads(service: &TarotService, positions: bool) -> Result<(), String> {
    if positions {
        print_markdown(&service.list_spreads());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Key", "Name", "Cards", "Description"]);

    for (key, spread) in service.catalog().all() {
        table.add_row(vec![
            key.to_string(),
            spread.name.clone(),
            spread.card_count().to_string(),
            spread.description.clone(),
        ]);
    }

    println!("{table}");
    Ok(())
}
