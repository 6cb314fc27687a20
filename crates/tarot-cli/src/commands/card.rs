use tarot_core::TarotService;

use super::{orientation, print_markdown};

pub fn run(service: &TarotService, name: &str, reversed: bool) -> Result<(), String> {
    let text = service.card_info(name, orientation(reversed));
    if service.deck().find_card(name).is_none() {
        return Err(text);
    }
    print_markdown(&text);
    Ok(())
}

pub fn similar(service: &TarotService, name: &str, limit: Option<usize>) -> Result<(), String> {
    let text = service.similar_cards(name, limit);
    if service.deck().get(name).is_none() {
        return Err(text);
    }
    print_markdown(&text);
    Ok(())
}
