use tarot_core::TarotService;

use super::{Filters, print_markdown};

pub fn run(service: &TarotService, filters: &Filters, limit: Option<usize>) -> Result<(), String> {
    let options = filters.options()?;
    if !options.has_criteria() {
        return Err("give a keyword or at least one filter (--suit, --arcana, --element, --number)".into());
    }
    print_markdown(&service.search_cards(&options, limit));
    Ok(())
}

pub fn random(service: &TarotService, count: usize, filters: &Filters) -> Result<(), String> {
    let options = filters.options()?;
    print_markdown(&service.random_cards(count, &options));
    Ok(())
}
