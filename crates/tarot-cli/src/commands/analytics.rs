use tarot_core::TarotService;

use super::print_markdown;

pub fn run(service: &TarotService, include_recommendations: bool) -> Result<(), String> {
    print_markdown(&service.analytics(include_recommendations));
    Ok(())
}

pub fn stats(service: &TarotService) -> Result<(), String> {
    print_markdown(&service.statistics());
    Ok(())
}
