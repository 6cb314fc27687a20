use tarot_core::{CardSelection, Orientation, TarotService};

use super::print_markdown;

pub fn run(service: &TarotService, cards: &[String], context: &str) -> Result<(), String> {
    let selections: Vec<CardSelection> = cards.iter().map(|raw| selection(raw)).collect();
    let text = service.interpret_combination(&selections, context);
    if selections
        .iter()
        .any(|s| service.deck().find_card(&s.name).is_none())
    {
        return Err(text);
    }
    print_markdown(&text);
    Ok(())
}

/// `"The Tower:reversed"` or plain `"The Tower"`.
fn selection(raw: &str) -> CardSelection {
    match raw.rsplit_once(':') {
        Some((name, suffix)) => match Orientation::parse(suffix) {
            Some(orientation) => CardSelection::new(name.trim(), orientation),
            None => CardSelection::new(raw.trim(), Orientation::Upright),
        },
        None => CardSelection::new(raw.trim(), Orientation::Upright),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientation_suffix() {
        assert_eq!(
            selection("The Tower:reversed"),
            CardSelection::new("The Tower", Orientation::Reversed)
        );
        assert_eq!(
            selection("Ace of Cups"),
            CardSelection::new("Ace of Cups", Orientation::Upright)
        );
        assert_eq!(
            selection("Odd:name"),
            CardSelection::new("Odd:name", Orientation::Upright)
        );
    }
}
