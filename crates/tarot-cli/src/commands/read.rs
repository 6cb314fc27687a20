use tarot_core::{CustomSpreadRequest, Position, TarotService};

use super::print_markdown;

pub fn run(service: &TarotService, spread: &str, question: &str) -> Result<(), String> {
    if !service.catalog().is_valid_spread_type(spread) {
        return Err(format!(
            "unknown spread: \"{spread}\" (try `tarot spreads`)"
        ));
    }
    let text = service
        .perform_reading(spread, question, None)
        .map_err(|e| e.to_string())?;
    print_markdown(&text);
    Ok(())
}

pub fn custom(
    service: &TarotService,
    name: &str,
    description: &str,
    positions: &[String],
    question: &str,
) -> Result<(), String> {
    let positions = positions
        .iter()
        .map(|raw| parse_position(raw))
        .collect::<Result<Vec<_>, _>>()?;
    let request = CustomSpreadRequest::new(name, description, positions, question, None)
        .map_err(|e| e.to_string())?;
    let text = service
        .custom_reading(&request)
        .map_err(|e| e.to_string())?;
    print_markdown(&text);
    Ok(())
}

fn parse_position(raw: &str) -> Result<Position, String> {
    let (name, meaning) = raw
        .split_once('=')
        .ok_or_else(|| format!("position must look like \"Name=Meaning\": \"{raw}\""))?;
    Ok(Position::new(name.trim(), meaning.trim()))
}
