use super::text::dish_name;
use crate::llm::Prompt;
use crate::vectordb::{Candidate, CatalogItem};

pub const SOMMELIER_SYSTEM: &str = "You are an expert sommelier writing for a restaurant wine list.";

pub fn tasting_note_prompt(item: &CatalogItem) -> Prompt {
    let wine = if item.label.is_empty() {
        &item.region
    } else {
        &item.label
    };
    let user = format!(
        "Write a tasting note for this wine in 3-4 sentences as a single paragraph. \
         No headers, bullet points, or markdown. Just flowing prose.\n\n\
         Producer: {}\n\
         Wine: {wine}\n\
         Region: {}\n\
         Grapes: {}\n\
         Type: {}\n\n\
         Cover aromas, flavors, body, and finish. Be specific to this wine.",
        item.producer, item.region, item.grapes, item.category
    );
    Prompt::new(SOMMELIER_SYSTEM, user)
}

pub fn pairing_prompt(item: &CatalogItem) -> Prompt {
    let user = format!(
        "Suggest 2-3 food pairings for this wine. Be brief and specific.\n\n\
         Wine: {} from {}\n\
         Grapes: {}\n\n\
         Format: \"Pairs well with [food 1], [food 2], and [food 3].\"",
        item.category, item.region, item.grapes
    );
    Prompt::new(SOMMELIER_SYSTEM, user)
}

/// Asks for the single best dish among `dishes`, with a short reason.
pub fn menu_pairing_prompt(item: &CatalogItem, note: &str, dishes: &[Candidate]) -> Prompt {
    let menu: String = dishes
        .iter()
        .enumerate()
        .map(|(i, dish)| format!("{}. {} - {}\n", i + 1, dish_name(dish), dish.item.blurb))
        .collect();

    let user = format!(
        "Pick the single best dish from this restaurant's menu to pair with this wine. \
         Explain in 1-2 sentences why it pairs well.\n\n\
         Wine: {} - {} from {}\n\
         Tasting: {note}\n\n\
         Menu options:\n{menu}\n\
         Respond with the dish name and a brief pairing explanation.",
        item.title(),
        item.grapes,
        item.region
    );
    Prompt::new(SOMMELIER_SYSTEM, user)
}
