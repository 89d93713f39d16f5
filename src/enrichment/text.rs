use crate::vectordb::{Candidate, CatalogItem};

/// Phrases that mark a stored note as a stand-in rather than real text.
pub const PLACEHOLDER_PHRASES: &[&str] = &["no tasting note", "not provided", "not available"];

/// Longer than `min_len` characters and free of placeholder phrases.
pub fn is_substantive(text: &str, min_len: usize) -> bool {
    let text = text.trim();
    if text.chars().count() <= min_len {
        return false;
    }
    let lower = text.to_lowercase();
    !PLACEHOLDER_PHRASES.iter().any(|p| lower.contains(p))
}

/// Last-resort note built only from structured attributes. Never empty.
pub fn template_note(item: &CatalogItem) -> String {
    let category = non_empty(&item.category).unwrap_or("wine");
    let origin = non_empty(&item.region)
        .or_else(|| non_empty(&item.producer))
        .unwrap_or("an undisclosed origin");
    let grapes = non_empty(&item.grapes).unwrap_or("classic varietals");
    format!("A {category} from {origin} featuring {grapes}.")
}

/// Pairing text keyed on the item's category.
pub fn canned_pairing(item: &CatalogItem) -> &'static str {
    let category = item.category.to_lowercase();
    if category.contains("red") {
        "Pairs well with grilled meats, hearty stews, and aged cheeses."
    } else if category.contains("white") {
        "Pairs well with seafood, poultry, and light pasta dishes."
    } else {
        "Versatile pairing options available."
    }
}

/// Search text for matching the wine against menu dishes.
pub fn menu_query(item: &CatalogItem, note: &str) -> String {
    format!(
        "{} {} wine from {}. {}",
        item.grapes, item.category, item.region, note
    )
    .trim()
    .to_string()
}

/// Search text for the producer reference partition.
pub fn reference_query(item: &CatalogItem) -> String {
    format!("{} {}", item.producer, item.region).trim().to_string()
}

/// Name shown for a menu dish hit.
pub fn dish_name(dish: &Candidate) -> &str {
    non_empty(&dish.item.label)
        .or_else(|| non_empty(&dish.item.producer))
        .unwrap_or("Unnamed dish")
}

fn non_empty(s: &str) -> Option<&str> {
    let s = s.trim();
    (!s.is_empty()).then_some(s)
}
