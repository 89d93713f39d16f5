use std::sync::LazyLock;

use regex::Regex;

/// Words that signal the guest wants food pairing suggestions.
pub const FOOD_KEYWORDS: &[&str] = &[
    "food",
    "pair",
    "pairing",
    "pairs",
    "dish",
    "eat",
    "eating",
    "dinner",
    "lunch",
    "meal",
    "course",
    "menu",
    "steak",
    "fish",
    "chicken",
    "pasta",
    "seafood",
    "appetizer",
    "dessert",
    "entree",
    "starter",
    "lamb",
    "pork",
    "beef",
    "salad",
    "soup",
    "cheese",
    "charcuterie",
];

// Built from literal keywords; a compile failure is a programming error.
static FOOD_RE: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = FOOD_KEYWORDS.join("|");
    Regex::new(&format!(r"\b(?:{alternation})\b")).expect("food keyword pattern is valid")
});

/// Returns `true` when the request mentions food or pairing.
pub fn wants_pairing(request: &str) -> bool {
    FOOD_RE.is_match(&request.to_lowercase())
}
