use std::sync::LazyLock;

use regex::Regex;

// Literal pattern; a compile failure is a programming error.
static INTEGER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("integer pattern is valid"));

/// Parses a selection reply into two zero-based indices.
///
/// Accepts any reply naming exactly two distinct integers in `1..=count`
/// ("1,7", "3 and 5", "3 and 7; 3 is bolder"), in first-mention order.
/// Repeats of an already named integer are ignored. Anything else is `None`.
pub fn parse_selection(reply: &str, count: usize) -> Option<(usize, usize)> {
    let numbers = distinct_integers(reply);
    let [a, b] = numbers.as_slice() else {
        return None;
    };
    let (a, b) = (*a, *b);

    if !(1..=count).contains(&a) || !(1..=count).contains(&b) {
        return None;
    }
    Some((a - 1, b - 1))
}

fn distinct_integers(reply: &str) -> Vec<usize> {
    let mut seen = Vec::new();
    // Overlong digit runs never fit in range; keep them so the range check fails.
    for n in INTEGER_RE
        .find_iter(reply)
        .map(|m| m.as_str().parse().unwrap_or(usize::MAX))
    {
        if !seen.contains(&n) {
            seen.push(n);
        }
    }
    seen
}
