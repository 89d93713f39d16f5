use crate::constraint::PriceThresholds;
use crate::llm::Prompt;
use crate::vectordb::Candidate;

pub const SELECTION_SYSTEM: &str =
    "You are an expert sommelier helping a restaurant guest choose from the wine list.";

/// Numbered candidate list plus instructions. Numbering starts at 1.
pub fn selection_prompt(query: &str, candidates: &[Candidate], thresholds: &PriceThresholds) -> Prompt {
    let mut listing = String::new();
    for (i, candidate) in candidates.iter().enumerate() {
        let item = &candidate.item;
        let price = item
            .display_price(thresholds)
            .map(|p| format!("${p:.0}"))
            .unwrap_or_else(|| "unknown".to_string());

        let mut lines = vec![
            format!("Wine {}:", i + 1),
            format!("- Producer: {}", item.producer),
        ];
        if !item.label.is_empty() {
            lines.push(format!("- Wine: {}", item.label));
        }
        lines.push(format!("- Region: {}, {}", item.region, item.country));
        lines.push(format!("- Grapes: {}", item.grapes));
        lines.push(format!("- Type: {}", item.category));
        lines.push(format!("- Price: {price}"));
        lines.push(format!("- Vintage: {}", item.vintage.as_deref().unwrap_or("NV")));
        if !item.blurb.is_empty() {
            lines.push(format!("- Notes: {}", item.blurb));
        }
        lines.push(format!("- Similarity: {:.2}", candidate.score));

        listing.push_str(&lines.join("\n"));
        listing.push('\n');
        listing.push('\n');
    }

    let user = format!(
        "A guest asked: \"{query}\"\n\n\
         Here are the top options:\n\n\
         {listing}\
         Select the 2 wines that best match this request. Consider:\n\
         1. How well each matches the guest's preferences (price, grape, region, body)\n\
         2. Variety: the two should offer different experiences\n\
         3. Value and quality\n\n\
         Respond with ONLY the two wine numbers separated by a comma (e.g. \"1,7\")."
    );

    Prompt::new(SELECTION_SYSTEM, user)
}
