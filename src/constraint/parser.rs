//! Extracts a [`PriceConstraint`] from free text.
//!
//! Numeric forms are mutually exclusive and tried in order: approximate
//! ("around 125"), upper bound ("under 100", "80 or less"), then explicit
//! range ("50-80", "$50 to $80", "between 50 and 80"). Categorical words are
//! recorded as tags independently; at most one tag is kept and budget wins.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::types::{ParsedRequest, PriceConstraint, PriceTag, PriceThresholds};

const NUM: &str = r"(\d+(?:\.\d+)?)";

static APPROX_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"\b(?:around|about|approximately|roughly)\s*\$?\s*{NUM}"
    ))
});

static UPPER_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"\b(?:under|below|less than|no more than|up to)\s*\$?\s*{NUM}"
    ))
});

static UPPER_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"\$?\s*{NUM}\s*(?:or less|or under|max)\b")));

static RANGE_DASH_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"\$?{NUM}\s*[-–—]\s*\$?{NUM}")));

static RANGE_TO_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"\${NUM}\s+to\s+\$?{NUM}")));

static RANGE_BETWEEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"\bbetween\s*\$?\s*{NUM}\s*(?:and|to|-)\s*\$?\s*{NUM}"
    ))
});

static BUDGET_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\b(?:budget|affordable|cheap|inexpensive|value)\b"));

static PREMIUM_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"\b(?:premium|expensive|luxury|luxurious|high-end|splurge|special occasion)\b")
});

// Patterns are built from literals; a compile failure is a programming error.
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in price pattern is valid")
}

/// Parses price hints out of a request.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstraintParser {
    thresholds: PriceThresholds,
}

impl ConstraintParser {
    pub fn new(thresholds: PriceThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &PriceThresholds {
        &self.thresholds
    }

    /// Never fails: unrecognized text yields an empty constraint.
    pub fn parse(&self, request: &str) -> ParsedRequest {
        let lowered = request.to_lowercase();

        let (lower, upper) = self.numeric_bounds(&lowered);
        let tags = categorical_tag(&lowered).into_iter().collect();

        let constraint = PriceConstraint { lower, upper, tags };
        debug!(
            lower = ?constraint.lower,
            upper = ?constraint.upper,
            tags = ?constraint.tags,
            "Parsed price constraint"
        );

        ParsedRequest {
            constraint,
            query: request.to_string(),
        }
    }

    fn numeric_bounds(&self, text: &str) -> (Option<f64>, Option<f64>) {
        if let Some(n) = capture_number(&APPROX_RE, text) {
            let band = n * self.thresholds.approx_tolerance;
            return (Some((n - band).round()), Some((n + band).round()));
        }

        if let Some(n) =
            capture_number(&UPPER_PREFIX_RE, text).or_else(|| capture_number(&UPPER_SUFFIX_RE, text))
        {
            return (None, Some(n));
        }

        let range = [&*RANGE_BETWEEN_RE, &*RANGE_TO_RE, &*RANGE_DASH_RE]
            .into_iter()
            .find_map(|re| capture_pair(re, text));
        if let Some((a, b)) = range {
            return (Some(a.min(b)), Some(a.max(b)));
        }

        (None, None)
    }
}

/// Convenience wrapper using default thresholds.
pub fn parse_request(request: &str) -> ParsedRequest {
    ConstraintParser::default().parse(request)
}

fn categorical_tag(text: &str) -> Option<PriceTag> {
    if BUDGET_RE.is_match(text) {
        Some(PriceTag::Budget)
    } else if PREMIUM_RE.is_match(text) {
        Some(PriceTag::Premium)
    } else {
        None
    }
}

fn capture_number(re: &Regex, text: &str) -> Option<f64> {
    re.captures(text)?.get(1)?.as_str().parse().ok()
}

fn capture_pair(re: &Regex, text: &str) -> Option<(f64, f64)> {
    let caps = re.captures(text)?;
    let a = caps.get(1)?.as_str().parse().ok()?;
    let b = caps.get(2)?.as_str().parse().ok()?;
    Some((a, b))
}
