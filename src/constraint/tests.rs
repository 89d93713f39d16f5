use super::*;

fn bounds(text: &str) -> (Option<f64>, Option<f64>) {
    let parsed = parse_request(text);
    (parsed.constraint.lower, parsed.constraint.upper)
}

#[test]
fn test_under_sets_upper_only() {
    assert_eq!(bounds("a bold red under $100"), (None, Some(100.0)));
    assert_eq!(bounds("something below 60"), (None, Some(60.0)));
    assert_eq!(bounds("less than $45 please"), (None, Some(45.0)));
}

#[test]
fn test_or_less_suffix() {
    assert_eq!(bounds("pinot, $80 or less"), (None, Some(80.0)));
}

#[test]
fn test_around_applies_tolerance_band() {
    assert_eq!(bounds("something around $125"), (Some(88.0), Some(163.0)));
    assert_eq!(bounds("about 100"), (Some(70.0), Some(130.0)));
    assert_eq!(bounds("Around $50"), (Some(35.0), Some(65.0)));
}

#[test]
fn test_custom_tolerance() {
    let parser = ConstraintParser::new(PriceThresholds {
        approx_tolerance: 0.1,
        ..PriceThresholds::default()
    });
    let parsed = parser.parse("around 100");
    assert_eq!(parsed.constraint.lower, Some(90.0));
    assert_eq!(parsed.constraint.upper, Some(110.0));
}

#[test]
fn test_explicit_ranges() {
    assert_eq!(bounds("$50-$80 syrah"), (Some(50.0), Some(80.0)));
    assert_eq!(bounds("50 – 80"), (Some(50.0), Some(80.0)));
    assert_eq!(bounds("$40 to $70 white"), (Some(40.0), Some(70.0)));
    assert_eq!(bounds("between 30 and 60"), (Some(30.0), Some(60.0)));
}

#[test]
fn test_reversed_range_is_normalised() {
    let parsed = parse_request("$90-$60");
    assert_eq!(parsed.constraint.lower, Some(60.0));
    assert_eq!(parsed.constraint.upper, Some(90.0));
}

#[test]
fn test_approximate_takes_priority_over_range() {
    assert_eq!(bounds("around 100, maybe 80-120"), (Some(70.0), Some(130.0)));
}

#[test]
fn test_upper_takes_priority_over_range() {
    assert_eq!(bounds("under 100, ideally 60-90"), (None, Some(100.0)));
}

#[test]
fn test_budget_tag() {
    let parsed = parse_request("an affordable rosé");
    assert_eq!(parsed.constraint.tags, vec![PriceTag::Budget]);
    assert!(!parsed.constraint.has_bounds());
}

#[test]
fn test_premium_tag() {
    let parsed = parse_request("something for a special occasion");
    assert_eq!(parsed.constraint.tags, vec![PriceTag::Premium]);
    assert_eq!(
        parsed.constraint.tag_buckets(),
        vec![PriceBucket::Premium, PriceBucket::Luxury]
    );
}

#[test]
fn test_budget_wins_over_premium() {
    let parsed = parse_request("premium taste on a budget");
    assert_eq!(parsed.constraint.tags, vec![PriceTag::Budget]);
}

#[test]
fn test_inexpensive_is_not_premium() {
    let parsed = parse_request("inexpensive white");
    assert_eq!(parsed.constraint.tags, vec![PriceTag::Budget]);
}

#[test]
fn test_tags_kept_alongside_numbers() {
    let parsed = parse_request("cheap red under 30");
    assert_eq!(parsed.constraint.upper, Some(30.0));
    assert_eq!(parsed.constraint.tags, vec![PriceTag::Budget]);
}

#[test]
fn test_no_hints_is_empty() {
    let parsed = parse_request("a crisp white from the Loire");
    assert!(parsed.constraint.is_empty());
    assert_eq!(parsed.query, "a crisp white from the Loire");
}

#[test]
fn test_query_is_unmodified() {
    let text = "Bold Napa Cab under $100";
    assert_eq!(parse_request(text).query, text);
}

#[test]
fn test_lower_never_exceeds_upper() {
    for text in ["around 3", "$10-$5", "between 9 and 1", "around 999.5"] {
        let c = parse_request(text).constraint;
        if let (Some(lo), Some(hi)) = (c.lower, c.upper) {
            assert!(lo <= hi, "{text}: {lo} > {hi}");
        }
    }
}

#[test]
fn test_constraint_admits() {
    let c = PriceConstraint {
        lower: Some(50.0),
        upper: Some(80.0),
        tags: vec![],
    };
    assert!(c.admits(50.0));
    assert!(c.admits(80.0));
    assert!(!c.admits(80.01));
    assert!(!c.admits(49.0));
}

#[test]
fn test_bucket_for_price() {
    let t = PriceThresholds::default();
    assert_eq!(PriceBucket::for_price(20.0, &t), PriceBucket::Budget);
    assert_eq!(PriceBucket::for_price(50.0, &t), PriceBucket::Mid);
    assert_eq!(PriceBucket::for_price(150.0, &t), PriceBucket::Premium);
    assert_eq!(PriceBucket::for_price(200.0, &t), PriceBucket::Luxury);
}

#[test]
fn test_bucket_parse_accepts_legacy_labels() {
    assert_eq!(PriceBucket::parse("<$50"), Some(PriceBucket::Budget));
    assert_eq!(PriceBucket::parse("$50-100"), Some(PriceBucket::Mid));
    assert_eq!(PriceBucket::parse("$100-200"), Some(PriceBucket::Premium));
    assert_eq!(PriceBucket::parse("$200+"), Some(PriceBucket::Luxury));
    assert_eq!(PriceBucket::parse("mid"), Some(PriceBucket::Mid));
    assert_eq!(PriceBucket::parse("cheap-ish"), None);
}

#[test]
fn test_bucket_estimates() {
    let t = PriceThresholds::default();
    assert_eq!(PriceBucket::Budget.estimated_price(&t), 40.0);
    assert_eq!(PriceBucket::Mid.estimated_price(&t), 75.0);
    assert_eq!(PriceBucket::Premium.estimated_price(&t), 150.0);
    assert_eq!(PriceBucket::Luxury.estimated_price(&t), 250.0);
}

#[test]
fn test_wants_pairing() {
    assert!(wants_pairing("What goes with my steak?"));
    assert!(wants_pairing("a red to PAIR with dinner"));
    assert!(!wants_pairing("a crisp white under $40"));
    // substring of an unrelated word
    assert!(!wants_pairing("an eatery-style repertoire"));
}
