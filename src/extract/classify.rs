use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::util::normalize_whitespace;

static AMOUNT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.?\d*").expect("valid amount regex"));

pub const DATE_FORMATS: [&str; 8] = [
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%Y/%m/%d",
    "%d-%m-%Y",
    "%m-%d-%Y",
];

pub const PLACEHOLDER_WORDS: [&str; 6] = ["no", "not", "award", "awarded", "yet", "available"];

pub fn parse_date(fragment: &str) -> Option<NaiveDate> {
    let cleaned = normalize_whitespace(fragment);
    if cleaned.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(&cleaned, format).ok())
}

pub fn parse_value(fragment: &str) -> f64 {
    if fragment.is_empty() {
        return 0.0;
    }

    let lowered = fragment.to_lowercase();
    if PLACEHOLDER_WORDS.iter().any(|word| lowered.contains(word)) {
        return 0.0;
    }

    let stripped = fragment.replace(['$', ','], "");
    AMOUNT_PATTERN
        .find(&stripped)
        .and_then(|amount| amount.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}
