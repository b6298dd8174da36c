use crate::model::ContractRecord;
use crate::util::normalize_whitespace;

use super::classify::{PLACEHOLDER_WORDS, parse_date, parse_value};

pub const TABLE_HEADER_PHRASE: &str = "Contract Date Expiration Amount";

const RECORD_MARKER_MIN_TOKENS: usize = 4;
const CONTINUATION_STOP_WORDS: [&str; 3] = ["yet", "awarded", "available"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    Opened,
    Continued,
    Skipped(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Blank,
    Comment,
    TableHeader,
    NonNumericLead,
    NoOpenRecord,
    CurrencyInContinuation,
    PlaceholderInContinuation,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Blank => "blank",
            Self::Comment => "comment",
            Self::TableHeader => "table-header",
            Self::NonNumericLead => "non-numeric-lead",
            Self::NoOpenRecord => "no-open-record",
            Self::CurrencyInContinuation => "currency-in-continuation",
            Self::PlaceholderInContinuation => "placeholder-in-continuation",
        }
    }
}

#[derive(Debug, Default)]
pub struct PageAssembler {
    current: Option<ContractRecord>,
    amount_found: bool,
}

impl PageAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process_line(&mut self, raw_line: &str) -> (LineOutcome, Option<ContractRecord>) {
        let line = normalize_whitespace(raw_line);

        if line.is_empty() {
            return (LineOutcome::Skipped(SkipReason::Blank), None);
        }
        if line.starts_with('#') {
            return (LineOutcome::Skipped(SkipReason::Comment), None);
        }
        if line.contains(TABLE_HEADER_PHRASE) {
            return (LineOutcome::Skipped(SkipReason::TableHeader), None);
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() >= RECORD_MARKER_MIN_TOKENS {
            if is_all_digits(tokens[0]) {
                let completed = self.open_record(&tokens);
                return (LineOutcome::Opened, completed);
            }
            return (LineOutcome::Skipped(SkipReason::NonNumericLead), None);
        }

        self.continue_record(&line, &tokens)
    }

    pub fn finish(mut self) -> Option<ContractRecord> {
        self.current.take()
    }

    fn open_record(&mut self, tokens: &[&str]) -> Option<ContractRecord> {
        let completed = self.current.take();

        let mut record = ContractRecord {
            contract_number: Some(tokens[0].to_string()),
            ..ContractRecord::default()
        };
        self.amount_found = false;

        let mut name_parts: Vec<&str> = Vec::new();
        for token in &tokens[1..] {
            if let Some(date) = parse_date(token) {
                if record.start_date.is_none() {
                    record.start_date = Some(date);
                } else if record.expiration_date.is_none() {
                    record.expiration_date = Some(date);
                }
                continue;
            }

            if !self.amount_found && (token.starts_with('$') || is_amount_shaped(token)) {
                record.value = parse_value(token);
                self.amount_found = true;
                continue;
            }

            if PLACEHOLDER_WORDS.contains(&token.to_lowercase().as_str()) {
                continue;
            }

            name_parts.push(token);
        }

        record.contract_name = name_parts.join(" ");
        self.current = Some(record);
        completed
    }

    fn continue_record(&mut self, line: &str, tokens: &[&str]) -> (LineOutcome, Option<ContractRecord>) {
        let Some(record) = self.current.as_mut() else {
            return (LineOutcome::Skipped(SkipReason::NoOpenRecord), None);
        };

        if tokens.iter().any(|token| token.starts_with('$')) {
            return (LineOutcome::Skipped(SkipReason::CurrencyInContinuation), None);
        }

        if tokens
            .iter()
            .any(|token| CONTINUATION_STOP_WORDS.contains(&token.to_lowercase().as_str()))
        {
            return (LineOutcome::Skipped(SkipReason::PlaceholderInContinuation), None);
        }

        record.contract_name.push(' ');
        record.contract_name.push_str(line);
        (LineOutcome::Continued, None)
    }
}

fn is_all_digits(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|character| character.is_ascii_digit())
}

fn is_amount_shaped(token: &str) -> bool {
    let stripped: String = token
        .chars()
        .filter(|character| *character != ',' && *character != '.')
        .collect();
    is_all_digits(&stripped)
}
