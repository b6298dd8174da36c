pub mod add;
pub mod edit;
pub mod import;
pub mod list;
pub mod remove;
pub mod report;

use anyhow::{Context, Result};
use chrono::NaiveDate;

pub(crate) fn parse_cli_date(value: Option<&str>) -> Result<Option<NaiveDate>> {
    match value.map(str::trim) {
        None => Ok(None),
        Some("") => Ok(None),
        Some(trimmed) => {
            let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .with_context(|| format!("invalid date {trimmed:?}, expected YYYY-MM-DD"))?;
            Ok(Some(date))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::parse_cli_date;

    #[test]
    fn parse_cli_date_accepts_iso_dates() {
        let parsed = parse_cli_date(Some("2021-03-15")).expect("date parses");
        assert_eq!(parsed.map(|date| date.to_string()), Some("2021-03-15".to_string()));
    }

    #[test]
    fn parse_cli_date_maps_missing_and_blank_to_none() {
        assert_eq!(parse_cli_date(None).expect("parses"), None);
        assert_eq!(parse_cli_date(Some("")).expect("parses"), None);
        assert_eq!(parse_cli_date(Some("   ")).expect("parses"), None);
    }

    #[test]
    fn parse_cli_date_rejects_other_formats() {
        assert!(parse_cli_date(Some("03/15/2021")).is_err());
        assert!(parse_cli_date(Some("soon")).is_err());
    }
}
