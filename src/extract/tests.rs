use anyhow::bail;
use chrono::NaiveDate;

use super::*;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

#[test]
fn parse_date_accepts_every_supported_format() {
    let expected = date(2021, 3, 15);
    let fragments = [
        "2021-03-15",
        "03/15/2021",
        "15/03/2021",
        "March 15, 2021",
        "Mar 15, 2021",
        "2021/03/15",
        "15-03-2021",
        "03-15-2021",
    ];

    for fragment in fragments {
        assert_eq!(parse_date(fragment), Some(expected), "fragment: {fragment}");
    }
}

#[test]
fn parse_date_resolves_ambiguous_numeric_dates_by_pattern_order() {
    assert_eq!(parse_date("03/04/2021"), Some(date(2021, 3, 4)));
    assert_eq!(parse_date("03-04-2021"), Some(date(2021, 4, 3)));
}

#[test]
fn parse_date_tolerates_surrounding_whitespace() {
    assert_eq!(parse_date("  2021-03-15 "), Some(date(2021, 3, 15)));
}

#[test]
fn parse_date_returns_none_instead_of_failing() {
    assert_eq!(parse_date("Not-A-Date"), None);
    assert_eq!(parse_date("2021-13-45"), None);
    assert_eq!(parse_date(""), None);
    assert_eq!(parse_date("$5,000.00"), None);
}

#[test]
fn parse_value_strips_currency_formatting() {
    assert_eq!(parse_value("$5,000.00"), 5000.0);
    assert_eq!(parse_value("1,234.56"), 1234.56);
    assert_eq!(parse_value("$120"), 120.0);
}

#[test]
fn parse_value_takes_first_numeric_run_in_mixed_text() {
    assert_eq!(parse_value("approx 1200 USD"), 1200.0);
    assert_eq!(parse_value("Offer123"), 123.0);
}

#[test]
fn parse_value_treats_placeholder_fragments_as_zero() {
    assert_eq!(parse_value("No award yet"), 0.0);
    assert_eq!(parse_value("not available"), 0.0);
    assert_eq!(parse_value("AWARDED"), 0.0);
    assert_eq!(parse_value(""), 0.0);
}

#[test]
fn parse_value_placeholder_check_matches_substrings_before_digits() {
    assert_eq!(parse_value("Nothing123"), 0.0);
    assert_eq!(parse_value("$Not-Available"), 0.0);
}

#[test]
fn parse_value_without_digits_is_zero() {
    assert_eq!(parse_value("$TBD"), 0.0);
    assert_eq!(parse_value("pending"), 0.0);
}

#[test]
fn marker_line_opens_a_record_and_closes_the_previous_one() {
    let mut assembler = PageAssembler::new();

    let (outcome, completed) =
        assembler.process_line("101 2021-01-01 2021-12-31 $5,000.00 Road Repair");
    assert_eq!(outcome, LineOutcome::Opened);
    assert!(completed.is_none());

    let (outcome, completed) =
        assembler.process_line("102 2022-01-01 2022-12-31 $10,000.00 Fence Work");
    assert_eq!(outcome, LineOutcome::Opened);

    let closed = completed.expect("opening a second record closes the first");
    assert_eq!(closed.contract_number.as_deref(), Some("101"));
    assert_eq!(closed.contract_name, "Road Repair");
    assert_eq!(closed.start_date, Some(date(2021, 1, 1)));
    assert_eq!(closed.expiration_date, Some(date(2021, 12, 31)));
    assert_eq!(closed.value, 5000.0);
    assert_eq!(closed.status, "Active");
}

#[test]
fn date_slots_fill_in_order_and_a_third_date_is_dropped() {
    let mut assembler = PageAssembler::new();
    assembler.process_line("300 2021-01-01 2022-01-01 2023-01-01 Paving");

    let record = assembler.finish().expect("open record flushes");
    assert_eq!(record.start_date, Some(date(2021, 1, 1)));
    assert_eq!(record.expiration_date, Some(date(2022, 1, 1)));
    assert_eq!(record.contract_name, "Paving");
}

#[test]
fn first_amount_wins_and_later_currency_tokens_join_the_name() {
    let mut assembler = PageAssembler::new();
    assembler.process_line("301 $1,000.00 $2,000.00 Paving Extras");

    let record = assembler.finish().expect("open record flushes");
    assert_eq!(record.value, 1000.0);
    assert_eq!(record.contract_name, "$2,000.00 Paving Extras");
}

#[test]
fn placeholder_tokens_never_reach_the_name_or_the_value() {
    let mut assembler = PageAssembler::new();
    assembler.process_line("400 2021-05-01 2022-05-01 Award Pending");

    let record = assembler.finish().expect("open record flushes");
    assert_eq!(record.value, 0.0);
    assert_eq!(record.contract_name, "Pending");
}

#[test]
fn missing_amount_row_keeps_default_value_and_clean_name() {
    let mut assembler = PageAssembler::new();
    assembler.process_line("105 2021-03-01 2022-02-28 No award yet Security Services");

    let record = assembler.finish().expect("open record flushes");
    assert_eq!(record.contract_number.as_deref(), Some("105"));
    assert_eq!(record.value, 0.0);
    assert_eq!(record.contract_name, "Security Services");
    assert_eq!(record.start_date, Some(date(2021, 3, 1)));
    assert_eq!(record.expiration_date, Some(date(2022, 2, 28)));
}

#[test]
fn currency_placeholder_token_still_claims_the_amount_slot() {
    let mut assembler = PageAssembler::new();
    assembler.process_line("500 2021-01-01 2022-01-01 $TBD 900 Roadwork");

    let record = assembler.finish().expect("open record flushes");
    assert_eq!(record.value, 0.0);
    assert_eq!(record.contract_name, "900 Roadwork");
}

#[test]
fn bare_digit_token_in_name_position_claims_the_amount_slot() {
    let mut assembler = PageAssembler::new();
    assembler.process_line("800 2021-01-01 2022-01-01 Unit 5 Cleaning");

    let record = assembler.finish().expect("open record flushes");
    assert_eq!(record.value, 5.0);
    assert_eq!(record.contract_name, "Unit Cleaning");
}

#[test]
fn uncurrencied_amount_with_separators_is_recognized() {
    let mut assembler = PageAssembler::new();
    assembler.process_line("700 2021-01-01 2022-01-01 12,500 Bridge Painting");

    let record = assembler.finish().expect("open record flushes");
    assert_eq!(record.value, 12500.0);
    assert_eq!(record.contract_name, "Bridge Painting");
}

#[test]
fn continuation_line_appends_verbatim_with_leading_space() {
    let mut assembler = PageAssembler::new();
    assembler.process_line("101 2021-01-01 2021-12-31 $5,000.00 Road Repair");

    let (outcome, completed) = assembler.process_line("Services Agreement Extended");
    assert_eq!(outcome, LineOutcome::Continued);
    assert!(completed.is_none());

    let record = assembler.finish().expect("open record flushes");
    assert_eq!(record.contract_name, "Road Repair Services Agreement Extended");
}

#[test]
fn continuation_whitespace_is_collapsed_before_the_append() {
    let mut assembler = PageAssembler::new();
    assembler.process_line("101 2021-01-01 2021-12-31 $5,000.00 Road Repair");
    assembler.process_line("  and   Maintenance ");

    let record = assembler.finish().expect("open record flushes");
    assert_eq!(record.contract_name, "Road Repair and Maintenance");
}

#[test]
fn wide_line_without_numeric_lead_is_dropped_not_appended() {
    let mut assembler = PageAssembler::new();
    assembler.process_line("101 2021-01-01 2021-12-31 $5,000.00 Road Repair");

    let (outcome, _) = assembler.process_line("Annual Maintenance Agreement Extended Again");
    assert_eq!(outcome, LineOutcome::Skipped(SkipReason::NonNumericLead));

    let record = assembler.finish().expect("open record flushes");
    assert_eq!(record.contract_name, "Road Repair");
}

#[test]
fn continuation_with_currency_token_is_dropped() {
    let mut assembler = PageAssembler::new();
    assembler.process_line("101 2021-01-01 2021-12-31 $5,000.00 Road Repair");

    let (outcome, _) = assembler.process_line("plus $500 surcharge");
    assert_eq!(outcome, LineOutcome::Skipped(SkipReason::CurrencyInContinuation));

    let record = assembler.finish().expect("open record flushes");
    assert_eq!(record.contract_name, "Road Repair");
}

#[test]
fn continuation_with_stop_word_is_dropped() {
    let mut assembler = PageAssembler::new();
    assembler.process_line("101 2021-01-01 2021-12-31 $5,000.00 Road Repair");

    let (outcome, _) = assembler.process_line("Not awarded");
    assert_eq!(
        outcome,
        LineOutcome::Skipped(SkipReason::PlaceholderInContinuation)
    );

    let record = assembler.finish().expect("open record flushes");
    assert_eq!(record.contract_name, "Road Repair");
}

#[test]
fn continuation_without_an_open_record_is_dropped() {
    let mut assembler = PageAssembler::new();
    let (outcome, completed) = assembler.process_line("Orphan tail line");
    assert_eq!(outcome, LineOutcome::Skipped(SkipReason::NoOpenRecord));
    assert!(completed.is_none());
    assert!(assembler.finish().is_none());
}

#[test]
fn non_data_lines_are_classified_by_skip_reason() {
    let mut assembler = PageAssembler::new();

    let (outcome, _) = assembler.process_line("   ");
    assert_eq!(outcome, LineOutcome::Skipped(SkipReason::Blank));

    let (outcome, _) = assembler.process_line("# Contract listing 2021");
    assert_eq!(outcome, LineOutcome::Skipped(SkipReason::Comment));

    let (outcome, _) = assembler.process_line("Contract Date Expiration Amount Status");
    assert_eq!(outcome, LineOutcome::Skipped(SkipReason::TableHeader));
}

#[test]
fn end_of_page_flushes_the_open_record() {
    let mut assembler = PageAssembler::new();
    assembler.process_line("101 2021-01-01 2021-12-31 $5,000.00 Road Repair");

    let record = assembler.finish().expect("open record flushes at page end");
    assert_eq!(record.contract_number.as_deref(), Some("101"));
}

#[test]
fn import_pages_round_trips_two_well_formed_lines() {
    let pages = vec![
        "101 2021-01-01 2021-12-31 $5,000.00 Road Repair\n\
         102 2022-01-01 2022-12-31 $10,000.00 Fence Work"
            .to_string(),
    ];

    let mut records = Vec::new();
    let stats = import_pages(&pages, |record| {
        records.push(record);
        Ok(())
    })
    .expect("import succeeds");

    assert_eq!(stats.pages_processed, 1);
    assert_eq!(stats.records_imported, 2);
    assert_eq!(records.len(), 2);

    assert_eq!(records[0].contract_number.as_deref(), Some("101"));
    assert_eq!(records[0].contract_name, "Road Repair");
    assert_eq!(records[0].start_date, Some(date(2021, 1, 1)));
    assert_eq!(records[0].expiration_date, Some(date(2021, 12, 31)));
    assert_eq!(records[0].value, 5000.0);

    assert_eq!(records[1].contract_number.as_deref(), Some("102"));
    assert_eq!(records[1].contract_name, "Fence Work");
    assert_eq!(records[1].start_date, Some(date(2022, 1, 1)));
    assert_eq!(records[1].expiration_date, Some(date(2022, 12, 31)));
    assert_eq!(records[1].value, 10000.0);
}

#[test]
fn assembler_state_resets_between_pages() {
    let pages = vec![
        "101 2021-01-01 2021-12-31 $5,000.00 Road Repair".to_string(),
        "orphan continuation".to_string(),
    ];

    let mut records = Vec::new();
    let stats = import_pages(&pages, |record| {
        records.push(record);
        Ok(())
    })
    .expect("import succeeds");

    assert_eq!(stats.pages_processed, 2);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].contract_name, "Road Repair");
}

#[test]
fn import_pages_counts_skipped_lines() {
    let pages = vec![
        "# heading\n\
         Contract Date Expiration Amount\n\
         101 2021-01-01 2021-12-31 $5,000.00 Road Repair\n\
         \n\
         stray note"
            .to_string(),
    ];

    let stats = import_pages(&pages, |_| Ok(())).expect("import succeeds");
    assert_eq!(stats.records_imported, 1);
    assert_eq!(stats.lines_skipped, 3);
}

#[test]
fn sink_failure_aborts_the_import_and_keeps_prior_records() {
    let pages = vec![
        "101 2021-01-01 2021-12-31 $5,000.00 Road Repair\n\
         102 2022-01-01 2022-12-31 $10,000.00 Fence Work"
            .to_string(),
    ];

    let mut records = Vec::new();
    let result = import_pages(&pages, |record| {
        if records.len() == 1 {
            bail!("sink rejected record");
        }
        records.push(record);
        Ok(())
    });

    assert!(result.is_err());
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].contract_number.as_deref(), Some("101"));
}

#[test]
fn import_pages_with_no_pages_reports_empty_stats() {
    let stats = import_pages(&[], |_| Ok(())).expect("import succeeds");
    assert_eq!(stats.pages_processed, 0);
    assert_eq!(stats.records_imported, 0);
    assert_eq!(stats.lines_skipped, 0);
}
