use std::io::{self, Write};

use anyhow::{Context, Result};

use crate::cli::ListArgs;
use crate::model::ContractRecord;
use crate::render::{format_currency, format_date};
use crate::store::{self, ContractQuery};

pub fn run(args: ListArgs) -> Result<()> {
    let connection = store::open(&args.db_path)?;
    let query = ContractQuery {
        search_field: Some(args.search_field),
        search_term: args.search,
        sort_by: args.sort_by,
        order: args.order,
        active_only: args.active_only,
    };
    let contracts = store::query_contracts(&connection, &query)?;

    if args.json {
        write_json_listing(&contracts)
    } else {
        write_text_listing(&contracts)
    }
}

fn write_json_listing(contracts: &[ContractRecord]) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());
    serde_json::to_writer_pretty(&mut output, contracts)
        .context("failed to serialize contract listing")?;
    writeln!(output)?;
    output.flush()?;
    Ok(())
}

fn write_text_listing(contracts: &[ContractRecord]) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());

    writeln!(output, "Contracts: {}", contracts.len())?;
    for contract in contracts {
        writeln!(
            output,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            contract.id.unwrap_or_default(),
            contract.contract_number.as_deref().unwrap_or("(unnumbered)"),
            contract.contract_name,
            format_date(contract.start_date),
            format_date(contract.expiration_date),
            format_currency(contract.value),
            contract.status,
        )?;
        if let Some(notes) = &contract.notes {
            writeln!(output, "\tnotes: {notes}")?;
        }
    }

    output.flush()?;
    Ok(())
}
