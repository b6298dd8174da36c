use anyhow::{Result, bail};
use tracing::info;

use crate::cli::EditArgs;
use crate::commands::parse_cli_date;
use crate::store;

pub fn run(args: EditArgs) -> Result<()> {
    let connection = store::open(&args.db_path)?;
    let mut record = match store::get_contract(&connection, args.id)? {
        Some(record) => record,
        None => bail!("no contract with id {}", args.id),
    };

    if let Some(raw_number) = args.contract_number.as_deref() {
        let contract_number = raw_number.trim();
        if contract_number.is_empty() {
            bail!("contract number is required");
        }
        if store::contract_number_in_use(&connection, contract_number, Some(args.id))? {
            bail!("contract number {contract_number} is already used by another contract");
        }
        record.contract_number = Some(contract_number.to_string());
    }

    if let Some(raw_name) = args.contract_name.as_deref() {
        let contract_name = raw_name.trim();
        if contract_name.is_empty() {
            bail!("contract name is required");
        }
        record.contract_name = contract_name.to_string();
    }

    if let Some(raw_date) = args.start_date.as_deref() {
        record.start_date = parse_cli_date(Some(raw_date))?;
    }
    if let Some(raw_date) = args.expiration_date.as_deref() {
        record.expiration_date = parse_cli_date(Some(raw_date))?;
    }
    if let Some(value) = args.value {
        record.value = value;
    }
    if let Some(status) = args.status {
        record.status = status;
    }
    if let Some(notes) = args.notes {
        record.notes = if notes.trim().is_empty() { None } else { Some(notes) };
    }

    store::update_contract(&connection, args.id, &record)?;
    info!(id = args.id, "contract updated");
    Ok(())
}
