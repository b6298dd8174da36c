use anyhow::{Result, bail};
use tracing::info;

use crate::cli::AddArgs;
use crate::commands::parse_cli_date;
use crate::model::ContractRecord;
use crate::store;

pub fn run(args: AddArgs) -> Result<()> {
    let contract_number = args.contract_number.trim().to_string();
    if contract_number.is_empty() {
        bail!("contract number is required");
    }
    let contract_name = args.contract_name.trim().to_string();
    if contract_name.is_empty() {
        bail!("contract name is required");
    }

    let connection = store::open(&args.db_path)?;
    if store::contract_number_in_use(&connection, &contract_number, None)? {
        bail!("contract number {contract_number} already exists in the database");
    }

    let record = ContractRecord {
        id: None,
        contract_number: Some(contract_number.clone()),
        contract_name,
        start_date: parse_cli_date(args.start_date.as_deref())?,
        expiration_date: parse_cli_date(args.expiration_date.as_deref())?,
        value: args.value,
        status: args.status,
        notes: args.notes.filter(|notes| !notes.trim().is_empty()),
    };

    let id = store::insert_contract(&connection, &record)?;
    info!(id, contract_number = %contract_number, "contract added");
    Ok(())
}
