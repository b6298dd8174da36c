use anyhow::Result;
use tracing::info;

use crate::cli::ReportArgs;
use crate::render::{self, ReportOptions};
use crate::store::{self, ContractQuery};

pub fn run(args: ReportArgs) -> Result<()> {
    let connection = store::open(&args.db_path)?;
    let query = ContractQuery {
        sort_by: args.sort_by,
        order: args.order,
        active_only: args.active_only,
        ..ContractQuery::default()
    };
    let contracts = store::query_contracts(&connection, &query)?;

    let options = ReportOptions {
        sort_by: args.sort_by,
        order: args.order,
        style: args.style,
    };
    render::write_report(&args.output_path, &contracts, &options)?;

    info!(
        path = %args.output_path.display(),
        contracts = contracts.len(),
        "report written"
    );
    Ok(())
}
