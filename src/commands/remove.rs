use anyhow::Result;
use tracing::info;

use crate::cli::RemoveArgs;
use crate::store;

pub fn run(args: RemoveArgs) -> Result<()> {
    let connection = store::open(&args.db_path)?;
    store::delete_contract(&connection, args.id)?;
    info!(id = args.id, "contract removed");
    Ok(())
}
