use anyhow::{Result, bail};
use tracing::info;

use crate::cli::ImportArgs;
use crate::extract;
use crate::store::{self, ImportRunRecord};
use crate::util::{now_utc_string, sha256_file};

pub fn run(args: ImportArgs) -> Result<()> {
    if !args.pdf_path.exists() {
        bail!("PDF file not found at: {}", args.pdf_path.display());
    }

    let started_at = now_utc_string();
    let source_sha256 = sha256_file(&args.pdf_path)?;
    let connection = store::open(&args.db_path)?;

    let stats = extract::import_document(&args.pdf_path, |record| {
        store::insert_contract(&connection, &record).map(|_| ())
    })?;

    store::record_import_run(
        &connection,
        &ImportRunRecord {
            source_path: args.pdf_path.display().to_string(),
            source_sha256,
            started_at,
            pages_processed: stats.pages_processed,
            records_imported: stats.records_imported,
            lines_skipped: stats.lines_skipped,
        },
    )?;

    info!(
        path = %args.pdf_path.display(),
        pages = stats.pages_processed,
        imported = stats.records_imported,
        skipped = stats.lines_skipped,
        "import complete"
    );
    Ok(())
}
