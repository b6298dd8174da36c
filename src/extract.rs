mod assembler;
mod classify;
#[cfg(test)]
mod tests;

pub use assembler::{LineOutcome, PageAssembler, SkipReason, TABLE_HEADER_PHRASE};
pub use classify::{DATE_FORMATS, PLACEHOLDER_WORDS, parse_date, parse_value};

use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, bail};
use tracing::{debug, info};

use crate::model::ContractRecord;

#[derive(Debug, Default)]
pub struct ImportStats {
    pub pages_processed: usize,
    pub records_imported: usize,
    pub lines_skipped: usize,
}

pub fn import_document(
    pdf_path: &Path,
    sink: impl FnMut(ContractRecord) -> Result<()>,
) -> Result<ImportStats> {
    let pages = extract_pages_with_pdftotext(pdf_path)?;
    info!(
        path = %pdf_path.display(),
        pages = pages.len(),
        "extracted text layer from document"
    );
    import_pages(&pages, sink)
}

pub fn import_pages(
    pages: &[String],
    mut sink: impl FnMut(ContractRecord) -> Result<()>,
) -> Result<ImportStats> {
    let mut stats = ImportStats::default();

    for (page_index, page_text) in pages.iter().enumerate() {
        let page_number = page_index + 1;
        let mut assembler = PageAssembler::new();

        for raw_line in page_text.lines() {
            let (outcome, completed) = assembler.process_line(raw_line);

            if let Some(record) = completed {
                debug!(page = page_number, name = %record.contract_name, "completed contract record");
                sink(record).context("failed to persist contract record")?;
                stats.records_imported += 1;
            }

            if let LineOutcome::Skipped(reason) = outcome {
                stats.lines_skipped += 1;
                debug!(page = page_number, reason = reason.as_str(), line = raw_line, "skipped line");
            }
        }

        if let Some(record) = assembler.finish() {
            debug!(page = page_number, name = %record.contract_name, "completed contract record");
            sink(record).context("failed to persist contract record")?;
            stats.records_imported += 1;
        }

        stats.pages_processed += 1;
    }

    Ok(stats)
}

fn extract_pages_with_pdftotext(pdf_path: &Path) -> Result<Vec<String>> {
    let mut command = Command::new("pdftotext");
    command.arg("-enc").arg("UTF-8");
    command.arg(pdf_path).arg("-");

    let output = command
        .output()
        .with_context(|| format!("failed to execute pdftotext for {}", pdf_path.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "pdftotext returned non-zero exit status for {}: {}",
            pdf_path.display(),
            stderr.trim()
        );
    }

    let raw = String::from_utf8_lossy(&output.stdout);
    let mut pages: Vec<String> = raw
        .split('\u{000C}')
        .map(|chunk| chunk.replace('\u{0000}', ""))
        .collect();

    while let Some(last_page) = pages.last() {
        if last_page.trim().is_empty() {
            pages.pop();
            continue;
        }
        break;
    }

    Ok(pages)
}
