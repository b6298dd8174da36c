use std::path::Path;

use anyhow::{Context, Result, bail};
use rusqlite::{Connection, OptionalExtension, params};

use crate::cli::{SearchField, SortField, SortOrder};
use crate::model::{ACTIVE_STATUS, ContractRecord};
use crate::util::now_utc_string;

const DB_SCHEMA_VERSION: &str = "0.1.0";

const CONTRACT_COLUMNS: &str =
    "id, contract_number, contract_name, start_date, expiration_date, value, status, notes";

#[derive(Debug, Clone, Default)]
pub struct ContractQuery {
    pub search_field: Option<SearchField>,
    pub search_term: Option<String>,
    pub sort_by: SortField,
    pub order: SortOrder,
    pub active_only: bool,
}

#[derive(Debug)]
pub struct ImportRunRecord {
    pub source_path: String,
    pub source_sha256: String,
    pub started_at: String,
    pub pages_processed: usize,
    pub records_imported: usize,
    pub lines_skipped: usize,
}

pub fn open(db_path: &Path) -> Result<Connection> {
    let connection = Connection::open(db_path)
        .with_context(|| format!("failed to open contract database {}", db_path.display()))?;
    configure_connection(&connection)?;
    ensure_schema(&connection)?;
    Ok(connection)
}

fn configure_connection(connection: &Connection) -> Result<()> {
    connection
        .pragma_update(None, "journal_mode", "WAL")
        .context("failed to set journal_mode=WAL")?;
    connection
        .pragma_update(None, "synchronous", "NORMAL")
        .context("failed to set synchronous=NORMAL")?;
    Ok(())
}

fn ensure_schema(connection: &Connection) -> Result<()> {
    connection.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS metadata (
          key TEXT PRIMARY KEY,
          value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS contracts (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          contract_number TEXT,
          contract_name TEXT NOT NULL DEFAULT '',
          start_date TEXT,
          expiration_date TEXT,
          value REAL NOT NULL DEFAULT 0.0,
          status TEXT NOT NULL DEFAULT 'Active',
          notes TEXT
        );

        CREATE TABLE IF NOT EXISTS import_runs (
          run_id INTEGER PRIMARY KEY AUTOINCREMENT,
          source_path TEXT NOT NULL,
          source_sha256 TEXT NOT NULL,
          started_at TEXT NOT NULL,
          pages_processed INTEGER NOT NULL,
          records_imported INTEGER NOT NULL,
          lines_skipped INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_contracts_number ON contracts(contract_number);
        CREATE INDEX IF NOT EXISTS idx_contracts_expiration ON contracts(expiration_date);
        CREATE INDEX IF NOT EXISTS idx_contracts_status ON contracts(status);
        ",
    )?;

    let now = now_utc_string();
    connection.execute(
        "INSERT INTO metadata(key, value) VALUES('db_schema_version', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        [DB_SCHEMA_VERSION],
    )?;
    connection.execute(
        "INSERT INTO metadata(key, value) VALUES('db_updated_at', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        [now],
    )?;

    Ok(())
}

pub fn insert_contract(connection: &Connection, record: &ContractRecord) -> Result<i64> {
    connection
        .execute(
            "
            INSERT INTO contracts(contract_number, contract_name, start_date, expiration_date, value, status, notes)
            VALUES(?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ",
            params![
                record.contract_number,
                record.contract_name,
                record.start_date,
                record.expiration_date,
                record.value,
                record.status,
                record.notes
            ],
        )
        .with_context(|| format!("failed to insert contract {}", record.contract_name))?;

    Ok(connection.last_insert_rowid())
}

pub fn update_contract(connection: &Connection, id: i64, record: &ContractRecord) -> Result<()> {
    let affected = connection
        .execute(
            "
            UPDATE contracts
            SET contract_number = ?1,
                contract_name = ?2,
                start_date = ?3,
                expiration_date = ?4,
                value = ?5,
                status = ?6,
                notes = ?7
            WHERE id = ?8
            ",
            params![
                record.contract_number,
                record.contract_name,
                record.start_date,
                record.expiration_date,
                record.value,
                record.status,
                record.notes,
                id
            ],
        )
        .with_context(|| format!("failed to update contract {id}"))?;

    if affected == 0 {
        bail!("no contract with id {id}");
    }
    Ok(())
}

pub fn delete_contract(connection: &Connection, id: i64) -> Result<()> {
    let affected = connection
        .execute("DELETE FROM contracts WHERE id = ?1", params![id])
        .with_context(|| format!("failed to delete contract {id}"))?;

    if affected == 0 {
        bail!("no contract with id {id}");
    }
    Ok(())
}

pub fn get_contract(connection: &Connection, id: i64) -> Result<Option<ContractRecord>> {
    let sql = format!("SELECT {CONTRACT_COLUMNS} FROM contracts WHERE id = ?1");
    let record = connection
        .query_row(&sql, params![id], read_contract_row)
        .optional()
        .with_context(|| format!("failed to load contract {id}"))?;
    Ok(record)
}

pub fn contract_number_in_use(
    connection: &Connection,
    contract_number: &str,
    exclude_id: Option<i64>,
) -> Result<bool> {
    let count: i64 = connection
        .query_row(
            "
            SELECT COUNT(*)
            FROM contracts
            WHERE contract_number = ?1
              AND (?2 IS NULL OR id != ?2)
            ",
            params![contract_number, exclude_id],
            |row| row.get(0),
        )
        .context("failed to check contract number uniqueness")?;

    Ok(count > 0)
}

pub fn query_contracts(connection: &Connection, query: &ContractQuery) -> Result<Vec<ContractRecord>> {
    let mut number_like: Option<String> = None;
    let mut name_like: Option<String> = None;
    let mut status_like: Option<String> = None;
    let mut value_equals: Option<f64> = None;
    let mut notes_like: Option<String> = None;

    let term = query.search_term.as_deref().filter(|term| !term.is_empty());
    if let (Some(field), Some(term)) = (query.search_field, term) {
        match field {
            SearchField::ContractNumber => number_like = Some(like_pattern(term)),
            SearchField::ContractName => name_like = Some(like_pattern(term)),
            SearchField::Status => status_like = Some(like_pattern(term)),
            SearchField::Value => {
                let amount: f64 = term
                    .trim()
                    .parse()
                    .with_context(|| format!("value search term must be numeric: {term}"))?;
                value_equals = Some(amount);
            }
            SearchField::Notes => notes_like = Some(like_pattern(term)),
        }
    }

    let status_equals = query.active_only.then_some(ACTIVE_STATUS);

    let sql = format!(
        "
        SELECT {CONTRACT_COLUMNS}
        FROM contracts
        WHERE
          (?1 IS NULL OR status = ?1)
          AND (?2 IS NULL OR contract_number LIKE ?2)
          AND (?3 IS NULL OR contract_name LIKE ?3)
          AND (?4 IS NULL OR status LIKE ?4)
          AND (?5 IS NULL OR value = ?5)
          AND (?6 IS NULL OR notes LIKE ?6)
        ORDER BY {} {}
        ",
        query.sort_by.as_column(),
        query.order.as_sql(),
    );

    let mut statement = connection.prepare(&sql)?;
    let mut rows = statement.query(params![
        status_equals,
        number_like,
        name_like,
        status_like,
        value_equals,
        notes_like
    ])?;

    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        out.push(read_contract_row(row)?);
    }

    Ok(out)
}

pub fn record_import_run(connection: &Connection, run: &ImportRunRecord) -> Result<()> {
    connection
        .execute(
            "
            INSERT INTO import_runs(source_path, source_sha256, started_at, pages_processed, records_imported, lines_skipped)
            VALUES(?1, ?2, ?3, ?4, ?5, ?6)
            ",
            params![
                run.source_path,
                run.source_sha256,
                run.started_at,
                run.pages_processed as i64,
                run.records_imported as i64,
                run.lines_skipped as i64
            ],
        )
        .context("failed to record import run")?;
    Ok(())
}

fn like_pattern(term: &str) -> String {
    format!("%{term}%")
}

fn read_contract_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ContractRecord> {
    Ok(ContractRecord {
        id: row.get(0)?,
        contract_number: row.get(1)?,
        contract_name: row.get(2)?,
        start_date: row.get(3)?,
        expiration_date: row.get(4)?,
        value: row.get(5)?,
        status: row.get(6)?,
        notes: row.get(7)?,
    })
}
