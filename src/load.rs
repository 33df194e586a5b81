use std::path::Path;

use rusqlite::{params, Connection};

use crate::record::{EnrichedBank, COLUMNS};
use crate::{Error, Result};

/// Overwrites `path` with a header row followed by one row per record.
/// The header is written even when there are no records.
pub fn write_csv(records: &[EnrichedBank], path: &Path) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    wtr.write_record(COLUMNS)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn read_csv(path: &Path) -> Result<Vec<EnrichedBank>> {
    let mut rdr = csv::Reader::from_path(path)?;
    let records = rdr.deserialize().collect::<core::result::Result<Vec<_>, _>>()?;
    Ok(records)
}

/// Replaces `table` with the given records: the table is dropped, recreated and filled
/// inside a single transaction. Returns the number of rows written.
pub fn load_to_db(conn: &mut Connection, records: &[EnrichedBank], table: &str) -> Result<usize> {
    let table = quoted_table_name(table)?;
    let [name, usd, gbp, eur, inr] = COLUMNS;

    let tx = conn.transaction()?;
    tx.execute(&format!("DROP TABLE IF EXISTS {table}"), [])?;
    tx.execute(
        &format!(
            "CREATE TABLE {table} (
                {name} TEXT NOT NULL,
                {usd} REAL NOT NULL,
                {gbp} REAL NOT NULL,
                {eur} REAL NOT NULL,
                {inr} REAL NOT NULL
            )"
        ),
        [],
    )?;
    {
        let mut stmt = tx.prepare(&format!(
            "INSERT INTO {table} ({name}, {usd}, {gbp}, {eur}, {inr}) VALUES (?1, ?2, ?3, ?4, ?5)"
        ))?;
        for r in records {
            stmt.execute(params![
                r.name,
                r.market_cap_usd,
                r.market_cap_gbp,
                r.market_cap_eur,
                r.market_cap_inr
            ])?;
        }
    }
    tx.commit()?;

    Ok(records.len())
}

/// Reads every row of `table` back in insertion order.
pub fn read_table(conn: &Connection, table: &str) -> Result<Vec<EnrichedBank>> {
    let table = quoted_table_name(table)?;
    let columns = COLUMNS.join(", ");
    let mut stmt = conn.prepare(&format!("SELECT {columns} FROM {table} ORDER BY rowid"))?;
    let records = stmt
        .query_map([], |row| {
            Ok(EnrichedBank {
                name: row.get(0)?,
                market_cap_usd: row.get(1)?,
                market_cap_gbp: row.get(2)?,
                market_cap_eur: row.get(3)?,
                market_cap_inr: row.get(4)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(records)
}

/// Table names go into the SQL text, so only plain identifiers are accepted.
fn quoted_table_name(table: &str) -> Result<String> {
    let valid = table
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && table.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(Error::InvalidTableName(table.to_string()));
    }
    Ok(format!("\"{table}\""))
}
