use chrono::Local;
use reqwest::Client;
use rusqlite::Connection;
use tokio::task::spawn_blocking;

use crate::load::{load_to_db, write_csv};
use crate::parse::extract;
use crate::progress::ProgressLog;
use crate::query::{run_query, QueryResult};
use crate::record::EnrichedBank;
use crate::transform::transform;
use crate::{info_time, EtlConfig, Result};

/// What a finished run produced.
#[derive(Debug, Clone)]
pub struct EtlReport {
    pub extracted: usize,
    pub loaded: usize,
    pub queries: Vec<QueryResult>,
}

/// Runs the whole pipeline: extract, transform, load to CSV and SQLite, then query.
/// Any failure aborts the run.
pub async fn run_etl(config: &EtlConfig) -> Result<EtlReport> {
    let start_time = Local::now();
    let progress = ProgressLog::new(&config.log_path);
    let client = Client::new();

    progress.record("Preliminaries complete. Initiating ETL process.")?;
    info_time!("Started ETL");

    progress.record("Starting data extraction.")?;
    let banks = extract(&client, &config.page_source).await?;
    let extracted = banks.len();
    info_time!(start_time, "Extracted {} banks", extracted);
    progress.record("Data extraction complete. Initiating Transformation process.")?;

    progress.record("Starting data transformation.")?;
    let enriched = transform(&client, banks, &config.rates_source).await?;
    info_time!(start_time, "Converted {} banks", enriched.len());
    progress.record("Data transformation complete. Initiating Loading process.")?;

    // rusqlite is blocking, keep it off the runtime threads.
    let (loaded, queries) = spawn_blocking({
        let config = config.clone();
        let progress = progress.clone();
        move || load_and_query(&config, &progress, &enriched)
    })
    .await??;
    info_time!(start_time, "Loaded {} rows, ran {} queries", loaded, queries.len());

    progress.record("Server Connection closed. Process Complete.")?;

    Ok(EtlReport {
        extracted,
        loaded,
        queries,
    })
}

fn load_and_query(
    config: &EtlConfig,
    progress: &ProgressLog,
    records: &[EnrichedBank],
) -> Result<(usize, Vec<QueryResult>)> {
    progress.record("Saving data to CSV.")?;
    write_csv(records, &config.csv_path)?;
    progress.record("Data saved to CSV file.")?;

    let mut conn = Connection::open(&config.db_path)?;
    progress.record("Saving data to Database.")?;
    let loaded = load_to_db(&mut conn, records, &config.table_name)?;
    progress.record("Data loaded to Database as a table, Executing queries.")?;

    let mut results = Vec::with_capacity(config.queries.len());
    for statement in &config.queries {
        progress.record(&format!("Executing Query: {statement}"))?;
        let result = run_query(&conn, statement)?;
        println!("{result}");
        progress.record("Query execution completed")?;
        results.push(result);
    }

    conn.close().map_err(|(_, e)| e)?;
    Ok((loaded, results))
}
