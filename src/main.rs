use banks_etl::{info_time, run_etl, EtlConfig, Result};
use chrono::Local;

#[tokio::main]
async fn main() -> Result<()> {
    let start_time = Local::now();
    let report = run_etl(&EtlConfig::default()).await?;
    info_time!(
        start_time,
        "Full program time: {} banks extracted, {} rows loaded, {} queries run",
        report.extracted,
        report.loaded,
        report.queries.len()
    );

    Ok(())
}
