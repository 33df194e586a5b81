use std::sync::Arc;

use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tokio::task::spawn_blocking;

use crate::record::Bank;
use crate::request::{fetch_source, Source};
use crate::{info_time, Error, Result};

/// Fetches the page and extracts the bank table, in page order.
pub async fn extract(client: &Client, source: &Source) -> Result<Vec<Bank>> {
    let html = fetch_source(client, source).await?;
    parse_banks(html.into()).await
}

/// Parses the bank table on a blocking thread.
pub(crate) async fn parse_banks(html: Arc<String>) -> Result<Vec<Bank>> {
    let banks = spawn_blocking(move || parse_bank_table(&html)).await??;

    Ok(banks)
}

/// Extracts `(name, market cap)` rows from the first `<tbody>` of the page.
///
/// Rows without `<td>` cells (headers) and rows with fewer than three cells are skipped.
/// The name is the `title` of the second link in the name cell (the first one is the flag),
/// falling back to the cell's text. A market cap that can't be parsed becomes `0.0`.
pub fn parse_bank_table(html: &str) -> Result<Vec<Bank>> {
    let doc = Html::parse_document(html);

    // Create selectors.
    let tbody_selector = create_selector("tbody")?;
    let row_selector = create_selector("tr")?;
    let cell_selector = create_selector("td")?;
    let link_selector = create_selector("a")?;

    let tbody = doc
        .select(&tbody_selector)
        .next()
        .ok_or_else(|| Error::DataUnavailable("no <tbody> found in the page".into()))?;

    let rows: Vec<ElementRef> = tbody.select(&row_selector).collect();
    if rows.is_empty() {
        return Err(Error::DataUnavailable(
            "no <tr> rows found in the first <tbody>".into(),
        ));
    }

    let mut banks = Vec::with_capacity(rows.len());
    for row in rows {
        let cells: Vec<ElementRef> = row.select(&cell_selector).collect();
        if cells.len() < 3 {
            continue;
        }

        let name = bank_name(cells[1], &link_selector);
        let market_cap_usd = market_cap(cells[2]).unwrap_or_else(|| {
            info_time!("Unreadable market cap for {}, using 0.0", name);
            0.0
        });

        banks.push(Bank::new(name, market_cap_usd));
    }

    Ok(banks)
}

fn bank_name(cell: ElementRef, link_selector: &Selector) -> String {
    cell.select(link_selector)
        .nth(1)
        .and_then(|link| link.value().attr("title"))
        .map(str::to_string)
        .unwrap_or_else(|| cell.text().map(str::trim).collect())
}

/// Only the first child of the cell counts, the way the figure sits before any footnote markup.
/// `nan` and `inf` are unreadable too.
fn market_cap(cell: ElementRef) -> Option<f64> {
    let first = cell.children().next()?;
    let text = first.value().as_text()?;
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[inline]
fn create_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| Error::ParseMissingSelector(sel_str.into()))
}
