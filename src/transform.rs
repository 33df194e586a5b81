use std::collections::HashMap;

use reqwest::Client;
use serde::Deserialize;

use crate::record::{Bank, Currency, EnrichedBank};
use crate::request::{fetch_source, Source};
use crate::{Error, Result};

#[derive(Debug, Deserialize)]
struct RateRow {
    #[serde(rename = "Currency")]
    currency: String,
    #[serde(rename = "Rate")]
    rate: f64,
}

/// Exchange rates from USD, keyed by currency code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateTable {
    rates: HashMap<String, f64>,
}

impl RateTable {
    /// Reads a `Currency,Rate` CSV. A code listed twice keeps its last rate.
    pub fn from_csv(text: &str) -> Result<Self> {
        let mut rdr = csv::Reader::from_reader(text.as_bytes());
        let mut rates = HashMap::new();
        for row in rdr.deserialize() {
            let RateRow { currency, rate } = row?;
            rates.insert(currency, rate);
        }
        Ok(Self { rates })
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn insert(&mut self, code: impl Into<String>, rate: f64) {
        self.rates.insert(code.into(), rate);
    }

    pub fn rate(&self, currency: Currency) -> Result<f64> {
        let code = currency.code();
        let rate = *self
            .rates
            .get(code)
            .ok_or_else(|| Error::MissingRate(code.to_string()))?;
        if !rate.is_finite() {
            return Err(Error::InvalidRate {
                currency: code.to_string(),
                value: rate,
            });
        }
        Ok(rate)
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for RateTable {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            rates: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Fetches and parses the rate table from a URL or a local CSV file.
pub async fn load_rates(client: &Client, source: &Source) -> Result<RateTable> {
    let text = fetch_source(client, source).await?;
    RateTable::from_csv(&text)
}

/// Loads the rate table from `rates_source` and converts every bank with it.
pub async fn transform(
    client: &Client,
    banks: Vec<Bank>,
    rates_source: &Source,
) -> Result<Vec<EnrichedBank>> {
    let rates = load_rates(client, rates_source).await?;
    enrich(banks, &rates)
}

/// Adds the GBP, EUR and INR columns to every bank, keeping the input order.
/// All rates are resolved up front, so a missing one fails before any record is converted.
pub fn enrich(banks: Vec<Bank>, rates: &RateTable) -> Result<Vec<EnrichedBank>> {
    let gbp = rates.rate(Currency::Gbp)?;
    let eur = rates.rate(Currency::Eur)?;
    let inr = rates.rate(Currency::Inr)?;

    let enriched = banks
        .into_iter()
        .map(|Bank { name, market_cap_usd }| EnrichedBank {
            name,
            market_cap_usd,
            market_cap_gbp: round2(market_cap_usd * gbp),
            market_cap_eur: round2(market_cap_usd * eur),
            market_cap_inr: round2(market_cap_usd * inr),
        })
        .collect();

    Ok(enriched)
}

#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const RATES_CSV: &str = "Currency,Rate\nEUR,0.93\nGBP,0.8\nINR,82.95\n";

    #[test]
    fn test_rate_table_from_csv() {
        let rates = RateTable::from_csv(RATES_CSV).unwrap();
        assert_eq!(rates.len(), 3);
        assert_eq!(rates.rate(Currency::Gbp).unwrap(), 0.8);
        assert_eq!(rates.rate(Currency::Eur).unwrap(), 0.93);
        assert_eq!(rates.rate(Currency::Inr).unwrap(), 82.95);
    }

    #[test]
    fn test_rate_table_last_duplicate_wins() {
        assert!(RateTable::from_csv("Currency,Rate\n").unwrap().is_empty());

        let rates = RateTable::from_csv("Currency,Rate\nGBP,0.7\nGBP,0.8\n").unwrap();
        assert_eq!(rates.len(), 1);
        assert_eq!(rates.rate(Currency::Gbp).unwrap(), 0.8);
    }

    #[test]
    fn test_rate_table_rejects_bad_rate() {
        let err = RateTable::from_csv("Currency,Rate\nGBP,abc\n").unwrap_err();
        assert!(matches!(err, Error::Csv(_)));
    }

    #[test]
    fn test_enrich_single_bank() {
        let rates: RateTable = [("GBP", 0.8), ("EUR", 0.93), ("INR", 82.95)]
            .into_iter()
            .collect();

        let enriched = enrich(vec![Bank::new("Bank A", 100.0)], &rates).unwrap();

        assert_eq!(
            enriched,
            vec![EnrichedBank {
                name: "Bank A".into(),
                market_cap_usd: 100.0,
                market_cap_gbp: 80.0,
                market_cap_eur: 93.0,
                market_cap_inr: 8295.0,
            }]
        );
    }

    #[test]
    fn test_enrich_rounds_and_keeps_order() {
        let rates = RateTable::from_csv(RATES_CSV).unwrap();
        let banks = vec![
            Bank::new("JPMorgan Chase", 432.92),
            Bank::new("Bank of America", 231.52),
            Bank::new("Zero", 0.0),
        ];

        let enriched = enrich(banks.clone(), &rates).unwrap();

        assert_eq!(enriched.len(), banks.len());
        for (bank, row) in banks.iter().zip(&enriched) {
            assert_eq!(row.name, bank.name);
            assert_eq!(row.market_cap_usd, bank.market_cap_usd);
            assert_eq!(row.market_cap_gbp, round2(bank.market_cap_usd * 0.8));
            assert_eq!(row.market_cap_eur, round2(bank.market_cap_usd * 0.93));
            assert_eq!(row.market_cap_inr, round2(bank.market_cap_usd * 82.95));
        }
        assert_eq!(enriched[0].market_cap_gbp, 346.34);
        assert_eq!(enriched[2].market_cap_inr, 0.0);
    }

    #[test]
    fn test_enrich_missing_rate() {
        let rates: RateTable = [("GBP", 0.8), ("EUR", 0.93)].into_iter().collect();

        let err = enrich(vec![Bank::new("Bank A", 1.0)], &rates).unwrap_err();
        assert!(matches!(err, Error::MissingRate(code) if code == "INR"));
    }

    #[test]
    fn test_enrich_non_finite_rate() {
        let mut rates: RateTable = [("GBP", 0.8), ("EUR", 0.93)].into_iter().collect();
        rates.insert("INR", f64::NAN);

        let err = enrich(vec![], &rates).unwrap_err();
        assert!(matches!(err, Error::InvalidRate { .. }));
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(1.236), 1.24);
        assert_eq!(round2(-2.5), -2.5);
    }

    #[tokio::test]
    async fn test_load_rates_from_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/exchange_rate.csv"))
            .respond_with(ResponseTemplate::new(200).set_body_string(RATES_CSV))
            .mount(&server)
            .await;
        let source = Source::from(format!("{}/exchange_rate.csv", server.uri()));

        let rates = load_rates(&Client::new(), &source).await.unwrap();
        assert_eq!(rates.rate(Currency::Inr).unwrap(), 82.95);

        let enriched = transform(&Client::new(), vec![Bank::new("Bank A", 100.0)], &source)
            .await
            .unwrap();
        assert_eq!(enriched[0].market_cap_gbp, 80.0);
    }
}
