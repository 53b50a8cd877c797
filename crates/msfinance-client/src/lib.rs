use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use stock_core::{Stock, StockError};

const SEARCH_PATH: &str = "/market/v2/auto-complete";

/// Client for the ms-finance symbol auto-complete API on RapidAPI.
///
/// Both credential headers come from configuration; one best-effort lookup
/// per call, no retry.
#[derive(Clone)]
pub struct MsFinanceClient {
    api_key: String,
    api_host: String,
    client: Client,
}

impl MsFinanceClient {
    pub fn new(api_key: String, api_host: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            api_key,
            api_host,
            client,
        }
    }

    /// Look up tickers matching a query.
    ///
    /// An empty or whitespace-only query returns no results without issuing
    /// a request. Results are transient records: untracked, rank Cold.
    pub async fn search(&self, query: &str) -> Result<Vec<Stock>, StockError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("https://{}{}", self.api_host, SEARCH_PATH);
        let response = self
            .client
            .get(&url)
            .query(&[("q", query)])
            .header("x-rapidapi-key", &self.api_key)
            .header("x-rapidapi-host", &self.api_host)
            .send()
            .await
            .map_err(|e| StockError::ApiError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StockError::ApiError(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        let search_response: SearchResponse = response
            .json()
            .await
            .map_err(|e| StockError::ApiError(e.to_string()))?;

        Ok(results_to_stocks(search_response))
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchEntry>,
}

#[derive(Debug, Deserialize)]
struct SearchEntry {
    #[serde(default)]
    ticker: String,
    #[serde(default)]
    name: String,
    price: Option<f64>,
}

/// Map response entries into transient stock records, dropping entries
/// without a usable ticker or name
fn results_to_stocks(response: SearchResponse) -> Vec<Stock> {
    let mut stocks = Vec::with_capacity(response.results.len());

    for entry in response.results {
        if entry.ticker.is_empty() || entry.name.is_empty() {
            tracing::debug!("Skipping search result with missing ticker or name");
            continue;
        }

        stocks.push(Stock::discovered(
            entry.ticker,
            entry.name,
            entry.price.unwrap_or(0.0),
        ));
    }

    stocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use stock_core::StockRank;

    #[tokio::test]
    async fn test_empty_query_skips_request() {
        // The host is unroutable, so these only pass if no request is made.
        let client = MsFinanceClient::new("test-key".to_string(), "api.invalid".to_string());

        assert!(client.search("").await.unwrap().is_empty());
        assert!(client.search("   \t").await.unwrap().is_empty());
    }

    #[test]
    fn test_entries_without_ticker_or_name_are_dropped() {
        let response: SearchResponse = serde_json::from_str(
            r#"{
                "results": [
                    {"ticker": "", "name": "X"},
                    {"name": "No Ticker Corp", "price": 10.0},
                    {"ticker": "GHOST", "name": ""},
                    {"ticker": "AAPL", "name": "Apple", "price": 150.0}
                ]
            }"#,
        )
        .unwrap();

        let stocks = results_to_stocks(response);

        assert_eq!(stocks.len(), 1);
        assert_eq!(stocks[0].symbol, "AAPL");
        assert_eq!(stocks[0].name, "Apple");
        assert_eq!(stocks[0].price, 150.0);
    }

    #[test]
    fn test_missing_price_defaults_to_zero() {
        let response: SearchResponse = serde_json::from_str(
            r#"{"results": [{"ticker": "AAPL", "name": "Apple"}]}"#,
        )
        .unwrap();

        let stocks = results_to_stocks(response);

        assert_eq!(stocks[0].price, 0.0);
        assert_eq!(stocks[0].rank, StockRank::Cold);
        assert!(!stocks[0].is_active);
        assert!(!stocks[0].is_in_watchlist);
    }

    #[test]
    fn test_payload_without_results_parses_empty() {
        let response: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(results_to_stocks(response).is_empty());
    }
}
