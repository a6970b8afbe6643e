//! Financial Modeling Prep client.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::params::symbol_segment;
use super::{
    Dataset, FinancialRecord, GatewayError, IndicatorRequest, ReqwestTransport, UpstreamTransport,
};

/// Optional `from`/`to` range appended as query parameters.
#[derive(Serialize)]
struct DateRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    to: Option<NaiveDate>,
}

#[derive(Serialize)]
struct IndicatorQuery {
    period: u32,
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    to: Option<NaiveDate>,
}

/// Async gateway to the upstream provider.
///
/// Holds only immutable configuration; safe to share across concurrent calls.
#[derive(Clone)]
pub struct FmpClient {
    api_key: String,
    base_url: String,
    transport: Arc<dyn UpstreamTransport>,
}

impl fmt::Debug for FmpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FmpClient")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl FmpClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://financialmodelingprep.com/api/v3";

    /// Create a client backed by `reqwest`.
    pub fn new(
        api_key: impl Into<String>,
        base_url: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let transport = ReqwestTransport::new(timeout)?;
        Ok(Self::with_transport(
            api_key,
            base_url.unwrap_or(Self::DEFAULT_BASE_URL),
            Arc::new(transport),
        ))
    }

    /// Create a client over an arbitrary transport.
    pub fn with_transport(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        transport: Arc<dyn UpstreamTransport>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `endpoint` (path plus optional query string) and parse the JSON body.
    async fn request(&self, endpoint: &str) -> Result<Value, GatewayError> {
        if self.api_key.is_empty() {
            return Err(GatewayError::MissingApiKey);
        }

        let url = format!("{}{}", self.base_url, endpoint);
        debug!(endpoint, "Upstream request");

        let response = self
            .transport
            .get(&url, &[("apikey", self.api_key.as_str())])
            .await?;

        if response.status != 200 {
            return Err(GatewayError::Status {
                status: response.status,
                body: response.body,
            });
        }

        Ok(serde_json::from_str(&response.body)?)
    }

    /// Fetch an endpoint as a list of records.
    ///
    /// A `{"historical": [...]}` wrapper is unwrapped; any other non-list
    /// payload is reported as an empty list.
    pub async fn fetch_records(&self, endpoint: &str) -> Result<Vec<FinancialRecord>, GatewayError> {
        let payload = self.request(endpoint).await?;
        Ok(normalize(payload))
    }

    /// Fetch an endpoint and keep its first record, or an empty record.
    pub async fn fetch_first(&self, endpoint: &str) -> Result<FinancialRecord, GatewayError> {
        Ok(self
            .fetch_records(endpoint)
            .await?
            .into_iter()
            .next()
            .unwrap_or_default())
    }

    /// All records of a per-symbol dataset (statements are most recent first).
    pub async fn dataset(
        &self,
        dataset: Dataset,
        symbol: &str,
    ) -> Result<Vec<FinancialRecord>, GatewayError> {
        self.fetch_records(&dataset.endpoint(symbol)).await
    }

    /// Most recent record of a per-symbol dataset.
    pub async fn dataset_first(
        &self,
        dataset: Dataset,
        symbol: &str,
    ) -> Result<FinancialRecord, GatewayError> {
        self.fetch_first(&dataset.endpoint(symbol)).await
    }

    pub async fn company_profile(&self, symbol: &str) -> Result<FinancialRecord, GatewayError> {
        self.dataset_first(Dataset::Profile, symbol).await
    }

    pub async fn income_statement(&self, symbol: &str) -> Result<FinancialRecord, GatewayError> {
        self.dataset_first(Dataset::IncomeStatement, symbol).await
    }

    pub async fn stock_quote(&self, symbol: &str) -> Result<FinancialRecord, GatewayError> {
        self.dataset_first(Dataset::Quote, symbol).await
    }

    /// Daily prices, optionally bounded by an inclusive date range.
    pub async fn historical_prices(
        &self,
        symbol: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<FinancialRecord>, GatewayError> {
        let endpoint = with_query(
            Dataset::HistoricalPrices.endpoint(symbol),
            &DateRange { from, to },
        )?;
        self.fetch_records(&endpoint).await
    }

    pub async fn market_indices(&self) -> Result<Vec<FinancialRecord>, GatewayError> {
        self.fetch_records("/quotes/index").await
    }

    /// Volume figures come from the quote endpoint.
    pub async fn trading_volume(&self, symbol: &str) -> Result<FinancialRecord, GatewayError> {
        self.dataset_first(Dataset::Quote, symbol).await
    }

    pub async fn financial_ratios(&self, symbol: &str) -> Result<FinancialRecord, GatewayError> {
        self.dataset_first(Dataset::Ratios, symbol).await
    }

    pub async fn dcf_valuation(&self, symbol: &str) -> Result<FinancialRecord, GatewayError> {
        self.dataset_first(Dataset::DiscountedCashFlow, symbol).await
    }

    pub async fn technical_indicators(
        &self,
        symbol: &str,
        request: &IndicatorRequest,
    ) -> Result<Vec<FinancialRecord>, GatewayError> {
        let query = IndicatorQuery {
            period: request.period,
            kind: request.indicator.as_str(),
            from: request.from,
            to: request.to,
        };
        let endpoint = with_query(
            format!("/technical_indicator/{}/{}", request.timeframe, symbol_segment(symbol)),
            &query,
        )?;
        self.fetch_records(&endpoint).await
    }

    pub async fn balance_sheets(&self, symbol: &str) -> Result<Vec<FinancialRecord>, GatewayError> {
        self.dataset(Dataset::BalanceSheet, symbol).await
    }

    pub async fn income_statements(
        &self,
        symbol: &str,
    ) -> Result<Vec<FinancialRecord>, GatewayError> {
        self.dataset(Dataset::IncomeStatement, symbol).await
    }

    pub async fn cash_flow(&self, symbol: &str) -> Result<FinancialRecord, GatewayError> {
        self.dataset_first(Dataset::CashFlow, symbol).await
    }

    pub async fn key_metrics(&self, symbol: &str) -> Result<Vec<FinancialRecord>, GatewayError> {
        self.dataset(Dataset::KeyMetrics, symbol).await
    }

    pub async fn enterprise_values(&self, symbol: &str) -> Result<FinancialRecord, GatewayError> {
        self.dataset_first(Dataset::EnterpriseValues, symbol).await
    }

    pub async fn sector_performance(&self) -> Result<Vec<FinancialRecord>, GatewayError> {
        self.fetch_records("/sectors-performance").await
    }
}

/// Append a serialized query string, leaving the path untouched when empty.
fn with_query<Q: Serialize>(mut endpoint: String, query: &Q) -> Result<String, GatewayError> {
    let encoded = serde_urlencoded::to_string(query)?;
    if !encoded.is_empty() {
        endpoint.push('?');
        endpoint.push_str(&encoded);
    }
    Ok(endpoint)
}

fn normalize(payload: Value) -> Vec<FinancialRecord> {
    let items = match payload {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("historical") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };

    items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(fields) => Some(FinancialRecord::new(fields)),
            _ => None,
        })
        .collect()
}
