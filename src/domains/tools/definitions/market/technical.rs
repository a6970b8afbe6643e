//! Technical indicators tool.

use std::fmt::Write as _;
use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::{CallToolResult, JsonObject};
use serde_json::Value;
use tracing::info;

use crate::domains::tools::definitions::common::{
    SYMBOL_REQUIRED, date_argument, error_result, integer_argument, no_data_result,
    symbol_argument, text_result,
};
use crate::domains::tools::definitions::format::verbatim_dollars;
use crate::domains::tools::{FinancialTool, ToolError};
use crate::fmp::{FinancialRecord, FmpClient, IndicatorRequest, IndicatorType, TimeFrame};

const SHOWN_POINTS: usize = 5;

pub struct TechnicalIndicatorsTool {
    client: Arc<FmpClient>,
}

impl TechnicalIndicatorsTool {
    pub const NAME: &'static str = "get_technical_indicators";

    pub const DESCRIPTION: &'static str =
        "Get technical indicators for stock analysis (SMA, EMA, RSI, etc.)";

    pub fn new(client: Arc<FmpClient>) -> Self {
        Self { client }
    }

    /// Validate the arguments into a request. `Err` carries the error result.
    fn parse_request(arguments: &JsonObject) -> Result<IndicatorRequest, CallToolResult> {
        let indicator = match arguments.get("indicator_type") {
            Some(Value::String(s)) if !s.trim().is_empty() => s
                .parse::<IndicatorType>()
                .map_err(|e| error_result(&e.to_string()))?,
            _ => return Err(error_result("Indicator type is required")),
        };

        let period = integer_argument(arguments, "period", "Period must be a valid integer")?
            .ok_or_else(|| error_result("Period is required"))?;
        let period = u32::try_from(period)
            .ok()
            .filter(|p| (1..=IndicatorRequest::MAX_PERIOD).contains(p))
            .ok_or_else(|| {
                error_result(&format!(
                    "Period must be between 1 and {}",
                    IndicatorRequest::MAX_PERIOD
                ))
            })?;

        let timeframe = match arguments.get("timeframe") {
            Some(Value::String(s)) if !s.trim().is_empty() => s
                .parse::<TimeFrame>()
                .map_err(|e| error_result(&e.to_string()))?,
            None | Some(Value::Null) | Some(Value::String(_)) => TimeFrame::default(),
            Some(_) => return Err(error_result("Timeframe must be a string")),
        };

        let from = date_argument(arguments, "from_date")?;
        let to = date_argument(arguments, "to_date")?;

        Ok(IndicatorRequest::new(indicator, period)
            .with_timeframe(timeframe)
            .with_range(from, to))
    }

    pub fn format(symbol: &str, request: &IndicatorRequest, points: &[FinancialRecord]) -> String {
        let indicator = request.indicator;
        let label = indicator.as_str().to_uppercase();
        let window = match request.timeframe {
            TimeFrame::Day1 => format!("{}-day", request.period),
            other => format!("{} x {}", request.period, other),
        };

        let mut text = format!(
            "Technical Indicators for {symbol}\n\nIndicator: {label} ({window})\n\nLatest Data:"
        );

        for point in points.iter().take(SHOWN_POINTS) {
            let _ = write!(text, "\n\nDate: {}", point.display("date"));
            let _ = write!(text, "\nClose Price: {}", verbatim_dollars(point, "close"));

            if let Some(value) = point.number(indicator.as_str()) {
                if indicator.is_price_denominated() {
                    let _ = write!(text, "\n{label}: ${value:.2}");
                } else {
                    let _ = write!(text, "\n{label}: {value:.2}");
                }
            }
        }

        if points.len() > SHOWN_POINTS {
            let _ = write!(text, "\n\n... and {} more data points", points.len() - SHOWN_POINTS);
        }

        text
    }
}

#[async_trait]
impl FinancialTool for TechnicalIndicatorsTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    async fn execute(&self, arguments: JsonObject) -> Result<CallToolResult, ToolError> {
        let Some(symbol) = symbol_argument(&arguments) else {
            return Ok(error_result(SYMBOL_REQUIRED));
        };
        let request = match Self::parse_request(&arguments) {
            Ok(request) => request,
            Err(result) => return Ok(result),
        };

        info!(
            "Fetching {} ({}) on {} for {}",
            request.indicator, request.period, request.timeframe, symbol
        );
        let points = self.client.technical_indicators(&symbol, &request).await?;
        if points.is_empty() {
            return Ok(no_data_result(&symbol));
        }

        Ok(text_result(Self::format(&symbol, &request, &points)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::testing::{args, only_text};
    use crate::fmp::testing::{StubTransport, stub_client};
    use serde_json::json;

    fn tool_with(stub: &Arc<StubTransport>) -> TechnicalIndicatorsTool {
        TechnicalIndicatorsTool::new(stub_client(stub))
    }

    #[tokio::test]
    async fn test_rsi_formatting() {
        let stub = Arc::new(StubTransport::new().route(
            "/technical_indicator/",
            json!([
                {"date": "2023-12-01", "close": 189.95, "rsi": 58.4321},
                {"date": "2023-11-30", "close": 189.37, "rsi": 55.1}
            ]),
        ));

        let text = only_text(
            &tool_with(&stub)
                .execute(args(json!({"symbol": "AAPL", "indicator_type": "rsi", "period": 14})))
                .await
                .unwrap(),
        );

        assert!(text.contains("Indicator: RSI (14-day)"));
        assert!(text.contains("Date: 2023-12-01\nClose Price: $189.95\nRSI: 58.43"));
        assert!(!text.contains("more data points"));
    }

    #[tokio::test]
    async fn test_moving_average_is_price_denominated() {
        let points: Vec<_> = (0..7)
            .map(|i| json!({"date": format!("2023-12-0{}", i + 1), "close": 190, "sma": 185.456}))
            .collect();
        let stub = Arc::new(StubTransport::new().route("/technical_indicator/", json!(points)));

        let text = only_text(
            &tool_with(&stub)
                .execute(args(json!({"symbol": "AAPL", "indicator_type": "SMA", "period": "20"})))
                .await
                .unwrap(),
        );

        assert!(text.contains("SMA: $185.46"));
        assert!(text.ends_with("... and 2 more data points"));
    }

    #[tokio::test]
    async fn test_default_and_explicit_timeframe_issue_same_call() {
        let stub = Arc::new(StubTransport::new());
        let tool = tool_with(&stub);

        tool.execute(args(json!({"symbol": "AAPL", "indicator_type": "rsi", "period": 14})))
            .await
            .unwrap();
        tool.execute(args(json!({
            "symbol": "AAPL",
            "indicator_type": "rsi",
            "period": 14,
            "timeframe": "1day"
        })))
        .await
        .unwrap();

        let endpoints = stub.endpoints();
        assert_eq!(endpoints.len(), 2);
        assert_eq!(endpoints[0], endpoints[1]);
        assert!(endpoints[0].contains("period=14&type=rsi"));
    }

    #[tokio::test]
    async fn test_validation_failures_skip_upstream() {
        let stub = Arc::new(StubTransport::new());
        let tool = tool_with(&stub);

        let cases = [
            (json!({"symbol": "AAPL", "period": 14}), "Error: Indicator type is required"),
            (json!({"symbol": "AAPL", "indicator_type": "rsi"}), "Error: Period is required"),
            (
                json!({"symbol": "AAPL", "indicator_type": "rsi", "period": "abc"}),
                "Error: Period must be a valid integer",
            ),
            (
                json!({"symbol": "AAPL", "indicator_type": "rsi", "period": 0}),
                "Error: Period must be between 1 and 200",
            ),
            (
                json!({"symbol": "AAPL", "indicator_type": "rsi", "period": 201}),
                "Error: Period must be between 1 and 200",
            ),
        ];

        for (arguments, expected) in cases {
            let result = tool.execute(args(arguments)).await.unwrap();
            assert_eq!(only_text(&result), expected);
            assert_eq!(result.is_error, Some(true));
        }
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_indicator_and_timeframe_are_rejected() {
        let stub = Arc::new(StubTransport::new());
        let tool = tool_with(&stub);

        let bad_indicator = tool
            .execute(args(json!({"symbol": "AAPL", "indicator_type": "macd", "period": 14})))
            .await
            .unwrap();
        assert!(only_text(&bad_indicator).starts_with("Error: Invalid indicator type: macd"));

        let bad_timeframe = tool
            .execute(args(json!({
                "symbol": "AAPL",
                "indicator_type": "rsi",
                "period": 14,
                "timeframe": "2day"
            })))
            .await
            .unwrap();
        assert!(only_text(&bad_timeframe).starts_with("Error: Invalid timeframe: 2day"));

        assert!(stub.calls().is_empty());
    }
}
