//! Argument extraction and result helpers shared by the financial tools.

use chrono::NaiveDate;
use rmcp::model::{CallToolResult, Content, JsonObject};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// Message returned when a symbol-taking tool gets no symbol.
pub const SYMBOL_REQUIRED: &str = "Symbol is required";

/// Extract a non-empty `symbol` argument.
///
/// Non-string values count as missing; surrounding whitespace is dropped.
pub fn symbol_argument(arguments: &JsonObject) -> Option<String> {
    arguments
        .get("symbol")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parse an optional ISO 8601 date argument.
pub fn date_argument(arguments: &JsonObject, key: &str) -> Result<Option<NaiveDate>, CallToolResult> {
    match arguments.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| error_result(&format!("Invalid {key} format. Use YYYY-MM-DD"))),
        Some(_) => Err(error_result(&format!("Invalid {key} format. Use YYYY-MM-DD"))),
    }
}

/// Integer argument given as a JSON number or a numeric string.
///
/// `Ok(None)` when absent; `invalid` is the error text when present but not
/// an integer.
pub fn integer_argument(
    arguments: &JsonObject,
    key: &str,
    invalid: &str,
) -> Result<Option<i64>, CallToolResult> {
    let parsed = match arguments.get(key) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse().ok(),
        Some(_) => None,
    };
    parsed.map(Some).ok_or_else(|| error_result(invalid))
}

/// Deserialize the whole argument object into a typed parameter struct.
pub fn deserialize_arguments<P: DeserializeOwned>(arguments: JsonObject) -> Result<P, CallToolResult> {
    serde_json::from_value(Value::Object(arguments))
        .map_err(|e| error_result(&format!("Invalid arguments: {e}")))
}

/// `Error: {message}` result.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(format!("Error: {message}"))])
}

/// Uniform "no data" result. Not an error.
pub fn no_data_result(symbol: &str) -> CallToolResult {
    text_result(format!("No data found for symbol: {symbol}"))
}

/// Successful single text block.
pub fn text_result(content: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(content)])
}


#[cfg(test)]
mod tests {
    use super::testing::{args, only_text};
    use super::*;
    use serde_json::json;

    #[test]
    fn test_symbol_argument() {
        assert_eq!(symbol_argument(&args(json!({"symbol": "AAPL"}))), Some("AAPL".into()));
        assert_eq!(symbol_argument(&args(json!({"symbol": " MSFT "}))), Some("MSFT".into()));
        assert_eq!(symbol_argument(&args(json!({"symbol": ""}))), None);
        assert_eq!(symbol_argument(&args(json!({"symbol": 42}))), None);
        assert_eq!(symbol_argument(&args(json!({}))), None);
    }

    #[test]
    fn test_date_argument() {
        let parsed = date_argument(&args(json!({"from_date": "2023-01-31"})), "from_date");
        assert_eq!(parsed.unwrap(), NaiveDate::from_ymd_opt(2023, 1, 31));

        assert_eq!(date_argument(&args(json!({})), "from_date").unwrap(), None);

        let err = date_argument(&args(json!({"to_date": "31/01/2023"})), "to_date").unwrap_err();
        assert_eq!(only_text(&err), "Error: Invalid to_date format. Use YYYY-MM-DD");
    }

    #[test]
    fn test_integer_argument() {
        let period = |value: serde_json::Value| {
            integer_argument(&args(value), "period", "Period must be a valid integer")
        };
        assert_eq!(period(json!({"period": 14})).unwrap(), Some(14));
        assert_eq!(period(json!({"period": "20"})).unwrap(), Some(20));
        assert_eq!(period(json!({"period": 14.0})).unwrap(), Some(14));
        assert_eq!(period(json!({})).unwrap(), None);
        assert!(period(json!({"period": 1.5})).is_err());

        let err = period(json!({"period": "abc"})).unwrap_err();
        assert_eq!(only_text(&err), "Error: Period must be a valid integer");
    }

    #[test]
    fn test_result_shapes() {
        let error = error_result(SYMBOL_REQUIRED);
        assert_eq!(error.is_error, Some(true));
        assert_eq!(only_text(&error), "Error: Symbol is required");

        let empty = no_data_result("ZZZZ");
        assert_ne!(empty.is_error, Some(true));
        assert_eq!(only_text(&empty), "No data found for symbol: ZZZZ");
    }
}
