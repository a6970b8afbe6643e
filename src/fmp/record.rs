//! Schema-less financial record returned by the gateway.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One upstream record: a mapping from field name to scalar or nested value.
///
/// No schema is enforced. Operations read only the fields they need and
/// treat absence (or JSON `null`) as "unknown".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FinancialRecord(Map<String, Value>);

impl FinancialRecord {
    /// Create a record from a JSON object.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Whether the record carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw access to a field. `null` is reported as absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    /// Numeric field as `f64`.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    /// Numeric field as an integer. Floats are truncated.
    pub fn integer(&self, key: &str) -> Option<i64> {
        let value = self.get(key)?;
        value
            .as_i64()
            .or_else(|| value.as_f64().map(|f| f as i64))
    }

    /// String field.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Render a scalar field verbatim, or `N/A` when absent.
    ///
    /// Strings are rendered without quotes, numbers in their JSON form.
    pub fn display(&self, key: &str) -> String {
        match self.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "N/A".to_string(),
        }
    }
}

impl From<Map<String, Value>> for FinancialRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> FinancialRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_number_and_text_access() {
        let r = record(json!({"symbol": "AAPL", "price": 150.25, "volume": 48744900}));
        assert_eq!(r.text("symbol"), Some("AAPL"));
        assert_eq!(r.number("price"), Some(150.25));
        assert_eq!(r.integer("volume"), Some(48_744_900));
        assert_eq!(r.number("missing"), None);
    }

    #[test]
    fn test_null_is_absent() {
        let r = record(json!({"price": null}));
        assert!(r.get("price").is_none());
        assert_eq!(r.display("price"), "N/A");
    }

    #[test]
    fn test_display_renders_scalars_verbatim() {
        let r = record(json!({"date": "2023-12-01", "close": 189.95}));
        assert_eq!(r.display("date"), "2023-12-01");
        assert_eq!(r.display("close"), "189.95");
        assert_eq!(r.display("open"), "N/A");
    }

    #[test]
    fn test_empty_record() {
        assert!(FinancialRecord::default().is_empty());
        assert!(!record(json!({"a": 1})).is_empty());
    }
}
