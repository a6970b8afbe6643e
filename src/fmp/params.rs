//! Closed parameter types for upstream requests.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use thiserror::Error;

/// Per-symbol datasets served by the upstream provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Profile,
    IncomeStatement,
    Quote,
    HistoricalPrices,
    Ratios,
    DiscountedCashFlow,
    BalanceSheet,
    CashFlow,
    KeyMetrics,
    EnterpriseValues,
}

impl Dataset {
    /// Endpoint path prefix; the symbol is appended as the last segment.
    pub fn path(self) -> &'static str {
        match self {
            Self::Profile => "/profile",
            Self::IncomeStatement => "/income-statement",
            Self::Quote => "/quote",
            Self::HistoricalPrices => "/historical-price-full",
            Self::Ratios => "/ratios",
            Self::DiscountedCashFlow => "/discounted-cash-flow",
            Self::BalanceSheet => "/balance-sheet-statement",
            Self::CashFlow => "/cash-flow-statement",
            Self::KeyMetrics => "/key-metrics",
            Self::EnterpriseValues => "/enterprise-values",
        }
    }

    /// Full endpoint for a symbol, without query string.
    pub fn endpoint(self, symbol: &str) -> String {
        format!("{}/{}", self.path(), symbol_segment(symbol))
    }
}

/// Percent-encode a symbol so it stays a single path segment.
pub(crate) fn symbol_segment(symbol: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(symbol)
}

/// A string did not name a member of a closed parameter set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {kind}: {value}. Valid values: {expected}")]
pub struct InvalidParameter {
    kind: &'static str,
    value: String,
    expected: String,
}

impl InvalidParameter {
    fn new(kind: &'static str, value: &str, expected: &[&str]) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected: expected.join(", "),
        }
    }
}

/// Technical indicator kinds supported upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma,
    Ema,
    Wma,
    Dema,
    Tema,
    Williams,
    Rsi,
    Adx,
    StandardDeviation,
}

impl IndicatorType {
    pub const ALL: [IndicatorType; 9] = [
        Self::Sma,
        Self::Ema,
        Self::Wma,
        Self::Dema,
        Self::Tema,
        Self::Williams,
        Self::Rsi,
        Self::Adx,
        Self::StandardDeviation,
    ];

    /// Wire representation, also the field name carrying the value upstream.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sma => "sma",
            Self::Ema => "ema",
            Self::Wma => "wma",
            Self::Dema => "dema",
            Self::Tema => "tema",
            Self::Williams => "williams",
            Self::Rsi => "rsi",
            Self::Adx => "adx",
            Self::StandardDeviation => "standarddeviation",
        }
    }

    /// Moving averages are expressed in price units.
    pub fn is_price_denominated(self) -> bool {
        matches!(
            self,
            Self::Sma | Self::Ema | Self::Wma | Self::Dema | Self::Tema
        )
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndicatorType {
    type Err = InvalidParameter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| {
                let names: Vec<_> = Self::ALL.iter().map(|k| k.as_str()).collect();
                InvalidParameter::new("indicator type", s, &names)
            })
    }
}

/// Sampling interval for technical indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeFrame {
    Min1,
    Min5,
    Min15,
    Min30,
    Hour1,
    Hour4,
    #[default]
    Day1,
}

impl TimeFrame {
    pub const ALL: [TimeFrame; 7] = [
        Self::Min1,
        Self::Min5,
        Self::Min15,
        Self::Min30,
        Self::Hour1,
        Self::Hour4,
        Self::Day1,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Min1 => "1min",
            Self::Min5 => "5min",
            Self::Min15 => "15min",
            Self::Min30 => "30min",
            Self::Hour1 => "1hour",
            Self::Hour4 => "4hour",
            Self::Day1 => "1day",
        }
    }
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeFrame {
    type Err = InvalidParameter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|tf| tf.as_str() == wanted)
            .ok_or_else(|| {
                let names: Vec<_> = Self::ALL.iter().map(|t| t.as_str()).collect();
                InvalidParameter::new("timeframe", s, &names)
            })
    }
}

/// A fully resolved technical indicator query.
///
/// Defaults are applied here, per request, so an omitted timeframe and an
/// explicit `1day` produce the same upstream call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorRequest {
    pub indicator: IndicatorType,
    pub period: u32,
    pub timeframe: TimeFrame,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl IndicatorRequest {
    /// Upper bound accepted for `period`.
    pub const MAX_PERIOD: u32 = 200;

    /// Create a request with the default timeframe and no date range.
    pub fn new(indicator: IndicatorType, period: u32) -> Self {
        Self {
            indicator,
            period,
            timeframe: TimeFrame::default(),
            from: None,
            to: None,
        }
    }

    pub fn with_timeframe(mut self, timeframe: TimeFrame) -> Self {
        self.timeframe = timeframe;
        self
    }

    pub fn with_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.from = from;
        self.to = to;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_endpoint() {
        assert_eq!(Dataset::Profile.endpoint("AAPL"), "/profile/AAPL");
        assert_eq!(
            Dataset::BalanceSheet.endpoint("MSFT"),
            "/balance-sheet-statement/MSFT"
        );
        assert_eq!(
            Dataset::HistoricalPrices.endpoint("AAPL"),
            "/historical-price-full/AAPL"
        );
    }

    #[test]
    fn test_symbol_cannot_escape_its_path_segment() {
        assert_eq!(Dataset::Quote.endpoint("BRK.B"), "/quote/BRK.B");
        assert_eq!(Dataset::Quote.endpoint("^GSPC"), "/quote/%5EGSPC");
        assert_eq!(
            Dataset::Profile.endpoint("AAPL/../quote?apikey=x#y"),
            "/profile/AAPL%2F..%2Fquote%3Fapikey%3Dx%23y"
        );
    }

    #[test]
    fn test_indicator_parse_is_case_insensitive() {
        assert_eq!("RSI".parse::<IndicatorType>(), Ok(IndicatorType::Rsi));
        assert_eq!(
            "standarddeviation".parse::<IndicatorType>(),
            Ok(IndicatorType::StandardDeviation)
        );
    }

    #[test]
    fn test_indicator_parse_rejects_unknown() {
        let err = "macd".parse::<IndicatorType>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Invalid indicator type: macd"));
        assert!(msg.contains("sma"));
    }

    #[test]
    fn test_timeframe_default_and_parse() {
        assert_eq!(TimeFrame::default(), TimeFrame::Day1);
        assert_eq!("4hour".parse::<TimeFrame>(), Ok(TimeFrame::Hour4));
        assert!("2day".parse::<TimeFrame>().is_err());
    }

    #[test]
    fn test_price_denominated_indicators() {
        assert!(IndicatorType::Ema.is_price_denominated());
        assert!(!IndicatorType::Rsi.is_price_denominated());
    }

    #[test]
    fn test_omitted_and_explicit_default_timeframe_are_equal() {
        let omitted = IndicatorRequest::new(IndicatorType::Sma, 20);
        let explicit =
            IndicatorRequest::new(IndicatorType::Sma, 20).with_timeframe(TimeFrame::Day1);
        assert_eq!(omitted, explicit);

        let custom = omitted.clone().with_timeframe(TimeFrame::Min5);
        assert_eq!(custom.timeframe, TimeFrame::Min5);
        assert_eq!(omitted.timeframe, TimeFrame::Day1);
    }
}
