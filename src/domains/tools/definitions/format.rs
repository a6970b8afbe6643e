//! Number formatting for tool output.
//!
//! Every helper taking an `Option` renders `N/A` for a missing value.

use crate::fmp::FinancialRecord;

const NA: &str = "N/A";

/// `$150.25`
pub fn dollars(value: Option<f64>) -> String {
    value.map_or_else(|| NA.to_string(), |v| format!("${v:.2}"))
}

/// `$1,234,567` (rounded to whole units).
pub fn whole_dollars(value: Option<f64>) -> String {
    value.map_or_else(|| NA.to_string(), |v| format!("${}", grouped(&format!("{v:.0}"))))
}

/// `48,744,900`
pub fn count(value: Option<i64>) -> String {
    value.map_or_else(|| NA.to_string(), |v| grouped(&v.to_string()))
}

/// Plain two-decimal number, for ratios.
pub fn ratio(value: Option<f64>) -> String {
    value.map_or_else(|| NA.to_string(), |v| format!("{v:.2}"))
}

/// A fraction rendered as a percentage: `0.1534` is `15.34%`.
pub fn fraction_percent(value: Option<f64>) -> String {
    value.map_or_else(|| NA.to_string(), |v| format!("{:.2}%", v * 100.0))
}

/// A value already expressed in percent: `1.25` is `1.25%`.
pub fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| NA.to_string(), |v| format!("{v:.2}%"))
}

/// `$2.9B`
pub fn billions(value: Option<f64>) -> String {
    value.map_or_else(|| NA.to_string(), |v| format!("${:.1}B", v / 1e9))
}

/// Field rendered as upstream sent it, prefixed with `$`.
pub fn verbatim_dollars(record: &FinancialRecord, key: &str) -> String {
    match record.get(key) {
        Some(_) => format!("${}", record.display(key)),
        None => NA.to_string(),
    }
}

/// Insert thousands separators into a plain decimal integer string.
fn grouped(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };

    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    format!("{sign}{out}")
}
