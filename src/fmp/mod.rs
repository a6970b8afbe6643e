//! Upstream data gateway for the Financial Modeling Prep REST API.
//!
//! Every financial operation reads its data through [`FmpClient`], which turns
//! a logical "get X for symbol" request into a single upstream GET and
//! normalizes the payload into a sequence of [`FinancialRecord`]s. An empty
//! sequence means "no data" and is never an error.
//!
//! The raw HTTP call sits behind the [`UpstreamTransport`] trait so tests can
//! substitute a recording stub for the `reqwest` implementation.

mod client;
mod error;
mod params;
mod record;
mod transport;

pub use client::FmpClient;
pub use error::GatewayError;
pub use params::{Dataset, IndicatorRequest, IndicatorType, InvalidParameter, TimeFrame};
pub use record::FinancialRecord;
pub use transport::{ReqwestTransport, UpstreamResponse, UpstreamTransport};

#[cfg(test)]
pub(crate) use transport::testing;
