//! Market data: quotes, prices, volume, indices, sectors, indicators.

pub mod historical;
pub mod indices;
pub mod quote;
pub mod sectors;
pub mod technical;
pub mod volume;

pub use historical::HistoricalPricesTool;
pub use indices::MarketIndicesTool;
pub use quote::StockQuoteTool;
pub use sectors::SectorPerformanceTool;
pub use technical::TechnicalIndicatorsTool;
pub use volume::TradingVolumeTool;
