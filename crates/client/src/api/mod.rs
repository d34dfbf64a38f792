//! Finnhub API endpoint groups.

pub mod news;
pub mod stock;

pub use news::NewsApi;
pub use stock::StockApi;
