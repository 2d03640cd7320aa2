use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    /// Missing or inactive shop. Surfaced before any aggregation runs;
    /// a report is never partially built for an unknown shop.
    #[error("Shop not found: {0}")]
    ShopNotFound(i64),
    #[error("Unknown period: {0}")]
    UnknownPeriod(String),
    #[error("Common error: {0}")]
    Common(#[from] eyre::Error),
}
