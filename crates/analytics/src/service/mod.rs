pub mod charts;
pub mod dashboard;
pub mod ledger;
pub mod metrics;
pub mod payments;
pub mod reports;
