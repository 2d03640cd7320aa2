pub mod campaign;
pub mod decimal;
pub mod dispute;
pub mod errors;
pub mod expense;
pub mod growth;
pub mod period;
pub mod product;
pub mod reports;
pub mod shop;
pub mod transaction;
