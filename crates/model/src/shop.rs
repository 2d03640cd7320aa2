use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Vendor store record. The engine never filters ledger rows by shop:
/// every query goes shop -> owner -> transactions.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Shop {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// Public integer identifier supplied by callers.
    pub shop_id: i64,
    pub owner: ObjectId,
    pub name: String,
    pub country: String,
    pub active: bool,
}
