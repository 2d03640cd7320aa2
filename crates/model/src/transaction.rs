use bson::oid::ObjectId;
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::decimal::Decimal;

/// Append-only ledger row. Written by the checkout/payout pipelines,
/// never by the analytics engine.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Transaction {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub owner: ObjectId,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub date_time: DateTime<Utc>,
    pub transaction_type: TransactionType,
    pub status: TransactionStatus,
    pub amount: Decimal,
    pub tax: Decimal,
    pub reference: Option<String>,
    pub customer: Option<ObjectId>,
}

impl Transaction {
    /// Timestamp on the host clock, the convention all window and bucket
    /// math uses.
    pub fn local_time(&self) -> DateTime<Local> {
        self.date_time.with_timezone(&Local)
    }
}

#[derive(Debug, Serialize, Deserialize, Display, EnumString, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    OrderPayment,
    Refund,
    Payout,
}

#[derive(Debug, Serialize, Deserialize, Display, EnumString, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStatus {
    Pending,
    Processing,
    Completed,
}
