use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Campaign {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub created_by: ObjectId,
    pub name: String,
    pub kind: CampaignKind,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Display, EnumString, Clone, Copy, PartialEq, Eq)]
pub enum CampaignKind {
    Email,
    Sms,
    Post,
}
