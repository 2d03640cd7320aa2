use bson::doc;
use eyre::Result;
use futures_util::stream::TryStreamExt as _;
use model::campaign::Campaign;
use mongodb::bson::oid::ObjectId;
use mongodb::{Collection, Database, IndexModel};

const COLLECTION: &str = "campaigns";

/// Email, SMS and post campaigns live in one collection, tagged by kind.
#[derive(Clone)]
pub struct CampaignStore {
    campaigns: Collection<Campaign>,
}

impl CampaignStore {
    pub(crate) async fn new(db: &Database) -> Result<Self> {
        let campaigns: Collection<Campaign> = db.collection(COLLECTION);
        campaigns
            .create_index(IndexModel::builder().keys(doc! { "created_by": 1 }).build())
            .await?;
        Ok(CampaignStore { campaigns })
    }

    /// All campaigns ever created by the owner. The breakdown is an
    /// all-time distribution, not a windowed one.
    pub async fn find_by_owner(&self, owner: ObjectId) -> Result<Vec<Campaign>> {
        let cursor = self
            .campaigns
            .find(doc! { "created_by": owner })
            .sort(doc! { "created_at": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }
}
