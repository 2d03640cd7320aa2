use bson::doc;
use eyre::Result;
use futures_util::stream::TryStreamExt as _;
use model::dispute::Dispute;
use mongodb::bson::oid::ObjectId;
use mongodb::{Collection, Database, IndexModel};

const COLLECTION: &str = "disputes";

#[derive(Clone)]
pub struct DisputeStore {
    disputes: Collection<Dispute>,
}

impl DisputeStore {
    pub(crate) async fn new(db: &Database) -> Result<Self> {
        let disputes: Collection<Dispute> = db.collection(COLLECTION);
        disputes
            .create_index(IndexModel::builder().keys(doc! { "owner": 1 }).build())
            .await?;
        Ok(DisputeStore { disputes })
    }

    pub async fn find_by_owner(&self, owner: ObjectId) -> Result<Vec<Dispute>> {
        let cursor = self
            .disputes
            .find(doc! { "owner": owner })
            .sort(doc! { "created_at": -1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }
}
