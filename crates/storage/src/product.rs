use bson::doc;
use eyre::Result;
use futures_util::stream::TryStreamExt as _;
use model::product::VendorProduct;
use mongodb::bson::oid::ObjectId;
use mongodb::{Collection, Database, IndexModel};

const COLLECTION: &str = "vendor_products";

#[derive(Clone)]
pub struct ProductStore {
    products: Collection<VendorProduct>,
}

impl ProductStore {
    pub(crate) async fn new(db: &Database) -> Result<Self> {
        let products: Collection<VendorProduct> = db.collection(COLLECTION);
        products
            .create_index(IndexModel::builder().keys(doc! { "owner": 1 }).build())
            .await?;
        Ok(ProductStore { products })
    }

    pub async fn count_listed(&self, owner: ObjectId) -> Result<u64> {
        Ok(self
            .products
            .count_documents(doc! { "owner": owner, "available": true })
            .await?)
    }

    /// Highest stock first. Stock level stands in for sales volume here:
    /// the ledger carries no order -> product link.
    pub async fn top_by_stock(&self, owner: ObjectId, limit: i64) -> Result<Vec<VendorProduct>> {
        let cursor = self
            .products
            .find(doc! { "owner": owner, "available": true })
            .sort(doc! { "stock": -1 })
            .limit(limit)
            .await?;
        Ok(cursor.try_collect().await?)
    }
}
