use bson::doc;
use eyre::Result;
use model::shop::Shop;
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};

const COLLECTION: &str = "vendor_shops";

#[derive(Clone)]
pub struct ShopStore {
    shops: Collection<Shop>,
}

impl ShopStore {
    pub(crate) async fn new(db: &Database) -> Result<Self> {
        let shops: Collection<Shop> = db.collection(COLLECTION);
        let index = IndexModel::builder()
            .keys(doc! { "shop_id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        shops.create_index(index).await?;
        Ok(ShopStore { shops })
    }

    pub async fn get_by_shop_id(&self, shop_id: i64) -> Result<Option<Shop>> {
        Ok(self.shops.find_one(doc! { "shop_id": shop_id }).await?)
    }
}
