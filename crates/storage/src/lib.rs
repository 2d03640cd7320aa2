pub mod campaign;
pub mod db;
pub mod dispute;
pub mod expense;
pub mod product;
pub mod shop;
pub mod transaction;

use campaign::CampaignStore;
use db::Db;
use dispute::DisputeStore;
use expense::ExpenseStore;
use eyre::Result;
use product::ProductStore;
use shop::ShopStore;
use transaction::TransactionStore;

const DB_NAME: &str = "backoffice_db";

#[derive(Clone)]
pub struct Storage {
    pub db: Db,
    pub shops: ShopStore,
    pub transactions: TransactionStore,
    pub products: ProductStore,
    pub expenses: ExpenseStore,
    pub campaigns: CampaignStore,
    pub disputes: DisputeStore,
}

impl Storage {
    pub async fn new(uri: &str) -> Result<Self> {
        let db = Db::connect(uri, DB_NAME).await?;
        let shops = ShopStore::new(&db).await?;
        let transactions = TransactionStore::new(&db).await?;
        let products = ProductStore::new(&db).await?;
        let expenses = ExpenseStore::new(&db).await?;
        let campaigns = CampaignStore::new(&db).await?;
        let disputes = DisputeStore::new(&db).await?;

        Ok(Storage {
            db,
            shops,
            transactions,
            products,
            expenses,
            campaigns,
            disputes,
        })
    }
}
