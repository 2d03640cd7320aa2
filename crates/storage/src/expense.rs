use bson::doc;
use eyre::Result;
use futures_util::stream::TryStreamExt as _;
use model::expense::VendorExpense;
use model::period::Window;
use mongodb::bson::oid::ObjectId;
use mongodb::{Collection, Database, IndexModel};

const COLLECTION: &str = "vendor_expenses";

#[derive(Clone)]
pub struct ExpenseStore {
    expenses: Collection<VendorExpense>,
}

impl ExpenseStore {
    pub(crate) async fn new(db: &Database) -> Result<Self> {
        let expenses: Collection<VendorExpense> = db.collection(COLLECTION);
        expenses
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "owner": 1, "date": -1 })
                    .build(),
            )
            .await?;
        Ok(ExpenseStore { expenses })
    }

    pub async fn range(&self, owner: ObjectId, window: &Window) -> Result<Vec<VendorExpense>> {
        let cursor = self
            .expenses
            .find(doc! {
                "owner": owner,
                "date": {
                    "$gte": window.from,
                    "$lt": window.to,
                }
            })
            .sort(doc! { "date": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }
}
