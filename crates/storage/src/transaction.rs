use bson::doc;
use eyre::Result;
use futures_util::stream::TryStreamExt as _;
use model::period::Window;
use model::transaction::{Transaction, TransactionStatus, TransactionType};
use mongodb::bson::oid::ObjectId;
use mongodb::{Collection, Database, IndexModel};

const COLLECTION: &str = "transactions";

/// Read-only accessor over the append-only transaction log.
#[derive(Clone)]
pub struct TransactionStore {
    transactions: Collection<Transaction>,
}

impl TransactionStore {
    pub(crate) async fn new(db: &Database) -> Result<Self> {
        let transactions: Collection<Transaction> = db.collection(COLLECTION);
        transactions
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "owner": 1, "date_time": -1 })
                    .build(),
            )
            .await?;
        Ok(TransactionStore { transactions })
    }

    /// Conjunctive owner AND type AND status AND window filter. Returns a
    /// materialized sequence so several aggregators can reduce the same
    /// rows without re-querying.
    pub async fn find(
        &self,
        owner: ObjectId,
        transaction_type: Option<TransactionType>,
        status: Option<TransactionStatus>,
        window: Option<&Window>,
    ) -> Result<Vec<Transaction>> {
        let mut filter = doc! { "owner": owner };
        if let Some(transaction_type) = transaction_type {
            filter.insert("transaction_type", transaction_type.to_string());
        }
        if let Some(status) = status {
            filter.insert("status", status.to_string());
        }
        if let Some(window) = window {
            filter.insert(
                "date_time",
                doc! {
                    "$gte": window.from,
                    "$lt": window.to,
                },
            );
        }
        let cursor = self
            .transactions
            .find(filter)
            .sort(doc! { "date_time": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }
}
