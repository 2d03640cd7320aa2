use log::warn;
use model::errors::AnalyticsError;
use model::period::Window;
use model::shop::Shop;
use model::transaction::{Transaction, TransactionStatus, TransactionType};
use bson::oid::ObjectId;
use storage::shop::ShopStore;
use storage::transaction::TransactionStore;

/// Ledger access behind the indirect ownership join. Every aggregator
/// resolves shop -> owner through this one service so they all share the
/// same resolution rule.
#[derive(Clone)]
pub struct LedgerReader {
    shops: ShopStore,
    transactions: TransactionStore,
}

impl LedgerReader {
    pub fn new(shops: ShopStore, transactions: TransactionStore) -> Self {
        LedgerReader {
            shops,
            transactions,
        }
    }

    /// Resolves a public shop identifier to its record, failing fast when
    /// the shop is missing or inactive. Nothing is aggregated for a shop
    /// that does not resolve.
    pub async fn resolve_shop(&self, shop_id: i64) -> Result<Shop, AnalyticsError> {
        let found = self.shops.get_by_shop_id(shop_id).await?;
        ensure_active(found, shop_id)
    }

    /// Conjunctive owner/type/status/window fetch, materialized.
    pub async fn fetch(
        &self,
        owner: ObjectId,
        transaction_type: Option<TransactionType>,
        status: Option<TransactionStatus>,
        window: Option<&Window>,
    ) -> Result<Vec<Transaction>, AnalyticsError> {
        Ok(self
            .transactions
            .find(owner, transaction_type, status, window)
            .await?)
    }

    /// Completed order payments in the window: the only rows that count
    /// toward realized sales and revenue.
    pub async fn completed_orders(
        &self,
        owner: ObjectId,
        window: &Window,
    ) -> Result<Vec<Transaction>, AnalyticsError> {
        self.fetch(
            owner,
            Some(TransactionType::OrderPayment),
            Some(TransactionStatus::Completed),
            Some(window),
        )
        .await
    }

    /// Order payments of any status, used for fulfilment-rate denominators.
    pub async fn orders_any_status(
        &self,
        owner: ObjectId,
        window: &Window,
    ) -> Result<Vec<Transaction>, AnalyticsError> {
        self.fetch(owner, Some(TransactionType::OrderPayment), None, Some(window))
            .await
    }
}

/// An inactive shop resolves exactly like a missing one.
fn ensure_active(found: Option<Shop>, shop_id: i64) -> Result<Shop, AnalyticsError> {
    let shop = found.ok_or(AnalyticsError::ShopNotFound(shop_id))?;
    if !shop.active {
        warn!("shop {} exists but is inactive", shop_id);
        return Err(AnalyticsError::ShopNotFound(shop_id));
    }
    Ok(shop)
}
