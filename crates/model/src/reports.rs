use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use strum::Display;

use crate::decimal::Decimal;
use crate::growth::{CountMetric, Metric};
use crate::period::Period;
use crate::product::VendorProduct;
use crate::transaction::{Transaction, TransactionStatus};

/// Response shapes of the dashboard/report endpoints. All of them are
/// ephemeral: rebuilt on every request, never persisted.

#[derive(Serialize, Debug)]
pub struct VendorDashboard {
    pub shop_id: i64,
    pub shop_name: String,
    pub country: String,
    pub period: Period,
    pub sales: Metric,
    pub orders: CountMetric,
    pub average_order_value: Decimal,
    pub customers: CountMetric,
    pub net_earning: Decimal,
    pub profit: Decimal,
    pub loss: Decimal,
    pub fulfilment_rate: f64,
    pub listed_products: u64,
    pub top_products: Vec<TopProduct>,
    pub revenue_by_month: Vec<MonthPoint>,
    pub orders_by_hour: Vec<HourBucket>,
    pub orders_by_season: Vec<SeasonBucket>,
    pub campaigns: CampaignBreakdown,
}

#[derive(Serialize, Debug)]
pub struct SalesReport {
    pub shop_id: i64,
    pub period: Period,
    pub sales: Metric,
    pub orders: CountMetric,
    pub average_order_value: Decimal,
    pub daily: Vec<DayPoint>,
}

#[derive(Serialize, Debug)]
pub struct RevenueReport {
    pub shop_id: i64,
    pub period: Period,
    pub revenue: Metric,
    pub by_month: Vec<MonthPoint>,
}

#[derive(Serialize, Debug)]
pub struct CommissionReport {
    pub shop_id: i64,
    pub period: Period,
    pub commission: Metric,
    pub orders: CountMetric,
}

#[derive(Serialize, Debug)]
pub struct TaxReport {
    pub shop_id: i64,
    pub period: Period,
    pub tax_collected: Metric,
    /// Defined identically to collected tax until a real liability model
    /// exists upstream.
    pub tax_liability: Decimal,
}

#[derive(Serialize, Debug)]
pub struct RefundsReport {
    pub shop_id: i64,
    pub period: Period,
    pub refunds: CountMetric,
    pub refunded_total: Decimal,
    pub rows: Vec<TransactionRow>,
    pub disputes: u64,
    pub open_disputes: u64,
    pub reasons: Vec<ReasonBucket>,
}

#[derive(Serialize, Debug)]
pub struct PayoutsReport {
    pub shop_id: i64,
    pub status: Option<TransactionStatus>,
    pub total: Decimal,
    pub count: u64,
    pub payouts: Vec<TransactionRow>,
}

/// One listed ledger row, as shown in the payout and refund tables.
#[derive(Serialize, Debug)]
pub struct TransactionRow {
    pub date_time: DateTime<Utc>,
    pub amount: Decimal,
    pub status: TransactionStatus,
    pub reference: Option<String>,
}

impl From<&Transaction> for TransactionRow {
    fn from(tx: &Transaction) -> Self {
        TransactionRow {
            date_time: tx.date_time,
            amount: tx.amount,
            status: tx.status,
            reference: tx.reference.clone(),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct AnalyticsReport {
    pub shop_id: i64,
    pub period: Period,
    pub revenue: Metric,
    pub orders: CountMetric,
    pub fulfilment_rate: f64,
    pub by_month: Vec<MonthPoint>,
    pub campaigns: CampaignBreakdown,
    pub dispute_reasons: Vec<ReasonBucket>,
    pub top_products: Vec<TopProduct>,
}

/// One calendar-day chart bucket; series are emitted ascending by date.
#[derive(Serialize, Debug, PartialEq)]
pub struct DayPoint {
    pub date: NaiveDate,
    pub total: Decimal,
    pub orders: u64,
}

/// One calendar-month chart bucket (keyed by the first day of the month).
#[derive(Serialize, Debug, PartialEq)]
pub struct MonthPoint {
    pub month: NaiveDate,
    pub total: Decimal,
    pub orders: u64,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct HourBucket {
    pub from_hour: u32,
    pub to_hour: u32,
    pub orders: u64,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct SeasonBucket {
    pub season: Season,
    pub orders: u64,
}

#[derive(Serialize, Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct ReasonBucket {
    pub reason: &'static str,
    pub count: u64,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct CampaignBreakdown {
    pub email: u64,
    pub sms: u64,
    pub post: u64,
    pub total: u64,
    pub estimated_spend: Decimal,
}

/// Ranked by stock on hand, not by sales volume: no order -> product link
/// exists upstream, so stock level stands in for popularity.
#[derive(Serialize, Debug, PartialEq)]
pub struct TopProduct {
    pub title: String,
    pub price: Decimal,
    pub stock: i64,
}

impl From<&VendorProduct> for TopProduct {
    fn from(product: &VendorProduct) -> Self {
        TopProduct {
            title: product.title.clone(),
            price: product.price,
            stock: product.stock,
        }
    }
}
