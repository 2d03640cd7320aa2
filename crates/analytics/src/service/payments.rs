use chrono::Local;
use log::debug;
use model::decimal::Decimal;
use model::dispute::Dispute;
use model::errors::AnalyticsError;
use model::growth::{CountMetric, Metric};
use model::period::{rolling_months, Period, Window};
use model::reports::{
    CommissionReport, PayoutsReport, RefundsReport, RevenueReport, SalesReport, TaxReport,
    TransactionRow,
};
use model::transaction::{Transaction, TransactionStatus, TransactionType};
use storage::dispute::DisputeStore;

use crate::service::charts::{daily_series, monthly_series};
use crate::service::ledger::LedgerReader;
use crate::service::metrics::{
    commission_total, dispute_reasons, open_disputes, sales_totals, tax_total,
};
use crate::AnalyticsConfig;

/// Payment-tab sub-reports: sales, revenue, commission, tax, refunds and
/// payouts. Each one resolves the shop, fetches its windows concurrently
/// and reduces with the shared aggregators.
#[derive(Clone)]
pub struct Payments {
    ledger: LedgerReader,
    disputes: DisputeStore,
    config: AnalyticsConfig,
}

impl Payments {
    pub fn new(ledger: LedgerReader, disputes: DisputeStore, config: AnalyticsConfig) -> Self {
        Payments {
            ledger,
            disputes,
            config,
        }
    }

    pub async fn sales_report(
        &self,
        shop_id: i64,
        period: Period,
    ) -> Result<SalesReport, AnalyticsError> {
        let shop = self.ledger.resolve_shop(shop_id).await?;
        let cmp = period.comparison(Local::now())?;
        let (current, previous) = tokio::try_join!(
            self.ledger.completed_orders(shop.owner, &cmp.current),
            self.ledger.completed_orders(shop.owner, &cmp.previous),
        )?;
        Ok(build_sales_report(shop.shop_id, period, &current, &previous))
    }

    pub async fn revenue_report(
        &self,
        shop_id: i64,
        period: Period,
    ) -> Result<RevenueReport, AnalyticsError> {
        let shop = self.ledger.resolve_shop(shop_id).await?;
        let now = Local::now();
        let cmp = period.comparison(now)?;
        let months = rolling_months(now)?;
        let span = Window {
            from: months[0].from,
            to: now,
        };
        let (current, previous, rolling) = tokio::try_join!(
            self.ledger.completed_orders(shop.owner, &cmp.current),
            self.ledger.completed_orders(shop.owner, &cmp.previous),
            self.ledger.completed_orders(shop.owner, &span),
        )?;
        Ok(RevenueReport {
            shop_id: shop.shop_id,
            period,
            revenue: Metric::versus(sales_totals(&current).amount, sales_totals(&previous).amount),
            by_month: monthly_series(&months, &rolling),
        })
    }

    pub async fn commission_report(
        &self,
        shop_id: i64,
        period: Period,
    ) -> Result<CommissionReport, AnalyticsError> {
        let shop = self.ledger.resolve_shop(shop_id).await?;
        let cmp = period.comparison(Local::now())?;
        let (current, previous) = tokio::try_join!(
            self.ledger.completed_orders(shop.owner, &cmp.current),
            self.ledger.completed_orders(shop.owner, &cmp.previous),
        )?;
        Ok(build_commission_report(
            shop.shop_id,
            period,
            &current,
            &previous,
            self.config.commission_rate,
        ))
    }

    pub async fn tax_report(
        &self,
        shop_id: i64,
        period: Period,
    ) -> Result<TaxReport, AnalyticsError> {
        let shop = self.ledger.resolve_shop(shop_id).await?;
        let cmp = period.comparison(Local::now())?;
        let (current, previous) = tokio::try_join!(
            self.ledger.completed_orders(shop.owner, &cmp.current),
            self.ledger.completed_orders(shop.owner, &cmp.previous),
        )?;
        let collected = tax_total(&current);
        Ok(TaxReport {
            shop_id: shop.shop_id,
            period,
            tax_collected: Metric::versus(collected, tax_total(&previous)),
            tax_liability: collected,
        })
    }

    pub async fn refunds_report(
        &self,
        shop_id: i64,
        period: Period,
    ) -> Result<RefundsReport, AnalyticsError> {
        let shop = self.ledger.resolve_shop(shop_id).await?;
        let cmp = period.comparison(Local::now())?;
        let (current, previous, disputes) = tokio::try_join!(
            self.ledger.fetch(
                shop.owner,
                Some(TransactionType::Refund),
                None,
                Some(&cmp.current),
            ),
            self.ledger.fetch(
                shop.owner,
                Some(TransactionType::Refund),
                None,
                Some(&cmp.previous),
            ),
            async { Ok::<_, AnalyticsError>(self.disputes.find_by_owner(shop.owner).await?) },
        )?;
        Ok(build_refunds_report(
            shop.shop_id,
            period,
            &current,
            &previous,
            &disputes,
        ))
    }

    pub async fn payouts_report(
        &self,
        shop_id: i64,
        status: Option<TransactionStatus>,
    ) -> Result<PayoutsReport, AnalyticsError> {
        let shop = self.ledger.resolve_shop(shop_id).await?;
        debug!("payouts report for shop {} with status {:?}", shop_id, status);
        let payouts = self
            .ledger
            .fetch(shop.owner, Some(TransactionType::Payout), status, None)
            .await?;
        Ok(build_payouts_report(shop.shop_id, status, &payouts))
    }
}

fn build_sales_report(
    shop_id: i64,
    period: Period,
    current: &[Transaction],
    previous: &[Transaction],
) -> SalesReport {
    let current_totals = sales_totals(current);
    let previous_totals = sales_totals(previous);
    SalesReport {
        shop_id,
        period,
        sales: Metric::versus(current_totals.amount, previous_totals.amount),
        orders: CountMetric::versus(current_totals.orders, previous_totals.orders),
        average_order_value: current_totals.average,
        daily: daily_series(current),
    }
}

fn build_commission_report(
    shop_id: i64,
    period: Period,
    current: &[Transaction],
    previous: &[Transaction],
    rate: Decimal,
) -> CommissionReport {
    CommissionReport {
        shop_id,
        period,
        commission: Metric::versus(
            commission_total(current, rate),
            commission_total(previous, rate),
        ),
        orders: CountMetric::versus(current.len() as u64, previous.len() as u64),
    }
}

fn build_refunds_report(
    shop_id: i64,
    period: Period,
    current: &[Transaction],
    previous: &[Transaction],
    disputes: &[Dispute],
) -> RefundsReport {
    RefundsReport {
        shop_id,
        period,
        refunds: CountMetric::versus(current.len() as u64, previous.len() as u64),
        refunded_total: current.iter().map(|tx| tx.amount).sum(),
        rows: current.iter().map(TransactionRow::from).collect(),
        disputes: disputes.len() as u64,
        open_disputes: open_disputes(disputes),
        reasons: dispute_reasons(disputes),
    }
}

fn build_payouts_report(
    shop_id: i64,
    status: Option<TransactionStatus>,
    payouts: &[Transaction],
) -> PayoutsReport {
    PayoutsReport {
        shop_id,
        status,
        total: payouts.iter().map(|tx| tx.amount).sum(),
        count: payouts.len() as u64,
        payouts: payouts.iter().map(TransactionRow::from).collect(),
    }
}

#[cfg(test)]
mod tests {
    use bson::oid::ObjectId;
    use chrono::Utc;
    use model::dispute::DisputeStatus;

    use crate::service::testing::{at, order, tx};

    use super::*;

    #[test]
    fn test_sales_report_growth_and_series() {
        let current = vec![
            order(100, at(2024, 5, 2, 11)),
            order(200, at(2024, 5, 3, 12)),
        ];
        let previous = vec![order(150, at(2024, 4, 20, 15))];
        let report = build_sales_report(7, Period::Monthly, &current, &previous);
        assert_eq!(report.sales.total, Decimal::int(300));
        assert_eq!(report.sales.growth, 100.0);
        assert_eq!(report.orders.count, 2);
        assert_eq!(report.average_order_value, Decimal::int(150));
        assert_eq!(report.daily.len(), 2);
        assert!(report.daily[0].date < report.daily[1].date);
    }

    #[test]
    fn test_commission_report_uses_rate() {
        let current = vec![order(200, at(2024, 5, 2, 11))];
        let previous = vec![order(100, at(2024, 4, 2, 11))];
        let report =
            build_commission_report(7, Period::Monthly, &current, &previous, Decimal::from(0.05));
        assert_eq!(report.commission.total, Decimal::int(10));
        assert_eq!(report.commission.growth, 100.0);
    }

    #[test]
    fn test_refunds_report() {
        let refund = |amount, when| {
            tx(
                amount,
                when,
                TransactionType::Refund,
                TransactionStatus::Completed,
            )
        };
        let current = vec![refund(40, at(2024, 5, 2, 11)), refund(60, at(2024, 5, 4, 11))];
        let disputes = vec![Dispute {
            id: ObjectId::new(),
            owner: ObjectId::new(),
            status: DisputeStatus::Open,
            description: "shipping damage".to_string(),
            created_at: Utc::now(),
        }];
        let report = build_refunds_report(7, Period::Monthly, &current, &[], &disputes);
        assert_eq!(report.refunds.count, 2);
        assert_eq!(report.refunds.growth, 100.0);
        assert_eq!(report.refunded_total, Decimal::int(100));
        // The refund rows themselves are listed, not just counted.
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].amount, Decimal::int(40));
        assert_eq!(report.rows[0].status, TransactionStatus::Completed);
        assert_eq!(report.rows[1].amount, Decimal::int(60));
        assert_eq!(report.disputes, 1);
        assert_eq!(report.open_disputes, 1);
        assert_eq!(report.reasons[1].count, 1);
    }

    #[test]
    fn test_payouts_report_totals() {
        let payout = |amount, status| {
            tx(amount, at(2024, 5, 2, 11), TransactionType::Payout, status)
        };
        let rows = vec![
            payout(500, TransactionStatus::Completed),
            payout(250, TransactionStatus::Pending),
        ];
        let report = build_payouts_report(7, None, &rows);
        assert_eq!(report.total, Decimal::int(750));
        assert_eq!(report.count, 2);
        assert_eq!(report.payouts.len(), 2);
        assert_eq!(report.status, None);
    }
}
