use chrono::Local;
use model::campaign::Campaign;
use model::dispute::Dispute;
use model::errors::AnalyticsError;
use model::growth::{CountMetric, Metric};
use model::period::{rolling_months, Period, Window};
use model::product::VendorProduct;
use model::reports::{AnalyticsReport, TopProduct};
use model::transaction::Transaction;
use storage::campaign::CampaignStore;
use storage::dispute::DisputeStore;
use storage::product::ProductStore;

use crate::service::charts::monthly_series;
use crate::service::ledger::LedgerReader;
use crate::service::metrics::{
    campaign_breakdown, dispute_reasons, fulfilment_rate, sales_totals,
};
use crate::AnalyticsConfig;

const TOP_PRODUCTS: i64 = 5;

/// Full report-and-analytics view: revenue trend, fulfilment, campaign
/// distribution, dispute breakdown and the product list in one response.
#[derive(Clone)]
pub struct Reports {
    ledger: LedgerReader,
    products: ProductStore,
    campaigns: CampaignStore,
    disputes: DisputeStore,
    config: AnalyticsConfig,
}

impl Reports {
    pub fn new(
        ledger: LedgerReader,
        products: ProductStore,
        campaigns: CampaignStore,
        disputes: DisputeStore,
        config: AnalyticsConfig,
    ) -> Self {
        Reports {
            ledger,
            products,
            campaigns,
            disputes,
            config,
        }
    }

    pub async fn analytics_report(
        &self,
        shop_id: i64,
        period: Period,
    ) -> Result<AnalyticsReport, AnalyticsError> {
        let shop = self.ledger.resolve_shop(shop_id).await?;
        let now = Local::now();
        let cmp = period.comparison(now)?;
        let months = rolling_months(now)?;
        let span = Window {
            from: months[0].from,
            to: now,
        };

        let owner = shop.owner;
        let (current, previous, all_status, rolling, campaigns, disputes, top) = tokio::try_join!(
            self.ledger.completed_orders(owner, &cmp.current),
            self.ledger.completed_orders(owner, &cmp.previous),
            self.ledger.orders_any_status(owner, &cmp.current),
            self.ledger.completed_orders(owner, &span),
            async { Ok::<_, AnalyticsError>(self.campaigns.find_by_owner(owner).await?) },
            async { Ok::<_, AnalyticsError>(self.disputes.find_by_owner(owner).await?) },
            async {
                Ok::<_, AnalyticsError>(self.products.top_by_stock(owner, TOP_PRODUCTS).await?)
            },
        )?;

        Ok(build_analytics_report(
            shop.shop_id,
            period,
            &months,
            &current,
            &previous,
            &all_status,
            &rolling,
            &campaigns,
            &disputes,
            &top,
            &self.config,
        ))
    }
}

#[allow(clippy::too_many_arguments)]
fn build_analytics_report(
    shop_id: i64,
    period: Period,
    months: &[Window],
    current: &[Transaction],
    previous: &[Transaction],
    all_status: &[Transaction],
    rolling: &[Transaction],
    campaigns: &[Campaign],
    disputes: &[Dispute],
    top: &[VendorProduct],
    config: &AnalyticsConfig,
) -> AnalyticsReport {
    let current_totals = sales_totals(current);
    let previous_totals = sales_totals(previous);
    AnalyticsReport {
        shop_id,
        period,
        revenue: Metric::versus(current_totals.amount, previous_totals.amount),
        orders: CountMetric::versus(current_totals.orders, previous_totals.orders),
        fulfilment_rate: fulfilment_rate(current_totals.orders, all_status.len() as u64),
        by_month: monthly_series(months, rolling),
        campaigns: campaign_breakdown(campaigns, config.campaign_price),
        dispute_reasons: dispute_reasons(disputes),
        top_products: top.iter().map(TopProduct::from).collect(),
    }
}

#[cfg(test)]
mod tests {
    use model::decimal::Decimal;

    use crate::service::testing::{at, order};

    use super::*;

    #[test]
    fn test_analytics_report_shape() {
        let now = at(2024, 5, 15, 13);
        let months = rolling_months(now).unwrap();
        let current = vec![order(100, at(2024, 5, 2, 11))];
        let report = build_analytics_report(
            7,
            Period::Monthly,
            &months,
            &current,
            &[],
            &current,
            &current,
            &[],
            &[],
            &[],
            &AnalyticsConfig::default(),
        );
        assert_eq!(report.revenue.total, Decimal::int(100));
        // Empty previous window with a positive current one reads as +100%.
        assert_eq!(report.revenue.growth, 100.0);
        assert_eq!(report.fulfilment_rate, 100.0);
        assert_eq!(report.by_month.len(), 12);
        assert_eq!(report.campaigns.total, 0);
        assert_eq!(report.dispute_reasons.len(), 4);
        assert!(report.top_products.is_empty());
    }
}
