use chrono::{DateTime, Datelike as _, Local};
use log::debug;
use model::campaign::Campaign;
use model::errors::AnalyticsError;
use model::expense::VendorExpense;
use model::growth::{CountMetric, Metric};
use model::period::{rolling_months, Period, Window};
use model::product::VendorProduct;
use model::reports::{TopProduct, VendorDashboard};
use model::shop::Shop;
use model::transaction::Transaction;
use storage::campaign::CampaignStore;
use storage::expense::ExpenseStore;
use storage::product::ProductStore;

use crate::service::charts::{hour_buckets, monthly_series, season_buckets};
use crate::service::ledger::LedgerReader;
use crate::service::metrics::{
    campaign_breakdown, distinct_customers, fulfilment_rate, net_earning, profit_loss,
    sales_totals,
};
use crate::AnalyticsConfig;

const TOP_PRODUCTS: i64 = 5;

/// Composes the vendor store dashboard. Resolves the shop first, pulls
/// every required sequence concurrently, then reduces in memory.
#[derive(Clone)]
pub struct Dashboard {
    ledger: LedgerReader,
    products: ProductStore,
    expenses: ExpenseStore,
    campaigns: CampaignStore,
    config: AnalyticsConfig,
}

impl Dashboard {
    pub fn new(
        ledger: LedgerReader,
        products: ProductStore,
        expenses: ExpenseStore,
        campaigns: CampaignStore,
        config: AnalyticsConfig,
    ) -> Self {
        Dashboard {
            ledger,
            products,
            expenses,
            campaigns,
            config,
        }
    }

    pub async fn vendor_dashboard(
        &self,
        shop_id: i64,
        period: Period,
    ) -> Result<VendorDashboard, AnalyticsError> {
        let shop = self.ledger.resolve_shop(shop_id).await?;
        let now = Local::now();
        let cmp = period.comparison(now)?;
        let months = rolling_months(now)?;
        let span = Window {
            from: months[0].from,
            to: now,
        };
        debug!("building {} dashboard for shop {}", period, shop_id);

        let owner = shop.owner;
        let (current, previous, all_status, rolling, expenses, listed, top, campaigns) = tokio::try_join!(
            self.ledger.completed_orders(owner, &cmp.current),
            self.ledger.completed_orders(owner, &cmp.previous),
            self.ledger.orders_any_status(owner, &cmp.current),
            self.ledger.completed_orders(owner, &span),
            async {
                Ok::<_, AnalyticsError>(self.expenses.range(owner, &cmp.current).await?)
            },
            async { Ok::<_, AnalyticsError>(self.products.count_listed(owner).await?) },
            async {
                Ok::<_, AnalyticsError>(self.products.top_by_stock(owner, TOP_PRODUCTS).await?)
            },
            async { Ok::<_, AnalyticsError>(self.campaigns.find_by_owner(owner).await?) },
        )?;

        Ok(build_dashboard(
            &shop, period, now, &months, &current, &previous, &all_status, &rolling, &expenses,
            listed, &top, &campaigns, &self.config,
        ))
    }
}

#[allow(clippy::too_many_arguments)]
fn build_dashboard(
    shop: &Shop,
    period: Period,
    now: DateTime<Local>,
    months: &[Window],
    current: &[Transaction],
    previous: &[Transaction],
    all_status: &[Transaction],
    rolling: &[Transaction],
    expenses: &[VendorExpense],
    listed: u64,
    top: &[VendorProduct],
    campaigns: &[Campaign],
    config: &AnalyticsConfig,
) -> VendorDashboard {
    let current_totals = sales_totals(current);
    let previous_totals = sales_totals(previous);
    let net = net_earning(current_totals.amount, expenses);
    let balance = profit_loss(net);

    VendorDashboard {
        shop_id: shop.shop_id,
        shop_name: shop.name.clone(),
        country: shop.country.clone(),
        period,
        sales: Metric::versus(current_totals.amount, previous_totals.amount),
        orders: CountMetric::versus(current_totals.orders, previous_totals.orders),
        average_order_value: current_totals.average,
        customers: CountMetric::versus(
            distinct_customers(current),
            distinct_customers(previous),
        ),
        net_earning: net,
        profit: balance.profit,
        loss: balance.loss,
        fulfilment_rate: fulfilment_rate(current_totals.orders, all_status.len() as u64),
        listed_products: listed,
        top_products: top.iter().map(TopProduct::from).collect(),
        revenue_by_month: monthly_series(months, rolling),
        orders_by_hour: hour_buckets(current),
        orders_by_season: season_buckets(rolling, now.year()),
        campaigns: campaign_breakdown(campaigns, config.campaign_price),
    }
}

#[cfg(test)]
mod tests {
    use bson::oid::ObjectId;
    use model::decimal::Decimal;
    use model::transaction::{TransactionStatus, TransactionType};

    use crate::service::testing::{at, order, tx};

    use super::*;

    fn shop() -> Shop {
        Shop {
            id: ObjectId::new(),
            shop_id: 7,
            owner: ObjectId::new(),
            name: "Corner Goods".to_string(),
            country: "NL".to_string(),
            active: true,
        }
    }

    #[test]
    fn test_dashboard_composition() {
        let now = at(2024, 5, 15, 13);
        let cmp = Period::Monthly.comparison(now).unwrap();
        let months = rolling_months(now).unwrap();
        let current = vec![
            order(100, at(2024, 5, 2, 11)),
            order(200, at(2024, 5, 3, 12)),
        ];
        let previous = vec![order(150, at(2024, 4, 20, 15))];
        let mut all_status = current.clone();
        all_status.push(tx(
            80,
            at(2024, 5, 4, 16),
            TransactionType::OrderPayment,
            TransactionStatus::Pending,
        ));
        let mut rolling = current.clone();
        rolling.extend(previous.iter().cloned());

        assert!(cmp.current.contains(current[0].local_time()));
        assert!(cmp.previous.contains(previous[0].local_time()));

        let dashboard = build_dashboard(
            &shop(),
            Period::Monthly,
            now,
            &months,
            &current,
            &previous,
            &all_status,
            &rolling,
            &[],
            12,
            &[],
            &[],
            &AnalyticsConfig::default(),
        );

        assert_eq!(dashboard.sales.total, Decimal::int(300));
        assert_eq!(dashboard.sales.growth, 100.0);
        assert_eq!(dashboard.orders.count, 2);
        assert_eq!(dashboard.average_order_value, Decimal::int(150));
        assert_eq!(dashboard.net_earning, Decimal::int(300));
        assert_eq!(dashboard.profit, Decimal::int(300));
        assert_eq!(dashboard.loss, Decimal::zero());
        assert_eq!(dashboard.fulfilment_rate, 2.0 / 3.0 * 100.0);
        assert_eq!(dashboard.listed_products, 12);
        assert_eq!(dashboard.revenue_by_month.len(), 12);
        // Both months land in the rolling chart.
        assert_eq!(dashboard.revenue_by_month[11].total, Decimal::int(300));
        assert_eq!(dashboard.revenue_by_month[10].total, Decimal::int(150));
    }

    #[test]
    fn test_dashboard_empty_windows_have_zero_growth() {
        let now = at(2024, 5, 15, 13);
        let months = rolling_months(now).unwrap();
        let dashboard = build_dashboard(
            &shop(),
            Period::Monthly,
            now,
            &months,
            &[],
            &[],
            &[],
            &[],
            &[],
            0,
            &[],
            &[],
            &AnalyticsConfig::default(),
        );
        assert_eq!(dashboard.sales.total, Decimal::zero());
        assert_eq!(dashboard.sales.growth, 0.0);
        assert_eq!(dashboard.orders.count, 0);
        assert_eq!(dashboard.orders.growth, 0.0);
        assert_eq!(dashboard.customers.growth, 0.0);
        assert_eq!(dashboard.average_order_value, Decimal::zero());
        assert_eq!(dashboard.fulfilment_rate, 0.0);
    }
}
