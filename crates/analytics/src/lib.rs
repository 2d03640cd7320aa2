use model::decimal::Decimal;
use service::dashboard::Dashboard;
use service::ledger::LedgerReader;
use service::payments::Payments;
use service::reports::Reports;
use storage::Storage;

pub mod service;

/// Pricing inputs that stand in for a real per-category/per-contract
/// lookup. Injected so the aggregators never carry literals.
#[derive(Clone, Copy, Debug)]
pub struct AnalyticsConfig {
    /// Marketplace cut applied to every completed order payment.
    pub commission_rate: Decimal,
    /// Flat price charged per campaign, any kind.
    pub campaign_price: Decimal,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        AnalyticsConfig {
            commission_rate: Decimal::from(0.05),
            campaign_price: Decimal::int(25),
        }
    }
}

/// Read-only aggregation engine over the transaction ledger and its
/// ancillary collections. Stateless and request-scoped: every report is
/// rebuilt from the ledger on each call.
#[derive(Clone)]
pub struct Analytics {
    pub ledger: LedgerReader,
    pub dashboard: Dashboard,
    pub payments: Payments,
    pub reports: Reports,
}

impl Analytics {
    pub fn new(storage: Storage, config: AnalyticsConfig) -> Self {
        let ledger = LedgerReader::new(storage.shops, storage.transactions);
        let dashboard = Dashboard::new(
            ledger.clone(),
            storage.products.clone(),
            storage.expenses,
            storage.campaigns.clone(),
            config,
        );
        let payments = Payments::new(ledger.clone(), storage.disputes.clone(), config);
        let reports = Reports::new(
            ledger.clone(),
            storage.products,
            storage.campaigns,
            storage.disputes,
            config,
        );
        Analytics {
            ledger,
            dashboard,
            payments,
            reports,
        }
    }
}
