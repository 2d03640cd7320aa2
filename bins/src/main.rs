use std::env;

use analytics::{Analytics, AnalyticsConfig};
use dotenv::dotenv;
use eyre::{eyre, Context};
use log::info;
use model::errors::AnalyticsError;
use model::period::Period;
use model::transaction::TransactionStatus;
use serde_json::Value;

const USAGE: &str = "usage: analytics-cli <shop_id> [dashboard|sales|revenue|commission|tax|refunds|payouts[:pending|:completed]|analytics] [Daily|Weekly|Monthly]";

#[tokio::main]
async fn main() -> eyre::Result<()> {
    if let Err(err) = dotenv() {
        info!("Failed to load .env file: {}", err);
    }
    pretty_env_logger::init();
    color_eyre::install()?;

    let args: Vec<String> = env::args().collect();
    let shop_id: i64 = args
        .get(1)
        .ok_or_else(|| eyre!(USAGE))?
        .parse()
        .context("shop id must be an integer")?;
    let report = args.get(2).map(String::as_str).unwrap_or("dashboard");
    let period = match args.get(3) {
        Some(keyword) => keyword
            .parse::<Period>()
            .map_err(|_| AnalyticsError::UnknownPeriod(keyword.clone()))?,
        None => Period::default(),
    };

    let mongo_url = env::var("MONGO_URL").context("Failed to get MONGO_URL from env")?;
    info!("connecting to mongo");
    let storage = storage::Storage::new(&mongo_url)
        .await
        .context("Failed to create storage")?;
    let analytics = Analytics::new(storage, AnalyticsConfig::default());

    let snapshot: Value = match report {
        "dashboard" => {
            serde_json::to_value(analytics.dashboard.vendor_dashboard(shop_id, period).await?)?
        }
        "sales" => serde_json::to_value(analytics.payments.sales_report(shop_id, period).await?)?,
        "revenue" => {
            serde_json::to_value(analytics.payments.revenue_report(shop_id, period).await?)?
        }
        "commission" => {
            serde_json::to_value(analytics.payments.commission_report(shop_id, period).await?)?
        }
        "tax" => serde_json::to_value(analytics.payments.tax_report(shop_id, period).await?)?,
        "refunds" => {
            serde_json::to_value(analytics.payments.refunds_report(shop_id, period).await?)?
        }
        "payouts" => {
            serde_json::to_value(analytics.payments.payouts_report(shop_id, None).await?)?
        }
        "payouts:pending" => serde_json::to_value(
            analytics
                .payments
                .payouts_report(shop_id, Some(TransactionStatus::Pending))
                .await?,
        )?,
        "payouts:completed" => serde_json::to_value(
            analytics
                .payments
                .payouts_report(shop_id, Some(TransactionStatus::Completed))
                .await?,
        )?,
        "analytics" => {
            serde_json::to_value(analytics.reports.analytics_report(shop_id, period).await?)?
        }
        other => return Err(eyre!("unknown report: {}\n{}", other, USAGE)),
    };

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
