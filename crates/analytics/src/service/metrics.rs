use std::collections::HashSet;

use model::campaign::{Campaign, CampaignKind};
use model::decimal::Decimal;
use model::dispute::{Dispute, DisputeStatus};
use model::expense::VendorExpense;
use model::reports::{CampaignBreakdown, ReasonBucket};
use model::transaction::Transaction;

/// Pure reductions over pre-filtered transaction sequences. Callers are
/// responsible for fetching the right rows (e.g. completed order payments
/// for sales); nothing here re-filters by type or status.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalesTotals {
    pub amount: Decimal,
    pub orders: u64,
    pub average: Decimal,
}

pub fn sales_totals(rows: &[Transaction]) -> SalesTotals {
    let amount: Decimal = rows.iter().map(|tx| tx.amount).sum();
    let orders = rows.len() as u64;
    let average = if orders == 0 {
        Decimal::zero()
    } else {
        amount / Decimal::int(orders as i64)
    };
    SalesTotals {
        amount,
        orders,
        average,
    }
}

pub fn commission_total(rows: &[Transaction], rate: Decimal) -> Decimal {
    rows.iter().map(|tx| tx.amount * rate).sum()
}

/// Tax collected over the window. Tax liability is defined identically
/// until a real liability model exists upstream.
pub fn tax_total(rows: &[Transaction]) -> Decimal {
    rows.iter().map(|tx| tx.tax).sum()
}

pub fn distinct_customers(rows: &[Transaction]) -> u64 {
    rows.iter()
        .filter_map(|tx| tx.customer)
        .collect::<HashSet<_>>()
        .len() as u64
}

pub fn expenses_total(expenses: &[VendorExpense]) -> Decimal {
    expenses.iter().map(|expense| expense.amount).sum()
}

pub fn net_earning(sales: Decimal, expenses: &[VendorExpense]) -> Decimal {
    sales - expenses_total(expenses)
}

/// Two non-negative counters, never one signed number: exactly one of the
/// pair is positive for any non-zero diff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfitLoss {
    pub profit: Decimal,
    pub loss: Decimal,
}

pub fn profit_loss(net: Decimal) -> ProfitLoss {
    ProfitLoss {
        profit: net.max_zero(),
        loss: (-net).max_zero(),
    }
}

/// Completed orders over all orders, as a percentage. 0 for an empty
/// window, never NaN.
pub fn fulfilment_rate(completed: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        completed as f64 / total as f64 * 100.0
    }
}

pub fn open_disputes(disputes: &[Dispute]) -> u64 {
    disputes
        .iter()
        .filter(|dispute| {
            matches!(
                dispute.status,
                DisputeStatus::Open | DisputeStatus::UnderReview
            )
        })
        .count() as u64
}

const DISPUTE_REASONS: [(&str, &str); 3] = [
    ("Product quality", "quality"),
    ("Shipping", "shipping"),
    ("Payment", "payment"),
];

/// Fixed reason breakdown over free-form descriptions. Anything that
/// matches no known label lands in "Other"; there is no structured reason
/// taxonomy upstream to do better.
pub fn dispute_reasons(disputes: &[Dispute]) -> Vec<ReasonBucket> {
    let mut counts = [0u64; DISPUTE_REASONS.len() + 1];
    for dispute in disputes {
        let description = dispute.description.to_lowercase();
        let index = DISPUTE_REASONS
            .iter()
            .position(|(_, needle)| description.contains(needle))
            .unwrap_or(DISPUTE_REASONS.len());
        counts[index] += 1;
    }
    DISPUTE_REASONS
        .iter()
        .map(|(label, _)| *label)
        .chain(["Other"])
        .zip(counts)
        .map(|(reason, count)| ReasonBucket { reason, count })
        .collect()
}

pub fn campaign_breakdown(campaigns: &[Campaign], price_per_campaign: Decimal) -> CampaignBreakdown {
    let mut email = 0;
    let mut sms = 0;
    let mut post = 0;
    for campaign in campaigns {
        match campaign.kind {
            CampaignKind::Email => email += 1,
            CampaignKind::Sms => sms += 1,
            CampaignKind::Post => post += 1,
        }
    }
    let total = campaigns.len() as u64;
    CampaignBreakdown {
        email,
        sms,
        post,
        total,
        estimated_spend: price_per_campaign * Decimal::int(total as i64),
    }
}

#[cfg(test)]
mod tests {
    use bson::oid::ObjectId;
    use chrono::Utc;
    use model::growth::growth;

    use crate::service::testing::{at, order};

    use super::*;

    #[test]
    fn test_sales_totals() {
        let rows = vec![order(100, at(2024, 5, 2, 11)), order(200, at(2024, 5, 3, 12))];
        let totals = sales_totals(&rows);
        assert_eq!(totals.amount, Decimal::int(300));
        assert_eq!(totals.orders, 2);
        assert_eq!(totals.average, Decimal::int(150));
        // sum == average * count
        assert_eq!(
            totals.average * Decimal::int(totals.orders as i64),
            totals.amount
        );
    }

    #[test]
    fn test_sales_totals_empty() {
        let totals = sales_totals(&[]);
        assert_eq!(totals.amount, Decimal::zero());
        assert_eq!(totals.orders, 0);
        assert_eq!(totals.average, Decimal::zero());
    }

    #[test]
    fn test_month_over_month_scenario() {
        // Two completed orders of 100 and 200 now, one of 150 before.
        let current = sales_totals(&[
            order(100, at(2024, 5, 2, 11)),
            order(200, at(2024, 5, 3, 12)),
        ]);
        let previous = sales_totals(&[order(150, at(2024, 4, 20, 15))]);
        assert_eq!(current.amount, Decimal::int(300));
        assert_eq!(current.orders, 2);
        assert_eq!(current.average, Decimal::int(150));
        assert_eq!(
            growth(current.amount.to_f64(), previous.amount.to_f64()),
            100.0
        );
    }

    #[test]
    fn test_commission() {
        let rows = vec![order(100, at(2024, 5, 2, 11)), order(200, at(2024, 5, 3, 12))];
        assert_eq!(
            commission_total(&rows, Decimal::from(0.05)),
            Decimal::int(15)
        );
    }

    #[test]
    fn test_profit_loss_exclusive() {
        let profitable = profit_loss(Decimal::int(120));
        assert_eq!(profitable.profit, Decimal::int(120));
        assert_eq!(profitable.loss, Decimal::zero());

        let losing = profit_loss(Decimal::int(-80));
        assert_eq!(losing.profit, Decimal::zero());
        assert_eq!(losing.loss, Decimal::int(80));

        let flat = profit_loss(Decimal::zero());
        assert_eq!(flat.profit, Decimal::zero());
        assert_eq!(flat.loss, Decimal::zero());
    }

    #[test]
    fn test_net_earning() {
        let expenses = vec![VendorExpense {
            id: ObjectId::new(),
            owner: ObjectId::new(),
            amount: Decimal::int(70),
            description: "packaging".to_string(),
            date: Utc::now(),
        }];
        assert_eq!(net_earning(Decimal::int(300), &expenses), Decimal::int(230));
    }

    #[test]
    fn test_fulfilment_rate() {
        assert_eq!(fulfilment_rate(3, 4), 75.0);
        assert_eq!(fulfilment_rate(0, 0), 0.0);
    }

    #[test]
    fn test_distinct_customers() {
        let repeat = ObjectId::new();
        let mut rows = vec![order(10, at(2024, 5, 2, 11)), order(20, at(2024, 5, 2, 12))];
        rows[0].customer = Some(repeat);
        rows[1].customer = Some(repeat);
        rows.push(order(30, at(2024, 5, 2, 13)));
        rows[2].customer = Some(ObjectId::new());
        assert_eq!(distinct_customers(&rows), 2);
    }

    #[test]
    fn test_dispute_reasons_fall_back_to_other() {
        let dispute = |description: &str| Dispute {
            id: ObjectId::new(),
            owner: ObjectId::new(),
            status: DisputeStatus::Open,
            description: description.to_string(),
            created_at: Utc::now(),
        };
        let disputes = vec![
            dispute("Poor quality item"),
            dispute("shipping took a month"),
            dispute("no idea what happened"),
        ];
        let reasons = dispute_reasons(&disputes);
        assert_eq!(reasons.len(), 4);
        assert_eq!(reasons[0], ReasonBucket { reason: "Product quality", count: 1 });
        assert_eq!(reasons[1], ReasonBucket { reason: "Shipping", count: 1 });
        assert_eq!(reasons[2], ReasonBucket { reason: "Payment", count: 0 });
        assert_eq!(reasons[3], ReasonBucket { reason: "Other", count: 1 });
    }

    #[test]
    fn test_campaign_breakdown() {
        let campaign = |kind| Campaign {
            id: ObjectId::new(),
            created_by: ObjectId::new(),
            name: "spring push".to_string(),
            kind,
            created_at: Utc::now(),
        };
        let campaigns = vec![
            campaign(CampaignKind::Email),
            campaign(CampaignKind::Email),
            campaign(CampaignKind::Sms),
        ];
        let breakdown = campaign_breakdown(&campaigns, Decimal::int(25));
        assert_eq!(breakdown.email, 2);
        assert_eq!(breakdown.sms, 1);
        assert_eq!(breakdown.post, 0);
        assert_eq!(breakdown.total, 3);
        assert_eq!(breakdown.estimated_spend, Decimal::int(75));
    }
}
