use serde::Serialize;

use crate::decimal::Decimal;

/// Percentage change between a current and a previous value. The single
/// growth rule for every report: sales, revenue, commission, orders,
/// customers and tax all go through here.
///
/// An empty previous window yields 100 when the current value is positive
/// and 0 otherwise. This is a policy choice, not an undefined case.
pub fn growth(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        if current > 0.0 {
            100.0
        } else {
            0.0
        }
    } else {
        (current - previous) / previous * 100.0
    }
}

/// Money total annotated with its growth against the previous window.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Metric {
    pub total: Decimal,
    pub growth: f64,
}

impl Metric {
    pub fn versus(current: Decimal, previous: Decimal) -> Metric {
        Metric {
            total: current,
            growth: growth(current.to_f64(), previous.to_f64()),
        }
    }
}

/// Row count annotated with its growth against the previous window.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct CountMetric {
    pub count: u64,
    pub growth: f64,
}

impl CountMetric {
    pub fn versus(current: u64, previous: u64) -> CountMetric {
        CountMetric {
            count: current,
            growth: growth(current as f64, previous as f64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_previous() {
        assert_eq!(growth(42.0, 0.0), 100.0);
        assert_eq!(growth(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_unclamped() {
        assert_eq!(growth(300.0, 150.0), 100.0);
        assert_eq!(growth(50.0, 100.0), -50.0);
        assert_eq!(growth(500.0, 100.0), 400.0);
    }

    #[test]
    fn test_metric_pairs() {
        let sales = Metric::versus(Decimal::int(300), Decimal::int(150));
        assert_eq!(sales.total, Decimal::int(300));
        assert_eq!(sales.growth, 100.0);

        let orders = CountMetric::versus(0, 0);
        assert_eq!(orders.count, 0);
        assert_eq!(orders.growth, 0.0);
    }
}
