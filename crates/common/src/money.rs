//! Monetary arithmetic for proposal totals and payment schedules

use crate::types::{LineItem, PaymentInstallment};

/// Tolerance for comparing monetary sums reported by the server.
pub const MONEY_TOLERANCE: f64 = 0.01;

/// Value of a single line: quantity × unit price.
pub fn line_total(quantity: f64, unit_price: f64) -> f64 {
    quantity * unit_price
}

/// Expected total of a proposal: the sum over items plus optionals.
pub fn proposal_total(items: &[LineItem], optionals: &[LineItem]) -> f64 {
    items
        .iter()
        .chain(optionals)
        .map(|item| line_total(item.quantity, item.unit_price))
        .sum()
}

/// Sum of the payment-schedule percentages. Must not exceed 100.
pub fn schedule_percent_sum(schedule: &[PaymentInstallment]) -> f64 {
    schedule.iter().map(|entry| entry.percentage).sum()
}

/// Monetary equality within [`MONEY_TOLERANCE`].
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < MONEY_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn item(quantity: f64, unit_price: f64) -> LineItem {
        LineItem {
            description: "line".to_string(),
            quantity,
            unit_price,
        }
    }

    #[test]
    fn total_sums_items_and_optionals() {
        let items = [item(1.0, 5000.0), item(1.0, 2000.0)];
        let optionals = [item(1.0, 500.0)];
        assert!(approx_eq(proposal_total(&items, &optionals), 7500.0));
    }

    #[test]
    fn total_of_empty_proposal_is_zero() {
        assert_eq!(proposal_total(&[], &[]), 0.0);
    }

    #[test]
    fn quantity_scales_the_line() {
        assert!(approx_eq(line_total(3.0, 150.5), 451.5));
    }

    #[test_case(0.0, 0.005, true; "within tolerance")]
    #[test_case(0.0, 0.01, false; "at tolerance boundary")]
    #[test_case(1000.0, 1000.02, false; "outside tolerance")]
    fn approx_eq_cases(a: f64, b: f64, expected: bool) {
        assert_eq!(approx_eq(a, b), expected);
    }

    #[test]
    fn schedule_sum_accumulates_percentages() {
        let schedule = [
            PaymentInstallment {
                installment: 1,
                percentage: 50.0,
            },
            PaymentInstallment {
                installment: 2,
                percentage: 50.0,
            },
        ];
        assert!(approx_eq(schedule_percent_sum(&schedule), 100.0));
        assert!(schedule_percent_sum(&schedule) <= 100.0 + MONEY_TOLERANCE);
    }
}
