//! Tests for budget ceiling arithmetic.

use proptest::prelude::*;
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::service::BudgetService;
use super::types::BudgetTerms;

fn terms(limit: Decimal, threshold_ratio: Decimal) -> BudgetTerms {
    BudgetTerms {
        year: 2024,
        limit,
        threshold_ratio,
    }
}

#[test]
fn test_untouched_budget() {
    let status = BudgetService::assess(&terms(dec!(1000), dec!(0.1)), dec!(0));

    assert_eq!(status.year, 2024);
    assert_eq!(status.limit, dec!(1000));
    assert_eq!(status.threshold, dec!(0.1));
    assert_eq!(status.spent, dec!(0));
    assert_eq!(status.rest, dec!(1000));
    assert_eq!(status.budget_max, dec!(1100));
}

#[test]
fn test_spending_beyond_the_hard_ceiling() {
    let status = BudgetService::assess(&terms(dec!(1000), dec!(0.1)), dec!(1200));

    // Over the limit and over the threshold-adjusted maximum.
    assert_eq!(status.rest, dec!(-200));
    assert_eq!(status.budget_max, dec!(1100));
    assert!(status.spent > status.budget_max);
}

#[test]
fn test_spending_within_the_overage_allowance() {
    let status = BudgetService::assess(&terms(dec!(1000), dec!(0.1)), dec!(1050));

    assert_eq!(status.rest, dec!(-50));
    assert!(status.spent <= status.budget_max);
}

#[rstest]
#[case(dec!(1000), dec!(0), dec!(1000))]
#[case(dec!(1000), dec!(0.25), dec!(1250))]
#[case(dec!(500.50), dec!(0.1), dec!(550.550))]
#[case(dec!(0), dec!(0.1), dec!(0))]
fn test_budget_max(#[case] limit: Decimal, #[case] ratio: Decimal, #[case] expected: Decimal) {
    let status = BudgetService::assess(&terms(limit, ratio), dec!(0));
    assert_eq!(status.budget_max, expected);
}

#[test]
fn test_exact_decimal_arithmetic() {
    let status = BudgetService::assess(&terms(dec!(999.99), dec!(0.1)), dec!(333.33));

    assert_eq!(status.rest, dec!(666.66));
    assert_eq!(status.budget_max, dec!(1099.989));
}

proptest! {
    /// For any terms and spent amount, the derived fields satisfy
    /// `rest = limit - spent` and `budget_max = limit + threshold * limit`,
    /// and the inputs pass through unchanged.
    #[test]
    fn prop_assess_arithmetic(
        limit in 0i64..1_000_000_000,
        spent in 0i64..1_000_000_000,
        ratio_hundredths in 0i64..100,
    ) {
        let limit = Decimal::new(limit, 2);
        let spent = Decimal::new(spent, 2);
        let ratio = Decimal::new(ratio_hundredths, 2);

        let status = BudgetService::assess(&terms(limit, ratio), spent);

        prop_assert_eq!(status.rest, limit - spent);
        prop_assert_eq!(status.budget_max, limit + ratio * limit);
        prop_assert_eq!(status.limit, limit);
        prop_assert_eq!(status.spent, spent);
        prop_assert_eq!(status.threshold, ratio);
    }

    /// Assessing the same inputs twice yields identical results; the check
    /// reads nothing and writes nothing beyond its arguments.
    #[test]
    fn prop_assess_is_pure(
        limit in 0i64..1_000_000,
        spent in 0i64..1_000_000,
    ) {
        let t = terms(Decimal::from(limit), dec!(0.1));
        let spent = Decimal::from(spent);

        prop_assert_eq!(
            BudgetService::assess(&t, spent),
            BudgetService::assess(&t, spent)
        );
    }
}
