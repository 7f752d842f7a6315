// Property-based tests for document totals
//
// Properties tested:
// 1. subtotal = Σ quantity × rate
// 2. percentage discount: discountAmount = subtotal × p / 100
// 3. amount discount converts back to the same percentage
// 4. zero subtotal collapses the amount-to-percentage conversion to 0
// 5. bill tax applies to the discounted amount
// 6. the reference quotation and bill scenarios

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use wazir_backoffice::pricing::{Discount, LineItem, PaymentStatus, TotalsCalculator, Unit};

fn item(quantity: Decimal, rate: Decimal) -> LineItem {
    LineItem::new("Item".to_string(), quantity, Unit::Sft, rate).unwrap()
}

fn cents(value: u64) -> Decimal {
    Decimal::new(value as i64, 2)
}

fn reference_items() -> Vec<LineItem> {
    vec![item(dec!(10), dec!(100)), item(dec!(5), dec!(50))]
}

proptest! {
    /// Property: subtotal is the exact sum of item amounts
    #[test]
    fn test_subtotal_is_sum_of_amounts(
        pairs in prop::collection::vec((0u64..=100_000, 0u64..=10_000_000), 0..20)
    ) {
        let items: Vec<LineItem> = pairs
            .iter()
            .map(|(q, r)| item(cents(*q), cents(*r)))
            .collect();

        let expected: Decimal = pairs
            .iter()
            .map(|(q, r)| cents(*q) * cents(*r))
            .sum();

        prop_assert_eq!(TotalsCalculator::new().subtotal(&items).unwrap(), expected);
    }

    /// Property: percentage discount amount is subtotal × p / 100
    #[test]
    fn test_percentage_discount_amount(
        subtotal_cents in 0u64..=1_000_000_000,
        percent in 0u32..=100
    ) {
        let subtotal = cents(subtotal_cents);
        let p = Decimal::from(percent);

        let breakdown = TotalsCalculator::new()
            .apply_discount(subtotal, Discount::Percentage(p))
            .unwrap();

        prop_assert_eq!(breakdown.amount, subtotal * p / Decimal::ONE_HUNDRED);
        prop_assert_eq!(breakdown.percentage, p);
    }

    /// Property: converting the derived amount back reproduces the percentage
    #[test]
    fn test_amount_round_trips_to_percentage(
        subtotal_cents in 1u64..=1_000_000_000,
        percent in 0u32..=100
    ) {
        let calc = TotalsCalculator::new();
        let subtotal = cents(subtotal_cents);
        let p = Decimal::from(percent);

        let amount = calc.apply_discount(subtotal, Discount::Percentage(p)).unwrap().amount;
        let back = calc.apply_discount(subtotal, Discount::Amount(amount)).unwrap();

        prop_assert_eq!(back.percentage.round_dp(10), p);
        prop_assert_eq!(back.amount, amount);
    }

    /// Property: a zero subtotal never yields a non-zero percentage
    #[test]
    fn test_zero_subtotal_percentage_is_zero(amount_cents in 0u64..=1_000_000) {
        let calc = TotalsCalculator::new();
        prop_assert_eq!(calc.percentage_of(cents(amount_cents), Decimal::ZERO).unwrap(), Decimal::ZERO);
    }

    /// Property: tax applies after the discount and total = after + tax
    #[test]
    fn test_bill_tax_on_discounted_amount(
        quantity in 1u64..=1_000,
        rate_cents in 0u64..=1_000_000,
        percent in 0u32..=100,
        tax in 0u32..=100
    ) {
        let items = vec![item(Decimal::from(quantity), cents(rate_cents))];
        let totals = TotalsCalculator::new()
            .bill_totals(
                &items,
                Discount::Percentage(Decimal::from(percent)),
                Decimal::from(tax),
                Decimal::ZERO,
            )
            .unwrap();

        let after_discount = totals.subtotal - totals.discount_amount;
        prop_assert_eq!(totals.tax_amount, after_discount * Decimal::from(tax) / Decimal::ONE_HUNDRED);
        prop_assert_eq!(totals.total, after_discount + totals.tax_amount);
        prop_assert!(totals.total >= Decimal::ZERO);
    }
}

#[test]
fn test_reference_quotation() {
    let totals = TotalsCalculator::new()
        .quotation_totals(&reference_items(), Discount::Percentage(dec!(10)))
        .unwrap();

    assert_eq!(totals.subtotal, dec!(1250));
    assert_eq!(totals.discount_amount, dec!(125));
    assert_eq!(totals.total, dec!(1125));
}

#[test]
fn test_reference_bill_paid_in_full() {
    let totals = TotalsCalculator::new()
        .bill_totals(
            &reference_items(),
            Discount::Percentage(dec!(10)),
            dec!(5),
            dec!(1181.25),
        )
        .unwrap();

    assert_eq!(totals.tax_amount, dec!(56.25));
    assert_eq!(totals.total, dec!(1181.25));
    assert_eq!(totals.remaining_amount, Decimal::ZERO);
    assert_eq!(totals.status, PaymentStatus::Paid);
}

#[test]
fn test_reference_bill_advance() {
    let totals = TotalsCalculator::new()
        .bill_totals(
            &reference_items(),
            Discount::Percentage(dec!(10)),
            dec!(5),
            dec!(500),
        )
        .unwrap();

    assert_eq!(totals.remaining_amount, dec!(681.25));
    assert_eq!(totals.status, PaymentStatus::Advanced);
}

#[test]
fn test_amount_discount_matches_percentage_form() {
    let calc = TotalsCalculator::new();
    let totals = calc
        .quotation_totals(&reference_items(), Discount::Amount(dec!(125)))
        .unwrap();

    assert_eq!(totals.discount, dec!(10));
    assert_eq!(totals.total, dec!(1125));
}

#[test]
fn test_boundary_inputs_rejected() {
    let calc = TotalsCalculator::new();
    let items = reference_items();

    assert!(calc
        .quotation_totals(&items, Discount::Percentage(dec!(100.01)))
        .is_err());
    assert!(calc
        .quotation_totals(&items, Discount::Percentage(dec!(-1)))
        .is_err());
    assert!(calc
        .quotation_totals(&items, Discount::Amount(dec!(-1)))
        .is_err());
    assert!(calc
        .bill_totals(&items, Discount::default(), dec!(-5), Decimal::ZERO)
        .is_err());
    assert!(calc
        .bill_totals(&items, Discount::default(), Decimal::ZERO, dec!(-0.01))
        .is_err());
}
