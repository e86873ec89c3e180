//! Property-based tests for the stock ledger merge.
//!
//! Random purchase and sale sets are merged and the output checked for
//! ordering, completeness and the type discriminator.

use chrono::{NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use stockroom_api::entities::{PurchaseModel, SaleModel};
use stockroom_api::models::ledger::{merge_ledger, TransactionKind};

// Strategies for generating test data
fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..730).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Duration::days(offset)
    })
}

fn row_strategy() -> impl Strategy<Value = (NaiveDate, i32)> {
    (date_strategy(), 1i32..10_000)
}

fn price_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn purchases(rows: &[(NaiveDate, i32)]) -> Vec<PurchaseModel> {
    rows.iter()
        .enumerate()
        .map(|(i, (date, quantity))| PurchaseModel {
            id: i as i32 + 1,
            product_id: 1,
            quantity: *quantity,
            date: *date,
            created_at: Utc::now(),
        })
        .collect()
}

fn sales(rows: &[(NaiveDate, i32)]) -> Vec<SaleModel> {
    rows.iter()
        .enumerate()
        .map(|(i, (date, quantity))| SaleModel {
            id: i as i32 + 1,
            product_id: 1,
            quantity: *quantity,
            date: *date,
            created_at: Utc::now(),
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn ledger_is_sorted_by_date_then_kind_then_id(
        bought in prop::collection::vec(row_strategy(), 0..40),
        sold in prop::collection::vec(row_strategy(), 0..40),
        unit in price_strategy(),
    ) {
        let ledger = merge_ledger(purchases(&bought), sales(&sold), unit);

        for pair in ledger.windows(2) {
            let a = (pair[0].date, pair[0].kind, pair[0].id);
            let b = (pair[1].date, pair[1].kind, pair[1].id);
            prop_assert!(a < b, "out of order: {:?} then {:?}", a, b);
        }
    }

    #[test]
    fn every_row_appears_once_with_its_discriminator(
        bought in prop::collection::vec(row_strategy(), 0..40),
        sold in prop::collection::vec(row_strategy(), 0..40),
        unit in price_strategy(),
    ) {
        let ledger = merge_ledger(purchases(&bought), sales(&sold), unit);
        prop_assert_eq!(ledger.len(), bought.len() + sold.len());

        let purchase_count = ledger.iter().filter(|e| e.kind == TransactionKind::Purchase).count();
        prop_assert_eq!(purchase_count, bought.len());

        for entry in &ledger {
            prop_assert_eq!(entry.unit, unit);
            let source = match entry.kind {
                TransactionKind::Purchase => bought[entry.id as usize - 1],
                TransactionKind::Sale => sold[entry.id as usize - 1],
            };
            prop_assert_eq!((entry.date, entry.quantity), source);
        }
    }

    #[test]
    fn discriminator_serializes_as_one_or_two(
        bought in prop::collection::vec(row_strategy(), 0..10),
        sold in prop::collection::vec(row_strategy(), 0..10),
    ) {
        let ledger = merge_ledger(purchases(&bought), sales(&sold), Decimal::ONE);
        let json = serde_json::to_value(&ledger).unwrap();

        for (entry, value) in ledger.iter().zip(json.as_array().unwrap()) {
            let expected = match entry.kind {
                TransactionKind::Purchase => 1,
                TransactionKind::Sale => 2,
            };
            prop_assert_eq!(value["type"].as_u64(), Some(expected));
        }
    }

    #[test]
    fn net_stock_is_purchases_minus_sales(
        bought in prop::collection::vec(row_strategy(), 0..40),
        sold in prop::collection::vec(row_strategy(), 0..40),
    ) {
        let ledger = merge_ledger(purchases(&bought), sales(&sold), Decimal::ONE);
        let net: i64 = ledger
            .iter()
            .map(|e| match e.kind {
                TransactionKind::Purchase => i64::from(e.quantity),
                TransactionKind::Sale => -i64::from(e.quantity),
            })
            .sum();

        let expected: i64 = bought.iter().map(|(_, q)| i64::from(*q)).sum::<i64>()
            - sold.iter().map(|(_, q)| i64::from(*q)).sum::<i64>();
        prop_assert_eq!(net, expected);
    }
}
