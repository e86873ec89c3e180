//! Stock ledger: purchases and sales of one product projected into a single
//! date-ordered sequence.
//!
//! Purchases and sales live in separate tables. Each row is wrapped in a
//! [`StockMovement`] and projected into the shared [`LedgerEntry`] shape before
//! the two sequences are merged. Entries are ordered by date; on the same date
//! purchases come before sales, then lower source ids first.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use utoipa::ToSchema;

use crate::entities::{PurchaseModel, SaleModel};

/// Ledger discriminator; serialized as `1` (purchase) or `2` (sale).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TransactionKind {
    Purchase = 1,
    Sale = 2,
}

impl TransactionKind {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for TransactionKind {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(TransactionKind::Purchase),
            2 => Ok(TransactionKind::Sale),
            other => Err(format!("unknown transaction type {other}")),
        }
    }
}

impl Serialize for TransactionKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for TransactionKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u8::deserialize(deserializer)?;
        TransactionKind::try_from(code).map_err(de::Error::custom)
    }
}

/// One row of the merged ledger. Derived on read, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LedgerEntry {
    /// Id of the source purchase or sale row
    pub id: i32,
    pub quantity: i32,
    /// 1 = purchase, 2 = sale
    #[serde(rename = "type")]
    #[schema(value_type = u8, example = 1)]
    pub kind: TransactionKind,
    pub date: NaiveDate,
    /// Product price at query time
    #[schema(value_type = String, example = "10.00")]
    pub unit: Decimal,
}

/// A purchase or sale row before projection.
#[derive(Debug, Clone, PartialEq)]
pub enum StockMovement {
    Purchase(PurchaseModel),
    Sale(SaleModel),
}

impl StockMovement {
    pub fn kind(&self) -> TransactionKind {
        match self {
            StockMovement::Purchase(_) => TransactionKind::Purchase,
            StockMovement::Sale(_) => TransactionKind::Sale,
        }
    }

    pub fn id(&self) -> i32 {
        match self {
            StockMovement::Purchase(row) => row.id,
            StockMovement::Sale(row) => row.id,
        }
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            StockMovement::Purchase(row) => row.date,
            StockMovement::Sale(row) => row.date,
        }
    }

    pub fn quantity(&self) -> i32 {
        match self {
            StockMovement::Purchase(row) => row.quantity,
            StockMovement::Sale(row) => row.quantity,
        }
    }

    fn sort_key(&self) -> (NaiveDate, TransactionKind, i32) {
        (self.date(), self.kind(), self.id())
    }

    pub fn into_entry(self, unit: Decimal) -> LedgerEntry {
        LedgerEntry {
            id: self.id(),
            quantity: self.quantity(),
            kind: self.kind(),
            date: self.date(),
            unit,
        }
    }
}

/// Merge one product's purchases and sales into a date-ordered ledger.
///
/// Every row of both inputs appears exactly once in the output. `unit` is the
/// product's current price and is copied onto every entry.
pub fn merge_ledger(
    purchases: Vec<PurchaseModel>,
    sales: Vec<SaleModel>,
    unit: Decimal,
) -> Vec<LedgerEntry> {
    let mut movements: Vec<StockMovement> = purchases
        .into_iter()
        .map(StockMovement::Purchase)
        .chain(sales.into_iter().map(StockMovement::Sale))
        .collect();

    movements.sort_by_key(StockMovement::sort_key);

    movements
        .into_iter()
        .map(|movement| movement.into_entry(unit))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn purchase(id: i32, quantity: i32, on: &str) -> PurchaseModel {
        PurchaseModel {
            id,
            product_id: 1,
            quantity,
            date: date(on),
            created_at: Utc::now(),
        }
    }

    fn sale(id: i32, quantity: i32, on: &str) -> SaleModel {
        SaleModel {
            id,
            product_id: 1,
            quantity,
            date: date(on),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn interleaves_by_date() {
        let ledger = merge_ledger(
            vec![purchase(1, 5, "2024-01-01"), purchase(2, 7, "2024-01-03")],
            vec![sale(1, 2, "2024-01-02")],
            dec!(10.00),
        );

        let shape: Vec<(TransactionKind, i32)> =
            ledger.iter().map(|e| (e.kind, e.id)).collect();
        assert_eq!(
            shape,
            vec![
                (TransactionKind::Purchase, 1),
                (TransactionKind::Sale, 1),
                (TransactionKind::Purchase, 2),
            ]
        );
        assert!(ledger.iter().all(|e| e.unit == dec!(10.00)));
    }

    #[test]
    fn same_day_puts_purchases_first_then_ids() {
        let ledger = merge_ledger(
            vec![purchase(9, 1, "2024-02-01"), purchase(3, 1, "2024-02-01")],
            vec![sale(1, 1, "2024-02-01")],
            dec!(1),
        );

        let shape: Vec<(TransactionKind, i32)> =
            ledger.iter().map(|e| (e.kind, e.id)).collect();
        assert_eq!(
            shape,
            vec![
                (TransactionKind::Purchase, 3),
                (TransactionKind::Purchase, 9),
                (TransactionKind::Sale, 1),
            ]
        );
    }

    #[test]
    fn colliding_ids_from_both_tables_are_kept() {
        let ledger = merge_ledger(
            vec![purchase(1, 4, "2024-03-01")],
            vec![sale(1, 4, "2024-03-01")],
            dec!(2.50),
        );
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn empty_inputs_give_empty_ledger() {
        assert!(merge_ledger(Vec::new(), Vec::new(), dec!(3)).is_empty());
    }

    #[test]
    fn entry_serializes_type_as_integer() {
        let entry = StockMovement::Sale(sale(4, 2, "2024-01-02")).into_entry(dec!(10.00));
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], 2);
        assert_eq!(json["id"], 4);
        assert_eq!(json["quantity"], 2);
        assert_eq!(json["date"], "2024-01-02");
        assert_eq!(json["unit"], "10.00");

        let back: LedgerEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn unknown_type_code_is_rejected() {
        assert!(TransactionKind::try_from(3).is_err());
        assert!(serde_json::from_str::<TransactionKind>("0").is_err());
    }
}
