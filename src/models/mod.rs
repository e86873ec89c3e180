pub mod ledger;

pub use ledger::{merge_ledger, LedgerEntry, StockMovement, TransactionKind};
