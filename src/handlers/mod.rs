use crate::{
    db::DbPool,
    services::{
        inventory::InventoryService, products::ProductService, transactions::TransactionService,
    },
};
use std::sync::Arc;

pub mod common;
pub mod inventory;
pub mod products;
pub mod purchases;
pub mod sales;
pub mod transactions;

/// Services shared by every HTTP handler
#[derive(Clone)]
pub struct AppServices {
    pub products: Arc<ProductService>,
    pub transactions: Arc<TransactionService>,
    pub inventory: Arc<InventoryService>,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self {
            products: Arc::new(ProductService::new(db_pool.clone())),
            transactions: Arc::new(TransactionService::new(db_pool.clone())),
            inventory: Arc::new(InventoryService::new(db_pool)),
        }
    }
}
