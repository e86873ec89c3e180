use crate::{
    errors::ServiceError,
    models::ledger::{merge_ledger, LedgerEntry},
    repositories::{ProductRepository, PurchaseRepository, SaleRepository},
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Read side of the stock ledger
#[derive(Clone)]
pub struct InventoryService {
    products: ProductRepository,
    purchases: PurchaseRepository,
    sales: SaleRepository,
}

impl InventoryService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            products: ProductRepository::new(db.clone()),
            purchases: PurchaseRepository::new(db.clone()),
            sales: SaleRepository::new(db),
        }
    }

    /// Purchases and sales of one product, merged and ordered by date.
    ///
    /// The three reads are independent; a write landing between them can be
    /// visible in one and not the others.
    #[instrument(skip(self))]
    pub async fn ledger(&self, product_id: i32) -> Result<Vec<LedgerEntry>, ServiceError> {
        let product = self
            .products
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", product_id)))?;

        let purchases = self.purchases.list_by_product(product_id).await?;
        let sales = self.sales.list_by_product(product_id).await?;
        debug!(
            product_id,
            purchases = purchases.len(),
            sales = sales.len(),
            "Merging ledger"
        );

        Ok(merge_ledger(purchases, sales, product.unit_price()))
    }
}
