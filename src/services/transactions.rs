use crate::{
    entities::{PurchaseModel, SaleModel},
    errors::{is_foreign_key_violation, FieldErrors, ServiceError},
    repositories::{ProductRepository, PurchaseRepository, SaleRepository},
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// A purchase or sale to record; both share this shape.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStockTransaction {
    pub product_id: i32,
    pub quantity: i32,
    pub date: NaiveDate,
}

/// Records purchases and sales. Rows are append-only.
#[derive(Clone)]
pub struct TransactionService {
    products: ProductRepository,
    purchases: PurchaseRepository,
    sales: SaleRepository,
}

impl TransactionService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            products: ProductRepository::new(db.clone()),
            purchases: PurchaseRepository::new(db.clone()),
            sales: SaleRepository::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn record_purchase(
        &self,
        input: NewStockTransaction,
    ) -> Result<PurchaseModel, ServiceError> {
        self.validate(&input).await?;

        let purchase = self
            .purchases
            .create(input.product_id, input.quantity, input.date)
            .await
            .map_err(|err| unknown_product_on_fk(err, input.product_id))?;

        info!(
            purchase_id = purchase.id,
            product_id = purchase.product_id,
            "Recorded purchase"
        );
        Ok(purchase)
    }

    #[instrument(skip(self))]
    pub async fn record_sale(&self, input: NewStockTransaction) -> Result<SaleModel, ServiceError> {
        self.validate(&input).await?;

        let sale = self
            .sales
            .create(input.product_id, input.quantity, input.date)
            .await
            .map_err(|err| unknown_product_on_fk(err, input.product_id))?;

        info!(
            sale_id = sale.id,
            product_id = sale.product_id,
            "Recorded sale"
        );
        Ok(sale)
    }

    async fn validate(&self, input: &NewStockTransaction) -> Result<(), ServiceError> {
        let mut fields = FieldErrors::new();

        if input.quantity <= 0 {
            fields.add("quantity", "Quantity must be a positive integer");
        }

        if self.products.find_by_id(input.product_id).await?.is_none() {
            fields.add("productId", unknown_product_reason(input.product_id));
        }

        if fields.is_empty() {
            Ok(())
        } else {
            warn!(product_id = input.product_id, %fields, "Rejected stock transaction");
            Err(ServiceError::InvalidFields(fields))
        }
    }
}

fn unknown_product_reason(product_id: i32) -> String {
    format!("Product {} does not exist", product_id)
}

fn unknown_product_on_fk(err: ServiceError, product_id: i32) -> ServiceError {
    match err {
        ServiceError::DatabaseError(db_err) if is_foreign_key_violation(&db_err) => {
            ServiceError::InvalidFields(FieldErrors::single(
                "productId",
                unknown_product_reason(product_id),
            ))
        }
        other => other,
    }
}
