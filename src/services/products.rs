use crate::{
    entities::ProductModel,
    errors::{is_foreign_key_violation, ServiceError},
    repositories::{PurchaseRepository, ProductRepository, SaleRepository},
};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::{info, instrument, warn};

pub use crate::repositories::product_repository::ProductChanges;

/// Complete set of writable product fields, used for create and full replace.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInput {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
}

impl From<ProductInput> for ProductChanges {
    fn from(input: ProductInput) -> Self {
        ProductChanges {
            name: Some(input.name),
            description: Some(input.description),
            price: Some(input.price),
        }
    }
}

/// Product catalog operations
#[derive(Clone)]
pub struct ProductService {
    products: ProductRepository,
    purchases: PurchaseRepository,
    sales: SaleRepository,
}

impl ProductService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            products: ProductRepository::new(db.clone()),
            purchases: PurchaseRepository::new(db.clone()),
            sales: SaleRepository::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<ProductModel>, ServiceError> {
        self.products.find_all().await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, product_id: i32) -> Result<ProductModel, ServiceError> {
        self.products
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", product_id)))
    }

    #[instrument(skip(self))]
    pub async fn create_product(&self, input: ProductInput) -> Result<ProductModel, ServiceError> {
        let product = self
            .products
            .create(input.name, input.description, input.price)
            .await?;

        info!("Created product: {}", product.id);
        Ok(product)
    }

    /// Full replace: every writable field takes the value from `input`.
    #[instrument(skip(self))]
    pub async fn replace_product(
        &self,
        product_id: i32,
        input: ProductInput,
    ) -> Result<ProductModel, ServiceError> {
        self.patch_product(product_id, input.into()).await
    }

    /// Partial update: only fields present in `changes` are written.
    #[instrument(skip(self))]
    pub async fn patch_product(
        &self,
        product_id: i32,
        changes: ProductChanges,
    ) -> Result<ProductModel, ServiceError> {
        let existing = self.get_product(product_id).await?;
        let product = self.products.update(existing, changes).await?;

        info!("Updated product: {}", product_id);
        Ok(product)
    }

    /// Hard delete. Products that still have purchases or sales are kept and
    /// the call fails with `Conflict`.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, product_id: i32) -> Result<(), ServiceError> {
        let product = self.get_product(product_id).await?;

        let purchases = self.purchases.count_by_product(product_id).await?;
        let sales = self.sales.count_by_product(product_id).await?;
        if purchases > 0 || sales > 0 {
            warn!(
                product_id,
                purchases, sales, "Refusing to delete product with recorded transactions"
            );
            return Err(referenced_conflict(product_id, purchases, sales));
        }

        match self.products.delete(product).await {
            Ok(()) => {}
            // A transaction was recorded after the count above.
            Err(ServiceError::DatabaseError(err)) if is_foreign_key_violation(&err) => {
                return Err(ServiceError::Conflict(format!(
                    "Product {} has recorded transactions",
                    product_id
                )));
            }
            Err(err) => return Err(err),
        }

        info!("Deleted product: {}", product_id);
        Ok(())
    }
}

fn referenced_conflict(product_id: i32, purchases: u64, sales: u64) -> ServiceError {
    ServiceError::Conflict(format!(
        "Product {} has {} purchase(s) and {} sale(s) and cannot be deleted",
        product_id, purchases, sales
    ))
}
