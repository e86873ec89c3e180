use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryOrder, Set,
};
use std::sync::Arc;

use crate::entities::product::{
    ActiveModel as ProductActiveModel, Column, Entity as Product, Model as ProductModel,
};
use crate::errors::ServiceError;

use super::{BaseRepository, Repository};

/// Fields a caller may write on a product
#[derive(Debug, Clone, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub price: Option<rust_decimal::Decimal>,
}

/// Repository for product operations
#[derive(Debug, Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find a product by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Option<ProductModel>, ServiceError> {
        Ok(Product::find_by_id(id).one(self.get_db()).await?)
    }

    /// All products in id order
    pub async fn find_all(&self) -> Result<Vec<ProductModel>, ServiceError> {
        Ok(Product::find()
            .order_by_asc(Column::Id)
            .all(self.get_db())
            .await?)
    }

    /// Insert a new product; the id is assigned by the store
    pub async fn create(
        &self,
        name: String,
        description: Option<String>,
        price: rust_decimal::Decimal,
    ) -> Result<ProductModel, ServiceError> {
        let product = ProductActiveModel {
            name: Set(name),
            description: Set(description),
            price: Set(price),
            ..Default::default()
        };

        Ok(product.insert(self.get_db()).await?)
    }

    /// Apply `changes` to an existing product. Unset fields keep their value.
    pub async fn update(
        &self,
        existing: ProductModel,
        changes: ProductChanges,
    ) -> Result<ProductModel, ServiceError> {
        let mut active_model: ProductActiveModel = existing.into();

        if let Some(name) = changes.name {
            active_model.name = Set(name);
        }
        if let Some(description) = changes.description {
            active_model.description = Set(description);
        }
        if let Some(price) = changes.price {
            active_model.price = Set(price);
        }

        Ok(active_model.update(self.get_db()).await?)
    }

    /// Hard delete
    pub async fn delete(&self, product: ProductModel) -> Result<(), ServiceError> {
        product.delete(self.get_db()).await?;
        Ok(())
    }
}

impl Repository for ProductRepository {
    fn get_db(&self) -> &DatabaseConnection {
        self.base.get_db()
    }
}
