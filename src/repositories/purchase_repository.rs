use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use std::sync::Arc;

use crate::entities::purchase::{
    ActiveModel as PurchaseActiveModel, Column, Entity as Purchase, Model as PurchaseModel,
};
use crate::errors::ServiceError;

use super::{BaseRepository, Repository};

/// Repository for purchase rows
#[derive(Debug, Clone)]
pub struct PurchaseRepository {
    base: BaseRepository,
}

impl PurchaseRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(
        &self,
        product_id: i32,
        quantity: i32,
        date: NaiveDate,
    ) -> Result<PurchaseModel, ServiceError> {
        let row = PurchaseActiveModel {
            product_id: Set(product_id),
            quantity: Set(quantity),
            date: Set(date),
            ..Default::default()
        };

        Ok(row.insert(self.get_db()).await?)
    }

    /// Every purchase of one product, oldest first
    pub async fn list_by_product(&self, product_id: i32) -> Result<Vec<PurchaseModel>, ServiceError> {
        Ok(Purchase::find()
            .filter(Column::ProductId.eq(product_id))
            .order_by_asc(Column::Date)
            .order_by_asc(Column::Id)
            .all(self.get_db())
            .await?)
    }

    pub async fn count_by_product(&self, product_id: i32) -> Result<u64, ServiceError> {
        Ok(Purchase::find()
            .filter(Column::ProductId.eq(product_id))
            .count(self.get_db())
            .await?)
    }
}

impl Repository for PurchaseRepository {
    fn get_db(&self) -> &DatabaseConnection {
        self.base.get_db()
    }
}
