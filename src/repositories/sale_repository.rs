use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use std::sync::Arc;

use crate::entities::sale::{
    ActiveModel as SaleActiveModel, Column, Entity as Sale, Model as SaleModel,
};
use crate::errors::ServiceError;

use super::{BaseRepository, Repository};

/// Repository for sale rows
#[derive(Debug, Clone)]
pub struct SaleRepository {
    base: BaseRepository,
}

impl SaleRepository {
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
    ) -> Result<SaleModel, ServiceError> {
        let row = SaleActiveModel {
            product_id: Set(product_id),
            quantity: Set(quantity),
            date: Set(date),
            ..Default::default()
        };

        Ok(row.insert(self.get_db()).await?)
    }

    /// Every sale of one product, oldest first
    pub async fn list_by_product(&self, product_id: i32) -> Result<Vec<SaleModel>, ServiceError> {
        Ok(Sale::find()
            .filter(Column::ProductId.eq(product_id))
            .order_by_asc(Column::Date)
            .order_by_asc(Column::Id)
            .all(self.get_db())
            .await?)
    }

    pub async fn count_by_product(&self, product_id: i32) -> Result<u64, ServiceError> {
        Ok(Sale::find()
            .filter(Column::ProductId.eq(product_id))
            .count(self.get_db())
            .await?)
    }
}

impl Repository for SaleRepository {
    fn get_db(&self) -> &DatabaseConnection {
        self.base.get_db()
    }
}
