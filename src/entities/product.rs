use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelBehavior, ActiveValue, ActiveValue::Set, ConnectionTrait};
use serde::{Deserialize, Serialize};

/// Product entity
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Primary key, assigned by the store
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Product name
    pub name: String,

    /// Product description
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    /// Unit price; the ledger reports this value for every entry
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub price: Decimal,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Decimal places prices are stored and reported with
pub const PRICE_SCALE: u32 = 2;

impl Model {
    /// Price at the stored scale. SQLite keeps decimals as REAL and drops
    /// trailing zeros on read.
    pub fn unit_price(&self) -> Decimal {
        let mut price = self.price.round_dp(PRICE_SCALE);
        price.rescale(PRICE_SCALE);
        price
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::purchase::Entity")]
    Purchases,
    #[sea_orm(has_many = "super::sale::Entity")]
    Sales,
}

impl Related<super::purchase::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Purchases.def()
    }
}

impl Related<super::sale::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sales.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut active_model = self;
        let now = Utc::now();

        if insert {
            if let ActiveValue::NotSet = active_model.created_at {
                active_model.created_at = Set(now);
            }
        }

        active_model.updated_at = Set(now);

        if let ActiveValue::Set(price) = &active_model.price {
            if *price < Decimal::ZERO {
                return Err(DbErr::Custom("Product price cannot be negative".to_string()));
            }
        }

        Ok(active_model)
    }
}
