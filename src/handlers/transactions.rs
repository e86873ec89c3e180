//! Request and response bodies shared by the purchase and sale endpoints.

use crate::entities::{PurchaseModel, SaleModel};
use crate::services::transactions::NewStockTransaction;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    /// Id of an existing product
    #[serde(alias = "product_id", alias = "product")]
    #[schema(example = 1)]
    pub product_id: i32,
    #[validate(range(min = 1, message = "Quantity must be a positive integer"))]
    #[schema(example = 5)]
    pub quantity: i32,
    /// Transaction date, `YYYY-MM-DD`
    pub date: NaiveDate,
}

impl From<CreateTransactionRequest> for NewStockTransaction {
    fn from(request: CreateTransactionRequest) -> Self {
        NewStockTransaction {
            product_id: request.product_id,
            quantity: request.quantity,
            date: request.date,
        }
    }
}

/// A recorded purchase or sale
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl From<PurchaseModel> for TransactionResponse {
    fn from(model: PurchaseModel) -> Self {
        Self {
            id: model.id,
            product_id: model.product_id,
            quantity: model.quantity,
            date: model.date,
            created_at: model.created_at,
        }
    }
}

impl From<SaleModel> for TransactionResponse {
    fn from(model: SaleModel) -> Self {
        Self {
            id: model.id,
            product_id: model.product_id,
            quantity: model.quantity,
            date: model.date,
            created_at: model.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_reference_accepts_all_spellings() {
        for body in [
            r#"{"productId":1,"quantity":5,"date":"2024-01-01"}"#,
            r#"{"product_id":1,"quantity":5,"date":"2024-01-01"}"#,
            r#"{"product":1,"quantity":5,"date":"2024-01-01"}"#,
        ] {
            let request: CreateTransactionRequest = serde_json::from_str(body).unwrap();
            assert_eq!(request.product_id, 1);
        }
    }

    #[test]
    fn zero_quantity_fails_validation() {
        let request: CreateTransactionRequest =
            serde_json::from_str(r#"{"productId":1,"quantity":0,"date":"2024-01-01"}"#).unwrap();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("quantity"));
    }

    #[test]
    fn malformed_date_is_a_deserialization_error() {
        let parsed = serde_json::from_str::<CreateTransactionRequest>(
            r#"{"productId":1,"quantity":1,"date":"01/02/2024"}"#,
        );
        assert!(parsed.is_err());
    }
}
