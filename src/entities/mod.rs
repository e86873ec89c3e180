pub mod product;
pub mod purchase;
pub mod sale;

pub use product::{Entity as Product, Model as ProductModel};
pub use purchase::{Entity as Purchase, Model as PurchaseModel};
pub use sale::{Entity as Sale, Model as SaleModel};
