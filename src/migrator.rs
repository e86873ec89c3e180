use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_products_table::Migration),
            Box::new(m20240101_000002_create_purchases_table::Migration),
            Box::new(m20240101_000003_create_sales_table::Migration),
        ]
    }
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Name,
    Description,
    Price,
    CreatedAt,
    UpdatedAt,
}

mod m20240101_000001_create_products_table {
    use super::Products;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_products_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Products::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Products::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Products::Name).string_len(255).not_null())
                        .col(ColumnDef::new(Products::Description).text().null())
                        .col(ColumnDef::new(Products::Price).decimal_len(12, 2).not_null())
                        .col(
                            ColumnDef::new(Products::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Products::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Products::Table).to_owned())
                .await
        }
    }
}

/// Both transaction tables share one shape; only the table name differs.
#[derive(DeriveIden)]
enum StockTransaction {
    Id,
    ProductId,
    Quantity,
    Date,
    CreatedAt,
}

fn stock_transaction_table<T>(table: T, fk_name: &str) -> TableCreateStatement
where
    T: Iden + Copy + 'static,
{
    Table::create()
        .table(table)
        .if_not_exists()
        .col(
            ColumnDef::new(StockTransaction::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(StockTransaction::ProductId).integer().not_null())
        .col(ColumnDef::new(StockTransaction::Quantity).integer().not_null())
        .col(ColumnDef::new(StockTransaction::Date).date().not_null())
        .col(
            ColumnDef::new(StockTransaction::CreatedAt)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .foreign_key(
            ForeignKey::create()
                .name(fk_name)
                .from(table, StockTransaction::ProductId)
                .to(Products::Table, Products::Id)
                .on_delete(ForeignKeyAction::Restrict)
                .on_update(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn product_date_index<T>(table: T, name: &str) -> IndexCreateStatement
where
    T: Iden + 'static,
{
    Index::create()
        .name(name)
        .table(table)
        .col(StockTransaction::ProductId)
        .col(StockTransaction::Date)
        .if_not_exists()
        .to_owned()
}

mod m20240101_000002_create_purchases_table {
    use super::{product_date_index, stock_transaction_table};
    use sea_orm_migration::prelude::*;

    #[derive(DeriveIden, Clone, Copy)]
    enum Purchases {
        Table,
    }

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_purchases_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(stock_transaction_table(
                    Purchases::Table,
                    "fk_purchases_product_id",
                ))
                .await?;

            manager
                .create_index(product_date_index(
                    Purchases::Table,
                    "idx_purchases_product_id_date",
                ))
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Purchases::Table).to_owned())
                .await
        }
    }
}

mod m20240101_000003_create_sales_table {
    use super::{product_date_index, stock_transaction_table};
    use sea_orm_migration::prelude::*;

    #[derive(DeriveIden, Clone, Copy)]
    enum Sales {
        Table,
    }

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_sales_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(stock_transaction_table(Sales::Table, "fk_sales_product_id"))
                .await?;

            manager
                .create_index(product_date_index(Sales::Table, "idx_sales_product_id_date"))
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Sales::Table).to_owned())
                .await
        }
    }
}
