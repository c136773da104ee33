use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GroceryItems::Table)
                    .if_not_exists()
                    .col(pk_uuid(GroceryItems::Id))
                    .col(string(GroceryItems::Name))
                    .col(integer(GroceryItems::Quantity))
                    .col(string(GroceryItems::Category))
                    .col(string_null(GroceryItems::Notes))
                    .col(boolean(GroceryItems::Bought))
                    .col(timestamp_with_time_zone(GroceryItems::CreatedAt))
                    .col(timestamp_with_time_zone_null(GroceryItems::BoughtAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GroceryItems::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum GroceryItems {
    Table,
    Id,
    Name,
    Quantity,
    Category,
    Notes,
    Bought,
    CreatedAt,
    BoughtAt,
}
