//! Create `accounts` table.
//!
//! Email is the primary login, phone the secondary one; both are unique but
//! nullable. Rows are soft-deleted through `deleted_at`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Accounts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(timestamp_with_time_zone(Accounts::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Accounts::UpdatedAt).not_null())
                    .col(
                        ColumnDef::new(Accounts::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Accounts::Phone).string_len(32).unique_key().null())
                    .col(ColumnDef::new(Accounts::Email).string_len(32).unique_key().null())
                    .col(string_len(Accounts::Password, 255).not_null())
                    .col(string_len(Accounts::Nickname, 64).not_null())
                    .col(ColumnDef::new(Accounts::Avatar).string_len(255).null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_accounts_deleted_at")
                    .table(Accounts::Table)
                    .col(Accounts::DeletedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Accounts::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Accounts { Table, Id, CreatedAt, UpdatedAt, DeletedAt, Phone, Email, Password, Nickname, Avatar }
