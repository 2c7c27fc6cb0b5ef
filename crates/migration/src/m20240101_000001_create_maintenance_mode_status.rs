//! Create `maintenance_mode_status` table.
//!
//! One row per record key; the status document is stored as JSON text so the
//! column layout does not change when display settings grow.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MaintenanceModeStatus::Table)
                    .if_not_exists()
                    .col(string_len(MaintenanceModeStatus::Id, 64).primary_key())
                    .col(text(MaintenanceModeStatus::Payload).not_null())
                    .col(timestamp_with_time_zone(MaintenanceModeStatus::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MaintenanceModeStatus::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum MaintenanceModeStatus { Table, Id, Payload, UpdatedAt }
