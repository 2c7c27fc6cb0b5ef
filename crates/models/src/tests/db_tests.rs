use crate::db::{connect_with_config, DatabaseConfig};
use crate::errors::ModelError;
use crate::maintenance_status;
use crate::status::MaintenanceModeStatus;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use anyhow::Result;

/// One pooled connection so every query sees the same in-memory database.
async fn memory_db() -> Result<DatabaseConnection> {
    let cfg = DatabaseConfig {
        url: "sqlite::memory:".into(),
        max_connections: 1,
        min_connections: 1,
        ..DatabaseConfig::default()
    };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::test]
async fn missing_row_is_none() -> Result<()> {
    let db = memory_db().await?;
    assert!(maintenance_status::find(&db, "default").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn upsert_then_find_round_trips() -> Result<()> {
    let db = memory_db().await?;
    let mut status = MaintenanceModeStatus { is_in_maintenance_mode: true, ..Default::default() };
    status.settings.view_model.title = "Upgrading".into();

    maintenance_status::upsert(&db, "default", &status).await?;
    let row = maintenance_status::find(&db, "default").await?.expect("row");
    assert_eq!(row.status()?, status);
    Ok(())
}

#[tokio::test]
async fn upsert_overwrites_existing_row() -> Result<()> {
    let db = memory_db().await?;
    let first = MaintenanceModeStatus { is_in_maintenance_mode: true, ..Default::default() };
    let second = MaintenanceModeStatus { is_content_frozen: true, ..Default::default() };

    maintenance_status::upsert(&db, "default", &first).await?;
    maintenance_status::upsert(&db, "default", &second).await?;

    let row = maintenance_status::find(&db, "default").await?.expect("row");
    assert_eq!(row.status()?, second);
    Ok(())
}

#[tokio::test]
async fn keys_are_independent() -> Result<()> {
    let db = memory_db().await?;
    let on = MaintenanceModeStatus { is_in_maintenance_mode: true, ..Default::default() };
    maintenance_status::upsert(&db, "site-a", &on).await?;

    assert!(maintenance_status::find(&db, "site-b").await?.is_none());
    assert!(maintenance_status::delete(&db, "site-a").await?);
    assert!(!maintenance_status::delete(&db, "site-a").await?);
    Ok(())
}

#[tokio::test]
async fn blank_key_is_rejected() -> Result<()> {
    let db = memory_db().await?;
    let err = maintenance_status::find(&db, "  ").await.unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));
    Ok(())
}
