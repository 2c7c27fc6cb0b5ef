use sea_orm::entity::prelude::*;
use sea_orm::{sea_query::OnConflict, DatabaseConnection, EntityTrait, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::status::MaintenanceModeStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "maintenance_mode_status")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(column_type = "Text")]
    pub payload: String,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn status(&self) -> Result<MaintenanceModeStatus, ModelError> {
        MaintenanceModeStatus::from_json(&self.payload)
    }
}

pub fn validate_key(key: &str) -> Result<(), ModelError> {
    if key.trim().is_empty() {
        return Err(ModelError::Validation("record key required".into()));
    }
    if key.len() > 64 {
        return Err(ModelError::Validation("record key longer than 64 bytes".into()));
    }
    Ok(())
}

pub async fn find(db: &DatabaseConnection, key: &str) -> Result<Option<Model>, ModelError> {
    validate_key(key)?;
    Entity::find_by_id(key.to_string())
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

/// Insert or overwrite the row for `key` in a single statement.
pub async fn upsert(db: &DatabaseConnection, key: &str, status: &MaintenanceModeStatus) -> Result<(), ModelError> {
    validate_key(key)?;
    let am = ActiveModel {
        id: Set(key.to_string()),
        payload: Set(status.to_json()?),
        updated_at: Set(Utc::now().into()),
    };
    Entity::insert(am)
        .on_conflict(
            OnConflict::column(Column::Id)
                .update_columns([Column::Payload, Column::UpdatedAt])
                .to_owned(),
        )
        .exec(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(())
}

pub async fn delete(db: &DatabaseConnection, key: &str) -> Result<bool, ModelError> {
    validate_key(key)?;
    let res = Entity::delete_by_id(key.to_string())
        .exec(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}
