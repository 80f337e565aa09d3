//! `student` entity and the queries the repository layer runs against it.
use sea_orm::{entity::prelude::*, ActiveValue::Unchanged, DatabaseConnection, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "student")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub year_level: i32,
    pub password: String,
    pub date_stamp: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Column values for a row that does not exist yet.
#[derive(Clone, Debug)]
pub struct NewRow<'a> {
    pub student_id: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email_address: &'a str,
    pub year_level: i32,
    pub password: &'a str,
    pub date_stamp: DateTimeWithTimeZone,
}

pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find().order_by_asc(Column::Id).all(db).await?)
}

pub async fn find_by_student_id(db: &DatabaseConnection, student_id: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find()
        .filter(Column::StudentId.eq(student_id))
        .one(db)
        .await?)
}

pub async fn create(db: &DatabaseConnection, row: NewRow<'_>) -> Result<Model, ModelError> {
    if row.student_id.trim().is_empty() {
        return Err(ModelError::Validation("student_id required".into()));
    }
    let am = ActiveModel {
        student_id: Set(row.student_id.to_string()),
        first_name: Set(row.first_name.to_string()),
        last_name: Set(row.last_name.to_string()),
        email_address: Set(row.email_address.to_string()),
        year_level: Set(row.year_level),
        password: Set(row.password.to_string()),
        date_stamp: Set(row.date_stamp),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

/// Write every mutable column of `m` to the row with the same `id`.
/// `id` and `student_id` are left untouched.
pub async fn update(db: &DatabaseConnection, m: Model) -> Result<Model, ModelError> {
    let am = ActiveModel {
        id: Unchanged(m.id),
        student_id: Unchanged(m.student_id),
        first_name: Set(m.first_name),
        last_name: Set(m.last_name),
        email_address: Set(m.email_address),
        year_level: Set(m.year_level),
        password: Set(m.password),
        date_stamp: Set(m.date_stamp),
    };
    Ok(am.update(db).await?)
}

/// Returns `true` when a row was removed.
pub async fn hard_delete(db: &DatabaseConnection, id: i32) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
