use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Row of `atletas` joined with the category and training center it references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Athlete {
    #[serde(skip)]
    pub pk_id: i32,
    pub external_id: Uuid,
    pub name: String,
    pub cpf: String,
    pub age: i32,
    pub weight: f64,
    pub height: f64,
    pub sex: String,
    pub created_at: NaiveDateTime,
    #[serde(skip)]
    pub category_pk_id: i32,
    pub category_external_id: Uuid,
    pub category_name: String,
    #[serde(skip)]
    pub training_center_pk_id: i32,
    pub training_center_external_id: Uuid,
    pub training_center_name: String,
}
