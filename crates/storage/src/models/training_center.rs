use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Row of `centros_treinamento`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TrainingCenter {
    #[serde(skip)]
    pub pk_id: i32,
    pub external_id: Uuid,
    pub name: String,
    pub address: String,
    pub owner: String,
}
