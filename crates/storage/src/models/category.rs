use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Row of `categorias`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Category {
    #[serde(skip)]
    pub pk_id: i32,
    pub external_id: Uuid,
    pub name: String,
}
