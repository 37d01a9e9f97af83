use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::patch::{Patch, check_length};
use crate::error::Result;
use crate::models::TrainingCenter;

/// Request payload for creating a new training center
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateTrainingCenterRequest {
    #[serde(rename = "nome")]
    #[schema(example = "CT King")]
    #[validate(length(min = 1, max = 50, message = "must be between 1 and 50 characters"))]
    pub name: String,

    #[serde(rename = "endereco")]
    #[schema(example = "Rua X, Q02")]
    #[validate(length(min = 1, max = 60, message = "must be between 1 and 60 characters"))]
    pub address: String,

    #[serde(rename = "proprietario")]
    #[schema(example = "Marcos")]
    #[validate(length(min = 1, max = 30, message = "must be between 1 and 30 characters"))]
    pub owner: String,
}

/// Request payload for partially updating a training center
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateTrainingCenterRequest {
    #[serde(rename = "nome", default)]
    #[schema(value_type = Option<String>)]
    #[validate(custom(function = "validate_name"))]
    pub name: Patch<String>,

    #[serde(rename = "endereco", default)]
    #[schema(value_type = Option<String>)]
    #[validate(custom(function = "validate_address"))]
    pub address: Patch<String>,

    #[serde(rename = "proprietario", default)]
    #[schema(value_type = Option<String>)]
    #[validate(custom(function = "validate_owner"))]
    pub owner: Patch<String>,
}

impl UpdateTrainingCenterRequest {
    pub fn apply_to(&self, existing: &TrainingCenter) -> Result<TrainingCenter> {
        Ok(TrainingCenter {
            pk_id: existing.pk_id,
            external_id: existing.external_id,
            name: self.name.merge("nome", &existing.name)?,
            address: self.address.merge("endereco", &existing.address)?,
            owner: self.owner.merge("proprietario", &existing.owner)?,
        })
    }
}

fn validate_name(name: &Patch<String>) -> std::result::Result<(), ValidationError> {
    name.validate_with(|n| check_length(n, 1, 50))
}

fn validate_address(address: &Patch<String>) -> std::result::Result<(), ValidationError> {
    address.validate_with(|a| check_length(a, 1, 60))
}

fn validate_owner(owner: &Patch<String>) -> std::result::Result<(), ValidationError> {
    owner.validate_with(|o| check_length(o, 1, 30))
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TrainingCenterResponse {
    pub id: Uuid,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "endereco")]
    pub address: String,
    #[serde(rename = "proprietario")]
    pub owner: String,
}

impl From<TrainingCenter> for TrainingCenterResponse {
    fn from(center: TrainingCenter) -> Self {
        Self {
            id: center.external_id,
            name: center.name,
            address: center.address,
            owner: center.owner,
        }
    }
}
