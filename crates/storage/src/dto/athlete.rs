use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::patch::{Patch, check_length, validation_error};
use crate::error::Result;
use crate::models::Athlete;

/// Reference to a category or training center by its unique name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct NameRef {
    #[serde(rename = "nome")]
    #[validate(length(min = 1, max = 50, message = "must be between 1 and 50 characters"))]
    pub name: String,
}

/// Request payload for creating a new athlete
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateAthleteRequest {
    #[serde(rename = "nome")]
    #[schema(example = "Joao")]
    #[validate(length(min = 1, max = 50, message = "must be between 1 and 50 characters"))]
    pub name: String,

    #[schema(example = "12345678900")]
    #[validate(length(equal = 11, message = "must be exactly 11 characters"))]
    pub cpf: String,

    #[serde(rename = "idade")]
    #[schema(example = 25)]
    #[validate(range(min = 0, message = "must not be negative"))]
    pub age: i32,

    #[serde(rename = "peso")]
    #[schema(example = 75.5)]
    #[validate(custom(function = "validate_positive"))]
    pub weight: f64,

    #[serde(rename = "altura")]
    #[schema(example = 1.70)]
    #[validate(custom(function = "validate_positive"))]
    pub height: f64,

    #[serde(rename = "sexo")]
    #[schema(example = "M")]
    #[validate(length(equal = 1, message = "must be exactly 1 character"))]
    pub sex: String,

    #[serde(rename = "categoria")]
    #[validate(nested)]
    pub category: NameRef,

    #[serde(rename = "centro_treinamento")]
    #[validate(nested)]
    pub training_center: NameRef,
}

/// Request payload for partially updating an athlete
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAthleteRequest {
    #[serde(rename = "nome", default)]
    #[schema(value_type = Option<String>)]
    #[validate(custom(function = "validate_name"))]
    pub name: Patch<String>,

    #[serde(default)]
    #[schema(value_type = Option<String>)]
    #[validate(custom(function = "validate_cpf"))]
    pub cpf: Patch<String>,

    #[serde(rename = "idade", default)]
    #[schema(value_type = Option<i32>)]
    #[validate(custom(function = "validate_age"))]
    pub age: Patch<i32>,

    #[serde(rename = "peso", default)]
    #[schema(value_type = Option<f64>)]
    #[validate(custom(function = "validate_positive_patch"))]
    pub weight: Patch<f64>,

    #[serde(rename = "altura", default)]
    #[schema(value_type = Option<f64>)]
    #[validate(custom(function = "validate_positive_patch"))]
    pub height: Patch<f64>,

    #[serde(rename = "sexo", default)]
    #[schema(value_type = Option<String>)]
    #[validate(custom(function = "validate_sex"))]
    pub sex: Patch<String>,

    #[serde(rename = "categoria", default)]
    #[schema(value_type = Option<NameRef>)]
    #[validate(custom(function = "validate_ref"))]
    pub category: Patch<NameRef>,

    #[serde(rename = "centro_treinamento", default)]
    #[schema(value_type = Option<NameRef>)]
    #[validate(custom(function = "validate_ref"))]
    pub training_center: Patch<NameRef>,
}

impl UpdateAthleteRequest {
    /// Merges the scalar columns of this payload into `existing`.
    ///
    /// Category and training center changes need a lookup and are resolved
    /// by the repository.
    pub fn apply_to(&self, existing: &Athlete) -> Result<Athlete> {
        Ok(Athlete {
            name: self.name.merge("nome", &existing.name)?,
            cpf: self.cpf.merge("cpf", &existing.cpf)?,
            age: self.age.merge("idade", &existing.age)?,
            weight: self.weight.merge("peso", &existing.weight)?,
            height: self.height.merge("altura", &existing.height)?,
            sex: self.sex.merge("sexo", &existing.sex)?,
            ..existing.clone()
        })
    }
}

fn validate_positive(value: f64) -> std::result::Result<(), ValidationError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(validation_error("range", "must be greater than zero".into()))
    }
}

fn validate_positive_patch(value: &Patch<f64>) -> std::result::Result<(), ValidationError> {
    value.validate_with(|v| validate_positive(*v))
}

fn validate_name(name: &Patch<String>) -> std::result::Result<(), ValidationError> {
    name.validate_with(|n| check_length(n, 1, 50))
}

fn validate_cpf(cpf: &Patch<String>) -> std::result::Result<(), ValidationError> {
    cpf.validate_with(|c| check_length(c, 11, 11))
}

fn validate_sex(sex: &Patch<String>) -> std::result::Result<(), ValidationError> {
    sex.validate_with(|s| check_length(s, 1, 1))
}

fn validate_age(age: &Patch<i32>) -> std::result::Result<(), ValidationError> {
    age.validate_with(|a| {
        if *a >= 0 {
            Ok(())
        } else {
            Err(validation_error("range", "must not be negative".into()))
        }
    })
}

fn validate_ref(reference: &Patch<NameRef>) -> std::result::Result<(), ValidationError> {
    reference.validate_with(|r| check_length(&r.name, 1, 50))
}

/// Optional exact-match filters for the athlete listing
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AthleteFilter {
    /// Athlete name
    pub nome: Option<String>,
    /// Athlete CPF
    pub cpf: Option<String>,
}

/// Category embedded in an athlete response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryInfo {
    pub id: Uuid,
    #[serde(rename = "nome")]
    pub name: String,
}

/// Training center embedded in an athlete response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TrainingCenterInfo {
    pub id: Uuid,
    #[serde(rename = "nome")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AthleteResponse {
    pub id: Uuid,
    #[serde(rename = "nome")]
    pub name: String,
    pub cpf: String,
    #[serde(rename = "idade")]
    pub age: i32,
    #[serde(rename = "peso")]
    pub weight: f64,
    #[serde(rename = "altura")]
    pub height: f64,
    #[serde(rename = "sexo")]
    pub sex: String,
    pub created_at: NaiveDateTime,
    #[serde(rename = "categoria")]
    pub category: CategoryInfo,
    #[serde(rename = "centro_treinamento")]
    pub training_center: TrainingCenterInfo,
}

impl From<Athlete> for AthleteResponse {
    fn from(athlete: Athlete) -> Self {
        Self {
            id: athlete.external_id,
            name: athlete.name,
            cpf: athlete.cpf,
            age: athlete.age,
            weight: athlete.weight,
            height: athlete.height,
            sex: athlete.sex,
            created_at: athlete.created_at,
            category: CategoryInfo {
                id: athlete.category_external_id,
                name: athlete.category_name,
            },
            training_center: TrainingCenterInfo {
                id: athlete.training_center_external_id,
                name: athlete.training_center_name,
            },
        }
    }
}
