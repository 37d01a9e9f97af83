use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::patch::{Patch, check_length};
use crate::error::Result;
use crate::models::Category;

/// Request payload for creating a new category
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryRequest {
    #[serde(rename = "nome")]
    #[schema(example = "Scale")]
    #[validate(length(min = 1, max = 50, message = "must be between 1 and 50 characters"))]
    pub name: String,
}

/// Request payload for partially updating a category
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryRequest {
    #[serde(rename = "nome", default)]
    #[schema(value_type = Option<String>)]
    #[validate(custom(function = "validate_name"))]
    pub name: Patch<String>,
}

impl UpdateCategoryRequest {
    /// Returns `existing` with the fields present in this payload replaced.
    pub fn apply_to(&self, existing: &Category) -> Result<Category> {
        Ok(Category {
            pk_id: existing.pk_id,
            external_id: existing.external_id,
            name: self.name.merge("nome", &existing.name)?,
        })
    }
}

fn validate_name(name: &Patch<String>) -> std::result::Result<(), ValidationError> {
    name.validate_with(|n| check_length(n, 1, 50))
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub id: Uuid,
    #[serde(rename = "nome")]
    pub name: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.external_id,
            name: category.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::patch::error_codes;

    fn category() -> Category {
        Category {
            pk_id: 7,
            external_id: Uuid::new_v4(),
            name: "Scale".to_string(),
        }
    }

    #[test]
    fn test_create_validation() {
        let ok: CreateCategoryRequest = serde_json::from_str(r#"{"nome": "Scale"}"#).unwrap();
        assert!(ok.validate().is_ok());

        let empty = CreateCategoryRequest {
            name: String::new(),
        };
        assert!(empty.validate().is_err());

        let too_long = CreateCategoryRequest {
            name: "x".repeat(51),
        };
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn test_update_rejects_null_name() {
        let req: UpdateCategoryRequest = serde_json::from_str(r#"{"nome": null}"#).unwrap();
        let errors = req.validate().unwrap_err();
        assert!(error_codes(&errors).contains(&"null".to_string()));
    }

    #[test]
    fn test_apply_to_renames() {
        let existing = category();
        let req: UpdateCategoryRequest = serde_json::from_str(r#"{"nome": "RX"}"#).unwrap();
        let merged = req.apply_to(&existing).unwrap();

        assert_eq!(merged.name, "RX");
        assert_eq!(merged.external_id, existing.external_id);
        assert_eq!(merged.pk_id, existing.pk_id);
    }

    #[test]
    fn test_apply_empty_patch_is_identity() {
        let existing = category();
        let req: UpdateCategoryRequest = serde_json::from_str("{}").unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.apply_to(&existing).unwrap(), existing);
    }

    #[test]
    fn test_response_hides_internal_id() {
        let existing = category();
        let json = serde_json::to_value(CategoryResponse::from(existing.clone())).unwrap();

        assert_eq!(json["nome"], "Scale");
        assert_eq!(json["id"], existing.external_id.to_string());
        assert!(json.get("pk_id").is_none());
    }
}
