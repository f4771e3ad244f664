use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::{CategoryPatch, NewCategory};
use crate::domain::types::{CategoryName, TypeConstraintError};

fn normalize_description(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Modal form used for both creating and editing a category.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SaveCategoryForm {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaveCategoryFormPayload {
    pub name: CategoryName,
    pub description: Option<String>,
}

impl SaveCategoryFormPayload {
    pub fn into_new_category(self) -> NewCategory {
        let now = Utc::now().naive_utc();
        NewCategory {
            name: self.name,
            description: self.description,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn into_patch(self) -> CategoryPatch {
        CategoryPatch {
            name: self.name,
            description: self.description,
        }
    }
}

#[derive(Debug, Error)]
pub enum SaveCategoryFormError {
    #[error("Category form validation failed: {0}")]
    Validation(String),
    #[error("Category form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for SaveCategoryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for SaveCategoryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<SaveCategoryForm> for SaveCategoryFormPayload {
    type Error = SaveCategoryFormError;

    fn try_from(value: SaveCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            name: CategoryName::new(value.name)?,
            description: normalize_description(value.description),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_category_trims_fields() {
        let form = SaveCategoryForm {
            name: "  Tea  ".to_string(),
            description: Some("  loose leaf  ".to_string()),
        };

        let payload: SaveCategoryFormPayload = form.try_into().unwrap();
        assert_eq!(payload.name.as_str(), "Tea");
        assert_eq!(payload.description.as_deref(), Some("loose leaf"));
    }

    #[test]
    fn save_category_rejects_empty_name() {
        let form = SaveCategoryForm {
            name: String::new(),
            description: None,
        };

        let payload: Result<SaveCategoryFormPayload, _> = form.try_into();
        assert!(payload.is_err());
    }

    #[test]
    fn save_category_rejects_whitespace_only_name() {
        let form = SaveCategoryForm {
            name: "   ".to_string(),
            description: None,
        };

        let payload: Result<SaveCategoryFormPayload, _> = form.try_into();
        assert!(payload.is_err());
    }

    #[test]
    fn blank_description_becomes_none() {
        let form = SaveCategoryForm {
            name: "Tea".to_string(),
            description: Some("   ".to_string()),
        };

        let payload: SaveCategoryFormPayload = form.try_into().unwrap();
        assert_eq!(payload.description, None);
    }
}
