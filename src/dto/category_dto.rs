use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::category::Category;
use crate::utils::sanitize::{clean, clean_opt};
use crate::utils::validation::Schema;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CreateCategoryPayload {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
}

impl Schema for CreateCategoryPayload {
    const FIELDS: &'static [&'static str] = &["name", "description"];
}

impl CreateCategoryPayload {
    pub fn sanitized(self) -> Self {
        Self {
            name: clean(&self.name),
            description: clean(&self.description),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateCategoryPayload {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Description must not be empty"))]
    pub description: Option<String>,
}

impl Schema for UpdateCategoryPayload {
    const FIELDS: &'static [&'static str] = &["name", "description"];
}

impl UpdateCategoryPayload {
    pub fn sanitized(self) -> Self {
        Self {
            name: clean_opt(self.name),
            description: clean_opt(self.description),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryListResponse {
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub category: Category,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCreatedResponse {
    pub id: u64,
    pub name: String,
    pub description: String,
}

/// Echo of the applied update; values come from the request, not a re-read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryUpdatedResponse {
    pub message: String,
    pub id: u64,
    pub name: Option<String>,
    pub description: Option<String>,
}
