use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::product::Product;
use crate::utils::sanitize::{clean, clean_opt};
use crate::utils::validation::Schema;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CreateProductPayload {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(range(exclusive_min = 0.0, message = "Price must be positive"))]
    pub price: f64,
    #[validate(range(min = 1, message = "Stock must be positive"))]
    pub stock: i64,
    #[serde(rename = "categoryName")]
    #[validate(length(min = 1, message = "Category name is required"))]
    pub category_name: String,
}

impl Schema for CreateProductPayload {
    const FIELDS: &'static [&'static str] =
        &["name", "description", "price", "stock", "categoryName"];
}

impl CreateProductPayload {
    /// Only string fields are cleaned; price and stock keep their numeric types.
    pub fn sanitized(self) -> Self {
        Self {
            name: clean(&self.name),
            description: clean(&self.description),
            category_name: clean(&self.category_name),
            ..self
        }
    }
}

/// Category is fixed at creation, so `categoryName` is not accepted here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProductPayload {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Description must not be empty"))]
    pub description: Option<String>,
    #[validate(range(exclusive_min = 0.0, message = "Price must be positive"))]
    pub price: Option<f64>,
    #[validate(range(min = 1, message = "Stock must be positive"))]
    pub stock: Option<i64>,
}

impl Schema for UpdateProductPayload {
    const FIELDS: &'static [&'static str] = &["name", "description", "price", "stock"];
}

impl UpdateProductPayload {
    pub fn sanitized(self) -> Self {
        Self {
            name: clean_opt(self.name),
            description: clean_opt(self.description),
            ..self
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductResponse {
    pub product: Product,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreatedResponse {
    pub message: String,
    pub id: u64,
}

/// Echo of the applied update; values come from the request, not a re-read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdatedResponse {
    pub message: String,
    pub id: u64,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
}
