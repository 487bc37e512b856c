use std::sync::Arc;

use crate::database::{CategoryRepository, UpdateSet};
use crate::dto::category_dto::{CreateCategoryPayload, UpdateCategoryPayload};
use crate::error::{Error, Result};
use crate::models::category::Category;

pub const NOT_FOUND_MESSAGE: &str = "Category not found";

#[derive(Clone)]
pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryRepository>) -> Self {
        Self { categories }
    }

    pub async fn list(&self) -> Result<Vec<Category>> {
        self.categories.list().await
    }

    pub async fn get_by_id(&self, id: u64) -> Result<Category> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound(NOT_FOUND_MESSAGE.into()))
    }

    pub async fn create(&self, payload: CreateCategoryPayload) -> Result<Category> {
        let id = self
            .categories
            .insert(payload.name.clone(), payload.description.clone())
            .await?;

        tracing::info!(category_id = id, "category created");
        Ok(Category {
            id,
            name: payload.name,
            description: payload.description,
        })
    }

    /// Applies the supplied fields; the caller echoes the payload back.
    pub async fn update(&self, id: u64, payload: &UpdateCategoryPayload) -> Result<()> {
        let changes = UpdateSet::new()
            .set("name", payload.name.clone())
            .set("description", payload.description.clone())
            .require_fields()?;

        if self.categories.update(id, changes).await? == 0 {
            return Err(Error::NotFound(NOT_FOUND_MESSAGE.into()));
        }
        Ok(())
    }

    pub async fn delete(&self, id: u64) -> Result<()> {
        if self.categories.delete(id).await? == 0 {
            return Err(Error::NotFound(NOT_FOUND_MESSAGE.into()));
        }
        tracing::info!(category_id = id, "category deleted");
        Ok(())
    }
}
