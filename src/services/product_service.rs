use std::sync::Arc;

use crate::database::{CategoryRepository, NewProduct, ProductRepository, UpdateSet};
use crate::dto::product_dto::{CreateProductPayload, UpdateProductPayload};
use crate::error::{Error, Result};
use crate::models::product::Product;
use crate::services::category_service;

pub const NOT_FOUND_MESSAGE: &str = "Product not found";

#[derive(Clone)]
pub struct ProductService {
    products: Arc<dyn ProductRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl ProductService {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            products,
            categories,
        }
    }

    pub async fn list(&self) -> Result<Vec<Product>> {
        self.products.list().await
    }

    pub async fn get_by_id(&self, id: u64) -> Result<Product> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound(NOT_FOUND_MESSAGE.into()))
    }

    /// Resolves the category by name, then inserts. The lookup and the insert
    /// are two independent statements; no transaction spans them.
    pub async fn create(&self, payload: CreateProductPayload) -> Result<u64> {
        let category_id = self
            .categories
            .find_id_by_name(&payload.category_name)
            .await?
            .ok_or_else(|| Error::NotFound(category_service::NOT_FOUND_MESSAGE.into()))?;

        let id = self
            .products
            .insert(NewProduct {
                name: payload.name,
                description: payload.description,
                price: payload.price,
                stock: payload.stock,
                category_id,
            })
            .await?;

        tracing::info!(product_id = id, category_id, "product created");
        Ok(id)
    }

    pub async fn update(&self, id: u64, payload: &UpdateProductPayload) -> Result<()> {
        let changes = UpdateSet::new()
            .set("name", payload.name.clone())
            .set("description", payload.description.clone())
            .set("price", payload.price)
            .set("stock", payload.stock)
            .require_fields()?;

        if self.products.update(id, changes).await? == 0 {
            return Err(Error::NotFound(NOT_FOUND_MESSAGE.into()));
        }
        Ok(())
    }

    pub async fn delete(&self, id: u64) -> Result<()> {
        if self.products.delete(id).await? == 0 {
            return Err(Error::NotFound(NOT_FOUND_MESSAGE.into()));
        }
        tracing::info!(product_id = id, "product deleted");
        Ok(())
    }
}
