//! Storage seams, one trait per resource. Services hold these as trait
//! objects and never see SQL.

use async_trait::async_trait;

use crate::database::update::UpdateSet;
use crate::error::Result;
use crate::models::category::Category;
use crate::models::product::Product;
use crate::models::user::{Role, User, UserProfile};

#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    pub category_id: u64,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Returns the generated id.
    async fn insert(&self, user: NewUser) -> Result<u64>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn find_profile(&self, id: u64) -> Result<Option<UserProfile>>;

    /// `None` when the row is gone or holds an unknown role.
    async fn find_role(&self, id: u64) -> Result<Option<Role>>;

    /// Returns the number of affected rows.
    async fn update(&self, id: u64, changes: UpdateSet) -> Result<u64>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Category>>;

    async fn find_by_id(&self, id: u64) -> Result<Option<Category>>;

    /// Lowest id whose name contains `fragment`, ignoring case.
    async fn find_id_by_name(&self, fragment: &str) -> Result<Option<u64>>;

    async fn insert(&self, name: String, description: String) -> Result<u64>;

    async fn update(&self, id: u64, changes: UpdateSet) -> Result<u64>;

    async fn delete(&self, id: u64) -> Result<u64>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Product>>;

    async fn find_by_id(&self, id: u64) -> Result<Option<Product>>;

    async fn insert(&self, product: NewProduct) -> Result<u64>;

    async fn update(&self, id: u64, changes: UpdateSet) -> Result<u64>;

    async fn delete(&self, id: u64) -> Result<u64>;
}
