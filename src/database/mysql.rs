use async_trait::async_trait;
use sqlx::{mysql::MySqlArguments, query::Query, MySql, MySqlPool};

use crate::database::repository::{
    CategoryRepository, NewProduct, NewUser, ProductRepository, UserRepository,
};
use crate::database::update::{SqlValue, UpdateSet};
use crate::error::Result;
use crate::models::category::Category;
use crate::models::product::Product;
use crate::models::user::{Role, User, UserProfile};

const INSERT_USER: &str =
    "INSERT INTO users (username, email, password_hash, role) VALUES (?, ?, ?, ?)";
const SELECT_USER_BY_EMAIL: &str =
    "SELECT id, username, email, password_hash, role FROM users WHERE email = ?";
const SELECT_PROFILE: &str =
    "SELECT id, username, email, created_at, role FROM users WHERE id = ?";
const SELECT_ROLE: &str = "SELECT role FROM users WHERE id = ?";

const SELECT_CATEGORIES: &str = "SELECT id, name, description FROM categories";
const SELECT_CATEGORY: &str = "SELECT id, name, description FROM categories WHERE id = ?";
const FIND_CATEGORY_ID: &str =
    "SELECT id FROM categories WHERE LOWER(name) LIKE ? ORDER BY id LIMIT 1";
const INSERT_CATEGORY: &str = "INSERT INTO categories (name, description) VALUES (?, ?)";
const DELETE_CATEGORY: &str = "DELETE FROM categories WHERE id = ?";

// price is DECIMAL in storage; read it as DOUBLE so it decodes straight to f64.
const SELECT_PRODUCTS: &str = "SELECT id, name, description, CAST(price AS DOUBLE) AS price, \
     stock, category_id FROM products";
const SELECT_PRODUCT: &str = "SELECT id, name, description, CAST(price AS DOUBLE) AS price, \
     stock, category_id FROM products WHERE id = ?";
const INSERT_PRODUCT: &str =
    "INSERT INTO products (name, description, price, stock, category_id) VALUES (?, ?, ?, ?, ?)";
const DELETE_PRODUCT: &str = "DELETE FROM products WHERE id = ?";

/// `%fragment%` for a case-insensitive contains match, with LIKE wildcards in
/// the fragment taken literally.
pub fn contains_pattern(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len() + 2);
    escaped.push('%');
    for ch in fragment.to_lowercase().chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

fn bind_values(sql: &str, values: Vec<SqlValue>) -> Query<'_, MySql, MySqlArguments> {
    values
        .into_iter()
        .fold(sqlx::query(sql), |query, value| match value {
            SqlValue::Int(v) => query.bind(v),
            SqlValue::UInt(v) => query.bind(v),
            SqlValue::Float(v) => query.bind(v),
            SqlValue::Text(v) => query.bind(v),
        })
}

/// Every repository over the one shared pool.
#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn apply(&self, table: &str, id: u64, changes: UpdateSet) -> Result<u64> {
        let (sql, params) = changes.into_statement(table, "id", id)?;
        let result = bind_values(&sql, params).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn delete_by_id(&self, sql: &str, id: u64) -> Result<u64> {
        let result = sqlx::query(sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl UserRepository for MySqlStore {
    async fn insert(&self, user: NewUser) -> Result<u64> {
        let result = sqlx::query(INSERT_USER)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_id())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(SELECT_USER_BY_EMAIL)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_profile(&self, id: u64) -> Result<Option<UserProfile>> {
        let profile = sqlx::query_as::<_, UserProfile>(SELECT_PROFILE)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(profile)
    }

    async fn find_role(&self, id: u64) -> Result<Option<Role>> {
        let role = sqlx::query_scalar::<_, String>(SELECT_ROLE)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(role.and_then(|role| role.parse().ok()))
    }

    async fn update(&self, id: u64, changes: UpdateSet) -> Result<u64> {
        self.apply("users", id, changes).await
    }
}

#[async_trait]
impl CategoryRepository for MySqlStore {
    async fn list(&self) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(SELECT_CATEGORIES)
            .fetch_all(&self.pool)
            .await?;
        Ok(categories)
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(SELECT_CATEGORY)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(category)
    }

    async fn find_id_by_name(&self, fragment: &str) -> Result<Option<u64>> {
        let id = sqlx::query_scalar::<_, u64>(FIND_CATEGORY_ID)
            .bind(contains_pattern(fragment))
            .fetch_optional(&self.pool)
            .await?;
        Ok(id)
    }

    async fn insert(&self, name: String, description: String) -> Result<u64> {
        let result = sqlx::query(INSERT_CATEGORY)
            .bind(name)
            .bind(description)
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_id())
    }

    async fn update(&self, id: u64, changes: UpdateSet) -> Result<u64> {
        self.apply("categories", id, changes).await
    }

    async fn delete(&self, id: u64) -> Result<u64> {
        self.delete_by_id(DELETE_CATEGORY, id).await
    }
}

#[async_trait]
impl ProductRepository for MySqlStore {
    async fn list(&self) -> Result<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(SELECT_PRODUCTS)
            .fetch_all(&self.pool)
            .await?;
        Ok(products)
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(SELECT_PRODUCT)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }

    async fn insert(&self, product: NewProduct) -> Result<u64> {
        let result = sqlx::query(INSERT_PRODUCT)
            .bind(product.name)
            .bind(product.description)
            .bind(product.price)
            .bind(product.stock)
            .bind(product.category_id)
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_id())
    }

    async fn update(&self, id: u64, changes: UpdateSet) -> Result<u64> {
        self.apply("products", id, changes).await
    }

    async fn delete(&self, id: u64) -> Result<u64> {
        self.delete_by_id(DELETE_PRODUCT, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_is_lowercased_and_escaped() {
        assert_eq!(contains_pattern("Book"), "%book%");
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(contains_pattern("a\\b"), "%a\\\\b%");
    }
}
