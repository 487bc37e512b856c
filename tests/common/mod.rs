#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use chrono::{DateTime, Utc};
use serde_json::Value;
use shopfront::{
    config::SessionSettings,
    database::{
        CategoryRepository, NewProduct, NewUser, ProductRepository, SqlValue, UpdateSet,
        UserRepository,
    },
    error::{Error, Result},
    models::{
        category::Category,
        product::Product,
        user::{Role, User, UserProfile},
    },
    routes, AppState,
};
use tower::ServiceExt;

pub const JWT_SECRET: &str = "test_secret_key";

#[derive(Debug, Clone)]
pub struct StoredUser {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

#[derive(Default)]
struct Tables {
    users: Vec<StoredUser>,
    categories: Vec<Category>,
    products: Vec<Product>,
    next_id: HashMap<&'static str, u64>,
    writes: usize,
    failure: Option<String>,
}

impl Tables {
    fn next_id(&mut self, table: &'static str) -> u64 {
        let next = self.next_id.entry(table).or_insert(0);
        *next += 1;
        *next
    }
}

fn text(value: &SqlValue) -> String {
    match value {
        SqlValue::Text(v) => v.clone(),
        SqlValue::Int(v) => v.to_string(),
        SqlValue::UInt(v) => v.to_string(),
        SqlValue::Float(v) => v.to_string(),
    }
}

fn float(value: &SqlValue) -> f64 {
    match value {
        SqlValue::Float(v) => *v,
        SqlValue::Int(v) => *v as f64,
        SqlValue::UInt(v) => *v as f64,
        SqlValue::Text(v) => v.parse().unwrap_or_default(),
    }
}

fn int(value: &SqlValue) -> i64 {
    match value {
        SqlValue::Int(v) => *v,
        SqlValue::UInt(v) => *v as i64,
        SqlValue::Float(v) => *v as i64,
        SqlValue::Text(v) => v.parse().unwrap_or_default(),
    }
}

/// In-memory stand-in for the MySQL store. Rows keep insertion order and
/// ids count up per table, the way an auto-increment key would.
#[derive(Clone, Default)]
pub struct MemoryDatabase {
    inner: Arc<Mutex<Tables>>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> Vec<StoredUser> {
        self.inner.lock().unwrap().users.clone()
    }

    pub fn categories(&self) -> Vec<Category> {
        self.inner.lock().unwrap().categories.clone()
    }

    pub fn products(&self) -> Vec<Product> {
        self.inner.lock().unwrap().products.clone()
    }

    /// Number of INSERT / UPDATE / DELETE calls that reached storage.
    pub fn writes(&self) -> usize {
        self.inner.lock().unwrap().writes
    }

    /// Every following call fails with this driver message.
    pub fn fail_with(&self, message: &str) {
        self.inner.lock().unwrap().failure = Some(message.to_string());
    }

    pub fn set_role(&self, id: u64, role: Role) {
        let mut tables = self.inner.lock().unwrap();
        for user in tables.users.iter_mut().filter(|u| u.id == id) {
            user.role = role;
        }
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>> {
        let tables = self.inner.lock().unwrap();
        match &tables.failure {
            Some(message) => Err(Error::Database(sqlx::Error::Protocol(message.clone()))),
            None => Ok(tables),
        }
    }

    fn writer(&self) -> Result<MutexGuard<'_, Tables>> {
        let mut tables = self.tables()?;
        tables.writes += 1;
        Ok(tables)
    }
}

#[async_trait]
impl UserRepository for MemoryDatabase {
    async fn insert(&self, user: NewUser) -> Result<u64> {
        let mut tables = self.writer()?;
        let id = tables.next_id("users");
        tables.users.push(StoredUser {
            id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let tables = self.tables()?;
        Ok(tables.users.iter().find(|u| u.email == email).map(|u| User {
            id: u.id,
            username: u.username.clone(),
            email: u.email.clone(),
            password_hash: u.password_hash.clone(),
            role: u.role,
        }))
    }

    async fn find_profile(&self, id: u64) -> Result<Option<UserProfile>> {
        let tables = self.tables()?;
        Ok(tables.users.iter().find(|u| u.id == id).map(|u| UserProfile {
            id: u.id,
            username: u.username.clone(),
            email: u.email.clone(),
            created_at: u.created_at,
            role: u.role,
        }))
    }

    async fn find_role(&self, id: u64) -> Result<Option<Role>> {
        let tables = self.tables()?;
        Ok(tables.users.iter().find(|u| u.id == id).map(|u| u.role))
    }

    async fn update(&self, id: u64, changes: UpdateSet) -> Result<u64> {
        let mut tables = self.writer()?;
        let mut affected = 0;
        for user in tables.users.iter_mut().filter(|u| u.id == id) {
            for (column, value) in changes.assignments() {
                match *column {
                    "username" => user.username = text(value),
                    "email" => user.email = text(value),
                    "password_hash" => user.password_hash = text(value),
                    "role" => user.role = text(value).parse().map_err(Error::Internal)?,
                    other => return Err(Error::Internal(format!("unknown column {other}"))),
                }
            }
            affected += 1;
        }
        Ok(affected)
    }
}

#[async_trait]
impl CategoryRepository for MemoryDatabase {
    async fn list(&self) -> Result<Vec<Category>> {
        Ok(self.tables()?.categories.clone())
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Category>> {
        Ok(self.tables()?.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn find_id_by_name(&self, fragment: &str) -> Result<Option<u64>> {
        let needle = fragment.to_lowercase();
        Ok(self
            .tables()?
            .categories
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .map(|c| c.id)
            .min())
    }

    async fn insert(&self, name: String, description: String) -> Result<u64> {
        let mut tables = self.writer()?;
        let id = tables.next_id("categories");
        tables.categories.push(Category {
            id,
            name,
            description,
        });
        Ok(id)
    }

    async fn update(&self, id: u64, changes: UpdateSet) -> Result<u64> {
        let mut tables = self.writer()?;
        let mut affected = 0;
        for category in tables.categories.iter_mut().filter(|c| c.id == id) {
            for (column, value) in changes.assignments() {
                match *column {
                    "name" => category.name = text(value),
                    "description" => category.description = text(value),
                    other => return Err(Error::Internal(format!("unknown column {other}"))),
                }
            }
            affected += 1;
        }
        Ok(affected)
    }

    async fn delete(&self, id: u64) -> Result<u64> {
        let mut tables = self.writer()?;
        let before = tables.categories.len();
        tables.categories.retain(|c| c.id != id);
        Ok((before - tables.categories.len()) as u64)
    }
}

#[async_trait]
impl ProductRepository for MemoryDatabase {
    async fn list(&self) -> Result<Vec<Product>> {
        Ok(self.tables()?.products.clone())
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Product>> {
        Ok(self.tables()?.products.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, product: NewProduct) -> Result<u64> {
        let mut tables = self.writer()?;
        let id = tables.next_id("products");
        tables.products.push(Product {
            id,
            name: product.name,
            description: product.description,
            price: product.price,
            stock: product.stock,
            category_id: product.category_id,
        });
        Ok(id)
    }

    async fn update(&self, id: u64, changes: UpdateSet) -> Result<u64> {
        let mut tables = self.writer()?;
        let mut affected = 0;
        for product in tables.products.iter_mut().filter(|p| p.id == id) {
            for (column, value) in changes.assignments() {
                match *column {
                    "name" => product.name = text(value),
                    "description" => product.description = text(value),
                    "price" => product.price = float(value),
                    "stock" => product.stock = int(value),
                    other => return Err(Error::Internal(format!("unknown column {other}"))),
                }
            }
            affected += 1;
        }
        Ok(affected)
    }

    async fn delete(&self, id: u64) -> Result<u64> {
        let mut tables = self.writer()?;
        let before = tables.products.len();
        tables.products.retain(|p| p.id != id);
        Ok((before - tables.products.len()) as u64)
    }
}

pub struct TestApp {
    pub db: MemoryDatabase,
    pub router: Router,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// The `token=...` pair from Set-Cookie, ready to send back.
    pub fn session_cookie(&self) -> Option<String> {
        let set_cookie = self.headers.get(header::SET_COOKIE)?.to_str().ok()?;
        set_cookie.split(';').next().map(|pair| pair.trim().to_string())
    }

    pub fn set_cookie(&self) -> String {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    }

    pub fn content_type(&self) -> String {
        self.headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    }
}

impl TestApp {
    pub fn new() -> Self {
        let db = MemoryDatabase::new();
        let state = AppState::new(
            Arc::new(db.clone()),
            SessionSettings {
                jwt_secret: JWT_SECRET.into(),
                secure_cookie: false,
            },
        );
        Self {
            db,
            router: routes::router(state),
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        cookie: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::from(String::from_utf8_lossy(&bytes).to_string())
            })
        };
        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Registers and logs in; returns the new user's id and session cookie.
    pub async fn sign_up(&self, username: &str, email: &str, role: &str) -> (u64, String) {
        let registered = self
            .request(
                Method::POST,
                "/auth/register",
                Some(serde_json::json!({
                    "username": username,
                    "email": email,
                    "password": "secret1",
                    "role": role,
                })),
                None,
            )
            .await;
        assert_eq!(registered.status, StatusCode::CREATED, "{:?}", registered.body);
        let id = registered.body["id"].as_u64().unwrap();

        let logged_in = self
            .request(
                Method::POST,
                "/auth/login",
                Some(serde_json::json!({"email": email, "password": "secret1"})),
                None,
            )
            .await;
        assert_eq!(logged_in.status, StatusCode::OK, "{:?}", logged_in.body);
        (id, logged_in.session_cookie().unwrap())
    }
}
