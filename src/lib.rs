pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::config::SessionSettings;
use crate::database::{CategoryRepository, ProductRepository, UserRepository};
use crate::services::{
    auth_service::AuthService, category_service::CategoryService,
    product_service::ProductService,
};

#[derive(Clone)]
pub struct AppState {
    pub session: SessionSettings,
    pub auth_service: AuthService,
    pub category_service: CategoryService,
    pub product_service: ProductService,
}

impl AppState {
    /// Every service shares the one injected store.
    pub fn new<S>(store: Arc<S>, session: SessionSettings) -> Self
    where
        S: UserRepository + CategoryRepository + ProductRepository + 'static,
    {
        let auth_service = AuthService::new(store.clone(), session.jwt_secret.clone());
        let category_service = CategoryService::new(store.clone());
        let product_service = ProductService::new(store.clone(), store);

        Self {
            session,
            auth_service,
            category_service,
            product_service,
        }
    }
}
