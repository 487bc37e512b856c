use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};

use crate::{
    dto::auth_dto::MessageResponse,
    dto::product_dto::{
        CreateProductPayload, ProductCreatedResponse, ProductListResponse, ProductResponse,
        ProductUpdatedResponse, UpdateProductPayload,
    },
    error::Result,
    models::product::Product,
    services::product_service::NOT_FOUND_MESSAGE,
    utils::validation::{PathId, Resource, ValidJson},
    AppState,
};

impl Resource for Product {
    const NOT_FOUND: &'static str = NOT_FOUND_MESSAGE;
}

#[axum::debug_handler]
pub async fn list_products(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let products = state.product_service.list().await?;
    Ok(Json(ProductListResponse { products }))
}

#[axum::debug_handler]
pub async fn get_product(
    State(state): State<AppState>,
    PathId { id, .. }: PathId<Product>,
) -> Result<impl IntoResponse> {
    let product = state.product_service.get_by_id(id).await?;
    Ok(Json(ProductResponse { product }))
}

#[axum::debug_handler]
pub async fn create_product(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<CreateProductPayload>,
) -> Result<impl IntoResponse> {
    let id = state.product_service.create(payload.sanitized()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ProductCreatedResponse {
            message: "Product created!".into(),
            id,
        }),
    ))
}

#[axum::debug_handler]
pub async fn update_product(
    State(state): State<AppState>,
    PathId { id, .. }: PathId<Product>,
    ValidJson(payload): ValidJson<UpdateProductPayload>,
) -> Result<impl IntoResponse> {
    let payload = payload.sanitized();
    state.product_service.update(id, &payload).await?;
    Ok(Json(ProductUpdatedResponse {
        message: "Product updated".into(),
        id,
        name: payload.name,
        description: payload.description,
        price: payload.price,
        stock: payload.stock,
    }))
}

#[axum::debug_handler]
pub async fn delete_product(
    State(state): State<AppState>,
    PathId { id, .. }: PathId<Product>,
) -> Result<impl IntoResponse> {
    state.product_service.delete(id).await?;
    Ok(Json(MessageResponse::new("Product deleted")))
}
