use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};

use crate::{
    dto::auth_dto::MessageResponse,
    dto::category_dto::{
        CategoryCreatedResponse, CategoryListResponse, CategoryResponse, CategoryUpdatedResponse,
        CreateCategoryPayload, UpdateCategoryPayload,
    },
    error::Result,
    models::category::Category,
    services::category_service::NOT_FOUND_MESSAGE,
    utils::validation::{PathId, Resource, ValidJson},
    AppState,
};

impl Resource for Category {
    const NOT_FOUND: &'static str = NOT_FOUND_MESSAGE;
}

#[axum::debug_handler]
pub async fn list_categories(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let categories = state.category_service.list().await?;
    Ok(Json(CategoryListResponse { categories }))
}

#[axum::debug_handler]
pub async fn get_category(
    State(state): State<AppState>,
    PathId { id, .. }: PathId<Category>,
) -> Result<impl IntoResponse> {
    let category = state.category_service.get_by_id(id).await?;
    Ok(Json(CategoryResponse { category }))
}

#[axum::debug_handler]
pub async fn create_category(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<CreateCategoryPayload>,
) -> Result<impl IntoResponse> {
    let category = state.category_service.create(payload.sanitized()).await?;
    Ok((
        StatusCode::CREATED,
        Json(CategoryCreatedResponse {
            id: category.id,
            name: category.name,
            description: category.description,
        }),
    ))
}

#[axum::debug_handler]
pub async fn update_category(
    State(state): State<AppState>,
    PathId { id, .. }: PathId<Category>,
    ValidJson(payload): ValidJson<UpdateCategoryPayload>,
) -> Result<impl IntoResponse> {
    let payload = payload.sanitized();
    state.category_service.update(id, &payload).await?;
    Ok(Json(CategoryUpdatedResponse {
        message: "Category updated".into(),
        id,
        name: payload.name,
        description: payload.description,
    }))
}

#[axum::debug_handler]
pub async fn delete_category(
    State(state): State<AppState>,
    PathId { id, .. }: PathId<Category>,
) -> Result<impl IntoResponse> {
    state.category_service.delete(id).await?;
    Ok(Json(MessageResponse::new("Category deleted successfully")))
}
