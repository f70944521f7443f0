use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use stockroom_api::{ApiError, CreateProductRequest, UpdateProductRequest};

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse<'a> {
    status: &'a str,
}

pub async fn root() -> impl IntoResponse {
    let body = json!({
        "service": "Stockroom Server",
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    });
    (StatusCode::OK, Json(body))
}

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse { status: "ok" }))
}

pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    // Ready once the store answers a listing. Cache health is
    // irrelevant here, the service runs without it.
    match state.service.get_all_products().await {
        Ok(_) => (StatusCode::OK, Json(HealthResponse { status: "ready" })),
        Err(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "not ready",
            }),
        ),
    }
}

// ---- Products ----

pub async fn list_products(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let products = state.service.get_all_products().await?;
    Ok(Json(products))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub term: Option<String>,
}

pub async fn search_products(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, ApiError> {
    let term = params.term.unwrap_or_default();
    let products = state.service.search_products(&term).await?;
    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    match state.service.get_product_by_id(id).await? {
        Some(product) => Ok(Json(product)),
        None => Err(ApiError::not_found(format!(
            "Product with id {id} not found"
        ))),
    }
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(request): Json<CreateProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate().map_err(ApiError::bad_request)?;
    let product = state.service.create_product(request.into_draft()).await?;
    let location = format!("/api/products/{}", product.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(product),
    ))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if request.id != id {
        return Err(ApiError::bad_request(
            "Product id in the URL does not match the id in the request body",
        ));
    }
    request.validate().map_err(ApiError::bad_request)?;
    let product = state.service.update_product(&request.into_product()).await?;
    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    if state.service.delete_product(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!(
            "Product with id {id} not found"
        )))
    }
}

pub async fn clear_cache(State(state): State<AppState>) -> impl IntoResponse {
    state.service.clear_cache().await;
    StatusCode::NO_CONTENT
}
