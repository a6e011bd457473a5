use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use stockroom::models::{Category, ProductInput, ProductPatch};
use stockroom::queries::ProductFilter;

use super::{envelope, ListParams};
use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct DeleteProductBody {
    pub title: Option<String>,
}

/// POST /main/addProducts
pub async fn add_product(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let Json(input) = payload?;
    let product = state.store.run(move |s| s.products().add(input)).await?;

    Ok((
        StatusCode::CREATED,
        envelope("Product added successfully.", json!({ "product": product })),
    ))
}

/// PATCH /main/updateProducts/{id}
pub async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<ProductPatch>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(patch) = payload?;
    let product = state
        .store
        .run(move |s| s.products().update(&id, patch))
        .await?;

    Ok(envelope(
        "Product updated successfully.",
        json!({ "product": product }),
    ))
}

/// GET /main/getProducts?page=2&search=tee&category=men
pub async fn list_products(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Value>, AppError> {
    let Query(params) = params?;
    let page = params.page();
    let category = match params.category.as_deref().map(str::trim) {
        Some(c) if !c.is_empty() => Some(c.parse::<Category>()?),
        _ => None,
    };
    let filter = ProductFilter {
        search: params.search,
        category,
    };

    let listed = state
        .store
        .run(move |s| s.products().list(page, &filter))
        .await?;

    Ok(envelope(
        "Products fetched successfully",
        json!({
            "products": listed.items,
            "page": listed.page,
            "totalPages": listed.total_pages,
            "totalCount": listed.total_count,
        }),
    ))
}

/// GET /main/getProductById/{id}
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let product = state.store.run(move |s| s.products().get(&id)).await?;

    Ok(envelope(
        "Product fetched successfully",
        json!({ "product": product }),
    ))
}

/// DELETE /main/deleteProduct with body `{"title": "..."}`
pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DeleteProductBody>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(body) = payload?;
    let title = body.title.unwrap_or_default();
    let deleted = state
        .store
        .run(move |s| s.products().delete_by_title(&title))
        .await?;

    Ok(envelope(
        "Product deleted successfully",
        json!({ "deletedProduct": deleted }),
    ))
}
