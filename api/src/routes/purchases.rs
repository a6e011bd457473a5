use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{json, Value};
use stockroom::models::PurchaseInput;
use stockroom::queries::LedgerFilter;

use super::{envelope, ListParams};
use crate::error::AppError;
use crate::state::AppState;

/// POST /main/purchaseProduct
///
/// Sells a product: decrements its stock and records the purchase.
pub async fn purchase_product(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PurchaseInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let Json(input) = payload?;
    let receipt = state
        .store
        .run(move |s| s.purchases().register(input))
        .await?;

    Ok((
        StatusCode::CREATED,
        envelope(
            "Purchase saved successfully",
            json!({
                "purchase": receipt.purchase,
                "remainingStock": receipt.remaining_stock,
            }),
        ),
    ))
}

/// GET /main/getHistory?page=1&search=asha
pub async fn list_history(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Value>, AppError> {
    let Query(params) = params?;
    let page = params.page();
    let filter = LedgerFilter {
        search: params.search,
    };

    let listed = state
        .store
        .run(move |s| s.purchases().list(page, &filter))
        .await?;

    Ok(envelope(
        "Purchases fetched successfully",
        json!({
            "purchases": listed.page.items,
            "page": listed.page.page,
            "totalPages": listed.page.total_pages,
            "totalCount": listed.page.total_count,
            "totalAmount": listed.total_amount,
        }),
    ))
}
