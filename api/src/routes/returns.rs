use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use stockroom::queries::LedgerFilter;

use super::{envelope, ListParams};
use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnBody {
    pub consumer_id: Option<String>,
}

/// POST /main/productReturned with body `{"consumerId": "..."}`
///
/// Moves a purchase into the returns ledger.
pub async fn return_product(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ReturnBody>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(body) = payload?;
    let consumer_id = body.consumer_id.unwrap_or_default();
    let record = state
        .store
        .run(move |s| s.returns().create_from_purchase(&consumer_id))
        .await?;

    Ok(envelope("Return record created", json!({ "return": record })))
}

/// GET /main/getReturnProducts?page=1&search=asha
pub async fn list_returns(
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
        .run(move |s| s.returns().list(page, &filter))
        .await?;

    Ok(envelope(
        "Returned products fetched successfully",
        json!({
            "returns": listed.page.items,
            "page": listed.page.page,
            "totalPages": listed.page.total_pages,
            "totalCount": listed.page.total_count,
            "totalAmount": listed.total_amount,
        }),
    ))
}
