use crate::{
    errors::ServiceError,
    handlers::common::{JsonBody, ListParams},
    services::purchase_requisitions::{
        CreatePurchaseRequisitionInput, PurchaseRequisitionDeleteResponse,
        PurchaseRequisitionMutationResponse, PurchaseRequisitionResponse,
        PurchaseRequisitionSummary, UpdatePurchaseRequisitionInput,
    },
    AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

/// Create a purchase requisition with its line items.
#[utoipa::path(
    post,
    path = "/pr/pr/",
    request_body = CreatePurchaseRequisitionInput,
    responses(
        (status = 201, description = "Purchase requisition created", body = PurchaseRequisitionResponse),
        (status = 400, description = "Missing requisition number", body = crate::errors::ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "purchase-requisitions"
)]
pub async fn create_purchase_requisition(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreatePurchaseRequisitionInput>,
) -> Result<(StatusCode, Json<PurchaseRequisitionResponse>), ServiceError> {
    let response = state
        .services
        .purchase_requisitions
        .create_purchase_requisition(input)
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Get a purchase requisition with its items.
#[utoipa::path(
    get,
    path = "/pr/pr/{pr_id}",
    params(("pr_id" = i32, Path, description = "Purchase requisition id")),
    responses(
        (status = 200, description = "Purchase requisition found", body = PurchaseRequisitionResponse),
        (status = 401, description = "Missing or invalid bearer token", body = crate::errors::ErrorResponse),
        (status = 404, description = "Purchase requisition not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "purchase-requisitions"
)]
pub async fn get_purchase_requisition(
    State(state): State<AppState>,
    Path(pr_id): Path<i32>,
) -> Result<Json<PurchaseRequisitionResponse>, ServiceError> {
    let pr = state
        .services
        .purchase_requisitions
        .get_purchase_requisition(pr_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Purchase requisition not found".to_string()))?;
    Ok(Json(pr))
}

/// List purchase requisition headers.
#[utoipa::path(
    get,
    path = "/pr/prs/",
    params(ListParams),
    responses(
        (status = 200, description = "Purchase requisitions", body = [PurchaseRequisitionSummary]),
        (status = 401, description = "Missing or invalid bearer token", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "purchase-requisitions"
)]
pub async fn list_purchase_requisitions(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<PurchaseRequisitionSummary>>, ServiceError> {
    let prs = state
        .services
        .purchase_requisitions
        .list_purchase_requisitions(params.skip, params.limit)
        .await?;
    Ok(Json(prs))
}

/// Update requisition header fields.
#[utoipa::path(
    put,
    path = "/pr/pr/{pr_id}",
    params(("pr_id" = i32, Path, description = "Purchase requisition id")),
    request_body = UpdatePurchaseRequisitionInput,
    responses(
        (status = 200, description = "Purchase requisition updated", body = PurchaseRequisitionMutationResponse),
        (status = 401, description = "Missing or invalid bearer token", body = crate::errors::ErrorResponse),
        (status = 404, description = "Purchase requisition not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "purchase-requisitions"
)]
pub async fn update_purchase_requisition(
    State(state): State<AppState>,
    Path(pr_id): Path<i32>,
    JsonBody(input): JsonBody<UpdatePurchaseRequisitionInput>,
) -> Result<Json<PurchaseRequisitionMutationResponse>, ServiceError> {
    let response = state
        .services
        .purchase_requisitions
        .update_purchase_requisition(pr_id, input)
        .await?;
    Ok(Json(response))
}

/// Delete a purchase requisition header.
#[utoipa::path(
    delete,
    path = "/pr/pr/{pr_id}",
    params(("pr_id" = i32, Path, description = "Purchase requisition id")),
    responses(
        (status = 200, description = "Purchase requisition deleted", body = PurchaseRequisitionDeleteResponse),
        (status = 401, description = "Missing or invalid bearer token", body = crate::errors::ErrorResponse),
        (status = 404, description = "Purchase requisition not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "purchase-requisitions"
)]
pub async fn delete_purchase_requisition(
    State(state): State<AppState>,
    Path(pr_id): Path<i32>,
) -> Result<Json<PurchaseRequisitionDeleteResponse>, ServiceError> {
    let response = state
        .services
        .purchase_requisitions
        .delete_purchase_requisition(pr_id)
        .await?;
    Ok(Json(response))
}

pub fn purchase_requisition_routes() -> Router<AppState> {
    Router::new()
        .route("/pr/", post(create_purchase_requisition))
        .route(
            "/pr/:pr_id",
            get(get_purchase_requisition)
                .put(update_purchase_requisition)
                .delete(delete_purchase_requisition),
        )
        .route("/prs/", get(list_purchase_requisitions))
}
