use crate::{
    errors::ServiceError,
    handlers::common::{JsonBody, ListParams},
    services::purchase_orders::{
        CreatePurchaseOrderInput, CreatePurchaseOrderResponse, PurchaseOrderResponse,
    },
    AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

/// Create a purchase order with its line items.
///
/// Marks every referenced requisition item "open" and flips the parent
/// requisition's `po_open` flag once all of its items are covered.
#[utoipa::path(
    post,
    path = "/purchase_order/",
    request_body = CreatePurchaseOrderInput,
    responses(
        (status = 201, description = "Purchase order created", body = CreatePurchaseOrderResponse),
        (status = 400, description = "Missing vendor, items, or item fields; unknown requisition", body = crate::errors::ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "purchase-orders"
)]
pub async fn create_purchase_order(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreatePurchaseOrderInput>,
) -> Result<(StatusCode, Json<CreatePurchaseOrderResponse>), ServiceError> {
    let response = state
        .services
        .purchase_orders
        .create_purchase_order(input)
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Get a purchase order with its items.
#[utoipa::path(
    get,
    path = "/purchase_order/{po_id}",
    params(("po_id" = i32, Path, description = "Purchase order id")),
    responses(
        (status = 200, description = "Purchase order found", body = PurchaseOrderResponse),
        (status = 401, description = "Missing or invalid bearer token", body = crate::errors::ErrorResponse),
        (status = 404, description = "Purchase order not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "purchase-orders"
)]
pub async fn get_purchase_order(
    State(state): State<AppState>,
    Path(po_id): Path<i32>,
) -> Result<Json<PurchaseOrderResponse>, ServiceError> {
    let po = state
        .services
        .purchase_orders
        .get_purchase_order(po_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Purchase order not found".to_string()))?;
    Ok(Json(po))
}

/// List purchase orders, each with its items.
#[utoipa::path(
    get,
    path = "/purchase_order/",
    params(ListParams),
    responses(
        (status = 200, description = "Purchase orders", body = [PurchaseOrderResponse]),
        (status = 401, description = "Missing or invalid bearer token", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "purchase-orders"
)]
pub async fn list_purchase_orders(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<PurchaseOrderResponse>>, ServiceError> {
    let pos = state
        .services
        .purchase_orders
        .list_purchase_orders(params.skip, params.limit)
        .await?;
    Ok(Json(pos))
}

pub fn purchase_order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_purchase_orders).post(create_purchase_order))
        .route("/:po_id", get(get_purchase_order))
}
