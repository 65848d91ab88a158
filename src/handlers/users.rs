use crate::{
    errors::ServiceError,
    handlers::common::{JsonBody, ListParams},
    services::users::{
        CreateUserInput, UpdateUserInput, UserDeleteResponse, UserMutationResponse, UserResponse,
    },
    AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

/// Create a member account.
#[utoipa::path(
    post,
    path = "/user/",
    request_body = CreateUserInput,
    responses(
        (status = 201, description = "User created", body = UserMutationResponse),
        (status = 400, description = "Missing fields or email already registered", body = crate::errors::ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateUserInput>,
) -> Result<(StatusCode, Json<UserMutationResponse>), ServiceError> {
    let response = state.services.users.create_user(input).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Get a member record.
#[utoipa::path(
    get,
    path = "/user/{user_id}",
    params(("user_id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 401, description = "Missing or invalid bearer token", body = crate::errors::ErrorResponse),
        (status = 404, description = "User not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<UserResponse>, ServiceError> {
    let user = state
        .services
        .users
        .get_user(user_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))?;
    Ok(Json(user))
}

/// List member records.
#[utoipa::path(
    get,
    path = "/user/users/",
    params(ListParams),
    responses(
        (status = 200, description = "Users", body = [UserResponse]),
        (status = 401, description = "Missing or invalid bearer token", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "users"
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<UserResponse>>, ServiceError> {
    let users = state
        .services
        .users
        .list_users(params.skip, params.limit)
        .await?;
    Ok(Json(users))
}

/// Update member fields.
#[utoipa::path(
    put,
    path = "/user/{user_id}",
    params(("user_id" = i32, Path, description = "User id")),
    request_body = UpdateUserInput,
    responses(
        (status = 200, description = "User updated", body = UserMutationResponse),
        (status = 401, description = "Missing or invalid bearer token", body = crate::errors::ErrorResponse),
        (status = 404, description = "User not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "users"
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    JsonBody(input): JsonBody<UpdateUserInput>,
) -> Result<Json<UserMutationResponse>, ServiceError> {
    let response = state.services.users.update_user(user_id, input).await?;
    Ok(Json(response))
}

/// Delete a member record.
#[utoipa::path(
    delete,
    path = "/user/{user_id}",
    params(("user_id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = UserDeleteResponse),
        (status = 401, description = "Missing or invalid bearer token", body = crate::errors::ErrorResponse),
        (status = 404, description = "User not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "users"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<UserDeleteResponse>, ServiceError> {
    let response = state.services.users.delete_user(user_id).await?;
    Ok(Json(response))
}

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user))
        .route("/users/", get(list_users))
        .route(
            "/:user_id",
            get(get_user).put(update_user).delete(delete_user),
        )
}
