use crate::{
    errors::ServiceError,
    handlers::common::JsonBody,
    services::companies::{
        CompanyDeleteResponse, CompanyFilterRequest, CompanyListResponse, CompanyMutationResponse,
        CompanyResponse, CreateCompanyInput, UpdateCompanyInput,
    },
    AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

/// Create a company.
#[utoipa::path(
    post,
    path = "/company/",
    request_body = CreateCompanyInput,
    responses(
        (status = 201, description = "Company created", body = CompanyMutationResponse),
        (status = 400, description = "Missing company name", body = crate::errors::ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "companies"
)]
pub async fn create_company(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateCompanyInput>,
) -> Result<(StatusCode, Json<CompanyMutationResponse>), ServiceError> {
    let response = state.services.companies.create_company(input).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Search companies by name with page metadata.
#[utoipa::path(
    post,
    path = "/company/companies/filter",
    request_body = CompanyFilterRequest,
    responses(
        (status = 200, description = "Filtered companies", body = CompanyListResponse),
        (status = 401, description = "Missing or invalid bearer token", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "companies"
)]
pub async fn filter_companies(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CompanyFilterRequest>,
) -> Result<Json<CompanyListResponse>, ServiceError> {
    let response = state.services.companies.filter_companies(request).await?;
    Ok(Json(response))
}

/// Get a company.
#[utoipa::path(
    get,
    path = "/company/{company_id}",
    params(("company_id" = i32, Path, description = "Company id")),
    responses(
        (status = 200, description = "Company found", body = CompanyResponse),
        (status = 401, description = "Missing or invalid bearer token", body = crate::errors::ErrorResponse),
        (status = 404, description = "Company not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "companies"
)]
pub async fn get_company(
    State(state): State<AppState>,
    Path(company_id): Path<i32>,
) -> Result<Json<CompanyResponse>, ServiceError> {
    let company = state
        .services
        .companies
        .get_company(company_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Company not found".to_string()))?;
    Ok(Json(company))
}

/// Update company fields.
#[utoipa::path(
    put,
    path = "/company/{company_id}",
    params(("company_id" = i32, Path, description = "Company id")),
    request_body = UpdateCompanyInput,
    responses(
        (status = 200, description = "Company updated", body = CompanyMutationResponse),
        (status = 401, description = "Missing or invalid bearer token", body = crate::errors::ErrorResponse),
        (status = 404, description = "Company not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "companies"
)]
pub async fn update_company(
    State(state): State<AppState>,
    Path(company_id): Path<i32>,
    JsonBody(input): JsonBody<UpdateCompanyInput>,
) -> Result<Json<CompanyMutationResponse>, ServiceError> {
    let response = state
        .services
        .companies
        .update_company(company_id, input)
        .await?;
    Ok(Json(response))
}

/// Delete a company.
#[utoipa::path(
    delete,
    path = "/company/{company_id}",
    params(("company_id" = i32, Path, description = "Company id")),
    responses(
        (status = 200, description = "Company deleted", body = CompanyDeleteResponse),
        (status = 401, description = "Missing or invalid bearer token", body = crate::errors::ErrorResponse),
        (status = 404, description = "Company not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "companies"
)]
pub async fn delete_company(
    State(state): State<AppState>,
    Path(company_id): Path<i32>,
) -> Result<Json<CompanyDeleteResponse>, ServiceError> {
    let response = state.services.companies.delete_company(company_id).await?;
    Ok(Json(response))
}

pub fn company_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_company))
        .route("/companies/filter", post(filter_companies))
        .route(
            "/:company_id",
            get(get_company).put(update_company).delete(delete_company),
        )
}
