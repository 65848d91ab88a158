use crate::{
    errors::ServiceError,
    handlers::common::{JsonBody, ListParams},
    services::projects::{
        CreateProjectInput, ProjectDeleteResponse, ProjectMutationResponse, ProjectResponse,
        UpdateProjectInput,
    },
    AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

/// Create a project.
#[utoipa::path(
    post,
    path = "/project/",
    request_body = CreateProjectInput,
    responses(
        (status = 201, description = "Project created", body = ProjectMutationResponse),
        (status = 400, description = "Missing project name", body = crate::errors::ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "projects"
)]
pub async fn create_project(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateProjectInput>,
) -> Result<(StatusCode, Json<ProjectMutationResponse>), ServiceError> {
    let response = state.services.projects.create_project(input).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Get a project.
#[utoipa::path(
    get,
    path = "/project/{project_id}",
    params(("project_id" = i32, Path, description = "Project id")),
    responses(
        (status = 200, description = "Project found", body = ProjectResponse),
        (status = 401, description = "Missing or invalid bearer token", body = crate::errors::ErrorResponse),
        (status = 404, description = "Project not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "projects"
)]
pub async fn get_project(
    State(state): State<AppState>,
    Path(project_id): Path<i32>,
) -> Result<Json<ProjectResponse>, ServiceError> {
    let project = state
        .services
        .projects
        .get_project(project_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Project not found".to_string()))?;
    Ok(Json(project))
}

/// List projects.
#[utoipa::path(
    get,
    path = "/project/projects/",
    params(ListParams),
    responses(
        (status = 200, description = "Projects", body = [ProjectResponse]),
        (status = 401, description = "Missing or invalid bearer token", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "projects"
)]
pub async fn list_projects(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<ProjectResponse>>, ServiceError> {
    let projects = state
        .services
        .projects
        .list_projects(params.skip, params.limit)
        .await?;
    Ok(Json(projects))
}

/// Update project fields.
#[utoipa::path(
    put,
    path = "/project/{project_id}",
    params(("project_id" = i32, Path, description = "Project id")),
    request_body = UpdateProjectInput,
    responses(
        (status = 200, description = "Project updated", body = ProjectMutationResponse),
        (status = 401, description = "Missing or invalid bearer token", body = crate::errors::ErrorResponse),
        (status = 404, description = "Project not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "projects"
)]
pub async fn update_project(
    State(state): State<AppState>,
    Path(project_id): Path<i32>,
    JsonBody(input): JsonBody<UpdateProjectInput>,
) -> Result<Json<ProjectMutationResponse>, ServiceError> {
    let response = state
        .services
        .projects
        .update_project(project_id, input)
        .await?;
    Ok(Json(response))
}

/// Delete a project.
#[utoipa::path(
    delete,
    path = "/project/{project_id}",
    params(("project_id" = i32, Path, description = "Project id")),
    responses(
        (status = 200, description = "Project deleted", body = ProjectDeleteResponse),
        (status = 401, description = "Missing or invalid bearer token", body = crate::errors::ErrorResponse),
        (status = 404, description = "Project not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "projects"
)]
pub async fn delete_project(
    State(state): State<AppState>,
    Path(project_id): Path<i32>,
) -> Result<Json<ProjectDeleteResponse>, ServiceError> {
    let response = state.services.projects.delete_project(project_id).await?;
    Ok(Json(response))
}

pub fn project_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_project))
        .route("/projects/", get(list_projects))
        .route(
            "/:project_id",
            get(get_project).put(update_project).delete(delete_project),
        )
}
