use crate::{
    db::DbPool,
    entities::project::{self, Entity as ProjectEntity},
    errors::ServiceError,
    events::{Event, EventSender},
};
use sea_orm::{ActiveModelTrait, EntityTrait, ModelTrait, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProjectInput {
    pub project_code: Option<String>,
    #[validate(length(min = 1, message = "Project name is required"))]
    pub project_name: String,
    pub project_worktype: Option<String>,
    pub project_type: Option<String>,
    pub project_address: Option<String>,
    pub project_cname: Option<String>,
    pub project_tel: Option<String>,
    pub project_email: Option<String>,
}

/// Partial update; the project code is immutable.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProjectInput {
    pub project_name: Option<String>,
    pub project_worktype: Option<String>,
    pub project_type: Option<String>,
    pub project_address: Option<String>,
    pub project_cname: Option<String>,
    pub project_tel: Option<String>,
    pub project_email: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProjectMutationResponse {
    pub message: String,
    pub project_id: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProjectDeleteResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProjectResponse {
    pub project_id: i32,
    pub project_code: Option<String>,
    pub project_name: String,
    pub project_worktype: Option<String>,
    pub project_type: Option<String>,
    pub project_address: Option<String>,
    pub project_cname: Option<String>,
    pub project_tel: Option<String>,
    pub project_email: Option<String>,
}

/// Service for project reference records.
#[derive(Clone)]
pub struct ProjectService {
    db_pool: Arc<DbPool>,
    event_sender: Option<Arc<EventSender>>,
}

impl ProjectService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Option<Arc<EventSender>>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    #[instrument(skip(self, input), fields(project_name = %input.project_name))]
    pub async fn create_project(
        &self,
        input: CreateProjectInput,
    ) -> Result<ProjectMutationResponse, ServiceError> {
        input
            .validate()
            .map_err(|e| ServiceError::ValidationError(e.to_string()))?;

        let db = &*self.db_pool;

        let active = project::ActiveModel {
            project_code: Set(input.project_code),
            project_name: Set(input.project_name),
            project_worktype: Set(input.project_worktype),
            project_type: Set(input.project_type),
            project_address: Set(input.project_address),
            project_cname: Set(input.project_cname),
            project_tel: Set(input.project_tel),
            project_email: Set(input.project_email),
            ..Default::default()
        };

        let model = active.insert(db).await.map_err(|e| {
            error!(error = %e, "Failed to insert project");
            ServiceError::DatabaseError(e)
        })?;

        info!(project_id = model.project_id, "Project created successfully");

        if let Some(event_sender) = &self.event_sender {
            if let Err(e) = event_sender
                .send(Event::ProjectCreated(model.project_id))
                .await
            {
                warn!(error = %e, project_id = model.project_id, "Failed to send project created event");
            }
        }

        Ok(ProjectMutationResponse {
            message: "Project created successfully".to_string(),
            project_id: model.project_id,
        })
    }

    #[instrument(skip(self))]
    pub async fn get_project(
        &self,
        project_id: i32,
    ) -> Result<Option<ProjectResponse>, ServiceError> {
        let db = &*self.db_pool;

        let project = ProjectEntity::find_by_id(project_id)
            .one(db)
            .await
            .map_err(|e| {
                error!(error = %e, project_id, "Failed to fetch project");
                ServiceError::DatabaseError(e)
            })?;

        Ok(project.map(Self::model_to_response))
    }

    #[instrument(skip(self))]
    pub async fn list_projects(
        &self,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<ProjectResponse>, ServiceError> {
        let db = &*self.db_pool;

        let projects = ProjectEntity::find()
            .order_by_asc(project::Column::ProjectId)
            .offset(skip)
            .limit(limit)
            .all(db)
            .await
            .map_err(|e| {
                error!(error = %e, skip, limit, "Failed to list projects");
                ServiceError::DatabaseError(e)
            })?;

        Ok(projects.into_iter().map(Self::model_to_response).collect())
    }

    #[instrument(skip(self, input))]
    pub async fn update_project(
        &self,
        project_id: i32,
        input: UpdateProjectInput,
    ) -> Result<ProjectMutationResponse, ServiceError> {
        let db = &*self.db_pool;

        let project = ProjectEntity::find_by_id(project_id)
            .one(db)
            .await
            .map_err(|e| {
                error!(error = %e, project_id, "Failed to fetch project for update");
                ServiceError::DatabaseError(e)
            })?
            .ok_or_else(|| ServiceError::NotFound("Project not found".to_string()))?;

        let mut active: project::ActiveModel = project.into();
        if let Some(v) = input.project_name {
            active.project_name = Set(v);
        }
        if let Some(v) = input.project_worktype {
            active.project_worktype = Set(Some(v));
        }
        if let Some(v) = input.project_type {
            active.project_type = Set(Some(v));
        }
        if let Some(v) = input.project_address {
            active.project_address = Set(Some(v));
        }
        if let Some(v) = input.project_cname {
            active.project_cname = Set(Some(v));
        }
        if let Some(v) = input.project_tel {
            active.project_tel = Set(Some(v));
        }
        if let Some(v) = input.project_email {
            active.project_email = Set(Some(v));
        }

        active.update(db).await.map_err(|e| {
            error!(error = %e, project_id, "Failed to update project");
            ServiceError::DatabaseError(e)
        })?;

        info!(project_id, "Project updated successfully");

        if let Some(event_sender) = &self.event_sender {
            if let Err(e) = event_sender.send(Event::ProjectUpdated(project_id)).await {
                warn!(error = %e, project_id, "Failed to send project updated event");
            }
        }

        Ok(ProjectMutationResponse {
            message: "Project updated successfully".to_string(),
            project_id,
        })
    }

    #[instrument(skip(self))]
    pub async fn delete_project(
        &self,
        project_id: i32,
    ) -> Result<ProjectDeleteResponse, ServiceError> {
        let db = &*self.db_pool;

        let project = ProjectEntity::find_by_id(project_id)
            .one(db)
            .await
            .map_err(|e| {
                error!(error = %e, project_id, "Failed to fetch project for delete");
                ServiceError::DatabaseError(e)
            })?
            .ok_or_else(|| ServiceError::NotFound("Project not found".to_string()))?;

        project.delete(db).await.map_err(|e| {
            error!(error = %e, project_id, "Failed to delete project");
            ServiceError::DatabaseError(e)
        })?;

        info!(project_id, "Project deleted successfully");

        if let Some(event_sender) = &self.event_sender {
            if let Err(e) = event_sender.send(Event::ProjectDeleted(project_id)).await {
                warn!(error = %e, project_id, "Failed to send project deleted event");
            }
        }

        Ok(ProjectDeleteResponse {
            message: "Project deleted successfully".to_string(),
        })
    }

    fn model_to_response(project: project::Model) -> ProjectResponse {
        ProjectResponse {
            project_id: project.project_id,
            project_code: project.project_code,
            project_name: project.project_name,
            project_worktype: project.project_worktype,
            project_type: project.project_type,
            project_address: project.project_address,
            project_cname: project.project_cname,
            project_tel: project.project_tel,
            project_email: project.project_email,
        }
    }
}
