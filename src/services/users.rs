use crate::{
    auth::hash_password,
    db::DbPool,
    entities::user::{self, Entity as UserEntity},
    errors::ServiceError,
    events::{Event, EventSender},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, QuerySelect,
    Set,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUserInput {
    #[validate(length(min = 1, message = "User code is required"))]
    pub m_code: String,
    #[validate(length(min = 1, message = "First name is required"))]
    pub m_firstname: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub m_lastname: String,
    #[validate(length(min = 1, message = "Username is required"))]
    pub m_user: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub m_pass: String,
    #[validate(email(message = "Invalid email address"))]
    pub m_email: String,
    #[validate(length(min = 1, message = "Position is required"))]
    pub m_position: String,
    #[validate(length(min = 1, message = "Department is required"))]
    pub m_department: String,
}

/// Partial update; credentials (username, password) are not updatable here.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUserInput {
    pub m_firstname: Option<String>,
    pub m_lastname: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub m_email: Option<String>,
    pub m_position: Option<String>,
    pub m_department: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserMutationResponse {
    pub message: String,
    pub user_id: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserDeleteResponse {
    pub message: String,
}

/// Member projection; the password hash and login name never leave the
/// service.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub m_id: i32,
    pub m_code: Option<String>,
    pub m_firstname: Option<String>,
    pub m_lastname: Option<String>,
    pub m_email: String,
    pub m_position: Option<String>,
    pub m_department: Option<String>,
}

/// Service for member records.
#[derive(Clone)]
pub struct UserService {
    db_pool: Arc<DbPool>,
    event_sender: Option<Arc<EventSender>>,
}

impl UserService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Option<Arc<EventSender>>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Creates a member; the password is stored only as an argon2 hash.
    #[instrument(skip(self, input), fields(m_email = %input.m_email))]
    pub async fn create_user(
        &self,
        input: CreateUserInput,
    ) -> Result<UserMutationResponse, ServiceError> {
        input
            .validate()
            .map_err(|e| ServiceError::ValidationError(e.to_string()))?;

        let db = &*self.db_pool;

        let existing = UserEntity::find()
            .filter(user::Column::MEmail.eq(input.m_email.as_str()))
            .one(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to check for existing user");
                ServiceError::DatabaseError(e)
            })?;
        if existing.is_some() {
            return Err(ServiceError::ValidationError(
                "Email already registered".to_string(),
            ));
        }

        let password_hash = hash_password(&input.m_pass)?;

        let active = user::ActiveModel {
            m_code: Set(Some(input.m_code)),
            m_firstname: Set(Some(input.m_firstname)),
            m_lastname: Set(Some(input.m_lastname)),
            m_user: Set(Some(input.m_user)),
            m_pass: Set(password_hash),
            m_email: Set(input.m_email),
            m_position: Set(Some(input.m_position)),
            m_department: Set(Some(input.m_department)),
            ..Default::default()
        };

        let model = active.insert(db).await.map_err(|e| {
            error!(error = %e, "Failed to insert user");
            ServiceError::DatabaseError(e)
        })?;

        info!(user_id = model.m_id, "User created successfully");

        if let Some(event_sender) = &self.event_sender {
            if let Err(e) = event_sender.send(Event::UserCreated(model.m_id)).await {
                warn!(error = %e, user_id = model.m_id, "Failed to send user created event");
            }
        }

        Ok(UserMutationResponse {
            message: "User created successfully".to_string(),
            user_id: model.m_id,
        })
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: i32) -> Result<Option<UserResponse>, ServiceError> {
        let db = &*self.db_pool;

        let user = UserEntity::find_by_id(user_id).one(db).await.map_err(|e| {
            error!(error = %e, user_id, "Failed to fetch user");
            ServiceError::DatabaseError(e)
        })?;

        Ok(user.map(Self::model_to_response))
    }

    #[instrument(skip(self))]
    pub async fn list_users(
        &self,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<UserResponse>, ServiceError> {
        let db = &*self.db_pool;

        let users = UserEntity::find()
            .order_by_asc(user::Column::MId)
            .offset(skip)
            .limit(limit)
            .all(db)
            .await
            .map_err(|e| {
                error!(error = %e, skip, limit, "Failed to list users");
                ServiceError::DatabaseError(e)
            })?;

        Ok(users.into_iter().map(Self::model_to_response).collect())
    }

    #[instrument(skip(self, input))]
    pub async fn update_user(
        &self,
        user_id: i32,
        input: UpdateUserInput,
    ) -> Result<UserMutationResponse, ServiceError> {
        input
            .validate()
            .map_err(|e| ServiceError::ValidationError(e.to_string()))?;

        let db = &*self.db_pool;

        let user = UserEntity::find_by_id(user_id)
            .one(db)
            .await
            .map_err(|e| {
                error!(error = %e, user_id, "Failed to fetch user for update");
                ServiceError::DatabaseError(e)
            })?
            .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))?;

        let mut active: user::ActiveModel = user.into();
        if let Some(v) = input.m_firstname {
            active.m_firstname = Set(Some(v));
        }
        if let Some(v) = input.m_lastname {
            active.m_lastname = Set(Some(v));
        }
        if let Some(v) = input.m_email {
            active.m_email = Set(v);
        }
        if let Some(v) = input.m_position {
            active.m_position = Set(Some(v));
        }
        if let Some(v) = input.m_department {
            active.m_department = Set(Some(v));
        }

        active.update(db).await.map_err(|e| {
            error!(error = %e, user_id, "Failed to update user");
            ServiceError::DatabaseError(e)
        })?;

        info!(user_id, "User updated successfully");

        if let Some(event_sender) = &self.event_sender {
            if let Err(e) = event_sender.send(Event::UserUpdated(user_id)).await {
                warn!(error = %e, user_id, "Failed to send user updated event");
            }
        }

        Ok(UserMutationResponse {
            message: "User updated successfully".to_string(),
            user_id,
        })
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, user_id: i32) -> Result<UserDeleteResponse, ServiceError> {
        let db = &*self.db_pool;

        let user = UserEntity::find_by_id(user_id)
            .one(db)
            .await
            .map_err(|e| {
                error!(error = %e, user_id, "Failed to fetch user for delete");
                ServiceError::DatabaseError(e)
            })?
            .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))?;

        user.delete(db).await.map_err(|e| {
            error!(error = %e, user_id, "Failed to delete user");
            ServiceError::DatabaseError(e)
        })?;

        info!(user_id, "User deleted successfully");

        if let Some(event_sender) = &self.event_sender {
            if let Err(e) = event_sender.send(Event::UserDeleted(user_id)).await {
                warn!(error = %e, user_id, "Failed to send user deleted event");
            }
        }

        Ok(UserDeleteResponse {
            message: "User deleted successfully".to_string(),
        })
    }

    fn model_to_response(user: user::Model) -> UserResponse {
        UserResponse {
            m_id: user.m_id,
            m_code: user.m_code,
            m_firstname: user.m_firstname,
            m_lastname: user.m_lastname,
            m_email: user.m_email,
            m_position: user.m_position,
            m_department: user.m_department,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_input_rejects_malformed_email() {
        let input = CreateUserInput {
            m_code: "EMP-001".to_string(),
            m_firstname: "Somsak".to_string(),
            m_lastname: "Chaiyo".to_string(),
            m_user: "somsak".to_string(),
            m_pass: "s3cret-pass".to_string(),
            m_email: "not-an-email".to_string(),
            m_position: "Engineer".to_string(),
            m_department: "Procurement".to_string(),
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn response_carries_no_credential_fields() {
        let model = user::Model {
            m_id: 7,
            m_code: Some("EMP-007".to_string()),
            m_firstname: Some("Suda".to_string()),
            m_lastname: Some("Rak".to_string()),
            m_user: Some("suda".to_string()),
            m_pass: "$argon2id$v=19$m=19456,t=2,p=1$abc$def".to_string(),
            m_email: "suda@example.com".to_string(),
            m_position: Some("Buyer".to_string()),
            m_department: Some("Procurement".to_string()),
            compcode: Some("C001".to_string()),
        };

        let response = UserService::model_to_response(model);
        let json = serde_json::to_value(&response).expect("serializes");
        assert!(json.get("m_pass").is_none());
        assert!(json.get("m_user").is_none());
        assert_eq!(json["m_email"], "suda@example.com");
    }
}
