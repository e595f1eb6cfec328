use chrono::Utc;
use sea_orm::Set;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::services::{crypto, record_audit};
use crate::stores::{AuditStore, UserFilter, UserStore};
use crate::types::db::user;
use crate::types::dto::common::{MessageResponse, PageMeta};
use crate::types::dto::user::{
    CreateUserRequest, UpdateUserRequest, UserListResponse, UserResponse,
};
use crate::types::internal::action::Action;
use crate::types::internal::auth::Role;
use crate::validation::{self, fields};

/// User account management. Creation mirrors self-service sign-up but is
/// driven by an admin; update and delete protect the last remaining admin.
pub struct UserService {
    users: Arc<UserStore>,
    audit: Arc<AuditStore>,
}

impl UserService {
    pub fn new(users: Arc<UserStore>, audit: Arc<AuditStore>) -> Self {
        Self { users, audit }
    }

    pub async fn create(
        &self,
        actor_id: &str,
        req: CreateUserRequest,
    ) -> Result<UserResponse, ApiError> {
        let user = create_user(&self.users, &req).await?;
        record_audit(&self.audit, actor_id, Action::UserCreate).await;
        Ok(user.into())
    }

    pub async fn list(
        &self,
        actor_id: &str,
        filter: UserFilter,
        page: Option<u64>,
        limit: Option<u64>,
    ) -> Result<UserListResponse, ApiError> {
        let mut errors = Vec::new();
        let (page, limit) = validation::page_params(page, limit, &mut errors);
        if let Some(role) = &filter.role {
            errors.extend(fields::role(role));
        }
        validation::finish(errors)?;

        let (users, total) = self.users.list(filter, page, limit).await?;
        record_audit(&self.audit, actor_id, Action::UserList).await;

        Ok(UserListResponse {
            items: users.into_iter().map(UserResponse::from).collect(),
            meta: PageMeta::new(page, limit, total),
        })
    }

    pub async fn get(&self, actor_id: &str, id: &str) -> Result<UserResponse, ApiError> {
        validation::finish(fields::entity_id(id, "user").into_iter().collect())?;

        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("User not found"))?;
        record_audit(&self.audit, actor_id, Action::UserDetail).await;
        Ok(user.into())
    }

    pub async fn update(
        &self,
        actor_id: &str,
        id: &str,
        req: UpdateUserRequest,
    ) -> Result<UserResponse, ApiError> {
        let mut errors = Vec::new();
        errors.extend(fields::entity_id(id, "user"));
        if req.username.is_none()
            && req.email.is_none()
            && req.role.is_none()
            && req.phone_number.is_none()
        {
            errors.push("At least one field is required".to_string());
        }
        if let Some(username) = &req.username {
            errors.extend(fields::username(username));
        }
        if let Some(email) = &req.email {
            errors.extend(fields::email(email));
        }
        if let Some(role) = &req.role {
            errors.extend(fields::role(role));
        }
        if let Some(phone_number) = &req.phone_number {
            errors.extend(fields::phone_number(phone_number));
        }
        validation::finish(errors)?;

        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("User not found"))?;

        if let Some(role) = &req.role {
            let demoting = user.role == Role::Admin.as_str() && role != Role::Admin.as_str();
            if demoting && self.users.count_by_role(Role::Admin.as_str()).await? <= 1 {
                return Err(ApiError::forbidden("Cannot update the last admin"));
            }
        }

        if let Some(username) = &req.username {
            let username = username.trim();
            if let Some(existing) = self.users.find_by_username(username).await? {
                if existing.id != user.id {
                    return Err(ApiError::conflict("Username already exists"));
                }
            }
        }
        if let Some(email) = &req.email {
            let email = fields::normalize_email(email);
            if let Some(existing) = self.users.find_by_email(&email).await? {
                if existing.id != user.id {
                    return Err(ApiError::conflict("Email already exists"));
                }
            }
        }

        let mut active = user::ActiveModel {
            id: Set(user.id.clone()),
            updated_at: Set(Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(username) = req.username {
            active.username = Set(username.trim().to_string());
        }
        if let Some(email) = req.email {
            active.email = Set(fields::normalize_email(&email));
        }
        if let Some(role) = req.role {
            active.role = Set(role);
        }
        if let Some(phone_number) = req.phone_number {
            active.phone_number = Set(Some(phone_number));
        }

        let updated = self.users.update(active).await?;
        record_audit(&self.audit, actor_id, Action::UserUpdate).await;
        Ok(updated.into())
    }

    pub async fn delete(&self, actor_id: &str, id: &str) -> Result<MessageResponse, ApiError> {
        validation::finish(fields::entity_id(id, "user").into_iter().collect())?;

        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("User not found"))?;

        if user.role == Role::Admin.as_str()
            && self.users.count_by_role(Role::Admin.as_str()).await? <= 1
        {
            return Err(ApiError::forbidden("Cannot delete the last admin"));
        }

        self.users.delete(id).await?;
        record_audit(&self.audit, actor_id, Action::UserDelete).await;
        Ok(MessageResponse {
            message: "User deleted successfully".to_string(),
        })
    }
}

/// Validate and persist a new user account. Shared by admin-driven
/// creation and self-service sign-up.
pub(crate) async fn create_user(
    users: &UserStore,
    req: &CreateUserRequest,
) -> Result<user::Model, ApiError> {
    let mut errors = Vec::new();
    errors.extend(fields::username(&req.username));
    errors.extend(fields::email(&req.email));
    errors.extend(fields::password(&req.password));
    errors.extend(fields::phone_number(&req.phone_number));
    if let Some(role) = &req.role {
        errors.extend(fields::role(role));
    }
    validation::finish(errors)?;

    let username = req.username.trim().to_string();
    let email = fields::normalize_email(&req.email);

    if users.find_by_username(&username).await?.is_some() {
        return Err(ApiError::conflict("Username already exists"));
    }
    if users.find_by_email(&email).await?.is_some() {
        return Err(ApiError::conflict("Email already exists"));
    }

    let now = Utc::now().timestamp();
    let user = user::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        username: Set(username),
        email: Set(email),
        password_hash: Set(crypto::hash_password(&req.password)?),
        role: Set(req
            .role
            .clone()
            .unwrap_or_else(|| Role::Student.as_str().to_string())),
        phone_number: Set(Some(req.phone_number.clone())),
        created_at: Set(now),
        updated_at: Set(now),
    };

    users.insert(user).await.map_err(ApiError::from)
}
