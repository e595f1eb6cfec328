use chrono::Utc;
use sea_orm::Set;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::services::record_audit;
use crate::stores::{AuditStore, OrganizationFilter, OrganizationStore, UserStore};
use crate::types::db::organization;
use crate::types::dto::common::{MessageResponse, PageMeta};
use crate::types::dto::organization::{
    CreateOrganizationRequest, OrganizationListResponse, OrganizationResponse,
    UpdateOrganizationRequest,
};
use crate::types::internal::action::Action;
use crate::validation::{self, fields};

/// Organization management. Names are unique and every organization is
/// assigned an existing user as adviser.
pub struct OrganizationService {
    orgs: Arc<OrganizationStore>,
    users: Arc<UserStore>,
    audit: Arc<AuditStore>,
}

impl OrganizationService {
    pub fn new(
        orgs: Arc<OrganizationStore>,
        users: Arc<UserStore>,
        audit: Arc<AuditStore>,
    ) -> Self {
        Self { orgs, users, audit }
    }

    pub async fn create(
        &self,
        actor_id: &str,
        req: CreateOrganizationRequest,
    ) -> Result<OrganizationResponse, ApiError> {
        let mut errors = Vec::new();
        errors.extend(fields::required(&req.org_name, "Organization name"));
        errors.extend(fields::max_length(&req.org_name, 100, "Organization name"));
        if let Some(description) = &req.description {
            errors.extend(fields::max_length(description, 2000, "Description"));
        }
        errors.extend(fields::entity_id(&req.adviser_id, "adviser"));
        validation::finish(errors)?;

        let org_name = req.org_name.trim().to_string();
        if self.orgs.find_by_name(&org_name).await?.is_some() {
            return Err(ApiError::validation("Organization name already exists"));
        }
        if self.users.find_by_id(&req.adviser_id).await?.is_none() {
            return Err(ApiError::not_found("The assigned adviser does not exist"));
        }

        let now = Utc::now().timestamp();
        let org = organization::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            org_name: Set(org_name),
            description: Set(req.description),
            adviser_id: Set(req.adviser_id),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let org = self.orgs.insert(org).await?;
        record_audit(&self.audit, actor_id, Action::OrgCreate).await;
        Ok(org.into())
    }

    pub async fn list(
        &self,
        actor_id: &str,
        filter: OrganizationFilter,
        page: Option<u64>,
        limit: Option<u64>,
    ) -> Result<OrganizationListResponse, ApiError> {
        let mut errors = Vec::new();
        let (page, limit) = validation::page_params(page, limit, &mut errors);
        if let Some(adviser_id) = &filter.adviser_id {
            errors.extend(fields::entity_id(adviser_id, "adviser"));
        }
        validation::finish(errors)?;

        let (orgs, total) = self.orgs.list(filter, page, limit).await?;
        record_audit(&self.audit, actor_id, Action::OrgList).await;

        Ok(OrganizationListResponse {
            items: orgs.into_iter().map(OrganizationResponse::from).collect(),
            meta: PageMeta::new(page, limit, total),
        })
    }

    pub async fn get(&self, actor_id: &str, id: &str) -> Result<OrganizationResponse, ApiError> {
        validation::finish(fields::entity_id(id, "organization").into_iter().collect())?;

        let org = self
            .orgs
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Organization not found"))?;
        record_audit(&self.audit, actor_id, Action::OrgDetail).await;
        Ok(org.into())
    }

    pub async fn update(
        &self,
        actor_id: &str,
        id: &str,
        req: UpdateOrganizationRequest,
    ) -> Result<OrganizationResponse, ApiError> {
        let mut errors = Vec::new();
        errors.extend(fields::entity_id(id, "organization"));
        if req.org_name.is_none() && req.description.is_none() && req.adviser_id.is_none() {
            errors.push("At least one field is required".to_string());
        }
        if let Some(org_name) = &req.org_name {
            errors.extend(fields::required(org_name, "Organization name"));
            errors.extend(fields::max_length(org_name, 100, "Organization name"));
        }
        if let Some(description) = &req.description {
            errors.extend(fields::max_length(description, 2000, "Description"));
        }
        if let Some(adviser_id) = &req.adviser_id {
            errors.extend(fields::entity_id(adviser_id, "adviser"));
        }
        validation::finish(errors)?;

        let org = self
            .orgs
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Organization not found"))?;

        if let Some(org_name) = &req.org_name {
            let org_name = org_name.trim();
            if let Some(existing) = self.orgs.find_by_name(org_name).await? {
                if existing.id != org.id {
                    return Err(ApiError::validation("Organization name already exists"));
                }
            }
        }
        if let Some(adviser_id) = &req.adviser_id {
            if self.users.find_by_id(adviser_id).await?.is_none() {
                return Err(ApiError::not_found("The assigned adviser does not exist"));
            }
        }

        let mut active = organization::ActiveModel {
            id: Set(org.id.clone()),
            updated_at: Set(Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(org_name) = req.org_name {
            active.org_name = Set(org_name.trim().to_string());
        }
        if let Some(description) = req.description {
            active.description = Set(Some(description));
        }
        if let Some(adviser_id) = req.adviser_id {
            active.adviser_id = Set(adviser_id);
        }

        let updated = self.orgs.update(active).await?;
        record_audit(&self.audit, actor_id, Action::OrgUpdate).await;
        Ok(updated.into())
    }

    pub async fn delete(&self, actor_id: &str, id: &str) -> Result<MessageResponse, ApiError> {
        validation::finish(fields::entity_id(id, "organization").into_iter().collect())?;

        if self.orgs.find_by_id(id).await?.is_none() {
            return Err(ApiError::not_found("Organization not found"));
        }
        self.orgs.delete(id).await?;
        record_audit(&self.audit, actor_id, Action::OrgDelete).await;
        Ok(MessageResponse {
            message: "Organization deleted successfully".to_string(),
        })
    }
}
