use chrono::Utc;
use sea_orm::Set;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::services::record_audit;
use crate::stores::{
    AuditStore, OfficerFilter, OfficerSortKey, OfficerStore, OrganizationStore, UserStore,
};
use crate::types::db::officer;
use crate::types::dto::common::{MessageResponse, PageMeta};
use crate::types::dto::officer::{
    CreateOfficerRequest, OfficerListResponse, OfficerResponse, UpdateOfficerRequest,
};
use crate::types::internal::action::Action;
use crate::validation::{self, fields};

/// Officer assignments. A user holds at most one position per
/// organization; terms can only be tightened outward (start earlier,
/// end later) once created.
pub struct OfficerService {
    officers: Arc<OfficerStore>,
    users: Arc<UserStore>,
    orgs: Arc<OrganizationStore>,
    audit: Arc<AuditStore>,
}

impl OfficerService {
    pub fn new(
        officers: Arc<OfficerStore>,
        users: Arc<UserStore>,
        orgs: Arc<OrganizationStore>,
        audit: Arc<AuditStore>,
    ) -> Self {
        Self {
            officers,
            users,
            orgs,
            audit,
        }
    }

    pub async fn create(
        &self,
        actor_id: &str,
        req: CreateOfficerRequest,
    ) -> Result<OfficerResponse, ApiError> {
        let mut errors = Vec::new();
        errors.extend(fields::entity_id(&req.user_id, "user"));
        errors.extend(fields::entity_id(&req.org_id, "organization"));
        errors.extend(fields::required(&req.position, "Position"));
        errors.extend(fields::max_length(&req.position, 50, "Position"));
        if req.end_term <= req.start_term {
            errors.push("End term must be later than start term".to_string());
        }
        validation::finish(errors)?;

        if self.users.find_by_id(&req.user_id).await?.is_none() {
            return Err(ApiError::not_found("User not found"));
        }
        if self.orgs.find_by_id(&req.org_id).await?.is_none() {
            return Err(ApiError::not_found("Organization not found"));
        }
        if self
            .officers
            .find_by_user_and_org(&req.user_id, &req.org_id)
            .await?
            .is_some()
        {
            return Err(ApiError::conflict(
                "User is already an officer of this organization",
            ));
        }

        let now = Utc::now().timestamp();
        let officer = officer::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            user_id: Set(req.user_id),
            org_id: Set(req.org_id),
            position: Set(req.position.trim().to_string()),
            start_term: Set(req.start_term),
            end_term: Set(req.end_term),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let officer = self.officers.insert(officer).await?;
        record_audit(&self.audit, actor_id, Action::OfficerCreate).await;
        Ok(officer.into())
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn list(
        &self,
        actor_id: &str,
        filter: OfficerFilter,
        sort_by: Option<String>,
        order: Option<String>,
        page: Option<u64>,
        limit: Option<u64>,
    ) -> Result<OfficerListResponse, ApiError> {
        let mut errors = Vec::new();
        let (page, limit) = validation::page_params(page, limit, &mut errors);
        if let Some(org_id) = &filter.org_id {
            errors.extend(fields::entity_id(org_id, "organization"));
        }
        if let Some(user_id) = &filter.user_id {
            errors.extend(fields::entity_id(user_id, "user"));
        }

        let sort_key = match sort_by.as_deref() {
            None | Some("created_at") => OfficerSortKey::CreatedAt,
            Some("start_term") => OfficerSortKey::StartTerm,
            Some("end_term") => OfficerSortKey::EndTerm,
            Some("position") => OfficerSortKey::Position,
            Some(_) => {
                errors.push(
                    "Sort field must be one of: created_at, start_term, end_term, position"
                        .to_string(),
                );
                OfficerSortKey::CreatedAt
            }
        };
        let ascending = match order.as_deref() {
            None | Some("desc") => false,
            Some("asc") => true,
            Some(_) => {
                errors.push("Order must be either asc or desc".to_string());
                false
            }
        };
        validation::finish(errors)?;

        let (officers, total) = self
            .officers
            .list(filter, sort_key, ascending, page, limit)
            .await?;
        record_audit(&self.audit, actor_id, Action::OfficerList).await;

        Ok(OfficerListResponse {
            items: officers.into_iter().map(OfficerResponse::from).collect(),
            meta: PageMeta::new(page, limit, total),
        })
    }

    pub async fn get(&self, actor_id: &str, id: &str) -> Result<OfficerResponse, ApiError> {
        validation::finish(fields::entity_id(id, "officer").into_iter().collect())?;

        let officer = self
            .officers
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Officer not found"))?;
        record_audit(&self.audit, actor_id, Action::OfficerDetail).await;
        Ok(officer.into())
    }

    pub async fn update(
        &self,
        actor_id: &str,
        id: &str,
        req: UpdateOfficerRequest,
    ) -> Result<OfficerResponse, ApiError> {
        let mut errors = Vec::new();
        errors.extend(fields::entity_id(id, "officer"));
        if req.position.is_none() && req.start_term.is_none() && req.end_term.is_none() {
            errors.push("At least one field is required".to_string());
        }
        if let Some(position) = &req.position {
            errors.extend(fields::required(position, "Position"));
            errors.extend(fields::max_length(position, 50, "Position"));
        }
        validation::finish(errors)?;

        let officer = self
            .officers
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Officer not found"))?;

        // The assignment itself is immutable; only its terms and title move.
        if req.user_id.as_deref().is_some_and(|v| v != officer.user_id)
            || req.org_id.as_deref().is_some_and(|v| v != officer.org_id)
        {
            return Err(ApiError::validation("user_id and org_id cannot be changed"));
        }

        let start_term = req.start_term.unwrap_or(officer.start_term);
        let end_term = req.end_term.unwrap_or(officer.end_term);
        if start_term > officer.start_term {
            return Err(ApiError::validation(
                "Start term cannot be later than the original start term",
            ));
        }
        if end_term < officer.end_term {
            return Err(ApiError::validation(
                "End term cannot be earlier than the original end term",
            ));
        }
        if end_term <= start_term {
            return Err(ApiError::validation(
                "End term must be later than start term",
            ));
        }

        let mut active = officer::ActiveModel {
            id: Set(officer.id.clone()),
            updated_at: Set(Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(position) = req.position {
            active.position = Set(position.trim().to_string());
        }
        if let Some(start_term) = req.start_term {
            active.start_term = Set(start_term);
        }
        if let Some(end_term) = req.end_term {
            active.end_term = Set(end_term);
        }

        let updated = self.officers.update(active).await?;
        record_audit(&self.audit, actor_id, Action::OfficerUpdate).await;
        Ok(updated.into())
    }

    pub async fn delete(&self, actor_id: &str, id: &str) -> Result<MessageResponse, ApiError> {
        validation::finish(fields::entity_id(id, "officer").into_iter().collect())?;

        if self.officers.find_by_id(id).await?.is_none() {
            return Err(ApiError::not_found("Officer not found"));
        }
        self.officers.delete(id).await?;
        record_audit(&self.audit, actor_id, Action::OfficerDelete).await;
        Ok(MessageResponse {
            message: "Officer deleted successfully".to_string(),
        })
    }
}
