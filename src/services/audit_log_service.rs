use std::sync::Arc;

use crate::errors::ApiError;
use crate::stores::AuditStore;
use crate::types::dto::audit_log::{AuditLogListResponse, AuditLogResponse};
use crate::types::dto::common::PageMeta;
use crate::validation::{self, fields};

/// Read side of the audit trail. Browsing the trail is deliberately not
/// audited itself.
pub struct AuditLogService {
    audit: Arc<AuditStore>,
}

impl AuditLogService {
    pub fn new(audit: Arc<AuditStore>) -> Self {
        Self { audit }
    }

    pub async fn list(
        &self,
        user_id: Option<String>,
        action: Option<String>,
        page: Option<u64>,
        limit: Option<u64>,
    ) -> Result<AuditLogListResponse, ApiError> {
        let mut errors = Vec::new();
        let (page, limit) = validation::page_params(page, limit, &mut errors);
        if let Some(user_id) = &user_id {
            errors.extend(fields::entity_id(user_id, "user"));
        }
        validation::finish(errors)?;

        let (logs, total) = self.audit.list(user_id, action, page, limit).await?;
        Ok(AuditLogListResponse {
            items: logs.into_iter().map(AuditLogResponse::from).collect(),
            meta: PageMeta::new(page, limit, total),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::internal::action::Action;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;
    use uuid::Uuid;

    #[tokio::test]
    async fn list_filters_by_user_and_action() {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        let store = Arc::new(AuditStore::new(db));
        let service = AuditLogService::new(store.clone());

        let alice = Uuid::new_v4().to_string();
        let bob = Uuid::new_v4().to_string();
        store.record(&alice, Action::SignIn).await.unwrap();
        store.record(&alice, Action::UserList).await.unwrap();
        store.record(&bob, Action::SignIn).await.unwrap();

        let page = service
            .list(Some(alice.clone()), None, None, None)
            .await
            .unwrap();
        assert_eq!(page.meta.total, 2);

        let page = service
            .list(None, Some("auth.sign-in".to_string()), None, None)
            .await
            .unwrap();
        assert_eq!(page.meta.total, 2);

        let page = service
            .list(Some(bob), Some("auth.sign-in".to_string()), None, None)
            .await
            .unwrap();
        assert_eq!(page.meta.total, 1);
    }
}
