use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::errors::InternalError;
use crate::types::db::audit_log::{self, Entity as AuditLog};
use crate::types::internal::action::Action;

/// Append-only audit trail. Every successful service operation records
/// exactly one (user, action) row here.
pub struct AuditStore {
    db: DatabaseConnection,
}

impl AuditStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn record(&self, user_id: &str, action: Action) -> Result<(), InternalError> {
        let entry = audit_log::ActiveModel {
            id: ActiveValue::NotSet,
            user_id: Set(user_id.to_string()),
            action: Set(action.as_str().to_string()),
            created_at: Set(Utc::now().timestamp()),
        };
        entry
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("record_audit_log", e))?;
        Ok(())
    }

    pub async fn list(
        &self,
        user_id: Option<String>,
        action: Option<String>,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<audit_log::Model>, u64), InternalError> {
        let mut condition = Condition::all();
        if let Some(user_id) = &user_id {
            condition = condition.add(audit_log::Column::UserId.eq(user_id));
        }
        if let Some(action) = &action {
            condition = condition.add(audit_log::Column::Action.eq(action));
        }

        let total = AuditLog::find()
            .filter(condition.clone())
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_audit_logs", e))?;

        let logs = AuditLog::find()
            .filter(condition)
            .order_by_desc(audit_log::Column::CreatedAt)
            .order_by_desc(audit_log::Column::Id)
            .offset((page - 1) * limit)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_audit_logs", e))?;

        Ok((logs, total))
    }
}
