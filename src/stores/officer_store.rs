use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::errors::InternalError;
use crate::types::db::officer::{self, Entity as Officer};

#[derive(Debug, Default)]
pub struct OfficerFilter {
    pub org_id: Option<String>,
    pub user_id: Option<String>,
    pub position: Option<String>,
}

/// Whitelisted sort keys for the officer list endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfficerSortKey {
    CreatedAt,
    StartTerm,
    EndTerm,
    Position,
}

impl OfficerSortKey {
    fn column(self) -> officer::Column {
        match self {
            OfficerSortKey::CreatedAt => officer::Column::CreatedAt,
            OfficerSortKey::StartTerm => officer::Column::StartTerm,
            OfficerSortKey::EndTerm => officer::Column::EndTerm,
            OfficerSortKey::Position => officer::Column::Position,
        }
    }
}

pub struct OfficerStore {
    db: DatabaseConnection,
}

impl OfficerStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn insert(
        &self,
        officer: officer::ActiveModel,
    ) -> Result<officer::Model, InternalError> {
        officer
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("insert_officer", e))
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<officer::Model>, InternalError> {
        Officer::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_officer_by_id", e))
    }

    /// Uniqueness probe for the (user, organization) invariant.
    pub async fn find_by_user_and_org(
        &self,
        user_id: &str,
        org_id: &str,
    ) -> Result<Option<officer::Model>, InternalError> {
        Officer::find()
            .filter(officer::Column::UserId.eq(user_id))
            .filter(officer::Column::OrgId.eq(org_id))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_officer_by_user_and_org", e))
    }

    pub async fn list(
        &self,
        filter: OfficerFilter,
        sort_key: OfficerSortKey,
        ascending: bool,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<officer::Model>, u64), InternalError> {
        let mut condition = Condition::all();
        if let Some(org_id) = &filter.org_id {
            condition = condition.add(officer::Column::OrgId.eq(org_id));
        }
        if let Some(user_id) = &filter.user_id {
            condition = condition.add(officer::Column::UserId.eq(user_id));
        }
        if let Some(position) = &filter.position {
            condition = condition.add(officer::Column::Position.eq(position));
        }

        let total = Officer::find()
            .filter(condition.clone())
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_officers", e))?;

        let order = if ascending { Order::Asc } else { Order::Desc };
        let officers = Officer::find()
            .filter(condition)
            .order_by(sort_key.column(), order)
            .offset((page - 1) * limit)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_officers", e))?;

        Ok((officers, total))
    }

    pub async fn update(
        &self,
        officer: officer::ActiveModel,
    ) -> Result<officer::Model, InternalError> {
        officer
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_officer", e))
    }

    pub async fn delete(&self, id: &str) -> Result<(), InternalError> {
        Officer::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_officer", e))?;
        Ok(())
    }
}
