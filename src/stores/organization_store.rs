use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use crate::errors::InternalError;
use crate::types::db::organization::{self, Entity as Organization};

#[derive(Debug, Default)]
pub struct OrganizationFilter {
    pub org_name: Option<String>,
    pub adviser_id: Option<String>,
}

pub struct OrganizationStore {
    db: DatabaseConnection,
}

impl OrganizationStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn insert(
        &self,
        org: organization::ActiveModel,
    ) -> Result<organization::Model, InternalError> {
        org.insert(&self.db)
            .await
            .map_err(|e| InternalError::database("insert_organization", e))
    }

    pub async fn find_by_id(
        &self,
        id: &str,
    ) -> Result<Option<organization::Model>, InternalError> {
        Organization::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_organization_by_id", e))
    }

    pub async fn find_by_name(
        &self,
        org_name: &str,
    ) -> Result<Option<organization::Model>, InternalError> {
        Organization::find()
            .filter(organization::Column::OrgName.eq(org_name))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_organization_by_name", e))
    }

    pub async fn list(
        &self,
        filter: OrganizationFilter,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<organization::Model>, u64), InternalError> {
        let mut condition = Condition::all();
        if let Some(org_name) = &filter.org_name {
            condition = condition.add(organization::Column::OrgName.contains(org_name));
        }
        if let Some(adviser_id) = &filter.adviser_id {
            condition = condition.add(organization::Column::AdviserId.eq(adviser_id));
        }

        let total = Organization::find()
            .filter(condition.clone())
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_organizations", e))?;

        let organizations = Organization::find()
            .filter(condition)
            .order_by_desc(organization::Column::CreatedAt)
            .offset((page - 1) * limit)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_organizations", e))?;

        Ok((organizations, total))
    }

    pub async fn update(
        &self,
        org: organization::ActiveModel,
    ) -> Result<organization::Model, InternalError> {
        org.update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_organization", e))
    }

    pub async fn delete(&self, id: &str) -> Result<(), InternalError> {
        Organization::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_organization", e))?;
        Ok(())
    }
}
