use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::errors::InternalError;
use crate::types::db::report::{self, Entity as Report};

#[derive(Debug, Default)]
pub struct ReportFilter {
    pub org_id: Option<String>,
    pub report_type: Option<String>,
    pub submitted_by: Option<String>,
    pub status: Option<String>,
}

pub struct ReportStore {
    db: DatabaseConnection,
}

impl ReportStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn insert(&self, report: report::ActiveModel) -> Result<report::Model, InternalError> {
        report
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("insert_report", e))
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<report::Model>, InternalError> {
        Report::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_report_by_id", e))
    }

    pub async fn list(
        &self,
        filter: ReportFilter,
        ascending: bool,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<report::Model>, u64), InternalError> {
        let mut condition = Condition::all();
        if let Some(org_id) = &filter.org_id {
            condition = condition.add(report::Column::OrgId.eq(org_id));
        }
        if let Some(report_type) = &filter.report_type {
            condition = condition.add(report::Column::ReportType.eq(report_type));
        }
        if let Some(submitted_by) = &filter.submitted_by {
            condition = condition.add(report::Column::SubmittedBy.eq(submitted_by));
        }
        if let Some(status) = &filter.status {
            condition = condition.add(report::Column::Status.eq(status));
        }

        let total = Report::find()
            .filter(condition.clone())
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_reports", e))?;

        let query = Report::find().filter(condition);
        let query = if ascending {
            query.order_by_asc(report::Column::SubmittedDate)
        } else {
            query.order_by_desc(report::Column::SubmittedDate)
        };

        let reports = query
            .offset((page - 1) * limit)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_reports", e))?;

        Ok((reports, total))
    }

    pub async fn update_status(
        &self,
        id: &str,
        status: &str,
        updated_at: i64,
    ) -> Result<report::Model, InternalError> {
        let report = report::ActiveModel {
            id: Set(id.to_string()),
            status: Set(status.to_string()),
            updated_at: Set(updated_at),
            ..Default::default()
        };
        report
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_report_status", e))
    }

    pub async fn delete(&self, id: &str) -> Result<(), InternalError> {
        Report::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_report", e))?;
        Ok(())
    }
}
