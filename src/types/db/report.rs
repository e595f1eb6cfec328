use sea_orm::entity::prelude::*;

/// File-bearing submission from an organization.
/// file_paths is a JSON array of path strings; status workflow is
/// pending -> approved/rejected.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "reports")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub org_id: String,
    pub submitted_by: String,
    pub report_type: String,
    pub file_paths: String,
    pub status: String,
    pub submitted_date: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
