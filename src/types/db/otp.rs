use sea_orm::entity::prelude::*;

/// One-time password for the reset-password flow.
/// Expires 5 minutes after creation; at most 5 verification attempts.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "otps")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub email: String,
    pub code: String,
    pub expires_at: i64,
    pub is_verified: bool,
    pub verified_at: Option<i64>,
    pub verification_attempts: i32,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
