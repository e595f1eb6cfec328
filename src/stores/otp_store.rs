use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::errors::InternalError;
use crate::types::db::otp::{self, Entity as Otp};

pub struct OtpStore {
    db: DatabaseConnection,
}

impl OtpStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn insert(&self, record: otp::ActiveModel) -> Result<otp::Model, InternalError> {
        record
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("insert_otp", e))
    }

    /// An unverified OTP matching (email, code), if one exists.
    pub async fn find_valid(
        &self,
        email: &str,
        code: &str,
    ) -> Result<Option<otp::Model>, InternalError> {
        Otp::find()
            .filter(otp::Column::Email.eq(email))
            .filter(otp::Column::Code.eq(code))
            .filter(otp::Column::IsVerified.eq(false))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_valid_otp", e))
    }

    pub async fn find_latest_unverified(
        &self,
        email: &str,
    ) -> Result<Option<otp::Model>, InternalError> {
        Otp::find()
            .filter(otp::Column::Email.eq(email))
            .filter(otp::Column::IsVerified.eq(false))
            .order_by_desc(otp::Column::CreatedAt)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_latest_unverified_otp", e))
    }

    /// Bump the attempt counter and return the updated record.
    pub async fn increment_attempts(&self, record: otp::Model) -> Result<otp::Model, InternalError> {
        let attempts = record.verification_attempts + 1;
        let mut active: otp::ActiveModel = record.into();
        active.verification_attempts = Set(attempts);
        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("increment_otp_attempts", e))
    }

    pub async fn mark_verified(&self, record: otp::Model) -> Result<otp::Model, InternalError> {
        let mut active: otp::ActiveModel = record.into();
        active.is_verified = Set(true);
        active.verified_at = Set(Some(Utc::now().timestamp()));
        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("mark_otp_verified", e))
    }

    /// Drop leftover unverified codes once one has been verified.
    pub async fn delete_unverified(&self, email: &str) -> Result<u64, InternalError> {
        let result = Otp::delete_many()
            .filter(otp::Column::Email.eq(email))
            .filter(otp::Column::IsVerified.eq(false))
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_unverified_otps", e))?;
        Ok(result.rows_affected)
    }

    pub async fn delete_by_email(&self, email: &str) -> Result<u64, InternalError> {
        let result = Otp::delete_many()
            .filter(otp::Column::Email.eq(email))
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_otps_by_email", e))?;
        Ok(result.rows_affected)
    }

    pub async fn delete_expired(&self, now: i64) -> Result<u64, InternalError> {
        let result = Otp::delete_many()
            .filter(otp::Column::ExpiresAt.lt(now))
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_expired_otps", e))?;
        Ok(result.rows_affected)
    }
}
