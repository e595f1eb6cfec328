use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use crate::errors::InternalError;
use crate::types::db::user::{self, Entity as User};

/// Optional filters for the user list endpoint
#[derive(Debug, Default)]
pub struct UserFilter {
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub phone_number: Option<String>,
}

pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn insert(&self, user: user::ActiveModel) -> Result<user::Model, InternalError> {
        user.insert(&self.db)
            .await
            .map_err(|e| InternalError::database("insert_user", e))
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<user::Model>, InternalError> {
        User::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user_by_id", e))
    }

    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<user::Model>, InternalError> {
        User::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user_by_username", e))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, InternalError> {
        User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user_by_email", e))
    }

    /// Sign-in lookup: the identifier may be a username or an email.
    pub async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<user::Model>, InternalError> {
        User::find()
            .filter(
                Condition::any()
                    .add(user::Column::Username.eq(identifier))
                    .add(user::Column::Email.eq(identifier)),
            )
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user_by_identifier", e))
    }

    pub async fn find_many_by_ids(
        &self,
        ids: &[String],
    ) -> Result<Vec<user::Model>, InternalError> {
        User::find()
            .filter(user::Column::Id.is_in(ids.iter().cloned()))
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("find_users_by_ids", e))
    }

    pub async fn list(
        &self,
        filter: UserFilter,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<user::Model>, u64), InternalError> {
        let mut condition = Condition::all();
        if let Some(username) = &filter.username {
            condition = condition.add(user::Column::Username.contains(username));
        }
        if let Some(email) = &filter.email {
            condition = condition.add(user::Column::Email.contains(email));
        }
        if let Some(role) = &filter.role {
            condition = condition.add(user::Column::Role.eq(role));
        }
        if let Some(phone_number) = &filter.phone_number {
            condition = condition.add(user::Column::PhoneNumber.eq(phone_number));
        }

        let total = User::find()
            .filter(condition.clone())
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_users", e))?;

        let users = User::find()
            .filter(condition)
            .order_by_desc(user::Column::CreatedAt)
            .offset((page - 1) * limit)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_users", e))?;

        Ok((users, total))
    }

    pub async fn update(&self, user: user::ActiveModel) -> Result<user::Model, InternalError> {
        user.update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_user", e))
    }

    pub async fn update_password(
        &self,
        id: &str,
        password_hash: String,
        updated_at: i64,
    ) -> Result<(), InternalError> {
        let user = user::ActiveModel {
            id: sea_orm::Set(id.to_string()),
            password_hash: sea_orm::Set(password_hash),
            updated_at: sea_orm::Set(updated_at),
            ..Default::default()
        };
        user.update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_user_password", e))?;
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<(), InternalError> {
        User::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_user", e))?;
        Ok(())
    }

    pub async fn count_by_role(&self, role: &str) -> Result<u64, InternalError> {
        User::find()
            .filter(user::Column::Role.eq(role))
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_users_by_role", e))
    }
}
