//! SeaORM-backed store implementations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    SqlErr, TransactionTrait,
};

use crate::error::WardenError;
use crate::models::{permission, role, role_permission, user, user_role};

use super::{CreateOutcome, NewPermission, NewRole, NewUser, PermissionStore, RoleStore, UserStore};

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

#[derive(Clone)]
pub struct SqlPermissionStore {
    db: DatabaseConnection,
}

impl SqlPermissionStore {
    pub fn new(db: DatabaseConnection) -> Self {
        SqlPermissionStore { db }
    }
}

#[async_trait]
impl PermissionStore for SqlPermissionStore {
    async fn create(
        &self,
        record: NewPermission,
    ) -> Result<CreateOutcome<permission::Model>, WardenError> {
        let model = permission::ActiveModel {
            name: Set(record.name),
            description: Set(record.description),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        match model.insert(&self.db).await {
            Ok(created) => Ok(CreateOutcome::Created(created)),
            Err(err) if is_unique_violation(&err) => Ok(CreateOutcome::AlreadyExists),
            Err(err) => Err(err.into()),
        }
    }

    async fn find_all(&self) -> Result<Vec<permission::Model>, WardenError> {
        Ok(permission::Entity::find().all(&self.db).await?)
    }
}

#[derive(Clone)]
pub struct SqlRoleStore {
    db: DatabaseConnection,
}

impl SqlRoleStore {
    pub fn new(db: DatabaseConnection) -> Self {
        SqlRoleStore { db }
    }
}

#[async_trait]
impl RoleStore for SqlRoleStore {
    async fn create(&self, record: NewRole) -> Result<CreateOutcome<role::Model>, WardenError> {
        let now = Utc::now().naive_utc();
        let txn = self.db.begin().await?;

        let model = role::ActiveModel {
            name: Set(record.name),
            description: Set(record.description),
            grant_all: Set(record.grant_all),
            created_at: Set(now),
            ..Default::default()
        };

        let created = match model.insert(&txn).await {
            Ok(created) => created,
            Err(err) if is_unique_violation(&err) => {
                txn.rollback().await?;
                return Ok(CreateOutcome::AlreadyExists);
            }
            Err(err) => return Err(err.into()),
        };

        for (position, permission_id) in record.permissions.iter().enumerate() {
            role_permission::ActiveModel {
                role_id: Set(created.id),
                permission_id: Set(*permission_id),
                position: Set(position as i32),
                created_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;
        Ok(CreateOutcome::Created(created))
    }

    async fn find_all(&self) -> Result<Vec<role::Model>, WardenError> {
        Ok(role::Entity::find().all(&self.db).await?)
    }
}

#[derive(Clone)]
pub struct SqlUserStore {
    db: DatabaseConnection,
}

impl SqlUserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        SqlUserStore { db }
    }
}

#[async_trait]
impl UserStore for SqlUserStore {
    async fn create(&self, record: NewUser) -> Result<user::Model, WardenError> {
        let now = Utc::now().naive_utc();
        let txn = self.db.begin().await?;

        let model = user::ActiveModel {
            username: Set(record.username.clone()),
            password_hash: Set(record.password_hash),
            user_code: Set(record.profile.user_code),
            full_name: Set(record.profile.full_name),
            date_of_birth: Set(record.profile.date_of_birth),
            address: Set(record.profile.address),
            gender: Set(record.profile.gender),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = match model.insert(&txn).await {
            Ok(created) => created,
            Err(err) if is_unique_violation(&err) => {
                txn.rollback().await?;
                return Err(WardenError::Conflict(format!(
                    "User '{}' already exists",
                    record.username
                )));
            }
            Err(err) => return Err(err.into()),
        };

        for (position, role_id) in record.roles.iter().enumerate() {
            user_role::ActiveModel {
                user_id: Set(created.id),
                role_id: Set(*role_id),
                position: Set(position as i32),
                created_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;
        Ok(created)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<user::Model>, WardenError> {
        Ok(user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?)
    }
}
