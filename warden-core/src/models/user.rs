use chrono::{NaiveDate, NaiveDateTime};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User entity with embedded profile columns.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub username: String,

    /// Argon2 PHC string. Plaintext is hashed before persistence and
    /// never stored.
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub user_code: String,

    pub full_name: String,

    pub date_of_birth: NaiveDate,

    pub address: String,

    pub gender: Gender,

    pub created_at: NaiveDateTime,

    pub updated_at: NaiveDateTime,
}

/// Gender code (1 = male, 2 = female).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "i16", db_type = "SmallInteger")]
pub enum Gender {
    #[sea_orm(num_value = 1)]
    Male,
    #[sea_orm(num_value = 2)]
    Female,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_role::Entity")]
    UserRoles,
}

impl Related<super::user_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserRoles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
