use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Member record (`m_*` legacy column prefix). Passwords are stored as
/// argon2 hashes and never serialized back out.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub m_id: i32,
    pub m_code: Option<String>,
    pub m_firstname: Option<String>,
    pub m_lastname: Option<String>,
    pub m_user: Option<String>,
    #[sea_orm(column_type = "Text")]
    #[serde(skip_serializing)]
    pub m_pass: String,
    pub m_email: String,
    pub m_position: Option<String>,
    pub m_department: Option<String>,
    pub compcode: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
