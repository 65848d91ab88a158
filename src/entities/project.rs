use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub project_id: i32,
    pub project_code: Option<String>,
    pub project_name: String,
    pub project_worktype: Option<String>,
    pub project_type: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub project_address: Option<String>,
    pub project_cname: Option<String>,
    pub project_tel: Option<String>,
    pub project_email: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
