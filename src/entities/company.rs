use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "companies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub company_id: i32,
    pub company_code: Option<String>,
    pub company_name: String,
    pub company_taxnum: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub company_address: Option<String>,
    pub company_tel: Option<String>,
    pub company_fax: Option<String>,
    pub company_email: Option<String>,
    pub company_contact: Option<String>,
    pub ic_type: Option<String>,
    pub compcode: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
