use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Requisition header. Items reference it by the (pr_prno, compcode)
/// business key, not by a foreign key; `po_open` flips to "open" once every
/// item row has been matched by a purchase order.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "purchase_requisitions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub pr_id: i32,
    pub pr_prno: String,
    pub pr_prdate: Option<Date>,
    pub pr_memid: Option<String>,
    pub pr_reqname: Option<String>,
    pub pr_project: Option<String>,
    pub pr_department: Option<String>,
    pub pr_vender: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub pr_remark: Option<String>,
    pub pe_approve: Option<String>,
    pub pm_approve: Option<String>,
    pub director_approve: Option<String>,
    pub po_open: String,
    pub compcode: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
