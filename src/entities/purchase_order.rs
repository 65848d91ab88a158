use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Purchase-order header. `po_poid` is the business-facing sequential
/// number drawn from the `sequence_counters` table; `po_prno` + `compcode`
/// form the weak back-reference to the originating requisition.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "purchase_orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub po_id: i32,
    pub po_poid: i64,
    pub po_pono: Option<String>,
    pub po_podate: Option<Date>,
    pub po_project: Option<String>,
    pub po_department: Option<String>,
    pub po_memid: Option<String>,
    pub po_prname: Option<String>,
    pub po_contact: Option<String>,
    pub po_prno: Option<String>,
    pub po_quono: Option<String>,
    pub po_deliverydate: Option<Date>,
    pub po_place: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub po_remark: Option<String>,
    pub po_venderid: Option<i32>,
    pub po_vender: Option<String>,
    pub po_vatper: Option<i32>,
    pub po_open: String,
    pub po_approve: String,
    pub compcode: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::purchase_order_item::Entity")]
    PurchaseOrderItems,
}

impl Related<super::purchase_order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PurchaseOrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
