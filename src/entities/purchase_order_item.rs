use rust_decimal::prelude::*;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Purchase-order line item, owned by its header via `poid`. `pri_id`
/// optionally points at the requisition item this line covers.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "purchase_order_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub poi_id: i32,
    pub poid: i32,
    pub poi_ref: Option<String>,
    pub poi_matcode: Option<String>,
    pub poi_matname: Option<String>,
    pub poi_qty: Option<Decimal>,
    pub poi_unit: Option<String>,
    pub poi_priceunit: Option<Decimal>,
    pub poi_amount: Option<Decimal>,
    pub poi_discountper1: Option<Decimal>,
    pub poi_discountper2: Option<Decimal>,
    pub poi_vatper: Option<i32>,
    pub poi_netamt: Option<Decimal>,
    #[sea_orm(column_type = "Text", nullable)]
    pub poi_remark: Option<String>,
    pub poi_deduct_status: Option<String>,
    pub pri_id: Option<i32>,
    pub compcode: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::purchase_order::Entity",
        from = "Column::Poid",
        to = "super::purchase_order::Column::PoId"
    )]
    PurchaseOrder,
}

impl Related<super::purchase_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PurchaseOrder.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
