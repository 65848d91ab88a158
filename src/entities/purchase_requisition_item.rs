use rust_decimal::prelude::*;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Requisition line item. `pri_status` is "no" until a purchase-order line
/// covers it, then "open" ("open" = matched; the transition never reverts).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "purchase_requisition_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub pri_id: i32,
    pub pri_ref: String,
    pub pri_matcode: Option<String>,
    pub pri_matname: Option<String>,
    pub pri_qty: Option<Decimal>,
    pub pri_unit: Option<String>,
    pub pri_priceunit: Option<Decimal>,
    pub pri_amount: Option<Decimal>,
    pub pri_discountper1: Option<Decimal>,
    pub pri_discountper2: Option<Decimal>,
    pub pri_discountamt: Option<Decimal>,
    pub pri_sumamt: Option<Decimal>,
    pub pri_status: String,
    pub pri_project: Option<String>,
    pub compcode: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
