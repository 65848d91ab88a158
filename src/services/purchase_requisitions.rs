use crate::{
    db::DbPool,
    entities::purchase_requisition::{self, Entity as PurchaseRequisitionEntity},
    entities::purchase_requisition_item::{self, Entity as PurchaseRequisitionItemEntity},
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::NaiveDate;
use lazy_static::lazy_static;
use prometheus::{register_int_counter, IntCounter};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, QuerySelect,
    Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;
use validator::Validate;

lazy_static! {
    static ref PR_CREATIONS: IntCounter = register_int_counter!(
        "purchase_requisition_creations_total",
        "Total number of purchase requisitions created"
    )
    .expect("metric can be created");
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreatePurchaseRequisitionItemInput {
    /// Requisition number the item belongs to; defaults to the header's.
    pub pri_ref: Option<String>,
    pub pri_matcode: Option<String>,
    pub pri_matname: Option<String>,
    pub pri_qty: Option<f64>,
    pub pri_unit: Option<String>,
    pub pri_priceunit: Option<f64>,
    pub pri_amount: Option<f64>,
    pub pri_discountper1: Option<f64>,
    pub pri_discountper2: Option<f64>,
    pub pri_discountamt: Option<f64>,
    pub pri_sumamt: Option<f64>,
    /// "no" until a purchase-order line covers the item; defaults to "no".
    pub pri_status: Option<String>,
    pub pri_project: Option<String>,
    pub compcode: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreatePurchaseRequisitionInput {
    #[validate(length(min = 1, message = "Requisition number (pr_prno) is required"))]
    pub pr_prno: String,
    pub pr_prdate: Option<NaiveDate>,
    pub pr_memid: Option<String>,
    pub pr_reqname: Option<String>,
    pub pr_project: Option<String>,
    pub pr_department: Option<String>,
    pub pr_vender: Option<String>,
    pub pr_remark: Option<String>,
    pub pe_approve: Option<String>,
    pub pm_approve: Option<String>,
    pub director_approve: Option<String>,
    pub po_open: Option<String>,
    pub compcode: Option<String>,
    #[serde(default)]
    pub items: Vec<CreatePurchaseRequisitionItemInput>,
}

/// Partial header update; absent fields are left unchanged.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdatePurchaseRequisitionInput {
    pub pr_prno: Option<String>,
    pub pr_prdate: Option<NaiveDate>,
    pub pr_memid: Option<String>,
    pub pr_reqname: Option<String>,
    pub pr_project: Option<String>,
    pub pr_department: Option<String>,
    pub pr_vender: Option<String>,
    pub pr_remark: Option<String>,
    pub pe_approve: Option<String>,
    pub pm_approve: Option<String>,
    pub director_approve: Option<String>,
    pub po_open: Option<String>,
    pub compcode: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PurchaseRequisitionMutationResponse {
    pub message: String,
    pub pr_id: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PurchaseRequisitionDeleteResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PurchaseRequisitionItemResponse {
    pub pri_id: i32,
    pub pri_ref: String,
    pub pri_matcode: Option<String>,
    pub pri_matname: Option<String>,
    pub pri_qty: Option<f64>,
    pub pri_unit: Option<String>,
    pub pri_priceunit: Option<f64>,
    pub pri_amount: Option<f64>,
    pub pri_discountper1: Option<f64>,
    pub pri_discountper2: Option<f64>,
    pub pri_discountamt: Option<f64>,
    pub pri_sumamt: Option<f64>,
    pub pri_status: String,
    pub pri_project: Option<String>,
    pub compcode: Option<String>,
}

/// Requisition header denormalized with its items.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PurchaseRequisitionResponse {
    pub pr_id: i32,
    pub pr_prno: String,
    pub pr_prdate: Option<NaiveDate>,
    pub pr_memid: Option<String>,
    pub pr_reqname: Option<String>,
    pub pr_project: Option<String>,
    pub pr_department: Option<String>,
    pub pr_vender: Option<String>,
    pub pr_remark: Option<String>,
    pub pe_approve: Option<String>,
    pub pm_approve: Option<String>,
    pub director_approve: Option<String>,
    pub po_open: String,
    pub compcode: Option<String>,
    pub items: Vec<PurchaseRequisitionItemResponse>,
}

/// Header-only projection used by the list endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PurchaseRequisitionSummary {
    pub pr_id: i32,
    pub pr_prno: String,
    pub pr_prdate: Option<NaiveDate>,
    pub pr_memid: Option<String>,
    pub pr_reqname: Option<String>,
    pub pr_project: Option<String>,
    pub pr_department: Option<String>,
    pub pr_vender: Option<String>,
    pub pr_remark: Option<String>,
    pub pe_approve: Option<String>,
    pub pm_approve: Option<String>,
    pub director_approve: Option<String>,
    pub po_open: String,
    pub compcode: Option<String>,
}

fn to_decimal(value: Option<f64>) -> Option<Decimal> {
    value.and_then(Decimal::from_f64_retain)
}

fn to_f64(value: Option<Decimal>) -> Option<f64> {
    value.and_then(|d| d.to_f64())
}

/// Item linkage and status defaults: the reference falls back to the header's
/// requisition number, the company code to the header's, the status to "no".
fn item_defaults(
    item: &CreatePurchaseRequisitionItemInput,
    header_prno: &str,
    header_compcode: Option<&str>,
) -> (String, Option<String>, String) {
    let pri_ref = item
        .pri_ref
        .clone()
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| header_prno.to_string());
    let compcode = item
        .compcode
        .clone()
        .or_else(|| header_compcode.map(str::to_string));
    let pri_status = item
        .pri_status
        .clone()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "no".to_string());
    (pri_ref, compcode, pri_status)
}

/// Service for purchase requisitions and their line items.
#[derive(Clone)]
pub struct PurchaseRequisitionService {
    db_pool: Arc<DbPool>,
    event_sender: Option<Arc<EventSender>>,
}

impl PurchaseRequisitionService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Option<Arc<EventSender>>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Creates a requisition header and its line items in one transaction,
    /// returning the persisted requisition denormalized with its items.
    #[instrument(skip(self, input), fields(pr_prno = %input.pr_prno))]
    pub async fn create_purchase_requisition(
        &self,
        input: CreatePurchaseRequisitionInput,
    ) -> Result<PurchaseRequisitionResponse, ServiceError> {
        input
            .validate()
            .map_err(|e| ServiceError::ValidationError(e.to_string()))?;

        let db = &*self.db_pool;
        let txn = db.begin().await.map_err(|e| {
            error!(error = %e, "Failed to start transaction for requisition creation");
            ServiceError::DatabaseError(e)
        })?;

        let header = purchase_requisition::ActiveModel {
            pr_prno: Set(input.pr_prno.clone()),
            pr_prdate: Set(input.pr_prdate),
            pr_memid: Set(input.pr_memid.clone()),
            pr_reqname: Set(input.pr_reqname.clone()),
            pr_project: Set(input.pr_project.clone()),
            pr_department: Set(input.pr_department.clone()),
            pr_vender: Set(input.pr_vender.clone()),
            pr_remark: Set(input.pr_remark.clone()),
            pe_approve: Set(input.pe_approve.clone()),
            pm_approve: Set(input.pm_approve.clone()),
            director_approve: Set(input.director_approve.clone()),
            po_open: Set(input.po_open.clone().unwrap_or_else(|| "no".to_string())),
            compcode: Set(input.compcode.clone()),
            ..Default::default()
        };

        let pr_model = header.insert(&txn).await.map_err(|e| {
            error!(error = %e, pr_prno = %input.pr_prno, "Failed to insert purchase requisition");
            ServiceError::DatabaseError(e)
        })?;
        let pr_id = pr_model.pr_id;

        let mut item_models = Vec::with_capacity(input.items.len());
        for item in &input.items {
            let (pri_ref, compcode, pri_status) =
                item_defaults(item, &input.pr_prno, input.compcode.as_deref());
            let item_model = purchase_requisition_item::ActiveModel {
                pri_ref: Set(pri_ref),
                pri_matcode: Set(item.pri_matcode.clone()),
                pri_matname: Set(item.pri_matname.clone()),
                pri_qty: Set(to_decimal(item.pri_qty)),
                pri_unit: Set(item.pri_unit.clone()),
                pri_priceunit: Set(to_decimal(item.pri_priceunit)),
                pri_amount: Set(to_decimal(item.pri_amount)),
                pri_discountper1: Set(to_decimal(item.pri_discountper1)),
                pri_discountper2: Set(to_decimal(item.pri_discountper2)),
                pri_discountamt: Set(to_decimal(item.pri_discountamt)),
                pri_sumamt: Set(to_decimal(item.pri_sumamt)),
                pri_status: Set(pri_status),
                pri_project: Set(item.pri_project.clone()),
                compcode: Set(compcode),
                ..Default::default()
            };
            let inserted = item_model.insert(&txn).await.map_err(|e| {
                error!(error = %e, pr_id, "Failed to insert requisition item");
                ServiceError::DatabaseError(e)
            })?;
            item_models.push(inserted);
        }

        txn.commit().await.map_err(|e| {
            error!(error = %e, pr_id, "Failed to commit requisition creation");
            ServiceError::DatabaseError(e)
        })?;

        PR_CREATIONS.inc();
        info!(pr_id, pr_prno = %input.pr_prno, "Purchase requisition created successfully");

        if let Some(event_sender) = &self.event_sender {
            if let Err(e) = event_sender
                .send(Event::PurchaseRequisitionCreated(pr_id))
                .await
            {
                warn!(error = %e, pr_id, "Failed to send requisition created event");
            }
        }

        Ok(Self::model_to_response(pr_model, item_models))
    }

    /// Retrieves a requisition with its items. Items are attached by the
    /// (requisition number, company code) business key, not a foreign key.
    #[instrument(skip(self))]
    pub async fn get_purchase_requisition(
        &self,
        pr_id: i32,
    ) -> Result<Option<PurchaseRequisitionResponse>, ServiceError> {
        let db = &*self.db_pool;

        let pr = PurchaseRequisitionEntity::find_by_id(pr_id)
            .one(db)
            .await
            .map_err(|e| {
                error!(error = %e, pr_id, "Failed to fetch purchase requisition");
                ServiceError::DatabaseError(e)
            })?;

        let Some(pr) = pr else {
            return Ok(None);
        };

        let mut items_query = PurchaseRequisitionItemEntity::find()
            .filter(purchase_requisition_item::Column::PriRef.eq(pr.pr_prno.as_str()));
        items_query = match pr.compcode.as_deref() {
            Some(code) => {
                items_query.filter(purchase_requisition_item::Column::Compcode.eq(code))
            }
            None => items_query.filter(purchase_requisition_item::Column::Compcode.is_null()),
        };
        let items = items_query.all(db).await.map_err(|e| {
            error!(error = %e, pr_id, "Failed to fetch requisition items");
            ServiceError::DatabaseError(e)
        })?;

        Ok(Some(Self::model_to_response(pr, items)))
    }

    /// Lists requisition headers.
    #[instrument(skip(self))]
    pub async fn list_purchase_requisitions(
        &self,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<PurchaseRequisitionSummary>, ServiceError> {
        let db = &*self.db_pool;

        let prs = PurchaseRequisitionEntity::find()
            .order_by_asc(purchase_requisition::Column::PrId)
            .offset(skip)
            .limit(limit)
            .all(db)
            .await
            .map_err(|e| {
                error!(error = %e, skip, limit, "Failed to list purchase requisitions");
                ServiceError::DatabaseError(e)
            })?;

        Ok(prs.into_iter().map(Self::model_to_summary).collect())
    }

    /// Overwrites the provided header fields; absent fields keep their value.
    #[instrument(skip(self, input))]
    pub async fn update_purchase_requisition(
        &self,
        pr_id: i32,
        input: UpdatePurchaseRequisitionInput,
    ) -> Result<PurchaseRequisitionMutationResponse, ServiceError> {
        let db = &*self.db_pool;

        let pr = PurchaseRequisitionEntity::find_by_id(pr_id)
            .one(db)
            .await
            .map_err(|e| {
                error!(error = %e, pr_id, "Failed to fetch purchase requisition for update");
                ServiceError::DatabaseError(e)
            })?
            .ok_or_else(|| ServiceError::NotFound("Purchase requisition not found".to_string()))?;

        let mut active: purchase_requisition::ActiveModel = pr.into();
        if let Some(v) = input.pr_prno {
            active.pr_prno = Set(v);
        }
        if let Some(v) = input.pr_prdate {
            active.pr_prdate = Set(Some(v));
        }
        if let Some(v) = input.pr_memid {
            active.pr_memid = Set(Some(v));
        }
        if let Some(v) = input.pr_reqname {
            active.pr_reqname = Set(Some(v));
        }
        if let Some(v) = input.pr_project {
            active.pr_project = Set(Some(v));
        }
        if let Some(v) = input.pr_department {
            active.pr_department = Set(Some(v));
        }
        if let Some(v) = input.pr_vender {
            active.pr_vender = Set(Some(v));
        }
        if let Some(v) = input.pr_remark {
            active.pr_remark = Set(Some(v));
        }
        if let Some(v) = input.pe_approve {
            active.pe_approve = Set(Some(v));
        }
        if let Some(v) = input.pm_approve {
            active.pm_approve = Set(Some(v));
        }
        if let Some(v) = input.director_approve {
            active.director_approve = Set(Some(v));
        }
        if let Some(v) = input.po_open {
            active.po_open = Set(v);
        }
        if let Some(v) = input.compcode {
            active.compcode = Set(Some(v));
        }

        active.update(db).await.map_err(|e| {
            error!(error = %e, pr_id, "Failed to update purchase requisition");
            ServiceError::DatabaseError(e)
        })?;

        info!(pr_id, "Purchase requisition updated successfully");

        if let Some(event_sender) = &self.event_sender {
            if let Err(e) = event_sender
                .send(Event::PurchaseRequisitionUpdated(pr_id))
                .await
            {
                warn!(error = %e, pr_id, "Failed to send requisition updated event");
            }
        }

        Ok(PurchaseRequisitionMutationResponse {
            message: "Purchase requisition updated successfully".to_string(),
            pr_id,
        })
    }

    /// Deletes the header row. Items are linked by business key, not by a
    /// foreign key, so they are left in place, as are purchase orders that
    /// reference the requisition.
    #[instrument(skip(self))]
    pub async fn delete_purchase_requisition(
        &self,
        pr_id: i32,
    ) -> Result<PurchaseRequisitionDeleteResponse, ServiceError> {
        let db = &*self.db_pool;

        let pr = PurchaseRequisitionEntity::find_by_id(pr_id)
            .one(db)
            .await
            .map_err(|e| {
                error!(error = %e, pr_id, "Failed to fetch purchase requisition for delete");
                ServiceError::DatabaseError(e)
            })?
            .ok_or_else(|| ServiceError::NotFound("Purchase requisition not found".to_string()))?;

        pr.delete(db).await.map_err(|e| {
            error!(error = %e, pr_id, "Failed to delete purchase requisition");
            ServiceError::DatabaseError(e)
        })?;

        info!(pr_id, "Purchase requisition deleted successfully");

        if let Some(event_sender) = &self.event_sender {
            if let Err(e) = event_sender
                .send(Event::PurchaseRequisitionDeleted(pr_id))
                .await
            {
                warn!(error = %e, pr_id, "Failed to send requisition deleted event");
            }
        }

        Ok(PurchaseRequisitionDeleteResponse {
            message: "Purchase requisition deleted successfully".to_string(),
        })
    }

    fn model_to_response(
        pr: purchase_requisition::Model,
        items: Vec<purchase_requisition_item::Model>,
    ) -> PurchaseRequisitionResponse {
        PurchaseRequisitionResponse {
            pr_id: pr.pr_id,
            pr_prno: pr.pr_prno,
            pr_prdate: pr.pr_prdate,
            pr_memid: pr.pr_memid,
            pr_reqname: pr.pr_reqname,
            pr_project: pr.pr_project,
            pr_department: pr.pr_department,
            pr_vender: pr.pr_vender,
            pr_remark: pr.pr_remark,
            pe_approve: pr.pe_approve,
            pm_approve: pr.pm_approve,
            director_approve: pr.director_approve,
            po_open: pr.po_open,
            compcode: pr.compcode,
            items: items
                .into_iter()
                .map(|item| PurchaseRequisitionItemResponse {
                    pri_id: item.pri_id,
                    pri_ref: item.pri_ref,
                    pri_matcode: item.pri_matcode,
                    pri_matname: item.pri_matname,
                    pri_qty: to_f64(item.pri_qty),
                    pri_unit: item.pri_unit,
                    pri_priceunit: to_f64(item.pri_priceunit),
                    pri_amount: to_f64(item.pri_amount),
                    pri_discountper1: to_f64(item.pri_discountper1),
                    pri_discountper2: to_f64(item.pri_discountper2),
                    pri_discountamt: to_f64(item.pri_discountamt),
                    pri_sumamt: to_f64(item.pri_sumamt),
                    pri_status: item.pri_status,
                    pri_project: item.pri_project,
                    compcode: item.compcode,
                })
                .collect(),
        }
    }

    fn model_to_summary(pr: purchase_requisition::Model) -> PurchaseRequisitionSummary {
        PurchaseRequisitionSummary {
            pr_id: pr.pr_id,
            pr_prno: pr.pr_prno,
            pr_prdate: pr.pr_prdate,
            pr_memid: pr.pr_memid,
            pr_reqname: pr.pr_reqname,
            pr_project: pr.pr_project,
            pr_department: pr.pr_department,
            pr_vender: pr.pr_vender,
            pr_remark: pr.pr_remark,
            pe_approve: pr.pe_approve,
            pm_approve: pr.pm_approve,
            director_approve: pr.director_approve,
            po_open: pr.po_open,
            compcode: pr.compcode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_item() -> CreatePurchaseRequisitionItemInput {
        CreatePurchaseRequisitionItemInput {
            pri_ref: None,
            pri_matcode: Some("MAT-001".to_string()),
            pri_matname: Some("Rebar".to_string()),
            pri_qty: Some(10.0),
            pri_unit: Some("ea".to_string()),
            pri_priceunit: None,
            pri_amount: None,
            pri_discountper1: None,
            pri_discountper2: None,
            pri_discountamt: None,
            pri_sumamt: None,
            pri_status: None,
            pri_project: None,
            compcode: None,
        }
    }

    #[test]
    fn item_defaults_inherit_from_header() {
        let item = bare_item();
        let (pri_ref, compcode, status) = item_defaults(&item, "PR-2025-007", Some("C001"));
        assert_eq!(pri_ref, "PR-2025-007");
        assert_eq!(compcode.as_deref(), Some("C001"));
        assert_eq!(status, "no");
    }

    #[test]
    fn explicit_item_values_win_over_header() {
        let mut item = bare_item();
        item.pri_ref = Some("PR-OTHER".to_string());
        item.compcode = Some("C002".to_string());
        item.pri_status = Some("open".to_string());
        let (pri_ref, compcode, status) = item_defaults(&item, "PR-2025-007", Some("C001"));
        assert_eq!(pri_ref, "PR-OTHER");
        assert_eq!(compcode.as_deref(), Some("C002"));
        assert_eq!(status, "open");
    }

    #[test]
    fn create_input_requires_requisition_number() {
        let input = CreatePurchaseRequisitionInput {
            pr_prno: String::new(),
            pr_prdate: None,
            pr_memid: None,
            pr_reqname: None,
            pr_project: None,
            pr_department: None,
            pr_vender: None,
            pr_remark: None,
            pe_approve: None,
            pm_approve: None,
            director_approve: None,
            po_open: None,
            compcode: None,
            items: vec![],
        };
        assert!(input.validate().is_err());
    }
}
