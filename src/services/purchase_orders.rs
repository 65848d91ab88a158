use crate::{
    db::DbPool,
    entities::purchase_order::{self, Entity as PurchaseOrderEntity},
    entities::purchase_order_item::{self, Entity as PurchaseOrderItemEntity},
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
use sea_orm::sea_query::{Alias, Expr, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;
use validator::Validate;

// Must match the row seeded by the sequence_counters migration.
const PO_SEQUENCE_NAME: &str = "purchase_order";

lazy_static! {
    static ref PO_CREATIONS: IntCounter = register_int_counter!(
        "purchase_order_creations_total",
        "Total number of purchase orders created"
    )
    .expect("metric can be created");
    static ref PO_CREATION_FAILURES: IntCounter = register_int_counter!(
        "purchase_order_creation_failures_total",
        "Total number of failed purchase order creations"
    )
    .expect("metric can be created");
    static ref PR_FULLY_ORDERED: IntCounter = register_int_counter!(
        "purchase_requisitions_fully_ordered_total",
        "Total number of requisitions whose items became fully covered by purchase orders"
    )
    .expect("metric can be created");
}

/// Line item submitted with a new purchase order.
///
/// Material code, quantity, and unit are business-required; they stay
/// optional here so their absence surfaces as a 400 with a readable
/// message instead of a schema rejection.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreatePurchaseOrderItemInput {
    pub poi_matname: Option<String>,
    pub poi_matcode: Option<String>,
    pub poi_ref: Option<String>,
    pub poi_qty: Option<f64>,
    pub poi_unit: Option<String>,
    pub poi_priceunit: Option<f64>,
    pub poi_amount: Option<f64>,
    pub poi_discountper1: Option<f64>,
    pub poi_discountper2: Option<f64>,
    pub poi_vatper: Option<i32>,
    pub poi_netamt: Option<f64>,
    pub poi_remark: Option<String>,
    pub poi_deduct_status: Option<String>,
    /// Requisition item this order item covers, when it covers one.
    pub pri_id: Option<i32>,
    pub compcode: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreatePurchaseOrderInput {
    pub po_pono: Option<String>,
    pub po_podate: Option<NaiveDate>,
    pub po_project: Option<String>,
    pub po_department: Option<String>,
    pub po_memid: Option<String>,
    pub po_prname: Option<String>,
    pub po_contact: Option<String>,
    /// Requisition number linking this order back to its requisition.
    pub po_prno: Option<String>,
    pub po_quono: Option<String>,
    pub po_deliverydate: Option<NaiveDate>,
    pub po_place: Option<String>,
    pub po_remark: Option<String>,
    pub po_venderid: Option<i32>,
    pub po_vender: Option<String>,
    pub po_vatper: Option<i32>,
    pub compcode: Option<String>,
    #[validate(length(min = 1, message = "At least one item is required"))]
    #[serde(default)]
    pub items: Vec<CreatePurchaseOrderItemInput>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatePurchaseOrderResponse {
    pub message: String,
    pub po_id: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PurchaseOrderItemResponse {
    pub poi_id: i32,
    pub poi_matname: Option<String>,
    pub poi_matcode: Option<String>,
    pub poi_ref: Option<String>,
    pub poi_qty: Option<f64>,
    pub poi_unit: Option<String>,
    pub poi_priceunit: Option<f64>,
    pub poi_amount: Option<f64>,
    pub poi_discountper1: Option<f64>,
    pub poi_discountper2: Option<f64>,
}

/// Purchase order denormalized with its owned items.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PurchaseOrderResponse {
    pub po_id: i32,
    pub po_poid: i64,
    pub po_pono: Option<String>,
    pub po_podate: Option<NaiveDate>,
    pub po_project: Option<String>,
    pub po_department: Option<String>,
    pub po_memid: Option<String>,
    pub po_prname: Option<String>,
    pub po_contact: Option<String>,
    pub po_prno: Option<String>,
    pub po_quono: Option<String>,
    pub po_deliverydate: Option<NaiveDate>,
    pub po_place: Option<String>,
    pub po_remark: Option<String>,
    pub po_venderid: Option<i32>,
    pub po_vender: Option<String>,
    pub po_vatper: Option<i32>,
    pub po_open: String,
    pub po_approve: String,
    pub items: Vec<PurchaseOrderItemResponse>,
}

fn to_decimal(value: Option<f64>) -> Option<Decimal> {
    value.and_then(Decimal::from_f64_retain)
}

fn to_f64(value: Option<Decimal>) -> Option<f64> {
    value.and_then(|d| d.to_f64())
}

/// NULL-aware company-code match: a missing code matches rows where the
/// column is NULL, never rows with some other code.
fn compcode_eq<C: ColumnTrait>(column: C, compcode: Option<&str>) -> sea_orm::sea_query::SimpleExpr {
    match compcode {
        Some(code) => column.eq(code),
        None => column.is_null(),
    }
}

/// Service for purchase orders and the requisition status propagation rule.
#[derive(Clone)]
pub struct PurchaseOrderService {
    db_pool: Arc<DbPool>,
    event_sender: Option<Arc<EventSender>>,
}

impl PurchaseOrderService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Option<Arc<EventSender>>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Creates a purchase order together with its items, marks every
    /// covered requisition item "open", and flips the requisition's
    /// `po_open` flag when the order completes its coverage.
    ///
    /// The whole flow runs in a single transaction. The requisition row is
    /// locked up front, so concurrent creations against the same
    /// requisition serialize and the coverage check always sees committed
    /// predecessor writes. Any failure rolls everything back; no partial
    /// purchase order ever reaches storage.
    #[instrument(skip(self, input), fields(po_pono = ?input.po_pono, po_prno = ?input.po_prno))]
    pub async fn create_purchase_order(
        &self,
        input: CreatePurchaseOrderInput,
    ) -> Result<CreatePurchaseOrderResponse, ServiceError> {
        match self.create_purchase_order_inner(input).await {
            Ok(response) => {
                PO_CREATIONS.inc();
                Ok(response)
            }
            Err(e) => {
                PO_CREATION_FAILURES.inc();
                Err(e)
            }
        }
    }

    async fn create_purchase_order_inner(
        &self,
        input: CreatePurchaseOrderInput,
    ) -> Result<CreatePurchaseOrderResponse, ServiceError> {
        input
            .validate()
            .map_err(|e| ServiceError::ValidationError(e.to_string()))?;

        let has_vendor_id = matches!(input.po_venderid, Some(id) if id != 0);
        let has_vendor_name = input
            .po_vender
            .as_deref()
            .is_some_and(|v| !v.trim().is_empty());
        if !has_vendor_id || !has_vendor_name {
            return Err(ServiceError::ValidationError(
                "Vendor id and vendor name are required".to_string(),
            ));
        }

        let prno = input
            .po_prno
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| {
                ServiceError::ValidationError(
                    "Purchase requisition number (po_prno) is required".to_string(),
                )
            })?
            .to_string();
        let compcode = input.compcode.as_deref();

        let db = &*self.db_pool;
        let txn = db.begin().await.map_err(|e| {
            error!(error = %e, "Failed to start transaction for purchase order creation");
            ServiceError::DatabaseError(e)
        })?;

        // Resolve the requisition before writing anything, and lock its row
        // for the rest of the transaction. On SQLite the lock clause is a
        // no-op; the single-writer model serializes there anyway.
        let pr = PurchaseRequisitionEntity::find()
            .filter(purchase_requisition::Column::PrPrno.eq(prno.as_str()))
            .filter(compcode_eq(purchase_requisition::Column::Compcode, compcode))
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(|e| {
                error!(error = %e, prno = %prno, "Failed to resolve purchase requisition");
                ServiceError::DatabaseError(e)
            })?
            .ok_or_else(|| {
                warn!(prno = %prno, "Purchase requisition not found for new purchase order");
                ServiceError::ValidationError(format!("Purchase requisition {} not found", prno))
            })?;

        let po_poid = self.next_po_sequence(&txn).await?;

        let po_active_model = purchase_order::ActiveModel {
            po_poid: Set(po_poid),
            po_pono: Set(input.po_pono.clone()),
            po_podate: Set(input.po_podate),
            po_project: Set(input.po_project.clone()),
            po_department: Set(input.po_department.clone()),
            po_memid: Set(input.po_memid.clone()),
            po_prname: Set(input.po_prname.clone()),
            po_contact: Set(input.po_contact.clone()),
            po_prno: Set(Some(prno.clone())),
            po_quono: Set(input.po_quono.clone()),
            po_deliverydate: Set(input.po_deliverydate),
            po_place: Set(input.po_place.clone()),
            po_remark: Set(input.po_remark.clone()),
            po_venderid: Set(input.po_venderid),
            po_vender: Set(input.po_vender.clone()),
            po_vatper: Set(input.po_vatper),
            po_open: Set("no".to_string()),
            po_approve: Set("wait".to_string()),
            compcode: Set(input.compcode.clone()),
            ..Default::default()
        };

        let po_model = po_active_model.insert(&txn).await.map_err(|e| {
            error!(error = %e, po_poid, "Failed to insert purchase order");
            ServiceError::DatabaseError(e)
        })?;
        let po_id = po_model.po_id;

        for item in &input.items {
            let has_matcode = item
                .poi_matcode
                .as_deref()
                .is_some_and(|c| !c.trim().is_empty());
            let qty = to_decimal(item.poi_qty).filter(|q| !q.is_zero());
            let has_unit = item
                .poi_unit
                .as_deref()
                .is_some_and(|u| !u.trim().is_empty());
            if !has_matcode || qty.is_none() || !has_unit {
                return Err(ServiceError::ValidationError(
                    "Item material code, quantity, and unit are required".to_string(),
                ));
            }

            let poi_active_model = purchase_order_item::ActiveModel {
                poid: Set(po_id),
                poi_ref: Set(item.poi_ref.clone()),
                poi_matcode: Set(item.poi_matcode.clone()),
                poi_matname: Set(item.poi_matname.clone()),
                poi_qty: Set(qty),
                poi_unit: Set(item.poi_unit.clone()),
                poi_priceunit: Set(to_decimal(item.poi_priceunit)),
                poi_amount: Set(to_decimal(item.poi_amount)),
                poi_discountper1: Set(to_decimal(item.poi_discountper1)),
                poi_discountper2: Set(to_decimal(item.poi_discountper2)),
                poi_vatper: Set(item.poi_vatper),
                poi_netamt: Set(to_decimal(item.poi_netamt)),
                poi_remark: Set(item.poi_remark.clone()),
                poi_deduct_status: Set(item.poi_deduct_status.clone()),
                pri_id: Set(item.pri_id),
                compcode: Set(item.compcode.clone()),
                ..Default::default()
            };
            poi_active_model.insert(&txn).await.map_err(|e| {
                error!(error = %e, po_id, "Failed to insert purchase order item");
                ServiceError::DatabaseError(e)
            })?;

            // Mark the covered requisition item. A dangling reference is
            // skipped, not an error: the linkage is a weak one.
            if let Some(pri_id) = item.pri_id {
                let pr_item = PurchaseRequisitionItemEntity::find_by_id(pri_id)
                    .one(&txn)
                    .await
                    .map_err(|e| {
                        error!(error = %e, pri_id, "Failed to load requisition item");
                        ServiceError::DatabaseError(e)
                    })?;
                match pr_item {
                    Some(model) if model.pri_status != "open" => {
                        let mut active: purchase_requisition_item::ActiveModel = model.into();
                        active.pri_status = Set("open".to_string());
                        active.update(&txn).await.map_err(|e| {
                            error!(error = %e, pri_id, "Failed to update requisition item status");
                            ServiceError::DatabaseError(e)
                        })?;
                    }
                    Some(_) => {}
                    None => {
                        warn!(pri_id, "Purchase order item references a missing requisition item");
                    }
                }
            }
        }

        // Coverage check under the row lock taken above: flip the
        // requisition open exactly once, and never for an empty one.
        let open_items = PurchaseRequisitionItemEntity::find()
            .filter(purchase_requisition_item::Column::PriStatus.eq("open"))
            .filter(purchase_requisition_item::Column::PriRef.eq(prno.as_str()))
            .filter(compcode_eq(
                purchase_requisition_item::Column::Compcode,
                compcode,
            ))
            .count(&txn)
            .await
            .map_err(|e| {
                error!(error = %e, prno = %prno, "Failed to count covered requisition items");
                ServiceError::DatabaseError(e)
            })?;
        let total_items = PurchaseRequisitionItemEntity::find()
            .filter(purchase_requisition_item::Column::PriRef.eq(prno.as_str()))
            .filter(compcode_eq(
                purchase_requisition_item::Column::Compcode,
                compcode,
            ))
            .count(&txn)
            .await
            .map_err(|e| {
                error!(error = %e, prno = %prno, "Failed to count requisition items");
                ServiceError::DatabaseError(e)
            })?;

        let mut fully_ordered = None;
        if total_items >= 1 && open_items == total_items && pr.po_open != "open" {
            let pr_id = pr.pr_id;
            let mut pr_active: purchase_requisition::ActiveModel = pr.into();
            pr_active.po_open = Set("open".to_string());
            pr_active.update(&txn).await.map_err(|e| {
                error!(error = %e, pr_id, "Failed to flip requisition open flag");
                ServiceError::DatabaseError(e)
            })?;
            fully_ordered = Some(pr_id);
            info!(pr_id, prno = %prno, "Purchase requisition fully covered, flag flipped to open");
        }

        txn.commit().await.map_err(|e| {
            error!(error = %e, po_id, "Failed to commit purchase order creation");
            ServiceError::DatabaseError(e)
        })?;

        info!(po_id, po_poid, "Purchase order created successfully");
        if fully_ordered.is_some() {
            PR_FULLY_ORDERED.inc();
        }

        if let Some(event_sender) = &self.event_sender {
            if let Err(e) = event_sender.send(Event::PurchaseOrderCreated(po_id)).await {
                warn!(error = %e, po_id, "Failed to send purchase order created event");
            }
            if let Some(pr_id) = fully_ordered {
                if let Err(e) = event_sender
                    .send(Event::PurchaseRequisitionFullyOrdered(pr_id))
                    .await
                {
                    warn!(error = %e, pr_id, "Failed to send requisition fully ordered event");
                }
            }
        }

        Ok(CreatePurchaseOrderResponse {
            message: "Purchase order created successfully".to_string(),
            po_id,
        })
    }

    /// Draws the next value from the purchase-order sequence with a single
    /// atomic `UPDATE ... RETURNING`, inside the caller's transaction.
    async fn next_po_sequence(
        &self,
        txn: &sea_orm::DatabaseTransaction,
    ) -> Result<i64, ServiceError> {
        let backend = txn.get_database_backend();
        let stmt = Query::update()
            .table(Alias::new("sequence_counters"))
            .value(Alias::new("value"), Expr::col(Alias::new("value")).add(1))
            .and_where(Expr::col(Alias::new("name")).eq(PO_SEQUENCE_NAME))
            .returning_col(Alias::new("value"))
            .to_owned();

        let row = txn
            .query_one(backend.build(&stmt))
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to increment purchase order sequence");
                ServiceError::DatabaseError(e)
            })?
            .ok_or_else(|| {
                error!("Purchase order sequence counter row is missing");
                ServiceError::InternalError("purchase order sequence counter is missing".to_string())
            })?;

        row.try_get("", "value").map_err(|e| {
            error!(error = %e, "Failed to read purchase order sequence value");
            ServiceError::DatabaseError(e)
        })
    }

    /// Retrieves a purchase order with its items.
    #[instrument(skip(self))]
    pub async fn get_purchase_order(
        &self,
        po_id: i32,
    ) -> Result<Option<PurchaseOrderResponse>, ServiceError> {
        let db = &*self.db_pool;

        let po = PurchaseOrderEntity::find_by_id(po_id)
            .one(db)
            .await
            .map_err(|e| {
                error!(error = %e, po_id, "Failed to fetch purchase order");
                ServiceError::DatabaseError(e)
            })?;

        let Some(po) = po else {
            return Ok(None);
        };

        let items = self.items_for(db, po_id).await?;
        Ok(Some(Self::model_to_response(po, items)))
    }

    /// Lists purchase orders, each denormalized with its items.
    #[instrument(skip(self))]
    pub async fn list_purchase_orders(
        &self,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<PurchaseOrderResponse>, ServiceError> {
        let db = &*self.db_pool;

        let pos = PurchaseOrderEntity::find()
            .order_by_asc(purchase_order::Column::PoId)
            .offset(skip)
            .limit(limit)
            .all(db)
            .await
            .map_err(|e| {
                error!(error = %e, skip, limit, "Failed to list purchase orders");
                ServiceError::DatabaseError(e)
            })?;

        let mut responses = Vec::with_capacity(pos.len());
        for po in pos {
            let items = self.items_for(db, po.po_id).await?;
            responses.push(Self::model_to_response(po, items));
        }

        Ok(responses)
    }

    async fn items_for(
        &self,
        db: &DbPool,
        po_id: i32,
    ) -> Result<Vec<purchase_order_item::Model>, ServiceError> {
        PurchaseOrderItemEntity::find()
            .filter(purchase_order_item::Column::Poid.eq(po_id))
            .all(db)
            .await
            .map_err(|e| {
                error!(error = %e, po_id, "Failed to fetch purchase order items");
                ServiceError::DatabaseError(e)
            })
    }

    fn model_to_response(
        po: purchase_order::Model,
        items: Vec<purchase_order_item::Model>,
    ) -> PurchaseOrderResponse {
        PurchaseOrderResponse {
            po_id: po.po_id,
            po_poid: po.po_poid,
            po_pono: po.po_pono,
            po_podate: po.po_podate,
            po_project: po.po_project,
            po_department: po.po_department,
            po_memid: po.po_memid,
            po_prname: po.po_prname,
            po_contact: po.po_contact,
            po_prno: po.po_prno,
            po_quono: po.po_quono,
            po_deliverydate: po.po_deliverydate,
            po_place: po.po_place,
            po_remark: po.po_remark,
            po_venderid: po.po_venderid,
            // Legacy fixed-width storage pads the vendor name.
            po_vender: po.po_vender.map(|v| v.trim().to_string()),
            po_vatper: po.po_vatper,
            po_open: po.po_open,
            po_approve: po.po_approve,
            items: items
                .into_iter()
                .map(|item| PurchaseOrderItemResponse {
                    poi_id: item.poi_id,
                    poi_matname: item.poi_matname,
                    poi_matcode: item.poi_matcode,
                    poi_ref: item.poi_ref,
                    poi_qty: to_f64(item.poi_qty),
                    poi_unit: item.poi_unit,
                    poi_priceunit: to_f64(item.poi_priceunit),
                    poi_amount: to_f64(item.poi_amount),
                    poi_discountper1: to_f64(item.poi_discountper1),
                    poi_discountper2: to_f64(item.poi_discountper2),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn to_decimal_rejects_non_finite_values() {
        assert_eq!(to_decimal(Some(12.5)), Some(dec!(12.5)));
        assert!(to_decimal(Some(f64::NAN)).is_none());
        assert!(to_decimal(Some(f64::INFINITY)).is_none());
        assert!(to_decimal(None).is_none());
    }

    #[test]
    fn response_trims_vendor_name() {
        let po = purchase_order::Model {
            po_id: 1,
            po_poid: 1,
            po_pono: Some("PO-2025-001".to_string()),
            po_podate: None,
            po_project: None,
            po_department: None,
            po_memid: None,
            po_prname: None,
            po_contact: None,
            po_prno: Some("PR-2025-001".to_string()),
            po_quono: None,
            po_deliverydate: None,
            po_place: None,
            po_remark: None,
            po_venderid: Some(12),
            po_vender: Some("Siam Steel Co.   ".to_string()),
            po_vatper: Some(7),
            po_open: "no".to_string(),
            po_approve: "wait".to_string(),
            compcode: Some("C001".to_string()),
        };

        let response = PurchaseOrderService::model_to_response(po, vec![]);
        assert_eq!(response.po_vender.as_deref(), Some("Siam Steel Co."));
        assert!(response.items.is_empty());
    }

    #[test]
    fn item_list_length_is_validated() {
        let input = CreatePurchaseOrderInput {
            po_pono: Some("PO-1".to_string()),
            po_podate: None,
            po_project: None,
            po_department: None,
            po_memid: None,
            po_prname: None,
            po_contact: None,
            po_prno: Some("PR-1".to_string()),
            po_quono: None,
            po_deliverydate: None,
            po_place: None,
            po_remark: None,
            po_venderid: Some(1),
            po_vender: Some("Vendor".to_string()),
            po_vatper: None,
            compcode: None,
            items: vec![],
        };

        assert!(input.validate().is_err());
    }
}
