pub mod common;
pub mod companies;
pub mod projects;
pub mod purchase_orders;
pub mod purchase_requisitions;
pub mod users;

use crate::db::DbPool;
use crate::events::EventSender;
use crate::services::{
    companies::CompanyService, projects::ProjectService, purchase_orders::PurchaseOrderService,
    purchase_requisitions::PurchaseRequisitionService, users::UserService,
};
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub purchase_orders: Arc<PurchaseOrderService>,
    pub purchase_requisitions: Arc<PurchaseRequisitionService>,
    pub companies: Arc<CompanyService>,
    pub projects: Arc<ProjectService>,
    pub users: Arc<UserService>,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Option<Arc<EventSender>>) -> Self {
        Self {
            purchase_orders: Arc::new(PurchaseOrderService::new(
                db_pool.clone(),
                event_sender.clone(),
            )),
            purchase_requisitions: Arc::new(PurchaseRequisitionService::new(
                db_pool.clone(),
                event_sender.clone(),
            )),
            companies: Arc::new(CompanyService::new(db_pool.clone(), event_sender.clone())),
            projects: Arc::new(ProjectService::new(db_pool.clone(), event_sender.clone())),
            users: Arc::new(UserService::new(db_pool, event_sender)),
        }
    }
}
