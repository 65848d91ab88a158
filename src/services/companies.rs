use crate::{
    db::DbPool,
    entities::company::{self, Entity as CompanyEntity},
    errors::ServiceError,
    events::{Event, EventSender},
};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCompanyInput {
    pub company_code: Option<String>,
    #[validate(length(min = 1, message = "Company name is required"))]
    pub company_name: String,
    pub company_taxnum: Option<String>,
    pub company_address: Option<String>,
    pub company_tel: Option<String>,
    pub company_fax: Option<String>,
    pub company_email: Option<String>,
    pub company_contact: Option<String>,
    /// Inventory costing method; defaults to "fifo".
    pub ic_type: Option<String>,
    pub compcode: Option<String>,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCompanyInput {
    pub company_code: Option<String>,
    pub company_name: Option<String>,
    pub company_taxnum: Option<String>,
    pub company_address: Option<String>,
    pub company_tel: Option<String>,
    pub company_fax: Option<String>,
    pub company_email: Option<String>,
    pub company_contact: Option<String>,
    pub ic_type: Option<String>,
    pub compcode: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CompanyMutationResponse {
    pub message: String,
    pub company_id: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CompanyDeleteResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CompanyResponse {
    pub company_id: i32,
    pub company_code: Option<String>,
    pub company_name: String,
    pub company_taxnum: Option<String>,
    pub company_address: Option<String>,
    pub company_tel: Option<String>,
    pub company_fax: Option<String>,
    pub company_email: Option<String>,
    pub company_contact: Option<String>,
    pub ic_type: Option<String>,
    pub compcode: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct PageFilter {
    /// 1-based page number; 0 or absent selects the first page.
    pub skip: Option<u64>,
    /// Records per page; defaults to 50.
    pub limit: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CompanyFilterRequest {
    pub search: Option<String>,
    #[serde(default)]
    pub page: PageFilter,
}

/// Filter result envelope. The camelCase keys are a compatibility surface
/// consumed by existing clients.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyListResponse {
    pub result_lists: Vec<CompanyResponse>,
    pub total_records: u64,
    pub current_page: u64,
    pub records_per_page: u64,
    pub total_page: u64,
    pub record_start: u64,
    pub record_end: u64,
    pub status: String,
}

struct PageWindow {
    page: u64,
    limit: u64,
    offset: u64,
    total_page: u64,
    record_start: u64,
    record_end: u64,
}

/// Legacy page arithmetic: `skip` carries a 1-based page number (0
/// normalizes to the first page) and `limit` is clamped to at least one
/// record per page.
fn page_window(skip: u64, limit: u64, total: u64) -> PageWindow {
    let limit = limit.max(1);
    let page = skip.max(1);
    let offset = (page - 1) * limit;
    let total_page = total / limit + u64::from(total % limit > 0);
    let record_start = if total > 0 { offset + 1 } else { 0 };
    let record_end = (offset + limit).min(total);
    PageWindow {
        page,
        limit,
        offset,
        total_page,
        record_start,
        record_end,
    }
}

/// Service for company reference records.
#[derive(Clone)]
pub struct CompanyService {
    db_pool: Arc<DbPool>,
    event_sender: Option<Arc<EventSender>>,
}

impl CompanyService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Option<Arc<EventSender>>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    #[instrument(skip(self, input), fields(company_name = %input.company_name))]
    pub async fn create_company(
        &self,
        input: CreateCompanyInput,
    ) -> Result<CompanyMutationResponse, ServiceError> {
        input
            .validate()
            .map_err(|e| ServiceError::ValidationError(e.to_string()))?;

        let db = &*self.db_pool;

        let active = company::ActiveModel {
            company_code: Set(input.company_code),
            company_name: Set(input.company_name),
            company_taxnum: Set(input.company_taxnum),
            company_address: Set(input.company_address),
            company_tel: Set(input.company_tel),
            company_fax: Set(input.company_fax),
            company_email: Set(input.company_email),
            company_contact: Set(input.company_contact),
            ic_type: Set(Some(input.ic_type.unwrap_or_else(|| "fifo".to_string()))),
            compcode: Set(input.compcode),
            ..Default::default()
        };

        let model = active.insert(db).await.map_err(|e| {
            error!(error = %e, "Failed to insert company");
            ServiceError::DatabaseError(e)
        })?;

        info!(company_id = model.company_id, "Company created successfully");

        if let Some(event_sender) = &self.event_sender {
            if let Err(e) = event_sender
                .send(Event::CompanyCreated(model.company_id))
                .await
            {
                warn!(error = %e, company_id = model.company_id, "Failed to send company created event");
            }
        }

        Ok(CompanyMutationResponse {
            message: "Company created successfully".to_string(),
            company_id: model.company_id,
        })
    }

    /// Case-insensitive substring search over company names, with the
    /// legacy page metadata envelope.
    #[instrument(skip(self, request), fields(search = ?request.search))]
    pub async fn filter_companies(
        &self,
        request: CompanyFilterRequest,
    ) -> Result<CompanyListResponse, ServiceError> {
        let db = &*self.db_pool;

        let mut query = CompanyEntity::find();
        if let Some(search) = request.search.as_deref().filter(|s| !s.is_empty()) {
            query = query.filter(
                Expr::expr(Func::lower(Expr::col(company::Column::CompanyName)))
                    .like(format!("%{}%", search.to_lowercase())),
            );
        }

        let total = query.clone().count(db).await.map_err(|e| {
            error!(error = %e, "Failed to count companies");
            ServiceError::DatabaseError(e)
        })?;

        let window = page_window(
            request.page.skip.unwrap_or(0),
            request.page.limit.unwrap_or(50),
            total,
        );

        let companies = query
            .order_by_asc(company::Column::CompanyId)
            .offset(window.offset)
            .limit(window.limit)
            .all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to list companies");
                ServiceError::DatabaseError(e)
            })?;

        Ok(CompanyListResponse {
            result_lists: companies.into_iter().map(Self::model_to_response).collect(),
            total_records: total,
            current_page: window.page,
            records_per_page: window.limit,
            total_page: window.total_page,
            record_start: window.record_start,
            record_end: window.record_end,
            status: "success".to_string(),
        })
    }

    #[instrument(skip(self))]
    pub async fn get_company(
        &self,
        company_id: i32,
    ) -> Result<Option<CompanyResponse>, ServiceError> {
        let db = &*self.db_pool;

        let company = CompanyEntity::find_by_id(company_id)
            .one(db)
            .await
            .map_err(|e| {
                error!(error = %e, company_id, "Failed to fetch company");
                ServiceError::DatabaseError(e)
            })?;

        Ok(company.map(Self::model_to_response))
    }

    #[instrument(skip(self, input))]
    pub async fn update_company(
        &self,
        company_id: i32,
        input: UpdateCompanyInput,
    ) -> Result<CompanyMutationResponse, ServiceError> {
        let db = &*self.db_pool;

        let company = CompanyEntity::find_by_id(company_id)
            .one(db)
            .await
            .map_err(|e| {
                error!(error = %e, company_id, "Failed to fetch company for update");
                ServiceError::DatabaseError(e)
            })?
            .ok_or_else(|| ServiceError::NotFound("Company not found".to_string()))?;

        let mut active: company::ActiveModel = company.into();
        if let Some(v) = input.company_code {
            active.company_code = Set(Some(v));
        }
        if let Some(v) = input.company_name {
            active.company_name = Set(v);
        }
        if let Some(v) = input.company_taxnum {
            active.company_taxnum = Set(Some(v));
        }
        if let Some(v) = input.company_address {
            active.company_address = Set(Some(v));
        }
        if let Some(v) = input.company_tel {
            active.company_tel = Set(Some(v));
        }
        if let Some(v) = input.company_fax {
            active.company_fax = Set(Some(v));
        }
        if let Some(v) = input.company_email {
            active.company_email = Set(Some(v));
        }
        if let Some(v) = input.company_contact {
            active.company_contact = Set(Some(v));
        }
        if let Some(v) = input.ic_type {
            active.ic_type = Set(Some(v));
        }
        if let Some(v) = input.compcode {
            active.compcode = Set(Some(v));
        }

        active.update(db).await.map_err(|e| {
            error!(error = %e, company_id, "Failed to update company");
            ServiceError::DatabaseError(e)
        })?;

        info!(company_id, "Company updated successfully");

        if let Some(event_sender) = &self.event_sender {
            if let Err(e) = event_sender.send(Event::CompanyUpdated(company_id)).await {
                warn!(error = %e, company_id, "Failed to send company updated event");
            }
        }

        Ok(CompanyMutationResponse {
            message: "Company updated successfully".to_string(),
            company_id,
        })
    }

    #[instrument(skip(self))]
    pub async fn delete_company(
        &self,
        company_id: i32,
    ) -> Result<CompanyDeleteResponse, ServiceError> {
        let db = &*self.db_pool;

        let company = CompanyEntity::find_by_id(company_id)
            .one(db)
            .await
            .map_err(|e| {
                error!(error = %e, company_id, "Failed to fetch company for delete");
                ServiceError::DatabaseError(e)
            })?
            .ok_or_else(|| ServiceError::NotFound("Company not found".to_string()))?;

        company.delete(db).await.map_err(|e| {
            error!(error = %e, company_id, "Failed to delete company");
            ServiceError::DatabaseError(e)
        })?;

        info!(company_id, "Company deleted successfully");

        if let Some(event_sender) = &self.event_sender {
            if let Err(e) = event_sender.send(Event::CompanyDeleted(company_id)).await {
                warn!(error = %e, company_id, "Failed to send company deleted event");
            }
        }

        Ok(CompanyDeleteResponse {
            message: "Company deleted successfully".to_string(),
        })
    }

    fn model_to_response(company: company::Model) -> CompanyResponse {
        CompanyResponse {
            company_id: company.company_id,
            company_code: company.company_code,
            company_name: company.company_name,
            company_taxnum: company.company_taxnum,
            company_address: company.company_address,
            company_tel: company.company_tel,
            company_fax: company.company_fax,
            company_email: company.company_email,
            company_contact: company.company_contact,
            ic_type: company.ic_type,
            compcode: company.compcode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_window_covers_25_records_in_pages_of_10() {
        let first = page_window(1, 10, 25);
        assert_eq!((first.offset, first.record_start, first.record_end), (0, 1, 10));

        let second = page_window(2, 10, 25);
        assert_eq!((second.offset, second.record_start, second.record_end), (10, 11, 20));

        let third = page_window(3, 10, 25);
        assert_eq!((third.offset, third.record_start, third.record_end), (20, 21, 25));
        assert_eq!(third.total_page, 3);
    }

    #[test]
    fn page_window_is_empty_for_no_records() {
        let window = page_window(1, 10, 0);
        assert_eq!(window.record_start, 0);
        assert_eq!(window.record_end, 0);
        assert_eq!(window.total_page, 0);
    }

    #[test]
    fn page_zero_normalizes_to_first_page() {
        let window = page_window(0, 50, 120);
        assert_eq!(window.page, 1);
        assert_eq!(window.offset, 0);
        assert_eq!(window.record_start, 1);
        assert_eq!(window.record_end, 50);
    }

    #[test]
    fn zero_limit_is_clamped() {
        let window = page_window(1, 0, 5);
        assert_eq!(window.limit, 1);
        assert_eq!(window.total_page, 5);
    }

    #[test]
    fn exact_multiple_has_no_trailing_page() {
        let window = page_window(1, 10, 30);
        assert_eq!(window.total_page, 3);
    }
}
