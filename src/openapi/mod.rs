use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Procurement API",
        version = "1.0.0",
        description = r#"
Back-office procurement workflow API: purchase requisitions, purchase
orders, and the company/project/user reference data behind them.

Creating a purchase order marks the requisition items it covers and flips
the parent requisition to "open" once every item is covered.

## Authentication

All business endpoints require a bearer token obtained from `POST /login`:

```
Authorization: Bearer <your-jwt-token>
```
        "#
    ),
    tags(
        (name = "purchase-orders", description = "Purchase order endpoints"),
        (name = "purchase-requisitions", description = "Purchase requisition endpoints"),
        (name = "companies", description = "Company reference data"),
        (name = "projects", description = "Project reference data"),
        (name = "users", description = "Member accounts"),
        (name = "auth", description = "Token issuance")
    ),
    paths(
        // Purchase orders
        crate::handlers::purchase_orders::create_purchase_order,
        crate::handlers::purchase_orders::get_purchase_order,
        crate::handlers::purchase_orders::list_purchase_orders,

        // Purchase requisitions
        crate::handlers::purchase_requisitions::create_purchase_requisition,
        crate::handlers::purchase_requisitions::get_purchase_requisition,
        crate::handlers::purchase_requisitions::list_purchase_requisitions,
        crate::handlers::purchase_requisitions::update_purchase_requisition,
        crate::handlers::purchase_requisitions::delete_purchase_requisition,

        // Companies
        crate::handlers::companies::create_company,
        crate::handlers::companies::filter_companies,
        crate::handlers::companies::get_company,
        crate::handlers::companies::update_company,
        crate::handlers::companies::delete_company,

        // Projects
        crate::handlers::projects::create_project,
        crate::handlers::projects::get_project,
        crate::handlers::projects::list_projects,
        crate::handlers::projects::update_project,
        crate::handlers::projects::delete_project,

        // Users
        crate::handlers::users::create_user,
        crate::handlers::users::get_user,
        crate::handlers::users::list_users,
        crate::handlers::users::update_user,
        crate::handlers::users::delete_user,

        // Auth
        crate::auth::login_handler,
    ),
    components(
        schemas(
            // Purchase order types
            crate::services::purchase_orders::CreatePurchaseOrderInput,
            crate::services::purchase_orders::CreatePurchaseOrderItemInput,
            crate::services::purchase_orders::CreatePurchaseOrderResponse,
            crate::services::purchase_orders::PurchaseOrderResponse,
            crate::services::purchase_orders::PurchaseOrderItemResponse,

            // Purchase requisition types
            crate::services::purchase_requisitions::CreatePurchaseRequisitionInput,
            crate::services::purchase_requisitions::CreatePurchaseRequisitionItemInput,
            crate::services::purchase_requisitions::UpdatePurchaseRequisitionInput,
            crate::services::purchase_requisitions::PurchaseRequisitionResponse,
            crate::services::purchase_requisitions::PurchaseRequisitionItemResponse,
            crate::services::purchase_requisitions::PurchaseRequisitionSummary,
            crate::services::purchase_requisitions::PurchaseRequisitionMutationResponse,
            crate::services::purchase_requisitions::PurchaseRequisitionDeleteResponse,

            // Company types
            crate::services::companies::CreateCompanyInput,
            crate::services::companies::UpdateCompanyInput,
            crate::services::companies::CompanyResponse,
            crate::services::companies::CompanyMutationResponse,
            crate::services::companies::CompanyDeleteResponse,
            crate::services::companies::CompanyFilterRequest,
            crate::services::companies::PageFilter,
            crate::services::companies::CompanyListResponse,

            // Project types
            crate::services::projects::CreateProjectInput,
            crate::services::projects::UpdateProjectInput,
            crate::services::projects::ProjectResponse,
            crate::services::projects::ProjectMutationResponse,
            crate::services::projects::ProjectDeleteResponse,

            // User types
            crate::services::users::CreateUserInput,
            crate::services::users::UpdateUserInput,
            crate::services::users::UserResponse,
            crate::services::users::UserMutationResponse,
            crate::services::users::UserDeleteResponse,

            // Auth types
            crate::auth::LoginRequest,
            crate::auth::LoginResponse,

            // Error types
            crate::errors::ErrorResponse
        )
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "Bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_covers_the_procurement_surface() {
        let openapi = ApiDoc::openapi();
        let json = serde_json::to_string(&openapi).expect("serializes");
        assert!(json.contains("/purchase_order/"));
        assert!(json.contains("/pr/pr/"));
        assert!(json.contains("/login"));
        assert!(json.contains("Bearer"));
    }
}
