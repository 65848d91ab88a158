// Procurement workflow
pub mod purchase_orders;
pub mod purchase_requisitions;

// Reference data
pub mod companies;
pub mod projects;
pub mod users;
