pub use sea_orm_migration::prelude::*;

mod m20250310_000001_create_users_table;
mod m20250310_000002_create_companies_table;
mod m20250310_000003_create_projects_table;
mod m20250312_000004_create_purchase_requisition_tables;
mod m20250315_000005_create_purchase_order_tables;
mod m20250318_000006_create_sequence_counters_table;
mod m20250402_000007_add_procurement_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250310_000001_create_users_table::Migration),
            Box::new(m20250310_000002_create_companies_table::Migration),
            Box::new(m20250310_000003_create_projects_table::Migration),
            Box::new(m20250312_000004_create_purchase_requisition_tables::Migration),
            Box::new(m20250315_000005_create_purchase_order_tables::Migration),
            Box::new(m20250318_000006_create_sequence_counters_table::Migration),
            Box::new(m20250402_000007_add_procurement_indexes::Migration),
        ]
    }
}
