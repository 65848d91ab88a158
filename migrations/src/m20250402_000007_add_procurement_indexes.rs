use sea_orm_migration::prelude::*;

use super::m20250312_000004_create_purchase_requisition_tables::{
    PurchaseRequisitionItems, PurchaseRequisitions,
};
use super::m20250315_000005_create_purchase_order_tables::{
    PurchaseOrderItems, PurchaseOrders,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Requisition lookups go through the (number, company code) business key,
        // never a foreign key; unique per company code.
        manager
            .create_index(
                Index::create()
                    .name("idx_pr_prno_compcode")
                    .table(PurchaseRequisitions::Table)
                    .col(PurchaseRequisitions::PrPrno)
                    .col(PurchaseRequisitions::Compcode)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Item rows reference their requisition by the same business key.
        manager
            .create_index(
                Index::create()
                    .name("idx_pri_ref_compcode")
                    .table(PurchaseRequisitionItems::Table)
                    .col(PurchaseRequisitionItems::PriRef)
                    .col(PurchaseRequisitionItems::Compcode)
                    .to_owned(),
            )
            .await?;

        // Backstop for the counter-assigned sequential id.
        manager
            .create_index(
                Index::create()
                    .name("idx_po_poid")
                    .table(PurchaseOrders::Table)
                    .col(PurchaseOrders::PoPoid)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_po_prno_compcode")
                    .table(PurchaseOrders::Table)
                    .col(PurchaseOrders::PoPrno)
                    .col(PurchaseOrders::Compcode)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_poi_poid")
                    .table(PurchaseOrderItems::Table)
                    .col(PurchaseOrderItems::Poid)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_poi_poid").table(PurchaseOrderItems::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_po_prno_compcode").table(PurchaseOrders::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_po_poid").table(PurchaseOrders::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_pri_ref_compcode").table(PurchaseRequisitionItems::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_pr_prno_compcode").table(PurchaseRequisitions::Table).to_owned())
            .await
    }
}
