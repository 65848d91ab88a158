use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PurchaseRequisitions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PurchaseRequisitions::PrId)
                            .integer()
                            .primary_key()
                            .auto_increment()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PurchaseRequisitions::PrPrno).string_len(50).not_null())
                    .col(ColumnDef::new(PurchaseRequisitions::PrPrdate).date().null())
                    .col(ColumnDef::new(PurchaseRequisitions::PrMemid).string_len(50).null())
                    .col(ColumnDef::new(PurchaseRequisitions::PrReqname).string().null())
                    .col(ColumnDef::new(PurchaseRequisitions::PrProject).string().null())
                    .col(ColumnDef::new(PurchaseRequisitions::PrDepartment).string().null())
                    .col(ColumnDef::new(PurchaseRequisitions::PrVender).string().null())
                    .col(ColumnDef::new(PurchaseRequisitions::PrRemark).text().null())
                    .col(ColumnDef::new(PurchaseRequisitions::PeApprove).string_len(20).null())
                    .col(ColumnDef::new(PurchaseRequisitions::PmApprove).string_len(20).null())
                    .col(ColumnDef::new(PurchaseRequisitions::DirectorApprove).string_len(20).null())
                    .col(
                        ColumnDef::new(PurchaseRequisitions::PoOpen)
                            .string_len(20)
                            .not_null()
                            .default("no"),
                    )
                    .col(ColumnDef::new(PurchaseRequisitions::Compcode).string_len(50).null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PurchaseRequisitionItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PurchaseRequisitionItems::PriId)
                            .integer()
                            .primary_key()
                            .auto_increment()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PurchaseRequisitionItems::PriRef).string_len(50).not_null())
                    .col(ColumnDef::new(PurchaseRequisitionItems::PriMatcode).string_len(50).null())
                    .col(ColumnDef::new(PurchaseRequisitionItems::PriMatname).string().null())
                    .col(ColumnDef::new(PurchaseRequisitionItems::PriQty).decimal().null())
                    .col(ColumnDef::new(PurchaseRequisitionItems::PriUnit).string_len(50).null())
                    .col(ColumnDef::new(PurchaseRequisitionItems::PriPriceunit).decimal().null())
                    .col(ColumnDef::new(PurchaseRequisitionItems::PriAmount).decimal().null())
                    .col(ColumnDef::new(PurchaseRequisitionItems::PriDiscountper1).decimal().null())
                    .col(ColumnDef::new(PurchaseRequisitionItems::PriDiscountper2).decimal().null())
                    .col(ColumnDef::new(PurchaseRequisitionItems::PriDiscountamt).decimal().null())
                    .col(ColumnDef::new(PurchaseRequisitionItems::PriSumamt).decimal().null())
                    .col(
                        ColumnDef::new(PurchaseRequisitionItems::PriStatus)
                            .string_len(20)
                            .not_null()
                            .default("no"),
                    )
                    .col(ColumnDef::new(PurchaseRequisitionItems::PriProject).string().null())
                    .col(ColumnDef::new(PurchaseRequisitionItems::Compcode).string_len(50).null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PurchaseRequisitionItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PurchaseRequisitions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PurchaseRequisitions {
    Table,
    PrId,
    PrPrno,
    PrPrdate,
    PrMemid,
    PrReqname,
    PrProject,
    PrDepartment,
    PrVender,
    PrRemark,
    PeApprove,
    PmApprove,
    DirectorApprove,
    PoOpen,
    Compcode,
}

#[derive(DeriveIden)]
pub enum PurchaseRequisitionItems {
    Table,
    PriId,
    PriRef,
    PriMatcode,
    PriMatname,
    PriQty,
    PriUnit,
    PriPriceunit,
    PriAmount,
    PriDiscountper1,
    PriDiscountper2,
    PriDiscountamt,
    PriSumamt,
    PriStatus,
    PriProject,
    Compcode,
}
