use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PurchaseOrders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PurchaseOrders::PoId)
                            .integer()
                            .primary_key()
                            .auto_increment()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PurchaseOrders::PoPoid).big_integer().not_null())
                    .col(ColumnDef::new(PurchaseOrders::PoPono).string_len(50).null())
                    .col(ColumnDef::new(PurchaseOrders::PoPodate).date().null())
                    .col(ColumnDef::new(PurchaseOrders::PoProject).string().null())
                    .col(ColumnDef::new(PurchaseOrders::PoDepartment).string().null())
                    .col(ColumnDef::new(PurchaseOrders::PoMemid).string_len(50).null())
                    .col(ColumnDef::new(PurchaseOrders::PoPrname).string().null())
                    .col(ColumnDef::new(PurchaseOrders::PoContact).string().null())
                    .col(ColumnDef::new(PurchaseOrders::PoPrno).string_len(50).null())
                    .col(ColumnDef::new(PurchaseOrders::PoQuono).string_len(50).null())
                    .col(ColumnDef::new(PurchaseOrders::PoDeliverydate).date().null())
                    .col(ColumnDef::new(PurchaseOrders::PoPlace).string().null())
                    .col(ColumnDef::new(PurchaseOrders::PoRemark).text().null())
                    .col(ColumnDef::new(PurchaseOrders::PoVenderid).integer().null())
                    .col(ColumnDef::new(PurchaseOrders::PoVender).string().null())
                    .col(ColumnDef::new(PurchaseOrders::PoVatper).integer().null())
                    .col(
                        ColumnDef::new(PurchaseOrders::PoOpen)
                            .string_len(20)
                            .not_null()
                            .default("no"),
                    )
                    .col(
                        ColumnDef::new(PurchaseOrders::PoApprove)
                            .string_len(20)
                            .not_null()
                            .default("wait"),
                    )
                    .col(ColumnDef::new(PurchaseOrders::Compcode).string_len(50).null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PurchaseOrderItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PurchaseOrderItems::PoiId)
                            .integer()
                            .primary_key()
                            .auto_increment()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PurchaseOrderItems::Poid).integer().not_null())
                    .col(ColumnDef::new(PurchaseOrderItems::PoiRef).string_len(50).null())
                    .col(ColumnDef::new(PurchaseOrderItems::PoiMatcode).string_len(50).null())
                    .col(ColumnDef::new(PurchaseOrderItems::PoiMatname).string().null())
                    .col(ColumnDef::new(PurchaseOrderItems::PoiQty).decimal().null())
                    .col(ColumnDef::new(PurchaseOrderItems::PoiUnit).string_len(50).null())
                    .col(ColumnDef::new(PurchaseOrderItems::PoiPriceunit).decimal().null())
                    .col(ColumnDef::new(PurchaseOrderItems::PoiAmount).decimal().null())
                    .col(ColumnDef::new(PurchaseOrderItems::PoiDiscountper1).decimal().null())
                    .col(ColumnDef::new(PurchaseOrderItems::PoiDiscountper2).decimal().null())
                    .col(ColumnDef::new(PurchaseOrderItems::PoiVatper).integer().null())
                    .col(ColumnDef::new(PurchaseOrderItems::PoiNetamt).decimal().null())
                    .col(ColumnDef::new(PurchaseOrderItems::PoiRemark).text().null())
                    .col(ColumnDef::new(PurchaseOrderItems::PoiDeductStatus).string_len(20).null())
                    .col(ColumnDef::new(PurchaseOrderItems::PriId).integer().null())
                    .col(ColumnDef::new(PurchaseOrderItems::Compcode).string_len(50).null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_purchase_order_items_poid")
                            .from(PurchaseOrderItems::Table, PurchaseOrderItems::Poid)
                            .to(PurchaseOrders::Table, PurchaseOrders::PoId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PurchaseOrderItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PurchaseOrders::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PurchaseOrders {
    Table,
    PoId,
    PoPoid,
    PoPono,
    PoPodate,
    PoProject,
    PoDepartment,
    PoMemid,
    PoPrname,
    PoContact,
    PoPrno,
    PoQuono,
    PoDeliverydate,
    PoPlace,
    PoRemark,
    PoVenderid,
    PoVender,
    PoVatper,
    PoOpen,
    PoApprove,
    Compcode,
}

#[derive(DeriveIden)]
pub enum PurchaseOrderItems {
    Table,
    PoiId,
    Poid,
    PoiRef,
    PoiMatcode,
    PoiMatname,
    PoiQty,
    PoiUnit,
    PoiPriceunit,
    PoiAmount,
    PoiDiscountper1,
    PoiDiscountper2,
    PoiVatper,
    PoiNetamt,
    PoiRemark,
    PoiDeductStatus,
    PriId,
    Compcode,
}
