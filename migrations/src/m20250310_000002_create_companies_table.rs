use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Companies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Companies::CompanyId)
                            .integer()
                            .primary_key()
                            .auto_increment()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Companies::CompanyCode).string_len(50).null())
                    .col(ColumnDef::new(Companies::CompanyName).string().not_null())
                    .col(ColumnDef::new(Companies::CompanyTaxnum).string_len(50).null())
                    .col(ColumnDef::new(Companies::CompanyAddress).text().null())
                    .col(ColumnDef::new(Companies::CompanyTel).string_len(50).null())
                    .col(ColumnDef::new(Companies::CompanyFax).string_len(50).null())
                    .col(ColumnDef::new(Companies::CompanyEmail).string().null())
                    .col(ColumnDef::new(Companies::CompanyContact).string().null())
                    .col(ColumnDef::new(Companies::IcType).string_len(20).null())
                    .col(ColumnDef::new(Companies::Compcode).string_len(50).null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Companies::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Companies {
    Table,
    CompanyId,
    CompanyCode,
    CompanyName,
    CompanyTaxnum,
    CompanyAddress,
    CompanyTel,
    CompanyFax,
    CompanyEmail,
    CompanyContact,
    IcType,
    Compcode,
}
