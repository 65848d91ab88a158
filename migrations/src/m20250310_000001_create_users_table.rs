use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::MId)
                            .integer()
                            .primary_key()
                            .auto_increment()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Users::MCode).string_len(50).null())
                    .col(ColumnDef::new(Users::MFirstname).string().null())
                    .col(ColumnDef::new(Users::MLastname).string().null())
                    .col(ColumnDef::new(Users::MUser).string_len(50).null())
                    .col(ColumnDef::new(Users::MPass).text().not_null())
                    .col(
                        ColumnDef::new(Users::MEmail)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::MPosition).string().null())
                    .col(ColumnDef::new(Users::MDepartment).string().null())
                    .col(ColumnDef::new(Users::Compcode).string_len(50).null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    MId,
    MCode,
    MFirstname,
    MLastname,
    MUser,
    MPass,
    MEmail,
    MPosition,
    MDepartment,
    Compcode,
}
