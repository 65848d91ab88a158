use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Projects::ProjectId)
                            .integer()
                            .primary_key()
                            .auto_increment()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Projects::ProjectCode).string_len(50).null())
                    .col(ColumnDef::new(Projects::ProjectName).string().not_null())
                    .col(ColumnDef::new(Projects::ProjectWorktype).string_len(50).null())
                    .col(ColumnDef::new(Projects::ProjectType).string_len(50).null())
                    .col(ColumnDef::new(Projects::ProjectAddress).text().null())
                    .col(ColumnDef::new(Projects::ProjectCname).string().null())
                    .col(ColumnDef::new(Projects::ProjectTel).string_len(50).null())
                    .col(ColumnDef::new(Projects::ProjectEmail).string().null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Projects {
    Table,
    ProjectId,
    ProjectCode,
    ProjectName,
    ProjectWorktype,
    ProjectType,
    ProjectAddress,
    ProjectCname,
    ProjectTel,
    ProjectEmail,
}
