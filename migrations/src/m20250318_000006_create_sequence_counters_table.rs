use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SequenceCounters::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SequenceCounters::Name)
                            .string_len(50)
                            .primary_key()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SequenceCounters::Value)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        // Seed the purchase-order counter so the first increment yields 1.
        manager
            .exec_stmt(
                Query::insert()
                    .into_table(SequenceCounters::Table)
                    .columns([SequenceCounters::Name, SequenceCounters::Value])
                    .values_panic(["purchase_order".into(), 0i64.into()])
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SequenceCounters::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum SequenceCounters {
    Table,
    Name,
    Value,
}
