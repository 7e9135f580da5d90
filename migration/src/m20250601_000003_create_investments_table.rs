use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Investments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Investments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Investments::InvestorId).integer().not_null())
                    .col(ColumnDef::new(Investments::StartupId).integer().not_null())
                    .col(ColumnDef::new(Investments::Amount).decimal_len(12, 2).not_null())
                    .col(ColumnDef::new(Investments::Date).date().not_null())
                    .col(ColumnDef::new(Investments::Stage).string_len(20).not_null())
                    .col(ColumnDef::new(Investments::EquityPercentage).decimal_len(5, 2).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_investments_investor")
                            .from(Investments::Table, Investments::InvestorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_investments_startup")
                            .from(Investments::Table, Investments::StartupId)
                            .to(Startups::Table, Startups::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // The investments report defaults to newest-first
        manager
            .create_index(
                Index::create()
                    .name("idx_investments_date")
                    .table(Investments::Table)
                    .col(Investments::Date)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Investments::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Investments {
    Table,
    Id,
    InvestorId,
    StartupId,
    Amount,
    Date,
    Stage,
    EquityPercentage,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Startups {
    Table,
    Id,
}
