use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Watchlists::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Watchlists::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Watchlists::UserId).integer().not_null())
                    .col(ColumnDef::new(Watchlists::StartupId).integer().not_null())
                    .col(
                        ColumnDef::new(Watchlists::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_watchlists_user")
                            .from(Watchlists::Table, Watchlists::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_watchlists_startup")
                            .from(Watchlists::Table, Watchlists::StartupId)
                            .to(Startups::Table, Startups::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // A user watches a startup at most once
        manager
            .create_index(
                Index::create()
                    .name("idx_watchlists_user_startup")
                    .table(Watchlists::Table)
                    .col(Watchlists::UserId)
                    .col(Watchlists::StartupId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Watchlists::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Watchlists {
    Table,
    Id,
    UserId,
    StartupId,
    CreatedAt,
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
