use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Startups::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Startups::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Startups::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Startups::Description).text().not_null())
                    .col(ColumnDef::new(Startups::Industry).string_len(100).not_null())
                    .col(ColumnDef::new(Startups::Founder).string_len(255).not_null())
                    .col(ColumnDef::new(Startups::FoundedDate).date().not_null())
                    .col(ColumnDef::new(Startups::ContactEmail).string_len(254).null())
                    .col(ColumnDef::new(Startups::Website).string_len(200).null())
                    .col(ColumnDef::new(Startups::ImagePath).string_len(255).null())
                    .col(
                        ColumnDef::new(Startups::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Startups::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Startups {
    Table,
    Id,
    Name,
    Description,
    Industry,
    Founder,
    FoundedDate,
    ContactEmail,
    Website,
    ImagePath,
    CreatedAt,
}
