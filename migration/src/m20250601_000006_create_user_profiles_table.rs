use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserProfiles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserProfiles::UserId).integer().not_null().unique_key())
                    // Email notifications
                    .col(ColumnDef::new(UserProfiles::EmailInvestments).boolean().not_null().default(true))
                    .col(ColumnDef::new(UserProfiles::EmailStartups).boolean().not_null().default(true))
                    .col(ColumnDef::new(UserProfiles::EmailMarket).boolean().not_null().default(false))
                    .col(ColumnDef::new(UserProfiles::EmailWeekly).boolean().not_null().default(true))
                    // Push notifications
                    .col(ColumnDef::new(UserProfiles::PushWatchlist).boolean().not_null().default(true))
                    .col(ColumnDef::new(UserProfiles::PushMessages).boolean().not_null().default(true))
                    // Display
                    .col(ColumnDef::new(UserProfiles::Language).string_len(10).not_null().default("en"))
                    .col(ColumnDef::new(UserProfiles::Timezone).string_len(50).not_null().default("UTC"))
                    .col(ColumnDef::new(UserProfiles::Currency).string_len(10).not_null().default("USD"))
                    .col(ColumnDef::new(UserProfiles::DateFormat).string_len(10).not_null().default("mdy"))
                    .col(ColumnDef::new(UserProfiles::ShowCharts).boolean().not_null().default(true))
                    .col(ColumnDef::new(UserProfiles::CompactView).boolean().not_null().default(false))
                    // Privacy and security
                    .col(ColumnDef::new(UserProfiles::ProfileVisibility).string_len(20).not_null().default("public"))
                    .col(ColumnDef::new(UserProfiles::TwoFactorEnabled).boolean().not_null().default(false))
                    .col(ColumnDef::new(UserProfiles::TwoFactorSecret).string_len(32).null())
                    .col(
                        ColumnDef::new(UserProfiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(UserProfiles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_profiles_user")
                            .from(UserProfiles::Table, UserProfiles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserProfiles::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UserProfiles {
    Table,
    Id,
    UserId,
    EmailInvestments,
    EmailStartups,
    EmailMarket,
    EmailWeekly,
    PushWatchlist,
    PushMessages,
    Language,
    Timezone,
    Currency,
    DateFormat,
    ShowCharts,
    CompactView,
    ProfileVisibility,
    TwoFactorEnabled,
    TwoFactorSecret,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
