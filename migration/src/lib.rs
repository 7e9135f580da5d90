pub use sea_orm_migration::prelude::*;

mod m20250601_000001_create_users_table;
mod m20250601_000002_create_startups_table;
mod m20250601_000003_create_investments_table;
mod m20250601_000004_create_watchlists_table;
mod m20250601_000005_create_documents_table;
mod m20250601_000006_create_user_profiles_table;
mod m20250601_000007_create_newsletters_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_users_table::Migration),
            Box::new(m20250601_000002_create_startups_table::Migration),
            Box::new(m20250601_000003_create_investments_table::Migration),
            Box::new(m20250601_000004_create_watchlists_table::Migration),
            Box::new(m20250601_000005_create_documents_table::Migration),
            Box::new(m20250601_000006_create_user_profiles_table::Migration),
            Box::new(m20250601_000007_create_newsletters_table::Migration),
        ]
    }
}
