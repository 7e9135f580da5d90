#![allow(dead_code)]

use chrono::{NaiveDate, TimeZone, Utc};
use investhub::entities::{investment, startup, user, Stage};
use migration::{Migrator, MigratorTrait};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use std::sync::Once;

static TRACING: Once = Once::new();

pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("investhub=debug")
            .with_test_writer()
            .try_init();
    });
}

/// A fresh, migrated in-memory database. One pooled connection keeps every
/// query on the same SQLite memory instance.
pub async fn test_db() -> DatabaseConnection {
    init_tracing();
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub async fn add_user(db: &DatabaseConnection, username: &str) -> user::Model {
    user::ActiveModel {
        username: Set(username.to_string()),
        email: Set(None),
        date_joined: Set(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

/// Inserts a startup; `created_day` spreads creation times across January 2024.
pub async fn add_startup(
    db: &DatabaseConnection,
    name: &str,
    founder: &str,
    industry: &str,
    created_day: u32,
) -> startup::Model {
    startup::ActiveModel {
        name: Set(name.to_string()),
        description: Set(format!("{} description", name)),
        industry: Set(industry.to_string()),
        founder: Set(founder.to_string()),
        founded_date: Set(ymd(2020, 1, created_day)),
        contact_email: Set(None),
        website: Set(None),
        image_path: Set(None),
        created_at: Set(Utc.with_ymd_and_hms(2024, 1, created_day, 12, 0, 0).unwrap()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

/// Inserts an investment; `amount` is whole currency units.
pub async fn add_investment(
    db: &DatabaseConnection,
    investor: &user::Model,
    startup: &startup::Model,
    amount: i64,
    date: NaiveDate,
    stage: Stage,
) -> investment::Model {
    investment::ActiveModel {
        investor_id: Set(investor.id),
        startup_id: Set(startup.id),
        amount: Set(Decimal::from(amount)),
        date: Set(date),
        stage: Set(stage),
        equity_percentage: Set(Decimal::new(250, 2)),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

/// Two investors and three startups:
///
/// | investor | startup    | amount | date       | stage    |
/// |----------|------------|--------|------------|----------|
/// | dana     | Alpha Corp | 100    | 2024-01-01 | Seed     |
/// | dana     | Beta Labs  | 300    | 2024-01-31 | Series A |
/// | alpha99  | Gamma Bio  | 200    | 2023-12-31 | Series B |
/// | alpha99  | Beta Labs  | 50     | 2024-02-01 | Seed     |
pub async fn seed_reports(db: &DatabaseConnection) {
    let dana = add_user(db, "dana").await;
    let alpha99 = add_user(db, "alpha99").await;

    let alpha = add_startup(db, "Alpha Corp", "Ada Park", "Fintech", 1).await;
    let beta = add_startup(db, "Beta Labs", "Ben Ortiz", "AI", 2).await;
    let gamma = add_startup(db, "Gamma Bio", "Gia Moreau", "Healthtech", 3).await;

    add_investment(db, &dana, &alpha, 100, ymd(2024, 1, 1), Stage::Seed).await;
    add_investment(db, &dana, &beta, 300, ymd(2024, 1, 31), Stage::SeriesA).await;
    add_investment(db, &alpha99, &gamma, 200, ymd(2023, 12, 31), Stage::SeriesB).await;
    add_investment(db, &alpha99, &beta, 50, ymd(2024, 2, 1), Stage::Seed).await;
}
