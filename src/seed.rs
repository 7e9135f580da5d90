//! Demo data for local runs of the reports.

use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, Set,
};

use crate::entities::{investment, newsletter, startup, user, user_profile, watchlist, Stage};

const USERS: [&str; 3] = ["alice", "bob", "alpha99"];

struct StartupSeed {
    name: &'static str,
    industry: &'static str,
    founder: &'static str,
    founded: (i32, u32, u32),
    website: Option<&'static str>,
}

const STARTUPS: [StartupSeed; 5] = [
    StartupSeed { name: "Alpha Corp", industry: "Fintech", founder: "Ada Park", founded: (2019, 3, 1), website: Some("https://alpha.example") },
    StartupSeed { name: "Beta Labs", industry: "AI", founder: "Ben Ortiz", founded: (2021, 6, 15), website: None },
    StartupSeed { name: "Gamma Health", industry: "Healthtech", founder: "Gia Moreau", founded: (2018, 11, 20), website: Some("https://gamma.example") },
    StartupSeed { name: "Delta Robotics", industry: "Robotics", founder: "Dev Rao", founded: (2020, 1, 5), website: None },
    StartupSeed { name: "Epsilon Pay", industry: "Fintech", founder: "Eli Novak", founded: (2022, 9, 9), website: None },
];

// (investor, startup, amount in cents, date, stage, equity basis points)
const INVESTMENTS: [(&str, &str, i64, (i32, u32, u32), Stage, i64); 7] = [
    ("alice", "Alpha Corp", 5_000_000, (2024, 1, 1), Stage::Seed, 250),
    ("alice", "Beta Labs", 12_500_000, (2024, 1, 31), Stage::SeriesA, 400),
    ("bob", "Alpha Corp", 7_500_000, (2024, 2, 14), Stage::SeriesA, 150),
    ("bob", "Gamma Health", 20_000_000, (2023, 12, 31), Stage::SeriesB, 500),
    ("alpha99", "Delta Robotics", 2_500_000, (2024, 3, 3), Stage::Seed, 1000),
    ("alpha99", "Epsilon Pay", 1_000_000, (2024, 2, 1), Stage::Seed, 75),
    ("alice", "Gamma Health", 50_000_000, (2024, 4, 18), Stage::SeriesC, 325),
];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub startups: usize,
    pub investments: usize,
}

/// Inserts the demo data set. Users and startups are matched by name and
/// investments are only added to an empty table, so reruns insert nothing.
#[tracing::instrument(skip(db))]
pub async fn seed_demo_data<C>(db: &C) -> Result<SeedSummary, DbErr>
where
    C: ConnectionTrait,
{
    let mut summary = SeedSummary::default();

    let mut users = Vec::with_capacity(USERS.len());
    for username in USERS {
        let existing = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(db)
            .await?;
        let model = match existing {
            Some(model) => model,
            None => {
                summary.users += 1;
                let model = user::ActiveModel {
                    username: Set(username.to_string()),
                    email: Set(Some(format!("{}@example.com", username))),
                    date_joined: Set(Utc::now()),
                    ..Default::default()
                }
                .insert(db)
                .await?;
                ensure_profile(db, model.id).await?;
                model
            }
        };
        users.push(model);
    }

    let mut startups = Vec::with_capacity(STARTUPS.len());
    for (offset, seed) in STARTUPS.iter().enumerate() {
        let existing = startup::Entity::find()
            .filter(startup::Column::Name.eq(seed.name))
            .one(db)
            .await?;
        let model = match existing {
            Some(model) => model,
            None => {
                summary.startups += 1;
                let (y, m, d) = seed.founded;
                startup::ActiveModel {
                    name: Set(seed.name.to_string()),
                    description: Set(format!("{} builds {} products.", seed.name, seed.industry)),
                    industry: Set(seed.industry.to_string()),
                    founder: Set(seed.founder.to_string()),
                    founded_date: Set(date(y, m, d)?),
                    contact_email: Set(None),
                    website: Set(seed.website.map(str::to_string)),
                    image_path: Set(None),
                    // spread creation times so the default `-created_at` order is visible
                    created_at: Set(Utc
                        .with_ymd_and_hms(2024, 1, 1 + offset as u32, 9, 0, 0)
                        .single()
                        .ok_or_else(|| DbErr::Custom("invalid seed timestamp".to_string()))?),
                    ..Default::default()
                }
                .insert(db)
                .await?
            }
        };
        startups.push(model);
    }

    if investment::Entity::find().count(db).await? == 0 {
        for (investor, startup_name, cents, (y, m, d), stage, equity_bp) in INVESTMENTS {
            let investor_id = lookup(&users, |u| u.username == investor, |u| u.id)?;
            let startup_id = lookup(&startups, |s| s.name == startup_name, |s| s.id)?;
            investment::ActiveModel {
                investor_id: Set(investor_id),
                startup_id: Set(startup_id),
                amount: Set(Decimal::new(cents, 2)),
                date: Set(date(y, m, d)?),
                stage: Set(stage),
                equity_percentage: Set(Decimal::new(equity_bp, 2)),
                ..Default::default()
            }
            .insert(db)
            .await?;
            summary.investments += 1;
        }

        // alice follows the startup she has not backed yet
        if let (Some(alice), Some(delta)) = (users.first(), startups.get(3)) {
            watchlist::ActiveModel {
                user_id: Set(alice.id),
                startup_id: Set(delta.id),
                created_at: Set(Utc::now()),
                ..Default::default()
            }
            .insert(db)
            .await?;
        }

        newsletter::ActiveModel {
            email: Set("alice@example.com".to_string()),
            subscribed_at: Set(Utc::now()),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }

    tracing::info!(?summary, "demo data seeded");
    Ok(summary)
}

/// Creates the default preferences row for a user if it is missing.
pub async fn ensure_profile<C>(db: &C, user_id: i32) -> Result<user_profile::Model, DbErr>
where
    C: ConnectionTrait,
{
    if let Some(profile) = user_profile::Entity::find()
        .filter(user_profile::Column::UserId.eq(user_id))
        .one(db)
        .await?
    {
        return Ok(profile);
    }

    let now = Utc::now();
    user_profile::ActiveModel {
        user_id: Set(user_id),
        email_investments: Set(true),
        email_startups: Set(true),
        email_market: Set(false),
        email_weekly: Set(true),
        push_watchlist: Set(true),
        push_messages: Set(true),
        language: Set("en".to_string()),
        timezone: Set("UTC".to_string()),
        currency: Set("USD".to_string()),
        date_format: Set("mdy".to_string()),
        show_charts: Set(true),
        compact_view: Set(false),
        profile_visibility: Set("public".to_string()),
        two_factor_enabled: Set(false),
        two_factor_secret: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
}

fn date(y: i32, m: u32, d: u32) -> Result<NaiveDate, DbErr> {
    NaiveDate::from_ymd_opt(y, m, d).ok_or_else(|| DbErr::Custom(format!("invalid seed date {}-{}-{}", y, m, d)))
}

fn lookup<T, P, F>(items: &[T], pred: P, id: F) -> Result<i32, DbErr>
where
    P: Fn(&T) -> bool,
    F: Fn(&T) -> i32,
{
    items
        .iter()
        .find(|item| pred(item))
        .map(id)
        .ok_or_else(|| DbErr::RecordNotFound("seed reference".to_string()))
}
