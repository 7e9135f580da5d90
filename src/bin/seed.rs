use investhub::{config::Config, seed::seed_demo_data};
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;
use tracing::{error, info, Level};

#[tokio::main]
async fn main() {
    // Initialise tracing (INFO level)
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    if let Err(e) = run().await {
        error!(?e, "seeding failed");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let db = Database::connect(&config.database_url).await?;
    Migrator::up(&db, None).await?;

    let summary = seed_demo_data(&db).await?;
    info!(
        users = summary.users,
        startups = summary.startups,
        investments = summary.investments,
        "seed finished"
    );
    Ok(())
}
