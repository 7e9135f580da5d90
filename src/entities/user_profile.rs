use sea_orm::entity::prelude::*;
use chrono::{DateTime, Utc};

/// Notification, display and security preferences, one row per user.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub user_id: i32,
    // Email notifications
    pub email_investments: bool,
    pub email_startups: bool,
    pub email_market: bool,
    pub email_weekly: bool,
    // Push notifications
    pub push_watchlist: bool,
    pub push_messages: bool,
    // Display
    pub language: String,
    pub timezone: String,
    pub currency: String,
    pub date_format: String,
    pub show_charts: bool,
    pub compact_view: bool,
    pub profile_visibility: String,
    pub two_factor_enabled: bool,
    pub two_factor_secret: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
