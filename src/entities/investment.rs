use sea_orm::entity::prelude::*;
use sea_orm::Iterable;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Funding round, stored as its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum Stage {
    #[sea_orm(string_value = "Seed")]
    Seed,
    #[sea_orm(string_value = "Series A")]
    SeriesA,
    #[sea_orm(string_value = "Series B")]
    SeriesB,
    #[sea_orm(string_value = "Series C")]
    SeriesC,
    #[sea_orm(string_value = "IPO")]
    Ipo,
}

impl Stage {
    pub const LABELS: [&'static str; 5] = ["Seed", "Series A", "Series B", "Series C", "IPO"];

    pub fn label(self) -> &'static str {
        match self {
            Stage::Seed => "Seed",
            Stage::SeriesA => "Series A",
            Stage::SeriesB => "Series B",
            Stage::SeriesC => "Series C",
            Stage::Ipo => "IPO",
        }
    }

    /// Case-insensitive lookup by label, e.g. `"series a"`.
    pub fn from_label(label: &str) -> Option<Stage> {
        Stage::iter().find(|stage| stage.label().eq_ignore_ascii_case(label.trim()))
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "investments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub investor_id: i32,
    pub startup_id: i32,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub amount: Decimal,
    pub date: Date,
    pub stage: Stage,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub equity_percentage: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::startup::Entity",
        from = "Column::StartupId",
        to = "super::startup::Column::Id",
        on_delete = "Cascade"
    )]
    Startup,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::InvestorId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Investor,
}

impl Related<super::startup::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Startup.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Investor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
