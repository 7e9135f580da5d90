//! Evaluates query specifications against the database.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, Func, IntoColumnRef, LikeExpr, SimpleExpr};
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, DbBackend, DbErr, EntityTrait, FromQueryResult, JoinType,
    Order, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};

use super::query::{InvestmentField, InvestmentQuery, StartupField, StartupQuery};
use crate::entities::{investment, startup, user, Stage};

/// One investment with the startup name and investor username already joined in.
#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct InvestmentRow {
    pub id: i32,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub stage: Stage,
    pub equity_percentage: Decimal,
    pub startup_id: i32,
    pub startup_name: String,
    pub investor_id: i32,
    pub investor_username: String,
}

pub type StartupRow = startup::Model;

/// Runs `query` once and returns the matching investments in report order.
/// Rows with equal sort keys are ordered by id.
#[tracing::instrument(skip(db))]
pub async fn fetch_investments<C>(db: &C, query: InvestmentQuery) -> Result<Vec<InvestmentRow>, DbErr>
where
    C: ConnectionTrait,
{
    let backend = db.get_database_backend();
    let direction = order_direction(query.order.descending);
    let mut select = investment::Entity::find()
        .select_only()
        .column(investment::Column::Id)
        .column(investment::Column::Date)
        .column(investment::Column::Amount)
        .column(investment::Column::Stage)
        .column(investment::Column::EquityPercentage)
        .column(investment::Column::StartupId)
        .column_as(startup::Column::Name, "startup_name")
        .column(investment::Column::InvestorId)
        .column_as(user::Column::Username, "investor_username")
        .join(JoinType::InnerJoin, investment::Relation::Startup.def())
        .join(JoinType::InnerJoin, investment::Relation::Investor.def())
        .filter(investment_condition(backend, &query))
        .order_by(investment_sort_expr(query.order.field), direction)
        .order_by(investment::Column::Id, Order::Asc);

    if let Some(limit) = query.limit {
        select = select.limit(limit);
    }

    let rows = select.into_model::<InvestmentRow>().all(db).await?;
    tracing::debug!(count = rows.len(), "fetched investment rows");
    Ok(rows)
}

/// Runs `query` once and returns the matching startups in report order.
#[tracing::instrument(skip(db))]
pub async fn fetch_startups<C>(db: &C, query: StartupQuery) -> Result<Vec<StartupRow>, DbErr>
where
    C: ConnectionTrait,
{
    let backend = db.get_database_backend();
    let direction = order_direction(query.order.descending);
    let rows = startup::Entity::find()
        .filter(startup_condition(backend, &query))
        .order_by(startup_sort_column(query.order.field), direction)
        .order_by(startup::Column::Id, Order::Asc)
        .all(db)
        .await?;
    tracing::debug!(count = rows.len(), "fetched startup rows");
    Ok(rows)
}

/// Sum of every recorded investment amount, zero when there are none.
#[tracing::instrument(skip(db))]
pub async fn total_invested<C>(db: &C) -> Result<Decimal, DbErr>
where
    C: ConnectionTrait,
{
    let total = investment::Entity::find()
        .select_only()
        .column_as(Expr::col((investment::Entity, investment::Column::Amount)).sum(), "total")
        .into_tuple::<Option<Decimal>>()
        .one(db)
        .await?;
    Ok(total.flatten().unwrap_or_default())
}

fn investment_condition(backend: DbBackend, query: &InvestmentQuery) -> Condition {
    let mut condition = Condition::all();

    if let Some(term) = &query.search {
        condition = condition.add(
            Condition::any()
                .add(icontains(backend, (startup::Entity, startup::Column::Name), term))
                .add(icontains(backend, (user::Entity, user::Column::Username), term)),
        );
    }
    if let Some(label) = &query.stage {
        condition = match Stage::from_label(label) {
            Some(stage) => condition.add(investment::Column::Stage.eq(stage)),
            // not a stage any row can hold
            None => condition.add(Expr::val(1).eq(0)),
        };
    }
    if let Some(start) = query.start_date {
        condition = condition.add(investment::Column::Date.gte(start));
    }
    if let Some(end) = query.end_date {
        condition = condition.add(investment::Column::Date.lte(end));
    }
    if let Some(investor_id) = query.investor_id {
        condition = condition.add(investment::Column::InvestorId.eq(investor_id));
    }

    condition
}

fn startup_condition(backend: DbBackend, query: &StartupQuery) -> Condition {
    let mut condition = Condition::all();

    if let Some(term) = &query.search {
        condition = condition.add(
            Condition::any()
                .add(icontains(backend, (startup::Entity, startup::Column::Name), term))
                .add(icontains(backend, (startup::Entity, startup::Column::Founder), term))
                .add(icontains(backend, (startup::Entity, startup::Column::Industry), term)),
        );
    }
    if let Some(industry) = &query.industry {
        condition = condition.add(icontains(backend, (startup::Entity, startup::Column::Industry), industry));
    }

    condition
}

/// `lower(column) LIKE '%term%'` with the term's wildcards escaped.
fn icontains<T>(backend: DbBackend, column: T, term: &str) -> SimpleExpr
where
    T: IntoColumnRef,
{
    let pattern = format!("%{}%", escape_like(&fold_case(backend, term)));
    Expr::expr(Func::lower(column_expr(column))).like(LikeExpr::new(pattern).escape('\\'))
}

/// Lowercases `term` the way the backend's `lower()` folds the column.
/// SQLite only folds ASCII, so non-ASCII letters must be typed in their
/// stored case there.
fn fold_case(backend: DbBackend, term: &str) -> String {
    match backend {
        DbBackend::Sqlite => term.to_ascii_lowercase(),
        _ => term.to_lowercase(),
    }
}

fn column_expr<T>(column: T) -> SimpleExpr
where
    T: IntoColumnRef,
{
    SimpleExpr::Column(column.into_column_ref())
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn order_direction(descending: bool) -> Order {
    if descending {
        Order::Desc
    } else {
        Order::Asc
    }
}

fn investment_sort_expr(field: InvestmentField) -> SimpleExpr {
    match field {
        InvestmentField::Id => column_expr((investment::Entity, investment::Column::Id)),
        InvestmentField::Date => column_expr((investment::Entity, investment::Column::Date)),
        InvestmentField::Amount => column_expr((investment::Entity, investment::Column::Amount)),
        InvestmentField::Stage => column_expr((investment::Entity, investment::Column::Stage)),
        InvestmentField::EquityPercentage => {
            column_expr((investment::Entity, investment::Column::EquityPercentage))
        }
        InvestmentField::Startup => column_expr((investment::Entity, investment::Column::StartupId)),
        InvestmentField::StartupName => column_expr((startup::Entity, startup::Column::Name)),
        InvestmentField::Investor => column_expr((investment::Entity, investment::Column::InvestorId)),
        InvestmentField::InvestorUsername => column_expr((user::Entity, user::Column::Username)),
    }
}

fn startup_sort_column(field: StartupField) -> startup::Column {
    match field {
        StartupField::Id => startup::Column::Id,
        StartupField::Name => startup::Column::Name,
        StartupField::Description => startup::Column::Description,
        StartupField::Industry => startup::Column::Industry,
        StartupField::Founder => startup::Column::Founder,
        StartupField::FoundedDate => startup::Column::FoundedDate,
        StartupField::CreatedAt => startup::Column::CreatedAt,
        StartupField::ContactEmail => startup::Column::ContactEmail,
        StartupField::Website => startup::Column::Website,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_wildcards() {
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn test_fold_case_follows_backend() {
        assert_eq!(fold_case(DbBackend::Sqlite, "Ürün AI"), "Ürün ai");
        assert_eq!(fold_case(DbBackend::Postgres, "Ürün AI"), "ürün ai");
    }
}
