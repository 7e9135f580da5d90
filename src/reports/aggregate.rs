//! Summary statistics computed over rows that were already fetched.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::ops::AddAssign;

use super::store::{InvestmentRow, StartupRow};

pub const TOP_STARTUPS: usize = 5;
pub const TOP_INDUSTRIES: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupTotal<K, M> {
    pub key: K,
    pub value: M,
}

pub fn total_amount(rows: &[InvestmentRow]) -> Decimal {
    rows.iter().map(|row| row.amount).sum()
}

pub fn distinct_count<T, K, F>(records: &[T], key: F) -> usize
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    records.iter().map(key).collect::<HashSet<_>>().len()
}

/// Folds `metric` per group and returns the `n` largest groups.
///
/// Groups with equal totals keep the order in which they first appear in
/// `records`, so the result follows the report's own ordering.
pub fn top_n_by_group<T, K, M, G, F>(records: &[T], group: G, metric: F, n: usize) -> Vec<GroupTotal<K, M>>
where
    K: Eq + Hash + Clone,
    M: Ord + AddAssign,
    G: Fn(&T) -> K,
    F: Fn(&T) -> M,
{
    let mut groups: Vec<GroupTotal<K, M>> = Vec::new();
    let mut index: HashMap<K, usize> = HashMap::new();

    for record in records {
        let key = group(record);
        let value = metric(record);
        match index.get(&key) {
            Some(&slot) => groups[slot].value += value,
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(GroupTotal { key, value });
            }
        }
    }

    // stable: ties stay in first-seen order
    groups.sort_by(|a, b| b.value.cmp(&a.value));
    groups.truncate(n);
    groups
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvestmentSummary {
    pub count: usize,
    pub total: Decimal,
    pub distinct_startups: usize,
    pub top_startups: Vec<GroupTotal<String, Decimal>>,
}

impl InvestmentSummary {
    pub fn from_rows(rows: &[InvestmentRow]) -> Self {
        Self {
            count: rows.len(),
            total: total_amount(rows),
            distinct_startups: distinct_count(rows, |row| row.startup_id),
            top_startups: top_n_by_group(rows, |row| row.startup_name.clone(), |row| row.amount, TOP_STARTUPS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StartupSummary {
    pub count: usize,
    pub distinct_industries: usize,
    pub top_industries: Vec<GroupTotal<String, usize>>,
}

impl StartupSummary {
    pub fn from_rows(rows: &[StartupRow]) -> Self {
        Self {
            count: rows.len(),
            distinct_industries: distinct_count(rows, |row| row.industry.clone()),
            top_industries: top_n_by_group(rows, |row| row.industry.clone(), |_| 1usize, TOP_INDUSTRIES),
        }
    }
}
