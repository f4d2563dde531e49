//! Left outer join over in-memory tables.
//!
//! The first table is the pivot. Every pivot row is kept, and for each other
//! table that has the join column the first matching row is appended to it.
//! When nothing matches, a sentinel row of placeholders is appended instead.
//!
//! Two quirks are kept on purpose and covered by tests:
//! - a matched row is appended whole, join column included;
//! - a sentinel row is one field narrower than its table's header.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{OhpError, OhpResult};
use crate::table::{Row, Table};

pub const DEFAULT_PLACEHOLDER: &str = "w";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinOperator {
    #[default]
    Left,
}

impl fmt::Display for JoinOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
        }
    }
}

impl std::str::FromStr for JoinOperator {
    type Err = OhpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left" => Ok(Self::Left),
            _ => Err(OhpError::UnsupportedOperator(s.to_string())),
        }
    }
}

/// How header names from different tables are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnPolicy {
    /// Same-named columns collapse into one header entry.
    #[default]
    Collapse,
    /// Every column is written as `table.column`, so nothing collapses.
    /// Only tables holding the join column appear in the header, and their
    /// sentinel rows are full width so every row lines up with it.
    Prefix,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOptions {
    pub placeholder: String,
    pub columns: ColumnPolicy,
}

impl Default for JoinOptions {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.into(),
            columns: ColumnPolicy::Collapse,
        }
    }
}

/// Strategy used to find the row of a secondary table that joins a pivot row.
pub trait RowMatcher {
    fn find<'t>(&self, table: &'t Table, key: &str, value: &str) -> Option<&'t Row>;
}

/// Linear scan returning the first row whose `key` column equals the value.
/// Later duplicates are never looked at.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyMatcher;

impl RowMatcher for GreedyMatcher {
    fn find<'t>(&self, table: &'t Table, key: &str, value: &str) -> Option<&'t Row> {
        let index = table.index_of(key)?;
        table
            .values
            .iter()
            .find(|row| row.get(index).is_some_and(|field| field == value))
    }
}

/// Row contributed by `table` for a pivot row whose join value is `value`.
///
/// Returns the first match as-is, a sentinel when nothing matches, or an
/// empty row when `table` has no `key` column at all.
pub fn greedy_match(table: &Table, key: &str, value: &str, placeholder: &str) -> Row {
    if !table.contains_key(key) {
        return Row::new();
    }
    match GreedyMatcher.find(table, key, value) {
        Some(row) => row.clone(),
        None => sentinel_row(table, placeholder),
    }
}

/// Placeholder row sized one narrower than the table header.
pub fn sentinel_row(table: &Table, placeholder: &str) -> Row {
    vec![placeholder.to_string(); table.keys.len().saturating_sub(1)]
}

fn sentinel_for(table: &Table, options: &JoinOptions) -> Row {
    match options.columns {
        ColumnPolicy::Collapse => sentinel_row(table, &options.placeholder),
        ColumnPolicy::Prefix => vec![options.placeholder.clone(); table.keys.len()],
    }
}

/// Header of the merged table joined on `key`.
pub fn joined_keys(tables: &[Table], key: &str, policy: ColumnPolicy) -> Vec<String> {
    match policy {
        ColumnPolicy::Collapse => {
            let mut seen = HashSet::new();
            tables
                .iter()
                .flat_map(|t| t.keys.iter())
                .filter(|k| seen.insert(k.as_str()))
                .cloned()
                .collect()
        }
        ColumnPolicy::Prefix => tables
            .iter()
            .enumerate()
            .filter(|(i, t)| *i == 0 || t.contains_key(key))
            .map(|(_, t)| t)
            .flat_map(|t| t.keys.iter().map(move |k| format!("{}.{k}", t.name)))
            .collect(),
    }
}

pub fn left_outer_join(tables: &[Table], key: &str, options: &JoinOptions) -> OhpResult<Table> {
    left_outer_join_with(&GreedyMatcher, tables, key, options)
}

pub fn left_outer_join_with<M: RowMatcher>(
    matcher: &M,
    tables: &[Table],
    key: &str,
    options: &JoinOptions,
) -> OhpResult<Table> {
    let (pivot, others) = match tables {
        [pivot, others @ ..] if !others.is_empty() => (pivot, others),
        _ => return Err(OhpError::InsufficientInputs { got: tables.len() }),
    };

    let keys = joined_keys(tables, key, options.columns);
    let Some(key_index) = pivot.index_of(key) else {
        return Ok(Table::new(pivot.name.clone(), keys, Vec::new()));
    };

    let others: Vec<&Table> = others.iter().filter(|t| t.contains_key(key)).collect();
    let mut rows = Vec::with_capacity(pivot.values.len());

    for row in &pivot.values {
        let join_value = row.get(key_index);
        let mut merged = row.clone();

        for table in &others {
            let found = join_value.and_then(|v| matcher.find(table, key, v));
            match found {
                Some(m) => merged.extend(m.iter().cloned()),
                None => merged.extend(sentinel_for(table, options)),
            }
        }
        rows.push(merged);
    }

    Ok(Table::new(pivot.name.clone(), keys, rows))
}
