//! Log filtering
//!
//! A log is a user's exercises narrowed by an inclusive date range and then
//! truncated to the first `limit` entries in store order.

use chrono::NaiveDate;
use tracker_types::{Exercise, LogQuery};

use crate::{validation, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub limit: Option<usize>,
}

impl LogFilter {
    /// Build a filter from raw query parameters.
    ///
    /// Malformed `from`/`to` dates are rejected. A `limit` that is not a
    /// positive integer is ignored.
    pub fn from_query(query: &LogQuery) -> Result<Self> {
        Ok(Self {
            from: validation::optional_date("from", query.from.as_deref())?,
            to: validation::optional_date("to", query.to.as_deref())?,
            limit: query
                .limit
                .as_deref()
                .and_then(|raw| raw.trim().parse::<usize>().ok())
                .filter(|limit| *limit > 0),
        })
    }

    pub fn matches(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }

    /// Apply the date range, then the limit
    pub fn apply(&self, exercises: Vec<Exercise>) -> Vec<Exercise> {
        let in_range = exercises.into_iter().filter(|e| self.matches(e.date));
        match self.limit {
            Some(limit) => in_range.take(limit).collect(),
            None => in_range.collect(),
        }
    }
}
