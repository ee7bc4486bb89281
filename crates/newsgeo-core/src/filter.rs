// crates/newsgeo-core/src/filter.rs

//! # Temporal Filter
//!
//! Reduces a year's corpus to a quarter, month and/or custom week.

use crate::error::{MapError, Result};
use crate::model::ArticleRecord;
use chrono::{Datelike, NaiveDate};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Custom week bucket of a day of month.
///
/// Days 1–8 → 1, 9–15 → 2, 16–22 → 3, 23–31 → 4. Anything else is `-1`,
/// which no week selection matches.
///
/// ```rust
/// use newsgeo_core::filter::custom_week;
///
/// assert_eq!(custom_week(8), 1);
/// assert_eq!(custom_week(9), 2);
/// assert_eq!(custom_week(31), 4);
/// assert_eq!(custom_week(0), -1);
/// ```
pub fn custom_week(day: u32) -> i32 {
    match day {
        1..=8 => 1,
        9..=15 => 2,
        16..=22 => 3,
        23..=31 => 4,
        _ => -1,
    }
}

/// Quarter (1–4) of a month (1–12).
#[inline]
pub fn quarter_of(month: u32) -> u32 {
    month.div_ceil(3)
}

/// A validated time selection. The year picks the corpus; the optional parts
/// narrow it down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeWindow {
    pub year: i32,
    pub quarter: Option<u32>,
    pub month: Option<u32>,
    pub week: Option<u32>,
}

impl TimeWindow {
    /// `true` when no narrowing is requested.
    pub fn is_whole_year(&self) -> bool {
        self.quarter.is_none() && self.month.is_none() && self.week.is_none()
    }

    /// Whether a publication date passes the window.
    ///
    /// A quarter takes priority over a month; the week bucket applies on top
    /// of either.
    pub fn matches(&self, date: NaiveDate) -> bool {
        if let Some(q) = self.quarter {
            if quarter_of(date.month()) != q {
                return false;
            }
        } else if let Some(m) = self.month {
            if date.month() != m {
                return false;
            }
        }
        if let Some(w) = self.week {
            if custom_week(date.day()) != w as i32 {
                return false;
            }
        }
        true
    }

    /// Returns the articles inside the window; the input is left untouched.
    ///
    /// Records whose timestamp cannot be parsed are kept for a whole-year
    /// window and dropped otherwise.
    pub fn apply(&self, articles: &[ArticleRecord]) -> Vec<ArticleRecord> {
        if self.is_whole_year() {
            return articles.to_vec();
        }
        let mut unparsed = 0usize;
        let out: Vec<ArticleRecord> = articles
            .iter()
            .filter(|a| match a.published_on() {
                Ok(date) => self.matches(date),
                Err(_) => {
                    unparsed += 1;
                    false
                }
            })
            .cloned()
            .collect();
        if unparsed > 0 {
            warn!("{unparsed} articles dropped: unparseable publication timestamp");
        }
        debug!("time window {:?}: {} of {} articles", self, out.len(), articles.len());
        out
    }
}

/// Search form state with the selector rules of the UI.
///
/// Choosing a quarter clears month and week; choosing a month clears the
/// week. The month selector is disabled while a quarter is chosen and the
/// week selector is enabled only with a month and no quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchParams {
    year: Option<i32>,
    quarter: Option<u32>,
    month: Option<u32>,
    week: Option<u32>,
}

impl SearchParams {
    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn quarter(&self) -> Option<u32> {
        self.quarter
    }

    pub fn month(&self) -> Option<u32> {
        self.month
    }

    pub fn week(&self) -> Option<u32> {
        self.week
    }

    pub fn set_year(&mut self, year: Option<i32>) {
        self.year = year;
    }

    pub fn set_quarter(&mut self, quarter: Option<u32>) {
        self.quarter = quarter;
        self.month = None;
        self.week = None;
    }

    pub fn set_month(&mut self, month: Option<u32>) {
        self.month = month;
        self.week = None;
    }

    pub fn set_week(&mut self, week: Option<u32>) {
        self.week = week;
    }

    pub fn month_enabled(&self) -> bool {
        self.quarter.is_none()
    }

    pub fn week_enabled(&self) -> bool {
        self.quarter.is_none() && self.month.is_some()
    }

    /// Validates the form. A year is required; the other parts must be in
    /// range when the window applies them. A month under a quarter is
    /// dropped unchecked.
    pub fn to_window(&self) -> Result<TimeWindow> {
        let year = self
            .year
            .ok_or_else(|| MapError::Validation("please select a year".to_string()))?;
        check_range("quarter", self.quarter, 4)?;
        let month = match self.quarter {
            Some(_) => None,
            None => {
                check_range("month", self.month, 12)?;
                self.month
            }
        };
        check_range("week", self.week, 4)?;
        Ok(TimeWindow {
            year,
            quarter: self.quarter,
            month,
            week: self.week,
        })
    }
}

fn check_range(what: &str, value: Option<u32>, max: u32) -> Result<()> {
    match value {
        Some(v) if !(1..=max).contains(&v) => Err(MapError::Validation(format!(
            "{what} must be between 1 and {max}, got {v}"
        ))),
        _ => Ok(()),
    }
}
