use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calendar::CalendarDate;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DotSourceError {
    #[error("Dot source unavailable: {0}")]
    Unavailable(String),
    #[error("Dot source returned invalid data for {year}: {reason}")]
    InvalidData { year: i32, reason: String },
}

/// Decorated days of one year, keyed by 1-based month.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DotDays {
    days_by_month: BTreeMap<u32, BTreeSet<u32>>,
}

impl DotDays {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, month: u32, day: u32) {
        self.days_by_month.entry(month).or_default().insert(day);
    }

    pub fn contains(&self, month: u32, day: u32) -> bool {
        self.days_by_month
            .get(&month)
            .is_some_and(|days| days.contains(&day))
    }

    pub fn is_empty(&self) -> bool {
        self.days_by_month.values().all(BTreeSet::is_empty)
    }

    pub fn len(&self) -> usize {
        self.days_by_month.values().map(BTreeSet::len).sum()
    }
}

impl FromIterator<(u32, u32)> for DotDays {
    fn from_iter<I: IntoIterator<Item = (u32, u32)>>(iter: I) -> Self {
        let mut dots = Self::new();
        for (month, day) in iter {
            dots.insert(month, day);
        }
        dots
    }
}

/// Host-provided lookup of decorated days, one year at a time.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DotSource: Send + Sync {
    async fn fetch_year(&self, year: i32) -> Result<DotDays, DotSourceError>;
}

/// In-memory source backed by a fixed list of dates.
#[derive(Debug, Clone, Default)]
pub struct StaticDotSource {
    dates: Vec<CalendarDate>,
}

impl StaticDotSource {
    pub fn new(dates: impl IntoIterator<Item = CalendarDate>) -> Self {
        Self {
            dates: dates.into_iter().collect(),
        }
    }
}

#[async_trait]
impl DotSource for StaticDotSource {
    async fn fetch_year(&self, year: i32) -> Result<DotDays, DotSourceError> {
        let dots: DotDays = self
            .dates
            .iter()
            .filter(|date| date.year() == year)
            .map(|date| (date.month(), date.day()))
            .collect();
        tracing::debug!("Static dot source has {} days for {}", dots.len(), year);
        Ok(dots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> CalendarDate {
        CalendarDate::new(year, month, day).unwrap()
    }

    #[test]
    fn dot_days_group_by_month() {
        let dots: DotDays = [(1, 5), (1, 9), (3, 2), (1, 5)].into_iter().collect();

        assert!(dots.contains(1, 5));
        assert!(dots.contains(3, 2));
        assert!(!dots.contains(2, 5));
        assert_eq!(dots.len(), 3);
    }

    #[test]
    fn empty_dot_days() {
        assert!(DotDays::new().is_empty());
    }

    #[tokio::test]
    async fn static_source_filters_by_year() {
        let source = StaticDotSource::new([
            date(2023, 12, 31),
            date(2024, 1, 5),
            date(2024, 7, 4),
        ]);

        let dots = source.fetch_year(2024).await.unwrap();

        assert_eq!(dots.len(), 2);
        assert!(dots.contains(1, 5));
        assert!(dots.contains(7, 4));
        assert!(!dots.contains(12, 31));
    }
}
