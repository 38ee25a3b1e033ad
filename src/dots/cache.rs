use std::collections::HashMap;
use std::sync::Arc;

use crate::calendar::CalendarDate;
use crate::dots::source::{DotDays, DotSourceError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DotData {
    Loading,
    Valid(Arc<DotDays>),
    /// Fetch failed. Not retried until the host asks again.
    Invalid(String),
}

/// Identifies one fetch so a late answer can be told apart from the latest
/// request for the same year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    pub year: i32,
    generation: u64,
}

#[derive(Debug, Clone)]
struct Entry {
    generation: u64,
    data: DotData,
}

#[derive(Debug, Default)]
pub struct DotCache {
    entries: HashMap<i32, Entry>,
    next_generation: u64,
}

impl DotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `year` as loading and hands out the ticket its answer must
    /// carry. Any earlier ticket for the year stops counting.
    pub fn begin(&mut self, year: i32) -> RequestTicket {
        self.next_generation += 1;
        let generation = self.next_generation;
        self.entries.insert(
            year,
            Entry {
                generation,
                data: DotData::Loading,
            },
        );
        RequestTicket { year, generation }
    }

    /// Stores a fetch result. Returns `false` when a newer request for the
    /// same year has been started since, in which case nothing changes.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        result: Result<DotDays, DotSourceError>,
    ) -> bool {
        let Some(entry) = self.entries.get_mut(&ticket.year) else {
            return false;
        };
        if entry.generation != ticket.generation {
            tracing::debug!("Dropping superseded dot result for {}", ticket.year);
            return false;
        }

        entry.data = match result {
            Ok(dots) => DotData::Valid(Arc::new(dots)),
            Err(e) => {
                tracing::warn!("Dot source failed for {}: {}", ticket.year, e);
                DotData::Invalid(e.to_string())
            }
        };
        true
    }

    pub fn get(&self, year: i32) -> Option<&DotData> {
        self.entries.get(&year).map(|entry| &entry.data)
    }

    /// Years with no entry at all. Loading and failed years are skipped.
    pub fn needs_fetch(&self, year: i32) -> bool {
        !self.entries.contains_key(&year)
    }

    pub fn has_dot(&self, date: &CalendarDate) -> bool {
        match self.get(date.year()) {
            Some(DotData::Valid(dots)) => dots.contains(date.month(), date.day()),
            _ => false,
        }
    }

    pub fn forget(&mut self, year: i32) {
        self.entries.remove(&year);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
