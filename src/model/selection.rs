// File: ./src/model/selection.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Hard cap on the number of picked dates.
pub const SELECTION_CAPACITY: usize = 2;

/// What a single pick did to the selection window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOutcome {
    /// The date was already selected; the whole selection was dropped.
    Cleared,
    /// One date is selected.
    Single(NaiveDate),
    /// Two dates are selected, earlier first.
    Range(NaiveDate, NaiveDate),
}

/// Sliding buffer of at most two picked dates. A full window is kept sorted,
/// so the earlier date is the one a further pick evicts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    dates: Vec<NaiveDate>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle/accumulate policy: re-picking a selected date clears everything,
    /// otherwise the date is appended and the front entry is evicted past capacity.
    pub fn pick(&mut self, date: NaiveDate) -> PickOutcome {
        if self.dates.contains(&date) {
            self.dates.clear();
            return PickOutcome::Cleared;
        }

        self.dates.push(date);
        if self.dates.len() > SELECTION_CAPACITY {
            self.dates.remove(0);
        }
        if self.dates.len() == SELECTION_CAPACITY {
            self.dates.sort();
        }

        match self.range() {
            Some((start, end)) => PickOutcome::Range(start, end),
            None => PickOutcome::Single(date),
        }
    }

    /// Picked dates; earlier first once two are held.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn clear(&mut self) {
        self.dates.clear();
    }

    /// The single selected date, if exactly one is picked.
    pub fn single(&self) -> Option<NaiveDate> {
        match self.dates.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// The selected range as (earlier, later), if two dates are picked.
    pub fn range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match self.dates.as_slice() {
            [a, b] => Some((*a.min(b), *a.max(b))),
            _ => None,
        }
    }

    /// Exact match against a single selection.
    pub fn is_selected(&self, date: NaiveDate) -> bool {
        self.single() == Some(date)
    }

    /// Inclusive membership in a two-date range.
    pub fn is_in_range(&self, date: NaiveDate) -> bool {
        self.range()
            .is_some_and(|(start, end)| start <= date && date <= end)
    }
}
