// File: ./src/model/mod.rs
pub mod display;
pub mod grid;
pub mod header;
pub mod pattern;
pub mod selection;

pub use grid::{CellValue, GridCell, GridModel};
pub use header::{HeaderAction, HeaderModel};
pub use pattern::{Segment, TimePattern};
pub use selection::Selection;

use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;

/// Which of the three renderings the calendar currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumIter)]
pub enum ViewMode {
    #[default]
    Days,
    Months,
    Years,
}

impl ViewMode {
    /// Months and Years are only ever entered from Days, and always lead back to it.
    pub fn can_enter(self, target: ViewMode) -> bool {
        match (self, target) {
            (_, ViewMode::Days) => true,
            (ViewMode::Days, _) => true,
            _ => false,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::Days => write!(f, "Days"),
            ViewMode::Months => write!(f, "Months"),
            ViewMode::Years => write!(f, "Years"),
        }
    }
}

/// How the calendar header presents month and year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumIter)]
pub enum DisplayMode {
    /// One combined "Month Year" label.
    #[default]
    Default,
    /// Separate month and year labels, each opening its own picker.
    SeparateMonthYear,
    /// Separate labels, but the year can neither be navigated nor picked.
    SeparateMonthFixedYear,
}

impl DisplayMode {
    pub fn year_is_fixed(self) -> bool {
        matches!(self, DisplayMode::SeparateMonthFixedYear)
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayMode::Default => write!(f, "Default"),
            DisplayMode::SeparateMonthYear => write!(f, "Separate Month/Year"),
            DisplayMode::SeparateMonthFixedYear => write!(f, "Separate Month, Fixed Year"),
        }
    }
}
