// File: ./src/model/grid.rs
//! Renderable grid models for the three calendar view modes.
//!
//! A [`GridModel`] is derived data: it is rebuilt from the calendar state on
//! every request and never patched in place.
use crate::locale::LocaleProvider;
use crate::model::{Selection, ViewMode};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

pub const DAYS_ROWS: usize = 7;
pub const DAYS_COLUMNS: usize = 7;
pub const MONTHS_ROWS: usize = 4;
pub const MONTHS_COLUMNS: usize = 3;
pub const YEARS_ROWS: usize = 5;
pub const YEARS_COLUMNS: usize = 3;
pub const YEARS_PER_PAGE: i32 = 12;

const WEEKDAYS_FROM_SUNDAY: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Blank,
    /// Column header in the days view.
    Weekday(Weekday),
    Day(NaiveDate),
    /// 1-based month index.
    Month(u32),
    Year(i32),
    PageBack,
    PageForward,
}

impl CellValue {
    pub fn is_nav_control(&self) -> bool {
        matches!(self, CellValue::PageBack | CellValue::PageForward)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridCell {
    pub label: String,
    pub value: CellValue,
    pub is_today: bool,
    pub is_selected: bool,
    pub is_in_range: bool,
    pub is_nav_control: bool,
    /// Only navigation cells can be disabled.
    pub is_enabled: bool,
}

impl GridCell {
    fn new(label: impl Into<String>, value: CellValue) -> Self {
        Self {
            label: label.into(),
            value,
            is_today: false,
            is_selected: false,
            is_in_range: false,
            is_nav_control: value.is_nav_control(),
            is_enabled: true,
        }
    }

    fn blank() -> Self {
        Self::new(String::new(), CellValue::Blank)
    }

    pub fn is_blank(&self) -> bool {
        self.value == CellValue::Blank
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridModel {
    pub mode: ViewMode,
    pub columns: usize,
    pub rows: Vec<Vec<GridCell>>,
}

impl GridModel {
    fn from_cells(mode: ViewMode, columns: usize, cells: Vec<GridCell>) -> Self {
        let rows = cells.chunks(columns).map(|row| row.to_vec()).collect();
        Self {
            mode,
            columns,
            rows,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&GridCell> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Every cell with its (row, column) position, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &GridCell)> {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(r, row)| row.iter().enumerate().map(move |(c, cell)| (r, c, cell)))
    }

    pub fn position_of(&self, value: &CellValue) -> Option<(usize, usize)> {
        self.cells()
            .find(|(_, _, cell)| cell.value == *value)
            .map(|(r, c, _)| (r, c))
    }

    /// Position of the first populated day cell in a days grid.
    pub fn first_day_position(&self) -> Option<(usize, usize)> {
        self.cells()
            .find(|(_, _, cell)| matches!(cell.value, CellValue::Day(_)))
            .map(|(r, c, _)| (r, c))
    }

    pub fn days(&self) -> Vec<NaiveDate> {
        self.cells()
            .filter_map(|(_, _, cell)| match cell.value {
                CellValue::Day(d) => Some(d),
                _ => None,
            })
            .collect()
    }

    pub fn years(&self) -> Vec<i32> {
        self.cells()
            .filter_map(|(_, _, cell)| match cell.value {
                CellValue::Year(y) => Some(y),
                _ => None,
            })
            .collect()
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Weekday headers rotated to the locale's first day, then one cell per day.
///
/// The first of the month always lands in the Monday-indexed column
/// `(weekday + 6) % 7`, independent of the header rotation.
pub fn days_grid(
    anchor: NaiveDate,
    today: NaiveDate,
    selection: &Selection,
    locale: &dyn LocaleProvider,
) -> GridModel {
    let names = locale.abbreviated_day_names();
    let first_dow = locale.first_day_of_week().num_days_from_sunday() as usize;

    let mut cells = Vec::with_capacity(DAYS_ROWS * DAYS_COLUMNS);
    for i in 0..DAYS_COLUMNS {
        let day_index = (i + first_dow) % 7;
        cells.push(GridCell::new(
            names[day_index].clone(),
            CellValue::Weekday(WEEKDAYS_FROM_SUNDAY[day_index]),
        ));
    }

    let first = first_of_month(anchor);
    let offset = first.weekday().num_days_from_monday() as usize;
    cells.extend(std::iter::repeat_with(GridCell::blank).take(offset));

    for date in first.iter_days().take_while(|d| d.month() == first.month()) {
        let mut cell = GridCell::new(date.day().to_string(), CellValue::Day(date));
        cell.is_today = date == today;
        cell.is_selected = selection.is_selected(date);
        cell.is_in_range = selection.is_in_range(date);
        cells.push(cell);
    }

    cells.resize_with(DAYS_ROWS * DAYS_COLUMNS, GridCell::blank);
    GridModel::from_cells(ViewMode::Days, DAYS_COLUMNS, cells)
}

/// The 12 localized month names, row-major in a 4x3 grid.
pub fn months_grid(anchor: NaiveDate, today: NaiveDate, locale: &dyn LocaleProvider) -> GridModel {
    let cells = locale
        .month_names()
        .into_iter()
        .zip(1u32..)
        .map(|(name, month)| {
            let mut cell = GridCell::new(name, CellValue::Month(month));
            cell.is_today = anchor.year() == today.year() && month == today.month();
            cell
        })
        .collect();
    GridModel::from_cells(ViewMode::Months, MONTHS_COLUMNS, cells)
}

/// Highest page index whose first year is still within bounds.
pub fn max_year_page(min_date: NaiveDate, max_date: NaiveDate) -> u32 {
    ((max_date.year() - min_date.year()).max(0) / YEARS_PER_PAGE) as u32
}

pub fn year_page_start(page: u32, min_date: NaiveDate) -> i32 {
    min_date.year() + page as i32 * YEARS_PER_PAGE
}

/// Up to 12 years starting at the page's first year, then a navigation row.
pub fn years_grid(
    page: u32,
    min_date: NaiveDate,
    max_date: NaiveDate,
    today: NaiveDate,
) -> GridModel {
    let start = year_page_start(page, min_date);
    let mut cells: Vec<GridCell> = (start..start + YEARS_PER_PAGE)
        .map(|year| {
            if year > max_date.year() {
                return GridCell::blank();
            }
            let mut cell = GridCell::new(year.to_string(), CellValue::Year(year));
            cell.is_today = year == today.year();
            cell
        })
        .collect();

    let mut back = GridCell::new("<", CellValue::PageBack);
    back.is_enabled = page > 0;
    let mut forward = GridCell::new(">", CellValue::PageForward);
    forward.is_enabled = page < max_year_page(min_date, max_date);

    cells.push(back);
    cells.extend(std::iter::repeat_with(GridCell::blank).take(YEARS_COLUMNS - 2));
    cells.push(forward);

    GridModel::from_cells(ViewMode::Years, YEARS_COLUMNS, cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::InvariantLocale;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_grid_is_always_7_by_7() {
        // February 2021 starts on a Monday and fits in 4 rows, May 2021 needs 6.
        for anchor in [date(2021, 2, 1), date(2021, 5, 1)] {
            let grid = days_grid(anchor, anchor, &Selection::new(), &InvariantLocale);
            assert_eq!(grid.row_count(), DAYS_ROWS);
            assert!(grid.rows.iter().all(|r| r.len() == DAYS_COLUMNS));
        }
    }

    #[test]
    fn test_month_with_31_days_starting_sunday_uses_last_row() {
        // August 2021: Sunday the 1st, 31 days -> offset 6, 37 day slots.
        let grid = days_grid(date(2021, 8, 15), date(2000, 1, 1), &Selection::new(), &InvariantLocale);
        assert_eq!(grid.first_day_position(), Some((1, 6)));
        assert_eq!(grid.position_of(&CellValue::Day(date(2021, 8, 31))), Some((6, 1)));
    }

    #[test]
    fn test_years_grid_nav_row_layout() {
        let grid = years_grid(0, date(1900, 1, 1), date(2100, 12, 31), date(2024, 1, 1));
        assert_eq!(grid.row_count(), YEARS_ROWS);
        let back = grid.cell(4, 0).unwrap();
        let forward = grid.cell(4, YEARS_COLUMNS - 1).unwrap();
        assert_eq!(back.value, CellValue::PageBack);
        assert!(!back.is_enabled, "Page 0 cannot go back");
        assert_eq!(forward.value, CellValue::PageForward);
        assert!(forward.is_enabled);
        assert!(grid.cell(4, 1).unwrap().is_blank());
    }

    #[test]
    fn test_max_year_page() {
        assert_eq!(max_year_page(date(1900, 1, 1), date(2100, 12, 31)), 16);
        assert_eq!(max_year_page(date(2000, 1, 1), date(2011, 1, 1)), 0);
        assert_eq!(max_year_page(date(2000, 1, 1), date(2012, 1, 1)), 1);
    }
}
