// File: ./src/calendar.rs
//! Calendar navigation, view-mode and range-selection engine.
//!
//! The engine owns one [`CalendarState`] and is the only thing allowed to
//! mutate it. Every applied transition is followed by a
//! [`CalendarEvent::ModelChanged`] notification; hosts react by calling
//! [`CalendarEngine::build_grid`] and redrawing. Out-of-range navigation and
//! paging are silent no-ops that report `false`.
use crate::clock::Clock;
use crate::config::CalendarConfig;
use crate::events::{EventBus, SubscriptionId};
use crate::locale::LocaleProvider;
use crate::model::grid::{self, CellValue, GridModel, YEARS_PER_PAGE};
use crate::model::header::{self, HeaderAction, HeaderInput, HeaderModel};
use crate::model::selection::PickOutcome;
use crate::model::{DisplayMode, Selection, ViewMode};
use anyhow::{Result, anyhow};
use chrono::{Datelike, Months, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarEvent {
    DaySelected(NaiveDate),
    /// Always (earlier, later).
    RangeSelected(NaiveDate, NaiveDate),
    /// State changed; the grid for the given view mode must be rebuilt.
    ModelChanged(ViewMode),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarState {
    current_date: NaiveDate,
    /// Day-of-month navigation started from; survives trips through short months.
    anchor_day: u32,
    view_mode: ViewMode,
    min_date: NaiveDate,
    max_date: NaiveDate,
    selection: Selection,
    year_page: u32,
    display_mode: DisplayMode,
}

impl CalendarState {
    pub fn current_date(&self) -> NaiveDate {
        self.current_date
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn min_date(&self) -> NaiveDate {
        self.min_date
    }

    pub fn max_date(&self) -> NaiveDate {
        self.max_date
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn year_page(&self) -> u32 {
        self.year_page
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    fn contains(&self, date: NaiveDate) -> bool {
        self.min_date <= date && date <= self.max_date
    }

    fn clamp(&self, date: NaiveDate) -> NaiveDate {
        date.clamp(self.min_date, self.max_date)
    }
}

#[derive(Debug)]
pub struct CalendarEngine {
    state: CalendarState,
    locale: Box<dyn LocaleProvider>,
    clock: Box<dyn Clock>,
    events: EventBus<CalendarEvent>,
}

fn days_in_month(date: NaiveDate) -> u32 {
    let Some(first) = date.with_day(1) else {
        return 28;
    };
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

fn initial_year_page(today: NaiveDate, min_date: NaiveDate, max_date: NaiveDate) -> u32 {
    let page = ((today.year() - min_date.year()).max(0) / YEARS_PER_PAGE) as u32;
    page.min(grid::max_year_page(min_date, max_date))
}

impl CalendarEngine {
    /// Creates an engine showing today's month in the days view.
    ///
    /// Today is clamped into the configured bounds so navigation always starts
    /// from a reachable date.
    pub fn new(
        config: &CalendarConfig,
        locale: Box<dyn LocaleProvider>,
        clock: Box<dyn Clock>,
    ) -> Result<Self> {
        config.validate()?;
        let today = clock.today();
        let current = today.clamp(config.min_date, config.max_date);

        Ok(Self {
            state: CalendarState {
                current_date: current,
                anchor_day: current.day(),
                view_mode: ViewMode::Days,
                min_date: config.min_date,
                max_date: config.max_date,
                selection: Selection::new(),
                year_page: initial_year_page(today, config.min_date, config.max_date),
                display_mode: config.display_mode,
            },
            locale,
            clock,
            events: EventBus::new(),
        })
    }

    pub fn state(&self) -> &CalendarState {
        &self.state
    }

    pub fn current_date(&self) -> NaiveDate {
        self.state.current_date
    }

    pub fn view_mode(&self) -> ViewMode {
        self.state.view_mode
    }

    pub fn selection(&self) -> &Selection {
        &self.state.selection
    }

    pub fn year_page(&self) -> u32 {
        self.state.year_page
    }

    pub fn max_year_page(&self) -> u32 {
        grid::max_year_page(self.state.min_date, self.state.max_date)
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn locale(&self) -> &dyn LocaleProvider {
        self.locale.as_ref()
    }

    // --- Subscriptions ---

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&CalendarEvent) + 'static,
    {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Releases every subscription. The engine stays usable but silent.
    pub fn dispose(&mut self) -> usize {
        self.events.clear()
    }

    fn notify(&mut self) {
        let mode = self.state.view_mode;
        self.events.emit(&CalendarEvent::ModelChanged(mode));
    }

    // --- Navigation ---

    /// Candidate date `months + 12 * years` away, keeping the anchored day
    /// where the target month is long enough.
    fn candidate(&self, months: i32, years: i32) -> Option<NaiveDate> {
        let total = years.checked_mul(12)?.checked_add(months)?;
        let first = self.state.current_date.with_day(1)?;
        let shifted = if total >= 0 {
            first.checked_add_months(Months::new(total as u32))?
        } else {
            first.checked_sub_months(Months::new(total.unsigned_abs()))?
        };
        shifted.with_day(self.state.anchor_day.min(days_in_month(shifted)))
    }

    fn reachable(&self, months: i32, years: i32) -> Option<NaiveDate> {
        self.candidate(months, years)
            .filter(|date| self.state.contains(*date))
    }

    /// Moves the anchor date; a candidate outside `[min_date, max_date]` is ignored.
    pub fn navigate(&mut self, months: i32, years: i32) -> bool {
        let Some(target) = self.reachable(months, years) else {
            log::trace!(
                "Navigation by {}m/{}y from {} is out of bounds",
                months,
                years,
                self.state.current_date
            );
            return false;
        };
        if target == self.state.current_date {
            return false;
        }
        log::debug!("Navigating {} -> {}", self.state.current_date, target);
        self.state.current_date = target;
        self.notify();
        true
    }

    /// Days is reachable from anywhere; Months and Years only from Days.
    pub fn enter_view_mode(&mut self, mode: ViewMode) -> bool {
        let from = self.state.view_mode;
        if from == mode {
            return false;
        }
        if !from.can_enter(mode) {
            log::trace!("Refusing view mode transition {} -> {}", from, mode);
            return false;
        }
        if mode == ViewMode::Years && self.state.display_mode.year_is_fixed() {
            log::trace!("Year picker is disabled in {} display mode", self.state.display_mode);
            return false;
        }
        log::debug!("View mode {} -> {}", from, mode);
        self.state.view_mode = mode;
        self.notify();
        true
    }

    pub fn pick_month(&mut self, month: u32) -> bool {
        let Some(date) = NaiveDate::from_ymd_opt(self.state.current_date.year(), month, 1) else {
            log::warn!("Ignoring invalid month {}", month);
            return false;
        };
        let date = self.state.clamp(date);
        log::debug!("Picked month {} -> {}", month, date);
        self.state.current_date = date;
        self.state.anchor_day = date.day();
        self.state.view_mode = ViewMode::Days;
        self.notify();
        true
    }

    pub fn pick_year(&mut self, year: i32) -> bool {
        if year < self.state.min_date.year() || year > self.state.max_date.year() {
            log::warn!("Ignoring year {} outside the calendar bounds", year);
            return false;
        }
        let Some(date) = NaiveDate::from_ymd_opt(year, self.state.current_date.month(), 1) else {
            log::warn!("Ignoring invalid year {}", year);
            return false;
        };
        let date = self.state.clamp(date);
        log::debug!("Picked year {} -> {}", year, date);
        self.state.current_date = date;
        self.state.anchor_day = date.day();
        self.state.view_mode = ViewMode::Days;
        self.notify();
        true
    }

    /// Updates the selection window and emits the selection events.
    ///
    /// When the pick completes a range, `RangeSelected` is emitted before
    /// `DaySelected`.
    pub fn pick_day(&mut self, date: NaiveDate) -> PickOutcome {
        let outcome = self.state.selection.pick(date);
        log::debug!("Picked day {}: {:?}", date, outcome);
        if let PickOutcome::Range(start, end) = outcome {
            self.events.emit(&CalendarEvent::RangeSelected(start, end));
        }
        self.events.emit(&CalendarEvent::DaySelected(date));
        self.notify();
        outcome
    }

    /// Moves the year window by `delta` pages; a target page out of range is ignored.
    pub fn page_years(&mut self, delta: i32) -> bool {
        let target = i64::from(self.state.year_page) + i64::from(delta);
        if delta == 0 || target < 0 || target > i64::from(self.max_year_page()) {
            log::trace!("Year page {} + {} is out of range", self.state.year_page, delta);
            return false;
        }
        self.state.year_page = target as u32;
        log::debug!("Year page -> {}", self.state.year_page);
        self.notify();
        true
    }

    pub fn clear_selection(&mut self) -> bool {
        if self.state.selection.is_empty() {
            return false;
        }
        self.state.selection.clear();
        self.notify();
        true
    }

    // --- Models ---

    /// Fresh grid for the active view mode.
    pub fn build_grid(&self) -> GridModel {
        let today = self.clock.today();
        match self.state.view_mode {
            ViewMode::Days => grid::days_grid(
                self.state.current_date,
                today,
                &self.state.selection,
                self.locale.as_ref(),
            ),
            ViewMode::Months => {
                grid::months_grid(self.state.current_date, today, self.locale.as_ref())
            }
            ViewMode::Years => grid::years_grid(
                self.state.year_page,
                self.state.min_date,
                self.state.max_date,
                today,
            ),
        }
    }

    pub fn header(&self) -> HeaderModel {
        let fixed_year = self.state.display_mode.year_is_fixed();
        let current_year = self.state.current_date.year();
        let month_step = |months: i32| {
            self.reachable(months, 0)
                .filter(|d| !fixed_year || d.year() == current_year)
        };
        let input = HeaderInput {
            display_mode: self.state.display_mode,
            view_mode: self.state.view_mode,
            current: self.state.current_date,
            previous_month: month_step(-1),
            next_month: month_step(1),
            previous_year: self.reachable(0, -1),
            next_year: self.reachable(0, 1),
        };
        header::build_header(input, self.locale.as_ref())
    }

    /// Routes a header tap; disabled actions are no-ops.
    pub fn handle_header(&mut self, action: HeaderAction) -> bool {
        if !self.header().is_enabled(action) {
            log::trace!("Header action {:?} is disabled", action);
            return false;
        }
        match action {
            HeaderAction::PreviousMonth => self.navigate(-1, 0),
            HeaderAction::NextMonth => self.navigate(1, 0),
            HeaderAction::PreviousYear => self.navigate(0, -1),
            HeaderAction::NextYear => self.navigate(0, 1),
            HeaderAction::MonthLabel | HeaderAction::MonthYearLabel => {
                self.enter_view_mode(ViewMode::Months)
            }
            HeaderAction::YearLabel => self.enter_view_mode(ViewMode::Years),
        }
    }

    /// Routes a tapped grid cell to the matching transition.
    pub fn activate(&mut self, value: &CellValue) -> bool {
        match *value {
            CellValue::Day(date) => {
                self.pick_day(date);
                true
            }
            CellValue::Month(month) => self.pick_month(month),
            CellValue::Year(year) => self.pick_year(year),
            CellValue::PageBack => self.page_years(-1),
            CellValue::PageForward => self.page_years(1),
            CellValue::Blank | CellValue::Weekday(_) => false,
        }
    }

    // --- Reconfiguration ---

    pub fn set_locale(&mut self, locale: Box<dyn LocaleProvider>) {
        self.locale = locale;
        self.notify();
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        if self.state.display_mode == mode {
            return;
        }
        self.state.display_mode = mode;
        if mode.year_is_fixed() && self.state.view_mode == ViewMode::Years {
            self.state.view_mode = ViewMode::Days;
        }
        self.notify();
    }

    /// Replaces the navigation bounds. The current date is clamped into the new
    /// range and the year page is pulled back with it.
    pub fn set_bounds(&mut self, min_date: NaiveDate, max_date: NaiveDate) -> Result<()> {
        if min_date > max_date {
            return Err(anyhow!(
                "Invalid calendar bounds: min_date {} is after max_date {}",
                min_date,
                max_date
            ));
        }
        self.state.min_date = min_date;
        self.state.max_date = max_date;
        let clamped = self.state.clamp(self.state.current_date);
        if clamped != self.state.current_date {
            log::debug!("Clamping {} into new bounds -> {}", self.state.current_date, clamped);
            self.state.current_date = clamped;
            self.state.anchor_day = clamped.day();
        }
        self.state.year_page = self.state.year_page.min(self.max_year_page());
        self.notify();
        Ok(())
    }
}

impl Drop for CalendarEngine {
    fn drop(&mut self) {
        self.events.clear();
    }
}
