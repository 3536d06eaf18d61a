// File: ./src/model/header.rs
use crate::locale::LocaleProvider;
use crate::model::{DisplayMode, ViewMode};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Taps and clicks the calendar header can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeaderAction {
    PreviousMonth,
    NextMonth,
    PreviousYear,
    NextYear,
    MonthLabel,
    YearLabel,
    MonthYearLabel,
}

impl FromStr for HeaderAction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "prev-month" | "previous-month" => Ok(Self::PreviousMonth),
            "next-month" => Ok(Self::NextMonth),
            "prev-year" | "previous-year" => Ok(Self::PreviousYear),
            "next-year" => Ok(Self::NextYear),
            "month" => Ok(Self::MonthLabel),
            "year" => Ok(Self::YearLabel),
            "month-year" => Ok(Self::MonthYearLabel),
            other => Err(anyhow::anyhow!("Unknown header action '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderModel {
    pub display_mode: DisplayMode,
    pub view_mode: ViewMode,
    pub month_label: String,
    pub year_label: String,
    /// Set only in [`DisplayMode::Default`].
    pub combined_label: Option<String>,
    pub can_go_previous_month: bool,
    pub can_go_next_month: bool,
    pub can_go_previous_year: bool,
    pub can_go_next_year: bool,
}

impl HeaderModel {
    pub fn is_enabled(&self, action: HeaderAction) -> bool {
        let fixed_year = self.display_mode.year_is_fixed();
        match action {
            HeaderAction::PreviousMonth => self.can_go_previous_month,
            HeaderAction::NextMonth => self.can_go_next_month,
            HeaderAction::PreviousYear => self.can_go_previous_year,
            HeaderAction::NextYear => self.can_go_next_year,
            HeaderAction::MonthLabel => self.combined_label.is_none(),
            HeaderAction::YearLabel => self.combined_label.is_none() && !fixed_year,
            HeaderAction::MonthYearLabel => self.combined_label.is_some(),
        }
    }
}

/// Inputs the header needs besides the locale.
#[derive(Debug, Clone, Copy)]
pub struct HeaderInput {
    pub display_mode: DisplayMode,
    pub view_mode: ViewMode,
    pub current: NaiveDate,
    pub previous_month: Option<NaiveDate>,
    pub next_month: Option<NaiveDate>,
    pub previous_year: Option<NaiveDate>,
    pub next_year: Option<NaiveDate>,
}

pub fn build_header(input: HeaderInput, locale: &dyn LocaleProvider) -> HeaderModel {
    let month_label = locale.month_name(input.current.month());
    let year_label = input.current.year().to_string();
    let fixed_year = input.display_mode.year_is_fixed();
    let combined_label = match input.display_mode {
        DisplayMode::Default => Some(format!("{} {}", month_label, year_label)),
        _ => None,
    };

    HeaderModel {
        display_mode: input.display_mode,
        view_mode: input.view_mode,
        month_label,
        year_label,
        combined_label,
        can_go_previous_month: input.previous_month.is_some(),
        can_go_next_month: input.next_month.is_some(),
        can_go_previous_year: !fixed_year && input.previous_year.is_some(),
        can_go_next_year: !fixed_year && input.next_year.is_some(),
    }
}
