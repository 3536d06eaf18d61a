// File: ./src/locale.rs
// Locale tables consumed by the calendar grid builders.
use chrono::Weekday;
use serde::{Deserialize, Serialize};

const INVARIANT_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const INVARIANT_DAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Month and weekday names plus the first day of the week.
///
/// The engine never computes these itself; hosts plug in whatever locale
/// data source they use.
pub trait LocaleProvider: std::fmt::Debug {
    /// Full month names, January first.
    fn month_names(&self) -> [String; 12];

    /// Abbreviated weekday names, Sunday first.
    fn abbreviated_day_names(&self) -> [String; 7];

    fn first_day_of_week(&self) -> Weekday;

    fn month_name(&self, month: u32) -> String {
        let names = self.month_names();
        month
            .checked_sub(1)
            .and_then(|i| names.get(i as usize).cloned())
            .unwrap_or_default()
    }
}

/// English names with weeks starting on Sunday.
#[derive(Clone, Copy, Debug, Default)]
pub struct InvariantLocale;

impl LocaleProvider for InvariantLocale {
    fn month_names(&self) -> [String; 12] {
        INVARIANT_MONTHS.map(str::to_string)
    }

    fn abbreviated_day_names(&self) -> [String; 7] {
        INVARIANT_DAYS.map(str::to_string)
    }

    fn first_day_of_week(&self) -> Weekday {
        Weekday::Sun
    }
}

/// Host-provided tables, typically read from the `[locale]` config section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticLocale {
    pub month_names: [String; 12],
    pub day_names: [String; 7],
    #[serde(default = "default_first_day")]
    pub first_day_of_week: Weekday,
}

fn default_first_day() -> Weekday {
    Weekday::Sun
}

impl StaticLocale {
    pub fn new(month_names: [String; 12], day_names: [String; 7], first_day_of_week: Weekday) -> Self {
        Self {
            month_names,
            day_names,
            first_day_of_week,
        }
    }
}

impl LocaleProvider for StaticLocale {
    fn month_names(&self) -> [String; 12] {
        self.month_names.clone()
    }

    fn abbreviated_day_names(&self) -> [String; 7] {
        self.day_names.clone()
    }

    fn first_day_of_week(&self) -> Weekday {
        self.first_day_of_week
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_name_is_one_based() {
        let locale = InvariantLocale;
        assert_eq!(locale.month_name(1), "January");
        assert_eq!(locale.month_name(12), "December");
        assert_eq!(locale.month_name(0), "", "Month 0 has no name");
        assert_eq!(locale.month_name(13), "", "Month 13 has no name");
    }

    #[test]
    fn test_static_locale_from_toml() {
        let src = r#"
            month_names = ["janvier", "février", "mars", "avril", "mai", "juin",
                           "juillet", "août", "septembre", "octobre", "novembre", "décembre"]
            day_names = ["dim.", "lun.", "mar.", "mer.", "jeu.", "ven.", "sam."]
            first_day_of_week = "Mon"
        "#;
        let locale: StaticLocale = toml::from_str(src).unwrap();
        assert_eq!(locale.month_name(8), "août");
        assert_eq!(locale.abbreviated_day_names()[1], "lun.");
        assert_eq!(locale.first_day_of_week(), Weekday::Mon);
    }

    #[test]
    fn test_static_locale_rejects_short_tables() {
        let src = r#"
            month_names = ["a", "b"]
            day_names = ["1", "2", "3", "4", "5", "6", "7"]
        "#;
        assert!(
            toml::from_str::<StaticLocale>(src).is_err(),
            "A month table with 2 entries must not deserialize"
        );
    }
}
