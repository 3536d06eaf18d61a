// Tests for loading and saving the TOML configuration through an app context.
use chrono::{NaiveDate, Weekday};
use chronopick::calendar::CalendarEngine;
use chronopick::clock::FixedClock;
use chronopick::config::{CalendarConfig, Config};
use chronopick::context::{AppContext, TestContext};
use chronopick::locale::LocaleProvider;
use chronopick::model::DisplayMode;

const SAMPLE: &str = r#"
log_level = "debug"

[calendar]
min_date = "2000-01-01"
max_date = "2030-12-31"
display_mode = "SeparateMonthFixedYear"

[time_picker]
format = "HH:mm"

[locale]
month_names = ["janvier", "février", "mars", "avril", "mai", "juin",
               "juillet", "août", "septembre", "octobre", "novembre", "décembre"]
day_names = ["dim.", "lun.", "mar.", "mer.", "jeu.", "ven.", "sam."]
first_day_of_week = "Mon"
"#;

#[test]
fn test_missing_file_is_detected() {
    let ctx = TestContext::new();
    let err = Config::load(&ctx).unwrap_err();
    assert!(Config::is_missing_config_error(&err), "Unexpected error: {}", err);
}

#[test]
fn test_save_then_load() {
    let ctx = TestContext::new();
    let config = Config::from_toml_str(SAMPLE).unwrap();
    config.save(&ctx).unwrap();

    let path = ctx.get_config_file_path().unwrap();
    assert!(path.exists());
    assert_eq!(Config::get_path_string(&ctx).unwrap(), path.to_string_lossy());

    let loaded = Config::load(&ctx).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.calendar.display_mode, DisplayMode::SeparateMonthFixedYear);
    assert_eq!(loaded.time_picker.format.as_str(), "HH:mm");
    assert_eq!(loaded.log_level_filter().unwrap(), log::LevelFilter::Debug);
}

#[test]
fn test_locale_section_drives_the_grid() {
    let config = Config::from_toml_str(SAMPLE).unwrap();
    let locale = config.locale_provider();
    assert_eq!(locale.first_day_of_week(), Weekday::Mon);

    let cal = CalendarEngine::new(
        &config.calendar,
        locale,
        Box::new(FixedClock::on(NaiveDate::from_ymd_opt(2024, 8, 1).unwrap())),
    )
    .unwrap();
    assert_eq!(cal.header().month_label, "août");
    assert_eq!(cal.build_grid().rows[0][0].label, "lun.");
}

#[test]
fn test_partial_file_falls_back_to_defaults() {
    let ctx = TestContext::new();
    let path = ctx.get_config_file_path().unwrap();
    std::fs::write(&path, "[time_picker]\nformat = \"H:mm\"\n").unwrap();

    let loaded = Config::load(&ctx).unwrap();
    assert_eq!(loaded.calendar, CalendarConfig::default());
    assert_eq!(loaded.log_level, "info");
    assert!(loaded.locale.is_none());
}

#[test]
fn test_invalid_file_reports_path() {
    let ctx = TestContext::new();
    let path = ctx.get_config_file_path().unwrap();
    std::fs::write(&path, "log_level = \"loud\"\n").unwrap();

    let err = Config::load(&ctx).unwrap_err();
    assert!(!Config::is_missing_config_error(&err));
    assert!(err.to_string().contains("config.toml"), "{}", err);
}
