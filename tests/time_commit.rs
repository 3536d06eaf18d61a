// Tests for committing typed time text: repair, strict parse and revert.
use chrono::NaiveTime;
use chronopick::time_text::{CommitOutcome, TimeTextEngine};

fn engine(pattern: &str) -> TimeTextEngine {
    TimeTextEngine::new(pattern.parse().expect("valid pattern"))
}

fn t(h: u32, m: u32, s: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, s).unwrap()
}

#[test]
fn test_lone_hour_against_three_segments_reverts() {
    // "9" is repaired to "09:00", which has one segment too few for HH:mm:ss.
    assert_eq!(engine("HH:mm:ss").on_commit("9"), CommitOutcome::Revert);
}

#[test]
fn test_lone_hour_against_two_segments_parses() {
    assert_eq!(engine("HH:mm").on_commit("9"), CommitOutcome::Parsed(t(9, 0, 0)));
    assert_eq!(engine("HH:mm").on_commit("9:5"), CommitOutcome::Parsed(t(9, 5, 0)));
}

#[test]
fn test_lone_hour_against_hours_only_pattern_reverts() {
    // The repaired "07:00" always carries minutes, which "HH" has no room for.
    let e = engine("HH");
    assert_eq!(e.on_commit("7"), CommitOutcome::Revert);
    assert_eq!(e.on_commit("07"), CommitOutcome::Revert);
}

#[test]
fn test_empty_parts_are_not_padded() {
    let e = engine("HH:mm");
    assert_eq!(e.on_commit("12:"), CommitOutcome::Revert, "'12:' has no minutes to pad");
    assert_eq!(e.on_commit(":5"), CommitOutcome::Revert, "':5' has no hour to pad");
    assert_eq!(e.on_commit("12:5"), CommitOutcome::Parsed(t(12, 5, 0)));
}

#[test]
fn test_complete_values_parse() {
    let e = engine("HH:mm:ss");
    assert_eq!(e.on_commit("09:30:15"), CommitOutcome::Parsed(t(9, 30, 15)));
    assert_eq!(e.on_commit(" 23:59:59 "), CommitOutcome::Parsed(t(23, 59, 59)));
    assert_eq!(engine("H:mm").on_commit("9:30"), CommitOutcome::Parsed(t(9, 30, 0)));
}

#[test]
fn test_incomplete_values_revert() {
    let e = engine("HH:mm:ss");
    for raw in ["", "12:30", "12:30:", "12:3:4", "24:00:00"] {
        assert_eq!(e.on_commit(raw), CommitOutcome::Revert, "'{}' should revert", raw);
    }
}

#[test]
fn test_commit_is_idempotent_on_formatted_text() {
    for pattern in ["HH:mm:ss", "HH:mm", "H:mm"] {
        let e = engine(pattern);
        let formatted = e.pattern().format(t(7, 5, 3));
        let CommitOutcome::Parsed(first) = e.on_commit(&formatted) else {
            panic!("'{}' should parse against {}", formatted, pattern);
        };
        let again = e.pattern().format(first);
        assert_eq!(again, formatted);
        assert_eq!(e.on_commit(&again), CommitOutcome::Parsed(first));
    }
}
