// Tests for the time picker widget state: text entry, commit and the dial popup.
use chrono::{NaiveDate, NaiveTime};
use chronopick::clock::FixedClock;
use chronopick::config::TimePickerConfig;
use chronopick::model::{Segment, TimePattern};
use chronopick::time_picker::{TimePicker, TimePickerEvent};
use chronopick::time_text::CommitOutcome;
use std::cell::RefCell;
use std::rc::Rc;

fn t(h: u32, m: u32, s: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, s).unwrap()
}

fn setup(format: &str) -> (TimePicker, Rc<RefCell<Vec<TimePickerEvent>>>) {
    let clock = FixedClock::new(
        NaiveDate::from_ymd_opt(2024, 7, 4).unwrap(),
        NaiveTime::from_hms_milli_opt(8, 15, 42, 500).unwrap(),
    );
    let config = TimePickerConfig {
        format: format.parse().unwrap(),
    };
    let mut picker = TimePicker::new(&config, &clock);
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    picker.subscribe(move |e| {
        if !matches!(e, TimePickerEvent::TextChanged(_)) {
            sink.borrow_mut().push(e.clone());
        }
    });
    (picker, log)
}

fn type_into(picker: &mut TimePicker, keys: &str) {
    picker.input("", 0);
    for ch in keys.chars() {
        let proposed = format!("{}{}", picker.text(), ch);
        picker.input(&proposed, proposed.len());
    }
}

#[test]
fn test_initial_time_comes_from_clock_without_subseconds() {
    let (picker, _) = setup("HH:mm:ss");
    assert_eq!(picker.selected_time(), t(8, 15, 42));
    assert_eq!(picker.text(), "08:15:42");
    assert!(!picker.is_popup_open());
}

#[test]
fn test_typed_time_is_committed() {
    let (mut picker, events) = setup("HH:mm:ss");
    type_into(&mut picker, "143005");
    assert_eq!(picker.text(), "14:30:05");

    assert_eq!(picker.commit(), CommitOutcome::Parsed(t(14, 30, 5)));
    assert_eq!(picker.selected_time(), t(14, 30, 5));
    assert_eq!(*events.borrow(), vec![TimePickerEvent::TimeSelected(t(14, 30, 5))]);
}

#[test]
fn test_failed_commit_restores_last_time() {
    let (mut picker, events) = setup("HH:mm:ss");
    type_into(&mut picker, "143");
    assert_eq!(picker.text(), "14:3");

    assert_eq!(picker.commit(), CommitOutcome::Revert);
    assert_eq!(picker.text(), "08:15:42");
    assert_eq!(picker.selected_time(), t(8, 15, 42));
    assert_eq!(*events.borrow(), vec![TimePickerEvent::TimeCommitFailed]);
}

#[test]
fn test_text_changes_are_reported() {
    let (mut picker, _) = setup("HH:mm");
    let texts = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&texts);
    picker.subscribe(move |e| {
        if let TimePickerEvent::TextChanged(text) = e {
            sink.borrow_mut().push(text.clone());
        }
    });

    type_into(&mut picker, "12:");
    assert_eq!(*texts.borrow(), vec!["", "1", "12:"], "The rejected ':' changes nothing");
}

#[test]
fn test_pattern_change_reformats_buffer() {
    let (mut picker, events) = setup("HH:mm:ss");
    let pattern: TimePattern = "HH:mm".parse().unwrap();
    picker.set_pattern(pattern.clone());
    assert_eq!(picker.text(), "08:15");
    assert_eq!(*events.borrow(), vec![TimePickerEvent::FormatChanged(pattern)]);

    type_into(&mut picker, "9");
    assert_eq!(picker.commit(), CommitOutcome::Parsed(t(9, 0, 0)));
    assert_eq!(picker.text(), "09:00");
}

#[test]
fn test_dial_confirm_commits_and_closes() {
    let (mut picker, events) = setup("HH:mm:ss");
    assert!(picker.toggle_popup());
    assert!(picker.dial_step(Segment::Hours, 1));
    assert!(picker.dial_step(Segment::Minutes, -20));
    assert_eq!(picker.dial().map(|d| d.time()), Some(t(9, 55, 42)));
    assert_eq!(picker.selected_time(), t(8, 15, 42), "Not committed until confirmed");

    assert!(picker.dial_confirm());
    assert!(!picker.is_popup_open());
    assert_eq!(picker.selected_time(), t(9, 55, 42));
    assert_eq!(picker.text(), "09:55:42");
    assert_eq!(
        *events.borrow(),
        vec![
            TimePickerEvent::PopupOpened,
            TimePickerEvent::TimeSelected(t(9, 55, 42)),
            TimePickerEvent::PopupClosed,
        ]
    );
}

#[test]
fn test_dial_dismiss_keeps_time() {
    let (mut picker, events) = setup("HH:mm:ss");
    picker.toggle_popup();
    picker.dial_set(Segment::Seconds, 75);
    assert_eq!(picker.dial().map(|d| d.time()), Some(t(8, 15, 59)));

    assert!(picker.dial_dismiss());
    assert!(!picker.is_popup_open());
    assert_eq!(picker.selected_time(), t(8, 15, 42));
    assert_eq!(
        *events.borrow(),
        vec![TimePickerEvent::PopupOpened, TimePickerEvent::PopupClosed]
    );
}

#[test]
fn test_dial_calls_without_popup_do_nothing() {
    let (mut picker, events) = setup("HH:mm:ss");
    assert!(!picker.dial_step(Segment::Hours, 1));
    assert!(!picker.dial_confirm());
    assert!(!picker.dial_dismiss());
    assert!(!picker.close_popup());
    assert!(events.borrow().is_empty());
}

#[test]
fn test_toggle_opens_and_closes() {
    let (mut picker, events) = setup("HH:mm:ss");
    assert!(picker.toggle_popup());
    assert!(!picker.toggle_popup());
    assert!(picker.toggle_popup());
    assert_eq!(events.borrow().len(), 3);
}

#[test]
fn test_pattern_change_rebuilds_open_dial() {
    let (mut picker, events) = setup("HH:mm:ss");
    picker.toggle_popup();
    picker.set_pattern("HH:mm".parse().unwrap());

    assert!(picker.is_popup_open(), "Dial is replaced, not closed");
    assert_eq!(picker.dial().map(|d| d.label()), Some("08:15".to_string()));
    assert!(!picker.dial_step(Segment::Seconds, 1), "New dial has no seconds");
    assert!(
        !events.borrow().contains(&TimePickerEvent::PopupClosed),
        "Replacing the dial is silent"
    );

    assert!(picker.dial_confirm());
    assert_eq!(picker.text(), "08:15");
}

#[test]
fn test_dispose_closes_popup_and_drops_listeners() {
    let (mut picker, events) = setup("HH:mm:ss");
    picker.toggle_popup();
    assert_eq!(picker.dispose(), 1);
    assert!(!picker.is_popup_open());
    assert_eq!(events.borrow().last(), Some(&TimePickerEvent::PopupClosed));

    picker.set_selected_time(t(1, 2, 3));
    assert_eq!(picker.text(), "01:02:03");
    assert_eq!(events.borrow().len(), 2, "Nothing is heard after dispose");
}
