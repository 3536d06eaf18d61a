// File: ./src/time_picker.rs
//! The time picker widget state: committed time, text buffer and popup dial.
use crate::clock::Clock;
use crate::config::TimePickerConfig;
use crate::events::{EventBus, SubscriptionId};
use crate::model::pattern::{Segment, TimePattern};
use crate::popup::{Popup, PopupController};
use crate::time_text::{CommitOutcome, TextEdit, TimeTextEngine};
use chrono::{NaiveTime, Timelike};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimePickerEvent {
    TimeSelected(NaiveTime),
    /// A commit could not be parsed; the text was reset to the last good time.
    TimeCommitFailed,
    TextChanged(String),
    FormatChanged(TimePattern),
    PopupOpened,
    PopupClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialEvent {
    Changed(NaiveTime),
    Confirmed(NaiveTime),
    Dismissed,
}

fn with_segment(time: NaiveTime, segment: Segment, value: u32) -> NaiveTime {
    let updated = match segment {
        Segment::Hours => time.with_hour(value),
        Segment::Minutes => time.with_minute(value),
        Segment::Seconds => time.with_second(value),
    };
    updated.unwrap_or(time)
}

fn segment_of(time: NaiveTime, segment: Segment) -> u32 {
    match segment {
        Segment::Hours => time.hour(),
        Segment::Minutes => time.minute(),
        Segment::Seconds => time.second(),
    }
}

/// Popup controller adjusting one segment at a time.
#[derive(Debug)]
pub struct TimeDial {
    pattern: TimePattern,
    time: NaiveTime,
    events: EventBus<DialEvent>,
}

impl TimeDial {
    pub fn new(pattern: TimePattern, time: NaiveTime) -> Self {
        Self {
            pattern,
            time,
            events: EventBus::new(),
        }
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    pub fn pattern(&self) -> &TimePattern {
        &self.pattern
    }

    pub fn label(&self) -> String {
        self.pattern.format(self.time)
    }

    /// Moves a segment by `delta`, wrapping around (23 -> 0, 0 -> 59).
    pub fn step(&mut self, segment: Segment, delta: i32) -> bool {
        if !self.pattern.has(segment) || delta == 0 {
            return false;
        }
        let modulus = i64::from(segment.max_value()) + 1;
        let value = (i64::from(segment_of(self.time, segment)) + i64::from(delta)).rem_euclid(modulus);
        self.time = with_segment(self.time, segment, value as u32);
        self.events.emit(&DialEvent::Changed(self.time));
        true
    }

    /// Sets a segment, clamping to its maximum.
    pub fn set(&mut self, segment: Segment, value: u32) -> bool {
        if !self.pattern.has(segment) {
            return false;
        }
        self.time = with_segment(self.time, segment, value.min(segment.max_value()));
        self.events.emit(&DialEvent::Changed(self.time));
        true
    }

    pub fn confirm(&mut self) {
        self.events.emit(&DialEvent::Confirmed(self.time));
    }

    pub fn dismiss(&mut self) {
        self.events.emit(&DialEvent::Dismissed);
    }
}

impl PopupController for TimeDial {
    type Event = DialEvent;

    fn events(&mut self) -> &mut EventBus<DialEvent> {
        &mut self.events
    }
}

#[derive(Debug)]
pub struct TimePicker {
    engine: TimeTextEngine,
    selected_time: NaiveTime,
    text: String,
    popup: Popup<TimeDial>,
    /// Dial events queued by the popup subscription, drained after each dial call.
    inbox: Rc<RefCell<VecDeque<DialEvent>>>,
    events: EventBus<TimePickerEvent>,
}

impl TimePicker {
    pub fn new(config: &TimePickerConfig, clock: &dyn Clock) -> Self {
        let now = clock.now();
        let selected_time = now.with_nanosecond(0).unwrap_or(now);
        let text = config.format.format(selected_time);
        Self {
            engine: TimeTextEngine::new(config.format.clone()),
            selected_time,
            text,
            popup: Popup::Closed,
            inbox: Rc::new(RefCell::new(VecDeque::new())),
            events: EventBus::new(),
        }
    }

    pub fn selected_time(&self) -> NaiveTime {
        self.selected_time
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn pattern(&self) -> &TimePattern {
        self.engine.pattern()
    }

    pub fn is_popup_open(&self) -> bool {
        self.popup.is_open()
    }

    pub fn dial(&self) -> Option<&TimeDial> {
        self.popup.controller()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&TimePickerEvent) + 'static,
    {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    fn set_text(&mut self, text: String) {
        if self.text != text {
            self.text = text;
            self.events
                .emit(&TimePickerEvent::TextChanged(self.text.clone()));
        }
    }

    fn apply_time(&mut self, time: NaiveTime) {
        log::debug!("Selected time {} -> {}", self.selected_time, time);
        self.selected_time = time;
        let formatted = self.engine.pattern().format(time);
        self.set_text(formatted);
        self.events.emit(&TimePickerEvent::TimeSelected(time));
    }

    // --- Text entry ---

    /// Feeds one keystroke's worth of proposed text through the normalizer.
    pub fn input(&mut self, new_raw: &str, cursor: usize) -> TextEdit {
        let edit = self.engine.on_text_changed(new_raw, &self.text, cursor);
        self.set_text(edit.text.clone());
        edit
    }

    /// Finalizes the buffer. A failed parse restores the last committed time.
    pub fn commit(&mut self) -> CommitOutcome {
        let outcome = self.engine.on_commit(&self.text);
        match outcome {
            CommitOutcome::Parsed(time) => self.apply_time(time),
            CommitOutcome::Revert => {
                let formatted = self.engine.pattern().format(self.selected_time);
                self.set_text(formatted);
                self.events.emit(&TimePickerEvent::TimeCommitFailed);
            }
        }
        outcome
    }

    pub fn set_selected_time(&mut self, time: NaiveTime) {
        let time = time.with_nanosecond(0).unwrap_or(time);
        if time != self.selected_time {
            self.apply_time(time);
        }
    }

    /// Switches the display format. An open dial is rebuilt for the new pattern.
    pub fn set_pattern(&mut self, pattern: TimePattern) {
        if *self.engine.pattern() == pattern {
            return;
        }
        log::debug!("Time format {} -> {}", self.engine.pattern(), pattern);
        self.engine.set_pattern(pattern.clone());
        let formatted = pattern.format(self.selected_time);
        self.set_text(formatted);
        self.events.emit(&TimePickerEvent::FormatChanged(pattern));

        if self.popup.close().is_some() {
            self.inbox.borrow_mut().clear();
            self.open_dial();
        }
    }

    // --- Popup ---

    fn open_dial(&mut self) {
        let dial = TimeDial::new(self.engine.pattern().clone(), self.selected_time);
        let inbox = Rc::clone(&self.inbox);
        self.popup
            .open(dial, move |event| inbox.borrow_mut().push_back(*event));
    }

    /// Opens the dial if closed, closes it if open. Returns whether it is now open.
    pub fn toggle_popup(&mut self) -> bool {
        if self.popup.is_open() {
            self.close_popup();
            return false;
        }
        self.open_dial();
        log::debug!("Time popup opened at {}", self.selected_time);
        self.events.emit(&TimePickerEvent::PopupOpened);
        true
    }

    pub fn close_popup(&mut self) -> bool {
        if self.popup.close().is_none() {
            return false;
        }
        self.inbox.borrow_mut().clear();
        log::debug!("Time popup closed");
        self.events.emit(&TimePickerEvent::PopupClosed);
        true
    }

    fn with_dial<R>(&mut self, f: impl FnOnce(&mut TimeDial) -> R) -> Option<R> {
        let result = self.popup.controller_mut().map(f);
        self.pump();
        result
    }

    fn pump(&mut self) {
        loop {
            let next = self.inbox.borrow_mut().pop_front();
            let Some(event) = next else {
                break;
            };
            match event {
                DialEvent::Changed(time) => log::trace!("Dial moved to {}", time),
                DialEvent::Confirmed(time) => {
                    self.apply_time(time);
                    self.close_popup();
                }
                DialEvent::Dismissed => {
                    self.close_popup();
                }
            }
        }
    }

    pub fn dial_step(&mut self, segment: Segment, delta: i32) -> bool {
        self.with_dial(|dial| dial.step(segment, delta))
            .unwrap_or(false)
    }

    pub fn dial_set(&mut self, segment: Segment, value: u32) -> bool {
        self.with_dial(|dial| dial.set(segment, value))
            .unwrap_or(false)
    }

    pub fn dial_confirm(&mut self) -> bool {
        self.with_dial(TimeDial::confirm).is_some()
    }

    pub fn dial_dismiss(&mut self) -> bool {
        self.with_dial(TimeDial::dismiss).is_some()
    }

    /// Closes the popup and drops every listener.
    pub fn dispose(&mut self) -> usize {
        self.close_popup();
        self.events.clear()
    }
}

impl Drop for TimePicker {
    fn drop(&mut self) {
        self.popup.close();
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_dial_step_wraps() {
        let mut dial = TimeDial::new(TimePattern::default(), t(23, 0, 59));
        assert!(dial.step(Segment::Hours, 1));
        assert_eq!(dial.time(), t(0, 0, 59));
        assert!(dial.step(Segment::Minutes, -1));
        assert_eq!(dial.time(), t(0, 59, 59));
        assert!(dial.step(Segment::Seconds, 61));
        assert_eq!(dial.time(), t(0, 59, 0));
    }

    #[test]
    fn test_dial_ignores_segments_outside_pattern() {
        let mut dial = TimeDial::new("HH:mm".parse().unwrap(), t(10, 0, 0));
        assert!(!dial.step(Segment::Seconds, 1));
        assert!(!dial.set(Segment::Seconds, 5));
        assert!(dial.set(Segment::Minutes, 99));
        assert_eq!(dial.time(), t(10, 59, 0), "Set clamps to the segment maximum");
        assert_eq!(dial.label(), "10:59");
    }
}
