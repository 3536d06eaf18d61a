// File: ./src/time_text.rs
//! Keystroke-level normalization of typed time text.
//!
//! [`TimeTextEngine`] is stateless apart from its pattern: the caller owns the
//! text buffer and hands in the previous and proposed contents on every edit.
use crate::model::pattern::{MAX_SEGMENT_DIGITS, SEPARATOR, Segment, TimePattern, Token};
use chrono::NaiveTime;
use once_cell::sync::Lazy;
use regex::Regex;

static TIME_INPUT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{0,2}:?[0-9]{0,2}:?[0-9]{0,2}$").expect("time input regex is valid")
});

/// Result of a single edit. `changed` is set when `text` differs from what the
/// host proposed, meaning the host must rewrite its field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub text: String,
    pub cursor: usize,
    pub changed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Parsed(NaiveTime),
    /// Redisplay the last committed value.
    Revert,
}

#[derive(Debug, Clone, Default)]
pub struct TimeTextEngine {
    pattern: TimePattern,
}

fn is_two_digit_pair(text: &str) -> bool {
    text.len() == 2 && text.bytes().all(|b| b.is_ascii_digit())
}

/// `DD:DD`, the point where the seconds separator gets inserted.
fn is_hours_and_minutes(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 5
        && bytes[2] == SEPARATOR as u8
        && [0, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit())
}

fn pad_digit(part: &str) -> String {
    if part.len() == 1 {
        format!("0{}", part)
    } else {
        part.to_string()
    }
}

fn clamp_part(part: &str, token: &Token) -> String {
    let Ok(value) = part.parse::<u32>() else {
        return part.to_string();
    };
    let max = token.segment.max_value();
    let over = match token.segment {
        Segment::Hours => part.len() == 2 && value > max,
        Segment::Minutes | Segment::Seconds => {
            let leading_too_big = token.width == 2 && part.len() == 1 && value > 5;
            leading_too_big || (part.len() == 2 && value > max)
        }
    };
    if over {
        log::trace!("Clamping {:?} segment '{}' to {}", token.segment, part, max);
        format!("{:02}", max)
    } else {
        part.to_string()
    }
}

impl TimeTextEngine {
    pub fn new(pattern: TimePattern) -> Self {
        Self { pattern }
    }

    pub fn pattern(&self) -> &TimePattern {
        &self.pattern
    }

    pub fn set_pattern(&mut self, pattern: TimePattern) {
        self.pattern = pattern;
    }

    fn reject(&self, new_raw: &str, old_raw: &str, cursor: usize) -> TextEdit {
        log::trace!("Rejecting time input '{}', keeping '{}'", new_raw, old_raw);
        TextEdit {
            text: old_raw.to_string(),
            cursor: cursor.min(old_raw.len()),
            changed: new_raw != old_raw,
        }
    }

    /// Normalizes a proposed buffer. Rejected input yields `old_raw` back.
    ///
    /// `cursor` is the caret position in `new_raw`, in characters.
    pub fn on_text_changed(&self, new_raw: &str, old_raw: &str, cursor: usize) -> TextEdit {
        if new_raw.trim().is_empty() {
            return TextEdit {
                text: new_raw.to_string(),
                cursor: cursor.min(new_raw.chars().count()),
                changed: false,
            };
        }

        let empty_segment = format!("{}{}", SEPARATOR, SEPARATOR);
        if !TIME_INPUT.is_match(new_raw) || new_raw.contains(&empty_segment) {
            return self.reject(new_raw, old_raw, cursor);
        }

        // Only ASCII digits and separators survive the regex.
        let mut text: String = new_raw.chars().take(self.pattern.max_len()).collect();
        if text.matches(SEPARATOR).count() >= self.pattern.segment_count()
            || text.split(SEPARATOR).any(|part| part.len() > MAX_SEGMENT_DIGITS)
        {
            return self.reject(new_raw, old_raw, cursor);
        }

        // Separators are only auto-inserted on forward typing.
        let growing = new_raw.len() > old_raw.len();
        let hours_then_minutes =
            self.pattern.has_two_digit_hours() && self.pattern.has(Segment::Minutes);
        if growing && hours_then_minutes && is_two_digit_pair(&text) {
            text.push(SEPARATOR);
        } else if growing && self.pattern.has(Segment::Seconds) && is_hours_and_minutes(&text) {
            text.push(SEPARATOR);
        }

        let text = text
            .split(SEPARATOR)
            .zip(self.pattern.tokens())
            .map(|(part, token)| clamp_part(part, token))
            .collect::<Vec<_>>()
            .join(&SEPARATOR.to_string());

        let cursor = if cursor < text.len() {
            cursor.min(text.len())
        } else {
            text.len()
        };
        TextEdit {
            changed: text != new_raw,
            text,
            cursor,
        }
    }

    /// Best-effort completion of a partially typed value.
    ///
    /// Of two parts, each single digit is padded; empty parts stay empty. A
    /// lone hour is padded and always given `:00`, whatever the pattern.
    pub fn repair(&self, raw: &str) -> String {
        let raw = raw.trim();
        let parts: Vec<&str> = raw.split(SEPARATOR).collect();
        match parts.as_slice() {
            [hours, minutes] => {
                format!("{}{}{}", pad_digit(hours), SEPARATOR, pad_digit(minutes))
            }
            [hours] if !hours.is_empty() => format!("{:0>2}{}00", hours, SEPARATOR),
            _ => raw.to_string(),
        }
    }

    pub fn on_commit(&self, raw: &str) -> CommitOutcome {
        let repaired = self.repair(raw);
        match self.pattern.parse_strict(&repaired) {
            Some(time) => {
                log::debug!("Committed '{}' as {}", raw, time);
                CommitOutcome::Parsed(time)
            }
            None => {
                log::debug!(
                    "'{}' (repaired '{}') does not match {}, reverting",
                    raw,
                    repaired,
                    self.pattern
                );
                CommitOutcome::Revert
            }
        }
    }
}
