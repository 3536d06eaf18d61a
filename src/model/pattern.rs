// File: ./src/model/pattern.rs
//! Time format patterns such as `HH:mm:ss`.
//!
//! The grammar is small: one to three tokens separated by `:`,
//! always in the order hours, minutes, seconds. A doubled letter means the
//! segment is written with exactly two digits, a single letter allows one or
//! two.
use anyhow::{Result, anyhow};
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::EnumIter;

pub const SEPARATOR: char = ':';

/// Widest a segment can ever be while typing.
pub const MAX_SEGMENT_DIGITS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Segment {
    Hours,
    Minutes,
    Seconds,
}

impl Segment {
    pub fn max_value(self) -> u32 {
        match self {
            Segment::Hours => 23,
            Segment::Minutes | Segment::Seconds => 59,
        }
    }

    fn letter(self) -> char {
        match self {
            Segment::Hours => 'H',
            Segment::Minutes => 'm',
            Segment::Seconds => 's',
        }
    }

    fn of(self, time: NaiveTime) -> u32 {
        match self {
            Segment::Hours => time.hour(),
            Segment::Minutes => time.minute(),
            Segment::Seconds => time.second(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub segment: Segment,
    /// 1 or 2.
    pub width: usize,
}

impl Token {
    fn accepts(&self, digits: &str) -> bool {
        let len_ok = match self.width {
            2 => digits.len() == 2,
            _ => (1..=MAX_SEGMENT_DIGITS).contains(&digits.len()),
        };
        len_ok && digits.bytes().all(|b| b.is_ascii_digit())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimePattern {
    source: String,
    tokens: Vec<Token>,
}

impl TimePattern {
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn segment_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn token(&self, segment: Segment) -> Option<&Token> {
        self.tokens.iter().find(|t| t.segment == segment)
    }

    pub fn has(&self, segment: Segment) -> bool {
        self.token(segment).is_some()
    }

    pub fn has_two_digit_hours(&self) -> bool {
        self.token(Segment::Hours).is_some_and(|t| t.width == 2)
    }

    /// Longest buffer the pattern can accept: two digits per segment plus separators.
    pub fn max_len(&self) -> usize {
        let n = self.tokens.len();
        n * MAX_SEGMENT_DIGITS + n.saturating_sub(1)
    }

    /// Strict parse: one part per token, token widths honoured, values in range.
    pub fn parse_strict(&self, text: &str) -> Option<NaiveTime> {
        let parts: Vec<&str> = text.split(SEPARATOR).collect();
        if parts.len() != self.tokens.len() {
            return None;
        }

        let mut hms = [0u32; 3];
        for (token, part) in self.tokens.iter().zip(parts) {
            if !token.accepts(part) {
                return None;
            }
            let value: u32 = part.parse().ok()?;
            if value > token.segment.max_value() {
                return None;
            }
            let slot = match token.segment {
                Segment::Hours => 0,
                Segment::Minutes => 1,
                Segment::Seconds => 2,
            };
            hms[slot] = value;
        }
        NaiveTime::from_hms_opt(hms[0], hms[1], hms[2])
    }

    pub fn format(&self, time: NaiveTime) -> String {
        self.tokens
            .iter()
            .map(|t| {
                let value = t.segment.of(time);
                if t.width == 2 {
                    format!("{:02}", value)
                } else {
                    value.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(&SEPARATOR.to_string())
    }
}

impl Default for TimePattern {
    fn default() -> Self {
        Self {
            source: "HH:mm:ss".to_string(),
            tokens: vec![
                Token {
                    segment: Segment::Hours,
                    width: 2,
                },
                Token {
                    segment: Segment::Minutes,
                    width: 2,
                },
                Token {
                    segment: Segment::Seconds,
                    width: 2,
                },
            ],
        }
    }
}

impl FromStr for TimePattern {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(anyhow!("Time format is empty"));
        }

        let expected = [Segment::Hours, Segment::Minutes, Segment::Seconds];
        let raw_tokens: Vec<&str> = trimmed.split(SEPARATOR).collect();
        if raw_tokens.len() > expected.len() {
            return Err(anyhow!(
                "Time format '{}' has {} segments, at most 3 are supported",
                trimmed,
                raw_tokens.len()
            ));
        }

        let mut tokens = Vec::with_capacity(raw_tokens.len());
        for (raw, segment) in raw_tokens.iter().zip(expected) {
            let letter = segment.letter();
            let width = raw.chars().count();
            if !(1..=2).contains(&width) || raw.chars().any(|c| c != letter) {
                return Err(anyhow!(
                    "Invalid token '{}' in time format '{}': expected '{}' or '{}{}'",
                    raw,
                    trimmed,
                    letter,
                    letter,
                    letter
                ));
            }
            tokens.push(Token { segment, width });
        }

        Ok(Self {
            source: trimmed.to_string(),
            tokens,
        })
    }
}

impl TryFrom<String> for TimePattern {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TimePattern> for String {
    fn from(pattern: TimePattern) -> Self {
        pattern.source
    }
}

impl fmt::Display for TimePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_grammar() {
        assert!("HH:mm:ss".parse::<TimePattern>().is_ok());
        assert!("HH:mm".parse::<TimePattern>().is_ok());
        assert!("H:m:s".parse::<TimePattern>().is_ok());
        assert!("HH".parse::<TimePattern>().is_ok());

        assert!("".parse::<TimePattern>().is_err());
        assert!("mm:ss".parse::<TimePattern>().is_err(), "Hours must come first");
        assert!("HHH:mm".parse::<TimePattern>().is_err());
        assert!("hh:mm".parse::<TimePattern>().is_err(), "12-hour tokens are not supported");
        assert!("HH:mm:ss:ff".parse::<TimePattern>().is_err());
        assert!("HH::ss".parse::<TimePattern>().is_err());
    }

    #[test]
    fn test_default_matches_parsed_source() {
        let parsed: TimePattern = "HH:mm:ss".parse().unwrap();
        assert_eq!(parsed, TimePattern::default());
    }

    #[test]
    fn test_max_len() {
        assert_eq!("HH:mm:ss".parse::<TimePattern>().unwrap().max_len(), 8);
        assert_eq!("HH:mm".parse::<TimePattern>().unwrap().max_len(), 5);
        assert_eq!("H:mm".parse::<TimePattern>().unwrap().max_len(), 5);
        assert_eq!("HH".parse::<TimePattern>().unwrap().max_len(), 2);
    }

    #[test]
    fn test_parse_strict_widths_and_ranges() {
        let p: TimePattern = "HH:mm:ss".parse().unwrap();
        assert_eq!(p.parse_strict("09:05:00"), Some(t(9, 5, 0)));
        assert_eq!(p.parse_strict("23:59:59"), Some(t(23, 59, 59)));
        assert_eq!(p.parse_strict("9:05:00"), None, "HH needs two digits");
        assert_eq!(p.parse_strict("24:00:00"), None);
        assert_eq!(p.parse_strict("12:60:00"), None);
        assert_eq!(p.parse_strict("09:00"), None, "Segment count must match");
        assert_eq!(p.parse_strict("+1:00:00"), None);

        let loose: TimePattern = "H:mm".parse().unwrap();
        assert_eq!(loose.parse_strict("9:30"), Some(t(9, 30, 0)));
        assert_eq!(loose.parse_strict("09:30"), Some(t(9, 30, 0)));
        assert_eq!(loose.parse_strict("9:3"), None);
    }

    #[test]
    fn test_format() {
        let p: TimePattern = "HH:mm:ss".parse().unwrap();
        assert_eq!(p.format(t(7, 4, 3)), "07:04:03");
        let short: TimePattern = "H:mm".parse().unwrap();
        assert_eq!(short.format(t(7, 4, 3)), "7:04");
    }

    #[test]
    fn test_serde_roundtrip_through_string() {
        let p: TimePattern = "HH:mm".parse().unwrap();
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "\"HH:mm\"");
        let back: TimePattern = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
        assert!(serde_json::from_str::<TimePattern>("\"xx\"").is_err());
    }
}
