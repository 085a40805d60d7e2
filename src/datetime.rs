// Author: Dustin Pilgrim
// License: MIT

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::ser::{Serialize, Serializer};

use crate::error::{Result, TomeError};

static DATETIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^([0-9]{4})-([0-9]{2})-([0-9]{2})(?:[Tt ]([0-9]{2}):([0-9]{2}):([0-9]{2})(?:\.([0-9]+))?(?:([Zz])|([+-])([0-9]{2}):([0-9]{2}))?)?$",
    )
    .unwrap()
});

/// A calendar date with an optional time of day and an optional UTC offset.
///
/// An offset is only ever present together with a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Datetime {
    date: NaiveDate,
    time: Option<NaiveTime>,
    offset: Option<FixedOffset>,
}

impl Datetime {
    pub fn new(date: NaiveDate, time: Option<NaiveTime>, offset: Option<FixedOffset>) -> Result<Self> {
        if time.is_none() && offset.is_some() {
            return Err(TomeError::InvalidDateFormat {
                text: format!("{} with offset {} but no time", date, offset_string(offset)),
            });
        }
        Ok(Self { date, time, offset })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            date,
            time: None,
            offset: None,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn time(&self) -> Option<NaiveTime> {
        self.time
    }

    pub fn offset(&self) -> Option<FixedOffset> {
        self.offset
    }

    /// The instant this value names, if it has both a time and an offset.
    pub fn to_offset_datetime(&self) -> Option<DateTime<FixedOffset>> {
        let time = self.time?;
        let offset = self.offset?;
        self.date.and_time(time).and_local_timezone(offset).single()
    }
}

fn offset_string(offset: Option<FixedOffset>) -> String {
    offset.map(|o| o.to_string()).unwrap_or_default()
}

fn invalid(text: &str) -> TomeError {
    TomeError::InvalidDateFormat {
        text: text.to_string(),
    }
}

fn field(caps: &regex::Captures<'_>, i: usize, text: &str) -> Result<u32> {
    caps.get(i)
        .and_then(|m| m.as_str().parse().ok())
        .ok_or_else(|| invalid(text))
}

// Groups 8..=11: `Z`, or sign, hours and minutes of a numeric offset.
fn parse_offset(caps: &regex::Captures<'_>, text: &str) -> Result<Option<FixedOffset>> {
    if caps.get(8).is_some() {
        return FixedOffset::east_opt(0).map(Some).ok_or_else(|| invalid(text));
    }
    let Some(sign) = caps.get(9) else {
        return Ok(None);
    };
    let sign = if sign.as_str() == "-" { -1 } else { 1 };
    let hours = field(caps, 10, text)? as i32;
    let minutes = field(caps, 11, text)? as i32;
    if hours > 23 || minutes > 59 {
        return Err(invalid(text));
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .map(Some)
        .ok_or_else(|| invalid(text))
}

impl FromStr for Datetime {
    type Err = TomeError;

    fn from_str(text: &str) -> Result<Self> {
        let caps = DATETIME.captures(text).ok_or_else(|| invalid(text))?;

        let year = caps[1].parse::<i32>().map_err(|_| invalid(text))?;
        let date = NaiveDate::from_ymd_opt(year, field(&caps, 2, text)?, field(&caps, 3, text)?)
            .ok_or_else(|| invalid(text))?;

        if caps.get(4).is_none() {
            return Ok(Self::from_date(date));
        }

        // Fractions beyond nanosecond precision are truncated.
        let nanos = match caps.get(7) {
            Some(m) => {
                let digits: String = m.as_str().chars().take(9).collect();
                let scale = 10u32.pow(9 - digits.len() as u32);
                digits.parse::<u32>().map_err(|_| invalid(text))? * scale
            }
            None => 0,
        };
        let time = NaiveTime::from_hms_nano_opt(
            field(&caps, 4, text)?,
            field(&caps, 5, text)?,
            field(&caps, 6, text)?,
            nanos,
        )
        .ok_or_else(|| invalid(text))?;

        let offset = parse_offset(&caps, text)?;

        Ok(Self {
            date,
            time: Some(time),
            offset,
        })
    }
}

impl fmt::Display for Datetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.date.year(),
            self.date.month(),
            self.date.day()
        )?;
        let Some(time) = self.time else {
            return Ok(());
        };
        write!(
            f,
            "T{:02}:{:02}:{:02}",
            time.hour(),
            time.minute(),
            time.second()
        )?;
        let nanos = time.nanosecond();
        if nanos > 0 {
            let frac = format!("{:09}", nanos);
            write!(f, ".{}", frac.trim_end_matches('0'))?;
        }
        match self.offset {
            Some(offset) if offset.local_minus_utc() == 0 => f.write_str("Z"),
            Some(offset) => write!(f, "{}", offset),
            None => Ok(()),
        }
    }
}

impl Serialize for Datetime {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
