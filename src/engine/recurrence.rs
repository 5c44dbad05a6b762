// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Expansion of a recurring template into concrete dated movements.
//!
//! The first occurrence always keeps the start instant. Monthly follow-ups
//! land on day 1 of each subsequent month at a fixed generation time; yearly
//! follow-ups keep the start month, day and time.
//!
//! When the end bound precedes the start, exactly one movement (the start
//! occurrence) is produced. An end bound more than `MAX_HORIZON_YEARS` after
//! the start year is rejected.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::debug;

use crate::errors::{EngineError, EngineResult};
use crate::models::{EndBound, Frequency, Movement, RecurrenceSpec};
use crate::utils::{month_end, parse_datetime};

/// Furthest an end bound may reach past the start year.
pub const MAX_HORIZON_YEARS: i32 = 100;

/// Time of day used for generated monthly occurrences unless configured (10:00).
pub fn default_generation_time() -> NaiveTime {
    NaiveTime::from_hms_opt(10, 0, 0).unwrap_or_default()
}

pub fn expand(spec: &RecurrenceSpec) -> EngineResult<Vec<Movement>> {
    expand_at(spec, default_generation_time())
}

pub fn expand_at(spec: &RecurrenceSpec, generation_time: NaiveTime) -> EngineResult<Vec<Movement>> {
    let end_year = match spec.end {
        EndBound::Month { year, .. } | EndBound::Year(year) => year,
    };
    if end_year.saturating_sub(spec.start.year()) > MAX_HORIZON_YEARS {
        return Err(EngineError::InvalidRecurrenceSpec(format!(
            "end year {} is more than {} years after the start",
            end_year, MAX_HORIZON_YEARS
        )));
    }
    let dates = match (spec.frequency, spec.end) {
        (Frequency::Monthly, EndBound::Month { year, month }) => {
            monthly_dates(spec.start, year, month, generation_time)?
        }
        (Frequency::Yearly, EndBound::Year(year)) => yearly_dates(spec.start, year),
        (Frequency::Monthly, EndBound::Year(_)) => {
            return Err(EngineError::InvalidRecurrenceSpec(
                "monthly recurrence needs a month end bound".into(),
            ));
        }
        (Frequency::Yearly, EndBound::Month { .. }) => {
            return Err(EngineError::InvalidRecurrenceSpec(
                "yearly recurrence needs a year end bound".into(),
            ));
        }
    };
    debug!(
        frequency = ?spec.frequency,
        start = %spec.start,
        count = dates.len(),
        "expanded recurrence"
    );
    Ok(dates.into_iter().map(|d| spec.base.at(d)).collect())
}

/// Parses a start instant, reporting failures as an invalid recurrence.
pub fn parse_start(s: &str) -> EngineResult<NaiveDateTime> {
    parse_datetime(s).map_err(|_| {
        EngineError::InvalidRecurrenceSpec(format!("start date '{}' is not a valid date", s))
    })
}

/// Parses the end bound for a frequency: `YYYY-MM` for monthly, `YYYY` for yearly.
pub fn parse_end_bound(frequency: Frequency, s: &str) -> EngineResult<EndBound> {
    let t = s.trim();
    let bad = || {
        EngineError::InvalidRecurrenceSpec(format!(
            "end bound '{}' does not fit a {} recurrence",
            s,
            match frequency {
                Frequency::Monthly => "monthly",
                Frequency::Yearly => "yearly",
            }
        ))
    };
    let representable = |year: i32| (NaiveDate::MIN.year()..=NaiveDate::MAX.year()).contains(&year);
    match frequency {
        Frequency::Monthly => {
            let (y, m) = t.split_once('-').ok_or_else(bad)?;
            let year = y.parse::<i32>().map_err(|_| bad())?;
            let month = m.parse::<u32>().map_err(|_| bad())?;
            if !(1..=12).contains(&month) || !representable(year) {
                return Err(bad());
            }
            Ok(EndBound::Month { year, month })
        }
        Frequency::Yearly => {
            let year = t.parse::<i32>().map_err(|_| bad())?;
            if !representable(year) {
                return Err(bad());
            }
            Ok(EndBound::Year(year))
        }
    }
}

fn monthly_dates(
    start: NaiveDateTime,
    end_year: i32,
    end_month: u32,
    time: NaiveTime,
) -> EngineResult<Vec<NaiveDateTime>> {
    let last_day = month_end(end_year, end_month).map_err(|_| {
        EngineError::InvalidRecurrenceSpec(format!(
            "end month {}-{:02} is not a calendar month",
            end_year, end_month
        ))
    })?;
    let boundary = last_day
        .and_hms_opt(23, 59, 59)
        .ok_or_else(|| EngineError::InvalidRecurrenceSpec("unrepresentable end bound".into()))?;

    let mut out = vec![start];
    let mut cursor = next_month_start(start.date());
    while let Some(day) = cursor {
        let at = day.and_time(time);
        if at > boundary {
            break;
        }
        out.push(at);
        cursor = next_month_start(day);
    }
    Ok(out)
}

fn yearly_dates(start: NaiveDateTime, end_year: i32) -> Vec<NaiveDateTime> {
    let mut out = vec![start];
    let first = start.date();
    for year in (first.year() + 1)..=end_year {
        // Feb 29 falls back to Feb 28 in common years.
        let day = first
            .with_year(year)
            .or_else(|| NaiveDate::from_ymd_opt(year, first.month(), 28));
        match day {
            Some(day) => out.push(day.and_time(start.time())),
            None => break,
        }
    }
    out
}

fn next_month_start(d: NaiveDate) -> Option<NaiveDate> {
    if d.month() == 12 {
        NaiveDate::from_ymd_opt(d.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(d.year(), d.month() + 1, 1)
    }
}
