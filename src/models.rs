// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::EngineError;
use crate::utils::round2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub color: String,
}

/// A single dated, signed movement. Positive is income, negative is expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    pub id: Option<i64>,
    pub date: NaiveDateTime,
    pub description: String,
    pub amount: Decimal,
    pub category_id: i64,
}

impl Movement {
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> MonthToken {
        MonthToken::ALL[self.date.month0() as usize]
    }
}

/// The fields a recurring movement copies into every generated instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementTemplate {
    pub description: String,
    pub amount: Decimal,
    pub category_id: i64,
}

impl MovementTemplate {
    pub fn at(&self, date: NaiveDateTime) -> Movement {
        Movement {
            id: None,
            date,
            description: self.description.clone(),
            amount: self.amount,
            category_id: self.category_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Monthly,
    Yearly,
}

impl FromStr for Frequency {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(Frequency::Monthly),
            "yearly" => Ok(Frequency::Yearly),
            other => Err(EngineError::InvalidRecurrenceSpec(format!(
                "unknown frequency '{}' (use monthly|yearly)",
                other
            ))),
        }
    }
}

/// Last period a recurrence may generate into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndBound {
    Month { year: i32, month: u32 },
    Year(i32),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurrenceSpec {
    pub base: MovementTemplate,
    pub start: NaiveDateTime,
    pub frequency: Frequency,
    pub end: EndBound,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum MonthToken {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl MonthToken {
    pub const ALL: [MonthToken; 12] = [
        MonthToken::Jan,
        MonthToken::Feb,
        MonthToken::Mar,
        MonthToken::Apr,
        MonthToken::May,
        MonthToken::Jun,
        MonthToken::Jul,
        MonthToken::Aug,
        MonthToken::Sep,
        MonthToken::Oct,
        MonthToken::Nov,
        MonthToken::Dec,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MonthToken::Jan => "Jan",
            MonthToken::Feb => "Feb",
            MonthToken::Mar => "Mar",
            MonthToken::Apr => "Apr",
            MonthToken::May => "May",
            MonthToken::Jun => "Jun",
            MonthToken::Jul => "Jul",
            MonthToken::Aug => "Aug",
            MonthToken::Sep => "Sep",
            MonthToken::Oct => "Oct",
            MonthToken::Nov => "Nov",
            MonthToken::Dec => "Dec",
        }
    }

    /// 1-based month number.
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    pub fn from_number(n: u32) -> Option<MonthToken> {
        if (1..=12).contains(&n) {
            Some(Self::ALL[(n - 1) as usize])
        } else {
            None
        }
    }
}

impl fmt::Display for MonthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MonthToken {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if let Ok(n) = t.parse::<u32>() {
            return MonthToken::from_number(n).ok_or_else(|| EngineError::InvalidMonth(s.into()));
        }
        MonthToken::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(t))
            .ok_or_else(|| EngineError::InvalidMonth(s.into()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub year: i32,
    pub month: MonthToken,
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub color: String,
    pub show_in_report: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            color: "#808080".into(),
            show_in_report: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub records: Vec<AccountRecord>,
    pub display: DisplayConfig,
}

/// Income/expense/net sums for one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PeriodTotals {
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
}

/// Row form of an aggregated bucket. `month` is absent for annual buckets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodBucket {
    pub year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<MonthToken>,
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: i64,
    pub name: String,
    pub target: Decimal,
    pub saved: Decimal,
    pub due: Option<NaiveDate>,
}

impl SavingsGoal {
    /// Percentage of the target already saved, rounded to 2 decimals.
    pub fn progress(&self) -> Decimal {
        if self.target.is_zero() {
            return if self.saved.is_zero() {
                Decimal::ZERO
            } else {
                Decimal::ONE_HUNDRED
            };
        }
        round2(self.saved / self.target * Decimal::ONE_HUNDRED)
    }

    pub fn remaining(&self) -> Decimal {
        (self.target - self.saved).max(Decimal::ZERO)
    }
}
