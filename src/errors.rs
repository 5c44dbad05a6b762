// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Domain errors raised by the engine and by the data-source boundary.
///
/// Aggregation, rollup and matrix functions never return these: missing data
/// is zero there. Only recurrence expansion and input parsing can fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid recurrence: {0}")]
    InvalidRecurrenceSpec(String),

    #[error("malformed amount '{0}', expected a number with at most 2 decimals")]
    MalformedAmount(String),

    #[error("malformed date '{0}'")]
    MalformedDate(String),

    #[error("invalid month '{0}'")]
    InvalidMonth(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
