// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure computations over movements and account records. Nothing in here
//! touches storage or mutates its input.

pub mod compare;
pub mod matrix;
pub mod periods;
pub mod recurrence;
pub mod rollup;
