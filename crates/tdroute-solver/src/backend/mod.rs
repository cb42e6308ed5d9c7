// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! The opaque MILP search behind a trait, with a `good_lp` + HiGHS default.

pub mod highs;

pub use highs::HighsSolver;

use crate::formulation::MipModel;
use std::time::Duration;

/// Terminal state of one solver run.
///
/// `Optimal` carries one value per variable in column order. Infeasibility
/// is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum MipStatus {
    Optimal(Vec<f64>),
    Infeasible,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MipOutcome {
    status: MipStatus,
    elapsed: Duration,
}

impl MipOutcome {
    #[inline]
    pub fn new(status: MipStatus, elapsed: Duration) -> Self {
        Self { status, elapsed }
    }

    #[inline]
    pub fn status(&self) -> &MipStatus {
        &self.status
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    #[inline]
    pub fn into_status(self) -> MipStatus {
        self.status
    }
}

/// Unexpected failure inside the solver library, surfaced verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendError {
    message: String,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MILP backend failure: {}", self.message)
    }
}

impl std::error::Error for BackendError {}

/// An all-or-nothing MILP solve; no partial result is ever consumed.
pub trait MipSolve {
    fn solve(&self, model: &MipModel) -> Result<MipOutcome, BackendError>;
}
