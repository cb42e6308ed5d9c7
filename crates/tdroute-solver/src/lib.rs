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

//! Model reduction and sparse MILP assembly for single-vehicle routing
//! with delivery windows and piecewise-linear time-dependent travel times.

pub mod backend;
pub mod extract;
pub mod formulation;
pub mod pipeline;
pub mod reduction;
pub mod support;

pub mod prelude {
    pub use crate::backend::{BackendError, HighsSolver, MipOutcome, MipSolve, MipStatus};
    pub use crate::extract::{extract_solution, ExtractionError};
    pub use crate::formulation::{Formulation, MipModel};
    pub use crate::pipeline::{RoutePlanner, SolveError, SolverConfig};
    pub use crate::reduction::{ReductionError, SlotBoundaryPolicy};
    pub use crate::support::toy_instance;
}
