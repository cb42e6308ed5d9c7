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

use crate::{
    backend::{BackendError, MipSolve, MipStatus},
    extract::{extract_solution, ExtractionError},
    formulation::Formulation,
    reduction::{ReductionError, SlotBoundaryPolicy},
};
use tdroute_model::prelude::{Instance, RouteOutcome, SolveReport};

/// Configuration of one planning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SolverConfig {
    boundary_policy: SlotBoundaryPolicy,
}

impl SolverConfig {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_boundary_policy(mut self, policy: SlotBoundaryPolicy) -> Self {
        self.boundary_policy = policy;
        self
    }

    #[inline]
    pub fn boundary_policy(&self) -> SlotBoundaryPolicy {
        self.boundary_policy
    }
}

/// Failure of one planning run; solver-level infeasibility is not one.
#[derive(Debug)]
pub enum SolveError {
    Reduction(ReductionError),
    Backend(BackendError),
    Extraction(ExtractionError),
}

impl std::fmt::Display for SolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveError::Reduction(e) => write!(f, "{}", e),
            SolveError::Backend(e) => write!(f, "{}", e),
            SolveError::Extraction(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SolveError {}

impl From<ReductionError> for SolveError {
    fn from(err: ReductionError) -> Self {
        SolveError::Reduction(err)
    }
}

impl From<BackendError> for SolveError {
    fn from(err: BackendError) -> Self {
        SolveError::Backend(err)
    }
}

impl From<ExtractionError> for SolveError {
    fn from(err: ExtractionError) -> Self {
        SolveError::Extraction(err)
    }
}

/// End-to-end planner: reduction, assembly, backend solve, extraction.
#[derive(Debug, Clone)]
pub struct RoutePlanner<B> {
    backend: B,
    config: SolverConfig,
}

impl<B: MipSolve> RoutePlanner<B> {
    #[inline]
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, SolverConfig::default())
    }

    #[inline]
    pub fn with_config(backend: B, config: SolverConfig) -> Self {
        Self { backend, config }
    }

    #[inline]
    pub fn config(&self) -> SolverConfig {
        self.config
    }

    pub fn solve(&self, instance: &Instance) -> Result<SolveReport, SolveError> {
        let formulation = Formulation::build(instance, self.config.boundary_policy())?;
        let size = formulation.model().size();
        let outcome = self.backend.solve(formulation.model())?;
        let elapsed = outcome.elapsed();
        match outcome.into_status() {
            MipStatus::Optimal(values) => {
                let solution = extract_solution(instance, &formulation, &values)?;
                Ok(SolveReport::new(
                    RouteOutcome::Optimal(solution),
                    elapsed,
                    size,
                ))
            }
            MipStatus::Infeasible => {
                Ok(SolveReport::new(RouteOutcome::Infeasible, elapsed, size))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        backend::{HighsSolver, MipOutcome},
        formulation::MipModel,
        support::gen::toy_instance,
    };
    use std::time::Duration;

    /// Stub backend for exercising the plumbing without a native solver.
    struct AlwaysInfeasible;

    impl MipSolve for AlwaysInfeasible {
        fn solve(&self, _model: &MipModel) -> Result<MipOutcome, BackendError> {
            Ok(MipOutcome::new(
                MipStatus::Infeasible,
                Duration::from_millis(1),
            ))
        }
    }

    #[test]
    fn test_infeasible_status_is_a_normal_outcome() {
        let inst = toy_instance(7).unwrap();
        let planner = RoutePlanner::new(AlwaysInfeasible);
        let report = planner.solve(&inst).unwrap();
        assert!(!report.outcome().is_optimal());
        assert_eq!(report.size().nodes(), 4);
    }

    #[test]
    fn test_end_to_end_on_the_seeded_toy() {
        let inst = toy_instance(42).unwrap();
        let planner = RoutePlanner::new(HighsSolver::new().with_time_limit(30.0));
        let report = match planner.solve(&inst) {
            Ok(r) => r,
            Err(SolveError::Backend(e)) => {
                eprintln!("skipping: HiGHS backend unavailable ({e})");
                return;
            }
            Err(other) => panic!("unexpected: {other}"),
        };
        let solution = report
            .outcome()
            .solution()
            .expect("the toy instance is built feasible");
        // The route passed every consistency check on construction; spot
        // check the endpoints and the leg count.
        assert_eq!(solution.route().len(), 4);
        assert_eq!(solution.route()[0].value(), 2);
        assert_eq!(solution.route()[3].value(), 0);
        assert_eq!(solution.legs().len(), 3);
    }
}
