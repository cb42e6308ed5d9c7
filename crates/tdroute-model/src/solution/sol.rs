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
    common::NodeId,
    problem::node::Depot,
    solution::err::{
        LegMismatchError, RevisitedNodeError, RouteLengthError, SolutionError,
        UnknownNodeError, WrongEndpointError,
    },
};
use std::time::Duration;
use tdroute_core::prelude::{TimeDelta, TimePoint};

/// One traversed edge of the reconstructed route with its realized travel time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteLeg {
    from: NodeId,
    to: NodeId,
    travel_time: TimeDelta<f64>,
}

impl RouteLeg {
    #[inline]
    pub fn new(from: NodeId, to: NodeId, travel_time: TimeDelta<f64>) -> Self {
        Self {
            from,
            to,
            travel_time,
        }
    }

    #[inline]
    pub fn from(&self) -> NodeId {
        self.from
    }

    #[inline]
    pub fn to(&self) -> NodeId {
        self.to
    }

    #[inline]
    pub fn travel_time(&self) -> TimeDelta<f64> {
        self.travel_time
    }
}

impl std::fmt::Display for RouteLeg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {} ({})", self.from, self.to, self.travel_time)
    }
}

/// A validated optimal route: every node exactly once, depot start first,
/// depot end last.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSolution {
    route: Vec<NodeId>,
    arrivals: Vec<TimePoint<f64>>,
    legs: Vec<RouteLeg>,
    regret: f64,
    objective: f64,
}

impl RouteSolution {
    pub fn new(
        route: Vec<NodeId>,
        arrivals: Vec<TimePoint<f64>>,
        legs: Vec<RouteLeg>,
        regret: f64,
        objective: f64,
        depot: Depot,
    ) -> Result<Self, SolutionError> {
        let nodes = arrivals.len();
        if route.len() != nodes {
            return Err(RouteLengthError::new(nodes, route.len()).into());
        }
        match route.first() {
            Some(&first) if first == depot.start() => {}
            Some(&first) => {
                return Err(SolutionError::WrongStart(WrongEndpointError::new(
                    depot.start(),
                    first,
                )));
            }
            None => return Err(RouteLengthError::new(nodes, 0).into()),
        }
        if let Some(&last) = route.last() {
            if last != depot.end() {
                return Err(SolutionError::WrongEnd(WrongEndpointError::new(
                    depot.end(),
                    last,
                )));
            }
        }
        let mut seen = vec![false; nodes];
        for &node in &route {
            if node.value() >= nodes {
                return Err(UnknownNodeError::new(node, nodes).into());
            }
            if seen[node.value()] {
                return Err(RevisitedNodeError::new(node).into());
            }
            seen[node.value()] = true;
        }
        if legs.len() + 1 != route.len() {
            return Err(LegMismatchError::new(legs.len()).into());
        }
        for (position, leg) in legs.iter().enumerate() {
            if leg.from() != route[position] || leg.to() != route[position + 1] {
                return Err(LegMismatchError::new(position).into());
            }
        }

        Ok(Self {
            route,
            arrivals,
            legs,
            regret,
            objective,
        })
    }

    #[inline]
    pub fn route(&self) -> &[NodeId] {
        &self.route
    }

    #[inline]
    pub fn arrivals(&self) -> &[TimePoint<f64>] {
        &self.arrivals
    }

    #[inline]
    pub fn arrival(&self, node: NodeId) -> Option<TimePoint<f64>> {
        self.arrivals.get(node.value()).copied()
    }

    #[inline]
    pub fn legs(&self) -> &[RouteLeg] {
        &self.legs
    }

    /// Worst signed time-window violation over all nodes.
    #[inline]
    pub fn regret(&self) -> f64 {
        self.regret
    }

    #[inline]
    pub fn objective(&self) -> f64 {
        self.objective
    }
}

/// Reduced-formulation dimensions, reported for logging and sanity checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormulationSize {
    nodes: usize,
    edges: usize,
    slots: usize,
    combos: usize,
}

impl FormulationSize {
    #[inline]
    pub fn new(nodes: usize, edges: usize, slots: usize, combos: usize) -> Self {
        Self {
            nodes,
            edges,
            slots,
            combos,
        }
    }

    #[inline]
    pub fn nodes(&self) -> usize {
        self.nodes
    }

    #[inline]
    pub fn edges(&self) -> usize {
        self.edges
    }

    #[inline]
    pub fn slots(&self) -> usize {
        self.slots
    }

    #[inline]
    pub fn combos(&self) -> usize {
        self.combos
    }

    /// `2m` edge/travel columns, `kappa` slot columns, `n` arrivals, one regret.
    #[inline]
    pub fn variables(&self) -> usize {
        2 * self.edges + self.slots + self.nodes + 1
    }

    /// `3(n-1)` equalities, `m` edge rows, `K2` combo rows, `3(n-1)` window rows.
    #[inline]
    pub fn rows(&self) -> usize {
        3 * (self.nodes - 1) + self.edges + self.combos + 3 * (self.nodes - 1)
    }
}

impl std::fmt::Display for FormulationSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "n={} m={} kappa={} K2={} vars={} rows={}",
            self.nodes,
            self.edges,
            self.slots,
            self.combos,
            self.variables(),
            self.rows()
        )
    }
}

/// Outcome of one solver run; infeasibility is a normal result, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    Optimal(RouteSolution),
    Infeasible,
}

impl RouteOutcome {
    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self, RouteOutcome::Optimal(_))
    }

    #[inline]
    pub fn solution(&self) -> Option<&RouteSolution> {
        match self {
            RouteOutcome::Optimal(s) => Some(s),
            RouteOutcome::Infeasible => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolveReport {
    outcome: RouteOutcome,
    elapsed: Duration,
    size: FormulationSize,
}

impl SolveReport {
    #[inline]
    pub fn new(outcome: RouteOutcome, elapsed: Duration, size: FormulationSize) -> Self {
        Self {
            outcome,
            elapsed,
            size,
        }
    }

    #[inline]
    pub fn outcome(&self) -> &RouteOutcome {
        &self.outcome
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    #[inline]
    pub fn size(&self) -> FormulationSize {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[inline]
    fn nid(n: usize) -> NodeId {
        NodeId::new(n)
    }
    #[inline]
    fn tp(v: f64) -> TimePoint<f64> {
        TimePoint::new(v)
    }
    #[inline]
    fn td(v: f64) -> TimeDelta<f64> {
        TimeDelta::new(v)
    }

    fn depot() -> Depot {
        Depot::new(nid(2), nid(0))
    }

    fn legs_for(route: &[NodeId]) -> Vec<RouteLeg> {
        route
            .windows(2)
            .map(|w| RouteLeg::new(w[0], w[1], td(5.0)))
            .collect()
    }

    #[test]
    fn test_valid_route() {
        let route = vec![nid(2), nid(1), nid(3), nid(0)];
        let legs = legs_for(&route);
        let sol = RouteSolution::new(
            route.clone(),
            vec![tp(40.0), tp(20.0), tp(0.0), tp(30.0)],
            legs,
            0.0,
            40.0,
            depot(),
        )
        .unwrap();
        assert_eq!(sol.route(), route.as_slice());
        assert_eq!(sol.arrival(nid(3)), Some(tp(30.0)));
        assert_eq!(sol.legs().len(), 3);
        assert_eq!(sol.regret(), 0.0);
    }

    #[test]
    fn test_route_must_start_and_end_at_depot() {
        let arrivals = vec![tp(0.0); 4];
        let bad_start = vec![nid(1), nid(2), nid(3), nid(0)];
        assert!(matches!(
            RouteSolution::new(bad_start.clone(), arrivals.clone(), legs_for(&bad_start), 0.0, 0.0, depot()),
            Err(SolutionError::WrongStart(_))
        ));
        let bad_end = vec![nid(2), nid(1), nid(0), nid(3)];
        assert!(matches!(
            RouteSolution::new(bad_end.clone(), arrivals, legs_for(&bad_end), 0.0, 0.0, depot()),
            Err(SolutionError::WrongEnd(_))
        ));
    }

    #[test]
    fn test_route_visits_every_node_once() {
        let arrivals = vec![tp(0.0); 4];
        let short = vec![nid(2), nid(1), nid(0)];
        assert!(matches!(
            RouteSolution::new(short.clone(), arrivals.clone(), legs_for(&short), 0.0, 0.0, depot()),
            Err(SolutionError::RouteLength(_))
        ));
        let revisit = vec![nid(2), nid(1), nid(1), nid(0)];
        assert!(matches!(
            RouteSolution::new(revisit.clone(), arrivals, legs_for(&revisit), 0.0, 0.0, depot()),
            Err(SolutionError::RevisitedNode(_))
        ));
    }

    #[test]
    fn test_legs_must_match_route_hops() {
        let route = vec![nid(2), nid(1), nid(3), nid(0)];
        let arrivals = vec![tp(0.0); 4];
        let mut legs = legs_for(&route);
        legs.swap(0, 1);
        assert!(matches!(
            RouteSolution::new(route.clone(), arrivals.clone(), legs, 0.0, 0.0, depot()),
            Err(SolutionError::LegMismatch(_))
        ));
        let truncated = legs_for(&route)[..2].to_vec();
        assert!(matches!(
            RouteSolution::new(route, arrivals, truncated, 0.0, 0.0, depot()),
            Err(SolutionError::LegMismatch(_))
        ));
    }

    #[test]
    fn test_formulation_size_totals() {
        let s = FormulationSize::new(4, 9, 10, 24);
        assert_eq!(s.variables(), 2 * 9 + 10 + 4 + 1);
        assert_eq!(s.rows(), 3 * 3 + 9 + 24 + 3 * 3);
    }
}
