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

//! Maps the flat solution vector back into domain quantities, checking the
//! structural invariants the formulation is supposed to guarantee.

use crate::formulation::Formulation;
use tdroute_core::prelude::{TimeDelta, TimePoint};
use tdroute_model::prelude::{Instance, NodeId, RouteLeg, RouteSolution, SolutionError};

/// Two selected out-edges share a tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DuplicateSuccessorError {
    node: NodeId,
}

impl DuplicateSuccessorError {
    pub fn new(node: NodeId) -> Self {
        Self { node }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }
}

impl std::fmt::Display for DuplicateSuccessorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Solution selects two out-edges of {}", self.node)
    }
}

impl std::error::Error for DuplicateSuccessorError {}

/// The successor walk stopped at a node with no selected out-edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeadEndError {
    node: NodeId,
}

impl DeadEndError {
    pub fn new(node: NodeId) -> Self {
        Self { node }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }
}

impl std::fmt::Display for DeadEndError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Solution selects no out-edge of {}", self.node)
    }
}

impl std::error::Error for DeadEndError {}

/// The successor walk revisited a node before covering them all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CycleError {
    node: NodeId,
}

impl CycleError {
    pub fn new(node: NodeId) -> Self {
        Self { node }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }
}

impl std::fmt::Display for CycleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Solution revisits {} before covering every node", self.node)
    }
}

impl std::error::Error for CycleError {}

/// The backend handed back a vector of the wrong length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueCountError {
    expected: usize,
    actual: usize,
}

impl ValueCountError {
    pub fn new(expected: usize, actual: usize) -> Self {
        Self { expected, actual }
    }

    pub fn expected(&self) -> usize {
        self.expected
    }

    pub fn actual(&self) -> usize {
        self.actual
    }
}

impl std::fmt::Display for ValueCountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Solution vector must hold one value per variable ({}), got {}",
            self.expected, self.actual
        )
    }
}

impl std::error::Error for ValueCountError {}

/// The walk reached the depot's end copy before visiting every node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrematureEndError {
    position: usize,
}

impl PrematureEndError {
    pub fn new(position: usize) -> Self {
        Self { position }
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

impl std::fmt::Display for PrematureEndError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Solution reaches the end depot at position {} before covering every node",
            self.position
        )
    }
}

impl std::error::Error for PrematureEndError {}

/// Consistency-check failure while reconstructing a route; always an
/// internal invariant violation, never a normal outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionError {
    ValueCount(ValueCountError),
    DuplicateSuccessor(DuplicateSuccessorError),
    DeadEnd(DeadEndError),
    Cycle(CycleError),
    PrematureEnd(PrematureEndError),
    Solution(SolutionError),
}

impl std::fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionError::ValueCount(e) => write!(f, "{}", e),
            ExtractionError::DuplicateSuccessor(e) => write!(f, "{}", e),
            ExtractionError::DeadEnd(e) => write!(f, "{}", e),
            ExtractionError::Cycle(e) => write!(f, "{}", e),
            ExtractionError::PrematureEnd(e) => write!(f, "{}", e),
            ExtractionError::Solution(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ExtractionError {}

impl From<ValueCountError> for ExtractionError {
    fn from(err: ValueCountError) -> Self {
        ExtractionError::ValueCount(err)
    }
}

impl From<DuplicateSuccessorError> for ExtractionError {
    fn from(err: DuplicateSuccessorError) -> Self {
        ExtractionError::DuplicateSuccessor(err)
    }
}

impl From<DeadEndError> for ExtractionError {
    fn from(err: DeadEndError) -> Self {
        ExtractionError::DeadEnd(err)
    }
}

impl From<CycleError> for ExtractionError {
    fn from(err: CycleError) -> Self {
        ExtractionError::Cycle(err)
    }
}

impl From<PrematureEndError> for ExtractionError {
    fn from(err: PrematureEndError) -> Self {
        ExtractionError::PrematureEnd(err)
    }
}

impl From<SolutionError> for ExtractionError {
    fn from(err: SolutionError) -> Self {
        ExtractionError::Solution(err)
    }
}

/// Reconstructs the validated route from the optimal solution vector.
pub fn extract_solution(
    instance: &Instance,
    formulation: &Formulation,
    values: &[f64],
) -> Result<RouteSolution, ExtractionError> {
    let indices = formulation.indices();
    let layout = indices.layout();
    let depot = instance.depot();
    let n = instance.nodes();

    if values.len() != layout.total() {
        return Err(ValueCountError::new(layout.total(), values.len()).into());
    }

    // Unique-successor map over the selected edges.
    let mut successor: Vec<Option<NodeId>> = vec![None; n];
    for (e, edge) in indices.edge_entries() {
        if values[layout.edge_column(e)] >= 0.5 {
            let slot = &mut successor[edge.tail().value()];
            if slot.is_some() {
                return Err(DuplicateSuccessorError::new(edge.tail()).into());
            }
            *slot = Some(edge.head());
        }
    }

    // Walk from the start copy; every node exactly once, end copy last.
    let mut route = Vec::with_capacity(n);
    let mut visited = vec![false; n];
    let mut current = depot.start();
    route.push(current);
    visited[current.value()] = true;
    while route.len() < n {
        let next = successor[current.value()].ok_or(DeadEndError::new(current))?;
        if next == depot.end() && route.len() + 1 < n {
            return Err(PrematureEndError::new(route.len()).into());
        }
        if visited[next.value()] {
            return Err(CycleError::new(next).into());
        }
        route.push(next);
        visited[next.value()] = true;
        current = next;
    }

    let arrivals: Vec<TimePoint<f64>> = (0..n)
        .map(|i| TimePoint::new(values[layout.arrival_column(NodeId::new(i))]))
        .collect();

    // Realized leg travel times, re-interpolated at the actual departure;
    // the travel column stands in when the departure lies past the grid.
    let legs: Vec<RouteLeg> = route
        .windows(2)
        .map(|hop| {
            let departure = arrivals[hop[0].value()] + instance.service_time();
            let travel = instance
                .grid()
                .travel_at(hop[0], hop[1], departure)
                .unwrap_or_else(|| {
                    let column = indices
                        .edge_index(hop[0], hop[1])
                        .map(|e| values[layout.travel_column(e)])
                        .unwrap_or(0.0);
                    TimeDelta::new(column)
                });
            RouteLeg::new(hop[0], hop[1], travel)
        })
        .collect();

    let regret = values[layout.regret_column()];
    let objective = instance.regret_weight() * regret
        + values[layout.arrival_column(depot.end())]
        - instance.start_weight() * values[layout.arrival_column(depot.start())];

    Ok(RouteSolution::new(
        route, arrivals, legs, regret, objective, depot,
    )?)
}
