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

use tdroute_core::prelude::TimeInterval;
use tdroute_model::prelude::NodeId;

/// A node's delivery window admits no departure slot on the breakpoint grid.
///
/// The formulation cannot even be built; this is distinct from the solver
/// finding no feasible point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmptySlotRangeError {
    node: NodeId,
    window: TimeInterval<f64>,
}

impl EmptySlotRangeError {
    pub fn new(node: NodeId, window: TimeInterval<f64>) -> Self {
        Self { node, window }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn window(&self) -> TimeInterval<f64> {
        self.window
    }
}

impl std::fmt::Display for EmptySlotRangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "No departure slot on the breakpoint grid is compatible with window {} of {}",
            self.window, self.node
        )
    }
}

impl std::error::Error for EmptySlotRangeError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MissingOutEdgeError {
    node: NodeId,
}

impl MissingOutEdgeError {
    pub fn new(node: NodeId) -> Self {
        Self { node }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }
}

impl std::fmt::Display for MissingOutEdgeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Dominance reduction left {} without an outgoing edge; the instance is infeasible by construction",
            self.node
        )
    }
}

impl std::error::Error for MissingOutEdgeError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MissingInEdgeError {
    node: NodeId,
}

impl MissingInEdgeError {
    pub fn new(node: NodeId) -> Self {
        Self { node }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }
}

impl std::fmt::Display for MissingInEdgeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Dominance reduction left {} without an incoming edge; the instance is infeasible by construction",
            self.node
        )
    }
}

impl std::error::Error for MissingInEdgeError {}

/// Fatal infeasibility detected while building the reduced formulation.
#[derive(Debug, Clone, PartialEq)]
pub enum ReductionError {
    EmptySlotRange(EmptySlotRangeError),
    MissingOutEdge(MissingOutEdgeError),
    MissingInEdge(MissingInEdgeError),
}

impl std::fmt::Display for ReductionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReductionError::EmptySlotRange(e) => write!(f, "{}", e),
            ReductionError::MissingOutEdge(e) => write!(f, "{}", e),
            ReductionError::MissingInEdge(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ReductionError {}

impl From<EmptySlotRangeError> for ReductionError {
    fn from(err: EmptySlotRangeError) -> Self {
        ReductionError::EmptySlotRange(err)
    }
}

impl From<MissingOutEdgeError> for ReductionError {
    fn from(err: MissingOutEdgeError) -> Self {
        ReductionError::MissingOutEdge(err)
    }
}

impl From<MissingInEdgeError> for ReductionError {
    fn from(err: MissingInEdgeError) -> Self {
        ReductionError::MissingInEdge(err)
    }
}
