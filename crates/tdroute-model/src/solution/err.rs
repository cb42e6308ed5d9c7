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

use crate::common::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouteLengthError {
    expected: usize,
    actual: usize,
}

impl RouteLengthError {
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

impl std::fmt::Display for RouteLengthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Route must visit every node exactly once ({} entries), got {}",
            self.expected, self.actual
        )
    }
}

impl std::error::Error for RouteLengthError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WrongEndpointError {
    expected: NodeId,
    actual: NodeId,
}

impl WrongEndpointError {
    pub fn new(expected: NodeId, actual: NodeId) -> Self {
        Self { expected, actual }
    }

    pub fn expected(&self) -> NodeId {
        self.expected
    }

    pub fn actual(&self) -> NodeId {
        self.actual
    }
}

impl std::fmt::Display for WrongEndpointError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Route endpoint mismatch: expected {}, got {}",
            self.expected, self.actual
        )
    }
}

impl std::error::Error for WrongEndpointError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RevisitedNodeError {
    node: NodeId,
}

impl RevisitedNodeError {
    pub fn new(node: NodeId) -> Self {
        Self { node }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }
}

impl std::fmt::Display for RevisitedNodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Route visits {} more than once", self.node)
    }
}

impl std::error::Error for RevisitedNodeError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnknownNodeError {
    node: NodeId,
    nodes: usize,
}

impl UnknownNodeError {
    pub fn new(node: NodeId, nodes: usize) -> Self {
        Self { node, nodes }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn nodes(&self) -> usize {
        self.nodes
    }
}

impl std::fmt::Display for UnknownNodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Route contains {} outside the instance's {} nodes",
            self.node, self.nodes
        )
    }
}

impl std::error::Error for UnknownNodeError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArrivalCountError {
    expected: usize,
    actual: usize,
}

impl ArrivalCountError {
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

impl std::fmt::Display for ArrivalCountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Expected one arrival time per node ({}), got {}",
            self.expected, self.actual
        )
    }
}

impl std::error::Error for ArrivalCountError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LegMismatchError {
    position: usize,
}

impl LegMismatchError {
    pub fn new(position: usize) -> Self {
        Self { position }
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

impl std::fmt::Display for LegMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Leg {} does not connect the corresponding route hop",
            self.position
        )
    }
}

impl std::error::Error for LegMismatchError {}

#[derive(Debug, Clone, PartialEq)]
pub enum SolutionError {
    RouteLength(RouteLengthError),
    WrongStart(WrongEndpointError),
    WrongEnd(WrongEndpointError),
    RevisitedNode(RevisitedNodeError),
    UnknownNode(UnknownNodeError),
    ArrivalCount(ArrivalCountError),
    LegMismatch(LegMismatchError),
}

impl std::fmt::Display for SolutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolutionError::RouteLength(e) => write!(f, "{}", e),
            SolutionError::WrongStart(e) => write!(f, "route start: {}", e),
            SolutionError::WrongEnd(e) => write!(f, "route end: {}", e),
            SolutionError::RevisitedNode(e) => write!(f, "{}", e),
            SolutionError::UnknownNode(e) => write!(f, "{}", e),
            SolutionError::ArrivalCount(e) => write!(f, "{}", e),
            SolutionError::LegMismatch(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SolutionError {}

impl From<RouteLengthError> for SolutionError {
    fn from(err: RouteLengthError) -> Self {
        SolutionError::RouteLength(err)
    }
}

impl From<RevisitedNodeError> for SolutionError {
    fn from(err: RevisitedNodeError) -> Self {
        SolutionError::RevisitedNode(err)
    }
}

impl From<UnknownNodeError> for SolutionError {
    fn from(err: UnknownNodeError) -> Self {
        SolutionError::UnknownNode(err)
    }
}

impl From<ArrivalCountError> for SolutionError {
    fn from(err: ArrivalCountError) -> Self {
        SolutionError::ArrivalCount(err)
    }
}

impl From<LegMismatchError> for SolutionError {
    fn from(err: LegMismatchError) -> Self {
        SolutionError::LegMismatch(err)
    }
}
