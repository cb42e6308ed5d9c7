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
use tdroute_core::prelude::TimeInterval;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowCountMismatchError {
    expected: usize,
    actual: usize,
}

impl WindowCountMismatchError {
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

impl std::fmt::Display for WindowCountMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Expected one delivery window per node ({}), got {}",
            self.expected, self.actual
        )
    }
}

impl std::error::Error for WindowCountMismatchError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TravelTensorShapeError {
    expected: usize,
    actual: usize,
}

impl TravelTensorShapeError {
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

impl std::fmt::Display for TravelTensorShapeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Travel time tensor must hold n * n * (K + 1) samples ({}), got {}",
            self.expected, self.actual
        )
    }
}

impl std::error::Error for TravelTensorShapeError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TooFewBreakpointsError {
    count: usize,
}

impl TooFewBreakpointsError {
    pub fn new(count: usize) -> Self {
        Self { count }
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl std::fmt::Display for TooFewBreakpointsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "At least two breakpoints are required to span one time slot, got {}",
            self.count
        )
    }
}

impl std::error::Error for TooFewBreakpointsError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NonIncreasingBreakpointsError {
    position: usize,
}

impl NonIncreasingBreakpointsError {
    pub fn new(position: usize) -> Self {
        Self { position }
    }

    /// Index of the first breakpoint that does not strictly exceed its predecessor.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl std::fmt::Display for NonIncreasingBreakpointsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Breakpoints must be finite and strictly increasing; violated at index {}",
            self.position
        )
    }
}

impl std::error::Error for NonIncreasingBreakpointsError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvalidDepotError {
    start: NodeId,
    end: NodeId,
    nodes: usize,
}

impl InvalidDepotError {
    pub fn new(start: NodeId, end: NodeId, nodes: usize) -> Self {
        Self { start, end, nodes }
    }

    pub fn start(&self) -> NodeId {
        self.start
    }

    pub fn end(&self) -> NodeId {
        self.end
    }

    pub fn nodes(&self) -> usize {
        self.nodes
    }
}

impl std::fmt::Display for InvalidDepotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Depot nodes {} and {} must be distinct ids below the node count {}",
            self.start, self.end, self.nodes
        )
    }
}

impl std::error::Error for InvalidDepotError {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MalformedWindowError {
    node: NodeId,
    window: TimeInterval<f64>,
}

impl MalformedWindowError {
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

impl std::fmt::Display for MalformedWindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Delivery window {} of {} must be finite with start <= end",
            self.window, self.node
        )
    }
}

impl std::error::Error for MalformedWindowError {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidParameterError {
    name: &'static str,
    value: f64,
}

impl InvalidParameterError {
    pub fn new(name: &'static str, value: f64) -> Self {
        Self { name, value }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl std::fmt::Display for InvalidParameterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Parameter {} has invalid value {}", self.name, self.value)
    }
}

impl std::error::Error for InvalidParameterError {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidSampleError {
    tail: NodeId,
    head: NodeId,
    breakpoint: usize,
    value: f64,
}

impl InvalidSampleError {
    pub fn new(tail: NodeId, head: NodeId, breakpoint: usize, value: f64) -> Self {
        Self {
            tail,
            head,
            breakpoint,
            value,
        }
    }

    pub fn tail(&self) -> NodeId {
        self.tail
    }

    pub fn head(&self) -> NodeId {
        self.head
    }

    pub fn breakpoint(&self) -> usize {
        self.breakpoint
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl std::fmt::Display for InvalidSampleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Travel time sample ({} -> {}, breakpoint {}) must be finite and non-negative, got {}",
            self.tail, self.head, self.breakpoint, self.value
        )
    }
}

impl std::error::Error for InvalidSampleError {}

#[derive(Debug, Clone, PartialEq)]
pub enum InstanceError {
    WindowCountMismatch(WindowCountMismatchError),
    TravelTensorShape(TravelTensorShapeError),
    TooFewBreakpoints(TooFewBreakpointsError),
    NonIncreasingBreakpoints(NonIncreasingBreakpointsError),
    InvalidDepot(InvalidDepotError),
    MalformedWindow(MalformedWindowError),
    InvalidParameter(InvalidParameterError),
    InvalidSample(InvalidSampleError),
}

impl std::fmt::Display for InstanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstanceError::WindowCountMismatch(e) => write!(f, "{}", e),
            InstanceError::TravelTensorShape(e) => write!(f, "{}", e),
            InstanceError::TooFewBreakpoints(e) => write!(f, "{}", e),
            InstanceError::NonIncreasingBreakpoints(e) => write!(f, "{}", e),
            InstanceError::InvalidDepot(e) => write!(f, "{}", e),
            InstanceError::MalformedWindow(e) => write!(f, "{}", e),
            InstanceError::InvalidParameter(e) => write!(f, "{}", e),
            InstanceError::InvalidSample(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for InstanceError {}

impl From<WindowCountMismatchError> for InstanceError {
    fn from(err: WindowCountMismatchError) -> Self {
        InstanceError::WindowCountMismatch(err)
    }
}

impl From<TravelTensorShapeError> for InstanceError {
    fn from(err: TravelTensorShapeError) -> Self {
        InstanceError::TravelTensorShape(err)
    }
}

impl From<TooFewBreakpointsError> for InstanceError {
    fn from(err: TooFewBreakpointsError) -> Self {
        InstanceError::TooFewBreakpoints(err)
    }
}

impl From<NonIncreasingBreakpointsError> for InstanceError {
    fn from(err: NonIncreasingBreakpointsError) -> Self {
        InstanceError::NonIncreasingBreakpoints(err)
    }
}

impl From<InvalidDepotError> for InstanceError {
    fn from(err: InvalidDepotError) -> Self {
        InstanceError::InvalidDepot(err)
    }
}

impl From<MalformedWindowError> for InstanceError {
    fn from(err: MalformedWindowError) -> Self {
        InstanceError::MalformedWindow(err)
    }
}

impl From<InvalidParameterError> for InstanceError {
    fn from(err: InvalidParameterError) -> Self {
        InstanceError::InvalidParameter(err)
    }
}

impl From<InvalidSampleError> for InstanceError {
    fn from(err: InvalidSampleError) -> Self {
        InstanceError::InvalidSample(err)
    }
}
