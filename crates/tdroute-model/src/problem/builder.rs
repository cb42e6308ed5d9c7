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
    problem::{
        err::{InstanceError, WindowCountMismatchError},
        grid::TravelTimeGrid,
        instance::Instance,
        node::Depot,
    },
};
use tdroute_core::prelude::{TimeDelta, TimeInterval, TimePoint};

#[derive(Debug, Clone)]
pub struct InstanceBuilder {
    nodes: Option<usize>,
    windows: Vec<TimeInterval<f64>>,
    breakpoints: Vec<TimePoint<f64>>,
    travel_samples: Vec<f64>,
    depot: Depot,
    service_time: TimeDelta<f64>,
    tightness: TimeDelta<f64>,
    regret_weight: f64,
    start_weight: f64,
}

impl Default for InstanceBuilder {
    fn default() -> Self {
        Self {
            nodes: None,
            windows: Vec::new(),
            breakpoints: Vec::new(),
            travel_samples: Vec::new(),
            depot: Depot::new(NodeId::new(0), NodeId::new(1)),
            service_time: TimeDelta::zero(),
            tightness: TimeDelta::zero(),
            regret_weight: 1.0,
            start_weight: 0.0,
        }
    }
}

impl InstanceBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the expected node count; `build` fails when the windows
    /// disagree. Optional, inferred from the windows otherwise.
    #[inline]
    pub fn with_nodes(mut self, nodes: usize) -> Self {
        self.nodes = Some(nodes);
        self
    }

    #[inline]
    pub fn with_windows<I>(mut self, windows: I) -> Self
    where
        I: IntoIterator<Item = TimeInterval<f64>>,
    {
        self.windows = windows.into_iter().collect();
        self
    }

    #[inline]
    pub fn with_breakpoints<I>(mut self, breakpoints: I) -> Self
    where
        I: IntoIterator<Item = TimePoint<f64>>,
    {
        self.breakpoints = breakpoints.into_iter().collect();
        self
    }

    /// Flat `n * n * (K + 1)` tensor in `[tail][head][breakpoint]` order.
    #[inline]
    pub fn with_travel_samples<I>(mut self, samples: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        self.travel_samples = samples.into_iter().collect();
        self
    }

    #[inline]
    pub fn with_depot(mut self, depot: Depot) -> Self {
        self.depot = depot;
        self
    }

    #[inline]
    pub fn with_service_time(mut self, service_time: TimeDelta<f64>) -> Self {
        self.service_time = service_time;
        self
    }

    #[inline]
    pub fn with_tightness(mut self, tightness: TimeDelta<f64>) -> Self {
        self.tightness = tightness;
        self
    }

    #[inline]
    pub fn with_regret_weight(mut self, regret_weight: f64) -> Self {
        self.regret_weight = regret_weight;
        self
    }

    #[inline]
    pub fn with_start_weight(mut self, start_weight: f64) -> Self {
        self.start_weight = start_weight;
        self
    }

    pub fn build(self) -> Result<Instance, InstanceError> {
        let nodes = self.nodes.unwrap_or(self.windows.len());
        if self.windows.len() != nodes {
            return Err(WindowCountMismatchError::new(nodes, self.windows.len()).into());
        }
        let grid = TravelTimeGrid::new(nodes, self.breakpoints, self.travel_samples)?;
        Instance::new(
            self.windows,
            grid,
            self.depot,
            self.service_time,
            self.tightness,
            self.regret_weight,
            self.start_weight,
        )
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
    fn iv(a: f64, b: f64) -> TimeInterval<f64> {
        TimeInterval::new(tp(a), tp(b))
    }

    #[test]
    fn test_build_minimal() {
        let inst = InstanceBuilder::new()
            .with_windows([iv(0.0, 100.0), iv(10.0, 60.0), iv(0.0, 100.0)])
            .with_breakpoints([tp(0.0), tp(50.0), tp(100.0)])
            .with_travel_samples(vec![5.0; 27])
            .with_depot(Depot::new(nid(2), nid(0)))
            .with_service_time(TimeDelta::new(5.0))
            .with_regret_weight(5.0)
            .with_start_weight(0.1)
            .build()
            .unwrap();
        assert_eq!(inst.nodes(), 3);
        assert_eq!(inst.depot().start(), nid(2));
        assert_eq!(inst.regret_weight(), 5.0);
        assert_eq!(inst.start_weight(), 0.1);
    }

    #[test]
    fn test_declared_node_count_must_match_windows() {
        let r = InstanceBuilder::new()
            .with_nodes(4)
            .with_windows([iv(0.0, 1.0), iv(0.0, 1.0), iv(0.0, 1.0)])
            .with_breakpoints([tp(0.0), tp(1.0)])
            .with_travel_samples(vec![0.0; 32])
            .build();
        match r {
            Err(InstanceError::WindowCountMismatch(e)) => {
                assert_eq!(e.expected(), 4);
                assert_eq!(e.actual(), 3);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_tensor_shape_checked_through_builder() {
        let r = InstanceBuilder::new()
            .with_windows([iv(0.0, 1.0), iv(0.0, 1.0)])
            .with_breakpoints([tp(0.0), tp(1.0)])
            .with_travel_samples(vec![0.0; 9])
            .with_depot(Depot::new(nid(0), nid(1)))
            .build();
        assert!(matches!(r, Err(InstanceError::TravelTensorShape(_))));
    }
}
