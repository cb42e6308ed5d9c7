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
        err::{InstanceError, InvalidDepotError, InvalidParameterError, MalformedWindowError},
        grid::TravelTimeGrid,
        node::Depot,
    },
};
use tdroute_core::prelude::{TimeDelta, TimeInterval, TimePoint};

/// A validated single-vehicle routing instance.
///
/// Frozen after construction; every derived structure downstream is built
/// from this in strict dependency order.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    windows: Vec<TimeInterval<f64>>,
    grid: TravelTimeGrid,
    depot: Depot,
    service_time: TimeDelta<f64>,
    tightness: TimeDelta<f64>,
    regret_weight: f64,
    start_weight: f64,
}

impl Instance {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        windows: Vec<TimeInterval<f64>>,
        grid: TravelTimeGrid,
        depot: Depot,
        service_time: TimeDelta<f64>,
        tightness: TimeDelta<f64>,
        regret_weight: f64,
        start_weight: f64,
    ) -> Result<Self, InstanceError> {
        let nodes = grid.nodes();
        if windows.len() != nodes {
            return Err(crate::problem::err::WindowCountMismatchError::new(nodes, windows.len()).into());
        }
        if depot.start() == depot.end()
            || depot.start().value() >= nodes
            || depot.end().value() >= nodes
        {
            return Err(InvalidDepotError::new(depot.start(), depot.end(), nodes).into());
        }
        for (i, window) in windows.iter().enumerate() {
            if !window.start().is_finite() || !window.end().is_finite() || !window.is_well_formed()
            {
                return Err(MalformedWindowError::new(NodeId::new(i), *window).into());
            }
        }
        if !service_time.is_finite() || service_time.value() < 0.0 {
            return Err(InvalidParameterError::new("service_time", service_time.value()).into());
        }
        if !tightness.is_finite() || tightness.value() < 0.0 {
            return Err(InvalidParameterError::new("tightness", tightness.value()).into());
        }
        if !regret_weight.is_finite() {
            return Err(InvalidParameterError::new("regret_weight", regret_weight).into());
        }
        if !start_weight.is_finite() {
            return Err(InvalidParameterError::new("start_weight", start_weight).into());
        }

        Ok(Self {
            windows,
            grid,
            depot,
            service_time,
            tightness,
            regret_weight,
            start_weight,
        })
    }

    #[inline]
    pub fn nodes(&self) -> usize {
        self.windows.len()
    }

    #[inline]
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes()).map(NodeId::new)
    }

    /// All nodes that are neither depot copy, in ascending id order.
    #[inline]
    pub fn customers(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.node_ids().filter(|&i| !self.depot.contains(i))
    }

    #[inline]
    pub fn window(&self, node: NodeId) -> TimeInterval<f64> {
        self.windows[node.value()]
    }

    #[inline]
    pub fn earliest(&self, node: NodeId) -> TimePoint<f64> {
        self.windows[node.value()].start()
    }

    #[inline]
    pub fn latest(&self, node: NodeId) -> TimePoint<f64> {
        self.windows[node.value()].end()
    }

    #[inline]
    pub fn grid(&self) -> &TravelTimeGrid {
        &self.grid
    }

    #[inline]
    pub fn depot(&self) -> Depot {
        self.depot
    }

    #[inline]
    pub fn service_time(&self) -> TimeDelta<f64> {
        self.service_time
    }

    #[inline]
    pub fn tightness(&self) -> TimeDelta<f64> {
        self.tightness
    }

    #[inline]
    pub fn regret_weight(&self) -> f64 {
        self.regret_weight
    }

    #[inline]
    pub fn start_weight(&self) -> f64 {
        self.start_weight
    }
}
