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

use tdroute_model::prelude::Instance;

/// Instance-derived relaxation constants and variable boxes.
///
/// Each big-M family is the smallest bound that provably deactivates its
/// constraint group when the companion indicator is zero; no shared magic
/// constant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BigM {
    arrival_ub: f64,
    travel_ub: f64,
    edge: f64,
    slot: f64,
    regret_lb: f64,
    regret_ub: f64,
}

impl BigM {
    pub fn derive(instance: &Instance) -> Self {
        let grid = instance.grid();
        let service = instance.service_time().value();
        let max_travel = grid.max_sample().value();
        let horizon_end = grid.horizon().end().value();
        let horizon_start = grid.horizon().start().value();

        let min_earliest = instance
            .node_ids()
            .map(|i| instance.earliest(i).value())
            .fold(f64::INFINITY, f64::min);
        let min_latest = instance
            .node_ids()
            .map(|i| instance.latest(i).value())
            .fold(f64::INFINITY, f64::min);
        let max_latest = instance
            .node_ids()
            .map(|i| instance.latest(i).value())
            .fold(f64::NEG_INFINITY, f64::max);

        let arrival_ub = horizon_end + max_travel;
        // Bounds |a_i + s - Theta[k]| over the variable boxes.
        let reach = (arrival_ub + service - horizon_start)
            .max(horizon_end - (min_earliest + service))
            .max(0.0);

        Self {
            arrival_ub,
            travel_ub: max_travel,
            edge: arrival_ub + service + max_travel - min_earliest,
            slot: max_travel + grid.max_abs_slope() * reach,
            regret_lb: min_earliest - max_latest,
            regret_ub: arrival_ub - min_latest,
        }
    }

    /// Upper bound on every arrival variable.
    #[inline]
    pub fn arrival_ub(&self) -> f64 {
        self.arrival_ub
    }

    /// Upper bound on every travel-time variable.
    #[inline]
    pub fn travel_ub(&self) -> f64 {
        self.travel_ub
    }

    /// Relaxation constant of the edge time-propagation rows.
    #[inline]
    pub fn edge(&self) -> f64 {
        self.edge
    }

    /// Relaxation constant of the interpolation-linking rows.
    #[inline]
    pub fn slot(&self) -> f64 {
        self.slot
    }

    #[inline]
    pub fn regret_lb(&self) -> f64 {
        self.regret_lb
    }

    #[inline]
    pub fn regret_ub(&self) -> f64 {
        self.regret_ub
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tdroute_core::prelude::{TimeDelta, TimeInterval, TimePoint};
    use tdroute_model::prelude::{Depot, InstanceBuilder, NodeId};

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
    fn test_derived_constants() {
        let mut samples = vec![5.0; 27];
        samples[1 * 3 + 1] = 25.0; // (0 -> 1) at breakpoint 1
        let inst = InstanceBuilder::new()
            .with_windows([iv(0.0, 100.0), iv(10.0, 60.0), iv(0.0, 100.0)])
            .with_breakpoints([tp(0.0), tp(50.0), tp(100.0)])
            .with_travel_samples(samples)
            .with_depot(Depot::new(nid(2), nid(0)))
            .with_service_time(TimeDelta::new(5.0))
            .build()
            .unwrap();
        let m = BigM::derive(&inst);
        assert_eq!(m.travel_ub(), 25.0);
        assert_eq!(m.arrival_ub(), 125.0);
        // arrival_ub + service + max_travel - min_earliest
        assert_eq!(m.edge(), 125.0 + 5.0 + 25.0 - 0.0);
        // steepest slope 0.4 over reach = 125 + 5 - 0 = 130
        assert_eq!(m.slot(), 25.0 + 0.4 * 130.0);
        assert_eq!(m.regret_lb(), 0.0 - 100.0);
        assert_eq!(m.regret_ub(), 125.0 - 60.0);
    }

    #[test]
    fn test_edge_constant_dominates_propagation_gap() {
        let inst = InstanceBuilder::new()
            .with_windows([iv(0.0, 200.0), iv(20.0, 80.0), iv(0.0, 200.0)])
            .with_breakpoints([tp(0.0), tp(100.0), tp(200.0)])
            .with_travel_samples(vec![10.0; 27])
            .with_depot(Depot::new(nid(2), nid(0)))
            .with_service_time(TimeDelta::new(5.0))
            .build()
            .unwrap();
        let m = BigM::derive(&inst);
        // Worst case of a_i + s + t_e - a_j over the boxes.
        let worst = m.arrival_ub() + 5.0 + m.travel_ub() - 0.0;
        assert!(m.edge() >= worst);
    }
}
