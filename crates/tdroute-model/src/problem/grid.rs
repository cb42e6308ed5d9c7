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
    problem::err::{
        InstanceError, InvalidSampleError, NonIncreasingBreakpointsError, TooFewBreakpointsError,
        TravelTensorShapeError,
    },
};
use tdroute_core::math::piecewise;
use tdroute_core::prelude::{TimeDelta, TimeInterval, TimePoint};

/// Piecewise-linear time-of-day-dependent travel times.
///
/// Holds `K + 1` strictly increasing breakpoints and a flat
/// `n * n * (K + 1)` sample tensor in `[tail][head][breakpoint]` order.
/// Travel time between consecutive breakpoints interpolates linearly.
#[derive(Debug, Clone, PartialEq)]
pub struct TravelTimeGrid {
    nodes: usize,
    breakpoints: Vec<TimePoint<f64>>,
    samples: Vec<f64>,
}

impl TravelTimeGrid {
    pub fn new(
        nodes: usize,
        breakpoints: Vec<TimePoint<f64>>,
        samples: Vec<f64>,
    ) -> Result<Self, InstanceError> {
        if breakpoints.len() < 2 {
            return Err(TooFewBreakpointsError::new(breakpoints.len()).into());
        }
        if !breakpoints[0].is_finite() {
            return Err(NonIncreasingBreakpointsError::new(0).into());
        }
        for k in 1..breakpoints.len() {
            if !breakpoints[k].is_finite() || breakpoints[k] <= breakpoints[k - 1] {
                return Err(NonIncreasingBreakpointsError::new(k).into());
            }
        }

        let expected = nodes * nodes * breakpoints.len();
        if samples.len() != expected {
            return Err(TravelTensorShapeError::new(expected, samples.len()).into());
        }
        let per_pair = breakpoints.len();
        for (flat, &value) in samples.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                let tail = flat / (nodes * per_pair);
                let head = (flat / per_pair) % nodes;
                let breakpoint = flat % per_pair;
                return Err(InvalidSampleError::new(
                    NodeId::new(tail),
                    NodeId::new(head),
                    breakpoint,
                    value,
                )
                .into());
            }
        }

        Ok(Self {
            nodes,
            breakpoints,
            samples,
        })
    }

    #[inline]
    pub fn nodes(&self) -> usize {
        self.nodes
    }

    /// Number of time slots `K` (one fewer than the breakpoint count).
    #[inline]
    pub fn intervals(&self) -> usize {
        self.breakpoints.len() - 1
    }

    #[inline]
    pub fn breakpoints(&self) -> &[TimePoint<f64>] {
        &self.breakpoints
    }

    #[inline]
    pub fn breakpoint(&self, k: usize) -> TimePoint<f64> {
        self.breakpoints[k]
    }

    #[inline]
    pub fn horizon(&self) -> TimeInterval<f64> {
        TimeInterval::new(self.breakpoints[0], self.breakpoints[self.breakpoints.len() - 1])
    }

    /// Travel time from `tail` to `head` departing exactly at breakpoint `k`.
    #[inline]
    pub fn sample(&self, tail: NodeId, head: NodeId, k: usize) -> TimeDelta<f64> {
        TimeDelta::new(self.raw_sample(tail, head, k))
    }

    #[inline]
    fn raw_sample(&self, tail: NodeId, head: NodeId, k: usize) -> f64 {
        let per_pair = self.breakpoints.len();
        self.samples[(tail.value() * self.nodes + head.value()) * per_pair + k]
    }

    /// Interpolation slope of the travel time on `(tail, head)` within slot `k`.
    #[inline]
    pub fn slope(&self, tail: NodeId, head: NodeId, k: usize) -> f64 {
        let dv = self.raw_sample(tail, head, k + 1) - self.raw_sample(tail, head, k);
        let dt = (self.breakpoints[k + 1] - self.breakpoints[k]).value();
        dv / dt
    }

    /// Interpolated travel time for a departure at `at`; `None` outside the grid.
    pub fn travel_at(&self, tail: NodeId, head: NodeId, at: TimePoint<f64>) -> Option<TimeDelta<f64>> {
        if !self.horizon().contains(at) {
            return None;
        }
        let k = self
            .breakpoints
            .partition_point(|&b| b <= at)
            .saturating_sub(1)
            .min(self.intervals() - 1);
        piecewise::lerp(
            self.breakpoints[k].value(),
            self.breakpoints[k + 1].value(),
            self.raw_sample(tail, head, k),
            self.raw_sample(tail, head, k + 1),
            at.value(),
        )
        .ok()
        .map(TimeDelta::new)
    }

    /// Largest sample over all ordered pairs and breakpoints.
    pub fn max_sample(&self) -> TimeDelta<f64> {
        TimeDelta::new(self.samples.iter().copied().fold(0.0, f64::max))
    }

    /// Largest absolute interpolation slope over all ordered pairs and slots.
    pub fn max_abs_slope(&self) -> f64 {
        let mut worst = 0.0_f64;
        for i in 0..self.nodes {
            for j in 0..self.nodes {
                if i == j {
                    continue;
                }
                for k in 0..self.intervals() {
                    worst = worst.max(self.slope(NodeId::new(i), NodeId::new(j), k).abs());
                }
            }
        }
        worst
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

    fn grid_2x2() -> TravelTimeGrid {
        // 2 nodes, breakpoints [0, 10, 30]; samples indexed [tail][head][k].
        let samples = vec![
            0.0, 0.0, 0.0, // 0 -> 0
            4.0, 6.0, 6.0, // 0 -> 1
            8.0, 4.0, 2.0, // 1 -> 0
            0.0, 0.0, 0.0, // 1 -> 1
        ];
        TravelTimeGrid::new(2, vec![tp(0.0), tp(10.0), tp(30.0)], samples).unwrap()
    }

    #[test]
    fn test_shape_validation() {
        assert!(matches!(
            TravelTimeGrid::new(2, vec![tp(0.0), tp(1.0)], vec![0.0; 7]),
            Err(InstanceError::TravelTensorShape(_))
        ));
        assert!(matches!(
            TravelTimeGrid::new(2, vec![tp(0.0)], vec![0.0; 4]),
            Err(InstanceError::TooFewBreakpoints(_))
        ));
    }

    #[test]
    fn test_breakpoints_must_strictly_increase() {
        let err = TravelTimeGrid::new(1, vec![tp(0.0), tp(0.0), tp(5.0)], vec![0.0; 3]);
        match err {
            Err(InstanceError::NonIncreasingBreakpoints(e)) => assert_eq!(e.position(), 1),
            other => panic!("unexpected: {:?}", other),
        }
        assert!(matches!(
            TravelTimeGrid::new(1, vec![tp(0.0), tp(f64::NAN)], vec![0.0; 2]),
            Err(InstanceError::NonIncreasingBreakpoints(_))
        ));
    }

    #[test]
    fn test_samples_must_be_finite_and_non_negative() {
        let mut samples = vec![0.0; 12];
        samples[7] = -1.0; // flat index of (tail 1, head 0, breakpoint 1)
        let err = TravelTimeGrid::new(2, vec![tp(0.0), tp(1.0), tp(2.0)], samples);
        match err {
            Err(InstanceError::InvalidSample(e)) => {
                assert_eq!(e.tail(), nid(1));
                assert_eq!(e.head(), nid(0));
                assert_eq!(e.breakpoint(), 1);
                assert_eq!(e.value(), -1.0);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_sample_and_slope_lookup() {
        let g = grid_2x2();
        assert_eq!(g.nodes(), 2);
        assert_eq!(g.intervals(), 2);
        assert_eq!(g.sample(nid(0), nid(1), 0).value(), 4.0);
        assert_eq!(g.sample(nid(1), nid(0), 2).value(), 2.0);
        // (6 - 4) / (10 - 0)
        assert_eq!(g.slope(nid(0), nid(1), 0), 0.2);
        // (2 - 4) / (30 - 10)
        assert_eq!(g.slope(nid(1), nid(0), 1), -0.1);
    }

    #[test]
    fn test_travel_at_interpolates() {
        let g = grid_2x2();
        assert_eq!(g.travel_at(nid(0), nid(1), tp(5.0)).unwrap().value(), 5.0);
        assert_eq!(g.travel_at(nid(0), nid(1), tp(10.0)).unwrap().value(), 6.0);
        assert_eq!(g.travel_at(nid(1), nid(0), tp(20.0)).unwrap().value(), 3.0);
        assert_eq!(g.travel_at(nid(0), nid(1), tp(30.0)).unwrap().value(), 6.0);
        assert!(g.travel_at(nid(0), nid(1), tp(-0.1)).is_none());
        assert!(g.travel_at(nid(0), nid(1), tp(30.1)).is_none());
    }

    #[test]
    fn test_bounds_over_grid() {
        let g = grid_2x2();
        assert_eq!(g.max_sample().value(), 8.0);
        // Steepest segment is (1 -> 0) over [0, 10]: |(4 - 8) / 10| = 0.4.
        assert_eq!(g.max_abs_slope(), 0.4);
    }
}
