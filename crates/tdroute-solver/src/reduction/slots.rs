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

use crate::reduction::err::EmptySlotRangeError;
use tdroute_model::prelude::{Instance, NodeId};

/// Boundary behavior of the slot computation at exact breakpoints.
///
/// The threshold semantics admit two readings; both are implemented and the
/// choice is an explicit configuration value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SlotBoundaryPolicy {
    /// The first and last retained slot may overhang the tolerated window.
    #[default]
    Covering,
    /// Retained slots lie fully inside the tolerated window.
    Interior,
}

/// A contiguous half-open range `[start, end)` of slot indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotRange {
    start: usize,
    end: usize,
}

impl SlotRange {
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    #[inline]
    pub fn contains(&self, k: usize) -> bool {
        self.start <= k && k < self.end
    }

    #[inline]
    pub fn iter(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

/// Feasible departure slots per node.
///
/// Every node except the depot's end copy carries a non-empty contiguous
/// range. The row-major (node, slot) enumeration fixes the slot-indicator
/// numbering and is an externally observable contract.
#[derive(Debug, Clone, PartialEq)]
pub struct DepartureSlots {
    ranges: Vec<Option<SlotRange>>,
    total: usize,
}

impl DepartureSlots {
    pub fn compute(
        instance: &Instance,
        policy: SlotBoundaryPolicy,
    ) -> Result<Self, EmptySlotRangeError> {
        let grid = instance.grid();
        let end = instance.depot().end();
        let slot_count = grid.intervals();
        let tolerance = instance.tightness() + instance.service_time();

        let mut ranges = Vec::with_capacity(instance.nodes());
        let mut total = 0;
        for node in instance.node_ids() {
            if node == end {
                ranges.push(None);
                continue;
            }
            let open = instance.earliest(node).value();
            let close = (instance.latest(node) + tolerance).value();

            let below_open = grid
                .breakpoints()
                .partition_point(|b| b.value() < open);
            let at_or_below_close = grid
                .breakpoints()
                .partition_point(|b| b.value() <= close);

            let (kmin, kmax) = match policy {
                SlotBoundaryPolicy::Covering => (
                    below_open.saturating_sub(1),
                    at_or_below_close.min(slot_count),
                ),
                SlotBoundaryPolicy::Interior => {
                    if below_open > slot_count || at_or_below_close == 0 {
                        return Err(EmptySlotRangeError::new(node, instance.window(node)));
                    }
                    (below_open, at_or_below_close - 1)
                }
            };

            if kmax <= kmin {
                return Err(EmptySlotRangeError::new(node, instance.window(node)));
            }
            let range = SlotRange::new(kmin, kmax);
            total += range.len();
            ranges.push(Some(range));
        }

        Ok(Self { ranges, total })
    }

    #[inline]
    pub fn range(&self, node: NodeId) -> Option<SlotRange> {
        self.ranges.get(node.value()).copied().flatten()
    }

    /// Slot indices of `node`; empty for the depot's end copy.
    #[inline]
    pub fn slots(&self, node: NodeId) -> std::ops::Range<usize> {
        match self.range(node) {
            Some(r) => r.iter(),
            None => 0..0,
        }
    }

    /// Total retained (node, slot) pair count (`kappa`).
    #[inline]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Retained (node, slot) pairs in row-major enumeration order.
    pub fn pairs(&self) -> impl Iterator<Item = (NodeId, usize)> + '_ {
        self.ranges.iter().enumerate().flat_map(|(i, range)| {
            range
                .iter()
                .flat_map(move |r| r.iter().map(move |k| (NodeId::new(i), k)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tdroute_core::prelude::{TimeDelta, TimeInterval, TimePoint};
    use tdroute_model::prelude::{Depot, InstanceBuilder};

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

    /// Three nodes (end = 0, customer = 1, start = 2), breakpoints every 10
    /// over [0, 40], constant travel times.
    fn instance_with_customer_window(a: f64, b: f64) -> Instance {
        InstanceBuilder::new()
            .with_windows([iv(0.0, 40.0), iv(a, b), iv(0.0, 40.0)])
            .with_breakpoints([tp(0.0), tp(10.0), tp(20.0), tp(30.0), tp(40.0)])
            .with_travel_samples(vec![2.0; 45])
            .with_depot(Depot::new(nid(2), nid(0)))
            .build()
            .unwrap()
    }

    #[test]
    fn test_end_node_has_no_slots() {
        let inst = instance_with_customer_window(10.0, 30.0);
        let slots = DepartureSlots::compute(&inst, SlotBoundaryPolicy::Covering).unwrap();
        assert_eq!(slots.range(nid(0)), None);
        assert_eq!(slots.slots(nid(0)), 0..0);
    }

    #[test]
    fn test_covering_policy_at_exact_breakpoints() {
        let inst = instance_with_customer_window(10.0, 30.0);
        let slots = DepartureSlots::compute(&inst, SlotBoundaryPolicy::Covering).unwrap();
        // No breakpoint lies strictly below 0, so the depot start keeps all slots.
        assert_eq!(slots.range(nid(2)), Some(SlotRange::new(0, 4)));
        // kmin is the last breakpoint below 10 (index 0); kmax the first above 30 (index 4).
        assert_eq!(slots.range(nid(1)), Some(SlotRange::new(0, 4)));
    }

    #[test]
    fn test_interior_policy_at_exact_breakpoints() {
        let inst = instance_with_customer_window(10.0, 30.0);
        let slots = DepartureSlots::compute(&inst, SlotBoundaryPolicy::Interior).unwrap();
        // Slots [10, 20] and [20, 30] lie fully inside the window.
        assert_eq!(slots.range(nid(1)), Some(SlotRange::new(1, 3)));
        assert_eq!(slots.range(nid(2)), Some(SlotRange::new(0, 4)));
    }

    #[test]
    fn test_policies_diverge_off_grid() {
        let inst = instance_with_customer_window(12.0, 28.0);
        let covering = DepartureSlots::compute(&inst, SlotBoundaryPolicy::Covering).unwrap();
        assert_eq!(covering.range(nid(1)), Some(SlotRange::new(1, 3)));
        // No aligned slot fits strictly inside [12, 28].
        let interior = DepartureSlots::compute(&inst, SlotBoundaryPolicy::Interior);
        assert!(matches!(interior, Err(e) if e.node() == nid(1)));
    }

    #[test]
    fn test_tolerance_widens_the_closing_end() {
        let inst = InstanceBuilder::new()
            .with_windows([iv(0.0, 40.0), iv(10.0, 19.0), iv(0.0, 40.0)])
            .with_breakpoints([tp(0.0), tp(10.0), tp(20.0), tp(30.0), tp(40.0)])
            .with_travel_samples(vec![2.0; 45])
            .with_depot(Depot::new(nid(2), nid(0)))
            .with_tightness(TimeDelta::new(6.0))
            .with_service_time(TimeDelta::new(5.0))
            .build()
            .unwrap();
        // close = 19 + 6 + 5 = 30.
        let slots = DepartureSlots::compute(&inst, SlotBoundaryPolicy::Interior).unwrap();
        assert_eq!(slots.range(nid(1)), Some(SlotRange::new(1, 3)));
    }

    #[test]
    fn test_window_past_the_grid_is_fatal() {
        let inst = instance_with_customer_window(50.0, 60.0);
        let r = DepartureSlots::compute(&inst, SlotBoundaryPolicy::Covering);
        match r {
            Err(e) => {
                assert_eq!(e.node(), nid(1));
                assert_eq!(e.window(), iv(50.0, 60.0));
            }
            Ok(_) => panic!("expected an empty slot range"),
        }
    }

    #[test]
    fn test_pair_enumeration_is_row_major() {
        let inst = instance_with_customer_window(10.0, 30.0);
        let slots = DepartureSlots::compute(&inst, SlotBoundaryPolicy::Interior).unwrap();
        let pairs: Vec<_> = slots.pairs().collect();
        let expected: Vec<(NodeId, usize)> = vec![
            (nid(1), 1),
            (nid(1), 2),
            (nid(2), 0),
            (nid(2), 1),
            (nid(2), 2),
            (nid(2), 3),
        ];
        assert_eq!(pairs, expected);
        assert_eq!(slots.total(), 6);
    }
}
