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

use crate::reduction::slots::DepartureSlots;
use std::collections::BTreeSet;
use tdroute_core::prelude::TimeDelta;
use tdroute_model::prelude::{Instance, NodeId};

/// Pairwise precedence relation over the node set.
///
/// `Before(i)` holds the nodes that must precede `i` on any feasible route,
/// `After(i)` the nodes that must follow it, and `Concurrent(i)` the nodes
/// whose relative order is undecided. `b in After(a)` iff `a in Before(b)`;
/// mutually unusable customer pairs land in `Before` on both sides, so the
/// `After` relation stays antisymmetric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DominanceOrdering {
    before: Vec<BTreeSet<NodeId>>,
    concurrent: Vec<BTreeSet<NodeId>>,
    after: Vec<BTreeSet<NodeId>>,
}

impl DominanceOrdering {
    /// Classifies every node pair, normalizes the depot copies, and
    /// transitively reduces the `After` relation.
    pub fn classify(instance: &Instance, slots: &DepartureSlots) -> Self {
        let n = instance.nodes();
        let mut ordering = Self {
            before: vec![BTreeSet::new(); n],
            concurrent: vec![BTreeSet::new(); n],
            after: vec![BTreeSet::new(); n],
        };

        ordering.classify_pairs(instance, slots);
        ordering.normalize_depot(instance);
        ordering.reduce();
        ordering
    }

    fn classify_pairs(&mut self, instance: &Instance, slots: &DepartureSlots) {
        let grid = instance.grid();
        let tightness = instance.tightness();

        for node in instance.customers() {
            for other in instance.node_ids() {
                if other == node {
                    continue;
                }
                let fastest_out = slots
                    .slots(node)
                    .map(|k| grid.sample(node, other, k).value())
                    .fold(f64::INFINITY, f64::min);
                if instance.earliest(node) + TimeDelta::new(fastest_out)
                    > instance.latest(other) + tightness
                {
                    // `other` can never be reached from `node` in time.
                    self.before[node.value()].insert(other);
                    continue;
                }
                let fastest_in = slots
                    .slots(other)
                    .map(|k| grid.sample(other, node, k).value())
                    .fold(f64::INFINITY, f64::min);
                if fastest_in.is_finite()
                    && instance.earliest(other) + TimeDelta::new(fastest_in)
                        > instance.latest(node) + tightness
                {
                    // `node` can never be reached from `other` in time.
                    self.after[node.value()].insert(other);
                } else {
                    self.concurrent[node.value()].insert(other);
                }
            }
        }
    }

    /// The depot copies bracket every customer: the start node precedes all
    /// of them and the end node follows all of them, overriding whatever the
    /// pairwise tests produced. There is no start-to-end edge.
    fn normalize_depot(&mut self, instance: &Instance) {
        let start = instance.depot().start();
        let end = instance.depot().end();

        for node in instance.customers() {
            let i = node.value();
            self.concurrent[i].remove(&start);
            self.concurrent[i].remove(&end);
            self.before[i].remove(&end);
            self.after[i].remove(&start);
            self.before[i].insert(start);
            self.after[i].insert(end);
            self.after[start.value()].insert(node);
            self.before[end.value()].insert(node);
        }
    }

    /// Two-pass transitive reduction of the `After` relation. Removal pairs
    /// are collected against an immutable snapshot and applied afterwards,
    /// so the result does not depend on iteration order.
    fn reduce(&mut self) {
        let snapshot = self.after.clone();
        let mut removals: Vec<(usize, NodeId)> = Vec::new();
        for (node, reachable) in snapshot.iter().enumerate() {
            for between in reachable {
                for outside in &snapshot[between.value()] {
                    if reachable.contains(outside) {
                        removals.push((node, *outside));
                    }
                }
            }
        }
        for (node, outside) in removals {
            self.after[node].remove(&outside);
            self.before[outside.value()].remove(&NodeId::new(node));
        }
    }

    #[inline]
    pub fn before(&self, node: NodeId) -> &BTreeSet<NodeId> {
        &self.before[node.value()]
    }

    #[inline]
    pub fn concurrent(&self, node: NodeId) -> &BTreeSet<NodeId> {
        &self.concurrent[node.value()]
    }

    #[inline]
    pub fn after(&self, node: NodeId) -> &BTreeSet<NodeId> {
        &self.after[node.value()]
    }

    #[inline]
    pub fn nodes(&self) -> usize {
        self.after.len()
    }
}
