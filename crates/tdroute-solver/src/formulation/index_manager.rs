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
    formulation::index::{ComboIndex, EdgeIndex, SlotIndex},
    reduction::{DepartureSlots, Edge, ReducedGraph, SlotRange},
};
use std::collections::HashMap;
use tdroute_model::prelude::NodeId;

/// Flat column positions of the five variable families.
///
/// `x_e = e`, `t_e = m + e`, `chi_s = 2m + s`, `a_i = 2m + kappa + i`,
/// `r = 2m + kappa + n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VariableLayout {
    edges: usize,
    slots: usize,
    nodes: usize,
}

impl VariableLayout {
    #[inline]
    pub fn new(edges: usize, slots: usize, nodes: usize) -> Self {
        Self {
            edges,
            slots,
            nodes,
        }
    }

    #[inline]
    pub fn edge_column(&self, e: EdgeIndex) -> usize {
        e.0
    }

    #[inline]
    pub fn travel_column(&self, e: EdgeIndex) -> usize {
        self.edges + e.0
    }

    #[inline]
    pub fn slot_column(&self, s: SlotIndex) -> usize {
        2 * self.edges + s.0
    }

    #[inline]
    pub fn arrival_column(&self, node: NodeId) -> usize {
        2 * self.edges + self.slots + node.value()
    }

    #[inline]
    pub fn regret_column(&self) -> usize {
        2 * self.edges + self.slots + self.nodes
    }

    #[inline]
    pub fn total(&self) -> usize {
        2 * self.edges + self.slots + self.nodes + 1
    }
}

/// Bidirectional maps between domain keys and the dense variable indices.
///
/// Forward lookups return `None` for keys the reduction did not retain;
/// reverse lookups are `Vec`-backed. Combo indices follow the node-major
/// enumeration: node ascending, out-neighbors in edge order, slots
/// ascending. Out-edges of a node hold consecutive edge ids, so each edge
/// owns one contiguous combo block.
#[derive(Debug, Clone, PartialEq)]
pub struct FormulationIndexManager {
    nodes: usize,
    edges: Vec<Edge>,
    edge_ids: HashMap<Edge, EdgeIndex>,
    slot_ranges: Vec<Option<(SlotRange, usize)>>,
    slot_pairs: Vec<(NodeId, usize)>,
    combo_base: Vec<usize>,
    combo_triples: Vec<(NodeId, NodeId, usize)>,
}

impl FormulationIndexManager {
    pub fn new(graph: &ReducedGraph, slots: &DepartureSlots, nodes: usize) -> Self {
        let edges = graph.edges().to_vec();
        let edge_ids = edges
            .iter()
            .enumerate()
            .map(|(id, &edge)| (edge, EdgeIndex(id)))
            .collect();

        let mut slot_ranges = vec![None; nodes];
        let mut slot_pairs = Vec::with_capacity(slots.total());
        let mut offset = 0;
        for node in (0..nodes).map(NodeId::new) {
            if let Some(range) = slots.range(node) {
                slot_ranges[node.value()] = Some((range, offset));
                offset += range.len();
                slot_pairs.extend(range.iter().map(|k| (node, k)));
            }
        }

        let mut combo_base = Vec::with_capacity(edges.len());
        let mut combo_triples = Vec::new();
        for edge in &edges {
            combo_base.push(combo_triples.len());
            for k in slots.slots(edge.tail()) {
                combo_triples.push((edge.tail(), edge.head(), k));
            }
        }

        Self {
            nodes,
            edges,
            edge_ids,
            slot_ranges,
            slot_pairs,
            combo_base,
            combo_triples,
        }
    }

    #[inline]
    pub fn edge_index(&self, tail: NodeId, head: NodeId) -> Option<EdgeIndex> {
        self.edge_ids.get(&Edge::new(tail, head)).copied()
    }

    #[inline]
    pub fn edge_of(&self, e: EdgeIndex) -> Option<Edge> {
        self.edges.get(e.0).copied()
    }

    #[inline]
    pub fn slot_index(&self, node: NodeId, k: usize) -> Option<SlotIndex> {
        let (range, base) = self.slot_ranges.get(node.value()).copied().flatten()?;
        if range.contains(k) {
            Some(SlotIndex(base + k - range.start()))
        } else {
            None
        }
    }

    #[inline]
    pub fn slot_of(&self, s: SlotIndex) -> Option<(NodeId, usize)> {
        self.slot_pairs.get(s.0).copied()
    }

    #[inline]
    pub fn combo_index(&self, tail: NodeId, head: NodeId, k: usize) -> Option<ComboIndex> {
        let e = self.edge_index(tail, head)?;
        let (range, _) = self.slot_ranges.get(tail.value()).copied().flatten()?;
        if range.contains(k) {
            Some(ComboIndex(self.combo_base[e.0] + k - range.start()))
        } else {
            None
        }
    }

    #[inline]
    pub fn combo_of(&self, c: ComboIndex) -> Option<(NodeId, NodeId, usize)> {
        self.combo_triples.get(c.0).copied()
    }

    /// Combo indices of edge `e`, one per feasible slot of its tail.
    #[inline]
    pub fn combos_of_edge(&self, e: EdgeIndex) -> impl Iterator<Item = (ComboIndex, usize)> + '_ {
        let base = self.combo_base[e.0];
        let end = self
            .combo_base
            .get(e.0 + 1)
            .copied()
            .unwrap_or(self.combo_triples.len());
        (base..end).map(move |c| (ComboIndex(c), self.combo_triples[c].2))
    }

    /// Edges paired with their indices, in enumeration order.
    pub fn edge_entries(&self) -> impl Iterator<Item = (EdgeIndex, Edge)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .map(|(id, &edge)| (EdgeIndex(id), edge))
    }

    /// (node, slot) pairs paired with their indices, in enumeration order.
    pub fn slot_entries(&self) -> impl Iterator<Item = (SlotIndex, NodeId, usize)> + '_ {
        self.slot_pairs
            .iter()
            .enumerate()
            .map(|(id, &(node, k))| (SlotIndex(id), node, k))
    }

    /// Combo triples paired with their indices, in enumeration order.
    pub fn combo_entries(
        &self,
    ) -> impl Iterator<Item = (ComboIndex, NodeId, NodeId, usize)> + '_ {
        self.combo_triples
            .iter()
            .enumerate()
            .map(|(id, &(tail, head, k))| (ComboIndex(id), tail, head, k))
    }

    #[inline]
    pub fn nodes(&self) -> usize {
        self.nodes
    }

    #[inline]
    pub fn edges(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn slots(&self) -> usize {
        self.slot_pairs.len()
    }

    #[inline]
    pub fn combos(&self) -> usize {
        self.combo_triples.len()
    }

    #[inline]
    pub fn layout(&self) -> VariableLayout {
        VariableLayout::new(self.edges(), self.slots(), self.nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reduction::{DominanceOrdering, SlotBoundaryPolicy};
    use tdroute_core::prelude::{TimeInterval, TimePoint};
    use tdroute_model::prelude::{Depot, Instance, InstanceBuilder};

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

    fn four_node_instance() -> Instance {
        InstanceBuilder::new()
            .with_windows([iv(0.0, 300.0), iv(50.0, 150.0), iv(0.0, 300.0), iv(60.0, 160.0)])
            .with_breakpoints([tp(0.0), tp(100.0), tp(200.0), tp(300.0)])
            .with_travel_samples(vec![5.0; 64])
            .with_depot(Depot::new(nid(2), nid(0)))
            .build()
            .unwrap()
    }

    fn manager_of(inst: &Instance) -> (FormulationIndexManager, DepartureSlots) {
        let slots = DepartureSlots::compute(inst, SlotBoundaryPolicy::Covering).unwrap();
        let ordering = DominanceOrdering::classify(inst, &slots);
        let graph = ReducedGraph::materialize(&ordering, inst.depot()).unwrap();
        (
            FormulationIndexManager::new(&graph, &slots, inst.nodes()),
            slots,
        )
    }

    #[test]
    fn test_edge_maps_are_bijective() {
        let inst = four_node_instance();
        let (mgr, _) = manager_of(&inst);
        for id in 0..mgr.edges() {
            let edge = mgr.edge_of(EdgeIndex(id)).unwrap();
            assert_eq!(mgr.edge_index(edge.tail(), edge.head()), Some(EdgeIndex(id)));
        }
        assert_eq!(mgr.edge_index(nid(0), nid(1)), None);
        assert_eq!(mgr.edge_of(EdgeIndex(mgr.edges())), None);
    }

    #[test]
    fn test_slot_maps_are_bijective() {
        let inst = four_node_instance();
        let (mgr, slots) = manager_of(&inst);
        assert_eq!(mgr.slots(), slots.total());
        for s in 0..mgr.slots() {
            let (node, k) = mgr.slot_of(SlotIndex(s)).unwrap();
            assert_eq!(mgr.slot_index(node, k), Some(SlotIndex(s)));
        }
        // The end node keeps no slots, and out-of-range slots give None.
        assert_eq!(mgr.slot_index(nid(0), 0), None);
        assert_eq!(mgr.slot_index(nid(1), 99), None);
        assert_eq!(mgr.slot_of(SlotIndex(mgr.slots())), None);
    }

    #[test]
    fn test_combo_maps_are_bijective() {
        let inst = four_node_instance();
        let (mgr, _) = manager_of(&inst);
        for c in 0..mgr.combos() {
            let (tail, head, k) = mgr.combo_of(ComboIndex(c)).unwrap();
            assert_eq!(mgr.combo_index(tail, head, k), Some(ComboIndex(c)));
        }
        assert_eq!(mgr.combo_index(nid(0), nid(1), 0), None);
        assert_eq!(mgr.combo_of(ComboIndex(mgr.combos())), None);
    }

    #[test]
    fn test_combo_enumeration_is_node_major() {
        let inst = four_node_instance();
        let (mgr, slots) = manager_of(&inst);
        // Customers keep slots {0, 1}, the start node all 3.
        assert_eq!(slots.total(), 7);
        let first = mgr.combo_of(ComboIndex(0)).unwrap();
        assert_eq!(first, (nid(1), nid(3), 0));
        let mut expected = 0;
        for e in 0..mgr.edges() {
            for (c, k) in mgr.combos_of_edge(EdgeIndex(e)) {
                assert_eq!(c, ComboIndex(expected));
                let edge = mgr.edge_of(EdgeIndex(e)).unwrap();
                assert_eq!(mgr.combo_of(c), Some((edge.tail(), edge.head(), k)));
                expected += 1;
            }
        }
        assert_eq!(expected, mgr.combos());
    }

    #[test]
    fn test_variable_layout_columns() {
        let layout = VariableLayout::new(6, 9, 4);
        assert_eq!(layout.edge_column(EdgeIndex(2)), 2);
        assert_eq!(layout.travel_column(EdgeIndex(2)), 8);
        assert_eq!(layout.slot_column(SlotIndex(0)), 12);
        assert_eq!(layout.arrival_column(nid(3)), 24);
        assert_eq!(layout.regret_column(), 25);
        assert_eq!(layout.total(), 26);
    }
}
