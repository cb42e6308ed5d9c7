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
    formulation::{
        bigm::BigM, index::EdgeIndex, index_manager::FormulationIndexManager,
        rows::{RowLayout, RowSense},
    },
    reduction::ReducedGraph,
};
use tdroute_model::prelude::Instance;

/// The assembled sparse constraint system.
///
/// Stored column-major: one sparse column of `(row, coefficient)` pairs per
/// variable, sorted by row, plus the per-row sense and right-hand side.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintSystem {
    columns: Vec<Vec<(usize, f64)>>,
    senses: Vec<RowSense>,
    rhs: Vec<f64>,
}

impl ConstraintSystem {
    /// Assembles every column family against the fixed row layout.
    pub fn build(
        instance: &Instance,
        graph: &ReducedGraph,
        indices: &FormulationIndexManager,
        bigm: &BigM,
    ) -> Self {
        let rows = RowLayout::new(
            instance.nodes(),
            indices.edges(),
            indices.combos(),
            instance.depot(),
        );
        let grid = instance.grid();
        let service = instance.service_time().value();

        let mut columns: Vec<Vec<(usize, f64)>> = vec![Vec::new(); indices.layout().total()];
        let layout = indices.layout();

        // Edge binaries: flow conservation plus the propagation-row gate.
        for (e, edge) in indices.edge_entries() {
            let col = &mut columns[layout.edge_column(e)];
            if let Some(row) = rows.flow_out_row(edge.tail()) {
                col.push((row, 1.0));
            }
            if let Some(row) = rows.flow_in_row(edge.head()) {
                col.push((row, 1.0));
            }
            col.push((rows.edge_row(e), -bigm.edge()));
        }

        // Travel times: consumed by the propagation row, pinned from below
        // by every interpolation row of the edge.
        for e in (0..indices.edges()).map(EdgeIndex) {
            let col = &mut columns[layout.travel_column(e)];
            col.push((rows.edge_row(e), -1.0));
            for (c, _) in indices.combos_of_edge(e) {
                col.push((rows.combo_row(c), 1.0));
            }
        }

        // Slot indicators: slot choice, interpolation gating, and the two
        // departure-consistency rows.
        for (s, node, k) in indices.slot_entries() {
            let col = &mut columns[layout.slot_column(s)];
            if let Some(row) = rows.slot_row(node) {
                col.push((row, 1.0));
            }
            for head in graph.out_neighbors(node) {
                if let Some(c) = indices.combo_index(node, head, k) {
                    col.push((rows.combo_row(c), -bigm.slot()));
                }
            }
            if let Some(row) = rows.departure_upper_row(node) {
                col.push((row, -grid.breakpoint(k + 1).value()));
            }
            if let Some(row) = rows.departure_lower_row(node) {
                col.push((row, -grid.breakpoint(k).value()));
            }
        }

        // Arrivals: the depot needs no special-casing because the end node
        // has no out-edges or slots and the start node no in-edges or
        // lateness row.
        for node in instance.node_ids() {
            let col = &mut columns[layout.arrival_column(node)];
            for &id in graph.in_edges(node) {
                col.push((rows.edge_row(EdgeIndex(id)), 1.0));
            }
            for &id in graph.out_edges(node) {
                col.push((rows.edge_row(EdgeIndex(id)), -1.0));
                let edge = graph.edges()[id];
                for (c, k) in indices.combos_of_edge(EdgeIndex(id)) {
                    col.push((rows.combo_row(c), -grid.slope(edge.tail(), edge.head(), k)));
                }
            }
            if let Some(row) = rows.departure_upper_row(node) {
                col.push((row, 1.0));
            }
            if let Some(row) = rows.departure_lower_row(node) {
                col.push((row, 1.0));
            }
            if let Some(row) = rows.lateness_row(node) {
                col.push((row, 1.0));
            }
        }

        // Regret: relaxes every lateness row.
        {
            let col = &mut columns[layout.regret_column()];
            for node in instance.node_ids() {
                if let Some(row) = rows.lateness_row(node) {
                    col.push((row, -1.0));
                }
            }
        }

        for col in &mut columns {
            col.sort_by_key(|&(row, _)| row);
        }

        let mut rhs = vec![0.0; rows.total()];
        for row in rhs.iter_mut().take(3 * (instance.nodes() - 1)) {
            *row = 1.0;
        }
        for e in (0..indices.edges()).map(EdgeIndex) {
            rhs[rows.edge_row(e)] = service - bigm.edge();
        }
        for (c, tail, head, k) in indices.combo_entries() {
            let slope = grid.slope(tail, head, k);
            rhs[rows.combo_row(c)] = grid.sample(tail, head, k).value()
                + slope * (service - grid.breakpoint(k).value())
                - bigm.slot();
        }
        for node in instance.node_ids() {
            if let Some(row) = rows.departure_upper_row(node) {
                rhs[row] = -service;
            }
            if let Some(row) = rows.departure_lower_row(node) {
                rhs[row] = -service;
            }
            if let Some(row) = rows.lateness_row(node) {
                rhs[row] = instance.latest(node).value();
            }
        }

        let senses = (0..rows.total()).map(|r| rows.sense(r)).collect();

        Self {
            columns,
            senses,
            rhs,
        }
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.columns.len()
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rhs.len()
    }

    /// Sparse column of variable `col`, sorted by row.
    #[inline]
    pub fn column(&self, col: usize) -> &[(usize, f64)] {
        &self.columns[col]
    }

    #[inline]
    pub fn sense(&self, row: usize) -> RowSense {
        self.senses[row]
    }

    #[inline]
    pub fn senses(&self) -> &[RowSense] {
        &self.senses
    }

    #[inline]
    pub fn rhs(&self) -> &[f64] {
        &self.rhs
    }

    /// Densifies the sparse columns; intended for tests and debugging.
    pub fn to_dense(&self) -> Vec<Vec<f64>> {
        let mut dense = vec![vec![0.0; self.cols()]; self.rows()];
        for (col, entries) in self.columns.iter().enumerate() {
            for &(row, coeff) in entries {
                dense[row][col] += coeff;
            }
        }
        dense
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reduction::{DepartureSlots, DominanceOrdering, SlotBoundaryPolicy};
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

    /// Three nodes (end = 0, customer = 1, start = 2), breakpoints
    /// [0, 50, 100], constant travel time 5, service time 5.
    fn three_node_instance() -> Instance {
        InstanceBuilder::new()
            .with_windows([iv(0.0, 100.0), iv(10.0, 60.0), iv(0.0, 100.0)])
            .with_breakpoints([tp(0.0), tp(50.0), tp(100.0)])
            .with_travel_samples(vec![5.0; 27])
            .with_depot(Depot::new(nid(2), nid(0)))
            .with_service_time(TimeDelta::new(5.0))
            .build()
            .unwrap()
    }

    fn system_of(
        inst: &Instance,
    ) -> (ConstraintSystem, FormulationIndexManager, BigM) {
        let slots = DepartureSlots::compute(inst, SlotBoundaryPolicy::Covering).unwrap();
        let ordering = DominanceOrdering::classify(inst, &slots);
        let graph = ReducedGraph::materialize(&ordering, inst.depot()).unwrap();
        let indices = FormulationIndexManager::new(&graph, &slots, inst.nodes());
        let bigm = BigM::derive(inst);
        let system = ConstraintSystem::build(inst, &graph, &indices, &bigm);
        (system, indices, bigm)
    }

    #[test]
    fn test_counts_match_the_catalog() {
        let inst = three_node_instance();
        let (system, indices, _) = system_of(&inst);
        // m = 2 edges (1 -> 0 and 2 -> 1), kappa = 4, K2 = 4.
        assert_eq!(indices.edges(), 2);
        assert_eq!(indices.slots(), 4);
        assert_eq!(indices.combos(), 4);
        assert_eq!(system.cols(), 2 * 2 + 4 + 3 + 1);
        assert_eq!(system.rows(), 6 * 2 + 2 + 4);
        let senses: String = system.senses().iter().map(|s| s.symbol()).collect();
        assert_eq!(senses, "EEEEEEGGGGGGLLGGLL");
    }

    #[test]
    fn test_dense_round_trip_matches_longhand_matrix() {
        let inst = three_node_instance();
        let (system, _, bigm) = system_of(&inst);

        // M_edge = 105 + 5 + 5 - 0, M_slot = 5 (all slopes are zero).
        assert_eq!(bigm.edge(), 115.0);
        assert_eq!(bigm.slot(), 5.0);

        // Columns: x0 x1 t0 t1 | y_1,0 y_1,1 y_2,0 y_2,1 | a0 a1 a2 | r.
        // Rows: out(1) out(2) in(0) in(1) slot(1) slot(2) | edge0 edge1 |
        // combos (1,0,0) (1,0,1) (2,1,0) (2,1,1) | up(1) up(2) lo(1) lo(2) |
        // late(0) late(1).
        let mut want = vec![vec![0.0_f64; 12]; 18];
        // x0 = edge (1, 0)
        want[0][0] = 1.0;
        want[2][0] = 1.0;
        want[6][0] = -115.0;
        // x1 = edge (2, 1)
        want[1][1] = 1.0;
        want[3][1] = 1.0;
        want[7][1] = -115.0;
        // t0, t1
        want[6][2] = -1.0;
        want[8][2] = 1.0;
        want[9][2] = 1.0;
        want[7][3] = -1.0;
        want[10][3] = 1.0;
        want[11][3] = 1.0;
        // y_1,0 and y_1,1
        want[4][4] = 1.0;
        want[8][4] = -5.0;
        want[12][4] = -50.0;
        want[14][4] = -0.0;
        want[4][5] = 1.0;
        want[9][5] = -5.0;
        want[12][5] = -100.0;
        want[14][5] = -50.0;
        // y_2,0 and y_2,1
        want[5][6] = 1.0;
        want[10][6] = -5.0;
        want[13][6] = -50.0;
        want[15][6] = -0.0;
        want[5][7] = 1.0;
        want[11][7] = -5.0;
        want[13][7] = -100.0;
        want[15][7] = -50.0;
        // a0: in-edge 0, lateness only.
        want[6][8] = 1.0;
        want[16][8] = 1.0;
        // a1: in-edge 1, out-edge 0, zero slopes in its combo rows.
        want[7][9] = 1.0;
        want[6][9] = -1.0;
        want[12][9] = 1.0;
        want[14][9] = 1.0;
        want[17][9] = 1.0;
        // a2: out-edge 1 only.
        want[7][10] = -1.0;
        want[13][10] = 1.0;
        want[15][10] = 1.0;
        // r
        want[16][11] = -1.0;
        want[17][11] = -1.0;

        assert_eq!(system.to_dense(), want);
    }

    #[test]
    fn test_right_hand_sides() {
        let inst = three_node_instance();
        let (system, _, _) = system_of(&inst);
        let want = vec![
            1.0, 1.0, 1.0, 1.0, 1.0, 1.0, // equalities
            -110.0, -110.0, // edge rows: s - M_edge
            0.0, 0.0, 0.0, 0.0, // combo rows: 5 + 0 - 5
            -5.0, -5.0, // departure upper
            -5.0, -5.0, // departure lower
            100.0, 60.0, // lateness of nodes 0 and 1
        ];
        assert_eq!(system.rhs(), want.as_slice());
    }

    #[test]
    fn test_columns_are_sorted_by_row() {
        let inst = three_node_instance();
        let (system, _, _) = system_of(&inst);
        for col in 0..system.cols() {
            let entries = system.column(col);
            assert!(entries.windows(2).all(|w| w[0].0 < w[1].0));
        }
    }
}
