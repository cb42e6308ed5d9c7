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

use crate::formulation::{
    bigm::BigM, index_manager::FormulationIndexManager, system::ConstraintSystem,
};
use tdroute_model::prelude::{FormulationSize, Instance};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKind {
    Binary,
    Continuous,
}

/// One column of the model: name, kind, box, and objective coefficient.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableSpec {
    name: String,
    kind: VariableKind,
    lower: f64,
    upper: f64,
    objective: f64,
}

impl VariableSpec {
    #[inline]
    pub fn new(name: String, kind: VariableKind, lower: f64, upper: f64, objective: f64) -> Self {
        Self {
            name,
            kind,
            lower,
            upper,
            objective,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> VariableKind {
        self.kind
    }

    #[inline]
    pub fn lower(&self) -> f64 {
        self.lower
    }

    #[inline]
    pub fn upper(&self) -> f64 {
        self.upper
    }

    #[inline]
    pub fn objective(&self) -> f64 {
        self.objective
    }
}

/// The solver-ready model: variable catalog in column order plus the
/// assembled constraint system.
///
/// Objective: minimize `regret_weight * r + a_end - start_weight * a_start`
/// (arrive at the depot early, leave it late, violate no window).
#[derive(Debug, Clone, PartialEq)]
pub struct MipModel {
    variables: Vec<VariableSpec>,
    system: ConstraintSystem,
    size: FormulationSize,
}

impl MipModel {
    pub fn assemble(
        instance: &Instance,
        indices: &FormulationIndexManager,
        bigm: &BigM,
        system: ConstraintSystem,
    ) -> Self {
        let depot = instance.depot();
        let mut variables = Vec::with_capacity(indices.layout().total());

        for (_, edge) in indices.edge_entries() {
            variables.push(VariableSpec::new(
                format!("x_{},{}", edge.tail().value(), edge.head().value()),
                VariableKind::Binary,
                0.0,
                1.0,
                0.0,
            ));
        }
        for (_, edge) in indices.edge_entries() {
            variables.push(VariableSpec::new(
                format!("t_{},{}", edge.tail().value(), edge.head().value()),
                VariableKind::Continuous,
                0.0,
                bigm.travel_ub(),
                0.0,
            ));
        }
        for (_, node, k) in indices.slot_entries() {
            variables.push(VariableSpec::new(
                format!("y_{},{}", node.value(), k),
                VariableKind::Binary,
                0.0,
                1.0,
                0.0,
            ));
        }
        for node in instance.node_ids() {
            let objective = if node == depot.end() {
                1.0
            } else if node == depot.start() {
                -instance.start_weight()
            } else {
                0.0
            };
            variables.push(VariableSpec::new(
                format!("a{}", node.value()),
                VariableKind::Continuous,
                instance.earliest(node).value(),
                bigm.arrival_ub(),
                objective,
            ));
        }
        variables.push(VariableSpec::new(
            "r".to_string(),
            VariableKind::Continuous,
            bigm.regret_lb(),
            bigm.regret_ub(),
            instance.regret_weight(),
        ));

        let size = FormulationSize::new(
            indices.nodes(),
            indices.edges(),
            indices.slots(),
            indices.combos(),
        );

        Self {
            variables,
            system,
            size,
        }
    }

    #[inline]
    pub fn variables(&self) -> &[VariableSpec] {
        &self.variables
    }

    #[inline]
    pub fn variable(&self, col: usize) -> &VariableSpec {
        &self.variables[col]
    }

    #[inline]
    pub fn system(&self) -> &ConstraintSystem {
        &self.system
    }

    #[inline]
    pub fn size(&self) -> FormulationSize {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reduction::{
        DepartureSlots, DominanceOrdering, ReducedGraph, SlotBoundaryPolicy,
    };
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

    fn model() -> MipModel {
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
        let slots = DepartureSlots::compute(&inst, SlotBoundaryPolicy::Covering).unwrap();
        let ordering = DominanceOrdering::classify(&inst, &slots);
        let graph = ReducedGraph::materialize(&ordering, inst.depot()).unwrap();
        let indices = FormulationIndexManager::new(&graph, &slots, inst.nodes());
        let bigm = BigM::derive(&inst);
        let system = ConstraintSystem::build(&inst, &graph, &indices, &bigm);
        MipModel::assemble(&inst, &indices, &bigm, system)
    }

    #[test]
    fn test_variable_catalog_in_column_order() {
        let m = model();
        let names: Vec<&str> = m.variables().iter().map(|v| v.name()).collect();
        assert_eq!(
            names,
            vec![
                "x_1,0", "x_2,1", "t_1,0", "t_2,1", "y_1,0", "y_1,1", "y_2,0", "y_2,1", "a0",
                "a1", "a2", "r",
            ]
        );
        assert_eq!(m.variables().len(), m.system().cols());
        assert_eq!(m.size().variables(), 12);
        assert_eq!(m.size().rows(), 18);
    }

    #[test]
    fn test_kinds_and_bounds() {
        let m = model();
        assert_eq!(m.variable(0).kind(), VariableKind::Binary);
        assert_eq!(m.variable(2).kind(), VariableKind::Continuous);
        assert_eq!(m.variable(2).upper(), 5.0);
        assert_eq!(m.variable(4).kind(), VariableKind::Binary);
        // a1 starts no earlier than its window opens.
        assert_eq!(m.variable(9).lower(), 10.0);
        assert_eq!(m.variable(9).upper(), 105.0);
        assert_eq!(m.variable(11).lower(), 0.0 - 100.0);
        assert_eq!(m.variable(11).upper(), 105.0 - 60.0);
    }

    #[test]
    fn test_objective_coefficients() {
        let m = model();
        // Minimize 5 r + a_end - 0.1 a_start; everything else free of cost.
        assert_eq!(m.variable(8).objective(), 1.0);
        assert_eq!(m.variable(9).objective(), 0.0);
        assert_eq!(m.variable(10).objective(), -0.1);
        assert_eq!(m.variable(11).objective(), 5.0);
        for col in 0..8 {
            assert_eq!(m.variable(col).objective(), 0.0);
        }
    }
}
