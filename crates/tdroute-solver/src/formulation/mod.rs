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

//! Sparse MILP assembly: dense index maps, derived relaxation constants,
//! row layout, constraint columns, and the solver-ready model.

pub mod bigm;
pub mod index;
pub mod index_manager;
pub mod model;
pub mod rows;
pub mod system;

pub use bigm::BigM;
pub use index::{ComboIndex, EdgeIndex, SlotIndex};
pub use index_manager::{FormulationIndexManager, VariableLayout};
pub use model::{MipModel, VariableKind, VariableSpec};
pub use rows::{RowLayout, RowSense};
pub use system::ConstraintSystem;

use crate::reduction::{
    DepartureSlots, DominanceOrdering, ReducedGraph, ReductionError, SlotBoundaryPolicy,
};
use tdroute_model::prelude::Instance;

/// The full reduction-and-assembly pipeline, run once per instance.
///
/// Every stage is built from the frozen output of the previous one; the
/// intermediate structures stay available for inspection and extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct Formulation {
    slots: DepartureSlots,
    ordering: DominanceOrdering,
    graph: ReducedGraph,
    indices: FormulationIndexManager,
    bigm: BigM,
    model: MipModel,
}

impl Formulation {
    pub fn build(instance: &Instance, policy: SlotBoundaryPolicy) -> Result<Self, ReductionError> {
        let slots = DepartureSlots::compute(instance, policy)?;
        let ordering = DominanceOrdering::classify(instance, &slots);
        let graph = ReducedGraph::materialize(&ordering, instance.depot())?;
        let indices = FormulationIndexManager::new(&graph, &slots, instance.nodes());
        let bigm = BigM::derive(instance);
        let system = ConstraintSystem::build(instance, &graph, &indices, &bigm);
        let rows = RowLayout::new(instance.nodes(), graph.len(), indices.combos(), instance.depot());
        tracing::debug!(
            "Assembled {} rows over {} columns, senses {}",
            system.rows(),
            system.cols(),
            rows.sense_string()
        );
        let model = MipModel::assemble(instance, &indices, &bigm, system);

        Ok(Self {
            slots,
            ordering,
            graph,
            indices,
            bigm,
            model,
        })
    }

    #[inline]
    pub fn slots(&self) -> &DepartureSlots {
        &self.slots
    }

    #[inline]
    pub fn ordering(&self) -> &DominanceOrdering {
        &self.ordering
    }

    #[inline]
    pub fn graph(&self) -> &ReducedGraph {
        &self.graph
    }

    #[inline]
    pub fn indices(&self) -> &FormulationIndexManager {
        &self.indices
    }

    #[inline]
    pub fn bigm(&self) -> &BigM {
        &self.bigm
    }

    #[inline]
    pub fn model(&self) -> &MipModel {
        &self.model
    }
}
