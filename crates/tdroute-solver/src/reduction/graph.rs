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

use crate::reduction::{
    dominance::DominanceOrdering,
    err::{MissingInEdgeError, MissingOutEdgeError, ReductionError},
};
use tdroute_model::prelude::{Depot, NodeId};

/// A retained directed edge of the reduced routing graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    tail: NodeId,
    head: NodeId,
}

impl Edge {
    #[inline]
    pub const fn new(tail: NodeId, head: NodeId) -> Self {
        Self { tail, head }
    }

    #[inline]
    pub fn tail(&self) -> NodeId {
        self.tail
    }

    #[inline]
    pub fn head(&self) -> NodeId {
        self.head
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} -> {})", self.tail, self.head)
    }
}

/// The surviving edge set after dominance reduction.
///
/// Edges are numbered in a fixed order: nodes ascending, and per node the
/// surviving `Concurrent` members ascending followed by the surviving
/// `After` members ascending. The adjacency lists hold edge positions in
/// the same numbering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReducedGraph {
    edges: Vec<Edge>,
    out_edges: Vec<Vec<usize>>,
    in_edges: Vec<Vec<usize>>,
}

impl ReducedGraph {
    pub fn materialize(
        ordering: &DominanceOrdering,
        depot: Depot,
    ) -> Result<Self, ReductionError> {
        let n = ordering.nodes();
        let mut edges = Vec::new();
        let mut out_edges = vec![Vec::new(); n];
        let mut in_edges = vec![Vec::new(); n];

        for tail in (0..n).map(NodeId::new) {
            let heads = ordering
                .concurrent(tail)
                .iter()
                .chain(ordering.after(tail).iter());
            for &head in heads {
                let id = edges.len();
                edges.push(Edge::new(tail, head));
                out_edges[tail.value()].push(id);
                in_edges[head.value()].push(id);
            }
        }

        for node in (0..n).map(NodeId::new) {
            if node != depot.end() && out_edges[node.value()].is_empty() {
                return Err(MissingOutEdgeError::new(node).into());
            }
        }
        for node in (0..n).map(NodeId::new) {
            if node != depot.start() && in_edges[node.value()].is_empty() {
                return Err(MissingInEdgeError::new(node).into());
            }
        }

        Ok(Self {
            edges,
            out_edges,
            in_edges,
        })
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn edge(&self, id: usize) -> Option<Edge> {
        self.edges.get(id).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Edge positions leaving `node`, in enumeration order.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> &[usize] {
        &self.out_edges[node.value()]
    }

    /// Edge positions entering `node`, in enumeration order.
    #[inline]
    pub fn in_edges(&self, node: NodeId) -> &[usize] {
        &self.in_edges[node.value()]
    }

    /// Heads of the edges leaving `node`, in enumeration order.
    pub fn out_neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.out_edges(node).iter().map(|&id| self.edges[id].head())
    }
}
