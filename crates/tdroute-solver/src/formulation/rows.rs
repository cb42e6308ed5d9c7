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

use crate::formulation::index::{ComboIndex, EdgeIndex};
use tdroute_model::prelude::{Depot, NodeId};

/// Sense of one constraint row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowSense {
    Equal,
    GreaterOrEqual,
    LessOrEqual,
}

impl RowSense {
    #[inline]
    pub fn symbol(&self) -> char {
        match self {
            RowSense::Equal => 'E',
            RowSense::GreaterOrEqual => 'G',
            RowSense::LessOrEqual => 'L',
        }
    }
}

impl std::fmt::Display for RowSense {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Fixed row numbering of the constraint system.
///
/// `3(n-1)` equalities (flow out, flow in, slot choice), then `m` edge
/// rows, `K2` combo rows, and three window groups of `n-1` rows each.
/// Each per-node group drops one depot copy; `compact` is the 0-based
/// compression that skips it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowLayout {
    nodes: usize,
    edges: usize,
    combos: usize,
    depot: Depot,
}

impl RowLayout {
    #[inline]
    pub fn new(nodes: usize, edges: usize, combos: usize, depot: Depot) -> Self {
        Self {
            nodes,
            edges,
            combos,
            depot,
        }
    }

    /// 0-based position of `node` with `skipped` removed from the id space;
    /// `None` for the skipped node itself.
    #[inline]
    pub fn compact(node: NodeId, skipped: NodeId) -> Option<usize> {
        match node.value().cmp(&skipped.value()) {
            std::cmp::Ordering::Less => Some(node.value()),
            std::cmp::Ordering::Equal => None,
            std::cmp::Ordering::Greater => Some(node.value() - 1),
        }
    }

    /// Exactly one selected out-edge per non-end node.
    #[inline]
    pub fn flow_out_row(&self, node: NodeId) -> Option<usize> {
        Self::compact(node, self.depot.end())
    }

    /// Exactly one selected in-edge per non-start node.
    #[inline]
    pub fn flow_in_row(&self, node: NodeId) -> Option<usize> {
        Self::compact(node, self.depot.start()).map(|i| self.nodes - 1 + i)
    }

    /// Exactly one departure slot per non-end node.
    #[inline]
    pub fn slot_row(&self, node: NodeId) -> Option<usize> {
        Self::compact(node, self.depot.end()).map(|i| 2 * (self.nodes - 1) + i)
    }

    /// Time propagation along edge `e` when its indicator is active.
    #[inline]
    pub fn edge_row(&self, e: EdgeIndex) -> usize {
        3 * (self.nodes - 1) + e.0
    }

    /// Interpolation lower bound of one (edge, slot) combo.
    #[inline]
    pub fn combo_row(&self, c: ComboIndex) -> usize {
        3 * (self.nodes - 1) + self.edges + c.0
    }

    /// Departure no later than the chosen slot's right breakpoint.
    #[inline]
    pub fn departure_upper_row(&self, node: NodeId) -> Option<usize> {
        Self::compact(node, self.depot.end())
            .map(|i| 3 * (self.nodes - 1) + self.edges + self.combos + i)
    }

    /// Departure no earlier than the chosen slot's left breakpoint.
    #[inline]
    pub fn departure_lower_row(&self, node: NodeId) -> Option<usize> {
        Self::compact(node, self.depot.end())
            .map(|i| 3 * (self.nodes - 1) + self.edges + self.combos + (self.nodes - 1) + i)
    }

    /// Arrival within the window, relaxed by the regret variable.
    #[inline]
    pub fn lateness_row(&self, node: NodeId) -> Option<usize> {
        Self::compact(node, self.depot.start())
            .map(|i| 3 * (self.nodes - 1) + self.edges + self.combos + 2 * (self.nodes - 1) + i)
    }

    #[inline]
    pub fn total(&self) -> usize {
        6 * (self.nodes - 1) + self.edges + self.combos
    }

    pub fn sense(&self, row: usize) -> RowSense {
        let eq = 3 * (self.nodes - 1);
        let ge = eq + self.edges + self.combos;
        let le = ge + self.nodes - 1;
        let ge2 = le + self.nodes - 1;
        if row < eq {
            RowSense::Equal
        } else if row < ge {
            RowSense::GreaterOrEqual
        } else if row < le {
            RowSense::LessOrEqual
        } else if row < ge2 {
            RowSense::GreaterOrEqual
        } else {
            RowSense::LessOrEqual
        }
    }

    /// Row senses in order, one symbol per row.
    pub fn sense_string(&self) -> String {
        (0..self.total()).map(|r| self.sense(r).symbol()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[inline]
    fn nid(n: usize) -> NodeId {
        NodeId::new(n)
    }

    fn layout() -> RowLayout {
        // n = 4, m = 6, K2 = 12, start = 2, end = 0.
        RowLayout::new(4, 6, 12, Depot::new(nid(2), nid(0)))
    }

    #[test]
    fn test_compact_skips_one_node() {
        assert_eq!(RowLayout::compact(nid(0), nid(2)), Some(0));
        assert_eq!(RowLayout::compact(nid(1), nid(2)), Some(1));
        assert_eq!(RowLayout::compact(nid(2), nid(2)), None);
        assert_eq!(RowLayout::compact(nid(3), nid(2)), Some(2));
    }

    #[test]
    fn test_row_groups_tile_the_layout() {
        let l = layout();
        assert_eq!(l.total(), 6 * 3 + 6 + 12);

        assert_eq!(l.flow_out_row(nid(1)), Some(0));
        assert_eq!(l.flow_out_row(nid(0)), None);
        assert_eq!(l.flow_in_row(nid(0)), Some(3));
        assert_eq!(l.flow_in_row(nid(3)), Some(3 + 2));
        assert_eq!(l.flow_in_row(nid(2)), None);
        assert_eq!(l.slot_row(nid(1)), Some(6));
        assert_eq!(l.edge_row(EdgeIndex(0)), 9);
        assert_eq!(l.combo_row(ComboIndex(0)), 15);
        assert_eq!(l.departure_upper_row(nid(1)), Some(27));
        assert_eq!(l.departure_lower_row(nid(1)), Some(30));
        assert_eq!(l.lateness_row(nid(0)), Some(33));
        assert_eq!(l.lateness_row(nid(2)), None);
        assert_eq!(l.lateness_row(nid(3)), Some(35));
    }

    #[test]
    fn test_sense_string_segments() {
        let l = layout();
        let s = l.sense_string();
        assert_eq!(s.len(), l.total());
        assert_eq!(&s[0..9], "EEEEEEEEE");
        assert_eq!(&s[9..27], "GGGGGGGGGGGGGGGGGG");
        assert_eq!(&s[27..30], "LLL");
        assert_eq!(&s[30..33], "GGG");
        assert_eq!(&s[33..36], "LLL");
    }
}
