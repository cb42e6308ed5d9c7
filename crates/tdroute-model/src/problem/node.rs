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

use crate::common::NodeId;

/// The depot split into its departure and arrival copies.
///
/// Both copies are first-class nodes; every other node id is a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Depot {
    start: NodeId,
    end: NodeId,
}

impl Depot {
    #[inline]
    pub const fn new(start: NodeId, end: NodeId) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn start(&self) -> NodeId {
        self.start
    }

    #[inline]
    pub fn end(&self) -> NodeId {
        self.end
    }

    #[inline]
    pub fn is_start(&self, node: NodeId) -> bool {
        node == self.start
    }

    #[inline]
    pub fn is_end(&self, node: NodeId) -> bool {
        node == self.end
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        self.is_start(node) || self.is_end(node)
    }
}

impl std::fmt::Display for Depot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Depot(start: {}, end: {})", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[inline]
    fn nid(n: usize) -> NodeId {
        NodeId::new(n)
    }

    #[test]
    fn test_depot_roles() {
        let d = Depot::new(nid(2), nid(0));
        assert_eq!(d.start(), nid(2));
        assert_eq!(d.end(), nid(0));
        assert!(d.is_start(nid(2)));
        assert!(d.is_end(nid(0)));
        assert!(d.contains(nid(0)));
        assert!(d.contains(nid(2)));
        assert!(!d.contains(nid(1)));
    }
}
