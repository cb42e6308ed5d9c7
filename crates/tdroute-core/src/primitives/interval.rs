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

use crate::primitives::affine::{Delta, Point};
use num_traits::Float;

/// A closed interval `[start, end]` over an affine point type.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Interval<P> {
    start: P,
    end: P,
}

impl<P: Copy + PartialOrd> Interval<P> {
    #[inline]
    pub const fn new(start: P, end: P) -> Self {
        Interval { start, end }
    }

    #[inline]
    pub fn start(&self) -> P {
        self.start
    }

    #[inline]
    pub fn end(&self) -> P {
        self.end
    }

    /// An interval is well formed when its start does not lie past its end.
    #[inline]
    pub fn is_well_formed(&self) -> bool {
        self.start <= self.end
    }

    #[inline]
    pub fn contains(&self, p: P) -> bool {
        self.start <= p && p <= self.end
    }
}

impl<T: Float, U> Interval<Point<T, U>> {
    #[inline]
    pub fn measure(&self) -> Delta<T, U> {
        self.end - self.start
    }
}

impl<P: std::fmt::Display> std::fmt::Display for Interval<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{TimeInterval, TimePoint};

    #[inline]
    fn tp(v: f64) -> TimePoint<f64> {
        TimePoint::new(v)
    }
    #[inline]
    fn iv(a: f64, b: f64) -> TimeInterval<f64> {
        TimeInterval::new(tp(a), tp(b))
    }

    #[test]
    fn test_accessors_and_measure() {
        let w = iv(10.0, 25.0);
        assert_eq!(w.start(), tp(10.0));
        assert_eq!(w.end(), tp(25.0));
        assert_eq!(w.measure().value(), 15.0);
        assert!(w.is_well_formed());
        assert!(!iv(5.0, 1.0).is_well_formed());
    }

    #[test]
    fn test_contains_is_closed() {
        let w = iv(0.0, 10.0);
        assert!(w.contains(tp(0.0)));
        assert!(w.contains(tp(10.0)));
        assert!(w.contains(tp(5.0)));
        assert!(!w.contains(tp(10.1)));
        assert!(!w.contains(tp(-0.1)));
    }
}
