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

use num_traits::Float;
use std::fmt::Debug;

/// Error type for a piecewise segment whose support is not strictly increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct DegenerateSegmentError<F> {
    t0: F,
    t1: F,
}

impl<F: Float + Debug> DegenerateSegmentError<F> {
    pub fn new(t0: F, t1: F) -> Self {
        Self { t0, t1 }
    }
    pub fn t0(&self) -> F {
        self.t0
    }
    pub fn t1(&self) -> F {
        self.t1
    }
}

impl<F: Float + Debug> std::fmt::Display for DegenerateSegmentError<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Degenerate piecewise segment: support [{:?}, {:?}] is not strictly increasing.",
            self.t0, self.t1
        )
    }
}

impl<F: Float + Debug> std::error::Error for DegenerateSegmentError<F> {}

/// Slope of the linear segment through `(t0, v0)` and `(t1, v1)`.
#[inline]
pub fn slope<F: Float + Debug>(t0: F, t1: F, v0: F, v1: F) -> Result<F, DegenerateSegmentError<F>> {
    if !(t0 < t1) || !t0.is_finite() || !t1.is_finite() {
        return Err(DegenerateSegmentError::new(t0, t1));
    }
    Ok((v1 - v0) / (t1 - t0))
}

/// Linear interpolation between `(t0, v0)` and `(t1, v1)` evaluated at `t`.
///
/// `t` is not clamped; evaluating outside `[t0, t1]` extrapolates the segment.
#[inline]
pub fn lerp<F: Float + Debug>(
    t0: F,
    t1: F,
    v0: F,
    v1: F,
    t: F,
) -> Result<F, DegenerateSegmentError<F>> {
    let d = slope(t0, t1, v0, v1)?;
    Ok(v0 + d * (t - t0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slope_basic() {
        assert_eq!(slope(0.0, 10.0, 5.0, 25.0).unwrap(), 2.0);
        assert_eq!(slope(0.0, 10.0, 25.0, 5.0).unwrap(), -2.0);
        assert_eq!(slope(0.0, 10.0, 3.0, 3.0).unwrap(), 0.0);
    }

    #[test]
    fn test_slope_rejects_degenerate_support() {
        assert!(slope(10.0, 10.0, 0.0, 1.0).is_err());
        assert!(slope(10.0, 5.0, 0.0, 1.0).is_err());
        assert!(slope(f64::NAN, 1.0, 0.0, 1.0).is_err());
        assert!(slope(0.0, f64::INFINITY, 0.0, 1.0).is_err());
    }

    #[test]
    fn test_lerp_interpolates_and_extrapolates() {
        assert_eq!(lerp(0.0, 10.0, 0.0, 20.0, 5.0).unwrap(), 10.0);
        assert_eq!(lerp(0.0, 10.0, 0.0, 20.0, 0.0).unwrap(), 0.0);
        assert_eq!(lerp(0.0, 10.0, 0.0, 20.0, 10.0).unwrap(), 20.0);
        assert_eq!(lerp(0.0, 10.0, 0.0, 20.0, 15.0).unwrap(), 30.0);
    }
}
