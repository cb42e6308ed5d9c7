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
use std::{
    iter::Sum,
    ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign},
};

pub trait MarkerName {
    const NAME_POINT: &'static str;
    const NAME_DELTA: &'static str;
}

/// An absolute position on an affine axis (e.g. a point in time).
///
/// Arithmetic is NaN-checked: the operator impls panic when a result is NaN,
/// the `checked_*` variants return `None` instead.
#[repr(transparent)]
#[must_use]
#[derive(Debug, PartialEq, PartialOrd)]
pub struct Point<T, U>(T, core::marker::PhantomData<U>);

/// A signed displacement between two [`Point`]s on the same axis.
#[repr(transparent)]
#[must_use]
#[derive(Debug, PartialEq, PartialOrd)]
pub struct Delta<T, U>(T, core::marker::PhantomData<U>);

// Manual impls so `Clone`/`Copy` do not pick up a bound on the marker `U`.
impl<T: Clone, U> Clone for Point<T, U> {
    #[inline]
    fn clone(&self) -> Self {
        Point(self.0.clone(), core::marker::PhantomData)
    }
}

impl<T: Copy, U> Copy for Point<T, U> {}

impl<T: Clone, U> Clone for Delta<T, U> {
    #[inline]
    fn clone(&self) -> Self {
        Delta(self.0.clone(), core::marker::PhantomData)
    }
}

impl<T: Copy, U> Copy for Delta<T, U> {}

impl<T, U> Point<T, U> {
    #[inline]
    pub const fn new(value: T) -> Self {
        Point(value, core::marker::PhantomData)
    }

    #[inline]
    pub fn zero() -> Self
    where
        T: Float,
    {
        Point::new(T::zero())
    }

    #[inline]
    pub fn value(&self) -> T
    where
        T: Copy,
    {
        self.0
    }

    #[inline]
    pub fn is_finite(&self) -> bool
    where
        T: Float,
    {
        self.0.is_finite()
    }

    #[inline]
    pub fn checked_add(self, d: Delta<T, U>) -> Option<Self>
    where
        T: Float,
    {
        let r = self.0 + d.0;
        if r.is_nan() { None } else { Some(Point::new(r)) }
    }

    #[inline]
    pub fn checked_sub(self, d: Delta<T, U>) -> Option<Self>
    where
        T: Float,
    {
        let r = self.0 - d.0;
        if r.is_nan() { None } else { Some(Point::new(r)) }
    }

    #[inline]
    pub fn min(self, other: Self) -> Self
    where
        T: Float,
    {
        if other.0 < self.0 { other } else { self }
    }

    #[inline]
    pub fn max(self, other: Self) -> Self
    where
        T: Float,
    {
        if other.0 > self.0 { other } else { self }
    }
}

impl<T, U> Delta<T, U> {
    #[inline]
    pub const fn new(value: T) -> Self {
        Delta(value, core::marker::PhantomData)
    }

    #[inline]
    pub fn zero() -> Self
    where
        T: Float,
    {
        Delta::new(T::zero())
    }

    #[inline]
    pub fn value(&self) -> T
    where
        T: Copy,
    {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool
    where
        T: Float,
    {
        self.0 == T::zero()
    }

    #[inline]
    pub fn is_finite(&self) -> bool
    where
        T: Float,
    {
        self.0.is_finite()
    }

    #[inline]
    pub fn abs(self) -> Self
    where
        T: Float,
    {
        Delta::new(self.0.abs())
    }

    #[inline]
    pub fn checked_add(self, other: Self) -> Option<Self>
    where
        T: Float,
    {
        let r = self.0 + other.0;
        if r.is_nan() { None } else { Some(Delta::new(r)) }
    }

    #[inline]
    pub fn checked_sub(self, other: Self) -> Option<Self>
    where
        T: Float,
    {
        let r = self.0 - other.0;
        if r.is_nan() { None } else { Some(Delta::new(r)) }
    }

    #[inline]
    pub fn min(self, other: Self) -> Self
    where
        T: Float,
    {
        if other.0 < self.0 { other } else { self }
    }

    #[inline]
    pub fn max(self, other: Self) -> Self
    where
        T: Float,
    {
        if other.0 > self.0 { other } else { self }
    }
}

impl<T: std::fmt::Display, U: MarkerName> std::fmt::Display for Point<T, U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", U::NAME_POINT, self.0)
    }
}

impl<T: std::fmt::Display, U: MarkerName> std::fmt::Display for Delta<T, U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", U::NAME_DELTA, self.0)
    }
}

impl<T, U> Default for Point<T, U>
where
    T: Float,
{
    #[inline]
    fn default() -> Self {
        Point::zero()
    }
}

impl<T, U> Default for Delta<T, U>
where
    T: Float,
{
    #[inline]
    fn default() -> Self {
        Delta::zero()
    }
}

impl<T, U> Add<Delta<T, U>> for Point<T, U>
where
    T: Float,
{
    type Output = Point<T, U>;

    #[inline]
    fn add(self, rhs: Delta<T, U>) -> Self::Output {
        self.checked_add(rhs).expect("NaN in Point + Delta")
    }
}

impl<T, U> AddAssign<Delta<T, U>> for Point<T, U>
where
    T: Float,
{
    fn add_assign(&mut self, rhs: Delta<T, U>) {
        *self = self.checked_add(rhs).expect("NaN in Point += Delta");
    }
}

impl<T, U> Sub<Delta<T, U>> for Point<T, U>
where
    T: Float,
{
    type Output = Point<T, U>;

    #[inline]
    fn sub(self, rhs: Delta<T, U>) -> Self::Output {
        self.checked_sub(rhs).expect("NaN in Point - Delta")
    }
}

impl<T, U> SubAssign<Delta<T, U>> for Point<T, U>
where
    T: Float,
{
    fn sub_assign(&mut self, rhs: Delta<T, U>) {
        *self = self.checked_sub(rhs).expect("NaN in Point -= Delta");
    }
}

impl<T, U> Sub<Point<T, U>> for Point<T, U>
where
    T: Float,
{
    type Output = Delta<T, U>;

    #[inline]
    fn sub(self, rhs: Point<T, U>) -> Self::Output {
        let r = self.0 - rhs.0;
        assert!(!r.is_nan(), "NaN in Point - Point");
        Delta::new(r)
    }
}

impl<T, U> Add for Delta<T, U>
where
    T: Float,
{
    type Output = Delta<T, U>;

    #[inline]
    fn add(self, rhs: Delta<T, U>) -> Self::Output {
        self.checked_add(rhs).expect("NaN in Delta + Delta")
    }
}

impl<T, U> AddAssign for Delta<T, U>
where
    T: Float,
{
    fn add_assign(&mut self, rhs: Delta<T, U>) {
        *self = self.checked_add(rhs).expect("NaN in Delta += Delta");
    }
}

impl<T, U> Sub for Delta<T, U>
where
    T: Float,
{
    type Output = Delta<T, U>;

    #[inline]
    fn sub(self, rhs: Delta<T, U>) -> Self::Output {
        self.checked_sub(rhs).expect("NaN in Delta - Delta")
    }
}

impl<T, U> SubAssign for Delta<T, U>
where
    T: Float,
{
    fn sub_assign(&mut self, rhs: Delta<T, U>) {
        *self = self.checked_sub(rhs).expect("NaN in Delta -= Delta");
    }
}

impl<T, U> Neg for Delta<T, U>
where
    T: Float,
{
    type Output = Delta<T, U>;

    #[inline]
    fn neg(self) -> Self::Output {
        Delta::new(-self.0)
    }
}

impl<T, U> Mul<T> for Delta<T, U>
where
    T: Float,
{
    type Output = Delta<T, U>;

    #[inline]
    fn mul(self, rhs: T) -> Self::Output {
        let r = self.0 * rhs;
        assert!(!r.is_nan(), "NaN in Delta * scalar");
        Delta::new(r)
    }
}

impl<T, U> Div<T> for Delta<T, U>
where
    T: Float,
{
    type Output = Delta<T, U>;

    #[inline]
    fn div(self, rhs: T) -> Self::Output {
        let r = self.0 / rhs;
        assert!(!r.is_nan(), "NaN in Delta / scalar");
        Delta::new(r)
    }
}

impl<T, U> Sum for Delta<T, U>
where
    T: Float,
{
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Delta::zero(), |acc, d| acc + d)
    }
}
