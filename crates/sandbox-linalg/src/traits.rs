//! Scalar abstractions shared by [`Vector`][crate::Vector] and [`Matrix`][crate::Matrix].

use std::{fmt, ops};

/// Types that have a "zero" value (an additive identity).
pub trait Zero {
    /// The *0* value of this type.
    const ZERO: Self;
}

/// Types that have a "one" value (a multiplicative identity).
pub trait One {
    /// The *1* value of this type.
    const ONE: Self;
}

/// Types that support the trigonometric functions.
pub trait Trig {
    /// Computes the sine of the angle `self` (in radians).
    fn sin(self) -> Self;
    /// Computes the cosine of the angle `self` (in radians).
    fn cos(self) -> Self;
    /// Computes the tangent of the angle `self` (in radians).
    fn tan(self) -> Self;
    fn acos(self) -> Self;
}

/// Types that support computing their square root.
pub trait Sqrt {
    fn sqrt(self) -> Self;
}

/// Types with an absolute value.
pub trait Abs {
    fn abs(self) -> Self;
}

/// A trait for numeric types that support basic arithmetic operations.
pub trait Number:
    Zero
    + One
    + ops::Neg<Output = Self>
    + ops::Add<Output = Self>
    + ops::Sub<Output = Self>
    + ops::Mul<Output = Self>
    + ops::Div<Output = Self>
    + ops::AddAssign
    + ops::SubAssign
    + ops::MulAssign
    + ops::DivAssign
    + PartialEq
    + PartialOrd
    + Copy
{
}
impl<T> Number for T where
    T: Zero
        + One
        + ops::Neg<Output = Self>
        + ops::Add<Output = Self>
        + ops::Sub<Output = Self>
        + ops::Mul<Output = Self>
        + ops::Div<Output = Self>
        + ops::AddAssign
        + ops::SubAssign
        + ops::MulAssign
        + ops::DivAssign
        + PartialEq
        + PartialOrd
        + Copy
{
}

/// Floating-point element types usable in [`Vector`][crate::Vector] and
/// [`Matrix`][crate::Matrix].
///
/// Implemented for [`f32`] and [`f64`]. The crate-wide default is [`Real`][crate::Real].
pub trait Float:
    Number + Sqrt + Trig + Abs + bytemuck::Pod + fmt::Debug + fmt::Display + Default
{
    /// Largest finite value.
    const MAX: Self;
    /// Smallest finite value (the most negative one).
    const MIN: Self;

    /// Lossy conversion from [`f64`], used for constants like the zero threshold.
    fn from_f64(value: f64) -> Self;

    /// Lossless conversion to [`f64`].
    fn to_f64(self) -> f64;
}

macro_rules! float_impls {
    ($($ty:ident),+) => {
        $(
            impl Zero for $ty {
                const ZERO: Self = 0.0;
            }

            impl One for $ty {
                const ONE: Self = 1.0;
            }

            impl Trig for $ty {
                fn sin(self) -> Self {
                    $ty::sin(self)
                }

                fn cos(self) -> Self {
                    $ty::cos(self)
                }

                fn tan(self) -> Self {
                    $ty::tan(self)
                }

                fn acos(self) -> Self {
                    $ty::acos(self)
                }
            }

            impl Sqrt for $ty {
                fn sqrt(self) -> Self {
                    $ty::sqrt(self)
                }
            }

            impl Abs for $ty {
                fn abs(self) -> Self {
                    $ty::abs(self)
                }
            }

            impl Float for $ty {
                const MAX: Self = $ty::MAX;
                const MIN: Self = $ty::MIN;

                #[inline]
                fn from_f64(value: f64) -> Self {
                    value as $ty
                }

                #[inline]
                fn to_f64(self) -> f64 {
                    self.into()
                }
            }
        )+
    };
}
float_impls!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants() {
        assert_eq!(<f32 as Zero>::ZERO, 0.0);
        assert_eq!(<f64 as One>::ONE, 1.0);
        assert_eq!(<f32 as Float>::MIN, f32::MIN);
        assert!(<f64 as Float>::MIN < 0.0);
    }

    #[test]
    fn conversions() {
        assert_eq!(f32::from_f64(0.5), 0.5f32);
        assert_eq!(Float::to_f64(0.25f32), 0.25);
        assert_eq!(Abs::abs(-2.0f64), 2.0);
        assert_eq!(Sqrt::sqrt(9.0f32), 3.0);
    }
}
