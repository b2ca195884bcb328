//! Arithmetic on [`Vector`]s and implementations of `std::ops`.
//!
//! Every operator is a thin wrapper around one of the `checked_*` methods below and panics if that
//! method returns an error.

use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

use approx::{AbsDiffEq, RelativeEq, UlpsEq};

use crate::{
    config,
    error::{unwrap_op, Error, Result},
    traits::Float,
};

use super::Vector;

impl<T: Float> Vector<T> {
    /// Element-wise addition.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] if `self` and `rhs` differ in length.
    pub fn checked_add(&self, rhs: &Self) -> Result<Self> {
        self.zip_with(rhs, |a, b| a + b)
    }

    /// Element-wise subtraction.
    pub fn checked_sub(&self, rhs: &Self) -> Result<Self> {
        self.zip_with(rhs, |a, b| a - b)
    }

    /// Element-wise multiplication.
    pub fn checked_mul(&self, rhs: &Self) -> Result<Self> {
        self.zip_with(rhs, |a, b| a * b)
    }

    /// Element-wise division.
    ///
    /// # Errors
    ///
    /// Fails if the lengths differ or if any element of `rhs` is exactly zero.
    pub fn checked_div(&self, rhs: &Self) -> Result<Self> {
        self.check_len(rhs)?;
        if let Some(&divisor) = rhs.iter().find(|&&d| d == T::ZERO) {
            return Err(Error::DivisionByZero {
                divisor: divisor.to_f64(),
            });
        }
        self.zip_with(rhs, |a, b| a / b)
    }

    /// Divides every element by the scalar `rhs`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DivisionByZero`] if `|rhs|` is below [`config::epsilon`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use sandbox_linalg::*;
    /// assert_eq!(vec2(2.0, 4.0).checked_div_scalar(2.0), Ok(vec2(1.0, 2.0)));
    /// assert!(vec2(2.0, 4.0).checked_div_scalar(1e-12).is_err());
    /// ```
    pub fn checked_div_scalar(&self, rhs: T) -> Result<Self> {
        if rhs.abs() < config::epsilon_as() {
            return Err(Error::DivisionByZero {
                divisor: rhs.to_f64(),
            });
        }
        Ok(self.map(|&v| v / rhs))
    }

    fn zip_with(&self, rhs: &Self, f: impl Fn(T, T) -> T) -> Result<Self> {
        self.check_len(rhs)?;
        Ok(Vector(
            self.iter().zip(rhs.iter()).map(|(&a, &b)| f(a, b)).collect(),
        ))
    }
}

impl<T> Index<usize> for Vector<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<T> IndexMut<usize> for Vector<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.0[index]
    }
}

/// Exact element-wise comparison. Vectors of different lengths are never equal.
impl<T: PartialEq> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T: Eq> Eq for Vector<T> {}

impl<T> AbsDiffEq for Vector<T>
where
    T: Float + AbsDiffEq<Epsilon = T>,
{
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<T> RelativeEq for Vector<T>
where
    T: Float + RelativeEq<Epsilon = T>,
{
    fn default_max_relative() -> T {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

impl<T> UlpsEq for Vector<T>
where
    T: Float + UlpsEq<Epsilon = T>,
{
    fn default_max_ulps() -> u32 {
        T::default_max_ulps()
    }

    fn ulps_eq(&self, other: &Self, epsilon: T, max_ulps: u32) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| a.ulps_eq(b, epsilon, max_ulps))
    }
}

/// Element-wise negation.
impl<T: Float> Neg for &Vector<T> {
    type Output = Vector<T>;

    fn neg(self) -> Vector<T> {
        self.map(|&v| -v)
    }
}

/// Element-wise negation.
impl<T: Float> Neg for Vector<T> {
    type Output = Vector<T>;

    fn neg(mut self) -> Vector<T> {
        for elem in self.iter_mut() {
            *elem = -*elem;
        }
        self
    }
}

macro_rules! elementwise_ops {
    ($( $Op:ident::$op:ident, $OpAssign:ident::$op_assign:ident => $checked:ident; )+) => {$(
        impl<T: Float> $Op<&Vector<T>> for &Vector<T> {
            type Output = Vector<T>;

            #[track_caller]
            fn $op(self, rhs: &Vector<T>) -> Vector<T> {
                unwrap_op(self.$checked(rhs))
            }
        }

        impl<T: Float> $Op<&Vector<T>> for Vector<T> {
            type Output = Vector<T>;

            #[track_caller]
            fn $op(self, rhs: &Vector<T>) -> Vector<T> {
                unwrap_op(self.$checked(rhs))
            }
        }

        impl<T: Float> $Op<Vector<T>> for Vector<T> {
            type Output = Vector<T>;

            #[track_caller]
            fn $op(self, rhs: Vector<T>) -> Vector<T> {
                unwrap_op(self.$checked(&rhs))
            }
        }

        impl<T: Float> $OpAssign<&Vector<T>> for Vector<T> {
            #[track_caller]
            fn $op_assign(&mut self, rhs: &Vector<T>) {
                *self = unwrap_op(self.$checked(rhs));
            }
        }

        impl<T: Float> $OpAssign<Vector<T>> for Vector<T> {
            #[track_caller]
            fn $op_assign(&mut self, rhs: Vector<T>) {
                *self = unwrap_op(self.$checked(&rhs));
            }
        }
    )+};
}

elementwise_ops! {
    Add::add, AddAssign::add_assign => checked_add;
    Sub::sub, SubAssign::sub_assign => checked_sub;
    Mul::mul, MulAssign::mul_assign => checked_mul;
    Div::div, DivAssign::div_assign => checked_div;
}

macro_rules! scalar_ops {
    ($( $Op:ident::$op:ident, $OpAssign:ident::$op_assign:ident => $tok:tt; )+) => {$(
        impl<T: Float> $Op<T> for &Vector<T> {
            type Output = Vector<T>;

            fn $op(self, rhs: T) -> Vector<T> {
                self.map(|&v| v $tok rhs)
            }
        }

        impl<T: Float> $Op<T> for Vector<T> {
            type Output = Vector<T>;

            fn $op(mut self, rhs: T) -> Vector<T> {
                self.$op_assign(rhs);
                self
            }
        }

        impl<T: Float> $OpAssign<T> for Vector<T> {
            fn $op_assign(&mut self, rhs: T) {
                for elem in self.iter_mut() {
                    *elem = *elem $tok rhs;
                }
            }
        }
    )+};
}

scalar_ops! {
    Add::add, AddAssign::add_assign => +;
    Sub::sub, SubAssign::sub_assign => -;
    Mul::mul, MulAssign::mul_assign => *;
}

/// Vector-Scalar division. Panics if the divisor is (close to) zero.
impl<T: Float> Div<T> for &Vector<T> {
    type Output = Vector<T>;

    #[track_caller]
    fn div(self, rhs: T) -> Vector<T> {
        unwrap_op(self.checked_div_scalar(rhs))
    }
}

/// Vector-Scalar division. Panics if the divisor is (close to) zero.
impl<T: Float> Div<T> for Vector<T> {
    type Output = Vector<T>;

    #[track_caller]
    fn div(self, rhs: T) -> Vector<T> {
        unwrap_op(self.checked_div_scalar(rhs))
    }
}

impl<T: Float> DivAssign<T> for Vector<T> {
    #[track_caller]
    fn div_assign(&mut self, rhs: T) {
        *self = unwrap_op(self.checked_div_scalar(rhs));
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::{vec2, vec3};

    use super::*;

    #[test]
    fn elementwise() {
        let a = vec3(1.0, 2.0, 3.0);
        let b = vec3(4.0, 5.0, 6.0);
        assert_eq!(&a + &b, vec3(5.0, 7.0, 9.0));
        assert_eq!(&b - &a, vec3(3.0, 3.0, 3.0));
        assert_eq!(&a * &b, vec3(4.0, 10.0, 18.0));
        assert_eq!(&b / &a, vec3(4.0, 2.5, 2.0));
        assert_eq!(-&a, vec3(-1.0, -2.0, -3.0));
        assert_eq!(a.clone() + b.clone(), vec3(5.0, 7.0, 9.0));
    }

    #[test]
    fn assign() {
        let mut v = vec2(1.0, 2.0);
        v += vec2(1.0, 1.0);
        assert_eq!(v, vec2(2.0, 3.0));
        v -= &vec2(2.0, 2.0);
        assert_eq!(v, vec2(0.0, 1.0));
        v *= vec2(5.0, 5.0);
        assert_eq!(v, vec2(0.0, 5.0));
        v /= vec2(1.0, 5.0);
        assert_eq!(v, vec2(0.0, 1.0));
    }

    #[test]
    fn scalar() {
        let v = vec2(2.0, -4.0);
        assert_eq!(&v + 1.0, vec2(3.0, -3.0));
        assert_eq!(&v - 1.0, vec2(1.0, -5.0));
        assert_eq!(&v * 0.5, vec2(1.0, -2.0));
        assert_eq!(&v / 2.0, vec2(1.0, -2.0));

        let mut w = v.clone();
        w *= 3.0;
        w /= 2.0;
        assert_eq!(w, vec2(3.0, -6.0));
    }

    #[test]
    fn division_guards() {
        let v = vec2(1.0f64, 1.0);
        assert_eq!(
            v.checked_div_scalar(0.0),
            Err(Error::DivisionByZero { divisor: 0.0 })
        );
        assert!(v.checked_div_scalar(-1e-9).is_err());
        assert_eq!(v.checked_div_scalar(-0.5), Ok(vec2(-2.0, -2.0)));

        assert_eq!(
            v.checked_div(&vec2(1.0, 0.0)),
            Err(Error::DivisionByZero { divisor: 0.0 })
        );
        // Tiny but non-zero element-wise divisors are allowed.
        assert!(v.checked_div(&vec2(1.0, 1e-20)).is_ok());
    }

    #[test]
    fn length_mismatch() {
        let a = vec2(1.0, 2.0);
        let b = vec3(1.0, 2.0, 3.0);
        let err = Error::LengthMismatch {
            expected: 2,
            actual: 3,
        };
        assert_eq!(a.checked_add(&b), Err(err.clone()));
        assert_eq!(a.checked_sub(&b), Err(err.clone()));
        assert_eq!(a.checked_mul(&b), Err(err.clone()));
        assert_eq!(a.checked_div(&b), Err(err));
        assert_ne!(a, b);
    }

    #[test]
    #[should_panic(expected = "length mismatch")]
    fn add_panics_on_mismatch() {
        let _ = vec2(1.0, 2.0) + vec3(1.0, 2.0, 3.0);
    }

    #[test]
    #[should_panic(expected = "divide by zero")]
    fn div_panics_on_zero() {
        let mut v = vec2(1.0, 2.0);
        v /= 0.0;
    }

    #[test]
    fn tolerance() {
        let a = vec3(0.1f64 + 0.2, 1.0, 2.0);
        let b = vec3(0.3f64, 1.0, 2.0);
        assert_ne!(a, b);
        assert_relative_eq!(a, b);
        assert!(!a.relative_eq(&vec2(0.3, 1.0), 1.0, 1.0));
    }
}
