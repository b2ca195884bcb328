use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

use approx::{AbsDiffEq, RelativeEq, UlpsEq};

use crate::{
    config,
    error::{unwrap_op, Error, Result},
    traits::Float,
    Matrix,
};

impl<T: Float> Matrix<T> {
    /// Element-wise addition.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] unless both matrices have the same shape.
    pub fn checked_add(&self, rhs: &Self) -> Result<Self> {
        self.zip_with(rhs, |a, b| a + b)
    }

    /// Element-wise subtraction.
    pub fn checked_sub(&self, rhs: &Self) -> Result<Self> {
        self.zip_with(rhs, |a, b| a - b)
    }

    /// Element-wise (Hadamard) product. See [`Matrix::matmul`] for the matrix product.
    pub fn checked_mul(&self, rhs: &Self) -> Result<Self> {
        self.zip_with(rhs, |a, b| a * b)
    }

    /// Element-wise division. Fails if any element of `rhs` is exactly zero.
    pub fn checked_div(&self, rhs: &Self) -> Result<Self> {
        self.check_shape(rhs)?;
        if let Some(&divisor) = rhs.data().iter().find(|&&d| d == T::ZERO) {
            return Err(Error::DivisionByZero {
                divisor: divisor.to_f64(),
            });
        }
        self.zip_with(rhs, |a, b| a / b)
    }

    /// Divides every element by `rhs`, refusing divisors smaller in magnitude than
    /// [`config::epsilon`].
    pub fn checked_div_scalar(&self, rhs: T) -> Result<Self> {
        if rhs.abs() < config::epsilon_as() {
            return Err(Error::DivisionByZero {
                divisor: rhs.to_f64(),
            });
        }
        Ok(self.map(|&v| v / rhs))
    }

    fn zip_with(&self, rhs: &Self, f: impl Fn(T, T) -> T) -> Result<Self> {
        self.check_shape(rhs)?;
        let mut out = self.clone();
        for (a, &b) in out.as_mut_slice().iter_mut().zip(rhs.data()) {
            *a = f(*a, b);
        }
        Ok(out)
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline]
    #[track_caller]
    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols,
        );
        &self.data[row * self.cols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline]
    #[track_caller]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols,
        );
        &mut self.data[row * self.cols + col]
    }
}

/// Row-major linear indexing.
impl<T> Index<usize> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<T> IndexMut<usize> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}

/// Matrices are equal if they have the same shape and identical elements.
impl<T: PartialEq> PartialEq for Matrix<T> {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape() && self.data == other.data
    }
}

impl<T: Eq> Eq for Matrix<T> {}

impl<T> AbsDiffEq for Matrix<T>
where
    T: Float + AbsDiffEq<Epsilon = T>,
{
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<T> RelativeEq for Matrix<T>
where
    T: Float + RelativeEq<Epsilon = T>,
{
    fn default_max_relative() -> T {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

impl<T> UlpsEq for Matrix<T>
where
    T: Float + UlpsEq<Epsilon = T>,
{
    fn default_max_ulps() -> u32 {
        T::default_max_ulps()
    }

    fn ulps_eq(&self, other: &Self, epsilon: T, max_ulps: u32) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| a.ulps_eq(b, epsilon, max_ulps))
    }
}

/// Element-wise negation.
impl<T: Float> Neg for &Matrix<T> {
    type Output = Matrix<T>;

    fn neg(self) -> Matrix<T> {
        self.map(|&v| -v)
    }
}

/// Element-wise negation.
impl<T: Float> Neg for Matrix<T> {
    type Output = Matrix<T>;

    fn neg(mut self) -> Matrix<T> {
        for elem in self.as_mut_slice() {
            *elem = -*elem;
        }
        self
    }
}

// `*` between two matrices is element-wise, like the other operators. The matrix product is only
// available as `matmul`.
macro_rules! elementwise_ops {
    ($( $Op:ident::$op:ident, $OpAssign:ident::$op_assign:ident => $checked:ident; )+) => {$(
        impl<T: Float> $Op<&Matrix<T>> for &Matrix<T> {
            type Output = Matrix<T>;

            #[track_caller]
            fn $op(self, rhs: &Matrix<T>) -> Matrix<T> {
                unwrap_op(self.$checked(rhs))
            }
        }

        impl<T: Float> $Op<&Matrix<T>> for Matrix<T> {
            type Output = Matrix<T>;

            #[track_caller]
            fn $op(self, rhs: &Matrix<T>) -> Matrix<T> {
                unwrap_op(self.$checked(rhs))
            }
        }

        impl<T: Float> $Op<Matrix<T>> for Matrix<T> {
            type Output = Matrix<T>;

            #[track_caller]
            fn $op(self, rhs: Matrix<T>) -> Matrix<T> {
                unwrap_op(self.$checked(&rhs))
            }
        }

        impl<T: Float> $OpAssign<&Matrix<T>> for Matrix<T> {
            #[track_caller]
            fn $op_assign(&mut self, rhs: &Matrix<T>) {
                *self = unwrap_op(self.$checked(rhs));
            }
        }

        impl<T: Float> $OpAssign<Matrix<T>> for Matrix<T> {
            #[track_caller]
            fn $op_assign(&mut self, rhs: Matrix<T>) {
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
        impl<T: Float> $Op<T> for &Matrix<T> {
            type Output = Matrix<T>;

            fn $op(self, rhs: T) -> Matrix<T> {
                self.map(|&v| v $tok rhs)
            }
        }

        impl<T: Float> $Op<T> for Matrix<T> {
            type Output = Matrix<T>;

            fn $op(mut self, rhs: T) -> Matrix<T> {
                self.$op_assign(rhs);
                self
            }
        }

        impl<T: Float> $OpAssign<T> for Matrix<T> {
            fn $op_assign(&mut self, rhs: T) {
                for elem in self.as_mut_slice() {
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

/// Matrix-Scalar division. Panics if the divisor is (close to) zero.
impl<T: Float> Div<T> for &Matrix<T> {
    type Output = Matrix<T>;

    #[track_caller]
    fn div(self, rhs: T) -> Matrix<T> {
        unwrap_op(self.checked_div_scalar(rhs))
    }
}

impl<T: Float> Div<T> for Matrix<T> {
    type Output = Matrix<T>;

    #[track_caller]
    fn div(self, rhs: T) -> Matrix<T> {
        unwrap_op(self.checked_div_scalar(rhs))
    }
}

impl<T: Float> DivAssign<T> for Matrix<T> {
    #[track_caller]
    fn div_assign(&mut self, rhs: T) {
        *self = unwrap_op(self.checked_div_scalar(rhs));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(rows: &[&[f64]]) -> Matrix<f64> {
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn elementwise() {
        let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let b = m(&[&[2.0, 2.0], &[2.0, 8.0]]);
        assert_eq!(&a + &b, m(&[&[3.0, 4.0], &[5.0, 12.0]]));
        assert_eq!(&b - &a, m(&[&[1.0, 0.0], &[-1.0, 4.0]]));
        assert_eq!(&a * &b, m(&[&[2.0, 4.0], &[6.0, 32.0]]));
        assert_eq!(&a / &b, m(&[&[0.5, 1.0], &[1.5, 0.5]]));
        assert_eq!(-a.clone(), m(&[&[-1.0, -2.0], &[-3.0, -4.0]]));

        let mut c = a.clone();
        c += &b;
        c -= b;
        assert_eq!(c, a);
    }

    #[test]
    fn scalar() {
        let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
        assert_eq!(&a * 2.0, m(&[&[2.0, 4.0], &[6.0, 8.0]]));
        assert_eq!(&a / 2.0, m(&[&[0.5, 1.0], &[1.5, 2.0]]));
        assert_eq!(&a + 1.0, m(&[&[2.0, 3.0], &[4.0, 5.0]]));
        assert_eq!(a - 1.0, m(&[&[0.0, 1.0], &[2.0, 3.0]]));
    }

    #[test]
    fn guards() {
        let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let wide = m(&[&[1.0, 2.0, 3.0]]);
        assert_eq!(
            a.checked_add(&wide),
            Err(Error::ShapeMismatch {
                left: (2, 2),
                right: (1, 3)
            })
        );
        assert!(a.checked_div(&m(&[&[1.0, 1.0], &[0.0, 1.0]])).is_err());
        assert!(a.checked_div_scalar(1e-10).is_err());
        assert!(a.checked_div_scalar(-1e-3).is_ok());

        // Same elements, different shape.
        assert_ne!(wide, m(&[&[1.0], &[2.0], &[3.0]]));
    }

    #[test]
    #[should_panic(expected = "shape mismatch")]
    fn mul_panics_on_mismatch() {
        let _ = m(&[&[1.0, 2.0]]) * m(&[&[1.0], &[2.0]]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn index_panics() {
        let mut a = m(&[&[1.0, 2.0]]);
        a[(1, 0)] = 0.0;
    }
}
