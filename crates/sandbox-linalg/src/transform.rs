//! Out-of-place construction of homogeneous transformation matrices.
//!
//! All functions here return a new [`Matrix`] and leave their input untouched. 2D transforms use
//! 3x3 matrices, 3D transforms use 4x4 matrices. Points are column vectors, so the transform that
//! is applied first appears rightmost in a product.

use crate::{
    error::{Error, Result},
    traits::Float,
    Matrix, Vector,
};

/// Returns a copy of `m` with `v` added to its translation column.
///
/// # Errors
///
/// Fails unless `v` has 2 or 3 elements and `m` is a square matrix of order `v.len() + 1`.
///
/// # Examples
///
/// ```
/// # use sandbox_linalg::*;
/// let m = transform::translate(&mat4(), &vec3(1.0, 2.0, 3.0)).unwrap();
/// assert_eq!(m.transform(&vec4(0.0, 0.0, 0.0, 1.0)), Ok(vec4(1.0, 2.0, 3.0, 1.0)));
/// ```
pub fn translate<T: Float>(m: &Matrix<T>, v: &Vector<T>) -> Result<Matrix<T>> {
    if !matches!(v.len(), 2 | 3) {
        return Err(Error::UnsupportedSize {
            expected: "2 or 3",
            actual: v.len(),
        });
    }
    let mut out = m.clone();
    out.translate(v)?;
    Ok(out)
}

/// Returns `R · m`, where `R` is a rotation by `angle` radians of the same order as `m`.
///
/// - For 3x3 matrices, `R` is a counterclockwise rotation in the XY plane, and `axis` is ignored.
/// - For 4x4 matrices, `R` rotates around `axis` (which is normalized to unit length first)
///   according to the right-hand rule. See [`axis_angle`].
///
/// # Errors
///
/// Fails if `m` isn't a 3x3 or 4x4 matrix, or if the 3D rotation axis is invalid.
///
/// # Examples
///
/// ```
/// # use sandbox_linalg::*;
/// use std::f64::consts::FRAC_PI_2;
///
/// let r = transform::rotate(&mat4(), FRAC_PI_2, &vec3(0.0, 0.0, 1.0)).unwrap();
/// let p = r.transform(&vec4(1.0, 0.0, 0.0, 1.0)).unwrap();
/// assert!((p.y() - 1.0f64).abs() < 1e-12);
/// ```
pub fn rotate<T: Float>(m: &Matrix<T>, angle: T, axis: &Vector<T>) -> Result<Matrix<T>> {
    if !m.is_square() {
        return Err(Error::NotSquare {
            rows: m.rows(),
            cols: m.cols(),
        });
    }
    let r = match m.rows() {
        3 => planar(angle),
        4 => axis_angle(angle, axis)?,
        order => {
            return Err(Error::UnsupportedOrder {
                expected: "3 or 4",
                actual: order,
            })
        }
    };
    r.matmul(m)
}

/// Creates a 3x3 homogeneous matrix that rotates 2D points counterclockwise by `angle` radians.
#[rustfmt::skip]
pub fn planar<T: Float>(angle: T) -> Matrix<T> {
    let (s, c) = (angle.sin(), angle.cos());
    let mut r = crate::mat3();
    r[(0, 0)] = c; r[(0, 1)] = -s;
    r[(1, 0)] = s; r[(1, 1)] = c;
    r
}

/// Creates a 4x4 homogeneous matrix that rotates by `angle` radians around `axis`.
///
/// The matrix is built with [Rodrigues' rotation formula]. `axis` does not need to be of unit
/// length.
///
/// # Errors
///
/// Fails if `axis` does not have 3 elements, or if its length is zero.
///
/// [Rodrigues' rotation formula]: https://en.wikipedia.org/wiki/Rodrigues%27_rotation_formula
#[rustfmt::skip]
pub fn axis_angle<T: Float>(angle: T, axis: &Vector<T>) -> Result<Matrix<T>> {
    if axis.len() != 3 {
        return Err(Error::UnsupportedSize {
            expected: "3",
            actual: axis.len(),
        });
    }
    let axis = axis.unit()?;
    let (x, y, z) = (axis.x(), axis.y(), axis.z());
    let (s, c) = (angle.sin(), angle.cos());
    let k = T::ONE - c;

    let mut r = crate::mat4();
    r[(0, 0)] = c + x * x * k;     r[(0, 1)] = x * y * k - z * s; r[(0, 2)] = x * z * k + y * s;
    r[(1, 0)] = y * x * k + z * s; r[(1, 1)] = c + y * y * k;     r[(1, 2)] = y * z * k - x * s;
    r[(2, 0)] = z * x * k - y * s; r[(2, 1)] = z * y * k + x * s; r[(2, 2)] = c + z * z * k;
    Ok(r)
}

/// Rotates the point or direction `v` by `angle` radians.
///
/// 2-element vectors are rotated in the plane (`axis` is ignored), 3-element vectors around
/// `axis`. `v` is lifted into homogeneous coordinates, rotated with [`rotate`], and projected back
/// down.
///
/// # Examples
///
/// ```
/// # use sandbox_linalg::*;
/// use std::f64::consts::PI;
///
/// let v = transform::rotate_vector(&vec2(1.0, 0.0), PI, &vec3(0.0, 0.0, 1.0)).unwrap();
/// assert!((v.x() + 1.0f64).abs() < 1e-12);
/// assert!(v.y().abs() < 1e-12);
/// ```
pub fn rotate_vector<T: Float>(v: &Vector<T>, angle: T, axis: &Vector<T>) -> Result<Vector<T>> {
    let m = match v.len() {
        2 => crate::mat3(),
        3 => crate::mat4(),
        len => {
            return Err(Error::UnsupportedSize {
                expected: "2 or 3",
                actual: len,
            })
        }
    };
    let r = rotate(&m, angle, axis)?;
    r.transform(&v.extend(T::ONE))?.truncate()
}

/// Returns a copy of `m` with its diagonal (except the homogeneous element) multiplied by `s`.
///
/// # Errors
///
/// Fails unless `m` is a 3x3 or 4x4 matrix.
pub fn scale<T: Float>(m: &Matrix<T>, s: T) -> Result<Matrix<T>> {
    check_order(m)?;
    let mut out = m.clone();
    out.scale(s)?;
    Ok(out)
}

/// Returns a copy of `m` with its diagonal (except the homogeneous element) multiplied by the
/// per-axis factors in `v`.
///
/// # Errors
///
/// Fails unless `m` is a 3x3 or 4x4 matrix and `v` has one element less than its order.
///
/// # Examples
///
/// ```
/// # use sandbox_linalg::*;
/// let m = transform::scale_by(&mat3(), &vec2(2.0, 3.0)).unwrap();
/// assert_eq!(m.transform(&vec3(1.0, 1.0, 1.0)), Ok(vec3(2.0, 3.0, 1.0)));
/// ```
pub fn scale_by<T: Float>(m: &Matrix<T>, v: &Vector<T>) -> Result<Matrix<T>> {
    check_order(m)?;
    let mut out = m.clone();
    out.scale_by(v)?;
    Ok(out)
}

fn check_order<T>(m: &Matrix<T>) -> Result<()> {
    if !m.is_square() {
        return Err(Error::NotSquare {
            rows: m.rows(),
            cols: m.cols(),
        });
    }
    match m.rows() {
        3 | 4 => Ok(()),
        order => Err(Error::UnsupportedOrder {
            expected: "3 or 4",
            actual: order,
        }),
    }
}
