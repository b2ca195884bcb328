//! View and projection matrices.
//!
//! The matrices follow the OpenGL conventions: view space is right-handed with the camera looking
//! down the negative Z axis, and clip space maps the view volume to normalized device coordinates
//! in `[-1, 1]` on every axis (including depth).

use crate::{
    config,
    error::{Error, Result},
    traits::Float,
    Matrix, Vector,
};

/// Creates an orthographic projection that maps the box `[left, right] x [bottom, top] x
/// [-near, -far]` in view space onto the canonical clip volume.
///
/// # Errors
///
/// Returns [`Error::InvalidProjection`] if any extent of the box is (close to) zero.
///
/// # Examples
///
/// ```
/// # use sandbox_linalg::*;
/// let p = projection::ortho(0.0, 800.0, 0.0, 600.0, -1.0, 1.0).unwrap();
/// let top_right = p.transform(&vec4(800.0, 600.0, 0.0, 1.0)).unwrap();
/// approx::assert_relative_eq!(top_right, vec4(1.0, 1.0, 0.0, 1.0), epsilon = 1e-12);
/// ```
#[rustfmt::skip]
pub fn ortho<T: Float>(left: T, right: T, bottom: T, top: T, near: T, far: T) -> Result<Matrix<T>> {
    let eps = config::epsilon_as::<T>();
    let two = T::ONE + T::ONE;
    if (right - left).abs() <= eps {
        return Err(Error::InvalidProjection("left and right planes coincide"));
    }
    if (top - bottom).abs() <= eps {
        return Err(Error::InvalidProjection("top and bottom planes coincide"));
    }
    if (far - near).abs() <= eps {
        return Err(Error::InvalidProjection("near and far planes coincide"));
    }

    let mut m = crate::mat4();
    m[(0, 0)] = two / (right - left); m[(0, 3)] = -(right + left) / (right - left);
    m[(1, 1)] = two / (top - bottom); m[(1, 3)] = -(top + bottom) / (top - bottom);
    m[(2, 2)] = -two / (far - near);  m[(2, 3)] = -(far + near) / (far - near);
    Ok(m)
}

/// Creates a perspective projection.
///
/// `fovy` is the vertical field of view in radians, `aspect` the ratio of width to height. The
/// near plane maps to depth -1 and the far plane to depth 1 after the perspective divide.
///
/// # Errors
///
/// Returns [`Error::InvalidProjection`] if `fovy` or `aspect` is not positive, if `near` is
/// negative, or if `far` isn't beyond `near`.
///
/// # Examples
///
/// ```
/// # use sandbox_linalg::*;
/// use std::f64::consts::FRAC_PI_2;
///
/// let p = projection::perspective(FRAC_PI_2, 1.0, 1.0, 10.0).unwrap();
/// let clip = p.transform(&vec4(0.0, 0.0, -1.0, 1.0)).unwrap();
/// assert!((clip.z() / clip.w() + 1.0f64).abs() < 1e-12);
///
/// assert!(projection::perspective(FRAC_PI_2, 1.0, 10.0, 1.0).is_err());
/// ```
pub fn perspective<T: Float>(fovy: T, aspect: T, near: T, far: T) -> Result<Matrix<T>> {
    let eps = config::epsilon_as::<T>();
    if fovy <= eps {
        return Err(Error::InvalidProjection("field of view must be positive"));
    }
    if aspect <= eps {
        return Err(Error::InvalidProjection("aspect ratio must be positive"));
    }
    if near < T::ZERO {
        return Err(Error::InvalidProjection("near plane must not be negative"));
    }
    if far - near <= eps {
        return Err(Error::InvalidProjection(
            "far plane must be further away than the near plane",
        ));
    }

    let two = T::ONE + T::ONE;
    let focal = T::ONE / (fovy / two).tan();
    let depth = far - near;

    let mut m = crate::mat4();
    m[(0, 0)] = focal / aspect;
    m[(1, 1)] = focal;
    m[(2, 2)] = -(far + near) / depth;
    m[(2, 3)] = -two * far * near / depth;
    m[(3, 2)] = -T::ONE;
    m[(3, 3)] = T::ZERO;
    Ok(m)
}

/// Creates a view matrix for a camera at `eye` looking at `center`.
///
/// The returned matrix moves `eye` to the origin and rotates the scene so that `center` lies on the
/// negative Z axis and `up` points (roughly) along positive Y.
///
/// # Errors
///
/// - [`Error::UnsupportedSize`] if any argument doesn't have 3 elements.
/// - [`Error::ZeroLength`] if `eye` and `center` coincide, or if `up` is parallel to the viewing
///   direction.
///
/// # Examples
///
/// ```
/// # use sandbox_linalg::*;
/// let view = projection::look_at(
///     &vec3(0.0, 0.0, 5.0),
///     &vec3(0.0, 0.0, 0.0),
///     &vec3(0.0, 1.0, 0.0),
/// ).unwrap();
/// let p = view.transform(&vec4(0.0, 0.0, 0.0, 1.0)).unwrap();
/// assert_eq!(p, vec4(0.0, 0.0, -5.0, 1.0));
/// ```
#[rustfmt::skip]
pub fn look_at<T: Float>(eye: &Vector<T>, center: &Vector<T>, up: &Vector<T>) -> Result<Matrix<T>> {
    for v in [eye, center, up] {
        if v.len() != 3 {
            return Err(Error::UnsupportedSize {
                expected: "3",
                actual: v.len(),
            });
        }
    }

    let f = center.checked_sub(eye)?.unit()?;
    let s = f.cross(up)?.unit()?;
    let u = s.cross(&f)?;

    let mut m = crate::mat4();
    m[(0, 0)] = s.x();  m[(0, 1)] = s.y();  m[(0, 2)] = s.z();
    m[(1, 0)] = u.x();  m[(1, 1)] = u.y();  m[(1, 2)] = u.z();
    m[(2, 0)] = -f.x(); m[(2, 1)] = -f.y(); m[(2, 2)] = -f.z();
    m[(0, 3)] = -s.dot(eye)?;
    m[(1, 3)] = -u.dot(eye)?;
    m[(2, 3)] = f.dot(eye)?;
    Ok(m)
}
