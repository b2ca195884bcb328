use std::{fmt, slice};

use crate::{
    config,
    error::{Error, Result},
    traits::Float,
    Real,
};

mod ops;

/// A dense, heap-allocated column vector with at least one element of type `T`.
///
/// The length is fixed at construction; there is no way to resize a [`Vector`]. Cloning performs
/// a deep copy, so two vectors never share storage.
///
/// # Construction
///
/// - [`Vector::zeros`] allocates a zero-filled vector of a given length.
/// - [`Vector::from_slice`] and [`Vector::from_vec`] copy (or take) an existing buffer.
/// - [`Vector::with_len`] does the same, but also checks the exact length. This is how the
///   2, 3 and 4 element vectors used for graphics are created from dynamic data.
/// - The freestanding [`vec2`], [`vec3`] and [`vec4`] functions create vectors from their
///   components.
/// - Arrays convert via [`From`], `Vec`s and slices via [`TryFrom`].
///
/// # Element Access
///
/// - [`Index`] and [`IndexMut`] behave like they do on slices and panic when out of bounds.
/// - [`Vector::get`] and [`Vector::get_mut`] return [`Option`]s, [`Vector::at`] returns a
///   [`Result`] holding a copy of the element.
/// - [`Vector::x`], [`Vector::y`], [`Vector::z`] and [`Vector::w`] (and their `_mut` variants)
///   access the first four elements by name.
/// - [`Vector::data`] exposes the contiguous element buffer, [`Vector::as_bytes`] its raw bytes.
///
/// # Errors
///
/// Named operations with preconditions (matching lengths, non-zero divisors, 3 elements for the
/// cross product, ...) return [`Result`]. The arithmetic operators are shorthands for the
/// `checked_*` methods that panic instead.
///
/// [`Index`]: std::ops::Index
/// [`IndexMut`]: std::ops::IndexMut
#[derive(Clone)]
pub struct Vector<T = Real>(Box<[T]>);

impl<T> Vector<T> {
    /// Creates a [`Vector`] that takes ownership of `data`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if `data` has no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sandbox_linalg::*;
    /// let v = Vector::from_vec(vec![1.0, 2.0, 3.0]).unwrap();
    /// assert_eq!(v.len(), 3);
    /// assert!(Vector::<f32>::from_vec(Vec::new()).is_err());
    /// ```
    pub fn from_vec(data: Vec<T>) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::Empty);
        }
        Ok(Self(data.into_boxed_slice()))
    }

    /// Creates a [`Vector`] from `data`, which must have exactly `len` elements.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sandbox_linalg::*;
    /// let v = Vector::with_len(vec![1.0, 2.0, 3.0], 3).unwrap();
    /// assert_eq!(v, vec3(1.0, 2.0, 3.0));
    /// assert!(Vector::with_len(vec![1.0, 2.0], 3).is_err());
    /// ```
    pub fn with_len(data: Vec<T>, len: usize) -> Result<Self> {
        if data.len() != len {
            return Err(Error::LengthMismatch {
                expected: len,
                actual: data.len(),
            });
        }
        Self::from_vec(data)
    }

    /// Wraps a buffer that is already known to be non-empty.
    pub(crate) fn from_nonempty(data: Vec<T>) -> Self {
        debug_assert!(!data.is_empty());
        Self(data.into_boxed_slice())
    }

    /// Creates a vector of length `len` by invoking a closure with the index of each element.
    pub fn from_fn<F>(len: usize, cb: F) -> Result<Self>
    where
        F: FnMut(usize) -> T,
    {
        Self::from_vec((0..len).map(cb).collect())
    }

    /// Applies a closure to each element, returning a new vector.
    pub fn map<F, U>(&self, mut f: F) -> Vector<U>
    where
        F: FnMut(&T) -> U,
    {
        Vector(self.0.iter().map(|v| f(v)).collect())
    }

    /// Returns the number of elements. Always at least 1.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the underlying elements as a contiguous slice.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.0
    }

    /// Returns the underlying elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.0
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.0.iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.0.iter_mut()
    }

    /// Returns a reference to the element at `index`, or [`None`] if out of bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.0.get(index)
    }

    /// Returns a mutable reference to the element at `index`, or [`None`] if out of bounds.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.0.get_mut(index)
    }

    /// Returns a copy of the element at `index`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sandbox_linalg::*;
    /// let v = vec2(4.0, 5.0);
    /// assert_eq!(v.at(1), Ok(5.0));
    /// assert!(v.at(2).is_err());
    /// ```
    pub fn at(&self, index: usize) -> Result<T>
    where
        T: Copy,
    {
        self.0.get(index).copied().ok_or(Error::IndexOutOfBounds {
            index,
            len: self.len(),
        })
    }

    /// Converts this vector back into a [`Vec`].
    pub fn into_vec(self) -> Vec<T> {
        self.0.into_vec()
    }

    /// Returns the raw bytes of the element buffer, e.g. for uploading as a shader uniform.
    pub fn as_bytes(&self) -> &[u8]
    where
        T: bytemuck::Pod,
    {
        bytemuck::cast_slice(&self.0)
    }
}

// Named component access. These are plain index lookups, so they panic like `v[i]` when the
// vector is too short.
impl<T: Copy> Vector<T> {
    /// The first element.
    #[inline]
    pub fn x(&self) -> T {
        self[0]
    }

    /// The second element.
    ///
    /// # Panics
    ///
    /// Panics if the vector has fewer than 2 elements.
    #[inline]
    pub fn y(&self) -> T {
        self[1]
    }

    /// The third element.
    ///
    /// # Panics
    ///
    /// Panics if the vector has fewer than 3 elements.
    #[inline]
    pub fn z(&self) -> T {
        self[2]
    }

    /// The fourth element.
    ///
    /// # Panics
    ///
    /// Panics if the vector has fewer than 4 elements.
    #[inline]
    pub fn w(&self) -> T {
        self[3]
    }

    #[inline]
    pub fn x_mut(&mut self) -> &mut T {
        &mut self[0]
    }

    #[inline]
    pub fn y_mut(&mut self) -> &mut T {
        &mut self[1]
    }

    #[inline]
    pub fn z_mut(&mut self) -> &mut T {
        &mut self[2]
    }

    #[inline]
    pub fn w_mut(&mut self) -> &mut T {
        &mut self[3]
    }
}

impl<T: Float> Vector<T> {
    /// Creates a vector of length `len` with every element set to 0.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if `len` is 0.
    pub fn zeros(len: usize) -> Result<Self> {
        Self::from_vec(vec![T::ZERO; len])
    }

    /// Creates a [`Vector`] by copying the elements of `data`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if `data` is empty.
    pub fn from_slice(data: &[T]) -> Result<Self> {
        Self::from_vec(data.to_vec())
    }

    /// Returns the squared euclidean length.
    pub fn length2(&self) -> T {
        self.iter().fold(T::ZERO, |acc, &v| acc + v * v)
    }

    /// Returns the euclidean (L2) norm.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sandbox_linalg::*;
    /// assert_eq!(vec2(3.0, 4.0).norm(), 5.0);
    /// ```
    pub fn norm(&self) -> T {
        self.length2().sqrt()
    }

    /// Rescales the elements into the range `[0, 1]` (min-max normalization).
    ///
    /// The smallest element is subtracted from every element, then everything is divided by the
    /// difference between the largest and smallest element. If all elements are equal, the result
    /// is all zeroes. `self` is left unchanged.
    ///
    /// This is *not* the unit-length normalization; use [`Vector::unit`] for that.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sandbox_linalg::*;
    /// assert_eq!(vec3(2.0, 4.0, 6.0).normalize(), vec3(0.0, 0.5, 1.0));
    /// assert_eq!(vec3(7.0, 7.0, 7.0).normalize(), vec3(0.0, 0.0, 0.0));
    /// ```
    pub fn normalize(&self) -> Self {
        let (min, max) = self.iter().fold((T::MAX, T::MIN), |(min, max), &v| {
            (if v < min { v } else { min }, if v > max { v } else { max })
        });
        let span = max - min;

        let mut out = self.clone();
        for elem in out.iter_mut() {
            *elem -= min;
        }
        if span > T::ZERO {
            for elem in out.iter_mut() {
                *elem /= span;
            }
        }
        out
    }

    /// Divides this vector by its length, resulting in a unit vector.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroLength`] if the length is below the zero threshold.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sandbox_linalg::*;
    /// assert_eq!(vec3(0.0, 0.0, 4.0).unit(), Ok(vec3(0.0, 0.0, 1.0)));
    /// assert!(vec3(0.0, 0.0, 0.0).unit().is_err());
    /// ```
    pub fn unit(&self) -> Result<Self> {
        let len = self.norm();
        if len < config::epsilon_as() {
            return Err(Error::ZeroLength);
        }
        Ok(self.map(|&v| v / len))
    }

    /// Computes the dot product between `self` and `other`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] if the vectors differ in length.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sandbox_linalg::*;
    /// let a = vec3(1.0, 3.0, -5.0);
    /// let b = vec3(4.0, -2.0, -1.0);
    /// assert_eq!(a.dot(&b), Ok(3.0));
    /// ```
    pub fn dot(&self, other: &Self) -> Result<T> {
        self.check_len(other)?;
        Ok(self
            .iter()
            .zip(other.iter())
            .fold(T::ZERO, |acc, (&a, &b)| acc + a * b))
    }

    /// Computes the angle between `self` and `other`, in radians.
    ///
    /// # Errors
    ///
    /// Fails if the vectors differ in length, or if either is shorter than the zero threshold (the
    /// same check [`Vector::unit`] makes).
    ///
    /// # Examples
    ///
    /// ```
    /// # use sandbox_linalg::*;
    /// use std::f64::consts::FRAC_PI_2;
    ///
    /// let angle = vec2(0.0, 2.0).angle(&vec2(3.0, 0.0)).unwrap();
    /// assert!((angle as f64 - FRAC_PI_2).abs() < 1e-6);
    /// ```
    pub fn angle(&self, other: &Self) -> Result<T> {
        self.check_len(other)?;

        let l1 = self.norm();
        let l2 = other.norm();
        let eps = config::epsilon_as();
        if l1 < eps || l2 < eps {
            return Err(Error::ZeroLength);
        }

        // Rounding can push the cosine slightly outside of `acos`'s domain.
        let mut cos = self.dot(other)? / (l1 * l2);
        if cos > T::ONE {
            cos = T::ONE;
        } else if cos < -T::ONE {
            cos = -T::ONE;
        }
        Ok(cos.acos())
    }

    /// Computes the cross product of `self` and `other`.
    ///
    /// The result is perpendicular to both inputs. Swapping the arguments inverts its direction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedSize`] unless both vectors have exactly 3 elements.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sandbox_linalg::*;
    /// let x = vec3(1.0, 0.0, 0.0);
    /// let y = vec3(0.0, 1.0, 0.0);
    /// assert_eq!(x.cross(&y), Ok(vec3(0.0, 0.0, 1.0)));
    /// assert_eq!(y.cross(&x), Ok(vec3(0.0, 0.0, -1.0)));
    /// ```
    pub fn cross(&self, other: &Self) -> Result<Self> {
        for v in [self, other] {
            if v.len() != 3 {
                return Err(Error::UnsupportedSize {
                    expected: "3",
                    actual: v.len(),
                });
            }
        }

        let [a1, a2, a3] = [self[0], self[1], self[2]];
        let [b1, b2, b3] = [other[0], other[1], other[2]];

        #[rustfmt::skip]
        let cross = vec3(
            a2 * b3 - a3 * b2,
            a3 * b1 - a1 * b3,
            a1 * b2 - a2 * b1,
        );
        Ok(cross)
    }

    /// Appends `value`, yielding a vector with one more element.
    ///
    /// Appending 1 lifts a point into homogeneous coordinates.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sandbox_linalg::*;
    /// assert_eq!(vec3(1.0, 2.0, 3.0).extend(1.0), vec4(1.0, 2.0, 3.0, 1.0));
    /// ```
    pub fn extend(&self, value: T) -> Self {
        let mut data = self.0.to_vec();
        data.push(value);
        Self(data.into_boxed_slice())
    }

    /// Removes the last element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if `self` only has a single element.
    pub fn truncate(&self) -> Result<Self> {
        Self::from_slice(&self.0[..self.len() - 1])
    }

    fn check_len(&self, other: &Self) -> Result<()> {
        if self.len() != other.len() {
            return Err(Error::LengthMismatch {
                expected: self.len(),
                actual: other.len(),
            });
        }
        Ok(())
    }
}

impl<T, const N: usize> From<[T; N]> for Vector<T> {
    /// # Panics
    ///
    /// Panics if `N` is 0.
    #[inline]
    fn from(value: [T; N]) -> Self {
        assert!(N > 0, "attempt to create an empty vector");
        Self(Box::new(value))
    }
}

impl<T> TryFrom<Vec<T>> for Vector<T> {
    type Error = Error;

    fn try_from(value: Vec<T>) -> Result<Self> {
        Self::from_vec(value)
    }
}

impl<T: Float> TryFrom<&[T]> for Vector<T> {
    type Error = Error;

    fn try_from(value: &[T]) -> Result<Self> {
        Self::from_slice(value)
    }
}

impl<T> From<Vector<T>> for Vec<T> {
    #[inline]
    fn from(value: Vector<T>) -> Self {
        value.into_vec()
    }
}

impl<T> AsRef<[T]> for Vector<T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        &self.0
    }
}

impl<T> AsMut<[T]> for Vector<T> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        &mut self.0
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tup = f.debug_tuple("");
        for elem in self.iter() {
            tup.field(elem);
        }
        tup.finish()
    }
}

impl<T: fmt::Display> fmt::Display for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, elem) in self.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            elem.fmt(f)?;
        }
        write!(f, ")")
    }
}

/// Constructs a 2-element [`Vector`].
#[inline]
pub fn vec2<T>(x: T, y: T) -> Vector<T> {
    Vector::from([x, y])
}

/// Constructs a 3-element [`Vector`].
#[inline]
pub fn vec3<T>(x: T, y: T, z: T) -> Vector<T> {
    Vector::from([x, y, z])
}

/// Constructs a 4-element [`Vector`].
#[inline]
pub fn vec4<T>(x: T, y: T, z: T, w: T) -> Vector<T> {
    Vector::from([x, y, z, w])
}

#[cfg(test)]
mod tests {
    use std::f64::consts::TAU;

    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn construction() {
        assert_eq!(Vector::<f32>::zeros(3).unwrap(), vec3(0.0, 0.0, 0.0));
        assert_eq!(Vector::<f32>::zeros(0), Err(Error::Empty));
        assert_eq!(Vector::<f64>::from_slice(&[]), Err(Error::Empty));
        assert_eq!(
            Vector::from_slice(&[1.0, 2.0]).unwrap(),
            Vector::from([1.0, 2.0])
        );
        assert_eq!(
            Vector::with_len(vec![1.0, 2.0, 3.0, 4.0], 3),
            Err(Error::LengthMismatch {
                expected: 3,
                actual: 4
            })
        );
        assert_eq!(
            Vector::from_fn(4, |i| i as f32).unwrap(),
            vec4(0.0, 1.0, 2.0, 3.0)
        );
    }

    #[test]
    fn copies_are_independent() {
        let a = vec3(1.0, 2.0, 3.0);
        let mut b = a.clone();
        b[0] = 100.0;
        assert_eq!(a[0], 1.0);
        assert_eq!(b[0], 100.0);
    }

    #[test]
    fn access() {
        let mut v = vec4(1.0, 2.0, 3.0, 4.0);
        assert_eq!(v.x(), 1.0);
        assert_eq!(v.y(), 2.0);
        assert_eq!(v.z(), 3.0);
        assert_eq!(v.w(), 4.0);

        *v.z_mut() = 30.0;
        assert_eq!(v[2], 30.0);
        v[0] = 10.0;
        assert_eq!(v.x(), 10.0);

        assert_eq!(v.get(3), Some(&4.0));
        assert_eq!(v.get(4), None);
        assert_eq!(v.at(4), Err(Error::IndexOutOfBounds { index: 4, len: 4 }));
    }

    #[test]
    #[should_panic]
    fn index_out_of_bounds() {
        let v = vec2(1.0, 2.0);
        let _ = v[2];
    }

    #[test]
    #[should_panic]
    fn missing_component() {
        let v = vec2(1.0, 2.0);
        v.z();
    }

    #[test]
    fn fmt() {
        assert_eq!(format!("{}", vec3(0.0, 0.5, 1.0)), "(0, 0.5, 1)");
        assert_eq!(format!("{:?}", vec2(1.0, 0.0)), "(1.0, 0.0)");
    }

    #[test]
    fn normalize_is_min_max() {
        assert_eq!(vec3(2.0, 4.0, 6.0).normalize(), vec3(0.0, 0.5, 1.0));
        assert_eq!(vec3(-3.0, -1.0, -2.0).normalize(), vec3(0.0, 1.0, 0.5));
        assert_eq!(Vector::from([5.0]).normalize(), Vector::from([0.0]));

        let v = vec2(1.0, 3.0);
        let _ = v.normalize();
        assert_eq!(v, vec2(1.0, 3.0), "receiver must be left untouched");
    }

    #[test]
    fn unit() {
        let v = vec3(3.0f64, 0.0, 4.0).unit().unwrap();
        assert_relative_eq!(v.norm(), 1.0);
        assert_relative_eq!(v, vec3(0.6, 0.0, 0.8));
        assert_eq!(vec2(0.0f32, 0.0).unit(), Err(Error::ZeroLength));
    }

    #[test]
    fn dot() {
        assert_eq!(vec3(1.0, 3.0, -5.0).dot(&vec3(4.0, -2.0, -1.0)), Ok(3.0));
        assert_eq!(vec3(1.0, 3.0, -5.0).dot(&vec3(1.0, 3.0, -5.0)), Ok(35.0));
        assert_eq!(
            vec2(1.0, 0.0).dot(&vec3(1.0, 0.0, 0.0)),
            Err(Error::LengthMismatch {
                expected: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn angle() {
        let x = vec3(1.0f64, 0.0, 0.0);
        let y = vec3(0.0f64, 1.0, 0.0);
        assert_relative_eq!(x.angle(&y).unwrap(), TAU / 4.0);
        assert_relative_eq!(y.angle(&-&y).unwrap(), TAU / 2.0);
        assert_relative_eq!(y.angle(&y).unwrap(), 0.0);
        assert_relative_eq!(
            vec2(1.0f64, 1.0).angle(&vec2(1.0, -1.0)).unwrap(),
            TAU / 4.0
        );

        assert_eq!(
            x.angle(&Vector::zeros(3).unwrap()),
            Err(Error::ZeroLength)
        );
        let tiny = vec3(1e-12, 0.0, 0.0);
        assert_eq!(tiny.unit(), Err(Error::ZeroLength));
        assert_eq!(x.angle(&tiny), Err(Error::ZeroLength));
        assert_eq!(tiny.angle(&y), Err(Error::ZeroLength));

        assert_eq!(
            x.angle(&vec2(1.0, 0.0)),
            Err(Error::LengthMismatch {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn cross() {
        let x = vec3(1.0, 0.0, 0.0);
        let y = vec3(0.0, 1.0, 0.0);
        let z = vec3(0.0, 0.0, 1.0);
        assert_eq!(x.cross(&y), Ok(z.clone()));
        assert_eq!(y.cross(&z), Ok(x.clone()));
        assert_eq!(z.cross(&x), Ok(y.clone()));

        assert!(matches!(
            vec2(1.0, 0.0).cross(&vec2(0.0, 1.0)),
            Err(Error::UnsupportedSize { actual: 2, .. })
        ));
        assert!(matches!(
            x.cross(&vec4(0.0, 1.0, 0.0, 0.0)),
            Err(Error::UnsupportedSize { actual: 4, .. })
        ));
    }

    #[test]
    fn extend_truncate() {
        let v = vec2(1.0, 2.0).extend(3.0);
        assert_eq!(v, vec3(1.0, 2.0, 3.0));
        assert_eq!(v.truncate(), Ok(vec2(1.0, 2.0)));
        assert_eq!(Vector::from([1.0]).truncate(), Err(Error::Empty));
    }

    #[test]
    fn bytes() {
        let v = vec2(1.0f32, 2.0);
        assert_eq!(v.as_bytes().len(), 8);
        assert_eq!(v.as_bytes()[..4], 1.0f32.to_ne_bytes());
    }
}
