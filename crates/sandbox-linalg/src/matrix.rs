use std::fmt;

use crate::{
    config,
    error::{Error, Result},
    traits::Float,
    Real, Vector,
};

mod ops;

/// A dense, heap-allocated, row-major matrix with element type `T`.
///
/// Element `(row, col)` is stored at offset `row * cols + col` of [`Matrix::data`]. Both dimensions
/// are at least 1 and never change after construction.
///
/// Transformation matrices follow the column-vector convention: a point `p` is transformed as
/// `M · p`, translations live in the last column, and transforms compose right-to-left
/// (`projection.matmul(&view.matmul(&model)?)`).
///
/// # Construction
///
/// - [`Matrix::zeros`] allocates a zero-filled matrix.
/// - [`Matrix::from_vec`] reshapes a flat row-major buffer. When both dimensions are passed as 0, a
///   square shape is inferred from the buffer length.
/// - [`Matrix::from_rows`] builds a matrix from a list of rows.
/// - [`Matrix::from_fn`] invokes a closure with the row and column of each element.
/// - [`Matrix::identity`] and [`Matrix::identity_rect`] create identity matrices. The free
///   functions [`mat2`], [`mat3`] and [`mat4`] are shorthands for the common square sizes.
///
/// # Element Access
///
/// [`Matrix`] implements [`Index`] and [`IndexMut`] for `(row, col)` tuples and for linear
/// (row-major) `usize` indices. Both panic when out of bounds, just like slices do.
///
/// ```
/// # use sandbox_linalg::*;
/// let mut mat = Matrix::from_rows(&[
///     [0.0, 1.0],
///     [2.0, 3.0],
/// ]).unwrap();
/// mat[(0, 0)] = 4.0;
/// assert_eq!(mat[(0, 0)], 4.0);
/// assert_eq!(mat[3], 3.0);
/// ```
///
/// [`Matrix::get`] and [`Matrix::at`] are the non-panicking counterparts.
///
/// [`Index`]: std::ops::Index
/// [`IndexMut`]: std::ops::IndexMut
#[derive(Clone)]
pub struct Matrix<T = Real> {
    rows: usize,
    cols: usize,
    data: Box<[T]>,
}

impl<T> Matrix<T> {
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the total number of elements (`rows * cols`).
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Returns the row-major element buffer.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Returns the raw bytes of the row-major element buffer.
    pub fn as_bytes(&self) -> &[u8]
    where
        T: bytemuck::Pod,
    {
        bytemuck::cast_slice(&self.data)
    }

    /// Returns a reference to the element at `(row, col)`, or [`None`] if out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sandbox_linalg::*;
    /// let mat = Matrix::from_rows(&[
    ///     [0.0, 1.0, 2.0],
    ///     [3.0, 4.0, 5.0],
    /// ]).unwrap();
    /// assert_eq!(mat.get(1, 0), Some(&3.0));
    /// assert_eq!(mat.get(2, 0), None);
    /// assert_eq!(mat.get(0, 3), None);
    /// ```
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Returns a mutable reference to the element at `(row, col)`, or [`None`] if out of bounds.
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        if row < self.rows && col < self.cols {
            self.data.get_mut(row * self.cols + col)
        } else {
            None
        }
    }

    /// Returns a copy of the element at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] with the linear index if `(row, col)` lies outside of the
    /// matrix.
    pub fn at(&self, row: usize, col: usize) -> Result<T>
    where
        T: Copy,
    {
        self.get(row, col)
            .copied()
            .ok_or_else(|| self.out_of_bounds(row, col))
    }

    /// Returns a copy of the element at the row-major linear `index`.
    pub fn at_index(&self, index: usize) -> Result<T>
    where
        T: Copy,
    {
        self.data.get(index).copied().ok_or(Error::IndexOutOfBounds {
            index,
            len: self.len(),
        })
    }

    /// Applies a closure to each element, returning a new matrix of the same shape.
    pub fn map<F, U>(&self, mut f: F) -> Matrix<U>
    where
        F: FnMut(&T) -> U,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|v| f(v)).collect(),
        }
    }

    /// Builds a matrix of a known, non-zero shape.
    fn build<F>(rows: usize, cols: usize, mut cb: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        debug_assert!(rows > 0 && cols > 0);
        let data = (0..rows * cols).map(|i| cb(i / cols, i % cols)).collect();
        Self { rows, cols, data }
    }

    fn check_index(&self, row: usize, col: usize) -> Result<()> {
        if row < self.rows && col < self.cols {
            Ok(())
        } else {
            Err(self.out_of_bounds(row, col))
        }
    }

    /// The error for an invalid `(row, col)` position. The reported linear index saturates at
    /// `usize::MAX`.
    fn out_of_bounds(&self, row: usize, col: usize) -> Error {
        Error::IndexOutOfBounds {
            index: row.saturating_mul(self.cols).saturating_add(col),
            len: self.len(),
        }
    }

    fn check_square(&self) -> Result<()> {
        if self.is_square() {
            Ok(())
        } else {
            Err(Error::NotSquare {
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    fn check_shape(&self, other: &Self) -> Result<()> {
        if self.shape() == other.shape() {
            Ok(())
        } else {
            Err(Error::ShapeMismatch {
                left: self.shape(),
                right: other.shape(),
            })
        }
    }
}

impl<T: Float> Matrix<T> {
    /// Creates a `rows`x`cols` matrix with every element set to 0.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroDimension`] if either dimension is 0, and
    /// [`Error::DimensionOverflow`] if `rows * cols` overflows.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        check_dims(rows, cols)?;
        Ok(Self::build(rows, cols, |_, _| T::ZERO))
    }

    /// Creates a [`Matrix`] from a flat, row-major buffer.
    ///
    /// If `rows` and `cols` are both 0, the matrix is assumed to be square and its order is
    /// inferred from the length of `data`.
    ///
    /// # Errors
    ///
    /// - [`Error::Empty`] if `data` is empty.
    /// - [`Error::NotPerfectSquare`] if a square shape is inferred, but `data.len()` is not a
    ///   perfect square.
    /// - [`Error::ZeroDimension`] if exactly one dimension is 0.
    /// - [`Error::LengthMismatch`] if `data.len()` is not `rows * cols`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sandbox_linalg::*;
    /// let m = Matrix::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3).unwrap();
    /// assert_eq!(m.shape(), (2, 3));
    /// assert_eq!(m[(1, 0)], 4.0);
    ///
    /// let sq = Matrix::from_vec(vec![1.0, 2.0, 3.0, 4.0], 0, 0).unwrap();
    /// assert_eq!(sq.shape(), (2, 2));
    ///
    /// assert!(Matrix::from_vec(vec![1.0, 2.0, 3.0], 0, 0).is_err());
    /// ```
    pub fn from_vec(data: Vec<T>, rows: usize, cols: usize) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::Empty);
        }

        let (rows, cols) = match (rows, cols) {
            (0, 0) => {
                let order = isqrt(data.len());
                if order * order != data.len() {
                    return Err(Error::NotPerfectSquare { len: data.len() });
                }
                (order, order)
            }
            (0, _) | (_, 0) => return Err(Error::ZeroDimension { rows, cols }),
            shape => shape,
        };

        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(Error::LengthMismatch {
                expected: rows.saturating_mul(cols),
                actual: data.len(),
            });
        }

        Ok(Self {
            rows,
            cols,
            data: data.into_boxed_slice(),
        })
    }

    /// Like [`Matrix::from_vec`], but copies the elements out of a slice.
    pub fn from_slice(data: &[T], rows: usize, cols: usize) -> Result<Self> {
        Self::from_vec(data.to_vec(), rows, cols)
    }

    /// Creates a [`Matrix`] from a list of rows.
    ///
    /// # Errors
    ///
    /// Fails if there are no rows, if the rows are empty, or if they differ in length.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sandbox_linalg::*;
    /// let m = Matrix::from_rows(&[
    ///     [1.0, 2.0],
    ///     [3.0, 4.0],
    ///     [5.0, 6.0],
    /// ]).unwrap();
    /// assert_eq!(m.shape(), (3, 2));
    /// assert_eq!(m.data(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// ```
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |row| row.as_ref().len());
        if rows.is_empty() || cols == 0 {
            return Err(Error::ZeroDimension {
                rows: rows.len(),
                cols,
            });
        }

        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(Error::LengthMismatch {
                    expected: cols,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(row);
        }

        Self::from_vec(data, rows.len(), cols)
    }

    /// Creates a [`Matrix`] by invoking a closure with the position (row and column) of each
    /// element.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sandbox_linalg::*;
    /// let mat = Matrix::from_fn(2, 3, |row, col| (row * 10 + col) as f32).unwrap();
    /// assert_eq!(mat, Matrix::from_rows(&[
    ///     [ 0.0,  1.0,  2.0],
    ///     [10.0, 11.0, 12.0],
    /// ]).unwrap());
    /// ```
    pub fn from_fn<F>(rows: usize, cols: usize, cb: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> T,
    {
        check_dims(rows, cols)?;
        Ok(Self::build(rows, cols, cb))
    }

    /// Creates a square identity matrix of order `n`.
    pub fn identity(n: usize) -> Result<Self> {
        Self::identity_rect(n, n)
    }

    /// Creates a `rows`x`cols` matrix with 1 on the main diagonal and 0 everywhere else.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sandbox_linalg::*;
    /// let m = Matrix::<f32>::identity_rect(2, 3).unwrap();
    /// assert_eq!(m.data(), &[
    ///     1.0, 0.0, 0.0,
    ///     0.0, 1.0, 0.0,
    /// ]);
    /// ```
    pub fn identity_rect(rows: usize, cols: usize) -> Result<Self> {
        Self::from_fn(rows, cols, |r, c| if r == c { T::ONE } else { T::ZERO })
    }

    /// Returns a copy of row `i`.
    pub fn row(&self, i: usize) -> Result<Vector<T>> {
        if i >= self.rows {
            return Err(Error::IndexOutOfBounds {
                index: i,
                len: self.rows,
            });
        }
        Vector::from_slice(&self.data[i * self.cols..(i + 1) * self.cols])
    }

    /// Returns a copy of column `j`.
    pub fn col(&self, j: usize) -> Result<Vector<T>> {
        if j >= self.cols {
            return Err(Error::IndexOutOfBounds {
                index: j,
                len: self.cols,
            });
        }
        Vector::from_fn(self.rows, |i| self.data[i * self.cols + j])
    }

    /// Returns the main diagonal, up to `min(rows, cols)` elements.
    pub fn diag(&self) -> Vector<T> {
        let n = self.rows.min(self.cols);
        Vector::from_nonempty((0..n).map(|i| self[(i, i)]).collect())
    }

    /// Returns a copy of the `rows`x`cols` block whose top-left corner is at `(row, col)`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sandbox_linalg::*;
    /// let m = Matrix::from_rows(&[
    ///     [1.0, 2.0, 3.0],
    ///     [4.0, 5.0, 6.0],
    ///     [7.0, 8.0, 9.0],
    /// ]).unwrap();
    /// let block = m.sub_matrix(1, 1, 2, 2).unwrap();
    /// assert_eq!(block.data(), &[5.0, 6.0, 8.0, 9.0]);
    /// assert!(m.sub_matrix(2, 2, 2, 2).is_err());
    /// ```
    pub fn sub_matrix(&self, row: usize, col: usize, rows: usize, cols: usize) -> Result<Self> {
        check_dims(rows, cols)?;
        self.check_block(row, col, rows, cols)?;
        Ok(Self::build(rows, cols, |r, c| self[(row + r, col + c)]))
    }

    /// Overwrites every element at the given linear `indices` with `value`.
    ///
    /// All indices are checked before anything is written.
    pub fn set_indices(&mut self, indices: &[usize], value: T) -> Result<()> {
        self.check_linear(indices)?;
        for &i in indices {
            self.data[i] = value;
        }
        Ok(())
    }

    /// Overwrites the element at each linear index in `indices` with the value at the same
    /// position in `values`.
    ///
    /// # Errors
    ///
    /// Fails if `indices` and `values` differ in length, or if any index is out of bounds. In
    /// either case, `self` is left unchanged.
    pub fn set_values(&mut self, indices: &[usize], values: &[T]) -> Result<()> {
        if indices.len() != values.len() {
            return Err(Error::LengthMismatch {
                expected: indices.len(),
                actual: values.len(),
            });
        }
        self.check_linear(indices)?;
        for (&i, &v) in indices.iter().zip(values) {
            self.data[i] = v;
        }
        Ok(())
    }

    /// Copies `block` into `self`, with its top-left corner at `(row, col)`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sandbox_linalg::*;
    /// let mut m = Matrix::<f32>::zeros(3, 3).unwrap();
    /// m.set_block(1, 1, &mat2()).unwrap();
    /// assert_eq!(m.diag(), vec3(0.0, 1.0, 1.0));
    /// assert!(m.set_block(2, 2, &mat2()).is_err());
    /// ```
    pub fn set_block(&mut self, row: usize, col: usize, block: &Self) -> Result<()> {
        self.check_block(row, col, block.rows, block.cols)?;
        for r in 0..block.rows {
            for c in 0..block.cols {
                self[(row + r, col + c)] = block[(r, c)];
            }
        }
        Ok(())
    }

    /// Computes the matrix product `self · rhs`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] unless `self.cols() == rhs.rows()`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sandbox_linalg::*;
    /// let a = Matrix::from_rows(&[
    ///     [1.0, 2.0],
    ///     [3.0, 4.0],
    /// ]).unwrap();
    /// let b = Matrix::from_rows(&[
    ///     [5.0],
    ///     [6.0],
    /// ]).unwrap();
    /// assert_eq!(a.matmul(&b).unwrap().data(), &[17.0, 39.0]);
    /// assert!(b.matmul(&a).is_err());
    /// ```
    pub fn matmul(&self, rhs: &Self) -> Result<Self> {
        if self.cols != rhs.rows {
            return Err(Error::ShapeMismatch {
                left: self.shape(),
                right: rhs.shape(),
            });
        }
        Ok(Self::build(self.rows, rhs.cols, |i, j| {
            (0..self.cols).fold(T::ZERO, |acc, k| acc + self[(i, k)] * rhs[(k, j)])
        }))
    }

    /// Multiplies this matrix with the column vector `v`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] unless `v.len() == self.cols()`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sandbox_linalg::*;
    /// let mut m = mat3::<f32>();
    /// m.translate(&vec2(5.0, 6.0)).unwrap();
    /// assert_eq!(m.transform(&vec3(1.0, 1.0, 1.0)), Ok(vec3(6.0, 7.0, 1.0)));
    /// ```
    pub fn transform(&self, v: &Vector<T>) -> Result<Vector<T>> {
        if v.len() != self.cols {
            return Err(Error::LengthMismatch {
                expected: self.cols,
                actual: v.len(),
            });
        }
        Vector::from_fn(self.rows, |i| {
            (0..self.cols).fold(T::ZERO, |acc, k| acc + self[(i, k)] * v[k])
        })
    }

    /// Returns the sum of the diagonal elements, up to `min(rows, cols)`.
    pub fn trace(&self) -> T {
        (0..self.rows.min(self.cols)).fold(T::ZERO, |acc, i| acc + self[(i, i)])
    }

    /// Returns the transpose of this matrix as a new `cols`x`rows` matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sandbox_linalg::*;
    /// let mat = Matrix::from_rows(&[
    ///     [0.0, 1.0, 2.0],
    ///     [3.0, 4.0, 5.0],
    /// ]).unwrap();
    /// assert_eq!(mat.t(), Matrix::from_rows(&[
    ///     [0.0, 3.0],
    ///     [1.0, 4.0],
    ///     [2.0, 5.0],
    /// ]).unwrap());
    /// ```
    pub fn t(&self) -> Self {
        Self::build(self.cols, self.rows, |r, c| self[(c, r)])
    }

    /// Returns the elements in column-major order, for consumers that expect that layout.
    pub fn to_column_major(&self) -> Vec<T> {
        self.t().data.into_vec()
    }

    /// Returns the [determinant] of this square matrix.
    ///
    /// Computed by cofactor (Laplace) expansion along the first row, which takes `O(n!)` time.
    /// That is fine for the 2x2 to 4x4 matrices used for transforms.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSquare`] if `self` is not square.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sandbox_linalg::*;
    /// let m = Matrix::from_rows(&[
    ///     [-2.0, -1.0,  2.0],
    ///     [ 2.0,  1.0,  4.0],
    ///     [-3.0,  3.0, -1.0],
    /// ]).unwrap();
    /// assert_eq!(m.det(), Ok(54.0));
    /// ```
    ///
    /// [determinant]: https://en.wikipedia.org/wiki/Determinant
    pub fn det(&self) -> Result<T> {
        self.check_square()?;
        Ok(self.cofactor_expansion())
    }

    fn cofactor_expansion(&self) -> T {
        if self.rows == 1 {
            return self.data[0];
        }

        (0..self.cols).fold(T::ZERO, |acc, i| {
            let term = self[(0, i)] * self.minor_unchecked(0, i).cofactor_expansion();
            if i % 2 == 0 {
                acc + term
            } else {
                acc - term
            }
        })
    }

    /// Returns the square sub-matrix obtained by removing `row` and `col`.
    ///
    /// # Errors
    ///
    /// Fails if `self` is not square, has order 1, or if `row` or `col` is out of bounds.
    pub fn minor(&self, row: usize, col: usize) -> Result<Self> {
        self.check_square()?;
        if self.rows < 2 {
            return Err(Error::UnsupportedOrder {
                expected: "at least 2",
                actual: self.rows,
            });
        }
        self.check_index(row, col)?;
        Ok(self.minor_unchecked(row, col))
    }

    fn minor_unchecked(&self, row: usize, col: usize) -> Self {
        let n = self.rows - 1;
        Self::build(n, n, |r, c| {
            let r = if r < row { r } else { r + 1 };
            let c = if c < col { c } else { c + 1 };
            self[(r, c)]
        })
    }

    /// Returns the adjugate (the transpose of the cofactor matrix) of this square matrix.
    ///
    /// The adjugate of a 1x1 matrix is `[1]`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sandbox_linalg::*;
    /// let m = Matrix::from_rows(&[
    ///     [1.0, 2.0],
    ///     [3.0, 4.0],
    /// ]).unwrap();
    /// assert_eq!(m.adjugate().unwrap().data(), &[4.0, -2.0, -3.0, 1.0]);
    /// ```
    pub fn adjugate(&self) -> Result<Self> {
        self.check_square()?;
        let n = self.rows;
        if n == 1 {
            return Ok(Self::build(1, 1, |_, _| T::ONE));
        }

        // Cofactor of (j, i), written to (i, j).
        Ok(Self::build(n, n, |i, j| {
            let cofactor = self.minor_unchecked(j, i).cofactor_expansion();
            if (i + j) % 2 == 0 {
                cofactor
            } else {
                -cofactor
            }
        }))
    }

    /// Computes the inverse of this square matrix (its adjugate divided by its determinant).
    ///
    /// # Errors
    ///
    /// - [`Error::NotSquare`] if `self` is not square.
    /// - [`Error::Singular`] if the magnitude of the determinant is not above
    ///   [`config::epsilon`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use sandbox_linalg::*;
    /// let m = Matrix::from_rows(&[
    ///     [2.0, 0.0],
    ///     [0.0, 4.0],
    /// ]).unwrap();
    /// assert_eq!(m.inv().unwrap().data(), &[0.5, 0.0, 0.0, 0.25]);
    ///
    /// let singular = Matrix::from_rows(&[
    ///     [1.0, 2.0],
    ///     [2.0, 4.0],
    /// ]).unwrap();
    /// assert!(singular.inv().is_err());
    /// ```
    pub fn inv(&self) -> Result<Self> {
        let det = self.det()?;
        if det.abs() <= config::epsilon_as() {
            return Err(Error::Singular { det: det.to_f64() });
        }
        log::trace!("inverting {}x{} matrix (det = {})", self.rows, self.cols, det);

        let mut adj = self.adjugate()?;
        for elem in adj.data.iter_mut() {
            *elem /= det;
        }
        Ok(adj)
    }

    /// Adds the components of `v` to the last column of this homogeneous transform.
    ///
    /// `self` must be a square matrix of order `v.len() + 1`. Element `(i, n)` is incremented by
    /// `v[i]` for every `i < n`, where `n` is `v.len()`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedOrder`] if the order of `self` doesn't match `v`. `self` is left
    /// unchanged in that case.
    pub fn translate(&mut self, v: &Vector<T>) -> Result<()> {
        self.check_square()?;
        let n = v.len();
        if self.rows != n + 1 {
            return Err(Error::UnsupportedOrder {
                expected: "one more than the translation length",
                actual: self.rows,
            });
        }
        for (i, &offset) in v.iter().enumerate() {
            self[(i, n)] += offset;
        }
        Ok(())
    }

    /// Multiplies the diagonal of this homogeneous transform by `s`, leaving the last (homogeneous)
    /// diagonal element untouched.
    pub fn scale(&mut self, s: T) -> Result<()> {
        self.check_square()?;
        for i in 0..self.rows - 1 {
            self[(i, i)] *= s;
        }
        Ok(())
    }

    /// Multiplies the diagonal of this homogeneous transform by the per-axis factors in `v`.
    ///
    /// `self` must be a square matrix of order `v.len() + 1`; its last diagonal element is left
    /// untouched.
    pub fn scale_by(&mut self, v: &Vector<T>) -> Result<()> {
        self.check_square()?;
        if self.rows != v.len() + 1 {
            return Err(Error::UnsupportedOrder {
                expected: "one more than the scale vector length",
                actual: self.rows,
            });
        }
        for (i, &s) in v.iter().enumerate() {
            self[(i, i)] *= s;
        }
        Ok(())
    }

    fn check_block(&self, row: usize, col: usize, rows: usize, cols: usize) -> Result<()> {
        let fits = |start: usize, len: usize, max: usize| {
            start.checked_add(len).map_or(false, |end| end <= max)
        };
        if !fits(row, rows, self.rows) || !fits(col, cols, self.cols) {
            return Err(Error::BlockOutOfBounds {
                origin: (row, col),
                size: (rows, cols),
                shape: self.shape(),
            });
        }
        Ok(())
    }

    fn check_linear(&self, indices: &[usize]) -> Result<()> {
        match indices.iter().find(|&&i| i >= self.len()) {
            Some(&index) => Err(Error::IndexOutOfBounds {
                index,
                len: self.len(),
            }),
            None => Ok(()),
        }
    }
}

/// Checks that a `rows`x`cols` shape is non-empty and that its element count fits in a `usize`.
fn check_dims(rows: usize, cols: usize) -> Result<usize> {
    if rows == 0 || cols == 0 {
        return Err(Error::ZeroDimension { rows, cols });
    }
    rows.checked_mul(cols).ok_or(Error::DimensionOverflow { rows, cols })
}

/// Integer square root, rounded down.
fn isqrt(n: usize) -> usize {
    let mut root = (n as f64).sqrt() as usize;
    while root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root
}

/// Returns the 2x2 identity matrix.
pub fn mat2<T: Float>() -> Matrix<T> {
    Matrix::build(2, 2, |r, c| if r == c { T::ONE } else { T::ZERO })
}

/// Returns the 3x3 identity matrix.
pub fn mat3<T: Float>() -> Matrix<T> {
    Matrix::build(3, 3, |r, c| if r == c { T::ONE } else { T::ZERO })
}

/// Returns the 4x4 identity matrix.
pub fn mat4<T: Float>() -> Matrix<T> {
    Matrix::build(4, 4, |r, c| if r == c { T::ONE } else { T::ZERO })
}

impl<T: fmt::Debug> fmt::Debug for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct FormatRow<'a, T>(&'a [T]);
        impl<'a, T: fmt::Debug> fmt::Debug for FormatRow<'a, T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "[")?;
                for (i, elem) in self.0.iter().enumerate() {
                    if i != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}", elem)?;
                }
                write!(f, "]")
            }
        }

        let mut list = f.debug_list();
        for row in self.data.chunks(self.cols) {
            list.entry(&FormatRow(row));
        }
        list.finish()
    }
}

impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.data.chunks(self.cols).enumerate() {
            if r != 0 {
                writeln!(f)?;
            }
            write!(f, "[")?;
            for (c, elem) in row.iter().enumerate() {
                if c != 0 {
                    write!(f, ", ")?;
                }
                elem.fmt(f)?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::{vec2, vec3};

    use super::*;

    fn m(rows: &[&[f64]]) -> Matrix<f64> {
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn construction() {
        assert_eq!(
            Matrix::<f32>::zeros(0, 2),
            Err(Error::ZeroDimension { rows: 0, cols: 2 })
        );
        assert_eq!(Matrix::<f32>::zeros(2, 3).unwrap().data(), &[0.0; 6]);

        let sq = Matrix::from_vec((0..9).map(|i| i as f64).collect(), 0, 0).unwrap();
        assert_eq!(sq.shape(), (3, 3));
        assert_eq!(sq[(2, 1)], 7.0);

        assert_eq!(
            Matrix::from_vec(vec![0.0f64; 8], 0, 0),
            Err(Error::NotPerfectSquare { len: 8 })
        );
        assert_eq!(
            Matrix::from_vec(vec![0.0f64; 6], 2, 0),
            Err(Error::ZeroDimension { rows: 2, cols: 0 })
        );
        assert_eq!(
            Matrix::from_vec(vec![0.0f64; 6], 2, 2),
            Err(Error::LengthMismatch {
                expected: 4,
                actual: 6
            })
        );
        assert_eq!(Matrix::<f64>::from_vec(Vec::new(), 0, 0), Err(Error::Empty));
        assert_eq!(
            Matrix::<f64>::from_rows(&[&[1.0, 2.0][..], &[3.0][..]]),
            Err(Error::LengthMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn isqrt_exact() {
        assert_eq!(isqrt(0), 0);
        assert_eq!(isqrt(1), 1);
        assert_eq!(isqrt(15), 3);
        assert_eq!(isqrt(16), 4);
        assert_eq!(isqrt(10_000), 100);
    }

    #[rustfmt::skip]
    #[test]
    fn identity() {
        assert_eq!(Matrix::<f64>::identity(3).unwrap(), mat3());
        assert_eq!(mat2::<f64>().data(), &[1.0, 0.0, 0.0, 1.0]);
        assert_eq!(mat4::<f32>().trace(), 4.0);

        let tall = Matrix::<f64>::identity_rect(3, 2).unwrap();
        assert_eq!(tall, m(&[
            &[1.0, 0.0],
            &[0.0, 1.0],
            &[0.0, 0.0],
        ]));
        assert!(Matrix::<f64>::identity(0).is_err());
    }

    #[test]
    fn rows_and_columns() {
        let a = m(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
        assert_eq!(a.row(1), Ok(vec3(4.0, 5.0, 6.0)));
        assert_eq!(a.col(2), Ok(vec2(3.0, 6.0)));
        assert_eq!(a.diag(), vec2(1.0, 5.0));
        assert_eq!(a.row(2), Err(Error::IndexOutOfBounds { index: 2, len: 2 }));
        assert_eq!(a.col(3), Err(Error::IndexOutOfBounds { index: 3, len: 3 }));

        assert_eq!(a.at(1, 2), Ok(6.0));
        assert_eq!(a.at_index(4), Ok(5.0));
        assert_eq!(a.at(2, 0), Err(Error::IndexOutOfBounds { index: 6, len: 6 }));
        assert!(a.at_index(6).is_err());
    }

    #[test]
    #[should_panic]
    fn index_out_of_bounds() {
        let a = mat2::<f32>();
        // Linear index 2 exists, but (0, 2) is outside of the matrix.
        let _ = a[(0, 2)];
    }

    #[test]
    fn setters() {
        let mut a = Matrix::<f64>::zeros(2, 2).unwrap();
        a.set_indices(&[0, 3], 7.0).unwrap();
        assert_eq!(a.data(), &[7.0, 0.0, 0.0, 7.0]);

        a.set_values(&[1, 2], &[1.0, 2.0]).unwrap();
        assert_eq!(a.data(), &[7.0, 1.0, 2.0, 7.0]);

        let before = a.clone();
        assert_eq!(
            a.set_indices(&[1, 4], 0.0),
            Err(Error::IndexOutOfBounds { index: 4, len: 4 })
        );
        assert_eq!(
            a.set_values(&[0], &[1.0, 2.0]),
            Err(Error::LengthMismatch {
                expected: 1,
                actual: 2
            })
        );
        assert_eq!(a, before, "failed writes must not modify the matrix");

        let mut big = Matrix::<f64>::zeros(3, 4).unwrap();
        big.set_block(1, 2, &before).unwrap();
        assert_eq!(big.sub_matrix(1, 2, 2, 2), Ok(before.clone()));
        assert_eq!(big[(0, 0)], 0.0);
        assert_eq!(
            big.set_block(2, 2, &before),
            Err(Error::BlockOutOfBounds {
                origin: (2, 2),
                size: (2, 2),
                shape: (3, 4),
            })
        );
    }

    #[test]
    fn matmul() {
        #[rustfmt::skip]
        let a = m(&[
            &[1.0, 2.0],
            &[3.0, 4.0],
            &[5.0, 6.0],
            &[7.0, 8.0],
        ]);
        #[rustfmt::skip]
        let b = m(&[
            &[9.0, 10.0, 11.0],
            &[12.0, 13.0, 14.0],
        ]);
        let c = a.matmul(&b).unwrap();
        assert_eq!(c.shape(), (4, 3));
        assert_eq!(c[(0, 1)], a[(0, 0)] * b[(0, 1)] + a[(0, 1)] * b[(1, 1)]);
        assert_eq!(c[(2, 2)], a[(2, 0)] * b[(0, 2)] + a[(2, 1)] * b[(1, 2)]);

        assert_eq!(
            b.matmul(&b),
            Err(Error::ShapeMismatch {
                left: (2, 3),
                right: (2, 3)
            })
        );
    }

    #[test]
    fn transform() {
        let a = m(&[&[0.0, 1.0], &[2.0, 3.0]]);
        assert_eq!(
            a.transform(&vec2(4.0, 5.0)),
            Ok(vec2(4.0 * 0.0 + 5.0 * 1.0, 4.0 * 2.0 + 5.0 * 3.0))
        );
        assert!(a.transform(&vec3(1.0, 2.0, 3.0)).is_err());
    }

    #[test]
    fn trace_and_transpose() {
        let a = m(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
        assert_eq!(a.trace(), 6.0);
        assert_eq!(a.t().shape(), (3, 2));
        assert_eq!(a.t().t(), a);
        assert_eq!(a.to_column_major(), vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[rustfmt::skip]
    #[test]
    fn determinant() {
        assert_eq!(m(&[&[5.0]]).det(), Ok(5.0));
        assert_eq!(Matrix::<f64>::zeros(3, 3).unwrap().det(), Ok(0.0));
        assert_eq!(mat4::<f64>().det(), Ok(1.0));

        let a = m(&[
            &[-2.0, -1.0,  2.0],
            &[ 2.0,  1.0,  4.0],
            &[-3.0,  3.0, -1.0],
        ]);
        assert_eq!(a.det(), Ok(54.0));
        assert_eq!(a.t().det(), Ok(54.0));

        let b = m(&[
            &[1.0, 0.0, 2.0, -1.0],
            &[3.0, 0.0, 0.0,  5.0],
            &[2.0, 1.0, 4.0, -3.0],
            &[1.0, 0.0, 5.0,  0.0],
        ]);
        assert_eq!(b.det(), Ok(30.0));

        assert_eq!(
            Matrix::<f64>::zeros(2, 3).unwrap().det(),
            Err(Error::NotSquare { rows: 2, cols: 3 })
        );
    }

    #[rustfmt::skip]
    #[test]
    fn minor_and_adjugate() {
        let a = m(&[
            &[-2.0, -1.0,  2.0],
            &[ 2.0,  1.0,  4.0],
            &[-3.0,  3.0, -1.0],
        ]);
        assert_eq!(a.minor(0, 1), Ok(m(&[
            &[ 2.0,  4.0],
            &[-3.0, -1.0],
        ])));
        assert!(a.minor(3, 0).is_err());
        assert!(m(&[&[1.0]]).minor(0, 0).is_err());

        assert_eq!(a.adjugate(), Ok(m(&[
            &[-13.0,  5.0, -6.0],
            &[-10.0,  8.0, 12.0],
            &[  9.0,  9.0,  0.0],
        ])));
        assert_eq!(m(&[&[3.0]]).adjugate(), Ok(m(&[&[1.0]])));
    }

    #[test]
    fn inverse() {
        let a = m(&[&[4.0, 7.0], &[2.0, 6.0]]);
        let inv = a.inv().unwrap();
        assert_relative_eq!(inv, m(&[&[0.6, -0.7], &[-0.2, 0.4]]), epsilon = 1e-12);
        assert_relative_eq!(a.matmul(&inv).unwrap(), mat2(), epsilon = 1e-12);

        assert_eq!(m(&[&[4.0]]).inv(), Ok(m(&[&[0.25]])));

        let singular = m(&[&[1.0, 2.0], &[2.0, 4.0]]);
        assert_eq!(singular.inv(), Err(Error::Singular { det: 0.0 }));
        // A negative determinant is fine.
        assert!(m(&[&[0.0, 1.0], &[1.0, 0.0]]).inv().is_ok());
    }

    #[rustfmt::skip]
    #[test]
    fn translate_and_scale() {
        let mut a = mat4::<f64>();
        a.translate(&vec3(1.0, 2.0, 3.0)).unwrap();
        a.scale(2.0).unwrap();
        assert_eq!(a, m(&[
            &[2.0, 0.0, 0.0, 1.0],
            &[0.0, 2.0, 0.0, 2.0],
            &[0.0, 0.0, 2.0, 3.0],
            &[0.0, 0.0, 0.0, 1.0],
        ]));

        a.scale_by(&vec3(0.5, 1.0, 2.0)).unwrap();
        assert_eq!(a.diag(), Vector::from([1.0, 2.0, 4.0, 1.0]));

        let before = a.clone();
        assert!(a.translate(&vec2(1.0, 1.0)).is_err());
        assert!(a.scale_by(&vec2(1.0, 1.0)).is_err());
        assert_eq!(a, before);
        assert!(Matrix::<f64>::zeros(2, 3).unwrap().scale(2.0).is_err());
    }

    #[test]
    fn huge_arguments_are_rejected() {
        let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let max = usize::MAX;

        assert_eq!(
            a.at(max, 0),
            Err(Error::IndexOutOfBounds { index: max, len: 4 })
        );
        assert!(a.at(0, max).is_err());
        assert!(a.minor(max, 0).is_err());
        assert!(a.minor(0, max).is_err());

        assert!(matches!(
            a.sub_matrix(max, 0, 1, 1),
            Err(Error::BlockOutOfBounds { .. })
        ));
        assert!(a.sub_matrix(1, 1, 1, max).is_err());
        let mut b = a.clone();
        assert!(b.set_block(0, max, &mat2()).is_err());
        assert_eq!(b, a);

        assert_eq!(
            Matrix::from_vec(vec![1.0; 4], max, 2),
            Err(Error::LengthMismatch {
                expected: max,
                actual: 4
            })
        );
        assert_eq!(
            Matrix::<f32>::zeros(max, 2),
            Err(Error::DimensionOverflow { rows: max, cols: 2 })
        );
        assert!(Matrix::from_fn(2, max, |_, _| 0.0f64).is_err());
    }

    #[test]
    fn fmt() {
        let a = m(&[&[0.0, 1.0], &[2.0, 3.5]]);
        assert_eq!(format!("{:?}", a), "[[0.0, 1.0], [2.0, 3.5]]");
        assert_eq!(format!("{}", a), "[0, 1]\n[2, 3.5]");
    }
}
