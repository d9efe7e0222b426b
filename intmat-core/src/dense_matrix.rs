use std::fmt;

use cfg_if::cfg_if;
use serde::{Deserialize, Serialize};

use crate::error::{MatrixError, Result};
use crate::random::{RandomSource, ThreadRng, RANDOM_MAX, RANDOM_MIN};
use crate::traits::Matrix;

cfg_if! {
    if #[cfg(windows)] {
        /// Separator written between rows by the `Display` impl.
        pub const LINE_SEPARATOR: &str = "\r\n";
    } else {
        /// Separator written between rows by the `Display` impl.
        pub const LINE_SEPARATOR: &str = "\n";
    }
}

/// A dense matrix of `i32` stored in row-major order.
///
/// Both dimensions are at least 1 and never change after construction.
/// Arithmetic wraps on overflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<i32>>", into = "Vec<Vec<i32>>")]
pub struct IntMatrix {
    rows: usize,
    cols: usize,
    data: Vec<i32>, // Data stored row-major: data[row * cols + col]
}

// Vec<i32> can hold at most isize::MAX bytes.
fn cell_count(rows: usize, cols: usize) -> Result<usize> {
    rows.checked_mul(cols)
        .filter(|len| {
            len.checked_mul(std::mem::size_of::<i32>())
                .is_some_and(|bytes| bytes <= isize::MAX as usize)
        })
        .ok_or_else(|| {
            MatrixError::InvalidDimension(format!("{}x{} overflows the address space", rows, cols))
        })
}

impl IntMatrix {
    /// Creates a `rows x cols` matrix filled with zeros.
    ///
    /// Fails with `InvalidDimension` if either dimension is not positive.
    pub fn new(rows: isize, cols: isize) -> Result<Self> {
        if rows <= 0 || cols <= 0 {
            return Err(MatrixError::InvalidDimension(format!(
                "rows and cols must be positive, got {}x{}",
                rows, cols
            )));
        }
        let (rows, cols) = (rows as usize, cols as usize);
        Ok(Self {
            rows,
            cols,
            data: vec![0; cell_count(rows, cols)?],
        })
    }

    /// Creates a matrix by copying a rectangular grid of rows.
    ///
    /// Fails with `InvalidInput` if the grid has no rows, its first row is
    /// empty, or any row differs in length from the first.
    pub fn from_grid<R: AsRef<[i32]>>(grid: &[R]) -> Result<Self> {
        let first = grid
            .first()
            .ok_or_else(|| MatrixError::InvalidInput("grid has no rows".to_string()))?;
        let cols = first.as_ref().len();
        if cols == 0 {
            return Err(MatrixError::InvalidInput("grid has no columns".to_string()));
        }

        let mut data = Vec::with_capacity(grid.len() * cols); // rows are copied, never borrowed
        for (i, row) in grid.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(MatrixError::InvalidInput(format!(
                    "row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    cols
                )));
            }
            data.extend_from_slice(row);
        }

        Ok(Self {
            rows: grid.len(),
            cols,
            data,
        })
    }

    pub fn from_vec(rows: usize, cols: usize, data: Vec<i32>) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(MatrixError::InvalidDimension(format!(
                "rows and cols must be positive, got {}x{}",
                rows, cols
            )));
        }
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(MatrixError::InvalidInput(format!(
                "Data length ({}) does not match dimensions ({}x{})",
                data.len(),
                rows,
                cols
            )));
        }
        Ok(Self { rows, cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns a slice view of the row-major cells.
    pub fn data(&self) -> &[i32] {
        &self.data
    }

    /// Gets the element at the specified row and column.
    /// Returns None if indices are out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<i32> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col).copied()
        } else {
            None
        }
    }

    /// Returns row `i` as a slice, or None if out of bounds.
    pub fn row(&self, i: usize) -> Option<&[i32]> {
        (i < self.rows).then(|| &self.data[i * self.cols..(i + 1) * self.cols])
    }

    /// Copies the cells out as one `Vec` per row.
    pub fn to_grid(&self) -> Vec<Vec<i32>> {
        self.data.chunks_exact(self.cols).map(<[i32]>::to_vec).collect()
    }

    /// Overwrites every cell with a value in `RANDOM_MIN..=RANDOM_MAX` drawn
    /// from the calling thread's generator.
    pub fn populate_random(&mut self) {
        self.populate_random_with(&mut ThreadRng);
    }

    /// Overwrites every cell with a value in `RANDOM_MIN..=RANDOM_MAX` drawn
    /// from `rng`.
    pub fn populate_random_with<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        log::trace!("populating {}x{} matrix", self.rows, self.cols);
        for cell in self.data.iter_mut() {
            *cell = rng.next_in_range(RANDOM_MIN, RANDOM_MAX);
        }
    }

    /// Returns the cellwise sum `self + other`.
    pub fn add(&self, other: &IntMatrix) -> Result<IntMatrix> {
        if !self.same_shape(other) {
            return Err(MatrixError::DimensionMismatch(format!(
                "cannot add {}x{} and {}x{}",
                self.rows, self.cols, other.rows, other.cols
            )));
        }
        log::trace!("adding two {}x{} matrices", self.rows, self.cols);

        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| a.wrapping_add(*b))
            .collect();
        Ok(IntMatrix {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }

    /// Like `add`, but fails with `NullArgument` when `other` is `None`.
    pub fn add_checked(&self, other: Option<&IntMatrix>) -> Result<IntMatrix> {
        let other = other.ok_or_else(|| MatrixError::NullArgument("add".to_string()))?;
        self.add(other)
    }

    /// Returns the matrix product `self * other`.
    ///
    /// Loops run in i-k-j order so the innermost pass streams through one row
    /// of `other` and one row of the result. A zero multiplier `self[i][k]`
    /// skips its inner pass entirely.
    pub fn multiply(&self, other: &IntMatrix) -> Result<IntMatrix> {
        if self.cols != other.rows {
            return Err(MatrixError::DimensionMismatch(format!(
                "cannot multiply {}x{} by {}x{}: left cols ({}) != right rows ({})",
                self.rows, self.cols, other.rows, other.cols, self.cols, other.rows
            )));
        }

        let out_cols = other.cols;
        let mut result = IntMatrix {
            rows: self.rows,
            cols: out_cols,
            data: vec![0; cell_count(self.rows, out_cols)?],
        };
        let mut skipped = 0usize; // only reported in the trace log

        for (lhs_row, out_row) in self
            .data
            .chunks_exact(self.cols)
            .zip(result.data.chunks_exact_mut(out_cols))
        {
            for (k, &a) in lhs_row.iter().enumerate() {
                if a == 0 {
                    skipped += 1;
                    continue;
                }
                let rhs_row = &other.data[k * out_cols..(k + 1) * out_cols];
                for (out, &b) in out_row.iter_mut().zip(rhs_row) {
                    *out = out.wrapping_add(a.wrapping_mul(b));
                }
            }
        }

        log::trace!(
            "multiplied {}x{} by {}x{}, skipped {} zero multipliers",
            self.rows,
            self.cols,
            other.rows,
            other.cols,
            skipped
        );
        Ok(result)
    }

    /// Like `multiply`, but fails with `NullArgument` when `other` is `None`.
    pub fn multiply_checked(&self, other: Option<&IntMatrix>) -> Result<IntMatrix> {
        let other = other.ok_or_else(|| MatrixError::NullArgument("multiply".to_string()))?;
        self.multiply(other)
    }
}

impl Matrix for IntMatrix {
    type Value = i32;

    fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    fn values(&self) -> &[i32] {
        &self.data
    }
}

impl fmt::Display for IntMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.data.chunks_exact(self.cols).enumerate() {
            if i > 0 {
                f.write_str(LINE_SEPARATOR)?;
            }
            write!(f, "{:?}", row)?;
        }
        Ok(())
    }
}

impl TryFrom<Vec<Vec<i32>>> for IntMatrix {
    type Error = MatrixError;

    fn try_from(grid: Vec<Vec<i32>>) -> Result<Self> {
        Self::from_grid(&grid)
    }
}

impl From<IntMatrix> for Vec<Vec<i32>> {
    fn from(matrix: IntMatrix) -> Self {
        matrix.to_grid()
    }
}

#[cfg(test)]
mod tests {
    use crate::{IntMatrix, MatrixError};

    #[test]
    fn test_new_is_zero_filled() {
        let m = IntMatrix::new(3, 4).unwrap();
        assert_eq!(m.rows(), 3);
        assert_eq!(m.cols(), 4);
        assert!(m.data().iter().all(|&v| v == 0));
        assert_eq!(m.data().len(), 12);
    }

    #[test]
    fn test_new_rejects_non_positive_dims() {
        for (r, c) in [(0, 3), (3, 0), (0, 0), (-1, 2), (2, -5)] {
            match IntMatrix::new(r, c) {
                Err(MatrixError::InvalidDimension(msg)) => assert!(msg.contains("positive")),
                other => panic!("Expected InvalidDimension for {}x{}, got {:?}", r, c, other),
            }
        }
    }

    #[test]
    fn test_new_rejects_unallocatable_dims() {
        for (r, c) in [(isize::MAX, 1), (isize::MAX / 2, 2), (isize::MAX, isize::MAX)] {
            match IntMatrix::new(r, c) {
                Err(MatrixError::InvalidDimension(msg)) => assert!(msg.contains("overflows")),
                other => panic!("Expected InvalidDimension for {}x{}, got {:?}", r, c, other),
            }
        }
        // largest length whose byte size still fits in isize
        assert!(super::cell_count(isize::MAX as usize / 4, 1).is_ok());
        assert!(super::cell_count(isize::MAX as usize / 4 + 1, 1).is_err());
    }

    #[test]
    fn test_as_bytes_and_shape_from_trait() {
        use crate::Matrix;

        let m = IntMatrix::from_grid(&[[1, 2], [3, 4]]).unwrap();
        assert!(m.is_square());
        assert_eq!(Matrix::values(&m), &[1, 2, 3, 4]);
        let bytes = m.as_bytes();
        assert_eq!(bytes.len(), 4 * std::mem::size_of::<i32>());
        assert_eq!(&bytes[..4], &1i32.to_ne_bytes());
        assert_eq!(&bytes[12..], &4i32.to_ne_bytes());
    }

    #[test]
    fn test_from_grid_errors() {
        let empty: Vec<Vec<i32>> = vec![];
        match IntMatrix::from_grid(&empty) {
            Err(MatrixError::InvalidInput(msg)) => assert!(msg.contains("no rows")),
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }

        let no_cols: Vec<Vec<i32>> = vec![vec![], vec![]];
        match IntMatrix::from_grid(&no_cols) {
            Err(MatrixError::InvalidInput(msg)) => assert!(msg.contains("no columns")),
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }

        let jagged = vec![vec![1, 2], vec![3, 4, 5]];
        match IntMatrix::from_grid(&jagged) {
            Err(MatrixError::InvalidInput(msg)) => assert!(msg.contains("row 1")),
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_vec() {
        let m = IntMatrix::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(m.get(1, 0), Some(3));
        assert!(matches!(
            IntMatrix::from_vec(2, 2, vec![1, 2, 3]),
            Err(MatrixError::InvalidInput(_))
        ));
        assert!(matches!(
            IntMatrix::from_vec(0, 2, vec![]),
            Err(MatrixError::InvalidDimension(_))
        ));
    }

    #[test]
    fn test_get_and_row() {
        let m = IntMatrix::from_grid(&[[1, 2, 3], [4, 5, 6]]).unwrap();
        assert_eq!(m.get(0, 0), Some(1));
        assert_eq!(m.get(1, 2), Some(6));
        assert_eq!(m.get(2, 0), None);
        assert_eq!(m.get(0, 3), None);
        assert_eq!(m.row(1), Some(&[4, 5, 6][..]));
        assert_eq!(m.row(2), None);
        assert_eq!(m.to_grid(), vec![vec![1, 2, 3], vec![4, 5, 6]]);
    }

    #[test]
    fn test_multiply_skips_zero_multipliers_without_changing_result() {
        let a = IntMatrix::from_grid(&[[0, 2], [0, 0]]).unwrap();
        let b = IntMatrix::from_grid(&[[5, 6], [7, 8]]).unwrap();
        let product = a.multiply(&b).unwrap();
        assert_eq!(product.to_grid(), vec![vec![14, 16], vec![0, 0]]);
    }

    #[test]
    fn test_arithmetic_wraps() {
        let a = IntMatrix::from_grid(&[[i32::MAX]]).unwrap();
        let one = IntMatrix::from_grid(&[[1]]).unwrap();
        assert_eq!(a.add(&one).unwrap().get(0, 0), Some(i32::MIN));

        let two = IntMatrix::from_grid(&[[2]]).unwrap();
        assert_eq!(a.multiply(&two).unwrap().get(0, 0), Some(-2));
    }

    #[test]
    fn test_checked_forms_reject_missing_operand() {
        let a = IntMatrix::new(2, 2).unwrap();
        match a.add_checked(None) {
            Err(MatrixError::NullArgument(msg)) => assert_eq!(msg, "add"),
            other => panic!("Expected NullArgument error, got {:?}", other),
        }
        match a.multiply_checked(None) {
            Err(MatrixError::NullArgument(msg)) => assert_eq!(msg, "multiply"),
            other => panic!("Expected NullArgument error, got {:?}", other),
        }
        assert_eq!(a.add_checked(Some(&a)).unwrap(), a);
    }

    #[test]
    fn test_display_single_row_has_no_separator() {
        let m = IntMatrix::from_grid(&[[7, -8]]).unwrap();
        assert_eq!(m.to_string(), "[7, -8]");
    }
}
