use bytemuck::{Pod, Zeroable}; // Need Pod and Zeroable for as_bytes
use std::fmt::Debug;

/// Generic trait representing a rectangular matrix shape.
pub trait Matrix: Debug {
    /// The underlying numeric type of the matrix elements.
    type Value: Copy + Debug + Default + Pod + Zeroable;

    /// Returns the dimensions of the matrix as (rows, columns).
    fn dims(&self) -> (usize, usize);

    /// Returns the cells in row-major order.
    fn values(&self) -> &[Self::Value];

    /// Raw native-endian bytes of the cells, row-major.
    fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.values())
    }

    /// Returns the number of rows.
    fn rows(&self) -> usize {
        self.dims().0
    }

    /// Returns the number of columns.
    fn cols(&self) -> usize {
        self.dims().1
    }

    /// Checks if the matrix is square.
    fn is_square(&self) -> bool {
        let (rows, cols) = self.dims();
        rows == cols
    }

    /// Checks whether `other` has the same shape as `self`.
    fn same_shape<M: Matrix + ?Sized>(&self, other: &M) -> bool {
        self.dims() == other.dims()
    }
}
