use std::fmt;

/// A dense n×n matrix of pairwise distances.
///
/// Row-major flat storage. A freshly allocated matrix is all zeros, which
/// already satisfies the zero-diagonal requirement; a fill operation only
/// ever touches off-diagonal cells.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Allocate an n×n zero matrix.
    ///
    /// # Panics
    /// Panics if `n` is 0; the smallest meaningful matrix is 1×1.
    pub fn zeros(n: usize) -> Self {
        assert!(n >= 1, "DistanceMatrix: n must be at least 1");
        Self {
            n,
            data: vec![0.0; n * n],
        }
    }

    /// Side length of the matrix.
    pub fn n(&self) -> usize {
        self.n
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        debug_assert!(
            row < self.n && col < self.n,
            "cell [{row},{col}] out of bounds for {n}x{n} matrix",
            n = self.n
        );
        self.data[row * self.n + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        debug_assert!(
            row < self.n && col < self.n,
            "cell [{row},{col}] out of bounds for {n}x{n} matrix",
            n = self.n
        );
        self.data[row * self.n + col] = value;
    }

    /// Iterate over the rows as slices, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks(self.n)
    }

    /// Whether `m[i][j] == m[j][i]` holds exactly for every cell and the
    /// diagonal is zero. Exact comparison is intended: both triangles are
    /// supposed to receive the identical rounded value.
    pub fn is_symmetric(&self) -> bool {
        for i in 0..self.n {
            if self.get(i, i) != 0.0 {
                return false;
            }
            for j in (i + 1)..self.n {
                if self.get(i, j) != self.get(j, i) {
                    return false;
                }
            }
        }
        true
    }
}

impl fmt::Display for DistanceMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for (j, value) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{value:>8.2}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeros_is_all_zero() {
        let m = DistanceMatrix::zeros(3);
        assert_eq!(m.n(), 3);
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(m.get(i, j), 0.0);
            }
        }
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut m = DistanceMatrix::zeros(4);
        m.set(1, 3, 2.5);
        assert_eq!(m.get(1, 3), 2.5);
        assert_eq!(m.get(3, 1), 0.0, "set must not touch the mirrored cell");
    }

    #[test]
    fn symmetry_probe() {
        let mut m = DistanceMatrix::zeros(3);
        m.set(0, 1, 1.5);
        m.set(1, 0, 1.5);
        m.set(0, 2, 2.0);
        m.set(2, 0, 2.0);
        m.set(1, 2, 0.5);
        m.set(2, 1, 0.5);
        assert!(m.is_symmetric());

        m.set(1, 2, 0.75);
        assert!(!m.is_symmetric(), "asymmetric pair must be detected");
    }

    #[test]
    fn nonzero_diagonal_is_not_symmetric() {
        let mut m = DistanceMatrix::zeros(2);
        m.set(0, 0, 1.0);
        assert!(!m.is_symmetric());
    }

    #[test]
    fn rows_iterates_in_order() {
        let mut m = DistanceMatrix::zeros(2);
        m.set(0, 1, 1.0);
        m.set(1, 0, 1.0);
        let rows: Vec<&[f64]> = m.rows().collect();
        assert_eq!(rows, vec![&[0.0, 1.0][..], &[1.0, 0.0][..]]);
    }

    #[test]
    fn display_uses_two_decimals() {
        let mut m = DistanceMatrix::zeros(2);
        m.set(0, 1, 1.41);
        m.set(1, 0, 1.41);
        let rendered = m.to_string();
        assert!(rendered.contains("1.41"), "got: {rendered}");
        assert!(rendered.contains("0.00"), "got: {rendered}");
    }

    #[test]
    #[should_panic(expected = "n must be at least 1")]
    fn zero_size_panics() {
        DistanceMatrix::zeros(0);
    }

    // Flat index 5 lands inside the 3x3 backing store, but the cell itself
    // does not exist; the accessor must refuse rather than alias a row below.
    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "out of bounds")]
    fn out_of_range_column_get_panics() {
        DistanceMatrix::zeros(3).get(0, 5);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "out of bounds")]
    fn out_of_range_column_set_panics() {
        DistanceMatrix::zeros(3).set(1, 5, 1.0);
    }
}
