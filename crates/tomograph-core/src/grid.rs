//! Dense 2-D grid of `f64` samples.
//!
//! A single type backs every raster in the pipeline: the input image, the
//! square working canvas, sinograms (one row per emitter angle, one column
//! per detector) and reconstruction snapshots.

/// A row-major grid of floating-point samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// Samples in row-major order. Length is `width * height`.
    pub data: Vec<f64>,
}

impl Grid {
    /// Create a grid from dimensions and row-major data.
    pub fn new(width: usize, height: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), width * height, "Grid buffer size mismatch");
        Self {
            width,
            height,
            data,
        }
    }

    /// Create a grid filled with zeros.
    pub fn zeros(width: usize, height: usize) -> Self {
        Self::filled(width, height, 0.0)
    }

    /// Create a grid with every sample set to `value`.
    pub fn filled(width: usize, height: usize, value: f64) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Build a grid from a list of equally long rows.
    ///
    /// Returns `None` if the rows have different lengths.
    pub fn from_rows(rows: &[Vec<f64>]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != width) {
            return None;
        }
        let data = rows.iter().flatten().copied().collect();
        Some(Self::new(width, height, data))
    }

    /// Sample at column `x`, row `y`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f64) {
        self.data[y * self.width + x] = value;
    }

    /// Borrow row `y`.
    pub fn row(&self, y: usize) -> &[f64] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }

    /// Iterate over rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact panics on a zero chunk size
        self.data.chunks_exact(self.width.max(1))
    }

    /// `(rows, columns)`, the shape used when talking about sinograms.
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the grid has no samples.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.data.is_empty()
    }

    /// Smallest and largest sample, or `None` for an empty grid.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        if self.data.is_empty() {
            return None;
        }
        let (min, max) = self
            .data
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        Some((min, max))
    }

    /// Copy of this grid with only the first `rows` rows kept and the rest zeroed.
    pub fn reveal_rows(&self, rows: usize) -> Grid {
        let mut out = Grid::zeros(self.width, self.height);
        let end = rows.min(self.height) * self.width;
        out.data[..end].copy_from_slice(&self.data[..end]);
        out
    }
}
