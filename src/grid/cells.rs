use crate::foundation::{core::Point, rng::Rng64};

/// A binary digit shown by a backdrop cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Bit {
    /// `0`
    Zero,
    /// `1`
    One,
}

impl Bit {
    /// Uniformly random digit.
    pub fn random(rng: &mut Rng64) -> Self {
        if rng.coin() { Self::One } else { Self::Zero }
    }

    /// The other digit.
    pub fn flipped(self) -> Self {
        match self {
            Self::Zero => Self::One,
            Self::One => Self::Zero,
        }
    }

    /// Character used when drawing the digit.
    pub fn as_char(self) -> char {
        match self {
            Self::Zero => '0',
            Self::One => '1',
        }
    }
}

/// One occupied grid position.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GridCell {
    /// Top-left corner of the cell in CSS pixels.
    pub position: Point,
    /// Digit currently shown.
    pub value: Bit,
}

/// Most candidate positions one grid will consider; larger areas generate no cells.
pub const MAX_GRID_POSITIONS: usize = 1 << 20;

/// Number of whole cells that fit along each axis.
pub fn grid_dimensions(width: f64, height: f64, cell_size: f64) -> (usize, usize) {
    if !(cell_size.is_finite() && cell_size > 0.0) {
        return (0, 0);
    }
    let fit = |extent: f64| {
        if extent.is_finite() && extent > 0.0 {
            (extent / cell_size).floor() as usize
        } else {
            0
        }
    };
    (fit(width), fit(height))
}

fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}

/// Sparse grid over a `width x height` area.
///
/// Each of the `floor(width / cell_size) * floor(height / cell_size)` candidate positions is
/// kept independently with probability `density`, visited row-major. `density` is clamped to
/// `[0, 1]` (NaN counts as `0`); configs are validated before they get here, so clamping only
/// guards direct callers.
///
/// Areas with more than [`MAX_GRID_POSITIONS`] candidates produce an empty grid.
pub fn generate(
    width: f64,
    height: f64,
    cell_size: f64,
    density: f64,
    rng: &mut Rng64,
) -> Vec<GridCell> {
    let (cols, rows) = grid_dimensions(width, height, cell_size);
    let density = clamp_probability(density);
    if density == 0.0 {
        return Vec::new();
    }

    let Some(positions) = cols.checked_mul(rows).filter(|&n| n <= MAX_GRID_POSITIONS) else {
        tracing::warn!(cols, rows, "backdrop area too large, skipping grid");
        return Vec::new();
    };

    let mut cells = Vec::with_capacity((positions as f64 * density).ceil() as usize);
    for row in 0..rows {
        for col in 0..cols {
            if density >= 1.0 || rng.chance(density) {
                cells.push(GridCell {
                    position: Point::new(col as f64 * cell_size, row as f64 * cell_size),
                    value: Bit::random(rng),
                });
            }
        }
    }
    cells
}

/// Re-roll each cell's digit independently with probability `flip_probability`.
///
/// A re-rolled digit may land on its old value. The cell set itself never changes.
pub fn mutate(cells: &mut [GridCell], flip_probability: f64, rng: &mut Rng64) {
    let p = clamp_probability(flip_probability);
    if p == 0.0 {
        return;
    }
    for cell in cells.iter_mut() {
        if rng.chance(p) {
            cell.value = Bit::random(rng);
        }
    }
}

/// A generated grid plus the parameters it was generated with.
#[derive(Clone, Debug, serde::Serialize)]
pub struct CellGrid {
    cell_size: f64,
    density: f64,
    cells: Vec<GridCell>,
}

impl CellGrid {
    /// Generate a grid for `width x height`.
    pub fn generate(
        width: f64,
        height: f64,
        cell_size: f64,
        density: f64,
        rng: &mut Rng64,
    ) -> Self {
        Self {
            cell_size,
            density,
            cells: generate(width, height, cell_size, density, rng),
        }
    }

    /// Throw away the current cells and generate for a new area.
    pub fn regenerate(&mut self, width: f64, height: f64, rng: &mut Rng64) {
        self.cells = generate(width, height, self.cell_size, self.density, rng);
    }

    /// Re-roll digits in place.
    pub fn mutate(&mut self, flip_probability: f64, rng: &mut Rng64) {
        mutate(&mut self.cells, flip_probability, rng);
    }

    /// Occupied cells.
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    /// Edge length of one cell in CSS pixels.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when no position is occupied.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/grid/cells.rs"]
mod tests;
