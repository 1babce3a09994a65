use crate::{
    foundation::core::{Millis, Viewport},
    foundation::rng::Rng64,
    grid::cells::CellGrid,
    sequencer::config::BackdropSpec,
};

/// Live binary-digit field owned by a running sequencer.
///
/// The field never ticks on its own: the sequencer calls [`Backdrop::advance`] from its frame
/// callback and the field re-rolls digits once per `update_every`.
#[derive(Clone, Debug)]
pub struct Backdrop {
    spec: BackdropSpec,
    grid: CellGrid,
    rng: Rng64,
    last_update: Millis,
    viewport: Viewport,
}

impl Backdrop {
    /// Generate a field covering `viewport`.
    pub fn new(spec: BackdropSpec, viewport: Viewport) -> Self {
        let mut rng = Rng64::new(spec.seed);
        let grid = CellGrid::generate(
            viewport.width,
            viewport.height,
            spec.cell_size,
            spec.density,
            &mut rng,
        );
        Self {
            spec,
            grid,
            rng,
            last_update: Millis::ZERO,
            viewport,
        }
    }

    /// Regenerate from scratch for a new surface size.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.grid
            .regenerate(viewport.width, viewport.height, &mut self.rng);
    }

    /// Re-roll digits if a full cadence has passed since the last update. Returns true if it did.
    pub fn advance(&mut self, elapsed: Millis) -> bool {
        if elapsed.since(self.last_update) < self.spec.update_every {
            return false;
        }
        self.grid.mutate(self.spec.flip_probability, &mut self.rng);
        self.last_update = elapsed;
        true
    }

    /// Current cells.
    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    /// Surface the field was last generated for.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}
