use glam::Vec2;

/// Tile grid derived from the surface size. All choreography targets are
/// expressed in tiles so they follow the surface when it is resized.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Layout {
    pub surface_width: f32,
    pub surface_height: f32,
    pub tile_width: f32,
    pub tile_height: f32,
    pub cells: u32,
    /// Geometric center of the grid; rotation and circle pivot.
    pub pivot: Vec2,
}

impl Layout {
    pub fn from_surface(width: u32, height: u32, cells: u32) -> Self {
        let surface_width = width as f32;
        let surface_height = height as f32;
        let n = cells.max(1) as f32;
        let tile_width = surface_width / n;
        let tile_height = surface_height / n;
        let half = n / 2.0;
        let pivot = Vec2::new(
            half * tile_width - tile_width / 2.0,
            half * tile_height - tile_height / 2.0,
        );
        Self {
            surface_width,
            surface_height,
            tile_width,
            tile_height,
            cells,
            pivot,
        }
    }

    /// False until a non-empty surface has been measured.
    pub fn is_ready(&self) -> bool {
        self.tile_width > 0.0 && self.tile_height > 0.0
    }

    /// Point `(tx, ty)` measured in tiles.
    pub fn tiles(&self, tx: f32, ty: f32) -> Vec2 {
        Vec2::new(self.tile_width * tx, self.tile_height * ty)
    }
}
