//! Packs the spatial grids into the two published textures.
//!
//! Height map texel: `(choppy·Dx, choppy·Dy, height, 1)`.
//! Normal map texel: `(nx, ny, nz, fold)`, where the normal comes from
//! central differences of the height and `fold = max(1 - J, 0)` from the
//! Jacobian of the horizontal displacement. Neighbour lookups wrap, so the
//! maps tile seamlessly.

use glam::Vec3;
use wavefield_core::texture::{
    CHANNEL_DISPLACEMENT_X, CHANNEL_DISPLACEMENT_Y, CHANNEL_HEIGHT,
};
use wavefield_core::{Grid, OceanError, RealGrid, SpectrumConfig, Texture};

use crate::transform::SpatialField;

/// The pair of textures produced by one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputMaps {
    pub height_map: Texture,
    pub normal_map: Texture,
}

/// Builds displacement and normal textures from spatial grids.
pub struct MapComposer;

impl MapComposer {
    /// Packs height and scaled horizontal displacement into one texture.
    pub fn displacement_map(
        height: &RealGrid,
        displacement_x: &RealGrid,
        displacement_y: &RealGrid,
        choppy_scale: f32,
    ) -> Result<Texture, OceanError> {
        height.ensure_same_dimension(displacement_x)?;
        height.ensure_same_dimension(displacement_y)?;
        let texels = height
            .data()
            .iter()
            .zip(displacement_x.data())
            .zip(displacement_y.data())
            .map(|((&h, &dx), &dy)| [choppy_scale * dx, choppy_scale * dy, h, 1.0])
            .collect();
        Grid::from_data(height.dimension(), texels)
    }

    /// Normals and folding from a displacement map over a patch of side
    /// `patch_length`.
    pub fn normal_map(displacement: &Texture, patch_length: f32) -> Texture {
        let n = displacement.dimension();
        let cell = patch_length / n as f32;
        let inv_span = 1.0 / (2.0 * cell);

        displacement.map_indexed(|row, col| {
            let (row, col) = (row as isize, col as isize);
            let left = displacement.get(row, col - 1);
            let right = displacement.get(row, col + 1);
            let back = displacement.get(row - 1, col);
            let front = displacement.get(row + 1, col);

            let dh_dx = (right[CHANNEL_HEIGHT] - left[CHANNEL_HEIGHT]) * inv_span;
            let dh_dy = (front[CHANNEL_HEIGHT] - back[CHANNEL_HEIGHT]) * inv_span;
            let normal = Vec3::new(-dh_dx, -dh_dy, 1.0)
                .try_normalize()
                .unwrap_or(Vec3::Z);

            let ddx_dx = (right[CHANNEL_DISPLACEMENT_X] - left[CHANNEL_DISPLACEMENT_X]) * inv_span;
            let ddx_dy = (front[CHANNEL_DISPLACEMENT_X] - back[CHANNEL_DISPLACEMENT_X]) * inv_span;
            let ddy_dx = (right[CHANNEL_DISPLACEMENT_Y] - left[CHANNEL_DISPLACEMENT_Y]) * inv_span;
            let ddy_dy = (front[CHANNEL_DISPLACEMENT_Y] - back[CHANNEL_DISPLACEMENT_Y]) * inv_span;
            let jacobian = (1.0 + ddx_dx) * (1.0 + ddy_dy) - ddx_dy * ddy_dx;
            let fold = (1.0 - jacobian).max(0.0);

            [normal.x, normal.y, normal.z, fold]
        })
    }

    /// Both textures for one tick.
    pub fn compose(spatial: &SpatialField, config: &SpectrumConfig) -> Result<OutputMaps, OceanError> {
        let height_map = Self::displacement_map(
            &spatial.height,
            &spatial.displacement_x,
            &spatial.displacement_y,
            config.choppy_scale,
        )?;
        let normal_map = Self::normal_map(&height_map, config.patch_length);
        Ok(OutputMaps {
            height_map,
            normal_map,
        })
    }
}
