use bevy::prelude::*;

use crate::config::SceneConfig;

pub mod light;
pub mod particles;
pub mod planet;

const AXES_LENGTH: f32 = 200.0;

// one normal per face: faceted look instead of smooth interpolation
pub fn flat_shaded(mesh: Mesh) -> Mesh {
    mesh.with_duplicated_vertices().with_computed_flat_normals()
}

pub fn axes_enabled(config: Res<SceneConfig>) -> bool {
    config.show_axes
}

// debug helper, gated by `axes_enabled`
pub fn draw_axes(mut gizmos: Gizmos) {
    gizmos.axes(Transform::IDENTITY, AXES_LENGTH);
}
