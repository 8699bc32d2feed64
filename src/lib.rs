use bevy::prelude::*;

pub mod animation;
pub mod config;
pub mod panel;
pub mod scene;

pub mod camera {
    pub mod orbit;
}

use animation::{animate_groups, exit_on_escape};
use camera::orbit::OrbitCameraPlugin;
use config::SceneConfig;
use panel::{ControlPanel, ControlPanelPlugin};
use scene::particles::SceneRng;

#[derive(Component)]
pub struct PlanetGroup;

#[derive(Component)]
pub struct ParticleGroup;

// marker only: no system writes a local Transform carrying it after spawn.
// Bevy still propagates it, there is no per-entity opt-out to switch on.
#[derive(Component)]
pub struct FrozenTransform;

// which palette entry a mesh's material was picked from
#[derive(Component, Debug, Copy, Clone, PartialEq, Eq)]
pub struct PaletteIndex(pub usize);

/// Rotation as an absolute function of elapsed time: fixed euler tilt (XYZ)
/// plus a per-axis angular rate.
#[derive(Component, Copy, Clone, Debug, PartialEq)]
pub struct Rotates {
    pub tilt: Vec3,
    pub rate: Vec3, // radians per second
}

impl Rotates {
    pub fn angles_at(&self, elapsed: f32) -> Vec3 {
        self.tilt + self.rate * elapsed
    }

    pub fn rotation_at(&self, elapsed: f32) -> Quat {
        let a = self.angles_at(elapsed);
        Quat::from_euler(EulerRot::XYZ, a.x, a.y, a.z)
    }
}

/// Scene content and its animation, no window or input needed.
pub struct SceneGraphPlugin;

impl Plugin for SceneGraphPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneConfig>()
            .init_resource::<SceneRng>()
            .init_resource::<ControlPanel>()
            .add_systems(
                Startup,
                (
                    scene::light::add_light,
                    scene::planet::add_planet,
                    scene::particles::add_particles,
                )
                    .chain(),
            )
            .add_systems(Update, (animate_groups, scene::light::aim_lights_at_origin));
    }
}

/// Everything: scene, orbit camera, control panel and debug helpers.
pub struct PlanetScenePlugin;

impl Plugin for PlanetScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((SceneGraphPlugin, OrbitCameraPlugin, ControlPanelPlugin))
            .add_systems(
                Update,
                (
                    exit_on_escape,
                    scene::draw_axes.run_if(scene::axes_enabled),
                ),
            );
    }
}
