// every literal of the scene, grouped by the part of the scene that reads it
use std::f32::consts::PI;

use bevy::prelude::*;

pub const PALETTE: [u32; 3] = [0x37BE95, 0xF3F3F3, 0x6549C0];
pub const CLEAR_COLOR: u32 = 0x0E2255;

// 0xRRGGBB -> sRGB color
pub fn hex_color(hex: u32) -> Color {
    Color::srgb_u8((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

/// Orthographic volume the directional light casts shadows within.
///
/// Only `far` reaches the renderer, as the reach of the single shadow cascade.
/// Bevy fits the cascade to the camera view, so the side bounds and `near`
/// are kept as a record of the intended volume and are not applied.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct ShadowFrustum {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ShadowFrustum {
    fn default() -> Self {
        Self { left: -50.0, right: 50.0, top: 50.0, bottom: -50.0, near: 50.0, far: 100.0 }
    }
}

#[derive(Debug, Clone)]
pub struct LightConfig {
    pub ambient_brightness: f32, // cd/m^2
    pub directional_illuminance: f32, // lux
    pub position: Vec3,
    pub frustum: ShadowFrustum,
    pub shadow_map_size: usize,
    pub slider_range: (f32, f32),
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            ambient_brightness: 1_000.0,
            directional_illuminance: 8_000.0,
            position: Vec3::new(50.0, 25.0, 50.0),
            frustum: ShadowFrustum::default(),
            shadow_map_size: 2048,
            slider_range: (-50.0, 50.0),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlanetConfig {
    pub tilt: Vec3, // euler XYZ
    pub radius: f32,
    pub detail: u32, // icosphere subdivisions
    pub ring_radius: f32,
    pub ring_tube: f32,
    pub ring_radial_segments: usize,
    pub ring_tubular_segments: usize,
    pub metalness: f32,
    pub roughness: f32,
    pub planet_color: usize, // palette index
    pub ring_color: usize,
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            tilt: Vec3::new(PI / 8.0, 0.0, PI / 60.0),
            radius: 10.0,
            detail: 1,
            ring_radius: 15.0,
            ring_tube: 1.5,
            ring_radial_segments: 10,
            ring_tubular_segments: 10,
            metalness: 0.5,
            roughness: 0.5,
            planet_color: 0,
            ring_color: 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParticleConfig {
    pub count: usize,
    pub extent: f32, // side of the cube, centered on the origin
    pub size: f32, // tetrahedron circumradius
    pub seed: Option<u64>, // None -> seeded from the clock
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self { count: 500, extent: 80.0, size: 0.5, seed: None }
    }
}

#[derive(Debug, Clone)]
pub struct CameraConfig {
    pub fov_degrees: f32, // vertical
    pub distance: f32,
    pub near: f32,
    pub far: f32,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub enable_zoom: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            distance: 50.0,
            near: 0.1,
            far: 2000.0,
            enable_damping: true,
            damping_factor: 0.05,
            enable_zoom: true,
        }
    }
}

#[derive(Resource, Debug, Clone)]
pub struct SceneConfig {
    pub palette: [u32; 3],
    pub clear_color: u32,
    pub spin_rate: f32, // radians per second
    pub show_axes: bool,
    pub light: LightConfig,
    pub planet: PlanetConfig,
    pub particles: ParticleConfig,
    pub camera: CameraConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            palette: PALETTE,
            clear_color: CLEAR_COLOR,
            spin_rate: 0.05,
            show_axes: false,
            light: LightConfig::default(),
            planet: PlanetConfig::default(),
            particles: ParticleConfig::default(),
            camera: CameraConfig::default(),
        }
    }
}

impl SceneConfig {
    pub fn palette_color(&self, index: usize) -> Color {
        hex_color(self.palette[index])
    }
}
