// orbit camera: drag to rotate around a target, wheel to zoom, right drag to pan.
// Input only accumulates; the camera moves when `update` runs.
use std::f32::consts::{PI, TAU};

use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::animation::animate_groups;
use crate::config::{SceneConfig, hex_color};

const EPS: f32 = 1e-6;
const ZOOM_BASE: f32 = 0.95; // radius factor per wheel notch

// radius, polar angle from +Y (phi), azimuth around Y from +Z (theta)
#[derive(Debug, Clone, Copy, PartialEq)]
struct Spherical {
    radius: f32,
    phi: f32,
    theta: f32,
}

impl Spherical {
    fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self { radius, phi: 0.0, theta: 0.0 };
        }
        Self {
            radius,
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            theta: offset.x.atan2(offset.z),
        }
    }

    fn to_offset(self) -> Vec3 {
        let sin_phi = self.phi.sin();
        Vec3::new(
            self.radius * sin_phi * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * sin_phi * self.theta.cos(),
        )
    }
}

#[derive(Component, Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub enable_zoom: bool,
    pub enable_rotate: bool,
    pub enable_pan: bool,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    // pending motion, consumed by update()
    spherical_delta: Vec2, // (theta, phi)
    scale: f32,
    pan_offset: Vec3,
}

impl OrbitControls {
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            enable_damping: false,
            damping_factor: 0.05,
            enable_zoom: true,
            enable_rotate: true,
            enable_pan: true,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
            spherical_delta: Vec2::ZERO,
            scale: 1.0,
            pan_offset: Vec3::ZERO,
        }
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.spherical_delta.x -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.spherical_delta.y -= angle;
    }

    pub fn zoom_scale(&self) -> f32 {
        ZOOM_BASE.powf(self.zoom_speed)
    }

    // move closer
    pub fn dolly_in(&mut self, scale: f32) {
        if self.enable_zoom {
            self.scale *= scale;
        }
    }

    pub fn dolly_out(&mut self, scale: f32) {
        if self.enable_zoom {
            self.scale /= scale;
        }
    }

    /// Pans by a pointer delta in pixels so the point under the cursor follows it.
    pub fn pan(&mut self, delta: Vec2, viewport_height: f32, fov: f32, transform: &Transform) {
        if viewport_height <= 0.0 {
            return;
        }
        let target_distance = (transform.translation - self.target).length() * (fov * 0.5).tan();
        let left = 2.0 * delta.x * target_distance / viewport_height * self.pan_speed;
        let up = 2.0 * delta.y * target_distance / viewport_height * self.pan_speed;
        self.pan_offset += *transform.right() * -left + *transform.up() * up;
    }

    pub fn is_settled(&self) -> bool {
        self.spherical_delta.length_squared() < EPS
            && self.pan_offset.length_squared() < EPS
            && (self.scale - 1.0).abs() < EPS
    }

    /// Applies pending motion to `transform` and keeps it aimed at the target.
    /// With damping only a fraction is applied and the rest decays, so the
    /// camera keeps drifting for a few frames after input stops.
    /// Returns whether the camera moved.
    pub fn update(&mut self, transform: &mut Transform) -> bool {
        let mut spherical = Spherical::from_offset(transform.translation - self.target);

        let (rotation, pan) = if self.enable_damping {
            (self.spherical_delta * self.damping_factor, self.pan_offset * self.damping_factor)
        } else {
            (self.spherical_delta, self.pan_offset)
        };

        spherical.theta += rotation.x;
        spherical.phi = (spherical.phi + rotation.y)
            .max(self.min_polar_angle)
            .min(self.max_polar_angle)
            .clamp(EPS, PI - EPS);
        spherical.radius = (spherical.radius * self.scale)
            .max(self.min_distance)
            .min(self.max_distance);
        self.target += pan;

        let before = *transform;
        transform.translation = self.target + spherical.to_offset();
        transform.look_at(self.target, Vec3::Y);

        if self.enable_damping {
            self.spherical_delta *= 1.0 - self.damping_factor;
            self.pan_offset *= 1.0 - self.damping_factor;
        } else {
            self.spherical_delta = Vec2::ZERO;
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        before.translation.distance_squared(transform.translation) > EPS
            || 8.0 * (1.0 - before.rotation.dot(transform.rotation)) > EPS
    }
}

pub struct OrbitCameraPlugin;

impl Plugin for OrbitCameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneConfig>()
            .add_systems(Startup, spawn_camera)
            .add_systems(Update, (orbit_input, orbit_update.after(animate_groups)).chain());
    }
}

pub fn spawn_camera(mut commands: Commands, config: Res<SceneConfig>) {
    let camera = &config.camera;

    commands.insert_resource(ClearColor(hex_color(config.clear_color)));

    let controls = OrbitControls {
        enable_damping: camera.enable_damping,
        damping_factor: camera.damping_factor,
        enable_zoom: camera.enable_zoom,
        ..OrbitControls::new(Vec3::ZERO)
    };

    // aspect ratio follows the viewport, bevy keeps it updated
    commands.spawn((
        Name::new("camera"),
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: camera.fov_degrees.to_radians(),
            near: camera.near,
            far: camera.far,
            ..default()
        }),
        Transform::from_xyz(0.0, 0.0, camera.distance).looking_at(Vec3::ZERO, Vec3::Y),
        controls,
    ));
}

pub fn orbit_input(
    buttons: Res<ButtonInput<MouseButton>>,
    mut motion: EventReader<MouseMotion>,
    mut wheel: EventReader<MouseWheel>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut cameras: Query<(&mut OrbitControls, &Transform, &Projection)>,
) {
    // drain every frame so a drag never replays stale motion
    let drag: Vec2 = motion.read().map(|ev| ev.delta).sum();
    let scroll: f32 = wheel.read().map(|ev| ev.y).sum();

    let Ok(window) = windows.single() else {
        return;
    };
    let height = window.resolution.height();

    for (mut controls, transform, projection) in &mut cameras {
        if drag != Vec2::ZERO && height > 0.0 {
            if controls.enable_rotate && buttons.pressed(MouseButton::Left) {
                let speed = controls.rotate_speed;
                controls.rotate_left(TAU * drag.x / height * speed);
                controls.rotate_up(TAU * drag.y / height * speed);
            } else if controls.enable_pan && buttons.pressed(MouseButton::Right) {
                let fov = match projection {
                    Projection::Perspective(p) => p.fov,
                    _ => PerspectiveProjection::default().fov,
                };
                controls.pan(drag, height, fov, transform);
            }
        }

        if scroll > 0.0 {
            let scale = controls.zoom_scale();
            controls.dolly_in(scale);
        } else if scroll < 0.0 {
            let scale = controls.zoom_scale();
            controls.dolly_out(scale);
        }
    }
}

pub fn orbit_update(mut cameras: Query<(&mut OrbitControls, &mut Transform)>) {
    for (mut controls, mut transform) in &mut cameras {
        if controls.is_settled() {
            continue;
        }
        controls.update(&mut transform);
    }
}
