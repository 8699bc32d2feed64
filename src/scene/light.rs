use bevy::pbr::{CascadeShadowConfig, CascadeShadowConfigBuilder, DirectionalLightShadowMap};
use bevy::prelude::*;

use crate::config::{SceneConfig, ShadowFrustum};
use crate::panel::{Binding, ControlPanel, TranslationAxis};

impl ShadowFrustum {
    // Bevy fits directional shadows to the view with cascades; a single cascade
    // reaching the far bound covers the same depth range.
    pub fn cascade_config(&self) -> CascadeShadowConfig {
        CascadeShadowConfigBuilder {
            num_cascades: 1,
            maximum_distance: self.far,
            first_cascade_far_bound: self.far,
            ..default()
        }
        .build()
    }

    pub fn half_extent(&self) -> Vec2 {
        Vec2::new(self.right - self.left, self.top - self.bottom) * 0.5
    }
}

pub fn add_light(mut commands: Commands, config: Res<SceneConfig>, mut panel: ResMut<ControlPanel>) {
    let light = &config.light;

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: light.ambient_brightness,
        ..default()
    });
    commands.insert_resource(DirectionalLightShadowMap { size: light.shadow_map_size });

    let sun = commands
        .spawn((
            Name::new("directional_light"),
            DirectionalLight {
                color: Color::WHITE,
                illuminance: light.directional_illuminance,
                shadows_enabled: true,
                ..default()
            },
            light.frustum,
            light.frustum.cascade_config(),
            Transform::from_translation(light.position).looking_at(Vec3::ZERO, Vec3::Y),
        ))
        .id();

    let (min, max) = light.slider_range;
    for (label, axis) in [
        ("light.x", TranslationAxis::X),
        ("light.y", TranslationAxis::Y),
        ("light.z", TranslationAxis::Z),
    ] {
        panel.add(label, Binding::Translation { entity: sun, axis }).min(min).max(max);
    }

    info!(
        "light rig ready: shadow map {}px, frustum {:?}",
        light.shadow_map_size,
        light.frustum.half_extent()
    );
}

// a directional light always points at the origin, wherever the panel moves it
pub fn aim_lights_at_origin(
    mut lights: Query<&mut Transform, (With<DirectionalLight>, Changed<Transform>)>,
) {
    for mut transform in &mut lights {
        // writing through bypass keeps this from re-triggering next frame
        transform.bypass_change_detection().look_at(Vec3::ZERO, Vec3::Y);
    }
}
