use bevy::ecs::error::Result;
use bevy::prelude::*;
use bevy::render::mesh::{MeshBuilder, Meshable};

use crate::config::{PlanetConfig, SceneConfig};
use crate::panel::{Binding, ControlPanel, MaterialProperty};
use crate::scene::flat_shaded;
use crate::{PaletteIndex, PlanetGroup, Rotates};

fn rough_metal(color: Color, planet: &PlanetConfig) -> StandardMaterial {
    StandardMaterial {
        base_color: color,
        metallic: planet.metalness,
        perceptual_roughness: planet.roughness,
        ..default()
    }
}

pub fn add_planet(
    mut commands: Commands,
    config: Res<SceneConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut panel: ResMut<ControlPanel>,
) -> Result {
    let planet = &config.planet;

    let sphere = Sphere::new(planet.radius).mesh().ico(planet.detail)?;
    // bevy's torus already lies in the XZ plane, i.e. flat around the planet
    let ring = Torus {
        minor_radius: planet.ring_tube,
        major_radius: planet.ring_radius,
    }
    .mesh()
    .minor_resolution(planet.ring_radial_segments)
    .major_resolution(planet.ring_tubular_segments)
    .build();

    let planet_material = materials.add(rough_metal(config.palette_color(planet.planet_color), planet));
    let ring_material = materials.add(rough_metal(config.palette_color(planet.ring_color), planet));

    let rotates = Rotates {
        tilt: planet.tilt,
        rate: Vec3::new(0.0, config.spin_rate, 0.0),
    };

    // meshes cast and receive shadows unless marked otherwise
    commands
        .spawn((
            Name::new("planet_group"),
            PlanetGroup,
            rotates,
            Transform::from_rotation(rotates.rotation_at(0.0)),
            Visibility::default(),
        ))
        .with_children(|group| {
            group.spawn((
                Name::new("planet"),
                Mesh3d(meshes.add(flat_shaded(sphere))),
                MeshMaterial3d(planet_material.clone()),
                PaletteIndex(planet.planet_color),
            ));
            group.spawn((
                Name::new("ring"),
                Mesh3d(meshes.add(flat_shaded(ring))),
                MeshMaterial3d(ring_material.clone()),
                PaletteIndex(planet.ring_color),
            ));
        });

    for (label, handle, property) in [
        ("planet.metalness", &planet_material, MaterialProperty::Metalness),
        ("planet.roughness", &planet_material, MaterialProperty::Roughness),
        ("ring.metalness", &ring_material, MaterialProperty::Metalness),
        ("ring.roughness", &ring_material, MaterialProperty::Roughness),
    ] {
        panel
            .add(label, Binding::Material { handle: handle.clone(), property })
            .min(0.0)
            .max(1.0)
            .step(0.01);
    }

    info!("planet group ready (radius {}, ring {})", planet.radius, planet.ring_radius);
    Ok(())
}
