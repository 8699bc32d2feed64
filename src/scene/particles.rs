// randomly scattered tetrahedra sharing one geometry
use std::time::SystemTime;

use bevy::prelude::*;
use glam::Vec3 as GVec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

use crate::config::{SceneConfig, hex_color};
use crate::scene::flat_shaded;
use crate::{FrozenTransform, PaletteIndex, ParticleGroup, Rotates};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleSeed {
    pub position: GVec3,
    pub palette_index: usize,
}

// draws `count` particles uniformly in a cube of side `extent` centered on the
// origin, each with a uniformly picked palette entry
pub fn scatter_particles<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    extent: f32,
    palette_len: usize,
) -> Vec<ParticleSeed> {
    (0..count)
        .map(|_| {
            let palette_index = rng.gen_range(0..palette_len);
            let position = GVec3::new(
                (rng.r#gen::<f32>() - 0.5) * extent,
                (rng.r#gen::<f32>() - 0.5) * extent,
                (rng.r#gen::<f32>() - 0.5) * extent,
            );
            ParticleSeed { position, palette_index }
        })
        .collect()
}

/// Regular tetrahedron with the given circumradius.
pub fn regular_tetrahedron(circumradius: f32) -> Tetrahedron {
    let s = circumradius / 3f32.sqrt();
    Tetrahedron::new(
        Vec3::new(s, s, s),
        Vec3::new(s, -s, -s),
        Vec3::new(-s, s, -s),
        Vec3::new(-s, -s, s),
    )
}

#[derive(Resource)]
pub struct SceneRng(pub Pcg64Mcg);

impl FromWorld for SceneRng {
    fn from_world(world: &mut World) -> Self {
        let seed = world
            .get_resource::<SceneConfig>()
            .and_then(|config| config.particles.seed)
            .unwrap_or_else(|| {
                SystemTime::now()
                    .duration_since(SystemTime::UNIX_EPOCH)
                    .map(|d| d.as_millis() as u64)
                    .unwrap_or_default()
            });
        info!("Seeded RNG with {}", seed);
        Self(Pcg64Mcg::seed_from_u64(seed))
    }
}

pub fn add_particles(
    mut commands: Commands,
    config: Res<SceneConfig>,
    mut rng: ResMut<SceneRng>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let particles = &config.particles;

    let geometry = meshes.add(flat_shaded(Mesh::from(regular_tetrahedron(particles.size))));
    // one material per palette entry, never edited afterwards
    let tints: Vec<Handle<StandardMaterial>> = config
        .palette
        .iter()
        .map(|&hex| materials.add(StandardMaterial::from(hex_color(hex))))
        .collect();

    let seeds = scatter_particles(&mut rng.0, particles.count, particles.extent, tints.len());

    commands
        .spawn((
            Name::new("particle_group"),
            ParticleGroup,
            Rotates {
                tilt: Vec3::ZERO,
                rate: Vec3::new(config.spin_rate, config.spin_rate, 0.0),
            },
            Transform::default(),
            Visibility::default(),
        ))
        .with_children(|group| {
            for seed in &seeds {
                group.spawn((
                    Mesh3d(geometry.clone()),
                    MeshMaterial3d(tints[seed.palette_index].clone()),
                    Transform::from_translation(Vec3::from_array(seed.position.to_array())),
                    FrozenTransform,
                    PaletteIndex(seed.palette_index),
                ));
            }
        });

    info!("scattered {} particles in a {} cube", seeds.len(), particles.extent);
}
