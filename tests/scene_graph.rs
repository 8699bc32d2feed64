use bevy::ecs::system::RunSystemOnce;
use bevy::pbr::{CascadeShadowConfig, DirectionalLightShadowMap};
use bevy::prelude::*;
use planet_scene::config::{PALETTE, ParticleConfig, SceneConfig, ShadowFrustum, hex_color};
use planet_scene::scene::axes_enabled;
use planet_scene::{FrozenTransform, PaletteIndex, ParticleGroup, PlanetGroup, Rotates, SceneGraphPlugin};

fn scene_app(seed: u64) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, AssetPlugin::default()))
        .init_asset::<Mesh>()
        .init_asset::<StandardMaterial>()
        .insert_resource(SceneConfig {
            particles: ParticleConfig { seed: Some(seed), ..default() },
            ..default()
        })
        .add_plugins(SceneGraphPlugin);
    app.update();
    app
}

fn child_count<F: bevy::ecs::query::QueryFilter>(app: &mut App) -> usize {
    let world = app.world_mut();
    let mut groups = world.query_filtered::<&Children, F>();
    let counts: Vec<usize> = groups.iter(world).map(|children| children.len()).collect();
    assert_eq!(counts.len(), 1);
    counts[0]
}

#[test]
fn startup_builds_lights_and_two_groups() {
    let mut app = scene_app(1);
    let world = app.world_mut();

    assert!(world.get_resource::<AmbientLight>().is_some());
    let directional = world.query::<&DirectionalLight>().iter(world).count();
    assert_eq!(directional, 1);

    let groups = world.query::<&Rotates>().iter(world).count();
    assert_eq!(groups, 2);

    assert_eq!(child_count::<With<PlanetGroup>>(&mut app), 2);
    assert_eq!(child_count::<With<ParticleGroup>>(&mut app), 500);
}

#[test]
fn particle_count_is_independent_of_seed() {
    for seed in [2, 99, 12345] {
        let mut app = scene_app(seed);
        assert_eq!(child_count::<With<ParticleGroup>>(&mut app), 500);
    }
}

#[test]
fn particles_stay_inside_the_cube_with_palette_colors() {
    let mut app = scene_app(7);
    let world = app.world_mut();
    let mut particles = world.query_filtered::<
        (&Transform, &PaletteIndex, &MeshMaterial3d<StandardMaterial>),
        With<FrozenTransform>,
    >();
    let materials = world.resource::<Assets<StandardMaterial>>();
    let palette: Vec<Color> = PALETTE.iter().map(|&hex| hex_color(hex)).collect();

    let mut seen = 0;
    for (transform, index, material) in particles.iter(world) {
        let t = transform.translation;
        assert!(t.abs().max_element() <= 40.0, "{:?}", t);

        let material = materials.get(&material.0).expect("particle material exists");
        assert!(palette.contains(&material.base_color));
        assert_eq!(material.base_color, palette[index.0]);
        seen += 1;
    }
    assert_eq!(seen, 500);
}

#[test]
fn planet_and_ring_colors() {
    let mut app = scene_app(3);
    let world = app.world_mut();
    let mut meshes = world.query_filtered::<
        (&Name, &PaletteIndex, &MeshMaterial3d<StandardMaterial>),
        Without<FrozenTransform>,
    >();
    let materials = world.resource::<Assets<StandardMaterial>>();

    let mut found = Vec::new();
    for (name, index, material) in meshes.iter(world) {
        let material = materials.get(&material.0).expect("material exists");
        assert_eq!(material.metallic, 0.5);
        assert_eq!(material.perceptual_roughness, 0.5);
        found.push((name.as_str().to_owned(), index.0, material.base_color));
    }
    found.sort_by(|a, b| a.0.cmp(&b.0));

    assert_eq!(
        found,
        vec![
            ("planet".to_owned(), 0, hex_color(PALETTE[0])),
            ("ring".to_owned(), 2, hex_color(PALETTE[2])),
        ]
    );
}

#[test]
fn planet_group_starts_tilted() {
    let mut app = scene_app(4);
    let world = app.world_mut();
    let (rotates, transform) = world
        .query_filtered::<(&Rotates, &Transform), With<PlanetGroup>>()
        .single(world)
        .expect("one planet group");

    let (x, y, z) = transform.rotation.to_euler(EulerRot::XYZ);
    assert!((x - std::f32::consts::PI / 8.0).abs() < 1e-5);
    assert!(y.abs() < 1e-5);
    assert!((z - std::f32::consts::PI / 60.0).abs() < 1e-5);
    assert_eq!(rotates.rate, Vec3::new(0.0, 0.05, 0.0));
}

#[test]
fn directional_light_casts_shadows() {
    let mut app = scene_app(5);
    let world = app.world_mut();
    let (light, frustum, transform) = world
        .query::<(&DirectionalLight, &ShadowFrustum, &Transform)>()
        .single(world)
        .expect("one directional light");

    assert!(light.shadows_enabled);
    assert_eq!(*frustum, ShadowFrustum::default());
    assert_eq!(frustum.near, 50.0);
    assert_eq!(frustum.far, 100.0);
    assert_eq!(frustum.half_extent(), Vec2::splat(50.0));
    assert_eq!(transform.translation, Vec3::new(50.0, 25.0, 50.0));
    let facing = *transform.forward();
    assert!(facing.abs_diff_eq(-transform.translation.normalize(), 1e-5));

    assert_eq!(world.resource::<DirectionalLightShadowMap>().size, 2048);
}

#[test]
fn sliders_are_registered_with_ranges() {
    let app = scene_app(6);
    let panel = app.world().resource::<planet_scene::panel::ControlPanel>();

    let labels: Vec<&str> = panel.sliders().iter().map(|s| s.label.as_str()).collect();
    assert_eq!(
        labels,
        [
            "light.x",
            "light.y",
            "light.z",
            "planet.metalness",
            "planet.roughness",
            "ring.metalness",
            "ring.roughness",
        ]
    );
    for slider in &panel.sliders()[..3] {
        assert_eq!((slider.min, slider.max, slider.step), (-50.0, 50.0, None));
    }
    for slider in &panel.sliders()[3..] {
        assert_eq!((slider.min, slider.max, slider.step), (0.0, 1.0, Some(0.01)));
    }
}

#[test]
fn shadow_cascade_reaches_the_far_bound() {
    let mut app = scene_app(8);
    let world = app.world_mut();
    let cascades = world
        .query_filtered::<&CascadeShadowConfig, With<DirectionalLight>>()
        .single(world)
        .expect("one directional light")
        .clone();

    assert_eq!(cascades.bounds, vec![ShadowFrustum::default().far]);
}

#[derive(Resource, Default)]
struct AxesFrames(u32);

fn count_axes_frames(mut frames: ResMut<AxesFrames>) {
    frames.0 += 1;
}

#[test]
fn axes_helper_is_off_unless_enabled() {
    let mut world = World::new();
    world.insert_resource(SceneConfig::default());
    assert!(!world.run_system_once(axes_enabled).expect("condition runs"));
    world.resource_mut::<SceneConfig>().show_axes = true;
    assert!(world.run_system_once(axes_enabled).expect("condition runs"));

    for (show_axes, expected) in [(false, 0), (true, 2)] {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(SceneConfig { show_axes, ..default() })
            .init_resource::<AxesFrames>()
            .add_systems(Update, count_axes_frames.run_if(axes_enabled));
        app.update();
        app.update();
        assert_eq!(app.world().resource::<AxesFrames>().0, expected);
    }
}
