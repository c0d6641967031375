use bevy::prelude::*;

use crate::configuration::config::{SceneConfig, ShapeConfig};
use crate::configuration::presets::PRESET_KEYS;
use crate::simulation::scenario::Scene;
use crate::simulation::states::{NQuat, NVec3};
use crate::simulation::sync::Primitive;

/// Component tagging each hole mesh with its index into `Scene::primitives`
#[derive(Component)]
struct ParticleIndex(pub usize);

/// Distance of the camera from the origin along +Z
const CAMERA_DISTANCE: f32 = 1000.0;

/// Number keys bound to the entries of `PRESET_KEYS`, in order
const MENU_KEYS: [KeyCode; 5] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
];

/// Open a window and run `scene` until it is closed.
///
/// Keys: `1`-`5` switch preset, `T` toggles trails, `R` resets the scene.
pub fn run_viewer(scene: Scene) {
    println!("run_viewer: starting Bevy viewer with {} particles", scene.particles.len());

    App::new()
        .insert_resource(scene)
        .insert_resource(ClearColor(Color::BLACK))
        .add_plugins(DefaultPlugins)
        .add_systems(Startup, setup_viewer)
        .add_systems(Update, (scene_menu, tick_scene, sync_transforms, draw_overlays).chain())
        .run();
}

/// Startup system: camera, lights, one sphere per particle
fn setup_viewer(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    scene: Res<Scene>,
) {
    commands.spawn(Camera3dBundle {
        transform: Transform::from_xyz(0.0, 0.0, CAMERA_DISTANCE).looking_at(Vec3::ZERO, Vec3::Y),
        ..Default::default()
    });

    commands.spawn(PointLightBundle {
        point_light: PointLight {
            intensity: 1.0e7,
            range: 5000.0,
            ..Default::default()
        },
        transform: Transform::from_xyz(10.0, 10.0, 10.0),
        ..Default::default()
    });

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 200.0,
    });

    spawn_particles(&mut commands, &mut meshes, &mut materials, &scene);
}

fn spawn_particles(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    scene: &Scene,
) {
    // all holes share one mesh and one material
    let mesh = meshes.add(Sphere::new(scene.parameters.hole_radius as f32));
    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        ..Default::default()
    });

    for (i, prim) in scene.primitives.iter().enumerate() {
        commands.spawn((
            PbrBundle {
                mesh: mesh.clone(),
                material: material.clone(),
                transform: to_transform(prim),
                ..Default::default()
            },
            ParticleIndex(i),
        ));
    }
}

/// Scene selection: rebuild the scene resource and respawn the hole meshes
fn scene_menu(
    mut commands: Commands,
    keys: Res<ButtonInput<KeyCode>>,
    mut scene: ResMut<Scene>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    particles: Query<Entity, With<ParticleIndex>>,
) {
    let rebuilt = if keys.just_pressed(KeyCode::KeyR) {
        Some(scene.reset())
    } else if keys.just_pressed(KeyCode::KeyT) {
        let enabled = !scene.trails_enabled();
        Some(scene.set_trails_enabled(enabled))
    } else {
        MENU_KEYS
            .iter()
            .zip(PRESET_KEYS)
            .find(|(k, _)| keys.just_pressed(**k))
            .map(|(_, key)| SceneConfig::preset(key).and_then(Scene::mounted).map(|fresh| *scene = fresh))
    };

    match rebuilt {
        None => {}
        Some(Err(e)) => warn!("scene rebuild failed: {e}"),
        Some(Ok(())) => {
            for entity in &particles {
                commands.entity(entity).despawn();
            }
            spawn_particles(&mut commands, &mut meshes, &mut materials, &scene);
        }
    }
}

/// Per-frame simulation update driven by Bevy's frame time
fn tick_scene(time: Res<Time>, mut scene: ResMut<Scene>) {
    scene.tick(time.delta_seconds_f64());
}

fn sync_transforms(scene: Res<Scene>, mut query: Query<(&ParticleIndex, &mut Transform)>) {
    for (ParticleIndex(i), mut transform) in &mut query {
        if let Some(prim) = scene.primitives.get(*i) {
            *transform = to_transform(prim);
        }
    }
}

/// Container outline, connection lines and trails, drawn as gizmos
fn draw_overlays(mut gizmos: Gizmos, mut scene: ResMut<Scene>) {
    let scene = &mut *scene;
    let outline = Color::srgba(1.0, 1.0, 1.0, 0.15);

    if let Some(container) = scene.container() {
        let size = container.radius as f32;
        match scene.config.sampler.shape {
            ShapeConfig::Box => gizmos.cuboid(Transform::from_scale(Vec3::splat(size)), outline),
            _ => {
                gizmos.sphere(Vec3::ZERO, Quat::IDENTITY, size, outline);
            }
        }
    }

    for &(a, b) in &scene.connections {
        gizmos.line(
            to_vec3(&scene.primitives[a].position),
            to_vec3(&scene.primitives[b].position),
            Color::srgba(1.0, 1.0, 1.0, 0.5),
        );
    }

    for trail in scene.trails.iter_mut() {
        if trail.take_redraw() {
            gizmos.linestrip(trail.recent().map(to_vec3), Color::srgb(1.0, 0.0, 0.0));
        }
    }
}

fn to_transform(prim: &Primitive) -> Transform {
    Transform::from_translation(to_vec3(&prim.position)).with_rotation(to_quat(&prim.orientation))
}

fn to_vec3(v: &NVec3) -> Vec3 {
    Vec3::new(v.x as f32, v.y as f32, v.z as f32)
}

fn to_quat(q: &NQuat) -> Quat {
    let c = q.coords; // (i, j, k, w)
    Quat::from_xyzw(c.x as f32, c.y as f32, c.z as f32, c.w as f32)
}
