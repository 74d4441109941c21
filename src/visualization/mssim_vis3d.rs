use bevy::prelude::*;
use bevy::math::primitives::Sphere;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;

use crate::simulation::engine::Engine;
use crate::simulation::scenario::{Ground, SceneKind};

/// Component tagging each sphere with its particle index into the flattened position buffer
#[derive(Component)]
struct ParticleIndex(pub usize);

/// Everything spawned for the active scene; despawned wholesale on a switch or reset
#[derive(Component)]
struct SceneEntity;

/// Fired whenever the engine rebuilt its scene
#[derive(Event)]
struct SceneChanged;

const BACKGROUND: Color = Color::srgb(0.1, 0.1, 0.2);
const PARTICLE_COLOR: Color = Color::srgb(1.0, 1.0, 1.0);
const SPRING_COLOR: Color = Color::srgb(1.0, 0.9, 0.0);
const GROUND_COLOR: Color = Color::srgb(0.03, 1.0, 0.7);

/// Convenience entrypoint, mirroring the engine as a Bevy resource
pub fn run_3d(engine: Engine) {
    log::info!(
        "run_3d: starting Bevy 3D viewer on {} ({} particles)",
        engine.current().name(),
        engine.scene.system.particles.len()
    );

    App::new()
        .insert_resource(engine)
        .insert_resource(ClearColor(BACKGROUND))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "mssim".into(),
                resolution: (800.0, 800.0).into(),
                ..default()
            }),
            ..default()
        }))
        .add_event::<SceneChanged>()
        .add_systems(Startup, setup_3d)
        .add_systems(
            Update,
            (
                input_system,
                respawn_scene_system,
                physics_step_system,
                sync_transforms_system,
                draw_springs_system,
            )
                .chain(),
        )
        .run();
}

/// Startup system: spawn the camera and request the first scene spawn
fn setup_3d(mut commands: Commands, mut changed: EventWriter<SceneChanged>) {
    commands.spawn(Camera3dBundle::default());
    changed.send(SceneChanged);
}

/// Arrow keys switch scenes (clamped), R rebuilds the current one, Escape quits
fn input_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut engine: ResMut<Engine>,
    mut changed: EventWriter<SceneChanged>,
    mut exit: EventWriter<AppExit>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.send(AppExit::Success);
        return;
    }

    let before = engine.current();
    if keys.just_pressed(KeyCode::ArrowRight) {
        engine.next_scene();
    } else if keys.just_pressed(KeyCode::ArrowLeft) {
        engine.previous_scene();
    } else if keys.just_pressed(KeyCode::KeyR) {
        engine.reset();
        changed.send(SceneChanged);
        return;
    } else {
        return;
    }

    // clamped at either end: nothing was rebuilt worth respawning for
    if engine.current() != before {
        changed.send(SceneChanged);
    } else {
        log::debug!("already at the {} end of the scene list", before.name());
    }
}

/// Despawn the previous scene's entities and spawn the current one's
fn respawn_scene_system(
    mut commands: Commands,
    mut changed: EventReader<SceneChanged>,
    engine: Res<Engine>,
    old: Query<Entity, With<SceneEntity>>,
    mut camera: Query<&mut Transform, With<Camera>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if changed.read().count() == 0 {
        return;
    }

    for e in &old {
        commands.entity(e).despawn_recursive();
    }

    let kind = engine.current();

    // Spring scenes live in [-1, 1]; the jello cube needs a perspective view from afar
    let (eye, target, radius) = match kind {
        SceneKind::Jello => (Vec3::new(0.0, 1.0, 16.0), Vec3::new(0.0, 0.0, -1.0), 0.08),
        _ => (Vec3::new(0.0, 0.0, 2.5), Vec3::ZERO, 0.015),
    };
    for mut t in &mut camera {
        *t = Transform::from_translation(eye).looking_at(target, Vec3::Y);
    }

    let sphere = meshes.add(Sphere::new(radius).mesh());
    let material = materials.add(StandardMaterial {
        base_color: PARTICLE_COLOR,
        unlit: true,
        ..Default::default()
    });

    for (i, c) in engine.positions().chunks_exact(3).enumerate() {
        commands.spawn((
            PbrBundle {
                mesh: sphere.clone(),
                material: material.clone(),
                transform: Transform::from_xyz(c[0], c[1], c[2]),
                ..Default::default()
            },
            ParticleIndex(i),
            SceneEntity,
        ));
    }

    if let Some(ground) = &engine.scene.ground {
        commands.spawn((
            PbrBundle {
                mesh: meshes.add(ground_mesh(ground)),
                material: materials.add(StandardMaterial {
                    base_color: GROUND_COLOR,
                    unlit: true,
                    cull_mode: None,
                    ..Default::default()
                }),
                ..Default::default()
            },
            SceneEntity,
        ));
    }
}

/// Per-frame physics integration: all substeps for this frame
fn physics_step_system(mut engine: ResMut<Engine>) {
    engine.update();
}

fn sync_transforms_system(engine: Res<Engine>, mut query: Query<(&ParticleIndex, &mut Transform)>) {
    let positions = engine.positions();
    for (ParticleIndex(i), mut transform) in &mut query {
        if let Some(c) = positions.get(3 * i..3 * i + 3) {
            transform.translation = Vec3::new(c[0], c[1], c[2]);
        }
    }
}

/// Jello draws its edge list; the other scenes draw a strip in particle order
fn draw_springs_system(engine: Res<Engine>, mut gizmos: Gizmos) {
    let points: Vec<Vec3> = engine
        .positions()
        .chunks_exact(3)
        .map(|c| Vec3::new(c[0], c[1], c[2]))
        .collect();

    if engine.scene.edges.is_empty() {
        gizmos.linestrip(points, SPRING_COLOR);
        return;
    }

    for pair in engine.scene.edges.chunks_exact(2) {
        let (a, b) = (pair[0] as usize, pair[1] as usize);
        gizmos.line(points[a], points[b], SPRING_COLOR);
    }
}

// =========================================================================================
// Ground quad from the scene's flat vertex/index arrays
// =========================================================================================

fn ground_mesh(ground: &Ground) -> Mesh {
    let positions: Vec<[f32; 3]> = ground
        .vertices
        .chunks_exact(3)
        .map(|c| [c[0], c[1], c[2]])
        .collect();
    let normals = vec![[0.0, 1.0, 0.0]; positions.len()];

    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
        .with_inserted_indices(Indices::U32(ground.indices.clone()))
}
