//! Visual feedback: explosion debris and the scrolling starfield.
//!
//! Explosions are data-driven: combat writes an [`ExplosionBurst`] and this
//! module turns it into a handful of short-lived debris shards that fly
//! apart, shrink, and despawn. Nothing reads them back; they carry no
//! gameplay.
//!
//! The starfield is two point-cloud tiles that leapfrog each other ahead of
//! the player, so the sky never runs out however far the match goes.

use bevy::prelude::*;
use bevy_asset::RenderAssetUsages;
use bevy_mesh::PrimitiveTopology;
use bevy_rapier3d::prelude::*;
use rand::Rng;

use crate::player::Player;
use crate::session::MatchEntity;

/// One explosion at a point, in a colour.
#[derive(Message, Debug, Clone, Copy)]
pub struct ExplosionBurst {
    pub position: Vec3,
    pub color: Color,
}

/// Debris shard countdown; despawned at zero.
#[derive(Component)]
pub struct DebrisLifetime(pub f32);

const DEBRIS_PER_BURST: usize = 12;
const DEBRIS_LIFETIME_SECS: f32 = 0.6;
const DEBRIS_SPEED: f32 = 8.0;

/// Turn each queued burst into flying debris shards.
pub fn spawn_explosion_debris(
    mut commands: Commands,
    mut bursts: MessageReader<ExplosionBurst>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mut rng = rand::thread_rng();
    for burst in bursts.read() {
        let material = materials.add(StandardMaterial {
            base_color: burst.color,
            emissive: burst.color.to_linear(),
            unlit: true,
            ..default()
        });
        for _ in 0..DEBRIS_PER_BURST {
            let direction = Vec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            )
            .try_normalize()
            .unwrap_or(Vec3::X);
            commands.spawn((
                DebrisLifetime(DEBRIS_LIFETIME_SECS),
                MatchEntity,
                Mesh3d(meshes.add(Cuboid::new(0.15, 0.15, 0.15))),
                MeshMaterial3d(material.clone()),
                Transform::from_translation(burst.position),
                RigidBody::KinematicVelocityBased,
                Velocity::linear(direction * rng.gen_range(0.4..1.0) * DEBRIS_SPEED),
            ));
        }
    }
}

/// Shrink debris toward nothing and despawn it on time.
pub fn decay_debris(
    mut commands: Commands,
    time: Res<Time>,
    mut debris: Query<(Entity, &mut DebrisLifetime, &mut Transform)>,
) {
    let dt = time.delta_secs();
    for (entity, mut lifetime, mut transform) in &mut debris {
        lifetime.0 -= dt;
        if lifetime.0 <= 0.0 {
            commands.entity(entity).despawn();
        } else {
            transform.scale = Vec3::splat(lifetime.0 / DEBRIS_LIFETIME_SECS);
        }
    }
}

// ── Starfield ─────────────────────────────────────────────────────────────────

/// One tile of the scrolling starfield.
#[derive(Component)]
pub struct StarfieldTile;

const STARS_PER_TILE: usize = 1000;
const TILE_DEPTH: f32 = 200.0;
const TILE_SPAN_X: f32 = 120.0;
const TILE_SPAN_Y: f32 = 80.0;

/// Build one tile's worth of stars as a point-list mesh.
fn starfield_mesh(rng: &mut impl Rng) -> Mesh {
    let positions: Vec<[f32; 3]> = (0..STARS_PER_TILE)
        .map(|_| {
            [
                rng.gen_range(-TILE_SPAN_X / 2.0..TILE_SPAN_X / 2.0),
                rng.gen_range(-TILE_SPAN_Y / 2.0..TILE_SPAN_Y / 2.0),
                rng.gen_range(-TILE_DEPTH / 2.0..TILE_DEPTH / 2.0),
            ]
        })
        .collect();

    Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::RENDER_WORLD)
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
}

/// `OnEnter(Playing)`: two tiles, one around the player and one ahead.
pub fn spawn_starfield(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mut rng = rand::thread_rng();
    let material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.9, 0.9, 1.0),
        unlit: true,
        ..default()
    });
    for i in 0..2 {
        commands.spawn((
            StarfieldTile,
            MatchEntity,
            Mesh3d(meshes.add(starfield_mesh(&mut rng))),
            MeshMaterial3d(material.clone()),
            Transform::from_xyz(0.0, 0.0, -TILE_DEPTH * i as f32),
        ));
    }
}

/// Leapfrog tiles the player has flown past back out in front.
pub fn recycle_starfield(
    player: Query<&Transform, With<Player>>,
    mut tiles: Query<&mut Transform, (With<StarfieldTile>, Without<Player>)>,
) {
    let Ok(player_tf) = player.single() else {
        return;
    };
    for mut tile in &mut tiles {
        if tile.translation.z > player_tf.translation.z + TILE_DEPTH {
            tile.translation.z -= 2.0 * TILE_DEPTH;
        }
    }
}
