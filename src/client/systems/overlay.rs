//! Renders the drag [`Preview`] each frame.

use std::f32::consts::FRAC_PI_2;

use bevy::{
    color::palettes::css::{GOLD, RED},
    math::cubic_splines::{CubicCardinalSpline, CubicGenerator},
    prelude::*,
    scene::SceneInstanceReady,
};

use crate::{
    client::{
        components::*,
        config::ClientConfig,
        resources::preview::Preview,
        systems::{actor::{remap_materials, reskin, TokenAsset}, world::TileMaterials},
    },
    common::resources::map::Map,
};

/// Lift above the board so lines don't z-fight with the tiles
const RISE: f32 = 0.02;
/// Opacity of the drop preview
const GHOST_ALPHA: f32 = 0.4;
/// Curve samples per path segment
const SUBDIVISIONS: usize = 8;

pub fn setup(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<ClientConfig>,
    map: Res<Map>,
) {
    commands.spawn((
        Ghost,
        SceneRoot(asset_server.load(GltfAssetLabel::Scene(0).from_asset(config.token_asset.clone()))),
        Transform::from_scale(Vec3::splat(config.token_scale * map.cell_size())),
        Visibility::Hidden,
    )).observe(ghost_ready);
}

/// Swaps every material in the ghost's scene for a see-through copy.
fn ghost_ready(
    trigger: Trigger<SceneInstanceReady>,
    mut commands: Commands,
    q_child: Query<&Children>,
    q_material: Query<&MeshMaterial3d<StandardMaterial>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset: Res<TokenAsset>,
) {
    remap_materials(trigger.target(), &mut commands, &q_child, &q_material, &mut materials, |it| {
        let mut material = match &asset.texture {
            Some(texture) => reskin(it, texture),
            None => it.clone(),
        };
        material.base_color.set_alpha(GHOST_ALPHA);
        material.alpha_mode = AlphaMode::Blend;
        material
    });
}

pub fn tick_flash(
    time: Res<Time>,
    mut preview: ResMut<Preview>,
) {
    if preview.flash.is_some() { preview.tick(time.delta()) }
}

pub fn draw(
    mut gizmos: Gizmos,
    preview: Res<Preview>,
    map: Res<Map>,
) {
    let lift = Vec3::Y * RISE;
    let half = map.cell_size() * 0.35;

    if let Some(points) = preview.path.as_deref().filter(|it| it.len() >= 2) {
        let points: Vec<Vec3> = points.iter().map(|&it| it + lift).collect();
        match CubicCardinalSpline::new_catmull_rom(points.iter().copied()).to_curve() {
            Ok(curve) => gizmos.linestrip(curve.iter_positions(SUBDIVISIONS * (points.len() - 1)), GOLD),
            Err(_) => gizmos.linestrip(points.iter().copied(), GOLD),
        }
        let (from, to) = (points[points.len() - 2], points[points.len() - 1]);
        gizmos.arrow(from.lerp(to, 0.5), to, GOLD).with_tip_length(half);
    }

    if let Some(at) = preview.invalid {
        let at = at + lift;
        gizmos.line(at + Vec3::new(-half, 0., -half), at + Vec3::new(half, 0., half), RED);
        gizmos.line(at + Vec3::new(-half, 0., half), at + Vec3::new(half, 0., -half), RED);
    }

    if let Some(flash) = &preview.flash {
        let color = Color::from(RED).with_alpha(flash.alpha());
        let flat = Quat::from_rotation_x(FRAC_PI_2);
        for ring in 1..=4 {
            let radius = map.cell_size() * 0.45 * ring as f32 / 4.;
            gizmos.circle(Isometry3d::new(flash.at + lift, flat), radius, color);
        }
    }
}

pub fn sync_ghost(
    preview: Res<Preview>,
    mut query: Query<(&mut Transform, &mut Visibility), With<Ghost>>,
) {
    if !preview.is_changed() { return }
    let Ok((mut transform, mut visibility)) = query.single_mut() else { return };
    match preview.ghost {
        Some(at) => {
            transform.translation = at;
            *visibility = Visibility::Visible;
        }
        None => *visibility = Visibility::Hidden,
    }
}

/// Swaps the non-walkable tiles to the highlight material while a drag is on.
pub fn sync_tiles(
    preview: Res<Preview>,
    map: Res<Map>,
    materials: Res<TileMaterials>,
    mut query: Query<(&Tile, &mut MeshMaterial3d<StandardMaterial>)>,
) {
    if !preview.is_changed() { return }
    for (&tile, mut material) in &mut query {
        let handle = match (map.is_walkable(*tile), preview.blocked) {
            (false, true) => &materials.blocked,
            _ => &materials.open,
        };
        if material.0 != *handle { material.0 = handle.clone() }
    }
}
