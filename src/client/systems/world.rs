use std::f32::consts::PI;

use bevy::{
    asset::AssetLoadFailedEvent,
    gltf::Gltf,
    prelude::*,
};
use grid::Convert;

use crate::{
    client::{components::*, config::ClientConfig},
    common::resources::map::Map,
};

/// Share of a cell covered by its tile, leaving a visible grid line between tiles
const TILE_FILL: f32 = 0.94;
/// Tiles sit just above the map image
const TILE_RISE: f32 = 0.005;

#[derive(Clone, Debug, Resource)]
pub struct TileMaterials {
    pub open: Handle<StandardMaterial>,
    /// Tint for non-walkable cells while a drag is on
    pub blocked: Handle<StandardMaterial>,
}

pub fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    config: Res<ClientConfig>,
    map: Res<Map>,
) {
    commands.insert_resource(
        AmbientLight {
            color: Color::WHITE,
            brightness: 400.,
            ..default()});

    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()},
        Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -PI / 3., PI / 8., 0.)),
    ));

    let extent = map.size() as f32 * map.cell_size();
    commands.spawn((
        Board,
        Mesh3d(meshes.add(Plane3d::default().mesh().size(extent, extent))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color_texture: Some(asset_server.load(config.map_texture.clone())),
            perceptual_roughness: 1.,
            ..default()})),
        Transform::default(),
    ));

    let tiles = TileMaterials {
        open: materials.add(StandardMaterial {
            base_color: Color::WHITE.with_alpha(0.12),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()}),
        blocked: materials.add(StandardMaterial {
            base_color: Color::srgba(0.8, 0.1, 0.1, 0.45),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()}),
    };
    let side = map.cell_size() * TILE_FILL;
    let mesh = meshes.add(Plane3d::default().mesh().size(side, side));
    for cell in map.cells() {
        let center: Vec3 = map.convert(cell);
        commands.spawn((
            Tile(cell),
            Mesh3d(mesh.clone()),
            MeshMaterial3d(tiles.open.clone()),
            Transform::from_translation(center + Vec3::Y * TILE_RISE),
        ));
    }
    debug!("board of {} cells, {} blocked", map.len(), map.blocked().len());
    commands.insert_resource(tiles);
}

/// Failed loads leave the board as it was; they are only reported.
pub fn report_failures(
    mut images: EventReader<AssetLoadFailedEvent<Image>>,
    mut models: EventReader<AssetLoadFailedEvent<Gltf>>,
) {
    for event in images.read() {
        error!("couldn't load texture {}: {}", event.path, event.error);
    }
    for event in models.read() {
        error!("couldn't load model {}: {}", event.path, event.error);
    }
}
