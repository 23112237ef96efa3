use std::time::Duration;

use bevy::{
    gltf::Gltf,
    prelude::*,
    scene::SceneInstanceReady,
};
use grid::Convert;

use crate::{
    client::{components::*, config::ClientConfig},
    common::{
        components::*,
        config::BoardConfig,
        resources::map::Map,
        systems::movement::*,
    },
};

/// The token's glTF, kept to look up its named clips once the scene is in,
/// and the texture that overrides the model's own.
#[derive(Clone, Debug, Resource)]
pub struct TokenAsset {
    pub gltf: Handle<Gltf>,
    pub texture: Option<Handle<Image>>,
}

/// Copy of `material` painted with `texture`.
pub fn reskin(material: &StandardMaterial, texture: &Handle<Image>) -> StandardMaterial {
    StandardMaterial {
        base_color: Color::WHITE,
        base_color_texture: Some(texture.clone()),
        ..material.clone()
    }
}

/// Gives every mesh under `root` its own material, built from the current one.
pub fn remap_materials(
    root: Entity,
    commands: &mut Commands,
    q_child: &Query<&Children>,
    q_material: &Query<&MeshMaterial3d<StandardMaterial>>,
    materials: &mut Assets<StandardMaterial>,
    remap: impl Fn(&StandardMaterial) -> StandardMaterial,
) {
    for child in q_child.iter_descendants(root) {
        let Ok(handle) = q_material.get(child) else { continue };
        let Some(material) = materials.get(&handle.0) else { continue };
        let material = remap(material);
        commands.entity(child).insert(MeshMaterial3d(materials.add(material)));
    }
}

/// Drives the token's transform and clip from the motion player.
pub struct Rig<'a> {
    pub transform: &'a mut Transform,
    pub request: &'a mut ClipRequest,
}

impl TokenRig for Rig<'_> {
    fn set_position(&mut self, position: Vec3) {
        self.transform.translation = position;
    }

    fn set_facing(&mut self, yaw: f32) {
        self.transform.rotation = Quat::from_rotation_y(yaw);
    }

    fn play_animation(&mut self, clip: Clip, crossfade: Duration) {
        self.request.0 = Some((clip, crossfade));
    }
}

pub fn setup(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    board: Res<BoardConfig>,
    config: Res<ClientConfig>,
    map: Res<Map>,
) {
    let asset = config.token_asset.clone();
    commands.insert_resource(TokenAsset {
        gltf: asset_server.load(asset.clone()),
        texture: config.token_texture.clone().map(|path| asset_server.load(path)),
    });
    commands.spawn((
        Token::new(board.start),
        Motion::default(),
        ClipRequest::default(),
        SceneRoot(asset_server.load(GltfAssetLabel::Scene(0).from_asset(asset))),
        Transform {
            translation: map.convert(board.start),
            scale: Vec3::splat(config.token_scale * map.cell_size()),
            ..default()},
    )).observe(ready);
    info!("token placed on {}", board.start);
}

fn ready(
    trigger: Trigger<SceneInstanceReady>,
    mut commands: Commands,
    mut q_player: Query<&mut AnimationPlayer>,
    q_child: Query<&Children>,
    q_material: Query<&MeshMaterial3d<StandardMaterial>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut graphs: ResMut<Assets<AnimationGraph>>,
    gltfs: Res<Assets<Gltf>>,
    asset: Res<TokenAsset>,
    config: Res<ClientConfig>,
) {
    if let Some(texture) = &asset.texture {
        remap_materials(trigger.target(), &mut commands, &q_child, &q_material, &mut materials, |it| reskin(it, texture));
    }

    let Some(gltf) = gltfs.get(&asset.gltf) else {
        warn!("token scene ready before its glTF, no animations");
        return;
    };
    let clip = |name: &str| {
        let handle = gltf.named_animations.get(name).cloned();
        if handle.is_none() { warn!("token has no clip named {name:?}") }
        handle
    };
    let (Some(idle), Some(walking)) = (clip(&config.idle_clip), clip(&config.walking_clip)) else { return };

    for child in q_child.iter_descendants(trigger.target()) {
        let Ok(mut player) = q_player.get_mut(child) else { continue };
        let (graph, nodes) = AnimationGraph::from_clips([idle.clone(), walking.clone()]);
        let animates = Animates { player: child, idle: nodes[0], walking: nodes[1] };

        let mut transitions = AnimationTransitions::new();
        transitions.play(&mut player, animates.idle, Duration::ZERO).repeat();
        commands.entity(child)
            .insert(AnimationGraphHandle(graphs.add(graph)))
            .insert(transitions);
        commands.entity(trigger.target()).insert(animates);
        debug!("token animations bound to {child}");
        return;
    }
    warn!("token scene has no animation player");
}

pub fn update(
    time: Res<Time>,
    map: Res<Map>,
    pace: Res<Pace>,
    mut query: Query<(&mut Token, &mut Motion, &mut Transform, &mut ClipRequest)>,
) {
    for (mut token, mut motion, mut transform, mut request) in &mut query {
        if !motion.is_moving() { continue }
        let mut rig = Rig { transform: &mut *transform, request: &mut *request };
        if let Step::Arrived(cell) = motion.tick(time.delta(), &map, &pace, &mut rig) {
            token.cell = cell;
            info!("token arrived at {cell}");
        }
    }
}
