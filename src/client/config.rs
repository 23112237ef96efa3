use bevy::prelude::*;

/// Presentation and input settings for the board client
#[derive(Clone, Debug, Resource)]
pub struct ClientConfig {
    /// Hold while dragging to drop anchors on each cell passed (default: Space)
    pub anchor_key: KeyCode,
    /// glTF model used for the token
    pub token_asset: String,
    /// Image applied to every mesh of the token model in place of its own textures
    pub token_texture: Option<String>,
    /// Name of the clip played at rest
    pub idle_clip: String,
    /// Name of the clip played while moving
    pub walking_clip: String,
    /// Token scale relative to one cell
    pub token_scale: f32,
    /// Image stretched under the grid
    pub map_texture: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            anchor_key: KeyCode::Space,
            token_asset: "vtt/Barbarian.glb".to_owned(),
            token_texture: Some("vtt/barbarian_texture.png".to_owned()),
            idle_clip: "Idle".to_owned(),
            walking_clip: "Walking_A".to_owned(),
            token_scale: 0.5,
            map_texture: "map.jpeg".to_owned(),
        }
    }
}
