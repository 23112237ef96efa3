mod common;
mod client;

use bevy::{
    log::LogPlugin,
    prelude::*,
};

use common::{
    config::BoardConfig,
    resources::map::Map,
    systems::movement::Pace,
};
use client::{
    config::ClientConfig,
    resources::{drag::DragController, preview::Preview},
    systems::{actor, animator, camera, input, overlay, world},
};

fn setup(
    mut config_store: ResMut<GizmoConfigStore>,
) {
    let (config, _) = config_store.config_mut::<DefaultGizmoConfigGroup>();
    config.line.width = 3.;
    config.depth_bias = -1.;
}

fn main() {
    let board = BoardConfig::default();

    let mut app = App::new();
    app.add_plugins(DefaultPlugins
        .set(LogPlugin {
            level: bevy::log::Level::TRACE,
            filter:  "wgpu=error,naga=warn,polling=warn,winit=warn,offset_allocator=warn,gilrs=warn,".to_owned()
                    +"bevy=warn,cosmic_text=warn,client=debug,"
                    ,
            ..default()
        }));

    let pace = match Pace::try_from(&board) {
        Ok(pace) => pace,
        Err(err) => {
            error!("invalid board config: {err}");
            return;
        }
    };

    app.insert_resource(Map::from(&board));
    app.insert_resource(pace);
    app.insert_resource(board);
    app.init_resource::<ClientConfig>();
    app.init_resource::<DragController>();
    app.init_resource::<Preview>();

    app.add_systems(Startup, (
        setup,
        actor::setup,
        camera::setup,
        overlay::setup,
        world::setup,
    ));

    app.add_systems(Update, (
        input::anchor_key.before(input::pointer),
        input::pointer,
        camera::zoom,
        actor::update.after(input::pointer),
        animator::update.after(actor::update),
        camera::update.after(actor::update),
        overlay::tick_flash.after(input::pointer),
        overlay::draw.after(overlay::tick_flash),
        overlay::sync_ghost.after(input::pointer),
        overlay::sync_tiles.after(input::pointer),
        world::report_failures,
    ));

    app.run();
}
