use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use harvest_tax::host::SimulationPlugin;
use harvest_tax::input::InputPlugin;
use harvest_tax::render::RenderPlugin;
use harvest_tax::shared::{SCREEN_HEIGHT, SCREEN_WIDTH};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Harvest and Tax Game".into(),
                resolution: WindowResolution::new(SCREEN_WIDTH, SCREEN_HEIGHT),
                present_mode: PresentMode::AutoVsync,
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(InputPlugin)
        .add_plugins(SimulationPlugin)
        .add_plugins(RenderPlugin)
        .run();
}
