use bevy::prelude::*;

use crate::simulation::{MoveIntent, TickInput};

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<KeyBindings>()
            .init_resource::<PlayerIntent>()
            .add_systems(PreUpdate, read_player_intent);
    }
}

#[derive(Resource, Debug, Clone)]
pub struct KeyBindings {
    pub move_up: KeyCode,
    pub move_down: KeyCode,
    pub move_left: KeyCode,
    pub move_right: KeyCode,
    pub interact: KeyCode,
    pub dump_snapshot: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_up: KeyCode::KeyW,
            move_down: KeyCode::KeyS,
            move_left: KeyCode::KeyA,
            move_right: KeyCode::KeyD,
            interact: KeyCode::Space,
            dump_snapshot: KeyCode::F12,
        }
    }
}

/// The abstract intents the simulation consumes, refreshed every frame.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct PlayerIntent {
    pub move_intent: MoveIntent,
    pub interact: bool,
    pub dump_snapshot: bool,
}

impl PlayerIntent {
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            move_intent: self.move_intent,
            interact: self.interact,
        }
    }
}

/// The single point where hardware input becomes simulation intents.
fn read_player_intent(
    keys: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    mut intent: ResMut<PlayerIntent>,
) {
    let held = |primary: KeyCode, arrow: KeyCode| keys.pressed(primary) || keys.pressed(arrow);

    // Screen space: down is +y.
    let dx = held(bindings.move_right, KeyCode::ArrowRight) as i8
        - held(bindings.move_left, KeyCode::ArrowLeft) as i8;
    let dy = held(bindings.move_down, KeyCode::ArrowDown) as i8
        - held(bindings.move_up, KeyCode::ArrowUp) as i8;

    *intent = PlayerIntent {
        move_intent: MoveIntent::new(dx, dy),
        // Held, not just-pressed: holding interact repeats the action every tick.
        interact: keys.pressed(bindings.interact),
        dump_snapshot: keys.just_pressed(bindings.dump_snapshot),
    };
}
