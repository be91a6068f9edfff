//! Render host — draws the latest snapshot as flat coloured rectangles and a
//! small text HUD. No image assets are loaded.

use bevy::prelude::*;

use crate::economy::format_money;
use crate::farming::{CropField, GrowthStage};
use crate::host::{GameState, LatestSnapshot, SimEventMessage, SimulationRes};
use crate::shared::*;

const Z_FIELD: f32 = 0.0;
const Z_ZONE: f32 = 1.0;
const Z_CROP: f32 = 2.0;
const Z_AGENT: f32 = 3.0;

#[derive(Component)]
pub struct FarmerSprite;

/// Index of the crop this sprite mirrors in the snapshot's crop list.
#[derive(Component, Debug, Clone, Copy)]
pub struct CropSprite(pub usize);

/// One line of the status HUD.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudLine {
    Money,
    Seeds,
    Crops,
}

#[derive(Component)]
pub struct HudMessageText;

pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::srgb_u8(139, 69, 19)))
            .add_systems(Startup, setup_camera)
            .add_systems(OnEnter(GameState::Playing), (spawn_scene, spawn_hud))
            .add_systems(
                PostUpdate,
                (sync_farmer_sprite, sync_crop_sprites, update_hud, show_last_message)
                    .run_if(in_state(GameState::Playing)),
            );
    }
}

/// Convert a screen-space rectangle (top-left origin, y down) to the centre
/// translation of a Bevy sprite (centre origin, y up).
pub fn screen_rect_to_world(bounds: &Bounds, z: f32) -> Vec3 {
    let c = bounds.center();
    Vec3::new(c.x - SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0 - c.y, z)
}

/// "Crops: 1 ready, 2 growing"
pub fn crop_summary(field: &CropField) -> String {
    format!(
        "Crops: {} ready, {} growing",
        field.ready_count(),
        field.growing_count()
    )
}

pub fn crop_stage_color(stage: GrowthStage) -> Color {
    match stage {
        GrowthStage::Seed => Color::srgb(0.45, 0.30, 0.15),
        GrowthStage::Growing => Color::srgb(0.45, 0.75, 0.30),
        GrowthStage::Ready => Color::srgb(0.95, 0.75, 0.15),
    }
}

fn rect_sprite(bounds: &Bounds, color: Color, z: f32) -> (Sprite, Transform) {
    (
        Sprite {
            color,
            custom_size: Some(bounds.size()),
            ..default()
        },
        Transform::from_translation(screen_rect_to_world(bounds, z)),
    )
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

fn spawn_scene(mut commands: Commands, sim: Res<SimulationRes>) {
    let sim = &sim.0;
    commands.spawn(rect_sprite(
        &sim.field().bounds(),
        Color::srgb(0.36, 0.55, 0.25),
        Z_FIELD,
    ));
    commands.spawn(rect_sprite(
        &sim.shop().bounds,
        Color::srgb(0.25, 0.45, 0.85),
        Z_ZONE,
    ));
    commands.spawn(rect_sprite(
        &sim.tax_office().bounds,
        Color::srgb(0.70, 0.70, 0.72),
        Z_ZONE,
    ));
    commands.spawn((
        FarmerSprite,
        rect_sprite(&sim.agent().bounds(), Color::srgb(0.90, 0.35, 0.30), Z_AGENT),
    ));
}

fn sync_farmer_sprite(
    latest: Res<LatestSnapshot>,
    mut query: Query<&mut Transform, With<FarmerSprite>>,
) {
    if !latest.is_changed() {
        return;
    }
    let snap = &latest.0;
    let bounds = Bounds::from_center(Vec2::new(snap.agent_x, snap.agent_y), Vec2::splat(AGENT_SIZE));
    for mut transform in &mut query {
        transform.translation = screen_rect_to_world(&bounds, Z_AGENT);
    }
}

/// Keep one sprite per crop. Harvests keep the count constant, so sprites are
/// only respawned when the count changes; otherwise they are moved and recoloured.
fn sync_crop_sprites(
    mut commands: Commands,
    latest: Res<LatestSnapshot>,
    mut query: Query<(Entity, &CropSprite, &mut Transform, &mut Sprite)>,
) {
    if !latest.is_changed() {
        return;
    }
    let crops = &latest.0.crops;

    if query.iter().count() != crops.len() {
        for (entity, ..) in &query {
            commands.entity(entity).despawn();
        }
        for (i, crop) in crops.iter().enumerate() {
            let bounds = Bounds::new(crop.x, crop.y, CROP_SIZE, CROP_SIZE);
            commands.spawn((
                CropSprite(i),
                rect_sprite(&bounds, crop_stage_color(crop.stage), Z_CROP),
            ));
        }
        return;
    }

    for (_, CropSprite(i), mut transform, mut sprite) in &mut query {
        let Some(crop) = crops.get(*i) else {
            continue;
        };
        let bounds = Bounds::new(crop.x, crop.y, CROP_SIZE, CROP_SIZE);
        transform.translation = screen_rect_to_world(&bounds, Z_CROP);
        sprite.color = crop_stage_color(crop.stage);
    }
}

fn hud_text(commands: &mut Commands, marker: impl Component, text: &str, top: f32, size: f32) {
    commands.spawn((
        marker,
        Text::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(10.0),
            top: Val::Px(top),
            ..default()
        },
    ));
}

fn spawn_hud(mut commands: Commands) {
    hud_text(&mut commands, HudLine::Money, "", 120.0, 28.0);
    hud_text(&mut commands, HudLine::Seeds, "", 150.0, 28.0);
    hud_text(&mut commands, HudLine::Crops, "", 180.0, 20.0);
    hud_text(&mut commands, HudMessageText, "", SCREEN_HEIGHT - 36.0, 20.0);
}

fn update_hud(
    latest: Res<LatestSnapshot>,
    sim: Res<SimulationRes>,
    mut lines: Query<(&HudLine, &mut Text)>,
) {
    if !latest.is_changed() {
        return;
    }
    for (line, mut text) in &mut lines {
        **text = match line {
            HudLine::Money => format!("Money: {}", format_money(latest.0.money)),
            HudLine::Seeds => format!("Seeds: {}", latest.0.seeds),
            HudLine::Crops => crop_summary(sim.0.field()),
        };
    }
}

/// Show the most recent noteworthy outcome at the bottom of the screen.
fn show_last_message(
    mut events: EventReader<SimEventMessage>,
    mut query: Query<&mut Text, With<HudMessageText>>,
) {
    let Some(SimEventMessage(ev)) = events
        .read()
        .filter(|m| !matches!(m.0, SimEvent::NoTarget | SimEvent::NotReady))
        .last()
    else {
        return;
    };
    for mut text in &mut query {
        **text = ev.to_string();
    }
}
