use bevy_ecs::prelude::*;
use raylib::ffi;
use raylib::prelude::*;
use std::ffi::CString;

use crate::components::boxcollider::BoxCollider;
use crate::components::enemy::Enemy;
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::components::rotation::Rotation;
use crate::components::scale::Scale;
use crate::components::sprite::Sprite;
use crate::components::tint::Tint;
use crate::components::zindex::ZIndex;
use crate::resources::camera2d::Camera2DRes;
use crate::resources::debugmode::DebugMode;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gameplay::Gameplay;
use crate::resources::gamestate::{GameState, GameStates};
use crate::resources::hud::HudMessage;
use crate::resources::life::Life;
use crate::resources::platformselector::PlatformSelector;

const BACKGROUND: Color = Color::new(0x1b, 0x1b, 0x2f, 0xff);
const HUD_FONT: i32 = 20;
const MESSAGE_FONT: i32 = 28;

/// One frame ready to draw, in world space.
#[derive(Debug, Clone, Copy)]
struct Drawable {
    rect: Rectangle,
    origin: Vector2,
    rotation: f32,
    color: Color,
    z: i32,
    /// Facing of a player frame, drawn as a small marker.
    facing: Option<f32>,
}

/// Destination rectangle and pivot of a frame at `pos`, after scaling.
pub fn frame_rect(pos: Vector2, sprite: &Sprite, scale: Vector2) -> (Rectangle, Vector2) {
    let rect = Rectangle {
        x: pos.x,
        y: pos.y,
        width: sprite.width * scale.x,
        height: sprite.height * scale.y,
    };
    let origin = Vector2 {
        x: sprite.origin.x * scale.x,
        y: sprite.origin.y * scale.y,
    };
    (rect, origin)
}

/// The three HUD counters, top-left to bottom.
pub fn hud_lines(gameplay: &Gameplay, life: &Life) -> [String; 3] {
    [
        format!("Keys: {}/{}", gameplay.keys_collected, gameplay.total_keys),
        format!("Yarn: {}", gameplay.throwables),
        format!("Lives: {}", life.health),
    ]
}

fn text_width(text: &str, size: i32) -> i32 {
    CString::new(text)
        .map(|c| unsafe { ffi::MeasureText(c.as_ptr(), size) })
        .unwrap_or(0)
}

fn draw_centered_text(d: &mut RaylibDrawHandle, text: &str, y: i32, size: i32, color: Color) {
    let w = d.get_screen_width();
    let x = (w - text_width(text, size)) / 2;
    d.draw_text(text, x, y, size, color);
}

/// Draw the whole frame: world, HUD, ending screen and debug overlay.
pub fn render_system(world: &mut World) {
    let Some(mut rl) = world.remove_non_send_resource::<RaylibHandle>() else {
        return;
    };
    let Some(thread) = world.remove_non_send_resource::<RaylibThread>() else {
        world.insert_non_send_resource(rl);
        return;
    };

    {
        let mut d = rl.begin_drawing(&thread);
        d.clear_background(BACKGROUND);

        if world.contains_resource::<Camera2DRes>() {
            let cam = world.resource::<Camera2DRes>().0;
            let mut d2 = d.begin_mode2D(cam);
            render_pass(world, &mut d2);
        }

        let state = world
            .get_resource::<GameState>()
            .map(|s| s.get().clone())
            .unwrap_or_default();
        match state {
            GameStates::Playing => render_hud(world, &mut d),
            GameStates::Ending => render_ending(world, &mut d),
            _ => {}
        }
        render_debug_ui(world, &mut d);
    }

    world.insert_non_send_resource(thread);
    world.insert_non_send_resource(rl);
}

/// Draw every frame in camera space, lowest [`ZIndex`] first.
pub fn render_pass(world: &mut World, d2: &mut RaylibMode2D<RaylibDrawHandle>) {
    let mut to_draw: Vec<Drawable> = {
        let mut q = world.query::<(
            &Sprite,
            &MapPosition,
            Option<&Scale>,
            Option<&Rotation>,
            Option<&Tint>,
            Option<&ZIndex>,
            Option<&Player>,
        )>();
        q.iter(world)
            .map(|(sprite, pos, scale, rotation, tint, z, player)| {
                let (rect, origin) =
                    frame_rect(pos.pos, sprite, scale.map_or(Vector2::one(), |s| s.scale));
                Drawable {
                    rect,
                    origin,
                    rotation: rotation.map_or(0.0, |r| r.degrees),
                    color: tint.map_or(Color::WHITE, |t| t.color),
                    z: z.map_or(0, |z| z.0),
                    facing: player.map(|p| p.facing),
                }
            })
            .collect()
    };
    to_draw.sort_by_key(|item| item.z);

    for item in to_draw.iter() {
        d2.draw_rectangle_pro(item.rect, item.origin, item.rotation, item.color);
        if let Some(facing) = item.facing {
            // eye on the facing side
            let eye_x = item.rect.x - item.origin.x + item.rect.width * (0.5 + 0.3 * facing);
            let eye_y = item.rect.y - item.origin.y + item.rect.height * 0.25;
            d2.draw_circle(eye_x as i32, eye_y as i32, 3.0, Color::BLACK);
        }
    }

    if !world.contains_resource::<DebugMode>() {
        return;
    }

    let bound = world
        .get_resource::<PlatformSelector>()
        .and_then(|s| s.bound_segment());
    let mut colliders = world.query::<(Entity, &BoxCollider, &MapPosition)>();
    for (entity, collider, position) in colliders.iter(world) {
        let color = if bound == Some(entity) {
            Color::YELLOW
        } else if collider.enabled {
            Color::RED
        } else {
            Color::GRAY
        };
        d2.draw_rectangle_lines_ex(collider.rect(position.pos), 1.0, color);
    }

    let mut players = world.query_filtered::<(&BoxCollider, &MapPosition), With<Player>>();
    for (collider, position) in players.iter(world) {
        let foot = collider.bottom_center(position.pos);
        d2.draw_line(
            foot.x as i32 - 5,
            foot.y as i32,
            foot.x as i32 + 5,
            foot.y as i32,
            Color::GREEN,
        );
        d2.draw_line(
            foot.x as i32,
            foot.y as i32 - 5,
            foot.x as i32,
            foot.y as i32 + 5,
            Color::GREEN,
        );
    }

    let mut enemies = world.query::<(&Enemy, &MapPosition)>();
    for (enemy, position) in enemies.iter(world) {
        if enemy.alive {
            let color = if enemy.is_attacking() {
                Color::ORANGE
            } else {
                Color::SKYBLUE
            };
            d2.draw_circle_lines(
                position.pos.x as i32,
                position.pos.y as i32,
                enemy.attack_radius,
                color,
            );
        }
    }
}

/// Counters in the corner and the transient message in the centre.
pub fn render_hud(world: &mut World, d: &mut RaylibDrawHandle) {
    if let (Some(gameplay), Some(life)) =
        (world.get_resource::<Gameplay>(), world.get_resource::<Life>())
    {
        for (i, line) in hud_lines(gameplay, life).iter().enumerate() {
            d.draw_text(line, 12, 12 + i as i32 * (HUD_FONT + 6), HUD_FONT, Color::RAYWHITE);
        }
    }

    if let Some(text) = world.get_resource::<HudMessage>().and_then(|h| h.text()) {
        let y = d.get_screen_height() / 2 - MESSAGE_FONT;
        draw_centered_text(d, text, y, MESSAGE_FONT, Color::GOLD);
    }
}

pub fn render_ending(world: &mut World, d: &mut RaylibDrawHandle) {
    let h = d.get_screen_height();
    draw_centered_text(d, "You escaped the haunted house!", h / 2 - 60, 36, Color::GOLD);
    if let Some(gameplay) = world.get_resource::<Gameplay>() {
        let summary = format!(
            "Keys {}/{}   Yarn left {}",
            gameplay.keys_collected, gameplay.total_keys, gameplay.throwables
        );
        draw_centered_text(d, &summary, h / 2, HUD_FONT, Color::RAYWHITE);
    }
    draw_centered_text(d, "Press E or ESC to go back", h / 2 + 40, HUD_FONT, Color::LIGHTGRAY);
}

pub fn render_debug_ui(world: &mut World, d: &mut RaylibDrawHandle) {
    if !world.contains_resource::<DebugMode>() {
        return;
    }
    let screen_h = world
        .get_resource::<GameConfig>()
        .map_or(d.get_screen_height(), |c| c.window_height as i32);

    let fps = d.get_fps();
    let text = format!("DEBUG MODE (press F11 to toggle) | FPS: {}", fps);
    d.draw_text(&text, 10, screen_h - 70, 10, Color::LIME);

    let entity_count = world.iter_entities().count();
    let state = world
        .get_resource::<GameState>()
        .map(|s| format!("{:?}", s.get()))
        .unwrap_or_default();
    let text = format!("Entities: {} | State: {}", entity_count, state);
    d.draw_text(&text, 10, screen_h - 55, 10, Color::LIME);

    if let Some(selector) = world.get_resource::<PlatformSelector>() {
        let text = format!(
            "Binding: {:?} | Rebinds: {}",
            selector.bound_segment(),
            selector.rebinds
        );
        d.draw_text(&text, 10, screen_h - 40, 10, Color::LIME);
    }

    if let Some(cam) = world.get_resource::<Camera2DRes>() {
        let cam_text = format!(
            "Camera pos: ({:.1}, {:.1}) Zoom: {:.2}",
            cam.0.target.x, cam.0.target.y, cam.0.zoom
        );
        d.draw_text(&cam_text, 10, screen_h - 25, 10, Color::LIME);
    }
}
