//! House layout: floor geometry and actor placement.
//!
//! [`LevelLayout`] is plain data. `crate::game::spawn_level` turns it into
//! entities; the platform selector and the fall check read the derived
//! geometry (floor lines, segments, fall threshold) from it.
//!
//! The default layout is the five-floor haunted house. Another layout can be
//! loaded from JSON with [`LevelLayout::load_from_file`].

use bevy_ecs::prelude::*;
use log::info;
use raylib::prelude::{Rectangle, Vector2};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Distance below the lowest floor line at which the player counts as fallen.
pub const FALL_MARGIN: f32 = 150.0;

/// A placement relative to a floor line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spot {
    pub floor: usize,
    pub x: f32,
    /// Pixels above the floor line.
    #[serde(default)]
    pub lift: f32,
}

impl Spot {
    pub const fn new(floor: usize, x: f32, lift: f32) -> Self {
        Self { floor, x, lift }
    }
}

/// One step between two floors that sways sideways.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovingStep {
    /// Gap index: 0 is between the ground floor and the first floor.
    pub gap: usize,
    /// Step index inside the gap, starting at 1.
    pub step: usize,
}

/// Kind of a generated walkable rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentKind {
    Floor(usize),
    Step { gap: usize, step: usize, sway: f32 },
}

/// A walkable rectangle produced by [`LevelLayout::segments`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentSpec {
    pub kind: SegmentKind,
    pub rect: Rectangle,
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelLayout {
    pub level_width: f32,
    pub floors: usize,
    pub floor_height: f32,
    pub slab_thickness: f32,
    /// Width of each floor half, as a fraction of the level width.
    pub segment_ratio: f32,
    pub steps_per_gap: usize,
    pub step_size: (f32, f32),
    pub moving_steps: Vec<MovingStep>,
    pub step_sway: f32,
    pub step_sway_secs: f32,
    pub player_spawn: Spot,
    pub keys: Vec<Spot>,
    pub yarns: Vec<Spot>,
    pub traps: Vec<Spot>,
    pub ghosts: Vec<Spot>,
    pub ghost_patrol: f32,
    pub ghost_patrol_secs: f32,
    pub door: Spot,
}

impl Default for LevelLayout {
    fn default() -> Self {
        Self::house()
    }
}

impl LevelLayout {
    /// The haunted house: five floors, three keys, four balls of yarn.
    pub fn house() -> Self {
        let level_width = 1800.0;
        Self {
            level_width,
            floors: 5,
            floor_height: 200.0,
            slab_thickness: 20.0,
            segment_ratio: 0.38,
            steps_per_gap: 4,
            step_size: (110.0, 22.0),
            moving_steps: vec![
                MovingStep { gap: 1, step: 2 },
                MovingStep { gap: 2, step: 3 },
            ],
            step_sway: 160.0,
            step_sway_secs: 2.0,
            player_spawn: Spot::new(0, 80.0, 50.0),
            keys: vec![
                Spot::new(1, 300.0, 40.0),
                Spot::new(2, 500.0, 100.0),
                Spot::new(3, 50.0, 40.0),
            ],
            yarns: vec![
                Spot::new(0, 400.0, 40.0),
                Spot::new(1, 1400.0, 40.0),
                Spot::new(2, 300.0, 40.0),
                Spot::new(3, 1600.0, 40.0),
            ],
            traps: vec![
                Spot::new(1, 500.0, 10.0),
                Spot::new(2, 300.0, 10.0),
                Spot::new(3, 1250.0, 10.0),
            ],
            ghosts: vec![Spot::new(3, 500.0, 70.0), Spot::new(2, 1149.0, 60.0)],
            ghost_patrol: 100.0,
            ghost_patrol_secs: 2.5,
            door: Spot::new(4, level_width - 60.0, 27.0),
        }
    }

    /// Read a layout from a JSON file. Missing fields take the house values.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read level file {:?}: {}", path, e))?;
        let layout = Self::from_json(&text)?;
        info!(
            "Loaded level {:?}: {} floors, {}px wide",
            path, layout.floors, layout.level_width
        );
        Ok(layout)
    }

    pub fn from_json(text: &str) -> Result<Self, String> {
        let layout: Self =
            serde_json::from_str(text).map_err(|e| format!("Failed to parse level: {}", e))?;
        layout.validate()?;
        Ok(layout)
    }

    fn validate(&self) -> Result<(), String> {
        if self.floors == 0 {
            return Err("level needs at least one floor".to_string());
        }
        let spots = self
            .keys
            .iter()
            .chain(&self.yarns)
            .chain(&self.traps)
            .chain(&self.ghosts)
            .chain([&self.player_spawn, &self.door]);
        for spot in spots {
            if spot.floor >= self.floors {
                return Err(format!(
                    "spot at x={} refers to floor {} of {}",
                    spot.x, spot.floor, self.floors
                ));
            }
        }
        Ok(())
    }

    pub fn world_height(&self) -> f32 {
        self.floors as f32 * self.floor_height
    }

    /// Vertical centre of the slab of `floor`.
    pub fn floor_line(&self, floor: usize) -> f32 {
        self.world_height() - floor as f32 * self.floor_height - self.slab_thickness * 0.5
    }

    /// Walkable top surface of `floor`.
    pub fn floor_top(&self, floor: usize) -> f32 {
        self.floor_line(floor) - self.slab_thickness * 0.5
    }

    /// Room boundary lines, ground floor first.
    pub fn boundaries(&self) -> Vec<f32> {
        (0..self.floors).map(|f| self.floor_line(f)).collect()
    }

    pub fn lowest_floor_y(&self) -> f32 {
        self.floor_line(0)
    }

    pub fn fall_threshold(&self) -> f32 {
        self.lowest_floor_y() + FALL_MARGIN
    }

    pub fn spot_position(&self, spot: &Spot) -> Vector2 {
        Vector2::new(spot.x, self.floor_line(spot.floor) - spot.lift)
    }

    /// Every walkable rectangle of the house, floors first.
    pub fn segments(&self) -> Vec<SegmentSpec> {
        let segment_width = self.level_width * self.segment_ratio;
        let gap_width = self.level_width - 2.0 * segment_width;
        let gap_center = self.level_width * 0.5;
        let mut out = Vec::with_capacity(self.floors * 2 + self.floors * self.steps_per_gap);

        for floor in 0..self.floors {
            let top = self.floor_top(floor);
            for x in [0.0, self.level_width - segment_width] {
                out.push(SegmentSpec {
                    kind: SegmentKind::Floor(floor),
                    rect: Rectangle::new(x, top, segment_width, self.slab_thickness),
                });
            }
        }

        let (step_w, step_h) = self.step_size;
        for gap in 0..self.floors.saturating_sub(1) {
            let start_y = self.floor_line(gap) - 2.0;
            let end_y = self.floor_line(gap + 1) + 10.0;
            for step in 1..=self.steps_per_gap {
                let t = step as f32 / (self.steps_per_gap + 1) as f32;
                let bottom = start_y + (end_y - start_y) * t;
                let dir = if step % 2 == 0 { 1.0 } else { -1.0 };
                let center_x = gap_center + dir * gap_width * 0.2;
                let moving = self
                    .moving_steps
                    .iter()
                    .any(|m| m.gap == gap && m.step == step);
                out.push(SegmentSpec {
                    kind: SegmentKind::Step {
                        gap,
                        step,
                        sway: if moving { dir * self.step_sway } else { 0.0 },
                    },
                    rect: Rectangle::new(center_x - step_w * 0.5, bottom - step_h, step_w, step_h),
                });
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-3;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_house_geometry() {
        let layout = LevelLayout::house();
        assert!(approx_eq(layout.world_height(), 1000.0));
        assert!(approx_eq(layout.floor_line(0), 990.0));
        assert!(approx_eq(layout.floor_line(4), 190.0));
        assert!(approx_eq(layout.floor_top(0), 980.0));
        assert!(approx_eq(layout.fall_threshold(), 1140.0));
        assert_eq!(layout.boundaries().len(), 5);
    }

    #[test]
    fn test_house_segments() {
        let layout = LevelLayout::house();
        let segments = layout.segments();
        // two halves per floor plus four steps per gap
        assert_eq!(segments.len(), 5 * 2 + 4 * 4);

        let left = segments[0].rect;
        assert!(approx_eq(left.x, 0.0));
        assert!(approx_eq(left.width, 684.0));
        let right = segments[1].rect;
        assert!(approx_eq(right.x, 1116.0));

        let moving: Vec<_> = segments
            .iter()
            .filter(|s| matches!(s.kind, SegmentKind::Step { sway, .. } if sway != 0.0))
            .collect();
        assert_eq!(moving.len(), 2);
    }

    #[test]
    fn test_steps_climb_between_floors() {
        let layout = LevelLayout::house();
        let steps: Vec<_> = layout
            .segments()
            .into_iter()
            .filter(|s| matches!(s.kind, SegmentKind::Step { gap: 0, .. }))
            .collect();
        assert_eq!(steps.len(), 4);
        for pair in steps.windows(2) {
            assert!(pair[1].rect.y < pair[0].rect.y);
        }
        // first step sits just above the ground floor line
        assert!(approx_eq(steps[0].rect.y + 22.0, 988.0 + (200.0 - 12.0) * -0.2));
    }

    #[test]
    fn test_json_overrides_and_defaults() {
        let layout = LevelLayout::from_json(r#"{ "level_width": 2400.0, "ghost_patrol": 50.0 }"#).unwrap();
        assert!(approx_eq(layout.level_width, 2400.0));
        assert!(approx_eq(layout.ghost_patrol, 50.0));
        assert_eq!(layout.floors, 5);
        assert_eq!(layout.keys.len(), 3);
    }

    #[test]
    fn test_json_rejects_spot_outside_house() {
        let err = LevelLayout::from_json(r#"{ "floors": 2 }"#).unwrap_err();
        assert!(err.contains("floor"));
    }

    #[test]
    fn test_json_rejects_garbage() {
        assert!(LevelLayout::from_json("not json").is_err());
    }
}
