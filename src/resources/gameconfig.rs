//! Game configuration resource.
//!
//! Settings are read from an INI file. Missing keys keep the built-in
//! defaults, so a partial file (or no file at all) still yields a playable
//! game.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 960
//! height = 540
//! target_fps = 120
//! vsync = true
//! fullscreen = false
//!
//! [player]
//! speed = 200
//! jump_velocity = -360
//!
//! [physics]
//! gravity = 900
//!
//! [rules]
//! lives = 3
//! total_keys = 3
//! max_throwables = 6
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

const DEFAULT_WINDOW_WIDTH: u32 = 960;
const DEFAULT_WINDOW_HEIGHT: u32 = 540;
const DEFAULT_TARGET_FPS: u32 = 120;
const DEFAULT_VSYNC: bool = true;
const DEFAULT_FULLSCREEN: bool = false;
const DEFAULT_PLAYER_SPEED: f32 = 200.0;
const DEFAULT_JUMP_VELOCITY: f32 = -360.0;
const DEFAULT_GRAVITY: f32 = 900.0;
const DEFAULT_LIVES: u32 = 3;
const DEFAULT_TOTAL_KEYS: u32 = 3;
const DEFAULT_MAX_THROWABLES: u32 = 6;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Tunable settings for the window, the player and the game rules.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    pub window_width: u32,
    pub window_height: u32,
    pub target_fps: u32,
    pub vsync: bool,
    pub fullscreen: bool,
    /// Horizontal walking speed in px/s.
    pub player_speed: f32,
    /// Vertical velocity applied on jump. Negative is up.
    pub jump_velocity: f32,
    /// Downward acceleration in px/s².
    pub gravity: f32,
    pub lives: u32,
    /// Keys needed to unlock the exit door.
    pub total_keys: u32,
    pub max_throwables: u32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            vsync: DEFAULT_VSYNC,
            fullscreen: DEFAULT_FULLSCREEN,
            player_speed: DEFAULT_PLAYER_SPEED,
            jump_velocity: DEFAULT_JUMP_VELOCITY,
            gravity: DEFAULT_GRAVITY,
            lives: DEFAULT_LIVES,
            total_keys: DEFAULT_TOTAL_KEYS,
            max_throwables: DEFAULT_MAX_THROWABLES,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a configuration bound to a custom file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current values.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply_ini(&config);

        info!(
            "Loaded config: {}x{} window, fps={}, vsync={}, fullscreen={}, lives={}, keys={}",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.vsync,
            self.fullscreen,
            self.lives,
            self.total_keys
        );
        Ok(())
    }

    /// Load configuration from INI text instead of a file.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    fn apply_ini(&mut self, config: &Ini) {
        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }
        if let Some(vsync) = config.getbool("window", "vsync").ok().flatten() {
            self.vsync = vsync;
        }
        if let Some(fullscreen) = config.getbool("window", "fullscreen").ok().flatten() {
            self.fullscreen = fullscreen;
        }

        // [player] section
        if let Some(speed) = config.getfloat("player", "speed").ok().flatten() {
            self.player_speed = speed as f32;
        }
        if let Some(jump) = config.getfloat("player", "jump_velocity").ok().flatten() {
            self.jump_velocity = jump as f32;
        }

        // [physics] section
        if let Some(gravity) = config.getfloat("physics", "gravity").ok().flatten() {
            self.gravity = gravity as f32;
        }

        // [rules] section
        if let Some(lives) = config.getuint("rules", "lives").ok().flatten() {
            self.lives = (lives as u32).max(1);
        }
        if let Some(keys) = config.getuint("rules", "total_keys").ok().flatten() {
            self.total_keys = keys as u32;
        }
        if let Some(max) = config.getuint("rules", "max_throwables").ok().flatten() {
            self.max_throwables = max as u32;
        }
    }

    /// Save configuration to the INI file, creating it if needed.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));
        config.set("window", "vsync", Some(self.vsync.to_string()));
        config.set("window", "fullscreen", Some(self.fullscreen.to_string()));

        config.set("player", "speed", Some(self.player_speed.to_string()));
        config.set(
            "player",
            "jump_velocity",
            Some(self.jump_velocity.to_string()),
        );

        config.set("physics", "gravity", Some(self.gravity.to_string()));

        config.set("rules", "lives", Some(self.lives.to_string()));
        config.set("rules", "total_keys", Some(self.total_keys.to_string()));
        config.set(
            "rules",
            "max_throwables",
            Some(self.max_throwables.to_string()),
        );

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);
        Ok(())
    }

    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::new();
        assert_eq!(config.window_size(), (960, 540));
        assert_eq!(config.lives, 3);
        assert_eq!(config.total_keys, 3);
        assert_eq!(config.max_throwables, 6);
        assert_eq!(config.gravity, 900.0);
    }

    #[test]
    fn test_partial_ini_keeps_defaults() {
        let mut config = GameConfig::new();
        config
            .load_from_str("[player]\nspeed = 250\n\n[rules]\nlives = 5\n")
            .unwrap();
        assert_eq!(config.player_speed, 250.0);
        assert_eq!(config.lives, 5);
        assert_eq!(config.jump_velocity, -360.0);
        assert_eq!(config.window_width, 960);
    }

    #[test]
    fn test_zero_lives_clamped() {
        let mut config = GameConfig::new();
        config.load_from_str("[rules]\nlives = 0\n").unwrap();
        assert_eq!(config.lives, 1);
    }

    #[test]
    fn test_missing_file_is_error() {
        let mut config = GameConfig::with_path("/nonexistent/wiskers/config.ini");
        assert!(config.load_from_file().is_err());
        assert_eq!(config.lives, 3);
    }
}
