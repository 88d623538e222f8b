//! Animator configuration resource.
//!
//! Settings loaded from an INI file. Defaults are safe to run with, so a
//! missing or partial file is never an error for the caller.
//!
//! # Configuration File Format
//!
//! ```ini
//! [animation]
//! time_scale = 1.0
//! max_delta = 0.1
//!
//! [run]
//! frames = 240
//! fixed_delta = 0.016
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::resources::worldtime::WorldTime;

const DEFAULT_TIME_SCALE: f32 = 1.0;
const DEFAULT_MAX_DELTA: f32 = 0.1;
const DEFAULT_FRAMES: u32 = 240;
const DEFAULT_FIXED_DELTA: f32 = 1.0 / 60.0;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct AnimatorConfig {
    /// Multiplier applied to every tick's delta.
    pub time_scale: f32,
    /// Unscaled deltas above this are clamped; `<= 0` disables the clamp.
    pub max_delta: f32,
    /// Number of ticks the headless runner performs.
    pub frames: u32,
    /// Step used by the headless runner, in seconds.
    pub fixed_delta: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimatorConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            time_scale: DEFAULT_TIME_SCALE,
            max_delta: DEFAULT_MAX_DELTA,
            frames: DEFAULT_FRAMES,
            fixed_delta: DEFAULT_FIXED_DELTA,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [animation] section
        if let Some(scale) = config.getfloat("animation", "time_scale").ok().flatten() {
            self.time_scale = scale as f32;
        }
        if let Some(max) = config.getfloat("animation", "max_delta").ok().flatten() {
            self.max_delta = max as f32;
        }

        // [run] section
        if let Some(frames) = config.getuint("run", "frames").ok().flatten() {
            self.frames = frames as u32;
        }
        if let Some(dt) = config.getfloat("run", "fixed_delta").ok().flatten() {
            self.fixed_delta = dt as f32;
        }

        info!(
            "Loaded config: time_scale={}, max_delta={}, frames={}, fixed_delta={}",
            self.time_scale, self.max_delta, self.frames, self.fixed_delta
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("animation", "time_scale", Some(self.time_scale.to_string()));
        config.set("animation", "max_delta", Some(self.max_delta.to_string()));
        config.set("run", "frames", Some(self.frames.to_string()));
        config.set("run", "fixed_delta", Some(self.fixed_delta.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// A [`WorldTime`] carrying this configuration's scale and clamp.
    pub fn world_time(&self) -> WorldTime {
        WorldTime::default()
            .with_time_scale(self.time_scale)
            .with_max_delta(self.max_delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AnimatorConfig::new();
        assert_eq!(config.time_scale, 1.0);
        assert_eq!(config.frames, 240);
        assert_eq!(config.config_path, PathBuf::from("./config.ini"));
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[animation]\ntime_scale = 0.5\n").unwrap();

        let mut config = AnimatorConfig::with_path(file.path());
        config.load_from_file().unwrap();
        assert_eq!(config.time_scale, 0.5);
        assert_eq!(config.max_delta, DEFAULT_MAX_DELTA);
        assert_eq!(config.frames, DEFAULT_FRAMES);
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AnimatorConfig::with_path(dir.path().join("nope.ini"));
        assert!(config.load_from_file().is_err());
        assert_eq!(config.time_scale, DEFAULT_TIME_SCALE);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        let mut config = AnimatorConfig::with_path(&path);
        config.time_scale = 2.0;
        config.frames = 10;
        config.save_to_file().unwrap();

        let mut loaded = AnimatorConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        assert_eq!(loaded.time_scale, 2.0);
        assert_eq!(loaded.frames, 10);
    }

    #[test]
    fn test_world_time_carries_scale() {
        let mut config = AnimatorConfig::new();
        config.time_scale = 0.25;
        let wt = config.world_time();
        assert_eq!(wt.time_scale, 0.25);
        assert_eq!(wt.max_delta, DEFAULT_MAX_DELTA);
    }
}
