//! Demo settings
//!
//! Read once at startup from a JSON file. Missing or broken files fall back to
//! defaults so the demo always starts.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Environment variable naming an alternative settings file
pub const SETTINGS_ENV: &str = "BOUNCE_SHAKE_SETTINGS";
/// Settings file looked up in the working directory
pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

/// Trigger parameters for one shake effect
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShakeParams {
    /// Peak offset in pixels
    pub intensity: f32,
    /// Seconds until the effect settles
    pub duration: f32,
}

/// Window and effect settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Window ===
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// Frame rate cap
    pub target_fps: u32,

    // === Content ===
    /// PNG with an alpha channel; only opaque pixels collide
    pub sprite_path: PathBuf,
    /// Centered banner, lines separated by `\n`
    pub message: String,
    pub font_size: u32,
    /// Show FPS counter
    pub show_fps: bool,

    // === Effects ===
    pub camera_shake: bool,
    pub window_shake: bool,
    pub camera_shake_params: ShakeParams,
    pub window_shake_params: ShakeParams,

    // === Accessibility ===
    /// Reduced motion (disables both shakes)
    pub reduced_motion: bool,

    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            title: WINDOW_TITLE.to_string(),
            target_fps: TARGET_FPS,

            sprite_path: PathBuf::from(SPRITE_PATH),
            message: MESSAGE.to_string(),
            font_size: MESSAGE_FONT_SIZE,
            show_fps: true,

            camera_shake: true,
            window_shake: true,
            camera_shake_params: ShakeParams {
                intensity: CAMERA_SHAKE_INTENSITY,
                duration: CAMERA_SHAKE_DURATION,
            },
            window_shake_params: ShakeParams {
                intensity: WINDOW_SHAKE_INTENSITY,
                duration: WINDOW_SHAKE_DURATION,
            },

            reduced_motion: false,
            seed: None,
        }
    }
}

impl Settings {
    /// Effective camera shake (respects reduced_motion)
    pub fn effective_camera_shake(&self) -> bool {
        self.camera_shake && !self.reduced_motion
    }

    /// Effective window shake (respects reduced_motion)
    pub fn effective_window_shake(&self) -> bool {
        self.window_shake && !self.reduced_motion
    }

    /// Parse settings from JSON, then sanitize
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }

    /// Settings file location: `$BOUNCE_SHAKE_SETTINGS` or `./settings.json`
    pub fn path() -> PathBuf {
        std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE))
    }

    /// Load settings from the default location
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                return Self::default();
            }
            Err(e) => {
                log::warn!("Could not read {}: {}; using defaults", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!(
                    "Invalid settings in {}: {}; using defaults",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Replace values the demo cannot run with by their defaults
    fn sanitize(&mut self) {
        let defaults = Self::default();
        if self.width == 0 || self.height == 0 {
            log::warn!("Window size {}x{} rejected", self.width, self.height);
            self.width = defaults.width;
            self.height = defaults.height;
        }
        if self.target_fps == 0 {
            log::warn!("target_fps 0 rejected");
            self.target_fps = defaults.target_fps;
        }
        if self.font_size == 0 {
            self.font_size = defaults.font_size;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_demo() {
        let settings = Settings::default();
        assert_eq!((settings.width, settings.height), (800, 450));
        assert_eq!(settings.target_fps, 240);
        assert_eq!(settings.camera_shake_params.intensity, 35.0);
        assert_eq!(settings.camera_shake_params.duration, 0.45);
        assert_eq!(settings.window_shake_params.intensity, 25.0);
        assert_eq!(settings.window_shake_params.duration, 0.4);
        assert!(settings.effective_camera_shake());
        assert!(settings.effective_window_shake());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "target_fps": 60, "seed": 42 }"#).unwrap();
        assert_eq!(settings.target_fps, 60);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.width, 800);
        assert_eq!(settings.message, MESSAGE);
    }

    #[test]
    fn test_reduced_motion_disables_shakes() {
        let settings = Settings::from_json(r#"{ "reduced_motion": true }"#).unwrap();
        assert!(!settings.effective_camera_shake());
        assert!(!settings.effective_window_shake());
    }

    #[test]
    fn test_invalid_values_sanitized() {
        let settings =
            Settings::from_json(r#"{ "width": 0, "height": 300, "target_fps": 0 }"#).unwrap();
        assert_eq!((settings.width, settings.height), (800, 450));
        assert_eq!(settings.target_fps, 240);
    }

    #[test]
    fn test_bad_json_is_error() {
        assert!(Settings::from_json("{ width: ").is_err());
    }

    #[test]
    fn test_unparsable_file_gives_defaults() {
        let path = std::env::temp_dir()
            .join(format!("bounce-shake-settings-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "width": "#).unwrap();
        let settings = Settings::load_from(&path);
        let _ = std::fs::remove_file(&path);

        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_env_var_overrides_path() {
        // SAFETY: no other test reads or writes this variable
        unsafe { std::env::set_var(SETTINGS_ENV, "/tmp/custom-shake.json") };
        let overridden = Settings::path();
        unsafe { std::env::remove_var(SETTINGS_ENV) };

        assert_eq!(overridden, PathBuf::from("/tmp/custom-shake.json"));
        assert_eq!(Settings::path(), PathBuf::from(DEFAULT_SETTINGS_FILE));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let settings = Settings::load_from(Path::new("definitely/not/here/settings.json"));
        assert_eq!(settings, Settings::default());
    }
}
