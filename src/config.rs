//! Configuration file loading with environment variable overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Config {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Image synthesis settings.
    #[serde(default)]
    pub canvas: CanvasConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 8000 }
    }
}

/// Immutable synthesis constants, passed to the synthesizer at construction.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Canvas edge length in pixels (the canvas is square).
    pub image_size: u32,
    /// Edge length of the bounding square of each random shape.
    pub shape_size: u32,
    /// Edge length of the black corner markers.
    pub corner_square_size: u32,
    /// Half-length of each crosshair bar.
    pub crosshair_length: u32,
    /// Thickness of each crosshair bar.
    pub crosshair_thickness: u32,
    /// Caption font size in pixels.
    pub font_size: f32,
    /// Gap between the canvas top edge and the caption.
    pub caption_margin: u32,
    /// Preferred TrueType font file. Falls back to the candidate list,
    /// then to the built-in bitmap font.
    pub font_path: Option<PathBuf>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            image_size: 1000,
            shape_size: 25,
            corner_square_size: 10,
            crosshair_length: 50,
            crosshair_thickness: 6,
            font_size: 200.0,
            caption_margin: 20,
            font_path: None,
        }
    }
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed, or if the
    /// canvas settings are unusable.
    pub fn load(path: &Path) -> Result<Self, String> {
        let config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
            toml::from_str(&contents)
                .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?
        } else {
            Self::default()
        };
        config.canvas.validate()?;
        Ok(config)
    }
}

impl CanvasConfig {
    /// Reject settings for which shape placement has no valid position.
    fn validate(&self) -> Result<(), String> {
        if self.shape_size >= self.image_size {
            return Err(format!(
                "shape_size ({}) must be smaller than image_size ({})",
                self.shape_size, self.image_size
            ));
        }
        Ok(())
    }
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `MOCKIMG_CONFIG` environment variable
/// 3. `~/.config/mockimg/config.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(p) = explicit {
        return PathBuf::from(p);
    }

    if let Ok(p) = std::env::var("MOCKIMG_CONFIG") {
        return PathBuf::from(p);
    }

    default_config_path()
}

/// Default config path: `~/.config/mockimg/config.toml`.
fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config/mockimg/config.toml")
    } else {
        PathBuf::from("mockimg.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.canvas.image_size, 1000);
        assert_eq!(config.canvas.shape_size, 25);
        assert_eq!(config.canvas.corner_square_size, 10);
        assert_eq!(config.canvas.crosshair_length, 50);
        assert_eq!(config.canvas.crosshair_thickness, 6);
        assert_eq!(config.canvas.caption_margin, 20);
        assert!(config.canvas.font_path.is_none());
    }

    #[test]
    fn load_nonexistent_returns_defaults() {
        let config = Config::load(Path::new("/nonexistent/path/config.toml")).unwrap();
        assert_eq!(config.canvas.image_size, 1000);
    }

    #[test]
    fn load_valid_toml() {
        let dir = std::env::temp_dir().join("mockimg_config_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(
            &path,
            r#"
[server]
host = "0.0.0.0"
port = 9000

[canvas]
image_size = 512
shape_size = 16
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.canvas.image_size, 512);
        assert_eq!(config.canvas.shape_size, 16);
        // Unset fields keep their defaults
        assert_eq!(config.canvas.corner_square_size, 10);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_invalid_toml() {
        let dir = std::env::temp_dir().join("mockimg_config_bad_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.toml");
        std::fs::write(&path, "this is not valid toml {{{").unwrap();

        assert!(Config::load(&path).is_err());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_rejects_oversized_shape() {
        let dir = std::env::temp_dir().join("mockimg_config_shape_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "[canvas]\nimage_size = 100\nshape_size = 100\n").unwrap();

        assert!(Config::load(&path).is_err());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn discover_explicit_path() {
        let path = discover_config_path(Some("/tmp/my-config.toml"));
        assert_eq!(path, PathBuf::from("/tmp/my-config.toml"));
    }
}
