//! Renderer configuration and color palette.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::frame::DEFAULT_SAMPLE_CAPACITY;

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

/// Colors used by the render modes. Serialized as `#rrggbb` strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Waveform-SDF line and glow.
    #[serde(with = "hex_color")]
    pub line_hue: [f32; 3],
    /// Waveform line-strip color.
    #[serde(with = "hex_color")]
    pub strip_color: [f32; 3],
    #[serde(with = "hex_color")]
    pub column_hue: [f32; 3],
    /// Dark base the column glow is added on top of.
    #[serde(with = "hex_color")]
    pub column_background: [f32; 3],
    #[serde(with = "hex_color")]
    pub noise_dark: [f32; 3],
    #[serde(with = "hex_color")]
    pub noise_mid: [f32; 3],
    /// Calm hue reached at full awareness.
    #[serde(with = "hex_color")]
    pub noise_bright: [f32; 3],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            line_hue: [0.2, 1.0, 0.6],
            strip_color: [0.2, 1.0, 0.6],
            column_hue: [0.3, 0.7, 1.0],
            column_background: [0.01, 0.01, 0.03],
            noise_dark: [0.02, 0.0, 0.08],
            noise_mid: [0.35, 0.1, 0.55],
            noise_bright: [0.85, 0.92, 1.0],
        }
    }
}

/// Configuration shared by the GPU and software renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    pub width: u32,
    pub height: u32,
    /// Initial waveform buffer capacity in samples; grows on demand.
    pub sample_capacity: usize,
    /// Initial unit buffer capacity in records; grows on demand.
    pub unit_capacity: usize,
    #[serde(with = "hex_color")]
    pub background: [f32; 3],
    pub palette: Palette,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            sample_capacity: DEFAULT_SAMPLE_CAPACITY,
            unit_capacity: 256,
            background: [0.0, 0.0, 0.0],
            palette: Palette::default(),
        }
    }
}

impl RendererConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Parse hex color to RGB floats (accepts 6-char RGB or 8-char RGBA, alpha is ignored).
pub fn parse_hex_color(hex: &str) -> Option<[f32; 3]> {
    let hex = hex.trim_start_matches('#');
    if (hex.len() != 6 && hex.len() != 8) || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()? as f32 / 255.0;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()? as f32 / 255.0;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()? as f32 / 255.0;
    Some([r, g, b])
}

/// Format RGB floats as `#rrggbb`.
pub fn format_hex_color(rgb: [f32; 3]) -> String {
    let [r, g, b] = rgb.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
    format!("#{r:02x}{g:02x}{b:02x}")
}

mod hex_color {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(rgb: &[f32; 3], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_hex_color(*rgb))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[f32; 3], D::Error> {
        let hex = String::deserialize(deserializer)?;
        super::parse_hex_color(&hex)
            .ok_or_else(|| D::Error::custom(super::ConfigError::InvalidColor(hex)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#00ff88"), Some([0.0, 1.0, 136.0 / 255.0]));
        assert_eq!(parse_hex_color("ffffff"), Some([1.0, 1.0, 1.0]));
        assert_eq!(parse_hex_color("#00000000"), Some([0.0, 0.0, 0.0]));
        assert_eq!(parse_hex_color("invalid"), None);
    }

    #[test]
    fn test_format_hex_color() {
        assert_eq!(format_hex_color([0.0, 1.0, 136.0 / 255.0]), "#00ff88");
        assert_eq!(format_hex_color([2.0, -1.0, 0.0]), "#ff0000");
    }

    #[test]
    fn test_config_default() {
        let config = RendererConfig::default();
        assert_eq!(config.width, 1280);
        assert_eq!(config.height, 720);
        assert_eq!(config.sample_capacity, 1024);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config =
            RendererConfig::from_json_str(r##"{ "width": 320, "background": "#102030" }"##)
                .unwrap();
        assert_eq!(config.width, 320);
        assert_eq!(config.height, 720);
        assert_eq!(config.background, parse_hex_color("#102030").unwrap());
        assert_eq!(config.palette, Palette::default());
    }

    #[test]
    fn test_invalid_color_rejected() {
        let result = RendererConfig::from_json_str(r#"{ "background": "nope" }"#);
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_config_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("renderer.json");
        let config = RendererConfig {
            width: 640,
            height: 360,
            ..Default::default()
        };
        std::fs::write(&path, config.to_json().unwrap()).unwrap();

        let loaded = RendererConfig::from_json_file(&path).unwrap();
        assert_eq!(loaded.width, 640);
        assert_eq!(loaded.height, 360);
    }
}
