//! Frontend settings

use serde::{Deserialize, Serialize};

use super::Config;

/// All user-tunable frontend settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics options surfaced in the debug panel
    pub graphics: GraphicsSettings,
    /// Debug overlay options
    pub debug: DebugSettings,
    /// HUD layout options
    pub ui: UiSettings,
}

impl Config for Settings {}

/// Graphics settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphicsSettings {
    /// Skip chunks outside the view frustum
    pub frustum_culling: bool,
    /// Initial fog factor (0.0 - 1.0)
    pub fog: f32,
}

impl Default for GraphicsSettings {
    fn default() -> Self {
        Self {
            frustum_culling: true,
            fog: 0.0,
        }
    }
}

/// Debug settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugSettings {
    /// Draw chunk border lines
    pub show_chunk_borders: bool,
    /// Seconds between fps min/max refreshes in the debug panel
    pub fps_interval: f32,
}

impl Default for DebugSettings {
    fn default() -> Self {
        Self {
            show_chunk_borders: false,
            fps_interval: 0.5,
        }
    }
}

/// HUD settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Number of hotbar slots
    pub hotbar_slots: usize,
    /// Columns of the content access grid
    pub content_columns: usize,
    /// Layout id of the player inventory document
    pub inventory_layout: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            hotbar_slots: 10,
            content_columns: 8,
            inventory_layout: "core:inventory".to_string(),
        }
    }
}
