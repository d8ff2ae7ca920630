pub mod loader;

use serde::{Deserialize, Serialize};

/// Settings for the terminal shell around the engine. Game rules are not
/// configurable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
    pub game: GameConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub frame_rate: u32,
    pub show_grid: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            frame_rate: 60,
            show_grid: true,
        }
    }
}

impl DisplayConfig {
    /// Target duration of one frame, never shorter than a millisecond.
    #[must_use]
    pub fn frame_duration(&self) -> std::time::Duration {
        let millis = 1000 / u64::from(self.frame_rate.max(1));
        std::time::Duration::from_millis(millis.max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: "blocktris.log".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // Fixes the shape sequence when set
    pub seed: Option<u64>,
}
