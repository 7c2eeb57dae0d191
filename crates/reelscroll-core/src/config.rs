use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default = "default_sections")]
    pub sections: Vec<SectionConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            scroll: ScrollConfig::default(),
            ui: UiConfig::default(),
            sections: default_sections(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Easing curve used for programmatic scroll transitions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump at the end of the transition
    None,
    Linear,
    /// Cubic ease-out: 1 - (1-t)³
    Cubic,
    /// Cubic ease-in-out: 4t³ below the midpoint, 1 - (-2t+2)³/2 above it
    #[default]
    EaseInOutCubic,
}

/// Smooth scrolling parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Share of the remaining distance covered each frame while wheel-driven
    #[serde(default = "default_lerp_factor")]
    pub lerp_factor: f64,
    /// Below this distance (px) the offset snaps onto the target
    #[serde(default = "default_snap_threshold")]
    pub snap_threshold_px: f64,
    /// Offset drift (px) treated as a native scroll and resynchronized
    #[serde(default = "default_sync_tolerance")]
    pub sync_tolerance_px: f64,
    /// Default duration of a programmatic scroll
    #[serde(default = "default_auto_scroll_duration")]
    pub auto_scroll_duration_ms: u64,
    /// Duration used when jumping between named sections
    #[serde(default = "default_section_scroll_duration")]
    pub section_scroll_duration_ms: u64,
    #[serde(default)]
    pub easing: EasingType,
    /// Frame loop rate
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            lerp_factor: default_lerp_factor(),
            snap_threshold_px: default_snap_threshold(),
            sync_tolerance_px: default_sync_tolerance(),
            auto_scroll_duration_ms: default_auto_scroll_duration(),
            section_scroll_duration_ms: default_section_scroll_duration(),
            easing: EasingType::default(),
            frame_rate: default_frame_rate(),
        }
    }
}

impl ScrollConfig {
    /// Highest accepted `frame_rate`
    pub const MAX_FRAME_RATE: u32 = 1000;

    pub fn validate(&self) -> crate::Result<()> {
        if !(self.lerp_factor > 0.0 && self.lerp_factor <= 1.0) {
            return Err(invalid("scroll.lerp_factor", "must be in (0, 1]"));
        }
        if !(self.snap_threshold_px.is_finite() && self.snap_threshold_px >= 0.0) {
            return Err(invalid("scroll.snap_threshold_px", "must be a non-negative number"));
        }
        if !(self.sync_tolerance_px.is_finite() && self.sync_tolerance_px >= 0.0) {
            return Err(invalid("scroll.sync_tolerance_px", "must be a non-negative number"));
        }
        if self.frame_rate == 0 || self.frame_rate > Self::MAX_FRAME_RATE {
            return Err(invalid("scroll.frame_rate", "must be between 1 and 1000"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Pixels represented by one terminal column
    #[serde(default = "default_cell_width")]
    pub cell_width_px: f64,
    /// Pixels represented by one terminal row
    #[serde(default = "default_cell_height")]
    pub cell_height_px: f64,
    /// Wheel delta reported for one mouse wheel notch
    #[serde(default = "default_wheel_step")]
    pub wheel_step_px: f64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            cell_width_px: default_cell_width(),
            cell_height_px: default_cell_height(),
            wheel_step_px: default_wheel_step(),
        }
    }
}

impl UiConfig {
    pub fn validate(&self) -> crate::Result<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.cell_width_px) {
            return Err(invalid("ui.cell_width_px", "must be positive"));
        }
        if !positive(self.cell_height_px) {
            return Err(invalid("ui.cell_height_px", "must be positive"));
        }
        if !positive(self.wheel_step_px) {
            return Err(invalid("ui.wheel_step_px", "must be positive"));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> crate::Error {
    crate::Error::Config(format!("{} {}", field, reason))
}

/// One named section of the horizontal page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionConfig {
    pub id: String,
    pub label: String,
    /// Width in viewport widths
    #[serde(default = "default_section_width")]
    pub width: f64,
    /// Static copy shown in the section
    #[serde(default)]
    pub copy: Vec<String>,
    /// Lines of a nested, vertically scrollable panel (empty = no panel)
    #[serde(default)]
    pub panel: Vec<String>,
}

impl SectionConfig {
    pub fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            width: default_section_width(),
            copy: Vec::new(),
            panel: Vec::new(),
        }
    }

    fn with_copy(mut self, copy: &[&str]) -> Self {
        self.copy = copy.iter().map(|s| s.to_string()).collect();
        self
    }

    fn with_panel(mut self, lines: &[&str]) -> Self {
        self.panel = lines.iter().map(|s| s.to_string()).collect();
        self
    }
}

fn default_sections() -> Vec<SectionConfig> {
    vec![
        SectionConfig::new("hero", "Home")
            .with_copy(&["Cinematic production", "Scroll to explore"]),
        SectionConfig::new("services", "Services")
            .with_copy(&["What we do"])
            .with_panel(&[
                "Commercial films",
                "Music videos",
                "Drone cinematography",
                "Aerial light shows",
                "Product shoots",
                "Documentaries",
                "Colour grading",
                "Sound design",
                "Motion graphics",
                "Post production",
                "Event coverage",
                "Brand stories",
            ]),
        SectionConfig::new("projects", "Portfolio").with_copy(&["Selected work"]),
        SectionConfig::new("gallery", "Gallery").with_copy(&["Stills and reels"]),
        SectionConfig::new("clients", "Clients")
            .with_copy(&["Client feedback"])
            .with_panel(&[
                "\"Delivered ahead of schedule.\"",
                "\"The drone work was stunning.\"",
                "\"Our launch film doubled signups.\"",
                "\"A crew that understands story.\"",
                "\"Every frame felt intentional.\"",
                "\"We are booking them again.\"",
                "\"Calm on set, sharp in the edit.\"",
                "\"Exceeded every brief.\"",
            ]),
        SectionConfig::new("about", "About Us").with_copy(&["A studio of storytellers"]),
        SectionConfig::new("contact", "Contact").with_copy(&["Let's make something"]),
    ]
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_lerp_factor() -> f64 {
    0.12
}

fn default_snap_threshold() -> f64 {
    0.5
}

fn default_sync_tolerance() -> f64 {
    1.0
}

fn default_auto_scroll_duration() -> u64 {
    1000
}

fn default_section_scroll_duration() -> u64 {
    900
}

fn default_frame_rate() -> u32 {
    60
}

fn default_tick_rate() -> u64 {
    100
}

fn default_cell_width() -> f64 {
    8.0
}

fn default_cell_height() -> f64 {
    16.0
}

fn default_wheel_step() -> f64 {
    100.0
}

fn default_section_width() -> f64 {
    1.0
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the scroll engine cannot run with
    pub fn validate(&self) -> crate::Result<()> {
        self.scroll.validate()?;
        self.ui.validate()
    }

    /// Render configuration as TOML text
    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml()?)?;
        tracing::info!(path = %config_path.display(), "Configuration saved");

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/reelscroll/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("reelscroll")
            .join("config.toml")
    }
}
