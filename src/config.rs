//! Config model and persistence helpers.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, time::Duration};

use crate::hold::{DEFAULT_HOLD, DEFAULT_REPEAT_GAP};

/// Top-level configuration stored in `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Branding shown next to the home menus.
    pub hub: HubCfg,
    /// Values reported by the simulated device backend.
    pub device: DeviceCfg,
    /// Focus navigation tuning.
    pub navigation: NavigationCfg,
    /// Gallery slideshow playback.
    pub slideshow: SlideshowCfg,
    /// Hidden technical-mode gesture.
    pub hidden: HiddenCfg,
    /// Slides for the presentation screen.
    pub presentation: PresentationCfg,
}

/// Logo text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubCfg {
    pub title: String,
    pub subtitle: String,
}

/// Mocked device identity and status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceCfg {
    /// Name advertised to casting clients.
    pub name: String,
    /// PIN shown before the first regeneration.
    pub initial_pin: String,
    /// Network status line.
    pub network: String,
    /// Attached storage devices.
    pub drives: Vec<String>,
    /// Version string.
    pub version: String,
    /// Artificial latency of device requests.
    pub latency_ms: u64,
}

/// Navigation tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationCfg {
    /// Minimum spacing between accepted arrow presses.
    pub throttle_ms: u64,
    /// Columns of the gallery grid.
    pub gallery_columns: usize,
    /// Columns of the settings grid.
    pub settings_columns: usize,
}

/// Slideshow timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideshowCfg {
    /// Seconds per frame while playing.
    pub interval_secs: u64,
}

/// Long-press gesture timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HiddenCfg {
    /// Seconds the key must be held.
    pub hold_secs: u64,
    /// Maximum gap between key repeats that still counts as holding.
    pub repeat_gap_ms: u64,
}

/// Presentation content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresentationCfg {
    pub slides: Vec<SlideCfg>,
}

/// One presentation slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideCfg {
    pub title: String,
    pub content: String,
}

impl Config {
    /// Load from disk or create defaults when missing.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            let s = fs::read_to_string(path)?;
            let cfg: Self = toml::from_str(&s)?;
            cfg.validate()?;
            Ok(cfg)
        } else {
            let cfg = Self::default();
            cfg.save(path)?;
            Ok(cfg)
        }
    }

    /// Persist the config as pretty TOML.
    pub fn save(&self, path: &Path) -> Result<()> {
        let s = toml::to_string_pretty(self)?;
        fs::write(path, s)?;
        Ok(())
    }

    /// Reject values no screen can work with.
    pub fn validate(&self) -> Result<()> {
        if self.navigation.gallery_columns == 0 || self.navigation.settings_columns == 0 {
            bail!("navigation: grid column counts must be at least 1");
        }
        if self.slideshow.interval_secs == 0 {
            bail!("slideshow.interval_secs must be at least 1");
        }
        if self.presentation.slides.is_empty() {
            tracing::warn!("presentation has no slides");
        }
        Ok(())
    }

    pub fn throttle(&self) -> Duration {
        Duration::from_millis(self.navigation.throttle_ms)
    }

    pub fn slide_interval(&self) -> Duration {
        Duration::from_secs(self.slideshow.interval_secs)
    }

    pub fn hold_threshold(&self) -> Duration {
        Duration::from_secs(self.hidden.hold_secs)
    }

    pub fn repeat_gap(&self) -> Duration {
        Duration::from_millis(self.hidden.repeat_gap_ms)
    }
}

impl Default for Config {
    /// Defaults reproduce the demo kiosk.
    fn default() -> Self {
        Self {
            hub: HubCfg {
                title: "Onda Hub".into(),
                subtitle: "Retiro Onda Xangri-la 2025".into(),
            },
            device: DeviceCfg {
                name: "Onda Hub - Main Room".into(),
                initial_pin: "1234".into(),
                network: "Connected - 192.168.1.100".into(),
                drives: vec![
                    "USB Drive Onda 1 (8GB)".into(),
                    "Internal Storage (32GB)".into(),
                ],
                version: "Onda Hub 2.0 Beta".into(),
                latency_ms: 150,
            },
            navigation: NavigationCfg {
                throttle_ms: 100,
                gallery_columns: 3,
                settings_columns: 2,
            },
            slideshow: SlideshowCfg { interval_secs: 3 },
            hidden: HiddenCfg {
                hold_secs: DEFAULT_HOLD.as_secs(),
                repeat_gap_ms: DEFAULT_REPEAT_GAP.as_millis() as u64,
            },
            presentation: PresentationCfg {
                slides: vec![
                    SlideCfg {
                        title: "Welcome to the Retreat".into(),
                        content: "Retiro Onda Xangri-la 2025".into(),
                    },
                    SlideCfg {
                        title: "Schedule".into(),
                        content: "Check out our special schedule".into(),
                    },
                    SlideCfg {
                        title: "Important Notices".into(),
                        content: "Keep your belongings safe".into(),
                    },
                ],
            },
        }
    }
}
