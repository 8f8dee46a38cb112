use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const SETTINGS_FILE: &str = "settings.json";

/// Which asset from the map's gameflow bundle is used as the large image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MapIconStyle {
    #[default]
    Active,
    Empty,
    Hover,
    Defeat,
    Background,
}

impl MapIconStyle {
    pub fn asset_key(self) -> &'static str {
        match self {
            MapIconStyle::Active => "game-select-icon-active",
            MapIconStyle::Empty => "icon-empty",
            MapIconStyle::Hover => "game-select-icon-hover",
            MapIconStyle::Defeat => "icon-defeat",
            MapIconStyle::Background => "gameflow-background",
        }
    }
}

/// What to show while the client sits outside of a lobby or game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IdleStatus {
    #[default]
    Disabled,
    Profile,
    Custom,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatDisplay {
    pub kda: bool,
    pub cs: bool,
    pub level: bool,
}

impl Default for StatDisplay {
    fn default() -> Self {
        Self {
            kda: true,
            cs: true,
            level: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RankedStatDisplay {
    pub lp: bool,
    pub wins: bool,
    pub losses: bool,
}

impl Default for RankedStatDisplay {
    fn default() -> Self {
        Self {
            lp: true,
            wins: true,
            losses: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShowRanks {
    pub ranked_solo_5x5: bool,
    pub ranked_flex_sr: bool,
    pub ranked_tft: bool,
    pub ranked_tft_double_up: bool,
}

impl Default for ShowRanks {
    fn default() -> Self {
        Self {
            ranked_solo_5x5: true,
            ranked_flex_sr: true,
            ranked_tft: true,
            ranked_tft_double_up: true,
        }
    }
}

impl ShowRanks {
    /// Queue types are the LCU identifiers, e.g. `RANKED_SOLO_5x5`.
    pub fn enabled_for(&self, queue_type: &str) -> bool {
        match queue_type {
            "RANKED_SOLO_5x5" => self.ranked_solo_5x5,
            "RANKED_FLEX_SR" => self.ranked_flex_sr,
            "RANKED_TFT" => self.ranked_tft,
            "RANKED_TFT_DOUBLE_UP" => self.ranked_tft_double_up,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdleProfileDisplay {
    pub show_riot_id: bool,
    pub show_tag_line: bool,
    pub show_summoner_level: bool,
}

impl Default for IdleProfileDisplay {
    fn default() -> Self {
        Self {
            show_riot_id: true,
            show_tag_line: true,
            show_summoner_level: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdleCustom {
    pub image_link: String,
    pub text: String,
    pub show_status_circle: bool,
    pub show_time_elapsed: bool,
}

impl Default for IdleCustom {
    fn default() -> Self {
        Self {
            image_link: String::new(),
            text: "Chilling...".to_string(),
            show_status_circle: true,
            show_time_elapsed: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub use_skin_splash: bool,
    pub animated_splash: bool,
    pub show_view_art_button: bool,
    pub show_party_info: bool,
    pub map_icon_style: MapIconStyle,
    pub idle_status: IdleStatus,
    pub idle_profile: IdleProfileDisplay,
    pub idle_custom: IdleCustom,
    pub stats: StatDisplay,
    pub show_ranks: ShowRanks,
    pub ranked_stats: RankedStatDisplay,
    pub rpc_muted: bool,
    /// Path to the "Riot Games" installation folder.
    pub league_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            use_skin_splash: true,
            animated_splash: true,
            show_view_art_button: false,
            show_party_info: true,
            map_icon_style: MapIconStyle::default(),
            idle_status: IdleStatus::default(),
            idle_profile: IdleProfileDisplay::default(),
            idle_custom: IdleCustom::default(),
            stats: StatDisplay::default(),
            show_ranks: ShowRanks::default(),
            ranked_stats: RankedStatDisplay::default(),
            rpc_muted: false,
            league_path: default_league_path(),
        }
    }
}

fn default_league_path() -> String {
    if cfg!(windows) {
        r"C:\Riot Games".to_string()
    } else {
        String::new()
    }
}

fn get_settings_path() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?.join("league-presence");
    Some(config_dir.join(SETTINGS_FILE))
}

impl Settings {
    /// Load settings from disk, falling back to defaults when the file is
    /// missing or unreadable. The file is never written back.
    pub fn load() -> Self {
        let Some(path) = get_settings_path() else {
            tracing::warn!("Could not resolve config directory, using default settings");
            return Self::default();
        };

        if !path.exists() {
            tracing::info!("No settings file at {}, using defaults", path.display());
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => {
                    tracing::info!("Settings loaded from {}", path.display());
                    settings
                }
                Err(e) => {
                    tracing::warn!("Failed to parse settings file: {}. Using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read settings file: {}. Using defaults", e);
                Self::default()
            }
        }
    }

    /// Directory containing `League of Legends` under the Riot install.
    pub fn league_install_dir(&self) -> PathBuf {
        PathBuf::from(&self.league_path).join("League of Legends")
    }
}
