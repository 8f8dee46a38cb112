//! Serde models for the LCU endpoints this app reads.
//!
//! Fields the client may omit are defaulted rather than optional so the
//! presence code can format them without unwrapping at every step.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CurrentSummoner {
    pub summoner_id: i64,
    pub display_name: String,
    pub game_name: String,
    pub tag_line: String,
    pub internal_name: String,
    pub summoner_level: u32,
}

impl CurrentSummoner {
    /// Preferred display handle; older clients only fill `displayName`.
    pub fn name(&self) -> &str {
        if self.game_name.is_empty() {
            &self.display_name
        } else {
            &self.game_name
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RegionLocale {
    pub locale: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum GameflowPhase {
    None,
    Lobby,
    Matchmaking,
    ReadyCheck,
    ChampSelect,
    GameStart,
    InProgress,
    Reconnect,
    WaitingForStats,
    PreEndOfGame,
    EndOfGame,
    TerminatedInError,
    #[serde(other)]
    Unknown,
}

impl GameflowPhase {
    /// Phases where the gameflow session drives the presence.
    pub fn is_active(self) -> bool {
        matches!(
            self,
            GameflowPhase::Lobby
                | GameflowPhase::Matchmaking
                | GameflowPhase::ChampSelect
                | GameflowPhase::InProgress
        )
    }

    /// Phases that settle into the idle presence (after a short delay).
    pub fn is_idle_or_post_game(self) -> bool {
        matches!(
            self,
            GameflowPhase::None
                | GameflowPhase::TerminatedInError
                | GameflowPhase::WaitingForStats
                | GameflowPhase::PreEndOfGame
                | GameflowPhase::EndOfGame
        )
    }

    pub fn is_post_game(self) -> bool {
        matches!(self, GameflowPhase::PreEndOfGame | GameflowPhase::EndOfGame)
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct GameflowSession {
    pub phase: Option<GameflowPhase>,
    pub game_data: GameData,
    pub map: MapInfo,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct GameData {
    pub queue: QueueInfo,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct QueueInfo {
    pub id: i64,
    #[serde(rename = "type")]
    pub queue_type: String,
    pub category: String,
    pub game_mode: String,
    pub description: String,
    pub map_id: i64,
    pub maximum_participant_list_size: u32,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct MapInfo {
    pub id: i64,
    pub name: String,
    pub map_string_id: String,
    pub assets: HashMap<String, Value>,
}

impl MapInfo {
    pub fn asset(&self, key: &str) -> Option<&str> {
        self.assets.get(key).and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatMe {
    pub availability: String,
    pub status_message: String,
    pub icon: i64,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RankedStats {
    pub queue_map: HashMap<String, RankedQueue>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RankedQueue {
    pub tier: String,
    pub division: String,
    pub league_points: i32,
    pub wins: u32,
    pub losses: u32,
}

impl RankedQueue {
    pub fn is_ranked(&self) -> bool {
        !matches!(self.tier.as_str(), "" | "NONE" | "UNRANKED")
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ChampSelectSession {
    pub my_team: Vec<ChampSelectPlayer>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ChampSelectPlayer {
    pub summoner_id: i64,
    pub champion_id: i64,
    pub selected_skin_id: i64,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct LobbyMember {
    pub summoner_id: i64,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ChampionSkin {
    pub id: i64,
    pub name: String,
    pub is_base: bool,
    pub tile_path: String,
    pub uncentered_splash_path: String,
    pub collection_splash_video_path: Option<String>,
    pub chromas: Vec<SkinChroma>,
    pub quest_skin_info: QuestSkinInfo,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SkinChroma {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct QuestSkinInfo {
    pub tiers: Vec<SkinTier>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SkinTier {
    pub id: i64,
    pub name: String,
    pub is_base: bool,
    pub tile_path: String,
    pub uncentered_splash_path: String,
    pub collection_splash_video_path: Option<String>,
}

/// `/lol-champions/v1/inventories/{id}/champions/{championId}` (name only).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ChampionMinimal {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TftCompanions {
    pub selected_loadout_item: TftCompanion,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TftCompanion {
    pub name: String,
    pub loadouts_icon: String,
}

/// `/lol-maps/v2/map/11/PRACTICETOOL` (display name only).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PracticeToolMap {
    pub game_mode_name: String,
}
