//! Builds presence payloads from client state and user settings.
//!
//! Everything here is pure formatting over already-fetched data; the app
//! loop decides when to call which builder.

use std::collections::HashMap;
use std::time::SystemTime;

use crate::assets;
use crate::lcu::types::{
    ChampionSkin, ChatMe, CurrentSummoner, MapInfo, QueueInfo, RankedQueue, RankedStats,
};
use crate::live::PlayerStats;
use crate::presence::{Payload, PayloadButton};
use crate::settings::Settings;

/// Localized display strings, resolved once at startup from the CDN with
/// English fallbacks.
#[derive(Debug, Clone)]
pub struct LocaleStrings {
    pub bot: String,
    pub champ_select: String,
    pub lobby: String,
    pub in_game: String,
    pub in_queue: String,
    pub custom: String,
    pub practice_tool: String,
    pub away: String,
    pub chat: String,
    pub dnd: String,
}

impl Default for LocaleStrings {
    fn default() -> Self {
        Self {
            bot: "Bot Game".to_string(),
            champ_select: "Champion Select".to_string(),
            lobby: "In Lobby".to_string(),
            in_game: "In Game".to_string(),
            in_queue: "In Queue".to_string(),
            custom: "Custom Game".to_string(),
            practice_tool: "Practice Tool".to_string(),
            away: "Away".to_string(),
            chat: "Online".to_string(),
            dnd: "Do Not Disturb".to_string(),
        }
    }
}

impl LocaleStrings {
    /// Populate from the CDN's `discord_strings.json` and social `trans.json`
    /// maps; any missing key keeps its English default.
    pub fn from_cdn(
        discord_strings: &HashMap<String, String>,
        chat_strings: &HashMap<String, String>,
    ) -> Self {
        let mut strings = Self::default();
        let take = |target: &mut String, map: &HashMap<String, String>, key: &str| {
            if let Some(value) = map.get(key) {
                if !value.trim().is_empty() {
                    *target = value.clone();
                }
            }
        };

        take(&mut strings.bot, discord_strings, "Disc_Pres_QueueType_BOT");
        take(&mut strings.champ_select, discord_strings, "Disc_Pres_State_championSelect");
        take(&mut strings.lobby, discord_strings, "Disc_Pres_State_hosting");
        take(&mut strings.in_game, discord_strings, "Disc_Pres_State_inGame");
        take(&mut strings.in_queue, discord_strings, "Disc_Pres_State_inQueue");
        take(&mut strings.custom, discord_strings, "Disc_Pres_QueueType_CUSTOM");
        take(&mut strings.away, chat_strings, "availability_away");
        take(&mut strings.chat, chat_strings, "availability_chat");
        take(&mut strings.dnd, chat_strings, "availability_dnd");
        strings
    }

    /// Localized name for a chat availability; unknown values (`mobile`,
    /// `offline`) pass through as-is.
    pub fn availability<'a>(&'a self, availability: &'a str) -> &'a str {
        match availability.to_lowercase().as_str() {
            "away" => &self.away,
            "dnd" => &self.dnd,
            "chat" => &self.chat,
            _ => availability,
        }
    }
}

/// Human queue description: "Ranked Solo/Duo", "Bot Game Intro", "Custom
/// Game", the localized practice-tool name, ...
pub fn queue_description(queue: &QueueInfo, strings: &LocaleStrings) -> String {
    if queue.game_mode == "PRACTICETOOL" {
        return strings.practice_tool.clone();
    }
    if queue.category == "Custom" {
        return strings.custom.clone();
    }
    if queue.queue_type == "BOT" {
        return format!("{} {}", strings.bot, queue.description);
    }
    if queue.description.is_empty() {
        "Unknown Mode".to_string()
    } else {
        queue.description.clone()
    }
}

/// Rank emblem and small text for the current queue, honoring the per-queue
/// and per-stat settings. `None` when ranks are hidden or the player is
/// unranked in this queue.
pub fn rank_line(
    ranked: &RankedStats,
    queue_type: &str,
    settings: &Settings,
) -> Option<(String, String)> {
    if !settings.show_ranks.enabled_for(queue_type) {
        return None;
    }
    let entry = ranked.queue_map.get(queue_type)?;
    if !entry.is_ranked() {
        return None;
    }
    Some((assets::ranked_emblem(&entry.tier), rank_text(entry, settings)))
}

fn rank_text(entry: &RankedQueue, settings: &Settings) -> String {
    let mut tier = entry.tier.to_lowercase();
    if let Some(first) = tier.get_mut(0..1) {
        first.make_ascii_uppercase();
    }

    let mut parts = vec![format!("{} {}", tier, entry.division)];
    if settings.ranked_stats.lp {
        parts.push(format!("{} LP", entry.league_points));
    }
    if settings.ranked_stats.wins {
        parts.push(format!("{}W", entry.wins));
    }
    if settings.ranked_stats.losses {
        parts.push(format!("{}L", entry.losses));
    }
    parts.join(" • ")
}

/// Shared base for the pre-game phases: map + queue in the details line,
/// map icon as the large image, rank on the small image.
fn phase_base(
    map: &MapInfo,
    queue: &QueueInfo,
    map_icon: Option<&str>,
    rank: Option<(String, String)>,
    strings: &LocaleStrings,
) -> Payload {
    let (small_image, small_text) = match rank {
        Some((emblem, text)) => (Some(emblem), Some(text)),
        None => (None, None),
    };

    Payload {
        details: Some(format!("{} ({})", map_name(map), queue_description(queue, strings))),
        large_image: map_icon.map(assets::map_icon),
        large_text: Some(map_name(map).to_string()),
        small_image,
        small_text,
        ..Payload::default()
    }
}

fn map_name(map: &MapInfo) -> &str {
    if map.name.is_empty() {
        "Unknown Map"
    } else {
        &map.name
    }
}

pub fn lobby(
    map: &MapInfo,
    queue: &QueueInfo,
    map_icon: Option<&str>,
    rank: Option<(String, String)>,
    members: u32,
    strings: &LocaleStrings,
    settings: &Settings,
) -> Payload {
    let mut payload = phase_base(map, queue, map_icon, rank, strings);
    payload.state = Some(strings.lobby.clone());
    if settings.show_party_info && queue.maximum_participant_list_size > 0 {
        payload.party = Some((members, queue.maximum_participant_list_size));
    }
    payload
}

pub fn matchmaking(
    map: &MapInfo,
    queue: &QueueInfo,
    map_icon: Option<&str>,
    rank: Option<(String, String)>,
    strings: &LocaleStrings,
) -> Payload {
    let mut payload = phase_base(map, queue, map_icon, rank, strings);
    payload.state = Some(strings.in_queue.clone());
    payload.start = Some(SystemTime::now());
    payload
}

pub fn champ_select(
    map: &MapInfo,
    queue: &QueueInfo,
    map_icon: Option<&str>,
    rank: Option<(String, String)>,
    strings: &LocaleStrings,
) -> Payload {
    let mut payload = phase_base(map, queue, map_icon, rank, strings);
    payload.state = Some(strings.champ_select.clone());
    payload
}

/// Idle presence showing the summoner profile and chat availability.
pub fn idle_profile(
    summoner: &CurrentSummoner,
    chat: &ChatMe,
    strings: &LocaleStrings,
    settings: &Settings,
) -> Payload {
    let availability = strings.availability(&chat.availability).to_string();
    let small_text = if chat.status_message.is_empty() {
        availability.clone()
    } else {
        chat.status_message.clone()
    };

    Payload {
        state: Some(availability),
        large_image: Some(assets::profile_icon(chat.icon)),
        large_text: Some(profile_line(summoner, settings)),
        small_image: Some(assets::availability_icon(&chat.availability)),
        small_text: Some(small_text),
        ..Payload::default()
    }
}

fn profile_line(summoner: &CurrentSummoner, settings: &Settings) -> String {
    let display = &settings.idle_profile;
    let mut handle = String::new();
    if display.show_riot_id {
        handle.push_str(summoner.name());
    }
    if display.show_tag_line && !summoner.tag_line.is_empty() {
        handle.push('#');
        handle.push_str(&summoner.tag_line);
    }

    let mut parts = Vec::new();
    if !handle.is_empty() {
        parts.push(handle);
    }
    if display.show_summoner_level {
        parts.push(format!("Lvl {}", summoner.summoner_level));
    }

    if parts.is_empty() {
        "League of Legends".to_string()
    } else {
        parts.join(" | ")
    }
}

/// Idle presence with a user-supplied image and text.
pub fn idle_custom(chat: &ChatMe, strings: &LocaleStrings, settings: &Settings) -> Payload {
    let custom = &settings.idle_custom;
    let text = if custom.text.is_empty() {
        "Chilling...".to_string()
    } else {
        custom.text.clone()
    };
    let image = if custom.image_link.is_empty() {
        assets::league_icon()
    } else {
        custom.image_link.clone()
    };

    let (small_image, small_text) = if custom.show_status_circle {
        let availability = strings.availability(&chat.availability).to_string();
        let text = if chat.status_message.is_empty() {
            availability
        } else {
            chat.status_message.clone()
        };
        (Some(assets::availability_icon(&chat.availability)), Some(text))
    } else {
        (None, None)
    };

    Payload {
        details: Some(text.clone()),
        large_image: Some(image),
        large_text: Some(text),
        small_image,
        small_text,
        start: custom.show_time_elapsed.then(SystemTime::now),
        ..Payload::default()
    }
}

/// A champion skin resolved against the owned-skins inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSkin {
    pub skin_id: i64,
    pub name: String,
    pub tile: String,
    pub splash: String,
    pub splash_video: Option<String>,
}

/// Finds the selected skin in the champion's inventory: plain skins,
/// quest-skin tiers, and chromas (which display as their parent skin).
pub fn resolve_skin(champion_id: i64, skin_id: i64, skins: &[ChampionSkin]) -> Option<ResolvedSkin> {
    for skin in skins {
        for tier in &skin.quest_skin_info.tiers {
            if tier.id == skin_id {
                return Some(ResolvedSkin {
                    skin_id,
                    name: tier.name.clone(),
                    tile: tile_url(champion_id, tier.is_base, &tier.tile_path),
                    splash: assets::raw_asset(&tier.uncentered_splash_path),
                    splash_video: tier.collection_splash_video_path.clone(),
                });
            }
        }

        if skin.id == skin_id {
            return Some(resolved_from_skin(champion_id, skin.id, skin));
        }

        if skin.chromas.iter().any(|c| c.id == skin_id) {
            // Chromas have no art of their own; show the parent skin.
            return Some(resolved_from_skin(champion_id, skin.id, skin));
        }
    }
    None
}

fn resolved_from_skin(champion_id: i64, skin_id: i64, skin: &ChampionSkin) -> ResolvedSkin {
    ResolvedSkin {
        skin_id,
        name: skin.name.clone(),
        tile: tile_url(champion_id, skin.is_base, &skin.tile_path),
        splash: assets::raw_asset(&skin.uncentered_splash_path),
        splash_video: skin.collection_splash_video_path.clone(),
    }
}

fn tile_url(champion_id: i64, is_base: bool, tile_path: &str) -> String {
    if is_base {
        assets::default_tile(champion_id)
    } else {
        assets::raw_asset(tile_path)
    }
}

/// Swaps in the hosted animated splash when the skin has one and the user
/// opted in.
pub fn apply_animated_splash(skin: &mut ResolvedSkin, settings: &Settings) {
    if !settings.animated_splash {
        return;
    }
    let Some(video) = &skin.splash_video else {
        return;
    };
    if assets::ANIMATED_SPLASH_IDS.contains(&skin.skin_id) {
        skin.tile = assets::animated_splash(skin.skin_id);
        skin.splash = assets::raw_asset(video);
    }
}

/// In-game presence for regular modes: skin art, live stats in the state
/// line, optional splash-art button.
#[allow(clippy::too_many_arguments)]
pub fn in_game_skin(
    map: &MapInfo,
    queue: &QueueInfo,
    skin: &ResolvedSkin,
    rank: Option<(String, String)>,
    stats: Option<&PlayerStats>,
    start: SystemTime,
    strings: &LocaleStrings,
    settings: &Settings,
) -> Payload {
    let mut state_parts = vec![strings.in_game.clone()];
    if let Some(stats) = stats {
        if settings.stats.kda {
            state_parts.push(stats.kda.clone());
        }
        if settings.stats.cs {
            state_parts.push(format!("{}cs", stats.cs));
        }
        if settings.stats.level {
            state_parts.push(format!("Lvl {}", stats.level));
        }
    }

    let (small_image, small_text) = match rank {
        Some((emblem, text)) => (Some(emblem), Some(text)),
        None => (None, None),
    };

    let buttons = if settings.show_view_art_button {
        vec![PayloadButton {
            label: "View Splash Art".to_string(),
            url: skin.splash.clone(),
        }]
    } else {
        Vec::new()
    };

    Payload {
        details: Some(format!("{} ({})", map_name(map), queue_description(queue, strings))),
        state: Some(state_parts.join(" • ")),
        large_image: Some(skin.tile.clone()),
        large_text: Some(skin.name.clone()),
        small_image,
        small_text,
        start: Some(start),
        buttons,
        ..Payload::default()
    }
}

/// In-game presence with the map icon instead of skin art (skin splash
/// disabled, or TFT without a companion).
pub fn in_game_map(
    map: &MapInfo,
    queue: &QueueInfo,
    map_icon: Option<&str>,
    rank: Option<(String, String)>,
    start: SystemTime,
    strings: &LocaleStrings,
) -> Payload {
    let mut payload = phase_base(map, queue, map_icon, rank, strings);
    payload.state = Some(strings.in_game.clone());
    payload.start = Some(start);
    payload
}

/// TFT in-game presence showing the selected companion.
pub fn in_game_tft(
    map: &MapInfo,
    queue: &QueueInfo,
    companion_name: &str,
    companion_icon: &str,
    rank: Option<(String, String)>,
    start: SystemTime,
    strings: &LocaleStrings,
    settings: &Settings,
) -> Payload {
    let (small_image, small_text) = match rank {
        Some((emblem, text)) => (Some(emblem), Some(text)),
        None => (None, None),
    };

    let icon_url = assets::tft_companion_icon(companion_icon);
    let buttons = if settings.show_view_art_button {
        vec![PayloadButton {
            label: "View Splash Art".to_string(),
            url: icon_url.clone(),
        }]
    } else {
        Vec::new()
    };

    Payload {
        details: Some(format!("{} ({})", map_name(map), queue_description(queue, strings))),
        state: Some(strings.in_game.clone()),
        large_image: Some(icon_url),
        large_text: Some(companion_name.to_string()),
        small_image,
        small_text,
        start: Some(start),
        buttons,
        ..Payload::default()
    }
}

/// Swarm (PvE) in-game presence: champion tile, no queue description.
pub fn in_game_swarm(
    map: &MapInfo,
    champion_id: i64,
    champion_name: &str,
    start: SystemTime,
    strings: &LocaleStrings,
) -> Payload {
    Payload {
        details: Some(format!("{} (PvE)", map_name(map))),
        state: Some(strings.in_game.clone()),
        large_image: Some(assets::default_tile(champion_id)),
        large_text: Some(champion_name.to_string()),
        start: Some(start),
        ..Payload::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sr_map() -> MapInfo {
        serde_json::from_value(json!({
            "id": 11,
            "name": "Summoner's Rift",
            "mapStringId": "SR",
            "assets": {}
        }))
        .unwrap()
    }

    fn ranked_queue() -> QueueInfo {
        serde_json::from_value(json!({
            "id": 420,
            "type": "RANKED_SOLO_5x5",
            "category": "PvP",
            "gameMode": "CLASSIC",
            "description": "Ranked Solo/Duo",
            "mapId": 11,
            "maximumParticipantListSize": 5
        }))
        .unwrap()
    }

    fn gold_stats() -> RankedStats {
        serde_json::from_value(json!({
            "queueMap": {
                "RANKED_SOLO_5x5": {
                    "tier": "GOLD",
                    "division": "II",
                    "leaguePoints": 57,
                    "wins": 40,
                    "losses": 38
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn queue_description_plain() {
        let strings = LocaleStrings::default();
        assert_eq!(queue_description(&ranked_queue(), &strings), "Ranked Solo/Duo");
    }

    #[test]
    fn queue_description_overrides() {
        let strings = LocaleStrings::default();

        let mut bot = ranked_queue();
        bot.queue_type = "BOT".to_string();
        bot.description = "Intro".to_string();
        assert_eq!(queue_description(&bot, &strings), "Bot Game Intro");

        let mut custom = ranked_queue();
        custom.category = "Custom".to_string();
        assert_eq!(queue_description(&custom, &strings), "Custom Game");

        let mut practice = ranked_queue();
        practice.game_mode = "PRACTICETOOL".to_string();
        assert_eq!(queue_description(&practice, &strings), "Practice Tool");
    }

    #[test]
    fn rank_line_formats_all_stats() {
        let settings = Settings::default();
        let (emblem, text) = rank_line(&gold_stats(), "RANKED_SOLO_5x5", &settings).unwrap();
        assert!(emblem.contains("gold"));
        assert_eq!(text, "Gold II • 57 LP • 40W • 38L");
    }

    #[test]
    fn rank_line_respects_stat_toggles() {
        let mut settings = Settings::default();
        settings.ranked_stats.lp = false;
        settings.ranked_stats.losses = false;
        let (_, text) = rank_line(&gold_stats(), "RANKED_SOLO_5x5", &settings).unwrap();
        assert_eq!(text, "Gold II • 40W");
    }

    #[test]
    fn rank_line_hidden_when_disabled_or_unranked() {
        let mut settings = Settings::default();
        settings.show_ranks.ranked_solo_5x5 = false;
        assert!(rank_line(&gold_stats(), "RANKED_SOLO_5x5", &settings).is_none());

        let settings = Settings::default();
        assert!(rank_line(&gold_stats(), "RANKED_FLEX_SR", &settings).is_none());

        let unranked: RankedStats = serde_json::from_value(json!({
            "queueMap": {"RANKED_SOLO_5x5": {"tier": "NONE", "division": "NA"}}
        }))
        .unwrap();
        assert!(rank_line(&unranked, "RANKED_SOLO_5x5", &settings).is_none());
    }

    #[test]
    fn lobby_payload_with_party() {
        let strings = LocaleStrings::default();
        let settings = Settings::default();
        let payload = lobby(&sr_map(), &ranked_queue(), None, None, 3, &strings, &settings);
        assert_eq!(payload.details.as_deref(), Some("Summoner's Rift (Ranked Solo/Duo)"));
        assert_eq!(payload.state.as_deref(), Some("In Lobby"));
        assert_eq!(payload.party, Some((3, 5)));
        assert!(payload.start.is_none());
    }

    #[test]
    fn lobby_payload_without_party_info() {
        let strings = LocaleStrings::default();
        let mut settings = Settings::default();
        settings.show_party_info = false;
        let payload = lobby(&sr_map(), &ranked_queue(), None, None, 3, &strings, &settings);
        assert_eq!(payload.party, None);
    }

    #[test]
    fn matchmaking_payload_sets_start() {
        let strings = LocaleStrings::default();
        let payload = matchmaking(&sr_map(), &ranked_queue(), None, None, &strings);
        assert_eq!(payload.state.as_deref(), Some("In Queue"));
        assert!(payload.start.is_some());
    }

    #[test]
    fn champ_select_payload_includes_map_icon() {
        let strings = LocaleStrings::default();
        let payload = champ_select(
            &sr_map(),
            &ranked_queue(),
            Some("/lol-game-data/assets/content/ICON.png"),
            Some(("emblem-url".to_string(), "Gold II".to_string())),
            &strings,
        );
        assert_eq!(payload.state.as_deref(), Some("Champion Select"));
        assert!(payload.large_image.as_deref().unwrap().ends_with("content/icon.png"));
        assert_eq!(payload.small_image.as_deref(), Some("emblem-url"));
        assert_eq!(payload.small_text.as_deref(), Some("Gold II"));
    }

    fn summoner() -> CurrentSummoner {
        serde_json::from_value(json!({
            "summonerId": 1,
            "gameName": "Faker",
            "tagLine": "KR1",
            "displayName": "Faker",
            "summonerLevel": 512
        }))
        .unwrap()
    }

    #[test]
    fn idle_profile_line_variants() {
        let chat = ChatMe {
            availability: "away".to_string(),
            ..Default::default()
        };
        let strings = LocaleStrings::default();

        let settings = Settings::default();
        let payload = idle_profile(&summoner(), &chat, &strings, &settings);
        assert_eq!(payload.state.as_deref(), Some("Away"));
        assert_eq!(payload.large_text.as_deref(), Some("Faker#KR1"));

        let mut settings = Settings::default();
        settings.idle_profile.show_summoner_level = true;
        let payload = idle_profile(&summoner(), &chat, &strings, &settings);
        assert_eq!(payload.large_text.as_deref(), Some("Faker#KR1 | Lvl 512"));

        let mut settings = Settings::default();
        settings.idle_profile.show_riot_id = false;
        settings.idle_profile.show_tag_line = false;
        let payload = idle_profile(&summoner(), &chat, &strings, &settings);
        assert_eq!(payload.large_text.as_deref(), Some("League of Legends"));
    }

    #[test]
    fn idle_profile_small_text_prefers_status_message() {
        let chat = ChatMe {
            availability: "chat".to_string(),
            status_message: "streaming!".to_string(),
            icon: 123,
        };
        let strings = LocaleStrings::default();
        let payload = idle_profile(&summoner(), &chat, &strings, &Settings::default());
        assert_eq!(payload.small_text.as_deref(), Some("streaming!"));
        assert!(payload.large_image.as_deref().unwrap().ends_with("/123.jpg"));
    }

    #[test]
    fn idle_custom_defaults_and_circle_toggle() {
        let chat = ChatMe {
            availability: "dnd".to_string(),
            ..Default::default()
        };
        let strings = LocaleStrings::default();

        // Defaults: "Chilling..." text with the status circle, no timer.
        let settings = Settings::default();
        let payload = idle_custom(&chat, &strings, &settings);
        assert_eq!(payload.details.as_deref(), Some("Chilling..."));
        assert!(payload.small_image.as_deref().unwrap().ends_with("/dnd.png"));
        assert_eq!(payload.small_text.as_deref(), Some("Do Not Disturb"));
        assert!(payload.start.is_none());

        let mut settings = Settings::default();
        settings.idle_custom.show_status_circle = false;
        settings.idle_custom.show_time_elapsed = true;
        settings.idle_custom.text = "brb".to_string();
        let payload = idle_custom(&chat, &strings, &settings);
        assert_eq!(payload.details.as_deref(), Some("brb"));
        assert!(payload.small_image.is_none());
        assert!(payload.small_text.is_none());
        assert!(payload.start.is_some());
    }

    fn ahri_skins() -> Vec<ChampionSkin> {
        serde_json::from_value(json!([
            {
                "id": 103000,
                "name": "Ahri",
                "isBase": true,
                "tilePath": "/lol-game-data/assets/ASSETS/base-tile.jpg",
                "uncenteredSplashPath": "/lol-game-data/assets/ASSETS/base-splash.jpg",
                "chromas": [],
                "questSkinInfo": {"tiers": []}
            },
            {
                "id": 103002,
                "name": "Midnight Ahri",
                "isBase": false,
                "tilePath": "/lol-game-data/assets/ASSETS/mid-tile.jpg",
                "uncenteredSplashPath": "/lol-game-data/assets/ASSETS/mid-splash.jpg",
                "chromas": [{"id": 103011}, {"id": 103012}],
                "questSkinInfo": {"tiers": []}
            },
            {
                "id": 103086,
                "name": "K/DA ALL OUT Ahri",
                "isBase": false,
                "tilePath": "/lol-game-data/assets/ASSETS/kda-tile.jpg",
                "uncenteredSplashPath": "/lol-game-data/assets/ASSETS/kda-splash.jpg",
                "collectionSplashVideoPath": "/lol-game-data/assets/ASSETS/kda-splash.webm",
                "chromas": [],
                "questSkinInfo": {"tiers": [
                    {
                        "id": 103087,
                        "name": "K/DA ALL OUT Ahri Prestige",
                        "isBase": false,
                        "tilePath": "/lol-game-data/assets/ASSETS/prestige-tile.jpg",
                        "uncenteredSplashPath": "/lol-game-data/assets/ASSETS/prestige-splash.jpg"
                    }
                ]}
            }
        ]))
        .unwrap()
    }

    #[test]
    fn resolve_base_skin_uses_default_tile() {
        let skin = resolve_skin(103, 103000, &ahri_skins()).unwrap();
        assert_eq!(skin.name, "Ahri");
        assert!(skin.tile.ends_with("/champion-tiles/103/103000.jpg"));
    }

    #[test]
    fn resolve_regular_skin() {
        let skin = resolve_skin(103, 103002, &ahri_skins()).unwrap();
        assert_eq!(skin.name, "Midnight Ahri");
        assert!(skin.tile.ends_with("assets/mid-tile.jpg"));
        assert!(skin.splash.ends_with("assets/mid-splash.jpg"));
    }

    #[test]
    fn resolve_chroma_falls_back_to_parent() {
        let skin = resolve_skin(103, 103012, &ahri_skins()).unwrap();
        assert_eq!(skin.name, "Midnight Ahri");
        assert_eq!(skin.skin_id, 103002);
    }

    #[test]
    fn resolve_quest_tier() {
        let skin = resolve_skin(103, 103087, &ahri_skins()).unwrap();
        assert_eq!(skin.name, "K/DA ALL OUT Ahri Prestige");
        assert!(skin.tile.ends_with("assets/prestige-tile.jpg"));
    }

    #[test]
    fn resolve_unknown_skin_is_none() {
        assert!(resolve_skin(103, 999999, &ahri_skins()).is_none());
    }

    #[test]
    fn animated_splash_applies_only_to_known_ids() {
        let settings = Settings::default();

        // 103086 is on the animated list and has a splash video.
        let mut skin = resolve_skin(103, 103086, &ahri_skins()).unwrap();
        apply_animated_splash(&mut skin, &settings);
        assert!(skin.tile.ends_with("/103086.gif"));
        assert!(skin.splash.ends_with("assets/kda-splash.webm"));

        // 103002 has no splash video.
        let mut skin = resolve_skin(103, 103002, &ahri_skins()).unwrap();
        apply_animated_splash(&mut skin, &settings);
        assert!(skin.tile.ends_with("assets/mid-tile.jpg"));

        // Opted out.
        let mut settings = Settings::default();
        settings.animated_splash = false;
        let mut skin = resolve_skin(103, 103086, &ahri_skins()).unwrap();
        apply_animated_splash(&mut skin, &settings);
        assert!(skin.tile.ends_with("assets/kda-tile.jpg"));
    }

    #[test]
    fn in_game_skin_state_line_with_stats() {
        let strings = LocaleStrings::default();
        let settings = Settings::default();
        let skin = resolve_skin(103, 103002, &ahri_skins()).unwrap();
        let stats = PlayerStats {
            kda: "5/1/7".to_string(),
            cs: 180,
            level: 12,
        };

        let payload = in_game_skin(
            &sr_map(),
            &ranked_queue(),
            &skin,
            None,
            Some(&stats),
            SystemTime::UNIX_EPOCH,
            &strings,
            &settings,
        );
        assert_eq!(payload.state.as_deref(), Some("In Game • 5/1/7 • 180cs • Lvl 12"));
        assert_eq!(payload.large_text.as_deref(), Some("Midnight Ahri"));
        assert!(payload.buttons.is_empty());
    }

    #[test]
    fn in_game_skin_stat_toggles_and_button() {
        let strings = LocaleStrings::default();
        let mut settings = Settings::default();
        settings.stats.cs = false;
        settings.stats.level = false;
        settings.show_view_art_button = true;
        let skin = resolve_skin(103, 103002, &ahri_skins()).unwrap();
        let stats = PlayerStats {
            kda: "0/0/0".to_string(),
            cs: 10,
            level: 3,
        };

        let payload = in_game_skin(
            &sr_map(),
            &ranked_queue(),
            &skin,
            None,
            Some(&stats),
            SystemTime::UNIX_EPOCH,
            &strings,
            &settings,
        );
        assert_eq!(payload.state.as_deref(), Some("In Game • 0/0/0"));
        assert_eq!(payload.buttons.len(), 1);
        assert_eq!(payload.buttons[0].label, "View Splash Art");
        assert!(payload.buttons[0].url.ends_with("assets/mid-splash.jpg"));
    }

    #[test]
    fn in_game_state_without_stats_is_just_in_game() {
        let strings = LocaleStrings::default();
        let settings = Settings::default();
        let skin = resolve_skin(103, 103000, &ahri_skins()).unwrap();
        let payload = in_game_skin(
            &sr_map(),
            &ranked_queue(),
            &skin,
            None,
            None,
            SystemTime::UNIX_EPOCH,
            &strings,
            &settings,
        );
        assert_eq!(payload.state.as_deref(), Some("In Game"));
    }

    #[test]
    fn swarm_payload_is_pve() {
        let strings = LocaleStrings::default();
        let mut map = sr_map();
        map.name = "Swarm".to_string();
        let payload = in_game_swarm(&map, 3147, "Riven", SystemTime::UNIX_EPOCH, &strings);
        assert_eq!(payload.details.as_deref(), Some("Swarm (PvE)"));
        assert!(payload.large_image.as_deref().unwrap().ends_with("/3147/3147000.jpg"));
        assert_eq!(payload.large_text.as_deref(), Some("Riven"));
    }

    #[test]
    fn locale_strings_from_cdn_with_fallbacks() {
        let mut discord = HashMap::new();
        discord.insert("Disc_Pres_State_inGame".to_string(), "Đang trong trận".to_string());
        discord.insert("Disc_Pres_State_hosting".to_string(), "  ".to_string());
        let mut chat = HashMap::new();
        chat.insert("availability_away".to_string(), "Vắng mặt".to_string());

        let strings = LocaleStrings::from_cdn(&discord, &chat);
        assert_eq!(strings.in_game, "Đang trong trận");
        assert_eq!(strings.lobby, "In Lobby"); // blank value keeps default
        assert_eq!(strings.away, "Vắng mặt");
        assert_eq!(strings.dnd, "Do Not Disturb");
        assert_eq!(strings.availability("AWAY"), "Vắng mặt");
        assert_eq!(strings.availability("chat"), "Online");
        assert_eq!(strings.availability("mobile"), "mobile");
    }
}
