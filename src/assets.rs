//! CommunityDragon URL construction for the images shown in the presence.
//!
//! All assets are referenced by URL; nothing is downloaded by this module.

const CDRAGON_BASE: &str = "https://raw.communitydragon.org/latest/plugins";

const ANIMATED_SPLASH_BASE: &str =
    "https://raw.githubusercontent.com/developers192/DetailedLoLRPC/refs/heads/master/animatedSplashes";

/// Skins with a hosted animated splash rendition.
pub const ANIMATED_SPLASH_IDS: &[i64] = &[
    99007, 360030, 147001, 147002, 147003, 103086, 21016, 77003, 37006, 81005,
];

/// Maps a client asset path (`/lol-game-data/assets/...`) onto the raw
/// CommunityDragon mirror, which serves the same tree lowercased.
pub fn raw_asset(client_path: &str) -> String {
    let tail = client_path
        .trim_start_matches("/lol-game-data/assets")
        .trim_start_matches('/')
        .to_lowercase();
    format!("{CDRAGON_BASE}/rcp-be-lol-game-data/global/default/{tail}")
}

/// Gameflow map icons come through the session payload as asset paths.
pub fn map_icon(asset_path: &str) -> String {
    raw_asset(asset_path)
}

pub fn profile_icon(icon_id: i64) -> String {
    format!("{CDRAGON_BASE}/rcp-be-lol-game-data/global/default/v1/profile-icons/{icon_id}.jpg")
}

pub fn skin_tile(champion_id: i64, skin_id: i64) -> String {
    format!("{CDRAGON_BASE}/rcp-be-lol-game-data/global/default/v1/champion-tiles/{champion_id}/{skin_id}.jpg")
}

/// Tile of a champion's base skin (skin id is always champion id * 1000).
pub fn default_tile(champion_id: i64) -> String {
    skin_tile(champion_id, champion_id * 1000)
}

pub fn ranked_emblem(tier: &str) -> String {
    format!(
        "{CDRAGON_BASE}/rcp-fe-lol-static-assets/global/default/images/ranked-mini-regalia/{}.png",
        tier.to_lowercase()
    )
}

/// Small status circle for the chat availability (`chat`, `away`, `dnd`).
pub fn availability_icon(availability: &str) -> String {
    format!(
        "{CDRAGON_BASE}/rcp-fe-lol-social/global/default/images/status/{}.png",
        availability.to_lowercase()
    )
}

/// Generic League icon, used when no profile icon is available.
pub fn league_icon() -> String {
    availability_icon("leagueicon")
}

pub fn tft_companion_icon(loadouts_icon_path: &str) -> String {
    raw_asset(loadouts_icon_path)
}

pub fn animated_splash(skin_id: i64) -> String {
    format!("{ANIMATED_SPLASH_BASE}/{skin_id}.gif")
}

pub fn discord_strings_url(locale: &str) -> String {
    format!("{CDRAGON_BASE}/rcp-be-lol-game-data/global/{locale}/v1/discord_strings.json")
}

pub fn chat_strings_url(locale: &str) -> String {
    format!("{CDRAGON_BASE}/rcp-fe-lol-social/global/{locale}/trans.json")
}
