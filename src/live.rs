//! Live Client Data API (`https://127.0.0.1:2999/liveclientdata`).
//!
//! Only reachable while a game is actually running; during the loading
//! screen the port answers with 404s or refuses connections. Both are
//! treated as "not ready" and never logged above debug to avoid spamming
//! while the player sits in the loading screen.

use std::time::Duration;

use serde::Deserialize;

const LIVE_CLIENT_BASE: &str = "https://127.0.0.1:2999/liveclientdata";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(1);

/// KDA/CS/level of the local player, as shown in the in-game state line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerStats {
    pub kda: String,
    pub cs: u64,
    pub level: u64,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct LivePlayer {
    riot_id: String,
    summoner_name: String,
    level: u64,
    scores: LiveScores,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct LiveScores {
    kills: u64,
    deaths: u64,
    assists: u64,
    creep_score: u64,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct GameStats {
    game_time: f64,
}

pub struct LiveClient {
    http: reqwest::Client,
}

impl LiveClient {
    pub fn new() -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { http })
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> Option<T> {
        let url = format!("{LIVE_CLIENT_BASE}/{endpoint}");
        let response = match self.http.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!("Live client API unreachable ({}): {}", endpoint, e);
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::debug!(
                "Live client API {} returned {}, likely loading screen",
                endpoint,
                response.status()
            );
            return None;
        }

        match response.json().await {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!("Live client API {} returned bad JSON: {}", endpoint, e);
                None
            }
        }
    }

    /// `None` until the game has actually started ticking.
    pub async fn game_time(&self) -> Option<f64> {
        let stats: GameStats = self.get("gamestats").await?;
        started_game_time(stats.game_time)
    }

    /// Stats for the local player, or `None` while the API is not ready.
    /// The endpoints answer during the loading screen too, so nothing is
    /// trusted until the game clock is running.
    pub async fn active_player_stats(&self) -> Option<PlayerStats> {
        self.game_time().await?;
        let name: String = self.get("activeplayername").await?;
        let players: Vec<LivePlayer> = self.get("playerlist").await?;
        find_player_stats(&name, &players)
    }
}

fn started_game_time(game_time: f64) -> Option<f64> {
    (game_time >= 1.0).then_some(game_time)
}

fn find_player_stats(active_name: &str, players: &[LivePlayer]) -> Option<PlayerStats> {
    let player = players
        .iter()
        .find(|p| p.riot_id == active_name || p.summoner_name == active_name)?;

    Some(PlayerStats {
        kda: format!(
            "{}/{}/{}",
            player.scores.kills, player.scores.deaths, player.scores.assists
        ),
        cs: player.scores.creep_score,
        level: player.level,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn player_list() -> Vec<LivePlayer> {
        serde_json::from_value(json!([
            {
                "riotId": "Faker#KR1",
                "summonerName": "Faker",
                "level": 12,
                "scores": {"kills": 5, "deaths": 1, "assists": 7, "creepScore": 180}
            },
            {
                "riotId": "Enemy#EUW",
                "summonerName": "Enemy",
                "level": 11,
                "scores": {"kills": 1, "deaths": 5, "assists": 2, "creepScore": 140}
            }
        ]))
        .unwrap()
    }

    #[test]
    fn stats_found_by_riot_id() {
        let stats = find_player_stats("Faker#KR1", &player_list()).unwrap();
        assert_eq!(stats.kda, "5/1/7");
        assert_eq!(stats.cs, 180);
        assert_eq!(stats.level, 12);
    }

    #[test]
    fn stats_found_by_legacy_summoner_name() {
        let stats = find_player_stats("Enemy", &player_list()).unwrap();
        assert_eq!(stats.kda, "1/5/2");
    }

    #[test]
    fn missing_player_yields_none() {
        assert!(find_player_stats("Nobody#NA1", &player_list()).is_none());
    }

    #[test]
    fn game_time_below_one_second_is_not_ready() {
        assert!(started_game_time(0.0).is_none());
        assert!(started_game_time(0.99).is_none());
        assert_eq!(started_game_time(1.0), Some(1.0));
        assert_eq!(started_game_time(754.2), Some(754.2));
    }

    #[test]
    fn player_list_tolerates_missing_scores() {
        let players: Vec<LivePlayer> =
            serde_json::from_value(json!([{"riotId": "A#1"}])).unwrap();
        let stats = find_player_stats("A#1", &players).unwrap();
        assert_eq!(stats.kda, "0/0/0");
        assert_eq!(stats.cs, 0);
    }
}
