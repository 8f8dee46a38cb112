//! Ties the LCU feeds to the presence providers.
//!
//! One task owns everything: LCU events, the in-game ticker and the delayed
//! idle confirmation all run through a single `select!` loop, so state never
//! needs locking. Network hiccups are logged and the loop keeps going.

use std::path::Path;
use std::time::{Duration, SystemTime};

use tokio::time::{sleep, sleep_until, Instant, MissedTickBehavior};

use crate::disabler;
use crate::lcu::types::{
    ChampSelectSession, ChampionMinimal, ChampionSkin, ChatMe, CurrentSummoner, GameflowPhase,
    GameflowSession, MapInfo, PracticeToolMap, QueueInfo, RankedStats, RegionLocale, TftCompanions,
};
use crate::lcu::{EventKind, EventSocket, LcuClient, LcuError, LcuEvent, Lockfile};
use crate::live::LiveClient;
use crate::presence::{Payload, PresenceProvider};
use crate::settings::{IdleStatus, Settings};
use crate::status::{self, LocaleStrings};
use crate::assets;

const LOCKFILE_POLL: Duration = Duration::from_secs(3);
const CLIENT_RETURN_GRACE: Duration = Duration::from_secs(10);
const SUMMONER_FETCH_TIMEOUT: Duration = Duration::from_secs(30);
const SUMMONER_FETCH_RETRY: Duration = Duration::from_secs(2);
const IDLE_CONFIRM_DELAY: Duration = Duration::from_millis(1500);
const IN_GAME_TICK: Duration = Duration::from_secs(2);

const GAMEFLOW_PHASE_URI: &str = "/lol-gameflow/v1/gameflow-phase";
const GAMEFLOW_SESSION_URI: &str = "/lol-gameflow/v1/session";
const CHAT_ME_URI: &str = "/lol-chat/v1/me";
const CHAMP_SELECT_URI: &str = "/lol-champ-select/v1/session";

const DEFAULT_LOCALE: &str = "en_us";
const SWARM_MAP_ID: i64 = 33;

/// Swarm player characters use their own champion ids; the display name
/// lives on the regular champion they are based on.
fn swarm_champion(swarm_champ_id: i64) -> Option<i64> {
    Some(match swarm_champ_id {
        3147 => 92,
        3151 => 222,
        3152 => 89,
        3153 => 147,
        3156 => 233,
        3157 => 157,
        3159 => 893,
        3678 => 420,
        3947 => 498,
        _ => return None,
    })
}

/// The REST phase can lag behind the event stream right after a game ends;
/// when the stream already said idle, believe the stream.
fn effective_phase(rest: GameflowPhase, last_event: Option<GameflowPhase>) -> GameflowPhase {
    match last_event {
        Some(last) if rest.is_active() && last.is_idle_or_post_game() => last,
        _ => rest,
    }
}

fn push_to(providers: &[Box<dyn PresenceProvider>], muted: bool, payload: &Payload) {
    if muted {
        clear_all(providers);
        return;
    }
    for provider in providers {
        provider.update_presence(payload);
    }
}

fn clear_all(providers: &[Box<dyn PresenceProvider>]) {
    for provider in providers {
        provider.clear_presence();
    }
}

/// Top-level loop: wait for the client, run a session until its socket
/// closes, then give the client a grace window to come back before exiting
/// (patches restart the client briefly).
pub async fn run(settings: Settings, providers: &[Box<dyn PresenceProvider>]) {
    let league_dir = settings.league_install_dir();
    {
        let dir = league_dir.clone();
        tokio::spawn(async move { disabler::disable_native_presence(&dir).await });
    }

    let mut reconnecting = false;
    // Survives reconnects so the refresh conflict rule can consult the last
    // phase the previous session's event stream reported.
    let mut last_phase: Option<GameflowPhase> = None;
    loop {
        let grace = reconnecting.then_some(CLIENT_RETURN_GRACE);
        let Some(lockfile) = wait_for_lockfile(&league_dir, grace).await else {
            tracing::info!("League client did not come back, exiting");
            break;
        };

        let mut events = match EventSocket::connect(&lockfile).await {
            Ok(events) => events,
            Err(e) => {
                tracing::warn!("Could not open the LCU event socket: {}", e);
                reconnecting = true;
                sleep(LOCKFILE_POLL).await;
                continue;
            }
        };

        let mut app = match App::connect(&settings, providers, &lockfile).await {
            Ok(app) => app,
            Err(e) => {
                tracing::warn!("Could not initialize the LCU session: {}", e);
                reconnecting = true;
                sleep(LOCKFILE_POLL).await;
                continue;
            }
        };
        app.last_phase = last_phase;

        tracing::info!(
            "Connected to the League client on port {} as {}",
            lockfile.port,
            app.summoner.name()
        );
        app.run_session(&mut events).await;
        last_phase = app.last_phase;

        tracing::info!("League client connection lost, clearing presence");
        clear_all(providers);
        reconnecting = true;
    }

    clear_all(providers);
}

/// Resolves to a lockfile, polling until one is readable. With a deadline
/// set, gives up after it elapses.
async fn wait_for_lockfile(league_dir: &Path, deadline: Option<Duration>) -> Option<Lockfile> {
    let started = Instant::now();
    let mut logged = false;
    loop {
        match Lockfile::read(league_dir) {
            Ok(lockfile) => return Some(lockfile),
            Err(LcuError::LockfileRead(_)) => {}
            Err(e) => tracing::debug!("Lockfile not usable yet: {}", e),
        }

        if !logged {
            tracing::info!("Waiting for the League client at {}", league_dir.display());
            logged = true;
        }
        if let Some(limit) = deadline {
            if started.elapsed() >= limit {
                return None;
            }
            sleep(Duration::from_secs(1)).await;
        } else {
            sleep(LOCKFILE_POLL).await;
        }
    }
}

#[derive(Clone)]
struct InGameContext {
    map: MapInfo,
    queue: QueueInfo,
    map_icon: Option<String>,
    start: SystemTime,
}

struct App<'a> {
    settings: &'a Settings,
    providers: &'a [Box<dyn PresenceProvider>],
    lcu: LcuClient,
    live: LiveClient,
    summoner: CurrentSummoner,
    strings: LocaleStrings,
    /// Last phase seen on the event stream, for the refresh conflict rule.
    last_phase: Option<GameflowPhase>,
    /// Local player's champ-select pick: `(championId, selectedSkinId)`.
    champ_selection: Option<(i64, i64)>,
    in_game: Option<InGameContext>,
    idle_deadline: Option<Instant>,
}

impl<'a> App<'a> {
    async fn connect(
        settings: &'a Settings,
        providers: &'a [Box<dyn PresenceProvider>],
        lockfile: &Lockfile,
    ) -> Result<App<'a>, LcuError> {
        let lcu = LcuClient::connect(lockfile)?;
        let live = LiveClient::new()?;

        let summoner = fetch_summoner(&lcu).await?;

        let locale = match lcu.get::<RegionLocale>("/riotclient/region-locale").await {
            Ok(region) if !region.locale.is_empty() => region.locale.to_lowercase(),
            Ok(_) => DEFAULT_LOCALE.to_string(),
            Err(e) => {
                tracing::warn!("Could not read region locale, using {}: {}", DEFAULT_LOCALE, e);
                DEFAULT_LOCALE.to_string()
            }
        };
        let strings = load_locale_strings(&lcu, &locale).await;

        Ok(App {
            settings,
            providers,
            lcu,
            live,
            summoner,
            strings,
            last_phase: None,
            champ_selection: None,
            in_game: None,
            idle_deadline: None,
        })
    }

    /// Runs until the event socket closes.
    async fn run_session(&mut self, events: &mut EventSocket) {
        self.refresh_presence().await;

        let mut ticker = tokio::time::interval(IN_GAME_TICK);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            let idle_deadline = self.idle_deadline;
            let in_game = self.in_game.is_some();

            tokio::select! {
                event = events.recv() => match event {
                    Some(event) => self.handle_event(event).await,
                    None => break,
                },
                _ = async { sleep_until(idle_deadline.unwrap_or_else(Instant::now)).await },
                        if idle_deadline.is_some() => {
                    self.idle_deadline = None;
                    self.confirm_idle().await;
                }
                _ = ticker.tick(), if in_game => self.tick_in_game().await,
            }
        }
    }

    /// Initial presence after (re)connecting, driven by a REST phase check.
    async fn refresh_presence(&mut self) {
        let rest_phase = match self.lcu.get::<GameflowPhase>(GAMEFLOW_PHASE_URI).await {
            Ok(phase) => phase,
            Err(e) => {
                tracing::warn!("Could not read gameflow phase on refresh: {}", e);
                self.clear();
                return;
            }
        };

        let phase = effective_phase(rest_phase, self.last_phase);
        if phase.is_active() {
            match self.lcu.get::<GameflowSession>(GAMEFLOW_SESSION_URI).await {
                Ok(session) => self.handle_gameflow(session).await,
                Err(e) => tracing::warn!("Could not read gameflow session on refresh: {}", e),
            }
        } else if phase.is_idle_or_post_game() {
            self.idle_deadline = Some(Instant::now() + IDLE_CONFIRM_DELAY);
        } else {
            tracing::debug!("Refresh in unhandled phase {:?}, leaving presence as-is", phase);
        }
    }

    async fn handle_event(&mut self, event: LcuEvent) {
        match event.uri.as_str() {
            GAMEFLOW_SESSION_URI => {
                let session = if event.kind == EventKind::Delete || event.data.is_null() {
                    GameflowSession {
                        phase: Some(GameflowPhase::None),
                        ..GameflowSession::default()
                    }
                } else {
                    match serde_json::from_value(event.data) {
                        Ok(session) => session,
                        Err(e) => {
                            tracing::warn!("Bad gameflow session payload: {}", e);
                            return;
                        }
                    }
                };
                self.handle_gameflow(session).await;
            }
            CHAT_ME_URI => {
                if event.data.is_null() {
                    return;
                }
                match serde_json::from_value(event.data) {
                    Ok(chat) => self.handle_chat(chat).await,
                    Err(e) => tracing::warn!("Bad chat payload: {}", e),
                }
            }
            CHAMP_SELECT_URI => {
                if event.data.is_null() {
                    return;
                }
                match serde_json::from_value::<ChampSelectSession>(event.data) {
                    Ok(session) => self.record_champ_selection(&session),
                    Err(e) => tracing::debug!("Bad champ-select payload: {}", e),
                }
            }
            other => tracing::trace!("Ignoring event for {}", other),
        }
    }

    async fn handle_gameflow(&mut self, session: GameflowSession) {
        let phase = session.phase.unwrap_or(GameflowPhase::None);
        tracing::info!("Gameflow phase: {:?}", phase);
        self.last_phase = Some(phase);
        self.idle_deadline = None;
        if !matches!(
            phase,
            GameflowPhase::InProgress
                | GameflowPhase::PreEndOfGame
                | GameflowPhase::EndOfGame
                | GameflowPhase::WaitingForStats
        ) {
            self.in_game = None;
        }

        if self.settings.rpc_muted {
            self.clear();
            return;
        }

        if phase.is_active() {
            self.handle_active_phase(phase, session).await;
        } else if phase.is_idle_or_post_game() {
            self.idle_deadline = Some(Instant::now() + IDLE_CONFIRM_DELAY);
        } else {
            tracing::debug!("No presence mapping for phase {:?}", phase);
        }
    }

    async fn handle_active_phase(&mut self, phase: GameflowPhase, session: GameflowSession) {
        let map = session.map;
        let queue = session.game_data.queue;
        let map_icon = map
            .asset(self.settings.map_icon_style.asset_key())
            .or_else(|| map.asset("game-select-icon-active"))
            .map(str::to_string);

        match phase {
            GameflowPhase::Lobby => {
                // An empty parties-service lobby reports map 0 with no name.
                if queue.map_id == 0 && map.name.is_empty() {
                    self.clear();
                    return;
                }
                let members = self.lobby_member_count().await;
                let rank = self.fetch_rank(&queue.queue_type).await;
                let payload = status::lobby(
                    &map,
                    &queue,
                    map_icon.as_deref(),
                    rank,
                    members,
                    &self.strings,
                    self.settings,
                );
                self.push(&payload);
            }
            GameflowPhase::Matchmaking => {
                let rank = self.fetch_rank(&queue.queue_type).await;
                let payload =
                    status::matchmaking(&map, &queue, map_icon.as_deref(), rank, &self.strings);
                self.push(&payload);
            }
            GameflowPhase::ChampSelect => {
                let rank = self.fetch_rank(&queue.queue_type).await;
                let payload =
                    status::champ_select(&map, &queue, map_icon.as_deref(), rank, &self.strings);
                self.push(&payload);
            }
            GameflowPhase::InProgress => {
                self.in_game = Some(InGameContext {
                    map,
                    queue,
                    map_icon,
                    start: SystemTime::now(),
                });
                self.tick_in_game().await;
            }
            _ => {}
        }
    }

    /// One in-game refresh: rank, then the mode-specific large image and
    /// state line. A not-yet-ready live API just means no stats this tick.
    async fn tick_in_game(&mut self) {
        let Some(ctx) = self.in_game.clone() else {
            return;
        };
        let rank = self.fetch_rank(&ctx.queue.queue_type).await;

        let payload = if ctx.map.map_string_id == "TFT" {
            self.tft_payload(&ctx, rank).await
        } else if ctx.map.id == SWARM_MAP_ID {
            self.swarm_payload(&ctx, rank).await
        } else {
            self.skin_payload(&ctx, rank).await
        };
        self.push(&payload);
    }

    async fn tft_payload(&self, ctx: &InGameContext, rank: Option<(String, String)>) -> Payload {
        if self.settings.use_skin_splash {
            match self
                .lcu
                .get::<TftCompanions>("/lol-cosmetics/v1/inventories/tft/companions")
                .await
            {
                Ok(companions) => {
                    let companion = companions.selected_loadout_item;
                    return status::in_game_tft(
                        &ctx.map,
                        &ctx.queue,
                        &companion.name,
                        &companion.loadouts_icon,
                        rank,
                        ctx.start,
                        &self.strings,
                        self.settings,
                    );
                }
                Err(e) => tracing::debug!("Could not read TFT companion: {}", e),
            }
        }
        status::in_game_map(&ctx.map, &ctx.queue, ctx.map_icon.as_deref(), rank, ctx.start, &self.strings)
    }

    async fn swarm_payload(&self, ctx: &InGameContext, rank: Option<(String, String)>) -> Payload {
        if let Some((champ_id, _)) = self.champ_selection {
            if let Some(base_champion) = swarm_champion(champ_id) {
                let path = format!(
                    "/lol-champions/v1/inventories/{}/champions/{}",
                    self.summoner.summoner_id, base_champion
                );
                match self.lcu.get::<ChampionMinimal>(&path).await {
                    Ok(champion) => {
                        return status::in_game_swarm(
                            &ctx.map,
                            champ_id,
                            &champion.name,
                            ctx.start,
                            &self.strings,
                        );
                    }
                    Err(e) => tracing::debug!("Could not read Swarm champion name: {}", e),
                }
            } else {
                tracing::debug!("Unknown Swarm character id {}", champ_id);
            }
        }
        status::in_game_map(&ctx.map, &ctx.queue, ctx.map_icon.as_deref(), rank, ctx.start, &self.strings)
    }

    async fn skin_payload(&self, ctx: &InGameContext, rank: Option<(String, String)>) -> Payload {
        let fallback = |rank| {
            status::in_game_map(&ctx.map, &ctx.queue, ctx.map_icon.as_deref(), rank, ctx.start, &self.strings)
        };

        let Some((champ_id, selected_skin)) = self.champ_selection else {
            return fallback(rank);
        };
        if champ_id <= 0 {
            return fallback(rank);
        }

        let skin_id = if self.settings.use_skin_splash {
            selected_skin
        } else {
            champ_id * 1000
        };

        let path = format!(
            "/lol-champions/v1/inventories/{}/champions/{}/skins",
            self.summoner.summoner_id, champ_id
        );
        let skins = match self.lcu.get::<Vec<ChampionSkin>>(&path).await {
            Ok(skins) => skins,
            Err(e) => {
                tracing::debug!("Could not read champion skins: {}", e);
                return fallback(rank);
            }
        };

        let Some(mut skin) = status::resolve_skin(champ_id, skin_id, &skins) else {
            tracing::debug!("Skin {} not found for champion {}", skin_id, champ_id);
            return fallback(rank);
        };
        status::apply_animated_splash(&mut skin, self.settings);

        let stats = self.live.active_player_stats().await;
        status::in_game_skin(
            &ctx.map,
            &ctx.queue,
            &skin,
            rank,
            stats.as_ref(),
            ctx.start,
            &self.strings,
            self.settings,
        )
    }

    /// Chat availability only drives the presence while nothing else does.
    async fn handle_chat(&mut self, chat: ChatMe) {
        if self.settings.rpc_muted {
            self.clear();
            return;
        }

        match self.lcu.get::<GameflowPhase>(GAMEFLOW_PHASE_URI).await {
            Ok(phase) if phase.is_active() || phase.is_post_game() => {
                tracing::debug!("Chat update in phase {:?}, gameflow owns the presence", phase);
                return;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!("Could not read gameflow phase for chat update: {}", e);
                return;
            }
        }
        if self.idle_deadline.is_some() {
            return;
        }
        self.in_game = None;
        self.apply_idle(&chat);
    }

    /// Runs after the idle delay: if the phase is still idle, show the
    /// configured idle presence; post-game clears instead.
    async fn confirm_idle(&mut self) {
        if self.settings.rpc_muted {
            self.clear();
            return;
        }

        let phase = match self.lcu.get::<GameflowPhase>(GAMEFLOW_PHASE_URI).await {
            Ok(phase) => phase,
            Err(e) => {
                tracing::warn!("Could not confirm idle phase: {}", e);
                self.clear();
                return;
            }
        };
        if !phase.is_idle_or_post_game() {
            tracing::debug!("Phase moved to {:?} before idle applied, skipping", phase);
            return;
        }
        if phase.is_post_game() {
            self.clear();
            return;
        }

        match self.lcu.get::<ChatMe>(CHAT_ME_URI).await {
            Ok(chat) => self.apply_idle(&chat),
            Err(e) => {
                tracing::warn!("Could not read chat state for idle presence: {}", e);
                self.clear();
            }
        }
    }

    fn apply_idle(&self, chat: &ChatMe) {
        match self.settings.idle_status {
            IdleStatus::Disabled => self.clear(),
            IdleStatus::Profile => {
                let payload = status::idle_profile(&self.summoner, chat, &self.strings, self.settings);
                self.push(&payload);
            }
            IdleStatus::Custom => {
                let payload = status::idle_custom(chat, &self.strings, self.settings);
                self.push(&payload);
            }
        }
    }

    fn record_champ_selection(&mut self, session: &ChampSelectSession) {
        for player in &session.my_team {
            if player.summoner_id == self.summoner.summoner_id {
                self.champ_selection = Some((player.champion_id, player.selected_skin_id));
                tracing::debug!(
                    "Champ selection: champion {} skin {}",
                    player.champion_id,
                    player.selected_skin_id
                );
                break;
            }
        }
    }

    async fn lobby_member_count(&self) -> u32 {
        use crate::lcu::types::LobbyMember;
        match self.lcu.get::<Vec<LobbyMember>>("/lol-lobby/v2/lobby/members").await {
            Ok(members) => members.len() as u32,
            Err(LcuError::NotFound) => 0,
            Err(e) => {
                tracing::debug!("Could not read lobby members: {}", e);
                0
            }
        }
    }

    async fn fetch_rank(&self, queue_type: &str) -> Option<(String, String)> {
        if !self.settings.show_ranks.enabled_for(queue_type) {
            return None;
        }
        match self.lcu.get::<RankedStats>("/lol-ranked/v1/current-ranked-stats").await {
            Ok(stats) => status::rank_line(&stats, queue_type, self.settings),
            Err(e) => {
                tracing::debug!("Could not read ranked stats: {}", e);
                None
            }
        }
    }

    fn push(&self, payload: &Payload) {
        push_to(self.providers, self.settings.rpc_muted, payload);
    }

    fn clear(&self) {
        clear_all(self.providers);
    }
}

async fn fetch_summoner(lcu: &LcuClient) -> Result<CurrentSummoner, LcuError> {
    let deadline = Instant::now() + SUMMONER_FETCH_TIMEOUT;
    loop {
        match lcu.get::<CurrentSummoner>("/lol-summoner/v1/current-summoner").await {
            Ok(summoner) if summoner.summoner_id != 0 => return Ok(summoner),
            Ok(_) => tracing::debug!("Summoner data incomplete, retrying"),
            Err(LcuError::NotFound) => tracing::debug!("Summoner not available yet (404)"),
            Err(e) => tracing::warn!("Could not fetch summoner: {}", e),
        }
        if Instant::now() >= deadline {
            tracing::error!("Timed out waiting for summoner data");
            return Err(LcuError::NotFound);
        }
        sleep(SUMMONER_FETCH_RETRY).await;
    }
}

/// CDN-localized strings for the player's locale, plus the client's own
/// display name for Practice Tool. Falls back to English on any failure.
async fn load_locale_strings(lcu: &LcuClient, locale: &str) -> LocaleStrings {
    let discord_strings = fetch_string_map(&assets::discord_strings_url(locale)).await;
    let chat_strings = fetch_string_map(&assets::chat_strings_url(locale)).await;

    let (Some(discord_strings), Some(chat_strings)) = (discord_strings, chat_strings) else {
        tracing::warn!("Could not load locale strings for {}, using English", locale);
        return LocaleStrings::default();
    };

    let mut strings = LocaleStrings::from_cdn(&discord_strings, &chat_strings);
    match lcu.get::<PracticeToolMap>("/lol-maps/v2/map/11/PRACTICETOOL").await {
        Ok(map) if !map.game_mode_name.trim().is_empty() => {
            strings.practice_tool = map.game_mode_name.trim().to_string();
        }
        Ok(_) => {}
        Err(e) => tracing::debug!("Could not read Practice Tool name: {}", e),
    }
    strings
}

async fn fetch_string_map(url: &str) -> Option<std::collections::HashMap<String, String>> {
    let value: serde_json::Value = match reqwest::get(url).await {
        Ok(response) => match response.json().await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Bad locale strings payload from {}: {}", url, e);
                return None;
            }
        },
        Err(e) => {
            tracing::warn!("Could not fetch {}: {}", url, e);
            return None;
        }
    };

    Some(
        value
            .as_object()?
            .iter()
            .filter_map(|(key, value)| Some((key.clone(), value.as_str()?.to_string())))
            .collect(),
    )
}
