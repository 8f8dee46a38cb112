//! Discord Rich Presence integration using discord-sdk

use std::num::NonZeroU32;
use std::time::Duration;

use discord_sdk::{
    activity::{ActivityBuilder, Assets, Button, PartyPrivacy},
    wheel::{UserState, Wheel},
    Discord, Subscriptions,
};
use tokio::sync::mpsc;

use super::{Payload, PresenceProvider};

/// Discord Application ID used for the League presence.
const DISCORD_APP_ID: i64 = 401518684763586560;

/// Timeout for waiting for Discord handshake
const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);

/// Delay between connection attempts when Discord is not running.
const RECONNECT_DELAY: Duration = Duration::from_secs(15);

enum Command {
    Update(Box<Payload>),
    Clear,
}

/// Manages the Discord connection and background task.
///
/// All updates funnel through one channel into a single consumer task, so
/// calls into the Discord IPC pipe are serialized.
pub struct DiscordPresence {
    update_tx: mpsc::UnboundedSender<Command>,
}

impl DiscordPresence {
    /// Spawn the background task that owns the Discord connection.
    pub fn start() -> Self {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        tokio::spawn(run_discord_task(update_rx));
        Self { update_tx }
    }
}

impl PresenceProvider for DiscordPresence {
    fn name(&self) -> &'static str {
        "Discord"
    }

    fn update_presence(&self, payload: &Payload) {
        let _ = self.update_tx.send(Command::Update(Box::new(payload.clone())));
    }

    fn clear_presence(&self) {
        let _ = self.update_tx.send(Command::Clear);
    }
}

/// Background task that maintains the Discord connection and processes
/// presence updates. Reconnects with a delay whenever the pipe drops.
async fn run_discord_task(mut update_rx: mpsc::UnboundedReceiver<Command>) {
    loop {
        let discord = match connect().await {
            Some(d) => d,
            None => {
                // Drain anything queued while Discord is down so a stale
                // update is not replayed minutes later.
                while update_rx.try_recv().is_ok() {}
                tokio::time::sleep(RECONNECT_DELAY).await;
                continue;
            }
        };

        let mut pipe_broken = false;
        while let Some(command) = update_rx.recv().await {
            let result = match command {
                Command::Update(payload) => {
                    discord.update_activity(build_activity(&payload)).await
                }
                Command::Clear => discord.clear_activity().await,
            };

            if let Err(e) = result {
                tracing::warn!("Discord activity call failed, reconnecting: {:?}", e);
                pipe_broken = true;
                break;
            }
        }

        discord.disconnect().await;
        if !pipe_broken {
            // Sender side dropped: the app is shutting down.
            tracing::info!("Discord Rich Presence disconnected");
            return;
        }
        tokio::time::sleep(RECONNECT_DELAY).await;
    }
}

async fn connect() -> Option<Discord> {
    let (wheel, handler) = Wheel::new(Box::new(|err| {
        tracing::warn!("Discord error: {:?}", err);
    }));

    let mut user_spoke = wheel.user();

    let discord = match Discord::new(DISCORD_APP_ID, Subscriptions::ACTIVITY, Box::new(handler)) {
        Ok(d) => d,
        Err(e) => {
            tracing::warn!("Discord not available: {:?}", e);
            return None;
        }
    };

    tracing::info!("Discord connecting...");

    let user = match tokio::time::timeout(HANDSHAKE_TIMEOUT, async {
        if user_spoke.0.changed().await.is_err() {
            Err("Discord connection closed".to_string())
        } else {
            match &*user_spoke.0.borrow() {
                UserState::Connected(user) => Ok(user.clone()),
                UserState::Disconnected(err) => Err(format!("Discord disconnected: {:?}", err)),
            }
        }
    })
    .await
    {
        Ok(Ok(user)) => user,
        Ok(Err(e)) => {
            tracing::warn!("{}", e);
            return None;
        }
        Err(_) => {
            tracing::warn!("Discord handshake timed out");
            return None;
        }
    };

    tracing::info!("Discord Rich Presence connected as {}", user.username);
    Some(discord)
}

fn build_activity(payload: &Payload) -> ActivityBuilder {
    let mut activity = ActivityBuilder::new();

    if let Some(details) = &payload.details {
        activity = activity.details(details);
    }
    if let Some(state) = &payload.state {
        activity = activity.state(state);
    }

    let mut assets = Assets::default();
    if let Some(large) = &payload.large_image {
        assets = assets.large(large, payload.large_text.as_deref());
    }
    if let Some(small) = &payload.small_image {
        assets = assets.small(small, payload.small_text.as_deref());
    }
    activity = activity.assets(assets);

    if let Some(start) = payload.start {
        activity = activity.timestamps(Some(start), None::<std::time::SystemTime>);
    }

    if let Some((current, max)) = payload.party {
        activity = activity.party(
            "lobby",
            NonZeroU32::new(current),
            NonZeroU32::new(max),
            PartyPrivacy::Private,
        );
    }

    for button in &payload.buttons {
        activity = activity.button(Button {
            label: button.label.clone(),
            url: button.url.clone(),
        });
    }

    activity
}
