mod app;
mod assets;
mod disabler;
mod lcu;
mod live;
mod logging;
mod presence;
mod settings;
mod status;

use std::time::Duration;

use presence::{DiscordPresence, PresenceProvider};
use settings::Settings;

#[tokio::main]
async fn main() {
    let _log_guard = logging::init_logging();

    let settings = Settings::load();
    if settings.rpc_muted {
        tracing::info!("Rich Presence is muted, only clears will be sent");
    }

    let providers: Vec<Box<dyn PresenceProvider>> = vec![Box::new(DiscordPresence::start())];

    tokio::select! {
        _ = app::run(settings, &providers) => {
            tracing::info!("League client session ended");
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    for provider in &providers {
        provider.clear_presence();
    }
    // Dropping the providers ends the Discord task; give it a moment to
    // flush the final clear over the IPC pipe.
    tokio::time::sleep(Duration::from_millis(300)).await;
}
