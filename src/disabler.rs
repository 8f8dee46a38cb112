//! Disables the League client's built-in Discord presence plugin.
//!
//! The client ships `rcp-be-lol-discord-rp` in its plugin manifest and
//! re-deploys the manifest during patching, so the stripped copy is written
//! repeatedly until the client has started (it only reads the manifest at
//! launch) or a timeout passes.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde_json::Value;

use crate::lcu::Lockfile;

const NATIVE_PRESENCE_PLUGIN: &str = "rcp-be-lol-discord-rp";
const REWRITE_TIMEOUT: Duration = Duration::from_secs(60);
const REWRITE_INTERVAL: Duration = Duration::from_millis(200);

/// Removes the native presence plugin from `manifest`. Returns `false` when
/// the plugin was not listed (already stripped, or an unexpected layout).
fn strip_native_presence(manifest: &mut Value) -> bool {
    let Some(plugins) = manifest.get_mut("plugins").and_then(Value::as_array_mut) else {
        return false;
    };
    let before = plugins.len();
    plugins.retain(|p| p.get("name").and_then(Value::as_str) != Some(NATIVE_PRESENCE_PLUGIN));
    plugins.len() != before
}

fn manifest_path(league_dir: &Path) -> PathBuf {
    league_dir.join("Plugins").join("plugin-manifest.json")
}

/// Keeps the stripped manifest on disk until the client comes up (the
/// lockfile appears) or the timeout elapses. Transient write failures are
/// expected while the patcher holds the file and are simply retried.
pub async fn disable_native_presence(league_dir: &Path) {
    let path = manifest_path(league_dir);

    let mut manifest: Value = match std::fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|s| serde_json::from_str(&s).map_err(|e| e.to_string()))
    {
        Ok(m) => m,
        Err(e) => {
            tracing::warn!("Could not read plugin manifest at {}: {}", path.display(), e);
            return;
        }
    };

    if strip_native_presence(&mut manifest) {
        tracing::info!("Removed {} from the plugin manifest", NATIVE_PRESENCE_PLUGIN);
    }
    let stripped = manifest.to_string();

    let started = Instant::now();
    loop {
        if let Err(e) = std::fs::write(&path, &stripped) {
            tracing::debug!("Plugin manifest write failed (retrying): {}", e);
        }

        if Lockfile::path_for(league_dir).exists() {
            tracing::debug!("Client is up, native presence disabler done");
            break;
        }
        if started.elapsed() > REWRITE_TIMEOUT {
            tracing::debug!("Native presence disabler timed out waiting for the client");
            break;
        }
        tokio::time::sleep(REWRITE_INTERVAL).await;
    }
}
