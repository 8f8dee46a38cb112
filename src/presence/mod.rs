mod discord;
mod traits;

pub use discord::DiscordPresence;
pub use traits::{Payload, PayloadButton, PresenceProvider};
