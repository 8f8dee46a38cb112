mod client;
mod events;
pub mod types;

pub use client::{LcuClient, LcuError, Lockfile};
pub use events::{EventKind, EventSocket, LcuEvent};
