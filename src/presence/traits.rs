use std::time::SystemTime;

/// A fully formatted rich-presence update, independent of any provider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload {
    pub details: Option<String>,
    pub state: Option<String>,
    pub large_image: Option<String>,
    pub large_text: Option<String>,
    pub small_image: Option<String>,
    pub small_text: Option<String>,
    /// Elapsed-time anchor shown by Discord as "xx:xx elapsed".
    pub start: Option<SystemTime>,
    /// `(current, max)` party size.
    pub party: Option<(u32, u32)>,
    pub buttons: Vec<PayloadButton>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadButton {
    pub label: String,
    pub url: String,
}

/// Trait for presence providers (Discord today, possibly others).
pub trait PresenceProvider: Send + Sync {
    /// Returns the name of this presence provider (for logging)
    fn name(&self) -> &'static str;

    /// Update the displayed presence
    fn update_presence(&self, payload: &Payload);

    /// Clear all presence data
    fn clear_presence(&self);
}
