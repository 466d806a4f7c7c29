mod interaction;
mod persistence;

pub use interaction::{Interaction, InteractionState, TextEntry};
pub use persistence::{Settings, SettingsResult};
