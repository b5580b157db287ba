use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tunables of the keyboard coordinator.
///
/// Every field has a default matching the GTK embedder, so a settings file
/// only needs to list what it changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardSettings {
    /// Channel the legacy key event messages are sent on.
    pub key_event_channel: String,
    /// Channel answering `getKeyboardState`.
    pub keyboard_channel: String,
    /// `keymap` field of legacy key event messages.
    pub keymap: String,
    /// `toolkit` field of legacy key event messages.
    pub toolkit: String,
    pub embedder_responder: bool,
    pub channel_responder: bool,
    /// Whether releases are offered to the text input filter as well.
    pub text_input_filters_releases: bool,
}

impl Default for KeyboardSettings {
    fn default() -> Self {
        Self {
            key_event_channel: "flutter/keyevent".to_owned(),
            keyboard_channel: "flutter/keyboard".to_owned(),
            keymap: "linux".to_owned(),
            toolkit: "gtk".to_owned(),
            embedder_responder: true,
            channel_responder: true,
            text_input_filters_releases: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read keyboard settings from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid keyboard settings: {0}")]
    Parse(#[from] serde_json::Error),
}

impl KeyboardSettings {
    pub fn from_json_str(text: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|source| SettingsError::Io { path: path.display().to_string(), source })?;
        let settings = Self::from_json_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded keyboard settings");
        Ok(settings)
    }

    pub fn with_key_event_channel(mut self, channel: impl Into<String>) -> Self {
        self.key_event_channel = channel.into();
        self
    }

    pub fn with_keyboard_channel(mut self, channel: impl Into<String>) -> Self {
        self.keyboard_channel = channel.into();
        self
    }

    pub fn with_embedder_responder(mut self, enabled: bool) -> Self {
        self.embedder_responder = enabled;
        self
    }

    pub fn with_channel_responder(mut self, enabled: bool) -> Self {
        self.channel_responder = enabled;
        self
    }

    pub fn with_text_input_filters_releases(mut self, enabled: bool) -> Self {
        self.text_input_filters_releases = enabled;
        self
    }
}
