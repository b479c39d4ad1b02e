//! Core session state, separated from UI logic.
//!
//! `ClientState` holds everything that represents the chat session:
//! options, profile, conversation buffers, and the system log. UI
//! components receive it as a parameter rather than owning pieces of it.

use std::collections::HashMap;

use chrono::Local;
use crossbeam_channel::Sender;

use crate::buffer::ConversationBuffer;
use crate::config::{Options, Profile};
use crate::formatting;
use crate::logging::Logger;
use crate::protocol::{ClientAction, Presence};
use crate::validation;

/// Core application state for the chat client.
#[derive(Default)]
pub struct ClientState {
    /// Whether we are currently connected to the network.
    pub is_connected: bool,

    /// Client options (nick, theme, ignore list).
    pub options: Options,

    /// Our profile: color and the quirk set for outgoing messages.
    pub profile: Profile,

    /// Conversation buffers keyed by target name.
    pub buffers: HashMap<String, ConversationBuffer>,

    /// Ordered list of buffer names (for sidebar display).
    pub buffers_order: Vec<String>,

    /// Currently active/visible conversation.
    pub active_buffer: String,

    /// System log messages (shown in the system buffer).
    pub system_log: Vec<String>,

    /// Chat logger for persisting messages to disk.
    pub logger: Option<Logger>,
}

impl ClientState {
    pub fn new(options: Options, profile: Profile) -> Self {
        Self {
            options,
            profile,
            ..Self::default()
        }
    }

    /// Get or create the buffer for a conversation, keeping the sidebar
    /// order stable.
    pub fn buffer_mut(&mut self, target: &str) -> &mut ConversationBuffer {
        if !self.buffers.contains_key(target) {
            self.buffers_order.push(target.to_string());
        }
        self.buffers.entry(target.to_string()).or_default()
    }

    /// Format, quirk and send a typed message to `target`.
    ///
    /// The full outbound path: command-prefix handling, then the quirk
    /// pipeline over a snapshot of the profile's rule list, then transport
    /// sanitization. Quirk warnings land in the system log; an empty result
    /// after processing is dropped rather than sent.
    pub fn send_message(&mut self, target: &str, raw: &str, action_tx: &Sender<ClientAction>) {
        let outgoing = formatting::format_outgoing(raw);

        // Snapshot the rule list so a concurrent quirk edit never changes
        // the sequence mid-message.
        let quirks = self.profile.quirks.clone();
        let processed = quirks.process(&outgoing.body);
        for warning in &processed.warnings {
            self.log_system(warning);
        }

        let text = validation::sanitize_message(&processed.text);
        if let Err(e) = validation::validate_message(&text) {
            self.log_system(&format!("Not sent: {}", e));
            return;
        }

        let _ = action_tx.send(ClientAction::SendMessage {
            target: target.to_string(),
            text,
            tts: outgoing.tts,
        });
    }

    /// Mirror a mood change to the network.
    pub fn set_presence(&self, presence: Presence, action_tx: &Sender<ClientAction>) {
        let _ = action_tx.send(ClientAction::SetPresence(presence));
    }

    /// Append a timestamped line to the system log.
    pub fn log_system(&mut self, message: &str) {
        let ts = Local::now().format("%H:%M:%S").to_string();
        self.system_log.push(format!("[{}] {}", ts, message));
    }
}
