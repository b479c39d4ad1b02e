//! Channel protocol between the UI and the chat-network transport.
//!
//! The transport itself (wire protocol, reconnection, auth) is an external
//! library; this crate only defines the messages that cross the boundary.

/// Presence shown to other users, mirrored from the mood selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Online,
    Idle,
    Invisible,
}

/// Actions sent from the UI to the transport.
#[derive(Debug, Clone)]
pub enum ClientAction {
    /// Send a message to a conversation. `tts` asks the network to speak it.
    SendMessage {
        target: String,
        text: String,
        tts: bool,
    },
    /// Change our visible presence/mood.
    SetPresence(Presence),
    /// Disconnect from the network.
    Disconnect,
}

/// Who sent a message, as reported by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub name: String,
    /// Display color assigned by the network (role color or default).
    pub color: (u8, u8, u8),
}

impl Sender {
    pub fn new(name: &str, color: (u8, u8, u8)) -> Self {
        Self {
            name: name.to_string(),
            color,
        }
    }

    /// Stylesheet-ready `rgb(r,g,b)` string for the presentation layer.
    pub fn rgb(&self) -> String {
        let (r, g, b) = self.color;
        format!("rgb({},{},{})", r, g, b)
    }
}

/// Events delivered from the transport to the UI.
#[derive(Debug, Clone)]
pub enum ClientEvent {
    /// Logged in and ready.
    Connected,
    /// Connection lost or closed.
    Disconnected(String),
    /// Transport-level error worth surfacing to the user.
    Error(String),
    /// A message arrived for a conversation (channel or direct message).
    MessageReceived {
        target: String,
        sender: Sender,
        text: String,
    },
    /// Another user's presence changed.
    PresenceChanged { name: String, presence: Presence },
}
