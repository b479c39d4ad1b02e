/// Maximum messages to keep in a conversation before trimming
const MAX_BUFFER_MESSAGES: usize = 2000;
/// Number of oldest messages to remove when trimming
const BUFFER_TRIM_COUNT: usize = 500;

/// How a message line should be rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MessageKind {
    /// Direct speech: `sender: body`.
    Speech,
    /// Third-person action line: `sender body`.
    Action,
    /// Client-generated notice (joins, errors, etc.).
    System,
}

/// A display-ready message with timestamp and sender styling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayMessage {
    pub timestamp: String,
    pub sender: String,
    /// `rgb(r,g,b)` color string for the sender's name.
    pub color: String,
    pub body: String,
    pub kind: MessageKind,
    /// Whether the body mentions our nick.
    pub mention: bool,
}

impl DisplayMessage {
    /// Plain-text rendering, used for chat logs and tests. The presentation
    /// layer does its own styled rendering from the fields directly.
    pub fn to_line(&self) -> String {
        match self.kind {
            MessageKind::Speech => format!("[{}] {}: {}", self.timestamp, self.sender, self.body),
            MessageKind::Action => format!("[{}] {} {}", self.timestamp, self.sender, self.body),
            MessageKind::System => format!("[{}] * {}", self.timestamp, self.body),
        }
    }
}

/// One conversation (channel or direct message) worth of history.
#[derive(Default, Clone)]
pub struct ConversationBuffer {
    pub messages: Vec<DisplayMessage>,
    /// Number of unread messages
    pub unread_count: usize,
    /// Whether there is a mention in unread messages
    pub has_mention: bool,
}

impl ConversationBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_message(&mut self, msg: DisplayMessage, is_active: bool) {
        let mention = msg.mention;
        self.messages.push(msg);
        if !is_active {
            self.unread_count += 1;
            if mention {
                self.has_mention = true;
            }
        }
        // Trim old messages if the buffer gets too large
        if self.messages.len() > MAX_BUFFER_MESSAGES {
            self.messages.drain(0..BUFFER_TRIM_COUNT);
        }
    }

    pub fn clear_unread(&mut self) {
        self.unread_count = 0;
        self.has_mention = false;
    }
}
