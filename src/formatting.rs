//! Message formatting: outgoing command prefixes and incoming display text.
//!
//! Outgoing: recognize /me, /tts and /ooc at the start of the typed line and
//! rewrite the body before the quirk engine sees it. Incoming: turn a raw
//! network message plus sender metadata into a display-ready line, or
//! nothing at all when the message should not be rendered.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::buffer::{DisplayMessage, MessageKind};
use crate::config::Options;
use crate::protocol::Sender;

/// An outgoing message body after prefix handling, ready for the quirk
/// engine and then the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outgoing {
    pub body: String,
    pub tts: bool,
}

/// Rewrite a raw typed line according to its command prefix.
///
/// Exactly one prefix form applies per message; they are checked in fixed
/// priority order /me, /tts, /ooc and the first match wins. Anything else,
/// including an unknown slash command, passes through verbatim.
pub fn format_outgoing(raw: &str) -> Outgoing {
    let message = raw.trim();

    if let Some(rest) = message.strip_prefix("/me") {
        return Outgoing {
            body: format!("_{}_", rest.trim_start()),
            tts: false,
        };
    }
    if let Some(rest) = message.strip_prefix("/tts ") {
        return Outgoing {
            body: rest.trim_start().to_string(),
            tts: true,
        };
    }
    if let Some(rest) = message.strip_prefix("/ooc") {
        return Outgoing {
            body: format!("(({}))", rest.trim_start()),
            tts: false,
        };
    }

    Outgoing {
        body: message.to_string(),
        tts: false,
    }
}

/// True when the body uses the action-marker convention (`_does a thing_`).
fn is_action(body: &str) -> bool {
    body.len() >= 2 && body.starts_with('_') && body.ends_with('_')
}

/// Strip network mention markup (`<@123456>` style) down to a plain `@id`
/// so the display layer never shows raw markup.
fn strip_mention_markup(body: &str) -> String {
    static MENTION_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"<@!?(\d+)>").expect("mention regex pattern is valid"));
    MENTION_RE.replace_all(body, "@$1").into_owned()
}

/// Format a received message for display.
///
/// Returns None when the message should be skipped entirely: empty body,
/// or a sender the user has chosen to ignore. Action-marked bodies render
/// as a third-person line under the sender's name; everything else is
/// direct speech.
pub fn fmt_disp_msg(
    text: &str,
    sender: &Sender,
    timestamp: &str,
    options: &Options,
) -> Option<DisplayMessage> {
    if options.is_ignored(&sender.name) {
        return None;
    }

    let body = strip_mention_markup(text.trim());
    if body.is_empty() {
        return None;
    }

    let (kind, body) = if is_action(&body) {
        (
            MessageKind::Action,
            body[1..body.len() - 1].trim().to_string(),
        )
    } else {
        (MessageKind::Speech, body)
    };
    if body.is_empty() {
        return None;
    }

    let mention = !options.nick.is_empty() && body.contains(options.nick.as_str());

    Some(DisplayMessage {
        timestamp: timestamp.to_string(),
        sender: sender.name.clone(),
        color: sender.rgb(),
        body,
        kind,
        mention,
    })
}
