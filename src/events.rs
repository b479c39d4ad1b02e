//! Transport event processing (incoming messages, presence, connection).

use chrono::Local;
use crossbeam_channel::Receiver;

use crate::formatting;
use crate::logging::LogEntry;
use crate::protocol::{ClientEvent, Presence};
use crate::state::ClientState;

/// Process all pending events from the transport.
pub fn process_events(event_rx: &Receiver<ClientEvent>, state: &mut ClientState) {
    // Drain everything queued since the last UI frame
    while let Ok(event) = event_rx.try_recv() {
        handle_event(event, state);
    }
}

fn handle_event(event: ClientEvent, state: &mut ClientState) {
    match event {
        ClientEvent::Connected => {
            state.is_connected = true;
            state.log_system("Connected and ready");
        }

        ClientEvent::Disconnected(reason) => {
            state.is_connected = false;
            state.log_system(&format!("Disconnected: {}", reason));
        }

        ClientEvent::Error(e) => {
            state.log_system(&format!("Error: {}", e));
        }

        ClientEvent::MessageReceived {
            target,
            sender,
            text,
        } => {
            let ts = Local::now().format("%H:%M:%S").to_string();
            let Some(msg) = formatting::fmt_disp_msg(&text, &sender, &ts, &state.options) else {
                // Filtered (ignored sender or empty body): skip rendering
                return;
            };

            if let Some(logger) = &state.logger {
                logger.log(LogEntry {
                    context: context_for(&target),
                    conversation: target.clone(),
                    line: msg.to_line(),
                });
            }

            let is_active = state.active_buffer == target;
            state.buffer_mut(&target).add_message(msg, is_active);
        }

        ClientEvent::PresenceChanged { name, presence } => {
            let mood = match presence {
                Presence::Online => "online",
                Presence::Idle => "idle",
                Presence::Invisible => "offline",
            };
            state.log_system(&format!("{} is now {}", name, mood));
        }
    }
}

/// Log-directory context for a conversation: channels group under their
/// leading marker, everything else is a direct message.
fn context_for(target: &str) -> String {
    if target.starts_with('#') {
        "channels".to_string()
    } else {
        "dm".to_string()
    }
}
