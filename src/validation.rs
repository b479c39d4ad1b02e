//! Outbound message hygiene for the chat network.

/// Maximum message length accepted by the network.
pub const MAX_MESSAGE_LEN: usize = 2000;

/// Validates an outgoing message before it is handed to the transport.
pub fn validate_message(msg: &str) -> Result<(), String> {
    if msg.is_empty() {
        return Err("Message cannot be empty".to_string());
    }

    if msg.chars().count() > MAX_MESSAGE_LEN {
        return Err(format!(
            "Message too long (max {} characters)",
            MAX_MESSAGE_LEN
        ));
    }

    // Messages cannot contain CR or LF; multi-line input is sent as one line
    if msg.contains('\r') || msg.contains('\n') {
        return Err("Message cannot contain newline characters".to_string());
    }

    Ok(())
}

/// Sanitizes a message by removing invalid characters and truncating to the
/// network limit.
pub fn sanitize_message(msg: &str) -> String {
    msg.chars()
        .filter(|&c| c != '\r' && c != '\n' && c != '\0')
        .take(MAX_MESSAGE_LEN)
        .collect()
}
