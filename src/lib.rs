//! Pester Client core library.
//!
//! The reusable core of a Pesterchum-style instant messenger: the quirk
//! transformation pipeline, message formatting, session state, and the
//! channel protocol the GUI and network transport plug into.

pub mod buffer;
pub mod config;
pub mod events;
pub mod formatting;
pub mod logging;
pub mod protocol;
pub mod quirks;
pub mod state;
pub mod validation;
