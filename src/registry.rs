//! Message name registration.
//!
//! `RegisterWindowMessageW` maps a name to an identifier in the registered range. The OS keeps
//! one table per session, so two processes registering the same name get the same identifier;
//! that shared number is the whole addressing scheme between the endpoints.

use tracing::debug;

use crate::api::{MessagingApi, wide_name};
use crate::error::{Error, Result};
use crate::types::MessageId;

/// Resolve `name` to its session-wide message identifier.
pub fn register_message(api: &dyn MessagingApi, name: &str) -> Result<MessageId> {
    let wide = wide_name("message", name)?;
    let id = api.register_window_message(&wide);
    if id == 0 {
        return Err(Error::MessageRegistration {
            name: name.to_string(),
            code: api.last_error(),
        });
    }
    debug!(name, id = format!("0x{id:04X}"), "window message registered");
    Ok(MessageId(id))
}
