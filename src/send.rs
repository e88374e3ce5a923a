//! Sending side: post, send, broadcast and quit.

use tracing::{debug, warn};

use crate::api::MessagingApi;
use crate::constants::{HWND_BROADCAST, WM_QUIT};
use crate::error::{Error, Result};
use crate::types::{LParam, LResult, MessageId, WParam, WindowHandle};

/// Queue `message` for `target` without waiting for it to be processed.
pub fn post_message(
    api: &dyn MessagingApi,
    target: WindowHandle,
    message: MessageId,
    wparam: WParam,
    lparam: LParam,
) -> Result<()> {
    if api.post_message(target, message, wparam, lparam) {
        debug!(?target, message = message.0, wparam = wparam.0, "message posted");
        Ok(())
    } else {
        let code = api.last_error();
        warn!(?target, message = message.0, code, "PostMessageW failed");
        Err(Error::Post {
            message: message.0,
            code,
        })
    }
}

/// Deliver `message` to `target` synchronously and return its window procedure's result.
pub fn send_message(
    api: &dyn MessagingApi,
    target: WindowHandle,
    message: MessageId,
    wparam: WParam,
    lparam: LParam,
) -> LResult {
    api.send_message(target, message, wparam, lparam)
}

/// Post `message` to every top-level window in the session.
///
/// Message-only windows do not receive broadcasts; the counterpart learns this endpoint's handle
/// from `wparam` and replies to it directly.
pub fn broadcast(
    api: &dyn MessagingApi,
    message: MessageId,
    wparam: WParam,
    lparam: LParam,
) -> Result<()> {
    post_message(api, HWND_BROADCAST, message, wparam, lparam)
}

/// Post `WM_QUIT` to the queue of `thread_id`, stopping its pump with `exit_code`.
///
/// Safe to call from any thread; this is how a Ctrl+C handler stops the loop.
pub fn post_quit(api: &dyn MessagingApi, thread_id: u32, exit_code: usize) -> Result<()> {
    if api.post_thread_message(thread_id, WM_QUIT, WParam(exit_code), LParam(0)) {
        debug!(thread_id, exit_code, "WM_QUIT posted");
        Ok(())
    } else {
        Err(Error::Post {
            message: WM_QUIT.0,
            code: api.last_error(),
        })
    }
}
