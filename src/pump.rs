//! Blocking GetMessage / TranslateMessage / DispatchMessage loop.
//!
//! The pump owns no windows; it drains the calling thread's queue unfiltered and hands every
//! message to `DispatchMessageW`, which invokes the target window's procedure synchronously.
//! It stops when `GetMessageW` reports `WM_QUIT` (return value zero) and never dispatches again
//! afterwards. Posting `WM_QUIT` to the owning thread is the only way to stop it.

use tracing::{debug, error, trace};

use crate::api::MessagingApi;
use crate::error::{Error, Result};
use crate::types::{Msg, WindowHandle};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PumpState {
    Running,
    Stopped,
}

/// Outcome of a single pump iteration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Dispatched(Msg),
    /// `WM_QUIT` retrieved; carries its `wParam` exit code.
    Quit(usize),
}

pub struct MessagePump<'a> {
    api: &'a dyn MessagingApi,
    state: PumpState,
    dispatched: u64,
    exit_code: usize,
}

impl<'a> MessagePump<'a> {
    pub fn new(api: &'a dyn MessagingApi) -> Self {
        Self {
            api,
            state: PumpState::Running,
            dispatched: 0,
            exit_code: 0,
        }
    }

    pub fn state(&self) -> PumpState {
        self.state
    }

    /// Number of messages dispatched so far.
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    /// Retrieve, translate and dispatch one message (blocks until one is queued).
    pub fn step(&mut self) -> Result<Step> {
        if self.state == PumpState::Stopped {
            return Ok(Step::Quit(self.exit_code));
        }
        let mut msg = Msg::default();
        match self.api.get_message(&mut msg, WindowHandle::NULL, 0, 0) {
            -1 => {
                let code = self.api.last_error();
                error!(code, "GetMessageW failed");
                Err(Error::MessageRetrieval { code })
            }
            0 => {
                self.state = PumpState::Stopped;
                self.exit_code = msg.wparam.0;
                debug!(
                    exit_code = self.exit_code,
                    dispatched = self.dispatched,
                    "WM_QUIT received; pump stopped"
                );
                Ok(Step::Quit(self.exit_code))
            }
            _ => {
                let _ = self.api.translate_message(&msg);
                let result = self.api.dispatch_message(&msg);
                self.dispatched += 1;
                trace!(
                    hwnd = ?msg.hwnd,
                    message = msg.message.0,
                    result = result.0,
                    "message dispatched"
                );
                Ok(Step::Dispatched(msg))
            }
        }
    }

    /// Pump until `WM_QUIT`; returns its exit code.
    pub fn run(&mut self) -> Result<usize> {
        loop {
            if let Step::Quit(code) = self.step()? {
                return Ok(code);
            }
        }
    }
}
