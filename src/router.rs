//! Window procedure trampoline and per-thread handler routing.
//!
//! The OS calls [`window_proc`] for every message delivered to a window of a class registered
//! with it. The trampoline looks up the calling thread's [`CallbackRouter`], finds the handler
//! associated with the target window and lets it decide; anything the handler declines (and
//! every message for a window without a handler) goes to `DefWindowProcW` and its result is
//! returned unchanged.
//!
//! Routing state is thread-local: windows belong to the thread that created them and the OS
//! only ever invokes their procedure on that thread. The router must exist before windows are
//! created, since creation messages arrive before `CreateWindowExW` returns;
//! [`MessageWindow::create`](crate::window::MessageWindow::create) installs it.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tracing::{debug, trace, warn};

use crate::api::MessagingApi;
use crate::error::{Error, Result};
use crate::types::{LParam, LResult, MessageId, WParam, WindowHandle};

/// Single-method capability receiving messages for one window.
///
/// Return `Some(result)` to consume the message, `None` to forward it to the default
/// procedure. Handlers run synchronously on the window's thread; they may post new messages
/// but must not pump the queue themselves.
pub trait MessageHandler {
    fn on_message(
        &self,
        window: WindowHandle,
        message: MessageId,
        wparam: WParam,
        lparam: LParam,
    ) -> Option<LResult>;
}

impl<F> MessageHandler for F
where
    F: Fn(WindowHandle, MessageId, WParam, LParam) -> Option<LResult>,
{
    fn on_message(
        &self,
        window: WindowHandle,
        message: MessageId,
        wparam: WParam,
        lparam: LParam,
    ) -> Option<LResult> {
        self(window, message, wparam, lparam)
    }
}

thread_local! {
    static ACTIVE: RefCell<Option<Rc<CallbackRouter>>> = const { RefCell::new(None) };
}

/// Association table from window handle to handler, plus the API used for default handling.
pub struct CallbackRouter {
    api: Rc<dyn MessagingApi>,
    handlers: RefCell<HashMap<WindowHandle, Rc<dyn MessageHandler>>>,
}

impl CallbackRouter {
    /// Make a router active on the calling thread, or return the one already installed.
    ///
    /// A thread has one router and it forwards to one API. Installing again with a different
    /// `api` fails with [`Error::RouterConflict`].
    pub fn install(api: Rc<dyn MessagingApi>) -> Result<Rc<Self>> {
        ACTIVE.with(|slot| {
            let mut slot = slot.borrow_mut();
            if let Some(existing) = slot.as_ref() {
                if !std::ptr::addr_eq(Rc::as_ptr(&existing.api), Rc::as_ptr(&api)) {
                    return Err(Error::RouterConflict);
                }
                return Ok(existing.clone());
            }
            let router = Rc::new(Self {
                api,
                handlers: RefCell::new(HashMap::new()),
            });
            *slot = Some(router.clone());
            debug!("callback router installed");
            Ok(router)
        })
    }

    /// Router active on the calling thread.
    pub fn current() -> Option<Rc<Self>> {
        ACTIVE.with(|slot| slot.borrow().clone())
    }

    /// Route messages for `window` to `handler`, replacing any previous association.
    pub fn attach(&self, window: WindowHandle, handler: Rc<dyn MessageHandler>) {
        self.handlers.borrow_mut().insert(window, handler);
    }

    pub fn detach(&self, window: WindowHandle) -> Option<Rc<dyn MessageHandler>> {
        self.handlers.borrow_mut().remove(&window)
    }

    pub fn is_attached(&self, window: WindowHandle) -> bool {
        self.handlers.borrow().contains_key(&window)
    }

    /// Deliver one message: handler first, default procedure for anything it declines.
    pub fn route(
        &self,
        window: WindowHandle,
        message: MessageId,
        wparam: WParam,
        lparam: LParam,
    ) -> LResult {
        // Clone out of the table so a handler that triggers a nested send can re-enter.
        let handler = self.handlers.borrow().get(&window).cloned();
        if let Some(handler) = handler
            && let Some(result) = handler.on_message(window, message, wparam, lparam)
        {
            trace!(?window, message = message.0, result = result.0, "message handled");
            return result;
        }
        self.api.def_window_proc(window, message, wparam, lparam)
    }
}

/// Window procedure registered with every class created through this crate.
///
/// # Safety
/// Called by the OS (or a dispatch implementation) on the thread owning `window`.
pub unsafe extern "system" fn window_proc(
    window: WindowHandle,
    message: MessageId,
    wparam: WParam,
    lparam: LParam,
) -> LResult {
    match CallbackRouter::current() {
        Some(router) => router.route(window, message, wparam, lparam),
        None => default_without_router(window, message, wparam, lparam),
    }
}

/// Windows reaching the trampoline on a thread without a router still get default handling.
#[cfg(windows)]
fn default_without_router(
    window: WindowHandle,
    message: MessageId,
    wparam: WParam,
    lparam: LParam,
) -> LResult {
    match crate::win32::User32::load() {
        Ok(api) => {
            trace!(?window, message = message.0, "no router on this thread; default procedure");
            api.def_window_proc(window, message, wparam, lparam)
        }
        Err(e) => {
            warn!(?window, message = message.0, error = %e, "no default window procedure");
            LResult(0)
        }
    }
}

#[cfg(not(windows))]
fn default_without_router(
    window: WindowHandle,
    message: MessageId,
    _wparam: WParam,
    _lparam: LParam,
) -> LResult {
    warn!(?window, message = message.0, "no router installed on this thread");
    LResult(0)
}
